pub mod error;
pub mod ordering;
pub mod path;
pub mod selection;
pub mod types;

// Keep the public surface small and intentional.
pub use error::*;
pub use ordering::*;
pub use selection::*;
pub use types::*;

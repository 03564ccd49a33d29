pub mod commands;
pub mod dispatch;
pub mod error;
pub mod memory;
pub mod session;
pub mod traits;

pub mod backup;
pub mod config_store;
pub mod fs_util;
pub mod paths;
pub mod service;

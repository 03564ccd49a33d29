use dictstack_core::error::DictError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Dict(#[from] DictError),

    #[error("dictionary host failed: {0:#}")]
    Host(anyhow::Error),

    #[error("solo backup failed: {0:#}")]
    Backup(anyhow::Error),

    #[error("unknown dictionary command: {0:?}")]
    UnknownCommand(String),
}

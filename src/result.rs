use compact_str::CompactString;
use confy::ConfyError;
use thiserror::Error;

use crate::client::ClientError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Failure reading configuration file: {0}")]
    ConfigFile(#[source] ConfyError),
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    GeneralError(CompactString),
}

impl AppError {
    /// Process exit status reported for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Terminal initialization failed: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

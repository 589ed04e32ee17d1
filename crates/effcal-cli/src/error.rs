use effcal::core::io::error::CodecError;
use effcal::engine::error::CalibrationError;
use effcal::engine::evaluator::EvalError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Evaluation(#[from] EvalError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

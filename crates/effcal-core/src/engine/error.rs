use thiserror::Error;

use super::config::ConfigError;
use super::evaluator::EvalError;
use crate::core::io::error::CodecError;
use crate::core::math::orthogonal::FitError;

#[derive(Debug, Error)]
pub enum CalibrationError {
    #[error("Calibration file error: {source}")]
    Codec {
        #[from]
        source: CodecError,
    },

    #[error("Invalid fit configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Fit of zone #{zone} failed: {source}")]
    ZoneFit {
        zone: usize,
        #[source]
        source: FitError,
    },

    #[error("Point at {energy} keV has a non-positive efficiency ({efficiency})")]
    InvalidPoint { energy: f64, efficiency: f64 },

    #[error(
        "Point at {energy} keV has no usable uncertainty ({deff}%) for inverse-variance weighting"
    )]
    InvalidUncertainty { energy: f64, deff: f64 },

    #[error("Evaluation failed: {source}")]
    Evaluation {
        #[from]
        source: EvalError,
    },

    #[error("Resampling grid contains no energies")]
    EmptyGrid,
}

use serde::Serialize;

/// One sample of an evaluated efficiency curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveSample {
    pub energy: f64,
    pub efficiency: f64,
    pub uncertainty: f64, // Relative
}

use crate::core::models::curve::CurveSample;
use crate::core::models::point::EffPoint;
use crate::core::models::record::CalibrationRecord;
use crate::engine::error::CalibrationError;
use crate::engine::evaluator::{EvalError, ZoneEvaluator};
use tracing::{info, instrument};

/// Nuclide label given to synthesised points and to the resampled record name.
pub const RESAMPLED_NUCLIDE: &str = "nuclide";

const RESAMPLED_AREA: f64 = 100.0;
const RESAMPLED_DAREA: f64 = 1.0;
const RESAMPLED_INTENSITY: f64 = 1.0;

/// Energies (keV) to evaluate a calibration on.
#[derive(Debug, Clone, PartialEq)]
pub enum EnergyGrid {
    Explicit(Vec<f64>),
    Linear { start: f64, end: f64, points: usize },
    /// Geometric spacing between `start` and `end`.
    Log { start: f64, end: f64, points: usize },
}

impl EnergyGrid {
    /// Endpoints are included; a single point yields `start`.
    pub fn energies(&self) -> Vec<f64> {
        match self {
            Self::Explicit(energies) => energies.clone(),
            Self::Linear { start, end, points } => spaced(*points, |t| start + t * (end - start)),
            Self::Log { start, end, points } => {
                let ratio = end / start;
                spaced(*points, |t| start * ratio.powf(t))
            }
        }
    }
}

fn spaced(points: usize, at: impl Fn(f64) -> f64) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![at(0.0)],
        n => {
            let last = (n - 1) as f64;
            (0..n).map(|i| at(i as f64 / last)).collect()
        }
    }
}

/// Evaluates the calibration at each energy.
pub fn tabulate(
    record: &CalibrationRecord,
    energies: &[f64],
) -> Result<Vec<CurveSample>, EvalError> {
    let evaluator = ZoneEvaluator::new(&record.zones)?;
    energies
        .iter()
        .map(|&energy| {
            let (efficiency, uncertainty) = evaluator.evaluate(energy)?;
            Ok(CurveSample {
                energy,
                efficiency,
                uncertainty,
            })
        })
        .collect()
}

/// Builds an EFR-named record whose points sample the fitted calibration.
///
/// Without a grid the record's own point energies are used. Uncertainties are
/// stored as percentages, matching measured points.
#[instrument(skip_all, name = "resample_workflow", fields(record = %record.name))]
pub fn run(
    record: &CalibrationRecord,
    grid: Option<&EnergyGrid>,
) -> Result<CalibrationRecord, CalibrationError> {
    let energies = match grid {
        Some(grid) => grid.energies(),
        None => record.points.iter().map(|p| p.energy).collect(),
    };
    if energies.is_empty() {
        return Err(CalibrationError::EmptyGrid);
    }

    let points = tabulate(record, &energies)?
        .into_iter()
        .map(|s| {
            EffPoint::new(
                s.energy,
                s.efficiency,
                100.0 * s.uncertainty,
                RESAMPLED_NUCLIDE,
                RESAMPLED_AREA,
                RESAMPLED_DAREA,
                RESAMPLED_INTENSITY,
            )
        })
        .collect();

    let mut resampled = record.clone();
    resampled.points = points;
    resampled.to_efr_name(RESAMPLED_NUCLIDE);
    info!(
        points = resampled.points.len(),
        "Resampled calibration into {}.",
        resampled.name
    );
    Ok(resampled)
}

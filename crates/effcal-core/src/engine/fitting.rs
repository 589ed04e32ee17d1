use super::config::{FitConfig, Weighting, ZoneConfig};
use super::error::CalibrationError;
use crate::core::math::orthogonal;
use crate::core::models::point::EffPoint;
use crate::core::models::record::CalibrationRecord;
use crate::core::models::zone::Zone;
use tracing::{debug, info};

/// Regression weight of a single point.
pub fn sample_weight(point: &EffPoint, weighting: Weighting) -> Result<f64, CalibrationError> {
    match weighting {
        Weighting::Uniform => Ok(1.0),
        Weighting::InverseVariance => {
            let sigma = (1.0 + point.deff / 100.0).log10();
            if point.deff.is_finite() && sigma > 0.0 {
                Ok(1.0 / (sigma * sigma))
            } else {
                Err(CalibrationError::InvalidUncertainty {
                    energy: point.energy,
                    deff: point.deff,
                })
            }
        }
    }
}

/// Fits one zone over the points whose energy falls inside its boundaries (inclusive).
///
/// `index` is the 1-based zone number used in error reports.
pub fn fit_zone(
    points: &[EffPoint],
    config: &ZoneConfig,
    weighting: Weighting,
    index: usize,
) -> Result<Zone, CalibrationError> {
    let (left, right) = config.log_bounds();

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut w = Vec::new();
    for point in points.iter().filter(|p| p.energy > 0.0) {
        let log_energy = point.energy.log10();
        if log_energy < left || log_energy > right {
            continue;
        }
        let (lx, ly) = point
            .log_coordinates()
            .ok_or(CalibrationError::InvalidPoint {
                energy: point.energy,
                efficiency: point.efficiency,
            })?;
        x.push(lx);
        y.push(ly);
        w.push(sample_weight(point, weighting)?);
    }

    let weights = match weighting {
        Weighting::Uniform => None,
        Weighting::InverseVariance => Some(w.as_slice()),
    };
    let fit = orthogonal::fit(&x, &y, weights, config.degree).map_err(|source| {
        CalibrationError::ZoneFit {
            zone: index,
            source,
        }
    })?;
    debug!(
        zone = index,
        samples = x.len(),
        deviation = fit.deviation,
        "Fitted zone {:.1}-{:.1} keV.",
        config.left,
        config.right
    );

    let mut zone = Zone::new(config.degree, left, right, fit.deviation);
    zone.main_coeffs = fit.main_coeffs;
    zone.orth_coeffs = fit.basis;
    Ok(zone)
}

/// Replaces the record's zones with fresh fits; the record is untouched on failure.
pub fn fit_record(
    record: &mut CalibrationRecord,
    config: &FitConfig,
) -> Result<(), CalibrationError> {
    let mut zones = config
        .zones
        .iter()
        .enumerate()
        .map(|(i, zone)| fit_zone(&record.points, zone, config.weighting, i + 1))
        .collect::<Result<Vec<_>, _>>()?;
    zones.sort_by(|a, b| a.left.total_cmp(&b.left));

    info!(
        record = %record.name,
        zones = zones.len(),
        points = record.points.len(),
        "Calibration fit complete."
    );
    record.zones = zones;
    Ok(())
}

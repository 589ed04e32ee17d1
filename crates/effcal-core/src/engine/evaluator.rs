//! Evaluates a piecewise zone calibration at arbitrary energies.
//!
//! Inside a single zone the zone's polynomial is used directly. Below the
//! first zone or above the last one, the nearest zone is extrapolated. Where
//! two neighbouring zones overlap, or where a gap separates them, both
//! polynomials are evaluated and blended linearly across the interval so the
//! curve stays continuous at the interval ends.

use crate::core::models::record::CalibrationRecord;
use crate::core::models::zone::Zone;
use itertools::Itertools;
use std::f64::consts::LN_10;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("Energy must be positive and finite (got {0} keV)")]
    InvalidEnergy(f64),

    #[error("The calibration has no fitted zones")]
    NoZones,

    #[error("Zone #{zone} has {main} main coefficient(s) but {rows} basis row(s)")]
    MalformedZone {
        zone: usize,
        main: usize,
        rows: usize,
    },

    #[error("Zone #{zone} has invalid bounds [{left}, {right}]")]
    InvalidBounds { zone: usize, left: f64, right: f64 },

    #[error("Zone #{zone} starts before zone #{previous}")]
    ZonesOutOfOrder { previous: usize, zone: usize },

    #[error("Zones #{first} and #{second} overlap but are not neighbours")]
    NonAdjacentOverlap { first: usize, second: usize },
}

/// `(log10(efficiency), relative uncertainty)` of a single zone at `x = log10(energy)`.
pub fn zone_value(zone: &Zone, x: f64) -> (f64, f64) {
    let (log_eff, variance) = zone
        .basis_values(x)
        .iter()
        .zip(&zone.main_coeffs)
        .fold((0.0, 0.0), |(sum, var), (g, c)| {
            (sum + c * g, var + (c * g).powi(2))
        });
    (log_eff, variance.sqrt() * LN_10 * zone.deviation)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Segment {
    Single(usize),
    // Blend zone `left` with zone `left + 1` across [lo, hi]
    Blend { left: usize, lo: f64, hi: f64 },
}

pub struct ZoneEvaluator<'a> {
    zones: &'a [Zone],
}

impl<'a> ZoneEvaluator<'a> {
    /// Checks that there is at least one zone, every zone is evaluable, and the
    /// zones are ordered by `left` with overlaps only between neighbours.
    pub fn new(zones: &'a [Zone]) -> Result<Self, EvalError> {
        if zones.is_empty() {
            return Err(EvalError::NoZones);
        }
        if let Some((i, zone)) = zones.iter().enumerate().find(|(_, z)| !z.is_evaluable()) {
            return Err(EvalError::MalformedZone {
                zone: i + 1,
                main: zone.main_coeffs.len(),
                rows: zone.orth_coeffs.len(),
            });
        }
        if let Some((i, zone)) = zones
            .iter()
            .enumerate()
            .find(|(_, z)| !(z.left.is_finite() && z.right.is_finite() && z.left <= z.right))
        {
            return Err(EvalError::InvalidBounds {
                zone: i + 1,
                left: zone.left,
                right: zone.right,
            });
        }
        if let Some((i, _)) = zones
            .iter()
            .tuple_windows()
            .enumerate()
            .find(|(_, (zone, next))| next.left < zone.left)
        {
            return Err(EvalError::ZonesOutOfOrder {
                previous: i + 1,
                zone: i + 2,
            });
        }
        for (i, zone) in zones.iter().enumerate() {
            if let Some(far) = zones
                .iter()
                .enumerate()
                .skip(i + 2)
                .find(|(_, far)| far.left <= zone.right)
                .map(|(j, _)| j)
            {
                return Err(EvalError::NonAdjacentOverlap {
                    first: i + 1,
                    second: far + 1,
                });
            }
        }
        Ok(Self { zones })
    }

    /// Efficiency and relative uncertainty at `energy` keV.
    pub fn evaluate(&self, energy: f64) -> Result<(f64, f64), EvalError> {
        if !(energy.is_finite() && energy > 0.0) {
            return Err(EvalError::InvalidEnergy(energy));
        }
        let (log_eff, log_deff) = self.evaluate_log(energy.log10());
        Ok((10f64.powf(log_eff), log_deff))
    }

    /// `(log10(efficiency), relative uncertainty)` at `x = log10(energy)`.
    pub fn evaluate_log(&self, x: f64) -> (f64, f64) {
        match self.locate(x) {
            Segment::Single(i) => zone_value(&self.zones[i], x),
            Segment::Blend { left, lo, hi } => {
                let (a_eff, a_deff) = zone_value(&self.zones[left], x);
                let (b_eff, b_deff) = zone_value(&self.zones[left + 1], x);
                let t = if hi > lo { (x - lo) / (hi - lo) } else { 0.0 };
                (
                    (1.0 - t) * a_eff + t * b_eff,
                    (1.0 - t) * a_deff + t * b_deff,
                )
            }
        }
    }

    pub(crate) fn locate(&self, x: f64) -> Segment {
        let last = self.zones.len() - 1;
        if x < self.zones[0].left {
            return Segment::Single(0);
        }
        if x > self.zones[last].right {
            return Segment::Single(last);
        }
        for (i, (zone, next)) in self.zones.iter().tuple_windows().enumerate() {
            if zone.right >= next.left {
                if next.left <= x && x <= zone.right {
                    return Segment::Blend {
                        left: i,
                        lo: next.left,
                        hi: zone.right,
                    };
                }
            } else if zone.right < x && x < next.left {
                return Segment::Blend {
                    left: i,
                    lo: zone.right,
                    hi: next.left,
                };
            }
            if zone.contains(x) {
                return Segment::Single(i);
            }
        }
        Segment::Single(last)
    }
}

/// Efficiency and relative uncertainty of a fitted record at `energy` keV.
pub fn evaluate(record: &CalibrationRecord, energy: f64) -> Result<(f64, f64), EvalError> {
    ZoneEvaluator::new(&record.zones)?.evaluate(energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::efa::EfaFile;
    use crate::core::io::traits::CalibrationFile;

    // log10(eff) = a + b·x on [left, right], expressed with the basis {1, x − mean}.
    fn linear_zone(left: f64, right: f64, a: f64, b: f64, deviation: f64) -> Zone {
        let mean = 0.5 * (left + right);
        let mut zone = Zone::new(1, left, right, deviation);
        zone.orth_coeffs = vec![vec![1.0], vec![-mean, 1.0]];
        zone.main_coeffs = vec![a + b * mean, b];
        zone
    }

    fn two_zones_overlapping() -> Vec<Zone> {
        vec![
            linear_zone(1.0, 2.0, -1.0, 0.2, 0.01),
            linear_zone(1.5, 3.0, -0.5, -0.3, 0.02),
        ]
    }

    #[test]
    fn single_zone_is_evaluated_directly() {
        let zones = vec![linear_zone(1.0, 3.0, -1.0, 0.5, 0.0)];
        let eval = ZoneEvaluator::new(&zones).unwrap();
        let (eff, deff) = eval.evaluate(100.0).unwrap();
        assert!((eff - 1.0).abs() < 1e-12);
        assert_eq!(deff, 0.0);
    }

    #[test]
    fn uncertainty_scales_with_deviation() {
        let zone = linear_zone(1.0, 3.0, -1.0, 0.5, 0.1);
        let (_, deff) = zone_value(&zone, 2.0);
        let g: Vec<f64> = zone.basis_values(2.0);
        let expected = (zone.main_coeffs[0] * g[0]).hypot(zone.main_coeffs[1] * g[1]) * LN_10 * 0.1;
        assert!((deff - expected).abs() < 1e-12);
    }

    #[test]
    fn energies_outside_all_zones_extrapolate_the_nearest_zone() {
        let zones = two_zones_overlapping();
        let eval = ZoneEvaluator::new(&zones).unwrap();
        assert_eq!(eval.locate(0.5), Segment::Single(0));
        assert_eq!(eval.locate(3.5), Segment::Single(1));
        let (log_eff, _) = eval.evaluate_log(0.5);
        assert!((log_eff - (-1.0 + 0.2 * 0.5)).abs() < 1e-12);
    }

    #[test]
    fn overlap_blend_is_continuous_at_both_ends() {
        let zones = two_zones_overlapping();
        let eval = ZoneEvaluator::new(&zones).unwrap();
        let eps = 1e-9;

        let (inside_first, _) = zone_value(&zones[0], 1.5 - eps);
        let (at_start, _) = eval.evaluate_log(1.5);
        assert!((inside_first - at_start).abs() < 1e-6);

        let (inside_second, _) = zone_value(&zones[1], 2.0 + eps);
        let (at_end, _) = eval.evaluate_log(2.0);
        assert!((inside_second - at_end).abs() < 1e-6);

        assert_eq!(
            eval.locate(1.75),
            Segment::Blend {
                left: 0,
                lo: 1.5,
                hi: 2.0
            }
        );
    }

    #[test]
    fn gap_blend_is_continuous_at_both_ends() {
        let zones = vec![
            linear_zone(1.0, 2.0, -1.0, 0.2, 0.01),
            linear_zone(2.5, 3.0, -0.5, -0.3, 0.02),
        ];
        let eval = ZoneEvaluator::new(&zones).unwrap();
        let eps = 1e-9;

        let (before, _) = eval.evaluate_log(2.0);
        let (after_start, _) = eval.evaluate_log(2.0 + eps);
        assert!((before - after_start).abs() < 1e-6);

        let (before_end, _) = eval.evaluate_log(2.5 - eps);
        let (in_second, _) = eval.evaluate_log(2.5);
        assert!((before_end - in_second).abs() < 1e-6);
    }

    #[test]
    fn zero_width_blend_uses_the_left_zone() {
        let zones = vec![
            linear_zone(1.0, 2.0, -1.0, 0.2, 0.01),
            linear_zone(2.0, 3.0, -0.5, -0.3, 0.02),
        ];
        let eval = ZoneEvaluator::new(&zones).unwrap();
        assert_eq!(eval.evaluate_log(2.0), zone_value(&zones[0], 2.0));
    }

    #[test]
    fn invalid_energy_and_missing_zones_are_errors() {
        let zones = two_zones_overlapping();
        let eval = ZoneEvaluator::new(&zones).unwrap();
        assert_eq!(eval.evaluate(0.0), Err(EvalError::InvalidEnergy(0.0)));
        assert!(matches!(
            eval.evaluate(f64::NAN),
            Err(EvalError::InvalidEnergy(_))
        ));
        assert!(matches!(ZoneEvaluator::new(&[]), Err(EvalError::NoZones)));
    }

    #[test]
    fn zone_without_enough_basis_rows_is_malformed() {
        let mut zone = linear_zone(1.0, 2.0, -1.0, 0.2, 0.01);
        zone.orth_coeffs.pop();
        let zones = vec![zone];
        assert_eq!(
            ZoneEvaluator::new(&zones).err(),
            Some(EvalError::MalformedZone {
                zone: 1,
                main: 2,
                rows: 1
            })
        );
    }

    #[test]
    fn zones_read_out_of_order_are_rejected() {
        let text = "\
[D;G]
Zones=2
Zone_1=0,2.4,3.5,0.0
Curve_1_1=1.0
Curve_1=-3.0
Zone_2=0,1.5,2.6,0.0
Curve_2_1=1.0
Curve_2=-1.0
";
        let record = EfaFile::read_from(&mut text.as_bytes(), 0).unwrap().unwrap();
        assert_eq!(
            evaluate(&record, 100.0),
            Err(EvalError::ZonesOutOfOrder {
                previous: 1,
                zone: 2
            })
        );

        let mut sorted = record.clone();
        sorted.zones.reverse();
        let (eff, _) = evaluate(&sorted, 100.0).unwrap();
        assert!((eff - 0.1).abs() < 1e-12);
    }

    #[test]
    fn inverted_zone_bounds_are_rejected() {
        let zones = vec![linear_zone(2.0, 1.0, -1.0, 0.2, 0.01)];
        assert!(matches!(
            ZoneEvaluator::new(&zones),
            Err(EvalError::InvalidBounds { zone: 1, .. })
        ));
    }

    #[test]
    fn overlap_beyond_the_next_zone_is_rejected() {
        let zones = vec![
            linear_zone(1.0, 2.5, -1.0, 0.2, 0.01),
            linear_zone(1.5, 2.2, -0.8, 0.1, 0.01),
            linear_zone(2.4, 3.0, -0.5, -0.3, 0.02),
        ];
        assert_eq!(
            ZoneEvaluator::new(&zones).err(),
            Some(EvalError::NonAdjacentOverlap {
                first: 1,
                second: 3
            })
        );
    }
}

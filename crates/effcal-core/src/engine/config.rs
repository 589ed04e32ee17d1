use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid zone #{index}: {reason}")]
    InvalidZone { index: usize, reason: String },
    #[error("Zones #{first} and #{second} overlap but are not neighbours")]
    NonAdjacentOverlap { first: usize, second: usize },
}

/// One fitting zone: polynomial degree and energy boundaries in keV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneConfig {
    pub degree: usize,
    pub left: f64,
    pub right: f64,
}

impl ZoneConfig {
    pub fn new(degree: usize, left: f64, right: f64) -> Self {
        Self {
            degree,
            left,
            right,
        }
    }

    /// The historical two-zone layout: a quartic below 400 keV and a quadratic above 250 keV.
    pub fn default_set() -> Vec<Self> {
        vec![Self::new(4, 50.0, 400.0), Self::new(2, 250.0, 3000.0)]
    }

    pub fn log_bounds(&self) -> (f64, f64) {
        (self.left.log10(), self.right.log10())
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidZone { index, reason };
        if !(self.left.is_finite() && self.right.is_finite()) {
            return Err(invalid("boundaries must be finite".to_string()));
        }
        if self.left <= 0.0 {
            return Err(invalid(format!(
                "left boundary must be positive (got {} keV)",
                self.left
            )));
        }
        if self.left > self.right {
            return Err(invalid(format!(
                "left boundary {} keV exceeds right boundary {} keV",
                self.left, self.right
            )));
        }
        Ok(())
    }
}

/// How sample points are weighted in the regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    #[default]
    Uniform,
    /// `w = 1 / log10(1 + deff/100)²`, the inverse variance of `log10(efficiency)`.
    InverseVariance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitConfig {
    pub zones: Vec<ZoneConfig>, // Ascending by left boundary
    pub weighting: Weighting,
}

#[derive(Default)]
pub struct FitConfigBuilder {
    zones: Vec<ZoneConfig>,
    weighting: Option<Weighting>,
}

impl FitConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn zone(mut self, zone: ZoneConfig) -> Self {
        self.zones.push(zone);
        self
    }
    pub fn zones(mut self, zones: impl IntoIterator<Item = ZoneConfig>) -> Self {
        self.zones.extend(zones);
        self
    }
    pub fn weighting(mut self, weighting: Weighting) -> Self {
        self.weighting = Some(weighting);
        self
    }

    pub fn build(self) -> Result<FitConfig, ConfigError> {
        if self.zones.is_empty() {
            return Err(ConfigError::MissingParameter("zones"));
        }
        for (i, zone) in self.zones.iter().enumerate() {
            zone.validate(i + 1)?;
        }

        let ordered: Vec<(usize, ZoneConfig)> = self
            .zones
            .into_iter()
            .enumerate()
            .map(|(i, z)| (i + 1, z))
            .sorted_by(|a, b| a.1.left.total_cmp(&b.1.left))
            .collect();
        for (pos, (index, zone)) in ordered.iter().enumerate() {
            if let Some((far_index, _)) = ordered
                .iter()
                .skip(pos + 2)
                .find(|(_, far)| far.left <= zone.right)
            {
                return Err(ConfigError::NonAdjacentOverlap {
                    first: *index,
                    second: *far_index,
                });
            }
        }

        Ok(FitConfig {
            zones: ordered.into_iter().map(|(_, z)| z).collect(),
            weighting: self.weighting.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sorts_zones_and_defaults_to_uniform_weighting() {
        let config = FitConfigBuilder::new()
            .zone(ZoneConfig::new(2, 250.0, 3000.0))
            .zone(ZoneConfig::new(4, 50.0, 400.0))
            .build()
            .unwrap();
        assert_eq!(config.zones, ZoneConfig::default_set());
        assert_eq!(config.weighting, Weighting::Uniform);
    }

    #[test]
    fn builder_requires_at_least_one_zone() {
        let result = FitConfigBuilder::new()
            .weighting(Weighting::InverseVariance)
            .build();
        assert_eq!(result, Err(ConfigError::MissingParameter("zones")));
    }

    #[test]
    fn inverted_or_non_positive_boundaries_are_rejected() {
        let inverted = FitConfigBuilder::new()
            .zone(ZoneConfig::new(1, 400.0, 50.0))
            .build();
        assert!(matches!(
            inverted,
            Err(ConfigError::InvalidZone { index: 1, .. })
        ));

        let zero = FitConfigBuilder::new()
            .zone(ZoneConfig::new(1, 50.0, 400.0))
            .zone(ZoneConfig::new(1, 0.0, 40.0))
            .build();
        assert!(matches!(zero, Err(ConfigError::InvalidZone { index: 2, .. })));
    }

    #[test]
    fn overlap_with_a_non_neighbour_is_rejected() {
        let result = FitConfigBuilder::new()
            .zones([
                ZoneConfig::new(2, 50.0, 1000.0),
                ZoneConfig::new(2, 200.0, 400.0),
                ZoneConfig::new(2, 300.0, 3000.0),
            ])
            .build();
        assert_eq!(
            result,
            Err(ConfigError::NonAdjacentOverlap {
                first: 1,
                second: 3
            })
        );
    }

    #[test]
    fn neighbour_overlap_is_allowed() {
        let config = FitConfigBuilder::new()
            .zones(ZoneConfig::default_set())
            .build()
            .unwrap();
        assert_eq!(config.zones.len(), 2);
    }

    #[test]
    fn log_bounds_are_base_ten() {
        let (l, r) = ZoneConfig::new(1, 10.0, 1000.0).log_bounds();
        assert!((l - 1.0).abs() < 1e-12);
        assert!((r - 3.0).abs() < 1e-12);
    }
}

use crate::cli::FitArgs;
use crate::error::{CliError, Result};
use clap::ValueEnum;
use effcal::engine::config as core_config;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum WeightingChoice {
    Uniform,
    InverseVariance,
}

impl From<WeightingChoice> for core_config::Weighting {
    fn from(choice: WeightingChoice) -> Self {
        match choice {
            WeightingChoice::Uniform => Self::Uniform,
            WeightingChoice::InverseVariance => Self::InverseVariance,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(deny_unknown_fields)]
struct PartialZoneConfig {
    degree: usize,
    #[serde(rename = "left-kev")]
    left_kev: f64,
    #[serde(rename = "right-kev")]
    right_kev: f64,
}

impl From<PartialZoneConfig> for core_config::ZoneConfig {
    fn from(p: PartialZoneConfig) -> Self {
        Self::new(p.degree, p.left_kev, p.right_kev)
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialFitConfig {
    weighting: Option<WeightingChoice>,
    zones: Option<Vec<PartialZoneConfig>>,
}

impl PartialFitConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads the file when one is given, otherwise starts from an empty configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Command-line zones replace the file's zones entirely; with neither, the default
    /// two-zone layout is used.
    pub fn merge_with_cli(self, args: &FitArgs) -> Result<core_config::FitConfig> {
        let zones = if !args.zones.is_empty() {
            debug!("Using {} zone(s) from the command line.", args.zones.len());
            args.zones.clone()
        } else if let Some(zones) = self.zones {
            zones.into_iter().map(Into::into).collect()
        } else {
            debug!("No zones configured; falling back to the default zone set.");
            core_config::ZoneConfig::default_set()
        };

        let weighting = args
            .weighting
            .or(self.weighting)
            .map(Into::into)
            .unwrap_or_default();

        core_config::FitConfigBuilder::new()
            .zones(zones)
            .weighting(weighting)
            .build()
            .map_err(|e| CliError::Config(e.to_string()))
    }
}

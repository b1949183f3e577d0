//! Alert management limits.

use serde::{Deserialize, Serialize};

use crate::domain::Region;

fn default_region() -> String {
    "us".into()
}

fn default_regions() -> Vec<String> {
    ["us", "eu", "kr", "tw"].map(String::from).to_vec()
}

const fn default_min_threshold() -> u64 {
    1_000
}

const fn default_max_threshold() -> u64 {
    1_000_000
}

/// Rules applied when subscribers create alerts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertsConfig {
    /// Region used when none is given.
    #[serde(default = "default_region")]
    pub default_region: String,
    /// Regions alerts may be created for.
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    /// Lowest accepted threshold in gold.
    #[serde(default = "default_min_threshold")]
    pub min_threshold: u64,
    /// Highest accepted threshold in gold.
    #[serde(default = "default_max_threshold")]
    pub max_threshold: u64,
}

impl AlertsConfig {
    #[must_use]
    pub fn default_region(&self) -> Region {
        Region::new(&self.default_region)
    }

    /// Allowed regions, normalised.
    #[must_use]
    pub fn regions(&self) -> Vec<Region> {
        self.regions.iter().map(Region::new).collect()
    }

    /// Whether alerts may target `region`.
    #[must_use]
    pub fn allows(&self, region: &Region) -> bool {
        self.regions.iter().any(|r| Region::new(r) == *region)
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            default_region: default_region(),
            regions: default_regions(),
            min_threshold: default_min_threshold(),
            max_threshold: default_max_threshold(),
        }
    }
}

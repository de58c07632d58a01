//! Indicator catalog: the set of indicator names a feature selection may use.
//!
//! Labels and descriptions are presentation metadata only; the engine looks at
//! names alone.

use serde::{Deserialize, Serialize};

/// A catalog entry describing one indicator column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorInfo {
    /// Column name as it appears in [`CountryRecord::indicators`](crate::CountryRecord::indicators)
    pub name: String,
    /// Human-readable label
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl IndicatorInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            description: None,
        }
    }
}

/// Ordered catalog of known indicators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorCatalog {
    pub indicators: Vec<IndicatorInfo>,
}

const DEFAULT_INDICATORS: &[(&str, &str)] = &[
    ("BLI_scaled", "Better Life Index"),
    ("carbon_intensity", "Carbon Intensity"),
    ("IMF-Adapted Readiness score_scaled", "Readiness"),
    ("Vulnerability score_scaled", "Vulnerability"),
    ("Biocapacity", "Biocapacity"),
    ("Renewable_value_scaled", "Renewable Capital"),
    ("Mineral_value_scaled", "Mineral Capital"),
    ("GCP_scaled", "Gross Ecosystem Product"),
    ("Sovereign risk", "Sovereign Risk"),
];

impl Default for IndicatorCatalog {
    /// The nine climate-finance indicators shipped with the dashboard dataset.
    fn default() -> Self {
        Self {
            indicators: DEFAULT_INDICATORS
                .iter()
                .map(|(name, label)| IndicatorInfo::new(*name, *label))
                .collect(),
        }
    }
}

impl IndicatorCatalog {
    #[must_use]
    pub fn new(indicators: Vec<IndicatorInfo>) -> Self {
        Self { indicators }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&IndicatorInfo> {
        self.indicators.iter().find(|info| info.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.indicators.iter().map(|info| info.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

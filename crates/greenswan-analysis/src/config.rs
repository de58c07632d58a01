//! Pipeline configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a usable configuration:
//!
//! ```json
//! {
//!   "missing_values": "drop_rows",
//!   "seed": 7,
//!   "cluster_count": 3,
//!   "cluster_names": { "0": "Group A", "1": "Group B" }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How rows with missing values in the selected columns are handled.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum MissingValuePolicy {
    /// Substitute `0.0` for every missing cell; every country is kept.
    #[default]
    #[display("zero_fill")]
    ZeroFill,
    /// Drop every country with at least one missing cell.
    #[display("drop_rows")]
    DropRows,
}

/// Display names for cluster labels.
///
/// Labels without an entry fall back to `"Cluster N"`.
///
/// ```
/// use greenswan_analysis::config::ClusterNames;
///
/// let names = ClusterNames::default();
/// assert_eq!(names.name(1), "Industrialized Economies");
/// assert_eq!(names.name(5), "Cluster 5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterNames(BTreeMap<usize, String>);

impl ClusterNames {
    #[must_use]
    pub fn new(names: BTreeMap<usize, String>) -> Self {
        Self(names)
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    #[must_use]
    pub fn name(&self, label: usize) -> String {
        self.0
            .get(&label)
            .cloned()
            .unwrap_or_else(|| format!("Cluster {label}"))
    }
}

impl Default for ClusterNames {
    fn default() -> Self {
        Self(BTreeMap::from([
            (0, "Emerging Economies".to_owned()),
            (1, "Industrialized Economies".to_owned()),
            (2, "Extractive Economies".to_owned()),
            (3, "Vulnerable Economies but nature rich".to_owned()),
        ]))
    }
}

/// Parameters of a clustering run that are not part of the per-call selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub missing_values: MissingValuePolicy,
    /// Seed for the k-means++ initialization
    pub seed: u64,
    /// K-means iteration cap
    pub max_iterations: usize,
    /// Cluster count used when the caller does not pick one
    pub cluster_count: usize,
    pub cluster_names: ClusterNames,
}

impl PipelineConfig {
    pub const DEFAULT_SEED: u64 = 42;
    pub const DEFAULT_MAX_ITERATIONS: usize = 300;
    pub const DEFAULT_CLUSTER_COUNT: usize = 4;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            missing_values: MissingValuePolicy::default(),
            seed: Self::DEFAULT_SEED,
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            cluster_count: Self::DEFAULT_CLUSTER_COUNT,
            cluster_names: ClusterNames::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "missing_values": "drop_rows", "seed": 7 }"#).unwrap();
        assert_eq!(config.missing_values, MissingValuePolicy::DropRows);
        assert_eq!(config.seed, 7);
        assert_eq!(config.max_iterations, 300);
        assert_eq!(config.cluster_count, 4);
        assert_eq!(config.cluster_names, ClusterNames::default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.missing_values, MissingValuePolicy::ZeroFill);
    }

    #[test]
    fn test_custom_cluster_names() {
        let config: PipelineConfig =
            serde_json::from_str(r#"{ "cluster_names": { "0": "Group 1" } }"#).unwrap();
        assert_eq!(config.cluster_names.name(0), "Group 1");
        assert_eq!(config.cluster_names.name(1), "Cluster 1");
    }

    #[test]
    fn test_policy_display_matches_serde() {
        for policy in [MissingValuePolicy::ZeroFill, MissingValuePolicy::DropRows] {
            let json = serde_json::to_string(&policy).unwrap();
            assert_eq!(json, format!("\"{policy}\""));
        }
    }
}

//! Clustering pipeline: feature matrix, 2D projection and k-means labels.
//!
//! [`ClusteringEngine::run`] validates the selection, builds the feature
//! matrix under the configured missing-value policy, partitions the rows with
//! k-means and projects them onto two principal components. Clustering runs on
//! the full feature matrix; the projection only supplies plot coordinates.
//!
//! Every call builds a new [`ClusteringResult`]. Labels and coordinates are
//! derived values: they are reproducible for the same inputs and seed, but
//! must not be compared across runs with different parameters.

use greenswan_data::{CountryCode, CountryTable, IndicatorCatalog};
use greenswan_stats::{descriptive::DescriptiveStats, kmeans::KMeans, pca};
use serde::Serialize;

use crate::{
    config::{ClusterNames, MissingValuePolicy, PipelineConfig},
    error::AnalysisError,
    features::{FeatureMatrix, FeatureSelection, build_feature_matrix},
};

/// Placement of one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryCluster {
    pub code: CountryCode,
    /// Cluster label in `0..k`
    pub label: usize,
    /// Display name of the label
    pub name: String,
    pub pc1: f64,
    pub pc2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureSummary {
    pub feature: String,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Size and per-feature ranges of one cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterProfile {
    pub label: usize,
    pub name: String,
    pub size: usize,
    /// One entry per selected feature; empty when the cluster has no members
    pub features: Vec<FeatureSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringDiagnostics {
    pub explained_variance_ratio: [f64; 2],
    /// PCA loadings of PC1 and PC2, one entry per selected feature
    pub loadings: [Vec<f64>; 2],
    pub inertia: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Output of one clustering call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringResult {
    pub k: usize,
    pub seed: u64,
    pub features: Vec<String>,
    pub missing_values: MissingValuePolicy,
    /// Clustered countries, in table order
    pub countries: Vec<CountryCluster>,
    /// Countries left out by the drop-rows policy
    pub dropped: Vec<CountryCode>,
    /// Cells replaced by zero under the zero-fill policy
    pub imputed_cells: usize,
    pub profiles: Vec<ClusterProfile>,
    pub diagnostics: ClusteringDiagnostics,
}

impl ClusteringResult {
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CountryCluster> {
        self.countries.iter().find(|c| c.code.as_str() == code)
    }
}

/// Runs the clustering pipeline over a fixed table and catalog.
///
/// # Examples
///
/// ```
/// use greenswan_analysis::{clustering::ClusteringEngine, config::PipelineConfig};
/// use greenswan_data::{CountryRecord, CountryTable, IndicatorCatalog};
///
/// let table = CountryTable::new(
///     [("AAA", 0.0, 0.1), ("BBB", 0.1, 0.0), ("CCC", 5.0, 5.1), ("DDD", 5.1, 5.0)]
///         .into_iter()
///         .map(|(code, x, y)| {
///             CountryRecord::new(code)
///                 .with_indicator("GCP_scaled", x)
///                 .with_indicator("Biocapacity", y)
///         })
///         .collect(),
/// )
/// .unwrap();
/// let catalog = IndicatorCatalog::default();
/// let config = PipelineConfig::default();
///
/// let result = ClusteringEngine::new(&table, &catalog, &config)
///     .run(["GCP_scaled", "Biocapacity"], 2)
///     .unwrap();
///
/// assert_eq!(result.countries.len(), 4);
/// assert_eq!(result.get("AAA").unwrap().label, result.get("BBB").unwrap().label);
/// assert_ne!(result.get("AAA").unwrap().label, result.get("CCC").unwrap().label);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClusteringEngine<'a> {
    table: &'a CountryTable,
    catalog: &'a IndicatorCatalog,
    config: &'a PipelineConfig,
}

impl<'a> ClusteringEngine<'a> {
    #[must_use]
    pub fn new(
        table: &'a CountryTable,
        catalog: &'a IndicatorCatalog,
        config: &'a PipelineConfig,
    ) -> Self {
        Self {
            table,
            catalog,
            config,
        }
    }

    /// Clusters the table on `features` into `k` groups.
    ///
    /// Fails with [`InsufficientFeatures`](AnalysisError::InsufficientFeatures)
    /// or [`UnknownIndicator`](AnalysisError::UnknownIndicator) for a bad
    /// selection, and with
    /// [`InvalidClusterCount`](AnalysisError::InvalidClusterCount) unless
    /// `2 <= k <=` the number of countries left after imputation.
    pub fn run<I, S>(&self, features: I, k: usize) -> Result<ClusteringResult, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let selection = FeatureSelection::new(features, self.catalog)?;
        let matrix = build_feature_matrix(self.table, &selection, self.config.missing_values);

        let fit = KMeans::new(k, self.config.seed)
            .with_max_iterations(self.config.max_iterations)
            .fit(&matrix.values)?;
        let projection = pca::project_2d(&matrix.values);

        let names = &self.config.cluster_names;
        let countries = matrix
            .countries
            .iter()
            .zip(&fit.labels)
            .zip(&projection.coordinates)
            .map(|((code, &label), &[pc1, pc2])| CountryCluster {
                code: code.clone(),
                label,
                name: names.name(label),
                pc1,
                pc2,
            })
            .collect::<Vec<_>>();
        let profiles = cluster_profiles(&matrix, &fit.labels, k, names);

        tracing::info!(
            k,
            seed = self.config.seed,
            countries = countries.len(),
            dropped = matrix.report.dropped.len(),
            iterations = fit.iterations,
            converged = fit.converged,
            explained_variance_ratio = ?projection.explained_variance_ratio,
            "clustering finished"
        );

        let FeatureMatrix {
            features, report, ..
        } = matrix;
        Ok(ClusteringResult {
            k,
            seed: self.config.seed,
            features,
            missing_values: report.policy,
            countries,
            dropped: report.dropped,
            imputed_cells: report.imputed_cells,
            profiles,
            diagnostics: ClusteringDiagnostics {
                explained_variance_ratio: projection.explained_variance_ratio,
                loadings: projection.components,
                inertia: fit.inertia,
                iterations: fit.iterations,
                converged: fit.converged,
            },
        })
    }

    /// Runs with the configured default cluster count.
    pub fn run_default<I, S>(&self, features: I) -> Result<ClusteringResult, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(features, self.config.cluster_count)
    }
}

fn cluster_profiles(
    matrix: &FeatureMatrix,
    labels: &[usize],
    k: usize,
    names: &ClusterNames,
) -> Vec<ClusterProfile> {
    (0..k)
        .map(|label| {
            let members = labels
                .iter()
                .zip(matrix.values.rows())
                .filter(|(l, _)| **l == label)
                .map(|(_, row)| row)
                .collect::<Vec<_>>();
            let features = matrix
                .features
                .iter()
                .enumerate()
                .filter_map(|(j, feature)| {
                    let stats = DescriptiveStats::new(members.iter().map(|row| row[j]))?;
                    Some(FeatureSummary {
                        feature: feature.clone(),
                        mean: stats.mean,
                        min: stats.min,
                        max: stats.max,
                    })
                })
                .collect();
            ClusterProfile {
                label,
                name: names.name(label),
                size: members.len(),
                features,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use greenswan_data::{CountryRecord, IndicatorInfo};

    use super::*;

    fn catalog() -> IndicatorCatalog {
        IndicatorCatalog::new(vec![
            IndicatorInfo::new("f1", "Feature 1"),
            IndicatorInfo::new("f2", "Feature 2"),
            IndicatorInfo::new("f3", "Feature 3"),
        ])
    }

    /// Ten countries in two well separated groups; `JJJ` lacks `f2`.
    fn table() -> CountryTable {
        let rows = [
            ("AAA", 0.0, Some(0.2), 1.0),
            ("BBB", 0.3, Some(0.1), 1.1),
            ("CCC", 0.1, Some(0.4), 0.9),
            ("DDD", 0.2, Some(0.0), 1.2),
            ("EEE", 0.4, Some(0.3), 1.0),
            ("FFF", 9.0, Some(9.2), 5.0),
            ("GGG", 9.3, Some(9.1), 5.1),
            ("HHH", 9.1, Some(9.4), 4.9),
            ("III", 9.2, Some(9.0), 5.2),
            ("JJJ", 9.4, None, 5.0),
        ];
        CountryTable::new(
            rows.into_iter()
                .map(|(code, f1, f2, f3)| {
                    let record = CountryRecord::new(code)
                        .with_indicator("f1", f1)
                        .with_indicator("f3", f3);
                    match f2 {
                        Some(f2) => record.with_indicator("f2", f2),
                        None => record,
                    }
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_single_feature_rejected() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let err = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1"], 2)
            .unwrap_err();
        assert_eq!(err, AnalysisError::InsufficientFeatures { selected: 1 });
    }

    #[test]
    fn test_unknown_indicator_rejected() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let err = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1", "GDP"], 2)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::UnknownIndicator { .. }));
    }

    #[test]
    fn test_invalid_cluster_count() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let engine = ClusteringEngine::new(&table, &catalog, &config);

        let err = engine.run(["f1", "f2"], 1).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidClusterCount { k: 1, rows: 10 });
        assert!(engine.run(["f1", "f2"], 11).is_err());
        assert!(engine.run(["f1", "f2"], 10).is_ok());
    }

    #[test]
    fn test_cluster_count_checked_after_drop() {
        let (table, catalog) = (table(), catalog());
        let config = PipelineConfig {
            missing_values: MissingValuePolicy::DropRows,
            ..PipelineConfig::default()
        };
        let engine = ClusteringEngine::new(&table, &catalog, &config);

        let err = engine.run(["f1", "f2"], 10).unwrap_err();
        assert_eq!(err, AnalysisError::InvalidClusterCount { k: 10, rows: 9 });
    }

    #[test]
    fn test_labels_and_coordinates() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let engine = ClusteringEngine::new(&table, &catalog, &config);

        for k in 2..=5 {
            let result = engine.run(["f1", "f2", "f3"], k).unwrap();
            assert_eq!(result.countries.len(), table.len());
            assert!(result.countries.iter().all(|c| c.label < k));
            assert!(
                result
                    .countries
                    .iter()
                    .all(|c| c.pc1.is_finite() && c.pc2.is_finite())
            );
            assert_eq!(result.profiles.len(), k);
            let total: usize = result.profiles.iter().map(|p| p.size).sum();
            assert_eq!(total, table.len());
        }
    }

    #[test]
    fn test_separated_groups() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let result = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1", "f3"], 2)
            .unwrap();

        let low = result.get("AAA").unwrap().label;
        let high = result.get("FFF").unwrap().label;
        assert_ne!(low, high);
        for code in ["BBB", "CCC", "DDD", "EEE"] {
            assert_eq!(result.get(code).unwrap().label, low);
        }
        for code in ["GGG", "HHH", "III"] {
            assert_eq!(result.get(code).unwrap().label, high);
        }
    }

    #[test]
    fn test_deterministic() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let engine = ClusteringEngine::new(&table, &catalog, &config);
        let first = engine.run(["f1", "f2", "f3"], 3).unwrap();
        let second = engine.run(["f1", "f2", "f3"], 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_drop_policy_reported() {
        let (table, catalog) = (table(), catalog());
        let config = PipelineConfig {
            missing_values: MissingValuePolicy::DropRows,
            ..PipelineConfig::default()
        };
        let result = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1", "f2"], 2)
            .unwrap();

        assert_eq!(result.missing_values, MissingValuePolicy::DropRows);
        assert_eq!(result.countries.len(), 9);
        assert_eq!(result.dropped, vec![CountryCode::new("JJJ")]);
        assert!(result.get("JJJ").is_none());
    }

    #[test]
    fn test_zero_fill_reported() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let result = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1", "f2"], 2)
            .unwrap();
        assert_eq!(result.countries.len(), 10);
        assert_eq!(result.imputed_cells, 1);
        assert!(result.dropped.is_empty());
    }

    #[test]
    fn test_label_names() {
        let (table, catalog) = (table(), catalog());
        let config = PipelineConfig {
            cluster_names: ClusterNames::new(BTreeMap::from([(0, "Group 1".to_owned())])),
            ..PipelineConfig::default()
        };
        let result = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1", "f2"], 3)
            .unwrap();

        for country in &result.countries {
            let expected = match country.label {
                0 => "Group 1".to_owned(),
                n => format!("Cluster {n}"),
            };
            assert_eq!(country.name, expected);
        }
        assert_eq!(result.profiles[0].name, "Group 1");
    }

    #[test]
    fn test_profiles_cover_features() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let result = ClusteringEngine::new(&table, &catalog, &config)
            .run(["f1", "f3"], 2)
            .unwrap();

        for profile in result.profiles.iter().filter(|p| p.size > 0) {
            let names: Vec<_> = profile.features.iter().map(|f| f.feature.as_str()).collect();
            assert_eq!(names, ["f1", "f3"]);
            for summary in &profile.features {
                assert!(summary.min <= summary.mean && summary.mean <= summary.max);
            }
        }
    }

    #[test]
    fn test_default_cluster_count() {
        let (table, catalog, config) = (table(), catalog(), PipelineConfig::default());
        let result = ClusteringEngine::new(&table, &catalog, &config)
            .run_default(["f1", "f2"])
            .unwrap();
        assert_eq!(result.k, PipelineConfig::DEFAULT_CLUSTER_COUNT);
    }
}

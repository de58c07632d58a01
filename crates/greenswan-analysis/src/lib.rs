//! Analysis engine for the Green Swan dashboard.
//!
//! Every entry point is a pure function of its arguments and the read-only
//! reference data from [`greenswan_data`]. Nothing is cached between calls, so
//! an engine value can be shared freely across threads.
//!
//! # Overview
//!
//! ## Clustering Workflow
//!
//! 1. **Select Features** ([`features::FeatureSelection`]): validate indicator names
//! 2. **Impute** ([`features::build_feature_matrix`]): build a dense matrix under a
//!    [`config::MissingValuePolicy`]
//! 3. **Partition and Project** ([`clustering::ClusteringEngine`]): k-means labels plus
//!    PCA coordinates for plotting
//!
//! ## Coalition Workflow
//!
//! 1. **Membership** ([`membership::MembershipEngine`]): resolve a coalition selector and
//!    flag members
//! 2. **Distance** ([`distance::summarize_distance`]): mean absolute pairwise difference of
//!    the position metric
//! 3. **Summaries** ([`club_summary::ClubSummaryBuilder`]): one row per coalition, and
//!    side-by-side comparisons
//!
//! # Errors
//!
//! Bad selections and cluster counts fail with [`AnalysisError`]. An unknown
//! coalition id is not an error; it resolves to an empty group whose status is
//! [`membership::CoalitionStatus::Unknown`].
//!
//! # Examples
//!
//! ```
//! use greenswan_analysis::{club_summary::ClubSummaryBuilder, AnalysisError};
//! use greenswan_analysis::{clustering::ClusteringEngine, config::PipelineConfig};
//! use greenswan_data::{
//!     CoalitionDefinition, CoalitionRegistry, CountryRecord, CountryTable, IndicatorCatalog,
//! };
//!
//! let table = CountryTable::new(vec![
//!     CountryRecord::new("FRA").with_indicator("GCP_scaled", 0.4).with_position(1.0),
//!     CountryRecord::new("DEU").with_indicator("GCP_scaled", 0.5).with_position(3.0),
//!     CountryRecord::new("BRA").with_indicator("GCP_scaled", 0.9).with_position(6.0),
//! ])
//! .unwrap();
//! let registry =
//!     CoalitionRegistry::new(vec![CoalitionDefinition::new("EU", ["FRA", "DEU"])]).unwrap();
//!
//! let catalog = IndicatorCatalog::default();
//! let config = PipelineConfig::default();
//! let err = ClusteringEngine::new(&table, &catalog, &config)
//!     .run(["GCP_scaled"], 2)
//!     .unwrap_err();
//! assert_eq!(err, AnalysisError::InsufficientFeatures { selected: 1 });
//!
//! let eu = ClubSummaryBuilder::new(&table, &registry).summarize("EU");
//! assert_eq!(eu.member_count, 2);
//! assert_eq!(eu.average_distance, Some(2.0));
//! ```

pub use self::error::AnalysisError;

pub mod club_summary;
pub mod clustering;
pub mod config;
pub mod distance;
mod error;
pub mod features;
pub mod membership;

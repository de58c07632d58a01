//! Feature selection and missing-value imputation.
//!
//! Turns a [`CountryTable`] plus a validated [`FeatureSelection`] into a dense
//! [`FeatureMatrix`]: one row per retained country, one column per selected
//! indicator, no missing cells.
//!
//! # Missing values
//!
//! A cell is missing when the indicator key is absent, is `null`, or holds text
//! that does not parse as a finite number. What happens next is decided by
//! [`MissingValuePolicy`]:
//!
//! - [`ZeroFill`](MissingValuePolicy::ZeroFill) (default): missing cells become
//!   `0.0`; every country in the table appears in the output
//! - [`DropRows`](MissingValuePolicy::DropRows): countries with any missing cell
//!   in the selected columns are left out and listed in the report
//!
//! The policy in effect is recorded in [`ImputationReport::policy`] so callers
//! can tell which countries a result covers.
//!
//! # Example
//!
//! ```
//! use greenswan_analysis::{
//!     config::MissingValuePolicy,
//!     features::{FeatureSelection, build_feature_matrix},
//! };
//! use greenswan_data::{CountryRecord, CountryTable, IndicatorCatalog};
//!
//! let table = CountryTable::new(vec![
//!     CountryRecord::new("FRA").with_indicator("GCP_scaled", 0.4).with_indicator("Biocapacity", 1.0),
//!     CountryRecord::new("BRA").with_indicator("GCP_scaled", 0.9),
//! ])
//! .unwrap();
//! let selection =
//!     FeatureSelection::new(["GCP_scaled", "Biocapacity"], &IndicatorCatalog::default()).unwrap();
//!
//! let filled = build_feature_matrix(&table, &selection, MissingValuePolicy::ZeroFill);
//! assert_eq!(filled.values.nrows(), 2);
//! assert_eq!(filled.values[(1, 1)], 0.0);
//!
//! let dropped = build_feature_matrix(&table, &selection, MissingValuePolicy::DropRows);
//! assert_eq!(dropped.values.nrows(), 1);
//! assert_eq!(dropped.report.dropped[0].as_str(), "BRA");
//! ```

use std::collections::HashSet;

use greenswan_data::{CountryCode, CountryRecord, CountryTable, IndicatorCatalog};
use greenswan_stats::matrix::Matrix;
use serde::Serialize;

use crate::{config::MissingValuePolicy, error::AnalysisError};

/// Minimum number of distinct indicators a selection must name.
pub const MIN_FEATURES: usize = 2;

/// An ordered, duplicate-free list of catalog indicators (at least two).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSelection {
    names: Vec<String>,
}

impl FeatureSelection {
    /// Validates a selection against `catalog`.
    ///
    /// Repeated names are collapsed, keeping the first occurrence. The size
    /// check runs first, so a one-element selection reports
    /// [`InsufficientFeatures`](AnalysisError::InsufficientFeatures) even when
    /// that element is also unknown.
    pub fn new<I, S>(names: I, catalog: &IndicatorCatalog) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let names = names
            .into_iter()
            .map(|name| name.as_ref().to_owned())
            .filter(|name| seen.insert(name.clone()))
            .collect::<Vec<_>>();

        if names.len() < MIN_FEATURES {
            return Err(AnalysisError::InsufficientFeatures {
                selected: names.len(),
            });
        }
        if let Some(name) = names.iter().find(|name| !catalog.contains(name)) {
            return Err(AnalysisError::UnknownIndicator { name: name.clone() });
        }
        Ok(Self { names })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// What the imputer did while building a [`FeatureMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImputationReport {
    pub policy: MissingValuePolicy,
    /// Countries left out because of missing cells (drop policy only)
    pub dropped: Vec<CountryCode>,
    /// Cells replaced by `0.0` (zero-fill policy only)
    pub imputed_cells: usize,
    /// Cells holding text that could not be read as a number
    pub non_numeric_cells: usize,
}

/// Dense numeric matrix built from the country table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    /// Column names, in selection order
    pub features: Vec<String>,
    /// Row labels, in table order
    pub countries: Vec<CountryCode>,
    pub values: Matrix,
    pub report: ImputationReport,
}

/// Builds the feature matrix for `selection` under `policy`.
///
/// The table is not modified; the matrix is a fresh value.
#[must_use]
pub fn build_feature_matrix(
    table: &CountryTable,
    selection: &FeatureSelection,
    policy: MissingValuePolicy,
) -> FeatureMatrix {
    let mut values = Matrix::with_columns(selection.len());
    let mut countries = vec![];
    let mut report = ImputationReport {
        policy,
        dropped: vec![],
        imputed_cells: 0,
        non_numeric_cells: 0,
    };

    let mut row = Vec::with_capacity(selection.len());
    for record in table.records() {
        row.clear();
        let mut missing = 0;
        for name in selection.names() {
            let value = read_cell(record, name, &mut report.non_numeric_cells);
            if value.is_none() {
                missing += 1;
            }
            row.push(value.unwrap_or(0.0));
        }

        if missing > 0 {
            match policy {
                MissingValuePolicy::ZeroFill => report.imputed_cells += missing,
                MissingValuePolicy::DropRows => {
                    report.dropped.push(record.code.clone());
                    continue;
                }
            }
        }
        values.push_row(&row);
        countries.push(record.code.clone());
    }

    tracing::debug!(
        features = ?selection.names(),
        %policy,
        rows = countries.len(),
        dropped = report.dropped.len(),
        imputed_cells = report.imputed_cells,
        "built feature matrix"
    );

    FeatureMatrix {
        features: selection.names().to_vec(),
        countries,
        values,
        report,
    }
}

fn read_cell(record: &CountryRecord, name: &str, non_numeric_cells: &mut usize) -> Option<f64> {
    let cell = record.indicator(name)?;
    let value = cell.to_number();
    if value.is_none() {
        *non_numeric_cells += 1;
        tracing::warn!(
            country = %record.code,
            indicator = name,
            ?cell,
            "non-numeric indicator value treated as missing"
        );
    }
    value
}

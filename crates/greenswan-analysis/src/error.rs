use greenswan_stats::kmeans::KMeansError;

/// Hard failures of an engine call.
///
/// Every variant rejects the call before any result is produced; the
/// display text is meant to be shown to the user in place of a chart.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum AnalysisError {
    #[display("select at least 2 features ({selected} selected)")]
    InsufficientFeatures { selected: usize },
    #[display("unknown indicator '{name}'")]
    UnknownIndicator { name: String },
    #[display("cluster count {k} must be between 2 and the number of countries ({rows})")]
    InvalidClusterCount { k: usize, rows: usize },
}

impl From<KMeansError> for AnalysisError {
    fn from(error: KMeansError) -> Self {
        match error {
            KMeansError::InvalidClusterCount { k, rows } => Self::InvalidClusterCount { k, rows },
        }
    }
}

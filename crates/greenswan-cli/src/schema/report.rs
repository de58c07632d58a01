use chrono::{DateTime, Utc};
use greenswan_analysis::club_summary::ClubSummaryRow;
use serde::Serialize;

/// JSON document written by every subcommand.
///
/// The body's fields are inlined next to `generated_at`.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T> {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Report<T> {
    pub fn new(body: T) -> Self {
        Self {
            generated_at: Utc::now(),
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubSummaries {
    pub coalitions: Vec<ClubSummaryRow>,
}

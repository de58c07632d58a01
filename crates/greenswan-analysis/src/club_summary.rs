//! Per-coalition summary rows.
//!
//! A row combines three things for one coalition: how many roster members
//! are present in the country table, the average pairwise position distance
//! among them, and the coalition's static metadata scores. Metadata that the
//! registry does not carry stays `None`; it is never defaulted to zero.

use greenswan_data::{CoalitionRegistry, CountryCode, CountryTable};
use serde::Serialize;

use crate::{
    distance::summarize_distance,
    membership::{CoalitionSelection, CoalitionStatus, MembershipEngine},
};

/// Summary of one coalition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClubSummaryRow {
    pub coalition: String,
    pub status: CoalitionStatus,
    /// Roster members present in the country table
    pub member_count: usize,
    /// Of those, members with a position metric
    pub with_position: usize,
    /// `None` when fewer than two members have a position
    pub average_distance: Option<f64>,
    pub x_score: Option<f64>,
    pub y_score: Option<f64>,
}

impl ClubSummaryRow {
    /// Message to show in place of a chart when the row has nothing to plot.
    #[must_use]
    pub fn status_message(&self) -> Option<String> {
        if self.status.is_unknown() || self.member_count == 0 {
            Some(format!("no data available for {}", self.coalition))
        } else {
            None
        }
    }
}

/// Two coalitions side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoalitionComparison {
    pub left: ClubSummaryRow,
    pub right: ClubSummaryRow,
    /// `left.average_distance - right.average_distance`, when both exist
    pub distance_difference: Option<f64>,
}

/// Builds [`ClubSummaryRow`]s from the country table and coalition registry.
///
/// # Examples
///
/// ```
/// use greenswan_analysis::club_summary::ClubSummaryBuilder;
/// use greenswan_data::{CoalitionDefinition, CoalitionRegistry, CountryRecord, CountryTable};
///
/// let table = CountryTable::new(vec![
///     CountryRecord::new("A").with_position(1.0),
///     CountryRecord::new("B").with_position(3.0),
///     CountryRecord::new("C").with_position(6.0),
/// ])
/// .unwrap();
/// let registry =
///     CoalitionRegistry::new(vec![CoalitionDefinition::new("ABC", ["A", "B", "C", "Z"])]).unwrap();
///
/// let rows = ClubSummaryBuilder::new(&table, &registry).build_all();
/// assert_eq!(rows[0].member_count, 3);
/// assert!((rows[0].average_distance.unwrap() - 10.0 / 3.0).abs() < 1e-12);
/// assert_eq!(rows[0].x_score, None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ClubSummaryBuilder<'a> {
    table: &'a CountryTable,
    registry: &'a CoalitionRegistry,
}

impl<'a> ClubSummaryBuilder<'a> {
    #[must_use]
    pub fn new(table: &'a CountryTable, registry: &'a CoalitionRegistry) -> Self {
        Self { table, registry }
    }

    /// Summarizes the group named by `selector`.
    ///
    /// `"All"` summarizes the whole table and carries no metadata. An unknown
    /// id yields a row with zero members and no distance.
    #[must_use]
    pub fn summarize(&self, selector: &str) -> ClubSummaryRow {
        let selection = MembershipEngine::new(self.registry).resolve(selector);
        let (codes, metadata): (Vec<&CountryCode>, _) = match selection {
            CoalitionSelection::All => (self.table.codes().collect(), None),
            CoalitionSelection::Coalition(coalition) => (
                coalition.members().iter().collect(),
                Some(coalition.metadata()),
            ),
            CoalitionSelection::Unknown(_) => (vec![], None),
        };

        let distance = summarize_distance(self.table, codes);
        ClubSummaryRow {
            coalition: selector.to_owned(),
            status: selection.status(),
            member_count: distance.countries,
            with_position: distance.with_position,
            average_distance: distance.average_distance,
            x_score: metadata.and_then(|m| m.x_score),
            y_score: metadata.and_then(|m| m.y_score),
        }
    }

    /// One row per registered coalition, in registry order.
    #[must_use]
    pub fn build_all(&self) -> Vec<ClubSummaryRow> {
        let rows = self
            .registry
            .iter()
            .map(|coalition| self.summarize(coalition.id()))
            .collect::<Vec<_>>();
        tracing::debug!(coalitions = rows.len(), "built club summaries");
        rows
    }

    /// Summaries of two coalitions and the difference of their average distances.
    #[must_use]
    pub fn compare(&self, left: &str, right: &str) -> CoalitionComparison {
        let left = self.summarize(left);
        let right = self.summarize(right);
        let distance_difference = left
            .average_distance
            .zip(right.average_distance)
            .map(|(l, r)| l - r);
        CoalitionComparison {
            left,
            right,
            distance_difference,
        }
    }
}

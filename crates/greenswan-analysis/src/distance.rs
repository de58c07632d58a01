//! Pairwise-distance aggregation over the position metric.
//!
//! For a list of countries, averages `|position(a) - position(b)|` over every
//! unordered pair of listed countries that have a position. Codes that are not
//! in the table, countries without a position, and repeated codes contribute
//! nothing. Fewer than two qualifying countries means there is no pair to
//! average, and the result is absent rather than zero.

use std::collections::HashSet;

use greenswan_data::CountryTable;
use greenswan_stats::pairwise::mean_absolute_pairwise_difference;
use serde::Serialize;

/// Distance statistics for one list of countries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistanceSummary {
    /// Distinct listed countries present in the table
    pub countries: usize,
    /// Of those, countries with a position metric
    pub with_position: usize,
    /// Mean absolute pairwise difference; `None` when `with_position < 2`
    pub average_distance: Option<f64>,
}

/// Computes distance statistics for `codes`.
///
/// # Examples
///
/// ```
/// use greenswan_analysis::distance::summarize_distance;
/// use greenswan_data::{CountryRecord, CountryTable};
///
/// let table = CountryTable::new(vec![
///     CountryRecord::new("A").with_position(1.0),
///     CountryRecord::new("B").with_position(3.0),
///     CountryRecord::new("C").with_position(6.0),
///     CountryRecord::new("D"),
/// ])
/// .unwrap();
///
/// let summary = summarize_distance(&table, ["A", "B", "C", "D", "ZZZ"]);
/// assert_eq!(summary.countries, 4);
/// assert_eq!(summary.with_position, 3);
/// assert!((summary.average_distance.unwrap() - 10.0 / 3.0).abs() < 1e-12);
/// ```
pub fn summarize_distance<I>(table: &CountryTable, codes: I) -> DistanceSummary
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut countries = 0;
    let mut positions = vec![];
    for code in codes {
        let Some(record) = table.get(code.as_ref()) else {
            continue;
        };
        if !seen.insert(&record.code) {
            continue;
        }
        countries += 1;
        if let Some(position) = record.position() {
            positions.push(position);
        }
    }

    let with_position = positions.len();
    DistanceSummary {
        countries,
        with_position,
        average_distance: mean_absolute_pairwise_difference(positions),
    }
}

/// Mean absolute pairwise position difference over `codes`, or `None` when
/// fewer than two of them have a position.
pub fn average_pairwise_distance<I>(table: &CountryTable, codes: I) -> Option<f64>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    summarize_distance(table, codes).average_distance
}

#[cfg(test)]
mod tests {
    use greenswan_data::CountryRecord;

    use super::*;

    fn table() -> CountryTable {
        CountryTable::new(vec![
            CountryRecord::new("A").with_position(1.0),
            CountryRecord::new("B").with_position(3.0),
            CountryRecord::new("C").with_position(6.0),
            CountryRecord::new("D"),
            CountryRecord::new("E").with_position(-2.5),
        ])
        .unwrap()
    }

    #[test]
    fn test_three_member_example() {
        let table = table();
        assert_eq!(
            average_pairwise_distance(&table, ["A", "B", "C"]),
            Some(10.0 / 3.0)
        );
    }

    #[test]
    fn test_order_independent() {
        let table = table();
        let forward = average_pairwise_distance(&table, ["A", "B", "C", "E"]);
        let backward = average_pairwise_distance(&table, ["E", "C", "B", "A"]);
        let shuffled = average_pairwise_distance(&table, ["C", "E", "A", "B"]);
        assert!(forward.is_some());
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_absent_on_insufficient_data() {
        let table = table();
        let empty: [&str; 0] = [];
        assert_eq!(average_pairwise_distance(&table, empty), None);
        assert_eq!(average_pairwise_distance(&table, ["A"]), None);
        assert_eq!(average_pairwise_distance(&table, ["A", "D"]), None);
        assert_eq!(average_pairwise_distance(&table, ["A", "XXX", "YYY"]), None);
    }

    #[test]
    fn test_repeated_codes_counted_once() {
        let table = table();
        let summary = summarize_distance(&table, ["A", "A", "B"]);
        assert_eq!(summary.countries, 2);
        assert_eq!(summary.with_position, 2);
        assert_eq!(summary.average_distance, Some(2.0));
    }

    #[test]
    fn test_missing_positions_counted_but_skipped() {
        let table = table();
        let summary = summarize_distance(&table, ["A", "D", "C"]);
        assert_eq!(summary.countries, 3);
        assert_eq!(summary.with_position, 2);
        assert_eq!(summary.average_distance, Some(5.0));
    }
}

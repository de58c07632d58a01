//! Coalition membership flags.
//!
//! A selector is either [`ALL_COALITIONS`] or a coalition id. `"All"` selects
//! every country in the table. An id that the registry does not know is not an
//! error: it resolves to [`CoalitionSelection::Unknown`], selects nobody, and
//! is logged so the caller can show an explanatory message instead of failing.

use greenswan_data::{
    ALL_COALITIONS, CoalitionDefinition, CoalitionRegistry, CountryCode, CountryTable,
};
use serde::Serialize;

/// How a selector resolved against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum CoalitionStatus {
    /// The all-countries selector
    All,
    /// A registered coalition
    Found,
    /// An id the registry does not contain
    Unknown,
}

/// A resolved selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CoalitionSelection<'a> {
    All,
    Coalition(&'a CoalitionDefinition),
    Unknown(&'a str),
}

impl CoalitionSelection<'_> {
    #[must_use]
    pub fn status(&self) -> CoalitionStatus {
        match self {
            Self::All => CoalitionStatus::All,
            Self::Coalition(_) => CoalitionStatus::Found,
            Self::Unknown(_) => CoalitionStatus::Unknown,
        }
    }

    /// The selector text this selection was resolved from.
    #[must_use]
    pub fn selector(&self) -> &str {
        match self {
            Self::All => ALL_COALITIONS,
            Self::Coalition(coalition) => coalition.id(),
            Self::Unknown(id) => id,
        }
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Coalition(coalition) => coalition.contains(code),
            Self::Unknown(_) => false,
        }
    }
}

/// Membership of one country in the selected group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipFlag {
    pub code: CountryCode,
    pub is_member: bool,
}

/// Membership flags for every country in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MembershipReport {
    pub selector: String,
    pub status: CoalitionStatus,
    /// One flag per table row, in table order
    pub flags: Vec<MembershipFlag>,
}

impl MembershipReport {
    pub fn members(&self) -> impl Iterator<Item = &CountryCode> + '_ {
        self.flags
            .iter()
            .filter(|flag| flag.is_member)
            .map(|flag| &flag.code)
    }

    #[must_use]
    pub fn member_count(&self) -> usize {
        self.flags.iter().filter(|flag| flag.is_member).count()
    }
}

/// Resolves selectors against a registry.
///
/// # Examples
///
/// ```
/// use greenswan_analysis::membership::{CoalitionStatus, MembershipEngine};
/// use greenswan_data::{CoalitionDefinition, CoalitionRegistry, CountryRecord, CountryTable};
///
/// let table = CountryTable::new(vec![
///     CountryRecord::new("FRA"),
///     CountryRecord::new("BRA"),
///     CountryRecord::new("IND"),
/// ])
/// .unwrap();
/// let registry =
///     CoalitionRegistry::new(vec![CoalitionDefinition::new("BRICS", ["BRA", "IND", "CHN"])]).unwrap();
/// let engine = MembershipEngine::new(&registry);
///
/// let report = engine.membership(&table, "BRICS");
/// assert_eq!(report.member_count(), 2);
///
/// let all = engine.membership(&table, "All");
/// assert_eq!(all.member_count(), 3);
///
/// let unknown = engine.membership(&table, "XYZ");
/// assert_eq!(unknown.status, CoalitionStatus::Unknown);
/// assert_eq!(unknown.member_count(), 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MembershipEngine<'a> {
    registry: &'a CoalitionRegistry,
}

impl<'a> MembershipEngine<'a> {
    #[must_use]
    pub fn new(registry: &'a CoalitionRegistry) -> Self {
        Self { registry }
    }

    /// Resolves `selector`, logging a warning for unknown ids.
    #[must_use]
    pub fn resolve<'s>(&self, selector: &'s str) -> CoalitionSelection<'s>
    where
        'a: 's,
    {
        if selector == ALL_COALITIONS {
            return CoalitionSelection::All;
        }
        match self.registry.get(selector) {
            Some(coalition) => CoalitionSelection::Coalition(coalition),
            None => {
                tracing::warn!(coalition = selector, "unknown coalition");
                CoalitionSelection::Unknown(selector)
            }
        }
    }

    /// Whether `code` belongs to the group named by `selector`.
    ///
    /// `"All"` accepts any code, even one missing from the table. Unknown
    /// selectors accept none.
    #[must_use]
    pub fn is_member(&self, code: &str, selector: &str) -> bool {
        self.resolve(selector).contains(code)
    }

    /// Flags every table row as member or non-member of `selector`.
    #[must_use]
    pub fn membership(&self, table: &CountryTable, selector: &str) -> MembershipReport {
        let selection = self.resolve(selector);
        let flags = table
            .codes()
            .map(|code| MembershipFlag {
                code: code.clone(),
                is_member: selection.contains(code.as_str()),
            })
            .collect();
        MembershipReport {
            selector: selector.to_owned(),
            status: selection.status(),
            flags,
        }
    }
}

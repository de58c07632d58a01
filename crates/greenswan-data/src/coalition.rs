//! Coalition ("club") rosters and their registry.
//!
//! Rosters are immutable reference data. They may name countries that are not
//! present in the [`CountryTable`](crate::CountryTable); such entries simply
//! contribute nothing when statistics are computed.
//!
//! The registry replaces name-string indirection with an explicit
//! id → definition map. Lookups of unknown ids return `None`, and callers
//! decide how to surface that.
//!
//! # Serialization
//!
//! ```json
//! {
//!   "coalitions": [
//!     { "id": "G7", "members": ["USA", "FRA"], "metadata": { "x_score": 0.2, "y_score": null } }
//!   ]
//! }
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::CountryCode;

/// Selector meaning "every country in the table".
pub const ALL_COALITIONS: &str = "All";

/// Optional static scores used to place coalitions against each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoalitionMetadata {
    #[serde(default)]
    pub x_score: Option<f64>,
    #[serde(default)]
    pub y_score: Option<f64>,
}

/// A named roster of country codes.
///
/// The roster keeps first-occurrence order and never contains duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CoalitionEntry")]
pub struct CoalitionDefinition {
    id: String,
    members: Vec<CountryCode>,
    metadata: CoalitionMetadata,
}

#[derive(Debug, Deserialize)]
struct CoalitionEntry {
    id: String,
    #[serde(default)]
    members: Vec<CountryCode>,
    #[serde(default)]
    metadata: CoalitionMetadata,
}

impl From<CoalitionEntry> for CoalitionDefinition {
    fn from(entry: CoalitionEntry) -> Self {
        Self::new(entry.id, entry.members).with_metadata(entry.metadata)
    }
}

impl CoalitionDefinition {
    /// Creates a coalition, dropping repeated roster entries.
    ///
    /// ```
    /// use greenswan_data::CoalitionDefinition;
    ///
    /// let brics = CoalitionDefinition::new("BRICS", ["BRA", "RUS", "IND", "BRA"]);
    /// assert_eq!(brics.members().len(), 3);
    /// assert!(brics.contains("IND"));
    /// ```
    #[must_use]
    pub fn new<I, C>(id: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CountryCode>,
    {
        let id = id.into();
        let mut seen = HashSet::new();
        let mut roster = vec![];
        for code in members {
            let code = code.into();
            if seen.insert(code.clone()) {
                roster.push(code);
            } else {
                tracing::warn!(coalition = %id, country = %code, "dropping duplicate roster entry");
            }
        }
        Self {
            id,
            members: roster,
            metadata: CoalitionMetadata::default(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, metadata: CoalitionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn members(&self) -> &[CountryCode] {
        &self.members
    }

    #[must_use]
    pub fn metadata(&self) -> CoalitionMetadata {
        self.metadata
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.members.iter().any(|member| member.as_str() == code)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum RegistryError {
    #[display("duplicate coalition id '{id}'")]
    DuplicateCoalitionId { id: String },
    #[display("coalition id '{id}' is reserved for the all-countries selector")]
    ReservedCoalitionId { id: String },
}

/// Immutable catalog of coalitions, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CoalitionRegistry {
    coalitions: Vec<CoalitionDefinition>,
    index: HashMap<String, usize>,
}

/// Serialized form of a [`CoalitionRegistry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoalitionRegistryFile {
    pub coalitions: Vec<CoalitionDefinition>,
}

impl CoalitionRegistry {
    pub fn new(coalitions: Vec<CoalitionDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(coalitions.len());
        for (i, coalition) in coalitions.iter().enumerate() {
            if coalition.id == ALL_COALITIONS {
                return Err(RegistryError::ReservedCoalitionId {
                    id: coalition.id.clone(),
                });
            }
            if index.insert(coalition.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateCoalitionId {
                    id: coalition.id.clone(),
                });
            }
        }
        Ok(Self { coalitions, index })
    }

    pub fn from_file(file: CoalitionRegistryFile) -> Result<Self, RegistryError> {
        Self::new(file.coalitions)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CoalitionDefinition> {
        self.index.get(id).map(|&i| &self.coalitions[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoalitionDefinition> + '_ {
        self.coalitions.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.coalitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coalitions.is_empty()
    }
}

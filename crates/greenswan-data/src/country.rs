//! Country records and the table that indexes them by country code.
//!
//! A [`CountryRecord`] carries a sparse set of named indicator cells plus an
//! optional position metric. Cells are kept as they were supplied
//! ([`IndicatorValue`]): numeric strings coming from spreadsheet exports are
//! only coerced when a feature matrix is built, so the table itself never
//! loses information.
//!
//! # Serialization
//!
//! ```json
//! {
//!   "countries": [
//!     { "code": "FRA", "position": 0.41,
//!       "indicators": { "BLI_scaled": 0.7, "Sovereign risk": "1.3", "Biocapacity": null } }
//!   ]
//! }
//! ```

use std::{
    borrow::Borrow,
    collections::{BTreeMap, HashMap},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::IgnoredAny};

/// Short unique country identifier (typically ISO 3166-1 alpha-3).
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for CountryCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CountryCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

/// A single indicator cell as supplied by the data loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Number(f64),
    Text(String),
    /// Booleans, arrays, objects: kept so the table still loads, never numeric
    Other(UnsupportedValue),
}

/// Placeholder for a cell of a JSON type that cannot hold a number.
///
/// Deserializes from any value, discarding it, and serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsupportedValue;

impl<'de> Deserialize<'de> for UnsupportedValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(Self)
    }
}

impl Serialize for UnsupportedValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_none()
    }
}

impl IndicatorValue {
    /// Coerces the cell to a finite number.
    ///
    /// Text cells are trimmed and parsed; anything that does not parse, or
    /// parses to NaN or an infinity, yields `None`. [`Other`](Self::Other)
    /// cells are always `None`.
    ///
    /// ```
    /// use greenswan_data::IndicatorValue;
    ///
    /// assert_eq!(IndicatorValue::Number(2.5).to_number(), Some(2.5));
    /// assert_eq!(IndicatorValue::Text(" 1.25 ".into()).to_number(), Some(1.25));
    /// assert_eq!(IndicatorValue::Text("n/a".into()).to_number(), None);
    /// ```
    #[must_use]
    pub fn to_number(&self) -> Option<f64> {
        let value = match self {
            Self::Number(value) => *value,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for IndicatorValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for IndicatorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One row of the country table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    /// Unique country code
    pub code: CountryCode,
    /// Indicator cells keyed by indicator name; absent keys and nulls are missing
    #[serde(default)]
    pub indicators: BTreeMap<String, Option<IndicatorValue>>,
    /// Scalar position metric used for pairwise-distance aggregation
    #[serde(default)]
    pub position: Option<f64>,
}

impl CountryRecord {
    #[must_use]
    pub fn new(code: impl Into<CountryCode>) -> Self {
        Self {
            code: code.into(),
            indicators: BTreeMap::new(),
            position: None,
        }
    }

    #[must_use]
    pub fn with_indicator(
        mut self,
        name: impl Into<String>,
        value: impl Into<IndicatorValue>,
    ) -> Self {
        self.indicators.insert(name.into(), Some(value.into()));
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = Some(position);
        self
    }

    /// Returns the raw cell for `name`, or `None` when it is absent or null.
    #[must_use]
    pub fn indicator(&self, name: &str) -> Option<&IndicatorValue> {
        self.indicators.get(name)?.as_ref()
    }

    /// Returns the position metric if it is present and finite.
    #[must_use]
    pub fn position(&self) -> Option<f64> {
        self.position.filter(|value| value.is_finite())
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("duplicate country code '{code}' in country table")]
    DuplicateCountryCode { code: CountryCode },
}

/// Country records in load order, indexed by code.
#[derive(Debug, Clone, Default)]
pub struct CountryTable {
    records: Vec<CountryRecord>,
    index: HashMap<CountryCode, usize>,
}

/// Serialized form of a [`CountryTable`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryTableFile {
    pub countries: Vec<CountryRecord>,
}

impl CountryTable {
    /// Builds a table, rejecting duplicate country codes.
    pub fn new(records: Vec<CountryRecord>) -> Result<Self, TableError> {
        let mut index = HashMap::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            if index.insert(record.code.clone(), i).is_some() {
                return Err(TableError::DuplicateCountryCode {
                    code: record.code.clone(),
                });
            }
        }
        Ok(Self { records, index })
    }

    pub fn from_file(file: CountryTableFile) -> Result<Self, TableError> {
        Self::new(file.countries)
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&CountryRecord> {
        self.index.get(code).map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    #[must_use]
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn codes(&self) -> impl Iterator<Item = &CountryCode> + '_ {
        self.records.iter().map(|record| &record.code)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_code_rejected() {
        let err = CountryTable::new(vec![CountryRecord::new("FRA"), CountryRecord::new("FRA")])
            .unwrap_err();
        assert!(matches!(err, TableError::DuplicateCountryCode { code } if code.as_str() == "FRA"));
    }

    #[test]
    fn test_lookup_preserves_order() {
        let table = CountryTable::new(vec![
            CountryRecord::new("USA"),
            CountryRecord::new("BRA"),
            CountryRecord::new("KEN"),
        ])
        .unwrap();
        let codes: Vec<_> = table.codes().map(CountryCode::as_str).collect();
        assert_eq!(codes, ["USA", "BRA", "KEN"]);
        assert!(table.contains("BRA"));
        assert!(table.get("XXX").is_none());
    }

    #[test]
    fn test_deserialize_mixed_cells() {
        let json = r#"{
            "countries": [
                { "code": "FRA", "position": 0.5,
                  "indicators": { "a": 1.5, "b": "2", "c": null, "d": "n/a" } },
                { "code": "DEU" }
            ]
        }"#;
        let file: CountryTableFile = serde_json::from_str(json).unwrap();
        let table = CountryTable::from_file(file).unwrap();

        let fra = table.get("FRA").unwrap();
        assert_eq!(fra.indicator("a").and_then(IndicatorValue::to_number), Some(1.5));
        assert_eq!(fra.indicator("b").and_then(IndicatorValue::to_number), Some(2.0));
        assert_eq!(fra.indicator("c"), None);
        assert_eq!(fra.indicator("d").and_then(IndicatorValue::to_number), None);
        assert!(fra.indicator("d").is_some());
        assert_eq!(fra.position(), Some(0.5));

        let deu = table.get("DEU").unwrap();
        assert!(deu.indicators.is_empty());
        assert_eq!(deu.position(), None);
    }

    #[test]
    fn test_deserialize_non_scalar_cells() {
        let json = r#"{
            "countries": [
                { "code": "FRA",
                  "indicators": { "a": true, "b": 1.0, "c": [1, 2], "d": { "v": 3 } } }
            ]
        }"#;
        let file: CountryTableFile = serde_json::from_str(json).unwrap();
        let table = CountryTable::from_file(file).unwrap();

        let fra = table.get("FRA").unwrap();
        assert_eq!(fra.indicator("b").and_then(IndicatorValue::to_number), Some(1.0));
        for name in ["a", "c", "d"] {
            let cell = fra.indicator(name).unwrap();
            assert_eq!(*cell, IndicatorValue::Other(UnsupportedValue), "{name}");
            assert_eq!(cell.to_number(), None, "{name}");
        }

        let json = serde_json::to_value(fra).unwrap();
        assert!(json["indicators"]["a"].is_null());
    }

    #[test]
    fn test_non_finite_values_are_missing() {
        assert_eq!(IndicatorValue::Number(f64::NAN).to_number(), None);
        assert_eq!(IndicatorValue::Text("inf".into()).to_number(), None);
        let record = CountryRecord::new("X").with_position(f64::INFINITY);
        assert_eq!(record.position(), None);
    }
}

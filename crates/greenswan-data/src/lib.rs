//! Reference data for the Green Swan analytics engine.
//!
//! This crate holds the read-only inputs every analysis runs against:
//!
//! - [`CountryTable`]: per-country indicator values and the scalar position metric
//! - [`IndicatorCatalog`]: the indicator names a feature selection may use
//! - [`CoalitionRegistry`]: named coalition rosters with optional comparison scores
//!
//! All three are built once by the caller (usually from JSON) and then shared
//! by reference. Nothing in the engine mutates them.
//!
//! # Examples
//!
//! ```
//! use greenswan_data::{CoalitionDefinition, CoalitionRegistry, CountryRecord, CountryTable};
//!
//! let table = CountryTable::new(vec![
//!     CountryRecord::new("FRA").with_indicator("BLI_scaled", 0.7).with_position(1.0),
//!     CountryRecord::new("DEU").with_indicator("BLI_scaled", 0.8).with_position(3.0),
//! ])
//! .unwrap();
//! let registry =
//!     CoalitionRegistry::new(vec![CoalitionDefinition::new("EU", ["FRA", "DEU", "ITA"])]).unwrap();
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(registry.get("EU").unwrap().members().len(), 3);
//! ```

pub use self::{catalog::*, coalition::*, country::*};

pub mod catalog;
pub mod coalition;
pub mod country;

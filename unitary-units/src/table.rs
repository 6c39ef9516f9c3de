//! Per-category unit tables

use std::collections::HashMap;
use thiserror::Error;
use unitary_core::{Number, NumberError};
use crate::{Conversion, TemperatureScale, UnitDescriptor};

/// Defects in unit table data, caught when the registry is built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{table}: table has no units")]
    Empty { table: String },

    #[error("{table}: unit '{symbol}' / '{name}' is declared twice")]
    DuplicateUnit { table: String, symbol: String, name: String },

    #[error("{table}: key '{key}' names more than one unit")]
    AmbiguousKey { table: String, key: String },

    #[error("{table}: linear and temperature units cannot share a table")]
    MixedConversions { table: String },

    #[error("{table}: unit '{symbol}' has a zero factor")]
    ZeroFactor { table: String, symbol: String },

    #[error("{table}: unit '{symbol}' has an invalid factor: {source}")]
    InvalidFactor { table: String, symbol: String, source: NumberError },
}

/// Immutable, ordered list of units with name/symbol lookup.
///
/// Order is display order; lookups are exact and case-sensitive.
#[derive(Debug, Clone)]
pub struct UnitTable {
    units: Vec<UnitDescriptor>,
    index: HashMap<String, usize>,
}

impl UnitTable {
    /// Validate and index a list of units
    pub fn new(table: &str, units: Vec<UnitDescriptor>) -> Result<Self, TableError> {
        if units.is_empty() {
            return Err(TableError::Empty { table: table.to_string() });
        }

        let linear = units[0].conversion.is_linear();
        let mut index = HashMap::with_capacity(units.len() * 2);

        for (pos, unit) in units.iter().enumerate() {
            if unit.conversion.is_linear() != linear {
                return Err(TableError::MixedConversions { table: table.to_string() });
            }
            if let Conversion::Linear(factor) = &unit.conversion {
                if factor.is_zero() {
                    return Err(TableError::ZeroFactor {
                        table: table.to_string(),
                        symbol: unit.symbol.clone(),
                    });
                }
            }
            if units[..pos].iter().any(|u| u.symbol == unit.symbol && u.name == unit.name) {
                return Err(TableError::DuplicateUnit {
                    table: table.to_string(),
                    symbol: unit.symbol.clone(),
                    name: unit.name.clone(),
                });
            }
            for key in [&unit.name, &unit.symbol] {
                match index.get(key.as_str()) {
                    Some(&existing) if existing != pos => {
                        return Err(TableError::AmbiguousKey {
                            table: table.to_string(),
                            key: key.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        index.insert(key.clone(), pos);
                    }
                }
            }
        }

        Ok(UnitTable { units, index })
    }

    /// Start a table from literal data
    pub fn builder(table: &str) -> TableBuilder {
        TableBuilder {
            table: table.to_string(),
            units: Vec::new(),
            error: None,
        }
    }

    /// Get a unit by name or symbol
    pub fn get(&self, key: &str) -> Option<&UnitDescriptor> {
        self.position(key).map(|pos| &self.units[pos])
    }

    /// Display position of a unit
    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn units(&self) -> &[UnitDescriptor] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Collects literal unit data; the first bad factor is reported by `build`
pub struct TableBuilder {
    table: String,
    units: Vec<UnitDescriptor>,
    error: Option<TableError>,
}

impl TableBuilder {
    /// Add a unit whose factor to the base unit is a decimal or ratio literal
    pub fn linear(mut self, symbol: &str, name: &str, factor: &str) -> Self {
        if self.error.is_none() {
            match Number::from_str(factor) {
                Ok(factor) => self.units.push(UnitDescriptor::linear(symbol, name, factor)),
                Err(source) => {
                    self.error = Some(TableError::InvalidFactor {
                        table: self.table.clone(),
                        symbol: symbol.to_string(),
                        source,
                    });
                }
            }
        }
        self
    }

    /// Add a temperature unit
    pub fn affine(mut self, symbol: &str, name: &str, scale: TemperatureScale) -> Self {
        self.units.push(UnitDescriptor::affine(symbol, name, scale));
        self
    }

    pub fn build(self) -> Result<UnitTable, TableError> {
        match self.error {
            Some(err) => Err(err),
            None => UnitTable::new(&self.table, self.units),
        }
    }
}

//! Category registry
//!
//! Built once at startup. Every category gets a validated, non-empty unit
//! table; a data defect stops construction instead of surfacing later as a
//! runtime special case.

use thiserror::Error;
use tracing::debug;
use unitary_core::ConversionError;
use crate::units::table_for;
use crate::{Category, CategoryConverter, CategoryGroup, TableError, UnitDescriptor, UnitTable};

/// Failure to build the registry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("invalid unit table: {0}")]
    Table(#[from] TableError),
}

/// All categories and their unit tables
#[derive(Debug)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
    /// Indexed by variant, in `Category::ALL` order
    tables: Vec<UnitTable>,
}

impl CategoryRegistry {
    /// Build every category's table
    pub fn new() -> Result<Self, RegistryError> {
        let mut tables = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let table = table_for(category)?;
            debug!(category = category.id(), units = table.len(), "registered category");
            tables.push(table);
        }
        Ok(CategoryRegistry {
            categories: Category::ALL.to_vec(),
            tables,
        })
    }

    /// All categories in display order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Categories grouped for menus, in menu order
    pub fn groups(&self) -> Vec<(CategoryGroup, Vec<Category>)> {
        CategoryGroup::ALL
            .iter()
            .map(|group| (*group, group.categories().collect()))
            .collect()
    }

    /// Resolve a category id
    pub fn category(&self, id: &str) -> Result<Category, ConversionError> {
        Category::from_id(id).ok_or_else(|| ConversionError::UnknownCategory(id.to_string()))
    }

    /// Units of a category in display order
    pub fn units_of(&self, id: &str) -> Result<&[UnitDescriptor], ConversionError> {
        let category = self.category(id)?;
        Ok(self.table(category).units())
    }

    /// Converter for one category
    pub fn converter_for(&self, category: Category) -> CategoryConverter<'_> {
        CategoryConverter::new(category, self.table(category))
    }

    /// Categories whose tables know `unit` as a name or symbol
    pub fn locate_unit(&self, unit: &str) -> Vec<Category> {
        self.categories
            .iter()
            .copied()
            .filter(|c| self.table(*c).contains(unit))
            .collect()
    }

    fn table(&self, category: Category) -> &UnitTable {
        &self.tables[category as usize]
    }
}

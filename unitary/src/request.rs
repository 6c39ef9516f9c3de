//! Request and result value objects

use serde::{Deserialize, Serialize};
use unitary_core::Number;
use unitary_currency::RateMode;
use unitary_units::{Category, CategoryGroup, UnitDescriptor};

/// One conversion to perform. Not retained by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category_id: String,
    pub from_unit: String,
    pub to_unit: String,
    pub input_value: Number,
}

impl ConversionRequest {
    pub fn new(
        category_id: impl Into<String>,
        from_unit: impl Into<String>,
        to_unit: impl Into<String>,
        input_value: Number,
    ) -> Self {
        ConversionRequest {
            category_id: category_id.into(),
            from_unit: from_unit.into(),
            to_unit: to_unit.into(),
            input_value,
        }
    }
}

/// A finished conversion with everything a caller may want to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionOutcome {
    pub category: Category,
    /// Resolved unit names
    pub from_unit: String,
    pub to_unit: String,
    pub input: Number,
    pub value: Number,
    /// Formatted `value` in the caller's locale
    pub display: String,
    /// Set for currency conversions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<RateMode>,
}

impl ConversionOutcome {
    /// True when the result came from placeholder exchange rates
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rates, Some(RateMode::Fallback))
    }
}

/// Category metadata for menus
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    pub group: CategoryGroup,
}

impl From<Category> for CategoryInfo {
    fn from(category: Category) -> Self {
        CategoryInfo {
            id: category.id(),
            label: category.label(),
            icon: category.icon(),
            description: category.description(),
            group: category.group(),
        }
    }
}

/// A menu group and its categories
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupInfo {
    pub group: CategoryGroup,
    pub categories: Vec<CategoryInfo>,
}

/// A unit as listed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitInfo {
    pub symbol: String,
    pub name: String,
}

impl From<&UnitDescriptor> for UnitInfo {
    fn from(unit: &UnitDescriptor) -> Self {
        UnitInfo {
            symbol: unit.symbol.clone(),
            name: unit.name.clone(),
        }
    }
}

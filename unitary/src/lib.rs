//! Unitary - Unit Conversion Engine
//!
//! The caller-facing API: list categories and units, convert user-typed
//! strings to display strings, refresh exchange rates, match favorites.
//! Callers never need to touch `Number` directly.

mod favorites;
mod request;

pub use favorites::{is_favorite, matches, toggle_favorite, FavoriteKey, FavoriteStore, InMemoryFavoriteStore};
pub use request::{CategoryInfo, ConversionOutcome, ConversionRequest, GroupInfo, UnitInfo};

pub use unitary_core::{ConversionError, ErrorReport, Locale, Number, NumericFormatter, Severity};
pub use unitary_currency::{CurrencyConverter, ExchangeRateSnapshot, RateMode, RatePhase, RateSource};
pub use unitary_units::{Category, CategoryGroup, CategoryRegistry, RegistryError};

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::error;
use unitary_units::{currencies::currency_name, CategoryConverter, UnitDescriptor};

/// Main Unitary engine
pub struct Engine {
    registry: CategoryRegistry,
    currency: Arc<CurrencyConverter>,
    formatter: NumericFormatter,
}

impl Engine {
    /// Build the registry and an uninitialized currency converter
    pub fn new() -> Result<Self, RegistryError> {
        Ok(Self {
            registry: CategoryRegistry::new()?,
            currency: Arc::new(CurrencyConverter::new()),
            formatter: NumericFormatter::new(),
        })
    }

    pub fn with_currency_converter(mut self, currency: Arc<CurrencyConverter>) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_formatter(mut self, formatter: NumericFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn currency(&self) -> &Arc<CurrencyConverter> {
        &self.currency
    }

    pub fn formatter(&self) -> &NumericFormatter {
        &self.formatter
    }

    // ========== Listing ==========

    /// All categories in display order
    pub fn list_categories(&self) -> Vec<CategoryInfo> {
        self.registry.categories().iter().map(|c| CategoryInfo::from(*c)).collect()
    }

    /// Categories grouped for menus
    pub fn groups(&self) -> Vec<GroupInfo> {
        self.registry
            .groups()
            .into_iter()
            .map(|(group, categories)| GroupInfo {
                group,
                categories: categories.into_iter().map(CategoryInfo::from).collect(),
            })
            .collect()
    }

    /// Units of a category in display order.
    ///
    /// Currency lists the codes of the live snapshot when there is one.
    pub fn units_of(&self, category_id: &str) -> Result<Vec<UnitInfo>, ConversionError> {
        let category = self.registry.category(category_id)?;
        if category.is_currency() && self.currency.mode().is_live() {
            return Ok(self
                .currency
                .codes()
                .into_iter()
                .map(|code| UnitInfo {
                    name: currency_name(&code).unwrap_or(code.as_str()).to_string(),
                    symbol: code,
                })
                .collect());
        }
        Ok(self.registry.units_of(category_id)?.iter().map(UnitInfo::from).collect())
    }

    // ========== Conversion ==========

    /// Parse, convert and format in one step
    pub fn convert(
        &self,
        category_id: &str,
        from_unit: &str,
        to_unit: &str,
        value: &str,
        locale: &Locale,
    ) -> Result<String, ConversionError> {
        self.convert_detailed(category_id, from_unit, to_unit, value, locale)
            .map(|outcome| outcome.display)
    }

    /// Like [`convert`](Self::convert), with resolved units and rate mode
    pub fn convert_detailed(
        &self,
        category_id: &str,
        from_unit: &str,
        to_unit: &str,
        value: &str,
        locale: &Locale,
    ) -> Result<ConversionOutcome, ConversionError> {
        let input = self
            .formatter
            .parse(value, locale)
            .ok_or_else(|| ConversionError::MalformedInput(value.to_string()))?;
        self.convert_number(category_id, from_unit, to_unit, input, locale)
    }

    /// Convert an already-parsed value; `locale` only shapes `display`
    pub fn convert_number(
        &self,
        category_id: &str,
        from_unit: &str,
        to_unit: &str,
        input: Number,
        locale: &Locale,
    ) -> Result<ConversionOutcome, ConversionError> {
        let request = ConversionRequest::new(category_id, from_unit, to_unit, input);
        let resolved = self.run(&request)?;

        Ok(ConversionOutcome {
            category: resolved.category,
            display: self.formatter.format_localized(&resolved.value, locale),
            from_unit: resolved.from_name,
            to_unit: resolved.to_name,
            input: request.input_value,
            value: resolved.value,
            rates: resolved.rates,
        })
    }

    /// Convert an already-parsed request
    pub fn execute(&self, request: &ConversionRequest) -> Result<Number, ConversionError> {
        self.run(request).map(|resolved| resolved.value)
    }

    // ========== Favorites ==========

    /// Favorite identity for a pair, with unit keys resolved to unit names
    pub fn favorite_key(&self, category_id: &str, from_unit: &str, to_unit: &str) -> Result<FavoriteKey, ConversionError> {
        let category = self.registry.category(category_id)?;
        let (from_name, to_name) = if category.is_currency() {
            (self.currency_unit_name(from_unit)?, self.currency_unit_name(to_unit)?)
        } else {
            let converter = self.registry.converter_for(category);
            (
                self.resolve(&converter, from_unit)?.name.clone(),
                self.resolve(&converter, to_unit)?.name.clone(),
            )
        };
        Ok(FavoriteKey::new(category.id(), from_name, to_name))
    }

    // ========== Exchange rates ==========

    /// Fetch rates once; see [`CurrencyConverter::refresh`]
    pub async fn refresh_rates(&self, source: &dyn RateSource) -> Result<Arc<ExchangeRateSnapshot>, ConversionError> {
        self.currency.refresh(source).await
    }

    /// Refresh in the background; the handle is the completion signal
    pub fn spawn_refresh(
        &self,
        source: Arc<dyn RateSource>,
    ) -> JoinHandle<Result<Arc<ExchangeRateSnapshot>, ConversionError>> {
        self.currency.spawn_refresh(source)
    }

    // ========== Internals ==========

    fn run(&self, request: &ConversionRequest) -> Result<Resolved, ConversionError> {
        let category = self.registry.category(&request.category_id)?;
        if category.is_currency() {
            return self.run_currency(request);
        }

        let converter = self.registry.converter_for(category);
        let from = self.resolve(&converter, &request.from_unit)?;
        let to = self.resolve(&converter, &request.to_unit)?;
        let value = converter.convert_units(&request.input_value, from, to)?;

        Ok(Resolved {
            category,
            from_name: from.name.clone(),
            to_name: to.name.clone(),
            value,
            rates: None,
        })
    }

    fn run_currency(&self, request: &ConversionRequest) -> Result<Resolved, ConversionError> {
        let from = self.currency_code(&request.from_unit);
        let to = self.currency_code(&request.to_unit);

        let quote = self
            .currency
            .convert(&request.input_value, from, to)
            .map_err(|err| match err {
                ConversionError::UnknownUnit { ref unit, .. } => {
                    let key = if unit == from { &request.from_unit } else { &request.to_unit };
                    self.classify_unknown(Category::Currency, key, err.clone())
                }
                other => other,
            })?;

        Ok(Resolved {
            category: Category::Currency,
            from_name: self.currency_display_name(from),
            to_name: self.currency_display_name(to),
            value: quote.value,
            rates: Some(quote.mode),
        })
    }

    /// Unit lookup that tells a typo apart from a unit of another category
    fn resolve<'a>(&self, converter: &CategoryConverter<'a>, key: &str) -> Result<&'a UnitDescriptor, ConversionError> {
        converter
            .unit(key)
            .map_err(|err| self.classify_unknown(converter.category(), key, err))
    }

    fn classify_unknown(&self, category: Category, key: &str, err: ConversionError) -> ConversionError {
        let owners = self.registry.locate_unit(key);
        match owners.first() {
            Some(found) if !owners.contains(&category) => {
                error!(unit = key, expected = category.id(), found = found.id(), "unit belongs to another category");
                ConversionError::CrossCategoryUnit {
                    unit: key.to_string(),
                    expected: category.id().to_string(),
                    found: found.id().to_string(),
                }
            }
            _ => err,
        }
    }

    /// Currency names ("Euro") map to codes; anything else is taken as a code
    fn currency_code<'k>(&'k self, key: &'k str) -> &'k str {
        self.registry
            .converter_for(Category::Currency)
            .unit(key)
            .map(|unit| unit.symbol.as_str())
            .unwrap_or(key)
    }

    fn currency_display_name(&self, code: &str) -> String {
        currency_name(code).unwrap_or(code).to_string()
    }

    fn currency_unit_name(&self, key: &str) -> Result<String, ConversionError> {
        let code = self.currency_code(key);
        if self.currency.codes().iter().any(|c| c == code) {
            Ok(self.currency_display_name(code))
        } else {
            Err(self.classify_unknown(Category::Currency, key, ConversionError::unknown_unit(Category::Currency.id(), key)))
        }
    }
}

struct Resolved {
    category: Category,
    from_name: String,
    to_name: String,
    value: Number,
    rates: Option<RateMode>,
}

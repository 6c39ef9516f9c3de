//! Per-category conversion

use unitary_core::{ConversionError, Number};
use crate::unit::pivot;
use crate::{Category, UnitDescriptor, UnitTable};

/// Converts values between the units of a single category.
///
/// Borrowed from the registry; cheap to copy and safe to share across
/// threads since tables never change after construction.
#[derive(Debug, Clone, Copy)]
pub struct CategoryConverter<'a> {
    category: Category,
    table: &'a UnitTable,
}

impl<'a> CategoryConverter<'a> {
    pub fn new(category: Category, table: &'a UnitTable) -> Self {
        CategoryConverter { category, table }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn units(&self) -> &'a [UnitDescriptor] {
        self.table.units()
    }

    /// Resolve a unit key (name or symbol) in this category
    pub fn unit(&self, key: &str) -> Result<&'a UnitDescriptor, ConversionError> {
        self.table
            .get(key)
            .ok_or_else(|| ConversionError::unknown_unit(self.category.id(), key))
    }

    /// Convert `value` from one unit to another by pivoting through the base unit.
    ///
    /// Same unit on both sides returns `value` untouched.
    pub fn convert(&self, value: &Number, from: &str, to: &str) -> Result<Number, ConversionError> {
        let from_unit = self.unit(from)?;
        let to_unit = self.unit(to)?;
        self.convert_units(value, from_unit, to_unit)
    }

    /// Convert between two already-resolved descriptors
    pub fn convert_units(
        &self,
        value: &Number,
        from: &UnitDescriptor,
        to: &UnitDescriptor,
    ) -> Result<Number, ConversionError> {
        if from == to {
            return Ok(value.clone());
        }
        Ok(pivot(value, &from.conversion, &to.conversion)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::table_for;
    use unitary_core::codes;

    fn num(s: &str) -> Number {
        Number::from_str(s).unwrap()
    }

    fn tol() -> Number {
        num("1e-30")
    }

    #[test]
    fn test_miles_to_kilometers() {
        let table = table_for(Category::Length).unwrap();
        let conv = CategoryConverter::new(Category::Length, &table);
        let result = conv.convert(&num("3"), "Miles", "km").unwrap();
        assert_eq!(result, num("4.828032"));
    }

    #[test]
    fn test_identity_is_exact() {
        let table = table_for(Category::Speed).unwrap();
        let conv = CategoryConverter::new(Category::Speed, &table);
        let value = num("123.456");
        assert_eq!(conv.convert(&value, "km/h", "Kilometers per Hour").unwrap(), value);
    }

    #[test]
    fn test_unknown_unit_fails_closed() {
        let table = table_for(Category::Length).unwrap();
        let conv = CategoryConverter::new(Category::Length, &table);

        let err = conv.convert(&Number::from_i64(1), "Meters", "NotAUnit").unwrap_err();
        assert_eq!(err, ConversionError::unknown_unit("Length", "NotAUnit"));
        assert_eq!(err.code(), codes::UNKNOWN_UNIT);

        let err = conv.convert(&Number::from_i64(1), "NotAUnit", "Meters").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { ref unit, .. } if unit == "NotAUnit"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = table_for(Category::Length).unwrap();
        let conv = CategoryConverter::new(Category::Length, &table);
        assert!(conv.convert(&Number::from_i64(1), "meters", "Feet").is_err());
    }

    #[test]
    fn test_temperature_boundaries() {
        let table = table_for(Category::Temperature).unwrap();
        let conv = CategoryConverter::new(Category::Temperature, &table);
        assert_eq!(conv.convert(&num("0"), "Celsius", "Fahrenheit").unwrap(), num("32"));
        assert_eq!(conv.convert(&num("100"), "Celsius", "Fahrenheit").unwrap(), num("212"));
        assert_eq!(conv.convert(&num("0"), "Kelvin", "Celsius").unwrap(), num("-273.15"));
    }

    #[test]
    fn test_pressure() {
        let table = table_for(Category::Pressure).unwrap();
        let conv = CategoryConverter::new(Category::Pressure, &table);
        assert_eq!(conv.convert(&num("1"), "atm", "kPa").unwrap(), num("101.325"));
        let torr = conv.convert(&num("1"), "atm", "Torr").unwrap();
        assert!(torr.approx_eq(&num("760"), &tol()));
    }

    #[test]
    fn test_data_storage() {
        let table = table_for(Category::DataStorage).unwrap();
        let conv = CategoryConverter::new(Category::DataStorage, &table);
        assert_eq!(conv.convert(&num("1"), "GiB", "MiB").unwrap(), num("1024"));
        assert_eq!(conv.convert(&num("8"), "Bits", "Bytes").unwrap(), num("1"));
    }

    #[test]
    fn test_angle() {
        let table = table_for(Category::Angle).unwrap();
        let conv = CategoryConverter::new(Category::Angle, &table);
        assert_eq!(conv.convert(&num("1"), "Turns", "Gradians").unwrap(), num("400"));
        let deg = conv.convert(&num("3.1415926535897932384626433832795"), "rad", "°").unwrap();
        assert!(deg.approx_eq(&num("180"), &num("1e-28")));
    }

    #[test]
    fn test_negative_values_convert() {
        let table = table_for(Category::Length).unwrap();
        let conv = CategoryConverter::new(Category::Length, &table);
        assert_eq!(conv.convert(&num("-2"), "km", "m").unwrap(), num("-2000"));
    }
}

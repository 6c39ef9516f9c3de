//! Unitary Units - Unit tables and per-category conversion
//!
//! Every category converts through one pivot algorithm: a reading is mapped
//! onto the category's base unit and from there onto the target unit.
//! Linear categories pivot through a factor table; temperature pivots
//! through Kelvin with exact per-scale formulas.
//!
//! Groups:
//! - Common (Length, Area, Volume, Mass, Time, Speed, Temperature, Data Storage, Angle)
//! - Engineering (Acceleration, Density, Force, Pressure, Energy, Power, Torque)
//! - Heat, Fluids, Light, Electricity, Magnetism, Radiology
//! - Currency (placeholder table; live rates live in `unitary-currency`)

mod category;
mod convert;
pub mod currencies;
mod registry;
mod table;
mod temperature;
mod unit;
mod units;

pub use category::{Category, CategoryGroup};
pub use convert::CategoryConverter;
pub use currencies::{BASE_CURRENCY, COMMON_CURRENCIES};
pub use registry::{CategoryRegistry, RegistryError};
pub use table::{TableBuilder, TableError, UnitTable};
pub use temperature::TemperatureScale;
pub use unit::{pivot, BaseScale, Conversion, UnitDescriptor};
pub use units::table_for;

//! Unit definitions for every category
//!
//! Factors are the size of one unit expressed in the category's base unit.
//! Literals are exact where a definition exists; `a/b` ratios keep derived
//! factors exact up to working precision.

use crate::currencies::COMMON_CURRENCIES;
use crate::{Category, TableError, TemperatureScale, UnitTable};

/// Build the table for one category
pub fn table_for(category: Category) -> Result<UnitTable, TableError> {
    let b = UnitTable::builder(category.id());
    match category {
        // Base: meter
        Category::Length => b
            .linear("m", "Meters", "1")
            .linear("km", "Kilometers", "1000")
            .linear("cm", "Centimeters", "0.01")
            .linear("mm", "Millimeters", "0.001")
            .linear("µm", "Micrometers", "0.000001")
            .linear("nm", "Nanometers", "1e-9")
            .linear("mi", "Miles", "1609.344")
            .linear("yd", "Yards", "0.9144")
            .linear("ft", "Feet", "0.3048")
            .linear("in", "Inches", "0.0254")
            .linear("nmi", "Nautical Miles", "1852")
            .linear("au", "Astronomical Units", "149597870700")
            .linear("ly", "Light Years", "9460730472580800")
            .linear("pc", "Parsecs", "30856775814913673")
            .build(),

        // Base: square meter
        Category::Area => b
            .linear("m²", "Square Meters", "1")
            .linear("km²", "Square Kilometers", "1000000")
            .linear("cm²", "Square Centimeters", "0.0001")
            .linear("mm²", "Square Millimeters", "0.000001")
            .linear("ha", "Hectares", "10000")
            .linear("ac", "Acres", "4046.8564224")
            .linear("mi²", "Square Miles", "2589988.110336")
            .linear("yd²", "Square Yards", "0.83612736")
            .linear("ft²", "Square Feet", "0.09290304")
            .linear("in²", "Square Inches", "0.00064516")
            .build(),

        // Base: cubic meter
        Category::Volume => b
            .linear("m³", "Cubic Meters", "1")
            .linear("L", "Liters", "0.001")
            .linear("mL", "Milliliters", "0.000001")
            .linear("cm³", "Cubic Centimeters", "0.000001")
            .linear("gal", "US Gallons", "0.003785411784")
            .linear("qt", "US Quarts", "0.000946352946")
            .linear("pt", "US Pints", "0.000473176473")
            .linear("cup", "US Cups", "0.0002365882365")
            .linear("fl oz", "US Fluid Ounces", "0.0000295735295625")
            .linear("tbsp", "Tablespoons", "0.00001478676478125")
            .linear("tsp", "Teaspoons", "0.00000492892159375")
            .linear("imp gal", "Imperial Gallons", "0.00454609")
            .linear("ft³", "Cubic Feet", "0.028316846592")
            .linear("in³", "Cubic Inches", "0.000016387064")
            .build(),

        // Base: kilogram
        Category::Mass => b
            .linear("kg", "Kilograms", "1")
            .linear("g", "Grams", "0.001")
            .linear("mg", "Milligrams", "0.000001")
            .linear("µg", "Micrograms", "1e-9")
            .linear("t", "Metric Tons", "1000")
            .linear("lb", "Pounds", "0.45359237")
            .linear("oz", "Ounces", "0.028349523125")
            .linear("st", "Stones", "6.35029318")
            .linear("ton", "Short Tons", "907.18474")
            .linear("LT", "Long Tons", "1016.0469088")
            .linear("ct", "Carats", "0.0002")
            .build(),

        // Base: second; months and years are Gregorian averages
        Category::Time => b
            .linear("s", "Seconds", "1")
            .linear("ms", "Milliseconds", "0.001")
            .linear("µs", "Microseconds", "0.000001")
            .linear("ns", "Nanoseconds", "1e-9")
            .linear("min", "Minutes", "60")
            .linear("h", "Hours", "3600")
            .linear("d", "Days", "86400")
            .linear("wk", "Weeks", "604800")
            .linear("mo", "Months", "2629746")
            .linear("yr", "Years", "31556952")
            .linear("dec", "Decades", "315569520")
            .linear("cent", "Centuries", "3155695200")
            .build(),

        // Base: meter per second
        Category::Speed => b
            .linear("m/s", "Meters per Second", "1")
            .linear("km/h", "Kilometers per Hour", "5/18")
            .linear("mph", "Miles per Hour", "0.44704")
            .linear("ft/s", "Feet per Second", "0.3048")
            .linear("kn", "Knots", "463/900")
            .linear("Ma", "Mach", "340.3")
            .linear("c", "Speed of Light", "299792458")
            .build(),

        // Base: kelvin
        Category::Temperature => b
            .affine("K", "Kelvin", TemperatureScale::Kelvin)
            .affine("°C", "Celsius", TemperatureScale::Celsius)
            .affine("°F", "Fahrenheit", TemperatureScale::Fahrenheit)
            .affine("°R", "Rankine", TemperatureScale::Rankine)
            .affine("°Ré", "Réaumur", TemperatureScale::Reaumur)
            .build(),

        // Base: byte
        Category::DataStorage => b
            .linear("B", "Bytes", "1")
            .linear("b", "Bits", "0.125")
            .linear("kb", "Kilobits", "125")
            .linear("Mb", "Megabits", "125000")
            .linear("Gb", "Gigabits", "125000000")
            .linear("KB", "Kilobytes", "1000")
            .linear("MB", "Megabytes", "1e6")
            .linear("GB", "Gigabytes", "1e9")
            .linear("TB", "Terabytes", "1e12")
            .linear("PB", "Petabytes", "1e15")
            .linear("KiB", "Kibibytes", "1024")
            .linear("MiB", "Mebibytes", "1048576")
            .linear("GiB", "Gibibytes", "1073741824")
            .linear("TiB", "Tebibytes", "1099511627776")
            .build(),

        // Base: degree
        Category::Angle => b
            .linear("°", "Degrees", "1")
            .linear("rad", "Radians", "57.295779513082320876798154814105")
            .linear("mrad", "Milliradians", "0.057295779513082320876798154814105")
            .linear("grad", "Gradians", "0.9")
            .linear("′", "Arcminutes", "1/60")
            .linear("″", "Arcseconds", "1/3600")
            .linear("tr", "Turns", "360")
            .build(),

        // Base: meter per second squared
        Category::Acceleration => b
            .linear("m/s²", "Meters per Second Squared", "1")
            .linear("g₀", "Standard Gravity", "9.80665")
            .linear("Gal", "Gals", "0.01")
            .linear("ft/s²", "Feet per Second Squared", "0.3048")
            .linear("in/s²", "Inches per Second Squared", "0.0254")
            .linear("km/h/s", "Kilometers per Hour per Second", "5/18")
            .build(),

        // Base: kilogram per cubic meter
        Category::Density => b
            .linear("kg/m³", "Kilograms per Cubic Meter", "1")
            .linear("g/cm³", "Grams per Cubic Centimeter", "1000")
            .linear("g/mL", "Grams per Milliliter", "1000")
            .linear("kg/L", "Kilograms per Liter", "1000")
            .linear("g/L", "Grams per Liter", "1")
            .linear("lb/ft³", "Pounds per Cubic Foot", "0.45359237/0.028316846592")
            .linear("lb/in³", "Pounds per Cubic Inch", "0.45359237/0.000016387064")
            .linear("lb/gal", "Pounds per US Gallon", "0.45359237/0.003785411784")
            .linear("oz/in³", "Ounces per Cubic Inch", "0.028349523125/0.000016387064")
            .build(),

        // Base: newton
        Category::Force => b
            .linear("N", "Newtons", "1")
            .linear("kN", "Kilonewtons", "1000")
            .linear("dyn", "Dynes", "0.00001")
            .linear("lbf", "Pound-force", "4.4482216152605")
            .linear("kgf", "Kilogram-force", "9.80665")
            .linear("pdl", "Poundals", "0.138254954376")
            .linear("kip", "Kips", "4448.2216152605")
            .build(),

        // Base: pascal
        Category::Pressure => b
            .linear("Pa", "Pascals", "1")
            .linear("kPa", "Kilopascals", "1000")
            .linear("MPa", "Megapascals", "1000000")
            .linear("bar", "Bars", "100000")
            .linear("mbar", "Millibars", "100")
            .linear("atm", "Atmospheres", "101325")
            .linear("psi", "Pounds per Square Inch", "4.4482216152605/0.00064516")
            .linear("ksi", "Kilopounds per Square Inch", "4448.2216152605/0.00064516")
            .linear("Torr", "Torr", "101325/760")
            .linear("mmHg", "Millimeters of Mercury", "133.322387415")
            .linear("inHg", "Inches of Mercury", "3386.389")
            .build(),

        // Base: joule
        Category::Energy => b
            .linear("J", "Joules", "1")
            .linear("kJ", "Kilojoules", "1000")
            .linear("cal", "Calories", "4.184")
            .linear("kcal", "Kilocalories", "4184")
            .linear("Wh", "Watt-hours", "3600")
            .linear("kWh", "Kilowatt-hours", "3600000")
            .linear("eV", "Electronvolts", "1.602176634e-19")
            .linear("BTU", "British Thermal Units", "1055.05585262")
            .linear("ft·lbf", "Foot-pounds", "1.3558179483314004")
            .linear("erg", "Ergs", "1e-7")
            .linear("thm", "Therms", "105505585.262")
            .build(),

        // Base: watt
        Category::Power => b
            .linear("W", "Watts", "1")
            .linear("kW", "Kilowatts", "1000")
            .linear("MW", "Megawatts", "1000000")
            .linear("hp", "Horsepower", "745.69987158227022")
            .linear("PS", "Metric Horsepower", "735.49875")
            .linear("BTU/h", "BTU per Hour", "1055.05585262/3600")
            .linear("ft·lbf/s", "Foot-pounds per Second", "1.3558179483314004")
            .linear("cal/s", "Calories per Second", "4.184")
            .linear("TR", "Tons of Refrigeration", "12660670.23144/3600")
            .build(),

        // Base: newton meter
        Category::Torque => b
            .linear("N·m", "Newton Meters", "1")
            .linear("kN·m", "Kilonewton Meters", "1000")
            .linear("lbf·ft", "Pound-force Feet", "1.3558179483314004")
            .linear("lbf·in", "Pound-force Inches", "0.1129848290276167")
            .linear("ozf·in", "Ounce-force Inches", "0.00706155181422604375")
            .linear("kgf·m", "Kilogram-force Meters", "9.80665")
            .linear("dyn·cm", "Dyne Centimeters", "1e-7")
            .build(),

        // Base: watt per meter kelvin
        Category::ThermalConductivity => b
            .linear("W/(m·K)", "Watts per Meter Kelvin", "1")
            .linear("W/(cm·K)", "Watts per Centimeter Kelvin", "100")
            .linear("kcal/(h·m·°C)", "Kilocalories per Hour Meter Degree Celsius", "4184/3600")
            .linear("BTU/(h·ft·°F)", "BTU per Hour Foot Degree Fahrenheit", "9495.50267358/5486.4")
            .linear("cal/(s·cm·°C)", "Calories per Second Centimeter Degree Celsius", "418.4")
            .build(),

        // Base: watt per square meter
        Category::HeatFluxDensity => b
            .linear("W/m²", "Watts per Square Meter", "1")
            .linear("kW/m²", "Kilowatts per Square Meter", "1000")
            .linear("W/cm²", "Watts per Square Centimeter", "10000")
            .linear("BTU/(h·ft²)", "BTU per Hour Square Foot", "1055.05585262/334.450944")
            .linear("kcal/(h·m²)", "Kilocalories per Hour Square Meter", "4184/3600")
            .linear("cal/(s·cm²)", "Calories per Second Square Centimeter", "41840")
            .build(),

        // Base: joule per kilogram kelvin
        Category::SpecificHeatCapacity => b
            .linear("J/(kg·K)", "Joules per Kilogram Kelvin", "1")
            .linear("kJ/(kg·K)", "Kilojoules per Kilogram Kelvin", "1000")
            .linear("cal/(g·°C)", "Calories per Gram Degree Celsius", "4184")
            .linear("kcal/(kg·°C)", "Kilocalories per Kilogram Degree Celsius", "4184")
            .linear("BTU/(lb·°F)", "BTU per Pound Degree Fahrenheit", "4186.8")
            .build(),

        // Base: watt per square meter kelvin
        Category::HeatTransferCoefficient => b
            .linear("W/(m²·K)", "Watts per Square Meter Kelvin", "1")
            .linear("kW/(m²·K)", "Kilowatts per Square Meter Kelvin", "1000")
            .linear("W/(cm²·K)", "Watts per Square Centimeter Kelvin", "10000")
            .linear("BTU/(h·ft²·°F)", "BTU per Hour Square Foot Degree Fahrenheit", "9495.50267358/1672.25472")
            .linear("kcal/(h·m²·°C)", "Kilocalories per Hour Square Meter Degree Celsius", "4184/3600")
            .linear("cal/(s·cm²·°C)", "Calories per Second Square Centimeter Degree Celsius", "41840")
            .build(),

        // Base: cubic meter per second
        Category::FlowRate => b
            .linear("m³/s", "Cubic Meters per Second", "1")
            .linear("m³/h", "Cubic Meters per Hour", "1/3600")
            .linear("L/s", "Liters per Second", "0.001")
            .linear("L/min", "Liters per Minute", "0.001/60")
            .linear("L/h", "Liters per Hour", "0.001/3600")
            .linear("mL/min", "Milliliters per Minute", "0.000001/60")
            .linear("gpm", "US Gallons per Minute", "0.003785411784/60")
            .linear("gph", "US Gallons per Hour", "0.003785411784/3600")
            .linear("ft³/s", "Cubic Feet per Second", "0.028316846592")
            .linear("cfm", "Cubic Feet per Minute", "0.028316846592/60")
            .build(),

        // Base: kilogram per second
        Category::MassFlowRate => b
            .linear("kg/s", "Kilograms per Second", "1")
            .linear("kg/min", "Kilograms per Minute", "1/60")
            .linear("kg/h", "Kilograms per Hour", "1/3600")
            .linear("g/s", "Grams per Second", "0.001")
            .linear("t/h", "Metric Tons per Hour", "1000/3600")
            .linear("lb/s", "Pounds per Second", "0.45359237")
            .linear("lb/min", "Pounds per Minute", "0.45359237/60")
            .linear("lb/h", "Pounds per Hour", "0.45359237/3600")
            .build(),

        // Base: pascal second
        Category::Viscosity => b
            .linear("Pa·s", "Pascal Seconds", "1")
            .linear("mPa·s", "Millipascal Seconds", "0.001")
            .linear("P", "Poise", "0.1")
            .linear("cP", "Centipoise", "0.001")
            .linear("lb/(ft·s)", "Pounds per Foot Second", "0.45359237/0.3048")
            .linear("lbf·s/ft²", "Pound-force Seconds per Square Foot", "4.4482216152605/0.09290304")
            .linear("reyn", "Reyns", "4.4482216152605/0.00064516")
            .build(),

        // Base: square meter per second
        Category::KinematicViscosity => b
            .linear("m²/s", "Square Meters per Second", "1")
            .linear("cm²/s", "Square Centimeters per Second", "0.0001")
            .linear("mm²/s", "Square Millimeters per Second", "0.000001")
            .linear("St", "Stokes", "0.0001")
            .linear("cSt", "Centistokes", "0.000001")
            .linear("ft²/s", "Square Feet per Second", "0.09290304")
            .linear("in²/s", "Square Inches per Second", "0.00064516")
            .build(),

        // Base: newton per meter
        Category::SurfaceTension => b
            .linear("N/m", "Newtons per Meter", "1")
            .linear("mN/m", "Millinewtons per Meter", "0.001")
            .linear("dyn/cm", "Dynes per Centimeter", "0.001")
            .linear("gf/cm", "Gram-force per Centimeter", "0.980665")
            .linear("lbf/in", "Pound-force per Inch", "4.4482216152605/0.0254")
            .linear("lbf/ft", "Pound-force per Foot", "4.4482216152605/0.3048")
            .build(),

        // Base: lux
        Category::Illuminance => b
            .linear("lx", "Lux", "1")
            .linear("lm/m²", "Lumens per Square Meter", "1")
            .linear("fc", "Foot-candles", "1/0.09290304")
            .linear("ph", "Phots", "10000")
            .linear("nx", "Nox", "0.001")
            .build(),

        // Base: candela per square meter
        Category::Luminance => b
            .linear("cd/m²", "Candelas per Square Meter", "1")
            .linear("nt", "Nits", "1")
            .linear("sb", "Stilbs", "10000")
            .linear("asb", "Apostilbs", "0.31830988618379067153776752674503")
            .linear("La", "Lamberts", "10000/3.1415926535897932384626433832795")
            .linear("fL", "Foot-lamberts", "0.31830988618379067153776752674503/0.09290304")
            .linear("cd/ft²", "Candelas per Square Foot", "1/0.09290304")
            .linear("cd/in²", "Candelas per Square Inch", "1/0.00064516")
            .build(),

        // Base: candela
        Category::LuminousIntensity => b
            .linear("cd", "Candelas", "1")
            .linear("kcd", "Kilocandelas", "1000")
            .linear("mcd", "Millicandelas", "0.001")
            .linear("cp", "Candlepower", "0.981")
            .linear("HK", "Hefner Candles", "0.903")
            .build(),

        // Base: coulomb
        Category::ElectricCharge => b
            .linear("C", "Coulombs", "1")
            .linear("mC", "Millicoulombs", "0.001")
            .linear("µC", "Microcoulombs", "0.000001")
            .linear("nC", "Nanocoulombs", "1e-9")
            .linear("Ah", "Ampere-hours", "3600")
            .linear("mAh", "Milliampere-hours", "3.6")
            .linear("F", "Faradays", "96485.33212331001")
            .linear("e", "Elementary Charges", "1.602176634e-19")
            .linear("abC", "Abcoulombs", "10")
            .linear("statC", "Statcoulombs", "3.3356409519815204e-10")
            .build(),

        // Base: ampere
        Category::ElectricCurrent => b
            .linear("A", "Amperes", "1")
            .linear("kA", "Kiloamperes", "1000")
            .linear("mA", "Milliamperes", "0.001")
            .linear("µA", "Microamperes", "0.000001")
            .linear("abA", "Abamperes", "10")
            .linear("statA", "Statamperes", "3.3356409519815204e-10")
            .build(),

        // Base: volt
        Category::ElectricPotential => b
            .linear("V", "Volts", "1")
            .linear("kV", "Kilovolts", "1000")
            .linear("MV", "Megavolts", "1000000")
            .linear("mV", "Millivolts", "0.001")
            .linear("µV", "Microvolts", "0.000001")
            .linear("abV", "Abvolts", "1e-8")
            .linear("statV", "Statvolts", "299.792458")
            .build(),

        // Base: ohm
        Category::ElectricResistance => b
            .linear("Ω", "Ohms", "1")
            .linear("mΩ", "Milliohms", "0.001")
            .linear("kΩ", "Kiloohms", "1000")
            .linear("MΩ", "Megaohms", "1000000")
            .linear("GΩ", "Gigaohms", "1e9")
            .linear("abΩ", "Abohms", "1e-9")
            .linear("statΩ", "Statohms", "898755178736.8")
            .build(),

        // Base: farad
        Category::Capacitance => b
            .linear("F", "Farads", "1")
            .linear("mF", "Millifarads", "0.001")
            .linear("µF", "Microfarads", "0.000001")
            .linear("nF", "Nanofarads", "1e-9")
            .linear("pF", "Picofarads", "1e-12")
            .linear("abF", "Abfarads", "1e9")
            .linear("statF", "Statfarads", "1.1126500560536184e-12")
            .build(),

        // Base: henry
        Category::Inductance => b
            .linear("H", "Henries", "1")
            .linear("mH", "Millihenries", "0.001")
            .linear("µH", "Microhenries", "0.000001")
            .linear("nH", "Nanohenries", "1e-9")
            .linear("abH", "Abhenries", "1e-9")
            .linear("statH", "Stathenries", "898755178736.8")
            .build(),

        // Base: siemens
        Category::ElectricConductance => b
            .linear("S", "Siemens", "1")
            .linear("kS", "Kilosiemens", "1000")
            .linear("mS", "Millisiemens", "0.001")
            .linear("µS", "Microsiemens", "0.000001")
            .linear("℧", "Mhos", "1")
            .linear("abS", "Absiemens", "1e9")
            .linear("statS", "Statsiemens", "1.1126500560536184e-12")
            .build(),

        // Base: weber
        Category::MagneticFlux => b
            .linear("Wb", "Webers", "1")
            .linear("mWb", "Milliwebers", "0.001")
            .linear("µWb", "Microwebers", "0.000001")
            .linear("V·s", "Volt Seconds", "1")
            .linear("T·m²", "Tesla Square Meters", "1")
            .linear("Mx", "Maxwells", "1e-8")
            .build(),

        // Base: tesla
        Category::MagneticFluxDensity => b
            .linear("T", "Teslas", "1")
            .linear("mT", "Milliteslas", "0.001")
            .linear("µT", "Microteslas", "0.000001")
            .linear("nT", "Nanoteslas", "1e-9")
            .linear("Wb/m²", "Webers per Square Meter", "1")
            .linear("G", "Gauss", "0.0001")
            .linear("mG", "Milligauss", "1e-7")
            .linear("γ", "Gammas", "1e-9")
            .build(),

        // Base: ampere-turn
        Category::MagnetomotiveForce => b
            .linear("At", "Ampere-turns", "1")
            .linear("kAt", "Kiloampere-turns", "1000")
            .linear("mAt", "Milliampere-turns", "0.001")
            .linear("Gb", "Gilberts", "0.795774715459476678844418816862571")
            .build(),

        // Base: ampere per meter
        Category::MagneticFieldStrength => b
            .linear("A/m", "Amperes per Meter", "1")
            .linear("kA/m", "Kiloamperes per Meter", "1000")
            .linear("A/cm", "Amperes per Centimeter", "100")
            .linear("At/m", "Ampere-turns per Meter", "1")
            .linear("Oe", "Oersteds", "79.5774715459476678844418816862571")
            .build(),

        // Base: gray
        Category::Radiation => b
            .linear("Gy", "Grays", "1")
            .linear("mGy", "Milligrays", "0.001")
            .linear("µGy", "Micrograys", "0.000001")
            .linear("J/kg", "Joules per Kilogram", "1")
            .linear("rad", "Rads", "0.01")
            .linear("mrad", "Millirads", "0.00001")
            .build(),

        // Base: becquerel
        Category::Radioactivity => b
            .linear("Bq", "Becquerels", "1")
            .linear("kBq", "Kilobecquerels", "1000")
            .linear("MBq", "Megabecquerels", "1000000")
            .linear("GBq", "Gigabecquerels", "1e9")
            .linear("Ci", "Curies", "3.7e10")
            .linear("mCi", "Millicuries", "3.7e7")
            .linear("µCi", "Microcuries", "37000")
            .linear("Rd", "Rutherfords", "1000000")
            .build(),

        // Base: coulomb per kilogram
        Category::RadiationExposure => b
            .linear("C/kg", "Coulombs per Kilogram", "1")
            .linear("mC/kg", "Millicoulombs per Kilogram", "0.001")
            .linear("R", "Roentgens", "0.000258")
            .linear("mR", "Milliroentgens", "2.58e-7")
            .linear("µR", "Microroentgens", "2.58e-10")
            .build(),

        // Base: sievert
        Category::EquivalentDose => b
            .linear("Sv", "Sieverts", "1")
            .linear("mSv", "Millisieverts", "0.001")
            .linear("µSv", "Microsieverts", "0.000001")
            .linear("rem", "Rems", "0.01")
            .linear("mrem", "Millirems", "0.00001")
            .build(),

        // Placeholder rates; live conversions go through exchange-rate snapshots
        Category::Currency => COMMON_CURRENCIES
            .iter()
            .fold(b, |b, (code, name)| b.linear(code, name, "1"))
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitary_core::Number;
    use crate::Conversion;

    #[test]
    fn test_every_category_builds() {
        for category in Category::ALL {
            let table = table_for(category).unwrap_or_else(|e| panic!("{}", e));
            assert!(!table.is_empty());
        }
    }

    #[test]
    fn test_every_category_has_base_unit_first() {
        for category in Category::ALL {
            let table = table_for(category).unwrap();
            assert!(table.units()[0].is_base(), "{} base unit", category);
        }
    }

    #[test]
    fn test_exact_definitions() {
        let length = table_for(Category::Length).unwrap();
        assert_eq!(length.get("Miles").unwrap().conversion, Conversion::Linear(Number::from_str("1609.344").unwrap()));

        let pressure = table_for(Category::Pressure).unwrap();
        let Conversion::Linear(psi) = &pressure.get("psi").unwrap().conversion else {
            panic!("psi should be linear");
        };
        let tol = Number::from_str("1e-40").unwrap();
        assert!(psi.approx_eq(&Number::from_str("6894.7572931683613367226734453468906937813875627751").unwrap(), &tol));
    }

    #[test]
    fn test_temperature_is_affine() {
        let table = table_for(Category::Temperature).unwrap();
        assert!(table.units().iter().all(|u| !u.conversion.is_linear()));
        assert_eq!(table.get("Celsius").unwrap().symbol, "°C");
    }

    #[test]
    fn test_currency_placeholder_rates() {
        let table = table_for(Category::Currency).unwrap();
        assert_eq!(table.len(), COMMON_CURRENCIES.len());
        for unit in table.units() {
            assert!(unit.is_base());
        }
        assert_eq!(table.get("Euro").unwrap().symbol, "EUR");
    }
}

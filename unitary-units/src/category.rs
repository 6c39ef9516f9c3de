//! Category taxonomy
//!
//! One variant per physical quantity. Ids are stable keys used by callers
//! and favorites; labels, icons and descriptions are display metadata.

use std::fmt;
use serde::{Serialize, Serializer};

/// Top-level menu groups. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CategoryGroup {
    Common,
    Engineering,
    Heat,
    Fluids,
    Light,
    Electricity,
    Magnetism,
    Radiology,
    Currency,
}

impl CategoryGroup {
    /// Menu order
    pub const ALL: [CategoryGroup; 9] = [
        CategoryGroup::Common,
        CategoryGroup::Engineering,
        CategoryGroup::Heat,
        CategoryGroup::Fluids,
        CategoryGroup::Light,
        CategoryGroup::Electricity,
        CategoryGroup::Magnetism,
        CategoryGroup::Radiology,
        CategoryGroup::Currency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CategoryGroup::Common => "Common",
            CategoryGroup::Engineering => "Engineering",
            CategoryGroup::Heat => "Heat",
            CategoryGroup::Fluids => "Fluids",
            CategoryGroup::Light => "Light",
            CategoryGroup::Electricity => "Electricity",
            CategoryGroup::Magnetism => "Magnetism",
            CategoryGroup::Radiology => "Radiology",
            CategoryGroup::Currency => "Currency",
        }
    }

    /// Categories of this group in display order
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(move |c| c.group() == *self)
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A physical quantity grouping mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    // Common
    Length,
    Area,
    Volume,
    Mass,
    Time,
    Speed,
    Temperature,
    DataStorage,
    Angle,
    // Engineering
    Acceleration,
    Density,
    Force,
    Pressure,
    Energy,
    Power,
    Torque,
    // Heat
    ThermalConductivity,
    HeatFluxDensity,
    SpecificHeatCapacity,
    HeatTransferCoefficient,
    // Fluids
    FlowRate,
    MassFlowRate,
    Viscosity,
    KinematicViscosity,
    SurfaceTension,
    // Light
    Illuminance,
    Luminance,
    LuminousIntensity,
    // Electricity
    ElectricCharge,
    ElectricCurrent,
    ElectricPotential,
    ElectricResistance,
    Capacitance,
    Inductance,
    ElectricConductance,
    // Magnetism
    MagneticFlux,
    MagneticFluxDensity,
    MagnetomotiveForce,
    MagneticFieldStrength,
    // Radiology
    Radiation,
    Radioactivity,
    RadiationExposure,
    EquivalentDose,
    // Currency
    Currency,
}

impl Category {
    /// Display order
    pub const ALL: [Category; 44] = [
        Category::Length,
        Category::Area,
        Category::Volume,
        Category::Mass,
        Category::Time,
        Category::Speed,
        Category::Temperature,
        Category::DataStorage,
        Category::Angle,
        Category::Acceleration,
        Category::Density,
        Category::Force,
        Category::Pressure,
        Category::Energy,
        Category::Power,
        Category::Torque,
        Category::ThermalConductivity,
        Category::HeatFluxDensity,
        Category::SpecificHeatCapacity,
        Category::HeatTransferCoefficient,
        Category::FlowRate,
        Category::MassFlowRate,
        Category::Viscosity,
        Category::KinematicViscosity,
        Category::SurfaceTension,
        Category::Illuminance,
        Category::Luminance,
        Category::LuminousIntensity,
        Category::ElectricCharge,
        Category::ElectricCurrent,
        Category::ElectricPotential,
        Category::ElectricResistance,
        Category::Capacitance,
        Category::Inductance,
        Category::ElectricConductance,
        Category::MagneticFlux,
        Category::MagneticFluxDensity,
        Category::MagnetomotiveForce,
        Category::MagneticFieldStrength,
        Category::Radiation,
        Category::Radioactivity,
        Category::RadiationExposure,
        Category::EquivalentDose,
        Category::Currency,
    ];

    /// Stable key (e.g. "Pressure", "DataStorage")
    pub fn id(&self) -> &'static str {
        match self {
            Category::Length => "Length",
            Category::Area => "Area",
            Category::Volume => "Volume",
            Category::Mass => "Mass",
            Category::Time => "Time",
            Category::Speed => "Speed",
            Category::Temperature => "Temperature",
            Category::DataStorage => "DataStorage",
            Category::Angle => "Angle",
            Category::Acceleration => "Acceleration",
            Category::Density => "Density",
            Category::Force => "Force",
            Category::Pressure => "Pressure",
            Category::Energy => "Energy",
            Category::Power => "Power",
            Category::Torque => "Torque",
            Category::ThermalConductivity => "ThermalConductivity",
            Category::HeatFluxDensity => "HeatFluxDensity",
            Category::SpecificHeatCapacity => "SpecificHeatCapacity",
            Category::HeatTransferCoefficient => "HeatTransferCoefficient",
            Category::FlowRate => "FlowRate",
            Category::MassFlowRate => "MassFlowRate",
            Category::Viscosity => "Viscosity",
            Category::KinematicViscosity => "KinematicViscosity",
            Category::SurfaceTension => "SurfaceTension",
            Category::Illuminance => "Illuminance",
            Category::Luminance => "Luminance",
            Category::LuminousIntensity => "LuminousIntensity",
            Category::ElectricCharge => "ElectricCharge",
            Category::ElectricCurrent => "ElectricCurrent",
            Category::ElectricPotential => "ElectricPotential",
            Category::ElectricResistance => "ElectricResistance",
            Category::Capacitance => "Capacitance",
            Category::Inductance => "Inductance",
            Category::ElectricConductance => "ElectricConductance",
            Category::MagneticFlux => "MagneticFlux",
            Category::MagneticFluxDensity => "MagneticFluxDensity",
            Category::MagnetomotiveForce => "MagnetomotiveForce",
            Category::MagneticFieldStrength => "MagneticFieldStrength",
            Category::Radiation => "Radiation",
            Category::Radioactivity => "Radioactivity",
            Category::RadiationExposure => "RadiationExposure",
            Category::EquivalentDose => "EquivalentDose",
            Category::Currency => "Currency",
        }
    }

    /// Parse a stable key
    pub fn from_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::DataStorage => "Data Storage",
            Category::ThermalConductivity => "Thermal Conductivity",
            Category::HeatFluxDensity => "Heat Flux Density",
            Category::SpecificHeatCapacity => "Specific Heat Capacity",
            Category::HeatTransferCoefficient => "Heat Transfer Coefficient",
            Category::FlowRate => "Flow Rate",
            Category::MassFlowRate => "Mass Flow Rate",
            Category::KinematicViscosity => "Kinematic Viscosity",
            Category::SurfaceTension => "Surface Tension",
            Category::LuminousIntensity => "Luminous Intensity",
            Category::ElectricCharge => "Electric Charge",
            Category::ElectricCurrent => "Electric Current",
            Category::ElectricPotential => "Electric Potential",
            Category::ElectricResistance => "Electric Resistance",
            Category::ElectricConductance => "Electric Conductance",
            Category::MagneticFlux => "Magnetic Flux",
            Category::MagneticFluxDensity => "Magnetic Flux Density",
            Category::MagnetomotiveForce => "Magnetomotive Force",
            Category::MagneticFieldStrength => "Magnetic Field Strength",
            Category::RadiationExposure => "Radiation Exposure",
            Category::EquivalentDose => "Equivalent Dose",
            other => other.id(),
        }
    }

    /// Icon reference for view layers
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Length => "ruler",
            Category::Area => "square.dashed",
            Category::Volume => "cube",
            Category::Mass => "scalemass",
            Category::Time => "clock",
            Category::Speed => "speedometer",
            Category::Temperature => "thermometer",
            Category::DataStorage => "externaldrive",
            Category::Angle => "angle",
            Category::Acceleration => "gauge.high",
            Category::Density => "circle.grid.3x3.fill",
            Category::Force => "arrow.right.to.line",
            Category::Pressure => "barometer",
            Category::Energy => "bolt",
            Category::Power => "powerplug",
            Category::Torque => "arrow.clockwise",
            Category::ThermalConductivity => "flame",
            Category::HeatFluxDensity => "sun.max",
            Category::SpecificHeatCapacity => "thermometer.sun",
            Category::HeatTransferCoefficient => "arrow.left.arrow.right",
            Category::FlowRate => "drop",
            Category::MassFlowRate => "drop.triangle",
            Category::Viscosity => "aqi.medium",
            Category::KinematicViscosity => "water.waves",
            Category::SurfaceTension => "drop.circle",
            Category::Illuminance => "lightbulb",
            Category::Luminance => "sun.min",
            Category::LuminousIntensity => "light.max",
            Category::ElectricCharge => "battery.100",
            Category::ElectricCurrent => "bolt.horizontal",
            Category::ElectricPotential => "bolt.circle",
            Category::ElectricResistance => "poweroutlet.type.b",
            Category::Capacitance => "battery.50",
            Category::Inductance => "tornado",
            Category::ElectricConductance => "cable.connector",
            Category::MagneticFlux => "circle.circle",
            Category::MagneticFluxDensity => "circle.hexagongrid",
            Category::MagnetomotiveForce => "arrow.triangle.2.circlepath",
            Category::MagneticFieldStrength => "dot.radiowaves.left.and.right",
            Category::Radiation => "rays",
            Category::Radioactivity => "atom",
            Category::RadiationExposure => "exclamationmark.triangle",
            Category::EquivalentDose => "person.badge.shield.checkmark",
            Category::Currency => "dollarsign.circle",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Length => "Distance between two points",
            Category::Area => "Extent of a two-dimensional surface",
            Category::Volume => "Three-dimensional space occupied",
            Category::Mass => "Amount of matter",
            Category::Time => "Duration",
            Category::Speed => "Distance travelled per unit time",
            Category::Temperature => "Thermodynamic temperature",
            Category::DataStorage => "Amount of digital information",
            Category::Angle => "Rotation between two rays",
            Category::Acceleration => "Rate of change of velocity",
            Category::Density => "Mass per unit volume",
            Category::Force => "Interaction that changes motion",
            Category::Pressure => "Force per unit area",
            Category::Energy => "Capacity to do work",
            Category::Power => "Energy transferred per unit time",
            Category::Torque => "Rotational force",
            Category::ThermalConductivity => "Heat conducted through a material",
            Category::HeatFluxDensity => "Heat flow per unit area",
            Category::SpecificHeatCapacity => "Heat needed to warm a unit mass by one degree",
            Category::HeatTransferCoefficient => "Heat flux per degree of temperature difference",
            Category::FlowRate => "Volume of fluid passing per unit time",
            Category::MassFlowRate => "Mass of fluid passing per unit time",
            Category::Viscosity => "Dynamic resistance of a fluid to flow",
            Category::KinematicViscosity => "Dynamic viscosity divided by density",
            Category::SurfaceTension => "Force per unit length along a liquid surface",
            Category::Illuminance => "Luminous flux incident per unit area",
            Category::Luminance => "Luminous intensity per unit area",
            Category::LuminousIntensity => "Luminous power emitted in a direction",
            Category::ElectricCharge => "Quantity of electricity",
            Category::ElectricCurrent => "Flow of electric charge",
            Category::ElectricPotential => "Electric potential difference",
            Category::ElectricResistance => "Opposition to electric current",
            Category::Capacitance => "Ability to store electric charge",
            Category::Inductance => "Opposition to changes in current",
            Category::ElectricConductance => "Ease of electric current flow",
            Category::MagneticFlux => "Total magnetic field through a surface",
            Category::MagneticFluxDensity => "Magnetic flux per unit area",
            Category::MagnetomotiveForce => "Cause of magnetic flux in a circuit",
            Category::MagneticFieldStrength => "Magnetizing field intensity",
            Category::Radiation => "Absorbed dose of ionizing radiation",
            Category::Radioactivity => "Rate of radioactive decay",
            Category::RadiationExposure => "Ionization produced in air",
            Category::EquivalentDose => "Biological effect of absorbed radiation",
            Category::Currency => "Money, converted at exchange rates",
        }
    }

    pub fn group(&self) -> CategoryGroup {
        use Category::*;
        match self {
            Length | Area | Volume | Mass | Time | Speed | Temperature | DataStorage | Angle => {
                CategoryGroup::Common
            }
            Acceleration | Density | Force | Pressure | Energy | Power | Torque => CategoryGroup::Engineering,
            ThermalConductivity | HeatFluxDensity | SpecificHeatCapacity | HeatTransferCoefficient => {
                CategoryGroup::Heat
            }
            FlowRate | MassFlowRate | Viscosity | KinematicViscosity | SurfaceTension => CategoryGroup::Fluids,
            Illuminance | Luminance | LuminousIntensity => CategoryGroup::Light,
            ElectricCharge | ElectricCurrent | ElectricPotential | ElectricResistance | Capacitance
            | Inductance | ElectricConductance => CategoryGroup::Electricity,
            MagneticFlux | MagneticFluxDensity | MagnetomotiveForce | MagneticFieldStrength => {
                CategoryGroup::Magnetism
            }
            Radiation | Radioactivity | RadiationExposure | EquivalentDose => CategoryGroup::Radiology,
            Currency => CategoryGroup::Currency,
        }
    }

    /// Whether conversions use live exchange rates instead of a fixed table
    pub fn is_currency(&self) -> bool {
        matches!(self, Category::Currency)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

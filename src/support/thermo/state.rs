use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{
        DynamicViscosity, MassDensity, Pressure, SpecificHeatCapacity, ThermalConductivity,
        ThermodynamicTemperature,
    },
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::units::{SpecificEnthalpy, SurfaceTension, surface_tension};

use super::{Condition, Fluid, Phase, Property, PropertyError, PropertyProvider};

/// Transport and caloric properties of a fluid at one temperature and pressure.
///
/// A snapshot is never updated in place. Iterative solvers query a new one
/// each time their temperature guess moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidState {
    pub fluid: Fluid,
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub density: MassDensity,
    pub viscosity: DynamicViscosity,
    pub conductivity: ThermalConductivity,
    pub specific_heat: SpecificHeatCapacity,
    pub prandtl: f64,
}

impl FluidState {
    pub(super) fn query<P: PropertyProvider + ?Sized>(
        provider: &P,
        fluid: Fluid,
        condition: Condition,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<Self, PropertyError> {
        let positive = |property: Property| -> Result<f64, PropertyError> {
            let value = provider.query(fluid, property, condition)?;
            if value > 0.0 && value.is_finite() {
                Ok(value)
            } else {
                Err(PropertyError::InvalidState {
                    context: format!("{fluid} {property:?} = {value}"),
                })
            }
        };

        Ok(Self {
            fluid,
            temperature,
            pressure,
            density: MassDensity::new::<kilogram_per_cubic_meter>(positive(Property::Density)?),
            viscosity: DynamicViscosity::new::<pascal_second>(positive(Property::Viscosity)?),
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(positive(
                Property::ThermalConductivity,
            )?),
            specific_heat: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(positive(
                Property::SpecificHeat,
            )?),
            prandtl: positive(Property::Prandtl)?,
        })
    }

    /// Kinematic viscosity `μ/ρ` in m²/s.
    #[must_use]
    pub fn kinematic_viscosity(&self) -> f64 {
        self.viscosity.get::<pascal_second>() / self.density.get::<kilogram_per_cubic_meter>()
    }
}

/// Both phases of a pure fluid on the saturation curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationState {
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub liquid: FluidState,
    pub vapor: FluidState,
    pub liquid_enthalpy: SpecificEnthalpy,
    pub vapor_enthalpy: SpecificEnthalpy,
    pub surface_tension: SurfaceTension,
}

impl SaturationState {
    pub(super) fn query<P: PropertyProvider + ?Sized>(
        provider: &P,
        fluid: Fluid,
        temperature: ThermodynamicTemperature,
    ) -> Result<Self, PropertyError> {
        let liquid_at = Condition::Saturated {
            temperature,
            phase: Phase::Liquid,
        };
        let vapor_at = Condition::Saturated {
            temperature,
            phase: Phase::Vapor,
        };

        let pressure = Pressure::new::<pascal>(provider.query(
            fluid,
            Property::SaturationPressure,
            liquid_at,
        )?);

        Ok(Self {
            temperature,
            pressure,
            liquid: FluidState::query(provider, fluid, liquid_at, temperature, pressure)?,
            vapor: FluidState::query(provider, fluid, vapor_at, temperature, pressure)?,
            liquid_enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(provider.query(
                fluid,
                Property::SaturatedLiquidEnthalpy,
                liquid_at,
            )?),
            vapor_enthalpy: SpecificEnthalpy::new::<joule_per_kilogram>(provider.query(
                fluid,
                Property::SaturatedVaporEnthalpy,
                vapor_at,
            )?),
            surface_tension: surface_tension(provider.query(
                fluid,
                Property::SurfaceTension,
                liquid_at,
            )?),
        })
    }

    /// Latent heat of vaporization `h_g − h_f`.
    #[must_use]
    pub fn latent_heat(&self) -> SpecificEnthalpy {
        self.vapor_enthalpy - self.liquid_enthalpy
    }
}

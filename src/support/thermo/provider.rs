use uom::si::{
    f64::{Pressure, ThermodynamicTemperature},
    thermodynamic_temperature::kelvin,
};

use super::{Fluid, FluidState, PropertyError, SaturationState};

/// A thermophysical property that can be queried from a [`PropertyProvider`].
///
/// Values are always exchanged in SI base units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// kg/m³
    Density,
    /// Dynamic viscosity, Pa·s
    Viscosity,
    /// W/m·K
    ThermalConductivity,
    /// Isobaric specific heat, J/kg·K
    SpecificHeat,
    Prandtl,
    /// J/kg
    SaturatedLiquidEnthalpy,
    /// J/kg
    SaturatedVaporEnthalpy,
    /// N/m
    SurfaceTension,
    /// K
    SaturationTemperature,
    /// Pa
    SaturationPressure,
}

/// Phase selector for saturated conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Liquid,
    Vapor,
}

/// Where a property is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// A single-phase point.
    Single {
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    },
    /// A point on the saturation curve, located by temperature.
    Saturated {
        temperature: ThermodynamicTemperature,
        phase: Phase,
    },
    /// A point on the saturation curve, located by pressure.
    SaturatedAtPressure { pressure: Pressure, phase: Phase },
}

/// Source of fluid properties.
///
/// Implementors only need [`query`](Self::query). The provided methods
/// assemble typed snapshots from individual queries and should rarely be
/// overridden.
///
/// Lookups are read-only. A failed lookup is terminal for the solve that made
/// it; callers do not retry.
pub trait PropertyProvider {
    /// Returns `property` of `fluid` at `condition`, in SI base units.
    ///
    /// # Errors
    ///
    /// Returns a [`PropertyError`] if the fluid, condition, or property is not
    /// supported.
    fn query(
        &self,
        fluid: Fluid,
        property: Property,
        condition: Condition,
    ) -> Result<f64, PropertyError>;

    /// Snapshot of a single-phase state.
    ///
    /// # Errors
    ///
    /// Propagates any failed query, and rejects non-positive transport properties.
    fn state_at(
        &self,
        fluid: Fluid,
        temperature: ThermodynamicTemperature,
        pressure: Pressure,
    ) -> Result<FluidState, PropertyError> {
        let condition = Condition::Single {
            temperature,
            pressure,
        };
        FluidState::query(self, fluid, condition, temperature, pressure)
    }

    /// Snapshot of both saturated phases at a temperature.
    ///
    /// # Errors
    ///
    /// Propagates any failed query.
    fn saturation_at(
        &self,
        fluid: Fluid,
        temperature: ThermodynamicTemperature,
    ) -> Result<SaturationState, PropertyError> {
        SaturationState::query(self, fluid, temperature)
    }

    /// Saturation temperature at a pressure.
    ///
    /// # Errors
    ///
    /// Propagates a failed query.
    fn saturation_temperature(
        &self,
        fluid: Fluid,
        pressure: Pressure,
    ) -> Result<ThermodynamicTemperature, PropertyError> {
        let t = self.query(
            fluid,
            Property::SaturationTemperature,
            Condition::SaturatedAtPressure {
                pressure,
                phase: Phase::Liquid,
            },
        )?;
        Ok(ThermodynamicTemperature::new::<kelvin>(t))
    }
}

impl<P: PropertyProvider + ?Sized> PropertyProvider for &P {
    fn query(
        &self,
        fluid: Fluid,
        property: Property,
        condition: Condition,
    ) -> Result<f64, PropertyError> {
        (**self).query(fluid, property, condition)
    }
}

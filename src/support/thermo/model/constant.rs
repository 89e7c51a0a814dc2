//! Constant liquid properties.
//!
//! `ConstantProperties` treats every fluid as a liquid whose transport and
//! caloric properties do not depend on temperature or pressure. It is the
//! usual hand-calculation shortcut for oils and glycols, and gives tests a
//! provider whose answers are known exactly.
//!
//! Saturation properties are never defined for this model.

use uom::si::{
    dynamic_viscosity::pascal_second,
    f64::{DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity},
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::support::{
    constraint::{ConstraintResult, StrictlyPositive},
    thermo::{Condition, Fluid, Phase, Property, PropertyError, PropertyProvider},
};

/// Fixed liquid properties for one fluid, stored in SI base units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidConstants {
    density: f64,
    viscosity: f64,
    conductivity: f64,
    specific_heat: f64,
}

impl LiquidConstants {
    /// Creates a set of constants.
    ///
    /// # Errors
    ///
    /// Returns a constraint error if any property is not strictly positive.
    pub fn new(
        density: MassDensity,
        viscosity: DynamicViscosity,
        conductivity: ThermalConductivity,
        specific_heat: SpecificHeatCapacity,
    ) -> ConstraintResult<Self> {
        Ok(Self {
            density: StrictlyPositive::new(density.get::<kilogram_per_cubic_meter>())?
                .into_inner(),
            viscosity: StrictlyPositive::new(viscosity.get::<pascal_second>())?.into_inner(),
            conductivity: StrictlyPositive::new(conductivity.get::<watt_per_meter_kelvin>())?
                .into_inner(),
            specific_heat: StrictlyPositive::new(
                specific_heat.get::<joule_per_kilogram_kelvin>(),
            )?
            .into_inner(),
        })
    }

    const fn si(density: f64, viscosity: f64, conductivity: f64, specific_heat: f64) -> Self {
        Self {
            density,
            viscosity,
            conductivity,
            specific_heat,
        }
    }

    fn value(&self, property: Property) -> Option<f64> {
        match property {
            Property::Density => Some(self.density),
            Property::Viscosity => Some(self.viscosity),
            Property::ThermalConductivity => Some(self.conductivity),
            Property::SpecificHeat => Some(self.specific_heat),
            Property::Prandtl => Some(self.specific_heat * self.viscosity / self.conductivity),
            _ => None,
        }
    }
}

/// Constant-property provider keyed by [`Fluid`].
///
/// [`ConstantProperties::standard`] carries liquid values near 300 K for every
/// built-in fluid. Use [`with`](Self::with) to override or add entries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantProperties {
    table: [Option<LiquidConstants>; Fluid::ALL.len()],
}

impl ConstantProperties {
    /// A provider with no fluids.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            table: [None; Fluid::ALL.len()],
        }
    }

    /// Liquid properties near 300 K for every built-in fluid.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            table: [
                Some(LiquidConstants::si(997.0, 8.91e-4, 0.607, 4180.0)),
                Some(LiquidConstants::si(1114.4, 1.57e-2, 0.252, 2415.0)),
                Some(LiquidConstants::si(884.1, 0.486, 0.145, 1909.0)),
                Some(LiquidConstants::si(600.2, 1.42e-4, 0.465, 4818.0)),
                Some(LiquidConstants::si(786.6, 5.44e-4, 0.200, 2530.0)),
                Some(LiquidConstants::si(655.0, 3.0e-4, 0.120, 2270.0)),
                Some(LiquidConstants::si(876.0, 6.04e-4, 0.141, 1740.0)),
            ],
        }
    }

    /// Returns a copy with `fluid` mapped to `constants`.
    #[must_use]
    pub fn with(mut self, fluid: Fluid, constants: LiquidConstants) -> Self {
        self.table[fluid as usize] = Some(constants);
        self
    }

    fn constants(&self, fluid: Fluid) -> Result<&LiquidConstants, PropertyError> {
        self.table[fluid as usize]
            .as_ref()
            .ok_or_else(|| PropertyError::out_of_domain(format!("no constants for {fluid}")))
    }
}

impl Default for ConstantProperties {
    fn default() -> Self {
        Self::standard()
    }
}

impl PropertyProvider for ConstantProperties {
    fn query(
        &self,
        fluid: Fluid,
        property: Property,
        condition: Condition,
    ) -> Result<f64, PropertyError> {
        let constants = self.constants(fluid)?;

        let liquid = matches!(
            condition,
            Condition::Single { .. }
                | Condition::Saturated {
                    phase: Phase::Liquid,
                    ..
                }
        );

        if !liquid {
            return Err(PropertyError::undefined(format!(
                "constant-property {fluid} has no saturation data"
            )));
        }

        constants.value(property).ok_or_else(|| {
            PropertyError::undefined(format!("{property:?} of constant-property {fluid}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Pressure, ThermodynamicTemperature},
        pressure::atmosphere,
        thermodynamic_temperature::degree_celsius,
    };

    fn at(t: f64) -> (ThermodynamicTemperature, Pressure) {
        (
            ThermodynamicTemperature::new::<degree_celsius>(t),
            Pressure::new::<atmosphere>(1.0),
        )
    }

    #[test]
    fn properties_ignore_temperature() -> Result<(), PropertyError> {
        let provider = ConstantProperties::standard();
        let (t_cold, p) = at(20.0);
        let (t_hot, _) = at(80.0);

        let cold = provider.state_at(Fluid::EngineOil, t_cold, p)?;
        let hot = provider.state_at(Fluid::EngineOil, t_hot, p)?;

        assert_eq!(cold.density, hot.density);
        assert_relative_eq!(cold.prandtl, 1909.0 * 0.486 / 0.145);
        Ok(())
    }

    #[test]
    fn overrides_replace_standard_values() -> Result<(), Box<dyn std::error::Error>> {
        let oil = LiquidConstants::new(
            MassDensity::new::<kilogram_per_cubic_meter>(850.0),
            DynamicViscosity::new::<pascal_second>(0.1),
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.13),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(2000.0),
        )?;
        let provider = ConstantProperties::empty().with(Fluid::EngineOil, oil);
        let (t, p) = at(40.0);

        assert_relative_eq!(provider.state_at(Fluid::EngineOil, t, p)?.density.value, 850.0);
        assert!(matches!(
            provider.state_at(Fluid::Water, t, p),
            Err(PropertyError::OutOfDomain { .. })
        ));
        Ok(())
    }

    #[test]
    fn rejects_non_positive_constants() {
        let result = LiquidConstants::new(
            MassDensity::new::<kilogram_per_cubic_meter>(850.0),
            DynamicViscosity::new::<pascal_second>(0.0),
            ThermalConductivity::new::<watt_per_meter_kelvin>(0.13),
            SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(2000.0),
        );
        assert!(result.is_err());
    }

    #[test]
    fn saturation_is_undefined() {
        let (t, _) = at(50.0);
        let result = ConstantProperties::standard().saturation_at(Fluid::Water, t);
        assert!(matches!(result, Err(PropertyError::Undefined { .. })));
    }
}

//! Stream inputs shared by the exchanger models.

use uom::si::{
    f64::{MassRate, Pressure, ThermodynamicTemperature, VolumeRate},
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::ThermalError,
    support::{
        constraint::StrictlyPositive,
        convergence::{Criterion, relative_change},
        fields::{FieldError, Fields},
        thermo::{Fluid, PropertyProvider},
        units::UnitSystem,
    },
};

/// How a stream's flow is specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowRate {
    Mass(MassRate),
    /// Converted to mass once, at inlet density.
    Volumetric(VolumeRate),
}

/// One fluid stream entering an exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidStream {
    pub fluid: Fluid,
    pub inlet_temperature: ThermodynamicTemperature,
    pub flow: FlowRate,
    /// A known outlet seeds the iteration for this stream.
    pub outlet_temperature: Option<ThermodynamicTemperature>,
}

impl FluidStream {
    #[must_use]
    pub fn new(fluid: Fluid, inlet_temperature: ThermodynamicTemperature, flow: FlowRate) -> Self {
        Self {
            fluid,
            inlet_temperature,
            flow,
            outlet_temperature: None,
        }
    }

    #[must_use]
    pub fn with_outlet(mut self, outlet_temperature: ThermodynamicTemperature) -> Self {
        self.outlet_temperature = Some(outlet_temperature);
        self
    }

    /// Reads a stream from the fields named by `names`.
    ///
    /// A mass flow rate takes precedence over a volumetric one.
    pub(crate) fn from_fields(
        fields: &Fields,
        names: &StreamFields,
        units: UnitSystem,
    ) -> Result<Self, FieldError> {
        let fluid = fields.option::<Fluid>(names.fluid)?;
        let inlet = units.temperature(fields.number(names.inlet)?);

        let flow = if let Some(m) = fields.optional_positive(names.mass_rate)? {
            FlowRate::Mass(units.mass_rate(m))
        } else if let Some(v) = fields.optional_positive(names.volume_rate)? {
            FlowRate::Volumetric(units.volume_rate(v))
        } else {
            return Err(FieldError::Missing {
                field: names.mass_rate,
            });
        };

        let mut stream = Self::new(fluid, inlet, flow);
        if let Some(t) = fields.optional_number(names.outlet)? {
            stream = stream.with_outlet(units.temperature(t));
        }
        Ok(stream)
    }

    /// Mass flow rate, validated positive.
    pub(crate) fn mass_rate(
        &self,
        provider: &impl PropertyProvider,
        pressure: Pressure,
    ) -> Result<MassRate, ThermalError> {
        let mass_rate = match self.flow {
            FlowRate::Mass(m) => m,
            FlowRate::Volumetric(v) => {
                let inlet = provider.state_at(self.fluid, self.inlet_temperature, pressure)?;
                v * inlet.density
            }
        };
        Ok(StrictlyPositive::new(mass_rate)?.into_inner())
    }
}

/// Field names for one side of an exchanger.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StreamFields {
    pub fluid: &'static str,
    pub inlet: &'static str,
    pub outlet: &'static str,
    pub mass_rate: &'static str,
    pub volume_rate: &'static str,
}

pub(crate) const HOT_FIELDS: StreamFields = StreamFields {
    fluid: "Hot Fluid",
    inlet: "Hot Inlet Temperature",
    outlet: "Hot Outlet Temperature",
    mass_rate: "Hot Mass Flow Rate",
    volume_rate: "Hot Volume Flow Rate",
};

pub(crate) const COLD_FIELDS: StreamFields = StreamFields {
    fluid: "Cold Fluid",
    inlet: "Cold Inlet Temperature",
    outlet: "Cold Outlet Temperature",
    mass_rate: "Cold Mass Flow Rate",
    volume_rate: "Cold Volume Flow Rate",
};

/// Outlet temperature guesses, the state of every exchanger iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outlets {
    pub hot: ThermodynamicTemperature,
    pub cold: ThermodynamicTemperature,
}

impl Outlets {
    /// Seeds from known outlets, falling back to the mean of the inlets.
    pub(crate) fn seed(hot: &FluidStream, cold: &FluidStream) -> Self {
        let mean = ThermodynamicTemperature::new::<kelvin>(
            0.5 * (hot.inlet_temperature.get::<kelvin>() + cold.inlet_temperature.get::<kelvin>()),
        );
        Self {
            hot: hot.outlet_temperature.unwrap_or(mean),
            cold: cold.outlet_temperature.unwrap_or(mean),
        }
    }
}

/// Largest relative change in either stream's mean temperature, in kelvin.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MeanTemperatureChange {
    pub hot_inlet: ThermodynamicTemperature,
    pub cold_inlet: ThermodynamicTemperature,
}

impl MeanTemperatureChange {
    pub(crate) fn means(&self, outlets: &Outlets) -> [ThermodynamicTemperature; 2] {
        let mean = |a: ThermodynamicTemperature, b: ThermodynamicTemperature| {
            ThermodynamicTemperature::new::<kelvin>(0.5 * (a.get::<kelvin>() + b.get::<kelvin>()))
        };
        [
            mean(self.hot_inlet, outlets.hot),
            mean(self.cold_inlet, outlets.cold),
        ]
    }
}

impl Criterion<Outlets> for MeanTemperatureChange {
    fn change(&self, previous: &Outlets, next: &Outlets) -> f64 {
        let [hot_0, cold_0] = self.means(previous);
        let [hot_1, cold_1] = self.means(next);
        relative_change(hot_0.get::<kelvin>(), hot_1.get::<kelvin>())
            .max(relative_change(cold_0.get::<kelvin>(), cold_1.get::<kelvin>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        mass_rate::kilogram_per_second, pressure::atmosphere,
        thermodynamic_temperature::degree_celsius, volume_rate::cubic_meter_per_second,
    };

    use crate::support::thermo::model::ConstantProperties;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn volumetric_flow_uses_inlet_density() -> Result<(), ThermalError> {
        let stream = FluidStream::new(
            Fluid::Water,
            celsius(25.0),
            FlowRate::Volumetric(VolumeRate::new::<cubic_meter_per_second>(1e-3)),
        );
        let m = stream.mass_rate(
            &ConstantProperties::standard(),
            Pressure::new::<atmosphere>(1.0),
        )?;
        assert_relative_eq!(m.get::<kilogram_per_second>(), 0.997, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn zero_flow_is_rejected() {
        let stream = FluidStream::new(
            Fluid::Water,
            celsius(25.0),
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(0.0)),
        );
        let result = stream.mass_rate(
            &ConstantProperties::standard(),
            Pressure::new::<atmosphere>(1.0),
        );
        assert!(matches!(result, Err(ThermalError::Input(_))));
    }

    #[test]
    fn known_outlet_seeds_its_stream() {
        let hot = FluidStream::new(
            Fluid::Water,
            celsius(90.0),
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(1.0)),
        )
        .with_outlet(celsius(60.0));
        let cold = FluidStream::new(
            Fluid::Water,
            celsius(20.0),
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(1.0)),
        );

        let seed = Outlets::seed(&hot, &cold);
        assert_relative_eq!(seed.hot.get::<degree_celsius>(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(seed.cold.get::<degree_celsius>(), 55.0, epsilon = 1e-9);
    }

    #[test]
    fn mean_change_takes_the_larger_side() {
        let criterion = MeanTemperatureChange {
            hot_inlet: celsius(90.0),
            cold_inlet: celsius(20.0),
        };
        let a = Outlets {
            hot: celsius(60.0),
            cold: celsius(40.0),
        };
        let b = Outlets {
            hot: celsius(60.0),
            cold: celsius(42.0),
        };

        let [_, cold_a] = criterion.means(&a);
        let expected = 1.0 / cold_a.get::<kelvin>();
        assert_relative_eq!(criterion.change(&a, &b), expected, max_relative = 1e-12);
    }
}

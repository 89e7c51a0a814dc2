use uom::si::f64::ThermodynamicTemperature;

use crate::support::{constraint::ConstraintResult, units::TemperatureDifference};

use super::{CapacitanceRate, HeatFlow};

/// A stream as it enters the exchanger.
///
/// The specific heat is taken as constant along the stream, evaluated by the
/// caller at the current mean temperature guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamInlet {
    pub(crate) capacitance_rate: CapacitanceRate,
    pub(crate) temperature: ThermodynamicTemperature,
}

impl StreamInlet {
    /// Captures the inlet capacitance rate and temperature.
    #[must_use]
    pub fn new(capacitance_rate: CapacitanceRate, temperature: ThermodynamicTemperature) -> Self {
        Self {
            capacitance_rate,
            temperature,
        }
    }

    /// Capacitance rate carried through the exchanger.
    #[must_use]
    pub fn capacitance_rate(&self) -> CapacitanceRate {
        self.capacitance_rate
    }

    /// Temperature at the exchanger inlet.
    #[must_use]
    pub fn temperature(&self) -> ThermodynamicTemperature {
        self.temperature
    }

    pub(crate) fn with_heat_flow(self, heat_flow: HeatFlow) -> Stream {
        Stream::new_from_heat_flow(self.capacitance_rate, self.temperature, heat_flow)
    }
}

/// A stream with both ends resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stream {
    /// Capacitance rate used in the energy balance.
    pub capacitance_rate: CapacitanceRate,
    /// Temperature at the exchanger inlet.
    pub inlet_temperature: ThermodynamicTemperature,
    /// Temperature as the stream leaves the exchanger.
    ///
    /// Equal to the inlet for an infinite capacitance rate.
    pub outlet_temperature: ThermodynamicTemperature,
    /// Direction and magnitude of the heat crossing the stream boundary.
    pub heat_flow: HeatFlow,
}

impl Stream {
    /// Resolves the outlet from a known heat flow.
    ///
    /// The energy balance is `q = C·(T_out − T_in)`. Incoming heat warms the
    /// stream, outgoing heat cools it, and no heat leaves the outlet at the
    /// inlet temperature.
    #[must_use]
    pub fn new_from_heat_flow(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        heat_flow: HeatFlow,
    ) -> Self {
        let outlet_temperature = match heat_flow {
            HeatFlow::In(q) => inlet_temperature + q.into_inner() / *capacitance_rate,
            HeatFlow::Out(q) => inlet_temperature - q.into_inner() / *capacitance_rate,
            HeatFlow::None => inlet_temperature,
        };

        Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature,
            heat_flow,
        }
    }

    /// Resolves the heat flow from known inlet and outlet temperatures.
    ///
    /// The direction follows the temperature change:
    /// - an outlet above the inlet gives [`HeatFlow::In`];
    /// - an outlet below the inlet gives [`HeatFlow::Out`];
    /// - equal temperatures give [`HeatFlow::None`].
    ///
    /// # Errors
    ///
    /// Returns a constraint error if either temperature is `NaN`.
    pub fn new_from_outlet_temperature(
        capacitance_rate: CapacitanceRate,
        inlet_temperature: ThermodynamicTemperature,
        outlet_temperature: ThermodynamicTemperature,
    ) -> ConstraintResult<Self> {
        let heat_flow =
            HeatFlow::from_signed(*capacitance_rate * outlet_temperature.minus(inlet_temperature))?;

        Ok(Self {
            capacitance_rate,
            inlet_temperature,
            outlet_temperature,
            heat_flow,
        })
    }
}

impl From<Stream> for StreamInlet {
    fn from(stream: Stream) -> Self {
        Self {
            capacitance_rate: stream.capacitance_rate,
            temperature: stream.inlet_temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::Power, power::watt, thermal_conductance::watt_per_kelvin,
        thermodynamic_temperature::degree_celsius,
    };

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn hot_stream_cools_by_duty_over_capacitance() -> ConstraintResult<()> {
        let hot = StreamInlet::new(CapacitanceRate::new::<watt_per_kelvin>(2000.0)?, celsius(90.0));

        let stream = hot.with_heat_flow(HeatFlow::outgoing(Power::new::<watt>(50_000.0))?);

        assert_relative_eq!(stream.outlet_temperature.get::<degree_celsius>(), 65.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn heat_flow_from_outlet_temperature() -> ConstraintResult<()> {
        let c = CapacitanceRate::new::<watt_per_kelvin>(4000.0)?;

        let warmed = Stream::new_from_outlet_temperature(c, celsius(20.0), celsius(30.0))?;
        let unchanged = Stream::new_from_outlet_temperature(c, celsius(20.0), celsius(20.0))?;

        assert_relative_eq!(warmed.heat_flow.signed().get::<watt>(), 40_000.0, epsilon = 1e-6);
        assert_eq!(unchanged.heat_flow, HeatFlow::None);
        Ok(())
    }

    #[test]
    fn round_trips_through_heat_flow() -> ConstraintResult<()> {
        let c = CapacitanceRate::new::<watt_per_kelvin>(1500.0)?;
        let from_outlet = Stream::new_from_outlet_temperature(c, celsius(80.0), celsius(55.0))?;
        let from_duty = Stream::new_from_heat_flow(c, celsius(80.0), from_outlet.heat_flow);

        assert_relative_eq!(
            from_duty.outlet_temperature.get::<degree_celsius>(),
            55.0,
            epsilon = 1e-9
        );
        Ok(())
    }
}

//! Forward and inverse effectiveness-NTU solves.
//!
//! Both functions take the streams in a fixed `[cold, hot]` order by
//! convention of the exchanger solvers, although either order works: heat
//! always flows from the hotter inlet to the colder one.

use std::cmp::Ordering;

use uom::{
    ConstZero,
    si::f64::{Power, ThermalConductance},
};

use crate::support::{
    constraint::{ConstraintError, ConstraintResult},
    units::TemperatureDifference,
};

use super::{
    Effectiveness, HeatFlow, Ntu, StreamInlet,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation},
    stream::Stream,
};

/// Outlet states for a known conductance `UA`.
///
/// This is the rating problem. The arrangement turns `NTU = UA/C_min` into
/// an effectiveness, and each stream receives that fraction of its maximum
/// heat flow.
///
/// # Errors
///
/// Returns `Err` if `ua` is negative or an inlet temperature is `NaN`.
pub fn known_conductance_and_inlets(
    arrangement: &impl EffectivenessRelation,
    ua: ThermalConductance,
    inlets: [StreamInlet; 2],
) -> ConstraintResult<KnownConductanceResult> {
    let max = max_heat_flows(inlets)?;
    let rates = [inlets[0].capacitance_rate, inlets[1].capacitance_rate];
    let effectiveness = arrangement.effectiveness(
        Ntu::from_conductance_and_capacitance_rates(ua, rates)?,
        rates,
    );

    let resolve = |i: usize| -> ConstraintResult<Stream> {
        Ok(inlets[i].with_heat_flow(HeatFlow::from_signed(*effectiveness * max[i])?))
    };

    Ok(KnownConductanceResult {
        streams: [resolve(0)?, resolve(1)?],
        effectiveness,
    })
}

/// Result of [`known_conductance_and_inlets`].
#[derive(Debug, Clone, Copy)]
pub struct KnownConductanceResult {
    /// Resolved streams, in input order.
    pub streams: [Stream; 2],
    /// Effectiveness the arrangement delivers at this conductance.
    pub effectiveness: Effectiveness,
}

impl KnownConductanceResult {
    /// Heat transferred between the streams.
    #[must_use]
    pub fn duty(&self) -> Power {
        self.streams[0].heat_flow.magnitude()
    }
}

/// Conductance `UA` needed for one stream to reach a known state.
///
/// This is the sizing problem: the second stream's outlet (or duty) is fixed
/// and the first stream's outlet follows from the energy balance.
///
/// # Errors
///
/// Returns `Err` if the requested duty exceeds the thermodynamic maximum, or
/// if any temperature is `NaN`.
pub fn known_conditions_and_inlets(
    arrangement: &impl NtuRelation,
    streams: (StreamInlet, Stream),
) -> ConstraintResult<KnownConditionsResult> {
    let (inlet, known) = streams;
    let max = max_heat_flows([inlet, known.into()])?;
    let rates = [inlet.capacitance_rate, known.capacitance_rate];

    let max_duty = max[0].abs();
    let duty = known.heat_flow.magnitude();

    if max_duty == Power::ZERO {
        if duty != Power::ZERO {
            return Err(ConstraintError::AboveMaximum);
        }
        return Ok(KnownConditionsResult {
            streams: [inlet.with_heat_flow(HeatFlow::None), known],
            ua: ThermalConductance::ZERO,
            ntu: Ntu::new(0.0)?,
        });
    }

    let effectiveness = Effectiveness::from_quantity(duty / max_duty)?;
    let ntu = arrangement.ntu(effectiveness, rates);

    Ok(KnownConditionsResult {
        streams: [
            inlet.with_heat_flow(HeatFlow::from_signed(*effectiveness * max[0])?),
            known,
        ],
        ua: *ntu * rates[0].min(*rates[1]),
        ntu,
    })
}

/// Result of [`known_conditions_and_inlets`].
#[derive(Debug, Clone, Copy)]
pub struct KnownConditionsResult {
    /// Resolved streams, in input order.
    pub streams: [Stream; 2],
    /// Conductance required to deliver the known duty.
    pub ua: ThermalConductance,
    /// `UA / C_min` at the required conductance.
    pub ntu: Ntu,
}

/// Signed `q_max = C_min·(T_other − T_self)` seen by each stream.
fn max_heat_flows(inlets: [StreamInlet; 2]) -> ConstraintResult<[Power; 2]> {
    let c_min = inlets[0].capacitance_rate.min(*inlets[1].capacitance_rate);
    let q = c_min * inlets[1].temperature.minus(inlets[0].temperature);

    match q.partial_cmp(&Power::ZERO) {
        Some(Ordering::Equal) => Ok([Power::ZERO, Power::ZERO]),
        Some(_) => Ok([q, -q]),
        None => Err(ConstraintError::NotANumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::ThermodynamicTemperature, power::watt, ratio::ratio,
        thermal_conductance::watt_per_kelvin, thermodynamic_temperature::degree_celsius,
    };

    use crate::support::hx::{CapacitanceRate, CounterFlow, ParallelFlow};

    fn inlet(c: f64, t: f64) -> ConstraintResult<StreamInlet> {
        Ok(StreamInlet::new(
            CapacitanceRate::new::<watt_per_kelvin>(c)?,
            ThermodynamicTemperature::new::<degree_celsius>(t),
        ))
    }

    #[test]
    fn forward_counter_flow_balances_energy() -> ConstraintResult<()> {
        // NTU = ln 4 with C_r = 0.5 gives ε = 2/3.
        let result = known_conductance_and_inlets(
            &CounterFlow,
            ThermalConductance::new::<watt_per_kelvin>(3000.0 * 4.0_f64.ln()),
            [inlet(3000.0, 20.0)?, inlet(6000.0, 80.0)?],
        )?;

        let [cold, hot] = result.streams;
        assert_relative_eq!(result.effectiveness.get::<ratio>(), 2.0 / 3.0, max_relative = 1e-12);
        assert_relative_eq!(result.duty().get::<watt>(), 120_000.0, max_relative = 1e-12);
        assert_relative_eq!(cold.outlet_temperature.get::<degree_celsius>(), 60.0, epsilon = 1e-9);
        assert_relative_eq!(hot.outlet_temperature.get::<degree_celsius>(), 60.0, epsilon = 1e-9);
        assert!(matches!(cold.heat_flow, HeatFlow::In(_)));
        assert!(matches!(hot.heat_flow, HeatFlow::Out(_)));
        Ok(())
    }

    #[test]
    fn inverse_recovers_conductance() -> ConstraintResult<()> {
        let ua = ThermalConductance::new::<watt_per_kelvin>(2500.0);
        let cold = inlet(3000.0, 20.0)?;
        let forward = known_conductance_and_inlets(&ParallelFlow, ua, [cold, inlet(4500.0, 85.0)?])?;

        let sized = known_conditions_and_inlets(&ParallelFlow, (cold, forward.streams[1]))?;

        assert_relative_eq!(sized.ua.get::<watt_per_kelvin>(), 2500.0, max_relative = 1e-9);
        assert_relative_eq!(
            sized.streams[0].outlet_temperature.get::<degree_celsius>(),
            forward.streams[0].outlet_temperature.get::<degree_celsius>(),
            epsilon = 1e-9
        );
        Ok(())
    }

    #[test]
    fn equal_inlets_exchange_nothing() -> ConstraintResult<()> {
        let result = known_conductance_and_inlets(
            &CounterFlow,
            ThermalConductance::new::<watt_per_kelvin>(1000.0),
            [inlet(1000.0, 40.0)?, inlet(2000.0, 40.0)?],
        )?;
        assert_eq!(result.streams[0].heat_flow, HeatFlow::None);
        Ok(())
    }

    #[test]
    fn duty_above_maximum_is_rejected() -> ConstraintResult<()> {
        let cold = inlet(1000.0, 20.0)?;
        let hot = Stream::new_from_heat_flow(
            CapacitanceRate::new::<watt_per_kelvin>(2000.0)?,
            ThermodynamicTemperature::new::<degree_celsius>(80.0),
            HeatFlow::outgoing(Power::new::<watt>(70_000.0))?,
        );

        assert!(known_conditions_and_inlets(&CounterFlow, (cold, hot)).is_err());
        Ok(())
    }
}

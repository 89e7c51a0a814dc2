//! Counter-flow effectiveness-NTU relations.

use crate::support::hx::{
    CapacitanceRate, Effectiveness, Ntu,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation, effectiveness_via, ntu_via},
};

/// Streams enter at opposite ends of the exchanger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterFlow;

/// Below this distance from `C_r = 1` the balanced-flow limit is used.
const BALANCED: f64 = 1e-9;

impl EffectivenessRelation for CounterFlow {
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness {
        effectiveness_via(ntu, capacitance_rates, |ntu, cr| {
            if (1.0 - cr).abs() < BALANCED {
                return ntu / (1.0 + ntu);
            }
            let e = (-ntu * (1.0 - cr)).exp();
            (1.0 - e) / (1.0 - cr * e)
        })
    }
}

impl NtuRelation for CounterFlow {
    fn ntu(&self, effectiveness: Effectiveness, capacitance_rates: [CapacitanceRate; 2]) -> Ntu {
        ntu_via(effectiveness, capacitance_rates, |eff, cr| {
            if (1.0 - cr).abs() < BALANCED {
                return eff / (1.0 - eff);
            }
            ((1.0 - eff * cr) / (1.0 - eff)).ln() / (1.0 - cr)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintResult;
    use approx::assert_relative_eq;
    use uom::si::{ratio::ratio, thermal_conductance::watt_per_kelvin};

    fn rates(c_min: f64, c_max: f64) -> ConstraintResult<[CapacitanceRate; 2]> {
        Ok([
            CapacitanceRate::new::<watt_per_kelvin>(c_min)?,
            CapacitanceRate::new::<watt_per_kelvin>(c_max)?,
        ])
    }

    #[test]
    fn balanced_streams() -> ConstraintResult<()> {
        let eff = CounterFlow.effectiveness(Ntu::new(3.0)?, rates(2000.0, 2000.0)?);
        assert_relative_eq!(eff.get::<ratio>(), 0.75);
        Ok(())
    }

    #[test]
    fn inverse_recovers_ntu() -> ConstraintResult<()> {
        for (ntu, c_max) in [(0.3, 2500.0), (1.2, 4000.0), (4.0, 8000.0)] {
            let pair = rates(2000.0, c_max)?;
            let eff = CounterFlow.effectiveness(Ntu::new(ntu)?, pair);
            assert_relative_eq!(
                CounterFlow.ntu(eff, pair).get::<ratio>(),
                ntu,
                max_relative = 1e-12
            );
        }
        Ok(())
    }

    #[test]
    fn beats_parallel_flow() -> ConstraintResult<()> {
        use crate::support::hx::ParallelFlow;

        let pair = rates(2000.0, 3000.0)?;
        let ntu = Ntu::new(2.0)?;
        assert!(
            CounterFlow.effectiveness(ntu, pair).get::<ratio>()
                > ParallelFlow.effectiveness(ntu, pair).get::<ratio>()
        );
        Ok(())
    }
}

//! Parallel-flow effectiveness-NTU relations.

use crate::support::hx::{
    CapacitanceRate, Effectiveness, Ntu,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation, effectiveness_via, ntu_via},
};

/// Streams enter at the same end and flow in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParallelFlow;

impl EffectivenessRelation for ParallelFlow {
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness {
        effectiveness_via(ntu, capacitance_rates, |ntu, cr| {
            (1.0 - (-ntu * (1.0 + cr)).exp()) / (1.0 + cr)
        })
    }
}

impl NtuRelation for ParallelFlow {
    fn ntu(&self, effectiveness: Effectiveness, capacitance_rates: [CapacitanceRate; 2]) -> Ntu {
        ntu_via(effectiveness, capacitance_rates, |eff, cr| {
            -(1.0 - eff * (1.0 + cr)).ln() / (1.0 + cr)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::constraint::ConstraintResult;
    use approx::assert_relative_eq;
    use uom::si::{ratio::ratio, thermal_conductance::watt_per_kelvin};

    #[test]
    fn effectiveness_is_capped_by_mixing_limit() -> ConstraintResult<()> {
        let pair = [
            CapacitanceRate::new::<watt_per_kelvin>(1000.0)?,
            CapacitanceRate::new::<watt_per_kelvin>(1000.0)?,
        ];

        let eff = ParallelFlow.effectiveness(Ntu::new(50.0)?, pair);

        assert_relative_eq!(eff.get::<ratio>(), 0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn inverse_recovers_ntu() -> ConstraintResult<()> {
        let pair = [
            CapacitanceRate::new::<watt_per_kelvin>(1500.0)?,
            CapacitanceRate::new::<watt_per_kelvin>(4000.0)?,
        ];
        let eff = ParallelFlow.effectiveness(Ntu::new(0.8)?, pair);
        assert_relative_eq!(
            ParallelFlow.ntu(eff, pair).get::<ratio>(),
            0.8,
            max_relative = 1e-12
        );
        Ok(())
    }
}

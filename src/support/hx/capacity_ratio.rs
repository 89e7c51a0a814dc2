use std::ops::Deref;

use uom::si::{f64::Ratio, ratio::ratio};

use crate::support::constraint::{Constrained, ConstraintResult, UnitInterval};

use super::CapacitanceRate;

/// `C_min / C_max` for a pair of streams, always in `[0, 1]`.
///
/// Zero means one stream changes phase at constant temperature. One means
/// the streams are balanced.
#[derive(Debug, Clone, Copy)]
pub struct CapacityRatio(Constrained<Ratio, UnitInterval>);

impl CapacityRatio {
    /// Creates a capacity ratio from a plain number.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside `[0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(Ratio::new::<ratio>(value))?))
    }

    /// Ratio of the smaller to the larger capacitance rate.
    ///
    /// Both rates are strictly positive, so the quotient always lands in
    /// `(0, 1]`. An infinite rate (a condensing or boiling stream) gives zero.
    #[must_use]
    pub(crate) fn from_capacitance_rates(capacitance_rates: [CapacitanceRate; 2]) -> Self {
        let [first, second] = capacitance_rates;
        let value = (first.min(*second) / first.max(*second)).get::<ratio>();
        Self(Constrained::new_unchecked(Ratio::new::<ratio>(value.clamp(0.0, 1.0))))
    }
}

impl Deref for CapacityRatio {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermal_conductance::watt_per_kelvin;

    #[test]
    fn order_does_not_matter() -> ConstraintResult<()> {
        let hot = CapacitanceRate::new::<watt_per_kelvin>(2091.0)?;
        let cold = CapacitanceRate::new::<watt_per_kelvin>(4182.0)?;

        assert_relative_eq!(
            CapacityRatio::from_capacitance_rates([hot, cold]).get::<ratio>(),
            0.5
        );
        assert_relative_eq!(
            CapacityRatio::from_capacitance_rates([cold, hot]).get::<ratio>(),
            0.5
        );
        Ok(())
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(CapacityRatio::new(1.2).is_err());
        assert!(CapacityRatio::new(-0.1).is_err());
    }
}

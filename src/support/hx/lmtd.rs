//! Log-mean temperature difference.

use uom::si::{
    f64::{TemperatureInterval, ThermodynamicTemperature},
    temperature_interval::kelvin,
};

use crate::support::units::TemperatureDifference;

/// Terminal differences closer than this (in K) use the arithmetic limit.
const EQUAL_ENDS: f64 = 1e-9;

/// `(ΔT1 − ΔT2) / ln(ΔT1/ΔT2)`.
///
/// Returns `None` unless both terminal differences are strictly positive.
/// A zero or negative end means the temperatures cross.
#[must_use]
pub fn log_mean(dt1: TemperatureInterval, dt2: TemperatureInterval) -> Option<TemperatureInterval> {
    let (a, b) = (dt1.get::<kelvin>(), dt2.get::<kelvin>());
    if !(a > 0.0 && b > 0.0) {
        return None;
    }
    if (a - b).abs() < EQUAL_ENDS {
        return Some(dt1);
    }
    Some(TemperatureInterval::new::<kelvin>((a - b) / (a / b).ln()))
}

/// Terminal temperatures of a two-stream exchanger.
///
/// Which ends face each other depends on the flow arrangement, so the pairing
/// is chosen by the method called.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Terminals {
    pub hot_in: ThermodynamicTemperature,
    pub hot_out: ThermodynamicTemperature,
    pub cold_in: ThermodynamicTemperature,
    pub cold_out: ThermodynamicTemperature,
}

impl Terminals {
    /// Counter-flow LMTD, pairing each hot end with the opposite cold end.
    #[must_use]
    pub fn counter_flow(&self) -> Option<TemperatureInterval> {
        log_mean(
            self.hot_in.minus(self.cold_out),
            self.hot_out.minus(self.cold_in),
        )
    }

    /// Parallel-flow LMTD, pairing inlets and outlets.
    #[must_use]
    pub fn parallel_flow(&self) -> Option<TemperatureInterval> {
        log_mean(
            self.hot_in.minus(self.cold_in),
            self.hot_out.minus(self.cold_out),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    fn dt(k: f64) -> TemperatureInterval {
        TemperatureInterval::new::<kelvin>(k)
    }

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn textbook_value() {
        let lmtd = log_mean(dt(30.0), dt(10.0)).map(|t| t.get::<kelvin>());
        assert_relative_eq!(lmtd.unwrap_or(f64::NAN), 20.0 / 3.0_f64.ln());
    }

    #[test]
    fn equal_ends_use_the_limit() {
        let lmtd = log_mean(dt(15.0), dt(15.0)).map(|t| t.get::<kelvin>());
        assert_eq!(lmtd, Some(15.0));
    }

    #[test]
    fn temperature_cross_has_no_lmtd() {
        let cross = Terminals {
            hot_in: celsius(90.0),
            hot_out: celsius(30.0),
            cold_in: celsius(40.0),
            cold_out: celsius(60.0),
        };
        assert!(cross.counter_flow().is_none());
        assert!(log_mean(dt(0.0), dt(10.0)).is_none());
    }

    #[test]
    fn counter_flow_pairs_opposite_ends() {
        let ends = Terminals {
            hot_in: celsius(90.0),
            hot_out: celsius(50.0),
            cold_in: celsius(20.0),
            cold_out: celsius(60.0),
        };
        let lmtd = ends.counter_flow().map(|t| t.get::<kelvin>());
        assert_relative_eq!(lmtd.unwrap_or(f64::NAN), 30.0, epsilon = 1e-9);
        assert!(ends.parallel_flow().is_none());
    }
}

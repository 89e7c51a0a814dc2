use std::fmt;

use tracing::debug;
use uom::si::f64::{Area, HeatTransfer, MassRate};

use crate::models::ThermalError;

/// One of the two flow passages of a tubular exchanger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Passage {
    /// Inner pipe of a double-pipe exchanger, or the tubes of a shell-and-tube.
    Inner,
    /// Annulus of a double-pipe exchanger, or the shell of a shell-and-tube.
    Outer,
}

impl Passage {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Inner => Self::Outer,
            Self::Outer => Self::Inner,
        }
    }
}

impl fmt::Display for Passage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inner => "inner",
            Self::Outer => "outer",
        })
    }
}

/// Which passage each stream occupies.
///
/// [`RoutingDecision::route`] sends the larger mass flow through the larger
/// flow area. Solvers also rate the swapped routing and keep whichever gives
/// the higher overall coefficient, see [`higher_conductance`]. Routing depends
/// only on flows and geometry, so it is decided once per solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoutingDecision {
    pub hot: Passage,
}

impl RoutingDecision {
    /// Ties go to the cold stream for flow and to the outer passage for area.
    #[must_use]
    pub fn route(hot_flow: MassRate, cold_flow: MassRate, inner: Area, outer: Area) -> Self {
        let hot_is_larger = hot_flow > cold_flow;
        let outer_is_larger = outer >= inner;
        let hot = if hot_is_larger == outer_is_larger {
            Passage::Outer
        } else {
            Passage::Inner
        };
        Self { hot }
    }

    #[must_use]
    pub fn cold(&self) -> Passage {
        self.hot.other()
    }

    /// Each stream in the other's passage.
    #[must_use]
    pub fn swapped(self) -> Self {
        Self { hot: self.cold() }
    }
}

/// Rates `preferred` and, when given, `alternative`, keeping the result with
/// the higher overall coefficient.
///
/// `preferred` wins ties, and an alternative that cannot be rated is dropped.
/// Since each assignment's coefficient grows with either flow, so does the
/// better of the two, including where the preferred assignment flips.
pub(super) fn higher_conductance<K, S>(
    preferred: K,
    alternative: Option<K>,
    mut rate: impl FnMut(K) -> Result<S, ThermalError>,
    coefficient: impl Fn(&S) -> HeatTransfer,
) -> Result<S, ThermalError>
where
    K: Copy + fmt::Debug,
{
    let first = rate(preferred)?;
    let Some(alternative) = alternative else {
        return Ok(first);
    };

    match rate(alternative) {
        Ok(second) if coefficient(&second) > coefficient(&first) => {
            debug!(?alternative, "alternative assignment conducts better");
            Ok(second)
        }
        Ok(_) => Ok(first),
        Err(error) => {
            debug!(?alternative, %error, "alternative assignment could not be rated");
            Ok(first)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        area::square_meter, heat_transfer::watt_per_square_meter_kelvin,
        mass_rate::kilogram_per_second,
    };

    use crate::models::Infeasibility;

    fn kg_s(v: f64) -> MassRate {
        MassRate::new::<kilogram_per_second>(v)
    }

    fn m2(v: f64) -> Area {
        Area::new::<square_meter>(v)
    }

    #[test]
    fn larger_flow_takes_larger_area() {
        let routing = RoutingDecision::route(kg_s(0.5), kg_s(0.3), m2(2.2e-3), m2(1.9e-3));
        assert_eq!(routing.hot, Passage::Inner);
        assert_eq!(routing.cold(), Passage::Outer);

        let routing = RoutingDecision::route(kg_s(0.5), kg_s(0.3), m2(1.0e-3), m2(1.9e-3));
        assert_eq!(routing.hot, Passage::Outer);

        let routing = RoutingDecision::route(kg_s(0.2), kg_s(0.3), m2(1.0e-3), m2(1.9e-3));
        assert_eq!(routing.hot, Passage::Inner);
    }

    #[test]
    fn swapping_exchanges_passages() {
        let routing = RoutingDecision::route(kg_s(0.5), kg_s(0.3), m2(2.2e-3), m2(1.9e-3));
        assert_eq!(routing.swapped().hot, Passage::Outer);
        assert_eq!(routing.swapped().swapped(), routing);
    }

    #[test]
    fn the_higher_coefficient_wins() -> Result<(), ThermalError> {
        let u = |w: f64| HeatTransfer::new::<watt_per_square_meter_kelvin>(w);
        let rate = |routing: RoutingDecision| -> Result<HeatTransfer, ThermalError> {
            Ok(match routing.hot {
                Passage::Inner => u(600.0),
                Passage::Outer => u(650.0),
            })
        };
        let inner = RoutingDecision {
            hot: Passage::Inner,
        };

        assert_eq!(higher_conductance(inner, Some(inner.swapped()), rate, |h| *h)?, u(650.0));
        assert_eq!(higher_conductance(inner, None, rate, |h| *h)?, u(600.0));
        assert_eq!(higher_conductance(inner, Some(inner), rate, |h| *h)?, u(600.0));
        Ok(())
    }

    #[test]
    fn an_unratable_alternative_is_dropped() -> Result<(), ThermalError> {
        let inner = RoutingDecision {
            hot: Passage::Inner,
        };
        let rate = |routing: RoutingDecision| -> Result<HeatTransfer, ThermalError> {
            match routing.hot {
                Passage::Inner => Ok(HeatTransfer::new::<watt_per_square_meter_kelvin>(600.0)),
                Passage::Outer => Err(Infeasibility::degenerate("no annulus").into()),
            }
        };

        let kept = higher_conductance(inner, Some(inner.swapped()), rate, |h| *h)?;
        assert_eq!(kept.get::<watt_per_square_meter_kelvin>(), 600.0);

        let error = higher_conductance(inner.swapped(), Some(inner), rate, |h| *h).unwrap_err();
        assert!(matches!(error, ThermalError::Infeasible(_)));
        Ok(())
    }

    #[test]
    fn equal_flows_put_cold_in_the_larger_passage() {
        let routing = RoutingDecision::route(kg_s(0.3), kg_s(0.3), m2(1.0e-3), m2(1.9e-3));
        assert_eq!(routing.cold(), Passage::Outer);
    }
}

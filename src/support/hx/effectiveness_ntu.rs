use std::ops::Deref;

use uom::si::{
    f64::{Ratio, ThermalConductance},
    ratio::ratio,
};

use crate::support::constraint::{Constrained, ConstraintResult, NonNegative, UnitInterval};

use super::{CapacitanceRate, CapacityRatio};

/// Effectiveness as a function of NTU for a flow arrangement.
pub trait EffectivenessRelation {
    /// Returns `ε(NTU, C_r)` for the given stream pair.
    ///
    /// The [capacity ratio](CapacityRatio) is taken from the two
    /// [capacitance rates](CapacitanceRate), in either order.
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness;
}

/// NTU as a function of effectiveness, the inverse of [`EffectivenessRelation`].
pub trait NtuRelation {
    /// Returns `NTU(ε, C_r)` for the given stream pair.
    ///
    /// Sizing uses this direction: a required effectiveness gives the
    /// conductance the exchanger must supply.
    fn ntu(&self, effectiveness: Effectiveness, capacitance_rates: [CapacitanceRate; 2]) -> Ntu;
}

/// Exchanger effectiveness `ε = q / q_max`, in `[0, 1]`.
///
/// `q_max = C_min·(T_hot,in − T_cold,in)` is the duty of an infinitely long
/// counter-flow exchanger.
#[derive(Debug, Clone, Copy)]
pub struct Effectiveness(Constrained<Ratio, UnitInterval>);

impl Effectiveness {
    /// Creates an effectiveness from a plain number.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value lies outside `[0, 1]`.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Wraps a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity lies outside `[0, 1]`.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(UnitInterval::new(quantity)?))
    }

    /// Builds an effectiveness from a closed-form result, clamping round-off
    /// just outside `[0, 1]`.
    fn saturating(value: f64) -> Self {
        let value = value.max(0.0).min(1.0);
        Self(Constrained::new_unchecked(Ratio::new::<ratio>(value)))
    }
}

impl Deref for Effectiveness {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Number of transfer units, `NTU = UA / C_min`.
///
/// The dimensionless size of an exchanger. It is never negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Ntu(Constrained<Ratio, NonNegative>);

impl Ntu {
    /// Creates an NTU from a plain number.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the value is negative.
    pub fn new(value: f64) -> ConstraintResult<Self> {
        Self::from_quantity(Ratio::new::<ratio>(value))
    }

    /// Wraps a ratio quantity.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the quantity is negative.
    pub fn from_quantity(quantity: Ratio) -> ConstraintResult<Self> {
        Ok(Self(NonNegative::new(quantity)?))
    }

    /// `UA / C_min` for the given stream pair.
    ///
    /// Both rates are passed so the smaller one can be picked.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `ua` is negative.
    pub fn from_conductance_and_capacitance_rates(
        ua: ThermalConductance,
        capacitance_rates: [CapacitanceRate; 2],
    ) -> ConstraintResult<Self> {
        Self::from_quantity(ua / capacitance_rates[0].min(*capacitance_rates[1]))
    }

    fn saturating(value: f64) -> Self {
        Self(Constrained::new_unchecked(Ratio::new::<ratio>(value.max(0.0))))
    }
}

impl Deref for Ntu {
    type Target = Ratio;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Evaluates `relation(ntu, c_r)`, short-circuiting the `C_r = 0` case that
/// every arrangement shares.
#[inline]
pub(crate) fn effectiveness_via(
    ntu: Ntu,
    capacitance_rates: [CapacitanceRate; 2],
    relation: impl Fn(f64, f64) -> f64,
) -> Effectiveness {
    let cr = CapacityRatio::from_capacitance_rates(capacitance_rates).get::<ratio>();
    let ntu = ntu.get::<ratio>();
    if cr == 0.0 {
        return Effectiveness::saturating(1.0 - (-ntu).exp());
    }
    Effectiveness::saturating(relation(ntu, cr))
}

/// Inverse counterpart of [`effectiveness_via`].
#[inline]
pub(crate) fn ntu_via(
    effectiveness: Effectiveness,
    capacitance_rates: [CapacitanceRate; 2],
    relation: impl Fn(f64, f64) -> f64,
) -> Ntu {
    let cr = CapacityRatio::from_capacitance_rates(capacitance_rates).get::<ratio>();
    let eff = effectiveness.get::<ratio>();
    if cr == 0.0 {
        return Ntu::saturating(-(1.0 - eff).ln());
    }
    Ntu::saturating(relation(eff, cr))
}

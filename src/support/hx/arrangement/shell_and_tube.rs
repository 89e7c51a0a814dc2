//! One-shell-pass exchangers with 1, 2, or 4 tube passes.
//!
//! Besides the effectiveness-NTU relation, this module exposes the two
//! quantities the shell-and-tube solver works with directly:
//!
//! - the cold-stream temperature effectiveness `S = (t2 − t1)/(T1 − t1)`;
//! - the LMTD correction factor `F` for a 1-2 exchanger.
//!
//! Both take `R = C_c / C_h`, which may be larger than one.

use std::fmt;

use thiserror::Error;

use crate::support::hx::{
    CapacitanceRate, CounterFlow, Effectiveness, Ntu,
    effectiveness_ntu::{EffectivenessRelation, NtuRelation, effectiveness_via, ntu_via},
};

/// Number of tube passes in a single shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TubePasses {
    One,
    Two,
    Four,
}

impl TubePasses {
    #[must_use]
    pub fn count(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
        }
    }
}

impl fmt::Display for TubePasses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// Returned for a tube pass count other than 1, 2, or 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported tube pass count: {0}")]
pub struct UnknownTubePasses(pub u32);

impl TryFrom<u32> for TubePasses {
    type Error = UnknownTubePasses;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            other => Err(UnknownTubePasses(other)),
        }
    }
}

/// A single shell pass around a tube bundle.
///
/// A single tube pass is treated as pure counter-flow. Two or more tube
/// passes use the 1-2 relation, which does not depend on the exact even
/// pass count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OneShellPass {
    pub tube_passes: TubePasses,
}

impl EffectivenessRelation for OneShellPass {
    fn effectiveness(&self, ntu: Ntu, capacitance_rates: [CapacitanceRate; 2]) -> Effectiveness {
        if self.tube_passes == TubePasses::One {
            return CounterFlow.effectiveness(ntu, capacitance_rates);
        }
        effectiveness_via(ntu, capacitance_rates, temperature_effectiveness)
    }
}

impl NtuRelation for OneShellPass {
    fn ntu(&self, effectiveness: Effectiveness, capacitance_rates: [CapacitanceRate; 2]) -> Ntu {
        if self.tube_passes == TubePasses::One {
            return CounterFlow.ntu(effectiveness, capacitance_rates);
        }
        ntu_via(effectiveness, capacitance_rates, |eff, cr| {
            let s = (1.0 + cr * cr).sqrt();
            let e = (2.0 - eff * (1.0 + cr)) / (eff * s);
            ((e + 1.0) / (e - 1.0)).ln() / s
        })
    }
}

/// Cold-stream temperature effectiveness of a 1-2 exchanger.
///
/// `ntu_cold` is `UA / C_c` and `r` is `C_c / C_h`. Equivalent to
/// `2(1 − C1)/(C2 − C1·C3)` with `C1 = exp(NTU√(R²+1))`, `C2 = R + 1 − √(R²+1)`,
/// and `C3 = R + 1 + √(R²+1)`, rearranged so large NTU does not overflow.
#[must_use]
pub fn temperature_effectiveness(ntu_cold: f64, r: f64) -> f64 {
    let s = (1.0 + r * r).sqrt();
    let x = (-ntu_cold * s).exp();
    2.0 * (1.0 - x) / ((1.0 + r) * (1.0 - x) + s * (1.0 + x))
}

/// LMTD correction factor of a 1-2 exchanger at `R = C_c/C_h` and cold-stream
/// temperature effectiveness `p`.
///
/// Returns `None` when the logarithms are undefined, which means the requested
/// duty is not reachable with one shell pass.
#[must_use]
pub fn correction_factor(r: f64, p: f64) -> Option<f64> {
    const NEAR_ONE: f64 = 1e-6;

    if p <= 0.0 {
        return Some(1.0);
    }

    let s = (1.0 + r * r).sqrt();
    let denominator = ((2.0 - p * (r + 1.0 - s)) / (2.0 - p * (r + 1.0 + s))).ln();

    let f = if (r - 1.0).abs() < NEAR_ONE {
        (s * p / (1.0 - p)) / denominator
    } else {
        (s / (r - 1.0)) * ((1.0 - p) / (1.0 - p * r)).ln() / denominator
    };

    (f.is_finite() && f > 0.0).then_some(f)
}

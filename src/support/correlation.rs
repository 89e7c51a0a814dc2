//! Dimensionless heat-transfer and friction correlations.
//!
//! Every function here is pure: it takes Reynolds and Prandtl numbers (and a
//! length ratio where the correlation needs one) and returns the correlated
//! value tagged with the flow regime it was drawn from. Callers record the
//! tag in their solution so a reader can see which branch was used.
//!
//! Regimes are classified against a [`TransitionReynolds`] that each exchanger
//! topology carries. A Reynolds number exactly at the threshold is turbulent.

mod friction;
mod nusselt;
mod regime;

use thiserror::Error;
use uom::si::{
    f64::{DynamicViscosity, Length, MassDensity, Velocity},
    ratio::ratio,
};

pub use friction::{colebrook_step, darcy, haaland, plate_channel_friction, shell_side_friction};
pub use nusselt::{DuctKind, Heating, NusseltInput, nusselt};
pub use regime::{FlowRegime, PlateBand, TransitionReynolds};

/// A correlated value and the regime it was evaluated in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlated<R = FlowRegime> {
    pub value: f64,
    pub regime: R,
}

/// Invalid correlation inputs.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CorrelationError {
    #[error("reynolds number must be positive, got {0}")]
    Reynolds(f64),
    #[error("prandtl number must be positive, got {0}")]
    Prandtl(f64),
    #[error("length ratio must be positive, got {0}")]
    LengthRatio(f64),
    #[error("relative roughness must not be negative, got {0}")]
    Roughness(f64),
}

pub(crate) fn check_positive(
    value: f64,
    error: fn(f64) -> CorrelationError,
) -> Result<f64, CorrelationError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(error(value))
    }
}

/// `Re = ρ·V·D/μ`.
#[must_use]
pub fn reynolds(
    density: MassDensity,
    velocity: Velocity,
    diameter: Length,
    viscosity: DynamicViscosity,
) -> f64 {
    (density * velocity * diameter / viscosity).get::<ratio>()
}

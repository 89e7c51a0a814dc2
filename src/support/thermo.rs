//! Fluid property lookup.
//!
//! Solvers never hard-code fluid properties. They ask a [`PropertyProvider`]
//! for a property of a [`Fluid`] at a [`Condition`] and receive a plain SI
//! value, or a typed snapshot ([`FluidState`], [`SaturationState`]) built
//! from several such queries.
//!
//! Two providers ship with the crate:
//!
//! - [`model::TabulatedWater`]: saturated water and compressed liquid water
//!   from 0.01 °C to 150 °C, linearly interpolated.
//! - [`model::ConstantProperties`]: fixed liquid properties for any fluid,
//!   useful for oils, glycols, and tests.

mod error;
mod fluid;
mod provider;
mod state;

pub mod model;

pub use error::PropertyError;
pub use fluid::{Fluid, UnknownFluid};
pub use provider::{Condition, Phase, Property, PropertyProvider};
pub use state::{FluidState, SaturationState};

//! Public Twine models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! - [`thermal`]: heat exchangers, phase change, and heat pipes.
//! - [`hydraulic`]: pipe flow.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the computation lives. The `core` module is an implementation detail
//! and is **not** re-exported as part of the public API; its input, config,
//! and solution types are re-exported by the model module.
//!
//! The [`twine_core::Model`] implementation is a thin adapter that owns a
//! [`PropertyProvider`](crate::support::thermo::PropertyProvider) and solver
//! settings and delegates to the core. Every model fails with [`ThermalError`].

mod error;

pub mod hydraulic;
pub mod thermal;

pub use error::{ErrorKind, Infeasibility, InputError, LookupError, ThermalError};

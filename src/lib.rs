//! # Thermal HX
//!
//! Steady-state thermal-hydraulic models for [Twine](https://github.com/isentropic-dev/twine):
//! double-pipe, shell-and-tube, and plate-and-frame heat exchangers, film
//! condensation and nucleate pool boiling, screen-wick heat pipes, and
//! catalog pipe pressure drop.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain-specific [`twine_core::Model`] implementations.
//! - [`support`]: Supporting utilities used by models: fluid properties,
//!   pipe and tube catalogs, correlations, the fixed-point driver, unit
//!   systems, and flat field parsing.
//!
//! ## Logging
//!
//! Models emit [`tracing`] events: `debug` for routing decisions and each
//! iteration, `warn` when an iteration cap is reached or the heat balance
//! disagrees. No subscriber is installed by this crate.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.

pub mod models;
pub mod support;

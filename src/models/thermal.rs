//! Thermal systems models.
//!
//! Heat exchangers, film condensation and pool boiling surfaces, and capillary
//! heat pipes.

pub mod heat_pipe;
pub mod hx;
pub mod phase_change;

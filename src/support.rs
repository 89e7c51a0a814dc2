//! Supporting utilities used by models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod convergence;
pub mod correlation;
pub mod fields;
pub mod geometry;
pub mod hx;
pub mod thermo;
pub mod units;

//! Built-in property providers.

pub mod constant;
pub mod tabulated;

pub use constant::{ConstantProperties, LiquidConstants};
pub use tabulated::TabulatedWater;

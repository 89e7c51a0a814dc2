//! Extensions to [`uom`] and the boundary unit system.
//!
//! All internal computation is carried out in SI through [`uom`] quantities.
//! Values only change representation at the boundary, where [`UnitSystem`]
//! converts flat user inputs and labeled results between SI and Imperial.
//!
//! ## Temperature differences
//!
//! The [`TemperatureDifference`] trait subtracts two absolute temperatures and
//! returns a temperature interval:
//!
//! ```
//! use uom::si::f64::ThermodynamicTemperature;
//! use uom::si::thermodynamic_temperature::kelvin;
//! use thermal_hx::support::units::TemperatureDifference;
//!
//! let hot_inlet = ThermodynamicTemperature::new::<kelvin>(363.15);
//! let cold_inlet = ThermodynamicTemperature::new::<kelvin>(293.15);
//! let max_driving_force = hot_inlet.minus(cold_inlet);
//! ```

mod quantities;
mod system;
mod temperature_difference;

pub use quantities::{
    FoulingResistance, SpecificEnthalpy, SurfaceTension, fouling_resistance, newton_per_meter,
    square_meter_kelvin_per_watt, surface_tension,
};
pub use system::{Labeled, QuantityKind, UnitSystem};
pub use temperature_difference::TemperatureDifference;

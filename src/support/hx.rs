//! Closed-form energy-balance closures for two-stream exchangers.
//!
//! The exchanger solvers iterate on fluid properties and film coefficients,
//! but each iteration ends the same way: given a conductance `UA` and the two
//! inlet streams, find the outlet temperatures. This module owns that step.
//!
//! - [`CapacitanceRate`], [`CapacityRatio`], [`Effectiveness`], and [`Ntu`]
//!   are validated newtypes over [`uom`] quantities.
//! - [`StreamInlet`] and [`Stream`] describe a stream before and after the
//!   exchanger.
//! - [`CounterFlow`], [`ParallelFlow`], and [`OneShellPass`] implement the
//!   effectiveness-NTU relations.
//! - [`functional`] solves the forward (known `UA`) and inverse (known duty)
//!   problems.
//! - [`lmtd`] computes the log-mean temperature difference used to check the
//!   converged heat balance.
//!
//! # Example
//!
//! Hot water at 90 °C heating cold water at 20 °C in a counter-flow double
//! pipe:
//!
//! ```
//! use thermal_hx::support::constraint::ConstraintResult;
//! use thermal_hx::support::hx::{
//!     CapacitanceRate, CounterFlow, StreamInlet, functional::known_conductance_and_inlets,
//! };
//! use uom::si::{
//!     f64::{ThermalConductance, ThermodynamicTemperature},
//!     thermal_conductance::watt_per_kelvin,
//!     thermodynamic_temperature::degree_celsius,
//! };
//!
//! fn main() -> ConstraintResult<()> {
//!     let cold = StreamInlet::new(
//!         CapacitanceRate::new::<watt_per_kelvin>(4180.0)?,
//!         ThermodynamicTemperature::new::<degree_celsius>(20.0),
//!     );
//!     let hot = StreamInlet::new(
//!         CapacitanceRate::new::<watt_per_kelvin>(2100.0)?,
//!         ThermodynamicTemperature::new::<degree_celsius>(90.0),
//!     );
//!
//!     let result = known_conductance_and_inlets(
//!         &CounterFlow,
//!         ThermalConductance::new::<watt_per_kelvin>(1500.0),
//!         [cold, hot],
//!     )?;
//!
//!     let [cold_out, hot_out] = result.streams;
//!     assert!(cold_out.outlet_temperature < hot_out.inlet_temperature);
//!     assert!(hot_out.outlet_temperature > cold_out.inlet_temperature);
//!     Ok(())
//! }
//! ```

pub mod arrangement;
mod capacitance_rate;
mod capacity_ratio;
mod effectiveness_ntu;
mod flow;
pub mod functional;
pub mod lmtd;
mod stream;

pub use arrangement::{CounterFlow, OneShellPass, ParallelFlow, TubePasses};
pub use capacitance_rate::CapacitanceRate;
pub use capacity_ratio::CapacityRatio;
pub use effectiveness_ntu::{Effectiveness, EffectivenessRelation, Ntu, NtuRelation};
pub use flow::HeatFlow;
pub use stream::{Stream, StreamInlet};

//! Rating cores for the concentric, shell-and-tube, and plate exchangers.
//!
//! Every topology follows the same shape: resolve geometry and routing once,
//! iterate outlet temperatures until the mean stream temperatures settle, then
//! derive LMTD, heat balance, pressure drops, and fouled performance from the
//! last step.

pub(super) mod double_pipe;
pub(super) mod plate_frame;
pub(super) mod shell_and_tube;

mod film;
mod routing;
mod solution;
mod streams;

pub use routing::{Passage, RoutingDecision};
pub use solution::{FouledPerformance, HeatBalance, RequiredSize, SideResult};
pub use streams::{FlowRate, FluidStream, Outlets};

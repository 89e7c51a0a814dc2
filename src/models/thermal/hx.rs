//! Heat exchanger models.
//!
//! Each topology module provides a [`twine_core::Model`] adapter over the
//! internal rating core. The adapters own a property provider and solver
//! settings; inputs are built directly or from flat named fields.

pub(crate) mod core;

pub mod double_pipe;
pub mod plate_frame;
pub mod shell_and_tube;

pub use self::core::{
    FlowRate, FluidStream, FouledPerformance, HeatBalance, Outlets, Passage, RequiredSize,
    RoutingDecision, SideResult,
};
pub use double_pipe::DoublePipe;
pub use plate_frame::PlateFrame;
pub use shell_and_tube::ShellAndTube;

//! Hydraulic models.

pub mod pipe_flow;

pub use pipe_flow::PipeFlow;

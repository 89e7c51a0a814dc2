//! Flow arrangements with closed-form effectiveness-NTU relations.

mod counter_flow;
mod parallel_flow;
mod shell_and_tube;

pub use counter_flow::CounterFlow;
pub use parallel_flow::ParallelFlow;
pub use shell_and_tube::{
    OneShellPass, TubePasses, UnknownTubePasses, correction_factor, temperature_effectiveness,
};

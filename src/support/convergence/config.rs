/// Stopping rule for [`iterate`](super::iterate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceConfig {
    /// Step cap. Values below one are treated as one.
    pub max_iters: usize,
    /// Converged once the criterion's change is at or below this value.
    pub rel_tol: f64,
    /// Keep every guess in a [`Trace`](super::Trace).
    pub record_trace: bool,
}

impl ConvergenceConfig {
    #[must_use]
    pub const fn new(max_iters: usize, rel_tol: f64) -> Self {
        Self {
            max_iters,
            rel_tol,
            record_trace: false,
        }
    }

    #[must_use]
    pub const fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self::new(100, 5e-4)
    }
}

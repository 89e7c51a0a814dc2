use thiserror::Error;

/// Whether the tolerance was met.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Converged,
    MaxIterations,
}

/// Attached to a result that stopped at the iteration cap.
///
/// The result is still usable. The warning records how far the last step moved.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("not converged after {iterations} iterations (last relative change {last_change:.3e})")]
pub struct ConvergenceWarning {
    pub iterations: usize,
    pub last_change: f64,
}

/// Convergence summary carried by every iterated solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Convergence {
    pub status: Status,
    pub iterations: usize,
    pub last_change: f64,
    pub warning: Option<ConvergenceWarning>,
}

impl Convergence {
    pub(super) fn converged(iterations: usize, last_change: f64) -> Self {
        Self {
            status: Status::Converged,
            iterations,
            last_change,
            warning: None,
        }
    }

    pub(super) fn capped(iterations: usize, last_change: f64) -> Self {
        Self {
            status: Status::MaxIterations,
            iterations,
            last_change,
            warning: Some(ConvergenceWarning {
                iterations,
                last_change,
            }),
        }
    }

    /// A closed-form result that needed no iteration.
    #[must_use]
    pub fn direct() -> Self {
        Self::converged(0, 0.0)
    }

    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}

/// One recorded step.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord<G> {
    pub iteration: usize,
    /// Guess produced by this step.
    pub guess: G,
    pub change: f64,
}

/// Every step of a run, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<G>(Vec<IterationRecord<G>>);

impl<G> Default for Trace<G> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<G> Trace<G> {
    pub(super) fn push(&mut self, record: IterationRecord<G>) {
        self.0.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[IterationRecord<G>] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Final guess, final step output, and how the run ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Iterated<G, O> {
    pub guess: G,
    pub output: O,
    pub convergence: Convergence,
    pub trace: Option<Trace<G>>,
}

//! Fixed-point iteration with a relative-change stopping rule.
//!
//! Every solver in the crate that iterates on its own guess (exchanger outlet
//! temperatures, the Colebrook friction factor) runs through [`iterate`]. The
//! caller supplies:
//!
//! - an initial guess `G`;
//! - a step closure mapping the current guess to the next guess and a step
//!   output `O` (coefficients, duties, anything the caller wants to keep);
//! - a [`Criterion`] measuring how far the guess moved.
//!
//! Hitting the iteration cap is not an error. The last guess and output are
//! returned with [`Status::MaxIterations`] and a [`ConvergenceWarning`], and a
//! `tracing` warning is emitted.
//!
//! ```
//! use thermal_hx::support::convergence::{ConvergenceConfig, RelativeChange, Status, iterate};
//!
//! // x = cos(x)
//! let result = iterate(
//!     &ConvergenceConfig::default(),
//!     1.0_f64,
//!     &RelativeChange,
//!     |x: &f64| Ok::<_, std::convert::Infallible>((x.cos(), ())),
//! )
//! .unwrap();
//!
//! assert_eq!(result.convergence.status, Status::Converged);
//! assert!((result.guess - 0.739_085).abs() < 2e-3);
//! ```

mod config;
mod criterion;
mod outcome;

use tracing::{debug, warn};

pub use config::ConvergenceConfig;
pub use criterion::{Criterion, RelativeChange, relative_change};
pub use outcome::{Convergence, ConvergenceWarning, IterationRecord, Iterated, Status, Trace};

/// Iterates `step` from `initial` until `criterion` reports a change at or
/// below `config.rel_tol`, or until `config.max_iters` steps have run.
///
/// At least one step always runs, so an output is always available.
///
/// # Errors
///
/// Returns the first error produced by `step`.
pub fn iterate<G, O, E, C, F>(
    config: &ConvergenceConfig,
    initial: G,
    criterion: &C,
    mut step: F,
) -> Result<Iterated<G, O>, E>
where
    G: Clone,
    C: Criterion<G>,
    F: FnMut(&G) -> Result<(G, O), E>,
{
    let max_iters = config.max_iters.max(1);
    let mut trace = config.record_trace.then(Trace::default);
    let mut guess = initial;
    let mut iteration = 0;

    loop {
        iteration += 1;
        let (next, output) = step(&guess)?;
        let change = criterion.change(&guess, &next);
        debug!(iteration, change, "fixed-point step");

        if let Some(trace) = trace.as_mut() {
            trace.push(IterationRecord {
                iteration,
                guess: next.clone(),
                change,
            });
        }
        guess = next;

        let converged = change <= config.rel_tol;
        if converged || iteration >= max_iters {
            let convergence = if converged {
                Convergence::converged(iteration, change)
            } else {
                warn!(
                    iterations = iteration,
                    change,
                    tolerance = config.rel_tol,
                    "iteration cap reached before convergence"
                );
                Convergence::capped(iteration, change)
            };

            return Ok(Iterated {
                guess,
                output,
                convergence,
                trace,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    fn halve(x: &f64) -> Result<(f64, u32), Infallible> {
        Ok((x / 2.0, 7))
    }

    #[test]
    fn converges_on_a_contraction() -> Result<(), Infallible> {
        let config = ConvergenceConfig {
            max_iters: 100,
            rel_tol: 1e-10,
            record_trace: false,
        };
        let result = iterate(&config, 10.0, &RelativeChange, |x: &f64| {
            Ok::<_, Infallible>(((x + 2.0 / x) / 2.0, ()))
        })?;

        assert_eq!(result.convergence.status, Status::Converged);
        assert!(result.convergence.warning.is_none());
        assert_relative_eq!(result.guess, 2.0_f64.sqrt(), max_relative = 1e-10);
        Ok(())
    }

    #[test]
    fn cap_is_a_warning_not_an_error() -> Result<(), Infallible> {
        let config = ConvergenceConfig {
            max_iters: 5,
            rel_tol: 1e-6,
            record_trace: true,
        };
        let result = iterate(&config, 1.0, &RelativeChange, halve)?;

        assert_eq!(result.convergence.status, Status::MaxIterations);
        assert_eq!(result.convergence.iterations, 5);
        assert_eq!(result.output, 7);
        assert_relative_eq!(result.guess, 1.0 / 32.0);

        let warning = result.convergence.warning.as_ref().map(|w| w.iterations);
        assert_eq!(warning, Some(5));

        let trace = result.trace.unwrap_or_default();
        assert_eq!(trace.len(), 5);
        assert_relative_eq!(trace.records()[0].change, 0.5);
        Ok(())
    }

    #[test]
    fn zero_previous_value_counts_as_converged() -> Result<(), Infallible> {
        let result = iterate(&ConvergenceConfig::default(), 0.0, &RelativeChange, |_: &f64| {
            Ok::<_, Infallible>((3.0, ()))
        })?;

        assert_eq!(result.convergence.status, Status::Converged);
        assert_eq!(result.convergence.iterations, 1);
        Ok(())
    }

    #[test]
    fn step_errors_propagate() {
        let result = iterate(&ConvergenceConfig::default(), 1.0, &RelativeChange, |_: &f64| {
            Err::<(f64, ()), _>("property lookup failed")
        });
        assert_eq!(result.err(), Some("property lookup failed"));
    }

    #[test]
    fn zero_cap_still_runs_one_step() -> Result<(), Infallible> {
        let config = ConvergenceConfig {
            max_iters: 0,
            ..ConvergenceConfig::default()
        };
        let result = iterate(&config, 1.0, &RelativeChange, halve)?;
        assert_eq!(result.convergence.iterations, 1);
        Ok(())
    }
}

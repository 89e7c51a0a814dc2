//! Film Reynolds number of a vertical plate of given height.
//!
//! The condensate film Reynolds number is `Re = 4·h·L·ΔT/(μ·h'fg)`, with `h`
//! itself a regime-dependent function of `Re`. Bisection finds the `Re` that
//! satisfies both.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;

use crate::models::{Infeasibility, ThermalError};

use super::{
    FilmConfig,
    condensation::{FilmRegime, film_parameter},
};

/// Film coefficient implied by a trial Reynolds number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct FilmPoint {
    pub reynolds: f64,
    /// W/m²·K
    pub coefficient: f64,
    pub regime: FilmRegime,
}

/// Evaluates the Cengel film correlation at a trial `Re`.
pub(super) struct FilmModel {
    pub prandtl: f64,
    /// `k·(g/ν²)^(1/3)`, in W/m²·K.
    pub coefficient_scale: f64,
}

impl Model for FilmModel {
    type Input = f64;
    type Output = FilmPoint;
    type Error = Infallible;

    fn call(&self, reynolds: &f64) -> Result<FilmPoint, Infallible> {
        let (parameter, regime) = film_parameter(*reynolds, self.prandtl);
        Ok(FilmPoint {
            reynolds: *reynolds,
            coefficient: parameter * self.coefficient_scale,
            regime,
        })
    }
}

/// Residual `Re − 4·h·L·ΔT/(μ·h'fg)`.
pub(super) struct FilmProblem {
    /// `4·L·ΔT/(μ·h'fg)`, in m²·K/W.
    pub reynolds_per_coefficient: f64,
}

impl EquationProblem<1> for FilmProblem {
    type Input = f64;
    type Output = FilmPoint;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([input - self.reynolds_per_coefficient * output.coefficient])
    }
}

pub(super) fn solve(
    model: &FilmModel,
    problem: &FilmProblem,
    config: &FilmConfig,
) -> Result<FilmPoint, ThermalError> {
    let solution = bisection::solve(
        model,
        problem,
        config.reynolds_bracket,
        &config.bisection(),
        |_: &bisection::Event<'_, _, _>| None,
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(Infeasibility::FilmSolution {
            reason: format!(
                "film Reynolds number not converged after {} iterations (residual {:.3e})",
                solution.iters, solution.residual
            ),
        }
        .into());
    }

    Ok(solution.snapshot.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn solve_for(reynolds_per_coefficient: f64) -> FilmPoint {
        let model = FilmModel {
            prandtl: 1.75,
            coefficient_scale: 0.68 / 2.9e-5,
        };
        let problem = FilmProblem {
            reynolds_per_coefficient,
        };
        solve(&model, &problem, &FilmConfig::default()).unwrap()
    }

    #[test]
    fn solution_satisfies_the_film_balance() {
        for scale in [1e-5, 1e-3, 1.0] {
            let point = solve_for(scale);
            let implied = scale * point.coefficient;
            assert_relative_eq!(point.reynolds, implied, max_relative = 1e-6);
        }
    }

    #[test]
    fn laminar_solution_matches_closed_form() {
        // Re = c·1.47·s·Re^(-1/3)  =>  Re = (1.47·c·s)^(3/4)
        let c = 1e-5;
        let s = 0.68 / 2.9e-5;
        let point = solve_for(c);

        assert_eq!(point.regime, FilmRegime::Laminar);
        assert_relative_eq!(point.reynolds, (1.47 * c * s).powf(0.75), max_relative = 1e-6);
    }

    #[test]
    fn larger_driving_force_reaches_turbulence() {
        assert_eq!(solve_for(1.0).regime, FilmRegime::Turbulent);
    }

    #[test]
    fn unbracketed_root_is_infeasible() {
        let model = FilmModel {
            prandtl: 1.75,
            coefficient_scale: 1.0,
        };
        let problem = FilmProblem {
            reynolds_per_coefficient: 1.0,
        };
        let config = FilmConfig {
            reynolds_bracket: [1e6, 1e7],
            ..FilmConfig::default()
        };
        let error = solve(&model, &problem, &config).unwrap_err();
        assert!(matches!(
            error,
            ThermalError::Infeasible(Infeasibility::FilmSolution { .. })
        ));
    }
}

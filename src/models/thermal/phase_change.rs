//! Film condensation and nucleate pool boiling.

pub(crate) mod core;

use twine_core::Model;

use crate::{models::ThermalError, support::thermo::PropertyProvider};

pub use self::core::{
    Boiling, Condensation, FilmConfig, FilmRegime, HorizontalTube, PhaseChangeProblem,
    PhaseChangeSolution, PoolBoiling, PoolBoilingConfig, ProblemKind, TubeInTube,
    UnknownProblemKind, VerticalPlate, VerticalPlateHeight,
};

/// Solves a [`PhaseChangeProblem`] against a property provider.
#[derive(Debug, Clone, Default)]
pub struct PhaseChange<P> {
    provider: P,
    film: FilmConfig,
    boiling: PoolBoilingConfig,
}

impl<P: PropertyProvider> PhaseChange<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            film: FilmConfig::default(),
            boiling: PoolBoilingConfig::default(),
        }
    }

    #[must_use]
    pub fn with_film_config(mut self, config: FilmConfig) -> Self {
        self.film = config;
        self
    }

    #[must_use]
    pub fn with_boiling_config(mut self, config: PoolBoilingConfig) -> Self {
        self.boiling = config;
        self
    }
}

impl<P: PropertyProvider> Model for PhaseChange<P> {
    type Input = PhaseChangeProblem;
    type Output = PhaseChangeSolution;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::solve(input, &self.film, &self.boiling, &self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        heat_flux_density::watt_per_square_meter, mass_rate::kilogram_per_second, power::watt,
    };

    use crate::support::{fields::Fields, thermo::model::TabulatedWater, units::UnitSystem};

    fn pool_problem() -> PhaseChangeProblem {
        let fields = Fields::new()
            .with("Surface Temperature", "110")
            .with("Diameter", "0.005")
            .with("Length", "0.5");
        PhaseChangeProblem::from_fields(ProblemKind::PoolBoiling, &fields, UnitSystem::Si).unwrap()
    }

    #[test]
    fn pool_boiling_through_the_model() {
        let solution = PhaseChange::new(TabulatedWater).call(&pool_problem()).unwrap();
        let PhaseChangeSolution::Boiling(boiling) = solution else {
            panic!("expected a boiling result");
        };
        assert!(boiling.power.get::<watt>() > 0.0);
        assert!(!boiling.exceeds_critical_heat_flux);
        assert_eq!(solution.labeled(UnitSystem::Si).len(), 4);
    }

    #[test]
    fn boiling_config_is_applied() {
        let rough = PoolBoilingConfig {
            surface_factor: 0.026,
            ..PoolBoilingConfig::default()
        };
        let base = PhaseChange::new(TabulatedWater).call(&pool_problem()).unwrap();
        let scaled = PhaseChange::new(TabulatedWater)
            .with_boiling_config(rough)
            .call(&pool_problem())
            .unwrap();

        let flux = |s: PhaseChangeSolution| match s {
            PhaseChangeSolution::Boiling(b) => b.heat_flux.get::<watt_per_square_meter>(),
            PhaseChangeSolution::Condensation(_) => f64::NAN,
        };
        approx::assert_relative_eq!(flux(base) / flux(scaled), 8.0, max_relative = 1e-9);
    }

    #[test]
    fn condensation_on_a_tube_through_the_model() {
        let fields = Fields::new()
            .with("Surface Temperature", "80")
            .with("Outer Diameter", "0.025")
            .with("Length", "1")
            .with("Tubes per Column", "4");
        let problem =
            PhaseChangeProblem::from_fields(ProblemKind::HorizontalTube, &fields, UnitSystem::Si)
                .unwrap();

        let solution = PhaseChange::new(TabulatedWater)
            .with_film_config(FilmConfig::default())
            .call(&problem)
            .unwrap();
        let PhaseChangeSolution::Condensation(c) = solution else {
            panic!("expected a condensation result");
        };
        assert!(c.condensate_rate.get::<kilogram_per_second>() > 0.0);
        assert_eq!(c.regime, Some(FilmRegime::Laminar));
    }
}

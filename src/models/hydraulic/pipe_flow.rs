//! Pressure drop through a straight catalog pipe.

pub(crate) mod core;

use twine_core::Model;

use crate::{models::ThermalError, support::thermo::PropertyProvider};

pub use self::core::{PipeFlowConfig, PipeFlowInput, PipeFlowSolution, PipeRun};

/// Rates the frictional pressure drop of a [`PipeRun`].
#[derive(Debug, Clone, Default)]
pub struct PipeFlow<P> {
    provider: P,
    config: PipeFlowConfig,
}

impl<P: PropertyProvider> PipeFlow<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: PipeFlowConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PipeFlowConfig) -> Self {
        self.config = config;
        self
    }
}

impl<P: PropertyProvider> Model for PipeFlow<P> {
    type Input = PipeFlowInput;
    type Output = PipeFlowSolution;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::solve(input, &self.config, &self.provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::pressure::pascal;

    use crate::support::{
        fields::Fields, geometry::StandardCatalog, thermo::model::TabulatedWater,
        units::UnitSystem,
    };

    #[test]
    fn imperial_fields_through_the_model() -> Result<(), ThermalError> {
        let fields = Fields::new()
            .with("Material", "Copper Type L")
            .with("Nominal Diameter", "1-1/2")
            .with("Length", "100")
            .with("Fluid", "Water")
            .with("Temperature", "68")
            .with("Volumetric Flow Rate", "0.05");
        let input = PipeFlowInput::from_fields(&fields, UnitSystem::Imperial, &StandardCatalog)?;

        let model = PipeFlow::new(TabulatedWater);
        let solution = model.call(&input)?;

        assert!(solution.pressure_drop.get::<pascal>() > 0.0);
        assert_eq!(solution, model.call(&input)?);

        let labeled = solution.labeled(UnitSystem::Imperial);
        assert_eq!(labeled.last().map(|l| l.unit), Some("psi"));
        Ok(())
    }
}

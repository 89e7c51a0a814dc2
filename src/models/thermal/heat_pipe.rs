//! Capillary heat pipe transport limits.

pub(crate) mod core;

use twine_core::Model;

use crate::{models::ThermalError, support::thermo::PropertyProvider};

pub use self::core::{
    HeatPipeConfig, HeatPipeGeometry, HeatPipeInput, HeatPipeLimits, HeatPipeSolution,
    ScreenWick, TransportLimit, UnknownWickMaterial, WickMaterial,
};

/// Evaluates the capillary, sonic, entrainment, and boiling limits.
#[derive(Debug, Clone, Default)]
pub struct HeatPipe<P> {
    provider: P,
    config: HeatPipeConfig,
}

impl<P: PropertyProvider> HeatPipe<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: HeatPipeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: HeatPipeConfig) -> Self {
        self.config = config;
        self
    }
}

impl<P: PropertyProvider> Model for HeatPipe<P> {
    type Input = HeatPipeInput;
    type Output = HeatPipeSolution;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self::core::solve(input, &self.config, &self.provider)
    }
}

//! One-shell-pass, multi-tube-pass exchanger model.

use twine_core::Model;

use crate::{models::ThermalError, support::thermo::PropertyProvider};

use super::core::shell_and_tube::solve;

pub use super::core::shell_and_tube::{
    ShellAndTubeConfig, ShellAndTubeGeometry, ShellAndTubeInput, ShellAndTubeSolution,
};

/// Rates a shell-and-tube exchanger with a catalog bundle.
#[derive(Debug, Clone, Default)]
pub struct ShellAndTube<P> {
    provider: P,
    config: ShellAndTubeConfig,
}

impl<P: PropertyProvider> ShellAndTube<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: ShellAndTubeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ShellAndTubeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &ShellAndTubeConfig {
        &self.config
    }
}

impl<P: PropertyProvider> Model for ShellAndTube<P> {
    type Input = ShellAndTubeInput;
    type Output = ShellAndTubeSolution;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        solve(input, &self.config, &self.provider)
    }
}

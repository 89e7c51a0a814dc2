//! Gasketed plate-and-frame exchanger model.

use twine_core::Model;

use crate::{models::ThermalError, support::thermo::PropertyProvider};

use super::core::plate_frame::solve;

pub use super::core::plate_frame::{
    ChannelSplit, PlateFrameConfig, PlateFrameGeometry, PlateFrameInput, PlateFrameSolution,
};

/// Rates a plate pack with alternating hot and cold channels.
#[derive(Debug, Clone, Default)]
pub struct PlateFrame<P> {
    provider: P,
    config: PlateFrameConfig,
}

impl<P: PropertyProvider> PlateFrame<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: PlateFrameConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PlateFrameConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &PlateFrameConfig {
        &self.config
    }
}

impl<P: PropertyProvider> Model for PlateFrame<P> {
    type Input = PlateFrameInput;
    type Output = PlateFrameSolution;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        solve(input, &self.config, &self.provider)
    }
}

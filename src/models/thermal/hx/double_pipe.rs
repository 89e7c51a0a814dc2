//! Double-pipe (concentric tube) exchanger model.

use twine_core::Model;

use crate::{models::ThermalError, support::thermo::PropertyProvider};

use super::core::double_pipe::solve;

pub use super::core::double_pipe::{
    DoublePipeConfig, DoublePipeFlow, DoublePipeGeometry, DoublePipeInput, DoublePipeSolution,
};

/// Rates a double-pipe exchanger.
///
/// # Example
///
/// ```
/// use thermal_hx::{
///     models::thermal::hx::{
///         DoublePipe, FlowRate, FluidStream,
///         double_pipe::{DoublePipeFlow, DoublePipeGeometry, DoublePipeInput},
///     },
///     support::{
///         geometry::{InchSize, PipeKey, Schedule, StandardCatalog},
///         thermo::{Fluid, model::TabulatedWater},
///     },
/// };
/// use twine_core::Model;
/// use uom::si::{
///     f64::{Length, MassRate, Pressure, ThermodynamicTemperature},
///     length::meter,
///     mass_rate::kilogram_per_second,
///     pressure::atmosphere,
///     thermodynamic_temperature::degree_celsius,
/// };
///
/// let geometry = DoublePipeGeometry::from_catalog(
///     &StandardCatalog,
///     &PipeKey::steel(InchSize::fraction(2, 0, 1), Schedule::Sch40),
///     &PipeKey::steel(InchSize::fraction(3, 0, 1), Schedule::Sch40),
///     Length::new::<meter>(3.0),
/// )?;
/// let stream = |t: f64, m: f64| {
///     FluidStream::new(
///         Fluid::Water,
///         ThermodynamicTemperature::new::<degree_celsius>(t),
///         FlowRate::Mass(MassRate::new::<kilogram_per_second>(m)),
///     )
/// };
/// let input = DoublePipeInput {
///     geometry,
///     hot: stream(90.0, 0.5),
///     cold: stream(20.0, 0.3),
///     flow: DoublePipeFlow::Counter,
///     pressure: Pressure::new::<atmosphere>(1.0),
/// };
///
/// let solution = DoublePipe::new(TabulatedWater).call(&input)?;
/// assert!(solution.hot.outlet_temperature < input.hot.inlet_temperature);
/// # Ok::<(), thermal_hx::models::ThermalError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DoublePipe<P> {
    provider: P,
    config: DoublePipeConfig,
}

impl<P: PropertyProvider> DoublePipe<P> {
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: DoublePipeConfig::default(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DoublePipeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn config(&self) -> &DoublePipeConfig {
        &self.config
    }
}

impl<P: PropertyProvider> Model for DoublePipe<P> {
    type Input = DoublePipeInput;
    type Output = DoublePipeSolution;
    type Error = ThermalError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        solve(input, &self.config, &self.provider)
    }
}

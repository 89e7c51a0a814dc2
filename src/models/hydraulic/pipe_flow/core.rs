//! Frictional pressure drop along a catalog pipe.
//!
//! Laminar runs use `64/Re` directly. Turbulent runs start from Haaland and
//! iterate Colebrook to the configured tolerance.

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{Length, MassDensity, Pressure, ThermodynamicTemperature, Velocity, VolumeRate},
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::{atmosphere, pascal},
    velocity::meter_per_second,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{
        constraint::StrictlyPositive,
        convergence::{Convergence, ConvergenceConfig, RelativeChange, Trace, iterate},
        correlation::{FlowRegime, TransitionReynolds, colebrook_step, darcy, reynolds},
        fields::Fields,
        geometry::{GeometryCatalog, PipeDimensions, PipeKey, PipeSpec},
        thermo::{Fluid, PropertyProvider},
        units::{Labeled, QuantityKind, UnitSystem},
    },
};

/// Flow areas at or below this, in m², are treated as closed.
const MIN_FLOW_AREA: f64 = 1e-9;

/// A straight run of catalog pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeRun {
    pub key: PipeKey,
    pub dimensions: PipeDimensions,
    pub length: Length,
}

impl PipeRun {
    /// Resolves `key` against `catalog`.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the catalog has no such pipe.
    pub fn from_catalog(
        catalog: &impl GeometryCatalog,
        key: PipeKey,
        length: Length,
    ) -> Result<Self, ThermalError> {
        Ok(Self {
            key,
            dimensions: catalog.pipe(&key)?,
            length,
        })
    }

    /// Absolute roughness of the pipe material.
    #[must_use]
    pub fn roughness(&self) -> Length {
        self.key.spec.material().roughness()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeFlowInput {
    pub run: PipeRun,
    pub fluid: Fluid,
    pub temperature: ThermodynamicTemperature,
    pub pressure: Pressure,
    pub volume_rate: VolumeRate,
}

impl PipeFlowInput {
    /// Builds an input from flat named fields.
    ///
    /// `Material` names a steel schedule or copper type (`Steel Sch 40`,
    /// `Copper Type L`). `Pressure` defaults to one atmosphere.
    ///
    /// # Errors
    ///
    /// Returns an input error for missing or malformed fields, or a lookup
    /// error if the pipe is not in the catalog.
    pub fn from_fields(
        fields: &Fields,
        units: UnitSystem,
        catalog: &impl GeometryCatalog,
    ) -> Result<Self, ThermalError> {
        let key = PipeKey {
            nominal: fields.option("Nominal Diameter")?,
            spec: fields.option::<PipeSpec>("Material")?,
        };
        let run = PipeRun::from_catalog(catalog, key, units.length(fields.positive("Length")?))?;

        Ok(Self {
            run,
            fluid: fields.option("Fluid")?,
            temperature: units.temperature(fields.number("Temperature")?),
            pressure: fields
                .optional_positive("Pressure")?
                .map_or(Pressure::new::<atmosphere>(1.0), |p| units.pressure(p)),
            volume_rate: units.volume_rate(fields.positive("Volumetric Flow Rate")?),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeFlowConfig {
    pub convergence: ConvergenceConfig,
    pub transition: TransitionReynolds,
}

impl Default for PipeFlowConfig {
    fn default() -> Self {
        Self {
            convergence: ConvergenceConfig::new(100, 5e-3),
            transition: TransitionReynolds::PIPE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeFlowSolution {
    pub velocity: Velocity,
    pub density: MassDensity,
    pub reynolds: f64,
    pub regime: FlowRegime,
    /// Darcy friction factor.
    pub friction_factor: f64,
    pub pressure_drop: Pressure,
    /// Direct for laminar runs.
    pub convergence: Convergence,
    /// Friction factor at each Colebrook step, when requested.
    pub trace: Option<Trace<f64>>,
}

impl PipeFlowSolution {
    #[must_use]
    pub fn labeled(&self, units: UnitSystem) -> Vec<Labeled> {
        vec![
            units.label(
                "Velocity",
                QuantityKind::Velocity,
                self.velocity.get::<meter_per_second>(),
            ),
            units.label("Reynolds Number", QuantityKind::Dimensionless, self.reynolds),
            units.label("Friction Factor", QuantityKind::Dimensionless, self.friction_factor),
            units.label(
                "Pressure Drop",
                QuantityKind::Pressure,
                self.pressure_drop.get::<pascal>(),
            ),
        ]
    }
}

pub(crate) fn solve(
    input: &PipeFlowInput,
    config: &PipeFlowConfig,
    provider: &impl PropertyProvider,
) -> Result<PipeFlowSolution, ThermalError> {
    let area = input.run.dimensions.flow_area();
    if area.get::<square_meter>() <= MIN_FLOW_AREA {
        return Err(Infeasibility::degenerate(format!("{} has no flow area", input.run.key)).into());
    }
    let volume_rate = StrictlyPositive::new(input.volume_rate)?.into_inner();

    let state = provider.state_at(input.fluid, input.temperature, input.pressure)?;
    let diameter = input.run.dimensions.inner_diameter;
    let velocity: Velocity = volume_rate / area;
    let reynolds = reynolds(state.density, velocity, diameter, state.viscosity);
    let d = diameter.get::<meter>();
    let v = velocity.get::<meter_per_second>();
    let rho = state.density.get::<kilogram_per_cubic_meter>();
    let relative_roughness = input.run.roughness().get::<meter>() / d;

    let seed = darcy(reynolds, relative_roughness, config.transition)?;
    debug!(run = %input.run.key, reynolds, regime = %seed.regime, "pipe flow");

    let (friction_factor, convergence, trace) = match seed.regime {
        FlowRegime::Laminar => (seed.value, Convergence::direct(), None),
        FlowRegime::Turbulent => {
            let colebrook = iterate(
                &config.convergence,
                seed.value,
                &RelativeChange,
                |f: &f64| {
                    Ok::<_, ThermalError>((colebrook_step(*f, reynolds, relative_roughness), ()))
                },
            )?;
            (colebrook.guess, colebrook.convergence, colebrook.trace)
        }
    };

    let length = input.run.length.get::<meter>();
    let pressure_drop = friction_factor * (length / d) * rho * v * v / 2.0;

    Ok(PipeFlowSolution {
        velocity,
        density: state.density,
        reynolds,
        regime: seed.regime,
        friction_factor,
        pressure_drop: Pressure::new::<pascal>(pressure_drop),
        convergence,
        trace,
    })
}

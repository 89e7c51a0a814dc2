//! Film condensation and nucleate pool boiling on simple surfaces.
//!
//! Every problem except [`VerticalPlateHeight`] is a single closed-form
//! evaluation. That one solves its film Reynolds number by bisection because
//! the correlation depends on the regime, and the regime on the result.

mod boiling;
mod condensation;
mod film_reynolds;

use std::{fmt, str::FromStr};

use tracing::debug;
use twine_solvers::equation::bisection;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{
        Acceleration, HeatFluxDensity, HeatTransfer, Length, MassRate, Power, Pressure,
        ThermalConductivity, ThermodynamicTemperature,
    },
    heat_flux_density::watt_per_square_meter,
    heat_transfer::watt_per_square_meter_kelvin,
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::atmosphere,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::ThermalError,
    support::{
        fields::{FieldError, Fields},
        thermo::{Fluid, PropertyProvider},
        units::{Labeled, QuantityKind, SpecificEnthalpy, UnitSystem},
    },
};

pub use condensation::FilmRegime;

/// Condensation on a vertical plate of known length and width.
///
/// The saturation temperature is given directly. The latent heat comes from
/// the provider at that temperature unless supplied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPlate {
    pub fluid: Fluid,
    pub surface_temperature: ThermodynamicTemperature,
    pub saturation_temperature: ThermodynamicTemperature,
    /// Height in the direction of condensate drainage.
    pub length: Length,
    pub width: Length,
    pub latent_heat: Option<SpecificEnthalpy>,
}

/// Condensation on a vertical plate at a given vapor pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPlateHeight {
    pub fluid: Fluid,
    pub surface_temperature: ThermodynamicTemperature,
    pub height: Length,
    pub width: Length,
    pub pressure: Pressure,
}

/// Condensation on the outside of a horizontal tube or a vertical column of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalTube {
    pub fluid: Fluid,
    pub surface_temperature: ThermodynamicTemperature,
    pub outer_diameter: Length,
    pub length: Length,
    pub pressure: Pressure,
    /// Tubes stacked in one vertical column; one for a single tube.
    pub tubes_per_column: u32,
}

/// Condensation on a tube with known film coefficients on both sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeInTube {
    pub fluid: Fluid,
    pub coolant_temperature: ThermodynamicTemperature,
    pub outer_diameter: Length,
    pub inner_diameter: Length,
    /// Condensing side.
    pub outer_coefficient: HeatTransfer,
    /// Coolant side.
    pub inner_coefficient: HeatTransfer,
    pub pressure: Pressure,
    pub length: Length,
    /// Falls back to [`FilmConfig::wall_conductivity`].
    pub wall_conductivity: Option<ThermalConductivity>,
}

/// Nucleate boiling from a horizontal cylindrical heating element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolBoiling {
    pub fluid: Fluid,
    pub surface_temperature: ThermodynamicTemperature,
    pub diameter: Length,
    pub length: Length,
    pub pressure: Pressure,
}

/// A phase-change problem, tagged by surface and mechanism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseChangeProblem {
    VerticalPlate(VerticalPlate),
    VerticalPlateHeight(VerticalPlateHeight),
    HorizontalTube(HorizontalTube),
    TubeInTube(TubeInTube),
    PoolBoiling(PoolBoiling),
}

/// Names of the [`PhaseChangeProblem`] variants, as presented to users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemKind {
    VerticalPlate,
    VerticalPlateHeight,
    HorizontalTube,
    TubeInTube,
    PoolBoiling,
}

impl ProblemKind {
    pub const ALL: [ProblemKind; 5] = [
        Self::VerticalPlate,
        Self::VerticalPlateHeight,
        Self::HorizontalTube,
        Self::TubeInTube,
        Self::PoolBoiling,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::VerticalPlate => "Vertical Plate (L & W)",
            Self::VerticalPlateHeight => "Vertical Plate (H)",
            Self::HorizontalTube => "Horizontal Tube (OD)",
            Self::TubeInTube => "Horizontal Tube (OD & ID)",
            Self::PoolBoiling => "Circular Heating Element",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a problem type name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown phase-change problem: {0:?}")]
pub struct UnknownProblemKind(pub String);

impl FromStr for ProblemKind {
    type Err = UnknownProblemKind;

    /// Accepts the display names, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownProblemKind(s.to_owned()))
    }
}

impl PhaseChangeProblem {
    #[must_use]
    pub fn kind(&self) -> ProblemKind {
        match self {
            Self::VerticalPlate(_) => ProblemKind::VerticalPlate,
            Self::VerticalPlateHeight(_) => ProblemKind::VerticalPlateHeight,
            Self::HorizontalTube(_) => ProblemKind::HorizontalTube,
            Self::TubeInTube(_) => ProblemKind::TubeInTube,
            Self::PoolBoiling(_) => ProblemKind::PoolBoiling,
        }
    }

    /// Builds a problem of `kind` from flat named fields.
    ///
    /// `Fluid` is optional and defaults to water. `Pressure` defaults to one
    /// atmosphere wherever a problem needs it.
    ///
    /// # Errors
    ///
    /// Returns an input error for missing or malformed fields.
    pub fn from_fields(
        kind: ProblemKind,
        fields: &Fields,
        units: UnitSystem,
    ) -> Result<Self, ThermalError> {
        let fluid = fields.optional_option("Fluid")?.unwrap_or(Fluid::Water);
        let temperature = |field: &'static str| -> Result<_, FieldError> {
            Ok(units.temperature(fields.number(field)?))
        };
        let length = |field: &'static str| -> Result<_, FieldError> {
            Ok(units.length(fields.positive(field)?))
        };
        let diameter = |field: &'static str| -> Result<_, FieldError> {
            Ok(units.diameter(fields.positive(field)?))
        };
        let pressure = fields
            .optional_positive("Pressure")?
            .map_or(Pressure::new::<atmosphere>(1.0), |p| units.pressure(p));

        let problem = match kind {
            ProblemKind::VerticalPlate => Self::VerticalPlate(VerticalPlate {
                fluid,
                surface_temperature: temperature("Surface Temperature")?,
                saturation_temperature: temperature("Saturation Temperature")?,
                length: length("Length")?,
                width: length("Width")?,
                latent_heat: fields
                    .optional_positive("Latent Heat")?
                    .map(|h| units.specific_energy(h)),
            }),
            ProblemKind::VerticalPlateHeight => Self::VerticalPlateHeight(VerticalPlateHeight {
                fluid,
                surface_temperature: temperature("Surface Temperature")?,
                height: length("Height")?,
                width: length("Width")?,
                pressure,
            }),
            ProblemKind::HorizontalTube => Self::HorizontalTube(HorizontalTube {
                fluid,
                surface_temperature: temperature("Surface Temperature")?,
                outer_diameter: diameter("Outer Diameter")?,
                length: length("Length")?,
                pressure,
                tubes_per_column: match fields.get("Tubes per Column") {
                    Some(_) => fields.count("Tubes per Column")?,
                    None => 1,
                },
            }),
            ProblemKind::TubeInTube => Self::TubeInTube(TubeInTube {
                fluid,
                coolant_temperature: temperature("Coolant Temperature")?,
                outer_diameter: diameter("Outer Diameter")?,
                inner_diameter: diameter("Inner Diameter")?,
                outer_coefficient: units.heat_transfer(fields.positive("Outer Coefficient")?),
                inner_coefficient: units.heat_transfer(fields.positive("Inner Coefficient")?),
                pressure,
                length: length("Length")?,
                wall_conductivity: fields
                    .optional_positive("Wall Conductivity")?
                    .map(|k| units.thermal_conductivity(k)),
            }),
            ProblemKind::PoolBoiling => Self::PoolBoiling(PoolBoiling {
                fluid,
                surface_temperature: temperature("Surface Temperature")?,
                diameter: diameter("Diameter")?,
                length: length("Length")?,
                pressure,
            }),
        };
        Ok(problem)
    }
}

/// Settings for the condensation problems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilmConfig {
    pub gravity: Acceleration,
    /// Tube wall conductivity when a [`TubeInTube`] does not give one.
    pub wall_conductivity: ThermalConductivity,
    /// Film Reynolds numbers searched by the vertical-plate height solve.
    pub reynolds_bracket: [f64; 2],
    pub max_iters: usize,
    /// Relative width at which the Reynolds bracket counts as converged.
    pub reynolds_rel_tol: f64,
}

impl Default for FilmConfig {
    fn default() -> Self {
        Self {
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
            wall_conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(401.0),
            reynolds_bracket: [1e-3, 1e7],
            max_iters: 200,
            reynolds_rel_tol: 1e-10,
        }
    }
}

impl FilmConfig {
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: 0.0,
            x_rel_tol: self.reynolds_rel_tol,
            residual_tol: 1e-9,
        }
    }

    fn gravity(&self) -> f64 {
        self.gravity.get::<meter_per_second_squared>()
    }
}

/// Settings for nucleate pool boiling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolBoilingConfig {
    pub gravity: Acceleration,
    /// Rohsenow surface-fluid factor `Csf`.
    pub surface_factor: f64,
    /// Leading constant of the critical heat flux, `π/24` after Zuber.
    pub critical_flux_coefficient: f64,
}

impl Default for PoolBoilingConfig {
    fn default() -> Self {
        Self {
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
            surface_factor: 0.013,
            critical_flux_coefficient: std::f64::consts::PI / 24.0,
        }
    }
}

/// Condensation rate and coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condensation {
    pub saturation_temperature: ThermodynamicTemperature,
    /// Film coefficient, or the overall coefficient for a [`TubeInTube`].
    pub heat_transfer_coefficient: HeatTransfer,
    pub duty: Power,
    pub condensate_rate: MassRate,
    /// Latent heat the condensate rate is based on.
    pub latent_heat: SpecificEnthalpy,
    /// Absent when no film correlation is involved.
    pub regime: Option<FilmRegime>,
    pub film_reynolds: Option<f64>,
}

/// Nucleate boiling heat flux, with the critical flux for comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boiling {
    pub saturation_temperature: ThermodynamicTemperature,
    pub heat_flux: HeatFluxDensity,
    pub critical_heat_flux: HeatFluxDensity,
    /// The nucleate correlation is no longer valid past the critical flux.
    pub exceeds_critical_heat_flux: bool,
    pub power: Power,
    pub evaporation_rate: MassRate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseChangeSolution {
    Condensation(Condensation),
    Boiling(Boiling),
}

impl PhaseChangeSolution {
    /// Every reported value, labeled in `units`.
    #[must_use]
    pub fn labeled(&self, units: UnitSystem) -> Vec<Labeled> {
        match self {
            Self::Condensation(c) => {
                let mut out = vec![
                    units.label(
                        "Saturation Temperature",
                        QuantityKind::Temperature,
                        c.saturation_temperature.get::<kelvin>(),
                    ),
                    units.label(
                        "Heat Transfer Coefficient",
                        QuantityKind::HeatTransferCoefficient,
                        c.heat_transfer_coefficient
                            .get::<watt_per_square_meter_kelvin>(),
                    ),
                    units.label("Heat Transfer Rate", QuantityKind::Power, c.duty.get::<watt>()),
                    units.label(
                        "Condensation Rate",
                        QuantityKind::MassRate,
                        c.condensate_rate.get::<kilogram_per_second>(),
                    ),
                ];
                if let Some(re) = c.film_reynolds {
                    out.push(units.label("Film Reynolds Number", QuantityKind::Dimensionless, re));
                }
                out
            }
            Self::Boiling(b) => vec![
                units.label(
                    "Saturation Temperature",
                    QuantityKind::Temperature,
                    b.saturation_temperature.get::<kelvin>(),
                ),
                units.label("Power", QuantityKind::Power, b.power.get::<watt>()),
                units.label(
                    "Evaporation Rate",
                    QuantityKind::MassRate,
                    b.evaporation_rate.get::<kilogram_per_second>(),
                ),
                units.label(
                    "Critical Heat Flux Ratio",
                    QuantityKind::Dimensionless,
                    b.heat_flux.get::<watt_per_square_meter>()
                        / b.critical_heat_flux.get::<watt_per_square_meter>(),
                ),
            ],
        }
    }
}

pub(crate) fn solve(
    problem: &PhaseChangeProblem,
    film: &FilmConfig,
    boiling: &PoolBoilingConfig,
    provider: &impl PropertyProvider,
) -> Result<PhaseChangeSolution, ThermalError> {
    debug!(problem = %problem.kind(), "solving");
    match problem {
        PhaseChangeProblem::VerticalPlate(p) => {
            condensation::vertical_plate(p, film, provider).map(PhaseChangeSolution::Condensation)
        }
        PhaseChangeProblem::VerticalPlateHeight(p) => {
            condensation::vertical_plate_height(p, film, provider)
                .map(PhaseChangeSolution::Condensation)
        }
        PhaseChangeProblem::HorizontalTube(p) => {
            condensation::horizontal_tube(p, film, provider).map(PhaseChangeSolution::Condensation)
        }
        PhaseChangeProblem::TubeInTube(p) => {
            condensation::tube_in_tube(p, film, provider).map(PhaseChangeSolution::Condensation)
        }
        PhaseChangeProblem::PoolBoiling(p) => {
            boiling::pool_boiling(p, boiling, provider).map(PhaseChangeSolution::Boiling)
        }
    }
}

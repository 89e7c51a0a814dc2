//! Transport limits of a screen-wick capillary heat pipe.
//!
//! The four limits are independent closed-form evaluations at the operating
//! temperature. None is singled out as governing; callers take the minimum
//! from [`HeatPipeLimits::iter`].

mod limits;

use std::{f64::consts::PI, fmt, str::FromStr};

use uom::si::{
    acceleration::meter_per_second_squared,
    angle::degree,
    f64::{Acceleration, Angle, Length, Power, ThermalConductivity, ThermodynamicTemperature},
    length::meter,
    power::watt,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{
        constraint::UnitInterval,
        correlation::{FlowRegime, TransitionReynolds},
        fields::{FieldError, Fields},
        thermo::{Fluid, PropertyProvider},
        units::{Labeled, QuantityKind, UnitSystem},
    },
};

/// Solid the screen is woven from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WickMaterial {
    Copper,
    StainlessSteel,
    SinteredNickel,
}

impl WickMaterial {
    #[must_use]
    pub fn conductivity(self) -> ThermalConductivity {
        let k = match self {
            Self::Copper => 401.0,
            Self::StainlessSteel => 14.9,
            Self::SinteredNickel => 90.7,
        };
        ThermalConductivity::new::<watt_per_meter_kelvin>(k)
    }
}

impl fmt::Display for WickMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Copper => "Copper",
            Self::StainlessSteel => "Stainless Steel",
            Self::SinteredNickel => "Sintered Nickel",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown wick material: {0:?}")]
pub struct UnknownWickMaterial(pub String);

impl FromStr for WickMaterial {
    type Err = UnknownWickMaterial;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "copper" | "cu" => Ok(Self::Copper),
            "stainlesssteel" | "stainless" | "ss" => Ok(Self::StainlessSteel),
            "sinterednickel" | "nickel" | "ni" => Ok(Self::SinteredNickel),
            _ => Err(UnknownWickMaterial(s.to_owned())),
        }
    }
}

/// Woven screen lining the pipe wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenWick {
    pub material: WickMaterial,
    /// Wires per unit length, in 1/m.
    pub mesh_number: f64,
    pub wire_diameter: Length,
    pub layers: u32,
    /// Overrides the porosity derived from mesh and wire.
    ///
    /// Pin this when comparing meshes, since the derived porosity falls with
    /// finer mesh and drags the permeability down with it.
    pub porosity: Option<f64>,
    /// Nucleation cavity radius. Defaults to a fraction of the pore radius,
    /// see [`HeatPipeConfig::cavity_fraction`].
    pub cavity_radius: Option<Length>,
}

impl ScreenWick {
    pub const DEFAULT_LAYERS: u32 = 3;

    /// A stainless screen of the default layer count.
    #[must_use]
    pub fn new(mesh_number: f64, wire_diameter: Length) -> Self {
        Self {
            material: WickMaterial::StainlessSteel,
            mesh_number,
            wire_diameter,
            layers: Self::DEFAULT_LAYERS,
            porosity: None,
            cavity_radius: None,
        }
    }

    #[must_use]
    pub fn with_material(mut self, material: WickMaterial) -> Self {
        self.material = material;
        self
    }

    #[must_use]
    pub fn with_porosity(mut self, porosity: f64) -> Self {
        self.porosity = Some(porosity);
        self
    }

    /// Two wire diameters per layer.
    #[must_use]
    pub fn thickness(&self) -> Length {
        self.wire_diameter * (2.0 * f64::from(self.layers))
    }

    /// Effective capillary radius `1/(2N)`, in m.
    #[must_use]
    pub fn pore_radius(&self) -> f64 {
        1.0 / (2.0 * self.mesh_number)
    }

    /// `1 − 1.05·π·N·d/4` unless overridden.
    #[must_use]
    pub fn porosity(&self) -> f64 {
        self.porosity.unwrap_or_else(|| {
            1.0 - 1.05 * PI * self.mesh_number * self.wire_diameter.get::<meter>() / 4.0
        })
    }

    /// Blake-Kozeny permeability `d²ε³/(122(1−ε)²)`, in m².
    #[must_use]
    pub fn permeability(&self) -> f64 {
        let d = self.wire_diameter.get::<meter>();
        let eps = self.porosity();
        d * d * eps.powi(3) / (122.0 * (1.0 - eps).powi(2))
    }
}

/// Section lengths, vapor core, and wick of a cylindrical heat pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPipeGeometry {
    pub evaporator_length: Length,
    pub adiabatic_length: Length,
    pub condenser_length: Length,
    pub vapor_diameter: Length,
    pub wick: ScreenWick,
    /// Elevation of the evaporator above the condenser.
    pub inclination: Angle,
}

impl HeatPipeGeometry {
    #[must_use]
    pub fn total_length(&self) -> Length {
        self.evaporator_length + self.adiabatic_length + self.condenser_length
    }

    /// `L_e/2 + L_a + L_c/2`
    #[must_use]
    pub fn effective_length(&self) -> Length {
        self.evaporator_length * 0.5 + self.adiabatic_length + self.condenser_length * 0.5
    }

    /// Wall diameter under the wick, `d_v + 2t`.
    #[must_use]
    pub fn inner_diameter(&self) -> Length {
        self.vapor_diameter + self.wick.thickness() * 2.0
    }

    /// Vapor core cross section, in m².
    #[must_use]
    pub fn vapor_area(&self) -> f64 {
        let d = self.vapor_diameter.get::<meter>();
        PI * d * d / 4.0
    }

    /// Wick annulus cross section, in m².
    #[must_use]
    pub fn wick_area(&self) -> f64 {
        let d_i = self.inner_diameter().get::<meter>();
        let d_v = self.vapor_diameter.get::<meter>();
        PI * (d_i * d_i - d_v * d_v) / 4.0
    }

    fn validate(&self) -> Result<(), Infeasibility> {
        let positive = [
            (self.evaporator_length, "evaporator length"),
            (self.condenser_length, "condenser length"),
            (self.vapor_diameter, "vapor core diameter"),
            (self.wick.wire_diameter, "wire diameter"),
        ];
        if let Some((_, what)) = positive.into_iter().find(|(l, _)| l.get::<meter>() <= 0.0) {
            return Err(Infeasibility::degenerate(format!("{what} is not positive")));
        }
        if self.adiabatic_length.get::<meter>() < 0.0 {
            return Err(Infeasibility::degenerate("adiabatic length is negative"));
        }
        if self.wick.mesh_number <= 0.0 || self.wick.layers == 0 {
            return Err(Infeasibility::degenerate("screen has no mesh or no layers"));
        }
        let eps = self.wick.porosity();
        if !(eps > 0.0 && eps < 1.0) {
            return Err(Infeasibility::degenerate(format!(
                "wick porosity {eps:.4} is outside (0, 1)"
            )));
        }
        Ok(())
    }
}

/// A heat pipe charged with `fluid`, running at `operating_temperature`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPipeInput {
    pub geometry: HeatPipeGeometry,
    pub fluid: Fluid,
    pub operating_temperature: ThermodynamicTemperature,
}

impl HeatPipeInput {
    /// Builds an input from flat named fields.
    ///
    /// `Wick Material` defaults to stainless steel, `Fluid` to water,
    /// `Wick Layers` to three, and `Inclination` (degrees) to horizontal.
    ///
    /// # Errors
    ///
    /// Returns an input error for missing or malformed fields.
    pub fn from_fields(fields: &Fields, units: UnitSystem) -> Result<Self, ThermalError> {
        let length = |field: &'static str| -> Result<Length, FieldError> {
            Ok(units.length(fields.positive(field)?))
        };
        let porosity = fields
            .optional_positive("Porosity")?
            .map(|p| UnitInterval::new(p).map(|p| p.into_inner()))
            .transpose()?;
        let layers = match fields.get("Wick Layers") {
            Some(_) => fields.count("Wick Layers")?,
            None => ScreenWick::DEFAULT_LAYERS,
        };

        let wick = ScreenWick {
            material: fields
                .optional_option("Wick Material")?
                .unwrap_or(WickMaterial::StainlessSteel),
            mesh_number: units.to_si(QuantityKind::MeshNumber, fields.positive("Mesh Number")?),
            wire_diameter: units.diameter(fields.positive("Wire Diameter")?),
            layers,
            porosity,
            cavity_radius: fields
                .optional_positive("Cavity Radius")?
                .map(|r| units.diameter(r)),
        };

        let geometry = HeatPipeGeometry {
            evaporator_length: length("Evaporator Length")?,
            adiabatic_length: units.length(fields.optional_number("Adiabatic Length")?.unwrap_or(0.0)),
            condenser_length: length("Condenser Length")?,
            vapor_diameter: units.diameter(fields.positive("Vapor Diameter")?),
            wick,
            inclination: Angle::new::<degree>(fields.optional_number("Inclination")?.unwrap_or(0.0)),
        };

        Ok(Self {
            geometry,
            fluid: fields.optional_option("Fluid")?.unwrap_or(Fluid::Water),
            operating_temperature: units.temperature(fields.number("Operating Temperature")?),
        })
    }
}

/// Settings for the limit evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPipeConfig {
    pub gravity: Acceleration,
    /// Cavity radius as a fraction of the pore radius, when the wick gives none.
    pub cavity_fraction: f64,
    /// Threshold for the vapor core regime check.
    pub vapor_transition: TransitionReynolds,
}

impl Default for HeatPipeConfig {
    fn default() -> Self {
        Self {
            gravity: Acceleration::new::<meter_per_second_squared>(9.81),
            cavity_fraction: 0.01,
            vapor_transition: TransitionReynolds::PIPE,
        }
    }
}

/// Names of the four transport limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportLimit {
    Capillary,
    Sonic,
    Entrainment,
    Boiling,
}

impl TransportLimit {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Capillary => "Capillary Limit",
            Self::Sonic => "Sonic Limit",
            Self::Entrainment => "Entrainment Limit",
            Self::Boiling => "Boiling Limit",
        }
    }
}

impl fmt::Display for TransportLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPipeLimits {
    pub capillary: Power,
    pub sonic: Power,
    pub entrainment: Power,
    pub boiling: Power,
}

impl HeatPipeLimits {
    /// Every limit with its name, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (TransportLimit, Power)> {
        [
            (TransportLimit::Capillary, self.capillary),
            (TransportLimit::Sonic, self.sonic),
            (TransportLimit::Entrainment, self.entrainment),
            (TransportLimit::Boiling, self.boiling),
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatPipeSolution {
    pub limits: HeatPipeLimits,
    /// Vapor core Reynolds number at the capillary limit.
    pub vapor_reynolds: f64,
    pub vapor_regime: FlowRegime,
    pub porosity: f64,
    /// m²
    pub permeability: f64,
    pub effective_length: Length,
}

impl HeatPipeSolution {
    #[must_use]
    pub fn labeled(&self, units: UnitSystem) -> Vec<Labeled> {
        let mut out: Vec<Labeled> = self
            .limits
            .iter()
            .map(|(limit, q)| units.label(limit.name(), QuantityKind::Power, q.get::<watt>()))
            .collect();
        out.push(units.label(
            "Vapor Reynolds Number",
            QuantityKind::Dimensionless,
            self.vapor_reynolds,
        ));
        out.push(units.label("Wick Porosity", QuantityKind::Dimensionless, self.porosity));
        out.push(units.label(
            "Effective Length",
            QuantityKind::Length,
            self.effective_length.get::<meter>(),
        ));
        out
    }
}

pub(crate) fn solve(
    input: &HeatPipeInput,
    config: &HeatPipeConfig,
    provider: &impl PropertyProvider,
) -> Result<HeatPipeSolution, ThermalError> {
    let geometry = &input.geometry;
    geometry.validate()?;

    let saturated = provider.saturation_at(input.fluid, input.operating_temperature)?;
    let limits = limits::evaluate(geometry, &saturated, config)?;
    let (vapor_reynolds, vapor_regime) =
        limits::vapor_check(geometry, &saturated, limits.capillary, config);

    Ok(HeatPipeSolution {
        limits,
        vapor_reynolds,
        vapor_regime,
        porosity: geometry.wick.porosity(),
        permeability: geometry.wick.permeability(),
        effective_length: geometry.effective_length(),
    })
}

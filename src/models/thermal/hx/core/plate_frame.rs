//! Gasketed plate-and-frame exchanger.
//!
//! Hot and cold streams alternate through the channels between `N` plates.
//! The outlets follow counter-flow with an empirical correction
//! `F = 1 − 0.0166·NTU` applied to the conductance.

use std::f64::consts::PI;

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{
        Area, HeatTransfer, Length, MassRate, Power, Pressure, TemperatureInterval,
        ThermalConductivity, ThermodynamicTemperature,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::{atmosphere, pascal},
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{
        convergence::{Convergence, ConvergenceConfig, Trace, iterate},
        correlation::{
            DuctKind, Heating, PlateBand, TransitionReynolds, plate_channel_friction,
        },
        fields::Fields,
        geometry::GeometryCatalog,
        hx::CapacitanceRate,
        thermo::{FluidState, PropertyProvider},
        units::{
            FoulingResistance, Labeled, QuantityKind, TemperatureDifference, UnitSystem,
            fouling_resistance,
        },
    },
};

use super::{
    film::{Duct, Film, dynamic_pressure},
    solution::{
        COLD_LABELS, FouledPerformance, HOT_LABELS, HeatBalance, RequiredSize, SideResult,
        check_inlets, counter_flow_ends, fouled_coefficient, lmtd, mass_rate_label,
        overall_labels,
    },
    routing::higher_conductance,
    streams::{COLD_FIELDS, FluidStream, HOT_FIELDS, MeanTemperatureChange, Outlets},
};

/// Loss coefficient on the port velocity head.
const PORT_LOSS_COEFFICIENT: f64 = 1.3;

/// Below this distance from one, `R` takes the balanced-flow limit.
const BALANCED: f64 = 1e-6;

/// Plate pack dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateFrameGeometry {
    pub width: Length,
    /// Flow length along each plate.
    pub height: Length,
    /// Gap between adjacent plates.
    pub spacing: Length,
    pub thickness: Length,
    pub plates: u32,
    pub conductivity: ThermalConductivity,
    /// Port diameter. Port losses are ignored when absent.
    pub port_diameter: Option<Length>,
}

impl Default for PlateFrameGeometry {
    /// A 0.6 m × 1 m pack of 15 stainless steel plates at 4.8 mm spacing.
    fn default() -> Self {
        Self {
            width: Length::new::<meter>(0.6),
            height: Length::new::<meter>(1.0),
            spacing: Length::new::<meter>(0.0048),
            thickness: Length::new::<meter>(0.001),
            plates: 15,
            conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(13.0),
            port_diameter: None,
        }
    }
}

impl PlateFrameGeometry {
    #[must_use]
    pub fn plate_area(&self) -> Area {
        self.width * self.height
    }

    /// Total transfer area `A·N`.
    #[must_use]
    pub fn transfer_area(&self) -> Area {
        f64::from(self.plates) * self.plate_area()
    }

    /// Cross section of one channel.
    #[must_use]
    pub fn channel_flow_area(&self) -> Area {
        self.spacing * self.width
    }

    /// `2s` for a wide parallel-plate channel.
    #[must_use]
    pub fn hydraulic_diameter(&self) -> Length {
        2.0 * self.spacing
    }

    fn validate(&self) -> Result<(), Infeasibility> {
        let positive = |l: Length| l.get::<meter>() > 0.0;
        if self.plates == 0 {
            return Err(Infeasibility::degenerate("plate pack has no plates"));
        }
        if !positive(self.width) || !positive(self.height) || !positive(self.spacing) {
            return Err(Infeasibility::degenerate("plate width, height, or spacing"));
        }
        if self.thickness.get::<meter>() < 0.0 {
            return Err(Infeasibility::degenerate("negative plate thickness"));
        }
        if self.conductivity.get::<watt_per_meter_kelvin>() <= 0.0 {
            return Err(Infeasibility::degenerate("plate conductivity"));
        }
        if self.port_diameter.is_some_and(|d| !positive(d)) {
            return Err(Infeasibility::degenerate("port diameter"));
        }
        Ok(())
    }

    fn duct(&self, channels: u32) -> Duct {
        Duct {
            kind: DuctKind::PlateChannel,
            flow_area: f64::from(channels) * self.channel_flow_area(),
            diameter: self.hydraulic_diameter(),
            length: self.height,
            transition: TransitionReynolds::PLATE,
        }
    }

    /// `t/k`, in m²·K/W.
    fn wall_resistance(&self) -> f64 {
        self.thickness.get::<meter>() / self.conductivity.get::<watt_per_meter_kelvin>()
    }

    /// Port velocity head, in pascals.
    fn port_loss(&self, state: &FluidState, mass_rate: MassRate) -> f64 {
        self.port_diameter.map_or(0.0, |d| {
            let d = d.get::<meter>();
            let rho = state.density.get::<kilogram_per_cubic_meter>();
            let v = mass_rate.get::<kilogram_per_second>() / (rho * PI * d * d / 4.0);
            PORT_LOSS_COEFFICIENT * rho * v * v / 2.0
        })
    }
}

/// Channels assigned to each stream.
///
/// With an odd plate count both streams get `(N+1)/2` channels. With an even
/// count the larger mass flow gets `(N+2)/2` and the other `N/2`, unless the
/// swapped split gives a higher `U`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelSplit {
    pub hot: u32,
    pub cold: u32,
}

impl ChannelSplit {
    #[must_use]
    pub fn new(plates: u32, hot_flow: MassRate, cold_flow: MassRate) -> Self {
        if plates % 2 == 1 {
            let each = plates.div_ceil(2);
            return Self {
                hot: each,
                cold: each,
            };
        }
        let (more, fewer) = (plates / 2 + 1, plates / 2);
        if hot_flow > cold_flow {
            Self {
                hot: more,
                cold: fewer,
            }
        } else {
            Self {
                hot: fewer,
                cold: more,
            }
        }
    }

    /// The split with the channel counts exchanged, if they differ.
    #[must_use]
    pub fn swapped(self) -> Option<Self> {
        (self.hot != self.cold).then_some(Self {
            hot: self.cold,
            cold: self.hot,
        })
    }
}

/// A plate-and-frame rating problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateFrameInput {
    pub geometry: PlateFrameGeometry,
    pub hot: FluidStream,
    pub cold: FluidStream,
    pub pressure: Pressure,
}

impl PlateFrameInput {
    /// Builds an input from flat named fields.
    ///
    /// Every geometry field is optional and falls back to
    /// [`PlateFrameGeometry::default`]. The catalog is not consulted.
    ///
    /// # Errors
    ///
    /// Returns an input error for missing or malformed fields.
    pub fn from_fields(
        fields: &Fields,
        units: UnitSystem,
        _catalog: &impl GeometryCatalog,
    ) -> Result<Self, ThermalError> {
        let mut geometry = PlateFrameGeometry::default();
        if fields.get("Number of Plates").is_some() {
            geometry.plates = fields.count("Number of Plates")?;
        }
        if let Some(l) = fields.optional_positive("Plate Length")? {
            geometry.height = units.length(l);
        }
        if let Some(w) = fields.optional_positive("Plate Width")? {
            geometry.width = units.length(w);
        }
        if let Some(s) = fields.optional_positive("Plate Spacing")? {
            geometry.spacing = units.diameter(s);
        }
        if let Some(t) = fields.optional_positive("Plate Thickness")? {
            geometry.thickness = units.diameter(t);
        }
        if let Some(k) = fields.optional_positive("Plate Conductivity")? {
            geometry.conductivity = units.thermal_conductivity(k);
        }
        geometry.port_diameter = fields
            .optional_positive("Port Diameter")?
            .map(|d| units.diameter(d));

        Ok(Self {
            geometry,
            hot: FluidStream::from_fields(fields, &HOT_FIELDS, units)?,
            cold: FluidStream::from_fields(fields, &COLD_FIELDS, units)?,
            pressure: fields
                .optional_positive("Pressure")?
                .map_or(Pressure::new::<atmosphere>(1.0), |p| units.pressure(p)),
        })
    }
}

/// Solver settings for [`PlateFrameInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateFrameConfig {
    pub convergence: ConvergenceConfig,
    pub hot_fouling: FoulingResistance,
    pub cold_fouling: FoulingResistance,
}

impl Default for PlateFrameConfig {
    fn default() -> Self {
        Self {
            convergence: ConvergenceConfig::new(100, 5e-4),
            hot_fouling: fouling_resistance(3.52e-6),
            cold_fouling: fouling_resistance(3.52e-6),
        }
    }
}

/// Converged plate-and-frame performance.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateFrameSolution {
    pub channels: ChannelSplit,
    pub hot: SideResult,
    pub cold: SideResult,
    pub hot_band: PlateBand,
    pub cold_band: PlateBand,
    pub overall_coefficient: HeatTransfer,
    /// Total transfer area `A·N`.
    pub area: Area,
    pub duty: Power,
    /// `U·A·N/C_min`.
    pub ntu: f64,
    pub correction_factor: f64,
    pub lmtd: TemperatureInterval,
    pub balance: HeatBalance,
    pub fouled: FouledPerformance,
    pub convergence: Convergence,
    pub trace: Option<Trace<Outlets>>,
}

impl PlateFrameSolution {
    /// Every reported value, labeled in `units`.
    #[must_use]
    pub fn labeled(&self, units: UnitSystem) -> Vec<Labeled> {
        let mut out = Vec::with_capacity(24);
        out.extend(overall_labels(
            units,
            self.overall_coefficient,
            self.duty,
            self.lmtd,
            &self.balance,
        ));
        out.push(units.label(
            "Area",
            QuantityKind::Area,
            self.area.get::<square_meter>(),
        ));
        out.push(units.label("NTU", QuantityKind::Dimensionless, self.ntu));
        out.push(units.label(
            "Correction Factor",
            QuantityKind::Dimensionless,
            self.correction_factor,
        ));
        out.push(units.label(
            "Hot Channels",
            QuantityKind::Dimensionless,
            f64::from(self.channels.hot),
        ));
        out.push(units.label(
            "Cold Channels",
            QuantityKind::Dimensionless,
            f64::from(self.channels.cold),
        ));
        out.push(mass_rate_label(units, "Hot Mass Flow Rate", self.hot.mass_rate));
        out.extend(self.hot.labeled(units, &HOT_LABELS));
        out.push(mass_rate_label(units, "Cold Mass Flow Rate", self.cold.mass_rate));
        out.extend(self.cold.labeled(units, &COLD_LABELS));
        out.extend(self.fouled.labeled(units));
        out
    }
}

/// Counter-flow hot outlet for `R = C_c/C_h` and `ntu_cold = UA/C_c`, in kelvin.
///
/// Uses `E = exp(NTU_c·(R − 1))` and
/// `T2 = (T1(R − 1) − R·t1(1 − E))/(R·E − 1)`, scaled by `1/E` when `E` grows
/// so large conductances do not overflow.
fn counter_flow_hot_outlet(hot_in: f64, cold_in: f64, r: f64, ntu_cold: f64) -> f64 {
    if (r - 1.0).abs() < BALANCED {
        return (hot_in + ntu_cold * cold_in) / (1.0 + ntu_cold);
    }

    let x = ntu_cold * (r - 1.0);
    if x <= 0.0 {
        let e = x.exp();
        (hot_in * (r - 1.0) - r * cold_in * (1.0 - e)) / (r * e - 1.0)
    } else {
        let e_inv = (-x).exp();
        (hot_in * (r - 1.0) * e_inv - r * cold_in * (e_inv - 1.0)) / (r - e_inv)
    }
}

#[derive(Debug, Clone, Copy)]
struct Step {
    hot: Film,
    cold: Film,
    hot_state: FluidState,
    cold_state: FluidState,
    u: HeatTransfer,
    rates: [CapacitanceRate; 2],
    ntu: f64,
    correction_factor: f64,
}

fn side(
    geometry: &PlateFrameGeometry,
    film: &Film,
    state: &FluidState,
    mass_rate: MassRate,
    outlet: ThermodynamicTemperature,
) -> Result<(SideResult, PlateBand), ThermalError> {
    let friction = plate_channel_friction(film.reynolds)?;
    let channel = friction.value * (geometry.height / geometry.hydraulic_diameter()).get::<ratio>()
        * dynamic_pressure(state, film.velocity)
        / 2.0;

    Ok((
        SideResult {
            outlet_temperature: outlet,
            mass_rate,
            velocity: film.velocity,
            reynolds: film.reynolds,
            regime: film.nusselt.regime,
            film_coefficient: film.coefficient,
            friction_factor: friction.value,
            pressure_drop: Pressure::new::<pascal>(
                channel + geometry.port_loss(state, mass_rate),
            ),
        },
        friction.regime,
    ))
}

pub(crate) fn solve(
    input: &PlateFrameInput,
    config: &PlateFrameConfig,
    provider: &impl PropertyProvider,
) -> Result<PlateFrameSolution, ThermalError> {
    let geometry = &input.geometry;
    check_inlets(input.hot.inlet_temperature, input.cold.inlet_temperature)?;
    geometry.validate()?;

    let m_hot = input.hot.mass_rate(provider, input.pressure)?;
    let m_cold = input.cold.mass_rate(provider, input.pressure)?;
    let preferred = ChannelSplit::new(geometry.plates, m_hot, m_cold);

    higher_conductance(
        preferred,
        preferred.swapped(),
        |channels| rate(input, config, provider, channels, [m_hot, m_cold]),
        |solution: &PlateFrameSolution| solution.overall_coefficient,
    )
}

fn rate(
    input: &PlateFrameInput,
    config: &PlateFrameConfig,
    provider: &impl PropertyProvider,
    channels: ChannelSplit,
    [m_hot, m_cold]: [MassRate; 2],
) -> Result<PlateFrameSolution, ThermalError> {
    let PlateFrameInput {
        geometry,
        hot,
        cold,
        pressure,
    } = input;

    debug!(
        topology = "plate-frame",
        plates = geometry.plates,
        hot_channels = channels.hot,
        cold_channels = channels.cold,
        "rating"
    );

    let hot_duct = geometry.duct(channels.hot);
    let cold_duct = geometry.duct(channels.cold);
    let area = geometry.transfer_area();
    let t1_hot = hot.inlet_temperature.get::<kelvin>();
    let t1_cold = cold.inlet_temperature.get::<kelvin>();
    let criterion = MeanTemperatureChange {
        hot_inlet: hot.inlet_temperature,
        cold_inlet: cold.inlet_temperature,
    };

    let iterated = iterate(
        &config.convergence,
        Outlets::seed(hot, cold),
        &criterion,
        |outlets: &Outlets| -> Result<(Outlets, Step), ThermalError> {
            let [t_hot, t_cold] = criterion.means(outlets);
            let hot_state = provider.state_at(hot.fluid, t_hot, *pressure)?;
            let cold_state = provider.state_at(cold.fluid, t_cold, *pressure)?;

            let hot_film = hot_duct.film(&hot_state, m_hot, Heating::Cooled)?;
            let cold_film = cold_duct.film(&cold_state, m_cold, Heating::Heated)?;
            let u = HeatTransfer::new::<watt_per_square_meter_kelvin>(
                1.0 / (1.0 / hot_film.coefficient.get::<watt_per_square_meter_kelvin>()
                    + geometry.wall_resistance()
                    + 1.0 / cold_film.coefficient.get::<watt_per_square_meter_kelvin>()),
            );

            let c_hot =
                CapacitanceRate::from_mass_rate_and_specific_heat(m_hot, hot_state.specific_heat)?;
            let c_cold = CapacitanceRate::from_mass_rate_and_specific_heat(
                m_cold,
                cold_state.specific_heat,
            )?;
            let ua = u * area;
            let ntu = (ua / (*c_hot).min(*c_cold)).get::<ratio>();
            let f = 1.0 - 0.0166 * ntu;
            if f <= 0.0 {
                return Err(Infeasibility::NonPositiveCorrectionFactor { value: f }.into());
            }

            let r = (*c_cold / *c_hot).get::<ratio>();
            let ntu_cold = (f * ua / *c_cold).get::<ratio>();
            let t2_hot = counter_flow_hot_outlet(t1_hot, t1_cold, r, ntu_cold);
            let t2_cold = (t1_hot - t2_hot) / r + t1_cold;

            Ok((
                Outlets {
                    hot: ThermodynamicTemperature::new::<kelvin>(t2_hot),
                    cold: ThermodynamicTemperature::new::<kelvin>(t2_cold),
                },
                Step {
                    hot: hot_film,
                    cold: cold_film,
                    hot_state,
                    cold_state,
                    u,
                    rates: [c_hot, c_cold],
                    ntu,
                    correction_factor: f,
                },
            ))
        },
    )?;

    let outlets = iterated.guess;
    let step = iterated.output;
    let [c_hot, c_cold] = step.rates;
    let f = step.correction_factor;

    let (dt1, dt2) = counter_flow_ends(
        hot.inlet_temperature,
        outlets.hot,
        cold.inlet_temperature,
        outlets.cold,
    );
    let log_mean = lmtd(dt1, dt2)?;

    let q_hot = *c_hot * hot.inlet_temperature.minus(outlets.hot);
    let q_cold = *c_cold * outlets.cold.minus(cold.inlet_temperature);
    let balance = HeatBalance::new(
        q_hot,
        q_cold,
        f * (step.u * area * log_mean),
        config.convergence.rel_tol,
    );

    let u_fouled = fouled_coefficient(step.u, config.hot_fouling, config.cold_fouling, 1.0);
    let required_area: Area = q_hot / (f * (u_fouled * log_mean));
    let fouled = FouledPerformance {
        overall_coefficient: u_fouled,
        duty: f * (u_fouled * area * log_mean),
        required_area,
        required_size: RequiredSize::PlateArea(required_area / f64::from(geometry.plates)),
    };

    let (hot_side, hot_band) = side(geometry, &step.hot, &step.hot_state, m_hot, outlets.hot)?;
    let (cold_side, cold_band) =
        side(geometry, &step.cold, &step.cold_state, m_cold, outlets.cold)?;

    Ok(PlateFrameSolution {
        channels,
        hot: hot_side,
        cold: cold_side,
        hot_band,
        cold_band,
        overall_coefficient: step.u,
        area,
        duty: q_hot,
        ntu: step.ntu,
        correction_factor: f,
        lmtd: log_mean,
        balance,
        fouled,
        convergence: iterated.convergence,
        trace: iterated.trace,
    })
}

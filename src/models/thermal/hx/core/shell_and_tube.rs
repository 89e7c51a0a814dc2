//! One-shell-pass tube bundle.
//!
//! Tube dimensions come from the BWG table and the tube count from the bundle
//! table. The larger mass flow goes through the larger of the shell and tube
//! flow areas, unless the swapped routing gives a higher `U`. Outlets close through the 1-2 temperature effectiveness, and
//! the converged duty is checked against `U·A·F·LMTD`.

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
    pressure::{atmosphere, pascal},
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{
        convergence::{Convergence, ConvergenceConfig, Trace, iterate},
        correlation::{DuctKind, Heating, TransitionReynolds, darcy, shell_side_friction},
        fields::{FieldError, Fields},
        geometry::{
            GeometryCatalog, InchSize, PipeDimensions, PipeMaterial, TubeCountKey, TubeKey,
            TubeLayout,
        },
        hx::{
            CapacitanceRate, OneShellPass, StreamInlet, TubePasses,
            arrangement::correction_factor, functional::known_conductance_and_inlets,
        },
        thermo::{FluidState, PropertyProvider},
        units::{
            FoulingResistance, Labeled, QuantityKind, TemperatureDifference, UnitSystem,
            fouling_resistance,
        },
    },
};

use super::{
    film::{Duct, Film, dynamic_pressure},
    routing::{Passage, RoutingDecision, higher_conductance},
    solution::{
        COLD_LABELS, FouledPerformance, HOT_LABELS, HeatBalance, RequiredSize, SideResult,
        check_inlets, counter_flow_ends, fouled_coefficient, lmtd, mass_rate_label,
        overall_labels,
    },
    streams::{COLD_FIELDS, FluidStream, HOT_FIELDS, MeanTemperatureChange, Outlets},
};

/// Shell, bundle, and baffles of a one-shell-pass exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellAndTubeGeometry {
    pub shell_inner_diameter: Length,
    pub tube: PipeDimensions,
    pub tube_count: u32,
    pub passes: TubePasses,
    /// Center-to-center tube spacing.
    pub pitch: Length,
    pub layout: TubeLayout,
    pub baffles: u32,
    pub length: Length,
    pub roughness: Length,
    pub wall_conductivity: Option<ThermalConductivity>,
}

impl ShellAndTubeGeometry {
    /// Resolves tube dimensions and the tube count from a catalog.
    ///
    /// Tubes are steel of gauge `bwg` with the bundle's outer diameter.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if the tube or the bundle is not in the catalog.
    pub fn from_catalog(
        catalog: &impl GeometryCatalog,
        bwg: u8,
        bundle: &TubeCountKey,
        baffles: u32,
        length: Length,
    ) -> Result<Self, ThermalError> {
        let tube = catalog.tube(&TubeKey {
            outer_diameter: bundle.tube_od,
            bwg,
        })?;

        Ok(Self {
            shell_inner_diameter: bundle.shell_id.length(),
            tube,
            tube_count: catalog.tube_count(bundle)?,
            passes: bundle.passes,
            pitch: bundle.pitch.length(),
            layout: bundle.layout,
            baffles,
            length,
            roughness: PipeMaterial::Steel.roughness(),
            wall_conductivity: None,
        })
    }

    /// `L/(N_b + 1)`.
    #[must_use]
    pub fn baffle_spacing(&self) -> Length {
        self.length / f64::from(self.baffles + 1)
    }

    /// Gap between neighboring tubes.
    #[must_use]
    pub fn clearance(&self) -> Length {
        self.pitch - self.tube.outer_diameter
    }

    /// Flow area of one tube pass, `N_t·π·ID²/(4·N_p)`.
    #[must_use]
    pub fn tube_flow_area(&self) -> Area {
        let tubes = f64::from(self.tube_count) / f64::from(self.passes.count());
        tubes * self.tube.flow_area()
    }

    /// Crossflow area at the shell centerline, `D_s·C·B/P`.
    #[must_use]
    pub fn shell_flow_area(&self) -> Area {
        self.shell_inner_diameter * self.clearance() * self.baffle_spacing() / self.pitch
    }

    /// Kern's shell-side equivalent diameter.
    #[must_use]
    pub fn equivalent_diameter(&self) -> Length {
        let p = self.pitch.get::<meter>();
        let od = self.tube.outer_diameter.get::<meter>();
        Length::new::<meter>(
            (self.layout.pitch_coefficient() * p * p - PI * od * od) / (PI * od),
        )
    }

    /// Outer surface of the bundle, `N_t·π·OD·L`.
    #[must_use]
    pub fn outer_surface_area(&self) -> Area {
        f64::from(self.tube_count) * PI * self.tube.outer_diameter * self.length
    }

    fn validate(&self) -> Result<(), Infeasibility> {
        let positive = |l: Length| l.get::<meter>() > 0.0;
        if self.tube_count == 0 {
            return Err(Infeasibility::degenerate("bundle has no tubes"));
        }
        if !positive(self.tube.inner_diameter) {
            return Err(Infeasibility::degenerate("tube inner diameter"));
        }
        if !positive(self.clearance()) {
            return Err(Infeasibility::degenerate("tube pitch leaves no clearance"));
        }
        if !positive(self.shell_inner_diameter) || !positive(self.length) {
            return Err(Infeasibility::degenerate("shell diameter or length"));
        }
        if !positive(self.equivalent_diameter()) {
            return Err(Infeasibility::degenerate("shell equivalent diameter"));
        }
        Ok(())
    }

    fn duct(&self, passage: Passage, transition: TransitionReynolds) -> Duct {
        match passage {
            Passage::Inner => Duct {
                kind: DuctKind::Pipe,
                flow_area: self.tube_flow_area(),
                diameter: self.tube.inner_diameter,
                length: self.length,
                transition,
            },
            Passage::Outer => Duct {
                kind: DuctKind::ShellCrossflow,
                flow_area: self.shell_flow_area(),
                diameter: self.equivalent_diameter(),
                length: self.length,
                transition,
            },
        }
    }

    /// Film resistance referred to the tube outer surface.
    fn resistance(&self, passage: Passage, h: HeatTransfer) -> f64 {
        let h = h.get::<watt_per_square_meter_kelvin>();
        match passage {
            Passage::Inner => {
                1.0 / (h * (self.tube.inner_diameter / self.tube.outer_diameter).get::<ratio>())
            }
            Passage::Outer => 1.0 / h,
        }
    }

    fn wall_resistance(&self) -> f64 {
        self.wall_conductivity.map_or(0.0, |k| {
            let d_o = self.tube.outer_diameter.get::<meter>();
            let d_i = self.tube.inner_diameter.get::<meter>();
            d_o * (d_o / d_i).ln() / (2.0 * k.get::<watt_per_meter_kelvin>())
        })
    }

    fn side(
        &self,
        passage: Passage,
        film: &Film,
        state: &FluidState,
        mass_rate: MassRate,
        outlet: ThermodynamicTemperature,
        transition: TransitionReynolds,
    ) -> Result<SideResult, ThermalError> {
        let head = dynamic_pressure(state, film.velocity);
        let (friction, pressure_drop) = match passage {
            Passage::Inner => {
                let id = self.tube.inner_diameter;
                let f = darcy(
                    film.reynolds,
                    (self.roughness / id).get::<ratio>(),
                    transition,
                )?
                .value;
                let passes = f64::from(self.passes.count());
                let loss = head * (f * (self.length / id).get::<ratio>() + 4.0) * passes / 2.0;
                (f, loss)
            }
            Passage::Outer => {
                let f = shell_side_friction(film.reynolds)?;
                let crossings = f64::from(self.baffles + 1);
                let loss = head * (self.shell_inner_diameter / self.equivalent_diameter())
                    .get::<ratio>()
                    * f
                    * crossings
                    / 2.0;
                (f, loss)
            }
        };

        Ok(SideResult {
            outlet_temperature: outlet,
            mass_rate,
            velocity: film.velocity,
            reynolds: film.reynolds,
            regime: film.nusselt.regime,
            film_coefficient: film.coefficient,
            friction_factor: friction,
            pressure_drop: Pressure::new::<pascal>(pressure_drop),
        })
    }
}

/// A shell-and-tube rating problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellAndTubeInput {
    pub geometry: ShellAndTubeGeometry,
    pub hot: FluidStream,
    pub cold: FluidStream,
    pub pressure: Pressure,
}

impl ShellAndTubeInput {
    /// Builds an input from flat named fields.
    ///
    /// Catalog selectors (`Shell Inner Diameter`, `Tube Outer Diameter`,
    /// `Tube Pitch`) are nominal inch sizes in every unit system.
    ///
    /// # Errors
    ///
    /// Returns an input error for missing or malformed fields and a lookup
    /// error for a tube or bundle the catalog does not carry.
    pub fn from_fields(
        fields: &Fields,
        units: UnitSystem,
        catalog: &impl GeometryCatalog,
    ) -> Result<Self, ThermalError> {
        let passes = fields.count("Number of Passes")?;
        let passes = TubePasses::try_from(passes).map_err(|_| FieldError::UnknownOption {
            field: "Number of Passes",
            value: passes.to_string(),
        })?;
        let bwg = fields.count("Tube BWG")?;
        let bwg = u8::try_from(bwg).map_err(|_| FieldError::UnknownOption {
            field: "Tube BWG",
            value: bwg.to_string(),
        })?;

        let bundle = TubeCountKey {
            tube_od: fields.option::<InchSize>("Tube Outer Diameter")?,
            pitch: fields.option("Tube Pitch")?,
            layout: fields.option("Tube Arrangement")?,
            shell_id: fields.option("Shell Inner Diameter")?,
            passes,
        };
        let mut geometry = ShellAndTubeGeometry::from_catalog(
            catalog,
            bwg,
            &bundle,
            fields.count("Baffles")?,
            units.length(fields.positive("Length")?),
        )?;
        geometry.wall_conductivity = fields
            .optional_positive("Wall Conductivity")?
            .map(|k| units.thermal_conductivity(k));

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

/// Solver settings for [`ShellAndTubeInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShellAndTubeConfig {
    pub convergence: ConvergenceConfig,
    pub transition: TransitionReynolds,
    pub tube_fouling: FoulingResistance,
    pub shell_fouling: FoulingResistance,
}

impl Default for ShellAndTubeConfig {
    fn default() -> Self {
        Self {
            convergence: ConvergenceConfig::new(100, 5e-4),
            transition: TransitionReynolds::SHELL_AND_TUBE,
            tube_fouling: fouling_resistance(1.76e-4),
            shell_fouling: fouling_resistance(1.76e-4),
        }
    }
}

/// Converged shell-and-tube performance.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellAndTubeSolution {
    /// `Inner` is the tube side and `Outer` the shell side.
    pub routing: RoutingDecision,
    pub hot: SideResult,
    pub cold: SideResult,
    /// Referred to the tube outer surface.
    pub overall_coefficient: HeatTransfer,
    pub area: Area,
    pub duty: Power,
    /// `R = C_c/C_h`.
    pub capacity_ratio: f64,
    /// Cold-stream temperature effectiveness `S = (t2 − t1)/(T1 − t1)`.
    pub temperature_effectiveness: f64,
    pub correction_factor: f64,
    /// Counter-flow LMTD, before the correction factor.
    pub lmtd: TemperatureInterval,
    pub balance: HeatBalance,
    pub fouled: FouledPerformance,
    pub tube_count: u32,
    pub baffle_spacing: Length,
    pub convergence: Convergence,
    pub trace: Option<Trace<Outlets>>,
}

impl ShellAndTubeSolution {
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
        out.push(units.label(
            "Correction Factor",
            QuantityKind::Dimensionless,
            self.correction_factor,
        ));
        out.push(units.label(
            "Temperature Effectiveness",
            QuantityKind::Dimensionless,
            self.temperature_effectiveness,
        ));
        out.push(units.label(
            "Tube Count",
            QuantityKind::Dimensionless,
            f64::from(self.tube_count),
        ));
        out.push(units.label(
            "Baffle Spacing",
            QuantityKind::Length,
            self.baffle_spacing.get::<meter>(),
        ));
        out.push(mass_rate_label(units, "Hot Mass Flow Rate", self.hot.mass_rate));
        out.extend(self.hot.labeled(units, &HOT_LABELS));
        out.push(mass_rate_label(units, "Cold Mass Flow Rate", self.cold.mass_rate));
        out.extend(self.cold.labeled(units, &COLD_LABELS));
        out.extend(self.fouled.labeled(units));
        out
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
}

pub(crate) fn solve(
    input: &ShellAndTubeInput,
    config: &ShellAndTubeConfig,
    provider: &impl PropertyProvider,
) -> Result<ShellAndTubeSolution, ThermalError> {
    let geometry = &input.geometry;
    check_inlets(input.hot.inlet_temperature, input.cold.inlet_temperature)?;
    geometry.validate()?;

    let m_hot = input.hot.mass_rate(provider, input.pressure)?;
    let m_cold = input.cold.mass_rate(provider, input.pressure)?;
    let preferred = RoutingDecision::route(
        m_hot,
        m_cold,
        geometry.tube_flow_area(),
        geometry.shell_flow_area(),
    );

    higher_conductance(
        preferred,
        Some(preferred.swapped()),
        |routing| rate(input, config, provider, routing, [m_hot, m_cold]),
        |solution: &ShellAndTubeSolution| solution.overall_coefficient,
    )
}

fn rate(
    input: &ShellAndTubeInput,
    config: &ShellAndTubeConfig,
    provider: &impl PropertyProvider,
    routing: RoutingDecision,
    [m_hot, m_cold]: [MassRate; 2],
) -> Result<ShellAndTubeSolution, ThermalError> {
    let ShellAndTubeInput {
        geometry,
        hot,
        cold,
        pressure,
    } = input;

    let hot_side = match routing.hot {
        Passage::Inner => "tubes",
        Passage::Outer => "shell",
    };
    debug!(
        topology = "shell-and-tube",
        hot = hot_side,
        tubes = geometry.tube_count,
        passes = geometry.passes.count(),
        "rating"
    );

    let hot_duct = geometry.duct(routing.hot, config.transition);
    let cold_duct = geometry.duct(routing.cold(), config.transition);
    let area = geometry.outer_surface_area();
    let arrangement = OneShellPass {
        tube_passes: geometry.passes,
    };
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
            let resistance = geometry.resistance(routing.hot, hot_film.coefficient)
                + geometry.wall_resistance()
                + geometry.resistance(routing.cold(), cold_film.coefficient);
            let u = HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0 / resistance);

            let rates = [
                CapacitanceRate::from_mass_rate_and_specific_heat(m_hot, hot_state.specific_heat)?,
                CapacitanceRate::from_mass_rate_and_specific_heat(
                    m_cold,
                    cold_state.specific_heat,
                )?,
            ];
            let closed = known_conductance_and_inlets(
                &arrangement,
                u * area,
                [
                    StreamInlet::new(rates[1], cold.inlet_temperature),
                    StreamInlet::new(rates[0], hot.inlet_temperature),
                ],
            )?;

            Ok((
                Outlets {
                    hot: closed.streams[1].outlet_temperature,
                    cold: closed.streams[0].outlet_temperature,
                },
                Step {
                    hot: hot_film,
                    cold: cold_film,
                    hot_state,
                    cold_state,
                    u,
                    rates,
                },
            ))
        },
    )?;

    let outlets = iterated.guess;
    let step = iterated.output;
    let [c_hot, c_cold] = step.rates;

    let capacity_ratio = (*c_cold / *c_hot).get::<ratio>();
    let s = (outlets.cold.minus(cold.inlet_temperature)
        / hot.inlet_temperature.minus(cold.inlet_temperature))
    .get::<ratio>();
    let f = match geometry.passes {
        TubePasses::One => 1.0,
        TubePasses::Two | TubePasses::Four => correction_factor(capacity_ratio, s)
            .ok_or(Infeasibility::NonPositiveCorrectionFactor { value: f64::NAN })?,
    };

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

    let u_fouled = fouled_coefficient(
        step.u,
        config.tube_fouling,
        config.shell_fouling,
        (geometry.tube.outer_diameter / geometry.tube.inner_diameter).get::<ratio>(),
    );
    let required_area: Area = q_hot / (f * (u_fouled * log_mean));
    let fouled = FouledPerformance {
        overall_coefficient: u_fouled,
        duty: f * (u_fouled * area * log_mean),
        required_area,
        required_size: RequiredSize::Length(
            required_area / (f64::from(geometry.tube_count) * PI * geometry.tube.outer_diameter),
        ),
    };

    let transition = config.transition;
    Ok(ShellAndTubeSolution {
        routing,
        hot: geometry.side(
            routing.hot,
            &step.hot,
            &step.hot_state,
            m_hot,
            outlets.hot,
            transition,
        )?,
        cold: geometry.side(
            routing.cold(),
            &step.cold,
            &step.cold_state,
            m_cold,
            outlets.cold,
            transition,
        )?,
        overall_coefficient: step.u,
        area,
        duty: q_hot,
        capacity_ratio,
        temperature_effectiveness: s,
        correction_factor: f,
        lmtd: log_mean,
        balance,
        fouled,
        tube_count: geometry.tube_count,
        baffle_spacing: geometry.baffle_spacing(),
        convergence: iterated.convergence,
        trace: iterated.trace,
    })
}

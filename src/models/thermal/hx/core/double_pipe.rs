//! Concentric-tube exchanger.
//!
//! One stream flows through the inner pipe and the other through the annulus
//! between the inner pipe and the outer pipe. The larger mass flow takes the
//! larger flow area unless the swapped routing gives a higher `U`. Outlets
//! close through the counter-flow (or parallel-flow)
//! effectiveness-NTU relation with `U` referred to the inner pipe's outer
//! surface.

use std::f64::consts::PI;

use tracing::debug;
use uom::si::{
    area::square_meter,
    f64::{
        Area, HeatTransfer, Length, MassRate, Power, Pressure, TemperatureInterval,
        ThermalConductance, ThermalConductivity, ThermodynamicTemperature,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    pressure::atmosphere,
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{
        convergence::{Convergence, ConvergenceConfig, Trace, iterate},
        correlation::{DuctKind, Heating, TransitionReynolds, darcy, reynolds},
        fields::{FieldError, Fields},
        geometry::{GeometryCatalog, PipeDimensions, PipeKey, PipeSpec},
        hx::{
            CapacitanceRate, CounterFlow, EffectivenessRelation, NtuRelation, ParallelFlow,
            Stream, StreamInlet,
            functional::{known_conditions_and_inlets, known_conductance_and_inlets},
        },
        thermo::{FluidState, PropertyProvider},
        units::{
            FoulingResistance, Labeled, QuantityKind, TemperatureDifference, UnitSystem,
            fouling_resistance,
        },
    },
};

use super::{
    film::{Duct, Film, darcy_pressure_drop},
    routing::{Passage, RoutingDecision, higher_conductance},
    solution::{
        COLD_LABELS, FouledPerformance, HOT_LABELS, HeatBalance, RequiredSize, SideResult,
        check_inlets, fouled_coefficient, lmtd, mass_rate_label, overall_labels,
    },
    streams::{COLD_FIELDS, FluidStream, HOT_FIELDS, MeanTemperatureChange, Outlets},
};

/// Relative flow direction of the two streams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DoublePipeFlow {
    #[default]
    Counter,
    Parallel,
}

/// Inner and outer pipe of a double-pipe exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePipeGeometry {
    pub inner: PipeDimensions,
    /// Only the inner diameter matters; it bounds the annulus.
    pub outer: PipeDimensions,
    pub length: Length,
    /// Absolute roughness of both flow surfaces.
    pub roughness: Length,
    /// Inner pipe wall conductivity. The wall resistance is ignored when absent.
    pub wall_conductivity: Option<ThermalConductivity>,
}

impl DoublePipeGeometry {
    /// Resolves both pipes from a catalog.
    ///
    /// # Errors
    ///
    /// Returns a lookup error if either pipe is not in the catalog.
    pub fn from_catalog(
        catalog: &impl GeometryCatalog,
        inner: &PipeKey,
        outer: &PipeKey,
        length: Length,
    ) -> Result<Self, ThermalError> {
        Ok(Self {
            inner: catalog.pipe(inner)?,
            outer: catalog.pipe(outer)?,
            length,
            roughness: inner.spec.material().roughness(),
            wall_conductivity: None,
        })
    }

    #[must_use]
    pub fn inner_flow_area(&self) -> Area {
        self.inner.flow_area()
    }

    /// `π(D2² − D1²)/4`, with `D2` the outer pipe ID and `D1` the inner pipe OD.
    #[must_use]
    pub fn annulus_flow_area(&self) -> Area {
        let d2 = self.outer.inner_diameter;
        let d1 = self.inner.outer_diameter;
        PI * (d2 * d2 - d1 * d1) / 4.0
    }

    /// `D2 − D1`, used for friction.
    #[must_use]
    pub fn annulus_hydraulic_diameter(&self) -> Length {
        self.outer.inner_diameter - self.inner.outer_diameter
    }

    /// `(D2² − D1²)/D1`, used for heat transfer.
    #[must_use]
    pub fn annulus_equivalent_diameter(&self) -> Length {
        let d2 = self.outer.inner_diameter;
        let d1 = self.inner.outer_diameter;
        (d2 * d2 - d1 * d1) / d1
    }

    /// Heat transfer area on the inner pipe's outer surface.
    #[must_use]
    pub fn outer_surface_area(&self) -> Area {
        PI * self.inner.outer_diameter * self.length
    }

    fn validate(&self) -> Result<(), Infeasibility> {
        let positive = |l: Length| l.get::<meter>() > 0.0;
        if !positive(self.inner.inner_diameter)
            || self.inner.outer_diameter < self.inner.inner_diameter
        {
            return Err(Infeasibility::degenerate("inner pipe diameters"));
        }
        if !positive(self.annulus_hydraulic_diameter()) {
            return Err(Infeasibility::degenerate(
                "outer pipe does not clear the inner pipe",
            ));
        }
        if !positive(self.length) {
            return Err(Infeasibility::degenerate("exchanger length"));
        }
        Ok(())
    }

    fn duct(&self, passage: Passage, transition: TransitionReynolds) -> Duct {
        match passage {
            Passage::Inner => Duct {
                kind: DuctKind::Pipe,
                flow_area: self.inner_flow_area(),
                diameter: self.inner.inner_diameter,
                length: self.length,
                transition,
            },
            Passage::Outer => Duct {
                kind: DuctKind::Annulus,
                flow_area: self.annulus_flow_area(),
                diameter: self.annulus_equivalent_diameter(),
                length: self.length,
                transition,
            },
        }
    }

    /// Diameter for friction and pressure drop.
    fn friction_diameter(&self, passage: Passage) -> Length {
        match passage {
            Passage::Inner => self.inner.inner_diameter,
            Passage::Outer => self.annulus_hydraulic_diameter(),
        }
    }

    /// Film coefficient referred to the inner pipe's outer surface.
    fn referred(&self, passage: Passage, h: HeatTransfer) -> f64 {
        let h = h.get::<watt_per_square_meter_kelvin>();
        match passage {
            Passage::Inner => {
                h * (self.inner.inner_diameter / self.inner.outer_diameter).get::<ratio>()
            }
            Passage::Outer => h,
        }
    }

    /// `D_o·ln(D_o/D_i)/(2k)`, or zero without a wall conductivity.
    fn wall_resistance(&self) -> f64 {
        self.wall_conductivity.map_or(0.0, |k| {
            let d_o = self.inner.outer_diameter.get::<meter>();
            let d_i = self.inner.inner_diameter.get::<meter>();
            d_o * (d_o / d_i).ln() / (2.0 * k.get::<watt_per_meter_kelvin>())
        })
    }
}

/// A double-pipe rating problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePipeInput {
    pub geometry: DoublePipeGeometry,
    pub hot: FluidStream,
    pub cold: FluidStream,
    pub flow: DoublePipeFlow,
    pub pressure: Pressure,
}

impl DoublePipeInput {
    /// Builds an input from flat named fields.
    ///
    /// Reads `Material`, `Inner Nominal Diameter`, `Outer Nominal Diameter`,
    /// `Length`, and the hot and cold stream fields. `Flow Arrangement`,
    /// `Pressure`, and `Wall Conductivity` are optional.
    ///
    /// # Errors
    ///
    /// Returns an input error for missing or malformed fields and a lookup
    /// error for pipes the catalog does not carry.
    pub fn from_fields(
        fields: &Fields,
        units: UnitSystem,
        catalog: &impl GeometryCatalog,
    ) -> Result<Self, ThermalError> {
        let spec = fields.option::<PipeSpec>("Material")?;
        let inner = fields.option("Inner Nominal Diameter")?;
        let outer = fields.option("Outer Nominal Diameter")?;
        let length = units.length(fields.positive("Length")?);

        let mut geometry = DoublePipeGeometry::from_catalog(
            catalog,
            &PipeKey { nominal: inner, spec },
            &PipeKey { nominal: outer, spec },
            length,
        )?;
        geometry.wall_conductivity = fields
            .optional_positive("Wall Conductivity")?
            .map(|k| units.thermal_conductivity(k));

        let flow = match fields.get("Flow Arrangement").map(str::to_ascii_lowercase) {
            None => DoublePipeFlow::Counter,
            Some(s) if s.starts_with("counter") => DoublePipeFlow::Counter,
            Some(s) if s.starts_with("parallel") => DoublePipeFlow::Parallel,
            Some(s) => {
                return Err(FieldError::UnknownOption {
                    field: "Flow Arrangement",
                    value: s,
                }
                .into());
            }
        };

        Ok(Self {
            geometry,
            hot: FluidStream::from_fields(fields, &HOT_FIELDS, units)?,
            cold: FluidStream::from_fields(fields, &COLD_FIELDS, units)?,
            flow,
            pressure: fields
                .optional_positive("Pressure")?
                .map_or(Pressure::new::<atmosphere>(1.0), |p| units.pressure(p)),
        })
    }
}

/// Solver settings for [`DoublePipeInput`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublePipeConfig {
    pub convergence: ConvergenceConfig,
    pub transition: TransitionReynolds,
    /// Fouling on the inner pipe's bore.
    pub inner_fouling: FoulingResistance,
    /// Fouling on the inner pipe's outer surface.
    pub outer_fouling: FoulingResistance,
}

impl Default for DoublePipeConfig {
    fn default() -> Self {
        Self {
            convergence: ConvergenceConfig::new(20, 1e-4),
            transition: TransitionReynolds::PIPE,
            inner_fouling: fouling_resistance(0.0),
            outer_fouling: fouling_resistance(0.0),
        }
    }
}

/// Converged double-pipe performance.
#[derive(Debug, Clone, PartialEq)]
pub struct DoublePipeSolution {
    pub routing: RoutingDecision,
    pub hot: SideResult,
    pub cold: SideResult,
    /// Referred to the inner pipe's outer surface.
    pub overall_coefficient: HeatTransfer,
    pub area: Area,
    pub duty: Power,
    pub effectiveness: f64,
    pub lmtd: TemperatureInterval,
    pub balance: HeatBalance,
    pub fouled: FouledPerformance,
    pub convergence: Convergence,
    pub trace: Option<Trace<Outlets>>,
}

impl DoublePipeSolution {
    /// Every reported value, labeled in `units`.
    #[must_use]
    pub fn labeled(&self, units: UnitSystem) -> Vec<Labeled> {
        let mut out = Vec::with_capacity(20);
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
            "Effectiveness",
            QuantityKind::Dimensionless,
            self.effectiveness,
        ));
        out.push(mass_rate_label(units, "Hot Mass Flow Rate", self.hot.mass_rate));
        out.extend(self.hot.labeled(units, &HOT_LABELS));
        out.push(mass_rate_label(units, "Cold Mass Flow Rate", self.cold.mass_rate));
        out.extend(self.cold.labeled(units, &COLD_LABELS));
        out.extend(self.fouled.labeled(units));
        out
    }
}

/// Per-iteration coefficients.
#[derive(Debug, Clone, Copy)]
struct Step {
    hot: Film,
    cold: Film,
    hot_state: FluidState,
    cold_state: FluidState,
    u: HeatTransfer,
    rates: [CapacitanceRate; 2],
    effectiveness: f64,
}

fn forward(
    flow: DoublePipeFlow,
    ua: ThermalConductance,
    inlets: [StreamInlet; 2],
) -> Result<([Stream; 2], f64), ThermalError> {
    fn run(
        arrangement: &impl EffectivenessRelation,
        ua: ThermalConductance,
        inlets: [StreamInlet; 2],
    ) -> Result<([Stream; 2], f64), ThermalError> {
        let result = known_conductance_and_inlets(arrangement, ua, inlets)?;
        Ok((result.streams, result.effectiveness.get::<ratio>()))
    }

    match flow {
        DoublePipeFlow::Counter => run(&CounterFlow, ua, inlets),
        DoublePipeFlow::Parallel => run(&ParallelFlow, ua, inlets),
    }
}

fn required_conductance(
    flow: DoublePipeFlow,
    streams: (StreamInlet, Stream),
) -> Result<ThermalConductance, ThermalError> {
    fn run(
        arrangement: &impl NtuRelation,
        streams: (StreamInlet, Stream),
    ) -> Result<ThermalConductance, ThermalError> {
        Ok(known_conditions_and_inlets(arrangement, streams)?.ua)
    }

    match flow {
        DoublePipeFlow::Counter => run(&CounterFlow, streams),
        DoublePipeFlow::Parallel => run(&ParallelFlow, streams),
    }
}

pub(crate) fn solve(
    input: &DoublePipeInput,
    config: &DoublePipeConfig,
    provider: &impl PropertyProvider,
) -> Result<DoublePipeSolution, ThermalError> {
    let geometry = &input.geometry;
    check_inlets(input.hot.inlet_temperature, input.cold.inlet_temperature)?;
    geometry.validate()?;

    let m_hot = input.hot.mass_rate(provider, input.pressure)?;
    let m_cold = input.cold.mass_rate(provider, input.pressure)?;
    let preferred = RoutingDecision::route(
        m_hot,
        m_cold,
        geometry.inner_flow_area(),
        geometry.annulus_flow_area(),
    );

    higher_conductance(
        preferred,
        Some(preferred.swapped()),
        |routing| rate(input, config, provider, routing, [m_hot, m_cold]),
        |solution: &DoublePipeSolution| solution.overall_coefficient,
    )
}

/// Converges the outlets with each stream in its `routing` passage.
fn rate(
    input: &DoublePipeInput,
    config: &DoublePipeConfig,
    provider: &impl PropertyProvider,
    routing: RoutingDecision,
    [m_hot, m_cold]: [MassRate; 2],
) -> Result<DoublePipeSolution, ThermalError> {
    let DoublePipeInput {
        geometry,
        hot,
        cold,
        flow,
        pressure,
    } = input;

    debug!(topology = "double-pipe", hot = %routing.hot, ?flow, "rating");

    let hot_duct = geometry.duct(routing.hot, config.transition);
    let cold_duct = geometry.duct(routing.cold(), config.transition);
    let area = geometry.outer_surface_area();
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

            let resistance = 1.0 / geometry.referred(routing.hot, hot_film.coefficient)
                + geometry.wall_resistance()
                + 1.0 / geometry.referred(routing.cold(), cold_film.coefficient);
            let u = HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0 / resistance);

            let rates = [
                CapacitanceRate::from_mass_rate_and_specific_heat(m_hot, hot_state.specific_heat)?,
                CapacitanceRate::from_mass_rate_and_specific_heat(
                    m_cold,
                    cold_state.specific_heat,
                )?,
            ];
            let (streams, effectiveness) = forward(
                *flow,
                u * area,
                [
                    StreamInlet::new(rates[1], cold.inlet_temperature),
                    StreamInlet::new(rates[0], hot.inlet_temperature),
                ],
            )?;

            Ok((
                Outlets {
                    hot: streams[1].outlet_temperature,
                    cold: streams[0].outlet_temperature,
                },
                Step {
                    hot: hot_film,
                    cold: cold_film,
                    hot_state,
                    cold_state,
                    u,
                    rates,
                    effectiveness,
                },
            ))
        },
    )?;

    let outlets = iterated.guess;
    let step = iterated.output;
    let [c_hot, c_cold] = step.rates;

    let (dt1, dt2) = match flow {
        DoublePipeFlow::Counter => (
            hot.inlet_temperature.minus(outlets.cold),
            outlets.hot.minus(cold.inlet_temperature),
        ),
        DoublePipeFlow::Parallel => (
            hot.inlet_temperature.minus(cold.inlet_temperature),
            outlets.hot.minus(outlets.cold),
        ),
    };
    let log_mean = lmtd(dt1, dt2)?;

    let q_hot = *c_hot * hot.inlet_temperature.minus(outlets.hot);
    let q_cold = *c_cold * outlets.cold.minus(cold.inlet_temperature);
    let balance = HeatBalance::new(
        q_hot,
        q_cold,
        step.u * area * log_mean,
        config.convergence.rel_tol,
    );

    let u_fouled = fouled_coefficient(
        step.u,
        config.inner_fouling,
        config.outer_fouling,
        (geometry.inner.outer_diameter / geometry.inner.inner_diameter).get::<ratio>(),
    );
    let cold_resolved =
        Stream::new_from_outlet_temperature(c_cold, cold.inlet_temperature, outlets.cold)?;
    let ua_required = required_conductance(
        *flow,
        (StreamInlet::new(c_hot, hot.inlet_temperature), cold_resolved),
    )?;
    let required_area: Area = ua_required / u_fouled;
    let fouled = FouledPerformance {
        overall_coefficient: u_fouled,
        duty: u_fouled * area * log_mean,
        required_area,
        required_size: RequiredSize::Length(required_area / (PI * geometry.inner.outer_diameter)),
    };

    let side = |passage: Passage,
                film: &Film,
                state: &FluidState,
                mass_rate: MassRate,
                outlet: ThermodynamicTemperature|
     -> Result<SideResult, ThermalError> {
        let diameter = geometry.friction_diameter(passage);
        let re = reynolds(state.density, film.velocity, diameter, state.viscosity);
        let relative_roughness = (geometry.roughness / diameter).get::<ratio>();
        let friction = darcy(re, relative_roughness, config.transition)?.value;
        Ok(SideResult {
            outlet_temperature: outlet,
            mass_rate,
            velocity: film.velocity,
            reynolds: film.reynolds,
            regime: film.nusselt.regime,
            film_coefficient: film.coefficient,
            friction_factor: friction,
            pressure_drop: darcy_pressure_drop(
                friction,
                geometry.length,
                diameter,
                state,
                film.velocity,
            ),
        })
    };

    Ok(DoublePipeSolution {
        routing,
        hot: side(routing.hot, &step.hot, &step.hot_state, m_hot, outlets.hot)?,
        cold: side(routing.cold(), &step.cold, &step.cold_state, m_cold, outlets.cold)?,
        overall_coefficient: step.u,
        area,
        duty: q_hot,
        effectiveness: step.effectiveness,
        lmtd: log_mean,
        balance,
        fouled,
        convergence: iterated.convergence,
        trace: iterated.trace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use uom::si::{
        length::inch, mass_rate::kilogram_per_second, power::watt, pressure::pascal,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::{
        models::ErrorKind,
        support::{
            convergence::Status,
            correlation::FlowRegime,
            geometry::{InchSize, Schedule, StandardCatalog},
            thermo::{Fluid, model::TabulatedWater},
        },
    };

    use super::super::streams::FlowRate;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn water(t: f64, kg_s: f64) -> FluidStream {
        FluidStream::new(
            Fluid::Water,
            celsius(t),
            FlowRate::Mass(MassRate::new::<kilogram_per_second>(kg_s)),
        )
    }

    fn two_in_three(hot_flow: f64, cold_flow: f64) -> DoublePipeInput {
        let geometry = DoublePipeGeometry::from_catalog(
            &StandardCatalog,
            &PipeKey::steel(InchSize::fraction(2, 0, 1), Schedule::Sch40),
            &PipeKey::steel(InchSize::fraction(3, 0, 1), Schedule::Sch40),
            Length::new::<meter>(3.0),
        )
        .unwrap();

        DoublePipeInput {
            geometry,
            hot: water(90.0, hot_flow),
            cold: water(20.0, cold_flow),
            flow: DoublePipeFlow::Counter,
            pressure: Pressure::new::<atmosphere>(1.0),
        }
    }

    #[test]
    fn water_to_water_counter_flow() {
        let solution =
            solve(&two_in_three(0.5, 0.3), &DoublePipeConfig::default(), &TabulatedWater).unwrap();

        assert_eq!(solution.convergence.status, Status::Converged);
        assert!(solution.convergence.iterations <= 20);
        assert_eq!(solution.routing.hot, Passage::Inner);
        assert_eq!(solution.hot.regime, FlowRegime::Turbulent);
        assert_eq!(solution.cold.regime, FlowRegime::Turbulent);

        let hot_out = solution.hot.outlet_temperature.get::<degree_celsius>();
        let cold_out = solution.cold.outlet_temperature.get::<degree_celsius>();
        assert!(hot_out > 20.0 && hot_out < 90.0);
        assert!(cold_out > 20.0 && cold_out < 90.0);
        assert!(solution.balance.imbalance < 0.01);
        assert!(solution.effectiveness > 0.0 && solution.effectiveness < 1.0);

        let c_hot = 0.5 * (90.0 - hot_out);
        let c_cold = 0.3 * (cold_out - 20.0);
        assert!(c_cold > c_hot, "cold stream has the smaller capacitance");

        assert!(solution.hot.pressure_drop.get::<pascal>() > 0.0);
        assert!(solution.cold.pressure_drop.get::<pascal>() > 0.0);
    }

    #[test]
    fn clean_exchanger_needs_its_own_length() {
        let solution =
            solve(&two_in_three(0.5, 0.3), &DoublePipeConfig::default(), &TabulatedWater).unwrap();

        let RequiredSize::Length(length) = solution.fouled.required_size else {
            panic!("double-pipe sizing is by length");
        };
        assert_relative_eq!(length.get::<meter>(), 3.0, max_relative = 1e-6);
        assert_relative_eq!(
            solution.fouled.duty.get::<watt>(),
            solution.balance.exchanger.get::<watt>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn fouling_lowers_coefficient_and_lengthens_exchanger() {
        let config = DoublePipeConfig {
            inner_fouling: fouling_resistance(1.76e-4),
            outer_fouling: fouling_resistance(1.76e-4),
            ..DoublePipeConfig::default()
        };
        let solution = solve(&two_in_three(0.5, 0.3), &config, &TabulatedWater).unwrap();

        assert!(solution.fouled.overall_coefficient < solution.overall_coefficient);
        let RequiredSize::Length(length) = solution.fouled.required_size else {
            panic!("double-pipe sizing is by length");
        };
        assert!(length.get::<meter>() > 3.0);
    }

    #[test]
    fn solving_twice_gives_the_same_answer() {
        let input = two_in_three(0.5, 0.3);
        let config = DoublePipeConfig::default();
        assert_eq!(
            solve(&input, &config, &TabulatedWater).unwrap(),
            solve(&input, &config, &TabulatedWater).unwrap()
        );
    }

    #[test]
    fn parallel_flow_transfers_less() {
        let counter = two_in_three(0.5, 0.3);
        let parallel = DoublePipeInput {
            flow: DoublePipeFlow::Parallel,
            ..counter
        };
        let config = DoublePipeConfig::default();

        let counter = solve(&counter, &config, &TabulatedWater).unwrap();
        let parallel = solve(&parallel, &config, &TabulatedWater).unwrap();

        assert!(parallel.duty < counter.duty);
        assert!(parallel.cold.outlet_temperature < parallel.hot.outlet_temperature);
    }

    #[test]
    fn iteration_cap_is_reported_not_raised() {
        let config = DoublePipeConfig {
            convergence: ConvergenceConfig::new(1, 1e-12).with_trace(),
            ..DoublePipeConfig::default()
        };
        let solution = solve(&two_in_three(0.5, 0.3), &config, &TabulatedWater).unwrap();

        assert_eq!(solution.convergence.status, Status::MaxIterations);
        assert!(solution.convergence.warning.is_some());
        assert_eq!(solution.trace.map(|t| t.len()), Some(1));
    }

    #[test]
    fn reversed_inlets_are_infeasible() {
        let mut input = two_in_three(0.5, 0.3);
        std::mem::swap(&mut input.hot, &mut input.cold);

        let error = solve(&input, &DoublePipeConfig::default(), &TabulatedWater).unwrap_err();
        assert!(matches!(
            error,
            ThermalError::Infeasible(Infeasibility::InletOrdering { .. })
        ));
    }

    fn scenario_fields() -> Fields {
        Fields::new()
            .with("Material", "Steel Sch 40")
            .with("Inner Nominal Diameter", "2")
            .with("Outer Nominal Diameter", "3")
            .with("Length", "3")
            .with("Hot Fluid", "Water")
            .with("Hot Inlet Temperature", "90")
            .with("Hot Mass Flow Rate", "0.5")
            .with("Cold Fluid", "Water")
            .with("Cold Inlet Temperature", "20")
            .with("Cold Mass Flow Rate", "0.3")
    }

    #[test]
    fn reads_named_fields() {
        let input =
            DoublePipeInput::from_fields(&scenario_fields(), UnitSystem::Si, &StandardCatalog)
                .unwrap();

        let expected = two_in_three(0.5, 0.3);
        assert_eq!(input.geometry, expected.geometry);
        assert_eq!(input.flow, DoublePipeFlow::Counter);
        assert_eq!(input.hot.outlet_temperature, None);
        assert_relative_eq!(
            input.hot.inlet_temperature.get::<degree_celsius>(),
            90.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            input.geometry.inner.inner_diameter.get::<inch>(),
            2.067,
            epsilon = 1e-12
        );
    }

    #[test]
    fn unknown_nominal_size_is_a_lookup_error() {
        let fields = scenario_fields().with("Outer Nominal Diameter", "5");
        let error =
            DoublePipeInput::from_fields(&fields, UnitSystem::Si, &StandardCatalog).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn unknown_flow_arrangement_is_an_input_error() {
        let fields = scenario_fields().with("Flow Arrangement", "crossflow");
        let error =
            DoublePipeInput::from_fields(&fields, UnitSystem::Si, &StandardCatalog).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Input);
    }

    #[test]
    fn labels_cover_both_sides() {
        let solution =
            solve(&two_in_three(0.5, 0.3), &DoublePipeConfig::default(), &TabulatedWater).unwrap();
        let labeled = solution.labeled(UnitSystem::Imperial);

        let names: Vec<_> = labeled.iter().map(|l| l.name).collect();
        assert!(names.contains(&"Hot Outlet Temperature"));
        assert!(names.contains(&"Cold Pressure Drop"));
        assert!(names.contains(&"Required Length"));
    }

    #[test]
    fn u_keeps_rising_as_cold_flow_passes_hot_flow() {
        let config = DoublePipeConfig::default();
        let sweep: Vec<_> = (0..=8)
            .map(|i| {
                let cold = 0.4 + 0.025 * f64::from(i);
                solve(&two_in_three(0.5, cold), &config, &TabulatedWater).unwrap()
            })
            .collect();

        for pair in sweep.windows(2) {
            assert!(
                pair[1].overall_coefficient >= pair[0].overall_coefficient,
                "{:?} -> {:?}",
                pair[0].overall_coefficient,
                pair[1].overall_coefficient
            );
        }
    }

    #[test]
    fn kept_routing_conducts_at_least_as_well_as_the_swap() {
        let input = two_in_three(0.5, 0.5);
        let config = DoublePipeConfig::default();
        let solution = solve(&input, &config, &TabulatedWater).unwrap();

        let m = MassRate::new::<kilogram_per_second>(0.5);
        let swapped = rate(&input, &config, &TabulatedWater, solution.routing.swapped(), [m, m])
            .unwrap();
        assert!(solution.overall_coefficient >= swapped.overall_coefficient);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn more_hot_flow_never_lowers_u(hot in 0.3..0.8_f64, factor in 1.05..2.0_f64) {
            let config = DoublePipeConfig::default();
            let low = solve(&two_in_three(hot, 0.5), &config, &TabulatedWater).unwrap();
            let high = solve(&two_in_three(hot * factor, 0.5), &config, &TabulatedWater).unwrap();
            prop_assert!(high.overall_coefficient >= low.overall_coefficient);
        }

        #[test]
        fn more_cold_flow_never_lowers_u(cold in 0.3..0.8_f64, factor in 1.05..2.0_f64) {
            let config = DoublePipeConfig::default();
            let low = solve(&two_in_three(0.5, cold), &config, &TabulatedWater).unwrap();
            let high = solve(&two_in_three(0.5, cold * factor), &config, &TabulatedWater).unwrap();
            prop_assert!(high.overall_coefficient >= low.overall_coefficient);
        }
    }
}

//! Result records shared by the exchanger solutions.

use tracing::warn;
use uom::si::{
    area::square_meter,
    f64::{
        Area, HeatTransfer, Length, MassRate, Power, Pressure, TemperatureInterval,
        ThermodynamicTemperature, Velocity,
    },
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_rate::kilogram_per_second,
    power::watt,
    pressure::pascal,
    temperature_interval::kelvin as delta_kelvin,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::{
    models::Infeasibility,
    support::{
        correlation::FlowRegime,
        hx::lmtd::log_mean,
        units::{
            FoulingResistance, Labeled, QuantityKind, TemperatureDifference, UnitSystem,
            square_meter_kelvin_per_watt,
        },
    },
};

/// Flow, film, and hydraulic results for one side of an exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideResult {
    pub outlet_temperature: ThermodynamicTemperature,
    pub mass_rate: MassRate,
    pub velocity: Velocity,
    pub reynolds: f64,
    /// Regime of the heat-transfer correlation.
    pub regime: FlowRegime,
    pub film_coefficient: HeatTransfer,
    pub friction_factor: f64,
    pub pressure_drop: Pressure,
}

/// Display names for one side's labeled results.
pub(crate) struct SideLabels {
    pub outlet: &'static str,
    pub velocity: &'static str,
    pub reynolds: &'static str,
    pub film: &'static str,
    pub pressure_drop: &'static str,
}

pub(crate) const HOT_LABELS: SideLabels = SideLabels {
    outlet: "Hot Outlet Temperature",
    velocity: "Hot Velocity",
    reynolds: "Hot Reynolds Number",
    film: "Hot Film Coefficient",
    pressure_drop: "Hot Pressure Drop",
};

pub(crate) const COLD_LABELS: SideLabels = SideLabels {
    outlet: "Cold Outlet Temperature",
    velocity: "Cold Velocity",
    reynolds: "Cold Reynolds Number",
    film: "Cold Film Coefficient",
    pressure_drop: "Cold Pressure Drop",
};

impl SideResult {
    pub(crate) fn labeled(&self, units: UnitSystem, names: &SideLabels) -> [Labeled; 5] {
        [
            units.label(
                names.outlet,
                QuantityKind::Temperature,
                self.outlet_temperature.get::<kelvin>(),
            ),
            units.label(
                names.velocity,
                QuantityKind::Velocity,
                self.velocity.get::<meter_per_second>(),
            ),
            units.label(names.reynolds, QuantityKind::Dimensionless, self.reynolds),
            units.label(
                names.film,
                QuantityKind::HeatTransferCoefficient,
                self.film_coefficient.get::<watt_per_square_meter_kelvin>(),
            ),
            units.label(
                names.pressure_drop,
                QuantityKind::Pressure,
                self.pressure_drop.get::<pascal>(),
            ),
        ]
    }
}

/// Agreement of the three duty estimates of a converged exchanger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeatBalance {
    /// Heat given up by the hot stream, `C_hot·(T_in − T_out)`.
    pub hot: Power,
    /// Heat taken up by the cold stream, `C_cold·(t_out − t_in)`.
    pub cold: Power,
    /// `U·A·F·LMTD`.
    pub exchanger: Power,
    /// Largest deviation from the hot-side duty, relative to it.
    pub imbalance: f64,
}

impl HeatBalance {
    pub(crate) fn new(hot: Power, cold: Power, exchanger: Power, tolerance: f64) -> Self {
        let q = hot.get::<watt>();
        let imbalance = if q == 0.0 {
            0.0
        } else {
            let cold_gap = (q - cold.get::<watt>()).abs();
            let exchanger_gap = (q - exchanger.get::<watt>()).abs();
            cold_gap.max(exchanger_gap) / q.abs()
        };

        if imbalance > tolerance {
            warn!(imbalance, tolerance, "heat balance does not close");
        }

        Self {
            hot,
            cold,
            exchanger,
            imbalance,
        }
    }
}

/// How much exchanger is needed to deliver the clean duty once fouled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequiredSize {
    Length(Length),
    /// Area of each plate.
    PlateArea(Area),
}

/// Performance after fouling builds up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FouledPerformance {
    pub overall_coefficient: HeatTransfer,
    /// Duty at the clean LMTD with the fouled coefficient.
    pub duty: Power,
    /// Total transfer area needed for the clean duty.
    pub required_area: Area,
    pub required_size: RequiredSize,
}

impl FouledPerformance {
    pub(crate) fn labeled(&self, units: UnitSystem) -> [Labeled; 4] {
        let size = match self.required_size {
            RequiredSize::Length(l) => {
                units.label("Required Length", QuantityKind::Length, l.get::<meter>())
            }
            RequiredSize::PlateArea(a) => units.label(
                "Required Plate Area",
                QuantityKind::Area,
                a.get::<square_meter>(),
            ),
        };
        [
            units.label(
                "Fouled Overall Coefficient",
                QuantityKind::HeatTransferCoefficient,
                self.overall_coefficient.get::<watt_per_square_meter_kelvin>(),
            ),
            units.label("Fouled Duty", QuantityKind::Power, self.duty.get::<watt>()),
            units.label(
                "Required Area",
                QuantityKind::Area,
                self.required_area.get::<square_meter>(),
            ),
            size,
        ]
    }
}

/// `1/U_f = 1/U + R_fi·(A_o/A_i) + R_fo`.
pub(crate) fn fouled_coefficient(
    clean: HeatTransfer,
    inner: FoulingResistance,
    outer: FoulingResistance,
    outer_over_inner_area: f64,
) -> HeatTransfer {
    let resistance = 1.0 / clean.get::<watt_per_square_meter_kelvin>()
        + square_meter_kelvin_per_watt(inner) * outer_over_inner_area
        + square_meter_kelvin_per_watt(outer);
    HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0 / resistance)
}

/// Rejects inlets that leave no driving temperature difference.
pub(crate) fn check_inlets(
    hot: ThermodynamicTemperature,
    cold: ThermodynamicTemperature,
) -> Result<(), Infeasibility> {
    if hot > cold {
        Ok(())
    } else {
        Err(Infeasibility::InletOrdering { hot, cold })
    }
}

/// Log mean of two terminal differences, or a temperature cross.
pub(crate) fn lmtd(
    dt1: TemperatureInterval,
    dt2: TemperatureInterval,
) -> Result<TemperatureInterval, Infeasibility> {
    log_mean(dt1, dt2).ok_or(Infeasibility::TemperatureCross { dt1, dt2 })
}

/// Counter-flow terminal differences `(T1 − t2, T2 − t1)`.
pub(crate) fn counter_flow_ends(
    hot_in: ThermodynamicTemperature,
    hot_out: ThermodynamicTemperature,
    cold_in: ThermodynamicTemperature,
    cold_out: ThermodynamicTemperature,
) -> (TemperatureInterval, TemperatureInterval) {
    (hot_in.minus(cold_out), hot_out.minus(cold_in))
}

/// Labels shared by every exchanger solution.
pub(crate) fn overall_labels(
    units: UnitSystem,
    overall_coefficient: HeatTransfer,
    duty: Power,
    lmtd: TemperatureInterval,
    balance: &HeatBalance,
) -> [Labeled; 4] {
    [
        units.label(
            "Overall Coefficient",
            QuantityKind::HeatTransferCoefficient,
            overall_coefficient.get::<watt_per_square_meter_kelvin>(),
        ),
        units.label("Duty", QuantityKind::Power, duty.get::<watt>()),
        units.label(
            "LMTD",
            QuantityKind::TemperatureDifference,
            lmtd.get::<delta_kelvin>(),
        ),
        units.label(
            "Heat Balance Imbalance",
            QuantityKind::Dimensionless,
            balance.imbalance,
        ),
    ]
}

pub(crate) fn mass_rate_label(units: UnitSystem, name: &'static str, m: MassRate) -> Labeled {
    units.label(name, QuantityKind::MassRate, m.get::<kilogram_per_second>())
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::thermodynamic_temperature::degree_celsius;

    use crate::support::units::fouling_resistance;

    fn w(v: f64) -> Power {
        Power::new::<watt>(v)
    }

    #[test]
    fn imbalance_is_relative_to_hot_duty() {
        let balance = HeatBalance::new(w(1000.0), w(990.0), w(1005.0), 0.02);
        assert_relative_eq!(balance.imbalance, 0.01, epsilon = 1e-12);
    }

    #[test]
    fn fouling_adds_series_resistance() {
        let u = HeatTransfer::new::<watt_per_square_meter_kelvin>(1000.0);
        let r = fouling_resistance(1.76e-4);
        let fouled = fouled_coefficient(u, r, r, 1.25);
        let expected = 1.0 / (1e-3 + 1.76e-4 * 1.25 + 1.76e-4);
        assert_relative_eq!(
            fouled.get::<watt_per_square_meter_kelvin>(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn cross_is_reported_with_both_ends() {
        let hot_in = ThermodynamicTemperature::new::<degree_celsius>(80.0);
        let hot_out = ThermodynamicTemperature::new::<degree_celsius>(30.0);
        let cold_in = ThermodynamicTemperature::new::<degree_celsius>(40.0);
        let cold_out = ThermodynamicTemperature::new::<degree_celsius>(60.0);
        let (dt1, dt2) = counter_flow_ends(hot_in, hot_out, cold_in, cold_out);

        assert!(matches!(
            lmtd(dt1, dt2),
            Err(Infeasibility::TemperatureCross { .. })
        ));
    }

    #[test]
    fn inlets_must_be_ordered() {
        let t = ThermodynamicTemperature::new::<degree_celsius>(50.0);
        assert!(matches!(
            check_inlets(t, t),
            Err(Infeasibility::InletOrdering { .. })
        ));
    }
}

use uom::{
    si::{
        ISQ, Quantity, SI,
        area::square_meter,
        f64::{Area, Force, HeatTransfer, Length, ThermalConductance},
        force::newton,
        heat_transfer::watt_per_square_meter_kelvin,
        length::meter,
        ratio::ratio,
        thermal_conductance::watt_per_kelvin,
    },
    typenum::{N1, N2, P1, P2, P3, Z0},
};

/// Specific enthalpy (and latent heat), J/kg in SI.
pub type SpecificEnthalpy = Quantity<ISQ<P2, Z0, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Surface tension, N/m in SI.
pub type SurfaceTension = Quantity<ISQ<Z0, P1, N2, Z0, Z0, Z0, Z0>, SI<f64>, f64>;

/// Area-specific thermal resistance (fouling factor), m²·K/W in SI.
pub type FoulingResistance = Quantity<ISQ<Z0, N1, P3, Z0, P1, Z0, Z0>, SI<f64>, f64>;

/// Builds a [`SurfaceTension`] from a value in N/m.
#[must_use]
pub fn surface_tension(newton_per_meter: f64) -> SurfaceTension {
    Force::new::<newton>(newton_per_meter) / Length::new::<meter>(1.0)
}

/// Builds a [`FoulingResistance`] from a value in m²·K/W.
#[must_use]
pub fn fouling_resistance(square_meter_kelvin_per_watt: f64) -> FoulingResistance {
    Area::new::<square_meter>(square_meter_kelvin_per_watt)
        / ThermalConductance::new::<watt_per_kelvin>(1.0)
}

/// Reads a [`SurfaceTension`] in N/m.
#[must_use]
pub fn newton_per_meter(tension: SurfaceTension) -> f64 {
    (tension * Length::new::<meter>(1.0)).get::<newton>()
}

/// Reads a [`FoulingResistance`] in m²·K/W.
#[must_use]
pub fn square_meter_kelvin_per_watt(resistance: FoulingResistance) -> f64 {
    (resistance * HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0)).get::<ratio>()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn surface_tension_reads_back_in_newton_per_meter() {
        assert_relative_eq!(newton_per_meter(surface_tension(0.0589)), 0.0589);
    }

    #[test]
    fn fouling_resistance_inverts_a_film_coefficient() {
        let r = fouling_resistance(1.76e-4);
        let h = HeatTransfer::new::<watt_per_square_meter_kelvin>(1.0 / 1.76e-4);
        assert_relative_eq!((r * h).get::<ratio>(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(square_meter_kelvin_per_watt(r), 1.76e-4, max_relative = 1e-12);
    }
}

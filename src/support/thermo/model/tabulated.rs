//! Saturated water table with linear interpolation.
//!
//! Rows span the triple point to 150 °C. Liquid properties are taken along
//! the saturation curve, which is the usual engineering treatment for
//! compressed liquid water at the pressures these exchangers see.
//! Superheated vapor is not tabulated.

use uom::si::{
    f64::ThermodynamicTemperature, pressure::pascal, thermodynamic_temperature::degree_celsius,
};

use crate::support::thermo::{Condition, Fluid, Phase, Property, PropertyError, PropertyProvider};

/// One saturated row, in table units (°C, kPa, kJ/kg).
#[derive(Debug, Clone, Copy)]
struct Row {
    t: f64,
    psat: f64,
    rho_l: f64,
    rho_v: f64,
    h_f: f64,
    h_fg: f64,
    cp_l: f64,
    cp_v: f64,
    k_l: f64,
    k_v: f64,
    mu_l: f64,
    mu_v: f64,
    sigma: f64,
}

const fn row(values: [f64; 13]) -> Row {
    Row {
        t: values[0],
        psat: values[1],
        rho_l: values[2],
        rho_v: values[3],
        h_f: values[4],
        h_fg: values[5],
        cp_l: values[6],
        cp_v: values[7],
        k_l: values[8],
        k_v: values[9],
        mu_l: values[10],
        mu_v: values[11],
        sigma: values[12],
    }
}

#[rustfmt::skip]
const TABLE: [Row; 26] = [
    //   T °C   Psat kPa  ρl      ρv      hf      hfg     cpl     cpv     kl     kv      μl        μv         σ
    row([0.01,  0.6117,   999.8,  0.0048, 0.0,    2500.9, 4220.0, 1884.0, 0.561, 0.0171, 1.792e-3, 0.922e-5, 0.0756]),
    row([5.0,   0.8725,   999.9,  0.0068, 21.02,  2489.1, 4205.0, 1889.0, 0.571, 0.0173, 1.519e-3, 0.934e-5, 0.0749]),
    row([10.0,  1.2281,   999.7,  0.0094, 42.02,  2477.2, 4194.0, 1895.0, 0.580, 0.0176, 1.307e-3, 0.946e-5, 0.0742]),
    row([15.0,  1.7057,   999.1,  0.0128, 62.98,  2465.4, 4186.0, 1863.0, 0.589, 0.0179, 1.138e-3, 0.959e-5, 0.0735]),
    row([20.0,  2.3392,   998.0,  0.0173, 83.91,  2453.5, 4182.0, 1874.0, 0.598, 0.0182, 1.002e-3, 0.973e-5, 0.0727]),
    row([25.0,  3.1698,   997.0,  0.0231, 104.83, 2441.7, 4180.0, 1888.0, 0.607, 0.0186, 0.891e-3, 0.987e-5, 0.0720]),
    row([30.0,  4.2469,   996.0,  0.0304, 125.74, 2429.8, 4178.0, 1904.0, 0.615, 0.0189, 0.798e-3, 1.001e-5, 0.0712]),
    row([35.0,  5.6291,   994.0,  0.0397, 146.64, 2417.9, 4178.0, 1919.0, 0.623, 0.0192, 0.720e-3, 1.016e-5, 0.0704]),
    row([40.0,  7.3851,   992.1,  0.0512, 167.53, 2406.0, 4179.0, 1935.0, 0.631, 0.0196, 0.653e-3, 1.031e-5, 0.0696]),
    row([45.0,  9.5953,   990.1,  0.0655, 188.44, 2394.0, 4180.0, 1953.0, 0.637, 0.0200, 0.596e-3, 1.046e-5, 0.0688]),
    row([50.0,  12.352,   988.1,  0.0831, 209.34, 2382.0, 4181.0, 1971.0, 0.644, 0.0204, 0.547e-3, 1.062e-5, 0.0679]),
    row([55.0,  15.763,   985.2,  0.1045, 230.26, 2369.8, 4183.0, 1990.0, 0.649, 0.0208, 0.504e-3, 1.077e-5, 0.0671]),
    row([60.0,  19.947,   983.3,  0.1304, 251.18, 2357.7, 4185.0, 2010.0, 0.654, 0.0212, 0.467e-3, 1.093e-5, 0.0662]),
    row([65.0,  25.043,   980.4,  0.1614, 272.12, 2345.4, 4187.0, 2031.0, 0.659, 0.0216, 0.433e-3, 1.110e-5, 0.0654]),
    row([70.0,  31.202,   977.5,  0.1983, 293.07, 2333.0, 4190.0, 2054.0, 0.663, 0.0221, 0.404e-3, 1.126e-5, 0.0645]),
    row([75.0,  38.597,   974.7,  0.2421, 314.03, 2320.6, 4193.0, 2078.0, 0.667, 0.0225, 0.378e-3, 1.142e-5, 0.0636]),
    row([80.0,  47.416,   971.8,  0.2935, 335.02, 2308.0, 4197.0, 2104.0, 0.670, 0.0230, 0.355e-3, 1.159e-5, 0.0627]),
    row([85.0,  57.868,   968.1,  0.3536, 356.02, 2295.3, 4201.0, 2132.0, 0.673, 0.0235, 0.333e-3, 1.176e-5, 0.0617]),
    row([90.0,  70.183,   965.3,  0.4235, 377.04, 2282.5, 4206.0, 2161.0, 0.675, 0.0240, 0.315e-3, 1.193e-5, 0.0608]),
    row([95.0,  84.609,   961.5,  0.5045, 398.09, 2269.6, 4212.0, 2192.0, 0.677, 0.0246, 0.297e-3, 1.210e-5, 0.0599]),
    row([100.0, 101.42,   957.9,  0.5978, 419.17, 2256.4, 4217.0, 2029.0, 0.679, 0.0251, 0.282e-3, 1.227e-5, 0.0589]),
    row([110.0, 143.38,   950.6,  0.8263, 461.42, 2229.7, 4229.0, 2071.0, 0.682, 0.0262, 0.255e-3, 1.261e-5, 0.0570]),
    row([120.0, 198.67,   943.4,  1.121,  503.81, 2202.1, 4244.0, 2120.0, 0.683, 0.0275, 0.232e-3, 1.296e-5, 0.0550]),
    row([130.0, 270.28,   934.6,  1.496,  546.38, 2173.7, 4263.0, 2177.0, 0.684, 0.0288, 0.213e-3, 1.330e-5, 0.0529]),
    row([140.0, 361.53,   921.7,  1.965,  589.16, 2144.1, 4286.0, 2244.0, 0.683, 0.0301, 0.197e-3, 1.365e-5, 0.0509]),
    row([150.0, 476.16,   916.6,  2.546,  632.18, 2113.8, 4311.0, 2314.0, 0.682, 0.0316, 0.183e-3, 1.399e-5, 0.0487]),
];

/// Built-in provider for water, backed by a saturated property table.
///
/// - `Single { temperature, pressure }` returns liquid properties at
///   `temperature`. A pressure below saturation is out of domain.
/// - `Saturated` and `SaturatedAtPressure` return the requested phase.
/// - Saturation pressure is interpolated on `ln P`, so inverting it for the
///   saturation temperature is exact at table rows.
///
/// Any fluid other than [`Fluid::Water`] is out of domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabulatedWater;

/// Bracketing rows and the interpolation weight between them.
#[derive(Debug, Clone, Copy)]
struct Span {
    lo: Row,
    hi: Row,
    w: f64,
}

impl Span {
    fn at_celsius(t: f64) -> Result<Self, PropertyError> {
        let first = TABLE[0];
        let last = TABLE[TABLE.len() - 1];
        if !(first.t..=last.t).contains(&t) {
            return Err(PropertyError::out_of_domain(format!(
                "water temperature {t:.2} °C outside {:.2}..={:.2} °C",
                first.t, last.t
            )));
        }

        let i = TABLE
            .windows(2)
            .position(|pair| t <= pair[1].t)
            .unwrap_or(TABLE.len() - 2);
        let (lo, hi) = (TABLE[i], TABLE[i + 1]);
        Ok(Self {
            lo,
            hi,
            w: (t - lo.t) / (hi.t - lo.t),
        })
    }

    fn at_kpa(p: f64) -> Result<Self, PropertyError> {
        let first = TABLE[0];
        let last = TABLE[TABLE.len() - 1];
        if !(first.psat..=last.psat).contains(&p) {
            return Err(PropertyError::out_of_domain(format!(
                "water saturation pressure {p:.4} kPa outside {:.4}..={:.2} kPa",
                first.psat, last.psat
            )));
        }

        let i = TABLE
            .windows(2)
            .position(|pair| p <= pair[1].psat)
            .unwrap_or(TABLE.len() - 2);
        let (lo, hi) = (TABLE[i], TABLE[i + 1]);
        Ok(Self {
            lo,
            hi,
            w: (p.ln() - lo.psat.ln()) / (hi.psat.ln() - lo.psat.ln()),
        })
    }

    fn lerp(&self, column: impl Fn(&Row) -> f64) -> f64 {
        let (a, b) = (column(&self.lo), column(&self.hi));
        a + self.w * (b - a)
    }

    fn celsius(&self) -> f64 {
        self.lerp(|r| r.t)
    }

    fn psat_kpa(&self) -> f64 {
        let ln = self.lerp(|r| r.psat.ln());
        ln.exp()
    }
}

fn phase_value(span: &Span, property: Property, phase: Phase) -> Result<f64, PropertyError> {
    let (rho, cp, k, mu) = match phase {
        Phase::Liquid => (
            span.lerp(|r| r.rho_l),
            span.lerp(|r| r.cp_l),
            span.lerp(|r| r.k_l),
            span.lerp(|r| r.mu_l),
        ),
        Phase::Vapor => (
            span.lerp(|r| r.rho_v),
            span.lerp(|r| r.cp_v),
            span.lerp(|r| r.k_v),
            span.lerp(|r| r.mu_v),
        ),
    };

    Ok(match property {
        Property::Density => rho,
        Property::Viscosity => mu,
        Property::ThermalConductivity => k,
        Property::SpecificHeat => cp,
        Property::Prandtl => cp * mu / k,
        Property::SaturatedLiquidEnthalpy => span.lerp(|r| r.h_f) * 1e3,
        Property::SaturatedVaporEnthalpy => span.lerp(|r| r.h_f + r.h_fg) * 1e3,
        Property::SurfaceTension => span.lerp(|r| r.sigma),
        Property::SaturationTemperature => {
            ThermodynamicTemperature::new::<degree_celsius>(span.celsius()).value
        }
        Property::SaturationPressure => span.psat_kpa() * 1e3,
    })
}

impl PropertyProvider for TabulatedWater {
    fn query(
        &self,
        fluid: Fluid,
        property: Property,
        condition: Condition,
    ) -> Result<f64, PropertyError> {
        if fluid != Fluid::Water {
            return Err(PropertyError::out_of_domain(format!(
                "{fluid} is not tabulated"
            )));
        }

        match condition {
            Condition::Single {
                temperature,
                pressure,
            } => {
                let span = Span::at_celsius(temperature.get::<degree_celsius>())?;
                let p_kpa = pressure.get::<pascal>() / 1e3;
                match property {
                    Property::SaturatedLiquidEnthalpy
                    | Property::SaturatedVaporEnthalpy
                    | Property::SurfaceTension => Err(PropertyError::undefined(format!(
                        "{property:?} of single-phase water"
                    ))),
                    Property::SaturationTemperature => {
                        phase_value(&Span::at_kpa(p_kpa)?, property, Phase::Liquid)
                    }
                    Property::SaturationPressure => phase_value(&span, property, Phase::Liquid),
                    _ if p_kpa < span.psat_kpa() => Err(PropertyError::out_of_domain(format!(
                        "water at {:.2} °C and {p_kpa:.3} kPa is superheated vapor",
                        span.celsius()
                    ))),
                    _ => phase_value(&span, property, Phase::Liquid),
                }
            }
            Condition::Saturated { temperature, phase } => {
                let span = Span::at_celsius(temperature.get::<degree_celsius>())?;
                phase_value(&span, property, phase)
            }
            Condition::SaturatedAtPressure { pressure, phase } => {
                let span = Span::at_kpa(pressure.get::<pascal>() / 1e3)?;
                phase_value(&span, property, phase)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::Pressure, pressure::atmosphere, thermodynamic_temperature::kelvin,
    };

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    #[test]
    fn liquid_state_at_table_row() -> Result<(), PropertyError> {
        let state = TabulatedWater.state_at(
            Fluid::Water,
            celsius(20.0),
            Pressure::new::<atmosphere>(1.0),
        )?;

        assert_relative_eq!(state.density.value, 998.0, epsilon = 1e-9);
        assert_relative_eq!(state.specific_heat.value, 4182.0, epsilon = 1e-9);
        assert_relative_eq!(state.prandtl, 4182.0 * 1.002e-3 / 0.598, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn interpolates_between_rows() -> Result<(), PropertyError> {
        let rho = TabulatedWater.query(
            Fluid::Water,
            Property::Density,
            Condition::Saturated {
                temperature: celsius(22.5),
                phase: Phase::Liquid,
            },
        )?;
        assert_relative_eq!(rho, 997.5, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn saturation_at_one_atmosphere_is_near_boiling() -> Result<(), PropertyError> {
        let t = TabulatedWater.saturation_temperature(Fluid::Water, Pressure::new::<atmosphere>(1.0))?;
        assert_relative_eq!(t.get::<degree_celsius>(), 100.0, epsilon = 0.05);

        let sat = TabulatedWater.saturation_at(Fluid::Water, celsius(100.0))?;
        assert_relative_eq!(sat.latent_heat().value, 2_256_400.0, epsilon = 1e-6);
        assert_relative_eq!(sat.pressure.get::<pascal>(), 101_420.0, epsilon = 1e-6);
        assert_relative_eq!(sat.vapor.density.value, 0.5978, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn saturation_temperature_inverts_pressure() -> Result<(), PropertyError> {
        let p = TabulatedWater.query(
            Fluid::Water,
            Property::SaturationPressure,
            Condition::Saturated {
                temperature: celsius(67.0),
                phase: Phase::Liquid,
            },
        )?;
        let t = TabulatedWater.saturation_temperature(Fluid::Water, Pressure::new::<pascal>(p))?;
        assert_relative_eq!(t.get::<kelvin>(), celsius(67.0).get::<kelvin>(), epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn rejects_superheated_and_out_of_range_states() {
        let low_pressure = TabulatedWater.state_at(
            Fluid::Water,
            celsius(120.0),
            Pressure::new::<atmosphere>(1.0),
        );
        assert!(matches!(low_pressure, Err(PropertyError::OutOfDomain { .. })));

        let too_hot = TabulatedWater.state_at(
            Fluid::Water,
            celsius(200.0),
            Pressure::new::<atmosphere>(30.0),
        );
        assert!(matches!(too_hot, Err(PropertyError::OutOfDomain { .. })));
    }

    #[test]
    fn other_fluids_are_out_of_domain() {
        let result = TabulatedWater.state_at(
            Fluid::EngineOil,
            celsius(50.0),
            Pressure::new::<atmosphere>(1.0),
        );
        assert!(matches!(result, Err(PropertyError::OutOfDomain { .. })));
    }

    #[test]
    fn surface_tension_needs_saturation() {
        let result = TabulatedWater.query(
            Fluid::Water,
            Property::SurfaceTension,
            Condition::Single {
                temperature: celsius(50.0),
                pressure: Pressure::new::<atmosphere>(1.0),
            },
        );
        assert!(matches!(result, Err(PropertyError::Undefined { .. })));
    }
}

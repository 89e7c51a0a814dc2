use std::{f64::consts::PI, fmt};

use tracing::debug;
use uom::si::{
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{HeatTransfer, MassRate, Power, ThermodynamicTemperature},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{
        thermo::{Fluid, FluidState, PropertyProvider},
        units::SpecificEnthalpy,
    },
};

use super::{
    Condensation, FilmConfig, HorizontalTube, TubeInTube, VerticalPlate, VerticalPlateHeight,
    film_reynolds::{self, FilmModel, FilmProblem},
};

/// Condensate film regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilmRegime {
    Laminar,
    WavyLaminar,
    Turbulent,
}

impl fmt::Display for FilmRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Laminar => "laminar",
            Self::WavyLaminar => "wavy-laminar",
            Self::Turbulent => "turbulent",
        })
    }
}

const WAVY_ONSET_P: f64 = 15.8;
const TURBULENT_ONSET_P: f64 = 2530.0;
const WAVY_ONSET_RE: f64 = 30.0;
const TURBULENT_ONSET_RE: f64 = 1800.0;

/// Vertical plate coefficient `h·(ν²/g)^(1/3)/k` from the heat-flux parameter `P`.
pub(super) fn plate_parameter(p: f64, prandtl: f64) -> (f64, FilmRegime) {
    if p <= WAVY_ONSET_P {
        (0.943 * p.powf(-0.25), FilmRegime::Laminar)
    } else if p < TURBULENT_ONSET_P {
        ((0.68 * p + 0.89).powf(0.82) / p, FilmRegime::WavyLaminar)
    } else {
        let inner = (0.024 * p - 53.0) * prandtl.sqrt() + 89.0;
        (inner.powf(4.0 / 3.0) / p, FilmRegime::Turbulent)
    }
}

/// Vertical plate coefficient `h·(ν²/g)^(1/3)/k` from the film Reynolds number.
pub(super) fn film_parameter(reynolds: f64, prandtl: f64) -> (f64, FilmRegime) {
    if reynolds <= WAVY_ONSET_RE {
        (1.47 * reynolds.powf(-1.0 / 3.0), FilmRegime::Laminar)
    } else if reynolds <= TURBULENT_ONSET_RE {
        (
            reynolds / (1.08 * reynolds.powf(1.22) - 5.2),
            FilmRegime::WavyLaminar,
        )
    } else {
        (
            reynolds / (8750.0 + 58.0 / prandtl.sqrt() * (reynolds.powf(0.75) - 253.0)),
            FilmRegime::Turbulent,
        )
    }
}

fn mean(a: ThermodynamicTemperature, b: ThermodynamicTemperature) -> ThermodynamicTemperature {
    ThermodynamicTemperature::new::<kelvin>(0.5 * (a.get::<kelvin>() + b.get::<kelvin>()))
}

/// Subcooling of the surface below saturation, in kelvin.
fn subcooling(
    saturation: ThermodynamicTemperature,
    surface: ThermodynamicTemperature,
) -> Result<f64, Infeasibility> {
    let dt = saturation.get::<kelvin>() - surface.get::<kelvin>();
    if dt > 0.0 {
        Ok(dt)
    } else {
        Err(Infeasibility::no_driving_temperature(format!(
            "surface at {:.2} K is not below saturation at {:.2} K",
            surface.get::<kelvin>(),
            saturation.get::<kelvin>()
        )))
    }
}

fn positive(value: f64, context: &str) -> Result<f64, Infeasibility> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(Infeasibility::degenerate(context))
    }
}

/// Liquid film properties in SI base units.
#[derive(Debug, Clone, Copy)]
struct Film {
    density: f64,
    viscosity: f64,
    conductivity: f64,
    specific_heat: f64,
    prandtl: f64,
}

impl Film {
    fn at(
        provider: &impl PropertyProvider,
        fluid: Fluid,
        temperature: ThermodynamicTemperature,
    ) -> Result<Self, ThermalError> {
        let FluidState {
            density,
            viscosity,
            conductivity,
            specific_heat,
            prandtl,
            ..
        } = provider.saturation_at(fluid, temperature)?.liquid;
        Ok(Self {
            density: density.get::<kilogram_per_cubic_meter>(),
            viscosity: viscosity.get::<pascal_second>(),
            conductivity: conductivity.get::<watt_per_meter_kelvin>(),
            specific_heat: specific_heat.get::<joule_per_kilogram_kelvin>(),
            prandtl,
        })
    }

    /// `h'fg = hfg + 0.68·cp·ΔT`.
    fn modified_latent_heat(&self, latent_heat: f64, dt: f64) -> f64 {
        latent_heat + 0.68 * self.specific_heat * dt
    }

    /// Viscous length `(ν²/g)^(1/3)`.
    fn viscous_length(&self, gravity: f64) -> f64 {
        let nu = self.viscosity / self.density;
        (nu * nu / gravity).cbrt()
    }
}

fn condensation(
    saturation_temperature: ThermodynamicTemperature,
    coefficient: f64,
    duty: f64,
    latent_heat: f64,
    regime: Option<FilmRegime>,
    film_reynolds: Option<f64>,
) -> Condensation {
    Condensation {
        saturation_temperature,
        heat_transfer_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(coefficient),
        duty: Power::new::<watt>(duty),
        condensate_rate: MassRate::new::<kilogram_per_second>(duty / latent_heat),
        latent_heat: SpecificEnthalpy::new::<joule_per_kilogram>(latent_heat),
        regime,
        film_reynolds,
    }
}

pub(super) fn vertical_plate(
    input: &VerticalPlate,
    config: &FilmConfig,
    provider: &impl PropertyProvider,
) -> Result<Condensation, ThermalError> {
    let length = positive(input.length.get::<meter>(), "plate length")?;
    let width = positive(input.width.get::<meter>(), "plate width")?;
    let dt = subcooling(input.saturation_temperature, input.surface_temperature)?;

    let film = Film::at(
        provider,
        input.fluid,
        mean(input.saturation_temperature, input.surface_temperature),
    )?;
    let latent_heat = match input.latent_heat {
        Some(h) => h,
        None => provider
            .saturation_at(input.fluid, input.saturation_temperature)?
            .latent_heat(),
    }
    .get::<joule_per_kilogram>();
    let h_fg = film.modified_latent_heat(latent_heat, dt);
    let lc = film.viscous_length(config.gravity());

    let p = film.conductivity * length * dt / (film.viscosity * h_fg * lc);
    let (parameter, regime) = plate_parameter(p, film.prandtl);
    let h = parameter * film.conductivity / lc;
    let q = h * length * width * dt;
    debug!(p, %regime, "vertical plate film");

    Ok(condensation(
        input.saturation_temperature,
        h,
        q,
        h_fg,
        Some(regime),
        Some(4.0 * q / (width * film.viscosity * h_fg)),
    ))
}

pub(super) fn vertical_plate_height(
    input: &VerticalPlateHeight,
    config: &FilmConfig,
    provider: &impl PropertyProvider,
) -> Result<Condensation, ThermalError> {
    let height = positive(input.height.get::<meter>(), "plate height")?;
    let width = positive(input.width.get::<meter>(), "plate width")?;
    let t_sat = provider.saturation_temperature(input.fluid, input.pressure)?;
    let dt = subcooling(t_sat, input.surface_temperature)?;

    let film = Film::at(provider, input.fluid, mean(t_sat, input.surface_temperature))?;
    let latent_heat = provider
        .saturation_at(input.fluid, t_sat)?
        .latent_heat()
        .get::<joule_per_kilogram>();
    let h_fg = film.modified_latent_heat(latent_heat, dt);

    let point = film_reynolds::solve(
        &FilmModel {
            prandtl: film.prandtl,
            coefficient_scale: film.conductivity / film.viscous_length(config.gravity()),
        },
        &FilmProblem {
            reynolds_per_coefficient: 4.0 * height * dt / (film.viscosity * h_fg),
        },
        config,
    )?;
    debug!(reynolds = point.reynolds, regime = %point.regime, "vertical plate film");

    Ok(condensation(
        t_sat,
        point.coefficient,
        point.coefficient * height * width * dt,
        h_fg,
        Some(point.regime),
        Some(point.reynolds),
    ))
}

pub(super) fn horizontal_tube(
    input: &HorizontalTube,
    config: &FilmConfig,
    provider: &impl PropertyProvider,
) -> Result<Condensation, ThermalError> {
    let d = positive(input.outer_diameter.get::<meter>(), "tube diameter")?;
    let length = positive(input.length.get::<meter>(), "tube length")?;
    if input.tubes_per_column == 0 {
        return Err(Infeasibility::degenerate("tube column is empty").into());
    }
    let n = f64::from(input.tubes_per_column);

    let t_sat = provider.saturation_temperature(input.fluid, input.pressure)?;
    let dt = subcooling(t_sat, input.surface_temperature)?;
    let saturated = provider.saturation_at(input.fluid, t_sat)?;
    let film = Film::at(provider, input.fluid, mean(t_sat, input.surface_temperature))?;
    let rho_v = saturated.vapor.density.get::<kilogram_per_cubic_meter>();
    let latent_heat = saturated.latent_heat().get::<joule_per_kilogram>();
    let h_fg = film.modified_latent_heat(latent_heat, dt);

    let k = film.conductivity;
    let single = 0.729
        * (config.gravity() * film.density * (film.density - rho_v) * k.powi(3) * h_fg
            / (film.viscosity * d * dt))
            .powf(0.25);
    let h = single * n.powf(-0.25);
    let q = h * n * PI * d * length * dt;

    let reynolds = 4.0 * q / (h_fg * film.viscosity * length);
    let regime = if reynolds >= TURBULENT_ONSET_RE {
        FilmRegime::Turbulent
    } else {
        FilmRegime::Laminar
    };

    Ok(condensation(
        t_sat,
        h,
        q,
        h_fg,
        Some(regime),
        Some(reynolds),
    ))
}

pub(super) fn tube_in_tube(
    input: &TubeInTube,
    config: &FilmConfig,
    provider: &impl PropertyProvider,
) -> Result<Condensation, ThermalError> {
    let od = positive(input.outer_diameter.get::<meter>(), "tube outer diameter")?;
    let id = positive(input.inner_diameter.get::<meter>(), "tube inner diameter")?;
    if id >= od {
        return Err(Infeasibility::degenerate("tube inner diameter is not below outer").into());
    }
    let length = positive(input.length.get::<meter>(), "tube length")?;
    let k_wall = input
        .wall_conductivity
        .unwrap_or(config.wall_conductivity)
        .get::<watt_per_meter_kelvin>();
    let h_o = input.outer_coefficient.get::<watt_per_square_meter_kelvin>();
    let h_i = input.inner_coefficient.get::<watt_per_square_meter_kelvin>();

    let t_sat = provider.saturation_temperature(input.fluid, input.pressure)?;
    let dt = subcooling(t_sat, input.coolant_temperature)?;
    let latent_heat = provider
        .saturation_at(input.fluid, t_sat)?
        .latent_heat()
        .get::<joule_per_kilogram>();

    let u = 1.0 / (od / (id * h_i) + od * (od / id).ln() / (2.0 * k_wall) + 1.0 / h_o);
    let q = u * PI * od * length * dt;

    Ok(condensation(t_sat, u, q, latent_heat, None, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Pressure},
        pressure::atmosphere,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::thermo::model::TabulatedWater;

    fn celsius(t: f64) -> ThermodynamicTemperature {
        ThermodynamicTemperature::new::<degree_celsius>(t)
    }

    fn m(v: f64) -> Length {
        Length::new::<meter>(v)
    }

    #[test]
    fn plate_regimes_follow_p() {
        assert_eq!(plate_parameter(10.0, 1.75).1, FilmRegime::Laminar);
        assert_eq!(plate_parameter(15.8, 1.75).1, FilmRegime::Laminar);
        assert_eq!(plate_parameter(100.0, 1.75).1, FilmRegime::WavyLaminar);
        assert_eq!(plate_parameter(2530.0, 1.75).1, FilmRegime::Turbulent);
        assert_relative_eq!(plate_parameter(1.0, 1.75).0, 0.943);
    }

    #[test]
    fn film_regimes_follow_reynolds() {
        assert_eq!(film_parameter(30.0, 1.75).1, FilmRegime::Laminar);
        assert_eq!(film_parameter(30.1, 1.75).1, FilmRegime::WavyLaminar);
        assert_eq!(film_parameter(1800.0, 1.75).1, FilmRegime::WavyLaminar);
        assert_eq!(film_parameter(1800.1, 1.75).1, FilmRegime::Turbulent);
    }

    #[test]
    fn cengel_forms_meet_at_the_wavy_onset() {
        let (laminar, _) = film_parameter(30.0, 1.75);
        let (wavy, _) = film_parameter(30.0 + 1e-9, 1.75);
        assert_relative_eq!(laminar, wavy, max_relative = 5e-3);
    }

    #[test]
    fn plate_film_reynolds_counts_condensate() {
        let input = VerticalPlate {
            fluid: Fluid::Water,
            surface_temperature: celsius(80.0),
            saturation_temperature: celsius(100.0),
            length: m(1.0),
            width: m(0.5),
            latent_heat: None,
        };
        let result = vertical_plate(&input, &FilmConfig::default(), &TabulatedWater).unwrap();
        assert_eq!(result.regime, Some(FilmRegime::WavyLaminar));

        let mu = TabulatedWater
            .saturation_at(Fluid::Water, celsius(90.0))
            .unwrap()
            .liquid
            .viscosity
            .get::<pascal_second>();
        let re = result.film_reynolds.unwrap();
        let rate = result.condensate_rate.get::<kilogram_per_second>();
        assert_relative_eq!(re, 4.0 * rate / (0.5 * mu), max_relative = 1e-9);
        assert!(result.duty.get::<watt>() > 0.0);
    }

    #[test]
    fn given_latent_heat_is_used() {
        let mut input = VerticalPlate {
            fluid: Fluid::Water,
            surface_temperature: celsius(80.0),
            saturation_temperature: celsius(100.0),
            length: m(1.0),
            width: m(0.5),
            latent_heat: None,
        };
        let table = vertical_plate(&input, &FilmConfig::default(), &TabulatedWater).unwrap();

        input.latent_heat = Some(table.latent_heat * 0.5);
        let halved = vertical_plate(&input, &FilmConfig::default(), &TabulatedWater).unwrap();
        assert!(halved.condensate_rate > table.condensate_rate);
    }

    #[test]
    fn surface_above_saturation_is_infeasible() {
        let input = VerticalPlate {
            fluid: Fluid::Water,
            surface_temperature: celsius(100.0),
            saturation_temperature: celsius(100.0),
            length: m(1.0),
            width: m(0.5),
            latent_heat: None,
        };
        let error = vertical_plate(&input, &FilmConfig::default(), &TabulatedWater).unwrap_err();
        assert!(matches!(
            error,
            ThermalError::Infeasible(Infeasibility::NoDrivingTemperature { .. })
        ));
    }

    #[test]
    fn plate_height_balances_its_film_reynolds() {
        let input = VerticalPlateHeight {
            fluid: Fluid::Water,
            surface_temperature: celsius(80.0),
            height: m(1.0),
            width: m(0.5),
            pressure: Pressure::new::<atmosphere>(1.0),
        };
        let result =
            vertical_plate_height(&input, &FilmConfig::default(), &TabulatedWater).unwrap();

        let re = result.film_reynolds.unwrap();
        let rate = result.condensate_rate.get::<kilogram_per_second>();
        let mu = TabulatedWater
            .saturation_at(Fluid::Water, mean(result.saturation_temperature, celsius(80.0)))
            .unwrap()
            .liquid
            .viscosity
            .get::<pascal_second>();
        assert_relative_eq!(re, 4.0 * rate / (0.5 * mu), max_relative = 1e-6);
    }

    #[test]
    fn tube_bank_coefficient_drops_with_depth() {
        let mut input = HorizontalTube {
            fluid: Fluid::Water,
            surface_temperature: celsius(80.0),
            outer_diameter: m(0.025),
            length: m(1.0),
            pressure: Pressure::new::<atmosphere>(1.0),
            tubes_per_column: 1,
        };
        let single = horizontal_tube(&input, &FilmConfig::default(), &TabulatedWater).unwrap();
        input.tubes_per_column = 16;
        let bank = horizontal_tube(&input, &FilmConfig::default(), &TabulatedWater).unwrap();

        assert_relative_eq!(
            bank.heat_transfer_coefficient.get::<watt_per_square_meter_kelvin>(),
            single.heat_transfer_coefficient.get::<watt_per_square_meter_kelvin>() / 2.0,
            max_relative = 1e-9
        );
        assert_eq!(single.regime, Some(FilmRegime::Laminar));
    }

    #[test]
    fn tube_in_tube_series_resistance() {
        let input = TubeInTube {
            fluid: Fluid::Water,
            coolant_temperature: celsius(30.0),
            outer_diameter: m(0.025),
            inner_diameter: m(0.02),
            outer_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(8000.0),
            inner_coefficient: HeatTransfer::new::<watt_per_square_meter_kelvin>(2000.0),
            pressure: Pressure::new::<atmosphere>(1.0),
            length: m(2.0),
            wall_conductivity: None,
        };
        let result = tube_in_tube(&input, &FilmConfig::default(), &TabulatedWater).unwrap();

        let expected =
            1.0 / (0.025 / (0.02 * 2000.0) + 0.025 * 1.25_f64.ln() / (2.0 * 401.0) + 1.0 / 8000.0);
        assert_relative_eq!(
            result.heat_transfer_coefficient.get::<watt_per_square_meter_kelvin>(),
            expected,
            max_relative = 1e-12
        );
        assert!(result.regime.is_none());
    }
}

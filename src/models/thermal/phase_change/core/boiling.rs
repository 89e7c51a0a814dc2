use std::f64::consts::PI;

use tracing::{debug, warn};
use uom::si::{
    acceleration::meter_per_second_squared,
    available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second,
    f64::{HeatFluxDensity, MassRate, Power},
    heat_flux_density::watt_per_square_meter,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    power::watt,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::models::{Infeasibility, ThermalError};
use crate::support::{thermo::PropertyProvider, units::newton_per_meter};

use super::{Boiling, PoolBoiling, PoolBoilingConfig};

/// Rohsenow nucleate boiling flux, in W/m².
///
/// `q″ = μ·hfg·[g(ρl − ρv)/σ]^½·[cp·ΔT/(Csf·hfg·Pr)]³`
#[allow(clippy::too_many_arguments)]
fn rohsenow(
    viscosity: f64,
    latent_heat: f64,
    gravity: f64,
    density_gap: f64,
    surface_tension: f64,
    specific_heat: f64,
    excess: f64,
    surface_factor: f64,
    prandtl: f64,
) -> f64 {
    let buoyancy = (gravity * density_gap / surface_tension).sqrt();
    let superheat = specific_heat * excess / (surface_factor * latent_heat * prandtl);
    viscosity * latent_heat * buoyancy * superheat.powi(3)
}

pub(super) fn pool_boiling(
    input: &PoolBoiling,
    config: &PoolBoilingConfig,
    provider: &impl PropertyProvider,
) -> Result<Boiling, ThermalError> {
    let d = input.diameter.get::<meter>();
    let length = input.length.get::<meter>();
    if d <= 0.0 || length <= 0.0 {
        return Err(Infeasibility::degenerate("heating element diameter or length").into());
    }

    let t_sat = provider.saturation_temperature(input.fluid, input.pressure)?;
    let excess = input.surface_temperature.get::<kelvin>() - t_sat.get::<kelvin>();
    if excess <= 0.0 {
        return Err(Infeasibility::no_driving_temperature(format!(
            "surface is {:.2} K from saturation, boiling needs superheat",
            excess
        ))
        .into());
    }

    let saturated = provider.saturation_at(input.fluid, t_sat)?;
    let liquid = saturated.liquid;
    let rho_l = liquid.density.get::<kilogram_per_cubic_meter>();
    let rho_v = saturated.vapor.density.get::<kilogram_per_cubic_meter>();
    let sigma = newton_per_meter(saturated.surface_tension);
    let h_fg = saturated.latent_heat().get::<joule_per_kilogram>();
    let g = config.gravity.get::<meter_per_second_squared>();

    let flux = rohsenow(
        liquid.viscosity.get::<pascal_second>(),
        h_fg,
        g,
        rho_l - rho_v,
        sigma,
        liquid.specific_heat.get::<joule_per_kilogram_kelvin>(),
        excess,
        config.surface_factor,
        liquid.prandtl,
    );
    let critical =
        config.critical_flux_coefficient * h_fg * (sigma * g * rho_v * rho_v * (rho_l - rho_v)).powf(0.25);
    let exceeds = flux > critical;
    if exceeds {
        warn!(flux, critical, "nucleate flux exceeds the critical heat flux");
    }
    debug!(excess, flux, critical, "pool boiling");

    let power = flux * PI * d * length;
    Ok(Boiling {
        saturation_temperature: t_sat,
        heat_flux: HeatFluxDensity::new::<watt_per_square_meter>(flux),
        critical_heat_flux: HeatFluxDensity::new::<watt_per_square_meter>(critical),
        exceeds_critical_heat_flux: exceeds,
        power: Power::new::<watt>(power),
        evaporation_rate: MassRate::new::<kilogram_per_second>(power / h_fg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::{Length, Pressure, ThermodynamicTemperature},
        pressure::atmosphere,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::thermo::{Fluid, model::TabulatedWater};

    fn element(surface: f64) -> PoolBoiling {
        PoolBoiling {
            fluid: Fluid::Water,
            surface_temperature: ThermodynamicTemperature::new::<degree_celsius>(surface),
            diameter: Length::new::<meter>(0.005),
            length: Length::new::<meter>(0.5),
            pressure: Pressure::new::<atmosphere>(1.0),
        }
    }

    #[test]
    fn water_at_ten_kelvin_superheat() {
        let result =
            pool_boiling(&element(110.0), &PoolBoilingConfig::default(), &TabulatedWater).unwrap();

        let flux = result.heat_flux.get::<watt_per_square_meter>();
        assert!(flux > 1e5 && flux < 2e5, "flux {flux}");
        assert!(!result.exceeds_critical_heat_flux);
        assert_relative_eq!(
            result.power.get::<watt>(),
            flux * PI * 0.005 * 0.5,
            max_relative = 1e-12
        );
    }

    #[test]
    fn flux_is_cubic_in_superheat() {
        let config = PoolBoilingConfig::default();
        let t_sat = TabulatedWater
            .saturation_temperature(Fluid::Water, Pressure::new::<atmosphere>(1.0))
            .unwrap()
            .get::<degree_celsius>();

        let low = pool_boiling(&element(t_sat + 5.0), &config, &TabulatedWater).unwrap();
        let high = pool_boiling(&element(t_sat + 10.0), &config, &TabulatedWater).unwrap();
        assert_relative_eq!(
            high.heat_flux.get::<watt_per_square_meter>()
                / low.heat_flux.get::<watt_per_square_meter>(),
            8.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn large_superheat_passes_the_critical_flux() {
        let result =
            pool_boiling(&element(135.0), &PoolBoilingConfig::default(), &TabulatedWater).unwrap();
        assert!(result.exceeds_critical_heat_flux);
    }

    #[test]
    fn subcooled_surface_is_infeasible() {
        let error =
            pool_boiling(&element(95.0), &PoolBoilingConfig::default(), &TabulatedWater)
                .unwrap_err();
        assert!(matches!(
            error,
            ThermalError::Infeasible(Infeasibility::NoDrivingTemperature { .. })
        ));
    }
}

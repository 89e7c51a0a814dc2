use std::f64::consts::PI;

use tracing::debug;
use uom::si::{
    acceleration::meter_per_second_squared, angle::radian, available_energy::joule_per_kilogram,
    dynamic_viscosity::pascal_second, f64::Power, length::meter,
    mass_density::kilogram_per_cubic_meter, power::watt, pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::kelvin,
};

use crate::{
    models::{Infeasibility, ThermalError},
    support::{correlation::FlowRegime, thermo::SaturationState, units::newton_per_meter},
};

use super::{HeatPipeConfig, HeatPipeGeometry, HeatPipeLimits};

/// Effective wick conductivity of a liquid-saturated screen.
///
/// `k_l·[(k_l + k_w) − (1 − ε)(k_l − k_w)] / [(k_l + k_w) + (1 − ε)(k_l − k_w)]`
fn effective_conductivity(liquid: f64, wick: f64, porosity: f64) -> f64 {
    let sum = liquid + wick;
    let gap = (1.0 - porosity) * (liquid - wick);
    liquid * (sum - gap) / (sum + gap)
}

pub(super) fn evaluate(
    geometry: &HeatPipeGeometry,
    saturated: &SaturationState,
    config: &HeatPipeConfig,
) -> Result<HeatPipeLimits, ThermalError> {
    let wick = &geometry.wick;
    let g = config.gravity.get::<meter_per_second_squared>();

    let rho_l = saturated.liquid.density.get::<kilogram_per_cubic_meter>();
    let mu_l = saturated.liquid.viscosity.get::<pascal_second>();
    let k_l = saturated.liquid.conductivity.get::<watt_per_meter_kelvin>();
    let rho_v = saturated.vapor.density.get::<kilogram_per_cubic_meter>();
    let mu_v = saturated.vapor.viscosity.get::<pascal_second>();
    let p_v = saturated.pressure.get::<pascal>();
    let sigma = newton_per_meter(saturated.surface_tension);
    let h_fg = saturated.latent_heat().get::<joule_per_kilogram>();
    let t_v = saturated.temperature.get::<kelvin>();

    let d_v = geometry.vapor_diameter.get::<meter>();
    let r_v = d_v / 2.0;
    let d_i = geometry.inner_diameter().get::<meter>();
    let a_v = geometry.vapor_area();
    let a_w = geometry.wick_area();
    let l_eff = geometry.effective_length().get::<meter>();

    let r_ce = wick.pore_radius();
    let capillary_pressure = 2.0 * sigma / r_ce;

    // Pressure drop per watt per meter in each phase.
    let liquid_coefficient = mu_l / (wick.permeability() * a_w * h_fg * rho_l);
    let vapor_coefficient = 16.0 * mu_v / (2.0 * r_v * r_v * a_v * rho_v * h_fg);

    let psi = geometry.inclination.get::<radian>();
    let normal_head = rho_l * g * d_v * psi.cos();
    let axial_head = rho_l * g * geometry.total_length().get::<meter>() * psi.sin();

    let pumping = capillary_pressure - normal_head - axial_head;
    if pumping <= 0.0 {
        return Err(Infeasibility::degenerate(format!(
            "wick capillary pressure {capillary_pressure:.1} Pa does not lift the \
             {:.1} Pa hydrostatic head",
            normal_head + axial_head
        ))
        .into());
    }
    let capillary = pumping / ((liquid_coefficient + vapor_coefficient) * l_eff);

    let sonic = 0.474 * h_fg * a_v * (rho_v * p_v).sqrt();

    let r_hw = (d_i - d_v) / 2.0;
    let entrainment = a_v * h_fg * (sigma * rho_v / (2.0 * r_hw)).sqrt();

    let r_n = wick
        .cavity_radius
        .map_or(r_ce * config.cavity_fraction, |r| r.get::<meter>());
    let nucleation_pressure = 2.0 * sigma / r_n;
    if nucleation_pressure <= capillary_pressure {
        return Err(Infeasibility::degenerate(format!(
            "cavity radius {r_n:.3e} m is not below the pore radius {r_ce:.3e} m"
        ))
        .into());
    }
    let k_w = wick.material.conductivity().get::<watt_per_meter_kelvin>();
    let k_eff = effective_conductivity(k_l, k_w, wick.porosity());
    let boiling = 2.0 * PI * geometry.evaporator_length.get::<meter>() * k_eff * t_v
        / (h_fg * rho_v * (d_i / d_v).ln())
        * (nucleation_pressure - capillary_pressure);

    debug!(capillary, sonic, entrainment, boiling, "heat pipe limits");

    Ok(HeatPipeLimits {
        capillary: Power::new::<watt>(capillary),
        sonic: Power::new::<watt>(sonic),
        entrainment: Power::new::<watt>(entrainment),
        boiling: Power::new::<watt>(boiling),
    })
}

/// Vapor core Reynolds number at `heat_rate`, and its regime.
///
/// The vapor coefficient in the capillary limit assumes laminar vapor flow.
pub(super) fn vapor_check(
    geometry: &HeatPipeGeometry,
    saturated: &SaturationState,
    heat_rate: Power,
    config: &HeatPipeConfig,
) -> (f64, FlowRegime) {
    let d_v = geometry.vapor_diameter.get::<meter>();
    let reynolds = 4.0 * heat_rate.get::<watt>()
        / (PI
            * d_v
            * saturated.vapor.viscosity.get::<pascal_second>()
            * saturated.latent_heat().get::<joule_per_kilogram>());
    let regime = config.vapor_transition.classify(reynolds);
    debug!(reynolds, %regime, "vapor core at the capillary limit");
    (reynolds, regime)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        angle::degree,
        f64::{Angle, Length, ThermodynamicTemperature},
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::thermo::{Fluid, PropertyProvider, model::TabulatedWater};

    use super::super::ScreenWick;

    fn geometry(mesh: f64) -> HeatPipeGeometry {
        HeatPipeGeometry {
            evaporator_length: Length::new::<meter>(0.1),
            adiabatic_length: Length::new::<meter>(0.2),
            condenser_length: Length::new::<meter>(0.1),
            vapor_diameter: Length::new::<meter>(0.01),
            wick: ScreenWick::new(mesh, Length::new::<meter>(1e-4)).with_porosity(0.65),
            inclination: Angle::new::<degree>(0.0),
        }
    }

    fn water_at_60() -> SaturationState {
        TabulatedWater
            .saturation_at(Fluid::Water, ThermodynamicTemperature::new::<degree_celsius>(60.0))
            .unwrap()
    }

    #[test]
    fn conductivity_mixing_bounds() {
        assert_relative_eq!(effective_conductivity(0.65, 0.65, 0.5), 0.65);
        // A fully open wick is all liquid.
        assert_relative_eq!(effective_conductivity(0.65, 14.9, 1.0), 0.65);
        let mixed = effective_conductivity(0.65, 14.9, 0.6);
        assert!(mixed > 0.65 && mixed < 14.9);
    }

    #[test]
    fn capillary_limit_rises_with_mesh_at_fixed_porosity() {
        let saturated = water_at_60();
        let config = HeatPipeConfig::default();

        let limits: Vec<f64> = [3000.0, 4000.0, 6000.0, 8000.0]
            .into_iter()
            .map(|mesh| {
                evaluate(&geometry(mesh), &saturated, &config)
                    .unwrap()
                    .capillary
                    .get::<watt>()
            })
            .collect();

        assert!(limits.windows(2).all(|w| w[1] > w[0]), "{limits:?}");
    }

    #[test]
    fn derived_porosity_outweighs_finer_pores() {
        let saturated = water_at_60();
        let config = HeatPipeConfig::default();
        let derived = |mesh: f64| {
            let mut geometry = geometry(mesh);
            geometry.wick = ScreenWick::new(mesh, Length::new::<meter>(1e-4));
            geometry
        };
        let coarse = derived(2000.0);
        let fine = derived(4000.0);

        assert!(fine.wick.pore_radius() < coarse.wick.pore_radius());
        assert!(fine.wick.porosity() < coarse.wick.porosity());

        let coarse = evaluate(&coarse, &saturated, &config).unwrap();
        let fine = evaluate(&fine, &saturated, &config).unwrap();
        assert!(fine.capillary < coarse.capillary);
    }

    #[test]
    fn sonic_limit_matches_closed_form() {
        let saturated = water_at_60();
        let geometry = geometry(4000.0);
        let limits = evaluate(&geometry, &saturated, &HeatPipeConfig::default()).unwrap();

        let expected = 0.474
            * saturated.latent_heat().get::<joule_per_kilogram>()
            * geometry.vapor_area()
            * (saturated.vapor.density.get::<kilogram_per_cubic_meter>()
                * saturated.pressure.get::<pascal>())
            .sqrt();
        assert_relative_eq!(limits.sonic.get::<watt>(), expected, max_relative = 1e-12);
    }

    #[test]
    fn adverse_tilt_lowers_the_capillary_limit() {
        let saturated = water_at_60();
        let config = HeatPipeConfig::default();
        let level = evaluate(&geometry(4000.0), &saturated, &config).unwrap();

        let mut tilted = geometry(4000.0);
        tilted.inclination = Angle::new::<degree>(5.0);
        let tilted = evaluate(&tilted, &saturated, &config).unwrap();

        assert!(tilted.capillary < level.capillary);
        assert_eq!(tilted.sonic, level.sonic);
    }

    #[test]
    fn head_beyond_the_wick_is_infeasible() {
        let mut vertical = geometry(4000.0);
        vertical.inclination = Angle::new::<degree>(90.0);
        let error = evaluate(&vertical, &water_at_60(), &HeatPipeConfig::default()).unwrap_err();
        assert!(matches!(
            error,
            ThermalError::Infeasible(Infeasibility::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn smaller_cavities_raise_the_boiling_limit() {
        let saturated = water_at_60();
        let base = evaluate(&geometry(4000.0), &saturated, &HeatPipeConfig::default()).unwrap();
        let finer = HeatPipeConfig {
            cavity_fraction: 0.005,
            ..HeatPipeConfig::default()
        };
        let finer = evaluate(&geometry(4000.0), &saturated, &finer).unwrap();
        assert!(finer.boiling > base.boiling);
    }

    #[test]
    fn laminar_vapor_at_a_modest_rate() {
        let (reynolds, regime) = vapor_check(
            &geometry(4000.0),
            &water_at_60(),
            Power::new::<watt>(50.0),
            &HeatPipeConfig::default(),
        );
        assert!(reynolds > 0.0);
        assert_eq!(regime, FlowRegime::Laminar);
    }
}

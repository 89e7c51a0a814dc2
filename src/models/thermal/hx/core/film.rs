use uom::si::{
    f64::{Area, HeatTransfer, Length, MassRate, Pressure, Velocity},
    heat_transfer::watt_per_square_meter_kelvin,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    ratio::ratio,
    thermal_conductivity::watt_per_meter_kelvin,
    velocity::meter_per_second,
};

use crate::{
    models::ThermalError,
    support::{
        correlation::{
            Correlated, DuctKind, Heating, NusseltInput, TransitionReynolds, nusselt, reynolds,
        },
        thermo::FluidState,
    },
};

/// Convective film on one side of an exchanger wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Film {
    pub velocity: Velocity,
    pub reynolds: f64,
    pub nusselt: Correlated,
    pub coefficient: HeatTransfer,
}

/// Where a film flows and how its correlation is chosen.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Duct {
    pub kind: DuctKind,
    pub flow_area: Area,
    /// Diameter used for Re and Nu.
    pub diameter: Length,
    /// Flow length for the developing-flow correlation.
    pub length: Length,
    pub transition: TransitionReynolds,
}

impl Duct {
    pub(crate) fn film(
        &self,
        state: &FluidState,
        mass_rate: MassRate,
        heating: Heating,
    ) -> Result<Film, ThermalError> {
        let velocity = mass_rate / (state.density * self.flow_area);
        let re = reynolds(state.density, velocity, self.diameter, state.viscosity);
        let nu = nusselt(
            self.kind,
            &NusseltInput {
                reynolds: re,
                prandtl: state.prandtl,
                diameter_over_length: (self.diameter / self.length).get::<ratio>(),
                heating,
                transition: self.transition,
            },
        )?;
        let coefficient = HeatTransfer::new::<watt_per_square_meter_kelvin>(
            nu.value * state.conductivity.get::<watt_per_meter_kelvin>()
                / self.diameter.get::<meter>(),
        );

        Ok(Film {
            velocity,
            reynolds: re,
            nusselt: nu,
            coefficient,
        })
    }
}

/// Darcy-Weisbach loss `f·(L/D)·ρV²/2`.
pub(crate) fn darcy_pressure_drop(
    friction: f64,
    length: Length,
    diameter: Length,
    state: &FluidState,
    velocity: Velocity,
) -> Pressure {
    let v = velocity.get::<meter_per_second>();
    Pressure::new::<pascal>(
        friction * (length / diameter).get::<ratio>()
            * state.density.get::<kilogram_per_cubic_meter>()
            * v
            * v
            / 2.0,
    )
}

/// Velocity head `ρV²`, in pascals.
pub(crate) fn dynamic_pressure(state: &FluidState, velocity: Velocity) -> f64 {
    let v = velocity.get::<meter_per_second>();
    state.density.get::<kilogram_per_cubic_meter>() * v * v
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use uom::si::{
        area::square_meter,
        f64::ThermodynamicTemperature,
        mass_rate::kilogram_per_second,
        pressure::atmosphere,
        thermodynamic_temperature::degree_celsius,
    };

    use crate::support::{
        correlation::FlowRegime,
        thermo::{Fluid, PropertyProvider, model::ConstantProperties},
    };

    fn water() -> FluidState {
        ConstantProperties::standard()
            .state_at(
                Fluid::Water,
                ThermodynamicTemperature::new::<degree_celsius>(27.0),
                Pressure::new::<atmosphere>(1.0),
            )
            .unwrap()
    }

    #[test]
    fn turbulent_pipe_film() {
        let d = 0.0525;
        let duct = Duct {
            kind: DuctKind::Pipe,
            flow_area: Area::new::<square_meter>(PI * d * d / 4.0),
            diameter: Length::new::<meter>(d),
            length: Length::new::<meter>(3.0),
            transition: TransitionReynolds::PIPE,
        };
        let state = water();
        let film = duct
            .film(&state, MassRate::new::<kilogram_per_second>(0.5), Heating::Heated)
            .unwrap();

        let re = 4.0 * 0.5 / (PI * d * 8.91e-4);
        assert_relative_eq!(film.reynolds, re, max_relative = 1e-9);
        assert_eq!(film.nusselt.regime, FlowRegime::Turbulent);

        let h = film.nusselt.value * 0.607 / d;
        assert_relative_eq!(
            film.coefficient.get::<watt_per_square_meter_kelvin>(),
            h,
            max_relative = 1e-9
        );
    }

    #[test]
    fn darcy_weisbach() {
        let state = water();
        let dp = darcy_pressure_drop(
            0.02,
            Length::new::<meter>(10.0),
            Length::new::<meter>(0.05),
            &state,
            Velocity::new::<meter_per_second>(2.0),
        );
        assert_relative_eq!(
            dp.get::<pascal>(),
            0.02 * 200.0 * 997.0 * 4.0 / 2.0,
            max_relative = 1e-12
        );
    }
}

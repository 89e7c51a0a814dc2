use std::fmt;

use uom::si::{
    area::{square_foot, square_meter},
    available_energy::{btu_it_per_pound, joule_per_kilogram, kilojoule_per_kilogram},
    dynamic_viscosity::{pascal_second, pound_per_foot_second},
    energy::btu_it,
    f64::{
        Area, DynamicViscosity, Energy, HeatTransfer, Length, MassDensity, MassRate, Power,
        Pressure, ReciprocalLength, TemperatureInterval, ThermalConductivity,
        ThermodynamicTemperature, Time, Velocity, VolumeRate,
    },
    heat_transfer::{
        btu_it_per_hour_square_foot_degree_fahrenheit, watt_per_square_meter_kelvin,
    },
    length::{foot, inch, meter},
    mass_density::{kilogram_per_cubic_meter, pound_per_cubic_foot},
    mass_rate::{kilogram_per_second, pound_per_second},
    power::watt,
    pressure::{pascal, psi},
    ratio::ratio,
    reciprocal_length::reciprocal_meter,
    temperature_interval::{degree_fahrenheit as delta_fahrenheit, kelvin as delta_kelvin},
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin},
    time::hour,
    velocity::{foot_per_second, meter_per_second},
    volume_rate::{cubic_foot_per_second, cubic_meter_per_second},
};

use super::{
    FoulingResistance, SpecificEnthalpy, fouling_resistance, square_meter_kelvin_per_watt,
};

/// One Btu (IT) per hour.
fn btu_per_hour() -> Power {
    Energy::new::<btu_it>(1.0) / Time::new::<hour>(1.0)
}

/// One Btu (IT) per hour, foot, and degree Fahrenheit.
fn btu_per_hour_foot_fahrenheit() -> ThermalConductivity {
    btu_per_hour() / (Length::new::<foot>(1.0) * TemperatureInterval::new::<delta_fahrenheit>(1.0))
}

fn film_unit() -> HeatTransfer {
    HeatTransfer::new::<btu_it_per_hour_square_foot_degree_fahrenheit>(1.0)
}

/// Physical quantities that cross the solver boundary.
///
/// Each kind has one display unit per [`UnitSystem`]; see
/// [`UnitSystem::unit_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Temperature,
    TemperatureDifference,
    Length,
    Diameter,
    Area,
    MassRate,
    VolumeRate,
    Velocity,
    Power,
    Pressure,
    HeatTransferCoefficient,
    ThermalConductivity,
    SpecificEnergy,
    Density,
    Viscosity,
    FoulingResistance,
    MeshNumber,
    Dimensionless,
}

impl QuantityKind {
    /// Every kind, in declaration order.
    pub const ALL: [QuantityKind; 18] = [
        Self::Temperature,
        Self::TemperatureDifference,
        Self::Length,
        Self::Diameter,
        Self::Area,
        Self::MassRate,
        Self::VolumeRate,
        Self::Velocity,
        Self::Power,
        Self::Pressure,
        Self::HeatTransferCoefficient,
        Self::ThermalConductivity,
        Self::SpecificEnergy,
        Self::Density,
        Self::Viscosity,
        Self::FoulingResistance,
        Self::MeshNumber,
        Self::Dimensionless,
    ];
}

/// Unit convention for values entering or leaving a solve.
///
/// Every conversion goes through a [`uom`] quantity built in the system's
/// boundary unit, so converting to SI and back reproduces the input to
/// floating-point precision.
///
/// SI inputs use °C for temperature and kJ/kg for specific energy, matching
/// how these values are usually entered. Everything else is in base SI units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    #[default]
    Si,
    Imperial,
}

impl UnitSystem {
    /// Converts a boundary value in this system to its SI base value.
    #[must_use]
    pub fn to_si(self, kind: QuantityKind, value: f64) -> f64 {
        use QuantityKind as K;

        match kind {
            K::Temperature => self.temperature(value).get::<kelvin>(),
            K::TemperatureDifference => self.temperature_difference(value).get::<delta_kelvin>(),
            K::Length => self.length(value).get::<meter>(),
            K::Diameter => self.diameter(value).get::<meter>(),
            K::Area => self.area(value).get::<square_meter>(),
            K::MassRate => self.mass_rate(value).get::<kilogram_per_second>(),
            K::VolumeRate => self.volume_rate(value).get::<cubic_meter_per_second>(),
            K::Velocity => self.velocity(value).get::<meter_per_second>(),
            K::Power => self.power(value).get::<watt>(),
            K::Pressure => self.pressure(value).get::<pascal>(),
            K::HeatTransferCoefficient => {
                self.heat_transfer(value).get::<watt_per_square_meter_kelvin>()
            }
            K::ThermalConductivity => self.thermal_conductivity(value).get::<watt_per_meter_kelvin>(),
            K::SpecificEnergy => self.specific_energy(value).get::<joule_per_kilogram>(),
            K::Density => self.density(value).get::<kilogram_per_cubic_meter>(),
            K::Viscosity => self.viscosity(value).get::<pascal_second>(),
            K::FoulingResistance => square_meter_kelvin_per_watt(self.fouling(value)),
            K::MeshNumber => self.mesh_number(value).get::<reciprocal_meter>(),
            K::Dimensionless => value,
        }
    }

    /// Converts an SI base value to this system's boundary unit.
    #[must_use]
    pub fn from_si(self, kind: QuantityKind, value: f64) -> f64 {
        use QuantityKind as K;

        let imperial = self == Self::Imperial;
        match kind {
            K::Temperature => {
                let t = ThermodynamicTemperature::new::<kelvin>(value);
                if imperial {
                    t.get::<degree_fahrenheit>()
                } else {
                    t.get::<degree_celsius>()
                }
            }
            K::TemperatureDifference => {
                let dt = TemperatureInterval::new::<delta_kelvin>(value);
                if imperial {
                    dt.get::<delta_fahrenheit>()
                } else {
                    dt.get::<delta_kelvin>()
                }
            }
            K::Length => {
                let l = Length::new::<meter>(value);
                if imperial {
                    l.get::<foot>()
                } else {
                    l.get::<meter>()
                }
            }
            K::Diameter => {
                let d = Length::new::<meter>(value);
                if imperial {
                    d.get::<inch>()
                } else {
                    d.get::<meter>()
                }
            }
            K::Area => {
                let a = Area::new::<square_meter>(value);
                if imperial {
                    a.get::<square_foot>()
                } else {
                    a.get::<square_meter>()
                }
            }
            K::MassRate => {
                let m = MassRate::new::<kilogram_per_second>(value);
                if imperial {
                    m.get::<pound_per_second>()
                } else {
                    m.get::<kilogram_per_second>()
                }
            }
            K::VolumeRate => {
                let q = VolumeRate::new::<cubic_meter_per_second>(value);
                if imperial {
                    q.get::<cubic_foot_per_second>()
                } else {
                    q.get::<cubic_meter_per_second>()
                }
            }
            K::Velocity => {
                let v = Velocity::new::<meter_per_second>(value);
                if imperial {
                    v.get::<foot_per_second>()
                } else {
                    v.get::<meter_per_second>()
                }
            }
            K::Power => {
                let q = Power::new::<watt>(value);
                if imperial {
                    (q / btu_per_hour()).get::<ratio>()
                } else {
                    q.get::<watt>()
                }
            }
            K::Pressure => {
                let p = Pressure::new::<pascal>(value);
                if imperial {
                    p.get::<psi>()
                } else {
                    p.get::<pascal>()
                }
            }
            K::HeatTransferCoefficient => {
                let h = HeatTransfer::new::<watt_per_square_meter_kelvin>(value);
                if imperial {
                    h.get::<btu_it_per_hour_square_foot_degree_fahrenheit>()
                } else {
                    h.get::<watt_per_square_meter_kelvin>()
                }
            }
            K::ThermalConductivity => {
                let k = ThermalConductivity::new::<watt_per_meter_kelvin>(value);
                if imperial {
                    (k / btu_per_hour_foot_fahrenheit()).get::<ratio>()
                } else {
                    k.get::<watt_per_meter_kelvin>()
                }
            }
            K::SpecificEnergy => {
                let h = SpecificEnthalpy::new::<joule_per_kilogram>(value);
                if imperial {
                    h.get::<btu_it_per_pound>()
                } else {
                    h.get::<kilojoule_per_kilogram>()
                }
            }
            K::Density => {
                let rho = MassDensity::new::<kilogram_per_cubic_meter>(value);
                if imperial {
                    rho.get::<pound_per_cubic_foot>()
                } else {
                    rho.get::<kilogram_per_cubic_meter>()
                }
            }
            K::Viscosity => {
                let mu = DynamicViscosity::new::<pascal_second>(value);
                if imperial {
                    mu.get::<pound_per_foot_second>()
                } else {
                    mu.get::<pascal_second>()
                }
            }
            K::FoulingResistance => {
                let r = fouling_resistance(value);
                if imperial {
                    (r * film_unit()).get::<ratio>()
                } else {
                    value
                }
            }
            K::MeshNumber => {
                let n = ReciprocalLength::new::<reciprocal_meter>(value);
                if imperial {
                    (n * Length::new::<inch>(1.0)).get::<ratio>()
                } else {
                    n.get::<reciprocal_meter>()
                }
            }
            K::Dimensionless => value,
        }
    }

    /// Display label for a kind's boundary unit.
    #[must_use]
    pub fn unit_label(self, kind: QuantityKind) -> &'static str {
        use QuantityKind as K;

        match (self, kind) {
            (Self::Si, K::Temperature) => "°C",
            (Self::Si, K::TemperatureDifference) => "K",
            (Self::Si, K::Length | K::Diameter) => "m",
            (Self::Si, K::Area) => "m²",
            (Self::Si, K::MassRate) => "kg/s",
            (Self::Si, K::VolumeRate) => "m³/s",
            (Self::Si, K::Velocity) => "m/s",
            (Self::Si, K::Power) => "W",
            (Self::Si, K::Pressure) => "Pa",
            (Self::Si, K::HeatTransferCoefficient) => "W/m²·K",
            (Self::Si, K::ThermalConductivity) => "W/m·K",
            (Self::Si, K::SpecificEnergy) => "kJ/kg",
            (Self::Si, K::Density) => "kg/m³",
            (Self::Si, K::Viscosity) => "Pa·s",
            (Self::Si, K::FoulingResistance) => "m²·K/W",
            (Self::Si, K::MeshNumber) => "1/m",
            (Self::Imperial, K::Temperature) => "°F",
            (Self::Imperial, K::TemperatureDifference) => "°F",
            (Self::Imperial, K::Length) => "ft",
            (Self::Imperial, K::Diameter) => "in",
            (Self::Imperial, K::Area) => "ft²",
            (Self::Imperial, K::MassRate) => "lb/s",
            (Self::Imperial, K::VolumeRate) => "ft³/s",
            (Self::Imperial, K::Velocity) => "ft/s",
            (Self::Imperial, K::Power) => "Btu/h",
            (Self::Imperial, K::Pressure) => "psi",
            (Self::Imperial, K::HeatTransferCoefficient) => "Btu/h·ft²·°F",
            (Self::Imperial, K::ThermalConductivity) => "Btu/h·ft·°F",
            (Self::Imperial, K::SpecificEnergy) => "Btu/lb",
            (Self::Imperial, K::Density) => "lb/ft³",
            (Self::Imperial, K::Viscosity) => "lb/ft·s",
            (Self::Imperial, K::FoulingResistance) => "h·ft²·°F/Btu",
            (Self::Imperial, K::MeshNumber) => "1/in",
            (_, K::Dimensionless) => "-",
        }
    }

    /// Reads an absolute temperature given in this system.
    #[must_use]
    pub fn temperature(self, value: f64) -> ThermodynamicTemperature {
        match self {
            Self::Si => ThermodynamicTemperature::new::<degree_celsius>(value),
            Self::Imperial => ThermodynamicTemperature::new::<degree_fahrenheit>(value),
        }
    }

    /// Reads a temperature difference given in this system.
    #[must_use]
    pub fn temperature_difference(self, value: f64) -> TemperatureInterval {
        match self {
            Self::Si => TemperatureInterval::new::<delta_kelvin>(value),
            Self::Imperial => TemperatureInterval::new::<delta_fahrenheit>(value),
        }
    }

    /// Reads a length (ft in Imperial).
    #[must_use]
    pub fn length(self, value: f64) -> Length {
        match self {
            Self::Si => Length::new::<meter>(value),
            Self::Imperial => Length::new::<foot>(value),
        }
    }

    /// Reads a diameter or other small dimension (in in Imperial).
    #[must_use]
    pub fn diameter(self, value: f64) -> Length {
        match self {
            Self::Si => Length::new::<meter>(value),
            Self::Imperial => Length::new::<inch>(value),
        }
    }

    #[must_use]
    pub fn area(self, value: f64) -> Area {
        match self {
            Self::Si => Area::new::<square_meter>(value),
            Self::Imperial => Area::new::<square_foot>(value),
        }
    }

    #[must_use]
    pub fn mass_rate(self, value: f64) -> MassRate {
        match self {
            Self::Si => MassRate::new::<kilogram_per_second>(value),
            Self::Imperial => MassRate::new::<pound_per_second>(value),
        }
    }

    #[must_use]
    pub fn volume_rate(self, value: f64) -> VolumeRate {
        match self {
            Self::Si => VolumeRate::new::<cubic_meter_per_second>(value),
            Self::Imperial => VolumeRate::new::<cubic_foot_per_second>(value),
        }
    }

    #[must_use]
    pub fn velocity(self, value: f64) -> Velocity {
        match self {
            Self::Si => Velocity::new::<meter_per_second>(value),
            Self::Imperial => Velocity::new::<foot_per_second>(value),
        }
    }

    /// Reads a heat rate (Btu/h in Imperial).
    #[must_use]
    pub fn power(self, value: f64) -> Power {
        match self {
            Self::Si => Power::new::<watt>(value),
            Self::Imperial => value * btu_per_hour(),
        }
    }

    /// Reads an absolute pressure.
    #[must_use]
    pub fn pressure(self, value: f64) -> Pressure {
        match self {
            Self::Si => Pressure::new::<pascal>(value),
            Self::Imperial => Pressure::new::<psi>(value),
        }
    }

    /// Reads a film or overall heat transfer coefficient.
    #[must_use]
    pub fn heat_transfer(self, value: f64) -> HeatTransfer {
        match self {
            Self::Si => HeatTransfer::new::<watt_per_square_meter_kelvin>(value),
            Self::Imperial => value * film_unit(),
        }
    }

    #[must_use]
    pub fn thermal_conductivity(self, value: f64) -> ThermalConductivity {
        match self {
            Self::Si => ThermalConductivity::new::<watt_per_meter_kelvin>(value),
            Self::Imperial => value * btu_per_hour_foot_fahrenheit(),
        }
    }

    /// Reads a specific energy such as a latent heat (kJ/kg in SI).
    #[must_use]
    pub fn specific_energy(self, value: f64) -> SpecificEnthalpy {
        match self {
            Self::Si => SpecificEnthalpy::new::<kilojoule_per_kilogram>(value),
            Self::Imperial => SpecificEnthalpy::new::<btu_it_per_pound>(value),
        }
    }

    #[must_use]
    pub fn density(self, value: f64) -> MassDensity {
        match self {
            Self::Si => MassDensity::new::<kilogram_per_cubic_meter>(value),
            Self::Imperial => MassDensity::new::<pound_per_cubic_foot>(value),
        }
    }

    #[must_use]
    pub fn viscosity(self, value: f64) -> DynamicViscosity {
        match self {
            Self::Si => DynamicViscosity::new::<pascal_second>(value),
            Self::Imperial => DynamicViscosity::new::<pound_per_foot_second>(value),
        }
    }

    /// Reads a fouling factor (h·ft²·°F/Btu in Imperial).
    #[must_use]
    pub fn fouling(self, value: f64) -> FoulingResistance {
        match self {
            Self::Si => fouling_resistance(value),
            Self::Imperial => value / film_unit(),
        }
    }

    /// Reads a screen mesh count (per inch in Imperial).
    #[must_use]
    pub fn mesh_number(self, value: f64) -> ReciprocalLength {
        match self {
            Self::Si => ReciprocalLength::new::<reciprocal_meter>(value),
            Self::Imperial => value / Length::new::<inch>(1.0),
        }
    }

    /// Labels an SI base value for display in this system.
    #[must_use]
    pub fn label(self, name: &'static str, kind: QuantityKind, si_value: f64) -> Labeled {
        Labeled {
            name,
            value: self.from_si(kind, si_value),
            unit: self.unit_label(kind),
        }
    }
}

/// One labeled numeric result, expressed in a caller's [`UnitSystem`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Labeled {
    pub name: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

impl fmt::Display for Labeled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn si_temperatures_are_celsius() {
        assert_relative_eq!(
            UnitSystem::Si.temperature(90.0).get::<kelvin>(),
            363.15,
            epsilon = 1e-9
        );
        assert_eq!(UnitSystem::Si.unit_label(QuantityKind::Temperature), "°C");
    }

    #[test]
    fn imperial_matches_uom() {
        let imperial = UnitSystem::Imperial;

        assert_relative_eq!(
            imperial.temperature(212.0).get::<degree_fahrenheit>(),
            212.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(imperial.length(10.0).get::<foot>(), 10.0, epsilon = 1e-12);
        assert_relative_eq!(
            imperial.power(3_412.14).get::<watt>(),
            1_000.0,
            max_relative = 1e-5
        );
        assert_relative_eq!(
            imperial.to_si(QuantityKind::HeatTransferCoefficient, 1.0),
            5.678_263,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            imperial.to_si(QuantityKind::ThermalConductivity, 1.0),
            1.730_735,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            imperial.to_si(QuantityKind::FoulingResistance, 0.001),
            1.761e-4,
            max_relative = 1e-3
        );
        assert_relative_eq!(
            imperial.to_si(QuantityKind::MeshNumber, 100.0),
            100.0 / 0.0254,
            max_relative = 1e-12
        );
    }

    #[test]
    fn specific_energy_uses_kilojoules_in_si() {
        assert_relative_eq!(UnitSystem::Si.specific_energy(2_257.0).value, 2_257_000.0);
    }

    #[test]
    fn labels_convert_from_si() {
        let labeled = UnitSystem::Imperial.label("Length", QuantityKind::Length, 3.048);
        assert_relative_eq!(labeled.value, 10.0, epsilon = 1e-12);
        assert_eq!(labeled.unit, "ft");
        assert_eq!(labeled.to_string(), format!("Length: {} ft", labeled.value));
    }

    proptest! {
        #[test]
        fn si_imperial_round_trip(index in 0..QuantityKind::ALL.len(), value in -1.0e6_f64..1.0e6_f64) {
            let kind = QuantityKind::ALL[index];
            for system in [UnitSystem::Si, UnitSystem::Imperial] {
                let back = system.from_si(kind, system.to_si(kind, value));
                prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
            }

            let si = UnitSystem::Si.to_si(kind, value);
            let imperial = UnitSystem::Imperial.from_si(kind, si);
            let back = UnitSystem::Si.from_si(kind, UnitSystem::Imperial.to_si(kind, imperial));
            prop_assert!((back - value).abs() <= 1e-9 * value.abs().max(1.0));
        }
    }
}

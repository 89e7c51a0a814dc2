use std::{f64::consts::PI, fmt, str::FromStr};

use uom::si::{
    f64::{Area, Length},
    length::meter,
};

use super::{InchSize, ParseInchSizeError};

/// Pipe wall material, which sets the absolute roughness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeMaterial {
    Steel,
    Copper,
}

impl PipeMaterial {
    /// Absolute roughness of a clean commercial pipe.
    #[must_use]
    pub fn roughness(self) -> Length {
        match self {
            Self::Steel => Length::new::<meter>(4.6e-5),
            Self::Copper => Length::new::<meter>(1.5e-6),
        }
    }
}

/// Steel pipe wall schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Schedule {
    Sch40,
    Sch80,
}

/// Seamless copper tube wall type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopperType {
    K,
    L,
    M,
}

/// Wall specification: a steel schedule or a copper type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipeSpec {
    Steel(Schedule),
    Copper(CopperType),
}

impl PipeSpec {
    #[must_use]
    pub fn material(self) -> PipeMaterial {
        match self {
            Self::Steel(_) => PipeMaterial::Steel,
            Self::Copper(_) => PipeMaterial::Copper,
        }
    }
}

impl fmt::Display for PipeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Steel(Schedule::Sch40) => f.write_str("steel schedule 40"),
            Self::Steel(Schedule::Sch80) => f.write_str("steel schedule 80"),
            Self::Copper(CopperType::K) => f.write_str("copper type K"),
            Self::Copper(CopperType::L) => f.write_str("copper type L"),
            Self::Copper(CopperType::M) => f.write_str("copper type M"),
        }
    }
}

/// Returned when a schedule or copper type label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pipe specification: {0:?}")]
pub struct UnknownPipeSpec(pub String);

impl FromStr for Schedule {
    type Err = UnknownPipeSpec;

    /// Accepts `40`, `Sch 40`, `schedule 80`, and similar.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().filter(char::is_ascii_digit).collect();
        match digits.as_str() {
            "40" => Ok(Self::Sch40),
            "80" => Ok(Self::Sch80),
            _ => Err(UnknownPipeSpec(s.to_owned())),
        }
    }
}

impl FromStr for CopperType {
    type Err = UnknownPipeSpec;

    /// Accepts `K`, `Type L`, and similar; the last word is the type letter.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_whitespace().last().map(str::to_ascii_uppercase).as_deref() {
            Some("K") => Ok(Self::K),
            Some("L") => Ok(Self::L),
            Some("M") => Ok(Self::M),
            _ => Err(UnknownPipeSpec(s.to_owned())),
        }
    }
}

impl FromStr for PipeSpec {
    type Err = UnknownPipeSpec;

    /// Accepts `Steel`, `Steel Sch 80`, `Copper (Type K)`, `Copper L`, and
    /// similar. Steel without a schedule is schedule 40.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cleaned: String = s
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect::<String>()
            .to_ascii_lowercase();

        if cleaned.contains("copper") {
            return cleaned
                .parse()
                .map(Self::Copper)
                .map_err(|_| UnknownPipeSpec(s.to_owned()));
        }
        if cleaned.contains("steel") || cleaned.contains("sch") {
            if !cleaned.chars().any(|c| c.is_ascii_digit()) {
                return Ok(Self::Steel(Schedule::Sch40));
            }
            return cleaned
                .parse()
                .map(Self::Steel)
                .map_err(|_| UnknownPipeSpec(s.to_owned()));
        }
        Err(UnknownPipeSpec(s.to_owned()))
    }
}

/// Catalog key for a pipe: nominal size plus wall specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipeKey {
    pub nominal: InchSize,
    pub spec: PipeSpec,
}

impl PipeKey {
    #[must_use]
    pub fn steel(nominal: InchSize, schedule: Schedule) -> Self {
        Self {
            nominal,
            spec: PipeSpec::Steel(schedule),
        }
    }

    #[must_use]
    pub fn copper(nominal: InchSize, kind: CopperType) -> Self {
        Self {
            nominal,
            spec: PipeSpec::Copper(kind),
        }
    }

    /// Parses a nominal size such as `"2"` or `"1-1/2"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is not a valid inch size.
    pub fn parse_nominal(nominal: &str) -> Result<InchSize, ParseInchSizeError> {
        nominal.parse()
    }
}

impl fmt::Display for PipeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.nominal, self.spec)
    }
}

/// Resolved diameters of a pipe or tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeDimensions {
    pub outer_diameter: Length,
    pub inner_diameter: Length,
}

impl PipeDimensions {
    /// Bore cross-section `π·ID²/4`.
    #[must_use]
    pub fn flow_area(&self) -> Area {
        PI * self.inner_diameter * self.inner_diameter / 4.0
    }

    #[must_use]
    pub fn wall_thickness(&self) -> Length {
        (self.outer_diameter - self.inner_diameter) / 2.0
    }
}

use std::{fmt, str::FromStr};

use crate::support::hx::TubePasses;

use super::{InchSize, pipe::UnknownPipeSpec};

/// Catalog key for an exchanger tube: outer diameter and BWG wall gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TubeKey {
    pub outer_diameter: InchSize,
    pub bwg: u8,
}

impl fmt::Display for TubeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OD {} BWG", self.outer_diameter, self.bwg)
    }
}

/// Tube pitch pattern across the bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TubeLayout {
    Square,
    Triangular,
}

impl TubeLayout {
    /// Coefficient on `P²` in Kern's shell-side equivalent diameter.
    #[must_use]
    pub fn pitch_coefficient(self) -> f64 {
        match self {
            Self::Square => 4.0,
            Self::Triangular => 3.46,
        }
    }
}

impl fmt::Display for TubeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Square => "square",
            Self::Triangular => "triangular",
        })
    }
}

impl FromStr for TubeLayout {
    type Err = UnknownPipeSpec;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" | "sq" => Ok(Self::Square),
            "triangular" | "triangle" | "tri" => Ok(Self::Triangular),
            _ => Err(UnknownPipeSpec(s.to_owned())),
        }
    }
}

/// Catalog key for the number of tubes in a shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TubeCountKey {
    pub tube_od: InchSize,
    pub pitch: InchSize,
    pub layout: TubeLayout,
    pub shell_id: InchSize,
    pub passes: TubePasses,
}

impl fmt::Display for TubeCountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} OD on {} {} pitch, {} shell, {}-pass",
            self.tube_od, self.pitch, self.layout, self.shell_id, self.passes
        )
    }
}

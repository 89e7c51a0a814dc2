use std::{fmt, str::FromStr};

use thiserror::Error;

/// Working fluids recognized by the solvers.
///
/// A fluid is only an identifier. Whether its properties are available is up
/// to the [`PropertyProvider`](super::PropertyProvider) in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fluid {
    Water,
    EthyleneGlycol,
    EngineOil,
    Ammonia,
    Methanol,
    Hexane,
    Benzene,
}

impl Fluid {
    /// Every recognized fluid, in declaration order.
    pub const ALL: [Fluid; 7] = [
        Self::Water,
        Self::EthyleneGlycol,
        Self::EngineOil,
        Self::Ammonia,
        Self::Methanol,
        Self::Hexane,
        Self::Benzene,
    ];

    /// Display name, also accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Water => "Water",
            Self::EthyleneGlycol => "Ethylene Glycol",
            Self::EngineOil => "Engine Oil",
            Self::Ammonia => "Ammonia",
            Self::Methanol => "Methanol",
            Self::Hexane => "Hexane",
            Self::Benzene => "Benzene",
        }
    }
}

impl fmt::Display for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a fluid name is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown fluid: {0}")]
pub struct UnknownFluid(pub String);

impl FromStr for Fluid {
    type Err = UnknownFluid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "water" => Ok(Self::Water),
            "ethyleneglycol" => Ok(Self::EthyleneGlycol),
            "engineoil" | "oil" => Ok(Self::EngineOil),
            "ammonia" => Ok(Self::Ammonia),
            "methanol" => Ok(Self::Methanol),
            "hexane" => Ok(Self::Hexane),
            "benzene" => Ok(Self::Benzene),
            _ => Err(UnknownFluid(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_display_names() {
        for fluid in Fluid::ALL {
            assert_eq!(fluid.name().parse::<Fluid>(), Ok(fluid));
        }
    }

    #[test]
    fn parsing_ignores_case_and_separators() {
        assert_eq!("ethylene_glycol".parse(), Ok(Fluid::EthyleneGlycol));
        assert_eq!(" WATER ".parse(), Ok(Fluid::Water));
        assert_eq!(
            "Mercury".parse::<Fluid>(),
            Err(UnknownFluid("Mercury".into()))
        );
    }
}

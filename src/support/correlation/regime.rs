use std::fmt;

/// Laminar or turbulent, as classified against a [`TransitionReynolds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowRegime {
    Laminar,
    Turbulent,
}

impl fmt::Display for FlowRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Laminar => "laminar",
            Self::Turbulent => "turbulent",
        })
    }
}

/// Reynolds number bands used by the plate-channel friction correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlateBand {
    /// `Re < 10`
    Creeping,
    /// `10 ≤ Re < 100`
    Transitional,
    /// `Re ≥ 100`, the same switch as the plate Nusselt correlation.
    Developed,
}

impl PlateBand {
    #[must_use]
    pub fn classify(reynolds: f64) -> Self {
        if reynolds < 10.0 {
            Self::Creeping
        } else if reynolds < 100.0 {
            Self::Transitional
        } else {
            Self::Developed
        }
    }
}

/// Reynolds number at which a duct is taken to be turbulent.
///
/// Each topology carries its own threshold. The values in use are exposed as
/// associated constants.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TransitionReynolds(f64);

impl TransitionReynolds {
    /// Circular pipes and double-pipe annuli.
    pub const PIPE: Self = Self(2300.0);
    /// Tube side of a shell-and-tube exchanger.
    pub const SHELL_AND_TUBE: Self = Self(2200.0);
    /// Gasketed plate channels.
    pub const PLATE: Self = Self(100.0);

    /// A custom threshold, or `None` unless strictly positive.
    #[must_use]
    pub fn new(reynolds: f64) -> Option<Self> {
        (reynolds > 0.0 && reynolds.is_finite()).then_some(Self(reynolds))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// `Turbulent` when `reynolds >= threshold`.
    #[must_use]
    pub fn classify(self, reynolds: f64) -> FlowRegime {
        if reynolds >= self.0 {
            FlowRegime::Turbulent
        } else {
            FlowRegime::Laminar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_itself_is_turbulent() {
        for threshold in [
            TransitionReynolds::PIPE,
            TransitionReynolds::SHELL_AND_TUBE,
            TransitionReynolds::PLATE,
        ] {
            let re = threshold.value();
            assert_eq!(threshold.classify(re), FlowRegime::Turbulent);
            assert_eq!(threshold.classify(re * (1.0 - 1e-12)), FlowRegime::Laminar);
        }
    }

    #[test]
    fn plate_bands() {
        assert_eq!(PlateBand::classify(9.99), PlateBand::Creeping);
        assert_eq!(PlateBand::classify(10.0), PlateBand::Transitional);
        assert_eq!(PlateBand::classify(99.99), PlateBand::Transitional);
        assert_eq!(PlateBand::classify(100.0), PlateBand::Developed);
    }

    #[test]
    fn custom_threshold_must_be_positive() {
        assert!(TransitionReynolds::new(0.0).is_none());
        assert_eq!(TransitionReynolds::new(4000.0).map(TransitionReynolds::value), Some(4000.0));
    }
}

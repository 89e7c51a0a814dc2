use super::{
    CorrelationError, Correlated, FlowRegime, TransitionReynolds, check_positive,
};

/// Duct geometry that selects the Nusselt correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DuctKind {
    /// Inside a circular tube.
    Pipe,
    /// Between two concentric tubes, using the equivalent diameter.
    Annulus,
    /// Across a baffled tube bundle.
    ShellCrossflow,
    /// Between two corrugated plates.
    PlateChannel,
}

/// Whether the fluid is being heated or cooled, which sets the Prandtl
/// exponent of the Dittus-Boelter correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heating {
    Heated,
    Cooled,
}

/// Inputs shared by every Nusselt correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NusseltInput {
    pub reynolds: f64,
    pub prandtl: f64,
    /// `D/L`, used by the laminar developing-flow correlation.
    pub diameter_over_length: f64,
    pub heating: Heating,
    /// Threshold for pipes and annuli. Shell crossflow is tagged against it
    /// but does not branch on it; plate channels always use
    /// [`TransitionReynolds::PLATE`].
    pub transition: TransitionReynolds,
}

/// Nusselt number for `duct` at `input`.
///
/// | Duct | Laminar | Turbulent |
/// |---|---|---|
/// | pipe, annulus | `1.86 (Re·Pr·D/L)^(1/3)` | `0.023 Re^0.8 Pr^n` |
/// | shell crossflow | `0.36 Re^0.55 Pr^(1/3)` | same |
/// | plate channel | `1.86 (Re·Pr·Dh/L)^(1/3)` | `0.374 Re^0.668 Pr^(1/3)` |
///
/// `n` is 0.4 for a heated fluid and 0.3 for a cooled one.
///
/// # Errors
///
/// Returns a [`CorrelationError`] if `Re`, `Pr`, or `D/L` is not positive.
pub fn nusselt(duct: DuctKind, input: &NusseltInput) -> Result<Correlated, CorrelationError> {
    let re = check_positive(input.reynolds, CorrelationError::Reynolds)?;
    let pr = check_positive(input.prandtl, CorrelationError::Prandtl)?;

    let sieder_tate = |d_over_l: f64| 1.86 * (re * pr * d_over_l).cbrt();

    let (value, regime) = match duct {
        DuctKind::Pipe | DuctKind::Annulus => match input.transition.classify(re) {
            FlowRegime::Laminar => {
                let d_over_l =
                    check_positive(input.diameter_over_length, CorrelationError::LengthRatio)?;
                (sieder_tate(d_over_l), FlowRegime::Laminar)
            }
            FlowRegime::Turbulent => {
                let n = match input.heating {
                    Heating::Heated => 0.4,
                    Heating::Cooled => 0.3,
                };
                (0.023 * re.powf(0.8) * pr.powf(n), FlowRegime::Turbulent)
            }
        },
        DuctKind::ShellCrossflow => (
            0.36 * re.powf(0.55) * pr.cbrt(),
            input.transition.classify(re),
        ),
        DuctKind::PlateChannel => match TransitionReynolds::PLATE.classify(re) {
            FlowRegime::Laminar => {
                let d_over_l =
                    check_positive(input.diameter_over_length, CorrelationError::LengthRatio)?;
                (sieder_tate(d_over_l), FlowRegime::Laminar)
            }
            FlowRegime::Turbulent => (0.374 * re.powf(0.668) * pr.cbrt(), FlowRegime::Turbulent),
        },
    };

    Ok(Correlated { value, regime })
}

use super::{
    CorrelationError, Correlated, FlowRegime, PlateBand, TransitionReynolds, check_positive,
};

fn check_roughness(relative_roughness: f64) -> Result<f64, CorrelationError> {
    if relative_roughness >= 0.0 && relative_roughness.is_finite() {
        Ok(relative_roughness)
    } else {
        Err(CorrelationError::Roughness(relative_roughness))
    }
}

/// Haaland's explicit Darcy friction factor.
///
/// `1/√f = −1.8·log10[(ε/D/3.7)^1.11 + 6.9/Re]`
#[must_use]
pub fn haaland(reynolds: f64, relative_roughness: f64) -> f64 {
    let x = (relative_roughness / 3.7).powf(1.11) + 6.9 / reynolds;
    let inv_sqrt = -1.8 * x.log10();
    1.0 / (inv_sqrt * inv_sqrt)
}

/// One fixed-point update of the Colebrook equation.
///
/// Given the current guess `f`, returns `f'` from
/// `1/√f' = −2·log10(ε/D/3.7 + 2.51/(Re·√f))`.
#[must_use]
pub fn colebrook_step(friction: f64, reynolds: f64, relative_roughness: f64) -> f64 {
    let x = relative_roughness / 3.7 + 2.51 / (reynolds * friction.sqrt());
    let inv_sqrt = -2.0 * x.log10();
    1.0 / (inv_sqrt * inv_sqrt)
}

/// Darcy friction factor for a circular duct.
///
/// Laminar flow uses `64/Re`; turbulent flow uses [`haaland`]. Callers that
/// need Colebrook accuracy iterate [`colebrook_step`] from this value.
///
/// # Errors
///
/// Returns a [`CorrelationError`] for a non-positive Reynolds number or a
/// negative roughness.
pub fn darcy(
    reynolds: f64,
    relative_roughness: f64,
    transition: TransitionReynolds,
) -> Result<Correlated, CorrelationError> {
    let re = check_positive(reynolds, CorrelationError::Reynolds)?;
    let rr = check_roughness(relative_roughness)?;

    Ok(match transition.classify(re) {
        FlowRegime::Laminar => Correlated {
            value: 64.0 / re,
            regime: FlowRegime::Laminar,
        },
        FlowRegime::Turbulent => Correlated {
            value: haaland(re, rr),
            regime: FlowRegime::Turbulent,
        },
    })
}

/// Kern's shell-side friction factor, `exp(0.576 − 0.19·ln Re)`.
///
/// # Errors
///
/// Returns a [`CorrelationError`] for a non-positive Reynolds number.
pub fn shell_side_friction(reynolds: f64) -> Result<f64, CorrelationError> {
    let re = check_positive(reynolds, CorrelationError::Reynolds)?;
    Ok((0.576 - 0.19 * re.ln()).exp())
}

/// Friction factor of a gasketed plate channel, by Reynolds band.
///
/// # Errors
///
/// Returns a [`CorrelationError`] for a non-positive Reynolds number.
pub fn plate_channel_friction(reynolds: f64) -> Result<Correlated<PlateBand>, CorrelationError> {
    let re = check_positive(reynolds, CorrelationError::Reynolds)?;
    let band = PlateBand::classify(re);
    let value = match band {
        PlateBand::Creeping => 280.0 / re,
        PlateBand::Transitional => 100.0 / re.powf(0.589),
        PlateBand::Developed => 12.0 / re.powf(0.183),
    };
    Ok(Correlated {
        value,
        regime: band,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn laminar_pipe() -> Result<(), CorrelationError> {
        let f = darcy(1000.0, 1e-3, TransitionReynolds::PIPE)?;
        assert_eq!(f.regime, FlowRegime::Laminar);
        assert_relative_eq!(f.value, 0.064);
        Ok(())
    }

    #[test]
    fn haaland_is_close_to_moody_chart() {
        // Moody chart: Re = 1e5, ε/D = 1e-3 gives f ≈ 0.0222.
        assert_relative_eq!(haaland(1e5, 1e-3), 0.0222, max_relative = 0.02);
    }

    #[test]
    fn colebrook_fixed_point_stays_near_haaland() {
        let (re, rr) = (2e5, 4.6e-5 / 0.0525);
        let mut f = haaland(re, rr);
        for _ in 0..20 {
            f = colebrook_step(f, re, rr);
        }
        assert_relative_eq!(colebrook_step(f, re, rr), f, max_relative = 1e-10);
        assert_relative_eq!(f, haaland(re, rr), max_relative = 0.03);
    }

    #[test]
    fn kern_shell_friction() -> Result<(), CorrelationError> {
        assert_relative_eq!(
            shell_side_friction(10_000.0)?,
            (0.576_f64 - 0.19 * 10_000.0_f64.ln()).exp()
        );
        assert!(shell_side_friction(-1.0).is_err());
        Ok(())
    }

    #[test]
    fn plate_bands_pick_their_forms() -> Result<(), CorrelationError> {
        assert_relative_eq!(plate_channel_friction(5.0)?.value, 56.0);
        assert_relative_eq!(plate_channel_friction(50.0)?.value, 100.0 / 50.0_f64.powf(0.589));
        let developed = plate_channel_friction(1000.0)?;
        assert_eq!(developed.regime, PlateBand::Developed);
        assert_relative_eq!(developed.value, 12.0 / 1000.0_f64.powf(0.183));

        let switch = plate_channel_friction(100.0)?;
        assert_eq!(switch.regime, PlateBand::Developed);
        assert_relative_eq!(switch.value, 12.0 / 100.0_f64.powf(0.183));
        Ok(())
    }

    #[test]
    fn negative_roughness_is_rejected() {
        assert_eq!(
            darcy(5000.0, -1.0, TransitionReynolds::PIPE),
            Err(CorrelationError::Roughness(-1.0))
        );
    }
}

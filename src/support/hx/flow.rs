use std::cmp::Ordering;

use uom::{ConstZero, si::f64::Power};

use crate::support::constraint::{Constrained, ConstraintError, StrictlyPositive};

/// Heat exchanged by one stream, signed from the stream's point of view.
///
/// The cold stream of an exchanger sees [`HeatFlow::In`] and the hot stream
/// sees [`HeatFlow::Out`] of the same magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatFlow {
    /// Heat entering the stream, which warms it.
    In(Constrained<Power, StrictlyPositive>),
    /// Heat leaving the stream, which cools it.
    Out(Constrained<Power, StrictlyPositive>),
    /// No heat crosses the stream boundary.
    None,
}

impl HeatFlow {
    /// Heat absorbed by the stream.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `heat_rate` is not strictly positive.
    pub fn incoming(heat_rate: Power) -> Result<Self, ConstraintError> {
        Ok(Self::In(Constrained::new(heat_rate)?))
    }

    /// Heat rejected by the stream.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if `heat_rate` is not strictly positive.
    pub fn outgoing(heat_rate: Power) -> Result<Self, ConstraintError> {
        Ok(Self::Out(Constrained::new(heat_rate)?))
    }

    /// Classifies a signed heat rate.
    ///
    /// Positive values are absorbed, negative values rejected, and exactly
    /// zero is [`HeatFlow::None`].
    ///
    /// # Errors
    ///
    /// Returns [`ConstraintError::NotANumber`] for `NaN`.
    pub fn from_signed(heat_rate: Power) -> Result<Self, ConstraintError> {
        match heat_rate.partial_cmp(&Power::ZERO) {
            Some(Ordering::Greater) => Self::incoming(heat_rate),
            Some(Ordering::Less) => Self::outgoing(-heat_rate),
            Some(Ordering::Equal) => Ok(Self::None),
            None => Err(ConstraintError::NotANumber),
        }
    }

    /// Signed heat rate, positive when absorbed.
    #[must_use]
    pub fn signed(&self) -> Power {
        match self {
            Self::In(heat_rate) => heat_rate.into_inner(),
            Self::Out(heat_rate) => -heat_rate.into_inner(),
            Self::None => Power::ZERO,
        }
    }

    /// Magnitude of the heat rate regardless of direction.
    #[must_use]
    pub fn magnitude(&self) -> Power {
        self.signed().abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::power::kilowatt;

    #[test]
    fn sign_follows_direction() -> Result<(), ConstraintError> {
        let duty = Power::new::<kilowatt>(146.0);

        let cold = HeatFlow::from_signed(duty)?;
        let hot = HeatFlow::from_signed(-duty)?;

        assert!(matches!(cold, HeatFlow::In(_)));
        assert!(matches!(hot, HeatFlow::Out(_)));
        assert_relative_eq!(cold.signed().get::<kilowatt>(), 146.0);
        assert_relative_eq!(hot.signed().get::<kilowatt>(), -146.0);
        assert_relative_eq!(hot.magnitude().get::<kilowatt>(), 146.0);
        Ok(())
    }

    #[test]
    fn zero_is_no_flow() -> Result<(), ConstraintError> {
        let flow = HeatFlow::from_signed(Power::ZERO)?;
        assert_eq!(flow, HeatFlow::None);
        assert!(HeatFlow::incoming(Power::ZERO).is_err());
        Ok(())
    }

    #[test]
    fn nan_is_rejected() {
        assert_eq!(
            HeatFlow::from_signed(Power::new::<kilowatt>(f64::NAN)),
            Err(ConstraintError::NotANumber)
        );
    }
}

use std::{cmp::Ordering, marker::PhantomData, ops::Add};

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is greater than zero.
///
/// Pipe diameters, plate spacings, and mass flow rates all use this marker:
/// a zero value would produce a zero flow area or an infinite Reynolds number
/// deep inside a correlation.
///
/// ```
/// use thermal_hx::support::constraint::StrictlyPositive;
/// use uom::si::{f64::MassRate, mass_rate::kilogram_per_second};
///
/// assert!(StrictlyPositive::new(MassRate::new::<kilogram_per_second>(0.5)).is_ok());
/// assert!(StrictlyPositive::new(MassRate::new::<kilogram_per_second>(0.0)).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

/// The sum of two positive values stays positive.
///
/// # Panics
///
/// Panics in debug builds if the sum is unexpectedly non-positive.
impl<T> Add for Constrained<T, StrictlyPositive>
where
    T: Add<Output = T> + PartialOrd + Zero,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let value = self.value + rhs.value;
        debug_assert!(value > T::zero(), "sum of positive values must be positive");
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, MassRate},
        length::meter,
        mass_rate::kilogram_per_second,
    };

    #[test]
    fn floats() {
        assert!(StrictlyPositive::new(1e-9).is_ok());
        assert_eq!(StrictlyPositive::new(0.0), Err(ConstraintError::Zero));
        assert_eq!(StrictlyPositive::new(-3.0), Err(ConstraintError::Negative));
        assert_eq!(
            StrictlyPositive::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
    }

    #[test]
    fn flow_rates() {
        let hot = StrictlyPositive::new(MassRate::new::<kilogram_per_second>(0.5)).unwrap();
        let cold = StrictlyPositive::new(MassRate::new::<kilogram_per_second>(0.3)).unwrap();

        let total = hot + cold;
        assert!((total.into_inner().get::<kilogram_per_second>() - 0.8).abs() < 1e-12);

        assert!(StrictlyPositive::new(MassRate::new::<kilogram_per_second>(-0.1)).is_err());
    }

    #[test]
    fn lengths() {
        assert!(StrictlyPositive::new(Length::new::<meter>(3.0)).is_ok());
        assert!(StrictlyPositive::new(Length::new::<meter>(0.0)).is_err());
    }
}

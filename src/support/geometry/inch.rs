use std::{fmt, str::FromStr};

use thiserror::Error;
use uom::si::{f64::Length, length::inch};

/// A catalog size in inches, stored exactly in ten-thousandths.
///
/// Catalog keys are written as fractions (`1-1/2`, `15/16`) or decimals
/// (`13.25`). Storing them as integers makes row matching exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InchSize(u32);

const SCALE: u32 = 10_000;

impl InchSize {
    /// Whole inches plus `numerator/denominator`.
    ///
    /// Only used for table literals, where the fraction is always a binary
    /// fraction that divides the scale exactly.
    #[must_use]
    pub const fn fraction(whole: u32, numerator: u32, denominator: u32) -> Self {
        Self(whole * SCALE + numerator * SCALE / denominator)
    }

    /// Hundredths of an inch, for decimal shell diameters like `13.25`.
    #[must_use]
    pub const fn hundredths(value: u32) -> Self {
        Self(value * (SCALE / 100))
    }

    #[must_use]
    pub fn inches(self) -> f64 {
        f64::from(self.0) / f64::from(SCALE)
    }

    #[must_use]
    pub fn length(self) -> Length {
        Length::new::<inch>(self.inches())
    }
}

impl fmt::Display for InchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / SCALE;
        let rest = self.0 % SCALE;
        if rest == 0 {
            return write!(f, "{whole} in");
        }
        // Binary fractions down to 1/16 read better than decimals.
        if rest % (SCALE / 16) == 0 {
            let mut num = rest / (SCALE / 16);
            let mut den = 16;
            while num % 2 == 0 {
                num /= 2;
                den /= 2;
            }
            return if whole == 0 {
                write!(f, "{num}/{den} in")
            } else {
                write!(f, "{whole}-{num}/{den} in")
            };
        }
        write!(f, "{} in", self.inches())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid inch size: {0:?}")]
pub struct ParseInchSizeError(pub String);

impl FromStr for InchSize {
    type Err = ParseInchSizeError;

    /// Accepts `2`, `1.5`, `13.25`, `3/4`, `1-1/2`, and `1 1/2`, with an
    /// optional `in` or `"` suffix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseInchSizeError(s.to_owned());

        let trimmed = s.trim();
        let body = trimmed
            .strip_suffix("in")
            .or_else(|| trimmed.strip_suffix('"'))
            .unwrap_or(trimmed)
            .trim();

        let (whole, frac) = match body.split_once(['-', ' ']) {
            Some((whole, frac)) => (whole.trim(), Some(frac.trim())),
            None if body.contains('/') => ("0", Some(body)),
            None => (body, None),
        };

        let mut value: f64 = whole.parse().map_err(|_| err())?;
        if let Some(frac) = frac {
            let (num, den) = frac.split_once('/').ok_or_else(err)?;
            let num: f64 = num.trim().parse().map_err(|_| err())?;
            let den: f64 = den.trim().parse().map_err(|_| err())?;
            if den <= 0.0 {
                return Err(err());
            }
            value += num / den;
        }

        let scaled = (value * f64::from(SCALE)).round();
        if !(scaled > 0.0 && scaled <= f64::from(u32::MAX)) {
            return Err(err());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = scaled as u32;
        Ok(Self(scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fractions_and_decimals() {
        let one_and_a_half = InchSize::fraction(1, 1, 2);
        assert_eq!("1-1/2".parse(), Ok(one_and_a_half));
        assert_eq!("1 1/2 in".parse(), Ok(one_and_a_half));
        assert_eq!("1.5".parse(), Ok(one_and_a_half));
        assert_eq!("15/16\"".parse(), Ok(InchSize::fraction(0, 15, 16)));
        assert_eq!("13.25".parse(), Ok(InchSize::hundredths(1325)));
    }

    #[test]
    fn rejects_garbage() {
        assert!("two".parse::<InchSize>().is_err());
        assert!("1/0".parse::<InchSize>().is_err());
        assert!("0".parse::<InchSize>().is_err());
    }

    #[test]
    fn displays_as_fraction() {
        assert_eq!(InchSize::fraction(1, 1, 4).to_string(), "1-1/4 in");
        assert_eq!(InchSize::fraction(0, 3, 4).to_string(), "3/4 in");
        assert_eq!(InchSize::fraction(2, 0, 1).to_string(), "2 in");
    }
}

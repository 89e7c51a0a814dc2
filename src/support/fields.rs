//! Flat named inputs.
//!
//! Front ends collect exchanger inputs as a flat set of named strings
//! ("Hot Inlet Temperature" → "90"). [`Fields`] holds that set and offers
//! typed readers, so each model's `from_fields` constructor reads like a list
//! of requirements and every failure names the offending field.

use std::{collections::BTreeMap, str::FromStr};

use thiserror::Error;

/// Errors raised while reading a [`Fields`] set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("missing field {field:?}")]
    Missing { field: &'static str },
    #[error("field {field:?} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    #[error("field {field:?} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("field {field:?} has unknown option {value:?}")]
    UnknownOption { field: &'static str, value: String },
}

/// A set of named string values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    values: BTreeMap<String, String>,
}

impl Fields {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a field, returning the set for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The trimmed value, treating blank values as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// # Errors
    ///
    /// [`FieldError::Missing`] if absent or blank.
    pub fn text(&self, field: &'static str) -> Result<&str, FieldError> {
        self.get(field).ok_or(FieldError::Missing { field })
    }

    /// A required finite number.
    ///
    /// # Errors
    ///
    /// [`FieldError::Missing`] or [`FieldError::NotANumber`].
    pub fn number(&self, field: &'static str) -> Result<f64, FieldError> {
        parse_number(field, self.text(field)?)
    }

    /// A required number greater than zero.
    ///
    /// # Errors
    ///
    /// [`FieldError::Missing`], [`FieldError::NotANumber`], or
    /// [`FieldError::NotPositive`].
    pub fn positive(&self, field: &'static str) -> Result<f64, FieldError> {
        check_positive(field, self.number(field)?)
    }

    /// An optional finite number.
    ///
    /// # Errors
    ///
    /// [`FieldError::NotANumber`] if present but unparseable.
    pub fn optional_number(&self, field: &'static str) -> Result<Option<f64>, FieldError> {
        self.get(field).map(|v| parse_number(field, v)).transpose()
    }

    /// An optional number that must be positive when present.
    ///
    /// # Errors
    ///
    /// [`FieldError::NotANumber`] or [`FieldError::NotPositive`].
    pub fn optional_positive(&self, field: &'static str) -> Result<Option<f64>, FieldError> {
        self.optional_number(field)?
            .map(|v| check_positive(field, v))
            .transpose()
    }

    /// A required non-negative whole number, such as a baffle count.
    ///
    /// # Errors
    ///
    /// [`FieldError::Missing`] or [`FieldError::NotANumber`].
    pub fn count(&self, field: &'static str) -> Result<u32, FieldError> {
        let text = self.text(field)?;
        text.parse().map_err(|_| FieldError::NotANumber {
            field,
            value: text.to_owned(),
        })
    }

    /// A required selection parsed with [`FromStr`].
    ///
    /// # Errors
    ///
    /// [`FieldError::Missing`] or [`FieldError::UnknownOption`].
    pub fn option<T: FromStr>(&self, field: &'static str) -> Result<T, FieldError> {
        parse_option(field, self.text(field)?)
    }

    /// An optional selection parsed with [`FromStr`].
    ///
    /// # Errors
    ///
    /// [`FieldError::UnknownOption`] if present but not recognized.
    pub fn optional_option<T: FromStr>(&self, field: &'static str) -> Result<Option<T>, FieldError> {
        self.get(field).map(|v| parse_option(field, v)).transpose()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64, FieldError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FieldError::NotANumber {
            field,
            value: text.to_owned(),
        }),
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, FieldError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(FieldError::NotPositive { field, value })
    }
}

fn parse_option<T: FromStr>(field: &'static str, text: &str) -> Result<T, FieldError> {
    text.parse().map_err(|_| FieldError::UnknownOption {
        field,
        value: text.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::support::thermo::Fluid;

    fn sample() -> Fields {
        [
            ("Hot Inlet Temperature", " 90 "),
            ("Length", "-3"),
            ("Fluid", "Water"),
            ("Baffles", "4"),
            ("Blank", "   "),
            ("Mass Flow", "fast"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn reads_trimmed_numbers() {
        assert_eq!(sample().number("Hot Inlet Temperature"), Ok(90.0));
        assert_eq!(sample().count("Baffles"), Ok(4));
    }

    #[test]
    fn blank_counts_as_missing() {
        assert_eq!(
            sample().number("Blank"),
            Err(FieldError::Missing { field: "Blank" })
        );
        assert_eq!(sample().optional_number("Blank"), Ok(None));
    }

    #[test]
    fn reports_each_failure_kind() {
        let fields = sample();
        assert_eq!(
            fields.positive("Length"),
            Err(FieldError::NotPositive {
                field: "Length",
                value: -3.0
            })
        );
        assert!(matches!(
            fields.number("Mass Flow"),
            Err(FieldError::NotANumber { field: "Mass Flow", .. })
        ));
        assert!(matches!(
            fields.option::<Fluid>("Mass Flow"),
            Err(FieldError::UnknownOption { .. })
        ));
        assert_eq!(fields.option::<Fluid>("Fluid"), Ok(Fluid::Water));
    }
}

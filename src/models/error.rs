use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::{TemperatureInterval, ThermodynamicTemperature};

use crate::support::{
    constraint::ConstraintError, correlation::CorrelationError, fields::FieldError,
    geometry::CatalogError, thermo::PropertyError,
};

/// Errors returned by every model in this crate.
///
/// A non-converged iteration is not an error. It is reported through the
/// solution's convergence status instead.
#[derive(Debug, Error)]
pub enum ThermalError {
    /// A required input was missing, malformed, or out of range.
    #[error("invalid input")]
    Input(#[source] InputError),

    /// A property or catalog query had no answer.
    #[error("lookup failed")]
    Lookup(#[source] LookupError),

    /// The inputs describe a configuration that cannot exist.
    #[error("physically infeasible: {0}")]
    Infeasible(#[from] Infeasibility),
}

/// Broad category of a [`ThermalError`], for callers that present errors by kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Input,
    Lookup,
    Infeasible,
}

impl ThermalError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(_) => ErrorKind::Input,
            Self::Lookup(_) => ErrorKind::Lookup,
            Self::Infeasible(_) => ErrorKind::Infeasible,
        }
    }
}

/// Input validation failures.
#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    #[error(transparent)]
    Correlation(#[from] CorrelationError),
}

/// Failed lookups against an external collaborator.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Physically impossible configurations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Infeasibility {
    /// A terminal temperature difference is zero or negative.
    #[error("temperature cross: terminal differences {dt1:?} and {dt2:?}")]
    TemperatureCross {
        dt1: TemperatureInterval,
        dt2: TemperatureInterval,
    },

    #[error("hot inlet {hot:?} is not hotter than cold inlet {cold:?}")]
    InletOrdering {
        hot: ThermodynamicTemperature,
        cold: ThermodynamicTemperature,
    },

    /// A flow area, clearance, or diameter is zero or negative.
    #[error("degenerate geometry: {context}")]
    DegenerateGeometry { context: String },

    #[error("correction factor must be positive, got {value}")]
    NonPositiveCorrectionFactor { value: f64 },

    /// Excess temperature or subcooling is zero or negative.
    #[error("no driving temperature difference: {context}")]
    NoDrivingTemperature { context: String },

    /// The film Reynolds number could not be bracketed or did not converge.
    #[error("film solution failed: {reason}")]
    FilmSolution { reason: String },
}

impl Infeasibility {
    pub(crate) fn degenerate(context: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            context: context.into(),
        }
    }

    pub(crate) fn no_driving_temperature(context: impl Into<String>) -> Self {
        Self::NoDrivingTemperature {
            context: context.into(),
        }
    }
}

impl From<FieldError> for ThermalError {
    fn from(err: FieldError) -> Self {
        Self::Input(err.into())
    }
}

impl From<ConstraintError> for ThermalError {
    fn from(err: ConstraintError) -> Self {
        Self::Input(err.into())
    }
}

impl From<CorrelationError> for ThermalError {
    fn from(err: CorrelationError) -> Self {
        Self::Input(err.into())
    }
}

impl From<PropertyError> for ThermalError {
    fn from(err: PropertyError) -> Self {
        Self::Lookup(err.into())
    }
}

impl From<CatalogError> for ThermalError {
    fn from(err: CatalogError) -> Self {
        Self::Lookup(err.into())
    }
}

impl From<bisection::Error> for ThermalError {
    fn from(err: bisection::Error) -> Self {
        Self::Infeasible(Infeasibility::FilmSolution {
            reason: err.to_string(),
        })
    }
}

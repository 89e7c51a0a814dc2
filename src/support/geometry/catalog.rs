use thiserror::Error;

use super::{PipeDimensions, PipeKey, TubeCountKey, TubeKey};

/// Source of standard pipe and tube geometry.
pub trait GeometryCatalog {
    /// Outer and inner diameter of a catalog pipe.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no row matches `key`.
    fn pipe(&self, key: &PipeKey) -> Result<PipeDimensions, CatalogError>;

    /// Outer and inner diameter of a heat exchanger tube.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no row matches `key`.
    fn tube(&self, key: &TubeKey) -> Result<PipeDimensions, CatalogError>;

    /// Number of tubes that fit a shell for a given layout and pass count.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if no row matches `key`.
    fn tube_count(&self, key: &TubeCountKey) -> Result<u32, CatalogError>;
}

impl<C: GeometryCatalog + ?Sized> GeometryCatalog for &C {
    fn pipe(&self, key: &PipeKey) -> Result<PipeDimensions, CatalogError> {
        (**self).pipe(key)
    }

    fn tube(&self, key: &TubeKey) -> Result<PipeDimensions, CatalogError> {
        (**self).tube(key)
    }

    fn tube_count(&self, key: &TubeCountKey) -> Result<u32, CatalogError> {
        (**self).tube_count(key)
    }
}

/// Errors returned by a [`GeometryCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no {table} entry for {key}")]
    NotFound { table: &'static str, key: String },
}

impl CatalogError {
    pub(crate) fn not_found(table: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            table,
            key: key.to_string(),
        }
    }
}

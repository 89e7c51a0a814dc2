use thiserror::Error;

/// Errors returned by a [`PropertyProvider`](super::PropertyProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertyError {
    /// The property has no meaning at the requested condition.
    ///
    /// For example, surface tension of a single-phase state.
    #[error("undefined property: {context}")]
    Undefined { context: String },

    /// The requested fluid, temperature, or pressure is outside the provider's range.
    #[error("out of domain: {context}")]
    OutOfDomain { context: String },

    /// The provider returned a value that cannot describe a real fluid.
    #[error("invalid state: {context}")]
    InvalidState { context: String },
}

impl PropertyError {
    pub(crate) fn out_of_domain(context: impl Into<String>) -> Self {
        Self::OutOfDomain {
            context: context.into(),
        }
    }

    pub(crate) fn undefined(context: impl Into<String>) -> Self {
        Self::Undefined {
            context: context.into(),
        }
    }
}

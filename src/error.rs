//! Top-level error taxonomy for composition.

use thiserror::Error;

use crate::manifest::validation::ValidationError;
use crate::resolve::ModuleResolutionError;

/// Boxed error type for failures originating inside middleware factories.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the composition entry points.
///
/// `Argument` and `Validation` are raised synchronously at call time, before
/// any application state exists. `Resolution` and `Factory` occur during
/// assembly and travel through the callback/deferred channel when one of the
/// asynchronous calling conventions is used.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The compose call itself had an invalid shape (too many trailing
    /// arguments, misordered options/callback).
    #[error("invalid compose call: {0}")]
    Argument(String),

    /// Manifest or options failed schema conformance.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A referenced middleware or router module could not be resolved.
    #[error(transparent)]
    Resolution(#[from] ModuleResolutionError),

    /// A resolved middleware factory was invoked and failed.
    #[error("middleware factory `{name}` failed: {source}")]
    Factory {
        name: String,
        #[source]
        source: BoxError,
    },
}

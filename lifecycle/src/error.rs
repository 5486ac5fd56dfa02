use crate::lifecycle::Phase;
use thiserror::Error;

/// The error type components return from their lifecycle methods.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the `fibre_lifecycle` library.
#[derive(Debug, Error)]
pub enum Error {
  /// No registered component provides the capability a slot requires.
  ///
  /// This is a wiring defect: the registry was populated incompletely before
  /// injection ran.
  #[error(
    "component {component} injects not existing component with capability {capability} to slot '{slot}'"
  )]
  MissingDependency {
    component: &'static str,
    capability: &'static str,
    slot: &'static str,
  },

  /// A component reported failure from one of its lifecycle methods.
  #[error("{phase} failed for component {component}: {source}")]
  Phase {
    phase: Phase,
    component: &'static str,
    #[source]
    source: BoxError,
  },
}

impl Error {
  /// The type name of the component that caused the error.
  pub fn component(&self) -> &'static str {
    match self {
      Error::MissingDependency { component, .. } | Error::Phase { component, .. } => *component,
    }
  }
}

/// A specialized `Result` type for `fibre_lifecycle` operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

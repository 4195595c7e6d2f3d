//! Error types for simple-ab
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a caller-supplied selection strategy
pub type StrategyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// simple-ab error types
#[derive(Error, Debug)]
pub enum Error {
    /// Experiment was configured without a name
    #[error("Test should be named: experiment name must not be blank")]
    UnnamedTest,

    /// Experiment was configured with an empty side collection
    #[error("Sides not given for \"{test}\" test: declare at least one side")]
    NoSides {
        /// Experiment name
        test: String,
    },

    /// Side key is not a valid side name
    #[error("Invalid side name {0:?}: use a non-blank name (A-Z for declarative tests)")]
    InvalidSideName(String),

    /// The same side was registered twice
    #[error("Side \"{side}\" declared more than once for \"{test}\" test")]
    DuplicateSide {
        /// Experiment name
        test: String,
        /// Repeated side name
        side: String,
    },

    /// Forced or selected side is not among the declared sides
    #[error("Unknown side \"{side}\" for \"{test}\" test")]
    UnknownSide {
        /// Experiment name
        test: String,
        /// Requested side name
        side: String,
    },

    /// Declarative test has no producer registered for the requested letter
    #[error("Side \"{side}\" is not implemented for \"{test}\" test")]
    SideNotImplemented {
        /// Experiment name
        test: String,
        /// Requested side name
        side: String,
    },

    /// Caller-supplied selection strategy failed
    #[error("Selection strategy failed: {0}")]
    Strategy(#[source] StrategyError),
}

impl Error {
    /// Wrap an arbitrary strategy failure.
    pub fn strategy(err: impl Into<StrategyError>) -> Self {
        Self::Strategy(err.into())
    }

    /// True for lookup failures (unknown or unimplemented side).
    #[must_use]
    pub const fn is_lookup(&self) -> bool {
        matches!(self, Self::UnknownSide { .. } | Self::SideNotImplemented { .. })
    }

    /// True for configuration failures raised while building an experiment.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnnamedTest
                | Self::NoSides { .. }
                | Self::InvalidSideName(_)
                | Self::DuplicateSide { .. }
        )
    }
}

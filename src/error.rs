use thiserror::Error;

/// Errors raised while building or querying a smooth move.
#[derive(Debug, Error)]
pub enum SmoveError {
    /// A required configuration value (`xf` or `a`) was not provided.
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    /// A value was outside its allowed range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No real-valued sinusoid joins the two positions under the given bounds.
    #[error("failed to calculate end-point (x0: {x0}, xf: {xf}, v0: {v0}, a: {a})")]
    Infeasible { x0: f64, xf: f64, v0: f64, a: f64 },

    /// Start and end position coincide but the start velocity is not zero.
    #[error("no movement to {position} while starting at velocity {v0}")]
    NoMovement { position: f64, v0: f64 },

    /// The move would leave the configured position window.
    #[error("position {position} lies beyond limit {limit}")]
    LimitExceeded { position: f64, limit: f64 },

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),
}

impl SmoveError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SmoveError::InvalidArgument(msg.into())
    }

    /// True for every error caused by the caller's arguments rather than by the math.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SmoveError::MissingParameter(_)
                | SmoveError::InvalidArgument(_)
                | SmoveError::Config(_)
        )
    }

    /// True when the requested profile cannot be realized.
    pub fn is_infeasible(&self) -> bool {
        matches!(
            self,
            SmoveError::Infeasible { .. }
                | SmoveError::NoMovement { .. }
                | SmoveError::LimitExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SmoveError>;

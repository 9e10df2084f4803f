//! # Move configuration
//!
//! A smooth move is described by its end points, the acceleration bound and a
//! few optional limits. The configuration can be built in code or loaded from
//! TOML.
//!
//! ## Example: TOML Configuration
//!
//! ```toml
//! x0 = 0.0
//! xf = 2.0
//! a = 1.2
//! v_min = 0.2
//! v_max = 1.0
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use smove::SmoveConfig;
//! let config = SmoveConfig::from_toml_str("xf = 2.0\na = 1.2\nv_max = 1.0").unwrap();
//! let request = config.validate().unwrap();
//! assert_eq!(request.v_max, Some(1.0));
//! ```

use crate::error::{Result, SmoveError};
use serde::{Deserialize, Serialize};

/// User-facing parameters of a smooth move. `xf` and `a` are required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmoveConfig {
    /// End position.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xf: Option<f64>,
    /// Acceleration bound (magnitude).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    /// Start position.
    pub x0: f64,
    /// Start velocity.
    pub v0: f64,
    /// Velocity floor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_min: Option<f64>,
    /// Velocity ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v_max: Option<f64>,
    /// Lower position limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_min: Option<f64>,
    /// Upper position limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_max: Option<f64>,
}

/// A validated configuration with every required value resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub x0: f64,
    pub xf: f64,
    pub v0: f64,
    pub a: f64,
    pub v_min: Option<f64>,
    pub v_max: Option<f64>,
    pub x_min: Option<f64>,
    pub x_max: Option<f64>,
}

impl SmoveConfig {
    /// Move from 0 to `xf` under acceleration bound `a`.
    pub fn new(xf: f64, a: f64) -> Self {
        Self {
            xf: Some(xf),
            a: Some(a),
            ..Self::default()
        }
    }

    pub fn with_x0(mut self, x0: f64) -> Self {
        self.x0 = x0;
        self
    }

    pub fn with_v0(mut self, v0: f64) -> Self {
        self.v0 = v0;
        self
    }

    pub fn with_v_min(mut self, v_min: f64) -> Self {
        self.v_min = Some(v_min);
        self
    }

    pub fn with_v_max(mut self, v_max: f64) -> Self {
        self.v_max = Some(v_max);
        self
    }

    pub fn with_x_min(mut self, x_min: f64) -> Self {
        self.x_min = Some(x_min);
        self
    }

    pub fn with_x_max(mut self, x_max: f64) -> Self {
        self.x_max = Some(x_max);
        self
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Check every value and resolve the required ones.
    pub fn validate(&self) -> Result<MoveRequest> {
        let request = MoveRequest {
            x0: self.x0,
            xf: self.xf.ok_or(SmoveError::MissingParameter("xf"))?,
            v0: self.v0,
            a: self.a.ok_or(SmoveError::MissingParameter("a"))?,
            v_min: self.v_min,
            v_max: self.v_max,
            x_min: self.x_min,
            x_max: self.x_max,
        };
        request.check()?;
        Ok(request)
    }
}

impl MoveRequest {
    /// Reject non-finite values, non-positive `a` and inconsistent bounds.
    pub fn check(&self) -> Result<()> {
        let values = [
            ("xf", Some(self.xf)),
            ("a", Some(self.a)),
            ("x0", Some(self.x0)),
            ("v0", Some(self.v0)),
            ("v_min", self.v_min),
            ("v_max", self.v_max),
            ("x_min", self.x_min),
            ("x_max", self.x_max),
        ];
        for (name, value) in values {
            if let Some(value) = value.filter(|value| !value.is_finite()) {
                return Err(SmoveError::invalid(format!("{name} must be finite, got {value}")));
            }
        }

        if self.a <= 0.0 {
            return Err(SmoveError::invalid(format!("a must be positive, got {}", self.a)));
        }
        if let Some(v_min) = self.v_min.filter(|&v_min| v_min < 0.0) {
            return Err(SmoveError::invalid(format!("v_min must be >= 0, got {v_min}")));
        }
        if let Some(v_max) = self.v_max {
            if v_max <= 0.0 {
                return Err(SmoveError::invalid(format!("v_max must be > 0, got {v_max}")));
            }
            if let Some(v_min) = self.v_min.filter(|&v_min| v_min > v_max) {
                return Err(SmoveError::invalid(format!(
                    "v_min ({v_min}) must not exceed v_max ({v_max})"
                )));
            }
            if self.v0.abs() > v_max {
                return Err(SmoveError::invalid(format!(
                    "start velocity {} exceeds v_max ({v_max})",
                    self.v0
                )));
            }
        }

        if let (Some(x_min), Some(x_max)) = (self.x_min, self.x_max) {
            if x_min > x_max {
                return Err(SmoveError::invalid(format!(
                    "x_min ({x_min}) must not exceed x_max ({x_max})"
                )));
            }
        }
        for (name, x) in [("x0", self.x0), ("xf", self.xf)] {
            let below = self.x_min.is_some_and(|x_min| x < x_min);
            let above = self.x_max.is_some_and(|x_max| x > x_max);
            if below || above {
                return Err(SmoveError::invalid(format!(
                    "{name} ({x}) lies outside the position limits"
                )));
            }
        }
        Ok(())
    }
}

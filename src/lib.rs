//! # smove
//!
//! A small library for computing smooth sinusoidal motion profiles in Rust.
//!
//! This library provides the following modules:
//! - `solver` for the closed-form sinusoid joining two positions.
//! - `velocity_limiter` for splitting segments to respect velocity bounds.
//! - `position_window` for keeping a move inside position limits.
//! - `segment` for describing a single phase of a move in time.
//! - `trajectory` for evaluating and sampling the finished move.
//! - `config` for describing a move in code or TOML.
//!
//! ```rust
//! use smove::{SmoveConfig, Trajectory};
//!
//! let trajectory = Trajectory::new(&SmoveConfig::new(2.0, 1.2).with_v_max(1.0)).unwrap();
//! for sample in trajectory.sample_at(100.0).unwrap() {
//!     assert!(sample.v <= 1.0 + 1e-9);
//! }
//! ```

pub mod config;
pub mod error;
pub mod position_window;
pub mod segment;
pub mod solver;
pub mod trajectory;
pub mod velocity_limiter;

// Re-export main structs for convenience:
pub use config::*;
pub use error::*;
pub use segment::*;
pub use solver::calculate;
pub use trajectory::*;
pub use velocity_limiter::{limit_max_velocity, limit_min_velocity};

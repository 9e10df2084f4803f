use crate::config::{MoveRequest, SmoveConfig};
use crate::error::{Result, SmoveError};
use crate::position_window;
use crate::segment::{Constant, Segment};
use crate::solver;
use crate::velocity_limiter;
use serde::Serialize;

/// A single point of a sampled trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    /// Time since the start of the move (s).
    pub t: f64,
    /// Velocity.
    pub v: f64,
    /// Position.
    pub x: f64,
}

/// A smooth move between two positions.
///
/// The segment sequence is computed once in [`Trajectory::new`] and never
/// changes afterwards, so a trajectory can be queried from several threads.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    request: MoveRequest,
    segments: Vec<Segment>,
}

impl Trajectory {
    /// Validate `config` and compute the move.
    ///
    /// # Detailed explanation of the logic:
    ///
    /// 1. **Base segment**: one sinusoid from `x0` to rest at `xf`. A request
    ///    that is already at its end position and at rest becomes a
    ///    zero-length hold.
    /// 2. **Velocity floor**: if `v_min` is set, slow parts of the move are
    ///    replaced by constant-velocity delays.
    /// 3. **Velocity ceiling**: if `v_max` is set, fast parts are replaced by
    ///    a plateau between two ramps.
    /// 4. **Position window**: the final sequence must stay inside
    ///    `[x_min, x_max]` when those are set.
    pub fn new(config: &SmoveConfig) -> Result<Self> {
        Self::from_request(config.validate()?)
    }

    /// Compute the move for a resolved request. The request is checked again,
    /// so one assembled by hand is held to the same rules as a config.
    pub fn from_request(request: MoveRequest) -> Result<Self> {
        request.check()?;
        let MoveRequest { x0, xf, v0, a, .. } = request;

        let mut segments = match solver::calculate(x0, xf, v0, a) {
            Ok(base) => vec![Segment::from(base)],
            Err(SmoveError::NoMovement { .. }) if v0 == 0.0 => {
                tracing::debug!("Already resting at {}, nothing to move", xf);
                vec![Segment::from(Constant::hold(xf))]
            }
            Err(e) => return Err(e),
        };

        if let Some(v_min) = request.v_min {
            segments = velocity_limiter::limit_min_velocity(&segments, v_min)?;
        }
        if let Some(v_max) = request.v_max {
            segments = velocity_limiter::limit_max_velocity(&segments, v_max);
        }
        position_window::check_position_window(&segments, request.x_min, request.x_max)?;

        let trajectory = Self { request, segments };
        tracing::debug!(
            "Planned smove {:.4} -> {:.4}: {} segment(s), dur: {:.4}s, peak v: {:.4}",
            x0,
            xf,
            trajectory.segments.len(),
            trajectory.get_duration(),
            trajectory.get_peak_velocity()
        );
        Ok(trajectory)
    }

    /// Velocity at time `t` (s). Zero after the move has finished.
    pub fn get_velocity(&self, t: f64) -> Result<f64> {
        Self::check_time(t)?;
        Ok(self.state_at(t).v)
    }

    /// Position at time `t` (s). The end position after the move has finished.
    pub fn get_position(&self, t: f64) -> Result<f64> {
        Self::check_time(t)?;
        Ok(self.state_at(t).x)
    }

    /// Acceleration at time `t` (s). Zero after the move has finished.
    pub fn get_acceleration(&self, t: f64) -> Result<f64> {
        Self::check_time(t)?;
        Ok(self
            .segment_at(t)
            .map_or(0.0, |segment| segment.acceleration(t - segment.t0())))
    }

    /// Sample the move at the default sampling frequency.
    pub fn sample(&self) -> Result<Samples<'_>> {
        self.sample_at(self.get_sampling_frequency())
    }

    /// Sample the move every `1 / frequency` seconds, from `t = 0` up to and
    /// including the end of the move when it falls on a sampling instant.
    pub fn sample_at(&self, frequency: f64) -> Result<Samples<'_>> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(SmoveError::invalid(format!(
                "sampling frequency must be positive, got {frequency}"
            )));
        }
        Ok(Samples {
            trajectory: self,
            frequency,
            index: 0,
        })
    }

    /// Total duration of the move (s).
    pub fn get_duration(&self) -> f64 {
        self.segments.last().map_or(0.0, Segment::end_time)
    }

    /// Default sampling frequency: twice the highest angular frequency of any
    /// sinusoidal segment, or zero when only constant-velocity segments remain.
    pub fn get_sampling_frequency(&self) -> f64 {
        2.0 * self
            .segments
            .iter()
            .filter_map(Segment::frequency)
            .fold(0.0, f64::max)
    }

    /// Highest speed reached during the move.
    pub fn get_peak_velocity(&self) -> f64 {
        self.segments
            .iter()
            .map(Segment::peak_speed)
            .fold(0.0, f64::max)
    }

    pub fn get_x0(&self) -> f64 {
        self.request.x0
    }

    pub fn get_xf(&self) -> f64 {
        self.request.xf
    }

    pub fn get_v0(&self) -> f64 {
        self.request.v0
    }

    /// Velocity at the very end of the last segment.
    pub fn get_vf(&self) -> f64 {
        self.segments.last().map_or(0.0, Segment::end_velocity)
    }

    /// Get the computed segments in time order.
    pub fn get_segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Get the validated request this move was computed from.
    pub fn get_request(&self) -> MoveRequest {
        self.request
    }

    fn check_time(t: f64) -> Result<()> {
        if t.is_nan() || t < 0.0 {
            return Err(SmoveError::invalid(format!("time must be >= 0, got {t}")));
        }
        Ok(())
    }

    fn segment_at(&self, t: f64) -> Option<&Segment> {
        self.segments.iter().find(|segment| segment.end_time() >= t)
    }

    fn state_at(&self, t: f64) -> Sample {
        match self.segment_at(t) {
            Some(segment) => {
                let tau = t - segment.t0();
                Sample {
                    t,
                    v: segment.velocity(tau),
                    x: segment.position(tau),
                }
            }
            None => Sample {
                t,
                v: 0.0,
                x: self.request.xf,
            },
        }
    }
}

/// Lazily evaluated samples of a [`Trajectory`].
///
/// Nothing is consumed from the trajectory, so calling [`Trajectory::sample_at`]
/// again starts over and yields the same points.
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    trajectory: &'a Trajectory,
    frequency: f64,
    index: usize,
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let t = self.index as f64 / self.frequency;
        if t > self.trajectory.get_duration() {
            return None;
        }
        self.index += 1;
        Some(self.trajectory.state_at(t))
    }
}

impl std::iter::FusedIterator for Samples<'_> {}

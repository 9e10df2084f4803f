use serde::Serialize;
use std::f64::consts::{FRAC_PI_2, PI};

/// A sinusoidal phase of a smooth move.
///
/// Velocity follows `v(τ) = -A·f·sin(f·τ + phi)` and position follows
/// `x(τ) = A·cos(f·τ + phi) - m + x0` for a local time `τ` in `[0, dt]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sinusoid {
    /// Start position.
    pub x0: f64,
    /// End position.
    pub xf: f64,
    /// Start velocity.
    pub v0: f64,
    /// Acceleration bound the segment was derived from.
    pub a: f64,
    /// Signed amplitude `A`.
    pub amplitude: f64,
    /// Angular frequency `f`, always positive.
    pub frequency: f64,
    /// Phase offset `phi`.
    pub phase: f64,
    /// Vertical offset `m = A·cos(phi)`.
    pub offset: f64,
    /// Start time relative to the start of the trajectory.
    pub t0: f64,
    /// Duration.
    pub dt: f64,
}

impl Sinusoid {
    /// Velocity at local time `tau`.
    pub fn velocity(&self, tau: f64) -> f64 {
        -self.amplitude * self.frequency * (self.frequency * tau + self.phase).sin()
    }

    /// Position at local time `tau`.
    pub fn position(&self, tau: f64) -> f64 {
        self.amplitude * (self.frequency * tau + self.phase).cos() - self.offset + self.x0
    }

    /// Acceleration at local time `tau`.
    pub fn acceleration(&self, tau: f64) -> f64 {
        -self.amplitude * self.frequency.powi(2) * (self.frequency * tau + self.phase).cos()
    }

    /// Speed at the crest of the wave, `|A·f|`.
    pub fn crest_speed(&self) -> f64 {
        (self.amplitude * self.frequency).abs()
    }

    /// Phase angle reached at the end of the segment.
    pub fn end_phase(&self) -> f64 {
        self.frequency * self.dt + self.phase
    }

    /// Highest speed actually reached inside `[0, dt]`.
    pub fn peak_speed(&self) -> f64 {
        if self.phase <= FRAC_PI_2 && FRAC_PI_2 <= self.end_phase() {
            self.crest_speed()
        } else {
            self.velocity(0.0).abs().max(self.velocity(self.dt).abs())
        }
    }

    /// +1.0 when the crest moves towards positive x, -1.0 otherwise.
    pub fn direction(&self) -> f64 {
        if self.amplitude > 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Local time at which the speed first climbs to `speed` on the way to the crest.
    /// `speed` must not exceed the crest speed.
    pub fn time_rising_to(&self, speed: f64) -> f64 {
        ((speed / self.crest_speed()).asin() - self.phase) / self.frequency
    }

    /// Local time at which the speed falls back to `speed` after the crest.
    pub fn time_falling_to(&self, speed: f64) -> f64 {
        (PI - (speed / self.crest_speed()).asin() - self.phase) / self.frequency
    }

    /// Copy of the window `[from, to]` (local times) re-based to start at
    /// time `t0` and position `x0`.
    pub fn slice(&self, from: f64, to: f64, t0: f64, x0: f64) -> Sinusoid {
        let phase = self.phase + self.frequency * from;
        let mut piece = Sinusoid {
            x0,
            v0: self.velocity(from),
            phase,
            offset: self.amplitude * phase.cos(),
            t0,
            dt: to - from,
            ..*self
        };
        piece.xf = piece.position(piece.dt);
        piece
    }
}

/// A phase travelled at constant velocity, used for plateaus and delays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Constant {
    pub x0: f64,
    pub xf: f64,
    pub v0: f64,
    pub t0: f64,
    pub dt: f64,
}

impl Constant {
    /// Covers the distance from `x0` to `xf` at `speed` (must be positive), starting at `t0`.
    pub fn spanning(x0: f64, xf: f64, speed: f64, t0: f64) -> Self {
        let dx = xf - x0;
        Self {
            x0,
            xf,
            v0: speed * dx.signum(),
            t0,
            dt: dx.abs() / speed,
        }
    }

    /// A zero-length segment resting at `position`.
    pub fn hold(position: f64) -> Self {
        Self {
            x0: position,
            xf: position,
            v0: 0.0,
            t0: 0.0,
            dt: 0.0,
        }
    }

    pub fn velocity(&self, _tau: f64) -> f64 {
        self.v0
    }

    pub fn position(&self, tau: f64) -> f64 {
        self.v0 * tau + self.x0
    }
}

/// One phase of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Sinusoid(Sinusoid),
    Constant(Constant),
}

impl Segment {
    pub fn t0(&self) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.t0,
            Segment::Constant(c) => c.t0,
        }
    }

    pub fn dt(&self) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.dt,
            Segment::Constant(c) => c.dt,
        }
    }

    /// Time at which the segment ends, relative to the trajectory start.
    pub fn end_time(&self) -> f64 {
        self.t0() + self.dt()
    }

    pub fn x0(&self) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.x0,
            Segment::Constant(c) => c.x0,
        }
    }

    pub fn xf(&self) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.xf,
            Segment::Constant(c) => c.xf,
        }
    }

    pub fn v0(&self) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.v0,
            Segment::Constant(c) => c.v0,
        }
    }

    /// Velocity at local time `tau`.
    pub fn velocity(&self, tau: f64) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.velocity(tau),
            Segment::Constant(c) => c.velocity(tau),
        }
    }

    /// Position at local time `tau`.
    pub fn position(&self, tau: f64) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.position(tau),
            Segment::Constant(c) => c.position(tau),
        }
    }

    /// Acceleration at local time `tau`.
    pub fn acceleration(&self, tau: f64) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.acceleration(tau),
            Segment::Constant(_) => 0.0,
        }
    }

    pub fn end_velocity(&self) -> f64 {
        self.velocity(self.dt())
    }

    /// Highest speed reached within the segment.
    pub fn peak_speed(&self) -> f64 {
        match self {
            Segment::Sinusoid(s) => s.peak_speed(),
            Segment::Constant(c) => c.v0.abs(),
        }
    }

    /// Angular frequency of a sinusoidal segment.
    pub fn frequency(&self) -> Option<f64> {
        match self {
            Segment::Sinusoid(s) => Some(s.frequency),
            Segment::Constant(_) => None,
        }
    }

    /// Same segment moved to start at `t0`.
    pub(crate) fn starting_at(self, t0: f64) -> Segment {
        match self {
            Segment::Sinusoid(s) => Segment::Sinusoid(Sinusoid { t0, ..s }),
            Segment::Constant(c) => Segment::Constant(Constant { t0, ..c }),
        }
    }
}

impl From<Sinusoid> for Segment {
    fn from(s: Sinusoid) -> Self {
        Segment::Sinusoid(s)
    }
}

impl From<Constant> for Segment {
    fn from(c: Constant) -> Self {
        Segment::Constant(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // x0 = 0, xf = 1, v0 = 0, a = 1 solved by hand
    fn unit_move() -> Sinusoid {
        let amplitude = -0.5;
        let frequency = 2.0_f64.sqrt();
        Sinusoid {
            x0: 0.0,
            xf: 1.0,
            v0: 0.0,
            a: 1.0,
            amplitude,
            frequency,
            phase: 0.0,
            offset: amplitude,
            t0: 0.0,
            dt: PI / frequency,
        }
    }

    #[test]
    fn sinusoid_starts_and_ends_at_rest() {
        let s = unit_move();
        assert!(s.velocity(0.0).abs() < 1e-12);
        assert!(s.velocity(s.dt).abs() < 1e-12);
        assert!((s.position(s.dt) - 1.0).abs() < 1e-12);
        assert!((s.peak_speed() - 0.5_f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.direction(), 1.0);
    }

    #[test]
    fn acceleration_is_bounded_by_a() {
        let s = unit_move();
        assert!((s.acceleration(0.0) - 1.0).abs() < 1e-12);
        assert!((s.acceleration(s.dt) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn slice_keeps_the_curve() {
        let s = unit_move();
        let from = s.dt * 0.25;
        let to = s.dt * 0.75;
        let piece = s.slice(from, to, 3.0, s.position(from));

        assert_eq!(piece.t0, 3.0);
        assert!((piece.dt - s.dt * 0.5).abs() < 1e-12);
        for i in 0..=10 {
            let tau = piece.dt * i as f64 / 10.0;
            assert!((piece.velocity(tau) - s.velocity(from + tau)).abs() < 1e-12);
            assert!((piece.position(tau) - s.position(from + tau)).abs() < 1e-12);
        }
        assert!((piece.xf - s.position(to)).abs() < 1e-12);
        assert!((piece.v0 - s.velocity(from)).abs() < 1e-12);
    }

    #[test]
    fn rising_and_falling_times_mirror_around_crest() {
        let s = unit_move();
        let rise = s.time_rising_to(0.5);
        let fall = s.time_falling_to(0.5);
        assert!((s.velocity(rise) - 0.5).abs() < 1e-12);
        assert!((s.velocity(fall) - 0.5).abs() < 1e-12);
        assert!((rise + fall - s.dt).abs() < 1e-12);
    }

    #[test]
    fn peak_speed_of_a_slice_past_the_crest() {
        let s = unit_move();
        let piece = s.slice(s.dt * 0.75, s.dt, 0.0, 0.0);
        assert!((piece.peak_speed() - s.velocity(s.dt * 0.75)).abs() < 1e-12);
    }

    #[test]
    fn constant_spans_in_both_directions() {
        let forward = Constant::spanning(1.0, 3.0, 0.5, 2.0);
        assert_eq!(forward.v0, 0.5);
        assert_eq!(forward.dt, 4.0);
        assert_eq!(forward.position(forward.dt), 3.0);

        let backward = Constant::spanning(3.0, 1.0, 0.5, 0.0);
        assert_eq!(backward.v0, -0.5);
        assert_eq!(backward.position(backward.dt), 1.0);
    }

    #[test]
    fn segment_dispatches_to_variant() {
        let seg = Segment::from(Constant::spanning(0.0, 2.0, 1.0, 1.0));
        assert_eq!(seg.end_time(), 3.0);
        assert_eq!(seg.velocity(0.5), 1.0);
        assert_eq!(seg.acceleration(0.5), 0.0);
        assert_eq!(seg.frequency(), None);
        assert_eq!(seg.starting_at(5.0).t0(), 5.0);
    }
}

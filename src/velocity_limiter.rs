//! Rewrites segment sequences so that no segment violates a velocity bound.
//!
//! Each segment expands independently into one or more pieces. The pieces of
//! the whole sequence are then chained back together so that every piece
//! starts exactly when the previous one ends.

use crate::error::Result;
use crate::segment::{Constant, Segment};
use crate::solver;

/// Pieces shorter than this are dropped from an expansion.
const T_MIN: f64 = 1e-12;

/// Limit the peak speed of every segment to `v_max`.
pub fn limit_max_velocity(segments: &[Segment], v_max: f64) -> Vec<Segment> {
    let expansions = segments
        .iter()
        .map(|segment| limit_max_velocity_segment(segment, v_max));
    chain(expansions, start_time(segments))
}

/// Keep every segment at or above `v_min` once it has started moving.
pub fn limit_min_velocity(segments: &[Segment], v_min: f64) -> Result<Vec<Segment>> {
    let expansions = segments
        .iter()
        .map(|segment| limit_min_velocity_segment(segment, v_min))
        .collect::<Result<Vec<_>>>()?;
    Ok(chain(expansions, start_time(segments)))
}

/// Split a sinusoid that is faster than `v_max` into an accelerating ramp,
/// a plateau at `v_max` and a decelerating ramp.
///
/// The ramps are windows of the original wave: the first ends where the speed
/// reaches `v_max`, the second starts where it falls back to `v_max`. The
/// plateau covers the distance the wave would have covered in between.
pub fn limit_max_velocity_segment(segment: &Segment, v_max: f64) -> Vec<Segment> {
    let s = match segment {
        Segment::Sinusoid(s) if s.peak_speed() > v_max => s,
        _ => return vec![*segment],
    };

    let t1 = s.time_rising_to(v_max).clamp(0.0, s.dt);
    let t2 = s.time_falling_to(v_max).clamp(t1, s.dt);

    let ramp_up = s.slice(0.0, t1, s.t0, s.x0);
    let cruise = s.position(t2) - s.position(t1);
    let plateau = Constant::spanning(
        ramp_up.xf,
        ramp_up.xf + cruise,
        v_max,
        ramp_up.t0 + ramp_up.dt,
    );
    let ramp_down = s.slice(t2, s.dt, plateau.t0 + plateau.dt, plateau.xf);

    tracing::trace!(
        "Capped segment at {:.4}: peak {:.4}, ramps {:.6}s/{:.6}s, plateau {:.6}s",
        v_max,
        s.peak_speed(),
        ramp_up.dt,
        ramp_down.dt,
        plateau.dt
    );

    keep_nonempty([ramp_up.into(), plateau.into(), ramp_down.into()])
}

/// Replace the slow head and tail of a sinusoid with constant-velocity delays
/// at `v_min`.
///
/// A segment that never gets faster than `v_min` becomes one constant-velocity
/// segment over the whole distance, so the move ends at `v_min` rather than at
/// rest. Otherwise the part below `v_min` at the start becomes `delay1`, the
/// middle is re-derived with the solver as a wave that starts and ends at
/// `v_min`, and `delay2` mirrors `delay1` up to the end position.
pub fn limit_min_velocity_segment(segment: &Segment, v_min: f64) -> Result<Vec<Segment>> {
    let s = match segment {
        Segment::Sinusoid(s) if v_min > 0.0 => s,
        _ => return Ok(vec![*segment]),
    };

    if s.peak_speed() <= v_min {
        tracing::trace!(
            "Segment peak {:.4} below floor {:.4}, travelling at constant velocity",
            s.peak_speed(),
            v_min
        );
        return Ok(vec![Constant::spanning(s.x0, s.xf, v_min, s.t0).into()]);
    }

    let t_min = s.time_rising_to(v_min);
    if t_min <= 0.0 || t_min > s.dt {
        return Ok(vec![*segment]);
    }

    let direction = s.direction();
    let d1 = (direction * (s.position(t_min) - s.x0)).max(0.0);
    let span = (s.xf - s.x0).abs() - 2.0 * d1;

    // Amplitude of a wave with |A|·f² = a whose stretch between the two
    // v_min crossings is exactly `span` long.
    let lag = v_min.powi(2) / s.a;
    let amplitude = (lag + (lag.powi(2) + span.powi(2)).sqrt()) / 2.0;
    let crossing = (v_min / (s.a * amplitude).sqrt()).asin();
    let reach = amplitude * (1.0 + crossing.cos());

    let delay1 = Constant::spanning(s.x0, s.x0 + direction * d1, v_min, s.t0);
    let wave = solver::calculate(
        delay1.xf,
        delay1.xf + direction * reach,
        direction * v_min,
        s.a,
    )?;
    let middle = wave.slice(
        0.0,
        wave.time_falling_to(v_min),
        delay1.t0 + delay1.dt,
        delay1.xf,
    );
    let delay2 = Constant::spanning(middle.xf, s.xf, v_min, middle.t0 + middle.dt);

    tracing::trace!(
        "Raised segment to floor {:.4}: delays {:.6}s/{:.6}s, middle {:.6}s",
        v_min,
        delay1.dt,
        delay2.dt,
        middle.dt
    );

    Ok(keep_nonempty([delay1.into(), middle.into(), delay2.into()]))
}

/// Concatenate expansions, moving each piece to start when the previous one ends.
pub(crate) fn chain<I>(expansions: I, start: f64) -> Vec<Segment>
where
    I: IntoIterator<Item = Vec<Segment>>,
{
    let mut clock = start;
    let mut sequence = Vec::new();
    for piece in expansions.into_iter().flatten() {
        let piece = piece.starting_at(clock);
        clock = piece.end_time();
        sequence.push(piece);
    }
    sequence
}

fn start_time(segments: &[Segment]) -> f64 {
    segments.first().map_or(0.0, Segment::t0)
}

fn keep_nonempty<const N: usize>(pieces: [Segment; N]) -> Vec<Segment> {
    pieces.into_iter().filter(|piece| piece.dt() >= T_MIN).collect()
}

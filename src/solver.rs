use crate::error::{Result, SmoveError};
use crate::segment::Sinusoid;
use std::f64::consts::PI;

/// Relative slack allowed between the requested end position and the one
/// reproduced from the solved parameters.
const END_POINT_TOLERANCE: f64 = 1e-9;

/// Calculate a sinusoidal movement from `x0` (moving at `v0`) to rest at `xf`,
/// never exceeding the acceleration magnitude `a`.
///
/// # Detailed explanation of the logic:
///
/// 1. The amplitude follows from the kinematic identity between peak
///    acceleration, displacement and initial velocity:
///    `A = -a·dx² / (2·a·|dx| - v0²)`, mirrored for negative `dx`.
/// 2. `f = sqrt(|a / A|)` keeps `|A|·f² = a`.
/// 3. The phase is chosen so that `v(0) = v0`, and the segment lasts until the
///    wave reaches `π`, where the velocity is zero again. `asin` gives a phase
///    before the crest. When that wave misses `xf`, the start lies past the
///    crest instead (`v0² > a·|dx|`), so the phase `π - asin(..)` is tried.
/// 4. The end position is recomputed from the solved parameters. An undefined
///    value, or a miss on both phases, means `v0` is too large for `a` and `dx`.
pub fn calculate(x0: f64, xf: f64, v0: f64, a: f64) -> Result<Sinusoid> {
    let dx = xf - x0;
    if dx == 0.0 {
        return Err(SmoveError::NoMovement { position: xf, v0 });
    }

    let infeasible = || SmoveError::Infeasible { x0, xf, v0, a };

    // Amplitude
    let mut amplitude = -a * dx.powi(2) / (a * 2.0 * dx.abs() - v0.powi(2));
    if dx < 0.0 {
        amplitude = -amplitude;
    }

    let frequency = (a / amplitude).abs().sqrt();
    let rising = (-v0 / (amplitude * frequency)).asin();

    for phase in [rising, PI - rising] {
        let dt = (PI - phase) / frequency;
        let segment = Sinusoid {
            x0,
            xf,
            v0,
            a,
            amplitude,
            frequency,
            phase,
            offset: amplitude * phase.cos(),
            t0: 0.0,
            dt,
        };

        let end = segment.position(dt);
        let parameters_defined = [amplitude, frequency, phase, dt, end]
            .iter()
            .all(|value| value.is_finite());
        if !parameters_defined || frequency <= 0.0 {
            return Err(infeasible());
        }
        if dt < 0.0 || (end - xf).abs() > END_POINT_TOLERANCE * dx.abs().max(1.0) {
            tracing::trace!(
                "Phase {:.6} ends at {:.6}, missing target {:.6} (v0 {:.4}, a {:.4})",
                phase,
                end,
                xf,
                v0,
                a
            );
            continue;
        }

        tracing::trace!(
            "Sinusoid {:.4} -> {:.4}: A {:.6}, f {:.6}, phi {:.6}, dt {:.6}",
            x0,
            xf,
            amplitude,
            frequency,
            phase,
            dt
        );
        return Ok(segment);
    }
    Err(infeasible())
}

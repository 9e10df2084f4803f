//! Keeps a trajectory inside an optional `[x_min, x_max]` window.
//!
//! A sinusoid never overshoots its end position, but a start velocity pointing
//! away from the target makes it travel backwards first. The furthest point of
//! that excursion is already the shortest stop the acceleration bound allows,
//! so a sequence that leaves the window cannot be repaired and is rejected.

use crate::error::{Result, SmoveError};
use crate::segment::Segment;
use std::f64::consts::PI;

/// Lowest and highest position reached by `segment` within its span.
pub fn position_extent(segment: &Segment) -> (f64, f64) {
    let (start, end) = (segment.x0(), segment.position(segment.dt()));
    let mut lowest = start.min(end);
    let mut highest = start.max(end);

    if let Segment::Sinusoid(s) = segment {
        let end_phase = s.end_phase();
        // cos(θ) = ±1 at multiples of π
        let mut angle = (s.phase / PI).ceil() * PI;
        while angle <= end_phase {
            let x = s.amplitude * angle.cos() - s.offset + s.x0;
            lowest = lowest.min(x);
            highest = highest.max(x);
            angle += PI;
        }
    }
    (lowest, highest)
}

/// Fail when any segment leaves `[x_min, x_max]`. Either limit may be absent.
pub fn check_position_window(
    segments: &[Segment],
    x_min: Option<f64>,
    x_max: Option<f64>,
) -> Result<()> {
    for segment in segments {
        let (lowest, highest) = position_extent(segment);
        if let Some(limit) = x_min.filter(|&limit| lowest < limit) {
            return Err(SmoveError::LimitExceeded {
                position: lowest,
                limit,
            });
        }
        if let Some(limit) = x_max.filter(|&limit| highest > limit) {
            return Err(SmoveError::LimitExceeded {
                position: highest,
                limit,
            });
        }
    }
    Ok(())
}

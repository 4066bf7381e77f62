//! Tick-spacing math for the axis and grid overlays.
//!
//! Cartesian labels use the classic "nice number" ladder (1/2/5/10 times a
//! power of ten); the polar grid is fixed at 12 spokes and 5 rings.

use std::f64::consts::PI;

/// Spokes on the polar grid (one every 30 degrees).
pub const ANGLE_TICK_COUNT: usize = 12;
/// Concentric rings on the polar grid.
pub const RING_COUNT: usize = 5;

/// Threshold below which a tick value counts as zero (and below which a step
/// is too small for the zero-skip to apply).
const ZERO_EPS: f64 = 1e-9;

/// Round `range / max_ticks` to a human-friendly step. Degenerate ranges
/// return 1.
pub fn nice_step(range: f64, max_ticks: usize) -> f64 {
    if range <= 0.0 {
        return 1.0;
    }
    let raw_step = range / max_ticks as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    if normalized > 5.0 {
        10.0 * magnitude
    } else if normalized > 2.0 {
        5.0 * magnitude
    } else if normalized > 1.0 {
        2.0 * magnitude
    } else {
        magnitude
    }
}

/// Tick values at every multiple of the nice step inside `[min, max]`.
///
/// The tick nearest zero is skipped when it actually is zero (within
/// epsilon) and the step is non-negligible, so the axis label does not
/// collide with the origin.
pub fn axis_ticks(min: f64, max: f64, max_ticks: usize) -> Vec<f64> {
    let step = nice_step(max - min, max_ticks);
    let mut ticks = Vec::new();
    if !step.is_finite() || step <= 0.0 {
        return ticks;
    }

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    for i in first..=last {
        let value = i as f64 * step;
        if value.abs() < ZERO_EPS && step > ZERO_EPS {
            continue;
        }
        ticks.push(value);
    }
    ticks
}

/// An angular grid label: where the spoke points and how to rotate its text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleTick {
    pub degrees: u32,
    pub radians: f64,
    /// Text rotation in degrees; spokes in the left half-plane get an extra
    /// 180° so labels never render upside-down.
    pub rotation: f64,
}

/// The fixed set of polar spoke labels (0°, 30°, ..., 330°).
pub fn angle_ticks() -> Vec<AngleTick> {
    (0..ANGLE_TICK_COUNT)
        .map(|i| {
            let degrees = (i * 360 / ANGLE_TICK_COUNT) as u32;
            let mut rotation = f64::from(degrees);
            if degrees > 90 && degrees < 270 {
                rotation += 180.0;
            }
            AngleTick {
                degrees,
                radians: (i as f64 / ANGLE_TICK_COUNT as f64) * 2.0 * PI,
                rotation,
            }
        })
        .collect()
}

/// Radii of the concentric grid rings, evenly spaced up to `max_radius`.
pub fn ring_radii(max_radius: f64) -> Vec<f64> {
    (1..=RING_COUNT)
        .map(|i| (i as f64 / RING_COUNT as f64) * max_radius)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_rounds_up_the_ladder() {
        // raw = 9.5, magnitude = 1, normalized = 9.5 -> 10
        assert_eq!(nice_step(95.0, 10), 10.0);
        // raw = 0.35, magnitude = 0.1, normalized = 3.5 -> 0.5
        assert!((nice_step(3.5, 10) - 0.5).abs() < 1e-12);
        // raw = 15, magnitude = 10, normalized = 1.5 -> 20
        assert_eq!(nice_step(150.0, 10), 20.0);
        // raw = 1, normalized = 1 -> magnitude itself
        assert_eq!(nice_step(10.0, 10), 1.0);
    }

    #[test]
    fn nice_step_degenerate_range() {
        assert_eq!(nice_step(0.0, 10), 1.0);
        assert_eq!(nice_step(-5.0, 10), 1.0);
    }

    #[test]
    fn axis_ticks_cover_the_range_and_skip_zero() {
        let ticks = axis_ticks(-25.0, 25.0, 10);
        assert!(!ticks.is_empty());
        for t in &ticks {
            assert!(*t >= -25.0 && *t <= 25.0);
            assert!(t.abs() > 1e-9, "zero tick should be skipped");
        }
        // step = 5 over [-25, 25]; zero removed from the 11 multiples
        assert_eq!(ticks.len(), 10);
        assert_eq!(ticks[0], -25.0);
        assert_eq!(*ticks.last().unwrap(), 25.0);
    }

    #[test]
    fn axis_ticks_offset_range_keeps_all_multiples() {
        let ticks = axis_ticks(12.0, 62.0, 10);
        assert_eq!(ticks, vec![15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0]);
    }

    #[test]
    fn twelve_spokes_thirty_degrees_apart() {
        let ticks = angle_ticks();
        assert_eq!(ticks.len(), 12);
        for (i, t) in ticks.iter().enumerate() {
            assert_eq!(t.degrees, i as u32 * 30);
        }
    }

    #[test]
    fn left_half_plane_labels_are_flipped_upright() {
        for t in angle_ticks() {
            if t.degrees > 90 && t.degrees < 270 {
                assert_eq!(t.rotation, f64::from(t.degrees) + 180.0);
            } else {
                assert_eq!(t.rotation, f64::from(t.degrees));
            }
        }
    }

    #[test]
    fn ring_radii_are_evenly_spaced() {
        let radii = ring_radii(60.0);
        assert_eq!(radii, vec![12.0, 24.0, 36.0, 48.0, 60.0]);
    }
}

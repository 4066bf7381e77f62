use std::f64::consts::PI;

/// A point in curve/world space (unitless).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the origin.
    #[inline]
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Parameters of the Pascal limaçon `r = a(k + cos t)`.
///
/// `k = 1` traces a cardioid, `k < 1` a curve with an inner loop,
/// `k > 1` a convex curve. `turns` is the number of full 2π traversals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    pub a: f64,
    pub k: f64,
    pub steps: u32,
    pub turns: u32,
}

impl CurveParams {
    /// Sample the curve at `steps + 1` evenly spaced parameter values
    /// covering `turns` full traversals.
    ///
    /// Pure and deterministic. `steps = 0` yields the single point at t = 0.
    pub fn sample(&self) -> Vec<Point> {
        if self.steps == 0 {
            return vec![limacon_point(0.0, self.a, self.k)];
        }

        let steps = self.steps as usize;
        let span = f64::from(self.turns) * 2.0 * PI;
        let mut points = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let t = (i as f64 / steps as f64) * span;
            points.push(limacon_point(t, self.a, self.k));
        }
        points
    }
}

/// Evaluate the limaçon at parameter `t`.
#[inline]
fn limacon_point(t: f64, a: f64, k: f64) -> Point {
    let r = a * (k + t.cos());
    Point::new(r * t.cos(), r * t.sin())
}

/// Largest distance from the origin over the sampled points.
/// Zero for an empty sequence.
pub fn max_radius(points: &[Point]) -> f64 {
    points.iter().map(Point::radius).fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn sample_returns_steps_plus_one_points() {
        let params = CurveParams { a: 20.0, k: 2.0, steps: 4, turns: 1 };
        assert_eq!(params.sample().len(), 5);

        let params = CurveParams { a: 1.0, k: 0.5, steps: 1000, turns: 3 };
        assert_eq!(params.sample().len(), 1001);
    }

    #[test]
    fn curve_closes_after_whole_turns() {
        let params = CurveParams { a: 20.0, k: 2.0, steps: 4, turns: 1 };
        let pts = params.sample();
        let first = pts[0];
        let last = pts[4];
        assert!((first.x - last.x).abs() < EPS);
        assert!((first.y - last.y).abs() < EPS);
    }

    #[test]
    fn zero_steps_yields_single_point_at_origin_parameter() {
        let params = CurveParams { a: 20.0, k: 2.0, steps: 0, turns: 1 };
        let pts = params.sample();
        assert_eq!(pts.len(), 1);
        // t = 0: r = a(k + 1), on the positive x axis
        assert!((pts[0].x - 60.0).abs() < EPS);
        assert!(pts[0].y.abs() < EPS);
    }

    #[test]
    fn sampler_matches_polar_equation() {
        let params = CurveParams { a: 3.0, k: 1.5, steps: 8, turns: 1 };
        let pts = params.sample();
        for (i, p) in pts.iter().enumerate() {
            let t = (i as f64 / 8.0) * 2.0 * PI;
            let r = 3.0 * (1.5 + t.cos());
            assert!((p.x - r * t.cos()).abs() < EPS);
            assert!((p.y - r * t.sin()).abs() < EPS);
        }
    }

    #[test]
    fn max_radius_over_samples() {
        assert_eq!(max_radius(&[]), 0.0);

        // Convex limaçon peaks at t = 0 with r = a(k + 1)
        let params = CurveParams { a: 20.0, k: 2.0, steps: 1000, turns: 1 };
        let pts = params.sample();
        assert!((max_radius(&pts) - 60.0).abs() < 1e-6);
    }
}

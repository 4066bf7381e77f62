use crate::curve::Point;

/// Hard ceiling on the auto-fit scale so near-degenerate curves do not
/// produce unusable zoom levels.
pub const MAX_AUTO_SCALE: f64 = 100.0;
/// Fraction of the viewport left free around an auto-fitted curve.
pub const FIT_MARGIN: f64 = 0.9;

pub const MIN_MANUAL_ZOOM: f64 = 0.5;
pub const MAX_MANUAL_ZOOM: f64 = 5.0;
const ZOOM_STEP: f64 = 1.25;

/// Axis-aligned bounding box of a point sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Single-pass min/max reduction. `None` for an empty sequence, which
    /// callers must treat as "do not scale, do not center".
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in points {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Center of the box, used to recenter the Cartesian view.
    pub fn center(&self) -> Point {
        Point::new(
            self.min_x + self.width() / 2.0,
            self.min_y + self.height() / 2.0,
        )
    }
}

/// Uniform scale that fits `bounds` inside a `view_w` × `view_h` viewport
/// with a margin, clamped to [`MAX_AUTO_SCALE`]. Degenerate bounds (zero
/// width or height) fall back to 1.
pub fn fit_scale(bounds: &Bounds, view_w: f64, view_h: f64) -> f64 {
    let (w, h) = (bounds.width(), bounds.height());
    if w == 0.0 || h == 0.0 {
        return 1.0;
    }
    let s = (view_w / w).min(view_h / h) * FIT_MARGIN;
    s.min(MAX_AUTO_SCALE)
}

/// View transform state: auto-fit scale, user zoom multiplier and pan offset.
///
/// `offset` is the world-space point shown at the viewport center.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub auto_scale: f64,
    pub manual_zoom: f64,
    pub offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            auto_scale: 1.0,
            manual_zoom: 1.0,
            offset: Point::default(),
        }
    }
}

impl Camera {
    /// Final render scale in viewport units per world unit.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.auto_scale * self.manual_zoom
    }

    pub fn zoom_in(&mut self) {
        self.manual_zoom = (self.manual_zoom * ZOOM_STEP).min(MAX_MANUAL_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.manual_zoom = (self.manual_zoom / ZOOM_STEP).max(MIN_MANUAL_ZOOM);
    }

    /// Pan by a viewport-space delta (positive dx moves the view right).
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let s = self.scale();
        self.offset.x += dx / s;
        self.offset.y += dy / s;
    }

    /// Recompute the auto-fit scale and recenter for the given bounds.
    ///
    /// The polar view stays centered on the origin; the Cartesian view
    /// centers on the curve. Without bounds nothing is scaled or centered.
    pub fn refit(&mut self, bounds: Option<&Bounds>, view_w: f64, view_h: f64, polar: bool) {
        match bounds {
            Some(b) => {
                self.auto_scale = fit_scale(b, view_w, view_h);
                self.offset = if polar { Point::default() } else { b.center() };
            }
            None => {
                self.auto_scale = 1.0;
                self.offset = Point::default();
            }
        }
    }

    /// Visible world-space range `(min_x, max_x, min_y, max_y)` for a
    /// viewport of the given size.
    pub fn visible_range(&self, view_w: f64, view_h: f64) -> (f64, f64, f64, f64) {
        let half_w = view_w / self.scale() / 2.0;
        let half_h = view_h / self.scale() / 2.0;
        (
            self.offset.x - half_w,
            self.offset.x + half_w,
            self.offset.y - half_h,
            self.offset.y + half_h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveParams;

    #[test]
    fn bounds_of_empty_sequence_is_none() {
        assert!(Bounds::of(&[]).is_none());
    }

    #[test]
    fn bounds_contain_every_point() {
        let pts = CurveParams { a: 20.0, k: 0.5, steps: 500, turns: 1 }.sample();
        let b = Bounds::of(&pts).unwrap();
        for p in &pts {
            assert!(b.min_x <= p.x && p.x <= b.max_x);
            assert!(b.min_y <= p.y && p.y <= b.max_y);
        }
        assert!(b.width() >= 0.0);
        assert!(b.height() >= 0.0);
    }

    #[test]
    fn fit_scale_reserves_margin() {
        let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 100.0, max_y: 50.0 };
        // min(100, min(800/100, 600/50) * 0.9) = min(100, 8 * 0.9)
        let s = fit_scale(&b, 800.0, 600.0);
        assert!((s - 7.2).abs() < 1e-12);
    }

    #[test]
    fn fit_scale_is_capped() {
        let b = Bounds { min_x: 0.0, min_y: 0.0, max_x: 0.1, max_y: 0.1 };
        assert_eq!(fit_scale(&b, 800.0, 600.0), MAX_AUTO_SCALE);
    }

    #[test]
    fn degenerate_bounds_fall_back_to_unit_scale() {
        let b = Bounds { min_x: 5.0, min_y: -1.0, max_x: 5.0, max_y: 3.0 };
        assert_eq!(fit_scale(&b, 800.0, 600.0), 1.0);
    }

    #[test]
    fn manual_zoom_is_clamped() {
        let mut cam = Camera::default();
        for _ in 0..40 {
            cam.zoom_in();
        }
        assert_eq!(cam.manual_zoom, MAX_MANUAL_ZOOM);
        for _ in 0..40 {
            cam.zoom_out();
        }
        assert_eq!(cam.manual_zoom, MIN_MANUAL_ZOOM);
    }

    #[test]
    fn refit_without_bounds_resets_view() {
        let mut cam = Camera {
            auto_scale: 12.0,
            manual_zoom: 2.0,
            offset: Point::new(3.0, 4.0),
        };
        cam.refit(None, 800.0, 600.0, false);
        assert_eq!(cam.auto_scale, 1.0);
        assert_eq!(cam.offset, Point::default());
        // Manual zoom is user state and survives a refit
        assert_eq!(cam.manual_zoom, 2.0);
    }

    #[test]
    fn polar_refit_keeps_origin_centered() {
        let b = Bounds { min_x: 10.0, min_y: 10.0, max_x: 30.0, max_y: 20.0 };
        let mut cam = Camera::default();
        cam.refit(Some(&b), 800.0, 600.0, true);
        assert_eq!(cam.offset, Point::default());
        cam.refit(Some(&b), 800.0, 600.0, false);
        assert_eq!(cam.offset, Point::new(20.0, 15.0));
    }

    #[test]
    fn visible_range_is_centered_on_offset() {
        let cam = Camera {
            auto_scale: 2.0,
            manual_zoom: 1.0,
            offset: Point::new(10.0, -5.0),
        };
        let (min_x, max_x, min_y, max_y) = cam.visible_range(200.0, 100.0);
        assert_eq!((min_x, max_x), (-40.0, 60.0));
        assert_eq!((min_y, max_y), (-30.0, 20.0));
    }
}

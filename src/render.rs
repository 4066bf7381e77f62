use ratatui::prelude::*;

use crate::curve::Point;
use crate::view::Camera;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// Maps world coordinates to the braille dot grid.
///
/// A terminal cell is roughly twice as tall as wide; its 2x4 braille
/// subdivision therefore yields near-square dots, so no aspect correction
/// is applied. The world y axis points up, the dot y axis down.
#[derive(Debug, Clone, Copy)]
pub struct Projection {
    scale: f64,
    center: Point,
    grid_w: f64,
    grid_h: f64,
}

impl Projection {
    pub fn new(camera: &Camera, grid_w: usize, grid_h: usize) -> Self {
        Self {
            scale: camera.scale(),
            center: camera.offset,
            grid_w: grid_w as f64,
            grid_h: grid_h as f64,
        }
    }

    /// World point to (fractional) dot coordinates.
    #[inline]
    pub fn to_dot(&self, p: Point) -> (f64, f64) {
        (
            (p.x - self.center.x) * self.scale + self.grid_w / 2.0,
            self.grid_h / 2.0 - (p.y - self.center.y) * self.scale,
        )
    }

    /// World length to dot length.
    #[inline]
    pub fn to_dot_len(&self, len: f64) -> f64 {
        len * self.scale
    }
}

/// A canvas for sub-character braille rendering.
///
/// Each terminal character cell maps to a 2x4 grid of dots. Alongside the
/// dot grid, every character cell carries a "tag" (last writer wins) that
/// the render closure turns into a color, which is how the curve gradient
/// survives the reduction from dots to characters.
pub struct DotCanvas {
    dots: Vec<bool>,
    tags: Vec<f32>,
    grid_w: usize,
    grid_h: usize,
    char_w: usize,
    char_h: usize,
}

impl DotCanvas {
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * 2;
        let grid_h = char_h * 4;
        Self {
            dots: vec![false; grid_w * grid_h],
            tags: vec![0.0; char_w * char_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
        }
    }

    /// Set a single dot (bounds-checked).
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, tag: f32) {
        if gx >= 0 && (gx as usize) < self.grid_w && gy >= 0 && (gy as usize) < self.grid_h {
            let (gx, gy) = (gx as usize, gy as usize);
            self.dots[gy * self.grid_w + gx] = true;
            self.tags[(gy / 4) * self.char_w + gx / 2] = tag;
        }
    }

    /// Draw a line between fractional dot coordinates, clipped to the
    /// canvas before rasterizing so far off-screen segments stay cheap.
    pub fn line(&mut self, p0: (f64, f64), p1: (f64, f64), tag: f32) {
        let Some((a, b)) = clip_segment(p0, p1, self.grid_w as f64, self.grid_h as f64) else {
            return;
        };
        self.bresenham(
            a.0.round() as isize,
            a.1.round() as isize,
            b.0.round() as isize,
            b.1.round() as isize,
            tag,
        );
    }

    /// Draw a circle by sampling one dot per unit of arc length.
    pub fn circle(&mut self, center: (f64, f64), radius: f64, tag: f32) {
        if !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let steps = ((2.0 * std::f64::consts::PI * radius).ceil() as usize).clamp(16, 4096);
        for i in 0..steps {
            let angle = (i as f64 / steps as f64) * 2.0 * std::f64::consts::PI;
            let x = center.0 + radius * angle.cos();
            let y = center.1 + radius * angle.sin();
            self.set(x.round() as isize, y.round() as isize, tag);
        }
    }

    fn bresenham(&mut self, mut x0: isize, mut y0: isize, x1: isize, y1: isize, tag: f32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x0, y0, tag);

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Encode the dot grid to braille characters and write them to the
    /// frame buffer. `color_fn` maps a cell's tag to an RGB color.
    pub fn render(&self, frame: &mut Frame, area: Rect, color_fn: impl Fn(f32) -> (u8, u8, u8)) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                let mut braille: u8 = 0;

                for (dx, col) in DOT_MAP.iter().enumerate() {
                    for (dy, &bit) in col.iter().enumerate() {
                        let gx = cx * 2 + dx;
                        let gy = cy * 4 + dy;
                        if self.dots[gy * self.grid_w + gx] {
                            braille |= bit;
                        }
                    }
                }

                if braille != 0 {
                    let (r, g, b) = color_fn(self.tags[cy * self.char_w + cx]);
                    let ch = char::from_u32(0x2800 + braille as u32).unwrap_or(' ');
                    let cell = frame
                        .buffer_mut()
                        .cell_mut((area.x + cx as u16, area.y + cy as u16));
                    if let Some(cell) = cell {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(r, g, b));
                    }
                }
            }
        }
    }
}

/// Liang-Barsky clip of a segment against the dot grid rectangle (with a
/// one-dot apron). `None` when the segment lies entirely outside.
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    grid_w: f64,
    grid_h: f64,
) -> Option<((f64, f64), (f64, f64))> {
    if !p0.0.is_finite() || !p0.1.is_finite() || !p1.0.is_finite() || !p1.1.is_finite() {
        return None;
    }

    let (x_min, x_max) = (-1.0, grid_w);
    let (y_min, y_max) = (-1.0, grid_h);
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);

    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;
    let checks = [
        (-dx, p0.0 - x_min),
        (dx, x_max - p0.0),
        (-dy, p0.1 - y_min),
        (dy, y_max - p0.1),
    ];
    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let t = q / p;
            if p < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

/// Write a small text label into the frame buffer at a character cell,
/// clipped to `area`.
pub fn put_text(frame: &mut Frame, area: Rect, cx: i32, cy: i32, text: &str, color: Color) {
    if cy < 0 || cy >= i32::from(area.height) {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let x = cx + i as i32;
        if x < 0 || x >= i32::from(area.width) {
            continue;
        }
        let cell = frame
            .buffer_mut()
            .cell_mut((area.x + x as u16, area.y + cy as u16));
        if let Some(cell) = cell {
            cell.set_char(ch);
            cell.set_fg(color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Point;
    use crate::view::Camera;

    #[test]
    fn projection_centers_the_offset_point() {
        let cam = Camera {
            auto_scale: 2.0,
            manual_zoom: 1.0,
            offset: Point::new(10.0, 5.0),
        };
        let proj = Projection::new(&cam, 100, 80);
        assert_eq!(proj.to_dot(Point::new(10.0, 5.0)), (50.0, 40.0));
        // +y in world space is up, which is a smaller dot row
        let (_, dy) = proj.to_dot(Point::new(10.0, 6.0));
        assert_eq!(dy, 38.0);
    }

    #[test]
    fn clip_rejects_far_segments() {
        assert!(clip_segment((-50.0, -50.0), (-10.0, -40.0), 100.0, 100.0).is_none());
        assert!(clip_segment((1e9, 1e9), (2e9, 2e9), 100.0, 100.0).is_none());
        assert!(clip_segment((f64::NAN, 0.0), (1.0, 1.0), 100.0, 100.0).is_none());
    }

    #[test]
    fn clip_keeps_interior_segments_intact() {
        let seg = clip_segment((2.0, 3.0), (40.0, 60.0), 100.0, 100.0).unwrap();
        assert_eq!(seg, ((2.0, 3.0), (40.0, 60.0)));
    }

    #[test]
    fn clip_shortens_crossing_segments() {
        let ((ax, _), (bx, _)) = clip_segment((-500.0, 50.0), (500.0, 50.0), 100.0, 100.0).unwrap();
        assert!(ax >= -1.0 && bx <= 100.0);
    }

    #[test]
    fn line_sets_dots_along_the_path() {
        let mut canvas = DotCanvas::new(10, 10);
        canvas.line((0.0, 0.0), (19.0, 39.0), 0.5);
        // Both endpoints rasterized
        assert!(canvas.dots[0]);
        assert!(canvas.dots[39 * canvas.grid_w + 19]);
    }
}

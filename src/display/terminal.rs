use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tracing::info;

use crate::animation::{AnimationDriver, AnimationParams};
use crate::color::ColorScheme;
use crate::config::{Config, CoordinateSystem};
use crate::curve::{self, CurveParams, Point};
use crate::render::{put_text, DotCanvas, Projection};
use crate::ticks;
use crate::view::{Bounds, Camera};

const GRID_COLOR: (u8, u8, u8) = (110, 110, 110);
const PAN_STEP_DOTS: f64 = 8.0;

pub async fn run(config: Config) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: Config) -> Result<()> {
    let mut app = App::new(config.clone());
    let target_fps = Duration::from_secs_f64(1.0 / config.view.target_fps.max(1) as f64);

    loop {
        app.advance_animation();

        terminal.draw(|frame| app.render(frame))?;

        // Handle input
        if event::poll(target_fps)? {
            if let Event::Key(key) = event::read()? {
                match key {
                    KeyEvent {
                        code: KeyCode::Char('q'),
                        ..
                    }
                    | KeyEvent {
                        code: KeyCode::Char('c'),
                        modifiers: KeyModifiers::CONTROL,
                        ..
                    } => {
                        break;
                    }
                    KeyEvent { code, .. } => app.handle_key(code),
                }
            }
        }
    }

    Ok(())
}

/// All UI state: curve/animation parameters, the displayed point sequence,
/// the camera and the animation driver.
struct App {
    curve: CurveParams,
    animation: AnimationParams,
    points: Vec<Point>,
    curve_visible: bool,
    coordinates: CoordinateSystem,
    color_scheme: ColorScheme,
    camera: Camera,
    driver: AnimationDriver,
    epoch: Instant,
    was_completed: bool,
    needs_refit: bool,
    grid_size: (usize, usize),
}

impl App {
    fn new(config: Config) -> Self {
        let curve = config.curve.params();
        let camera = Camera {
            manual_zoom: config
                .view
                .zoom
                .clamp(crate::view::MIN_MANUAL_ZOOM, crate::view::MAX_MANUAL_ZOOM),
            ..Camera::default()
        };

        let mut app = Self {
            curve,
            animation: config.animation.params(),
            points: Vec::new(),
            curve_visible: config.view.show_curve,
            coordinates: config.view.coordinates,
            color_scheme: config.view.color_scheme,
            camera,
            driver: AnimationDriver::new(),
            epoch: Instant::now(),
            was_completed: false,
            needs_refit: true,
            grid_size: (0, 0),
        };
        app.rebuild();
        app
    }

    /// The one sequence that feeds bounds, fit-scale and the animation
    /// driver. Empty while the curve is hidden.
    fn display_points(&self) -> &[Point] {
        if self.curve_visible {
            &self.points
        } else {
            &[]
        }
    }

    /// Resample the curve and hand fresh snapshots to the driver. Any
    /// in-flight animation is discarded.
    fn rebuild(&mut self) {
        self.points = self.curve.sample();
        let display = self.display_points().to_vec();
        self.driver.configure(display, self.animation);
        self.was_completed = false;
        self.needs_refit = true;
    }

    fn reconfigure_animation(&mut self) {
        let display = self.display_points().to_vec();
        self.driver.configure(display, self.animation);
        self.was_completed = false;
    }

    fn advance_animation(&mut self) {
        let now_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        self.driver.tick(now_ms);

        if self.driver.is_completed() && !self.was_completed {
            self.was_completed = true;
            info!("animation completed after {} loop(s)", self.driver.loops());
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            // Animation commands
            KeyCode::Char(' ') => {
                if self.driver.is_running() {
                    self.driver.stop();
                } else {
                    self.driver.start();
                }
            }
            KeyCode::Char('r') => {
                self.driver.reset();
                self.was_completed = false;
            }

            // View commands
            KeyCode::Char('g') => {
                self.curve_visible = !self.curve_visible;
                self.reconfigure_animation();
                self.needs_refit = true;
            }
            KeyCode::Char('p') => {
                self.coordinates = self.coordinates.toggled();
                self.needs_refit = true;
            }
            KeyCode::Char('c') => {
                self.color_scheme = self.color_scheme.next();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.camera.zoom_in(),
            KeyCode::Char('-') => self.camera.zoom_out(),
            KeyCode::Left => self.camera.pan(-PAN_STEP_DOTS, 0.0),
            KeyCode::Right => self.camera.pan(PAN_STEP_DOTS, 0.0),
            KeyCode::Up => self.camera.pan(0.0, PAN_STEP_DOTS),
            KeyCode::Down => self.camera.pan(0.0, -PAN_STEP_DOTS),
            KeyCode::Char('f') => self.needs_refit = true,

            // Curve parameters
            KeyCode::Char('a') => self.edit_curve(|c| c.a = (c.a - 1.0).max(0.0)),
            KeyCode::Char('A') => self.edit_curve(|c| c.a += 1.0),
            KeyCode::Char('k') => self.edit_curve(|c| c.k = (c.k - 0.1).max(0.0)),
            KeyCode::Char('K') => self.edit_curve(|c| c.k += 0.1),
            KeyCode::Char('n') => self.edit_curve(|c| c.steps = c.steps.saturating_sub(50).max(1)),
            KeyCode::Char('N') => self.edit_curve(|c| c.steps = (c.steps + 50).min(100_000)),
            KeyCode::Char('t') => self.edit_curve(|c| c.turns = c.turns.saturating_sub(1).max(1)),
            KeyCode::Char('T') => self.edit_curve(|c| c.turns = (c.turns + 1).min(20)),

            // Animation parameters
            KeyCode::Char('s') => self.edit_animation(|a| a.speed = (a.speed - 0.25).max(0.25)),
            KeyCode::Char('S') => self.edit_animation(|a| a.speed = (a.speed + 0.25).min(8.0)),
            KeyCode::Char('l') => self.edit_animation(|a| a.loops = a.loops.saturating_sub(1).max(1)),
            KeyCode::Char('L') => self.edit_animation(|a| a.loops = (a.loops + 1).min(99)),

            _ => {}
        }
    }

    fn edit_curve(&mut self, f: impl FnOnce(&mut CurveParams)) {
        f(&mut self.curve);
        self.rebuild();
    }

    fn edit_animation(&mut self, f: impl FnOnce(&mut AnimationParams)) {
        f(&mut self.animation);
        self.reconfigure_animation();
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.height < 3 || area.width < 10 {
            return;
        }

        let plot = Rect::new(area.x, area.y + 1, area.width, area.height - 2);
        let (char_w, char_h) = (plot.width as usize, plot.height as usize);
        let (grid_w, grid_h) = (char_w * 2, char_h * 4);

        if self.needs_refit || self.grid_size != (grid_w, grid_h) {
            let bounds = Bounds::of(self.display_points());
            self.camera.refit(
                bounds.as_ref(),
                grid_w as f64,
                grid_h as f64,
                self.coordinates == CoordinateSystem::Polar,
            );
            self.grid_size = (grid_w, grid_h);
            self.needs_refit = false;
        }

        let proj = Projection::new(&self.camera, grid_w, grid_h);

        match self.coordinates {
            CoordinateSystem::Cartesian => self.draw_cartesian_grid(frame, plot, &proj),
            CoordinateSystem::Polar => self.draw_polar_grid(frame, plot, &proj),
        }
        self.draw_curve(frame, plot, &proj);
        self.draw_marker(frame, plot, &proj);

        self.draw_status(frame, area);
        self.draw_info(frame, area);
    }

    fn draw_curve(&self, frame: &mut Frame, plot: Rect, proj: &Projection) {
        let points = self.display_points();
        if points.len() < 2 {
            return;
        }

        let mut canvas = DotCanvas::new(plot.width as usize, plot.height as usize);
        let denom = (points.len() - 1) as f32;
        for (i, pair) in points.windows(2).enumerate() {
            let tag = i as f32 / denom;
            canvas.line(proj.to_dot(pair[0]), proj.to_dot(pair[1]), tag);
        }
        let scheme = self.color_scheme;
        canvas.render(frame, plot, |tag| scheme.curve_color(tag));
    }

    fn draw_marker(&self, frame: &mut Frame, plot: Rect, proj: &Projection) {
        let Some(point) = self.driver.current_point() else {
            return;
        };
        let (dx, dy) = proj.to_dot(point);
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        let (cx, cy) = ((dx / 2.0).floor() as i64, (dy / 4.0).floor() as i64);
        if cx < 0 || cy < 0 || cx >= i64::from(plot.width) || cy >= i64::from(plot.height) {
            return;
        }
        let (r, g, b) = self.color_scheme.marker_color();
        let cell = frame
            .buffer_mut()
            .cell_mut((plot.x + cx as u16, plot.y + cy as u16));
        if let Some(cell) = cell {
            cell.set_char('●');
            cell.set_fg(Color::Rgb(r, g, b));
        }
    }

    fn draw_cartesian_grid(&self, frame: &mut Frame, plot: Rect, proj: &Projection) {
        let (grid_w, grid_h) = self.grid_size;
        let mut canvas = DotCanvas::new(plot.width as usize, plot.height as usize);

        let (min_x, max_x, min_y, max_y) =
            self.camera.visible_range(grid_w as f64, grid_h as f64);

        // Axes through the world origin
        canvas.line(
            proj.to_dot(Point::new(min_x, 0.0)),
            proj.to_dot(Point::new(max_x, 0.0)),
            0.0,
        );
        canvas.line(
            proj.to_dot(Point::new(0.0, min_y)),
            proj.to_dot(Point::new(0.0, max_y)),
            0.0,
        );

        // Tick dashes
        let x_ticks = ticks::axis_ticks(min_x, max_x, 10);
        for &v in &x_ticks {
            let (dx, dy) = proj.to_dot(Point::new(v, 0.0));
            canvas.line((dx, dy - 2.0), (dx, dy + 2.0), 0.0);
        }
        let y_ticks = ticks::axis_ticks(min_y, max_y, 8);
        for &v in &y_ticks {
            let (dx, dy) = proj.to_dot(Point::new(0.0, v));
            canvas.line((dx - 2.0, dy), (dx + 2.0, dy), 0.0);
        }

        canvas.render(frame, plot, |_| GRID_COLOR);

        // Labels: below the x axis, left of the y axis
        for &v in &x_ticks {
            let (dx, dy) = proj.to_dot(Point::new(v, 0.0));
            let label = format!("{}", v.round() as i64);
            let cx = (dx / 2.0).round() as i32 - label.len() as i32 / 2;
            let cy = (dy / 4.0).round() as i32 + 1;
            put_text(frame, plot, cx, cy, &label, Color::DarkGray);
        }
        for &v in &y_ticks {
            let (dx, dy) = proj.to_dot(Point::new(0.0, v));
            let label = format!("{}", v.round() as i64);
            let cx = (dx / 2.0).round() as i32 - label.len() as i32 - 1;
            let cy = (dy / 4.0).round() as i32;
            put_text(frame, plot, cx, cy, &label, Color::DarkGray);
        }

        // Axis names near the visible edges
        let (ox, _) = proj.to_dot(Point::new(0.0, 0.0));
        put_text(
            frame,
            plot,
            plot.width as i32 - 2,
            ((proj.to_dot(Point::new(max_x, 0.0)).1 / 4.0).round() as i32 - 1).max(0),
            "X",
            Color::Gray,
        );
        put_text(frame, plot, (ox / 2.0).round() as i32 + 2, 0, "Y", Color::Gray);
    }

    fn draw_polar_grid(&self, frame: &mut Frame, plot: Rect, proj: &Projection) {
        let (grid_w, grid_h) = self.grid_size;
        let mut canvas = DotCanvas::new(plot.width as usize, plot.height as usize);

        // Ring extent: the largest sampled radius, or a viewport-derived
        // fallback when there is no curve to measure.
        let max_r = match curve::max_radius(self.display_points()) {
            r if r > 0.0 => r,
            _ => {
                let (_, _, min_y, max_y) = self.camera.visible_range(grid_w as f64, grid_h as f64);
                (max_y - min_y) * 0.4
            }
        };

        let origin = proj.to_dot(Point::default());
        for radius in ticks::ring_radii(max_r) {
            canvas.circle(origin, proj.to_dot_len(radius), 0.0);
        }

        let angle_ticks = ticks::angle_ticks();
        for tick in &angle_ticks {
            let end = Point::new(max_r * tick.radians.cos(), max_r * tick.radians.sin());
            canvas.line(origin, proj.to_dot(end), 0.0);
        }

        canvas.render(frame, plot, |_| GRID_COLOR);

        // Degree labels just outside the outer ring. Text rotation from the
        // tick is meaningless on a character grid, so only placement is used.
        let label_r_dots = proj.to_dot_len(max_r) + 6.0;
        for tick in &angle_ticks {
            let dx = origin.0 + label_r_dots * tick.radians.cos();
            let dy = origin.1 - label_r_dots * tick.radians.sin();
            let label = format!("{}°", tick.degrees);
            let cx = (dx / 2.0).round() as i32 - label.chars().count() as i32 / 2;
            let cy = (dy / 4.0).round() as i32;
            put_text(frame, plot, cx, cy, &label, Color::DarkGray);
        }
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let status = format!(
            " [space] {} anim | [r]eset | [g]raph {} | [p] {} | [c]olor: {} | [f]it | [q]uit ",
            if self.driver.is_running() { "stop" } else { "start" },
            if self.curve_visible { "on" } else { "off" },
            self.coordinates,
            self.color_scheme.name(),
        );

        put_text(
            frame,
            Rect::new(area.x, area.y, area.width, 1),
            0,
            0,
            &status,
            Color::DarkGray,
        );
    }

    fn draw_info(&self, frame: &mut Frame, area: Rect) {
        let info = if self.curve_visible {
            let state = if self.driver.is_running() {
                "running".to_string()
            } else if self.driver.is_completed() {
                format!("completed ({} loop(s))", self.driver.loops())
            } else {
                "idle".to_string()
            };
            format!(
                " r = a·(k + cos t)  a={:.1} k={:.2} steps={} turns={} | speed={:.2} loops={} | zoom {:.2}x | {} ",
                self.curve.a,
                self.curve.k,
                self.curve.steps,
                self.curve.turns,
                self.animation.speed,
                self.animation.loops,
                self.camera.manual_zoom,
                state,
            )
        } else {
            " curve hidden - press 'g' to draw it ".to_string()
        };

        put_text(
            frame,
            Rect::new(area.x, area.y + area.height - 1, area.width, 1),
            0,
            0,
            &info,
            Color::DarkGray,
        );
    }
}

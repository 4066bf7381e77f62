use crate::curve::Point;

/// Wall-clock milliseconds for one full traversal of the sampled curve at
/// speed 1.0.
pub const BASE_CYCLE_MS: f64 = 8000.0;

/// User-facing animation configuration. `speed` is a time-dilation
/// multiplier (> 0 is a caller contract), `loops` the number of full
/// traversals before completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    pub speed: f64,
    pub loops: u32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self { speed: 1.0, loops: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Completed,
}

/// Clock-driven marker animation over a sampled point sequence.
///
/// The driver owns a snapshot of the points and parameters taken at
/// [`AnimationDriver::configure`] time, so a running animation can never
/// observe configuration edits; any change goes through `configure`, which
/// discards the in-flight run.
///
/// Time is injected as a monotonic millisecond timestamp, which keeps the
/// state machine deterministic under test. The start time is a sentinel
/// resolved on the first tick after `start`, not at call time, so command
/// latency does not shift the animation origin.
#[derive(Debug)]
pub struct AnimationDriver {
    points: Vec<Point>,
    params: AnimationParams,
    state: AnimationState,
    started_at: Option<f64>,
    current: Option<Point>,
}

impl AnimationDriver {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            params: AnimationParams::default(),
            state: AnimationState::Idle,
            started_at: None,
            current: None,
        }
    }

    /// Replace the point sequence and parameters, discarding any in-flight
    /// run. The marker returns to the first sample point.
    pub fn configure(&mut self, points: Vec<Point>, params: AnimationParams) {
        self.points = points;
        self.params = params;
        self.state = AnimationState::Idle;
        self.started_at = None;
        self.current = self.points.first().copied();
    }

    /// Begin animating. A no-op unless the sequence has at least two points;
    /// starting from `Completed` clears the completion flag.
    pub fn start(&mut self) {
        if self.state == AnimationState::Running || self.points.len() < 2 {
            return;
        }
        self.state = AnimationState::Running;
        self.started_at = None;
    }

    /// Stop without touching the marker. Idempotent.
    pub fn stop(&mut self) {
        if self.state == AnimationState::Running {
            self.state = AnimationState::Idle;
            self.started_at = None;
        }
    }

    /// Stop if running, clear completion and re-emit the first sample point
    /// (when the sequence is non-empty). Safe to call repeatedly.
    pub fn reset(&mut self) {
        self.state = AnimationState::Idle;
        self.started_at = None;
        self.current = self.points.first().copied();
    }

    /// Advance the animation to `now_ms` and return the point to display,
    /// or `None` when the driver is not running.
    ///
    /// The tick that reaches the total duration emits its (wrapped) point
    /// once and transitions to `Completed`; later ticks emit nothing.
    pub fn tick(&mut self, now_ms: f64) -> Option<Point> {
        if self.state != AnimationState::Running {
            return None;
        }

        let started = *self.started_at.get_or_insert(now_ms);
        let elapsed = now_ms - started;

        let cycle = BASE_CYCLE_MS / self.params.speed;
        let total = cycle * f64::from(self.params.loops);

        let progress = (elapsed % cycle) / cycle;
        let index = ((progress * self.points.len() as f64) as usize).min(self.points.len() - 1);
        let point = self.points[index];
        self.current = Some(point);

        if elapsed >= total {
            self.state = AnimationState::Completed;
            self.started_at = None;
        }
        Some(point)
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn is_completed(&self) -> bool {
        self.state == AnimationState::Completed
    }

    /// Marker position as of the last tick/reset.
    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    pub fn loops(&self) -> u32 {
        self.params.loops
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new()
    }
}

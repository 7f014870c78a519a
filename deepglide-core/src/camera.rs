use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CoreError;

/// A view transform: where the camera looks and how wide.
///
/// `span` is the fractal-space extent mapped to the viewport *height*, so
/// the per-pixel scale is `span / viewport_height` regardless of aspect
/// ratio. Plain serializable fields — external collaborators persist
/// saved locations from this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub center_x: f64,
    pub center_y: f64,
    pub span: f64,
}

impl View {
    /// The home view: the full Mandelbrot set, framed with some margin.
    pub const HOME: Self = Self {
        center_x: -0.5,
        center_y: 0.0,
        span: 3.0,
    };
}

impl Default for View {
    fn default() -> Self {
        Self::HOME
    }
}

/// Tunable coefficients of the camera control loop.
///
/// All values are documented configuration, not scattered magic numbers:
/// the smoothing and friction laws are only stable for coefficients in
/// `(0, 1)`, so construction validates them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Fraction of the current→target gap closed per reference frame.
    pub smoothing: f64,
    /// Per-frame velocity multiplier while coasting.
    pub friction: f64,
    /// Manhattan speed (px/frame) below which momentum snaps to zero.
    pub stop_speed: f64,
    /// Multiplicative span factor per scroll-in step.
    pub zoom_in_factor: f64,
    /// Multiplicative span factor per scroll-out step.
    pub zoom_out_factor: f64,
    /// Span beyond which zoom-out meets resistance.
    pub max_span: f64,
    /// Resistance steepness: the span asymptote is `max_span + 1/resistance`.
    pub span_resistance: f64,
}

impl CameraConfig {
    pub const DEFAULT_SMOOTHING: f64 = 0.08;
    pub const DEFAULT_FRICTION: f64 = 0.92;
    pub const DEFAULT_STOP_SPEED: f64 = 0.1;
    pub const DEFAULT_ZOOM_IN: f64 = 0.92;
    pub const DEFAULT_ZOOM_OUT: f64 = 1.08;
    pub const DEFAULT_MAX_SPAN: f64 = 4.0;
    pub const DEFAULT_SPAN_RESISTANCE: f64 = 1.0;

    /// Validate the stability-critical coefficients.
    ///
    /// A smoothing factor ≥ 1 makes the convergence law overshoot or
    /// oscillate; friction ≥ 1 makes released pans accelerate forever.
    /// Both are configuration defects rejected here rather than left to
    /// destabilize the control loop at runtime.
    pub fn validated(self) -> crate::Result<Self> {
        if !(self.smoothing > 0.0 && self.smoothing < 1.0) {
            return Err(CoreError::InvalidSmoothing(self.smoothing));
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(CoreError::InvalidFriction(self.friction));
        }
        Ok(self)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            smoothing: Self::DEFAULT_SMOOTHING,
            friction: Self::DEFAULT_FRICTION,
            stop_speed: Self::DEFAULT_STOP_SPEED,
            zoom_in_factor: Self::DEFAULT_ZOOM_IN,
            zoom_out_factor: Self::DEFAULT_ZOOM_OUT,
            max_span: Self::DEFAULT_MAX_SPAN,
            span_resistance: Self::DEFAULT_SPAN_RESISTANCE,
        }
    }
}

/// The reference frame duration the smoothing constants are tuned for.
const REFERENCE_DT: f64 = 0.016;

/// Camera state: the smoothed view the renderer samples each frame.
///
/// `target` always reflects the latest committed user intent; `current`
/// lags behind and converges toward it exponentially, never overshooting.
/// Momentum (`velocity`, in pixels per reference frame) carries released
/// pans. Mutated only from the single interaction/physics timeline; the
/// evaluation pass reads an immutable [`View`] snapshot.
#[derive(Debug, Clone)]
pub struct CameraState {
    pub current: View,
    pub target: View,
    /// Coasting velocity in viewport pixels per reference frame.
    pub velocity: (f64, f64),
    /// While true, momentum is suppressed (the pointer drives the pan).
    pub dragging: bool,
    config: CameraConfig,
}

impl CameraState {
    pub fn new(config: CameraConfig) -> crate::Result<Self> {
        let config = config.validated()?;
        debug!(
            smoothing = config.smoothing,
            friction = config.friction,
            max_span = config.max_span,
            "camera configured"
        );
        Ok(Self {
            current: View::HOME,
            target: View::HOME,
            velocity: (0.0, 0.0),
            dragging: false,
            config,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// An immutable copy of the current view for the evaluation pass.
    pub fn snapshot(&self) -> View {
        self.current
    }

    /// Advance the control loop by `dt` seconds.
    ///
    /// Step 1 converges `current` toward `target` with an exponential law
    /// applied independently to center-x, center-y, and span (linear-space
    /// span interpolation). The per-frame factor is renormalized by
    /// `dt / 16 ms` so variable timesteps keep the same time constant and
    /// the step never overshoots for any positive `dt`.
    ///
    /// Step 2 applies momentum: while not dragging and the coasting speed
    /// is above the stop threshold, both `current` and `target` centers
    /// translate by the velocity (so smoothing does not fight the coast),
    /// then friction decays the velocity, snapping it to exactly zero at
    /// the threshold to avoid endless sub-pixel drift.
    pub fn advance(&mut self, dt: f64, viewport_height: u32) {
        if !(dt > 0.0) {
            return;
        }
        let steps = dt / REFERENCE_DT;

        let k = 1.0 - (1.0 - self.config.smoothing).powf(steps);
        self.current.span += (self.target.span - self.current.span) * k;
        self.current.center_x += (self.target.center_x - self.current.center_x) * k;
        self.current.center_y += (self.target.center_y - self.current.center_y) * k;

        if self.dragging || viewport_height == 0 {
            return;
        }

        let (vx, vy) = self.velocity;
        if vx.abs() + vy.abs() <= self.config.stop_speed {
            return;
        }

        let pixel_to_fractal = self.current.span / viewport_height as f64;
        let dx = vx * steps * pixel_to_fractal;
        let dy = vy * steps * pixel_to_fractal;

        self.current.center_x -= dx;
        self.current.center_y += dy;
        self.target.center_x -= dx;
        self.target.center_y += dy;

        let decay = self.config.friction.powf(steps);
        self.velocity = (vx * decay, vy * decay);

        if self.velocity.0.abs() + self.velocity.1.abs() < self.config.stop_speed {
            self.velocity = (0.0, 0.0);
        }
    }

    /// Apply zoom-out resistance to a prospective target span.
    ///
    /// Spans past `max_span` are compressed onto
    /// `max_span + excess / (1 + excess·resistance)`, which approaches but
    /// never reaches `max_span + 1/resistance` — the view visibly "gives"
    /// instead of hitting a wall.
    pub fn soft_limit_span(&self, raw: f64) -> f64 {
        let limit = self.config.max_span;
        if raw <= limit {
            return raw;
        }
        let excess = raw - limit;
        limit + excess / (1.0 + excess * self.config.span_resistance)
    }
}

impl Default for CameraState {
    fn default() -> Self {
        // The default coefficients are compile-time constants inside the
        // valid range, so this cannot fail validation.
        Self {
            current: View::HOME,
            target: View::HOME,
            velocity: (0.0, 0.0),
            dragging: false,
            config: CameraConfig::default(),
        }
    }
}

use crate::camera::{CameraState, View};

/// Translates pointer and scroll gestures into camera target updates.
///
/// Positions are viewport pixels with a **top-left** origin, matching the
/// windowing layer's convention; the y-inversion into fractal space
/// happens here. All methods mutate the camera on the single
/// interaction/physics timeline — events are expected to be funneled
/// through one queue and applied before the frame's smoothing step.
#[derive(Debug, Clone)]
pub struct InteractionController {
    viewport_width: f64,
    viewport_height: f64,
    last_pos: (f64, f64),
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            viewport_width: 0.0,
            viewport_height: 0.0,
            last_pos: (0.0, 0.0),
        }
    }

    /// Record the viewport size gestures are measured against.
    /// Called whenever the panel resizes.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_width = width as f64;
        self.viewport_height = height as f64;
    }

    fn has_viewport(&self) -> bool {
        self.viewport_width > 0.0 && self.viewport_height > 0.0
    }

    /// Begin a drag: anchor the pointer, kill any coasting, and sync the
    /// target center to the current one so the smoothing step doesn't
    /// tug the view back toward a stale target mid-drag.
    pub fn pointer_down(&mut self, camera: &mut CameraState, pos: (f64, f64)) {
        camera.dragging = true;
        camera.velocity = (0.0, 0.0);
        camera.target.center_x = camera.current.center_x;
        camera.target.center_y = camera.current.center_y;
        self.last_pos = pos;
    }

    /// Drag-to-pan. The pixel delta converts to fractal units via
    /// `span / viewport_height` and lands on `current` directly for
    /// zero-latency response, with the same delta mirrored into `target`
    /// so smoothing has nothing to fight. The raw delta becomes the
    /// velocity estimate for post-release momentum.
    pub fn pointer_move(&mut self, camera: &mut CameraState, pos: (f64, f64)) {
        if !camera.dragging || !self.has_viewport() {
            return;
        }
        let dx = pos.0 - self.last_pos.0;
        let dy = pos.1 - self.last_pos.1;
        let pixel_to_fractal = camera.current.span / self.viewport_height;

        camera.current.center_x -= dx * pixel_to_fractal;
        camera.current.center_y += dy * pixel_to_fractal;
        camera.target.center_x = camera.current.center_x;
        camera.target.center_y = camera.current.center_y;

        camera.velocity = (dx, dy);
        self.last_pos = pos;
    }

    /// End the drag; whatever velocity the last move recorded now coasts
    /// under friction.
    pub fn pointer_up(&mut self, camera: &mut CameraState) {
        camera.dragging = false;
    }

    /// Scroll-to-zoom, focal-point preserving.
    ///
    /// The fractal coordinate under the pointer is computed from the
    /// **target** state, not `current`, so a burst of scroll events
    /// composes correctly before smoothing catches up. After scaling the
    /// target span, the target center is recomputed so that same fractal
    /// point stays under the pointer.
    ///
    /// Zooming out past the span limit runs through the soft resistance
    /// curve instead, and re-centers the target on the home view; there
    /// is nothing to explore out there.
    pub fn scroll(&mut self, camera: &mut CameraState, delta: f64, pos: (f64, f64)) {
        if !self.has_viewport() || delta == 0.0 {
            return;
        }
        let factor = if delta > 0.0 {
            camera.config().zoom_in_factor
        } else {
            camera.config().zoom_out_factor
        };

        let rel_x = pos.0 - self.viewport_width / 2.0;
        let rel_y = pos.1 - self.viewport_height / 2.0;
        let pixel_to_fractal = camera.target.span / self.viewport_height;

        let pointer_x = camera.target.center_x + rel_x * pixel_to_fractal;
        let pointer_y = camera.target.center_y - rel_y * pixel_to_fractal;

        let raw_span = camera.target.span * factor;
        if raw_span > camera.config().max_span {
            camera.target.span = camera.soft_limit_span(raw_span);
            camera.target.center_x = View::HOME.center_x;
            camera.target.center_y = View::HOME.center_y;
            return;
        }

        camera.target.span = raw_span;
        let new_pixel_to_fractal = camera.target.span / self.viewport_height;
        camera.target.center_x = pointer_x - rel_x * new_pixel_to_fractal;
        camera.target.center_y = pointer_y + rel_y * new_pixel_to_fractal;
    }

    /// Glide back to the home view.
    pub fn home(&mut self, camera: &mut CameraState) {
        camera.target = View::HOME;
        camera.velocity = (0.0, 0.0);
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

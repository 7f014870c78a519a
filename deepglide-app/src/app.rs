use std::time::Instant;

use eframe::egui;
use tracing::{info, warn};

use deepglide_core::{
    CameraState, Complex, FractalKind, FractalParams, InteractionController, Julia, Precision,
    View,
};
use deepglide_render::{builtin_palettes, render_frame, FrameRequest, Palette, RenderError};

/// Preview pass renders at 1/PREVIEW_DOWNSCALE of the panel resolution
/// while the camera is in motion; the settled frame refines to full.
const PREVIEW_DOWNSCALE: u32 = 4;

/// Current→target gap (relative to the span) below which the camera
/// counts as settled and the full-resolution frame is worth computing.
const SETTLE_EPSILON: f64 = 1e-6;

/// Everything a rendered texture depends on. A frame is only recomputed
/// when this key changes.
#[derive(PartialEq)]
struct FrameKey {
    view: View,
    kind: FractalKind,
    julia_c: Complex,
    palette_index: usize,
    width: u32,
    height: u32,
}

pub(crate) struct DeepGlideApp {
    pub(crate) camera: CameraState,
    pub(crate) controller: InteractionController,
    pub(crate) kind: FractalKind,
    pub(crate) julia_c: Complex,
    pub(crate) base_params: FractalParams,
    pub(crate) palettes: Vec<Palette>,
    pub(crate) palette_index: usize,
    pub(crate) show_hud: bool,
    pub(crate) panel_size: [u32; 2],

    pub(crate) last_precision: Precision,
    pub(crate) last_iterations: u32,
    pub(crate) last_frame_ms: f64,

    texture: Option<egui::TextureHandle>,
    last_tick: Option<Instant>,
    last_rendered: Option<FrameKey>,
}

impl DeepGlideApp {
    pub(crate) fn new() -> Self {
        Self {
            camera: CameraState::default(),
            controller: InteractionController::new(),
            kind: FractalKind::Mandelbrot,
            julia_c: Julia::default_c(),
            base_params: FractalParams::default(),
            palettes: builtin_palettes(),
            palette_index: 0,
            show_hud: true,
            panel_size: [0, 0],
            last_precision: Precision::Native,
            last_iterations: FractalParams::DEFAULT_MAX_ITERATIONS,
            last_frame_ms: 0.0,
            texture: None,
            last_tick: None,
            last_rendered: None,
        }
    }

    pub(crate) fn current_palette(&self) -> &Palette {
        &self.palettes[self.palette_index]
    }

    pub(crate) fn set_kind(&mut self, kind: FractalKind) {
        if self.kind != kind {
            info!(kind = kind.label(), "switching fractal");
            self.kind = kind;
        }
    }

    pub(crate) fn check_resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 && (width != self.panel_size[0] || height != self.panel_size[1])
        {
            self.panel_size = [width, height];
            self.controller.set_viewport(width, height);
        }
    }

    /// Whether the camera is still gliding (or being dragged), the cue
    /// to render cheap preview frames instead of full-resolution ones.
    fn in_motion(&self) -> bool {
        if self.camera.dragging || self.camera.velocity != (0.0, 0.0) {
            return true;
        }
        let c = &self.camera.current;
        let t = &self.camera.target;
        let gap = (t.center_x - c.center_x).abs()
            + (t.center_y - c.center_y).abs()
            + (t.span - c.span).abs();
        gap > SETTLE_EPSILON * c.span.max(f64::MIN_POSITIVE)
    }

    fn render_if_needed(&mut self, ctx: &egui::Context) {
        let [panel_w, panel_h] = self.panel_size;
        if panel_w == 0 || panel_h == 0 {
            return;
        }

        let downscale = if self.in_motion() {
            PREVIEW_DOWNSCALE
        } else {
            1
        };
        let width = (panel_w / downscale).max(1);
        let height = (panel_h / downscale).max(1);

        let snapshot = self.camera.snapshot();
        let key = FrameKey {
            view: snapshot,
            kind: self.kind,
            julia_c: self.julia_c,
            palette_index: self.palette_index,
            width,
            height,
        };
        if self.last_rendered.as_ref() == Some(&key) {
            return;
        }

        let request = FrameRequest {
            view: snapshot,
            width,
            height,
            kind: self.kind,
            julia_c: self.julia_c,
            base_params: self.base_params,
        };

        match render_frame(&request, self.current_palette()) {
            Ok(out) => {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [out.pixels.width as usize, out.pixels.height as usize],
                    &out.pixels.pixels,
                );
                self.texture =
                    Some(ctx.load_texture("fractal", image, egui::TextureOptions::LINEAR));
                self.last_precision = out.precision;
                self.last_iterations = out.effective_iterations;
                self.last_frame_ms = out.elapsed.as_secs_f64() * 1000.0;
                self.last_rendered = Some(key);
            }
            // No pixels to render; keep the previous texture.
            Err(RenderError::EmptyViewport { .. }) => {}
            Err(err) => warn!(%err, "frame render failed"),
        }
    }
}

impl eframe::App for DeepGlideApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt = self
            .last_tick
            .map(|t| (now - t).as_secs_f64())
            .unwrap_or(0.016)
            .clamp(0.0, 0.1);
        self.last_tick = Some(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_size();
                let width = available.x.max(1.0) as u32;
                let height = available.y.max(1.0) as u32;
                self.check_resize(width, height);

                let (response, painter) =
                    ui.allocate_painter(available, egui::Sense::click_and_drag());

                self.handle_canvas_input(ctx, &response);
                self.camera.advance(dt, self.panel_size[1]);
                self.render_if_needed(ctx);

                if let Some(ref tex) = self.texture {
                    let uv =
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(tex.id(), response.rect, uv, egui::Color32::WHITE);
                }
            });

        self.handle_keyboard(ctx);
        self.show_hud_overlay(ctx);

        // The camera animates every frame; keep repainting instead of
        // waiting for input.
        ctx.request_repaint();
    }
}

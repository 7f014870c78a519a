use eframe::egui;
use tracing::info;

use deepglide_core::FractalKind;

use crate::app::DeepGlideApp;

impl DeepGlideApp {
    /// Funnel canvas pointer and scroll events into the interaction
    /// controller. Positions convert to viewport-local pixels (top-left
    /// origin) before they reach the engine.
    pub(crate) fn handle_canvas_input(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let rect = response.rect;
        let to_local =
            |pos: egui::Pos2| ((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64);

        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller.pointer_down(&mut self.camera, to_local(pos));
            }
        }
        if response.dragged_by(egui::PointerButton::Primary) {
            if let Some(pos) = response.interact_pointer_pos() {
                self.controller.pointer_move(&mut self.camera, to_local(pos));
            }
        }
        if response.drag_stopped_by(egui::PointerButton::Primary) {
            self.controller.pointer_up(&mut self.camera);
        }

        let scroll_y = ctx.input(|i| i.raw_scroll_delta.y);
        if scroll_y.abs() > 0.0 && response.hovered() {
            if let Some(pos) = response.hover_pos() {
                self.controller
                    .scroll(&mut self.camera, scroll_y as f64, to_local(pos));
            }
        }
    }

    pub(crate) fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let mut copy_coords = false;

        ctx.input(|input| {
            if input.key_pressed(egui::Key::M) {
                self.set_kind(FractalKind::Mandelbrot);
            }
            if input.key_pressed(egui::Key::J) {
                self.set_kind(FractalKind::Julia);
            }
            if input.key_pressed(egui::Key::G) {
                self.set_kind(FractalKind::SierpinskiGasket);
            }

            if input.key_pressed(egui::Key::R) || input.key_pressed(egui::Key::Home) {
                self.controller.home(&mut self.camera);
            }
            if input.key_pressed(egui::Key::H) {
                self.show_hud = !self.show_hud;
            }

            let palette_keys = [
                egui::Key::Num1,
                egui::Key::Num2,
                egui::Key::Num3,
                egui::Key::Num4,
                egui::Key::Num5,
            ];
            for (idx, key) in palette_keys.iter().enumerate() {
                if input.key_pressed(*key) && idx < self.palettes.len() {
                    self.palette_index = idx;
                }
            }

            if input.key_pressed(egui::Key::P) {
                let v = self.camera.snapshot();
                info!(
                    center_x = v.center_x,
                    center_y = v.center_y,
                    span = v.span,
                    precision = self.last_precision.label(),
                    "current view"
                );
            }
            if input.key_pressed(egui::Key::C) {
                copy_coords = true;
            }
        });

        if copy_coords {
            ctx.copy_text(self.format_coordinates());
            info!("coordinates copied to clipboard");
        }
    }

    pub(crate) fn format_coordinates(&self) -> String {
        let v = self.camera.snapshot();
        format!(
            "X: {:.16e}\nY: {:.16e}\nSpan: {:.16e}",
            v.center_x, v.center_y, v.span
        )
    }
}

use eframe::egui;

use deepglide_core::FractalKind;

use crate::app::DeepGlideApp;

const HUD_MARGIN: f32 = 8.0;
const HUD_CORNER_RADIUS: f32 = 6.0;

impl DeepGlideApp {
    pub(crate) fn show_hud_overlay(&mut self, ctx: &egui::Context) {
        if !self.show_hud {
            return;
        }

        egui::Area::new(egui::Id::new("hud"))
            .anchor(egui::Align2::LEFT_TOP, [HUD_MARGIN, HUD_MARGIN])
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(egui::Color32::from_black_alpha(160))
                    .inner_margin(egui::Margin::same(8))
                    .corner_radius(HUD_CORNER_RADIUS)
                    .show(ui, |ui| {
                        ui.style_mut().visuals.override_text_color =
                            Some(egui::Color32::from_rgb(220, 220, 220));

                        let v = self.camera.snapshot();
                        ui.label(format!("Fractal: {}", self.kind.label()));
                        if self.kind == FractalKind::Julia {
                            ui.label(format!(
                                "Julia c: {:.6} {:+.6}i",
                                self.julia_c.re, self.julia_c.im
                            ));
                        }
                        ui.monospace(format!("Center: {:.16} {:+.16}i", v.center_x, v.center_y));
                        ui.monospace(format!("Span: {:.4e}", v.span));
                        ui.label(format!("Precision: {}", self.last_precision.label()));
                        ui.label(format!("Iterations: {}", self.last_iterations));
                        ui.label(format!("Frame: {:.1} ms", self.last_frame_ms));
                        ui.label(format!("Palette: {}", self.current_palette().name));

                        ui.separator();
                        ui.small("drag: pan · scroll: zoom · M/J/G: fractal");
                        ui.small("1-5: palette · R: home · C: copy coords · H: hide");
                    });
            });
    }
}

use std::time::Duration;

use tracing::trace;

use deepglide_core::{
    Complex, FractalKind, FractalParams, Julia, JuliaFf, Mandelbrot, MandelbrotFf, Precision,
    SierpinskiGasket, View, Viewport,
};

use crate::buffer::RenderBuffer;
use crate::error::RenderError;
use crate::palette::Palette;
use crate::renderer::render;

/// Everything one frame of evaluation needs: the camera snapshot, the
/// output grid, and the fractal selection.
#[derive(Debug, Clone, Copy)]
pub struct FrameRequest {
    /// Immutable camera snapshot taken after the interaction/physics step.
    pub view: View,
    pub width: u32,
    pub height: u32,
    pub kind: FractalKind,
    /// The Julia constant (ignored by the other kinds).
    pub julia_c: Complex,
    /// Base iteration budget before depth scaling.
    pub base_params: FractalParams,
}

/// A colored frame plus the stats the HUD displays.
pub struct FrameOutput {
    pub pixels: RenderBuffer,
    pub precision: Precision,
    pub effective_iterations: u32,
    pub elapsed: Duration,
}

/// Render one complete frame: guard the viewport, scale the iteration
/// budget for depth, pick the precision regime, evaluate, and colorize.
///
/// This is the glue the per-frame data flow runs through:
/// interaction → camera advance → **render_frame** → surface upload.
pub fn render_frame(req: &FrameRequest, palette: &Palette) -> Result<FrameOutput, RenderError> {
    if req.width == 0 || req.height == 0 {
        return Err(RenderError::EmptyViewport {
            width: req.width,
            height: req.height,
        });
    }
    let viewport = Viewport::from_view(req.view, req.width, req.height)?;

    let params = req.base_params.scaled_for_span(req.view.span, View::HOME.span);
    let precision = Precision::select(req.view.span, req.kind);
    trace!(
        span = req.view.span,
        ?precision,
        max_iter = params.max_iterations,
        "frame setup"
    );

    let result = match (req.kind, precision) {
        (FractalKind::Mandelbrot, Precision::Native) => render(&Mandelbrot::new(params), &viewport),
        (FractalKind::Mandelbrot, Precision::Extended) => {
            render(&MandelbrotFf::new(params, viewport.center_ff()), &viewport)
        }
        (FractalKind::Julia, Precision::Native) => {
            render(&Julia::new(req.julia_c, params), &viewport)
        }
        (FractalKind::Julia, Precision::Extended) => render(
            &JuliaFf::new(req.julia_c, params, viewport.center_ff()),
            &viewport,
        ),
        // The selector never returns Extended for the gasket.
        (FractalKind::SierpinskiGasket, _) => render(&SierpinskiGasket::new(params), &viewport),
    };

    Ok(FrameOutput {
        pixels: palette.colorize(&result.iterations),
        precision,
        effective_iterations: params.max_iterations,
        elapsed: result.elapsed,
    })
}

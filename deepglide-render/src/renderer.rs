use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::debug;

use deepglide_core::{Complex, Fractal, IterationResult, Viewport};

use crate::iteration_buffer::IterationBuffer;
use crate::tile::{build_tile_grid, Tile};

/// The result of a full-frame evaluation pass.
///
/// Contains raw iteration data (no coloring) — the caller applies a
/// palette to produce displayable pixels.
pub struct RenderResult {
    pub iterations: IterationBuffer,
    pub elapsed: Duration,
    pub tiles_rendered: usize,
}

/// Map a pixel to the coordinate the fractal expects: either an absolute
/// point or a delta from the fractal's internal center.
#[inline]
fn map_pixel<F: Fractal>(fractal: &F, viewport: &Viewport, px: u32, py: u32) -> Complex {
    if fractal.uses_delta_coordinates() {
        viewport.pixel_to_delta(px, py)
    } else {
        viewport.pixel_to_complex(px, py)
    }
}

/// Evaluate a single tile pixel by pixel.
fn render_tile<F: Fractal>(fractal: &F, viewport: &Viewport, tile: &Tile) -> Vec<IterationResult> {
    let mut data = Vec::with_capacity(tile.pixel_count());
    for py in 0..tile.height {
        for px in 0..tile.width {
            let c = map_pixel(fractal, viewport, tile.x + px, tile.y + py);
            data.push(fractal.iterate(c));
        }
    }
    data
}

/// Evaluate a full frame using the tiled, data-parallel pipeline.
///
/// Each pixel is an independent, side-effect-free evaluation; tiles are
/// the work grains rayon distributes across the pool. No shared mutable
/// state is touched during the pass and a pass always runs to completion;
/// the camera is only advanced between passes, never under one.
///
/// The renderer is generic over the fractal type for static dispatch.
/// Returns raw iteration data — apply a `Palette` to get pixels.
pub fn render<F: Fractal + Sync>(fractal: &F, viewport: &Viewport) -> RenderResult {
    let start = Instant::now();
    let max_iter = fractal.params().max_iterations;

    let tiles = build_tile_grid(viewport.width, viewport.height);
    debug!(
        tile_count = tiles.len(),
        width = viewport.width,
        height = viewport.height,
        max_iter,
        "starting tiled evaluation"
    );

    let tile_data: Vec<Vec<IterationResult>> = tiles
        .par_iter()
        .map(|tile| render_tile(fractal, viewport, tile))
        .collect();

    let mut iterations = IterationBuffer::new(viewport.width, viewport.height, max_iter);
    for (tile, data) in tiles.iter().zip(tile_data.iter()) {
        iterations.blit_tile(tile, data);
    }

    let elapsed = start.elapsed();
    debug!(
        elapsed_ms = elapsed.as_millis(),
        tiles_rendered = tiles.len(),
        "evaluation pass complete"
    );

    RenderResult {
        iterations,
        elapsed,
        tiles_rendered: tiles.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepglide_core::{FractalParams, Mandelbrot, MandelbrotFf, SierpinskiGasket};

    #[test]
    fn basic_render_produces_iteration_data() {
        let mandelbrot = Mandelbrot::default();
        let viewport = Viewport::new(-0.5, 0.0, 3.0, 128, 128).unwrap();

        let result = render(&mandelbrot, &viewport);

        assert_eq!(result.iterations.data.len(), 128 * 128);
        assert!(result.tiles_rendered > 0);

        let escaped = result
            .iterations
            .data
            .iter()
            .filter(|r| matches!(r, IterationResult::Escaped { .. }))
            .count();
        assert!(escaped > 0, "home view contains escaped points");
    }

    #[test]
    fn parallel_render_matches_sequential() {
        let mandelbrot = Mandelbrot::new(FractalParams::new(128).unwrap());
        let viewport = Viewport::new(-0.5, 0.0, 3.0, 96, 80).unwrap();

        let parallel = render(&mandelbrot, &viewport);

        for py in 0..viewport.height {
            for px in 0..viewport.width {
                let expected = mandelbrot.iterate(viewport.pixel_to_complex(px, py));
                let got = parallel.iterations.data[(py * viewport.width + px) as usize];
                assert_eq!(got, expected, "mismatch at ({px}, {py})");
            }
        }
    }

    #[test]
    fn delta_fractal_uses_delta_mapping() {
        let viewport = Viewport::new(-0.75, 0.05, 0.05, 64, 64).unwrap();
        let fractal = MandelbrotFf::new(FractalParams::new(200).unwrap(), viewport.center_ff());

        let result = render(&fractal, &viewport);

        let px = 10;
        let py = 20;
        let expected = fractal.iterate(viewport.pixel_to_delta(px, py));
        assert_eq!(
            result.iterations.data[(py * viewport.width + px) as usize],
            expected
        );
    }

    #[test]
    fn gasket_render_is_all_trapped() {
        let gasket = SierpinskiGasket::default();
        let viewport = Viewport::new(0.4, 0.4, 1.2, 70, 50).unwrap();
        let result = render(&gasket, &viewport);
        assert!(result
            .iterations
            .data
            .iter()
            .all(|r| matches!(r, IterationResult::Trapped { .. })));
    }

    #[test]
    fn render_is_deterministic() {
        let mandelbrot = Mandelbrot::default();
        let viewport = Viewport::new(-0.5, 0.0, 3.0, 128, 96).unwrap();

        let r1 = render(&mandelbrot, &viewport);
        let r2 = render(&mandelbrot, &viewport);

        assert_eq!(
            r1.iterations.data, r2.iterations.data,
            "renders must be deterministic"
        );
    }
}

use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams, IterationResult};

/// Number of fold iterations. The fold converges visually in ~20 steps,
/// so this is fixed rather than user-configurable.
const GASKET_FOLDS: u32 = 20;

/// The Sierpiński gasket, rendered by iterated folding rather than
/// escape-time.
///
/// Each step reflects the point into the positive quadrant (abs-fold),
/// reflects across the diagonal `x + y = 1` when it lands outside the
/// base triangle, and applies the ×2 gasket scale. The coloring input is
/// an orbit trap: the minimum distance to the origin seen across all
/// folds, reported as [`IterationResult::Trapped`].
///
/// Native `f32` only: the fold runs a fixed 20 steps from O(1)
/// coordinates, so single precision is adequate at every zoom level.
#[derive(Debug, Clone)]
pub struct SierpinskiGasket {
    params: FractalParams,
}

impl SierpinskiGasket {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for SierpinskiGasket {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

impl Fractal for SierpinskiGasket {
    fn iterate(&self, point: Complex) -> IterationResult {
        let mut x = point.re;
        let mut y = point.im;
        let mut trap_sq = f32::INFINITY;

        for _ in 0..GASKET_FOLDS {
            // Abs-fold into the positive quadrant.
            x = x.abs();
            y = y.abs();

            // Reflect across the diagonal x + y = 1.
            if x + y > 1.0 {
                let (nx, ny) = (1.0 - y, 1.0 - x);
                x = nx;
                y = ny;
            }

            // Gasket scale about the triangle center.
            x = x * 2.0 - 0.5;
            y = y * 2.0 - 0.5;

            trap_sq = trap_sq.min(x * x + y * y);
        }

        IterationResult::Trapped {
            distance: trap_sq.sqrt(),
        }
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}

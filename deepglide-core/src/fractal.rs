use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::error::CoreError;

/// Squared bailout radius: the orbit has escaped once `|z|² > 4`.
pub const ESCAPE_RADIUS_SQ: f32 = 4.0;

/// Hard ceiling on the per-pixel iteration budget, bounding frame cost
/// no matter how deep the zoom goes.
pub const MAX_ITERATION_CAP: u32 = 10_000;

/// Extra iterations granted per doubling of zoom depth.
const ITER_RATE_PER_DOUBLING: f64 = 30.0;

/// Which fractal the engine is evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FractalKind {
    Mandelbrot,
    Julia,
    SierpinskiGasket,
}

impl FractalKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
            Self::SierpinskiGasket => "Sierpinski gasket",
        }
    }

    /// Whether this kind has an emulated-precision iteration path.
    ///
    /// The gasket runs a fixed 20-step fold from O(1) coordinates, where
    /// `f32` is adequate at every zoom level, so it never switches.
    pub fn supports_extended(self) -> bool {
        matches!(self, Self::Mandelbrot | Self::Julia)
    }
}

/// The result of iterating a single point.
///
/// The engine stores only raw iteration data. The smooth coloring formula
/// is deferred to the coloring pass in `deepglide-render`, keeping the hot
/// loop lean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IterationResult {
    /// The orbit escaped after `iterations` steps.
    /// `norm_sq` is `|z|²` at the moment of escape.
    Escaped { iterations: u32, norm_sq: f32 },

    /// The point did not escape within the iteration budget — interior of
    /// the set (or an under-iterated boundary point). Expected behavior,
    /// not an error.
    Interior,

    /// Orbit-trap result for the gasket: minimum distance to the origin
    /// seen across the fold iterations.
    Trapped { distance: f32 },
}

impl IterationResult {
    /// Integer classification for comparing pixels across precision paths.
    #[inline]
    pub fn class(&self) -> u64 {
        match self {
            Self::Escaped { iterations, .. } => *iterations as u64,
            Self::Interior => u64::MAX,
            Self::Trapped { distance } => distance.to_bits() as u64,
        }
    }
}

/// Parameters controlling fractal iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalParams {
    /// Maximum number of iterations before declaring a point interior.
    pub max_iterations: u32,
}

impl FractalParams {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 500;

    pub fn new(max_iterations: u32) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        Ok(Self { max_iterations })
    }

    /// Scale the iteration budget with zoom depth.
    ///
    /// Grants a fixed rate of extra iterations for every doubling of zoom
    /// below `home_span`, capped at [`MAX_ITERATION_CAP`]. At or above the
    /// home span the base budget is returned unchanged.
    pub fn scaled_for_span(self, span: f64, home_span: f64) -> Self {
        if !(span > 0.0) || !(home_span > 0.0) {
            return self;
        }
        let zoom = home_span / span;
        if zoom <= 1.0 {
            return self;
        }
        let bonus = (zoom.log2() * ITER_RATE_PER_DOUBLING) as u32;
        Self {
            max_iterations: self
                .max_iterations
                .saturating_add(bonus)
                .min(MAX_ITERATION_CAP),
        }
    }
}

impl Default for FractalParams {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Trait implemented by all fractal evaluators.
///
/// Designed for **static dispatch** — renderers should be generic over
/// `F: Fractal` rather than using `dyn Fractal`, so the compiler can
/// inline and optimize the hot iteration loop.
///
/// Implementations are referentially transparent: no state across calls,
/// safe to invoke once per pixel in any order or in parallel.
pub trait Fractal {
    /// Iterate a single point and return the result.
    ///
    /// For native-precision fractals, `point` is the absolute coordinate
    /// on the plane (from [`Viewport::pixel_to_complex`]).
    ///
    /// For emulated-precision fractals (see
    /// [`uses_delta_coordinates`](Self::uses_delta_coordinates)), `point`
    /// is the **delta from the stored center** (from
    /// [`Viewport::pixel_to_delta`]).
    ///
    /// [`Viewport::pixel_to_complex`]: crate::Viewport::pixel_to_complex
    /// [`Viewport::pixel_to_delta`]: crate::Viewport::pixel_to_delta
    fn iterate(&self, point: Complex) -> IterationResult;

    /// Access the iteration parameters.
    fn params(&self) -> &FractalParams;

    /// If `true`, [`iterate`](Self::iterate) expects a delta from the
    /// fractal's internally stored center, not an absolute coordinate.
    fn uses_delta_coordinates(&self) -> bool {
        false
    }
}

use crate::complex::Complex;
use crate::complex_ff::ComplexFf;
use crate::float_float::FloatFloat;
use crate::fractal::{Fractal, FractalParams, IterationResult, ESCAPE_RADIUS_SQ};

/// A Julia set on the emulated-precision path: fixed `c`, float-pair
/// iteration.
///
/// As with [`MandelbrotFf`](crate::MandelbrotFf), the view center is
/// stored split and `iterate` receives a per-pixel delta, reconstructing
/// `z₀ = center + delta` in pair precision.
#[derive(Debug, Clone)]
pub struct JuliaFf {
    params: FractalParams,
    center: ComplexFf,
    c: ComplexFf,
}

/// Orbit-convergence tolerance for float-pair orbits (~48 bits).
const FF_PERIOD_TOLERANCE: f32 = 1e-12;

impl JuliaFf {
    pub fn new(c: Complex, params: FractalParams, center: ComplexFf) -> Self {
        Self {
            params,
            center,
            c: ComplexFf::from(c),
        }
    }
}

impl Fractal for JuliaFf {
    fn iterate(&self, delta: Complex) -> IterationResult {
        let escape_radius_sq = FloatFloat::from(ESCAPE_RADIUS_SQ);

        let mut z = self.center + ComplexFf::from(delta);

        // Brent cycle check, ungated as on the native Julia path.
        let mut snapshot = z;
        let mut since: u32 = 0;
        let mut window: u32 = 3;

        for n in 0..self.params.max_iterations {
            z = z.sqr() + self.c;

            let norm_sq = z.norm_sq();
            if norm_sq > escape_radius_sq {
                return IterationResult::Escaped {
                    iterations: n,
                    norm_sq: norm_sq.to_f32(),
                };
            }

            let dre = (z.re - snapshot.re).abs();
            let dim = (z.im - snapshot.im).abs();
            if dre.hi < FF_PERIOD_TOLERANCE && dim.hi < FF_PERIOD_TOLERANCE {
                return IterationResult::Interior;
            }

            since += 1;
            if since > window {
                snapshot = z;
                since = 0;
                window = window.saturating_mul(2);
            }
        }

        IterationResult::Interior
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }

    fn uses_delta_coordinates(&self) -> bool {
        true
    }
}

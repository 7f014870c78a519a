use crate::complex::Complex;
use crate::complex_ff::ComplexFf;
use crate::float_float::FloatFloat;
use crate::fractal::{Fractal, FractalParams, IterationResult, ESCAPE_RADIUS_SQ};
use crate::mandelbrot::{in_cardioid, in_period2_bulb};

/// The Mandelbrot set on the emulated-precision path: every add, multiply,
/// and square of the loop runs in float-pair arithmetic.
///
/// The view center is stored split to ~48 bits; `iterate` receives the
/// pixel's **delta** from that center (small enough for `f32`) and
/// reconstructs `c = center + delta` in pair precision. That keeps
/// adjacent pixels apart long after absolute `f32` coordinates collide.
#[derive(Debug, Clone)]
pub struct MandelbrotFf {
    params: FractalParams,
    center: ComplexFf,
}

/// Orbit-convergence tolerance for float-pair orbits (~48 bits).
const FF_PERIOD_TOLERANCE: f32 = 1e-12;

impl MandelbrotFf {
    pub fn new(params: FractalParams, center: ComplexFf) -> Self {
        Self { params, center }
    }
}

impl Fractal for MandelbrotFf {
    fn iterate(&self, delta: Complex) -> IterationResult {
        let c = self.center + ComplexFf::from(delta);
        let c_f32 = c.to_complex();

        // Cardioid/bulb check on the downcast value (rough filter — the
        // boundary cases it misses just iterate normally).
        if in_cardioid(c_f32.re, c_f32.im) || in_period2_bulb(c_f32.re, c_f32.im) {
            return IterationResult::Interior;
        }

        let escape_radius_sq = FloatFloat::from(ESCAPE_RADIUS_SQ);

        let mut z = ComplexFf::ZERO;

        // Brent cycle check, gated as on the native path.
        let mut snapshot = z;
        let mut since: u32 = 0;
        let mut window: u32 = 3;

        for n in 0..self.params.max_iterations {
            z = z.sqr() + c;

            let norm_sq = z.norm_sq();
            if norm_sq > escape_radius_sq {
                return IterationResult::Escaped {
                    iterations: n,
                    norm_sq: norm_sq.to_f32(),
                };
            }

            if n >= 32 && n & 3 == 0 {
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

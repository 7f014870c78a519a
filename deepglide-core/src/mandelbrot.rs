use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams, IterationResult, ESCAPE_RADIUS_SQ};

/// The Mandelbrot set on the native `f32` path: `z ← z² + c` from
/// `z₀ = 0`, where `c` is the pixel's coordinate on the plane.
#[derive(Debug, Clone)]
pub struct Mandelbrot {
    params: FractalParams,
}

/// Orbit-convergence tolerance for the `f32` cycle check.
const PERIOD_TOLERANCE: f32 = 1e-6;

impl Mandelbrot {
    pub fn new(params: FractalParams) -> Self {
        Self { params }
    }
}

impl Default for Mandelbrot {
    fn default() -> Self {
        Self::new(FractalParams::default())
    }
}

/// Closed-form membership test for the main cardioid.
///
/// Lets ~30–40% of home-view pixels skip the loop entirely. Purely an
/// optimization: it may only ever agree with what full iteration would
/// conclude, never overrule it.
#[inline]
pub(crate) fn in_cardioid(re: f32, im: f32) -> bool {
    let im2 = im * im;
    let q = (re - 0.25) * (re - 0.25) + im2;
    q * (q + (re - 0.25)) <= 0.25 * im2
}

/// Closed-form membership test for the period-2 bulb.
#[inline]
pub(crate) fn in_period2_bulb(re: f32, im: f32) -> bool {
    (re + 1.0) * (re + 1.0) + im * im <= 0.0625
}

impl Fractal for Mandelbrot {
    fn iterate(&self, c: Complex) -> IterationResult {
        if in_cardioid(c.re, c.im) || in_period2_bulb(c.re, c.im) {
            return IterationResult::Interior;
        }

        let mut z = Complex::ZERO;

        // Brent cycle check: compare against a snapshot whose age doubles.
        let mut snapshot = z;
        let mut since: u32 = 0;
        let mut window: u32 = 3;

        for n in 0..self.params.max_iterations {
            z = z.sqr() + c;

            let norm_sq = z.norm_sq();
            if norm_sq > ESCAPE_RADIUS_SQ {
                return IterationResult::Escaped {
                    iterations: n,
                    norm_sq,
                };
            }

            // Orbits rarely settle inside 32 steps; probing every 4th
            // iteration after that keeps the branch out of the hot part.
            if n >= 32 && n & 3 == 0 {
                if (z.re - snapshot.re).abs() < PERIOD_TOLERANCE
                    && (z.im - snapshot.im).abs() < PERIOD_TOLERANCE
                {
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
}

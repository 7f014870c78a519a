use crate::complex::Complex;
use crate::fractal::{Fractal, FractalParams, IterationResult, ESCAPE_RADIUS_SQ};

/// A Julia set on the native `f32` path: the same quadratic map as the
/// Mandelbrot set, but with `c` held fixed and the pixel supplying `z₀`.
#[derive(Debug, Clone)]
pub struct Julia {
    params: FractalParams,

    /// The parameter selecting which Julia set this is.
    c: Complex,
}

/// Orbit-convergence tolerance for the `f32` cycle check.
const PERIOD_TOLERANCE: f32 = 1e-6;

impl Julia {
    pub fn new(c: Complex, params: FractalParams) -> Self {
        Self { params, c }
    }

    /// The default constant `c = -0.7269 + 0.1889i`, a dendrite-heavy set
    /// that rewards zooming.
    pub fn default_c() -> Complex {
        Complex::new(-0.7269, 0.1889)
    }

    /// The constant `c` defining this Julia set.
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c(), FractalParams::default())
    }
}

impl Fractal for Julia {
    fn iterate(&self, point: Complex) -> IterationResult {
        let mut z = point;

        // Brent cycle check; unlike the Mandelbrot loop there is no warmup
        // gate, since z₀ can land on an attractor immediately.
        let mut snapshot = z;
        let mut since: u32 = 0;
        let mut window: u32 = 3;

        for n in 0..self.params.max_iterations {
            z = z.sqr() + self.c;

            let norm_sq = z.norm_sq();
            if norm_sq > ESCAPE_RADIUS_SQ {
                return IterationResult::Escaped {
                    iterations: n,
                    norm_sq,
                };
            }

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

        IterationResult::Interior
    }

    fn params(&self) -> &FractalParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn julia() -> Julia {
        Julia::default()
    }

    #[test]
    fn far_point_escapes() {
        let result = julia().iterate(Complex::new(10.0, 0.0));
        assert!(
            matches!(result, IterationResult::Escaped { .. }),
            "far point should escape"
        );
    }

    #[test]
    fn c_zero_origin_is_fixed_point() {
        // With c = 0 the map is z ← z²; the origin never moves.
        let j = Julia::new(Complex::ZERO, FractalParams::default());
        assert_eq!(j.iterate(Complex::ZERO), IterationResult::Interior);
    }

    #[test]
    fn c_zero_unit_circle_separates_fates() {
        let j = Julia::new(Complex::ZERO, FractalParams::default());
        // Inside the unit disc z² spirals inward; outside it blows up.
        assert_eq!(
            j.iterate(Complex::new(0.5, 0.0)),
            IterationResult::Interior
        );
        assert!(matches!(
            j.iterate(Complex::new(3.0, 0.0)),
            IterationResult::Escaped { .. }
        ));
    }

    #[test]
    fn default_c_value() {
        let c = Julia::default_c();
        assert_eq!(c.re, -0.7269);
        assert_eq!(c.im, 0.1889);
    }

    #[test]
    fn deterministic_results() {
        let j = julia();
        let points = [
            Complex::new(0.0, 0.0),
            Complex::new(0.5, 0.5),
            Complex::new(-1.0, 0.3),
            Complex::new(0.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        let run2: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        assert_eq!(run1, run2, "iteration results must be deterministic");
    }
}

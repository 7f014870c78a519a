use deepglide_core::IterationResult;
use rayon::prelude::*;

use crate::buffer::RenderBuffer;
use crate::iteration_buffer::IterationBuffer;

/// Resolution of the precomputed gradient table.
const LUT_SIZE: usize = 2048;

// ---------------------------------------------------------------------------
// Smooth coloring
// ---------------------------------------------------------------------------

/// Compute the smooth (continuous) iteration count.
///
/// Standard renormalized escape-time:
///   ν = n + 1 − log₂(log₂(|zₙ|²) / 2)
/// which removes the visible banding of the raw integer count.
pub fn smooth_iteration(iterations: u32, norm_sq: f32) -> f64 {
    let log_norm = (norm_sq as f64).log2() / 2.0; // log₂|z|
    if log_norm <= 0.0 {
        return iterations as f64;
    }
    iterations as f64 + 1.0 - log_norm.log2()
}

/// Shape an orbit-trap distance into a palette position.
///
/// Traps cluster near zero on the gasket body; the ×2.5 gain spreads the
/// interesting range across the gradient before clamping.
fn trap_fraction(distance: f32) -> f64 {
    (distance as f64 * 2.5).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// Coefficients of a cosine gradient `a + b·cos(2π(c·t + d))` per channel.
#[derive(Debug, Clone, Copy)]
struct CosineGradient {
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
    d: [f64; 3],
}

impl CosineGradient {
    fn sample(&self, t: f64) -> [u8; 4] {
        let mut rgb = [0u8; 3];
        for ch in 0..3 {
            let v = self.a[ch]
                + self.b[ch] * (std::f64::consts::TAU * (self.c[ch] * t + self.d[ch])).cos();
            rgb[ch] = (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        [rgb[0], rgb[1], rgb[2], 255]
    }
}

enum PaletteFn {
    /// Continuous cosine gradient, evaluated per sample.
    Cosine(CosineGradient),
    /// Precomputed lookup table, linearly interpolated.
    Lut(Vec<[u8; 4]>),
}

/// Maps a smoothed iteration value to a color.
///
/// One of a fixed family selected by id: four cosine gradients plus the
/// LUT-backed "Extreme" table. This is the color-mapper boundary the
/// evaluation pipeline consumes — `(result, max_iterations) → RGBA`.
pub struct Palette {
    pub name: &'static str,
    func: PaletteFn,
}

impl Palette {
    /// Map a single iteration result to an RGBA color.
    ///
    /// Escaped points use the smooth count normalized by the iteration
    /// budget; interior points are black; gasket traps use the shaped
    /// trap distance.
    pub fn color(&self, result: IterationResult, max_iterations: u32) -> [u8; 4] {
        match result {
            IterationResult::Interior => [0, 0, 0, 255],
            IterationResult::Escaped {
                iterations,
                norm_sq,
            } => {
                let nu = smooth_iteration(iterations, norm_sq);
                let t = (nu / max_iterations.max(1) as f64).clamp(0.0, 1.0);
                self.sample(t)
            }
            IterationResult::Trapped { distance } => self.sample(trap_fraction(distance)),
        }
    }

    /// Colorize an entire iteration buffer into an RGBA pixel buffer.
    pub fn colorize(&self, iter_buf: &IterationBuffer) -> RenderBuffer {
        let len = iter_buf.data.len();
        let max_iter = iter_buf.max_iterations;
        let mut pixels = vec![0u8; len * 4];
        pixels
            .par_chunks_mut(4)
            .zip(iter_buf.data.par_iter())
            .for_each(|(pixel, &result)| {
                let c = self.color(result, max_iter);
                pixel.copy_from_slice(&c);
            });
        RenderBuffer {
            width: iter_buf.width,
            height: iter_buf.height,
            pixels,
        }
    }

    fn sample(&self, t: f64) -> [u8; 4] {
        match &self.func {
            PaletteFn::Cosine(g) => g.sample(t),
            PaletteFn::Lut(colors) => {
                let pos = t.clamp(0.0, 1.0) * (colors.len() - 1) as f64;
                let lo = pos.floor() as usize;
                let hi = (lo + 1).min(colors.len() - 1);
                let frac = pos - pos.floor();
                lerp_color(colors[lo], colors[hi], frac)
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        rainbow()
    }
}

fn lerp_color(a: [u8; 4], b: [u8; 4], t: f64) -> [u8; 4] {
    let inv = 1.0 - t;
    [
        (a[0] as f64 * inv + b[0] as f64 * t) as u8,
        (a[1] as f64 * inv + b[1] as f64 * t) as u8,
        (a[2] as f64 * inv + b[2] as f64 * t) as u8,
        255,
    ]
}

// ---------------------------------------------------------------------------
// Builtin palettes
// ---------------------------------------------------------------------------

/// The fixed palette family, indexable by id 0–4.
pub fn builtin_palettes() -> Vec<Palette> {
    vec![rainbow(), sunset(), ocean(), mono(), extreme()]
}

fn rainbow() -> Palette {
    Palette {
        name: "Rainbow",
        func: PaletteFn::Cosine(CosineGradient {
            a: [0.5, 0.5, 0.5],
            b: [0.5, 0.5, 0.5],
            c: [1.0, 1.0, 1.0],
            d: [0.0, 0.33, 0.67],
        }),
    }
}

fn sunset() -> Palette {
    Palette {
        name: "Sunset",
        func: PaletteFn::Cosine(CosineGradient {
            a: [0.5, 0.5, 0.5],
            b: [0.5, 0.5, 0.5],
            c: [1.0, 0.7, 0.4],
            d: [0.0, 0.15, 0.2],
        }),
    }
}

fn ocean() -> Palette {
    Palette {
        name: "Ocean",
        func: PaletteFn::Cosine(CosineGradient {
            a: [0.5, 0.5, 0.5],
            b: [0.5, 0.5, 0.5],
            c: [1.0, 1.0, 1.0],
            d: [0.0, 0.1, 0.2],
        }),
    }
}

fn mono() -> Palette {
    Palette {
        name: "Mono",
        func: PaletteFn::Cosine(CosineGradient {
            a: [0.5, 0.5, 0.5],
            b: [0.5, 0.5, 0.5],
            c: [1.0, 1.0, 1.0],
            d: [0.0, 0.0, 0.0],
        }),
    }
}

/// The "Extreme" gradient: a 2048-entry table interpolated with smoothstep
/// between 21 fixed color stops.
fn extreme() -> Palette {
    struct Stop {
        pos: f64,
        rgb: [u8; 3],
    }
    let stops: &[Stop] = &[
        Stop { pos: 0.00, rgb: [0, 0, 0] },
        Stop { pos: 0.05, rgb: [25, 7, 26] },
        Stop { pos: 0.10, rgb: [9, 1, 47] },
        Stop { pos: 0.15, rgb: [4, 4, 73] },
        Stop { pos: 0.20, rgb: [0, 7, 100] },
        Stop { pos: 0.25, rgb: [12, 44, 138] },
        Stop { pos: 0.30, rgb: [24, 82, 177] },
        Stop { pos: 0.35, rgb: [57, 125, 209] },
        Stop { pos: 0.40, rgb: [134, 181, 229] },
        Stop { pos: 0.45, rgb: [211, 236, 248] },
        Stop { pos: 0.50, rgb: [241, 233, 191] },
        Stop { pos: 0.55, rgb: [248, 201, 95] },
        Stop { pos: 0.60, rgb: [255, 170, 0] },
        Stop { pos: 0.65, rgb: [240, 126, 13] },
        Stop { pos: 0.70, rgb: [204, 71, 10] },
        Stop { pos: 0.75, rgb: [158, 1, 66] },
        Stop { pos: 0.80, rgb: [110, 0, 95] },
        Stop { pos: 0.85, rgb: [106, 0, 168] },
        Stop { pos: 0.90, rgb: [77, 16, 140] },
        Stop { pos: 0.95, rgb: [45, 20, 80] },
        Stop { pos: 1.00, rgb: [0, 0, 0] },
    ];

    let colors = (0..LUT_SIZE)
        .map(|i| {
            let t = i as f64 / (LUT_SIZE - 1) as f64;

            let mut lower = &stops[0];
            let mut upper = &stops[stops.len() - 1];
            for pair in stops.windows(2) {
                if t >= pair[0].pos && t <= pair[1].pos {
                    lower = &pair[0];
                    upper = &pair[1];
                    break;
                }
            }

            let local_t = if upper.pos > lower.pos {
                (t - lower.pos) / (upper.pos - lower.pos)
            } else {
                0.0
            };
            let smooth_t = local_t * local_t * (3.0 - 2.0 * local_t);

            let mut rgb = [0u8; 3];
            for ch in 0..3 {
                let v = lower.rgb[ch] as f64
                    + (upper.rgb[ch] as f64 - lower.rgb[ch] as f64) * smooth_t;
                rgb[ch] = v.round() as u8;
            }
            [rgb[0], rgb[1], rgb[2], 255]
        })
        .collect();

    Palette {
        name: "Extreme",
        func: PaletteFn::Lut(colors),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

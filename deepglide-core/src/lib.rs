pub mod camera;
pub mod complex;
pub mod complex_ff;
pub mod error;
pub mod float_float;
pub mod fractal;
pub mod interaction;
pub mod julia;
pub mod julia_ff;
pub mod mandelbrot;
pub mod mandelbrot_ff;
pub mod precision;
pub mod sierpinski;
pub mod viewport;

// Re-export primary types for convenience.
pub use camera::{CameraConfig, CameraState, View};
pub use complex::Complex;
pub use complex_ff::ComplexFf;
pub use error::CoreError;
pub use float_float::FloatFloat;
pub use fractal::{Fractal, FractalKind, FractalParams, IterationResult, MAX_ITERATION_CAP};
pub use interaction::InteractionController;
pub use julia::Julia;
pub use julia_ff::JuliaFf;
pub use mandelbrot::Mandelbrot;
pub use mandelbrot_ff::MandelbrotFf;
pub use precision::{Precision, EXTENDED_SPAN_THRESHOLD};
pub use sierpinski::SierpinskiGasket;
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;

use thiserror::Error;

/// Errors originating from the core engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid smoothing factor: {0} (must be in (0, 1))")]
    InvalidSmoothing(f64),

    #[error("invalid friction coefficient: {0} (must be in (0, 1))")]
    InvalidFriction(f64),
}

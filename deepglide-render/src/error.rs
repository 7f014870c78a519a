use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A zero-area viewport: there is no frame to render. Callers skip
    /// the frame rather than dividing by the degenerate height.
    #[error("empty viewport: {width}\u{00d7}{height} has no pixels to render")]
    EmptyViewport { width: u32, height: u32 },

    #[error(transparent)]
    Core(#[from] deepglide_core::CoreError),
}

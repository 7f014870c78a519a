pub mod buffer;
pub mod error;
pub mod frame;
pub mod iteration_buffer;
pub mod palette;
pub mod renderer;
pub mod tile;

pub use buffer::RenderBuffer;
pub use error::RenderError;
pub use frame::{render_frame, FrameOutput, FrameRequest};
pub use iteration_buffer::IterationBuffer;
pub use palette::{builtin_palettes, smooth_iteration, Palette};
pub use renderer::{render, RenderResult};
pub use tile::TILE_SIZE;

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;

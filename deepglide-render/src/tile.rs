/// Edge length of the square work grains handed to the thread pool.
///
/// 64×64 keeps one tile's iteration results L1-resident while still
/// producing enough grains for work stealing to even out the wildly
/// uneven per-tile cost near the set boundary.
pub const TILE_SIZE: u32 = 64;

/// One rectangular work grain of the viewport.
#[derive(Debug, Clone, Copy)]
pub struct Tile {
    /// Top-left corner, in viewport pixels.
    pub x: u32,
    pub y: u32,
    /// Extent in pixels; tiles on the right and bottom edges shrink to fit.
    pub width: u32,
    pub height: u32,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Cut a viewport into tiles: an exact cover, no overlaps.
pub fn build_tile_grid(width: u32, height: u32) -> Vec<Tile> {
    let step = TILE_SIZE as usize;
    (0..height)
        .step_by(step)
        .flat_map(|y| {
            (0..width).step_by(step).map(move |x| Tile {
                x,
                y,
                width: TILE_SIZE.min(width - x),
                height: TILE_SIZE.min(height - y),
            })
        })
        .collect()
}

//! Pointer position to grid coordinates

use glam::Vec2;

use crate::consts::TILE_PIXELS;
use crate::map::PALETTE_SIZE;

/// Where the canvas sits relative to the pointer's client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerFrame {
    /// Canvas offset within the page
    pub canvas_offset: Vec2,
    /// Window plus scroll-container scroll
    pub scroll: Vec2,
    /// Canvas border width
    pub border: f32,
    /// Canvas size in pixels
    pub canvas_size: Vec2,
}

impl PointerFrame {
    /// Canvas pixel under the pointer, clamped to the canvas
    pub fn to_pixel(&self, client: Vec2) -> Vec2 {
        let pixel = client - self.canvas_offset + self.scroll - Vec2::splat(self.border);
        let max = (self.canvas_size - Vec2::ONE).max(Vec2::ZERO);
        pixel.clamp(Vec2::ZERO, max)
    }
}

/// Tile coordinate containing a canvas pixel, clamped to `columns × rows`
pub fn pixel_to_tile(pixel: Vec2, columns: usize, rows: usize) -> (usize, usize) {
    let clamp = |coord: f32, count: usize| {
        let cell = (coord / TILE_PIXELS).floor().max(0.0) as usize;
        cell.min(count.saturating_sub(1))
    };
    (clamp(pixel.x, columns), clamp(pixel.y, rows))
}

/// Palette slot under a horizontal position in the tile bar
pub fn tile_bar_slot(pixel_x: f32) -> Option<usize> {
    if pixel_x < 0.0 {
        return None;
    }
    let slot = (pixel_x / TILE_PIXELS).floor() as usize;
    (slot < PALETTE_SIZE).then_some(slot)
}

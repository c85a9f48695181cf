//! Editor-side adapters
//!
//! Translate raw pointer positions and UI selector values into the
//! coordinates and sizes the grid store accepts.

pub mod pointer;

pub use pointer::{PointerFrame, pixel_to_tile, tile_bar_slot};

use crate::consts::*;

/// Clamp map-size selector values into the supported range
pub fn clamp_map_size(width: usize, height: usize) -> (usize, usize) {
    (
        width.clamp(MIN_MAP_PAGES, MAX_MAP_WIDTH),
        height.clamp(MIN_MAP_PAGES, MAX_MAP_HEIGHT),
    )
}

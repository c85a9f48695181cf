//! Tile grid store
//!
//! Owns the flat tile buffer for the whole map. Only the editor writes to it;
//! the simulation borrows it read-only while playing.

pub mod grid;
pub mod tile;

pub use grid::{GridError, TileGrid};
pub use tile::{EMPTY, END, ERASER, HAZARD, PALETTE, PALETTE_SIZE, START, TileKind, palette_value};

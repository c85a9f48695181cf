//! Tile Hopper - a tile-map level editor with an embedded platformer
//!
//! Core modules:
//! - `map`: Tile grid store (addressing, markers, resize)
//! - `sim`: Deterministic platformer simulation (kinematics, sensors, win/death)
//! - `session`: Edit/Play mode ownership of grid, player and key state
//! - `editor`: Pointer and map-size adapters for the host UI
//! - `settings`: Host-supplied configuration

pub mod editor;
pub mod map;
pub mod session;
pub mod settings;
pub mod sim;

pub use map::{GridError, TileGrid, TileKind};
pub use session::{Mode, PlayWarning, Session, SessionError};
pub use settings::Settings;
pub use sim::{Player, SimEvent, TickInput, step};

/// Map geometry and physics constants
pub mod consts {
    /// Cells along one side of a page (one screen)
    pub const TILES_PER_PAGE: usize = 8;
    /// Pixel side of a cell, also the player's box size
    pub const TILE_PIXELS: f32 = 32.0;
    /// Pixel side of a page
    pub const PAGE_PIXELS: f32 = TILES_PER_PAGE as f32 * TILE_PIXELS;

    /// Map size bounds, in pages
    pub const MIN_MAP_PAGES: usize = 1;
    pub const MAX_MAP_WIDTH: usize = 16;
    pub const MAX_MAP_HEIGHT: usize = 4;

    /// Vertical acceleration (positive velocity points up)
    pub const GRAVITY: f32 = -12.0;
    /// Horizontal acceleration while one direction is held
    pub const RUN_ACCEL: f32 = 12.0;
    /// Vertical velocity set by a jump
    pub const JUMP_VELOCITY: f32 = 8.7;
    pub const MAX_FALL_SPEED: f32 = 10.0;
    pub const MAX_RUN_SPEED: f32 = 5.0;

    /// Friction coefficients
    pub const GROUND_DAMPING: f32 = 0.75;
    pub const AIR_DAMPING: f32 = 0.1;
    /// Horizontal speed below which friction stops the player
    pub const VELOCITY_EPSILON: f32 = 0.05;

    /// Millisecond divisors for velocity, displacement and friction
    pub const VELOCITY_TIME_SCALE: f32 = 900.0;
    pub const MOVE_TIME_SCALE: f32 = 25.0;
    pub const FRICTION_TIME_SCALE: f32 = 100.0;
}

//! Tile values and the editor palette

use serde::{Deserialize, Serialize};

/// Empty cell
pub const EMPTY: i32 = -1;
/// Eraser selection; never stored in the grid
pub const ERASER: i32 = 0;
pub const DIRT: i32 = 1;
pub const GRASS: i32 = 2;
pub const STONE: i32 = 3;
pub const BRICK: i32 = 4;
/// Spikes kill the player on contact
pub const HAZARD: i32 = 5;
/// Spawn point marker (unique)
pub const START: i32 = 6;
/// Goal marker (unique)
pub const END: i32 = 7;

/// Slots in the tile bar
pub const PALETTE_SIZE: usize = 8;

/// Tile bar contents, indexed by slot
pub const PALETTE: [(i32, &str); PALETTE_SIZE] = [
    (ERASER, "Eraser"),
    (DIRT, "Dirt"),
    (GRASS, "Grass"),
    (STONE, "Stone"),
    (BRICK, "Brick"),
    (HAZARD, "Spikes"),
    (START, "Start"),
    (END, "End"),
];

/// What a cell means to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Solid,
    Hazard,
    Start,
    End,
}

impl TileKind {
    /// Classify a raw cell value
    pub fn of(value: i32) -> Self {
        match value {
            EMPTY | ERASER => TileKind::Empty,
            HAZARD => TileKind::Hazard,
            START => TileKind::Start,
            END => TileKind::End,
            _ => TileKind::Solid,
        }
    }

    /// Whether the player is blocked by this tile
    pub fn is_collision(self) -> bool {
        !matches!(self, TileKind::Empty | TileKind::Start | TileKind::End)
    }

    /// Start and end markers may appear at most once in a grid
    pub fn is_marker(self) -> bool {
        matches!(self, TileKind::Start | TileKind::End)
    }
}

/// Whether a raw value may be written to the grid
pub fn is_valid_value(value: i32) -> bool {
    (EMPTY..PALETTE_SIZE as i32).contains(&value)
}

/// Value a brush stores for the given tile bar slot (`None` outside the bar)
pub fn palette_value(slot: usize) -> Option<i32> {
    PALETTE.get(slot).map(|&(value, _)| if value == ERASER { EMPTY } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_classes() {
        assert!(!TileKind::of(EMPTY).is_collision());
        assert!(!TileKind::of(START).is_collision());
        assert!(!TileKind::of(END).is_collision());
        assert!(TileKind::of(GRASS).is_collision());
        assert!(TileKind::of(HAZARD).is_collision());
    }

    #[test]
    fn test_eraser_slot_paints_empty() {
        assert_eq!(palette_value(0), Some(EMPTY));
        assert_eq!(palette_value(6), Some(START));
        assert_eq!(palette_value(PALETTE_SIZE), None);
    }

    #[test]
    fn test_value_range() {
        assert!(is_valid_value(EMPTY));
        assert!(is_valid_value(END));
        assert!(!is_valid_value(-2));
        assert!(!is_valid_value(8));
    }
}

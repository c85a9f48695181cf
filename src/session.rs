//! Editor session: owns the map, the key set and the play-mode player
//!
//! Exactly one side writes at a time. In Edit Mode the grid accepts cell
//! writes and resizes; in Play Mode the grid is frozen and only the player
//! state advances, once per frame.

use std::fmt;

use crate::editor::clamp_map_size;
use crate::map::{GridError, TileGrid, palette_value};
use crate::settings::Settings;
use crate::sim::{KeySet, Player, SimEvent, step};

/// Rejected session operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The grid cannot change while playing
    GridFrozen,
    /// Not a slot in the tile bar
    UnknownSlot(usize),
    Grid(GridError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::GridFrozen => write!(f, "the map cannot be edited while playing"),
            SessionError::UnknownSlot(slot) => write!(f, "tile bar has no slot {slot}"),
            SessionError::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        SessionError::Grid(e)
    }
}

/// Non-fatal problems reported when play starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayWarning {
    /// The map has no end marker, so it cannot be won
    MissingEndMarker,
}

/// Per-play-session state, dropped when play stops
#[derive(Debug, Clone)]
pub struct PlayState {
    pub player: Player,
    /// Timestamp of the previous frame, `None` before the first one
    pub last_frame_ms: Option<f64>,
}

/// Which side currently owns writes
#[derive(Debug, Clone)]
pub enum Mode {
    Edit,
    Play(PlayState),
}

/// The whole editor state for one page
#[derive(Debug, Clone)]
pub struct Session {
    grid: TileGrid,
    keys: KeySet,
    settings: Settings,
    mode: Mode,
    /// Value the brush paints
    selected_tile: i32,
}

impl Session {
    /// Open the editor on the default layout, sized per `settings`
    pub fn new(settings: Settings) -> Self {
        let (width, height) = clamp_map_size(settings.initial_width, settings.initial_height);
        let mut grid = TileGrid::with_default_layout();
        grid.resize(width, height);
        Self::with_grid(grid, settings)
    }

    /// Open the editor on an existing map
    pub fn with_grid(grid: TileGrid, settings: Settings) -> Self {
        Self {
            grid,
            keys: KeySet::new(),
            settings,
            mode: Mode::Edit,
            selected_tile: palette_value(1).unwrap_or(crate::map::EMPTY),
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.mode, Mode::Play(_))
    }

    /// The player, while playing
    pub fn player(&self) -> Option<&Player> {
        match &self.mode {
            Mode::Play(play) => Some(&play.player),
            Mode::Edit => None,
        }
    }

    pub fn selected_tile(&self) -> i32 {
        self.selected_tile
    }

    // === Input ===

    pub fn key_down(&mut self, code: &str) {
        self.keys.press(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.keys.release(code);
    }

    /// Drop all held keys (focus loss)
    pub fn release_keys(&mut self) {
        self.keys.clear();
    }

    // === Edit Mode ===

    fn ensure_editing(&self) -> Result<(), SessionError> {
        if self.is_playing() {
            Err(SessionError::GridFrozen)
        } else {
            Ok(())
        }
    }

    /// Choose the brush from a tile bar slot
    pub fn select_tile(&mut self, slot: usize) -> Result<(), SessionError> {
        self.selected_tile = palette_value(slot).ok_or(SessionError::UnknownSlot(slot))?;
        Ok(())
    }

    /// Paint the selected tile
    pub fn paint(&mut self, x: usize, y: usize) -> Result<(), SessionError> {
        self.write_cell(x, y, self.selected_tile)
    }

    pub fn write_cell(&mut self, x: usize, y: usize, value: i32) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.grid.write_cell(x, y, value)?;
        Ok(())
    }

    /// Resize the map; sizes come from already-clamped selectors
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), SessionError> {
        self.ensure_editing()?;
        self.grid.resize(width, height);
        Ok(())
    }

    // === Play Mode ===

    /// Enter Play Mode with a fresh player at the spawn point
    ///
    /// Play starts even when a warning is returned.
    pub fn start_playing(&mut self) -> Option<PlayWarning> {
        let warning = (self.settings.warn_missing_end && !self.grid.has_end_marker())
            .then_some(PlayWarning::MissingEndMarker);
        if warning.is_some() {
            log::warn!("Map has no end marker; it cannot be won");
        }

        let spawn = self.grid.spawn_point();
        self.mode = Mode::Play(PlayState {
            player: Player::spawn(spawn),
            last_frame_ms: None,
        });
        log::info!("Play started at {:?}", spawn);
        warning
    }

    /// Return to Edit Mode, discarding the player
    pub fn stop_playing(&mut self) {
        if self.is_playing() {
            self.mode = Mode::Edit;
            log::info!("Play stopped");
        }
    }

    /// Run one animation frame at `timestamp_ms`
    ///
    /// The first frame after `start_playing` only records the timestamp. A
    /// win switches the session back to Edit Mode before it is returned, so
    /// the caller only needs to stop scheduling frames.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<SimEvent> {
        let Mode::Play(play) = &mut self.mode else {
            return None;
        };

        let delta = play.last_frame_ms.map(|last| (timestamp_ms - last) as f32);
        play.last_frame_ms = Some(timestamp_ms);

        let input = self.settings.bindings.sample(&self.keys);
        let event = step(&mut play.player, &self.grid, &input, delta);

        if event == Some(SimEvent::Win) {
            log::info!("Level complete");
            self.stop_playing();
        }
        event
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

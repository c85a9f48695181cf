//! Player state and simulation events

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// Terminal conditions a step can report to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Player touched the end marker; play should stop
    Win,
    /// Player touched a hazard and was sent back to spawn
    Death,
}

/// The controllable character
///
/// `pos` is the top-left corner of a `TILE_PIXELS` square in screen pixels
/// (y grows downward). `vel.y` is positive upward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub x_acc: f32,
    pub y_acc: f32,
    pub facing: Facing,
    pub grounded: bool,
    /// Where death sends the player back to
    pub spawn: Vec2,
}

impl Player {
    /// Fresh player at rest on `spawn`
    pub fn spawn(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            x_acc: 0.0,
            y_acc: GRAVITY,
            facing: Facing::Right,
            grounded: false,
            spawn,
        }
    }

    /// Reset to the initial state at the spawn point
    pub fn respawn(&mut self) {
        *self = Self::spawn(self.spawn);
    }
}

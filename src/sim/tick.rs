//! Per-frame simulation step
//!
//! Advances the player once per animation frame against a read-only grid.
//! Frame times are in milliseconds and vary with the display, so every rate
//! is scaled by the elapsed time.

use super::collision::{Axis, Contact, sweep};
use super::input::TickInput;
use super::state::{Facing, Player, SimEvent};
use crate::consts::*;
use crate::map::TileGrid;

/// Advance the player by `delta_ms`
///
/// `None` is the first frame of a play session, which has no elapsed time to
/// integrate; it and any non-positive or non-finite delta leave the player
/// untouched. Returns the terminal event the step ran into, if any. A death
/// has already reset the player to its spawn point when it is returned.
pub fn step(
    player: &mut Player,
    grid: &TileGrid,
    input: &TickInput,
    delta_ms: Option<f32>,
) -> Option<SimEvent> {
    let dt = match delta_ms {
        Some(dt) if dt.is_finite() && dt > 0.0 => dt,
        _ => return None,
    };

    // Integrate velocity
    player.vel.y = (player.vel.y + dt / VELOCITY_TIME_SCALE * player.y_acc)
        .clamp(-MAX_FALL_SPEED, MAX_FALL_SPEED);
    player.vel.x = (player.vel.x + dt / VELOCITY_TIME_SCALE * player.x_acc)
        .clamp(-MAX_RUN_SPEED, MAX_RUN_SPEED);

    let floor = grid.pixel_height() - TILE_PIXELS;
    let right_wall = grid.pixel_width() - TILE_PIXELS;
    player.grounded = player.pos.y >= floor;

    // Vertical motion (screen y grows downward, velocity is positive upward)
    let from = player.pos.y;
    let target = from - dt / MOVE_TIME_SCALE * player.vel.y;
    let to = target.clamp(0.0, floor);
    let mut landed = false;
    match sweep(grid, Axis::Vertical, player.pos.x, from, to) {
        Some(hit) => {
            if let Some(event) = terminal(player, hit.contact) {
                return Some(event);
            }
            player.pos.y = hit.snap;
            player.vel.y = 0.0;
            landed = to > from;
        }
        None => {
            player.pos.y = to;
            if to != target {
                player.vel.y = 0.0;
            }
        }
    }
    player.grounded = landed || player.pos.y >= floor;

    // Horizontal motion
    let from = player.pos.x;
    let target = from + dt / MOVE_TIME_SCALE * player.vel.x;
    let to = target.clamp(0.0, right_wall);
    match sweep(grid, Axis::Horizontal, player.pos.y, from, to) {
        Some(hit) => {
            if let Some(event) = terminal(player, hit.contact) {
                return Some(event);
            }
            player.pos.x = hit.snap;
            player.vel.x = 0.0;
        }
        None => {
            player.pos.x = to;
            if to != target {
                player.vel.x = 0.0;
            }
        }
    }

    // Input
    if input.jump && player.grounded {
        player.vel.y = JUMP_VELOCITY;
    }
    player.x_acc = match (input.left, input.right) {
        (true, false) => {
            player.facing = Facing::Left;
            -RUN_ACCEL
        }
        (false, true) => {
            player.facing = Facing::Right;
            RUN_ACCEL
        }
        _ => 0.0,
    };

    // Friction when coasting or turning around
    if player.x_acc == 0.0 || player.x_acc * player.vel.x < 0.0 {
        let damping = if player.grounded {
            GROUND_DAMPING
        } else {
            AIR_DAMPING
        };
        player.vel.x /= 1.0 + damping * (dt / FRICTION_TIME_SCALE);
        if player.vel.x.abs() < VELOCITY_EPSILON {
            player.vel.x = 0.0;
        }
    }

    log::trace!(
        "step dt={dt} pos={:?} vel={:?} grounded={}",
        player.pos,
        player.vel,
        player.grounded
    );
    None
}

/// Apply hazard and goal contacts
fn terminal(player: &mut Player, contact: Contact) -> Option<SimEvent> {
    match contact {
        Contact::Hazard => {
            log::info!("Player hit a hazard at {:?}, respawning", player.pos);
            player.respawn();
            Some(SimEvent::Death)
        }
        Contact::Goal => {
            log::info!("Player reached the goal at {:?}", player.pos);
            Some(SimEvent::Win)
        }
        Contact::Solid | Contact::Clear => None,
    }
}

//! Deterministic platformer simulation
//!
//! All play-mode logic lives here. This module must stay pure:
//! - The grid is only ever borrowed immutably
//! - Input is a sampled snapshot, never read from the platform directly
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Axis, Contact, Hit, edge_cells, probe, sweep};
pub use input::{Action, KeyBindings, KeySet, TickInput};
pub use state::{Facing, Player, SimEvent};
pub use tick::step;

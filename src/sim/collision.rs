//! Tile collision sensors
//!
//! The player is a `TILE_PIXELS` square. Collisions are found by probing the
//! pair of cells under one edge of that square ("sensors"), inset by a pixel
//! on the perpendicular axis so that standing exactly on a cell boundary does
//! not register the neighbouring column or row.
//!
//! Moves are swept: every row or column the leading edge enters is probed in
//! order, so a long step cannot skip over a cell.

use crate::consts::TILE_PIXELS;
use crate::map::{TileGrid, TileKind};

/// Axis of motion being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// What a sensor pair touched, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Contact {
    Clear,
    Solid,
    Goal,
    Hazard,
}

/// A blocking or terminal contact found by a sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub contact: Contact,
    /// Position along the swept axis that leaves the box flush with the cell
    pub snap: f32,
}

/// Cell index containing a pixel coordinate
#[inline]
fn cell(coord: f32) -> i64 {
    (coord / TILE_PIXELS).floor() as i64
}

/// Cell holding the far (right/bottom) edge of a box starting at `coord`
#[inline]
fn far_cell(coord: f32) -> i64 {
    ((coord + TILE_PIXELS) / TILE_PIXELS).ceil() as i64 - 1
}

/// The two cells spanned by a box edge, inset one pixel at each end
pub fn edge_cells(coord: f32) -> (i64, i64) {
    (cell(coord + 1.0), cell(coord + TILE_PIXELS - 1.0))
}

/// Classify the two cells of a sensor pair
pub fn probe(grid: &TileGrid, a: (i64, i64), b: (i64, i64)) -> Contact {
    let contact_of = |kind: TileKind| match kind {
        TileKind::Hazard => Contact::Hazard,
        TileKind::End => Contact::Goal,
        k if k.is_collision() => Contact::Solid,
        _ => Contact::Clear,
    };
    contact_of(grid.kind_at(a.0, a.1)).max(contact_of(grid.kind_at(b.0, b.1)))
}

/// Sweep the box along `axis` from `from` to `to`
///
/// `cross` is the box position on the other axis. Returns the first row or
/// column entered whose sensors touch anything but clear cells.
pub fn sweep(grid: &TileGrid, axis: Axis, cross: f32, from: f32, to: f32) -> Option<Hit> {
    let (a, b) = edge_cells(cross);
    let probe_line = |line: i64| match axis {
        Axis::Vertical => probe(grid, (a, line), (b, line)),
        Axis::Horizontal => probe(grid, (line, a), (line, b)),
    };
    let hit = |line: i64, snap: f32| {
        let contact = probe_line(line);
        (contact != Contact::Clear).then_some(Hit { contact, snap })
    };

    if to > from {
        (far_cell(from) + 1..=far_cell(to))
            .find_map(|line| hit(line, line as f32 * TILE_PIXELS - TILE_PIXELS))
    } else {
        (cell(to)..cell(from))
            .rev()
            .find_map(|line| hit(line, (line + 1) as f32 * TILE_PIXELS))
    }
}

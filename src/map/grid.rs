//! Tile grid storage, addressing and resize
//!
//! Cells are stored row-major with the origin at the top-left cell. The map is
//! anchored to its bottom-left corner: growing the height adds pages above the
//! existing content, growing the width adds pages to the right.

use std::fmt;

use glam::Vec2;

use super::tile::{self, EMPTY, END, ERASER, GRASS, START, TileKind};
use crate::consts::*;

/// Rejected grid writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Coordinate lies outside the current map
    OutOfBounds { x: usize, y: usize },
    /// Value is not a palette tile or empty
    InvalidTile(i32),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds { x, y } => write!(f, "cell ({x}, {y}) is outside the map"),
            GridError::InvalidTile(value) => write!(f, "{value} is not a tile value"),
        }
    }
}

impl std::error::Error for GridError {}

/// The whole map: `width × height` pages of `TILES_PER_PAGE²` cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    /// Committed width in pages
    width: usize,
    /// Committed height in pages
    height: usize,
    cells: Vec<i32>,
}

impl TileGrid {
    /// Create an empty map
    pub fn new(width: usize, height: usize) -> Self {
        let cells = vec![EMPTY; width * TILES_PER_PAGE * height * TILES_PER_PAGE];
        Self {
            width,
            height,
            cells,
        }
    }

    /// The 1×1 map the editor opens with: a grass floor, a start marker on
    /// the left and an end marker on the right
    pub fn with_default_layout() -> Self {
        let mut grid = Self::new(1, 1);
        let floor = grid.rows() - 1;
        for x in 0..grid.columns() {
            grid.cells[floor * TILES_PER_PAGE + x] = GRASS;
        }
        grid.cells[(floor - 1) * TILES_PER_PAGE] = START;
        grid.cells[(floor - 1) * TILES_PER_PAGE + TILES_PER_PAGE - 1] = END;
        grid
    }

    /// Width in pages
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pages
    pub fn height(&self) -> usize {
        self.height
    }

    /// Width in cells
    pub fn columns(&self) -> usize {
        self.width * TILES_PER_PAGE
    }

    /// Height in cells
    pub fn rows(&self) -> usize {
        self.height * TILES_PER_PAGE
    }

    pub fn pixel_width(&self) -> f32 {
        self.columns() as f32 * TILE_PIXELS
    }

    pub fn pixel_height(&self) -> f32 {
        self.rows() as f32 * TILE_PIXELS
    }

    /// Raw row-major cell buffer
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.columns() && y < self.rows()).then(|| y * self.columns() + x)
    }

    /// Cell value at a tile coordinate, `None` outside the map
    pub fn read_cell(&self, x: usize, y: usize) -> Option<i32> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Classification of a cell; anything outside the map reads as empty
    pub fn kind_at(&self, x: i64, y: i64) -> TileKind {
        if x < 0 || y < 0 {
            return TileKind::Empty;
        }
        self.read_cell(x as usize, y as usize)
            .map(TileKind::of)
            .unwrap_or(TileKind::Empty)
    }

    /// Write a single cell
    ///
    /// The eraser stores an empty cell. Placing a start or end marker moves
    /// it: any previous marker of the same kind is cleared first.
    pub fn write_cell(&mut self, x: usize, y: usize, value: i32) -> Result<(), GridError> {
        if !tile::is_valid_value(value) {
            return Err(GridError::InvalidTile(value));
        }
        let index = self.index(x, y).ok_or(GridError::OutOfBounds { x, y })?;
        let value = if value == ERASER { EMPTY } else { value };

        if TileKind::of(value).is_marker() {
            for cell in self.cells.iter_mut().filter(|c| **c == value) {
                *cell = EMPTY;
            }
        }
        self.cells[index] = value;
        Ok(())
    }

    /// First cell holding `value`, scanning row by row
    pub fn find(&self, value: i32) -> Option<(usize, usize)> {
        let columns = self.columns();
        self.cells
            .iter()
            .position(|&c| c == value)
            .map(|i| (i % columns, i / columns))
    }

    pub fn has_end_marker(&self) -> bool {
        self.find(END).is_some()
    }

    /// Pixel position of the start marker, or the origin without one
    pub fn spawn_point(&self) -> Vec2 {
        self.find(START)
            .map(|(x, y)| Vec2::new(x as f32 * TILE_PIXELS, y as f32 * TILE_PIXELS))
            .unwrap_or(Vec2::ZERO)
    }

    /// Cells of a single page, row-major
    pub fn page_cells(&self, page_x: usize, page_y: usize) -> Option<Vec<i32>> {
        if page_x >= self.width || page_y >= self.height {
            return None;
        }
        let columns = self.columns();
        let left = page_x * TILES_PER_PAGE;
        let top = page_y * TILES_PER_PAGE;
        let mut page = Vec::with_capacity(TILES_PER_PAGE * TILES_PER_PAGE);
        for y in top..top + TILES_PER_PAGE {
            let start = y * columns + left;
            page.extend_from_slice(&self.cells[start..start + TILES_PER_PAGE]);
        }
        Some(page)
    }

    /// Change the map size in pages, keeping painted content in place
    ///
    /// Rows are matched from the bottom (height changes add or drop pages at
    /// the top) and columns from the left (width changes add or drop pages at
    /// the right). The buffer is rebuilt rather than spliced, so the height
    /// and width adjustments are independent of each other. Sizes are assumed
    /// to be already clamped by the caller.
    pub fn resize(&mut self, width: usize, height: usize) {
        debug_assert!(width >= MIN_MAP_PAGES && height >= MIN_MAP_PAGES);
        if width == self.width && height == self.height {
            return;
        }

        let old_columns = self.columns();
        let old_rows = self.rows();
        let new_columns = width * TILES_PER_PAGE;
        let new_rows = height * TILES_PER_PAGE;
        let kept_columns = old_columns.min(new_columns);

        let mut cells = vec![EMPTY; new_columns * new_rows];
        for new_y in 0..new_rows {
            let depth = new_rows - 1 - new_y;
            if depth >= old_rows {
                // Page added above the old map
                continue;
            }
            let old_y = old_rows - 1 - depth;
            let src = old_y * old_columns;
            let dst = new_y * new_columns;
            cells[dst..dst + kept_columns].copy_from_slice(&self.cells[src..src + kept_columns]);
        }

        log::info!(
            "Map resized {}x{} -> {}x{} pages",
            self.width,
            self.height,
            width,
            height
        );

        self.cells = cells;
        self.width = width;
        self.height = height;
        debug_assert_eq!(self.cells.len(), self.columns() * self.rows());
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::with_default_layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::tile::{BRICK, DIRT, HAZARD, STONE};
    use proptest::prelude::*;

    const T: usize = TILES_PER_PAGE;

    /// Value at a bottom-anchored coordinate (`depth` rows above the bottom)
    fn anchored(grid: &TileGrid, x: usize, depth: usize) -> Option<i32> {
        if depth >= grid.rows() {
            return None;
        }
        grid.read_cell(x, grid.rows() - 1 - depth)
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = TileGrid::new(2, 3);
        assert_eq!(grid.columns(), 16);
        assert_eq!(grid.rows(), 24);
        assert_eq!(grid.cells().len(), 16 * 24);
        assert!(grid.cells().iter().all(|&c| c == EMPTY));
    }

    #[test]
    fn test_default_layout() {
        let grid = TileGrid::with_default_layout();
        assert_eq!((grid.width(), grid.height()), (1, 1));
        assert_eq!(grid.find(START), Some((0, 6)));
        assert_eq!(grid.find(END), Some((7, 6)));
        assert!((0..T).all(|x| grid.read_cell(x, 7) == Some(GRASS)));
    }

    #[test]
    fn test_read_write_bounds() {
        let mut grid = TileGrid::new(1, 1);
        assert_eq!(grid.write_cell(3, 4, STONE), Ok(()));
        assert_eq!(grid.read_cell(3, 4), Some(STONE));
        assert_eq!(grid.read_cell(8, 0), None);
        assert_eq!(grid.read_cell(0, 8), None);
        assert_eq!(
            grid.write_cell(8, 0, STONE),
            Err(GridError::OutOfBounds { x: 8, y: 0 })
        );
        assert_eq!(grid.write_cell(0, 0, 42), Err(GridError::InvalidTile(42)));
        assert_eq!(grid.kind_at(-1, 0), TileKind::Empty);
    }

    #[test]
    fn test_eraser_stores_empty() {
        let mut grid = TileGrid::new(1, 1);
        grid.write_cell(2, 2, DIRT).unwrap();
        grid.write_cell(2, 2, ERASER).unwrap();
        assert_eq!(grid.read_cell(2, 2), Some(EMPTY));
        assert!(!grid.cells().contains(&ERASER));
    }

    #[test]
    fn test_markers_are_placed_not_added() {
        let mut grid = TileGrid::new(1, 1);
        grid.write_cell(1, 1, START).unwrap();
        grid.write_cell(5, 3, START).unwrap();
        grid.write_cell(0, 0, END).unwrap();
        grid.write_cell(7, 7, END).unwrap();

        assert_eq!(grid.cells().iter().filter(|&&c| c == START).count(), 1);
        assert_eq!(grid.cells().iter().filter(|&&c| c == END).count(), 1);
        assert_eq!(grid.find(START), Some((5, 3)));
        assert_eq!(grid.find(END), Some((7, 7)));
        assert_eq!(grid.read_cell(1, 1), Some(EMPTY));
    }

    #[test]
    fn test_spawn_point() {
        let mut grid = TileGrid::new(1, 1);
        assert_eq!(grid.spawn_point(), Vec2::ZERO);

        grid.write_cell(4, 7, START).unwrap();
        grid.write_cell(0, 0, BRICK).unwrap();
        assert_eq!(grid.spawn_point(), Vec2::new(128.0, 224.0));
    }

    #[test]
    fn test_page_cells() {
        let mut grid = TileGrid::new(2, 2);
        grid.write_cell(9, 10, HAZARD).unwrap();
        let page = grid.page_cells(1, 1).unwrap();
        assert_eq!(page.len(), T * T);
        assert_eq!(page[2 * T + 1], HAZARD);
        assert!(grid.page_cells(2, 0).is_none());
    }

    #[test]
    fn test_grow_height_adds_pages_above() {
        let mut grid = TileGrid::with_default_layout();
        let before = grid.clone();
        grid.resize(1, 2);

        assert_eq!(grid.cells().len(), T * 2 * T);
        assert!(grid.cells()[..T * T].iter().all(|&c| c == EMPTY));
        assert_eq!(&grid.cells()[T * T..], before.cells());
        assert_eq!(grid.find(START), Some((0, 14)));
    }

    #[test]
    fn test_shrink_height_drops_top_pages() {
        let mut grid = TileGrid::new(1, 2);
        grid.write_cell(0, 0, STONE).unwrap();
        grid.write_cell(1, 12, DIRT).unwrap();
        grid.resize(1, 1);

        assert_eq!(grid.cells().len(), T * T);
        assert!(!grid.cells().contains(&STONE));
        assert_eq!(grid.read_cell(1, 4), Some(DIRT));
    }

    #[test]
    fn test_grow_width_pads_each_row() {
        let mut grid = TileGrid::with_default_layout();
        grid.resize(2, 1);

        assert_eq!(grid.columns(), 2 * T);
        for y in 0..T {
            assert!((T..2 * T).all(|x| grid.read_cell(x, y) == Some(EMPTY)));
        }
        assert!((0..T).all(|x| grid.read_cell(x, 7) == Some(GRASS)));
        assert_eq!(grid.find(END), Some((7, 6)));
    }

    #[test]
    fn test_shrink_width_trims_each_row() {
        let mut grid = TileGrid::new(3, 1);
        grid.write_cell(2, 3, BRICK).unwrap();
        grid.write_cell(20, 3, STONE).unwrap();
        grid.resize(1, 1);

        assert_eq!(grid.cells().len(), T * T);
        assert_eq!(grid.read_cell(2, 3), Some(BRICK));
        assert!(!grid.cells().contains(&STONE));
    }

    #[test]
    fn test_resize_both_axes() {
        let mut grid = TileGrid::new(2, 2);
        grid.write_cell(3, 15, DIRT).unwrap();
        grid.write_cell(12, 2, STONE).unwrap();
        grid.resize(4, 1);

        assert_eq!(grid.cells().len(), 4 * T * T);
        assert_eq!(grid.read_cell(3, 7), Some(DIRT));
        assert!(!grid.cells().contains(&STONE));

        grid.resize(2, 2);
        assert_eq!(grid.read_cell(3, 15), Some(DIRT));
        assert_eq!(grid.read_cell(12, 2), Some(EMPTY));
    }

    #[test]
    fn test_resize_to_same_size_is_noop() {
        let mut grid = TileGrid::with_default_layout();
        let before = grid.clone();
        grid.resize(1, 1);
        assert_eq!(grid, before);
    }

    fn arb_size() -> impl Strategy<Value = (usize, usize)> {
        (MIN_MAP_PAGES..=MAX_MAP_WIDTH, MIN_MAP_PAGES..=MAX_MAP_HEIGHT)
    }

    proptest! {
        #[test]
        fn prop_resize_keeps_length_invariant(sizes in proptest::collection::vec(arb_size(), 1..12)) {
            let mut grid = TileGrid::with_default_layout();
            for (w, h) in sizes {
                grid.resize(w, h);
                prop_assert_eq!(grid.cells().len(), w * T * h * T);
                prop_assert_eq!((grid.width(), grid.height()), (w, h));
            }
        }

        #[test]
        fn prop_resize_round_trip_restores_surviving_cells(
            start in arb_size(),
            sizes in proptest::collection::vec(arb_size(), 1..8),
            paint in proptest::collection::vec((0usize..MAX_MAP_WIDTH * T, 0usize..MAX_MAP_HEIGHT * T, DIRT..=BRICK), 1..40),
        ) {
            let mut grid = TileGrid::new(start.0, start.1);
            for &(x, y, value) in &paint {
                let _ = grid.write_cell(x % grid.columns(), y % grid.rows(), value);
            }
            let original = grid.clone();

            let min_columns = sizes.iter().map(|s| s.0).chain([start.0]).min().unwrap_or(1) * T;
            let min_rows = sizes.iter().map(|s| s.1).chain([start.1]).min().unwrap_or(1) * T;

            for &(w, h) in &sizes {
                grid.resize(w, h);
            }
            grid.resize(start.0, start.1);

            for x in 0..original.columns() {
                for depth in 0..original.rows() {
                    let expected = anchored(&original, x, depth);
                    let actual = anchored(&grid, x, depth);
                    if x < min_columns && depth < min_rows {
                        prop_assert_eq!(actual, expected);
                    } else {
                        prop_assert_eq!(actual, Some(EMPTY));
                    }
                }
            }
        }
    }
}

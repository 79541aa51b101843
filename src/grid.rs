//! Grid model for hexzoe.
//!
//! Owns the tile array of one level:
//! - Offset-hex coordinates and neighbourhoods
//! - Tile content, action markers, and exploration flags
//! - Procedural level generation with a guaranteed border route

mod coord;
mod generate;
mod tile;

pub use coord::Coord;
pub use generate::{blocked_count, energy_count, guaranteed_path, water_count, ZOE_COORD};
pub use tile::{Effect, Tile, TileState, TileType};

use serde::{Deserialize, Serialize};

use crate::config::Dimensions;

/// The tile grid of a single level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Number of rows.
    rows: u8,
    /// Number of columns.
    cols: u8,
    /// Tiles stored in row-major order.
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create a grid of normal, unexplored tiles.
    #[must_use]
    pub fn new(dims: Dimensions) -> Self {
        let size = usize::from(dims.rows()) * usize::from(dims.cols());
        Self {
            rows: dims.rows(),
            cols: dims.cols(),
            tiles: vec![Tile::normal(); size],
        }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Where the character starts every level.
    #[must_use]
    pub const fn start(&self) -> Coord {
        Coord::new(0, 0)
    }

    /// Where the goal always sits.
    #[must_use]
    pub const fn goal(&self) -> Coord {
        Coord::new(self.rows - 1, self.cols - 1)
    }

    /// Raw tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Check if a coordinate is within the grid.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(usize::from(coord.row) * usize::from(self.cols) + usize::from(coord.col))
        } else {
            None
        }
    }

    /// Get a reference to the tile at the given coordinate.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<&Tile> {
        self.index(coord).map(|idx| &self.tiles[idx])
    }

    /// Get a mutable reference to the tile at the given coordinate.
    #[must_use]
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        self.index(coord).map(|idx| &mut self.tiles[idx])
    }

    /// Content type at a coordinate, if in bounds.
    #[must_use]
    pub fn tile_type(&self, coord: Coord) -> Option<TileType> {
        self.get(coord).map(|t| t.tile_type)
    }

    /// Replace the content type at a coordinate.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set_type(&mut self, coord: Coord, tile_type: TileType) -> bool {
        if let Some(tile) = self.get_mut(coord) {
            tile.tile_type = tile_type;
            true
        } else {
            false
        }
    }

    /// Six-neighbour hex adjacency, clipped to the grid.
    #[must_use]
    pub fn adjacent(&self, coord: Coord) -> Vec<Coord> {
        coord.adjacent(self.rows, self.cols)
    }

    /// Every coordinate within `radius` (Chebyshev approximation).
    #[must_use]
    pub fn tiles_in_range(&self, coord: Coord, radius: u8) -> Vec<Coord> {
        coord.within(radius, self.rows, self.cols)
    }

    /// Iterate over all coordinates and tiles.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Tile)> {
        let cols = usize::from(self.cols);
        self.tiles.iter().enumerate().map(move |(idx, tile)| (from_index(idx, cols), tile))
    }

    /// Count tiles of a given type.
    #[must_use]
    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles.iter().filter(|t| t.tile_type == tile_type).count()
    }

    /// First coordinate holding a tile of the given type.
    #[must_use]
    pub fn find(&self, tile_type: TileType) -> Option<Coord> {
        self.iter()
            .find(|(_, tile)| tile.tile_type == tile_type)
            .map(|(coord, _)| coord)
    }

    /// Count explored tiles.
    #[must_use]
    pub fn explored_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.explored).count()
    }

    /// Plain-text picture of the grid, one glyph per tile.
    ///
    /// Odd rows are indented by one space so the hex offset reads naturally.
    /// With `reveal_all` false, unexplored tiles print as `?`.
    #[must_use]
    pub fn render_text(&self, reveal_all: bool) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            if row % 2 == 1 {
                out.push(' ');
            }
            for col in 0..self.cols {
                let glyph = self
                    .get(Coord::new(row, col))
                    .map_or(' ', |t| if reveal_all || t.explored { t.tile_type.glyph() } else { '?' });
                out.push(glyph);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_index(idx: usize, cols: usize) -> Coord {
    // Dimensions are capped at 20, so both fit a u8.
    Coord::new((idx / cols) as u8, (idx % cols) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(rows: u32, cols: u32) -> Dimensions {
        Dimensions::new(rows, cols).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(dims(4, 6));
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 6);
        assert_eq!(grid.tiles().len(), 24);
        assert_eq!(grid.count(TileType::Normal), 24);
        assert_eq!(grid.goal(), Coord::new(3, 5));
    }

    #[test]
    fn test_grid_get_set() {
        let mut grid = Grid::new(dims(5, 5));
        let coord = Coord::new(1, 3);

        assert_eq!(grid.tile_type(coord), Some(TileType::Normal));
        assert!(grid.set_type(coord, TileType::Water));
        assert_eq!(grid.tile_type(coord), Some(TileType::Water));
        assert_eq!(grid.find(TileType::Water), Some(coord));

        assert!(!grid.set_type(Coord::new(5, 0), TileType::Water));
    }

    #[test]
    fn test_grid_bounds() {
        let grid = Grid::new(dims(3, 4));
        assert!(grid.in_bounds(Coord::new(0, 0)));
        assert!(grid.in_bounds(Coord::new(2, 3)));
        assert!(!grid.in_bounds(Coord::new(3, 0)));
        assert!(!grid.in_bounds(Coord::new(0, 4)));
        assert!(grid.get(Coord::new(3, 3)).is_none());
    }

    #[test]
    fn test_iter_coordinates_are_row_major() {
        let grid = Grid::new(dims(3, 4));
        let coords: Vec<Coord> = grid.iter().map(|(c, _)| c).collect();
        assert_eq!(coords[0], Coord::new(0, 0));
        assert_eq!(coords[5], Coord::new(1, 1));
        assert_eq!(coords[11], Coord::new(2, 3));
    }

    #[test]
    fn test_render_text_hides_unexplored() {
        let mut grid = Grid::new(dims(3, 3));
        if let Some(tile) = grid.get_mut(Coord::new(0, 0)) {
            tile.explored = true;
        }
        let hidden = grid.render_text(false);
        let first_line = hidden.lines().next().unwrap();
        assert_eq!(first_line, ". ? ? ");
        assert!(hidden.lines().nth(1).unwrap().starts_with(' '));

        let shown = grid.render_text(true);
        assert!(!shown.contains('?'));
    }
}

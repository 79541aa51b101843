//! Grid coordinates and offset-hex neighbourhoods.

use serde::{Deserialize, Serialize};

/// A coordinate on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Row index (0 is the top row).
    pub row: u8,
    /// Column index (0 is the left column).
    pub col: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Get the six hex neighbours of this coordinate, clipped to `rows × cols`.
    ///
    /// Rows are offset: even rows lean left, so their diagonal neighbours sit in
    /// columns `col - 1` and `col`; odd rows lean right and use `col` and
    /// `col + 1`.
    #[must_use]
    pub fn adjacent(&self, rows: u8, cols: u8) -> Vec<Coord> {
        let row = i16::from(self.row);
        let col = i16::from(self.col);
        let lean = if self.row % 2 == 0 { -1 } else { 1 };

        let offsets = [
            (0, -1),
            (0, 1),
            (-1, 0),
            (-1, lean),
            (1, 0),
            (1, lean),
        ];

        offsets
            .iter()
            .filter_map(|&(dr, dc)| clip(row + dr, col + dc, rows, cols))
            .collect()
    }

    /// Get every coordinate within `radius` of this one, inclusive of itself.
    ///
    /// Distance is the Chebyshev approximation `max(|Δrow|, |Δcol|)` over the
    /// bounding box, not true hex distance. Vision and action highlighting both
    /// rely on this exact shape.
    #[must_use]
    pub fn within(&self, radius: u8, rows: u8, cols: u8) -> Vec<Coord> {
        let row_lo = self.row.saturating_sub(radius);
        let row_hi = self.row.saturating_add(radius).min(rows.saturating_sub(1));
        let col_lo = self.col.saturating_sub(radius);
        let col_hi = self.col.saturating_add(radius).min(cols.saturating_sub(1));

        (row_lo..=row_hi)
            .flat_map(|r| (col_lo..=col_hi).map(move |c| Coord::new(r, c)))
            .filter(|c| self.chebyshev(*c) <= radius)
            .collect()
    }

    /// Chebyshev distance to another coordinate.
    #[must_use]
    pub fn chebyshev(&self, other: Coord) -> u8 {
        self.row.abs_diff(other.row).max(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

fn clip(row: i16, col: i16, rows: u8, cols: u8) -> Option<Coord> {
    if row < 0 || col < 0 || row >= i16::from(rows) || col >= i16::from(cols) {
        return None;
    }
    let row = u8::try_from(row).ok()?;
    let col = u8::try_from(col).ok()?;
    Some(Coord::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_even_row() {
        let adj = Coord::new(2, 2).adjacent(5, 5);
        assert_eq!(adj.len(), 6);
        assert!(adj.contains(&Coord::new(2, 1)));
        assert!(adj.contains(&Coord::new(2, 3)));
        assert!(adj.contains(&Coord::new(1, 1)));
        assert!(adj.contains(&Coord::new(1, 2)));
        assert!(adj.contains(&Coord::new(3, 1)));
        assert!(adj.contains(&Coord::new(3, 2)));
        assert!(!adj.contains(&Coord::new(1, 3)));
    }

    #[test]
    fn test_adjacent_odd_row() {
        let adj = Coord::new(1, 2).adjacent(5, 5);
        assert_eq!(adj.len(), 6);
        assert!(adj.contains(&Coord::new(0, 2)));
        assert!(adj.contains(&Coord::new(0, 3)));
        assert!(adj.contains(&Coord::new(2, 2)));
        assert!(adj.contains(&Coord::new(2, 3)));
        assert!(!adj.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn test_adjacent_corner() {
        let adj = Coord::new(0, 0).adjacent(5, 5);
        assert_eq!(adj.len(), 2);
        assert!(adj.contains(&Coord::new(0, 1)));
        assert!(adj.contains(&Coord::new(1, 0)));

        let adj = Coord::new(4, 4).adjacent(5, 5);
        assert!(adj.contains(&Coord::new(4, 3)));
        assert!(adj.contains(&Coord::new(3, 3)));
        assert!(adj.contains(&Coord::new(3, 4)));
        assert_eq!(adj.len(), 3);
    }

    #[test]
    fn test_within_is_chebyshev_box() {
        let near = Coord::new(2, 2).within(1, 5, 5);
        assert_eq!(near.len(), 9);
        assert!(near.contains(&Coord::new(1, 3)));

        let clipped = Coord::new(0, 0).within(2, 5, 5);
        assert_eq!(clipped.len(), 9);

        let only_self = Coord::new(3, 3).within(0, 5, 5);
        assert_eq!(only_self, vec![Coord::new(3, 3)]);
    }
}

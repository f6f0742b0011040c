use crate::types::ItemSpec;
use fixedbitset::FixedBitSet;

/// Occupancy map of a discretized sheet, one bit per cell in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: FixedBitSet,
}

impl Grid {
    /// Creates an empty grid. Sheet extents are bounded by
    /// [`SearchConfig::validate`](crate::config::SearchConfig::validate).
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: FixedBitSet::with_capacity(rows.saturating_mul(cols)),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cells.contains(self.index(row, col))
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.count_ones(..)
    }

    /// Returns true if the `ceil(length) x ceil(width)` footprint anchored at
    /// `(x, y)` lies inside the grid and covers only free cells.
    pub fn can_place(&self, item: ItemSpec, x: usize, y: usize) -> bool {
        let (Some(x_end), Some(y_end)) = (x.checked_add(item.rows()), y.checked_add(item.cols()))
        else {
            return false;
        };
        if x_end > self.rows || y_end > self.cols {
            return false;
        }
        (x..x_end).all(|row| (y..y_end).all(|col| !self.is_occupied(row, col)))
    }

    /// Returns a copy of this grid with the item's footprint at `(x, y)` occupied.
    ///
    /// The caller must have checked [`Grid::can_place`] for the same arguments.
    pub fn place(&self, item: ItemSpec, x: usize, y: usize) -> Grid {
        let mut next = self.clone();
        for row in x..x + item.rows() {
            let start = next.index(row, y);
            next.cells.insert_range(start..start + item.cols());
        }
        next
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.rows {
            let line: String = (0..self.cols)
                .map(|col| if self.is_occupied(row, col) { '#' } else { '.' })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_accepts_fitting_item() {
        let grid = Grid::new(3, 4);
        assert!(grid.can_place(ItemSpec::new(3.0, 4.0), 0, 0));
        assert!(grid.can_place(ItemSpec::new(1.0, 1.0), 2, 3));
        assert_eq!(grid.occupied_cells(), 0);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let grid = Grid::new(3, 4);
        assert!(!grid.can_place(ItemSpec::new(2.0, 1.0), 2, 0));
        assert!(!grid.can_place(ItemSpec::new(1.0, 2.0), 0, 3));
        assert!(!grid.can_place(ItemSpec::new(4.0, 1.0), 0, 0));
        assert!(!grid.can_place(ItemSpec::new(1.0, 1.0), 3, 0));
    }

    #[test]
    fn test_fractional_item_covers_rounded_footprint() {
        let grid = Grid::new(2, 2);
        // 1.2 rounds up to 2 cells
        assert!(!grid.can_place(ItemSpec::new(1.2, 1.0), 1, 0));
        let placed = grid.place(ItemSpec::new(1.2, 0.3), 0, 0);
        assert!(placed.is_occupied(0, 0));
        assert!(placed.is_occupied(1, 0));
        assert!(!placed.is_occupied(0, 1));
        assert_eq!(placed.occupied_cells(), 2);
    }

    #[test]
    fn test_place_leaves_parent_untouched() {
        let grid = Grid::new(2, 2);
        let placed = grid.place(ItemSpec::new(1.0, 2.0), 1, 0);
        assert_eq!(grid.occupied_cells(), 0);
        assert_eq!(placed.occupied_cells(), 2);
        assert!(placed.is_occupied(1, 0));
        assert!(placed.is_occupied(1, 1));
    }

    #[test]
    fn test_occupied_cells_block_placement() {
        let grid = Grid::new(3, 3).place(ItemSpec::new(1.0, 1.0), 1, 1);
        assert!(!grid.can_place(ItemSpec::new(2.0, 2.0), 0, 0));
        assert!(!grid.can_place(ItemSpec::new(1.0, 1.0), 1, 1));
        assert!(grid.can_place(ItemSpec::new(1.0, 3.0), 0, 0));
        assert!(grid.can_place(ItemSpec::new(3.0, 1.0), 0, 2));
    }

    #[test]
    fn test_can_place_is_idempotent() {
        let grid = Grid::new(4, 4).place(ItemSpec::new(2.0, 2.0), 0, 0);
        let before = grid.clone();
        let item = ItemSpec::new(2.0, 2.0);
        let first = grid.can_place(item, 1, 1);
        for _ in 0..3 {
            assert_eq!(grid.can_place(item, 1, 1), first);
        }
        assert_eq!(grid, before);
    }

    #[test]
    fn test_zero_extent_grid_rejects_everything() {
        let grid = Grid::new(0, 5);
        assert!(!grid.can_place(ItemSpec::new(1.0, 1.0), 0, 0));
        assert_eq!(grid.to_string(), "");
    }

    #[test]
    fn test_grid_spanning_several_words() {
        let grid = Grid::new(9, 9).place(ItemSpec::new(1.0, 1.0), 8, 8);
        assert!(grid.is_occupied(8, 8));
        assert_eq!(grid.occupied_cells(), 1);
        assert!(!grid.can_place(ItemSpec::new(2.0, 2.0), 7, 7));
    }

    #[test]
    fn test_place_marks_only_footprint() {
        let grid = Grid::new(5, 7).place(ItemSpec::new(2.0, 3.0), 2, 3);
        assert_eq!(grid.occupied_cells(), 6);
        for row in 0..5 {
            for col in 0..7 {
                let inside = (2..4).contains(&row) && (3..6).contains(&col);
                assert_eq!(grid.is_occupied(row, col), inside, "cell ({row}, {col})");
            }
        }
    }

    #[test]
    fn test_display() {
        let grid = Grid::new(2, 3).place(ItemSpec::new(1.0, 2.0), 0, 1);
        assert_eq!(grid.to_string(), ".##\n...\n");
    }
}

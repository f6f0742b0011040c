use crate::grid::Grid;
use crate::types::{ItemSpec, Placement};

/// One node of the search tree: a grid snapshot and the placements that produced it.
///
/// Records are never mutated after construction; a child owns its own copy of the grid.
#[derive(Debug, Clone)]
pub struct PlacementRecord {
    grid: Grid,
    placements: Vec<Placement>,
}

impl PlacementRecord {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            placements: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn items_placed(&self) -> usize {
        self.placements.len()
    }

    /// Builds the child record with `item` placed at `(x, y)`.
    ///
    /// The caller must have checked that the placement is feasible on this record's grid.
    pub fn child(&self, item: ItemSpec, x: usize, y: usize) -> Self {
        let mut placements = Vec::with_capacity(self.placements.len() + 1);
        placements.extend_from_slice(&self.placements);
        placements.push(Placement::new(item, x, y));
        Self {
            grid: self.grid.place(item, x, y),
            placements,
        }
    }

    pub fn into_placements(self) -> Vec<Placement> {
        self.placements
    }
}

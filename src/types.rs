use serde::{Deserialize, Serialize};

/// Rounds a positive dimension up to whole grid cells.
pub fn cells(dimension: f64) -> usize {
    dimension.ceil() as usize
}

/// The sheet items are packed onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub length: f64,
    pub width: f64,
}

impl Sheet {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Grid rows, `ceil(length)`.
    pub fn rows(&self) -> usize {
        cells(self.length)
    }

    /// Grid columns, `ceil(width)`.
    pub fn cols(&self) -> usize {
        cells(self.width)
    }
}

impl std::fmt::Display for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// An item size. Every spec is available in unlimited quantity and is never rotated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemSpec {
    pub length: f64,
    pub width: f64,
}

impl ItemSpec {
    pub fn new(length: f64, width: f64) -> Self {
        Self { length, width }
    }

    /// Whole cells covered along the sheet length.
    pub fn rows(&self) -> usize {
        cells(self.length)
    }

    /// Whole cells covered along the sheet width.
    pub fn cols(&self) -> usize {
        cells(self.width)
    }
}

impl std::fmt::Display for ItemSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.length, self.width)
    }
}

/// A placed item: the rectangle `((x, y), (x + length, y + width))` in grid
/// coordinates, where `x` is the row and `y` the column of its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub length: f64,
    pub width: f64,
}

impl Placement {
    pub fn new(item: ItemSpec, x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            length: item.length,
            width: item.width,
        }
    }

    pub fn item(&self) -> ItemSpec {
        ItemSpec::new(self.length, self.width)
    }

    pub fn start(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    pub fn end(&self) -> (f64, f64) {
        (self.x as f64 + self.length, self.y as f64 + self.width)
    }

    /// Exclusive end of the occupied cells, `(x + ceil(length), y + ceil(width))`.
    pub fn cell_end(&self) -> (usize, usize) {
        (self.x + cells(self.length), self.y + cells(self.width))
    }

    pub fn overlaps(&self, other: &Placement) -> bool {
        let (a_x_end, a_y_end) = self.cell_end();
        let (b_x_end, b_y_end) = other.cell_end();
        self.x < b_x_end && other.x < a_x_end && self.y < b_y_end && other.y < a_y_end
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (x2, y2) = self.end();
        write!(f, "(({}, {}), ({}, {}))", self.x, self.y, x2, y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_dimensions_round_up() {
        let sheet = Sheet::new(2.1, 3.0);
        assert_eq!(sheet.rows(), 3);
        assert_eq!(sheet.cols(), 3);

        let item = ItemSpec::new(0.5, 1.5);
        assert_eq!(item.rows(), 1);
        assert_eq!(item.cols(), 2);
    }

    #[test]
    fn test_placement_corners() {
        let p = Placement::new(ItemSpec::new(1.5, 2.0), 1, 3);
        assert_eq!(p.start(), (1, 3));
        assert_eq!(p.end(), (2.5, 5.0));
        assert_eq!(p.cell_end(), (3, 5));
        assert_eq!(p.to_string(), "((1, 3), (2.5, 5))");
    }

    #[test]
    fn test_overlap_uses_rounded_footprint() {
        let a = Placement::new(ItemSpec::new(1.5, 1.0), 0, 0);
        let b = Placement::new(ItemSpec::new(1.0, 1.0), 1, 0);
        let c = Placement::new(ItemSpec::new(1.0, 1.0), 2, 0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }
}

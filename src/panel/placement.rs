use crate::math::{Point2, Vector2};

/// Rotation applied to a board in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    /// No rotation.
    None,
    /// Rotated by 180 degrees.
    Half,
}

impl Rotation {
    /// Rotation angle in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        match self {
            Self::None => 0.0,
            Self::Half => 180.0,
        }
    }
}

/// Strategy placing boards on a regular grid.
///
/// Positions are relative to the top-left board: grid coordinates
/// `(0, 0)` map to the origin.
pub trait GridPlacer {
    /// Physical position of the board at `(row, col)` given the size of a
    /// single board.
    fn position(&self, row: usize, col: usize, board_size: Vector2) -> Point2;

    /// Orientation of the board at `(row, col)`.
    fn rotation(&self, _row: usize, _col: usize) -> Rotation {
        Rotation::None
    }
}

/// Plain grid placement with fixed spacing, optionally leaving room for
/// backbone rails inserted every `skip + 1` rows or columns.
#[derive(Debug, Clone, Copy)]
pub struct BasicGridPlacement {
    hor_space: f64,
    ver_space: f64,
    hbone_width: f64,
    vbone_width: f64,
    hbone_skip: usize,
    vbone_skip: usize,
}

impl BasicGridPlacement {
    /// Creates a placement with the given spacing and no backbone room.
    #[must_use]
    pub fn new(hor_space: f64, ver_space: f64) -> Self {
        Self {
            hor_space,
            ver_space,
            hbone_width: 0.0,
            vbone_width: 0.0,
            hbone_skip: 0,
            vbone_skip: 0,
        }
    }

    /// Reserves extra room for horizontal and vertical backbone rails.
    ///
    /// A rail of the given width (plus one spacing) is inserted after
    /// every `skip + 1` rows or columns; a zero width disables the rail.
    #[must_use]
    pub fn with_backbones(
        mut self,
        hbone_width: f64,
        vbone_width: f64,
        hbone_skip: usize,
        vbone_skip: usize,
    ) -> Self {
        self.hbone_width = hbone_width;
        self.vbone_width = vbone_width;
        self.hbone_skip = hbone_skip;
        self.vbone_skip = vbone_skip;
        self
    }
}

impl GridPlacer for BasicGridPlacement {
    #[allow(clippy::cast_precision_loss)]
    fn position(&self, row: usize, col: usize, board_size: Vector2) -> Point2 {
        let hbones = if self.hbone_width <= 0.0 {
            0
        } else {
            row / (self.hbone_skip + 1)
        };
        let vbones = if self.vbone_width <= 0.0 {
            0
        } else {
            col / (self.vbone_skip + 1)
        };
        Point2::new(
            col as f64 * (board_size.x + self.hor_space)
                + vbones as f64 * (self.vbone_width + self.hor_space),
            row as f64 * (board_size.y + self.ver_space)
                + hbones as f64 * (self.hbone_width + self.ver_space),
        )
    }
}

/// Rotates every odd row by 180 degrees.
#[derive(Debug, Clone, Copy)]
pub struct OddEvenRowsPlacement(pub BasicGridPlacement);

impl GridPlacer for OddEvenRowsPlacement {
    fn position(&self, row: usize, col: usize, board_size: Vector2) -> Point2 {
        self.0.position(row, col, board_size)
    }

    fn rotation(&self, row: usize, _col: usize) -> Rotation {
        if row % 2 == 0 {
            Rotation::None
        } else {
            Rotation::Half
        }
    }
}

/// Rotates every odd column by 180 degrees.
#[derive(Debug, Clone, Copy)]
pub struct OddEvenColumnsPlacement(pub BasicGridPlacement);

impl GridPlacer for OddEvenColumnsPlacement {
    fn position(&self, row: usize, col: usize, board_size: Vector2) -> Point2 {
        self.0.position(row, col, board_size)
    }

    fn rotation(&self, _row: usize, col: usize) -> Rotation {
        if col % 2 == 0 {
            Rotation::None
        } else {
            Rotation::Half
        }
    }
}

/// Rotates boards in a checkerboard pattern.
#[derive(Debug, Clone, Copy)]
pub struct OddEvenRowsColumnsPlacement(pub BasicGridPlacement);

impl GridPlacer for OddEvenRowsColumnsPlacement {
    fn position(&self, row: usize, col: usize, board_size: Vector2) -> Point2 {
        self.0.position(row, col, board_size)
    }

    fn rotation(&self, row: usize, col: usize) -> Rotation {
        if row % 2 == col % 2 {
            Rotation::None
        } else {
            Rotation::Half
        }
    }
}

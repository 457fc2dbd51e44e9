use crate::error::GeometryError;
use crate::math::Interval;

use super::AxialLine;

/// Axis-aligned bounding box of one sub-board.
///
/// The y axis points downward, following board-file convention: "top"
/// means the smaller y coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl BBox {
    /// Creates a bounding box from its extents.
    ///
    /// # Errors
    ///
    /// Returns an error if any coordinate is not finite or a minimum
    /// exceeds the corresponding maximum.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Result<Self, GeometryError> {
        let finite = [min_x, min_y, max_x, max_y].iter().all(|v| v.is_finite());
        if !finite || min_x > max_x || min_y > max_y {
            return Err(GeometryError::InvalidBox {
                min_x,
                min_y,
                max_x,
                max_y,
            });
        }
        Ok(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Left edge coordinate.
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.min_x
    }

    /// Top edge coordinate.
    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.min_y
    }

    /// Right edge coordinate.
    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.max_x
    }

    /// Bottom edge coordinate.
    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.max_y
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Projection onto the x axis.
    #[must_use]
    pub fn x_projection(&self) -> Interval {
        Interval::new(self.min_x, self.max_x)
    }

    /// Projection onto the y axis.
    #[must_use]
    pub fn y_projection(&self) -> Interval {
        Interval::new(self.min_y, self.max_y)
    }

    /// Smallest box containing both `self` and `other`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Box grown by `dx` on the left and right and `dy` on the top and
    /// bottom. Margins are expected to be non-negative.
    #[must_use]
    pub fn expand(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Translated copy of the box.
    #[must_use]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            min_x: self.min_x + dx,
            min_y: self.min_y + dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// The four edges of the box as untagged axial lines.
    ///
    /// Returns `(horizontal, vertical)`: the horizontal edges sit at
    /// `min_y` and `max_y` and span the x extent; the vertical edges sit
    /// at `min_x` and `max_x` and span the y extent.
    #[must_use]
    pub fn edges<T>(&self) -> ([AxialLine<T>; 2], [AxialLine<T>; 2]) {
        (
            [
                AxialLine::untagged(self.min_y, self.min_x, self.max_x),
                AxialLine::untagged(self.max_y, self.min_x, self.max_x),
            ],
            [
                AxialLine::untagged(self.min_x, self.min_y, self.max_y),
                AxialLine::untagged(self.max_x, self.min_y, self.max_y),
            ],
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::is_close;

    #[test]
    fn rejects_inverted_box() {
        assert!(BBox::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(BBox::new(0.0, 1.0, 1.0, 0.0).is_err());
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        assert!(BBox::new(0.0, 0.0, f64::NAN, 1.0).is_err());
        assert!(BBox::new(0.0, 0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn accepts_degenerate_zero_area_box() {
        // A zero-width box is ordered, hence valid.
        assert!(BBox::new(1.0, 0.0, 1.0, 2.0).is_ok());
    }

    #[test]
    fn merge_covers_both() {
        let a = BBox::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = BBox::new(2.0, -1.0, 3.0, 0.5).unwrap();
        let m = a.merge(&b);
        assert_eq!(m, BBox::new(0.0, -1.0, 3.0, 1.0).unwrap());
    }

    #[test]
    fn expand_grows_symmetrically() {
        let b = BBox::new(1.0, 1.0, 2.0, 3.0).unwrap();
        let e = b.expand(0.5, 0.25);
        assert_eq!(e, BBox::new(0.5, 0.75, 2.5, 3.25).unwrap());
    }

    #[test]
    fn projections() {
        let b = BBox::new(1.0, 2.0, 4.0, 8.0).unwrap();
        assert_eq!(b.x_projection(), Interval::new(1.0, 4.0));
        assert_eq!(b.y_projection(), Interval::new(2.0, 8.0));
        assert!(is_close(b.width(), 3.0));
        assert!(is_close(b.height(), 6.0));
    }

    #[test]
    fn edges_span_the_box() {
        let b = BBox::new(1.0, 2.0, 4.0, 8.0).unwrap();
        let (h, v) = b.edges::<u32>();
        assert_eq!(h[0], AxialLine::untagged(2.0, 1.0, 4.0));
        assert_eq!(h[1], AxialLine::untagged(8.0, 1.0, 4.0));
        assert_eq!(v[0], AxialLine::untagged(1.0, 2.0, 8.0));
        assert_eq!(v[1], AxialLine::untagged(4.0, 2.0, 8.0));
    }
}

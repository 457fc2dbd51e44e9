use std::collections::HashMap;
use std::hash::Hash;

use crate::geometry::BBox;
use crate::math::{Interval, IntervalList};

/// Answers nearest-neighbor queries over a fixed set of axially arranged,
/// non-overlapping boxes.
///
/// A neighbor in a direction is the closest box whose projection on the
/// perpendicular axis overlaps this box's projection non-trivially.
/// Several boxes may jointly neighbor one side, each covering a different
/// sub-interval of the projection.
///
/// Immutable once built; safe to share read-only across threads.
#[derive(Debug)]
pub struct BoxNeighbors<K> {
    left: HashMap<K, Vec<(K, IntervalList)>>,
    right: HashMap<K, Vec<(K, IntervalList)>>,
    top: HashMap<K, Vec<(K, IntervalList)>>,
    bottom: HashMap<K, Vec<(K, IntervalList)>>,
}

impl<K: Copy + Eq + Hash + Ord> BoxNeighbors<K> {
    /// Builds the neighbor structure from a mapping of id to box.
    #[must_use]
    pub fn new(boxes: &HashMap<K, BBox>) -> Self {
        let x_proj = |b: &BBox| b.x_projection();
        let y_proj = |b: &BBox| b.y_projection();

        // The distance key is negated for left/top so the nearest
        // candidate always sorts first.
        let left = Self::compute_query(Self::projection(boxes, y_proj, |b| -b.max_x()));
        let right = Self::compute_query(Self::projection(boxes, y_proj, |b| b.min_x()));
        let top = Self::compute_query(Self::projection(boxes, x_proj, |b| -b.max_y()));
        let bottom = Self::compute_query(Self::projection(boxes, x_proj, |b| b.min_y()));
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    fn projection(
        boxes: &HashMap<K, BBox>,
        interval: impl Fn(&BBox) -> Interval,
        distance: impl Fn(&BBox) -> f64,
    ) -> Vec<(K, Interval, f64)> {
        let mut list: Vec<(K, Interval, f64)> = boxes
            .iter()
            .map(|(&id, b)| (id, interval(b), distance(b)))
            .collect();
        // Ties broken by id so the scan order is deterministic.
        list.sort_by(|a, b| a.2.total_cmp(&b.2).then_with(|| a.0.cmp(&b.0)));
        list
    }

    /// Walks each box's candidates in increasing distance order, greedily
    /// consuming the box's perpendicular projection. Processing strictly
    /// nearer candidates first guarantees the first box found over any
    /// sub-span is truly the closest one.
    fn compute_query(list: Vec<(K, Interval, f64)>) -> HashMap<K, Vec<(K, IntervalList)>> {
        let mut neighbors = HashMap::with_capacity(list.len());
        for (i, (id, interval, _)) in list.iter().enumerate() {
            let mut found: Vec<(K, IntervalList)> = Vec::new();
            let mut rest = IntervalList::from(*interval);
            for (n_id, n_interval, _) in &list[i + 1..] {
                let n_list = IntervalList::from(*n_interval);
                let shadow = rest.intersect(&n_list);
                if shadow.trivial() {
                    continue;
                }
                found.push((*n_id, shadow));
                rest = rest.difference(&n_list);
                if rest.trivial() {
                    break;
                }
            }
            neighbors.insert(*id, found);
        }
        neighbors
    }

    fn simplify(pairs: &[(K, IntervalList)]) -> Vec<K> {
        pairs.iter().map(|(id, _)| *id).collect()
    }

    /// Ids of the nearest neighbors to the left of `id`.
    #[must_use]
    pub fn left(&self, id: K) -> Vec<K> {
        Self::simplify(self.left_coverage(id))
    }

    /// Left neighbors of `id` with the projection sub-interval each covers.
    ///
    /// Unknown ids and boxes with no neighbor yield an empty slice.
    #[must_use]
    pub fn left_coverage(&self, id: K) -> &[(K, IntervalList)] {
        self.left.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Ids of the nearest neighbors to the right of `id`.
    #[must_use]
    pub fn right(&self, id: K) -> Vec<K> {
        Self::simplify(self.right_coverage(id))
    }

    /// Right neighbors of `id` with the projection sub-interval each covers.
    #[must_use]
    pub fn right_coverage(&self, id: K) -> &[(K, IntervalList)] {
        self.right.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Ids of the nearest neighbors above `id` (smaller y).
    #[must_use]
    pub fn top(&self, id: K) -> Vec<K> {
        Self::simplify(self.top_coverage(id))
    }

    /// Top neighbors of `id` with the projection sub-interval each covers.
    #[must_use]
    pub fn top_coverage(&self, id: K) -> &[(K, IntervalList)] {
        self.top.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Ids of the nearest neighbors below `id` (larger y).
    #[must_use]
    pub fn bottom(&self, id: K) -> Vec<K> {
        Self::simplify(self.bottom_coverage(id))
    }

    /// Bottom neighbors of `id` with the projection sub-interval each covers.
    #[must_use]
    pub fn bottom_coverage(&self, id: K) -> &[(K, IntervalList)] {
        self.bottom.get(&id).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn boxes(list: &[(u32, (f64, f64, f64, f64))]) -> HashMap<u32, BBox> {
        list.iter()
            .map(|&(id, (a, b, c, d))| (id, BBox::new(a, b, c, d).unwrap()))
            .collect()
    }

    /// Mixed grid with gaps and one wide box:
    ///
    /// ```text
    /// +---+ +---+ +---+
    /// | 1 | | 2 | | 3 |
    /// +---+ +---+ +---+
    /// +---+ +---+ +---+
    /// | 4 | | 5 | | 6 |
    /// +---+ +---+ +---+
    /// +---------+ +---+
    /// |    7    | | 8 |
    /// +---------+ +---+
    /// ```
    fn mixed_grid() -> HashMap<u32, BBox> {
        boxes(&[
            (1, (1.0, 1.0, 2.0, 2.0)),
            (2, (3.0, 1.0, 4.0, 2.0)),
            (3, (5.0, 1.0, 6.0, 2.0)),
            (4, (1.0, 3.0, 2.0, 4.0)),
            (5, (3.0, 3.0, 4.0, 4.0)),
            (6, (5.0, 3.0, 6.0, 4.0)),
            (7, (1.0, 5.0, 4.0, 6.0)),
            (8, (5.0, 5.0, 6.0, 6.0)),
        ])
    }

    #[test]
    fn single_neighbors_in_grid() {
        let n = BoxNeighbors::new(&mixed_grid());

        assert!(n.left(1).is_empty());
        assert_eq!(n.right(1), vec![2]);
        assert!(n.top(1).is_empty());
        assert_eq!(n.bottom(1), vec![4]);
    }

    #[test]
    fn wide_box_has_two_partial_neighbors() {
        let n = BoxNeighbors::new(&mixed_grid());

        let mut above = n.top(7);
        above.sort_unstable();
        assert_eq!(above, vec![4, 5]);
    }

    #[test]
    fn partial_neighbors_cover_disjoint_spans() {
        let n = BoxNeighbors::new(&mixed_grid());

        for (id, coverage) in n.top_coverage(7) {
            let expected = match *id {
                4 => Interval::new(1.0, 2.0),
                5 => Interval::new(3.0, 4.0),
                other => panic!("unexpected neighbor {other}"),
            };
            assert_eq!(coverage.intervals(), &[expected]);
        }
    }

    /// Touching 2x3 grid, zero spacing:
    ///
    /// ```text
    /// +---+---+---+
    /// | 1 | 2 | 3 |
    /// +---+---+---+
    /// | 4 | 5 | 6 |
    /// +---+---+---+
    /// ```
    fn touching_grid() -> HashMap<u32, BBox> {
        boxes(&[
            (1, (1.0, 1.0, 2.0, 2.0)),
            (2, (2.0, 1.0, 3.0, 2.0)),
            (3, (3.0, 1.0, 4.0, 2.0)),
            (4, (1.0, 2.0, 2.0, 3.0)),
            (5, (2.0, 2.0, 3.0, 3.0)),
            (6, (3.0, 2.0, 4.0, 3.0)),
        ])
    }

    #[test]
    fn touching_boxes_are_neighbors() {
        let n = BoxNeighbors::new(&touching_grid());

        assert_eq!(n.right(1), vec![2]);
        assert_eq!(n.left(2), vec![1]);
        assert_eq!(n.bottom(2), vec![5]);
        assert_eq!(n.top(5), vec![2]);
    }

    #[test]
    fn touching_neighbors_cover_the_shared_edge() {
        let n = BoxNeighbors::new(&touching_grid());

        let coverage = n.right_coverage(1);
        assert_eq!(coverage.len(), 1);
        assert_eq!(coverage[0].1.intervals(), &[Interval::new(1.0, 2.0)]);
    }

    #[test]
    fn directional_reciprocity() {
        let n = BoxNeighbors::new(&mixed_grid());
        let boxes = mixed_grid();

        for &a in boxes.keys() {
            for (b, coverage) in n.right_coverage(a) {
                let back = n
                    .left_coverage(*b)
                    .iter()
                    .find(|(id, _)| *id == a)
                    .map(|(_, c)| c);
                assert_eq!(back, Some(coverage), "right({a}) lists {b} but not back");
            }
            for (b, coverage) in n.bottom_coverage(a) {
                let back = n
                    .top_coverage(*b)
                    .iter()
                    .find(|(id, _)| *id == a)
                    .map(|(_, c)| c);
                assert_eq!(back, Some(coverage), "bottom({a}) lists {b} but not back");
            }
        }
    }

    #[test]
    fn unknown_id_yields_empty() {
        let n = BoxNeighbors::new(&touching_grid());
        assert!(n.left(99).is_empty());
        assert!(n.right_coverage(99).is_empty());
    }
}

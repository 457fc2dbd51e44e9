//! Backbone extraction from partition lines.
//!
//! The backbone is the skeleton of frame material left between boards
//! after tab routing. It follows the partition lines, except where a line
//! coincides with boundary (frame) geometry that will be built anyway —
//! there the cut is suppressed.

use std::fmt;
use std::hash::Hash;

use crate::error::Result;
use crate::geometry::{AxialLine, BBox};
use crate::math::is_close;

use super::BoxPartitionLines;

/// Collects the backbone segments of a panel.
///
/// Unions the partition lines of all `boards`, removes every line that
/// also belongs to one of the `boundaries` boxes, and cuts the survivors
/// at the overall panel `bounds` so no segment sticks out of the frame.
/// Returns `(horizontal, vertical)` segments.
///
/// # Errors
///
/// Fails when an id is unknown to `partition`.
pub fn extract_backbones<K>(
    partition: &BoxPartitionLines<K>,
    boards: &[K],
    boundaries: &[K],
    bounds: &BBox,
) -> Result<(Vec<AxialLine<K>>, Vec<AxialLine<K>>)>
where
    K: Copy + Eq + Hash + Ord + fmt::Debug,
{
    let mut horizontal: Vec<AxialLine<K>> = Vec::new();
    let mut vertical: Vec<AxialLine<K>> = Vec::new();
    for &id in boards {
        let (h, v) = partition.partition_lines(id)?;
        extend_dedup(&mut horizontal, h);
        extend_dedup(&mut vertical, v);
    }
    // A line shared with a boundary box coincides with frame geometry; no
    // backbone is needed there.
    for &id in boundaries {
        let (h, v) = partition.partition_lines(id)?;
        for line in h {
            horizontal.retain(|l| !same_position(l, line));
        }
        for line in v {
            vertical.retain(|l| !same_position(l, line));
        }
    }
    let horizontal = cut_all(horizontal, bounds.min_x(), bounds.max_x());
    let vertical = cut_all(vertical, bounds.min_y(), bounds.max_y());
    Ok((horizontal, vertical))
}

/// Tag-insensitive, tolerance-based coincidence test. Two neighbors
/// report the same gap line under their own tags; the backbone keeps it
/// once.
fn same_position<K>(a: &AxialLine<K>, b: &AxialLine<K>) -> bool {
    is_close(a.x(), b.x()) && is_close(a.min(), b.min()) && is_close(a.max(), b.max())
}

fn extend_dedup<K: Clone>(out: &mut Vec<AxialLine<K>>, lines: &[AxialLine<K>]) {
    for line in lines {
        if !out.iter().any(|l| same_position(l, line)) {
            out.push(line.clone());
        }
    }
}

fn cut_all<K: Clone>(lines: Vec<AxialLine<K>>, a: f64, b: f64) -> Vec<AxialLine<K>> {
    lines
        .into_iter()
        .flat_map(|l| l.cut(a))
        .flat_map(|l| l.cut(b))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn boxes(list: &[(u32, (f64, f64, f64, f64))]) -> HashMap<u32, BBox> {
        list.iter()
            .map(|&(id, (a, b, c, d))| (id, BBox::new(a, b, c, d).unwrap()))
            .collect()
    }

    #[test]
    fn shared_gap_line_is_kept_once() {
        let bx = boxes(&[
            (1, (0.0, 0.0, 1.0, 1.0)),
            (2, (2.0, 0.0, 3.0, 1.0)),
        ]);
        let partition = BoxPartitionLines::new(&bx).unwrap();
        let bounds = BBox::new(0.0, 0.0, 3.0, 1.0).unwrap();
        let (h, v) = extract_backbones(&partition, &[1, 2], &[], &bounds).unwrap();
        assert!(h.is_empty());
        assert_eq!(v.len(), 1);
        assert!(is_close(v[0].x(), 1.5));
    }

    #[test]
    fn boundary_lines_are_suppressed() {
        // Box 3 stands in for a frame rail to the right of box 2.
        let bx = boxes(&[
            (1, (0.0, 0.0, 1.0, 1.0)),
            (2, (2.0, 0.0, 3.0, 1.0)),
            (3, (4.0, 0.0, 5.0, 1.0)),
        ]);
        let partition = BoxPartitionLines::new(&bx).unwrap();
        let bounds = BBox::new(0.0, 0.0, 5.0, 1.0).unwrap();

        let (_, with_rail) = extract_backbones(&partition, &[1, 2, 3], &[], &bounds).unwrap();
        assert_eq!(with_rail.len(), 2);

        let (_, suppressed) = extract_backbones(&partition, &[1, 2], &[3], &bounds).unwrap();
        assert_eq!(suppressed.len(), 1);
        assert!(is_close(suppressed[0].x(), 1.5));
    }

    #[test]
    fn segments_are_cut_at_bounds() {
        let line = AxialLine::new(1.5, 0.0, 4.0, 1_u32);
        let cut = cut_all(vec![line], 1.0, 3.0);
        assert_eq!(cut.len(), 3);
        assert_eq!(cut[0], AxialLine::new(1.5, 0.0, 1.0, 1));
        assert_eq!(cut[1], AxialLine::new(1.5, 1.0, 3.0, 1));
        assert_eq!(cut[2], AxialLine::new(1.5, 3.0, 4.0, 1));
    }
}

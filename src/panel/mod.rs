//! Panel-level façade over the partition pipeline.

pub mod placement;

pub use placement::{
    BasicGridPlacement, GridPlacer, OddEvenColumnsPlacement, OddEvenRowsColumnsPlacement,
    OddEvenRowsPlacement, Rotation,
};

use std::collections::{HashMap, HashSet};

use slotmap::{new_key_type, SlotMap};

use crate::error::{PartitionError, Result};
use crate::geometry::{AxialLine, BBox};
use crate::math::{is_close, Vector2};
use crate::partition::{extract_backbones, BoxPartitionLines};

new_key_type! {
    /// Identifier of a board (real or ghost) within a panel layout.
    pub struct BoardId;
}

#[derive(Debug, Clone, Copy)]
struct Board {
    bbox: BBox,
    ghost: bool,
}

/// Arrangement of board footprints on a manufacturing panel.
///
/// Boards live in a slot map and are addressed by [`BoardId`]. Ghost
/// boards stand in for frame or rail geometry that is not built yet: they
/// shape the partition like real boards, but no partition line forms
/// between two ghosts, and their lines are suppressed from the backbone.
///
/// `epsilon` is the shrink applied to interior box edges before
/// partitioning, so zero-spacing layouts (boards sharing an edge) keep
/// the boxes disjoint. `seed_limit` discards seed lines shorter than the
/// given length; both are in the caller's length unit.
#[derive(Debug)]
pub struct PanelLayout {
    boards: SlotMap<BoardId, Board>,
    epsilon: f64,
    seed_limit: f64,
}

impl PanelLayout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new(epsilon: f64, seed_limit: f64) -> Self {
        Self {
            boards: SlotMap::with_key(),
            epsilon,
            seed_limit,
        }
    }

    /// Adds a real board and returns its id.
    pub fn add_board(&mut self, bbox: BBox) -> BoardId {
        self.boards.insert(Board { bbox, ghost: false })
    }

    /// Adds a ghost board (frame placeholder) and returns its id.
    pub fn add_ghost(&mut self, bbox: BBox) -> BoardId {
        self.boards.insert(Board { bbox, ghost: true })
    }

    /// Places `rows` x `cols` copies of `board` with the given placer and
    /// returns their ids in row-major order.
    pub fn add_grid(
        &mut self,
        board: &BBox,
        rows: usize,
        cols: usize,
        placer: &dyn GridPlacer,
    ) -> Vec<BoardId> {
        let size = Vector2::new(board.width(), board.height());
        let mut ids = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let pos = placer.position(row, col, size);
                // A half-turn about the box center leaves the bounding box
                // unchanged, so rotation does not affect the footprint.
                ids.push(self.add_board(board.translate(pos.x, pos.y)));
            }
        }
        ids
    }

    /// True iff `id` refers to a ghost board.
    #[must_use]
    pub fn is_ghost(&self, id: BoardId) -> bool {
        self.boards.get(id).is_some_and(|b| b.ghost)
    }

    /// Bounding box of a board.
    #[must_use]
    pub fn bbox(&self, id: BoardId) -> Option<BBox> {
        self.boards.get(id).map(|b| b.bbox)
    }

    /// Ids of all real boards.
    #[must_use]
    pub fn board_ids(&self) -> Vec<BoardId> {
        self.boards
            .iter()
            .filter(|(_, b)| !b.ghost)
            .map(|(id, _)| id)
            .collect()
    }

    /// Ids of all ghost boards.
    #[must_use]
    pub fn ghost_ids(&self) -> Vec<BoardId> {
        self.boards
            .iter()
            .filter(|(_, b)| b.ghost)
            .map(|(id, _)| id)
            .collect()
    }

    /// Overall bounds of the layout, ghosts included.
    ///
    /// # Errors
    ///
    /// Fails when the layout is empty.
    pub fn bounds(&self) -> Result<BBox> {
        self.boards
            .values()
            .map(|b| b.bbox)
            .reduce(|a, b| a.merge(&b))
            .ok_or_else(|| PartitionError::EmptyInput.into())
    }

    /// Computes the partition lines of the layout.
    ///
    /// Interior box edges are shrunk by `epsilon` first, ghost-to-ghost
    /// seeds and seeds shorter than `seed_limit` are discarded. See
    /// [`BoxPartitionLines::with_options`] for the margins.
    ///
    /// # Errors
    ///
    /// Fails on an empty layout or when the partition pipeline fails.
    pub fn partition(
        &self,
        safe_horizontal_margin: f64,
        safe_vertical_margin: f64,
    ) -> Result<BoxPartitionLines<BoardId>> {
        let boxes = self.preprocessed_boxes()?;
        let ghosts: HashSet<BoardId> = self.ghost_ids().into_iter().collect();
        let seed_limit = self.seed_limit;
        let filter = |a: BoardId, b: BoardId, _vertical: bool, line: &AxialLine<BoardId>| {
            if line.span().length() < seed_limit {
                return false;
            }
            !(ghosts.contains(&a) && ghosts.contains(&b))
        };
        BoxPartitionLines::with_options(&boxes, filter, safe_horizontal_margin, safe_vertical_margin)
    }

    /// Backbone segments of the panel: partition lines that do not
    /// coincide with ghost geometry, cut at the panel bounds.
    ///
    /// # Errors
    ///
    /// Fails on an empty layout or when the partition pipeline fails.
    pub fn backbones(
        &self,
        safe_horizontal_margin: f64,
        safe_vertical_margin: f64,
    ) -> Result<(Vec<AxialLine<BoardId>>, Vec<AxialLine<BoardId>>)> {
        let partition = self.partition(safe_horizontal_margin, safe_vertical_margin)?;
        extract_backbones(
            &partition,
            &self.board_ids(),
            &self.ghost_ids(),
            &self.bounds()?,
        )
    }

    /// Shrinks every box edge that is not on the outermost extent of the
    /// layout by `epsilon`. The partition pipeline assumes disjoint
    /// boxes; with zero spacing neighbors share an edge, and pulling the
    /// interior edges apart restores the precondition without moving the
    /// overall bounds.
    fn preprocessed_boxes(&self) -> Result<HashMap<BoardId, BBox>> {
        let bounds = self.bounds()?;
        let eps = self.epsilon;
        let keep_or = |value: f64, limit: f64, shrunk: f64| {
            if is_close(value, limit) {
                value
            } else {
                shrunk
            }
        };
        self.boards
            .iter()
            .map(|(id, board)| {
                let b = board.bbox;
                let shrunk = BBox::new(
                    keep_or(b.min_x(), bounds.min_x(), b.min_x() + eps),
                    keep_or(b.min_y(), bounds.min_y(), b.min_y() + eps),
                    keep_or(b.max_x(), bounds.max_x(), b.max_x() - eps),
                    keep_or(b.max_y(), bounds.max_y(), b.max_y() - eps),
                )?;
                Ok((id, shrunk))
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn bbox(a: f64, b: f64, c: f64, d: f64) -> BBox {
        BBox::new(a, b, c, d).unwrap()
    }

    #[test]
    fn grid_placement_feeds_partition() {
        // Three unit boards in a row with unit spacing.
        let mut layout = PanelLayout::new(0.0, 0.0);
        let ids = layout.add_grid(
            &bbox(0.0, 0.0, 1.0, 1.0),
            1,
            3,
            &BasicGridPlacement::new(1.0, 0.0),
        );
        assert_eq!(ids.len(), 3);
        assert_eq!(layout.bbox(ids[1]).unwrap(), bbox(2.0, 0.0, 3.0, 1.0));

        let partition = layout.partition(0.0, 0.0).unwrap();
        let (_, v) = partition.partition_lines(ids[0]).unwrap();
        assert_eq!(v.len(), 1);
        assert!(is_close(v[0].x(), 1.5));
        assert!(is_close(v[0].min(), 0.0));
        assert!(is_close(v[0].max(), 1.0));
    }

    #[test]
    fn zero_spacing_boards_still_partition() {
        let mut layout = PanelLayout::new(0.01, 0.0);
        let a = layout.add_board(bbox(0.0, 0.0, 2.0, 1.0));
        let b = layout.add_board(bbox(2.0, 0.0, 4.0, 1.0));

        let partition = layout.partition(0.0, 0.0).unwrap();
        let (_, va) = partition.partition_lines(a).unwrap();
        let (_, vb) = partition.partition_lines(b).unwrap();
        // The shared edge at x = 2 becomes the partition line.
        assert_eq!(va.len(), 1);
        assert!(is_close(va[0].x(), 2.0));
        assert_eq!(vb.len(), 1);
        assert!(is_close(vb[0].x(), 2.0));
    }

    #[test]
    fn no_seed_between_two_ghosts() {
        let mut layout = PanelLayout::new(0.0, 0.0);
        let g1 = layout.add_ghost(bbox(0.0, 0.0, 1.0, 1.0));
        let g2 = layout.add_ghost(bbox(2.0, 0.0, 3.0, 1.0));
        assert!(layout.is_ghost(g1));

        let partition = layout.partition(0.0, 0.0).unwrap();
        let (h1, v1) = partition.partition_lines(g1).unwrap();
        let (h2, v2) = partition.partition_lines(g2).unwrap();
        assert!(h1.is_empty() && v1.is_empty());
        assert!(h2.is_empty() && v2.is_empty());
    }

    #[test]
    fn ghost_to_board_seed_survives() {
        let mut layout = PanelLayout::new(0.0, 0.0);
        let board = layout.add_board(bbox(0.0, 0.0, 1.0, 1.0));
        let ghost = layout.add_ghost(bbox(2.0, 0.0, 3.0, 1.0));

        let partition = layout.partition(0.0, 0.0).unwrap();
        let (_, v) = partition.partition_lines(board).unwrap();
        assert_eq!(v.len(), 1);
        let (_, vg) = partition.partition_lines(ghost).unwrap();
        assert_eq!(vg.len(), 1);
    }

    #[test]
    fn short_seeds_are_discarded() {
        // The overlap between the two boards is only 0.2 long.
        let mut layout = PanelLayout::new(0.0, 0.5);
        let a = layout.add_board(bbox(0.0, 0.0, 1.0, 1.0));
        let _b = layout.add_board(bbox(2.0, 0.8, 3.0, 2.0));

        let partition = layout.partition(0.0, 0.0).unwrap();
        let (_, v) = partition.partition_lines(a).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn backbones_skip_ghost_rails() {
        let mut layout = PanelLayout::new(0.0, 0.0);
        let _a = layout.add_board(bbox(0.0, 0.0, 1.0, 1.0));
        let _b = layout.add_board(bbox(2.0, 0.0, 3.0, 1.0));
        let _rail = layout.add_ghost(bbox(4.0, 0.0, 5.0, 1.0));

        let (h, v) = layout.backbones(0.0, 0.0).unwrap();
        assert!(h.is_empty());
        // Only the board-to-board gap yields a backbone; the line against
        // the ghost rail is suppressed.
        assert_eq!(v.len(), 1);
        assert!(is_close(v[0].x(), 1.5));
    }

    #[test]
    fn empty_layout_fails() {
        let layout = PanelLayout::new(0.0, 0.0);
        assert!(layout.bounds().is_err());
        assert!(layout.partition(0.0, 0.0).is_err());
    }
}

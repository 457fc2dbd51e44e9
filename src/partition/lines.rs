//! The seed / shadow / trim pipeline that turns box neighborhoods into
//! per-box partition lines.
//!
//! A seed line bisects the gap between two neighboring boxes. Each seed is
//! prolonged on both sides until it hits a perpendicular hard stop (a box
//! edge or the outer bounding edge), producing its shadow. Shadows of one
//! orientation are then trimmed against the shadows of the other, so the
//! final lines form a consistent planar partition of the free space.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::error::{PartitionError, Result};
use crate::geometry::{AxialLine, BBox, ShadowLine};
use crate::math::{lower_bound, upper_bound, Interval};

use super::BoxNeighbors;

/// Seed filter that keeps every candidate line.
pub fn accept_all_seeds<K>(_near: K, _far: K, _vertical: bool, _line: &AxialLine<K>) -> bool {
    true
}

/// Collects every box edge, plus the edges of the union bounding box, as
/// extension hard stops.
///
/// Returns `(horizontal, vertical)` untagged edge lines, deduplicated.
/// The union box acts as an outer backstop so shadow extension always
/// terminates.
///
/// # Errors
///
/// Fails with [`PartitionError::EmptyInput`] when no boxes are given.
pub fn collect_hard_stops<'a, K, I>(boxes: I) -> Result<(Vec<AxialLine<K>>, Vec<AxialLine<K>>)>
where
    I: IntoIterator<Item = &'a BBox>,
{
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();
    let mut union: Option<BBox> = None;
    for b in boxes {
        union = Some(match union {
            Some(u) => u.merge(b),
            None => *b,
        });
        let (h, v) = b.edges();
        horizontal.extend(h);
        vertical.extend(v);
    }
    let union = union.ok_or(PartitionError::EmptyInput)?;
    let (h, v) = union.edges();
    horizontal.extend(h);
    vertical.extend(v);
    dedup_lines(&mut horizontal);
    dedup_lines(&mut vertical);
    Ok((horizontal, vertical))
}

/// Exact-coordinate dedup via sorting. Lines whose coordinates are
/// tolerantly equal but not bit-equal stay apart; extra hard stops are
/// harmless, a hash-based dedup over tolerant floats would not be.
fn dedup_lines<K>(lines: &mut Vec<AxialLine<K>>) {
    lines.sort_by(|a, b| {
        a.x()
            .total_cmp(&b.x())
            .then_with(|| a.min().total_cmp(&b.min()))
            .then_with(|| a.max().total_cmp(&b.max()))
    });
    lines.dedup_by(|a, b| {
        a.x().total_cmp(&b.x()).is_eq()
            && a.min().total_cmp(&b.min()).is_eq()
            && a.max().total_cmp(&b.max()).is_eq()
    });
}

/// Emits the candidate midlines between every pair of neighboring boxes.
///
/// Returns `(horizontal, vertical)` lines. Each candidate sits at the
/// arithmetic midpoint between the facing edges, spans one coverage
/// sub-interval and is tagged with the near box's id; left/right
/// neighbors produce vertical seeds, top/bottom neighbors horizontal
/// ones. `filter` can suppress unwanted candidates, e.g. seeds between
/// ghost boxes or seeds too short to carry a tab.
pub fn collect_seed_lines<K, F>(
    boxes: &HashMap<K, BBox>,
    filter: F,
) -> (Vec<AxialLine<K>>, Vec<AxialLine<K>>)
where
    K: Copy + Eq + Hash + Ord,
    F: Fn(K, K, bool, &AxialLine<K>) -> bool,
{
    let neighbors = BoxNeighbors::new(boxes);
    let mut horizontal = Vec::new();
    let mut vertical = Vec::new();

    // Sorted iteration keeps the output order independent of hash order.
    let mut ids: Vec<K> = boxes.keys().copied().collect();
    ids.sort_unstable();

    for id_a in ids {
        let box_a = boxes[&id_a];
        for (id_b, coverage) in neighbors.left_coverage(id_a) {
            let mid = (box_a.min_x() + boxes[id_b].max_x()) / 2.0;
            emit(&mut vertical, mid, coverage.intervals(), id_a, *id_b, true, &filter);
        }
        for (id_b, coverage) in neighbors.right_coverage(id_a) {
            let mid = (box_a.max_x() + boxes[id_b].min_x()) / 2.0;
            emit(&mut vertical, mid, coverage.intervals(), id_a, *id_b, true, &filter);
        }
        for (id_b, coverage) in neighbors.top_coverage(id_a) {
            let mid = (box_a.min_y() + boxes[id_b].max_y()) / 2.0;
            emit(&mut horizontal, mid, coverage.intervals(), id_a, *id_b, false, &filter);
        }
        for (id_b, coverage) in neighbors.bottom_coverage(id_a) {
            let mid = (box_a.max_y() + boxes[id_b].min_y()) / 2.0;
            emit(&mut horizontal, mid, coverage.intervals(), id_a, *id_b, false, &filter);
        }
    }
    (horizontal, vertical)
}

fn emit<K, F>(
    out: &mut Vec<AxialLine<K>>,
    mid: f64,
    coverage: &[Interval],
    near: K,
    far: K,
    vertical: bool,
    filter: &F,
) where
    K: Copy,
    F: Fn(K, K, bool, &AxialLine<K>) -> bool,
{
    for span in coverage {
        let line = AxialLine::new(mid, span.min(), span.max(), near);
        if filter(near, far, vertical, &line) {
            out.push(line);
        }
    }
}

/// Prolongs every seed line on both sides until the nearest perpendicular
/// boundary.
///
/// A boundary qualifies when it crosses the seed's coordinate and lies
/// beyond the seed's span on the scanned side. The binary-search bounds
/// locate the scan starting points; the outer hard stops guarantee every
/// seed can be bounded, so a miss is an internal invariant violation, not
/// a recoverable condition.
///
/// # Errors
///
/// Returns [`PartitionError::UnboundedShadow`] when a seed finds no
/// qualifying boundary on some side.
pub fn build_shadows<K: Clone>(
    lines: &[AxialLine<K>],
    boundaries: &[AxialLine<K>],
) -> Result<Vec<ShadowLine<K>>> {
    let mut sorted: Vec<&AxialLine<K>> = boundaries.iter().collect();
    sorted.sort_by(|a, b| a.x().total_cmp(&b.x()));

    let mut shadows = Vec::with_capacity(lines.len());
    for line in lines {
        // Towards larger coordinates: nearest boundary past the span.
        #[allow(clippy::cast_sign_loss)]
        let from = lower_bound(&sorted, line.max(), |b| b.x()).max(0) as usize;
        let upper = sorted[from..]
            .iter()
            .find(|b| b.contains(line.x()) && b.x() > line.min())
            .map(|b| b.x());
        // Towards smaller coordinates, scanning backwards.
        let to = upper_bound(&sorted, line.min(), |b| b.x());
        let lower = sorted[..to]
            .iter()
            .rev()
            .find(|b| b.contains(line.x()) && b.x() < line.max())
            .map(|b| b.x());
        match (lower, upper) {
            (Some(lo), Some(hi)) => {
                shadows.push(ShadowLine::new(line.clone(), Interval::new(lo, hi)));
            }
            _ => {
                return Err(PartitionError::UnboundedShadow {
                    x: line.x(),
                    min: line.min(),
                    max: line.max(),
                }
                .into())
            }
        }
    }
    Ok(shadows)
}

/// Trims each shadow back so it crosses none of the given boundaries.
///
/// Sides are trimmed independently: the shadow shrinks to the nearest
/// boundary that crosses the seed's coordinate and falls inside the
/// shadow on that side; a side with no conflicting boundary keeps its
/// full extent.
#[must_use]
pub fn trim_shadows<K: Clone>(
    shadows: &[ShadowLine<K>],
    boundaries: &[AxialLine<K>],
) -> Vec<ShadowLine<K>> {
    let mut sorted: Vec<&AxialLine<K>> = boundaries.iter().collect();
    sorted.sort_by(|a, b| a.x().total_cmp(&b.x()));

    let mut trimmed = Vec::with_capacity(shadows.len());
    for s in shadows {
        let line = s.line();
        let shadow = s.shadow();
        // The scans start just past the core span so a boundary inside the
        // gap itself can never pull the line back through its own seed.
        let from = upper_bound(&sorted, line.min(), |b| b.x());
        let hi = sorted[from..]
            .iter()
            .find(|b| b.contains(line.x()) && shadow.min() < b.x() && b.x() <= shadow.max())
            .map_or(shadow.max(), |b| b.x());
        let to = upper_bound(&sorted, line.max(), |b| b.x());
        let lo = sorted[..to]
            .iter()
            .rev()
            .find(|b| b.contains(line.x()) && shadow.min() <= b.x() && b.x() < shadow.max())
            .map_or(shadow.min(), |b| b.x());
        trimmed.push(ShadowLine::new(line.clone(), Interval::new(lo, hi)));
    }
    trimmed
}

/// Per-box partition lines for a set of axially arranged, non-overlapping
/// boxes.
///
/// The union of all partition lines splits the free space between the
/// boxes so the gap between two neighbors is bisected evenly:
///
/// ```text
/// +---+ | +----+ | +--------+
/// |   | | |    | | |        |
/// +---+ | |    | | |        |
/// ------| |    | | +--------+
/// +---+ | |    | |-----------
/// |   | | |    |   |   +----+
/// +---+ | +----+   |   +----+
/// ```
///
/// Immutable once built; safe to share read-only across threads.
#[derive(Debug)]
pub struct BoxPartitionLines<K> {
    query: HashMap<K, (Vec<AxialLine<K>>, Vec<AxialLine<K>>)>,
}

impl<K: Copy + Eq + Hash + Ord> BoxPartitionLines<K> {
    /// Runs the full pipeline with no seed filtering and no safety margin.
    ///
    /// # Errors
    ///
    /// See [`Self::with_options`].
    pub fn new(boxes: &HashMap<K, BBox>) -> Result<Self> {
        Self::with_options(boxes, accept_all_seeds, 0.0, 0.0)
    }

    /// Runs the full pipeline.
    ///
    /// The margins expand every box before the safety hard stops are
    /// computed (but not before seeding), so no partition line ever lands
    /// pathologically close to a box edge: the horizontal margin keeps
    /// horizontal lines clear of the boxes' top and bottom edges, the
    /// vertical margin keeps vertical lines clear of the left and right
    /// edges.
    ///
    /// # Errors
    ///
    /// Fails on an empty box set, or with
    /// [`PartitionError::UnboundedShadow`] when a seed line cannot be
    /// bounded by the hard stops (an internal invariant violation).
    pub fn with_options<F>(
        boxes: &HashMap<K, BBox>,
        seed_filter: F,
        safe_horizontal_margin: f64,
        safe_vertical_margin: f64,
    ) -> Result<Self>
    where
        F: Fn(K, K, bool, &AxialLine<K>) -> bool,
    {
        let (h_stops, v_stops) = collect_hard_stops(boxes.values())?;
        let expanded: Vec<BBox> = boxes
            .values()
            .map(|b| b.expand(safe_vertical_margin, safe_horizontal_margin))
            .collect();
        let (h_safe, v_safe) = collect_hard_stops(expanded.iter())?;
        let (h_seeds, v_seeds) = collect_seed_lines(boxes, seed_filter);

        let v_bounds: Vec<AxialLine<K>> =
            v_stops.iter().chain(v_safe.iter()).cloned().collect();
        let h_bounds: Vec<AxialLine<K>> =
            h_stops.iter().chain(h_safe.iter()).cloned().collect();
        let h_shadows = build_shadows(&h_seeds, &v_bounds)?;
        let v_shadows = build_shadows(&v_seeds, &h_bounds)?;

        // Symmetric trim: each orientation yields to the other's shadows
        // plus the other's safety stops.
        let h_trim: Vec<AxialLine<K>> = v_shadows
            .iter()
            .map(ShadowLine::shadow_line)
            .chain(v_safe.iter().cloned())
            .collect();
        let v_trim: Vec<AxialLine<K>> = h_shadows
            .iter()
            .map(ShadowLine::shadow_line)
            .chain(h_safe.iter().cloned())
            .collect();
        let h_partition = trim_shadows(&h_shadows, &h_trim);
        let v_partition = trim_shadows(&v_shadows, &v_trim);

        let mut query: HashMap<K, (Vec<AxialLine<K>>, Vec<AxialLine<K>>)> = boxes
            .keys()
            .map(|&id| (id, (Vec::new(), Vec::new())))
            .collect();
        for s in &h_partition {
            if let Some(tag) = s.line().tag() {
                if let Some(entry) = query.get_mut(&tag) {
                    entry.0.push(final_line(s, tag));
                }
            }
        }
        for s in &v_partition {
            if let Some(tag) = s.line().tag() {
                if let Some(entry) = query.get_mut(&tag) {
                    entry.1.push(final_line(s, tag));
                }
            }
        }
        Ok(Self { query })
    }

    /// Returns `(horizontal, vertical)` partition lines of `id`.
    ///
    /// Every id from the input mapping has an entry, possibly with empty
    /// line lists.
    ///
    /// # Errors
    ///
    /// Returns [`PartitionError::UnknownBoard`] when `id` was not part of
    /// the input mapping.
    pub fn partition_lines(&self, id: K) -> Result<(&[AxialLine<K>], &[AxialLine<K>])>
    where
        K: fmt::Debug,
    {
        self.query
            .get(&id)
            .map(|(h, v)| (h.as_slice(), v.as_slice()))
            .ok_or_else(|| PartitionError::UnknownBoard(format!("{id:?}")).into())
    }

    /// Ids known to the partition, in unspecified order.
    pub fn ids(&self) -> impl Iterator<Item = K> + '_ {
        self.query.keys().copied()
    }
}

fn final_line<K: Copy>(s: &ShadowLine<K>, tag: K) -> AxialLine<K> {
    AxialLine::new(s.line().x(), s.shadow().min(), s.shadow().max(), tag)
}

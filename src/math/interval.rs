//! 1D interval arithmetic used as the primitive for the 2D partition
//! reasoning.

use super::is_close;

/// A closed numeric interval `[min, max]`, normalized so `min <= max`.
///
/// Instances are immutable; every operation returns a new interval.
#[derive(Debug, Clone, Copy)]
pub struct Interval {
    min: f64,
    max: f64,
}

impl Interval {
    /// Creates an interval spanning `a` and `b`, given in either order.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Lower endpoint.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper endpoint.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Length of the interval; zero for a single point.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.max - self.min
    }

    /// True iff the interval is a single point.
    #[must_use]
    pub fn trivial(&self) -> bool {
        self.min >= self.max
    }

    /// True iff `v` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    /// Returns the overlap with `other`, or `None` when disjoint.
    ///
    /// Touching endpoints yield a trivial zero-length interval, not `None`.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.min > other.max || other.min > self.max {
            return None;
        }
        Some(Self::new(
            self.min.max(other.min),
            self.max.min(other.max),
        ))
    }

    /// Returns the overlap with `other` only when it is longer than a
    /// single point.
    #[must_use]
    pub fn nontrivial_intersect(&self, other: &Self) -> Option<Self> {
        self.intersect(other).filter(|i| !i.trivial())
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        is_close(self.min, other.min) && is_close(self.max, other.max)
    }
}

/// An event of the sweep used by [`IntervalList::intersect`] and
/// [`IntervalList::difference`]: an interval of one operand opening
/// (`delta = 1`) or closing (`delta = -1`) at `pos`.
#[derive(Debug, Clone, Copy)]
struct Event {
    operand: u8,
    pos: f64,
    delta: i8,
}

fn event_list(a: &[Interval], b: &[Interval]) -> Vec<Event> {
    let mut events = Vec::with_capacity(2 * (a.len() + b.len()));
    for i in a {
        events.push(Event {
            operand: 0,
            pos: i.min(),
            delta: 1,
        });
        events.push(Event {
            operand: 0,
            pos: i.max(),
            delta: -1,
        });
    }
    for i in b {
        events.push(Event {
            operand: 1,
            pos: i.min(),
            delta: 1,
        });
        events.push(Event {
            operand: 1,
            pos: i.max(),
            delta: -1,
        });
    }
    // Stable sort: at equal positions operand-0 events stay ahead of
    // operand-1 events, in emission order.
    events.sort_by(|x, y| x.pos.total_cmp(&y.pos));
    events
}

/// A normalized union of disjoint, non-trivial intervals sorted by
/// ascending `min`.
///
/// Value type: every operation returns a new list; no visible in-place
/// mutation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalList {
    intervals: Vec<Interval>,
}

impl IntervalList {
    /// Creates a list from arbitrary intervals, normalizing them.
    #[must_use]
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self {
            intervals: Self::normalize(intervals),
        }
    }

    /// The normalized intervals, sorted by ascending `min`.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// True iff the list contains no intervals.
    #[must_use]
    pub fn trivial(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Sort by `min`, drop trivial intervals and merge any interval that
    /// touches or overlaps its predecessor.
    fn normalize(mut intervals: Vec<Interval>) -> Vec<Interval> {
        intervals.sort_by(|a, b| a.min().total_cmp(&b.min()));
        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for b in intervals {
            if b.trivial() {
                continue;
            }
            match merged.last_mut() {
                Some(a) if b.min() <= a.max() => {
                    *a = Interval::new(a.min(), a.max().max(b.max()));
                }
                _ => merged.push(b),
            }
        }
        merged
    }

    /// Union with `other`; concatenates and renormalizes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut all = self.intervals.clone();
        all.extend_from_slice(&other.intervals);
        Self::new(all)
    }

    /// Intersection with `other`.
    ///
    /// Sweeps the merged event list tracking how many intervals are open;
    /// a result interval starts on the 1-to-2 transition and closes on the
    /// 2-to-1 transition.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let mut result = Vec::new();
        let mut open = 0_i32;
        let mut start: Option<f64> = None;
        for e in event_list(&self.intervals, &other.intervals) {
            if open == 1 && e.delta == 1 {
                start = Some(e.pos);
            }
            if open == 2 && e.delta == -1 {
                if let Some(s) = start.take() {
                    result.push(Interval::new(s, e.pos));
                }
            }
            open += i32::from(e.delta);
            debug_assert!((0..=2).contains(&open));
        }
        Self::new(result)
    }

    /// Difference, self minus `other`.
    ///
    /// Same sweep as [`Self::intersect`], but with one open flag per
    /// operand: a result interval is open exactly while self is open and
    /// `other` is not. Both flags stay within `0..=1` since each operand
    /// is already a normalized disjoint set.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut result = Vec::new();
        let mut a_open = 0_i32;
        let mut b_open = 0_i32;
        let mut start: Option<f64> = None;
        for e in event_list(&self.intervals, &other.intervals) {
            match (e.operand, e.delta) {
                // Rising A with no B, or falling B while A is on.
                (0, 1) if b_open == 0 => start = Some(e.pos),
                (1, -1) if a_open == 1 => start = Some(e.pos),
                // Falling A with no B, or rising B while A is on.
                (0, -1) if b_open == 0 => {
                    if let Some(s) = start.take() {
                        result.push(Interval::new(s, e.pos));
                    }
                }
                (1, 1) if a_open == 1 => {
                    if let Some(s) = start.take() {
                        result.push(Interval::new(s, e.pos));
                    }
                }
                _ => {}
            }
            if e.operand == 0 {
                a_open += i32::from(e.delta);
            } else {
                b_open += i32::from(e.delta);
            }
            debug_assert!((0..=1).contains(&a_open), "operand is not a disjoint set");
            debug_assert!((0..=1).contains(&b_open), "operand is not a disjoint set");
        }
        Self::new(result)
    }
}

impl From<Interval> for IntervalList {
    fn from(interval: Interval) -> Self {
        Self::new(vec![interval])
    }
}

impl From<Vec<Interval>> for IntervalList {
    fn from(intervals: Vec<Interval>) -> Self {
        Self::new(intervals)
    }
}

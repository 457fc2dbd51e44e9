use crate::math::{is_close, Interval};

/// A finite horizontal or vertical line segment.
///
/// `x` is the line's fixed coordinate — the y coordinate for a horizontal
/// line, the x coordinate for a vertical one — and `span` its extent along
/// the perpendicular axis. The orientation itself is never stored: callers
/// track it by which collection a line travels in.
///
/// The optional tag names the box the line belongs to. It is a plain
/// copyable id, not a reference; ownership of boxes is never shared.
///
/// There is deliberately no `Hash` impl: equality is tolerance-based on
/// the float coordinates, which no exact-value hash can agree with.
/// Deduplication in this crate is done by sorted scans instead.
#[derive(Debug, Clone)]
pub struct AxialLine<T> {
    x: f64,
    span: Interval,
    tag: Option<T>,
}

impl<T> AxialLine<T> {
    /// Creates a line at `x` spanning `a` to `b`, owned by `tag`.
    #[must_use]
    pub fn new(x: f64, a: f64, b: f64, tag: T) -> Self {
        Self {
            x,
            span: Interval::new(a, b),
            tag: Some(tag),
        }
    }

    /// Creates a line at `x` spanning `a` to `b` with no owner.
    #[must_use]
    pub fn untagged(x: f64, a: f64, b: f64) -> Self {
        Self {
            x,
            span: Interval::new(a, b),
            tag: None,
        }
    }

    /// The line's fixed coordinate.
    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Extent along the perpendicular axis.
    #[must_use]
    pub fn span(&self) -> Interval {
        self.span
    }

    /// Lower end of the span.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.span.min()
    }

    /// Upper end of the span.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.span.max()
    }

    /// The owning box id, if any.
    #[must_use]
    pub fn tag(&self) -> Option<T>
    where
        T: Copy,
    {
        self.tag
    }

    /// True iff `v` lies within the line's span.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        self.span.contains(v)
    }

    /// Cuts the line at `v`.
    ///
    /// Returns two parts when `v` lies strictly inside the span; a cut at
    /// or outside an endpoint returns the line unchanged.
    #[must_use]
    pub fn cut(&self, v: f64) -> Vec<Self>
    where
        T: Clone,
    {
        if v <= self.span.min() || v >= self.span.max() {
            return vec![self.clone()];
        }
        vec![
            Self {
                x: self.x,
                span: Interval::new(self.span.min(), v),
                tag: self.tag.clone(),
            },
            Self {
                x: self.x,
                span: Interval::new(v, self.span.max()),
                tag: self.tag.clone(),
            },
        ]
    }
}

impl<T: PartialEq> PartialEq for AxialLine<T> {
    fn eq(&self, other: &Self) -> bool {
        is_close(self.x, other.x) && self.span == other.span && self.tag == other.tag
    }
}

/// A seed line paired with its shadow — the eligible prolongation range
/// along the seed's own axis, kept separate from the core span.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowLine<T> {
    line: AxialLine<T>,
    shadow: Interval,
}

impl<T> ShadowLine<T> {
    /// Pairs a seed line with its shadow interval.
    #[must_use]
    pub fn new(line: AxialLine<T>, shadow: Interval) -> Self {
        Self { line, shadow }
    }

    /// The original seed line.
    #[must_use]
    pub fn line(&self) -> &AxialLine<T> {
        &self.line
    }

    /// The prolongation interval.
    #[must_use]
    pub fn shadow(&self) -> &Interval {
        &self.shadow
    }

    /// Materializes the shadow extent as a line at the seed's coordinate,
    /// keeping the seed's tag.
    #[must_use]
    pub fn shadow_line(&self) -> AxialLine<T>
    where
        T: Clone,
    {
        AxialLine {
            x: self.line.x,
            span: self.shadow,
            tag: self.line.tag.clone(),
        }
    }
}

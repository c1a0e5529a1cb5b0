//! One-dimensional parameter intervals on an edge.
//!
//! An edge is parameterised over `[0, 1]`; an [`Interval`] is a sub-range
//! of that domain. All operations return new values.

/// Closed parameter range `[begin, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Start parameter.
    pub begin: f64,
    /// End parameter.
    pub end: f64,
}

impl Interval {
    /// The whole edge, `[0, 1]`.
    pub const FULL: Self = Self {
        begin: 0.0,
        end: 1.0,
    };

    /// An explicitly empty range, `[1, 0]`.
    pub const EMPTY: Self = Self {
        begin: 1.0,
        end: 0.0,
    };

    /// Create an interval.
    pub fn new(begin: f64, end: f64) -> Self {
        Self { begin, end }
    }

    /// True when the interval covers nothing (`begin >= end`).
    pub fn is_degenerate(&self) -> bool {
        self.begin >= self.end
    }

    /// Overlap with `other`.
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval {
            begin: self.begin.max(other.begin),
            end: self.end.min(other.end),
        }
    }

    /// Two-piece difference: the part before `other` and the part after it.
    ///
    /// This is not general set difference. Either piece may be degenerate
    /// and has to be filtered by the caller.
    pub fn subtract(&self, other: &Interval) -> (Interval, Interval) {
        (
            Interval::new(self.begin, self.end.min(other.begin)),
            Interval::new(self.begin.max(other.end), self.end),
        )
    }

    /// Parameter length, zero when degenerate.
    pub fn length(&self) -> f64 {
        if self.is_degenerate() {
            0.0
        } else {
            self.end - self.begin
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::FULL
    }
}

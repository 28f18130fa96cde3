use crate::Float;

/// An extension trait for floating point numbers.
///
/// For now, this trait exists solely to pre-compute the rounding factor for
/// equality comparisons, which depends on the floating point representation.
pub(crate) trait FloatExt {
    /// The factor determining rounding precision.
    ///
    /// When limiting a floating point number's precision, the number is
    /// multiplied by some factor, rounded, and divided by the same factor
    /// again. Typically, that factor is a power of ten, which directly
    /// translates into significant digits after the decimal.
    const ROUNDING_FACTOR: Self;
}

impl FloatExt for f64 {
    const ROUNDING_FACTOR: f64 = 1e9;
}

impl FloatExt for f32 {
    const ROUNDING_FACTOR: f32 = 1e4;
}

// --------------------------------------------------------------------------------------------------------------------

/// The bracket left over after bisecting an interval.
///
/// The boundary being searched for always lies within `low..=high`. Which end
/// a caller should use depends on which side of the boundary satisfies its
/// requirement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bracket {
    pub low: Float,
    pub high: Float,
}

impl Bracket {
    /// Get the midpoint of the bracket.
    #[inline]
    pub fn midpoint(&self) -> Float {
        0.5 * (self.low + self.high)
    }
}

/// Bisect the interval `low..=high` for the given number of iterations.
///
/// Each iteration evaluates `go_higher` on the midpoint of the current
/// bracket. If the predicate holds, the boundary lies above the midpoint and
/// the midpoint becomes the new low end. Otherwise, it becomes the new high
/// end. The predicate should be monotone over the interval, i.e., hold for a
/// prefix and fail for the corresponding suffix. Since the iteration count is
/// fixed, this function always terminates, with precision `(high - low) /
/// 2^iterations`.
pub(crate) fn bisect<F>(low: Float, high: Float, iterations: usize, mut go_higher: F) -> Bracket
where
    F: FnMut(Float) -> bool,
{
    let mut bracket = Bracket { low, high };

    for _ in 0..iterations {
        let midpoint = bracket.midpoint();
        if go_higher(midpoint) {
            bracket.low = midpoint;
        } else {
            bracket.high = midpoint;
        }
    }

    bracket
}

// --------------------------------------------------------------------------------------------------------------------

/// A floating point accumulator.
///
/// Unlike plain summation with the `+` operator, this struct minimizes the
/// cumulative error by using [Kahan's algorithm with Neumaier's
/// improvements](https://en.wikipedia.org/wiki/Kahan_summation_algorithm).
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    sum: Float,
    compensation: Float,
}

impl Accumulator {
    #[inline]
    pub fn total(&self) -> Float {
        self.sum + self.compensation
    }
}

impl core::ops::AddAssign<Float> for Accumulator {
    fn add_assign(&mut self, rhs: Float) {
        let t = self.sum + rhs;
        if rhs.abs() < self.sum.abs() {
            self.compensation += (self.sum - t) + rhs;
        } else {
            self.compensation += (rhs - t) + self.sum;
        }
        self.sum = t;
    }
}

/// Compute the arithmetic mean. For an empty slice, this function returns
/// `None`.
pub(crate) fn mean(values: &[Float]) -> Option<Float> {
    if values.is_empty() {
        return None;
    }

    let mut accum = Accumulator::default();
    for value in values {
        accum += *value;
    }
    Some(accum.total() / values.len() as Float)
}

/// Compute the population standard deviation. For an empty slice, this
/// function returns zero.
pub(crate) fn std_dev(values: &[Float]) -> Float {
    let Some(mean) = mean(values) else {
        return 0.0;
    };

    let mut accum = Accumulator::default();
    for value in values {
        let delta = value - mean;
        accum += delta * delta;
    }
    (accum.total() / values.len() as Float).sqrt()
}

/// Compute the median. For an even number of values, this function averages
/// the two middle values. For an empty slice, it returns `None`.
pub(crate) fn median(values: &[Float]) -> Option<Float> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(Float::total_cmp);

    let middle = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted.get(middle).copied()
    } else {
        let upper = sorted.get(middle)?;
        let lower = sorted.get(middle - 1)?;
        Some(0.5 * (lower + upper))
    }
}

//! Assertion utilities for testing.
//!
//! Floating-point comparisons for statistics that go through SQL `AVG`.

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
///
/// # Panics
///
/// Panics if the absolute difference between `actual` and `expected` is greater than `epsilon`.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert that every date string lies in `[min, max]`.
///
/// ISO dates compare chronologically as strings.
pub fn assert_dates_in_range<'a>(dates: impl IntoIterator<Item = &'a str>, min: &str, max: &str) {
    for date in dates {
        assert!(
            min <= date && date <= max,
            "Date not in range: date = {}, min = {}, max = {}",
            date,
            min,
            max
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0, None);
        assert_approx_eq(75.0, 75.0 + 1e-12, None);
        assert_approx_eq(1.0, 1.001, Some(0.01));
    }

    #[test]
    fn test_assert_dates_in_range() {
        assert_dates_in_range(["2017-01-01", "2017-08-23"], "2016-08-23", "2017-08-23");
    }
}

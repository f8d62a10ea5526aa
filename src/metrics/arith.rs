/// Mean of `values`, or 0 when there are none.
///
/// Computed as a running mean so large finite inputs cannot overflow the sum. A result
/// that still ends up non-finite reads as 0.
#[must_use]
pub fn trailing_average(values: &[f64]) -> f64 {
    let mut mean = 0.0;
    for (i, v) in values.iter().enumerate() {
        #[expect(clippy::cast_precision_loss, reason = "history lengths are tiny")]
        let count = (i + 1) as f64;
        mean += (v - mean) / count;
    }

    if mean.is_finite() { mean } else { 0.0 }
}

/// `numerator / denominator`, or 0 when either side is 0.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "entity counts are far below 2^52")]
pub fn safe_ratio(numerator: i64, denominator: i64) -> f64 {
    if numerator == 0 || denominator == 0 {
        return 0.0;
    }

    numerator as f64 / denominator as f64
}

/// Convert an element count into an integer field value.
#[must_use]
pub fn count_to_i64(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_average_of_history() {
        assert!((trailing_average(&[100.0, 200.0, 300.0]) - 200.0).abs() < f64::EPSILON);
        assert!((trailing_average(&[-5.0, 5.0]) - 0.0).abs() < f64::EPSILON);
        assert!((trailing_average(&[42.0]) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_trailing_average_of_empty_history_is_zero() {
        let avg = trailing_average(&[]);
        assert!(avg.abs() < f64::EPSILON);
        assert!(avg.is_finite());
    }

    #[test]
    fn test_trailing_average_of_huge_values_stays_finite() {
        let avg = trailing_average(&[1e308, 1e308]);
        assert!(avg.is_finite());
        assert!((avg - 1e308).abs() <= 1e292);

        assert!(trailing_average(&[f64::MAX, -f64::MAX, f64::MAX]).is_finite());
    }

    #[test]
    fn test_safe_ratio() {
        assert!((safe_ratio(3, 2) - 1.5).abs() < f64::EPSILON);
        assert!((safe_ratio(1, 4) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_safe_ratio_with_zero_on_either_side() {
        for (n, d) in [(0, 0), (0, 5), (5, 0), (0, -3)] {
            let ratio = safe_ratio(n, d);
            assert!(ratio.abs() < f64::EPSILON, "ratio of {n}/{d} should be 0, got {ratio}");
        }
    }

    #[test]
    fn test_count_to_i64() {
        assert_eq!(count_to_i64(0), 0);
        assert_eq!(count_to_i64(17), 17);
    }
}

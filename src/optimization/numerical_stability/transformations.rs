//! Numerical stability utilities.
//!
//! Safe implementations of reductions that overflow or produce NaN in naïve
//! form when fed large magnitudes or `-∞` entries.
//!
//! # Provided items
//! - [`SCALE_FLOOR`]: smallest divisor accepted when turning a value range
//!   into a scale factor (machine epsilon for `f64`).
//! - [`log_sum_exp`]: stable `ln Σ exp(xᵢ)` that tolerates `-∞` entries.
//! - [`softmax_in_place`]: stable softmax of a slice/row, written in place.
//!
//! # Rationale
//! Softmax neighbor probabilities are computed from `-d²` where the
//! self-distance is `+∞`. Each row therefore carries a `-∞` that must map to
//! probability exactly zero, and an all-`-∞` row must not turn into NaN.
use ndarray::{ArrayView1, ArrayViewMut1};

/// Floor applied to per-feature ranges before inverting them.
///
/// Equal to `f64::EPSILON` (≈ 2.22e-16), so a constant feature yields a
/// scale of `1 / ε` ≈ 4.5e15: large but finite.
pub const SCALE_FLOOR: f64 = f64::EPSILON;

/// Numerically stable `ln Σᵢ exp(xᵢ)`.
///
/// - Subtracts the finite maximum before exponentiating, so large inputs do
///   not overflow.
/// - `-∞` entries contribute `exp(-∞) = 0`.
/// - Returns `-∞` for an empty input or one where every entry is `-∞`
///   (the sum of zero terms), never NaN.
/// - A `+∞` entry yields `+∞`.
pub fn log_sum_exp(values: ArrayView1<f64>) -> f64 {
    let max = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if max == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if max == f64::INFINITY {
        return f64::INFINITY;
    }
    let sum: f64 = values.iter().map(|&v| (v - max).exp()).sum();
    max + sum.ln()
}

/// Replace `values` by `softmax(values)` in place.
///
/// Shifts by the row maximum, exponentiates, then normalizes by the sum of
/// the shifted exponentials, so the row sums to one up to rounding of the
/// division. Entries equal to `-∞` become exactly `0.0`. When the maximum is
/// not finite there is no well-defined mass to distribute and the row is set
/// to zeros instead of NaN.
pub fn softmax_in_place(mut values: ArrayViewMut1<f64>) {
    let max = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    if !max.is_finite() {
        values.fill(0.0);
        return;
    }
    values.mapv_inplace(|v| (v - max).exp());
    let total = values.sum();
    values.mapv_inplace(|e| e / total);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, array};

    #[test]
    // Purpose
    // -------
    // `log_sum_exp` agrees with the naïve formula on a safe range.
    fn log_sum_exp_matches_naive_formula_on_safe_inputs() {
        let x = array![0.5, -1.0, 2.0];
        let naive = x.iter().map(|v: &f64| v.exp()).sum::<f64>().ln();
        assert_relative_eq!(log_sum_exp(x.view()), naive, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Large magnitudes do not overflow and `-∞` entries are ignored.
    fn log_sum_exp_handles_large_values_and_negative_infinity() {
        let x = array![1000.0, 1000.0, f64::NEG_INFINITY];
        assert_relative_eq!(log_sum_exp(x.view()), 1000.0 + 2f64.ln(), epsilon = 1e-9);

        let all_neg_inf = array![f64::NEG_INFINITY, f64::NEG_INFINITY];
        assert_eq!(log_sum_exp(all_neg_inf.view()), f64::NEG_INFINITY);
        assert_eq!(log_sum_exp(Array1::<f64>::zeros(0).view()), f64::NEG_INFINITY);
    }

    #[test]
    // Purpose
    // -------
    // Softmax rows sum to one, `-∞` maps to exactly zero, and an all-`-∞`
    // row becomes zeros rather than NaN.
    fn softmax_in_place_zeroes_negative_infinity_and_never_nans() {
        let mut row = array![f64::NEG_INFINITY, -1e6, -1e6 - 1.0];
        softmax_in_place(row.view_mut());
        assert_eq!(row[0], 0.0);
        assert_relative_eq!(row.sum(), 1.0, epsilon = 1e-12);
        assert!(row[1] > row[2]);

        let mut empty_mass = array![f64::NEG_INFINITY, f64::NEG_INFINITY];
        softmax_in_place(empty_mass.view_mut());
        assert_eq!(empty_mass, array![0.0, 0.0]);
    }

    #[test]
    // Purpose
    // -------
    // Rows stay normalized when the logits are huge and tightly spaced.
    //
    // Given
    // -----
    // - `-d²` for neighbors at squared distances 1e4 .. 1e10, each row with
    //   a near-tie one unit further away and a `-∞` self entry.
    //
    // Expect
    // ------
    // - Every row sums to one within 1e-14 and the nearer entry dominates.
    fn softmax_in_place_keeps_unit_mass_for_far_close_neighbors() {
        for d2 in [1e4, 1e6, 1e8, 1e10] {
            // Arrange
            let mut row = array![f64::NEG_INFINITY, -d2, -(d2 + 1.0), -(d2 + 0.5)];

            // Act
            softmax_in_place(row.view_mut());

            // Assert
            assert_eq!(row[0], 0.0);
            assert!((row.sum() - 1.0).abs() <= 1e-14, "d2 = {d2}: sum = {}", row.sum());
            assert!(row[1] > row[3] && row[3] > row[2]);
        }
    }
}

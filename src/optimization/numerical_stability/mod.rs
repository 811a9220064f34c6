//! numerical_stability — guarded reductions shared by objective code.
//!
//! Purpose
//! -------
//! Keep the overflow/NaN-prone pieces of softmax arithmetic in one place so
//! objective evaluators can rely on them without re-deriving the edge cases.
//!
//! Key behaviors
//! -------------
//! - [`log_sum_exp`] subtracts the finite row maximum and treats `-∞` as a
//!   zero-mass entry.
//! - [`softmax_in_place`] shifts a row by its maximum and divides by the
//!   shifted mass, mapping `-∞` to exactly `0.0` and all-`-∞` rows to zeros.
//! - [`SCALE_FLOOR`] is the divisor floor used when inverting value ranges.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] compare against naïve formulas on safe
//!   inputs and exercise the `±∞` tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{SCALE_FLOOR, log_sum_exp, softmax_in_place};

pub mod prelude {
    pub use super::transformations::{SCALE_FLOOR, log_sum_exp, softmax_in_place};
}

// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2025 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Floating-point helpers for display-only computations.
//!
//! Nothing here may feed back into lossless fixed-point arithmetic. These functions exist
//! for annualized rate reporting and human-readable formatting, where ordinary `f64`
//! precision is acceptable.

/// Macro for approximate floating-point equality comparison.
///
/// This macro compares two floating-point values with a specified epsilon tolerance,
/// providing a safe alternative to exact equality checks which can fail due to
/// floating-point precision issues.
///
/// # Usage
///
/// ```rust
/// use solvent_core::approx_eq;
///
/// let a = 0.1 + 0.2;
/// let b = 0.3;
/// assert!(approx_eq!(f64, a, b, epsilon = 1e-10));
/// ```
#[macro_export]
macro_rules! approx_eq {
    ($type:ty, $left:expr, $right:expr, epsilon = $epsilon:expr) => {{
        let left_val: $type = $left;
        let right_val: $type = $right;
        (left_val - right_val).abs() < $epsilon
    }};
}

/// Compounds a per-period growth `rate` over `periods` periods, returning the total growth.
///
/// Computes `(1 + rate)^periods - 1` through `ln_1p`/`exp_m1`, which keeps precision for
/// the tiny per-second rates used in lending markets where `1 + rate` would otherwise
/// round to exactly `1.0`.
#[inline]
#[must_use]
pub fn compound_growth(rate: f64, periods: u64) -> f64 {
    (rate.ln_1p() * periods as f64).exp_m1()
}

/// Returns the number of fractional digits needed to show `value` with `significant` digits.
///
/// Values with at least `significant` integer digits need no fractional digits.
#[must_use]
pub fn fraction_digits_for_significant(value: f64, significant: u32) -> usize {
    if value == 0.0 || !value.is_finite() {
        return 0;
    }
    let magnitude = value.abs().log10().floor() as i64;
    let digits = i64::from(significant) - 1 - magnitude;
    digits.max(0) as usize
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::*;

    use super::*;

    #[rstest]
    #[case(0.0, 100, 0.0)]
    #[case(0.1, 1, 0.1)]
    #[case(0.1, 2, 0.21)]
    #[case(1.0, 3, 7.0)]
    fn test_compound_growth(#[case] rate: f64, #[case] periods: u64, #[case] expected: f64) {
        let result = compound_growth(rate, periods);
        assert!(
            approx_eq!(f64, result, expected, epsilon = 1e-12),
            "Expected {expected}, was {result}"
        );
    }

    #[rstest]
    fn test_compound_growth_tiny_rate_keeps_precision() {
        // ~5% APR expressed per second
        let rate = 0.05 / 31_536_000.0;
        let result = compound_growth(rate, 31_536_000);
        assert!(approx_eq!(f64, result, 0.05_f64.exp_m1(), epsilon = 1e-9));
    }

    #[rstest]
    #[case(0.0, 6, 0)]
    #[case(1.0, 6, 5)]
    #[case(1234.5678, 6, 2)]
    #[case(123_456_789.0, 6, 0)]
    #[case(0.001_234_5, 3, 5)]
    #[case(-12.5, 3, 1)]
    #[case(f64::NAN, 3, 0)]
    fn test_fraction_digits_for_significant(
        #[case] value: f64,
        #[case] significant: u32,
        #[case] expected: usize,
    ) {
        assert_eq!(fraction_digits_for_significant(value, significant), expected);
    }
}

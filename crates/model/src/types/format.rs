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

//! String output formats for [`FixedPointNumber`].
//!
//! The `Int`, `Decimal` and `DecimalWithTrailingZeros` formats are exact and derived purely from
//! the raw integer. The `LossyHuman*` formats go through `f64` and are for display only; they
//! are never round-trip safe.

use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};
use solvent_core::math::fraction_digits_for_significant;
use thousands::{Separable, SeparatorPolicy, digits::ASCII_DECIMAL};

use super::{fixed::FixedPointNumber, scaler::Base};

/// The string format of a [`FixedPointNumber`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GnFormat {
    /// The raw scaled integer.
    Int,
    /// The exact decimal value without trailing zeros.
    #[default]
    Decimal,
    /// The decimal value with exactly `decimal_places()` fractional digits (truncated).
    DecimalWithTrailingZeros,
    /// A grouped, significant-digit limited rendering such as `1,234.57` (lossy).
    LossyHuman,
    /// A compact rendering with magnitude suffixes such as `1.23M` (lossy).
    LossyHumanCompact,
}

/// Configuration for the lossy human-readable formats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HumanFormatConfig {
    /// The maximum significant digits shown by [`GnFormat::LossyHuman`].
    pub significant_digits: u32,
    /// The significant digits shown by [`GnFormat::LossyHumanCompact`].
    pub compact_significant_digits: u32,
    /// The separator between groups of three integer digits.
    pub group_separator: String,
    /// The separator between the integer and fractional digits.
    pub decimal_separator: String,
}

impl Default for HumanFormatConfig {
    /// Creates a new default [`HumanFormatConfig`] instance.
    fn default() -> Self {
        Self {
            significant_digits: 6,
            compact_significant_digits: 3,
            group_separator: ",".to_string(),
            decimal_separator: ".".to_string(),
        }
    }
}

const COMPACT_SUFFIXES: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

impl FixedPointNumber {
    /// Returns the value rendered in the given `format`, using the default
    /// [`HumanFormatConfig`] for the lossy formats.
    #[must_use]
    pub fn to_string_format(&self, format: GnFormat) -> String {
        self.to_human_string(format, &HumanFormatConfig::default())
    }

    /// Returns the value rendered in the given `format` with `config` applied to the lossy
    /// formats.
    #[must_use]
    pub fn to_human_string(&self, format: GnFormat, config: &HumanFormatConfig) -> String {
        match format {
            GnFormat::Int => self.raw().to_str_radix(10),
            GnFormat::Decimal => self.to_decimal_string(false),
            GnFormat::DecimalWithTrailingZeros => self.to_decimal_string(true),
            GnFormat::LossyHuman => format_human(self.approx_f64(), config),
            GnFormat::LossyHumanCompact => format_compact(self.approx_f64(), config),
        }
    }

    /// Returns the exact decimal rendering.
    ///
    /// With `trailing_zeros` the fraction has exactly `decimal_places()` digits, truncating
    /// any further binary-fraction digits; otherwise trailing zeros are removed.
    #[must_use]
    pub fn to_decimal_string(&self, trailing_zeros: bool) -> String {
        let resolution = self.resolution() as usize;

        // x / 2^r == x * 5^r / 10^r, so base 2 values have an exact r-place decimal form
        let magnitude = match self.base() {
            Base::Ten => self.raw().abs(),
            Base::Two => self.raw().abs() * BigInt::from(5u32).pow(self.resolution()),
        };

        let digits = format!(
            "{:0>width$}",
            magnitude.to_str_radix(10),
            width = resolution + 1
        );
        let (integer, fraction) = digits.split_at(digits.len() - resolution);
        let fraction = if trailing_zeros {
            &fraction[..self.decimal_places() as usize]
        } else {
            fraction.trim_end_matches('0')
        };

        let body = if fraction.is_empty() {
            integer.to_string()
        } else {
            format!("{integer}.{fraction}")
        };
        with_sign(self.is_negative(), body)
    }
}

fn with_sign(negative: bool, body: String) -> String {
    if negative && body.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        format!("-{body}")
    } else {
        body
    }
}

fn group_and_join(value: f64, fraction_digits: usize, config: &HumanFormatConfig) -> String {
    let text = format!("{:.*}", fraction_digits, value.abs());
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let policy = SeparatorPolicy {
        separator: &config.group_separator,
        groups: &[3],
        digits: ASCII_DECIMAL,
    };
    let grouped = integer.separate_by_policy(policy);

    let body = if fraction.is_empty() {
        grouped
    } else {
        format!("{grouped}{}{fraction}", config.decimal_separator)
    };
    with_sign(value < 0.0, body)
}

fn format_human(value: f64, config: &HumanFormatConfig) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fraction_digits = fraction_digits_for_significant(value, config.significant_digits);
    group_and_join(value, fraction_digits, config)
}

fn round_to_significant(value: f64, significant: u32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(magnitude + 1 - significant.max(1) as i32);
    (value / factor).round() * factor
}

fn format_compact(value: f64, config: &HumanFormatConfig) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let significant = config.compact_significant_digits;
    let rounded = round_to_significant(value, significant);

    for (threshold, suffix) in COMPACT_SUFFIXES {
        if rounded.abs() >= threshold {
            let scaled = rounded / threshold;
            let fraction_digits = fraction_digits_for_significant(scaled, significant);
            return format!("{}{suffix}", group_and_join(scaled, fraction_digits, config));
        }
    }

    let fraction_digits = fraction_digits_for_significant(rounded, significant);
    group_and_join(rounded, fraction_digits, config)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::types::stubs::{gn, gn18};

    #[rstest]
    #[case("1", "1")]
    #[case("1.5", "1.5")]
    #[case("-1.50", "-1.5")]
    #[case("0.000000000000000001", "0.000000000000000001")]
    #[case("100", "100")]
    #[case("-0", "0")]
    fn test_decimal(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(gn18(text).to_string_format(GnFormat::Decimal), expected);
    }

    #[rstest]
    fn test_decimal_with_trailing_zeros() {
        assert_eq!(
            gn("1.5", 6, Base::Ten).to_string_format(GnFormat::DecimalWithTrailingZeros),
            "1.500000"
        );
        assert_eq!(
            gn("12", 0, Base::Ten).to_string_format(GnFormat::DecimalWithTrailingZeros),
            "12"
        );
    }

    #[rstest]
    fn test_decimal_base_two() {
        // 1/16 = 0.0625 exactly
        let value = FixedPointNumber::from_raw(BigInt::from(1), 4, Base::Two).unwrap();
        assert_eq!(value.to_string_format(GnFormat::Decimal), "0.0625");
        // decimal_places() for 2^4 is 2, so the fixed-width rendering truncates
        assert_eq!(value.to_string_format(GnFormat::DecimalWithTrailingZeros), "0.06");
        assert_eq!(value.neg().to_string_format(GnFormat::Decimal), "-0.0625");
    }

    #[rstest]
    fn test_negative_fixed_width_keeps_sign() {
        let value = FixedPointNumber::from_raw(BigInt::from(-1), 4, Base::Two).unwrap();
        assert_eq!(value.to_string_format(GnFormat::DecimalWithTrailingZeros), "-0.06");
    }

    #[rstest]
    fn test_int() {
        assert_eq!(gn("1", 6, Base::Ten).to_string_format(GnFormat::Int), "1000000");
        assert_eq!(gn("-2", 4, Base::Two).to_string_format(GnFormat::Int), "-32");
    }

    #[rstest]
    fn test_end_to_end_balance() {
        let balance = FixedPointNumber::from_raw_str("1000000", 6, Base::Ten).unwrap();
        assert_eq!(balance.to_string(), "1");
    }

    #[rstest]
    #[case("1234567.891", "1,234,568")]
    #[case("1234.5678", "1,234.57")]
    #[case("-0.00123456789", "-0.00123457")]
    #[case("0", "0")]
    #[case("999", "999")]
    fn test_lossy_human(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(gn18(text).to_string_format(GnFormat::LossyHuman), expected);
    }

    #[rstest]
    #[case("999", "999")]
    #[case("1234", "1.23K")]
    #[case("1234567", "1.23M")]
    #[case("-2500000000", "-2.5B")]
    #[case("999999", "1M")]
    #[case("7000000000000", "7T")]
    #[case("0.0123456", "0.0123")]
    fn test_lossy_human_compact(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(gn18(text).to_string_format(GnFormat::LossyHumanCompact), expected);
    }

    #[rstest]
    fn test_human_config_separators() {
        let config = HumanFormatConfig {
            group_separator: ".".to_string(),
            decimal_separator: ",".to_string(),
            ..Default::default()
        };
        assert_eq!(gn18("1234.5").to_human_string(GnFormat::LossyHuman, &config), "1.234,5");
    }

    #[rstest]
    fn test_human_config_serde_defaults() {
        let config: HumanFormatConfig = serde_json::from_str(r#"{"significant_digits": 4}"#).unwrap();
        assert_eq!(config.significant_digits, 4);
        assert_eq!(config.group_separator, ",");
        assert!(serde_json::from_str::<HumanFormatConfig>(r#"{"unknown": 1}"#).is_err());
    }
}

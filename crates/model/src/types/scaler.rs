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

//! Functions for computing and validating fixed-point scaling factors.
//!
//! A scaler is the multiplicative factor `base^resolution` which converts a raw integer into
//! the value it represents. Scaling factors are computed on demand; there is no global
//! registry or memoization.

use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use num_traits::One;
use serde::{Deserialize, Serialize};
use solvent_core::correctness::{check_in_range_inclusive_u32, check_predicate_true};

use super::error::FixedPointError;

/// The maximum fixed-point resolution.
pub const MAX_RESOLUTION: u32 = 1_000_000;

/// The base of a fixed-point scaler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Base {
    /// Binary scaler, e.g. the Q64.96 sqrt-price format.
    Two = 2,
    /// Decimal scaler, e.g. ERC-20 token decimals.
    Ten = 10,
}

impl Base {
    /// Returns the numeric value of the base.
    #[must_use]
    pub const fn value(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u8> for Base {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            10 => Ok(Self::Ten),
            other => Err(format!("Invalid scaler base {other}, expected 2 or 10")),
        }
    }
}

impl From<Base> for u8 {
    fn from(value: Base) -> Self {
        value as Self
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// The `(base, resolution)` pair identifying a scaling factor of `base^resolution`.
///
/// Two fixed-point numbers are scaler-compatible only if their scalers are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scaler {
    pub base: Base,
    pub resolution: u32,
}

/// The Q64.96 scaler used for on-chain sqrt prices.
pub const Q96: Scaler = Scaler::new(Base::Two, 96);

/// The 18-decimal scaler used for WAD values such as utilization.
pub const WAD: Scaler = Scaler::new(Base::Ten, 18);

/// The scaler for whole atomic units.
pub const UNIT: Scaler = Scaler::new(Base::Ten, 0);

impl Scaler {
    /// Creates a new [`Scaler`] without validation.
    #[must_use]
    pub const fn new(base: Base, resolution: u32) -> Self {
        Self { base, resolution }
    }

    /// Creates a new [`Scaler`] with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::InvalidResolution`] if the resolution is invalid for the base.
    pub fn new_checked(base: Base, resolution: u32) -> Result<Self, FixedPointError> {
        check_resolution(base, resolution)?;
        Ok(Self::new(base, resolution))
    }

    /// Returns the scaling factor `base^resolution`.
    #[must_use]
    pub fn factor(&self) -> BigInt {
        match self.base {
            Base::Two => BigInt::one() << self.resolution,
            Base::Ten => BigInt::from(10u32).pow(self.resolution),
        }
    }

    /// Returns `ceil(resolution * log10(base))`, the decimal places needed to show one
    /// unit of this scaler.
    ///
    /// Computed with integers only: base 10 needs exactly `resolution` places, and for
    /// base 2 the count equals the number of decimal digits of `2^resolution`.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        match self.base {
            Base::Ten => self.resolution,
            Base::Two if self.resolution == 0 => 0,
            Base::Two => self.factor().to_str_radix(10).len() as u32,
        }
    }
}

impl Display for Scaler {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}^{}", self.base, self.resolution)
    }
}

/// Checks the `resolution` is valid for the given `base`.
///
/// # Errors
///
/// Returns [`FixedPointError::InvalidResolution`]:
/// - If `resolution` exceeds [`MAX_RESOLUTION`].
/// - If `base` is 2 and `resolution` is not a multiple of 4 (on-chain binary scalers are
///   nibble aligned).
pub fn check_resolution(base: Base, resolution: u32) -> Result<(), FixedPointError> {
    let invalid = |e: anyhow::Error| FixedPointError::InvalidResolution {
        base,
        resolution,
        reason: e.to_string(),
    };

    check_in_range_inclusive_u32(resolution, 0, MAX_RESOLUTION, "resolution").map_err(invalid)?;
    if base == Base::Two {
        check_predicate_true(
            resolution % 4 == 0,
            "base 2 resolution must be a multiple of 4",
        )
        .map_err(invalid)?;
    }
    Ok(())
}

/// Returns the scaling factor for `(base, resolution)` after validating the resolution.
///
/// # Errors
///
/// Returns [`FixedPointError::InvalidResolution`] if the resolution is invalid for the base.
pub fn scaler(base: Base, resolution: u32) -> Result<BigInt, FixedPointError> {
    Ok(Scaler::new_checked(base, resolution)?.factor())
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Base::Ten, 0, "1")]
    #[case(Base::Ten, 6, "1000000")]
    #[case(Base::Ten, 18, "1000000000000000000")]
    #[case(Base::Two, 0, "1")]
    #[case(Base::Two, 4, "16")]
    #[case(Base::Two, 96, "79228162514264337593543950336")]
    fn test_scaler_values(#[case] base: Base, #[case] resolution: u32, #[case] expected: &str) {
        assert_eq!(scaler(base, resolution).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case(Base::Two, 3)]
    #[case(Base::Two, 1)]
    #[case(Base::Two, 94)]
    #[case(Base::Ten, MAX_RESOLUTION + 1)]
    #[case(Base::Two, MAX_RESOLUTION + 4)]
    fn test_scaler_invalid_resolution(#[case] base: Base, #[case] resolution: u32) {
        let err = scaler(base, resolution).unwrap_err();
        assert!(matches!(err, FixedPointError::InvalidResolution { .. }));
    }

    #[rstest]
    fn test_invalid_resolution_reason() {
        let err = check_resolution(Base::Two, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid resolution 3 for base 2: Condition failed: base 2 resolution must be a multiple of 4"
        );
    }

    #[rstest]
    fn test_max_resolution_is_valid() {
        assert!(check_resolution(Base::Ten, MAX_RESOLUTION).is_ok());
        assert!(check_resolution(Base::Two, MAX_RESOLUTION).is_ok());
    }

    #[rstest]
    #[case(Base::Ten, 0, 0)]
    #[case(Base::Ten, 18, 18)]
    #[case(Base::Two, 0, 0)]
    #[case(Base::Two, 4, 2)] // 16
    #[case(Base::Two, 8, 3)] // 256
    #[case(Base::Two, 96, 29)]
    fn test_decimal_places(#[case] base: Base, #[case] resolution: u32, #[case] expected: u32) {
        assert_eq!(Scaler::new(base, resolution).decimal_places(), expected);
    }

    #[rstest]
    fn test_display() {
        assert_eq!(Q96.to_string(), "2^96");
        assert_eq!(WAD.to_string(), "10^18");
    }

    #[rstest]
    fn test_base_try_from() {
        assert_eq!(Base::try_from(2).unwrap(), Base::Two);
        assert_eq!(Base::try_from(10).unwrap(), Base::Ten);
        assert!(Base::try_from(16).is_err());
    }

    #[rstest]
    fn test_base_serde() {
        let json = serde_json::to_string(&Base::Two).unwrap();
        assert_eq!(json, "2");
        let base: Base = serde_json::from_str("10").unwrap();
        assert_eq!(base, Base::Ten);
        assert!(serde_json::from_str::<Base>("3").is_err());
    }
}

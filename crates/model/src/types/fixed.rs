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

//! An immutable, arbitrary-precision fixed-point number with an explicit scaler.
//!
//! A [`FixedPointNumber`] stores a whole `raw` integer together with the `(base, resolution)`
//! pair that scales it: the represented value is `raw / base^resolution`. All arithmetic is
//! integer arithmetic on `raw`, and every division truncates toward zero, mirroring on-chain
//! `div`/`sdiv` semantics so results reproduce contract math bit for bit.
//!
//! Scaler-sensitive operations (`add`, `sub` and the comparison family) refuse to combine
//! numbers at different scalers; call [`FixedPointNumber::set_resolution`] first.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display, Formatter},
};

use alloy_primitives::U256;
use num_bigint::{BigInt, Sign};
use num_traits::{FromPrimitive, Signed, Zero};
use serde::{Deserialize, Serialize};
use solvent_core::parsing::{parse_decimal_str, parse_integer_str};

use super::{
    error::FixedPointError,
    lossy::Lossy,
    scaler::{Base, Scaler, check_resolution},
};

/// Short alias for [`FixedPointNumber`].
pub type GN = FixedPointNumber;

/// Represents a signed fixed-point number of arbitrary precision.
///
/// Structural equality (`==`) compares the raw value *and* the scaler, so `1.0` at resolution 6
/// is not `==` to `1.0` at resolution 18. Use [`FixedPointNumber::equals`] for the
/// scaler-checked comparison.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FixedPointRepr", into = "FixedPointRepr")]
pub struct FixedPointNumber {
    raw: BigInt,
    resolution: u32,
    base: Base,
}

impl FixedPointNumber {
    fn new_unchecked(raw: BigInt, resolution: u32, base: Base) -> Self {
        Self {
            raw,
            resolution,
            base,
        }
    }

    fn with_raw(&self, raw: BigInt) -> Self {
        Self::new_unchecked(raw, self.resolution, self.base)
    }

    /// Creates a new [`FixedPointNumber`] from decimal text such as `"-1234.5678"`.
    ///
    /// Fractional digits beyond what the scaler can represent are truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns an error:
    /// - If `resolution` is invalid for `base`.
    /// - If `text` is not a plain decimal string.
    pub fn from_decimal_str(text: &str, resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        check_resolution(base, resolution)?;

        let parts = parse_decimal_str(text).map_err(|e| FixedPointError::Parse(e.to_string()))?;
        let digits = BigInt::parse_bytes(parts.digits().as_bytes(), 10)
            .ok_or_else(|| FixedPointError::Parse(format!("invalid digits in '{text}'")))?;
        let written_scale = BigInt::from(10u32).pow(parts.precision() as u32);

        let magnitude = digits * Scaler::new(base, resolution).factor() / written_scale;
        let raw = if parts.negative { -magnitude } else { magnitude };

        Ok(Self::new_unchecked(raw, resolution, base))
    }

    /// Creates a new [`FixedPointNumber`] from the given `raw` integer and scaler.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is invalid for `base`.
    pub fn from_raw(raw: BigInt, resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        check_resolution(base, resolution)?;
        Ok(Self::new_unchecked(raw, resolution, base))
    }

    /// Creates a new [`FixedPointNumber`] from raw integer text, either decimal or `0x`
    /// hexadecimal as returned by on-chain reads.
    ///
    /// # Errors
    ///
    /// Returns an error:
    /// - If `resolution` is invalid for `base`.
    /// - If `text` has a non-zero fractional part ([`FixedPointError::NonIntegerConstruction`]).
    /// - If `text` is not an integer string.
    pub fn from_raw_str(text: &str, resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        check_resolution(base, resolution)?;

        let Some(integer) =
            parse_integer_str(text).map_err(|e| FixedPointError::Parse(e.to_string()))?
        else {
            return Err(FixedPointError::NonIntegerConstruction(text.to_string()));
        };

        let magnitude = BigInt::parse_bytes(integer.digits.as_bytes(), integer.radix)
            .ok_or_else(|| FixedPointError::Parse(format!("invalid raw integer '{text}'")))?;
        let raw = if integer.negative { -magnitude } else { magnitude };

        Ok(Self::new_unchecked(raw, resolution, base))
    }

    /// Creates a new [`FixedPointNumber`] from a raw atomic-unit count given as a float.
    ///
    /// # Errors
    ///
    /// Returns an error:
    /// - If `resolution` is invalid for `base`.
    /// - If `value` is not finite or not a whole number.
    pub fn from_raw_f64(value: f64, resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        check_resolution(base, resolution)?;

        if !value.is_finite() || value.fract() != 0.0 {
            return Err(FixedPointError::NonIntegerConstruction(value.to_string()));
        }
        let raw = BigInt::from_f64(value)
            .ok_or_else(|| FixedPointError::NonIntegerConstruction(value.to_string()))?;

        Ok(Self::new_unchecked(raw, resolution, base))
    }

    /// Creates a new [`FixedPointNumber`] from an on-chain `U256` raw value.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is invalid for `base`.
    pub fn from_u256(value: U256, resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        let raw = BigInt::from_bytes_be(Sign::Plus, &value.to_be_bytes::<32>());
        Self::from_raw(raw, resolution, base)
    }

    /// Creates a new [`FixedPointNumber`] with a value of zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is invalid for `base`.
    pub fn zero(resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        Self::from_raw(BigInt::zero(), resolution, base)
    }

    /// Creates a new [`FixedPointNumber`] with a value of one whole unit.
    ///
    /// # Errors
    ///
    /// Returns an error if `resolution` is invalid for `base`.
    pub fn one(resolution: u32, base: Base) -> Result<Self, FixedPointError> {
        check_resolution(base, resolution)?;
        let raw = Scaler::new(base, resolution).factor();
        Ok(Self::new_unchecked(raw, resolution, base))
    }

    /// Returns the raw scaled integer.
    #[must_use]
    pub fn raw(&self) -> &BigInt {
        &self.raw
    }

    /// Returns the resolution (exponent of the scaler).
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Returns the base of the scaler.
    #[must_use]
    pub fn base(&self) -> Base {
        self.base
    }

    /// Returns the `(base, resolution)` scaler of this number.
    #[must_use]
    pub fn scaler(&self) -> Scaler {
        Scaler::new(self.base, self.resolution)
    }

    /// Returns the number of decimal places needed to show one unit of this number's scaler.
    #[must_use]
    pub fn decimal_places(&self) -> u32 {
        self.scaler().decimal_places()
    }

    /// Checks `other` has the same scaler as `self`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn check_same_scaler(&self, other: &Self) -> Result<(), FixedPointError> {
        if self.base != other.base || self.resolution != other.resolution {
            return Err(FixedPointError::ScalerMismatch {
                lhs: self.scaler(),
                rhs: other.scaler(),
            });
        }
        Ok(())
    }

    /// Compares `self` with `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn compare(&self, other: &Self) -> Result<Ordering, FixedPointError> {
        self.check_same_scaler(other)?;
        Ok(self.raw.cmp(&other.raw))
    }

    /// Returns `true` if `self` equals `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn equals(&self, other: &Self) -> Result<bool, FixedPointError> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    /// Returns `true` if `self` is greater than `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn gt(&self, other: &Self) -> Result<bool, FixedPointError> {
        Ok(self.compare(other)? == Ordering::Greater)
    }

    /// Returns `true` if `self` is greater than or equal to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn gte(&self, other: &Self) -> Result<bool, FixedPointError> {
        Ok(self.compare(other)? != Ordering::Less)
    }

    /// Returns `true` if `self` is less than `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn lt(&self, other: &Self) -> Result<bool, FixedPointError> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Returns `true` if `self` is less than or equal to `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn lte(&self, other: &Self) -> Result<bool, FixedPointError> {
        Ok(self.compare(other)? != Ordering::Greater)
    }

    /// Returns the greater of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn max(&self, other: &Self) -> Result<Self, FixedPointError> {
        Ok(if self.lt(other)? { other.clone() } else { self.clone() })
    }

    /// Returns the lesser of `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn min(&self, other: &Self) -> Result<Self, FixedPointError> {
        Ok(if self.gt(other)? { other.clone() } else { self.clone() })
    }

    /// Returns `true` if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }

    /// Returns `true` if the value is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.raw.is_positive()
    }

    /// Returns `true` if the value is zero or positive.
    #[must_use]
    pub fn is_non_negative(&self) -> bool {
        !self.raw.is_negative()
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.raw.is_negative()
    }

    /// Returns `true` if the value is zero or negative.
    #[must_use]
    pub fn is_non_positive(&self) -> bool {
        !self.raw.is_positive()
    }

    /// Returns `self + other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn add(&self, other: &Self) -> Result<Self, FixedPointError> {
        self.check_same_scaler(other)?;
        Ok(self.with_raw(&self.raw + &other.raw))
    }

    /// Returns `self - other`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::ScalerMismatch`] if the scalers differ.
    pub fn sub(&self, other: &Self) -> Result<Self, FixedPointError> {
        self.check_same_scaler(other)?;
        Ok(self.with_raw(&self.raw - &other.raw))
    }

    /// Returns `self * other` expressed in `self`'s scaler.
    ///
    /// Computed as `self.raw * other.raw / other.scaler`, so mixed scalers are allowed and
    /// the result truncates toward zero.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        self.with_raw(&self.raw * &other.raw / other.scaler().factor())
    }

    /// Returns `self / other` expressed in `self`'s scaler.
    ///
    /// Computed as `self.raw * other.scaler / other.raw`, truncating toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::DivisionByZero`] if `other` is zero.
    pub fn div(&self, other: &Self) -> Result<Self, FixedPointError> {
        if other.raw.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        Ok(self.with_raw(&self.raw * other.scaler().factor() / &other.raw))
    }

    /// Returns the truncated square root in the same scaler.
    ///
    /// The value is first re-expressed with [`Self::decimal_places`] decimal places, the
    /// integer square root is taken there, and the result is scaled back. Each step truncates.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::NegativeSqrt`] if the value is negative.
    pub fn sqrt(&self) -> Result<Self, FixedPointError> {
        if self.raw.is_negative() {
            return Err(FixedPointError::NegativeSqrt(self.to_string()));
        }

        let factor = self.scaler().factor();
        let decimal_scale = BigInt::from(10u32).pow(self.decimal_places());

        let decimal_raw = &self.raw * &decimal_scale / &factor;
        let decimal_root = (decimal_raw * &decimal_scale).sqrt();

        Ok(self.with_raw(decimal_root * factor / decimal_scale))
    }

    /// Returns `self * self`.
    #[must_use]
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns the negated value.
    #[must_use]
    pub fn neg(&self) -> Self {
        self.with_raw(-&self.raw)
    }

    /// Returns the absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        self.with_raw(self.raw.abs())
    }

    /// Returns the same value re-expressed at `new_resolution` (same base).
    ///
    /// Lowering the resolution truncates the lost low-order digits toward zero.
    ///
    /// # Errors
    ///
    /// Returns an error if `new_resolution` is invalid for this number's base.
    pub fn set_resolution(&self, new_resolution: u32) -> Result<Self, FixedPointError> {
        check_resolution(self.base, new_resolution)?;

        let raw = match new_resolution.cmp(&self.resolution) {
            Ordering::Equal => self.raw.clone(),
            Ordering::Greater => {
                let shift = Scaler::new(self.base, new_resolution - self.resolution).factor();
                &self.raw * shift
            }
            Ordering::Less => {
                let shift = Scaler::new(self.base, self.resolution - new_resolution).factor();
                &self.raw / shift
            }
        };

        Ok(Self::new_unchecked(raw, new_resolution, self.base))
    }

    /// Returns the raw integer as a [`BigInt`] (lossless).
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        self.raw.clone()
    }

    /// Returns the raw integer as an on-chain `U256`.
    ///
    /// # Errors
    ///
    /// Returns [`FixedPointError::Overflow`] if the raw value is negative or wider than 256 bits.
    pub fn to_u256(&self) -> Result<U256, FixedPointError> {
        if self.raw.is_negative() {
            return Err(FixedPointError::Overflow(format!(
                "negative raw value {} cannot be a U256",
                self.raw
            )));
        }
        let (_, bytes) = self.raw.to_bytes_be();
        U256::try_from_be_slice(&bytes).ok_or_else(|| {
            FixedPointError::Overflow(format!("raw value {} exceeds 256 bits", self.raw))
        })
    }

    /// Returns the value as an `f64` wrapped in [`Lossy`], emitting a warning.
    ///
    /// The result is display-only and has no conversion back into a [`FixedPointNumber`].
    #[must_use]
    pub fn to_f64_lossy(&self) -> Lossy<f64> {
        let value = self.approx_f64();
        log::warn!("Lossy f64 conversion of {self} ({}), result {value}", self.scaler());
        Lossy::new(value)
    }

    /// Returns the nearest `f64` without emitting a diagnostic, for formatting paths
    /// which are already labeled lossy.
    pub(crate) fn approx_f64(&self) -> f64 {
        const APPROX_FRACTION_DIGITS: u32 = 40;

        let digits_scale = BigInt::from(10u32).pow(APPROX_FRACTION_DIGITS);
        let scaled = self.raw.abs() * digits_scale / self.scaler().factor();
        let digits = format!(
            "{:0>width$}",
            scaled.to_str_radix(10),
            width = APPROX_FRACTION_DIGITS as usize + 1
        );
        let split = digits.len() - APPROX_FRACTION_DIGITS as usize;
        let text = format!("{}.{}", &digits[..split], &digits[split..]);

        let magnitude = text.parse::<f64>().unwrap_or(f64::INFINITY);
        if self.raw.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Returns `true` if the value is a whole number of units.
    #[must_use]
    pub fn is_whole(&self) -> bool {
        (&self.raw % self.scaler().factor()).is_zero()
    }
}

impl Debug for FixedPointNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}({}, scaler={})",
            stringify!(FixedPointNumber),
            self,
            self.scaler()
        )
    }
}

impl Display for FixedPointNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_decimal_string(false))
    }
}

/// The serialized form: the raw integer as a decimal string with its scaler.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct FixedPointRepr {
    raw: String,
    resolution: u32,
    base: Base,
}

impl From<FixedPointNumber> for FixedPointRepr {
    fn from(value: FixedPointNumber) -> Self {
        Self {
            raw: value.raw.to_str_radix(10),
            resolution: value.resolution,
            base: value.base,
        }
    }
}

impl TryFrom<FixedPointRepr> for FixedPointNumber {
    type Error = FixedPointError;

    fn try_from(value: FixedPointRepr) -> Result<Self, Self::Error> {
        Self::from_raw_str(&value.raw, value.resolution, value.base)
    }
}

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

//! Tick and sqrt-price representations of a concentrated-liquidity pool price.
//!
//! Sqrt prices are [`FixedPointNumber`]s at the Q64.96 scaler (`base 2, resolution 96`), the
//! format pools store them in. The bridges below convert between that form, the raw `U160`
//! returned by contract reads, and ticks.

use alloy_primitives::{U160, U256};
use num_bigint::{BigInt, Sign};

use crate::{
    defi::{
        error::ValuationError,
        tick_map::tick_math::{
            MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_sqrt_ratio_at_tick, get_tick_at_sqrt_ratio,
        },
    },
    types::{FixedPointNumber, scaler::Q96},
};

pub mod sqrt_price_math;
pub mod tick_math;

/// A snapshot of a pool's current price, either as a tick or as a Q64.96 sqrt price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceState {
    Tick(i32),
    SqrtPrice(FixedPointNumber),
}

impl PriceState {
    /// Creates a [`PriceState`] from a raw `sqrtPriceX96` contract value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is outside the valid sqrt-price range.
    pub fn from_sqrt_price_x96(sqrt_price_x96: U160) -> Result<Self, ValuationError> {
        Ok(Self::SqrtPrice(sqrt_price_from_x96(sqrt_price_x96)?))
    }

    /// Returns the Q64.96 sqrt price of this state.
    ///
    /// # Errors
    ///
    /// Returns an error:
    /// - If the tick is out of range.
    /// - If the sqrt price is not at the Q64.96 scaler or outside the valid range.
    pub fn sqrt_price(&self) -> Result<FixedPointNumber, ValuationError> {
        match self {
            Self::Tick(tick) => sqrt_price_at_tick(*tick),
            Self::SqrtPrice(sqrt_price) => {
                check_sqrt_price(sqrt_price)?;
                Ok(sqrt_price.clone())
            }
        }
    }

    /// Returns the tick of this state (the greatest tick at or below a sqrt price).
    ///
    /// # Errors
    ///
    /// Returns an error if the state is out of range.
    pub fn tick(&self) -> Result<i32, ValuationError> {
        match self {
            Self::Tick(tick) => {
                tick_math::check_tick(*tick)?;
                Ok(*tick)
            }
            Self::SqrtPrice(sqrt_price) => tick_at_sqrt_price(sqrt_price),
        }
    }
}

/// Checks `sqrt_price` is a Q64.96 value within [`MIN_SQRT_RATIO`, `MAX_SQRT_RATIO`].
///
/// # Errors
///
/// Returns an error if either check fails.
pub fn check_sqrt_price(sqrt_price: &FixedPointNumber) -> Result<(), ValuationError> {
    let value = sqrt_price_to_x96(sqrt_price)?;
    if value < MIN_SQRT_RATIO || value > MAX_SQRT_RATIO {
        return Err(ValuationError::SqrtPriceOutOfRange(value.to_string()));
    }
    Ok(())
}

/// Returns the Q64.96 sqrt price at `tick`.
///
/// # Errors
///
/// Returns [`ValuationError::TickOutOfRange`] if `tick` is out of range.
pub fn sqrt_price_at_tick(tick: i32) -> Result<FixedPointNumber, ValuationError> {
    sqrt_price_from_x96(get_sqrt_ratio_at_tick(tick)?)
}

/// Returns the greatest tick whose sqrt price is at or below `sqrt_price`.
///
/// # Errors
///
/// Returns an error if `sqrt_price` is not a Q64.96 value within range.
pub fn tick_at_sqrt_price(sqrt_price: &FixedPointNumber) -> Result<i32, ValuationError> {
    get_tick_at_sqrt_ratio(sqrt_price_to_x96(sqrt_price)?)
}

/// Returns a Q64.96 [`FixedPointNumber`] holding the raw `sqrt_price_x96`.
///
/// # Errors
///
/// Returns an error if `sqrt_price_x96` is outside the valid sqrt-price range.
pub fn sqrt_price_from_x96(sqrt_price_x96: U160) -> Result<FixedPointNumber, ValuationError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 > MAX_SQRT_RATIO {
        return Err(ValuationError::SqrtPriceOutOfRange(sqrt_price_x96.to_string()));
    }
    let raw = BigInt::from_bytes_be(Sign::Plus, &sqrt_price_x96.to_be_bytes::<20>());
    Ok(FixedPointNumber::from_raw(raw, Q96.resolution, Q96.base)?)
}

/// Returns the raw `U160` of a Q64.96 sqrt price.
///
/// # Errors
///
/// Returns an error:
/// - If `sqrt_price` is not at the Q64.96 scaler.
/// - If the raw value is negative or does not fit 160 bits.
pub fn sqrt_price_to_x96(sqrt_price: &FixedPointNumber) -> Result<U160, ValuationError> {
    if sqrt_price.scaler() != Q96 {
        return Err(ValuationError::InvalidSqrtPriceScaler(sqrt_price.scaler()));
    }
    let value = sqrt_price
        .to_u256()
        .map_err(|e| ValuationError::SqrtPriceOutOfRange(e.to_string()))?;
    if value > U256::from(U160::MAX) {
        return Err(ValuationError::SqrtPriceOutOfRange(value.to_string()));
    }
    Ok(U160::saturating_from(value))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::types::{Base, stubs::{gn18, q96_one}};

    #[rstest]
    fn test_sqrt_price_at_tick_zero_is_one(q96_one: FixedPointNumber) {
        assert_eq!(sqrt_price_at_tick(0).unwrap(), q96_one);
    }

    #[rstest]
    fn test_price_state_round_trip() {
        let state = PriceState::Tick(-23_028);
        let sqrt_price = state.sqrt_price().unwrap();
        assert_eq!(PriceState::SqrtPrice(sqrt_price).tick().unwrap(), -23_028);
    }

    #[rstest]
    fn test_from_sqrt_price_x96() {
        let state = PriceState::from_sqrt_price_x96(MIN_SQRT_RATIO).unwrap();
        assert_eq!(state.tick().unwrap(), tick_math::MIN_TICK);
        assert!(PriceState::from_sqrt_price_x96(U160::from(1)).is_err());
    }

    #[rstest]
    fn test_invalid_scaler_rejected() {
        let state = PriceState::SqrtPrice(gn18("1"));
        assert_eq!(
            state.sqrt_price(),
            Err(ValuationError::InvalidSqrtPriceScaler(gn18("1").scaler()))
        );
    }

    #[rstest]
    fn test_out_of_range_sqrt_price_rejected() {
        let tiny = FixedPointNumber::from_raw(BigInt::from(1), 96, Base::Two).unwrap();
        assert!(matches!(
            PriceState::SqrtPrice(tiny).sqrt_price(),
            Err(ValuationError::SqrtPriceOutOfRange(_))
        ));
        assert!(matches!(
            PriceState::Tick(900_000).sqrt_price(),
            Err(ValuationError::TickOutOfRange(900_000))
        ));
    }
}

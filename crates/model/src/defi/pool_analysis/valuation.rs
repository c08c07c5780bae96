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

//! Valuation of concentrated liquidity positions.
//!
//! A position holds only token0 while the price is at or below its range, only token1 while
//! the price is at or above it, and a mix of both in between. Amounts are whole atomic units
//! (`base 10, resolution 0`) rounded down as the pool contracts do.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::{
    defi::{
        error::ValuationError,
        pool_analysis::position::LiquidityPosition,
        tick_map::{
            PriceState,
            sqrt_price_at_tick,
            sqrt_price_math::{
                get_amount0_for_liquidity, get_amount1_for_liquidity, get_liquidity_for_amount0,
                get_liquidity_for_amount1, ordered, to_whole_units,
            },
            tick_math::check_tick,
        },
    },
    types::{Base, FixedPointNumber, Lossy, scaler::Q96},
};

fn zero_units() -> Result<FixedPointNumber, ValuationError> {
    Ok(FixedPointNumber::zero(0, Base::Ten)?)
}

/// Returns the token amounts `(amount0, amount1)` represented by `position` at `price`.
///
/// Zero liquidity and degenerate ranges (`lower_tick == upper_tick`) yield `(0, 0)`.
///
/// # Errors
///
/// Returns an error if the price or a tick bound is out of range.
pub fn get_amounts_for_liquidity(
    position: &LiquidityPosition,
    price: &PriceState,
) -> Result<(FixedPointNumber, FixedPointNumber), ValuationError> {
    if position.liquidity().is_zero() || position.is_degenerate() {
        return Ok((zero_units()?, zero_units()?));
    }

    let current = price.sqrt_price()?;
    let (sqrt_lower, sqrt_upper) = position.sqrt_price_bounds()?;
    let liquidity = position.liquidity();

    if current.lte(&sqrt_lower)? {
        let amount0 = get_amount0_for_liquidity(&sqrt_lower, &sqrt_upper, liquidity)?;
        Ok((amount0, zero_units()?))
    } else if current.lt(&sqrt_upper)? {
        let amount0 = get_amount0_for_liquidity(&current, &sqrt_upper, liquidity)?;
        let amount1 = get_amount1_for_liquidity(&sqrt_lower, &current, liquidity)?;
        Ok((amount0, amount1))
    } else {
        let amount1 = get_amount1_for_liquidity(&sqrt_lower, &sqrt_upper, liquidity)?;
        Ok((zero_units()?, amount1))
    }
}

/// Returns the combined value of `position` at `price` in token1 atomic units, rounded down.
///
/// Each case is evaluated from its closed form rather than as `amount0 * price + amount1`,
/// so only one truncation to whole units happens:
/// - At or below the range: `L * (U - Lo) * P / (U * Lo)`.
/// - Inside the range: `L * (2 * C - Lo - C^2 / U)`.
/// - At or above the range: `L * (U - Lo)`.
///
/// where `Lo`, `U` and `C` are the lower, upper and current sqrt prices and `P = C^2`. `P` is
/// applied as two factors of `C` so that low-priced pools keep their precision.
///
/// # Errors
///
/// Returns an error if the price or a tick bound is out of range.
pub fn get_value_of_liquidity(
    position: &LiquidityPosition,
    price: &PriceState,
) -> Result<FixedPointNumber, ValuationError> {
    if position.liquidity().is_zero() || position.is_degenerate() {
        return zero_units();
    }

    let current = price.sqrt_price()?;
    let (sqrt_lower, sqrt_upper) = position.sqrt_price_bounds()?;
    let liquidity = FixedPointNumber::from_raw(
        BigInt::from(position.liquidity().clone()) << Q96.resolution,
        Q96.resolution,
        Q96.base,
    )?;

    let value = if current.lte(&sqrt_lower)? {
        liquidity
            .mul(&sqrt_upper.sub(&sqrt_lower)?)
            .div(&sqrt_upper)?
            .div(&sqrt_lower)?
            .mul(&current)
            .mul(&current)
    } else if current.lt(&sqrt_upper)? {
        let factor = current
            .add(&current)?
            .sub(&sqrt_lower)?
            .sub(&current.square().div(&sqrt_upper)?)?;
        liquidity.mul(&factor)
    } else {
        liquidity.mul(&sqrt_upper.sub(&sqrt_lower)?)
    };

    Ok(to_whole_units(&value)?)
}

/// Returns the maximum liquidity that `amount0` and `amount1` can provide over
/// `[tick_a, tick_b]` at `price`, rounded down.
///
/// # Errors
///
/// Returns an error:
/// - If a tick or the price is out of range.
/// - If either amount is negative.
pub fn get_liquidity_for_amounts(
    price: &PriceState,
    tick_a: i32,
    tick_b: i32,
    amount0: &FixedPointNumber,
    amount1: &FixedPointNumber,
) -> Result<BigUint, ValuationError> {
    check_tick(tick_a)?;
    check_tick(tick_b)?;
    for amount in [amount0, amount1] {
        if amount.is_negative() {
            return Err(ValuationError::NegativeAmount(amount.to_string()));
        }
    }
    if tick_a == tick_b {
        return Ok(BigUint::zero());
    }

    let current = price.sqrt_price()?;
    let (sqrt_lower, sqrt_upper) = ordered(&sqrt_price_at_tick(tick_a)?, &sqrt_price_at_tick(tick_b)?)?;

    let liquidity = if current.lte(&sqrt_lower)? {
        get_liquidity_for_amount0(&sqrt_lower, &sqrt_upper, amount0)?
    } else if current.lt(&sqrt_upper)? {
        let liquidity0 = get_liquidity_for_amount0(&current, &sqrt_upper, amount0)?;
        let liquidity1 = get_liquidity_for_amount1(&sqrt_lower, &current, amount1)?;
        liquidity0.min(&liquidity1)?
    } else {
        get_liquidity_for_amount1(&sqrt_lower, &sqrt_upper, amount1)?
    };

    liquidity
        .to_bigint()
        .to_biguint()
        .ok_or_else(|| ValuationError::NegativeAmount(liquidity.to_string()))
}

/// Returns the price ratio (token1 per token0) for a Q64.96 sqrt price, as a Q64.96 value.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidSqrtPriceScaler`] if `sqrt_price` is not at the Q64.96 scaler.
pub fn price_from_sqrt_price(
    sqrt_price: &FixedPointNumber,
) -> Result<FixedPointNumber, ValuationError> {
    if sqrt_price.scaler() != Q96 {
        return Err(ValuationError::InvalidSqrtPriceScaler(sqrt_price.scaler()));
    }
    Ok(sqrt_price.square())
}

/// Returns `1.0001^tick` as a lossy display price.
///
/// # Errors
///
/// Returns [`ValuationError::TickOutOfRange`] if `tick` is out of range.
pub fn tick_to_price_lossy(tick: i32) -> Result<Lossy<f64>, ValuationError> {
    check_tick(tick)?;
    Ok(Lossy::new(1.0001_f64.powi(tick)))
}

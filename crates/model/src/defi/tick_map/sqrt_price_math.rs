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

//! Token amount and liquidity deltas between two Q64.96 sqrt prices.
//!
//! Each function follows the on-chain round-down path exactly: intermediate quotients
//! truncate in the same order as `SqrtPriceMath` and `LiquidityAmounts`, and results are whole
//! atomic units (`base 10, resolution 0`).

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::{
    defi::{error::ValuationError, tick_map::check_sqrt_price},
    types::{Base, FixedPointError, FixedPointNumber, scaler::Q96},
};

/// Returns `liquidity` as a Q64.96 value, i.e. `liquidity << 96`.
fn at_q96(units: &BigInt) -> Result<FixedPointNumber, FixedPointError> {
    FixedPointNumber::from_raw(units << Q96.resolution, Q96.resolution, Q96.base)
}

/// Returns `units` as whole atomic units.
fn whole(units: BigInt) -> Result<FixedPointNumber, FixedPointError> {
    FixedPointNumber::from_raw(units, 0, Base::Ten)
}

/// Truncates `value` to whole units and re-expresses it at `base 10, resolution 0`.
pub(crate) fn to_whole_units(value: &FixedPointNumber) -> Result<FixedPointNumber, FixedPointError> {
    whole(value.set_resolution(0)?.to_bigint())
}

/// Returns the two sqrt prices validated and ordered ascending.
pub(crate) fn ordered(
    sqrt_a: &FixedPointNumber,
    sqrt_b: &FixedPointNumber,
) -> Result<(FixedPointNumber, FixedPointNumber), ValuationError> {
    check_sqrt_price(sqrt_a)?;
    check_sqrt_price(sqrt_b)?;
    if sqrt_a.gt(sqrt_b)? {
        Ok((sqrt_b.clone(), sqrt_a.clone()))
    } else {
        Ok((sqrt_a.clone(), sqrt_b.clone()))
    }
}

/// Returns the amount of token0 held by `liquidity` between two sqrt prices, rounded down.
///
/// Computes `liquidity * (sqrt_upper - sqrt_lower) / (sqrt_upper * sqrt_lower)`. The bounds are
/// order-normalized and equal bounds yield zero.
///
/// # Errors
///
/// Returns an error if either sqrt price is not a valid Q64.96 value.
pub fn get_amount0_for_liquidity(
    sqrt_a: &FixedPointNumber,
    sqrt_b: &FixedPointNumber,
    liquidity: &BigUint,
) -> Result<FixedPointNumber, ValuationError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_a, sqrt_b)?;
    if liquidity.is_zero() || sqrt_lower == sqrt_upper {
        return Ok(whole(BigInt::zero())?);
    }

    let amount = at_q96(&BigInt::from(liquidity.clone()))?
        .mul(&sqrt_upper.sub(&sqrt_lower)?)
        .div(&sqrt_upper)?
        .div(&sqrt_lower)?;

    Ok(to_whole_units(&amount)?)
}

/// Returns the amount of token1 held by `liquidity` between two sqrt prices, rounded down.
///
/// Computes `liquidity * (sqrt_upper - sqrt_lower)`.
///
/// # Errors
///
/// Returns an error if either sqrt price is not a valid Q64.96 value.
pub fn get_amount1_for_liquidity(
    sqrt_a: &FixedPointNumber,
    sqrt_b: &FixedPointNumber,
    liquidity: &BigUint,
) -> Result<FixedPointNumber, ValuationError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_a, sqrt_b)?;
    let amount = whole(BigInt::from(liquidity.clone()))?.mul(&sqrt_upper.sub(&sqrt_lower)?);
    Ok(amount)
}

/// Returns the liquidity provided by `amount0` of token0 between two sqrt prices, rounded down.
///
/// # Errors
///
/// Returns an error if either sqrt price is not a valid Q64.96 value.
pub fn get_liquidity_for_amount0(
    sqrt_a: &FixedPointNumber,
    sqrt_b: &FixedPointNumber,
    amount0: &FixedPointNumber,
) -> Result<FixedPointNumber, ValuationError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_a, sqrt_b)?;
    if sqrt_lower == sqrt_upper {
        return Ok(whole(BigInt::zero())?);
    }

    let intermediate = sqrt_lower.mul(&sqrt_upper);
    let liquidity = at_q96(&amount0.set_resolution(0)?.to_bigint())?
        .mul(&intermediate)
        .div(&sqrt_upper.sub(&sqrt_lower)?)?;

    Ok(to_whole_units(&liquidity)?)
}

/// Returns the liquidity provided by `amount1` of token1 between two sqrt prices, rounded down.
///
/// # Errors
///
/// Returns an error if either sqrt price is not a valid Q64.96 value.
pub fn get_liquidity_for_amount1(
    sqrt_a: &FixedPointNumber,
    sqrt_b: &FixedPointNumber,
    amount1: &FixedPointNumber,
) -> Result<FixedPointNumber, ValuationError> {
    let (sqrt_lower, sqrt_upper) = ordered(sqrt_a, sqrt_b)?;
    if sqrt_lower == sqrt_upper {
        return Ok(whole(BigInt::zero())?);
    }

    let liquidity =
        whole(amount1.set_resolution(0)?.to_bigint())?.div(&sqrt_upper.sub(&sqrt_lower)?)?;
    Ok(liquidity)
}

/// Encodes the price `reserve1 / reserve0` as a Q64.96 sqrt price, rounded down.
///
/// # Errors
///
/// Returns [`FixedPointError::DivisionByZero`] if `reserve0` is zero.
pub fn encode_sqrt_price(
    reserve1: &BigUint,
    reserve0: &BigUint,
) -> Result<FixedPointNumber, FixedPointError> {
    if reserve0.is_zero() {
        return Err(FixedPointError::DivisionByZero);
    }
    let ratio_x192 = (reserve1 << (2 * Q96.resolution)) / reserve0;
    FixedPointNumber::from_raw(BigInt::from(ratio_x192.sqrt()), Q96.resolution, Q96.base)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    // Expected values follow the Uniswap v3 SqrtPriceMath specs (round-down variants)
    use rstest::rstest;

    use super::*;
    use crate::defi::tick_map::sqrt_price_at_tick;

    fn encode(reserve1: u64, reserve0: u64) -> FixedPointNumber {
        encode_sqrt_price(&BigUint::from(reserve1), &BigUint::from(reserve0)).unwrap()
    }

    fn expand_to_18_decimals(amount: u64) -> BigUint {
        BigUint::from(amount) * BigUint::from(10u64).pow(18)
    }

    #[rstest]
    fn test_encode_sqrt_price() {
        assert_eq!(encode(1, 1).raw().to_string(), "79228162514264337593543950336");
        assert_eq!(encode(121, 100).raw().to_string(), "87150978765690771352898345369");
        assert!(encode_sqrt_price(&BigUint::from(1u8), &BigUint::zero()).is_err());
    }

    #[rstest]
    fn test_amount0_zero_if_liquidity_zero() {
        let amount = get_amount0_for_liquidity(&encode(1, 1), &encode(2, 1), &BigUint::zero());
        assert!(amount.unwrap().is_zero());
    }

    #[rstest]
    fn test_amount0_zero_if_prices_equal() {
        let amount = get_amount0_for_liquidity(&encode(1, 1), &encode(1, 1), &expand_to_18_decimals(1));
        assert!(amount.unwrap().is_zero());
    }

    #[rstest]
    fn test_amount0_for_price_of_1_to_1_21() {
        let amount =
            get_amount0_for_liquidity(&encode(1, 1), &encode(121, 100), &expand_to_18_decimals(1))
                .unwrap();
        assert_eq!(amount.to_string(), "90909090909090909");
        assert_eq!(amount.scaler(), crate::types::scaler::UNIT);
    }

    #[rstest]
    fn test_amount1_for_price_of_1_to_1_21() {
        let amount =
            get_amount1_for_liquidity(&encode(1, 1), &encode(121, 100), &expand_to_18_decimals(1))
                .unwrap();
        assert_eq!(amount.to_string(), "99999999999999999");
    }

    #[rstest]
    fn test_amounts_are_order_independent() {
        let liquidity = expand_to_18_decimals(3);
        let (low, high) = (encode(1, 1), encode(4, 1));
        assert_eq!(
            get_amount0_for_liquidity(&low, &high, &liquidity).unwrap(),
            get_amount0_for_liquidity(&high, &low, &liquidity).unwrap()
        );
        assert_eq!(
            get_amount1_for_liquidity(&low, &high, &liquidity).unwrap(),
            get_amount1_for_liquidity(&high, &low, &liquidity).unwrap()
        );
    }

    #[rstest]
    fn test_amount0_for_price_of_1_to_4() {
        // L * (2 - 1) / (2 * 1) = L / 2
        let amount =
            get_amount0_for_liquidity(&encode(1, 1), &encode(4, 1), &BigUint::from(1_000u32))
                .unwrap();
        assert_eq!(amount.to_string(), "500");
    }

    #[rstest]
    fn test_liquidity_for_amounts_inverts_deltas() {
        let (low, high) = (sqrt_price_at_tick(-600).unwrap(), sqrt_price_at_tick(600).unwrap());
        let liquidity = expand_to_18_decimals(5);

        let amount0 = get_amount0_for_liquidity(&low, &high, &liquidity).unwrap();
        let amount1 = get_amount1_for_liquidity(&low, &high, &liquidity).unwrap();

        let from0 = get_liquidity_for_amount0(&low, &high, &amount0).unwrap();
        let from1 = get_liquidity_for_amount1(&low, &high, &amount1).unwrap();

        // Rounding down in both directions loses a few units of liquidity
        let expected = BigInt::from(liquidity);
        for recovered in [from0, from1] {
            let diff = &expected - recovered.to_bigint();
            assert!(diff >= BigInt::zero() && diff <= BigInt::from(10), "diff was {diff}");
        }
    }

    #[rstest]
    fn test_invalid_sqrt_price_scaler() {
        let wad = FixedPointNumber::one(18, Base::Ten).unwrap();
        let err = get_amount1_for_liquidity(&wad, &encode(1, 1), &BigUint::from(1u8)).unwrap_err();
        assert!(matches!(err, ValuationError::InvalidSqrtPriceScaler(_)));
    }
}

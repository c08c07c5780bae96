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

//! Exact mapping between ticks and Q64.96 sqrt prices.
//!
//! `sqrt(1.0001^tick) * 2^96` is computed from a product of precomputed Q128.128 factors, one
//! per set bit of `|tick|`, and rounded up at the final shift to Q64.96. This reproduces the
//! on-chain `TickMath` library bit for bit.

use alloy_primitives::{U160, U256};
use solvent_core::correctness::check_in_range_inclusive_i32;

use crate::defi::error::ValuationError;

/// The minimum tick that may be passed to [`get_sqrt_ratio_at_tick`].
pub const MIN_TICK: i32 = -887_272;
/// The maximum tick that may be passed to [`get_sqrt_ratio_at_tick`].
pub const MAX_TICK: i32 = -MIN_TICK;

/// The sqrt ratio at [`MIN_TICK`] (4295128739).
pub const MIN_SQRT_RATIO: U160 = U160::from_limbs([4_295_128_739, 0, 0]);
/// The sqrt ratio at [`MAX_TICK`] (1461446703485210103287273052203988822378723970342).
pub const MAX_SQRT_RATIO: U160 =
    U160::from_limbs([0x5d95_1d52_6398_8d26, 0xefd1_fc6a_5064_8849, 0xfffd_8963]);

// Q128.128 values of 1/sqrt(1.0001)^(2^i) for each bit of |tick| above bit zero
const TICK_FACTORS: [(u32, u128); 19] = [
    (0x2, 0xfff9_7272_373d_4132_59a4_6990_580e_213a),
    (0x4, 0xfff2_e50f_5f65_6932_ef12_357c_f3c7_fdcc),
    (0x8, 0xffe5_caca_7e10_e4e6_1c36_24ea_a094_1cd0),
    (0x10, 0xffcb_9843_d60f_6159_c9db_5883_5c92_6644),
    (0x20, 0xff97_3b41_fa98_c081_472e_6896_dfb2_54c0),
    (0x40, 0xff2e_a164_66c9_6a38_43ec_78b3_26b5_2861),
    (0x80, 0xfe5d_ee04_6a99_a2a8_11c4_61f1_969c_3053),
    (0x100, 0xfcbe_86c7_900a_88ae_dcff_c83b_479a_a3a4),
    (0x200, 0xf987_a725_3ac4_1317_6f2b_074c_f781_5e54),
    (0x400, 0xf339_2b08_22b7_0005_940c_7a39_8e4b_70f3),
    (0x800, 0xe715_9475_a2c2_9b74_43b2_9c7f_a6e8_89d9),
    (0x1000, 0xd097_f3bd_fd20_22b8_845a_d8f7_92aa_5825),
    (0x2000, 0xa9f7_4646_2d87_0fdf_8a65_dc1f_90e0_61e5),
    (0x4000, 0x70d8_69a1_56d2_a1b8_90bb_3df6_2baf_32f7),
    (0x8000, 0x31be_135f_97d0_8fd9_8123_1505_542f_cfa6),
    (0x10000, 0x09aa_508b_5b7a_84e1_c677_de54_f3e9_9bc9),
    (0x20000, 0x005d_6af8_dedb_8119_6699_c329_225e_e604),
    (0x40000, 0x0000_2216_e584_f5fa_1ea9_2604_1bed_fe98),
    (0x80000, 0x0000_0000_048a_1703_91f7_dc42_444e_8fa2),
];

const TICK_FACTOR_ODD: u128 = 0xfffc_b933_bd6f_ad37_aa2d_162d_1a59_4001;

/// Checks the `tick` is within [[`MIN_TICK`], [`MAX_TICK`]].
///
/// # Errors
///
/// Returns [`ValuationError::TickOutOfRange`] if the check fails.
pub fn check_tick(tick: i32) -> Result<(), ValuationError> {
    check_in_range_inclusive_i32(tick, MIN_TICK, MAX_TICK, "tick")
        .map_err(|_| ValuationError::TickOutOfRange(tick))
}

/// Returns `sqrt(1.0001^tick) * 2^96` as a Q64.96 value.
///
/// # Errors
///
/// Returns [`ValuationError::TickOutOfRange`] if `|tick|` exceeds [`MAX_TICK`].
pub fn get_sqrt_ratio_at_tick(tick: i32) -> Result<U160, ValuationError> {
    check_tick(tick)?;

    let abs_tick = tick.unsigned_abs();
    let mut ratio = if abs_tick & 0x1 != 0 {
        U256::from(TICK_FACTOR_ODD)
    } else {
        U256::from(1u8) << 128
    };

    for (mask, factor) in TICK_FACTORS {
        if abs_tick & mask != 0 {
            ratio = (ratio * U256::from(factor)) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Q128.128 to Q64.96, rounding up so the result is never below the true ratio
    let remainder = ratio & U256::from(u32::MAX);
    let sqrt_price = (ratio >> 32) + U256::from(u8::from(!remainder.is_zero()));

    // Always fits 160 bits
    Ok(U160::saturating_from(sqrt_price))
}

/// Returns the greatest tick whose sqrt ratio is less than or equal to `sqrt_price_x96`.
///
/// # Errors
///
/// Returns [`ValuationError::SqrtPriceOutOfRange`] if `sqrt_price_x96` is outside
/// [[`MIN_SQRT_RATIO`], [`MAX_SQRT_RATIO`]).
pub fn get_tick_at_sqrt_ratio(sqrt_price_x96: U160) -> Result<i32, ValuationError> {
    if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
        return Err(ValuationError::SqrtPriceOutOfRange(sqrt_price_x96.to_string()));
    }

    let (mut low, mut high) = (MIN_TICK, MAX_TICK - 1);
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid)? <= sqrt_price_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    Ok(low)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(MIN_TICK, "4295128739")]
    #[case(MIN_TICK + 1, "4295343490")]
    #[case(-200, "78439868342809377387252074393")]
    #[case(-60, "78990846045029531151608375686")]
    #[case(-1, "79224201403219477170569942574")]
    #[case(0, "79228162514264337593543950336")]
    #[case(1, "79232123823359799118286999568")]
    #[case(60, "79466191966197645195421774833")]
    #[case(100, "79625275426524748796330556128")]
    #[case(200, "80024378775772204256025656563")]
    #[case(MAX_TICK - 1, "1461373636630004318706518188784493106690254656249")]
    #[case(MAX_TICK, "1461446703485210103287273052203988822378723970342")]
    fn test_get_sqrt_ratio_at_tick(#[case] tick: i32, #[case] expected: &str) {
        let expected = U160::from_str(expected).unwrap();
        assert_eq!(get_sqrt_ratio_at_tick(tick).unwrap(), expected);
    }

    #[rstest]
    fn test_bounds_match_constants() {
        assert_eq!(get_sqrt_ratio_at_tick(MIN_TICK).unwrap(), MIN_SQRT_RATIO);
        assert_eq!(get_sqrt_ratio_at_tick(MAX_TICK).unwrap(), MAX_SQRT_RATIO);
    }

    #[rstest]
    #[case(MIN_TICK - 1)]
    #[case(MAX_TICK + 1)]
    #[case(i32::MIN)]
    fn test_get_sqrt_ratio_at_tick_out_of_range(#[case] tick: i32) {
        assert_eq!(
            get_sqrt_ratio_at_tick(tick),
            Err(ValuationError::TickOutOfRange(tick))
        );
    }

    #[rstest]
    #[case(MIN_TICK)]
    #[case(-50_000)]
    #[case(-1)]
    #[case(0)]
    #[case(1)]
    #[case(12_345)]
    #[case(MAX_TICK - 1)]
    fn test_get_tick_at_sqrt_ratio_inverts_exact_ratios(#[case] tick: i32) {
        let ratio = get_sqrt_ratio_at_tick(tick).unwrap();
        assert_eq!(get_tick_at_sqrt_ratio(ratio).unwrap(), tick);
    }

    #[rstest]
    fn test_get_tick_at_sqrt_ratio_rounds_down() {
        let ratio = get_sqrt_ratio_at_tick(100).unwrap();
        assert_eq!(get_tick_at_sqrt_ratio(ratio - U160::from(1)).unwrap(), 99);
        assert_eq!(get_tick_at_sqrt_ratio(ratio + U160::from(1)).unwrap(), 100);
    }

    #[rstest]
    fn test_get_tick_at_sqrt_ratio_out_of_range() {
        assert!(get_tick_at_sqrt_ratio(MIN_SQRT_RATIO - U160::from(1)).is_err());
        assert!(get_tick_at_sqrt_ratio(MAX_SQRT_RATIO).is_err());
    }
}

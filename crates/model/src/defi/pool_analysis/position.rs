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

use std::fmt::{Display, Formatter};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    defi::{
        error::ValuationError,
        tick_map::{sqrt_price_at_tick, tick_math::check_tick},
    },
    types::FixedPointNumber,
};

/// Represents a concentrated liquidity position over a tick range.
///
/// The ticks are normalized on construction so that `lower_tick <= upper_tick`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "LiquidityPositionRepr", into = "LiquidityPositionRepr")]
pub struct LiquidityPosition {
    lower_tick: i32,
    upper_tick: i32,
    liquidity: BigUint,
}

impl LiquidityPosition {
    /// Creates a new [`LiquidityPosition`], ordering the ticks if given reversed.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::TickOutOfRange`] if either tick is out of range.
    pub fn new(tick_a: i32, tick_b: i32, liquidity: BigUint) -> Result<Self, ValuationError> {
        check_tick(tick_a)?;
        check_tick(tick_b)?;

        Ok(Self {
            lower_tick: tick_a.min(tick_b),
            upper_tick: tick_a.max(tick_b),
            liquidity,
        })
    }

    /// Returns the lower tick boundary of the position.
    #[must_use]
    pub fn lower_tick(&self) -> i32 {
        self.lower_tick
    }

    /// Returns the upper tick boundary of the position.
    #[must_use]
    pub fn upper_tick(&self) -> i32 {
        self.upper_tick
    }

    /// Returns the liquidity of the position.
    #[must_use]
    pub fn liquidity(&self) -> &BigUint {
        &self.liquidity
    }

    /// Returns `true` if the range is empty (`lower_tick == upper_tick`).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.lower_tick == self.upper_tick
    }

    /// Returns `true` if `tick` is within the active range `[lower_tick, upper_tick)`.
    #[must_use]
    pub fn contains_tick(&self, tick: i32) -> bool {
        self.lower_tick <= tick && tick < self.upper_tick
    }

    /// Returns the Q64.96 sqrt prices at the lower and upper ticks.
    ///
    /// # Errors
    ///
    /// Returns an error if a tick is out of range.
    pub fn sqrt_price_bounds(
        &self,
    ) -> Result<(FixedPointNumber, FixedPointNumber), ValuationError> {
        Ok((
            sqrt_price_at_tick(self.lower_tick)?,
            sqrt_price_at_tick(self.upper_tick)?,
        ))
    }
}

impl Display for LiquidityPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LiquidityPosition(lower_tick={}, upper_tick={}, liquidity={})",
            self.lower_tick, self.upper_tick, self.liquidity
        )
    }
}

#[serde_as]
#[derive(Clone, Debug, Serialize, Deserialize)]
struct LiquidityPositionRepr {
    lower_tick: i32,
    upper_tick: i32,
    #[serde_as(as = "DisplayFromStr")]
    liquidity: BigUint,
}

impl From<LiquidityPosition> for LiquidityPositionRepr {
    fn from(value: LiquidityPosition) -> Self {
        Self {
            lower_tick: value.lower_tick,
            upper_tick: value.upper_tick,
            liquidity: value.liquidity,
        }
    }
}

impl TryFrom<LiquidityPositionRepr> for LiquidityPosition {
    type Error = ValuationError;

    fn try_from(value: LiquidityPositionRepr) -> Result<Self, Self::Error> {
        Self::new(value.lower_tick, value.upper_tick, value.liquidity)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_new_normalizes_ticks() {
        let position = LiquidityPosition::new(600, -600, BigUint::from(10u32)).unwrap();
        assert_eq!(position.lower_tick(), -600);
        assert_eq!(position.upper_tick(), 600);
    }

    #[rstest]
    fn test_new_rejects_out_of_range_tick() {
        let err = LiquidityPosition::new(-900_000, 0, BigUint::from(1u8)).unwrap_err();
        assert_eq!(err, ValuationError::TickOutOfRange(-900_000));
    }

    #[rstest]
    #[case(-600, true)]
    #[case(0, true)]
    #[case(599, true)]
    #[case(600, false)]
    #[case(-601, false)]
    fn test_contains_tick(#[case] tick: i32, #[case] expected: bool) {
        let position = LiquidityPosition::new(-600, 600, BigUint::from(1u8)).unwrap();
        assert_eq!(position.contains_tick(tick), expected);
    }

    #[rstest]
    fn test_degenerate() {
        let position = LiquidityPosition::new(60, 60, BigUint::from(1u8)).unwrap();
        assert!(position.is_degenerate());
        assert!(!position.contains_tick(60));
    }

    #[rstest]
    fn test_display() {
        let position = LiquidityPosition::new(-60, 60, BigUint::from(1_000u32)).unwrap();
        assert_eq!(
            position.to_string(),
            "LiquidityPosition(lower_tick=-60, upper_tick=60, liquidity=1000)"
        );
    }

    #[rstest]
    fn test_serde_normalizes_and_round_trips() {
        let json = r#"{"lower_tick":60,"upper_tick":-60,"liquidity":"340282366920938463463374607431768211456"}"#;
        let position: LiquidityPosition = serde_json::from_str(json).unwrap();
        assert_eq!(position.lower_tick(), -60);
        assert_eq!(position.liquidity(), &(BigUint::from(1u8) << 128u32));

        let serialized = serde_json::to_string(&position).unwrap();
        let deserialized: LiquidityPosition = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, position);
    }
}

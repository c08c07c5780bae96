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

//! DeFi valuation: concentrated-liquidity positions, lending rate curves and tokens.
//!
//! Every computation here is integer arithmetic on [`FixedPointNumber`](crate::types::FixedPointNumber)
//! values and truncates exactly where the on-chain contracts do, so results match what a
//! contract read would return.

pub mod error;
pub mod pool_analysis;
pub mod rate_model;
pub mod tick_map;
pub mod token;

// Re-exports
pub use crate::defi::{
    error::ValuationError,
    pool_analysis::{
        position::LiquidityPosition,
        valuation::{
            get_amounts_for_liquidity, get_liquidity_for_amounts, get_value_of_liquidity,
            price_from_sqrt_price, tick_to_price_lossy,
        },
    },
    rate_model::{RateCurveConfig, RateModel, RateModelError, RationalRateCurve},
    tick_map::PriceState,
    token::{LendingReceiptToken, Token},
};

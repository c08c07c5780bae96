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

//! Errors raised by concentrated-liquidity valuation.

use crate::types::{FixedPointError, Scaler};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
    #[error("Tick {0} out of range [-887272, 887272]")]
    TickOutOfRange(i32),
    #[error("Sqrt price out of range: {0}")]
    SqrtPriceOutOfRange(String),
    #[error("Invalid sqrt price scaler {0}, expected 2^96")]
    InvalidSqrtPriceScaler(Scaler),
    #[error("Negative token amount: {0}")]
    NegativeAmount(String),
    #[error(transparent)]
    FixedPoint(#[from] FixedPointError),
}

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

use rstest::fixture;

use crate::types::{FixedPointNumber, scaler::Base};

/// Returns a [`FixedPointNumber`] parsed from `text` at the given scaler.
///
/// # Panics
///
/// Panics if `text` or the scaler is invalid.
#[must_use]
pub fn gn(text: &str, resolution: u32, base: Base) -> FixedPointNumber {
    FixedPointNumber::from_decimal_str(text, resolution, base).unwrap()
}

/// Returns a WAD (base 10, resolution 18) [`FixedPointNumber`] parsed from `text`.
///
/// # Panics
///
/// Panics if `text` is invalid.
#[must_use]
pub fn gn18(text: &str) -> FixedPointNumber {
    gn(text, 18, Base::Ten)
}

#[fixture]
pub fn wad_one() -> FixedPointNumber {
    gn18("1")
}

#[fixture]
pub fn q96_one() -> FixedPointNumber {
    FixedPointNumber::one(96, Base::Two).unwrap()
}

#[fixture]
pub fn usdc_balance() -> FixedPointNumber {
    FixedPointNumber::from_raw_str("1000000", 6, Base::Ten).unwrap()
}

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

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use solvent_core::correctness::{FAILED, check_valid_string};

use crate::types::{Base, FixedPointError, FixedPointNumber};

/// Represents an ERC-20 token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// The address of the token contract.
    pub address: Address,
    /// The full name of the token.
    pub name: String,
    /// The token's ticker symbol.
    pub symbol: String,
    /// The number of decimal places used to represent fractional token amounts.
    pub decimals: u8,
}

impl Token {
    /// Creates a new [`Token`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` or `symbol` is not a valid string.
    pub fn new_checked(
        address: Address,
        name: String,
        symbol: String,
        decimals: u8,
    ) -> anyhow::Result<Self> {
        check_valid_string(&name, stringify!(name))?;
        check_valid_string(&symbol, stringify!(symbol))?;

        Ok(Self {
            address,
            name,
            symbol,
            decimals,
        })
    }

    /// Creates a new [`Token`] instance with the specified properties.
    ///
    /// # Panics
    ///
    /// Panics if a correctness check fails. See [`Token::new_checked`] for more details.
    #[must_use]
    pub fn new(address: Address, name: String, symbol: String, decimals: u8) -> Self {
        Self::new_checked(address, name, symbol, decimals).expect(FAILED)
    }

    /// Returns the given count of atomic units as an amount at this token's decimals.
    ///
    /// `atomic_units` is first truncated to whole units of its own scaler.
    ///
    /// # Errors
    ///
    /// Returns an error if `atomic_units` cannot be re-expressed at resolution zero.
    pub fn amount(&self, atomic_units: &FixedPointNumber) -> Result<FixedPointNumber, FixedPointError> {
        let units = atomic_units.set_resolution(0)?;
        FixedPointNumber::from_raw(units.to_bigint(), u32::from(self.decimals), Base::Ten)
    }

    /// Parses a human decimal amount such as `"1.5"` at this token's decimals, truncating
    /// digits beyond them.
    ///
    /// # Errors
    ///
    /// Returns an error if `text` is not a valid decimal string.
    pub fn parse_amount(&self, text: &str) -> Result<FixedPointNumber, FixedPointError> {
        FixedPointNumber::from_decimal_str(text, u32::from(self.decimals), Base::Ten)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token(symbol={}, name={})", self.symbol, self.name)
    }
}

/// A lending market receipt token (e.g. a cToken or aToken) with a reference to the asset
/// it is redeemable for.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LendingReceiptToken {
    /// The receipt token itself.
    pub token: Token,
    underlying: Address,
}

impl LendingReceiptToken {
    /// Creates a new [`LendingReceiptToken`] instance.
    #[must_use]
    pub fn new(token: Token, underlying: Address) -> Self {
        Self { token, underlying }
    }

    /// Returns the address of the underlying asset.
    #[must_use]
    pub fn underlying(&self) -> Address {
        self.underlying
    }
}

impl Display for LendingReceiptToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LendingReceiptToken(symbol={}, underlying={})",
            self.token.symbol, self.underlying
        )
    }
}

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

//! Core parsing functions for decimal and raw integer text.
//!
//! Parsing is purely lexical: digits are split into their sign, integer and
//! fractional parts without ever passing through a floating-point value.

use anyhow::bail;

/// The lexical parts of a plain decimal string such as `"-123.4500"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecimalParts {
    /// If the value carried a leading minus sign.
    pub negative: bool,
    /// The integer digits, without leading zeros (`"0"` when empty).
    pub integer: String,
    /// The fractional digits exactly as written, including trailing zeros.
    pub fraction: String,
}

impl DecimalParts {
    /// Returns the number of fractional digits as written.
    #[must_use]
    pub fn precision(&self) -> usize {
        self.fraction.len()
    }

    /// Returns `true` if the fractional part is absent or all zeros.
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.fraction.bytes().all(|b| b == b'0')
    }

    /// Returns `true` if every digit is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.integer == "0" && self.is_whole()
    }

    /// Returns all digits concatenated (integer then fraction), i.e. the value scaled
    /// by `10^precision`, without a sign.
    #[must_use]
    pub fn digits(&self) -> String {
        format!("{}{}", self.integer, self.fraction)
    }
}

/// Parses a plain decimal string into its [`DecimalParts`].
///
/// Accepts an optional leading `+` or `-`, digits, and an optional `.` followed by
/// digits. Surrounding whitespace and `_` digit separators are ignored. Scientific
/// notation is rejected since it cannot be parsed lexically without ambiguity.
///
/// # Errors
///
/// Returns an error if `s` is empty or contains anything other than the grammar above.
pub fn parse_decimal_str(s: &str) -> anyhow::Result<DecimalParts> {
    let cleaned: String = s.trim().chars().filter(|c| *c != '_').collect();

    let (negative, unsigned) = match cleaned.as_bytes().first() {
        Some(b'-') => (true, &cleaned[1..]),
        Some(b'+') => (false, &cleaned[1..]),
        Some(_) => (false, cleaned.as_str()),
        None => bail!("Error parsing decimal string: input was empty"),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (unsigned, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        bail!("Error parsing decimal string '{s}': no digits")
    }
    if !integer.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        bail!("Error parsing decimal string '{s}': invalid character")
    }

    let integer = integer.trim_start_matches('0');
    let integer = if integer.is_empty() { "0" } else { integer };

    Ok(DecimalParts {
        negative,
        integer: integer.to_string(),
        fraction: fraction.to_string(),
    })
}

/// The lexical parts of a raw on-chain integer string (decimal or `0x` hexadecimal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegerText {
    /// If the value carried a leading minus sign.
    pub negative: bool,
    /// The digits in `radix`.
    pub digits: String,
    /// Either 10 or 16.
    pub radix: u32,
}

/// Parses a raw integer string which is either decimal or `0x`-prefixed hexadecimal.
///
/// Returns `Ok(None)` when the text is a decimal with a fractional part, so that the
/// caller can decide how to treat non-whole input (`"1.0"` is whole and accepted).
///
/// # Errors
///
/// Returns an error if `s` is not a valid decimal or hexadecimal integer string.
pub fn parse_integer_str(s: &str) -> anyhow::Result<Option<IntegerText>> {
    let trimmed = s.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    if let Some(hex) = unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("Error parsing hex integer string '{s}'")
        }
        return Ok(Some(IntegerText {
            negative,
            digits: hex.to_string(),
            radix: 16,
        }));
    }

    let parts = parse_decimal_str(trimmed)?;
    if !parts.is_whole() {
        return Ok(None);
    }

    Ok(Some(IntegerText {
        negative: parts.negative,
        digits: parts.integer,
        radix: 10,
    }))
}

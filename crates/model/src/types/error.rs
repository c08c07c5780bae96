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

//! Errors and diagnostics associated with fixed-point construction and arithmetic.

use std::fmt::{Display, Formatter};

use super::scaler::{Base, Scaler};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FixedPointError {
    #[error("Scaler mismatch: cannot combine {lhs} with {rhs} (call `set_resolution` first)")]
    ScalerMismatch { lhs: Scaler, rhs: Scaler },
    #[error("Invalid resolution {resolution} for base {base}: {reason}")]
    InvalidResolution {
        base: Base,
        resolution: u32,
        reason: String,
    },
    #[error("Non-integer construction: raw value must be a whole number, was '{0}'")]
    NonIntegerConstruction(String),
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Square root of a negative value: {0}")]
    NegativeSqrt(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Overflow: {0}")]
    Overflow(String),
}

/// A non-fatal diagnostic raised when a reckless operation receives an operand that is not
/// a whole unit. Such multipliers are not representable on-chain, so the operation proceeds
/// by truncation and this warning is emitted through `log::warn!`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrecisionWarning {
    /// The name of the reckless operation.
    pub operation: &'static str,
    /// The operand as received.
    pub operand: String,
}

impl PrecisionWarning {
    /// Creates a new [`PrecisionWarning`] instance.
    #[must_use]
    pub fn new(operation: &'static str, operand: impl Into<String>) -> Self {
        Self {
            operation,
            operand: operand.into(),
        }
    }

    /// Emits this warning to the `log` facade.
    pub fn emit(&self) {
        log::warn!("{self}");
    }
}

impl Display for PrecisionWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "PrecisionWarning: `{}` received non-integer operand '{}', result truncated",
            self.operation, self.operand
        )
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
    fn test_scaler_mismatch_display() {
        let err = FixedPointError::ScalerMismatch {
            lhs: Scaler::new(Base::Ten, 18),
            rhs: Scaler::new(Base::Ten, 6),
        };
        assert_eq!(
            err.to_string(),
            "Scaler mismatch: cannot combine 10^18 with 10^6 (call `set_resolution` first)"
        );
    }

    #[rstest]
    fn test_precision_warning_display() {
        let warning = PrecisionWarning::new("reckless_mul", "1.5");
        assert_eq!(
            warning.to_string(),
            "PrecisionWarning: `reckless_mul` received non-integer operand '1.5', result truncated"
        );
    }
}

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

//! Scaler-unchecked arithmetic with plain scalar operands.
//!
//! These operations are an escape hatch for multiplying or offsetting a fixed-point number by a
//! plain integer, float or decimal string. They skip scaler checks and never fail on a
//! non-integer operand: the operation uses the exact operand, truncates the result toward zero
//! and logs a [`PrecisionWarning`], since on-chain multipliers are always integers. The trait
//! must be imported explicitly and is never wired to operator overloads.

use std::fmt::{Display, Formatter};

use num_bigint::BigInt;
use num_traits::Zero;
use solvent_core::parsing::{DecimalParts, parse_decimal_str};

use super::{
    error::{FixedPointError, PrecisionWarning},
    fixed::FixedPointNumber,
};

/// A plain scalar operand for [`RecklessArithmetic`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarOperand {
    Int(BigInt),
    Float(f64),
    Text(String),
}

impl ScalarOperand {
    fn parts(&self) -> Result<DecimalParts, FixedPointError> {
        let text = match self {
            Self::Int(value) => value.to_str_radix(10),
            Self::Float(value) if value.is_finite() => format!("{value}"),
            Self::Float(value) => {
                return Err(FixedPointError::NonIntegerConstruction(value.to_string()));
            }
            Self::Text(text) => text.clone(),
        };
        parse_decimal_str(&text).map_err(|e| FixedPointError::Parse(e.to_string()))
    }

    /// Returns the warning `operation` would emit for this operand, if it is not a whole
    /// number.
    ///
    /// # Errors
    ///
    /// Returns an error if the operand is not a finite decimal value.
    pub fn precision_warning(
        &self,
        operation: &'static str,
    ) -> Result<Option<PrecisionWarning>, FixedPointError> {
        let parts = self.parts()?;
        Ok((!parts.is_whole()).then(|| PrecisionWarning::new(operation, self.to_string())))
    }

    /// Returns the operand as the exact fraction `(numerator, 10^precision)`, logging a
    /// [`PrecisionWarning`] if it is not a whole number.
    fn exact_fraction(&self, operation: &'static str) -> Result<(BigInt, BigInt), FixedPointError> {
        if let Some(warning) = self.precision_warning(operation)? {
            warning.emit();
        }

        let parts = self.parts()?;
        let magnitude = BigInt::parse_bytes(parts.digits().as_bytes(), 10)
            .ok_or_else(|| FixedPointError::Parse(self.to_string()))?;
        let numerator = if parts.negative { -magnitude } else { magnitude };
        let denominator = BigInt::from(10u32).pow(parts.precision() as u32);
        Ok((numerator, denominator))
    }

    /// Returns the operand in the raw units of `target`, truncated at its resolution.
    fn value_units(
        &self,
        target: &FixedPointNumber,
        operation: &'static str,
    ) -> Result<BigInt, FixedPointError> {
        if let Some(warning) = self.precision_warning(operation)? {
            warning.emit();
        }

        let text = match self {
            Self::Int(value) => value.to_str_radix(10),
            Self::Float(value) => format!("{value}"),
            Self::Text(text) => text.clone(),
        };
        let value = FixedPointNumber::from_decimal_str(&text, target.resolution(), target.base())?;
        Ok(value.to_bigint())
    }
}

impl Display for ScalarOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

macro_rules! impl_operand_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ScalarOperand {
                fn from(value: $t) -> Self {
                    Self::Int(BigInt::from(value))
                }
            }
        )*
    };
}

impl_operand_from_int!(i32, i64, i128, u32, u64, u128, usize);

impl From<BigInt> for ScalarOperand {
    fn from(value: BigInt) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for ScalarOperand {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ScalarOperand {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ScalarOperand {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Arithmetic with plain scalar operands which skips scaler checks.
pub trait RecklessArithmetic: Sized {
    /// Returns `self` multiplied by the exact operand, truncating the result toward zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the operand is not a finite decimal value.
    fn reckless_mul(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError>;

    /// Returns `self` divided by the exact operand, truncating the result toward zero.
    ///
    /// # Errors
    ///
    /// Returns an error:
    /// - If the operand is not a finite decimal value.
    /// - If the operand is zero.
    fn reckless_div(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError>;

    /// Returns `self` plus the operand taken in value units (`operand * scaler`).
    ///
    /// # Errors
    ///
    /// Returns an error if the operand is not a finite decimal value.
    fn reckless_add(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError>;

    /// Returns `self` minus the operand taken in value units (`operand * scaler`).
    ///
    /// # Errors
    ///
    /// Returns an error if the operand is not a finite decimal value.
    fn reckless_sub(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError>;
}

impl RecklessArithmetic for FixedPointNumber {
    fn reckless_mul(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError> {
        let (numerator, denominator) = operand.into().exact_fraction("reckless_mul")?;
        Self::from_raw(
            self.raw() * numerator / denominator,
            self.resolution(),
            self.base(),
        )
    }

    fn reckless_div(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError> {
        let (numerator, denominator) = operand.into().exact_fraction("reckless_div")?;
        if numerator.is_zero() {
            return Err(FixedPointError::DivisionByZero);
        }
        Self::from_raw(
            self.raw() * denominator / numerator,
            self.resolution(),
            self.base(),
        )
    }

    fn reckless_add(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError> {
        let offset = operand.into().value_units(self, "reckless_add")?;
        Self::from_raw(self.raw() + offset, self.resolution(), self.base())
    }

    fn reckless_sub(&self, operand: impl Into<ScalarOperand>) -> Result<Self, FixedPointError> {
        let offset = operand.into().value_units(self, "reckless_sub")?;
        Self::from_raw(self.raw() - offset, self.resolution(), self.base())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use std::sync::{Mutex, Once};

    use log::{Level, LevelFilter, Log, Metadata, Record};
    use rstest::rstest;

    use super::*;
    use crate::types::{scaler::Base, stubs::{gn, gn18}};

    static WARNINGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

    struct CapturingLogger;

    impl Log for CapturingLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CapturingLogger = CapturingLogger;

    fn init_capturing_logger() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(LevelFilter::Warn);
        });
    }

    fn captured_warnings() -> Vec<String> {
        WARNINGS.lock().unwrap().clone()
    }

    #[rstest]
    fn test_reckless_mul_by_integer() {
        assert_eq!(gn18("1.5").reckless_mul(3).unwrap(), gn18("4.5"));
        assert_eq!(gn18("1.5").reckless_mul(-2_i64).unwrap(), gn18("-3"));
    }

    #[rstest]
    #[case(ScalarOperand::from(0.5), "1")]
    #[case(ScalarOperand::from(1.5), "3")]
    #[case(ScalarOperand::from("2.99"), "5.98")]
    #[case(ScalarOperand::from(-1.9), "-3.8")]
    fn test_reckless_mul_fractional_operand(#[case] operand: ScalarOperand, #[case] expected: &str) {
        assert_eq!(gn18("2").reckless_mul(operand).unwrap(), gn18(expected));
    }

    #[rstest]
    fn test_reckless_mul_truncates_result() {
        // 7 * 0.5 = 3.5 at resolution 0
        assert_eq!(gn("7", 0, Base::Ten).reckless_mul(0.5).unwrap(), gn("3", 0, Base::Ten));
        assert_eq!(gn("-7", 0, Base::Ten).reckless_mul(0.5).unwrap(), gn("-3", 0, Base::Ten));
    }

    #[rstest]
    fn test_reckless_div() {
        assert_eq!(gn("10", 0, Base::Ten).reckless_div(3).unwrap(), gn("3", 0, Base::Ten));
        assert_eq!(gn("-10", 0, Base::Ten).reckless_div(3).unwrap(), gn("-3", 0, Base::Ten));
    }

    #[rstest]
    #[case(ScalarOperand::from(0.5), "2")]
    #[case(ScalarOperand::from("0.25"), "4")]
    #[case(ScalarOperand::from(-2.5), "-0.4")]
    fn test_reckless_div_fractional_operand(#[case] operand: ScalarOperand, #[case] expected: &str) {
        assert_eq!(gn18("1").reckless_div(operand).unwrap(), gn18(expected));
    }

    #[rstest]
    #[case(ScalarOperand::from(0))]
    #[case(ScalarOperand::from(0.0))]
    #[case(ScalarOperand::from("-0.000"))]
    fn test_reckless_div_by_zero(#[case] operand: ScalarOperand) {
        let err = gn18("1").reckless_div(operand).unwrap_err();
        assert_eq!(err, FixedPointError::DivisionByZero);
    }

    #[rstest]
    fn test_reckless_add_sub_in_value_units() {
        assert_eq!(gn18("1").reckless_add("0.5").unwrap(), gn18("1.5"));
        assert_eq!(gn18("1").reckless_sub(2).unwrap(), gn18("-1"));
        // Binary scaler: 0.1 * 16 truncates to 1 raw unit
        assert_eq!(gn("1", 4, Base::Two).reckless_add(0.1).unwrap().raw(), &BigInt::from(17));
    }

    #[rstest]
    fn test_reckless_skips_scaler_checks() {
        let value = gn("1", 96, Base::Two);
        let result = value.reckless_mul(2).unwrap();
        assert_eq!(result.scaler(), value.scaler());
        assert_eq!(result.to_string(), "2");
    }

    #[rstest]
    #[case(ScalarOperand::from(2), false)]
    #[case(ScalarOperand::from(2.0), false)]
    #[case(ScalarOperand::from("3.000"), false)]
    #[case(ScalarOperand::from(1.5), true)]
    #[case(ScalarOperand::from("0.1"), true)]
    fn test_precision_warning(#[case] operand: ScalarOperand, #[case] warns: bool) {
        let warning = operand.precision_warning("reckless_mul").unwrap();
        assert_eq!(warning.is_some(), warns);
    }

    #[rstest]
    fn test_precision_warning_carries_operand() {
        let warning = ScalarOperand::from("1.5")
            .precision_warning("reckless_add")
            .unwrap()
            .unwrap();
        assert_eq!(warning, PrecisionWarning::new("reckless_add", "1.5"));
    }

    #[rstest]
    fn test_fractional_operand_logs_warning_and_proceeds() {
        init_capturing_logger();

        let result = gn18("3").reckless_mul("0.125").unwrap();

        assert_eq!(result, gn18("0.375"));
        let expected = PrecisionWarning::new("reckless_mul", "0.125").to_string();
        assert!(captured_warnings().contains(&expected));
    }

    #[rstest]
    fn test_whole_operand_logs_no_warning() {
        init_capturing_logger();

        let result = gn18("9").reckless_div("3.000").unwrap();

        assert_eq!(result, gn18("3"));
        let unexpected = PrecisionWarning::new("reckless_div", "3.000").to_string();
        assert!(!captured_warnings().contains(&unexpected));
    }

    #[rstest]
    #[case(ScalarOperand::from(f64::NAN))]
    #[case(ScalarOperand::from("abc"))]
    fn test_invalid_operand(#[case] operand: ScalarOperand) {
        assert!(gn18("1").reckless_mul(operand).is_err());
    }
}

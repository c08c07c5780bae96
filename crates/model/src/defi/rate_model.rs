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

//! Utilization-based interest rate curves for lending markets.
//!
//! A curve maps pool utilization (borrowed / supplied, as a WAD) to a per-second borrow yield
//! in `1e-12` units, using integer arithmetic only so that results match the on-chain rate
//! model. Annualized figures are derived afterwards on the lossy `f64` display path.

use num_bigint::BigInt;
use num_traits::Signed;
use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use solvent_core::{correctness::check_in_range_inclusive_f64, math::compound_growth};

use crate::types::{Base, FixedPointError, FixedPointNumber, Lossy, scaler::WAD};

/// The number of seconds in a (365 day) year.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// The resolution of per-second yields (`1e-12` units).
pub const YIELD_RESOLUTION: u32 = 12;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RateModelError {
    #[error("Invalid kink utilization {0}: must be strictly between 0 and 1e18")]
    InvalidKink(String),
    #[error("Invalid ceiling yield {0}: must not be negative")]
    InvalidCeiling(String),
    #[error("Invalid reserve factor: {0}")]
    InvalidReserveFactor(String),
    #[error(transparent)]
    FixedPoint(#[from] FixedPointError),
}

/// Configuration for a [`RationalRateCurve`].
///
/// All fields are integers: `kink` is a WAD utilization and `a`, `b`, `ceiling` are in the
/// `1e-12` per-second yield units of the curve. They serialize as decimal strings.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateCurveConfig {
    /// The numerator constant of the rational segment.
    #[serde_as(as = "DisplayFromStr")]
    pub a: BigInt,
    /// The additive (usually negative) constant of the rational segment.
    #[serde_as(as = "DisplayFromStr")]
    pub b: BigInt,
    /// The utilization at and above which the ceiling yield applies.
    #[serde_as(as = "DisplayFromStr")]
    pub kink: BigInt,
    /// The constant yield at and above the kink.
    #[serde_as(as = "DisplayFromStr")]
    pub ceiling: BigInt,
}

impl Default for RateCurveConfig {
    /// Creates a new default [`RateCurveConfig`] instance.
    fn default() -> Self {
        Self {
            a: BigInt::from(610_104_633_480_000_000_000_u128),
            b: BigInt::from(-610),
            kink: BigInt::from(990_000_000_000_000_000_u64),
            ceiling: BigInt::from(60_400),
        }
    }
}

/// A model converting utilization into a per-second borrow yield.
pub trait RateModel {
    /// Returns the per-second yield at `utilization` (`base 10, resolution 12`).
    ///
    /// # Errors
    ///
    /// Returns an error if the utilization cannot be re-expressed as a WAD.
    fn yield_per_second(
        &self,
        utilization: &FixedPointNumber,
    ) -> Result<FixedPointNumber, RateModelError>;

    /// Returns the per-second growth multiplier `1 + yield` at `utilization`.
    ///
    /// # Errors
    ///
    /// Returns an error if the utilization cannot be re-expressed as a WAD.
    fn multiplier_per_second(
        &self,
        utilization: &FixedPointNumber,
    ) -> Result<FixedPointNumber, RateModelError> {
        let one = FixedPointNumber::one(YIELD_RESOLUTION, Base::Ten)?;
        Ok(one.add(&self.yield_per_second(utilization)?)?)
    }
}

/// A rate curve of the form `B + A / (1 - u)` below a kink and a constant ceiling above it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RationalRateCurve {
    config: RateCurveConfig,
}

impl RationalRateCurve {
    /// Creates a new [`RationalRateCurve`] instance with correctness checking.
    ///
    /// # Errors
    ///
    /// Returns an error:
    /// - If `kink` is not strictly between 0 and 1e18.
    /// - If `ceiling` is negative.
    pub fn new(config: RateCurveConfig) -> Result<Self, RateModelError> {
        let scale = WAD.factor();
        if !config.kink.is_positive() || config.kink >= scale {
            return Err(RateModelError::InvalidKink(config.kink.to_string()));
        }
        if config.ceiling.is_negative() {
            return Err(RateModelError::InvalidCeiling(config.ceiling.to_string()));
        }
        Ok(Self { config })
    }

    /// Returns the configuration of the curve.
    #[must_use]
    pub fn config(&self) -> &RateCurveConfig {
        &self.config
    }

    /// Returns the borrow APY at `utilization`, compounded per second (lossy).
    ///
    /// # Errors
    ///
    /// Returns an error if the utilization cannot be re-expressed as a WAD.
    pub fn borrow_apy(
        &self,
        utilization: &FixedPointNumber,
    ) -> Result<Lossy<f64>, RateModelError> {
        Ok(annualize_per_second(&self.yield_per_second(utilization)?))
    }
}

impl RateModel for RationalRateCurve {
    fn yield_per_second(
        &self,
        utilization: &FixedPointNumber,
    ) -> Result<FixedPointNumber, RateModelError> {
        let scale = WAD.factor();
        let utilization = clamp_utilization(utilization)?;

        let raw = if utilization >= self.config.kink {
            self.config.ceiling.clone()
        } else {
            // scale - utilization > 0 since utilization < kink < scale
            &self.config.b + &self.config.a / (scale - utilization)
        };

        Ok(FixedPointNumber::from_raw(raw, YIELD_RESOLUTION, Base::Ten)?)
    }
}

/// Returns `utilization` as a raw WAD clamped to `[0, 1e18]`.
fn clamp_utilization(utilization: &FixedPointNumber) -> Result<BigInt, RateModelError> {
    let scale = WAD.factor();
    let wad = FixedPointNumber::one(WAD.resolution, WAD.base)?
        .mul(utilization)
        .to_bigint();

    if wad.is_negative() {
        log::debug!("Clamped utilization {utilization} to 0");
        Ok(BigInt::from(0))
    } else if wad > scale {
        log::debug!("Clamped utilization {utilization} to 1");
        Ok(scale)
    } else {
        Ok(wad)
    }
}

/// Returns the annual yield from compounding `yield_per_second` every second for a year.
#[must_use]
pub fn annualize_per_second(yield_per_second: &FixedPointNumber) -> Lossy<f64> {
    Lossy::new(compound_growth(
        yield_per_second.approx_f64(),
        SECONDS_PER_YEAR,
    ))
}

/// Returns the simple (non-compounded) APR for `yield_per_second`.
#[must_use]
pub fn per_second_to_apr(yield_per_second: &FixedPointNumber) -> Lossy<f64> {
    Lossy::new(yield_per_second.approx_f64() * SECONDS_PER_YEAR as f64)
}

/// Returns the lender APY given the borrow APR, pool utilization and reserve factor.
///
/// Lenders earn `borrow_apr / SECONDS_PER_YEAR * utilization * (1 - reserve_factor)` per
/// second, compounded over a year. Utilization is clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns an error if `reserve_factor` is not within `[0, 1]`.
pub fn lender_apy(
    borrow_apr: Lossy<f64>,
    utilization: &FixedPointNumber,
    reserve_factor: f64,
) -> Result<Lossy<f64>, RateModelError> {
    check_in_range_inclusive_f64(reserve_factor, 0.0, 1.0, "reserve_factor")
        .map_err(|e| RateModelError::InvalidReserveFactor(e.to_string()))?;

    let utilization = utilization.approx_f64().clamp(0.0, 1.0);
    let per_second = borrow_apr.into_inner() / SECONDS_PER_YEAR as f64
        * utilization
        * (1.0 - reserve_factor);

    Ok(Lossy::new(compound_growth(per_second, SECONDS_PER_YEAR)))
}

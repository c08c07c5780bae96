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

//! Domain model for the `solvent` fixed-point engine.
//!
//! The *model* crate provides the lossless numeric core and the DeFi valuation built on top:
//!
//! - **Fixed-point numbers**: [`types::FixedPointNumber`] (aliased [`types::GN`]), an immutable
//!   scaled integer with an explicit `(base, resolution)` scaler and on-chain truncation semantics.
//! - **Scalers**: validation and computation of `base^resolution` scaling factors.
//! - **Tick math**: the exact tick to Q64.96 sqrt-price mapping for concentrated-liquidity pools.
//! - **Position valuation**: token amounts and combined value of a liquidity range at a price.
//! - **Rate curves**: utilization to per-second yield, with lossy annualization for display.
//!
//! Floating-point values only appear wrapped in [`types::Lossy`], which has no conversion back
//! into a fixed-point number.
//!
//! # Feature flags
//!
//! - `stubs`: Enables type stubs for use in testing scenarios.

#![warn(rustc::all)]
#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod defi;
pub mod types;

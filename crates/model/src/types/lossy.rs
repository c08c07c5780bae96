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

//! A wrapper segregating floating-point values onto display-only paths.

use std::fmt::{Display, Formatter};

/// A value produced by an explicitly lossy conversion.
///
/// There is no conversion from [`Lossy`] back into a
/// [`FixedPointNumber`](crate::types::FixedPointNumber), so lossy values cannot re-enter
/// lossless computation.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Lossy<T>(T);

impl<T> Lossy<T> {
    /// Wraps a value produced on a lossy path.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the wrapped value.
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns a reference to the wrapped value.
    pub const fn value(&self) -> &T {
        &self.0
    }

    /// Applies `f` to the wrapped value, keeping the result lossy.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lossy<U> {
        Lossy(f(self.0))
    }
}

impl<T: Display> Display for Lossy<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "~{}", self.0)
    }
}

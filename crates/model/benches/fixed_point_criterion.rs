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

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use solvent_model::{
    defi::{LiquidityPosition, PriceState, get_value_of_liquidity},
    types::{Base, FixedPointNumber},
};

fn gn18(text: &str) -> FixedPointNumber {
    FixedPointNumber::from_decimal_str(text, 18, Base::Ten).unwrap()
}

pub fn fixed_point_arithmetic(c: &mut Criterion) {
    let a = gn18("1234567.891011121314151617");
    let b = gn18("0.000000000000000042");
    let q96 = FixedPointNumber::from_decimal_str("1.0001", 96, Base::Two).unwrap();

    c.bench_function("gn_mul", |bench| bench.iter(|| black_box(&a).mul(black_box(&b))));
    c.bench_function("gn_div", |bench| bench.iter(|| black_box(&a).div(black_box(&b))));
    c.bench_function("gn_sqrt_q96", |bench| bench.iter(|| black_box(&q96).sqrt()));
    c.bench_function("gn_to_decimal_string", |bench| {
        bench.iter(|| black_box(&a).to_decimal_string(false));
    });
}

pub fn liquidity_valuation(c: &mut Criterion) {
    let position = LiquidityPosition::new(-600, 600, 1_000_000_000_000_000_000u64.into()).unwrap();
    let state = PriceState::Tick(300);

    c.bench_function("get_value_of_liquidity", |bench| {
        bench.iter(|| get_value_of_liquidity(black_box(&position), black_box(&state)));
    });
}

criterion_group!(benches, fixed_point_arithmetic, liquidity_valuation);
criterion_main!(benches);

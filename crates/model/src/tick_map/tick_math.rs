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

//! Conversions between ticks and Q64.96 sqrt price ratios.

use alloy_primitives::{U160, U256};

use crate::tick_map::tick::TickEntry;

/// The minimum sqrt ratio, equal to `get_sqrt_ratio_at_tick(MIN_TICK)`.
pub const MIN_SQRT_RATIO: U160 = U160::from_limbs([4295128739, 0, 0]);
/// The maximum sqrt ratio, equal to `get_sqrt_ratio_at_tick(MAX_TICK)`.
pub const MAX_SQRT_RATIO: U160 = U160::from_limbs([
    6743328256752651558,
    17280870778742802505,
    4294805859,
]);

// Precomputed values of sqrt(1.0001)^(-2^i) as Q128.128 fixed point numbers,
// one per bit of the tick magnitude.
const TICK_MULTIPLIERS: [U256; 19] = [
    U256::from_limbs([0x59a46990580e213a, 0xfff97272373d4132, 0, 0]),
    U256::from_limbs([0xef12357cf3c7fdcc, 0xfff2e50f5f656932, 0, 0]),
    U256::from_limbs([0x1c3624eaa0941cd0, 0xffe5caca7e10e4e6, 0, 0]),
    U256::from_limbs([0xc9db58835c926644, 0xffcb9843d60f6159, 0, 0]),
    U256::from_limbs([0x472e6896dfb254c0, 0xff973b41fa98c081, 0, 0]),
    U256::from_limbs([0x43ec78b326b52861, 0xff2ea16466c96a38, 0, 0]),
    U256::from_limbs([0x11c461f1969c3053, 0xfe5dee046a99a2a8, 0, 0]),
    U256::from_limbs([0xdcffc83b479aa3a4, 0xfcbe86c7900a88ae, 0, 0]),
    U256::from_limbs([0x6f2b074cf7815e54, 0xf987a7253ac41317, 0, 0]),
    U256::from_limbs([0x940c7a398e4b70f3, 0xf3392b0822b70005, 0, 0]),
    U256::from_limbs([0x43b29c7fa6e889d9, 0xe7159475a2c29b74, 0, 0]),
    U256::from_limbs([0x845ad8f792aa5825, 0xd097f3bdfd2022b8, 0, 0]),
    U256::from_limbs([0x8a65dc1f90e061e5, 0xa9f746462d870fdf, 0, 0]),
    U256::from_limbs([0x90bb3df62baf32f7, 0x70d869a156d2a1b8, 0, 0]),
    U256::from_limbs([0x81231505542fcfa6, 0x31be135f97d08fd9, 0, 0]),
    U256::from_limbs([0xc677de54f3e99bc9, 0x09aa508b5b7a84e1, 0, 0]),
    U256::from_limbs([0x6699c329225ee604, 0x005d6af8dedb8119, 0, 0]),
    U256::from_limbs([0x1ea926041bedfe98, 0x00002216e584f5fa, 0, 0]),
    U256::from_limbs([0x91f7dc42444e8fa2, 0x00000000048a1703, 0, 0]),
];

const ODD_TICK_SEED: U256 = U256::from_limbs([0xaa2d162d1a594001, 0xfffcb933bd6fad37, 0, 0]);
const Q128_SEED: U256 = U256::from_limbs([0, 0, 1, 0]);

/// Calculates `sqrt(1.0001^tick) * 2^96` as a Q64.96 fixed point number.
///
/// # Panics
///
/// Panics if `tick` is outside `[MIN_TICK, MAX_TICK]`.
#[must_use]
pub fn get_sqrt_ratio_at_tick(tick: i32) -> U160 {
    assert!(
        (TickEntry::MIN_TICK..=TickEntry::MAX_TICK).contains(&tick),
        "tick {tick} out of bounds"
    );
    let abs_tick = tick.unsigned_abs();

    let mut ratio = if abs_tick & 1 != 0 {
        ODD_TICK_SEED
    } else {
        Q128_SEED
    };
    for (i, multiplier) in TICK_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (1 << (i + 1)) != 0 {
            ratio = (ratio * multiplier) >> 128;
        }
    }

    if tick > 0 {
        ratio = U256::MAX / ratio;
    }

    // Round up when shifting from Q128.128 to Q64.96
    let mut shifted = ratio >> 32;
    if !(ratio & U256::from(u32::MAX)).is_zero() {
        shifted += U256::from(1u8);
    }
    U160::from(shifted)
}

/// Calculates the largest tick whose sqrt ratio is less than or equal to the given ratio.
///
/// # Panics
///
/// Panics if `sqrt_ratio_x96` is outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
#[must_use]
pub fn get_tick_at_sqrt_ratio(sqrt_ratio_x96: U160) -> i32 {
    assert!(
        sqrt_ratio_x96 >= MIN_SQRT_RATIO && sqrt_ratio_x96 < MAX_SQRT_RATIO,
        "sqrt ratio out of bounds"
    );

    let mut low = TickEntry::MIN_TICK;
    let mut high = TickEntry::MAX_TICK - 1;
    while low < high {
        let mid = low + (high - low + 1) / 2;
        if get_sqrt_ratio_at_tick(mid) <= sqrt_ratio_x96 {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    low
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

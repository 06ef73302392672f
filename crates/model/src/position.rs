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

//! Liquidity position reconstruction from vault range data.

use alloy_primitives::{Address, B256, U256, keccak256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::PoolModelError,
    pool::PoolState,
    pricing::price_of_token0,
    tick_map::{
        sqrt_price_math::get_amounts_for_liquidity,
        tick::{get_max_tick, get_min_tick},
        tick_math::get_sqrt_ratio_at_tick,
    },
};

/// A tick range holding liquidity, as reported for a vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRange {
    /// Lower tick of the range.
    pub tick_lower: i32,
    /// Upper tick of the range.
    pub tick_upper: i32,
    /// Liquidity held over the range.
    pub liquidity: u128,
}

/// A reconstructed liquidity position with its token amounts at the pool price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Lower tick of the position range.
    pub tick_lower: i32,
    /// Upper tick of the position range.
    pub tick_upper: i32,
    /// Position liquidity.
    pub liquidity: u128,
    /// Token0 amount backing the position at the pool's current price.
    pub amount0: U256,
    /// Token1 amount backing the position at the pool's current price.
    pub amount1: U256,
    /// Price of token0 in token1 units at the lower bound.
    pub price_lower: Decimal,
    /// Price of token0 in token1 units at the upper bound.
    pub price_upper: Decimal,
}

/// Computes the on-chain position key: `keccak256(abi.encodePacked(owner, int24, int24))`.
#[must_use]
pub fn position_key(owner: &Address, tick_lower: i32, tick_upper: i32) -> B256 {
    // address (20 bytes) + int24 (3 bytes) + int24 (3 bytes)
    let mut packed = [0u8; 26];
    packed[..20].copy_from_slice(owner.as_slice());
    packed[20..23].copy_from_slice(&tick_lower.to_be_bytes()[1..4]);
    packed[23..26].copy_from_slice(&tick_upper.to_be_bytes()[1..4]);
    keccak256(packed)
}

/// Reconstructs positions from vault ranges, valuing each at the pool's actual price.
///
/// Ranges holding zero liquidity are skipped. The output is sorted ascending by
/// `tick_lower`, then `tick_upper`.
///
/// # Errors
///
/// Returns an error if a range is inverted, misaligned to the pool's tick
/// spacing, or outside the usable tick bounds.
pub fn reconstruct_positions(
    pool: &PoolState,
    ranges: &[PositionRange],
) -> Result<Vec<Position>, PoolModelError> {
    let spacing = pool.tick_spacing();
    let min_tick = get_min_tick(spacing);
    let max_tick = get_max_tick(spacing);

    let mut positions = Vec::with_capacity(ranges.len());
    for range in ranges {
        if range.tick_lower >= range.tick_upper {
            return Err(PoolModelError::InvalidTickRange {
                tick_lower: range.tick_lower,
                tick_upper: range.tick_upper,
            });
        }
        for tick in [range.tick_lower, range.tick_upper] {
            if tick < min_tick || tick > max_tick || tick % spacing != 0 {
                return Err(PoolModelError::OutOfRangeTick {
                    tick,
                    min: min_tick,
                    max: max_tick,
                    spacing,
                });
            }
        }
        if range.liquidity == 0 {
            continue;
        }

        let (amount0, amount1) = get_amounts_for_liquidity(
            pool.sqrt_price_x96,
            range.tick_lower,
            range.tick_upper,
            range.liquidity,
            false,
        );
        let decimals0 = pool.token0.decimals;
        let decimals1 = pool.token1.decimals;
        let price_lower = price_of_token0(
            get_sqrt_ratio_at_tick(range.tick_lower),
            decimals0,
            decimals1,
        )?;
        let price_upper = price_of_token0(
            get_sqrt_ratio_at_tick(range.tick_upper),
            decimals0,
            decimals1,
        )?;
        positions.push(Position {
            tick_lower: range.tick_lower,
            tick_upper: range.tick_upper,
            liquidity: range.liquidity,
            amount0,
            amount1,
            price_lower,
            price_upper,
        });
    }

    positions.sort_by_key(|p| (p.tick_lower, p.tick_upper));
    Ok(positions)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

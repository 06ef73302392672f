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

//! Fee tiers and validated global pool state.

use alloy_primitives::U160;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::{
    error::PoolModelError,
    tick_map::{
        TickSet,
        tick::{TickEntry, get_max_tick, get_min_tick},
        tick_math::{MAX_SQRT_RATIO, MIN_SQRT_RATIO, get_sqrt_ratio_at_tick},
    },
    token::Token,
};

/// The fee tiers at which UniswapV3-style pools can be deployed.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[repr(u32)]
pub enum FeeTier {
    /// 0.01% fee, 1 tick spacing.
    Lowest = 100,
    /// 0.05% fee, 10 tick spacing.
    Low = 500,
    /// 0.3% fee, 60 tick spacing.
    Medium = 3000,
    /// 1% fee, 200 tick spacing.
    High = 10000,
}

impl FeeTier {
    /// Returns the fee in hundredths of a basis point.
    #[must_use]
    pub fn fee(&self) -> u32 {
        *self as u32
    }

    /// Returns the tick spacing enforced for pools at this fee tier.
    #[must_use]
    pub fn tick_spacing(&self) -> i32 {
        match self {
            Self::Lowest => 1,
            Self::Low => 10,
            Self::Medium => 60,
            Self::High => 200,
        }
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = PoolModelError;

    fn try_from(fee: u32) -> Result<Self, Self::Error> {
        match fee {
            100 => Ok(Self::Lowest),
            500 => Ok(Self::Low),
            3000 => Ok(Self::Medium),
            10000 => Ok(Self::High),
            _ => Err(PoolModelError::UnknownFeeTier { fee }),
        }
    }
}

/// Validated global state of a liquidity pool at a specific block.
///
/// Construction checks the slot reading against the usable tick range, the sqrt
/// price bounds, and the tick set's accumulated net liquidity, so every
/// downstream computation can trust the state it starts from. The state is
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    /// The pool's first token (lower contract address).
    pub token0: Token,
    /// The pool's second token.
    pub token1: Token,
    /// The fee tier the pool is deployed at.
    pub fee: FeeTier,
    /// Current sqrt price ratio as a Q64.96 fixed point number.
    pub sqrt_price_x96: U160,
    /// Current tick position of the pool price.
    pub tick_current: i32,
    /// Current active liquidity.
    pub liquidity: u128,
    /// All initialized ticks of the pool.
    pub ticks: TickSet,
}

impl PoolState {
    /// Creates a new [`PoolState`], validating the slot reading against the tick set.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `tick_current` is outside the usable range for the fee tier's spacing.
    /// - `sqrt_price_x96` is outside `[MIN_SQRT_RATIO, MAX_SQRT_RATIO)`.
    /// - `sqrt_price_x96` does not sit within the price bounds of
    ///   `tick_current`.
    /// - `liquidity` does not equal the tick set's net liquidity at or below
    ///   `tick_current`.
    pub fn new(
        token0: Token,
        token1: Token,
        fee: FeeTier,
        sqrt_price_x96: U160,
        tick_current: i32,
        liquidity: u128,
        ticks: TickSet,
    ) -> Result<Self, PoolModelError> {
        let spacing = fee.tick_spacing();
        let min_tick = get_min_tick(spacing);
        let max_tick = get_max_tick(spacing);
        if !(min_tick..=max_tick).contains(&tick_current) {
            return Err(PoolModelError::InvalidSlot {
                reason: format!(
                    "tick {tick_current} outside usable range [{min_tick}, {max_tick}]"
                ),
            });
        }
        if sqrt_price_x96 < MIN_SQRT_RATIO || sqrt_price_x96 >= MAX_SQRT_RATIO {
            return Err(PoolModelError::InvalidSlot {
                reason: format!("sqrt price {sqrt_price_x96} outside valid ratio bounds"),
            });
        }

        // The slot price must agree with the slot tick: the ratio at the tick
        // bounds the price from below, the ratio one tick up from above
        let sqrt_at_tick = get_sqrt_ratio_at_tick(tick_current);
        let sqrt_at_next = get_sqrt_ratio_at_tick((tick_current + 1).min(TickEntry::MAX_TICK));
        if sqrt_price_x96 < sqrt_at_tick || sqrt_price_x96 > sqrt_at_next {
            return Err(PoolModelError::InvalidSlot {
                reason: format!(
                    "sqrt price {sqrt_price_x96} outside the price bounds of tick {tick_current}"
                ),
            });
        }

        let net_sum = ticks.net_liquidity_at_or_below(tick_current);
        if net_sum < 0 || liquidity != net_sum as u128 {
            return Err(PoolModelError::LiquidityMismatch {
                liquidity,
                net_sum,
                tick: tick_current,
            });
        }

        Ok(Self {
            token0,
            token1,
            fee,
            sqrt_price_x96,
            tick_current,
            liquidity,
            ticks,
        })
    }

    /// Returns the tick spacing of the pool's fee tier.
    #[must_use]
    pub fn tick_spacing(&self) -> i32 {
        self.fee.tick_spacing()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

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

//! Active liquidity histogram over spacing-aligned tick bands.

use alloy_primitives::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    error::PoolModelError,
    pool::PoolState,
    pricing::{price_of_token0, price_of_token1},
    tick_map::{
        liquidity_math::{add_delta, sub_delta},
        sqrt_price_math::get_amounts_for_liquidity,
        tick::{get_max_tick, get_min_tick},
        tick_math::get_sqrt_ratio_at_tick,
    },
};

/// A single histogram band covering `[tick_lower, tick_upper)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBar {
    /// Inclusive lower tick of the band.
    pub tick_lower: i32,
    /// Exclusive upper tick of the band.
    pub tick_upper: i32,
    /// Active liquidity while the price is inside the band.
    pub liquidity_active: u128,
    /// Token0 amount backing the band's liquidity.
    pub amount0: U256,
    /// Token1 amount backing the band's liquidity.
    pub amount1: U256,
    /// Price of token0 in token1 units at the band's lower boundary.
    pub price0: Decimal,
    /// Price of token1 in token0 units at the band's lower boundary.
    pub price1: Decimal,
    /// Whether the pool's current tick falls inside this band.
    pub is_current: bool,
}

/// Builds the active liquidity histogram around the pool's current price.
///
/// Walks `window_size` spacing-aligned bands below and above the active band,
/// carrying a liquidity accumulator seeded from the pool's global liquidity and
/// adjusted by the net liquidity of each initialized boundary it reaches. The
/// active band is the one containing the highest initialized, spacing-aligned
/// tick at or below the current tick (clamped to the usable minimum when no
/// such tick exists).
///
/// Returns `2 * window_size + 1` bars sorted ascending by `tick_lower`, fewer
/// when the window runs into the usable tick bounds. Exactly one bar is marked
/// current.
///
/// # Errors
///
/// Returns an error if the accumulator underflows or overflows, which indicates
/// inconsistent tick data.
pub fn build_histogram(
    pool: &PoolState,
    window_size: u32,
) -> Result<Vec<HistogramBar>, PoolModelError> {
    let spacing = pool.tick_spacing();
    let min_tick = get_min_tick(spacing);
    let max_tick = get_max_tick(spacing);

    let active_tick = pool
        .ticks
        .iter()
        .filter(|e| e.tick <= pool.tick_current && e.tick % spacing == 0)
        .next_back()
        .map_or(min_tick, |e| e.tick);

    let mut bars = Vec::with_capacity(2 * window_size as usize + 1);

    // Bands below the active band, walked downward then emitted in ascending order
    let mut below = Vec::with_capacity(window_size as usize);
    let mut liquidity = pool.liquidity;
    let mut tick = active_tick;
    for _ in 0..window_size {
        let next = tick - spacing;
        if next < min_tick {
            break;
        }
        tick = next;
        if let Some(entry) = pool.ticks.get(tick) {
            liquidity = sub_delta(liquidity, entry.liquidity_net)?;
        }
        below.push((tick, liquidity));
    }
    for (tick, liquidity) in below.into_iter().rev() {
        bars.push(make_bar(pool, tick, tick + spacing, liquidity, false)?);
    }

    let active_upper = (active_tick + spacing).min(max_tick);
    bars.push(make_bar(
        pool,
        active_tick,
        active_upper,
        pool.liquidity,
        true,
    )?);

    // Bands above the active band
    let mut liquidity = pool.liquidity;
    let mut tick = active_tick;
    for _ in 0..window_size {
        let next = tick + spacing;
        if next >= max_tick {
            break;
        }
        tick = next;
        if let Some(entry) = pool.ticks.get(tick) {
            liquidity = add_delta(liquidity, entry.liquidity_net)?;
        }
        bars.push(make_bar(pool, tick, tick + spacing, liquidity, false)?);
    }

    Ok(bars)
}

fn make_bar(
    pool: &PoolState,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    is_current: bool,
) -> Result<HistogramBar, PoolModelError> {
    let sqrt_lower = get_sqrt_ratio_at_tick(tick_lower);
    let sqrt_upper = get_sqrt_ratio_at_tick(tick_upper);

    // Clamping the price into the band makes bands below the price all token1
    // and bands above it all token0
    let sqrt_clamped = pool.sqrt_price_x96.clamp(sqrt_lower, sqrt_upper);
    let (amount0, amount1) =
        get_amounts_for_liquidity(sqrt_clamped, tick_lower, tick_upper, liquidity, false);

    let price0 = price_of_token0(sqrt_lower, pool.token0.decimals, pool.token1.decimals)?;
    let price1 = price_of_token1(sqrt_lower, pool.token0.decimals, pool.token1.decimals)?;

    Ok(HistogramBar {
        tick_lower,
        tick_upper,
        liquidity_active: liquidity,
        amount0,
        amount1,
        price0,
        price1,
        is_current,
    })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use rstest::rstest;

    use super::*;
    use crate::{
        pool::FeeTier,
        tick_map::{TickSet, tick::TickEntry},
        token::Token,
    };

    fn pool(ticks: &[(i32, i128)], tick_current: i32, liquidity: u128) -> PoolState {
        let tick_set = TickSet::from_records(
            ticks
                .iter()
                .map(|(t, n)| TickEntry::new(*t, *n, n.unsigned_abs()))
                .collect(),
        )
        .unwrap();
        PoolState::new(
            Token::new(Address::repeat_byte(1), "Token A".into(), "TKA".into(), 18),
            Token::new(Address::repeat_byte(2), "Token B".into(), "TKB".into(), 18),
            FeeTier::Medium,
            get_sqrt_ratio_at_tick(tick_current),
            tick_current,
            liquidity,
            tick_set,
        )
        .unwrap()
    }

    #[rstest]
    fn test_single_window_walk() {
        let pool = pool(&[(-60, 100), (0, 50), (60, -150)], 0, 150);
        let bars = build_histogram(&pool, 1).unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].tick_lower, -60);
        assert_eq!(bars[0].liquidity_active, 50);
        assert!(!bars[0].is_current);
        assert_eq!(bars[1].tick_lower, 0);
        assert_eq!(bars[1].liquidity_active, 150);
        assert!(bars[1].is_current);
        assert_eq!(bars[2].tick_lower, 60);
        assert_eq!(bars[2].liquidity_active, 0);
        assert!(!bars[2].is_current);
    }

    #[rstest]
    fn test_bar_amounts_split_around_price() {
        let l = 10u128.pow(18);
        let pool = pool(&[(-60, l as i128), (0, l as i128 / 2), (60, -(l as i128) * 3 / 2)], 0, l * 3 / 2);
        let bars = build_histogram(&pool, 1).unwrap();

        // Below the price: all token1
        assert_eq!(bars[0].amount0, U256::ZERO);
        assert_eq!(
            bars[0].amount1,
            U256::from(1_497_677_477_955_390u128)
        );

        // Current band at the lower boundary: all token0
        assert_eq!(
            bars[1].amount0,
            U256::from(4_493_032_433_866_171u128)
        );
        assert_eq!(bars[1].amount1, U256::ZERO);

        // Above the price with zero liquidity
        assert_eq!(bars[2].amount0, U256::ZERO);
        assert_eq!(bars[2].amount1, U256::ZERO);
    }

    #[rstest]
    fn test_exactly_one_current_bar() {
        let pool = pool(&[(-120, 100), (-60, 50), (0, 25), (60, -175)], 30, 175);
        let bars = build_histogram(&pool, 3).unwrap();
        assert_eq!(bars.iter().filter(|b| b.is_current).count(), 1);
        let current = bars.iter().find(|b| b.is_current).unwrap();
        assert_eq!(current.tick_lower, 0);
        assert_eq!(current.liquidity_active, 175);
    }

    #[rstest]
    fn test_full_window_bar_count() {
        let pool = pool(&[(-60, 100), (0, 50), (60, -150)], 0, 150);
        let bars = build_histogram(&pool, 5).unwrap();
        assert_eq!(bars.len(), 11);
        assert!(bars.windows(2).all(|w| w[0].tick_lower < w[1].tick_lower));
    }

    #[rstest]
    fn test_window_clamps_at_min_bound() {
        // High tier spacing is 200, min usable tick -887200
        let tick_set = TickSet::from_records(vec![TickEntry::new(-887_200, 150, 150)]).unwrap();
        let pool = PoolState::new(
            Token::new(Address::repeat_byte(1), "Token A".into(), "TKA".into(), 18),
            Token::new(Address::repeat_byte(2), "Token B".into(), "TKB".into(), 18),
            FeeTier::High,
            get_sqrt_ratio_at_tick(-887_000),
            -887_000,
            150,
            tick_set,
        )
        .unwrap();

        let bars = build_histogram(&pool, 5).unwrap();
        // No bands fit below the active band at the minimum boundary
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[0].tick_lower, -887_200);
        assert!(bars[0].is_current);
    }

    #[rstest]
    fn test_no_aligned_initialized_tick_clamps_to_min() {
        // Consistent pool with zero active liquidity and ticks above the price
        let pool = pool(&[(60, 100), (120, -100)], 0, 0);
        let bars = build_histogram(&pool, 1).unwrap();
        assert_eq!(bars[0].tick_lower, get_min_tick(60));
        assert!(bars[0].is_current);
    }

    #[rstest]
    fn test_histogram_is_deterministic() {
        let pool = pool(&[(-60, 100), (0, 50), (60, -150)], 0, 150);
        let first = build_histogram(&pool, 2).unwrap();
        let second = build_histogram(&pool, 2).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn test_window_zero_emits_only_current_band() {
        let pool = pool(&[(-60, 150), (60, -150)], 0, 150);
        let bars = build_histogram(&pool, 0).unwrap();
        assert_eq!(bars.len(), 1);
        assert!(bars[0].is_current);
    }

    #[rstest]
    fn test_bars_serialize_to_json() {
        let pool = pool(&[(-60, 150), (60, -150)], 0, 150);
        let bars = build_histogram(&pool, 1).unwrap();
        let json = serde_json::to_string(&bars).unwrap();
        assert!(json.contains("\"is_current\":true"));
    }
}

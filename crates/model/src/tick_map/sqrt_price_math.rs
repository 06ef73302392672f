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

//! Token amount deltas between sqrt price ratios.

use alloy_primitives::{U160, U256};

use crate::tick_map::{
    full_math::{FullMath, Q96},
    tick_math::get_sqrt_ratio_at_tick,
};

/// Encodes the sqrt ratio of two token amounts as a Q64.96 fixed point number.
///
/// Calculates `sqrt(amount0 / amount1) * 2^96`, useful for constructing test
/// prices from simple reserve ratios.
///
/// # Panics
///
/// Panics if `amount1` is zero.
#[must_use]
pub fn encode_sqrt_ratio_x96(amount0: u128, amount1: u128) -> U160 {
    let amount0 = U256::from(amount0);
    let amount1 = U256::from(amount1);
    assert!(!amount1.is_zero(), "amount1 must be non-zero");
    if amount0.is_zero() {
        return U160::ZERO;
    }

    // sqrt(amount0 / amount1) * 2^96 == sqrt(amount0 * 2^192 / amount1)
    let q192 = U256::from(1u8) << 192;
    let ratio_q192 = FullMath::mul_div(amount0, q192, amount1).unwrap_or(U256::MAX);
    let sqrt_result = FullMath::sqrt(ratio_q192);

    if sqrt_result > U256::from(U160::MAX) {
        U160::MAX
    } else {
        U160::from(sqrt_result)
    }
}

/// Calculates the amount of token0 delta between two sqrt price ratios.
#[must_use]
pub fn get_amount0_delta(
    sqrt_ratio_ax96: U160,
    sqrt_ratio_bx96: U160,
    liquidity: u128,
    round_up: bool,
) -> U256 {
    let (sqrt_ratio_a, sqrt_ratio_b) = if sqrt_ratio_ax96 > sqrt_ratio_bx96 {
        (sqrt_ratio_bx96, sqrt_ratio_ax96)
    } else {
        (sqrt_ratio_ax96, sqrt_ratio_bx96)
    };

    let numerator1 = U256::from(liquidity) << 96;
    let numerator2 = U256::from(sqrt_ratio_b - sqrt_ratio_a);

    if round_up {
        let result =
            FullMath::mul_div_rounding_up(numerator1, numerator2, U256::from(sqrt_ratio_b))
                .unwrap_or(U256::ZERO);
        FullMath::div_rounding_up(result, U256::from(sqrt_ratio_a)).unwrap_or(U256::ZERO)
    } else {
        let result = FullMath::mul_div(numerator1, numerator2, U256::from(sqrt_ratio_b))
            .unwrap_or(U256::ZERO);
        result / U256::from(sqrt_ratio_a)
    }
}

/// Calculates the amount of token1 delta between two sqrt price ratios.
#[must_use]
pub fn get_amount1_delta(
    sqrt_ratio_ax96: U160,
    sqrt_ratio_bx96: U160,
    liquidity: u128,
    round_up: bool,
) -> U256 {
    let (sqrt_ratio_a, sqrt_ratio_b) = if sqrt_ratio_ax96 > sqrt_ratio_bx96 {
        (sqrt_ratio_bx96, sqrt_ratio_ax96)
    } else {
        (sqrt_ratio_ax96, sqrt_ratio_bx96)
    };

    let liquidity = U256::from(liquidity);
    let sqrt_ratio_diff = U256::from(sqrt_ratio_b - sqrt_ratio_a);

    if round_up {
        FullMath::mul_div_rounding_up(liquidity, sqrt_ratio_diff, Q96).unwrap_or(U256::ZERO)
    } else {
        FullMath::mul_div(liquidity, sqrt_ratio_diff, Q96).unwrap_or(U256::ZERO)
    }
}

/// Calculates the token amounts backing `liquidity` over the tick range at the given price.
///
/// When the price sits below the range the liquidity is entirely token0, above the
/// range entirely token1, and inside the range it splits at the current price.
#[must_use]
pub fn get_amounts_for_liquidity(
    sqrt_ratio_x96: U160,
    tick_lower: i32,
    tick_upper: i32,
    liquidity: u128,
    round_up: bool,
) -> (U256, U256) {
    let sqrt_ratio_lower_x96 = get_sqrt_ratio_at_tick(tick_lower);
    let sqrt_ratio_upper_x96 = get_sqrt_ratio_at_tick(tick_upper);

    let (sqrt_ratio_a, sqrt_ratio_b) = if sqrt_ratio_lower_x96 > sqrt_ratio_upper_x96 {
        (sqrt_ratio_upper_x96, sqrt_ratio_lower_x96)
    } else {
        (sqrt_ratio_lower_x96, sqrt_ratio_upper_x96)
    };

    let amount0 = if sqrt_ratio_x96 <= sqrt_ratio_a {
        get_amount0_delta(sqrt_ratio_a, sqrt_ratio_b, liquidity, round_up)
    } else if sqrt_ratio_x96 < sqrt_ratio_b {
        get_amount0_delta(sqrt_ratio_x96, sqrt_ratio_b, liquidity, round_up)
    } else {
        U256::ZERO
    };

    let amount1 = if sqrt_ratio_x96 < sqrt_ratio_a {
        U256::ZERO
    } else if sqrt_ratio_x96 < sqrt_ratio_b {
        get_amount1_delta(sqrt_ratio_a, sqrt_ratio_x96, liquidity, round_up)
    } else {
        get_amount1_delta(sqrt_ratio_a, sqrt_ratio_b, liquidity, round_up)
    };

    (amount0, amount1)
}

/// Expands an amount to 18 decimal places (multiplies by 10^18).
#[must_use]
pub fn expand_to_18_decimals(amount: u64) -> u128 {
    amount as u128 * 10u128.pow(18)
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    // Amount delta cases are based on https://github.com/Uniswap/v3-core/blob/main/test/SqrtPriceMath.spec.ts
    use rstest::rstest;

    use super::*;
    use crate::tick_map::full_math::Q96_U160;

    #[rstest]
    fn test_encode_sqrt_ratio_x96_some_values() {
        assert_eq!(encode_sqrt_ratio_x96(1, 1), Q96_U160);
        assert_eq!(
            encode_sqrt_ratio_x96(100, 1),
            U160::from(792281625142643375935439503360_u128)
        );
        assert_eq!(
            encode_sqrt_ratio_x96(1, 100),
            U160::from(7922816251426433759354395033_u128)
        );
        assert_eq!(
            encode_sqrt_ratio_x96(111, 333),
            U160::from(45742400955009932534161870629_u128)
        );
        assert_eq!(
            encode_sqrt_ratio_x96(333, 111),
            U160::from(137227202865029797602485611888_u128)
        );
    }

    #[rstest]
    fn test_get_amount0_delta_returns_0_if_liquidity_is_0() {
        let amount0 = get_amount0_delta(
            encode_sqrt_ratio_x96(1, 1),
            encode_sqrt_ratio_x96(2, 1),
            0,
            true,
        );
        assert_eq!(amount0, U256::ZERO);
    }

    #[rstest]
    fn test_get_amount0_delta_returns_0_if_prices_are_equal() {
        let amount0 = get_amount0_delta(
            encode_sqrt_ratio_x96(1, 1),
            encode_sqrt_ratio_x96(1, 1),
            0,
            true,
        );
        assert_eq!(amount0, U256::ZERO);
    }

    #[rstest]
    fn test_get_amount0_delta_for_price_of_1_to_1_21() {
        let amount0 = get_amount0_delta(
            encode_sqrt_ratio_x96(1, 1),
            encode_sqrt_ratio_x96(121, 100),
            expand_to_18_decimals(1),
            true,
        );
        assert_eq!(
            amount0,
            U256::from_str_radix("90909090909090910", 10).unwrap()
        );

        let amount0_rounded_down = get_amount0_delta(
            encode_sqrt_ratio_x96(1, 1),
            encode_sqrt_ratio_x96(121, 100),
            expand_to_18_decimals(1),
            false,
        );
        assert_eq!(amount0_rounded_down, amount0 - U256::from(1));
    }

    #[rstest]
    fn test_get_amount1_delta_for_price_of_1_to_1_21() {
        let amount1 = get_amount1_delta(
            encode_sqrt_ratio_x96(1, 1),
            encode_sqrt_ratio_x96(121, 100),
            expand_to_18_decimals(1),
            true,
        );
        assert_eq!(
            amount1,
            U256::from_str_radix("100000000000000000", 10).unwrap()
        );

        let amount1_rounded_down = get_amount1_delta(
            encode_sqrt_ratio_x96(1, 1),
            encode_sqrt_ratio_x96(121, 100),
            expand_to_18_decimals(1),
            false,
        );
        assert_eq!(amount1_rounded_down, amount1 - U256::from(1));
    }

    #[rstest]
    fn test_amounts_below_range_are_all_token0() {
        let price = get_sqrt_ratio_at_tick(-600);
        let (amount0, amount1) =
            get_amounts_for_liquidity(price, -600, 600, expand_to_18_decimals(1), false);
        assert_eq!(
            amount0,
            U256::from_str_radix("60005999255049926", 10).unwrap()
        );
        assert_eq!(amount1, U256::ZERO);
    }

    #[rstest]
    fn test_amounts_above_range_are_all_token1() {
        let price = get_sqrt_ratio_at_tick(600);
        let (amount0, amount1) =
            get_amounts_for_liquidity(price, -600, 600, expand_to_18_decimals(1), false);
        assert_eq!(amount0, U256::ZERO);
        assert_eq!(
            amount1,
            U256::from_str_radix("60005999255049926", 10).unwrap()
        );
    }

    #[rstest]
    fn test_amounts_within_range_split_at_price() {
        let (amount0, amount1) =
            get_amounts_for_liquidity(Q96_U160, -600, 600, expand_to_18_decimals(1), false);
        assert_eq!(
            amount0,
            U256::from_str_radix("29553010879137169", 10).unwrap()
        );
        assert_eq!(
            amount1,
            U256::from_str_radix("29553010879137169", 10).unwrap()
        );
    }
}

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

//! Exact integer scaling from Q64.96 sqrt prices to display decimals.
//!
//! All scaling runs through 512-bit integer arithmetic; floats never enter the
//! pipeline. Precision is only reduced at the final `Decimal` conversion, which
//! is bounded by the 96-bit mantissa.

use alloy_primitives::{U160, U256};
use rust_decimal::Decimal;

use crate::{
    error::PoolModelError,
    tick_map::full_math::{FullMath, Q96},
};

/// The display scale applied before `Decimal` conversion.
const PRICE_SCALE: u32 = 18;

/// The largest value a `Decimal` mantissa can hold (2^96 - 1).
const MAX_DECIMAL_MANTISSA: u128 = 79_228_162_514_264_337_593_543_950_335;

/// Returns 10^exponent as a 256-bit unsigned integer.
#[must_use]
pub fn pow10_u256(exponent: u32) -> U256 {
    U256::from(10u8).pow(U256::from(exponent))
}

/// Converts a scaled integer into a `Decimal`, reducing precision only when the
/// value exceeds the 96-bit mantissa, and saturating at `Decimal::MAX` beyond that.
#[must_use]
pub fn decimal_from_scaled(value: U256, scale: u32) -> Decimal {
    let mut value = value;
    let mut scale = scale;
    let ten = U256::from(10u8);
    while value > U256::from(MAX_DECIMAL_MANTISSA) && scale > 0 {
        value /= ten;
        scale -= 1;
    }
    if value > U256::from(MAX_DECIMAL_MANTISSA) {
        return Decimal::MAX;
    }
    let mantissa: u128 = value.to();
    Decimal::from_i128_with_scale(mantissa as i128, scale)
}

/// Returns the price of token0 denominated in token1 at the given sqrt price.
///
/// Computes `(sqrt_price / 2^96)^2 * 10^(decimals0 - decimals1)` exactly in
/// 512-bit integer space before rendering.
///
/// # Errors
///
/// Returns an error if `sqrt_price_x96` is zero.
pub fn price_of_token0(
    sqrt_price_x96: U160,
    decimals0: u8,
    decimals1: u8,
) -> Result<Decimal, PoolModelError> {
    let sqrt = U256::from(sqrt_price_x96);
    if sqrt.is_zero() {
        return Err(PoolModelError::Arithmetic {
            reason: "sqrt price is zero".to_string(),
        });
    }
    let step = FullMath::mul_div(sqrt, pow10_u256(PRICE_SCALE + u32::from(decimals0)), Q96)?;
    let scaled = FullMath::mul_div(step, sqrt, Q96)?;
    let value = scaled / pow10_u256(u32::from(decimals1));
    Ok(decimal_from_scaled(value, PRICE_SCALE))
}

/// Returns the price of token1 denominated in token0 at the given sqrt price.
///
/// Computes the inverse of [`price_of_token0`] through the inverted ratio rather
/// than a decimal division, keeping the integer path exact.
///
/// # Errors
///
/// Returns an error if `sqrt_price_x96` is zero.
pub fn price_of_token1(
    sqrt_price_x96: U160,
    decimals0: u8,
    decimals1: u8,
) -> Result<Decimal, PoolModelError> {
    let sqrt = U256::from(sqrt_price_x96);
    if sqrt.is_zero() {
        return Err(PoolModelError::Arithmetic {
            reason: "sqrt price is zero".to_string(),
        });
    }
    let step = FullMath::mul_div(Q96, pow10_u256(PRICE_SCALE + u32::from(decimals1)), sqrt)?;
    let scaled = FullMath::mul_div(step, Q96, sqrt)?;
    let value = scaled / pow10_u256(u32::from(decimals0));
    Ok(decimal_from_scaled(value, PRICE_SCALE))
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::tick_map::{full_math::Q96_U160, tick_math::get_sqrt_ratio_at_tick};

    #[rstest]
    fn test_price_is_one_at_tick_zero_with_equal_decimals() {
        assert_eq!(price_of_token0(Q96_U160, 18, 18).unwrap(), dec!(1.000000000000000000));
        assert_eq!(price_of_token1(Q96_U160, 18, 18).unwrap(), dec!(1.000000000000000000));
    }

    #[rstest]
    fn test_price_at_tick_60() {
        let sqrt = get_sqrt_ratio_at_tick(60);
        assert_eq!(
            price_of_token0(sqrt, 18, 18).unwrap(),
            dec!(1.006017734268818165)
        );
        assert_eq!(
            price_of_token1(sqrt, 18, 18).unwrap(),
            dec!(0.994018262239490337)
        );
    }

    #[rstest]
    fn test_decimals_shift_the_price() {
        // 6-decimal token0 against an 18-decimal token1 at a 1:1 raw ratio
        assert_eq!(
            price_of_token0(Q96_U160, 6, 18).unwrap(),
            dec!(0.000000000001)
        );
    }

    #[rstest]
    fn test_zero_sqrt_price_is_error() {
        assert!(price_of_token0(U160::ZERO, 18, 18).is_err());
        assert!(price_of_token1(U160::ZERO, 18, 18).is_err());
    }

    #[rstest]
    fn test_decimal_from_scaled_reduces_precision() {
        // 10^30 scaled by 18 cannot fit the mantissa at full scale
        let value = pow10_u256(30);
        let result = decimal_from_scaled(value, 18);
        assert_eq!(result, dec!(1000000000000));
    }

    #[rstest]
    fn test_decimal_from_scaled_saturates() {
        assert_eq!(decimal_from_scaled(U256::MAX, 0), Decimal::MAX);
    }
}

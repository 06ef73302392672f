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

//! Full-precision 256-bit multiplication and division through 512-bit intermediates.

use alloy_primitives::{U160, U256, U512};

use crate::error::PoolModelError;

/// Q64.96 fixed point resolution (2^96).
pub const Q96: U256 = U256::from_limbs([0, 1 << 32, 0, 0]);
/// Q64.96 fixed point resolution as a 160-bit unsigned integer.
pub const Q96_U160: U160 = U160::from_limbs([0, 1 << 32, 0]);
/// Q128.128 fixed point resolution (2^128).
pub const Q128: U256 = U256::from_limbs([0, 0, 1, 0]);
/// 2^192, the square of the Q64.96 resolution.
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// Full-precision math operations matching the UniswapV3 `FullMath` library semantics.
pub struct FullMath;

impl FullMath {
    /// Calculates `floor(a * b / denominator)` without intermediate overflow.
    ///
    /// # Errors
    ///
    /// Returns an error if `denominator` is zero or the result does not fit in 256 bits.
    pub fn mul_div(a: U256, b: U256, denominator: U256) -> Result<U256, PoolModelError> {
        if denominator.is_zero() {
            return Err(PoolModelError::Arithmetic {
                reason: "mul_div division by zero".to_string(),
            });
        }
        let product = U512::from(a) * U512::from(b);
        let result = product / U512::from(denominator);
        Self::narrow(result)
    }

    /// Calculates `ceil(a * b / denominator)` without intermediate overflow.
    ///
    /// # Errors
    ///
    /// Returns an error if `denominator` is zero or the result does not fit in 256 bits.
    pub fn mul_div_rounding_up(
        a: U256,
        b: U256,
        denominator: U256,
    ) -> Result<U256, PoolModelError> {
        if denominator.is_zero() {
            return Err(PoolModelError::Arithmetic {
                reason: "mul_div_rounding_up division by zero".to_string(),
            });
        }
        let product = U512::from(a) * U512::from(b);
        let denominator = U512::from(denominator);
        let mut result = product / denominator;
        if !(product % denominator).is_zero() {
            result += U512::from(1u8);
        }
        Self::narrow(result)
    }

    /// Calculates `ceil(numerator / denominator)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `denominator` is zero.
    pub fn div_rounding_up(numerator: U256, denominator: U256) -> Result<U256, PoolModelError> {
        if denominator.is_zero() {
            return Err(PoolModelError::Arithmetic {
                reason: "div_rounding_up division by zero".to_string(),
            });
        }
        let quotient = numerator / denominator;
        if (numerator % denominator).is_zero() {
            Ok(quotient)
        } else {
            Ok(quotient + U256::from(1u8))
        }
    }

    /// Calculates the integer square root of `x` (Babylonian method).
    #[must_use]
    pub fn sqrt(x: U256) -> U256 {
        if x.is_zero() {
            return U256::ZERO;
        }
        let mut z = (x >> 1) + U256::from(1u8);
        let mut y = x;
        while z < y {
            y = z;
            z = (x / z + z) >> 1;
        }
        y
    }

    fn narrow(value: U512) -> Result<U256, PoolModelError> {
        if value > U512::from(U256::MAX) {
            return Err(PoolModelError::Arithmetic {
                reason: "mul_div result exceeds 256 bits".to_string(),
            });
        }
        let limbs = value.into_limbs();
        Ok(U256::from_limbs([limbs[0], limbs[1], limbs[2], limbs[3]]))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_mul_div_basic() {
        let result = FullMath::mul_div(U256::from(6u8), U256::from(7u8), U256::from(2u8)).unwrap();
        assert_eq!(result, U256::from(21u8));
    }

    #[rstest]
    fn test_mul_div_truncates() {
        let result = FullMath::mul_div(U256::from(7u8), U256::from(3u8), U256::from(2u8)).unwrap();
        assert_eq!(result, U256::from(10u8));
    }

    #[rstest]
    fn test_mul_div_no_intermediate_overflow() {
        // (2^255 * 4) / 8 = 2^254
        let a = U256::from(1u8) << 255;
        let result = FullMath::mul_div(a, U256::from(4u8), U256::from(8u8)).unwrap();
        assert_eq!(result, U256::from(1u8) << 254);
    }

    #[rstest]
    fn test_mul_div_division_by_zero() {
        let result = FullMath::mul_div(U256::from(1u8), U256::from(1u8), U256::ZERO);
        assert!(result.is_err());
    }

    #[rstest]
    fn test_mul_div_result_overflow() {
        let result = FullMath::mul_div(U256::MAX, U256::MAX, U256::from(1u8));
        assert!(result.is_err());
    }

    #[rstest]
    fn test_mul_div_rounding_up() {
        let up =
            FullMath::mul_div_rounding_up(U256::from(7u8), U256::from(3u8), U256::from(2u8))
                .unwrap();
        assert_eq!(up, U256::from(11u8));

        let exact =
            FullMath::mul_div_rounding_up(U256::from(6u8), U256::from(3u8), U256::from(2u8))
                .unwrap();
        assert_eq!(exact, U256::from(9u8));
    }

    #[rstest]
    fn test_div_rounding_up() {
        assert_eq!(
            FullMath::div_rounding_up(U256::from(7u8), U256::from(2u8)).unwrap(),
            U256::from(4u8)
        );
        assert_eq!(
            FullMath::div_rounding_up(U256::from(6u8), U256::from(2u8)).unwrap(),
            U256::from(3u8)
        );
        assert!(FullMath::div_rounding_up(U256::from(1u8), U256::ZERO).is_err());
    }

    #[rstest]
    #[case(0u128, 0u128)]
    #[case(1, 1)]
    #[case(4, 2)]
    #[case(8, 2)]
    #[case(9, 3)]
    #[case(1_000_000_000_000, 1_000_000)]
    fn test_sqrt(#[case] input: u128, #[case] expected: u128) {
        assert_eq!(FullMath::sqrt(U256::from(input)), U256::from(expected));
    }

    #[rstest]
    fn test_q_constants() {
        assert_eq!(Q96, U256::from(1u8) << 96);
        assert_eq!(U256::from(Q96_U160), Q96);
        assert_eq!(Q128, U256::from(1u8) << 128);
        assert_eq!(Q192, U256::from(1u8) << 192);
    }
}

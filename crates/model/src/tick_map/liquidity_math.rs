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

use crate::error::PoolModelError;

/// Applies a signed liquidity delta to an unsigned liquidity accumulator.
///
/// Reconstructed tick data can be inconsistent, so underflow and overflow are
/// reported as data-integrity errors rather than panics.
///
/// # Errors
///
/// Returns an error if subtracting underflows below zero or adding overflows `u128`.
pub fn add_delta(liquidity: u128, delta: i128) -> Result<u128, PoolModelError> {
    let result = if delta < 0 {
        liquidity.checked_sub(delta.unsigned_abs())
    } else {
        liquidity.checked_add(delta as u128)
    };
    result.ok_or(PoolModelError::LiquidityOverflow { liquidity, delta })
}

/// Removes a signed liquidity delta from an unsigned liquidity accumulator,
/// the inverse of [`add_delta`] (used when crossing ticks downward).
///
/// # Errors
///
/// Returns an error if the operation underflows or overflows `u128`.
pub fn sub_delta(liquidity: u128, delta: i128) -> Result<u128, PoolModelError> {
    let result = if delta < 0 {
        liquidity.checked_add(delta.unsigned_abs())
    } else {
        liquidity.checked_sub(delta as u128)
    };
    result.ok_or(PoolModelError::LiquidityOverflow { liquidity, delta })
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, 0, 1)]
    #[case(1, 1, 2)]
    #[case(1, -1, 0)]
    #[case(3, -2, 1)]
    fn test_add_delta(#[case] x: u128, #[case] y: i128, #[case] expected: u128) {
        assert_eq!(add_delta(x, y), Ok(expected));
    }

    #[rstest]
    fn test_underflow_is_error() {
        assert_eq!(
            add_delta(0, -1),
            Err(PoolModelError::LiquidityOverflow {
                liquidity: 0,
                delta: -1
            })
        );
    }

    #[rstest]
    fn test_overflow_is_error() {
        assert!(add_delta(u128::MAX - 14, 15).is_err());
    }

    #[rstest]
    #[case(150, 100, 50)]
    #[case(150, -100, 250)]
    fn test_sub_delta(#[case] x: u128, #[case] y: i128, #[case] expected: u128) {
        assert_eq!(sub_delta(x, y), Ok(expected));
    }

    #[rstest]
    fn test_sub_delta_underflow_is_error() {
        assert!(sub_delta(50, 100).is_err());
    }

    #[rstest]
    fn test_min_delta_subtracts() {
        // i128::MIN has no positive counterpart; unsigned_abs covers it
        assert_eq!(add_delta(u128::MAX, i128::MIN), Ok(u128::MAX - (1 << 127)));
    }
}

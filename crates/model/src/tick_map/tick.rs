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

use serde::{Deserialize, Serialize};

/// Liquidity bookkeeping for a single initialized tick.
///
/// `liquidity_net` is the signed amount by which active liquidity changes when the
/// price crosses this tick moving upward; `liquidity_gross` is the total liquidity
/// referencing the tick from either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEntry {
    /// The tick index.
    pub tick: i32,
    /// Net liquidity change when crossing the tick left to right.
    pub liquidity_net: i128,
    /// Total position liquidity referencing the tick.
    pub liquidity_gross: u128,
}

impl TickEntry {
    /// The minimum tick supported by the protocol.
    pub const MIN_TICK: i32 = -887272;
    /// The maximum tick supported by the protocol.
    pub const MAX_TICK: i32 = 887272;

    /// Creates a new [`TickEntry`] with the specified parameters.
    #[must_use]
    pub fn new(tick: i32, liquidity_net: i128, liquidity_gross: u128) -> Self {
        Self {
            tick,
            liquidity_net,
            liquidity_gross,
        }
    }
}

/// Returns the minimum usable tick for the given tick spacing.
#[must_use]
pub fn get_min_tick(tick_spacing: i32) -> i32 {
    (TickEntry::MIN_TICK / tick_spacing) * tick_spacing
}

/// Returns the maximum usable tick for the given tick spacing.
#[must_use]
pub fn get_max_tick(tick_spacing: i32) -> i32 {
    (TickEntry::MAX_TICK / tick_spacing) * tick_spacing
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1, -887272, 887272)]
    #[case(10, -887270, 887270)]
    #[case(60, -887220, 887220)]
    #[case(200, -887200, 887200)]
    fn test_usable_tick_bounds(#[case] spacing: i32, #[case] min: i32, #[case] max: i32) {
        assert_eq!(get_min_tick(spacing), min);
        assert_eq!(get_max_tick(spacing), max);
    }

    #[rstest]
    fn test_bounds_are_symmetric() {
        for spacing in [1, 10, 60, 200] {
            assert_eq!(get_min_tick(spacing), -get_max_tick(spacing));
            assert_eq!(get_min_tick(spacing) % spacing, 0);
        }
    }
}

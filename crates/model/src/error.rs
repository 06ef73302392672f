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

//! Error types for pool reconstruction and validation.

use thiserror::Error;

/// Errors raised while validating or deriving pool model state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolModelError {
    /// The same tick appeared more than once with contradictory liquidity values.
    #[error("duplicate tick {tick} with conflicting liquidity values")]
    DuplicateTick { tick: i32 },
    /// A tick or range bound is not a usable tick for the given spacing.
    #[error("tick {tick} is not a usable tick: must be a multiple of {spacing} in [{min}, {max}]")]
    OutOfRangeTick {
        tick: i32,
        min: i32,
        max: i32,
        spacing: i32,
    },
    /// A position range has its bounds inverted.
    #[error("invalid tick range: lower {tick_lower} must be below upper {tick_upper}")]
    InvalidTickRange { tick_lower: i32, tick_upper: i32 },
    /// The global slot reading is internally inconsistent or out of bounds.
    #[error("invalid slot reading: {reason}")]
    InvalidSlot { reason: String },
    /// The global liquidity does not match the accumulated net liquidity of the tick set.
    #[error("global liquidity {liquidity} does not match net liquidity sum {net_sum} at tick {tick}")]
    LiquidityMismatch {
        liquidity: u128,
        net_sum: i128,
        tick: i32,
    },
    /// Applying a signed liquidity delta underflowed or overflowed the accumulator.
    #[error("liquidity accumulator overflow applying delta {delta} to {liquidity}")]
    LiquidityOverflow { liquidity: u128, delta: i128 },
    /// The fee value does not correspond to a known fee tier.
    #[error("unknown fee tier: {fee}")]
    UnknownFeeTier { fee: u32 },
    /// A fixed-point arithmetic operation failed.
    #[error("arithmetic error: {reason}")]
    Arithmetic { reason: String },
}

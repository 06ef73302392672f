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

//! Snapshot output types bundling per-tier before/after reconstructions.

use alloy_primitives::Address;
use poollens_model::{FeeTier, HistogramBar, PoolState, Position, Token};
use serde::{Deserialize, Serialize};

use crate::source::BlockId;

/// A fully reconstructed pool on one side of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolReconstruction {
    /// Validated global pool state with its tick set.
    pub pool: PoolState,
    /// Active liquidity histogram around the current price.
    pub histogram: Vec<HistogramBar>,
    /// The vault's positions in the pool, valued at the pool price.
    pub positions: Vec<Position>,
}

/// Pool state for one fee tier on one side of the comparison.
///
/// A pair can have no pool deployed at a given fee tier; that is a regular
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TierState {
    /// A pool is deployed and was reconstructed.
    Present(Box<PoolReconstruction>),
    /// No pool is deployed for the pair at this fee tier.
    Absent,
}

impl TierState {
    /// Returns the reconstruction if a pool is present.
    #[must_use]
    pub fn as_present(&self) -> Option<&PoolReconstruction> {
        match self {
            Self::Present(reconstruction) => Some(reconstruction),
            Self::Absent => None,
        }
    }
}

/// The result of reconstructing one tier side.
///
/// Malformed source data fails only the tier it belongs to; sibling tiers in
/// the same snapshot still resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TierOutcome {
    /// The side resolved to a tier state.
    Ok(TierState),
    /// The side failed validation or derivation; holds the reason.
    Failed(String),
}

/// Before/after reconstruction outcomes for a single fee tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierComparison {
    /// The fee tier compared.
    pub fee: FeeTier,
    /// Outcome one block before the target.
    pub before: TierOutcome,
    /// Outcome at the target block.
    pub after: TierOutcome,
}

/// A complete before/after snapshot of a vault's pools around a target block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The vault whose ranges were reconstructed.
    pub vault: Address,
    /// The pair's first token.
    pub token0: Token,
    /// The pair's second token.
    pub token1: Token,
    /// The block whose state is compared against its predecessor.
    pub target_block: BlockId,
    /// Per-tier comparisons sorted ascending by fee.
    pub tiers: Vec<TierComparison>,
}

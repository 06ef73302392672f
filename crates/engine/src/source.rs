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

//! The data source abstraction over historical pool and vault state providers.

use alloy_primitives::{Address, U160};
use async_trait::async_trait;
use poollens_model::{FeeTier, Token};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A block number identifying a historical point of chain state.
pub type BlockId = u64;

/// Transport-level failure reported by a data source.
///
/// The engine treats this as opaque: any fetch failure aborts the snapshot
/// rather than producing partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("data source request failed: {message}")]
pub struct FetchError {
    /// Human-readable description of the failure.
    pub message: String,
}

impl FetchError {
    /// Creates a new [`FetchError`] with the specified message.
    #[must_use]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The global slot reading of a deployed pool at a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotReading {
    /// Current sqrt price ratio as a Q64.96 fixed point number.
    pub sqrt_price_x96: U160,
    /// Current tick position.
    pub tick: i32,
    /// Current active liquidity.
    pub liquidity: u128,
}

/// A raw initialized tick record as returned by a data source page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickRecord {
    /// The tick index.
    pub tick: i32,
    /// Net liquidity change when crossing the tick left to right.
    pub liquidity_net: i128,
    /// Total position liquidity referencing the tick.
    pub liquidity_gross: u128,
}

/// A vault liquidity range at a block, tagged with the pool fee it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeRecord {
    /// Lower tick of the range.
    pub tick_lower: i32,
    /// Upper tick of the range.
    pub tick_upper: i32,
    /// Raw pool fee in hundredths of a basis point.
    pub fee: u32,
    /// Liquidity held over the range.
    pub liquidity: u128,
}

/// Read access to historical pool and vault state.
///
/// Implementations wrap an archive RPC node, a subgraph, or an in-memory store
/// for tests. All methods take the block at which state is observed.
#[async_trait]
pub trait PoolDataSource: Send + Sync {
    /// Returns the pool's global slot at the block, or `None` if no pool is
    /// deployed for the pair at this fee tier.
    async fn slot(
        &self,
        token0: Address,
        token1: Address,
        fee: FeeTier,
        block: BlockId,
    ) -> Result<Option<SlotReading>, FetchError>;

    /// Returns one page of initialized tick records ordered ascending by tick,
    /// starting `skip` records into the full stream.
    async fn tick_page(
        &self,
        token0: Address,
        token1: Address,
        fee: FeeTier,
        block: BlockId,
        skip: usize,
        page_size: usize,
    ) -> Result<Vec<TickRecord>, FetchError>;

    /// Returns all liquidity ranges held by the vault at the block.
    async fn vault_ranges(
        &self,
        vault: Address,
        block: BlockId,
    ) -> Result<Vec<RangeRecord>, FetchError>;

    /// Returns token metadata for the address.
    async fn token(&self, address: Address) -> Result<Token, FetchError>;
}

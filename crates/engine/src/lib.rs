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

//! Async snapshot reconstruction engine for concentrated-liquidity pools.
//!
//! Orchestrates historical pool reconstruction around a target block: fetches
//! slot readings, paginated tick streams, and vault ranges through the
//! [`source::PoolDataSource`] seam, then derives validated state, liquidity
//! histograms, and positions per fee tier on both sides of the block.

pub mod comparator;
pub mod config;
pub mod error;
pub mod snapshot;
pub mod source;

pub use comparator::reconstruct_snapshot;
pub use config::ReconstructConfig;
pub use error::ReconstructError;
pub use snapshot::{PoolReconstruction, Snapshot, TierComparison, TierOutcome, TierState};
pub use source::{BlockId, FetchError, PoolDataSource, RangeRecord, SlotReading, TickRecord};

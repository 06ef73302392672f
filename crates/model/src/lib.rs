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

//! Domain model for concentrated-liquidity pool reconstruction.
//!
//! Pure, deterministic building blocks: the UniswapV3 fixed-point math
//! libraries, validated pool state, the active liquidity histogram walker, and
//! position reconstruction. Everything here is synchronous and free of I/O;
//! the companion engine crate layers data fetching and orchestration on top.

pub mod error;
pub mod histogram;
pub mod pool;
pub mod position;
pub mod pricing;
pub mod tick_map;
pub mod token;

pub use error::PoolModelError;
pub use histogram::{HistogramBar, build_histogram};
pub use pool::{FeeTier, PoolState};
pub use position::{Position, PositionRange, position_key, reconstruct_positions};
pub use tick_map::{TickSet, tick::TickEntry};
pub use token::Token;

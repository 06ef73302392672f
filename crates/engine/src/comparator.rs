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

//! Before/after snapshot reconstruction across fee tiers.

use alloy_primitives::Address;
use poollens_model::{
    FeeTier, PoolModelError, PoolState, PositionRange, TickEntry, TickSet, Token, build_histogram,
    reconstruct_positions,
};
use strum::IntoEnumIterator;

use crate::{
    config::ReconstructConfig,
    error::ReconstructError,
    snapshot::{PoolReconstruction, Snapshot, TierComparison, TierOutcome, TierState},
    source::{BlockId, FetchError, PoolDataSource, RangeRecord, SlotReading, TickRecord},
};

/// Reconstructs a before/after snapshot of the vault's pools around the target block.
///
/// The "before" side observes state at `target_block - 1`, the "after" side at
/// `target_block`. Every known fee tier is probed on both sides concurrently;
/// a tier appears in the output when a pool is deployed on either side or a
/// vault range names it. Tick streams are paginated until exhausted before any
/// state is derived.
///
/// Transport failures abort the whole call. Malformed pool data fails only the
/// tier side it belongs to, recorded as [`TierOutcome::Failed`].
///
/// # Errors
///
/// Returns an error if `target_block` is zero or any data source request fails.
pub async fn reconstruct_snapshot<S: PoolDataSource + ?Sized>(
    source: &S,
    vault: Address,
    token0: Address,
    token1: Address,
    target_block: BlockId,
    config: &ReconstructConfig,
) -> Result<Snapshot, ReconstructError> {
    if target_block == 0 {
        return Err(ReconstructError::InvalidBlock);
    }
    let block_before = target_block - 1;
    let block_after = target_block;

    let (token0, token1, ranges_before, ranges_after) = futures::try_join!(
        source.token(token0),
        source.token(token1),
        source.vault_ranges(vault, block_before),
        source.vault_ranges(vault, block_after),
    )?;

    for record in ranges_before.iter().chain(ranges_after.iter()) {
        if FeeTier::try_from(record.fee).is_err() {
            tracing::warn!(fee = record.fee, "Ignoring vault range with unknown fee tier");
        }
    }

    let tier_futures = FeeTier::iter().map(|fee| {
        let ranges_before = ranges_for_fee(&ranges_before, fee);
        let ranges_after = ranges_for_fee(&ranges_after, fee);
        let token0 = &token0;
        let token1 = &token1;
        async move {
            let (before, after) = futures::try_join!(
                reconstruct_side(
                    source,
                    token0,
                    token1,
                    fee,
                    block_before,
                    &ranges_before,
                    config
                ),
                reconstruct_side(source, token0, token1, fee, block_after, &ranges_after, config),
            )?;

            let named_by_ranges = !ranges_before.is_empty() || !ranges_after.is_empty();
            if before.is_none() && after.is_none() && !named_by_ranges {
                return Ok::<Option<TierComparison>, FetchError>(None);
            }
            Ok(Some(TierComparison {
                fee,
                before: before.unwrap_or(TierOutcome::Ok(TierState::Absent)),
                after: after.unwrap_or(TierOutcome::Ok(TierState::Absent)),
            }))
        }
    });

    let tiers: Vec<TierComparison> = futures::future::try_join_all(tier_futures)
        .await?
        .into_iter()
        .flatten()
        .collect();

    tracing::info!(
        %vault,
        target_block,
        tiers = tiers.len(),
        "Reconstructed snapshot"
    );

    Ok(Snapshot {
        vault,
        token0,
        token1,
        target_block,
        tiers,
    })
}

/// Reconstructs one tier side, returning `None` when no pool is deployed.
async fn reconstruct_side<S: PoolDataSource + ?Sized>(
    source: &S,
    token0: &Token,
    token1: &Token,
    fee: FeeTier,
    block: BlockId,
    ranges: &[PositionRange],
    config: &ReconstructConfig,
) -> Result<Option<TierOutcome>, FetchError> {
    let Some(slot) = source
        .slot(token0.address, token1.address, fee, block)
        .await?
    else {
        tracing::debug!(%fee, block, "No pool deployed");
        return Ok(None);
    };

    let mut records: Vec<TickRecord> = Vec::new();
    let mut skip = 0;
    loop {
        let page = source
            .tick_page(
                token0.address,
                token1.address,
                fee,
                block,
                skip,
                config.tick_page_size,
            )
            .await?;
        let page_len = page.len();
        records.extend(page);
        if page_len < config.tick_page_size {
            break;
        }
        skip += page_len;
    }
    tracing::debug!(%fee, block, ticks = records.len(), "Fetched tick stream");

    let outcome = match derive_reconstruction(token0, token1, fee, slot, records, ranges, config) {
        Ok(reconstruction) => TierOutcome::Ok(TierState::Present(Box::new(reconstruction))),
        Err(e) => {
            tracing::error!(%fee, block, error = %e, "Tier reconstruction failed");
            TierOutcome::Failed(e.to_string())
        }
    };
    Ok(Some(outcome))
}

/// Derives validated state, histogram, and positions from fetched raw data.
fn derive_reconstruction(
    token0: &Token,
    token1: &Token,
    fee: FeeTier,
    slot: SlotReading,
    records: Vec<TickRecord>,
    ranges: &[PositionRange],
    config: &ReconstructConfig,
) -> Result<PoolReconstruction, PoolModelError> {
    let entries = records
        .into_iter()
        .map(|r| TickEntry::new(r.tick, r.liquidity_net, r.liquidity_gross))
        .collect();
    let ticks = TickSet::from_records(entries)?;
    let pool = PoolState::new(
        token0.clone(),
        token1.clone(),
        fee,
        slot.sqrt_price_x96,
        slot.tick,
        slot.liquidity,
        ticks,
    )?;
    let histogram = build_histogram(&pool, config.window_size)?;
    let positions = reconstruct_positions(&pool, ranges)?;
    Ok(PoolReconstruction {
        pool,
        histogram,
        positions,
    })
}

fn ranges_for_fee(records: &[RangeRecord], fee: FeeTier) -> Vec<PositionRange> {
    records
        .iter()
        .filter(|r| r.fee == fee.fee())
        .map(|r| PositionRange {
            tick_lower: r.tick_lower,
            tick_upper: r.tick_upper,
            liquidity: r.liquidity,
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

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

//! Tick collections and the UniswapV3 fixed-point math libraries.

pub mod full_math;
pub mod liquidity_math;
pub mod sqrt_price_math;
pub mod tick;
pub mod tick_math;

use serde::{Deserialize, Serialize};

use crate::{error::PoolModelError, tick_map::tick::TickEntry};

/// An immutable, ordered set of initialized ticks.
///
/// Entries are strictly ascending by tick index, unique, and never carry a zero
/// net liquidity (such ticks contribute nothing when crossed and are dropped at
/// construction).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickSet {
    entries: Vec<TickEntry>,
}

impl TickSet {
    /// Builds a [`TickSet`] from raw tick records.
    ///
    /// Records are sorted ascending; exact duplicates collapse silently while
    /// duplicates with differing liquidity values are rejected. Records with a
    /// zero `liquidity_net` are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a tick is outside `[MIN_TICK, MAX_TICK]` or appears
    /// twice with contradictory liquidity values.
    pub fn from_records(mut records: Vec<TickEntry>) -> Result<Self, PoolModelError> {
        for record in &records {
            if !(TickEntry::MIN_TICK..=TickEntry::MAX_TICK).contains(&record.tick) {
                return Err(PoolModelError::OutOfRangeTick {
                    tick: record.tick,
                    min: TickEntry::MIN_TICK,
                    max: TickEntry::MAX_TICK,
                    spacing: 1,
                });
            }
        }

        records.sort_by_key(|r| r.tick);

        let mut entries: Vec<TickEntry> = Vec::with_capacity(records.len());
        for record in records {
            if let Some(last) = entries.last() {
                if last.tick == record.tick {
                    if *last != record {
                        return Err(PoolModelError::DuplicateTick { tick: record.tick });
                    }
                    continue;
                }
            }
            entries.push(record);
        }
        entries.retain(|e| e.liquidity_net != 0);

        Ok(Self { entries })
    }

    /// Returns the entry at the exact tick index, if initialized.
    #[must_use]
    pub fn get(&self, tick: i32) -> Option<&TickEntry> {
        self.entries
            .binary_search_by_key(&tick, |e| e.tick)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Sums `liquidity_net` over all entries at or below the given tick.
    #[must_use]
    pub fn net_liquidity_at_or_below(&self, tick: i32) -> i128 {
        let end = self.entries.partition_point(|e| e.tick <= tick);
        self.entries[..end]
            .iter()
            .map(|e| e.liquidity_net)
            .sum()
    }

    /// Returns an iterator over the entries in ascending tick order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &TickEntry> {
        self.entries.iter()
    }

    /// Returns the number of initialized ticks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set holds no initialized ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Tests
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn entry(tick: i32, net: i128) -> TickEntry {
        TickEntry::new(tick, net, net.unsigned_abs())
    }

    #[rstest]
    fn test_from_records_sorts_ascending() {
        let set =
            TickSet::from_records(vec![entry(60, -150), entry(-60, 100), entry(0, 50)]).unwrap();
        let ticks: Vec<i32> = set.iter().map(|e| e.tick).collect();
        assert_eq!(ticks, vec![-60, 0, 60]);
    }

    #[rstest]
    fn test_identical_duplicates_collapse() {
        let set = TickSet::from_records(vec![entry(0, 50), entry(0, 50)]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_conflicting_duplicates_rejected() {
        let result = TickSet::from_records(vec![entry(0, 50), entry(0, 51)]);
        assert_eq!(result, Err(PoolModelError::DuplicateTick { tick: 0 }));
    }

    #[rstest]
    fn test_zero_net_entries_dropped() {
        let set = TickSet::from_records(vec![entry(0, 0), entry(60, 10)]).unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.get(0).is_none());
        assert!(set.get(60).is_some());
    }

    #[rstest]
    #[case(887_273)]
    #[case(-887_273)]
    fn test_out_of_range_tick_rejected(#[case] tick: i32) {
        let result = TickSet::from_records(vec![entry(tick, 1)]);
        assert!(matches!(
            result,
            Err(PoolModelError::OutOfRangeTick { tick: t, .. }) if t == tick
        ));
        assert_eq!(
            result.unwrap_err().to_string(),
            format!("tick {tick} is not a usable tick: must be a multiple of 1 in [-887272, 887272]")
        );
    }

    #[rstest]
    fn test_net_liquidity_at_or_below() {
        let set =
            TickSet::from_records(vec![entry(-60, 100), entry(0, 50), entry(60, -150)]).unwrap();
        assert_eq!(set.net_liquidity_at_or_below(-61), 0);
        assert_eq!(set.net_liquidity_at_or_below(-60), 100);
        assert_eq!(set.net_liquidity_at_or_below(0), 150);
        assert_eq!(set.net_liquidity_at_or_below(59), 150);
        assert_eq!(set.net_liquidity_at_or_below(60), 0);
    }

    #[rstest]
    fn test_get_uses_exact_tick() {
        let set = TickSet::from_records(vec![entry(-60, 100)]).unwrap();
        assert_eq!(set.get(-60).map(|e| e.liquidity_net), Some(100));
        assert!(set.get(-59).is_none());
    }
}

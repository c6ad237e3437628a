use std::collections::HashMap;

use itertools::Itertools;
use unordered_pair::UnorderedPair;

use crate::bridge::{span, Bridge, BridgeCount, Orientation};
use crate::location::Location;

/// The bridges currently laid on a board, one record per pair of islands.
///
/// The ledger only guards its own shape: endpoints are distinct and aligned, and a pair never holds more than two bridges.
/// Everything else (obstruction, crossing, island capacity) is the job of the [`legality`](crate::legality) gate,
/// which every caller is expected to consult before [`add`](Self::add).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BridgeLedger {
    bridges: HashMap<UnorderedPair<Location>, BridgeCount>,
}

impl BridgeLedger {
    /// An empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no bridges are laid.
    pub fn is_empty(&self) -> bool {
        self.bridges.is_empty()
    }

    /// The number of island pairs joined by at least one bridge.
    pub fn len(&self) -> usize {
        self.bridges.len()
    }

    /// The bridges between `a` and `b`, if any.
    pub fn get(&self, a: Location, b: Location) -> Option<BridgeCount> {
        self.bridges.get(&span(a, b)).copied()
    }

    /// The number of bridges between `a` and `b`, `0` if there are none.
    pub fn count_between(&self, a: Location, b: Location) -> usize {
        self.get(a, b).map_or(0, |count| count.get())
    }

    /// The total number of bridges touching `location`.
    pub fn degree(&self, location: Location) -> usize {
        self.bridges_at(location).map(|bridge| bridge.count.get()).sum()
    }

    /// Lay one more bridge between `a` and `b`.
    ///
    /// Returns `false` and leaves the ledger untouched if the endpoints are not distinct and aligned, or the pair already holds two bridges.
    pub fn add(&mut self, a: Location, b: Location) -> bool {
        if Orientation::of(a, b).is_none() {
            return false;
        }

        let key = span(a, b);
        match self.bridges.get(&key).copied() {
            None => {
                self.bridges.insert(key, BridgeCount::Single);
                true
            }
            Some(count) => match count.increment() {
                Some(next) => {
                    self.bridges.insert(key, next);
                    true
                }
                None => false,
            },
        }
    }

    /// Take away one bridge between `a` and `b`, deleting the record once none are left.
    ///
    /// Returns `false` if there was no bridge to remove.
    pub fn remove(&mut self, a: Location, b: Location) -> bool {
        let key = span(a, b);
        let Some(count) = self.bridges.get(&key).copied() else {
            return false;
        };

        match count.decrement() {
            Some(next) => self.bridges.insert(key, next),
            None => self.bridges.remove(&key),
        };

        true
    }

    /// Remove every bridge.
    pub fn clear(&mut self) {
        self.bridges.clear();
    }

    /// Every bridge, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = Bridge> + '_ {
        self.bridges.iter().map(|(ends, count)| Bridge { ends: *ends, count: *count })
    }

    /// Every bridge, ordered by their endpoints.
    pub fn sorted(&self) -> Vec<Bridge> {
        self.iter()
            .sorted_by_key(|bridge| (bridge.start(), bridge.end()))
            .collect_vec()
    }

    /// Every bridge touching `location`.
    pub fn bridges_at(&self, location: Location) -> impl Iterator<Item = Bridge> + '_ {
        self.iter().filter(move |bridge| bridge.touches(location))
    }
}

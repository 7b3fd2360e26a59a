use super::transactions::ItemId;
use crate::error::{AprioriError, Result};
use std::collections::HashMap;

/// Flat itemset storage: one item buffer, `(start, len)` offsets and a
/// support count per itemset.
#[derive(Debug, Clone, Default)]
pub struct ItemsetStorage {
    items: Vec<ItemId>,
    offsets: Vec<(usize, usize)>,
    supports: Vec<usize>,
}

/// Frequent itemsets of a single size together with their support counts.
#[derive(Debug, Clone)]
pub struct SupportTable {
    storage: ItemsetStorage,
    index: HashMap<Vec<ItemId>, usize>,
    level: usize,
}

/// Every non-empty support table of a run, indexed by level.
#[derive(Debug, Clone)]
pub struct FrequentItemsets {
    levels: Vec<SupportTable>,
    total_transactions: usize,
}

impl ItemsetStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(estimated_items: usize, estimated_itemsets: usize) -> Self {
        Self {
            items: Vec::with_capacity(estimated_items),
            offsets: Vec::with_capacity(estimated_itemsets),
            supports: Vec::with_capacity(estimated_itemsets),
        }
    }

    pub fn add_itemset(&mut self, mut items: Vec<ItemId>, support: usize) -> usize {
        items.sort_unstable();
        items.dedup();

        let start = self.items.len();
        self.items.extend_from_slice(&items);
        self.offsets.push((start, items.len()));
        self.supports.push(support);

        self.offsets.len() - 1
    }

    pub fn get_itemset(&self, idx: usize) -> &[ItemId] {
        let (start, len) = self.offsets[idx];
        &self.items[start..start + len]
    }

    pub fn get_support(&self, idx: usize) -> usize {
        self.supports[idx]
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl SupportTable {
    pub fn new(level: usize) -> Self {
        Self {
            storage: ItemsetStorage::new(),
            index: HashMap::new(),
            level,
        }
    }

    pub fn with_capacity(level: usize, estimated_itemsets: usize) -> Self {
        Self {
            storage: ItemsetStorage::with_capacity(estimated_itemsets * level, estimated_itemsets),
            index: HashMap::with_capacity(estimated_itemsets),
            level,
        }
    }

    /// Records `itemset` with its support count. Each itemset is written
    /// once and must have exactly `level` distinct items.
    pub fn insert(&mut self, mut itemset: Vec<ItemId>, support: usize) -> Result<usize> {
        itemset.sort_unstable();
        itemset.dedup();

        if itemset.len() != self.level {
            return Err(AprioriError::InvalidInput(format!(
                "itemset {:?} has {} items, table is level {}",
                itemset,
                itemset.len(),
                self.level
            )));
        }
        if self.index.contains_key(&itemset) {
            return Err(AprioriError::InvalidInput(format!(
                "itemset {:?} already recorded at level {}",
                itemset, self.level
            )));
        }

        let idx = self.storage.add_itemset(itemset.clone(), support);
        self.index.insert(itemset, idx);
        Ok(idx)
    }

    /// Support count of `itemset`, which must be sorted.
    pub fn support(&self, itemset: &[ItemId]) -> Option<usize> {
        self.index
            .get(itemset)
            .map(|&idx| self.storage.get_support(idx))
    }

    pub fn contains(&self, itemset: &[ItemId]) -> bool {
        self.index.contains_key(itemset)
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn iter_itemsets(&self) -> impl Iterator<Item = &[ItemId]> {
        (0..self.storage.len()).map(move |idx| self.storage.get_itemset(idx))
    }

    /// `(itemset, support)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&[ItemId], usize)> {
        (0..self.storage.len())
            .map(move |idx| (self.storage.get_itemset(idx), self.storage.get_support(idx)))
    }

    /// Row-major `len() x level()` item buffer plus the matching supports.
    pub fn flatten(&self) -> (Vec<ItemId>, Vec<usize>) {
        let mut data = Vec::with_capacity(self.len() * self.level);
        let mut supports = Vec::with_capacity(self.len());
        for (itemset, support) in self.iter() {
            data.extend_from_slice(itemset);
            supports.push(support);
        }
        (data, supports)
    }
}

impl FrequentItemsets {
    pub(crate) fn new(total_transactions: usize) -> Self {
        Self {
            levels: Vec::new(),
            total_transactions,
        }
    }

    pub(crate) fn push_level(&mut self, table: SupportTable) {
        debug_assert_eq!(table.level(), self.levels.len() + 1);
        debug_assert!(!table.is_empty());
        self.levels.push(table);
    }

    /// Tables for levels `1..=max_level()`, in order.
    pub fn levels(&self) -> &[SupportTable] {
        &self.levels
    }

    pub fn level(&self, level: usize) -> Option<&SupportTable> {
        level.checked_sub(1).and_then(|idx| self.levels.get(idx))
    }

    /// Support count of a sorted itemset, looked up in the table for its size.
    pub fn support(&self, itemset: &[ItemId]) -> Option<usize> {
        self.level(itemset.len())?.support(itemset)
    }

    pub fn max_level(&self) -> usize {
        self.levels.len()
    }

    pub fn total_transactions(&self) -> usize {
        self.total_transactions
    }

    pub fn support_fraction(&self, count: usize) -> f64 {
        count as f64 / self.total_transactions as f64
    }

    /// Total number of frequent itemsets over all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(SupportTable::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// All `(itemset, support)` pairs, level by level.
    pub fn iter(&self) -> impl Iterator<Item = (&[ItemId], usize)> {
        self.levels.iter().flat_map(|table| table.iter())
    }
}

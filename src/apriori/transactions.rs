use crate::error::{AprioriError, Result};
use ndarray::ArrayView2;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::hash::Hash;

/// Dense item identifier. Id order is the canonical item order.
pub type ItemId = usize;

/// Normalized transactions: every transaction is sorted and free of
/// duplicates, and there is at least one of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSet {
    transactions: Vec<Vec<ItemId>>,
}

/// Maps arbitrary items to dense ids, assigned in sorted item order.
#[derive(Debug, Clone)]
pub struct Vocabulary<T> {
    items: Vec<T>,
    ids: HashMap<T, ItemId>,
}

impl TransactionSet {
    /// Builds a transaction set, collapsing repeated items inside a
    /// transaction. Empty transactions are kept; they never match an itemset.
    pub fn new(transactions: Vec<Vec<ItemId>>) -> Result<Self> {
        if transactions.is_empty() {
            return Err(AprioriError::InvalidInput(
                "transaction list is empty".to_string(),
            ));
        }

        let transactions = transactions
            .into_iter()
            .map(|mut tx| {
                tx.sort_unstable();
                tx.dedup();
                tx
            })
            .collect();

        Ok(Self { transactions })
    }

    /// Reads a one-hot matrix: one row per transaction, one column per item.
    /// Cells must be `0` (absent) or `1` (present).
    pub fn from_matrix(matrix: ArrayView2<i32>) -> Result<Self> {
        let (num_transactions, num_items) = matrix.dim();
        let mut transactions = Vec::with_capacity(num_transactions);

        for tx_idx in 0..num_transactions {
            let mut tx = Vec::new();
            for item in 0..num_items {
                match matrix[[tx_idx, item]] {
                    0 => {}
                    1 => tx.push(item),
                    other => {
                        return Err(AprioriError::InvalidInput(format!(
                            "row {} is not a set: column {} holds {}",
                            tx_idx, item, other
                        )))
                    }
                }
            }
            transactions.push(tx);
        }

        Self::new(transactions)
    }

    /// Interns arbitrary items and returns the transactions together with
    /// the vocabulary needed to decode mined itemsets.
    pub fn from_item_sets<T, I, S>(sets: I) -> Result<(Self, Vocabulary<T>)>
    where
        T: Ord + Hash + Clone,
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = T>,
    {
        let raw: Vec<Vec<T>> = sets
            .into_iter()
            .map(|set| set.into_iter().collect())
            .collect();

        let vocabulary = Vocabulary::from_items(raw.iter().flatten().cloned());
        let encoded = raw
            .iter()
            .map(|tx| tx.iter().filter_map(|item| vocabulary.id(item)).collect())
            .collect();

        Ok((Self::new(encoded)?, vocabulary))
    }

    /// Groups `(transaction id, item)` rows into transactions, ordered by
    /// ascending transaction id.
    pub fn from_records<K, T, I>(records: I) -> Result<(Self, Vocabulary<T>)>
    where
        K: Ord,
        T: Ord + Hash + Clone,
        I: IntoIterator<Item = (K, T)>,
    {
        let mut grouped: BTreeMap<K, Vec<T>> = BTreeMap::new();
        for (tid, item) in records {
            grouped.entry(tid).or_default().push(item);
        }

        Self::from_item_sets(grouped.into_values())
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[ItemId]> {
        self.transactions.iter().map(Vec::as_slice)
    }

    /// Size of the largest transaction; bounds the number of mining levels.
    pub fn max_transaction_len(&self) -> usize {
        self.transactions.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Whether the sorted `transaction` contains every item of the sorted
/// `itemset`.
pub fn contains_all(transaction: &[ItemId], itemset: &[ItemId]) -> bool {
    if itemset.len() > transaction.len() {
        return false;
    }

    let mut tx = transaction.iter();
    itemset
        .iter()
        .all(|needle| tx.by_ref().any(|item| item == needle))
}

impl<T: Ord + Hash + Clone> Vocabulary<T> {
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let items: Vec<T> = items.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        let ids = items
            .iter()
            .enumerate()
            .map(|(id, item)| (item.clone(), id))
            .collect();

        Self { items, ids }
    }

    pub fn id(&self, item: &T) -> Option<ItemId> {
        self.ids.get(item).copied()
    }

    pub fn item(&self, id: ItemId) -> Option<&T> {
        self.items.get(id)
    }

    /// Translates an itemset back to the original items.
    pub fn decode(&self, itemset: &[ItemId]) -> Vec<T> {
        itemset
            .iter()
            .filter_map(|&id| self.item(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

use super::candidates::generate_candidates;
use super::params::{check_fraction, MiningParams};
use super::storage::{FrequentItemsets, SupportTable};
use super::transactions::{contains_all, ItemId, TransactionSet};
use crate::error::{AprioriError, Result};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Level-wise frequent itemset mining. Stops at the first level without a
/// frequent itemset; only non-empty levels are returned.
pub fn mine(transactions: &TransactionSet, params: &MiningParams) -> Result<FrequentItemsets> {
    check_fraction("min_support", params.min_support)?;

    let num_transactions = transactions.len();
    if num_transactions == 0 {
        return Err(AprioriError::InvalidInput(
            "cannot compute support over zero transactions".to_string(),
        ));
    }

    let mut result = FrequentItemsets::new(num_transactions);
    let mut current = frequent_items(transactions, params.min_support)?;
    debug!(level = 1, frequent = current.len(), "counted single items");

    while !current.is_empty() {
        let level = current.level() + 1;
        let candidates = generate_candidates(&current, level, params.join);
        result.push_level(current);

        if candidates.is_empty() {
            break;
        }

        let num_candidates = candidates.len();
        let counts = count_candidates(&candidates, transactions);
        current = prune(level, candidates, counts, num_transactions, params.min_support)?;
        debug!(
            level,
            candidates = num_candidates,
            frequent = current.len(),
            "pruned level"
        );
    }

    info!(
        transactions = num_transactions,
        levels = result.max_level(),
        itemsets = result.len(),
        "frequent itemset mining finished"
    );

    Ok(result)
}

fn meets_threshold(count: usize, num_transactions: usize, min_support: f64) -> bool {
    count as f64 / num_transactions as f64 >= min_support
}

fn frequent_items(transactions: &TransactionSet, min_support: f64) -> Result<SupportTable> {
    let mut item_counts: BTreeMap<ItemId, usize> = BTreeMap::new();
    for tx in transactions.iter() {
        for &item in tx {
            *item_counts.entry(item).or_insert(0) += 1;
        }
    }

    let mut table = SupportTable::with_capacity(1, item_counts.len());
    for (item, count) in item_counts {
        if meets_threshold(count, transactions.len(), min_support) {
            table.insert(vec![item], count)?;
        }
    }
    Ok(table)
}

fn count_candidates(candidates: &[Vec<ItemId>], transactions: &TransactionSet) -> Vec<usize> {
    let mut counts = vec![0usize; candidates.len()];

    for tx in transactions.iter() {
        for (count, candidate) in counts.iter_mut().zip(candidates) {
            if contains_all(tx, candidate) {
                *count += 1;
            }
        }
    }

    counts
}

fn prune(
    level: usize,
    candidates: Vec<Vec<ItemId>>,
    counts: Vec<usize>,
    num_transactions: usize,
    min_support: f64,
) -> Result<SupportTable> {
    let mut table = SupportTable::with_capacity(level, candidates.len());

    for (candidate, count) in candidates.into_iter().zip(counts) {
        if count > 0 && meets_threshold(count, num_transactions, min_support) {
            table.insert(candidate, count)?;
        }
    }

    Ok(table)
}

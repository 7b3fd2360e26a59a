pub mod candidates;
pub mod mining;
pub mod params;
pub mod rules;
pub mod storage;
pub mod transactions;


pub use candidates::{for_each_combination, generate_candidates, JoinStrategy};
pub use mining::mine;
pub use params::MiningParams;
pub use rules::{generate_rules, Rule};
pub use storage::{FrequentItemsets, ItemsetStorage, SupportTable};
pub use transactions::{contains_all, ItemId, TransactionSet, Vocabulary};

use crate::error::Result;
use std::collections::BTreeMap;

/// Frequent itemsets and the rules derived from them.
#[derive(Debug, Clone)]
pub struct AprioriResult {
    pub itemsets: FrequentItemsets,
    pub rules: BTreeMap<usize, Vec<Rule>>,
}

impl AprioriResult {
    pub fn total_transactions(&self) -> usize {
        self.itemsets.total_transactions()
    }

    pub fn iter_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values().flatten()
    }
}

/// Runs both phases with validated parameters.
pub fn apriori(transactions: &TransactionSet, params: MiningParams) -> Result<AprioriResult> {
    params.validate()?;

    let itemsets = mine(transactions, &params)?;
    let rules = generate_rules(&itemsets, params.min_confidence)?;

    Ok(AprioriResult { itemsets, rules })
}

use super::candidates::for_each_combination;
use super::params::check_fraction;
use super::storage::FrequentItemsets;
use super::transactions::ItemId;
use crate::error::{AprioriError, Result};
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use tracing::{debug, info};

/// An association rule `antecedent -> consequent`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: Vec<ItemId>,
    pub consequent: Vec<ItemId>,
    /// Support count of `antecedent ∪ consequent`.
    pub support: usize,
    pub confidence: f64,
    pub lift: f64,
}

impl Rule {
    pub fn support_fraction(&self, total_transactions: usize) -> f64 {
        self.support as f64 / total_transactions as f64
    }

    /// The full itemset the rule was split from.
    pub fn itemset(&self) -> Vec<ItemId> {
        let mut items = self.antecedent.clone();
        items.extend_from_slice(&self.consequent);
        items.sort_unstable();
        items
    }
}

/// Derives rules from every frequent level of size two or more.
///
/// Each itemset is split into every non-empty proper antecedent, by
/// antecedent size and then lexicographically, and the split is kept when
/// its confidence reaches `min_confidence`. The result has one entry per
/// frequent level `>= 2`, possibly empty.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    min_confidence: f64,
) -> Result<BTreeMap<usize, Vec<Rule>>> {
    check_fraction("min_confidence", min_confidence)?;

    let total = itemsets.total_transactions();
    if total == 0 {
        return Err(AprioriError::InvalidInput(
            "cannot compute lift over zero transactions".to_string(),
        ));
    }

    let mut rules_per_level = BTreeMap::new();

    for table in itemsets.levels().iter().skip(1) {
        let mut rules = Vec::new();

        for (itemset, support) in table.iter() {
            for size in 1..itemset.len() {
                let split = for_each_combination(itemset, size, &mut |antecedent: &[ItemId]| {
                    match split_rule(itemsets, itemset, support, antecedent, total) {
                        Ok(rule) => {
                            if rule.confidence >= min_confidence {
                                rules.push(rule);
                            }
                            ControlFlow::Continue(())
                        }
                        Err(e) => ControlFlow::Break(e),
                    }
                });
                if let ControlFlow::Break(e) = split {
                    return Err(e);
                }
            }
        }

        debug!(level = table.level(), rules = rules.len(), "generated rules");
        rules_per_level.insert(table.level(), rules);
    }

    info!(
        rules = rules_per_level.values().map(Vec::len).sum::<usize>(),
        min_confidence,
        "rule generation finished"
    );

    Ok(rules_per_level)
}

fn split_rule(
    itemsets: &FrequentItemsets,
    itemset: &[ItemId],
    support: usize,
    antecedent: &[ItemId],
    total: usize,
) -> Result<Rule> {
    let consequent: Vec<ItemId> = itemset
        .iter()
        .copied()
        .filter(|item| antecedent.binary_search(item).is_err())
        .collect();

    let antecedent_support = lookup(itemsets, antecedent)?;
    let consequent_support = lookup(itemsets, &consequent)?;

    let confidence = support as f64 / antecedent_support as f64;
    let lift = confidence / (consequent_support as f64 / total as f64);

    Ok(Rule {
        antecedent: antecedent.to_vec(),
        consequent,
        support,
        confidence,
        lift,
    })
}

fn lookup(itemsets: &FrequentItemsets, subset: &[ItemId]) -> Result<usize> {
    itemsets
        .support(subset)
        .ok_or_else(|| AprioriError::LookupInconsistency {
            level: subset.len(),
            itemset: subset.to_vec(),
        })
}

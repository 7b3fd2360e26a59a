pub mod apriori;
pub mod error;

pub use apriori::{
    apriori, generate_rules, mine, AprioriResult, FrequentItemsets, ItemId, JoinStrategy,
    MiningParams, Rule, SupportTable, TransactionSet, Vocabulary,
};
pub use error::{AprioriError, Result};

#[cfg(feature = "python")]
mod python;

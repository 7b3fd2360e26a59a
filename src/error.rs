use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AprioriError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter: {name} = {value} (expected a fraction in (0, 1])")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A subset of a frequent itemset has no recorded support at its level.
    #[error("Support lookup failed at level {level} for itemset {itemset:?}")]
    LookupInconsistency { level: usize, itemset: Vec<usize> },

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AprioriError>;

impl From<toml::de::Error> for AprioriError {
    fn from(e: toml::de::Error) -> Self {
        AprioriError::Config(e.to_string())
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("No active rules: enable a rule with a non-empty source in the selected dictionaries")]
    NoActiveRules,

    #[error("Invalid dictionary name: {0:?}")]
    InvalidDictionaryName(String),

    #[error("Dictionary '{0}' is protected and cannot be deleted")]
    ProtectedDictionary(String),

    #[error("Dictionary not found: {0}")]
    DictionaryNotFound(String),

    #[error("Rule {index} not found in dictionary '{dictionary}'")]
    RuleNotFound { dictionary: String, index: usize },

    #[error("A replacement is already in progress")]
    Busy,

    #[error("Could not decode text: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, DictError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReactionError {
    #[error("unknown reaction rule type {0:?}")]
    UnknownRuleType(String),

    #[error("unknown reaction type {0:?}")]
    UnknownReactionType(String),

    #[error("{kind} type {name:?} is already registered")]
    DuplicateType { kind: &'static str, name: String },

    #[error("invalid parameter {key:?}: {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("reaction registry used before install_reactions_and_reaction_rules")]
    RegistryNotInstalled,

    #[error("unsupported rule table format {0:?} (expected .json or .ron)")]
    UnsupportedFormat(String),

    #[error("rule {rule} failed to evaluate: {reason}")]
    Evaluation { rule: &'static str, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RON parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),

    #[error("RON encode error: {0}")]
    RonEncode(#[from] ron::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RuleResult<T> = Result<T, ReactionError>;

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a catalog. Fatal at startup only.
#[derive(Debug, Error)]
pub enum CatalogError {
    // Source errors
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // Reward errors
    #[error("reward id {0} appears more than once")]
    DuplicateReward(u32),
    #[error("reward {0} must cost at least one point")]
    FreeReward(u32),

    // Challenge errors
    #[error("challenge id {0} appears more than once")]
    DuplicateChallenge(u32),
    #[error("challenge {0} must grant at least one point")]
    ZeroChallengeReward(u32),
    #[error("active challenge {0} has a zero target")]
    ZeroTarget(u32),

    // Ledger errors
    #[error("transaction id {0} appears more than once")]
    DuplicateTransaction(u32),
    #[error("transaction {id} is {direction} but carries {points} points")]
    SignMismatch {
        id: u32,
        direction: &'static str,
        points: i64,
    },

    // Account errors
    #[error("unknown tier \"{0}\"")]
    UnknownTier(String),
    #[error("next tier after {tier} should be {expected}, found {found}")]
    NextTierMismatch {
        tier: String,
        expected: String,
        found: String,
    },
    #[error("{points} points puts the account in {expected}, not {found}")]
    TierMismatch {
        points: u64,
        expected: String,
        found: String,
    },
    #[error("points to next tier should be {expected}, found {found}")]
    PointsToNextTierMismatch { expected: u64, found: u64 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tier span must be at least one point")]
    ZeroTierSpan,
}

/// A selector string from the command line that names nothing we know.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("unknown reward category \"{0}\"")]
    RewardCategory(String),
    #[error("unknown transaction filter \"{0}\"")]
    TransactionFilter(String),
    #[error("unknown sort order \"{0}\" (expected newest or oldest)")]
    SortOrder(String),
}

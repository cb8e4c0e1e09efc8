//! Error taxonomy for loading question banks.
//!
//! Session operations themselves never fail; the only fallible step is getting
//! questions, and the session folds these errors into its `Errored` phase.

use std::path::PathBuf;

use crate::domain::Bank;

#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// The provider has nothing to serve for this bank.
    #[error("cannot load questions for bank '{bank}'")]
    QuestionsUnavailable { bank: Bank },

    #[error("cannot read bank file {}: {source}", .path.display())]
    BankFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bank file {} is not a question list: {source}", .path.display())]
    BankFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, QuizError>;

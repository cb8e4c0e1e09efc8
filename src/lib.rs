//! Phyto Quiz · multiple-choice exam trainer
//!
//! - Question banks per licence category (built-in seeds or JSON files)
//! - `QuizSession`: pool drawing, answer recording, navigation, scoring
//! - Pass/fail verdict and a review of missed questions
//!
//! Important env variables:
//!   QUIZ_CONFIG_PATH : path to TOML config (pool size, pass percent, bank files)
//!   LOG_LEVEL        : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT       : "pretty" (default) or "json"

pub mod config;
pub mod domain;
pub mod error;
pub mod provider;
pub mod report;
pub mod seeds;
pub mod session;
pub mod telemetry;
pub mod util;

pub use config::{QuizConfig, SessionSettings};
pub use domain::{Bank, Choice, ChoiceKey, Mode, Question, SessionConfig};
pub use error::{QuizError, Result};
pub use provider::{QuestionProvider, StaticQuestionProvider};
pub use report::SessionReport;
pub use session::{format_answer_label, AnswerView, QuizSession, Review, SessionPhase};

//! Question providers: where a session gets the full bank from.
//!
//! `StaticQuestionProvider` owns every bank in memory. Banks come from the JSON
//! files listed in the config, or from the built-in seeds when no file is
//! configured. A configured file that cannot be used leaves its bank missing, so
//! sessions on that bank end up `Errored` instead of silently quizzing on seeds.

use std::collections::HashMap;
use std::future::Future;
use std::path::Path;

use tracing::{error, info, instrument, warn};

use crate::config::QuizConfig;
use crate::domain::{Bank, Question};
use crate::error::{QuizError, Result};
use crate::seeds::seed_questions;

/// Source of full question banks. A fetch resolves once; failure is reported as
/// `QuizError::QuestionsUnavailable` or a loading error, never a panic.
pub trait QuestionProvider {
    fn fetch(&self, bank: Bank) -> impl Future<Output = Result<Vec<Question>>> + Send;
}

#[derive(Clone, Debug, Default)]
pub struct StaticQuestionProvider {
    banks: HashMap<Bank, Vec<Question>>,
}

impl StaticQuestionProvider {
    pub fn with_banks(banks: impl IntoIterator<Item = (Bank, Vec<Question>)>) -> Self {
        Self { banks: banks.into_iter().collect() }
    }

    /// Only the built-in seeds.
    pub fn seeded() -> Self {
        Self::with_banks(Bank::ALL.into_iter().map(|b| (b, seed_questions(b))))
    }

    /// Build every bank from config: file when configured, seeds otherwise.
    #[instrument(level = "info", skip_all)]
    pub async fn load(cfg: &QuizConfig) -> Self {
        let mut banks = HashMap::new();
        for bank in Bank::ALL {
            match cfg.bank_path(bank) {
                Some(path) => match load_bank_file(path).await {
                    Ok(qs) => {
                        banks.insert(bank, qs);
                    }
                    Err(e) => {
                        error!(target: "phyto_quiz", %bank, error = %e, "Bank file unusable; bank will be unavailable");
                    }
                },
                None => {
                    banks.insert(bank, seed_questions(bank));
                }
            }
        }

        for bank in Bank::ALL {
            let source = if cfg.bank_path(bank).is_some() { "file" } else { "seed" };
            let count = banks.get(&bank).map_or(0, Vec::len);
            info!(target: "phyto_quiz", %bank, source, questions = count, "Startup bank inventory");
        }

        Self { banks }
    }

    pub fn bank_len(&self, bank: Bank) -> Option<usize> {
        self.banks.get(&bank).map(Vec::len)
    }
}

impl QuestionProvider for StaticQuestionProvider {
    fn fetch(&self, bank: Bank) -> impl Future<Output = Result<Vec<Question>>> + Send {
        let res = self
            .banks
            .get(&bank)
            .cloned()
            .ok_or(QuizError::QuestionsUnavailable { bank });
        async move { res }
    }
}

/// Read a JSON question list. Entries that do not parse or fail validation are skipped.
#[instrument(level = "debug", skip_all, fields(path = %path.display()))]
pub async fn load_bank_file(path: &Path) -> Result<Vec<Question>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| QuizError::BankFile { path: path.to_path_buf(), source })?;
    parse_bank(path, &raw)
}

fn parse_bank(path: &Path, raw: &str) -> Result<Vec<Question>> {
    let items: Vec<serde_json::Value> = serde_json::from_str(raw)
        .map_err(|source| QuizError::BankFormat { path: path.to_path_buf(), source })?;
    let total = items.len();
    let kept: Vec<Question> = items
        .into_iter()
        .enumerate()
        .filter_map(|(pos, item)| {
            let q = match serde_json::from_value::<Question>(item) {
                Ok(q) => q,
                Err(e) => {
                    error!(target: "phyto_quiz", pos, error = %e, "Skipping bank item");
                    return None;
                }
            };
            match q.validate() {
                Ok(()) => Some(q),
                Err(reason) => {
                    error!(target: "phyto_quiz", id = q.id, %reason, "Skipping bank item");
                    None
                }
            }
        })
        .collect();
    if kept.len() < total {
        warn!(target: "phyto_quiz", path = %path.display(), kept = kept.len(), total, "Some bank items were skipped");
    }
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const BANK: &str = r#"[
      {"id":1,"question":"One?","choices":[{"key":"a","text":"x"},{"key":"b","text":"y"}],"answer":"a"},
      {"id":2,"question":"Broken","choices":[{"key":"a","text":"x"},{"key":"b","text":"y"}],"answer":"c"},
      {"id":3,"question":"Three?","choices":[{"key":"a","text":"x"},{"key":"b","text":"y"},{"key":"c","text":"z"}],"answer":"c","explanation":"because"}
    ]"#;

    fn tmp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("phyto-quiz-{}-{name}", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).expect("write temp bank");
        path
    }

    #[test]
    fn parse_skips_invalid_items() {
        let qs = parse_bank(Path::new("bank.json"), BANK).expect("parse");
        assert_eq!(qs.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn parse_skips_items_serde_rejects() {
        let raw = r#"[
          {"id":1,"question":"One?","choices":[{"key":"a","text":"x"},{"key":"b","text":"y"}],"answer":"a"},
          {"id":2,"question":"Two?","choices":[{"key":"a","text":"x"},{"key":"d","text":"y"}],"answer":"a"},
          {"id":3,"question":"Three?","choices":[{"key":"A","text":"x"},{"key":"b","text":"y"}],"answer":"b"},
          {"id":4,"question":"Four?","choices":[{"key":"a","text":"x"},{"key":"b","text":"y"}]},
          {"id":5,"question":"Five?","choices":[{"key":"a","text":"x"},{"key":"b","text":"y"}],"answer":"b"}
        ]"#;
        let qs = parse_bank(Path::new("bank.json"), raw).expect("parse");
        assert_eq!(qs.iter().map(|q| q.id).collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn parse_rejects_non_list() {
        let err = parse_bank(Path::new("bank.json"), "{\"id\":1}").unwrap_err();
        assert!(matches!(err, QuizError::BankFormat { .. }));
    }

    #[tokio::test]
    async fn fetch_unknown_bank_is_unavailable() {
        let p = StaticQuestionProvider::with_banks([(Bank::Pp, seed_questions(Bank::Pp))]);
        assert!(p.fetch(Bank::Pp).await.is_ok());
        let err = p.fetch(Bank::Np).await.unwrap_err();
        assert!(matches!(err, QuizError::QuestionsUnavailable { bank: Bank::Np }));

        let seeded = StaticQuestionProvider::seeded();
        assert_eq!(seeded.fetch(Bank::Np).await.expect("seed bank"), seed_questions(Bank::Np));
    }

    #[tokio::test]
    async fn load_uses_files_and_seeds() {
        let good = tmp_file("np.json", BANK);
        let missing = std::env::temp_dir().join("phyto-quiz-does-not-exist.json");
        let mut cfg = QuizConfig::default();
        cfg.banks.insert("np".into(), good.clone());
        cfg.banks.insert("p3".into(), missing);

        let p = StaticQuestionProvider::load(&cfg).await;
        assert_eq!(p.bank_len(Bank::Np), Some(2));
        assert_eq!(p.bank_len(Bank::Pp), Some(seed_questions(Bank::Pp).len()));
        assert_eq!(p.bank_len(Bank::P3), None);
        assert!(p.fetch(Bank::P3).await.is_err());

        let _ = std::fs::remove_file(good);
    }
}

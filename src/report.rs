//! End-of-quiz report: verdict plus the missed questions, ready to print or log.

use std::fmt;

use serde::Serialize;

use crate::domain::{Bank, Mode};
use crate::session::{format_answer_label, QuizSession};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MissedQuestion {
  pub id: u32,
  pub question: String,
  pub selected: String,
  pub correct: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionReport {
  pub bank: Bank,
  pub mode: Mode,
  pub score: usize,
  pub pool_size: usize,
  pub threshold: usize,
  pub passed: Option<bool>,
  pub missed: Vec<MissedQuestion>,
}

impl SessionReport {
  pub fn from_session(s: &QuizSession) -> Self {
    let missed = s
      .wrong_answers()
      .into_iter()
      .map(|r| MissedQuestion {
        id: r.question.id,
        question: r.question.text.clone(),
        selected: format_answer_label(r.question, Some(r.selected)),
        correct: format_answer_label(r.question, Some(r.question.answer)),
        explanation: r.question.explanation.clone(),
      })
      .collect();
    let cfg = s.config();
    Self {
      bank: cfg.bank,
      mode: cfg.mode,
      score: s.score(),
      pool_size: s.pool().len(),
      threshold: s.threshold(),
      passed: s.passed(),
      missed,
    }
  }
}

impl fmt::Display for SessionReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{} ({:?})", self.bank.title(), self.mode)?;
    writeln!(f, "Score: {}/{} (pass mark {})", self.score, self.pool_size, self.threshold)?;
    match self.passed {
      Some(true) => writeln!(f, "PASSED")?,
      Some(false) => writeln!(f, "FAILED")?,
      None => writeln!(f, "No questions were asked.")?,
    }
    if self.missed.is_empty() {
      return Ok(());
    }
    writeln!(f)?;
    writeln!(f, "Questions to review:")?;
    for m in &self.missed {
      writeln!(f, "  #{} {}", m.id, m.question)?;
      writeln!(f, "     your answer: {}", m.selected)?;
      writeln!(f, "     correct:     {}", m.correct)?;
      if let Some(e) = &m.explanation {
        writeln!(f, "     {e}")?;
      }
    }
    Ok(())
  }
}

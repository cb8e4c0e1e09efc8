//! Domain models: banks, selection modes, questions and their choices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Answer key of a choice. Banks only ever use the first three letters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKey {
  A,
  B,
  C,
}

impl ChoiceKey {
  pub const ALL: [ChoiceKey; 3] = [ChoiceKey::A, ChoiceKey::B, ChoiceKey::C];

  pub fn as_str(self) -> &'static str {
    match self {
      ChoiceKey::A => "a",
      ChoiceKey::B => "b",
      ChoiceKey::C => "c",
    }
  }

  /// Accepts "a", "B", " c " etc. Anything else is not a key.
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "a" => Some(ChoiceKey::A),
      "b" => Some(ChoiceKey::B),
      "c" => Some(ChoiceKey::C),
      _ => None,
    }
  }
}

impl fmt::Display for ChoiceKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
  pub key: ChoiceKey,
  pub text: String,
}

/// One multiple-choice question. Field names follow the bank JSON files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
  pub id: u32,
  #[serde(rename = "question")]
  pub text: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
  pub choices: Vec<Choice>,
  pub answer: ChoiceKey,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub explanation: Option<String>,
}

impl Question {
  pub fn choice(&self, key: ChoiceKey) -> Option<&Choice> {
    self.choices.iter().find(|c| c.key == key)
  }

  pub fn is_correct(&self, key: ChoiceKey) -> bool {
    key == self.answer
  }

  /// Checks the shape a bank entry must have: 2 or 3 choices with distinct keys,
  /// and an answer that is one of them.
  pub fn validate(&self) -> Result<(), String> {
    let n = self.choices.len();
    if !(2..=3).contains(&n) {
      return Err(format!("expected 2-3 choices, found {n}"));
    }
    for (i, c) in self.choices.iter().enumerate() {
      if self.choices[..i].iter().any(|p| p.key == c.key) {
        return Err(format!("duplicate choice key '{}'", c.key));
      }
    }
    if self.choice(self.answer).is_none() {
      return Err(format!("answer '{}' matches no choice", self.answer));
    }
    Ok(())
  }
}

/// Question banks, one per licence category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
  /// P1, assistant for professional use.
  #[default]
  Pp,
  /// NP, distribution/advice of non-professional products.
  Np,
  /// P2, professional use.
  P2,
  /// P3, distribution/advice of professional products.
  P3,
}

impl Bank {
  pub const ALL: [Bank; 4] = [Bank::Np, Bank::Pp, Bank::P2, Bank::P3];

  pub fn id(self) -> &'static str {
    match self {
      Bank::Pp => "pp",
      Bank::Np => "np",
      Bank::P2 => "p2",
      Bank::P3 => "p3",
    }
  }

  pub fn from_id(s: &str) -> Option<Self> {
    Bank::ALL.into_iter().find(|b| b.id() == s.trim())
  }

  /// Unknown or missing ids fall back to the primary bank.
  pub fn parse(s: Option<&str>) -> Self {
    s.and_then(Bank::from_id).unwrap_or_default()
  }

  pub fn title(self) -> &'static str {
    match self {
      Bank::Np => "Phytolicence NP",
      Bank::Pp => "Phytolicence P1",
      Bank::P2 => "Phytolicence P2",
      Bank::P3 => "Phytolicence P3",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      Bank::Np => "Distribution/advice of products for non-professional use.",
      Bank::Pp => "Assistant for professional use.",
      Bank::P2 => "Professional use (agricultural sector, or parks, gardens and horticulture).",
      Bank::P3 => "Distribution/advice of products for professional use; written then oral evaluation.",
    }
  }
}

impl fmt::Display for Bank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

/// How the pool is drawn from a bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Shuffled subset, capped at the configured pool size.
  #[default]
  Random,
  /// The whole bank in its original order.
  All,
}

impl Mode {
  pub fn parse(s: Option<&str>) -> Self {
    match s.map(str::trim) {
      Some("all") => Mode::All,
      _ => Mode::Random,
    }
  }
}

/// Fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
  pub bank: Bank,
  pub mode: Mode,
}

impl SessionConfig {
  pub fn new(bank: Bank, mode: Mode) -> Self {
    Self { bank, mode }
  }

  /// Build from raw navigation parameters, applying the defaults for anything unrecognized.
  pub fn from_params(bank: Option<&str>, mode: Option<&str>) -> Self {
    Self { bank: Bank::parse(bank), mode: Mode::parse(mode) }
  }
}

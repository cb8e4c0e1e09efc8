//! Loading quiz configuration (pool sizing, pass rule, bank files) from TOML.
//!
//! Example:
//! ```toml
//! pool_size = 30
//! pass_percent = 70
//!
//! [banks]
//! pp = "data/questions.json"
//! np = "data/questionsNP.json"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::domain::Bank;
use crate::error::{QuizError, Result};

pub const DEFAULT_POOL_SIZE: usize = 30;
pub const DEFAULT_PASS_PERCENT: u32 = 70;

#[derive(Clone, Debug, Deserialize)]
pub struct QuizConfig {
  /// Random mode draws at most this many questions.
  #[serde(default = "default_pool_size")]
  pub pool_size: usize,
  /// Percentage of the pool (rounded up) needed to pass.
  #[serde(default = "default_pass_percent")]
  pub pass_percent: u32,
  /// JSON file per bank id. Banks not listed use the built-in seeds.
  #[serde(default)]
  pub banks: HashMap<String, PathBuf>,
}

fn default_pool_size() -> usize { DEFAULT_POOL_SIZE }
fn default_pass_percent() -> u32 { DEFAULT_PASS_PERCENT }

impl Default for QuizConfig {
  fn default() -> Self {
    Self {
      pool_size: DEFAULT_POOL_SIZE,
      pass_percent: DEFAULT_PASS_PERCENT,
      banks: HashMap::new(),
    }
  }
}

impl QuizConfig {
  pub fn from_toml(path: &Path, s: &str) -> Result<Self> {
    let mut cfg: QuizConfig = toml::from_str(s).map_err(|source| QuizError::Config { path: path.to_path_buf(), source })?;
    for id in cfg.banks.keys() {
      if Bank::from_id(id).is_none() {
        warn!(target: "phyto_quiz", bank = %id, "Ignoring unknown bank in config");
      }
    }
    // Relative bank paths are relative to the config file.
    if let Some(dir) = path.parent() {
      for p in cfg.banks.values_mut() {
        if p.is_relative() {
          *p = dir.join(&*p);
        }
      }
    }
    Ok(cfg)
  }

  /// Configured file for `bank`, if any.
  pub fn bank_path(&self, bank: Bank) -> Option<&Path> {
    self.banks.get(bank.id()).map(PathBuf::as_path)
  }

  /// The slice of settings a session needs.
  /// Out-of-range values are corrected: `pool_size` 0 becomes the default, `pass_percent` caps at 100.
  pub fn session_settings(&self) -> SessionSettings {
    let pool_size = if self.pool_size == 0 {
      warn!(target: "phyto_quiz", default = DEFAULT_POOL_SIZE, "pool_size = 0 would draw empty pools; using default");
      DEFAULT_POOL_SIZE
    } else {
      self.pool_size
    };
    if self.pass_percent > 100 {
      warn!(target: "phyto_quiz", pass_percent = self.pass_percent, "pass_percent above 100; capping");
    }
    SessionSettings { pool_size, pass_percent: self.pass_percent.min(100) }
  }
}

/// Pool sizing and pass rule applied by every session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSettings {
  pub pool_size: usize,
  pub pass_percent: u32,
}

impl Default for SessionSettings {
  fn default() -> Self {
    QuizConfig::default().session_settings()
  }
}

/// Load `QuizConfig` from QUIZ_CONFIG_PATH. Missing variable, IO or parse errors yield defaults.
pub fn load_quiz_config_from_env() -> QuizConfig {
  let Ok(path) = std::env::var("QUIZ_CONFIG_PATH") else {
    return QuizConfig::default();
  };
  let path = PathBuf::from(path);
  match std::fs::read_to_string(&path) {
    Ok(s) => match QuizConfig::from_toml(&path, &s) {
      Ok(cfg) => {
        info!(target: "phyto_quiz", path = %path.display(), banks = cfg.banks.len(), "Loaded quiz config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "phyto_quiz", error = %e, "Failed to parse TOML config; using defaults");
        QuizConfig::default()
      }
    },
    Err(e) => {
      error!(target: "phyto_quiz", path = %path.display(), error = %e, "Failed to read TOML config file; using defaults");
      QuizConfig::default()
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_gives_defaults() {
    let cfg = QuizConfig::from_toml(Path::new("quiz.toml"), "").expect("parse");
    assert_eq!(cfg.pool_size, 30);
    assert_eq!(cfg.pass_percent, 70);
    assert!(cfg.banks.is_empty());
  }

  #[test]
  fn bank_paths_resolve_against_config_dir() {
    let src = "pool_size = 10\n[banks]\nnp = \"np.json\"\np3 = \"/abs/p3.json\"\n";
    let cfg = QuizConfig::from_toml(Path::new("/etc/quiz/quiz.toml"), src).expect("parse");
    assert_eq!(cfg.pool_size, 10);
    assert_eq!(cfg.bank_path(Bank::Np), Some(Path::new("/etc/quiz/np.json")));
    assert_eq!(cfg.bank_path(Bank::P3), Some(Path::new("/abs/p3.json")));
    assert_eq!(cfg.bank_path(Bank::Pp), None);
  }

  #[test]
  fn malformed_toml_is_a_config_error() {
    let err = QuizConfig::from_toml(Path::new("bad.toml"), "pool_size = \"many\"").unwrap_err();
    assert!(matches!(err, QuizError::Config { .. }));
  }

  #[test]
  fn pass_percent_is_capped() {
    let cfg = QuizConfig { pass_percent: 250, ..QuizConfig::default() };
    assert_eq!(cfg.session_settings().pass_percent, 100);
  }

  #[test]
  fn zero_pool_size_falls_back_to_default() {
    let cfg = QuizConfig::from_toml(Path::new("quiz.toml"), "pool_size = 0").expect("parse");
    assert_eq!(cfg.session_settings().pool_size, DEFAULT_POOL_SIZE);
  }
}

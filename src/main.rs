//! Terminal front-end: runs one quiz session on stdin/stdout.
//!
//! Usage:
//!   phyto-quiz [bank=pp|np|p2|p3] [mode=random|all]
//!
//! Parameters missing from the command line are read from QUIZ_BANK / QUIZ_MODE.
//! Commands during the quiz: a/b/c answer, n next, p previous, r restart, q quit.

use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, instrument};

use phyto_quiz::config::load_quiz_config_from_env;
use phyto_quiz::{
  format_answer_label, telemetry, Bank, ChoiceKey, QuizSession, SessionConfig, SessionPhase, SessionReport,
  StaticQuestionProvider,
};

/// `key=value` argument, falling back to an env variable.
fn nav_param(args: &[String], key: &str, env: &str) -> Option<String> {
  let prefix = format!("{key}=");
  args
    .iter()
    .find_map(|a| a.strip_prefix(&prefix).map(str::to_string))
    .or_else(|| std::env::var(env).ok())
}

fn render(session: &QuizSession, out: &mut impl Write) -> io::Result<()> {
  match session.phase() {
    SessionPhase::Loading => writeln!(out, "Loading questions..."),
    SessionPhase::Errored => writeln!(out, "{} Type r to retry.", session.error_message().unwrap_or_default()),
    SessionPhase::Finished => {
      writeln!(out)?;
      write!(out, "{}", SessionReport::from_session(session))?;
      writeln!(out, "r to restart, p to go back, q to quit.")
    }
    SessionPhase::Ready | SessionPhase::InProgress => {
      let Some(q) = session.current_question() else { return Ok(()) };
      let (pos, total) = session.progress().unwrap_or((0, 0));
      writeln!(out)?;
      writeln!(out, "[{pos}/{total}] score {}  {}", session.score(), q.text)?;
      if let Some(img) = &q.image {
        writeln!(out, "  (image: {img})")?;
      }
      for c in &q.choices {
        writeln!(out, "  {}", format_answer_label(q, Some(c.key)))?;
      }
      let view = session.current_view();
      if view.show_correction {
        let verdict = if view.is_correct == Some(true) { "Correct." } else { "Wrong." };
        writeln!(out, "  > {} {verdict}", format_answer_label(q, view.selected))?;
        if view.is_correct != Some(true) {
          writeln!(out, "  Correct answer: {}", format_answer_label(q, Some(q.answer)))?;
        }
        if let Some(e) = &q.explanation {
          writeln!(out, "  {e}")?;
        }
      }
      Ok(())
    }
  }
}

#[instrument(level = "info", skip_all, fields(session = %session.id()))]
async fn run(session: &mut QuizSession, provider: &StaticQuestionProvider) -> io::Result<()> {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  let mut out = io::stdout();
  session.start(provider).await;
  render(session, &mut out)?;

  while let Some(line) = lines.next_line().await? {
    let cmd = line.trim();
    if let Some(key) = ChoiceKey::parse(cmd) {
      session.record_answer(key);
    } else {
      match cmd {
        "n" | "" => {
          session.advance();
        }
        "p" => {
          session.retreat();
        }
        "r" => session.restart(provider).await,
        "q" => break,
        other => {
          writeln!(out, "Unknown command '{other}'.")?;
          continue;
        }
      }
    }
    render(session, &mut out)?;
    out.flush()?;
  }

  session.abandon();
  Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let cfg = load_quiz_config_from_env();
  let provider = StaticQuestionProvider::load(&cfg).await;

  let args: Vec<String> = std::env::args().skip(1).collect();
  let session_cfg = SessionConfig::from_params(
    nav_param(&args, "bank", "QUIZ_BANK").as_deref(),
    nav_param(&args, "mode", "QUIZ_MODE").as_deref(),
  );
  let bank: Bank = session_cfg.bank;
  println!("{}: {}", bank.title(), bank.description());

  let mut session = QuizSession::new(session_cfg, cfg.session_settings());
  run(&mut session, &provider).await?;

  if session.phase() == SessionPhase::Finished {
    let report = SessionReport::from_session(&session);
    info!(target: "phyto_quiz", report = %serde_json::to_string(&report)?, "Session report");
  }
  Ok(())
}

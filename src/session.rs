//! One quiz attempt: pool selection, answer recording, navigation and scoring.
//!
//! The only stored user input is `answers`, one slot per pool position.
//! Score, reviews, pass status and the per-question display state are all
//! projections of `(pool, answers)` recomputed on demand, so changing an answer
//! on a revisited question can never double count.
//!
//! Loading is generation-tagged: `begin_load` hands out a `LoadTicket`, and
//! `complete_load` drops results whose ticket is no longer current (a newer
//! start/restart happened, or the session was abandoned).

use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::config::SessionSettings;
use crate::domain::{ChoiceKey, Mode, Question, SessionConfig};
use crate::error::Result;
use crate::provider::QuestionProvider;
use crate::util::{fisher_yates, pass_threshold, trunc_for_log};

/// User-visible text for any fetch failure.
pub const LOAD_ERROR_MESSAGE: &str = "Cannot load questions.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    /// Loaded, on the first question, nothing answered yet.
    Ready,
    InProgress,
    /// Past the last question; there is no current question.
    Finished,
    Errored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoadState {
    Loading,
    Loaded,
    Errored,
}

/// Identifies one fetch. Only the ticket of the latest `begin_load` is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Display state of one pool position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnswerView {
    pub selected: Option<ChoiceKey>,
    pub is_correct: Option<bool>,
    pub show_correction: bool,
}

/// An answered question.
#[derive(Clone, Copy, Debug)]
pub struct Review<'a> {
    pub question: &'a Question,
    pub selected: ChoiceKey,
    pub was_correct: bool,
}

pub struct QuizSession {
    id: Uuid,
    config: SessionConfig,
    settings: SessionSettings,
    rng: StdRng,
    generation: u64,
    load: LoadState,
    error: Option<String>,
    /// Full bank from the last successful fetch; restart redraws from it.
    bank: Vec<Question>,
    pool: Vec<Question>,
    answers: Vec<Option<ChoiceKey>>,
    index: usize,
}

impl QuizSession {
    pub fn new(config: SessionConfig, settings: SessionSettings) -> Self {
        Self::with_rng(config, settings, StdRng::from_entropy())
    }

    /// Same as `new` with a caller-provided RNG (deterministic shuffles).
    pub fn with_rng(config: SessionConfig, settings: SessionSettings, rng: StdRng) -> Self {
        let id = Uuid::new_v4();
        debug!(target: "session", session = %id, bank = %config.bank, mode = ?config.mode, "Session created");
        Self {
            id,
            config,
            settings,
            rng,
            generation: 0,
            load: LoadState::Loading,
            error: None,
            bank: Vec::new(),
            pool: Vec::new(),
            answers: Vec::new(),
            index: 0,
        }
    }

    // ---------------- loading ----------------

    /// Fetch the bank and draw a pool. Failures leave the session `Errored`.
    #[instrument(level = "info", skip(self, provider), fields(session = %self.id, bank = %self.config.bank))]
    pub async fn start<P: QuestionProvider>(&mut self, provider: &P) {
        let ticket = self.begin_load();
        let result = provider.fetch(self.config.bank).await;
        self.complete_load(ticket, result);
    }

    /// Enter `Loading`, clearing all state. Any earlier ticket becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.load = LoadState::Loading;
        self.error = None;
        self.bank.clear();
        self.pool.clear();
        self.answers.clear();
        self.index = 0;
        debug!(target: "session", session = %self.id, generation = self.generation, "Loading questions");
        LoadTicket(self.generation)
    }

    /// Apply a fetch result. Returns false (and changes nothing) for a stale ticket.
    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Question>>) -> bool {
        if ticket.0 != self.generation || self.load != LoadState::Loading {
            warn!(target: "session", session = %self.id, ticket = ticket.0, generation = self.generation, "Discarding stale fetch result");
            return false;
        }
        match result {
            Ok(questions) => {
                self.bank = questions;
                self.draw_pool();
                self.load = LoadState::Loaded;
            }
            Err(e) => {
                error!(target: "session", session = %self.id, bank = %self.config.bank, error = %e, "Question fetch failed");
                self.load = LoadState::Errored;
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Navigating away: results of any in-flight fetch will be ignored.
    pub fn abandon(&mut self) {
        self.generation += 1;
        debug!(target: "session", session = %self.id, generation = self.generation, "Session abandoned");
    }

    /// Redraw from the cached bank when there is one, otherwise fetch again.
    #[instrument(level = "info", skip(self, provider), fields(session = %self.id))]
    pub async fn restart<P: QuestionProvider>(&mut self, provider: &P) {
        if self.bank.is_empty() {
            self.start(provider).await;
            return;
        }
        self.generation += 1;
        self.error = None;
        self.draw_pool();
        self.load = LoadState::Loaded;
    }

    fn draw_pool(&mut self) {
        let mut pool = self.bank.clone();
        if self.config.mode == Mode::Random {
            fisher_yates(&mut pool, &mut self.rng);
            pool.truncate(self.settings.pool_size.min(self.bank.len()));
        }
        self.answers = vec![None; pool.len()];
        self.pool = pool;
        self.index = 0;
        if self.pool.is_empty() {
            warn!(target: "session", session = %self.id, bank = %self.config.bank, "Bank is empty; nothing to ask");
        }
        info!(target: "session", session = %self.id, bank = %self.config.bank, mode = ?self.config.mode,
              bank_size = self.bank.len(), pool_size = self.pool.len(), threshold = self.threshold(), "Pool drawn");
    }

    // ---------------- user actions ----------------

    /// Record (or replace) the answer for the current question.
    /// Ignored when there is no current question; returns the refreshed view otherwise.
    pub fn record_answer(&mut self, key: ChoiceKey) -> Option<AnswerView> {
        let Some(q) = self.current_question() else {
            debug!(target: "session", session = %self.id, %key, "Answer ignored: no current question");
            return None;
        };
        let correct = q.is_correct(key);
        let (qid, text) = (q.id, trunc_for_log(&q.text, 60));
        let previous = self.answers[self.index].replace(key);
        debug!(target: "session", session = %self.id, index = self.index, question = qid, %text, %key, correct,
               replaced = ?previous, score = self.score(), "Answer recorded");
        Some(self.current_view())
    }

    /// Move forward. Requires the current question to be answered; from the last
    /// question this enters `Finished`. Returns whether the index moved.
    pub fn advance(&mut self) -> bool {
        if self.current_question().is_none() {
            debug!(target: "session", session = %self.id, "Advance ignored: no current question");
            return false;
        }
        if self.answers[self.index].is_none() {
            debug!(target: "session", session = %self.id, index = self.index, "Advance ignored: question unanswered");
            return false;
        }
        self.index += 1;
        if self.index == self.pool.len() {
            info!(target: "session", session = %self.id, score = self.score(), pool_size = self.pool.len(),
                  passed = ?self.passed(), "Quiz finished");
        }
        true
    }

    /// Move back one question. Returns whether the index moved.
    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            debug!(target: "session", session = %self.id, "Retreat ignored: at first question");
            return false;
        }
        self.index -= 1;
        true
    }

    // ---------------- derived state ----------------

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> SessionPhase {
        match self.load {
            LoadState::Loading => SessionPhase::Loading,
            LoadState::Errored => SessionPhase::Errored,
            LoadState::Loaded if self.index >= self.pool.len() => SessionPhase::Finished,
            LoadState::Loaded if self.index == 0 && self.answers.iter().all(Option::is_none) => SessionPhase::Ready,
            LoadState::Loaded => SessionPhase::InProgress,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pool(&self) -> &[Question] {
        &self.pool
    }

    pub fn answers(&self) -> &[Option<ChoiceKey>] {
        &self.answers
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.pool.get(self.index)
    }

    /// 1-based position of the current question and the pool size.
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.current_question().map(|_| (self.index + 1, self.pool.len()))
    }

    /// Display state of the current position, rebuilt from its recorded answer.
    pub fn current_view(&self) -> AnswerView {
        match (self.current_question(), self.answers.get(self.index).copied().flatten()) {
            (Some(q), Some(key)) => AnswerView {
                selected: Some(key),
                is_correct: Some(q.is_correct(key)),
                show_correction: true,
            },
            _ => AnswerView::default(),
        }
    }

    /// Answered questions in pool order.
    pub fn reviews(&self) -> Vec<Review<'_>> {
        self.pool
            .iter()
            .zip(&self.answers)
            .filter_map(|(question, answer)| {
                answer.map(|selected| Review { question, selected, was_correct: question.is_correct(selected) })
            })
            .collect()
    }

    pub fn wrong_answers(&self) -> Vec<Review<'_>> {
        self.reviews().into_iter().filter(|r| !r.was_correct).collect()
    }

    pub fn score(&self) -> usize {
        self.reviews().iter().filter(|r| r.was_correct).count()
    }

    pub fn threshold(&self) -> usize {
        pass_threshold(self.pool.len(), self.settings.pass_percent)
    }

    /// `None` while there is no pool to judge.
    pub fn passed(&self) -> Option<bool> {
        (!self.pool.is_empty()).then(|| self.score() >= self.threshold())
    }
}

/// "B – Foo" for a known key, "B" when the key matches no choice, "" for no key.
pub fn format_answer_label(question: &Question, key: Option<ChoiceKey>) -> String {
    let Some(key) = key else {
        return String::new();
    };
    let upper = key.as_str().to_ascii_uppercase();
    match question.choice(key) {
        Some(choice) => format!("{upper} – {}", choice.text),
        None => upper,
    }
}

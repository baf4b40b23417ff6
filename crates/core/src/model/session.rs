use std::sync::Arc;

use thiserror::Error;

use crate::model::{Question, SessionId};

/// The single user-facing failure of a quiz session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    #[error("Failed to load questions")]
    FetchFailed,
}

/// How a question was resolved the first time it was scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionOutcome {
    Correct,
    Incorrect,
    Skipped,
}

/// Coarse lifecycle of a session, derived from the state flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Error,
    Ready,
    Finished,
}

/// User- or scheduler-initiated transitions on a loaded session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionAction {
    SelectOption(usize),
    Skip,
    /// Move past the current question, finishing on the last one.
    Advance,
    Previous,
    Next,
    Finish,
}

//
// ─── SESSION STATE ─────────────────────────────────────────────────────────────
//

/// Immutable snapshot of one quiz attempt.
///
/// Transitions never mutate a snapshot in place: `apply` returns the next
/// snapshot, or `None` when the action is a no-op for the current state.
/// Questions are shared between snapshots of the same session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    session: SessionId,
    questions: Arc<[Question]>,
    outcomes: Vec<Option<QuestionOutcome>>,
    loading: bool,
    error: Option<LoadError>,
    current_index: usize,
    selected_option: Option<usize>,
    answer_revealed: bool,
    correct_count: usize,
    skipped_count: usize,
    streak: usize,
    longest_streak: usize,
    finished: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::loading(SessionId::default())
    }
}

impl SessionState {
    /// Fresh state for a session whose questions are being fetched.
    #[must_use]
    pub fn loading(session: SessionId) -> Self {
        Self {
            session,
            questions: Arc::from(Vec::new()),
            outcomes: Vec::new(),
            loading: true,
            error: None,
            current_index: 0,
            selected_option: None,
            answer_revealed: false,
            correct_count: 0,
            skipped_count: 0,
            streak: 0,
            longest_streak: 0,
            finished: false,
        }
    }

    /// Ready state for this session with the fetched questions.
    #[must_use]
    pub fn loaded(&self, questions: Vec<Question>) -> Self {
        let outcomes = vec![None; questions.len()];
        Self {
            questions: Arc::from(questions),
            outcomes,
            loading: false,
            ..Self::loading(self.session)
        }
    }

    /// Error state for this session. No questions are kept.
    #[must_use]
    pub fn failed(&self, error: LoadError) -> Self {
        Self {
            loading: false,
            error: Some(error),
            ..Self::loading(self.session)
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<LoadError> {
        self.error
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    #[must_use]
    pub fn answer_revealed(&self) -> bool {
        self.answer_revealed
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped_count
    }

    /// Questions neither answered correctly nor skipped, unanswered ones included.
    #[must_use]
    pub fn wrong_count(&self) -> usize {
        self.total()
            .saturating_sub(self.skipped_count)
            .saturating_sub(self.correct_count)
    }

    /// Number of questions that have been scored at least once.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.outcomes.iter().filter(|outcome| outcome.is_some()).count()
    }

    #[must_use]
    pub fn outcome(&self, index: usize) -> Option<QuestionOutcome> {
        self.outcomes.get(index).copied().flatten()
    }

    #[must_use]
    pub fn streak(&self) -> usize {
        self.streak
    }

    #[must_use]
    pub fn longest_streak(&self) -> usize {
        self.longest_streak
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.total()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Loading
        } else if self.error.is_some() {
            SessionPhase::Error
        } else if self.finished {
            SessionPhase::Finished
        } else {
            SessionPhase::Ready
        }
    }

    //
    // ─── TRANSITIONS ───────────────────────────────────────────────────────────
    //

    /// Compute the snapshot that follows `action`.
    ///
    /// Returns `None` when the action must leave the state untouched: the
    /// session is finished or not loaded, an answer is already revealed, or
    /// the requested index/navigation is out of bounds.
    #[must_use]
    pub fn apply(&self, action: SessionAction) -> Option<Self> {
        if self.finished || self.current_question().is_none() {
            return None;
        }

        match action {
            SessionAction::SelectOption(index) => self.select_option(index),
            SessionAction::Skip => Some(self.skip()),
            SessionAction::Advance => Some(self.advanced()),
            SessionAction::Previous => self.previous(),
            SessionAction::Next => self.next(),
            SessionAction::Finish => Some(Self {
                finished: true,
                ..self.clone()
            }),
        }
    }

    fn select_option(&self, index: usize) -> Option<Self> {
        if self.answer_revealed {
            return None;
        }
        let question = self.current_question()?;
        if index >= question.option_count() {
            return None;
        }

        let mut next = self.clone();
        next.selected_option = Some(index);
        next.answer_revealed = true;

        // A revisited question shows its answer again but is scored only once.
        if next.outcomes[self.current_index].is_none() {
            if question.is_correct(index) {
                next.correct_count += 1;
                next.streak += 1;
                next.longest_streak = next.longest_streak.max(next.streak);
                next.outcomes[self.current_index] = Some(QuestionOutcome::Correct);
            } else {
                next.streak = 0;
                next.outcomes[self.current_index] = Some(QuestionOutcome::Incorrect);
            }
        }

        Some(next)
    }

    fn skip(&self) -> Self {
        let mut next = self.clone();
        if next.outcomes[self.current_index].is_none() {
            next.skipped_count += 1;
            next.outcomes[self.current_index] = Some(QuestionOutcome::Skipped);
        }
        next.streak = 0;
        next.selected_option = None;
        next.answer_revealed = false;
        next.advanced()
    }

    fn advanced(&self) -> Self {
        if self.is_last() {
            return Self {
                finished: true,
                ..self.clone()
            };
        }
        self.moved_to(self.current_index + 1)
    }

    fn previous(&self) -> Option<Self> {
        if self.is_first() {
            return None;
        }
        Some(self.moved_to(self.current_index - 1))
    }

    fn next(&self) -> Option<Self> {
        if self.is_last() {
            return None;
        }
        Some(self.moved_to(self.current_index + 1))
    }

    fn moved_to(&self, index: usize) -> Self {
        Self {
            current_index: index,
            selected_option: None,
            answer_revealed: false,
            ..self.clone()
        }
    }
}

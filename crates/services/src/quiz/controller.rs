use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use quiz_core::model::{LoadError, Question, SessionAction, SessionId, SessionState};
use quiz_core::{DEFAULT_REVEAL_DELAY_MS, DEFAULT_TIME_BUDGET_SECS};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::lock;
use super::timer::CountdownTimer;
use crate::question_source::QuestionSource;

/// Fixed timings of a quiz session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizSettings {
    pub time_budget_secs: u32,
    pub reveal_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            time_budget_secs: DEFAULT_TIME_BUDGET_SECS,
            reveal_delay: Duration::from_millis(DEFAULT_REVEAL_DELAY_MS),
        }
    }
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the live quiz session and serializes every change to it.
///
/// Readers receive immutable snapshots through `subscribe_state` and
/// `subscribe_time_left`. The countdown and the post-answer advance run as
/// Tokio tasks and go through the same transitions as user actions, keyed to
/// the session they were armed for.
///
/// Methods that arm background work (`start`, `restart`, `select_option`)
/// must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct QuizController {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    state: watch::Sender<SessionState>,
    timer: CountdownTimer,
    scheduler: Mutex<Scheduler>,
}

/// Pending post-answer advances. Guarding this also orders lifecycle changes.
#[derive(Default)]
struct Scheduler {
    advances: Vec<JoinHandle<()>>,
}

impl Scheduler {
    fn cancel_advances(&mut self) {
        for task in self.advances.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_advances();
    }
}

impl QuizController {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, settings: QuizSettings) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(Inner {
                source,
                settings,
                state,
                timer: CountdownTimer::new(settings.time_budget_secs),
                scheduler: Mutex::new(Scheduler::default()),
            }),
        }
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.inner.settings
    }

    #[must_use]
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    #[must_use]
    pub fn subscribe_time_left(&self) -> watch::Receiver<u32> {
        self.inner.timer.subscribe()
    }

    /// Current session snapshot.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Remaining seconds on the countdown.
    #[must_use]
    pub fn time_left(&self) -> u32 {
        self.inner.timer.remaining()
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.inner.timer.is_running()
    }

    /// Begin a session: fetch questions, then start the countdown.
    pub async fn start(&self) -> SessionState {
        self.load_session().await
    }

    /// Discard the current session and load a fresh one.
    ///
    /// Pending advances and the countdown are cancelled before the new fetch
    /// is issued, and the published state shows `Loading` with no error
    /// until the fetch resolves.
    pub async fn restart(&self) -> SessionState {
        info!(session = %self.inner.state.borrow().session(), "restarting quiz");
        self.load_session().await
    }

    /// Answer the current question and schedule the automatic advance.
    ///
    /// Returns `false` without touching the state when an answer is already
    /// revealed, the session is finished or not loaded, or `index` is not an
    /// option of the current question.
    pub fn select_option(&self, index: usize) -> bool {
        let inner = &self.inner;
        let mut scheduler = lock(&inner.scheduler);
        let Some(session) = inner.apply(&mut scheduler, None, SessionAction::SelectOption(index))
        else {
            return false;
        };
        debug!(%session, index, "option selected");

        scheduler.advances.retain(|task| !task.is_finished());
        let weak = Arc::downgrade(inner);
        let delay = inner.settings.reveal_delay;
        scheduler.advances.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(inner) = weak.upgrade() {
                inner.advance(session);
            }
        }));
        true
    }

    /// Count the current question as skipped and move on immediately.
    pub fn skip_question(&self) -> bool {
        self.inner.apply_now(SessionAction::Skip)
    }

    pub fn go_to_previous_question(&self) -> bool {
        self.inner.apply_now(SessionAction::Previous)
    }

    pub fn go_to_next_question(&self) -> bool {
        self.inner.apply_now(SessionAction::Next)
    }

    /// End the session now, stopping the countdown. Idempotent.
    pub fn finish_test(&self) -> bool {
        self.inner.apply_now(SessionAction::Finish)
    }

    async fn load_session(&self) -> SessionState {
        let session = self.inner.begin_session();
        info!(%session, "loading questions");

        let loaded = match self.inner.source.fetch_questions().await {
            Ok(questions) if questions.is_empty() => {
                warn!(%session, "question source returned no questions");
                Err(LoadError::FetchFailed)
            }
            Ok(questions) => {
                info!(%session, count = questions.len(), "questions loaded");
                Ok(questions)
            }
            Err(err) => {
                warn!(%session, error = %err, "failed to load questions");
                Err(LoadError::FetchFailed)
            }
        };

        self.inner.complete_load(session, loaded);
        self.state()
    }
}

impl Inner {
    /// Cancel scheduled work, reset the countdown and publish a fresh `Loading` state.
    fn begin_session(&self) -> SessionId {
        let mut scheduler = lock(&self.scheduler);
        scheduler.cancel_advances();
        self.timer.reset(self.settings.time_budget_secs);

        let mut session = SessionId::default();
        self.state.send_modify(|state| {
            session = state.session().next();
            *state = SessionState::loading(session);
        });
        session
    }

    fn complete_load(self: &Arc<Self>, session: SessionId, loaded: Result<Vec<Question>, LoadError>) {
        let _scheduler = lock(&self.scheduler);
        let ready = loaded.is_ok();
        let mut applied = false;
        self.state.send_if_modified(|state| {
            if state.session() != session || !state.is_loading() {
                return false;
            }
            *state = match loaded {
                Ok(questions) => state.loaded(questions),
                Err(err) => state.failed(err),
            };
            applied = true;
            true
        });

        if !applied {
            debug!(%session, "discarding questions for a superseded session");
            return;
        }
        if ready {
            let weak: Weak<Self> = Arc::downgrade(self);
            self.timer.start(self.settings.time_budget_secs, move || {
                if let Some(inner) = weak.upgrade() {
                    inner.expire(session);
                }
            });
            info!(%session, budget_secs = self.settings.time_budget_secs, "countdown started");
        }
    }

    fn apply_now(&self, action: SessionAction) -> bool {
        let mut scheduler = lock(&self.scheduler);
        self.apply(&mut scheduler, None, action).is_some()
    }

    /// Run one transition on the live state.
    ///
    /// With `expected` set, the transition only applies to that session.
    /// Reaching `finished` cancels pending advances and stops the countdown.
    fn apply(
        &self,
        scheduler: &mut Scheduler,
        expected: Option<SessionId>,
        action: SessionAction,
    ) -> Option<SessionId> {
        let mut outcome = None;
        self.state.send_if_modified(|state| {
            if expected.is_some_and(|session| session != state.session()) {
                return false;
            }
            let Some(next) = state.apply(action) else {
                return false;
            };
            outcome = Some((next.session(), next.is_finished()));
            *state = next;
            true
        });

        let (session, finished) = outcome?;
        if finished {
            scheduler.cancel_advances();
            self.timer.stop();
            info!(%session, ?action, "quiz finished");
        }
        Some(session)
    }

    fn advance(&self, session: SessionId) {
        let mut scheduler = lock(&self.scheduler);
        if self
            .apply(&mut scheduler, Some(session), SessionAction::Advance)
            .is_none()
        {
            debug!(%session, "scheduled advance ignored");
        }
    }

    fn expire(&self, session: SessionId) {
        let mut scheduler = lock(&self.scheduler);
        if self
            .apply(&mut scheduler, Some(session), SessionAction::Finish)
            .is_some()
        {
            info!(%session, "time is up");
        }
    }
}

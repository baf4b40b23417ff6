use quiz_core::model::{SessionPhase, SessionState};

/// Screen to show for a session snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    Loading,
    Error { message: String },
    Questions,
    Results,
}

impl Route {
    #[must_use]
    pub fn for_state(state: &SessionState) -> Self {
        match state.phase() {
            SessionPhase::Loading => Self::Loading,
            SessionPhase::Error => Self::Error {
                message: state
                    .error()
                    .map(|err| err.to_string())
                    .unwrap_or_default(),
            },
            SessionPhase::Ready => Self::Questions,
            SessionPhase::Finished => Self::Results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{LoadError, QuestionDraft, QuestionId, SessionAction, SessionId};

    #[test]
    fn follows_session_lifecycle() {
        let loading = SessionState::loading(SessionId::new(1));
        assert_eq!(Route::for_state(&loading), Route::Loading);

        let failed = loading.failed(LoadError::FetchFailed);
        assert_eq!(
            Route::for_state(&failed),
            Route::Error {
                message: "Failed to load questions".into()
            }
        );

        let question = QuestionDraft {
            id: QuestionId::new(1),
            prompt: "Only question".into(),
            options: vec!["a".into(), "b".into()],
            correct_option_index: 0,
        }
        .validate()
        .unwrap();
        let ready = loading.loaded(vec![question]);
        assert_eq!(Route::for_state(&ready), Route::Questions);

        let finished = ready.apply(SessionAction::Finish).unwrap();
        assert_eq!(Route::for_state(&finished), Route::Results);
    }
}

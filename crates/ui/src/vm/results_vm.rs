use quiz_core::model::SessionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub skipped: usize,
    pub longest_streak: usize,
    pub score_percent: usize,
    pub score_label: String,
    pub correct_label: String,
    pub share_text: String,
}

impl From<&SessionState> for ResultsVm {
    fn from(state: &SessionState) -> Self {
        let total = state.total();
        let correct = state.correct_count();
        let score_percent = if total == 0 { 0 } else { correct * 100 / total };

        Self {
            total,
            correct,
            wrong: state.wrong_count(),
            skipped: state.skipped_count(),
            longest_streak: state.longest_streak(),
            score_percent,
            score_label: format!("{score_percent}%"),
            correct_label: format!("{correct} / {total}"),
            share_text: share_text(state),
        }
    }
}

/// Summary line handed to the platform share action.
#[must_use]
pub fn share_text(state: &SessionState) -> String {
    format!(
        "I scored {} out of {} in the quiz! Skipped: {}, Longest Streak: {}.",
        state.correct_count(),
        state.total(),
        state.skipped_count(),
        state.longest_streak()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{QuestionDraft, QuestionId, SessionAction, SessionId};

    fn ready(len: u64) -> SessionState {
        let questions = (1..=len)
            .map(|id| {
                QuestionDraft {
                    id: QuestionId::new(id),
                    prompt: format!("Q{id}"),
                    options: vec!["yes".into(), "no".into()],
                    correct_option_index: 0,
                }
                .validate()
                .unwrap()
            })
            .collect();
        SessionState::loading(SessionId::new(1)).loaded(questions)
    }

    fn run(state: SessionState, actions: &[SessionAction]) -> SessionState {
        actions
            .iter()
            .fold(state, |state, &action| state.apply(action).unwrap())
    }

    #[test]
    fn summarises_finished_session() {
        use SessionAction::{Advance, SelectOption, Skip};
        let state = run(
            ready(5),
            &[
                SelectOption(0),
                Advance,
                SelectOption(0),
                Advance,
                SelectOption(0),
                Advance,
                SelectOption(1),
                Advance,
                Skip,
            ],
        );
        assert!(state.is_finished());

        let vm = ResultsVm::from(&state);
        assert_eq!(vm.correct, 3);
        assert_eq!(vm.wrong, 1);
        assert_eq!(vm.skipped, 1);
        assert_eq!(vm.longest_streak, 3);
        assert_eq!(vm.score_percent, 60);
        assert_eq!(vm.score_label, "60%");
        assert_eq!(vm.correct_label, "3 / 5");
        assert_eq!(
            vm.share_text,
            "I scored 3 out of 5 in the quiz! Skipped: 1, Longest Streak: 3."
        );
    }

    #[test]
    fn unanswered_questions_count_as_wrong() {
        let state = run(ready(3), &[SessionAction::Finish]);
        let vm = ResultsVm::from(&state);
        assert_eq!(vm.wrong, 3);
        assert_eq!(vm.score_percent, 0);
    }

    #[test]
    fn score_truncates_towards_zero() {
        let state = run(ready(3), &[SessionAction::SelectOption(0), SessionAction::Finish]);
        assert_eq!(ResultsVm::from(&state).score_percent, 33);
    }

    #[test]
    fn empty_session_scores_zero() {
        let vm = ResultsVm::from(&SessionState::default());
        assert_eq!(vm.total, 0);
        assert_eq!(vm.score_percent, 0);
    }
}

use quiz_core::model::SessionState;

use crate::vm::time_fmt::format_countdown;

/// Flames shown before the streak badge switches to a `+N` counter.
const STREAK_FLAMES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionStatus {
    Idle,
    Selected,
    Correct,
    Incorrect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub status: OptionStatus,
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreakVm {
    pub lit_flames: usize,
    pub extra_label: Option<String>,
    /// Set on the answer that completes the first full row of flames.
    pub celebrate: bool,
}

impl StreakVm {
    fn new(streak: usize) -> Self {
        Self {
            lit_flames: streak.min(STREAK_FLAMES),
            extra_label: (streak > STREAK_FLAMES).then(|| format!("+{}", streak - STREAK_FLAMES)),
            celebrate: streak == STREAK_FLAMES,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionVm {
    pub prompt: String,
    pub counter_label: String,
    /// Share of questions before the current one, in `0.0..1.0`.
    pub progress: f32,
    pub time_label: String,
    pub options: Vec<OptionVm>,
    pub can_skip: bool,
    pub can_go_previous: bool,
    pub can_go_next: bool,
    pub streak: StreakVm,
}

/// Build the question screen for a loaded, unfinished session.
#[must_use]
pub fn map_question(state: &SessionState, time_left: u32) -> Option<QuestionVm> {
    let question = state.current_question()?;
    let revealed = state.answer_revealed();
    let selected = state.selected_option();

    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let is_selected = selected == Some(index);
            let status = match (revealed, question.is_correct(index), is_selected) {
                (true, true, _) => OptionStatus::Correct,
                (true, false, true) => OptionStatus::Incorrect,
                (_, _, true) => OptionStatus::Selected,
                _ => OptionStatus::Idle,
            };
            OptionVm {
                index,
                label: label.clone(),
                status,
                enabled: !revealed,
            }
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let progress = state.current_index() as f32 / state.total() as f32;

    Some(QuestionVm {
        prompt: question.prompt().to_string(),
        counter_label: format!("Question {} of {}", state.current_index() + 1, state.total()),
        progress,
        time_label: format_countdown(time_left),
        options,
        can_skip: !revealed,
        can_go_previous: !revealed && !state.is_first(),
        can_go_next: !revealed && !state.is_last(),
        streak: StreakVm::new(state.streak()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionDraft, QuestionId, SessionAction, SessionId};

    fn question(id: u64) -> Question {
        QuestionDraft {
            id: QuestionId::new(id),
            prompt: format!("Prompt {id}"),
            options: vec!["A".into(), "B".into(), "C".into()],
            correct_option_index: 1,
        }
        .validate()
        .unwrap()
    }

    fn ready() -> SessionState {
        SessionState::loading(SessionId::new(1)).loaded((1..=4).map(question).collect())
    }

    #[test]
    fn unanswered_question_is_all_idle() {
        let vm = map_question(&ready(), 900).unwrap();
        assert_eq!(vm.prompt, "Prompt 1");
        assert_eq!(vm.counter_label, "Question 1 of 4");
        assert_eq!(vm.time_label, "15:00");
        assert!(vm.progress.abs() < f32::EPSILON);
        assert!(vm.options.iter().all(|o| o.status == OptionStatus::Idle && o.enabled));
        assert!(vm.can_skip);
        assert!(!vm.can_go_previous);
        assert!(vm.can_go_next);
    }

    #[test]
    fn wrong_answer_marks_selection_and_correct_option() {
        let state = ready().apply(SessionAction::SelectOption(2)).unwrap();
        let vm = map_question(&state, 42).unwrap();
        let statuses: Vec<_> = vm.options.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![OptionStatus::Idle, OptionStatus::Correct, OptionStatus::Incorrect]
        );
        assert!(vm.options.iter().all(|o| !o.enabled));
        assert!(!vm.can_skip);
        assert!(!vm.can_go_next);
        assert_eq!(vm.time_label, "00:42");
    }

    #[test]
    fn progress_and_counter_follow_index() {
        let state = ready()
            .apply(SessionAction::Next)
            .and_then(|s| s.apply(SessionAction::Next))
            .unwrap();
        let vm = map_question(&state, 900).unwrap();
        assert_eq!(vm.counter_label, "Question 3 of 4");
        assert!((vm.progress - 0.5).abs() < f32::EPSILON);
        assert!(vm.can_go_previous);
    }

    #[test]
    fn streak_badge_caps_flames() {
        assert_eq!(StreakVm::new(0).lit_flames, 0);
        let three = StreakVm::new(3);
        assert_eq!(three.lit_flames, 3);
        assert!(three.celebrate);
        assert_eq!(three.extra_label, None);

        let five = StreakVm::new(5);
        assert_eq!(five.lit_flames, 3);
        assert!(!five.celebrate);
        assert_eq!(five.extra_label.as_deref(), Some("+2"));
    }

    #[test]
    fn no_question_before_load() {
        assert!(map_question(&SessionState::default(), 900).is_none());
    }
}

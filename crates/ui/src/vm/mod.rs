mod question_vm;
mod results_vm;
mod time_fmt;

use quiz_core::model::SessionState;

use crate::routes::Route;

pub use question_vm::{OptionStatus, OptionVm, QuestionVm, StreakVm, map_question};
pub use results_vm::{ResultsVm, share_text};
pub use time_fmt::format_countdown;

/// Everything a front end needs to draw the current screen.
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenVm {
    Loading,
    Error { message: String },
    Question(QuestionVm),
    Results(ResultsVm),
}

#[must_use]
pub fn map_screen(state: &SessionState, time_left: u32) -> ScreenVm {
    match Route::for_state(state) {
        Route::Loading => ScreenVm::Loading,
        Route::Error { message } => ScreenVm::Error { message },
        Route::Questions => map_question(state, time_left).map_or(ScreenVm::Loading, ScreenVm::Question),
        Route::Results => ScreenVm::Results(ResultsVm::from(state)),
    }
}

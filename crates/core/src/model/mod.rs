mod app_settings;
mod ids;
mod question;
mod session;

pub use ids::{ParseIdError, QuestionId, SessionId};

pub use app_settings::AppSettings;
pub use question::{Question, QuestionDraft, QuestionError};
pub use session::{LoadError, QuestionOutcome, SessionAction, SessionPhase, SessionState};

#![forbid(unsafe_code)]

pub mod app_services;
pub mod app_settings_service;
pub mod config;
pub mod error;
pub mod question_source;
pub mod quiz;

pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use config::{DEFAULT_QUESTIONS_URL, QuizConfig};
pub use error::{AppServicesError, AppSettingsServiceError, ConfigError, QuestionSourceError};
pub use question_source::{HttpQuestionSource, QuestionSource, StaticQuestionSource, parse_questions};
pub use quiz::{CountdownTimer, QuizController, QuizSettings};

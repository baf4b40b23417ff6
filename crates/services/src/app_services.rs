use std::sync::Arc;

use storage::repository::Storage;

use crate::app_settings_service::AppSettingsService;
use crate::config::QuizConfig;
use crate::error::AppServicesError;
use crate::question_source::{HttpQuestionSource, QuestionSource};
use crate::quiz::QuizController;

/// Assembles the app-facing services from configuration and storage.
#[derive(Clone)]
pub struct AppServices {
    quiz: QuizController,
    app_settings: Arc<AppSettingsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the configured HTTP question source.
    ///
    /// The stored theme preference is loaded before returning.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the settings load fails.
    pub async fn new_sqlite(db_url: &str, config: &QuizConfig) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source: Arc<dyn QuestionSource> =
            Arc::new(HttpQuestionSource::new(config.questions_url.clone()));
        Self::from_parts(&storage, source, config).await
    }

    /// Build services over in-memory storage with the given question source.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the settings load fails.
    pub async fn in_memory(
        source: Arc<dyn QuestionSource>,
        config: &QuizConfig,
    ) -> Result<Self, AppServicesError> {
        Self::from_parts(&Storage::in_memory(), source, config).await
    }

    async fn from_parts(
        storage: &Storage,
        source: Arc<dyn QuestionSource>,
        config: &QuizConfig,
    ) -> Result<Self, AppServicesError> {
        let app_settings = Arc::new(AppSettingsService::new(Arc::clone(&storage.app_settings)));
        app_settings.load().await?;
        let quiz = QuizController::new(source, config.settings());
        Ok(Self { quiz, app_settings })
    }

    #[must_use]
    pub fn quiz(&self) -> QuizController {
        self.quiz.clone()
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }
}

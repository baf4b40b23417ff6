use std::sync::Arc;

use services::{AppSettingsService, QuizController};

use crate::vm::{ScreenVm, map_screen};

pub trait UiApp: Send + Sync {
    fn quiz(&self) -> QuizController;
    fn app_settings(&self) -> Arc<AppSettingsService>;
}

/// Handles a front end needs, resolved once from the composition root.
#[derive(Clone)]
pub struct AppContext {
    quiz: QuizController,
    app_settings: Arc<AppSettingsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            quiz: app.quiz(),
            app_settings: app.app_settings(),
        }
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizController {
        &self.quiz
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }

    #[must_use]
    pub fn dark_theme(&self) -> bool {
        self.app_settings.current().dark_theme()
    }

    /// View-model for the screen matching the latest snapshot.
    #[must_use]
    pub fn screen(&self) -> ScreenVm {
        map_screen(&self.quiz.state(), self.quiz.time_left())
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

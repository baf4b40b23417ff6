use std::sync::Arc;

use quiz_core::model::AppSettings;
use storage::repository::AppSettingsRepository;
use tokio::sync::watch;

use crate::error::AppSettingsServiceError;

/// Reactive access to the persisted theme preference.
///
/// `load` seeds the published value from storage; writes go to storage
/// first and are published only once they succeed.
#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn AppSettingsRepository>,
    current: Arc<watch::Sender<AppSettings>>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppSettingsRepository>) -> Self {
        let (current, _) = watch::channel(AppSettings::default());
        Self {
            repo,
            current: Arc::new(current),
        }
    }

    /// Load persisted settings (or defaults if missing) and publish them.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = self.repo.get_settings().await?.unwrap_or_default();
        self.current.send_replace(settings);
        Ok(settings)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AppSettings> {
        self.current.subscribe()
    }

    #[must_use]
    pub fn current(&self) -> AppSettings {
        *self.current.borrow()
    }

    /// Persist the theme choice and publish it.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if persistence fails; the published
    /// value is left unchanged in that case.
    pub async fn set_dark_theme(&self, dark: bool) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = self.current().with_dark_theme(dark);
        self.repo.save_settings(&settings).await?;
        self.current.send_replace(settings);
        tracing::info!(dark_theme = dark, "theme preference saved");
        Ok(settings)
    }

    /// Flip the theme choice.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if persistence fails.
    pub async fn toggle_dark_theme(&self) -> Result<AppSettings, AppSettingsServiceError> {
        self.set_dark_theme(!self.current().dark_theme()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use storage::repository::{InMemoryRepository, StorageError};

    struct BrokenRepo;

    #[async_trait]
    impl AppSettingsRepository for BrokenRepo {
        async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
            Ok(None)
        }

        async fn save_settings(&self, _settings: &AppSettings) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk full".into()))
        }
    }

    #[tokio::test]
    async fn load_defaults_to_light_theme() {
        let service = AppSettingsService::new(Arc::new(InMemoryRepository::new()));
        let settings = service.load().await.unwrap();
        assert!(!settings.dark_theme());
        assert!(!service.current().dark_theme());
    }

    #[tokio::test]
    async fn writes_through_and_publishes() {
        let repo = InMemoryRepository::new();
        let service = AppSettingsService::new(Arc::new(repo.clone()));
        let mut rx = service.subscribe();

        service.set_dark_theme(true).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().dark_theme());
        assert_eq!(
            repo.get_settings().await.unwrap(),
            Some(AppSettings::from_persisted(true))
        );

        let toggled = service.toggle_dark_theme().await.unwrap();
        assert!(!toggled.dark_theme());
        assert!(!rx.borrow_and_update().dark_theme());
    }

    #[tokio::test]
    async fn load_picks_up_persisted_value() {
        let repo = InMemoryRepository::new();
        repo.save_settings(&AppSettings::from_persisted(true))
            .await
            .unwrap();
        let service = AppSettingsService::new(Arc::new(repo));
        assert!(service.load().await.unwrap().dark_theme());
        assert!(service.current().dark_theme());
    }

    #[tokio::test]
    async fn failed_write_keeps_published_value() {
        let service = AppSettingsService::new(Arc::new(BrokenRepo));
        let err = service.set_dark_theme(true).await.unwrap_err();
        assert!(matches!(err, AppSettingsServiceError::Storage(_)));
        assert!(!service.current().dark_theme());
    }
}

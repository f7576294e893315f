use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{Language, PreferenceKey, Preferences, Theme};
use storage::repository::{PreferenceRecord, PreferenceRepository};

use crate::error::PreferencesServiceError;
use crate::notify::{Notification, NotificationSink};

/// What the host environment reports about the user's appearance settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemAppearance {
    pub prefers_dark: bool,
}

/// Loads and persists the theme and language flags.
#[derive(Clone)]
pub struct PreferencesService {
    clock: Clock,
    repo: Arc<dyn PreferenceRepository>,
    notifier: Arc<dyn NotificationSink>,
    system: SystemAppearance,
}

impl PreferencesService {
    #[must_use]
    pub fn new(
        clock: Clock,
        repo: Arc<dyn PreferenceRepository>,
        notifier: Arc<dyn NotificationSink>,
        system: SystemAppearance,
    ) -> Self {
        Self {
            clock,
            repo,
            notifier,
            system,
        }
    }

    /// Read both flags, applying fallbacks for missing or unknown values.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load(&self) -> Result<Preferences, PreferencesServiceError> {
        let theme = self.load_theme().await?;
        let language = self.load_language().await?;
        Ok(Preferences::new(theme, language))
    }

    /// Stored theme, or the system default.
    ///
    /// Without a usable stored value, a dark system preference selects (and
    /// persists) the dark theme; otherwise light is used and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load_theme(&self) -> Result<Theme, PreferencesServiceError> {
        if let Some(record) = self.repo.get_preference(PreferenceKey::Theme).await? {
            match record.value.parse::<Theme>() {
                Ok(theme) => return Ok(theme),
                Err(err) => tracing::warn!(%err, "ignoring stored theme"),
            }
        }

        if self.system.prefers_dark {
            self.persist(PreferenceKey::Theme, Theme::Dark.as_str()).await?;
            return Ok(Theme::Dark);
        }
        Ok(Theme::Light)
    }

    /// Stored language, or English.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn load_language(&self) -> Result<Language, PreferencesServiceError> {
        let Some(record) = self.repo.get_preference(PreferenceKey::Language).await? else {
            return Ok(Language::default());
        };
        match record.value.parse::<Language>() {
            Ok(language) => Ok(language),
            Err(err) => {
                tracing::warn!(%err, "ignoring stored language");
                Ok(Language::default())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `PreferencesServiceError` if the value cannot be stored.
    pub async fn set_theme(&self, theme: Theme) -> Result<Theme, PreferencesServiceError> {
        self.persist(PreferenceKey::Theme, theme.as_str()).await?;
        self.notifier
            .notify(Notification::info(format!("Theme changed to {theme} mode")));
        Ok(theme)
    }

    /// Flip between light and dark starting from the stored value.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesServiceError` on storage failures.
    pub async fn toggle_theme(&self) -> Result<Theme, PreferencesServiceError> {
        let current = self.load_theme().await?;
        self.set_theme(current.toggled()).await
    }

    /// # Errors
    ///
    /// Returns `PreferencesServiceError` if the value cannot be stored.
    pub async fn set_language(
        &self,
        language: Language,
    ) -> Result<Language, PreferencesServiceError> {
        self.persist(PreferenceKey::Language, language.code()).await?;
        self.notifier.notify(Notification::info(format!(
            "Language changed to {}",
            language.native_name()
        )));
        Ok(language)
    }

    async fn persist(&self, key: PreferenceKey, value: &str) -> Result<(), PreferencesServiceError> {
        let record = PreferenceRecord {
            key,
            value: value.to_string(),
            updated_at: self.clock.now(),
        };
        self.repo.set_preference(&record).await?;
        tracing::debug!(key = key.as_str(), value, "preference saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use quiz_core::time::fixed_clock;
    use storage::repository::InMemoryRepository;

    fn service(
        repo: &InMemoryRepository,
        sink: &RecordingSink,
        prefers_dark: bool,
    ) -> PreferencesService {
        PreferencesService::new(
            fixed_clock(),
            Arc::new(repo.clone()),
            Arc::new(sink.clone()),
            SystemAppearance { prefers_dark },
        )
    }

    #[tokio::test]
    async fn empty_store_falls_back_to_light_and_english() {
        let repo = InMemoryRepository::new();
        let prefs = service(&repo, &RecordingSink::new(), false)
            .load()
            .await
            .unwrap();

        assert_eq!(prefs, Preferences::new(Theme::Light, Language::En));
        assert!(repo.get_preference(PreferenceKey::Theme).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn dark_system_preference_is_persisted() {
        let repo = InMemoryRepository::new();
        let theme = service(&repo, &RecordingSink::new(), true)
            .load_theme()
            .await
            .unwrap();

        assert_eq!(theme, Theme::Dark);
        let stored = repo.get_preference(PreferenceKey::Theme).await.unwrap();
        assert_eq!(stored.unwrap().value, "dark");
    }

    #[tokio::test]
    async fn stored_values_win_over_system() {
        let repo = InMemoryRepository::new();
        let svc = service(&repo, &RecordingSink::new(), true);
        svc.set_theme(Theme::Light).await.unwrap();
        svc.set_language(Language::Te).await.unwrap();

        let prefs = svc.load().await.unwrap();
        assert_eq!(prefs, Preferences::new(Theme::Light, Language::Te));
    }

    #[tokio::test]
    async fn unknown_stored_language_falls_back() {
        let repo = InMemoryRepository::new();
        repo.set_preference(&PreferenceRecord {
            key: PreferenceKey::Language,
            value: "xx".into(),
            updated_at: fixed_clock().now(),
        })
        .await
        .unwrap();

        let language = service(&repo, &RecordingSink::new(), false)
            .load_language()
            .await
            .unwrap();
        assert_eq!(language, Language::En);
    }

    #[tokio::test]
    async fn toggle_and_language_change_notify() {
        let repo = InMemoryRepository::new();
        let sink = RecordingSink::new();
        let svc = service(&repo, &sink, false);

        assert_eq!(svc.toggle_theme().await.unwrap(), Theme::Dark);
        assert_eq!(svc.toggle_theme().await.unwrap(), Theme::Light);
        svc.set_language(Language::Fr).await.unwrap();

        assert_eq!(
            sink.messages(),
            vec![
                "Theme changed to dark mode",
                "Theme changed to light mode",
                "Language changed to Français",
            ]
        );
    }
}

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use std::sync::Arc;

use quiz_core::model::QuestionCatalog;
use storage::catalog::{builtin_catalog, load_catalog_file};
use storage::repository::Storage;

use crate::Clock;
use crate::controller::SessionController;
use crate::error::AppServicesError;
use crate::notify::NotificationSink;
use crate::preferences_service::{PreferencesService, SystemAppearance};
use crate::timings::EngineTimings;

/// Where the question catalog comes from.
#[derive(Debug, Clone, Copy, Default)]
pub enum CatalogSource<'a> {
    #[default]
    Builtin,
    File(&'a Path),
}

/// Assembles app-facing services over one storage backend and catalog.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    timings: EngineTimings,
    catalog: QuestionCatalog,
    preferences: Arc<PreferencesService>,
    notifier: Arc<dyn NotificationSink>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or catalog loading fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        source: CatalogSource<'_>,
        system: SystemAppearance,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, source, system, notifier)
    }

    /// Build services over volatile storage. Preferences are lost on exit.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the catalog cannot be loaded.
    pub fn in_memory(
        clock: Clock,
        source: CatalogSource<'_>,
        system: SystemAppearance,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, AppServicesError> {
        Self::from_storage(Storage::in_memory(), clock, source, system, notifier)
    }

    fn from_storage(
        storage: Storage,
        clock: Clock,
        source: CatalogSource<'_>,
        system: SystemAppearance,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self, AppServicesError> {
        let catalog = match source {
            CatalogSource::Builtin => builtin_catalog()?,
            CatalogSource::File(path) => load_catalog_file(path)?,
        };
        tracing::debug!(questions = catalog.len(), "catalog loaded");

        let preferences = Arc::new(PreferencesService::new(
            clock,
            Arc::clone(&storage.preferences),
            Arc::clone(&notifier),
            system,
        ));

        Ok(Self {
            clock,
            timings: EngineTimings::default(),
            catalog,
            preferences,
            notifier,
        })
    }

    #[must_use]
    pub fn with_timings(mut self, timings: EngineTimings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn timings(&self) -> &EngineTimings {
        &self.timings
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    /// A fresh controller. `seed` makes shuffles reproducible.
    #[must_use]
    pub fn controller(&self, seed: Option<u64>) -> SessionController {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        SessionController::new(
            self.clock,
            self.catalog.clone(),
            self.timings,
            rng,
            Arc::clone(&self.notifier),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use quiz_core::time::fixed_clock;

    #[test]
    fn in_memory_services_use_builtin_catalog() {
        let services = AppServices::in_memory(
            fixed_clock(),
            CatalogSource::Builtin,
            SystemAppearance::default(),
            Arc::new(RecordingSink::new()),
        )
        .unwrap();

        assert_eq!(services.catalog().len(), 30);
        let controller = services.controller(Some(7));
        assert_eq!(controller.catalog().len(), 30);
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let result = AppServices::in_memory(
            fixed_clock(),
            CatalogSource::File(Path::new("/definitely/not/here.json")),
            SystemAppearance::default(),
            Arc::new(RecordingSink::new()),
        );
        assert!(matches!(result, Err(AppServicesError::Catalog(_))));
    }
}

#![forbid(unsafe_code)]

pub mod app_services;
pub mod controller;
pub mod error;
pub mod i18n;
pub mod notify;
pub mod preferences_service;
pub mod results;
pub mod scheduler;
pub mod timings;

pub use quiz_core::Clock;

pub use app_services::{AppServices, CatalogSource};
pub use controller::{ControllerEvent, ControllerPhase, Mode, Selection, SessionController};
pub use error::{AppServicesError, PreferencesServiceError, SessionError};
pub use i18n::{TextKey, text};
pub use notify::{Notification, NotificationKind, NotificationSink, RecordingSink, TracingSink};
pub use preferences_service::{PreferencesService, SystemAppearance};
pub use results::{Achievement, ResultSummary, ResultTier};
pub use scheduler::DeferredScheduler;
pub use timings::EngineTimings;

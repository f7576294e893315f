use anyhow::{Context, bail};
use std::path::{Path, PathBuf};

use quiz_core::model::Language;
use services::SystemAppearance;

pub const DEFAULT_DB_URL: &str = "sqlite://quizzy.sqlite3";
pub const MEMORY_DB_URL: &str = "sqlite::memory:";

/// Settings resolved from flags and environment, shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: String,
    pub catalog: Option<PathBuf>,
    /// Overrides the stored language for this run only.
    pub language: Option<Language>,
    pub system: SystemAppearance,
}

impl AppConfig {
    /// # Errors
    ///
    /// Fails on a blank database URL or an unknown language code.
    pub fn resolve(
        db_url: Option<&str>,
        catalog: Option<PathBuf>,
        language: Option<&str>,
        prefers_dark: bool,
    ) -> anyhow::Result<Self> {
        let db_url = match db_url {
            Some(raw) if raw.trim().is_empty() => bail!("invalid --db value: {raw:?}"),
            Some(raw) => normalize_sqlite_url(raw),
            None => DEFAULT_DB_URL.to_string(),
        };
        let language = language
            .map(|code| code.parse::<Language>())
            .transpose()
            .context("invalid --language value")?;

        Ok(Self {
            db_url,
            catalog,
            language,
            system: SystemAppearance { prefers_dark },
        })
    }

    /// Create the database file and its parent directories if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL has no path or the file cannot be created.
    pub fn prepare_database(&self) -> anyhow::Result<()> {
        if self.db_url == MEMORY_DB_URL {
            return Ok(());
        }

        let Some(path) = sqlite_path(&self.db_url) else {
            bail!("invalid --db value: {}", self.db_url);
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        if !path.exists() {
            std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(false)
                .open(path)
                .with_context(|| format!("creating {}", path.display()))?;
        }
        Ok(())
    }
}

/// Turn a bare path or `sqlite:` path into an absolute `sqlite://` URL.
fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == MEMORY_DB_URL || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn sqlite_path(db_url: &str) -> Option<&Path> {
    let rest = db_url.strip_prefix("sqlite://")?;
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then(|| Path::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let config = AppConfig::resolve(None, None, None, false).unwrap();
        assert_eq!(config.db_url, DEFAULT_DB_URL);
        assert_eq!(config.language, None);
        assert!(!config.system.prefers_dark);
    }

    #[test]
    fn relative_paths_become_absolute_urls() {
        let config = AppConfig::resolve(Some("data/q.sqlite3"), None, None, false).unwrap();
        assert!(config.db_url.starts_with("sqlite:///"));
        assert!(config.db_url.ends_with("data/q.sqlite3"));

        let memory = AppConfig::resolve(Some(MEMORY_DB_URL), None, None, false).unwrap();
        assert_eq!(memory.db_url, MEMORY_DB_URL);
    }

    #[test]
    fn rejects_blank_db_and_unknown_language() {
        assert!(AppConfig::resolve(Some("  "), None, None, false).is_err());
        assert!(AppConfig::resolve(None, None, Some("xx"), false).is_err());

        let config = AppConfig::resolve(None, None, Some("fr"), true).unwrap();
        assert_eq!(config.language, Some(Language::Fr));
        assert!(config.system.prefers_dark);
    }

    #[test]
    fn extracts_path_from_url() {
        assert_eq!(
            sqlite_path("sqlite:///tmp/q.sqlite3?mode=rwc"),
            Some(Path::new("/tmp/q.sqlite3"))
        );
        assert_eq!(sqlite_path("sqlite://"), None);
        assert_eq!(sqlite_path("postgres://x"), None);
    }
}

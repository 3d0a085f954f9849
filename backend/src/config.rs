//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `PLATESNAP_*` environment variables or a configuration
//! file; every field has a local default so the console runs with no setup.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_DATA_DIR: &str = "platesnap-data";
const SESSION_FILE_NAME: &str = "session.json";

/// Where the console keeps its data and how it logs.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PLATESNAP")]
pub struct AppSettings {
    /// Directory holding one JSON file per registry collection.
    pub data_dir: Option<PathBuf>,
    /// File holding the signed-in admin's session.
    pub session_file: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl AppSettings {
    /// Return the configured data directory, falling back to the default.
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Return the configured session file, defaulting to one inside the
    /// data directory.
    pub fn session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| self.data_dir().join(SESSION_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for console configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("platesnap-admin")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("PLATESNAP_DATA_DIR", None::<String>),
            ("PLATESNAP_SESSION_FILE", None::<String>),
            ("PLATESNAP_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.data_dir(), PathBuf::from(DEFAULT_DATA_DIR));
        assert_eq!(
            settings.session_file(),
            PathBuf::from(DEFAULT_DATA_DIR).join(SESSION_FILE_NAME)
        );
        assert!(!settings.json_logs);
    }

    #[rstest]
    fn session_file_follows_data_dir() {
        let _guard = lock_env([
            ("PLATESNAP_DATA_DIR", Some("/srv/platesnap".to_owned())),
            ("PLATESNAP_SESSION_FILE", None::<String>),
            ("PLATESNAP_JSON_LOGS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.data_dir(), PathBuf::from("/srv/platesnap"));
        assert_eq!(
            settings.session_file(),
            PathBuf::from("/srv/platesnap/session.json")
        );
        assert!(settings.json_logs);
    }

    #[rstest]
    fn explicit_session_file_wins() {
        let _guard = lock_env([
            ("PLATESNAP_DATA_DIR", None::<String>),
            ("PLATESNAP_SESSION_FILE", Some("/tmp/admin-session.json".to_owned())),
            ("PLATESNAP_JSON_LOGS", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.session_file(),
            PathBuf::from("/tmp/admin-session.json")
        );
    }
}

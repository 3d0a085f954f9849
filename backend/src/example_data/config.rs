//! Demo data configuration loaded via OrthoConfig.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Configuration values controlling demo data seeding.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "EXAMPLE_DATA")]
pub struct ExampleDataSettings {
    /// Seed an empty registry automatically before running a command.
    #[ortho_config(default = false)]
    pub enabled: bool,
    /// Registry file to seed from instead of the bundled one.
    pub registry_path: Option<PathBuf>,
}

impl ExampleDataSettings {
    /// Whether automatic seeding is switched on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for demo data configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ExampleDataSettings {
        ExampleDataSettings::load_from_iter([OsString::from("platesnap-admin")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", None::<String>),
            ("EXAMPLE_DATA_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(!settings.is_enabled());
        assert!(settings.registry_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("EXAMPLE_DATA_ENABLED", Some("true".to_owned())),
            (
                "EXAMPLE_DATA_REGISTRY_PATH",
                Some("/tmp/demo-registry.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.is_enabled());
        assert_eq!(
            settings.registry_path,
            Some(PathBuf::from("/tmp/demo-registry.json"))
        );
    }
}

#[cfg(test)]
mod tests {
    use amelia::libs::config::{Config, DEFAULT_TITLE, ENV_DB_PATH, ENV_REPORT_DIR};
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the per-user data directory at a temporary directory.
    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            std::env::remove_var(ENV_DB_PATH);
            std::env::remove_var(ENV_REPORT_DIR);
            ConfigTestContext { temp_dir }
        }

        fn teardown(self) {
            std::env::remove_var(ENV_DB_PATH);
            std::env::remove_var(ENV_REPORT_DIR);
        }
    }

    #[test]
    fn test_in_dir_defaults() {
        let config = Config::in_dir(&PathBuf::from("/data/amelia"));
        assert_eq!(config.db_path, PathBuf::from("/data/amelia/amelia.db"));
        assert_eq!(config.report_dir, PathBuf::from("/data/amelia/reports"));
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_title_defaults_when_missing_from_file() {
        let config: Config = serde_json::from_str(r#"{"db_path": "a.db", "report_dir": "out"}"#).unwrap();
        assert_eq!(config.title, "Amelia");
        assert_eq!(config.db_path, PathBuf::from("a.db"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_save_and_override(ctx: &mut ConfigTestContext) {
        assert!(!Config::exists().unwrap());
        let defaults = Config::read().unwrap();
        assert!(defaults.db_path.starts_with(ctx.temp_dir.path()));
        assert!(defaults.db_path.ends_with("amelia.db"));

        let mut custom = defaults.clone();
        custom.title = "Club events".to_string();
        let saved = custom.save().unwrap();
        assert!(saved.ends_with("config.json"));
        assert!(Config::exists().unwrap());
        assert_eq!(Config::read().unwrap(), custom);

        let db_path = ctx.temp_dir.path().join("elsewhere.db");
        std::env::set_var(ENV_DB_PATH, &db_path);
        let overridden = Config::read().unwrap();
        assert_eq!(overridden.db_path, db_path);
        assert_eq!(overridden.report_dir, custom.report_dir);
        assert_eq!(overridden.title, "Club events");
    }
}

pub mod dirs {
    use std::env;
    use std::path::PathBuf;
    use test_log::test;

    /// Filename looked up inside the `resources` directory when no explicit
    /// path is given.
    pub const DEFAULT_FILENAME: &str = "global.properties";

    /// Anchor directory for default property lookups. Overridable with the
    /// `PROPSTORE_BASE_DIR` environment variable, otherwise the process
    /// current directory.
    pub fn base_dir() -> PathBuf {
        env::var_os("PROPSTORE_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn resources_dir() -> PathBuf {
        base_dir().join("resources")
    }

    pub fn default_properties_path() -> PathBuf {
        resources_dir().join(DEFAULT_FILENAME)
    }

    #[test]
    fn default_path_is_anchored_under_resources() {
        use pretty_assertions::assert_eq;

        let path = default_properties_path();
        assert_eq!(path, base_dir().join("resources").join(DEFAULT_FILENAME));
        assert!(path.ends_with("resources/global.properties"));
    }
}

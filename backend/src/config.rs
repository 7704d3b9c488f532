//! Data file locations.
//!
//! Resolved from the environment (a `.env` file is loaded by the binary):
//!
//! | Variable                | Default                     |
//! |-------------------------|-----------------------------|
//! | `REFSHEET_DATA_DIR`     | `data`                      |
//! | `REFSHEET_CATALOG`      | `<data>/refs.json`          |
//! | `REFSHEET_TRANSLATIONS` | `<data>/translations.json`  |
//!
//! Command-line flags override both files via [`DataPaths::with_overrides`].

use std::env;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "REFSHEET_DATA_DIR";
pub const CATALOG_VAR: &str = "REFSHEET_CATALOG";
pub const TRANSLATIONS_VAR: &str = "REFSHEET_TRANSLATIONS";

const DEFAULT_DATA_DIR: &str = "data";
const CATALOG_FILE: &str = "refs.json";
const TRANSLATIONS_FILE: &str = "translations.json";

/// Where the catalog and translations live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub catalog: PathBuf,
    pub translations: PathBuf,
}

impl DataPaths {
    /// Both files inside one data directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            catalog: dir.join(CATALOG_FILE),
            translations: dir.join(TRANSLATIONS_FILE),
        }
    }

    /// Resolve from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let dir = non_empty(DATA_DIR_VAR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        let mut paths = Self::in_dir(dir);
        if let Some(catalog) = non_empty(CATALOG_VAR) {
            paths.catalog = PathBuf::from(catalog);
        }
        if let Some(translations) = non_empty(TRANSLATIONS_VAR) {
            paths.translations = PathBuf::from(translations);
        }
        paths
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, catalog: Option<PathBuf>, translations: Option<PathBuf>) -> Self {
        if let Some(c) = catalog {
            self.catalog = c;
        }
        if let Some(t) = translations {
            self.translations = t;
        }
        self
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(DEFAULT_DATA_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let paths = DataPaths::from_lookup(lookup(&[]));
        assert_eq!(paths, DataPaths::default());
        assert_eq!(paths.catalog, Path::new("data").join("refs.json"));
    }

    #[test]
    fn test_data_dir_and_file_overrides() {
        let paths = DataPaths::from_lookup(lookup(&[
            (DATA_DIR_VAR, "/srv/survey"),
            (TRANSLATIONS_VAR, "/tmp/t.json"),
        ]));
        assert_eq!(paths.catalog, Path::new("/srv/survey").join("refs.json"));
        assert_eq!(paths.translations, PathBuf::from("/tmp/t.json"));
    }

    #[test]
    fn test_blank_variables_are_ignored() {
        let paths = DataPaths::from_lookup(lookup(&[(CATALOG_VAR, "  ")]));
        assert_eq!(paths.catalog, Path::new("data").join("refs.json"));
    }

    #[test]
    fn test_cli_overrides() {
        let paths = DataPaths::default().with_overrides(Some("c.json".into()), None);
        assert_eq!(paths.catalog, PathBuf::from("c.json"));
        assert_eq!(paths.translations, Path::new("data").join("translations.json"));
    }
}

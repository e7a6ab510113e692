//! Seed file path resolution.

use std::path::{Path, PathBuf};

/// Default seed directory, relative to the application root.
pub const DEFAULT_SEED_DIR: &str = "database/seeders/data";

/// Default seed file extension.
pub const DEFAULT_SEED_EXTENSION: &str = "json";

/// File name of a table's seed file: `<table>.<ext>`.
///
/// A leading dot on the extension is ignored, so `.json` and `json` agree.
pub fn seed_file_name(table: &str, extension: &str) -> String {
    let extension = extension.trim_start_matches('.');
    if extension.is_empty() {
        table.to_string()
    } else {
        format!("{}.{}", table, extension)
    }
}

/// Full path of a table's seed file inside `dir`.
pub fn seed_path(dir: &Path, table: &str, extension: &str) -> PathBuf {
    dir.join(seed_file_name(table, extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_file_name() {
        assert_eq!(seed_file_name("modules", "json"), "modules.json");
        assert_eq!(seed_file_name("modules", ".json"), "modules.json");
        assert_eq!(seed_file_name("modules", ""), "modules");
    }

    #[test]
    fn test_seed_path_joins_directory() {
        let path = seed_path(Path::new("/tmp/seeds"), "term_term", "json");
        assert_eq!(path, PathBuf::from("/tmp/seeds/term_term.json"));
    }

    #[test]
    fn test_default_dir_is_relative() {
        assert!(Path::new(DEFAULT_SEED_DIR).is_relative());
    }
}

//! Seed-file loader.
//!
//! The store's initial population comes from a JSON file of the shape
//! `{"tasks": [...]}`, read once at startup. Seed tasks are trusted as-is
//! and are not re-validated; a missing or malformed file is a fatal startup
//! error.

use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Deserialize;

use super::Task;

#[derive(Deserialize)]
struct SeedFile {
    tasks: Vec<Task>,
}

/// Load the initial task population from `path`.
pub fn load(path: &Path) -> Result<Vec<Task>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let file: SeedFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing seed file {}", path.display()))?;
    Ok(file.tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_seed_file() {
        let mut f = NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"tasks":[{{"id":1,"title":"a","description":"b","completed":false,"priority":"low"}}]}}"#
        )
        .unwrap();
        let tasks = load(f.path()).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, 1);
        assert_eq!(tasks[0].priority(), Some("low"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        assert!(load(Path::new("/nonexistent/tasks.json")).is_err());
    }

    #[test]
    fn test_load_malformed_json_is_error() {
        let mut f = NamedTempFile::new().unwrap();
        write!(f, "{{not json").unwrap();
        assert!(load(f.path()).is_err());
    }
}

//! parsing::loader
//!
//! Model discovery and file loading.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::ModelError;
use super::grammar;
use super::model::Model;

/// File extension of textual model files.
pub const MODEL_EXTENSION: &str = "sysml";

/// Every `*.sysml` file under `dir` at any depth, sorted.
///
/// Returns an empty list when `dir` is missing or not a directory.
/// Unreadable entries are skipped.
pub fn find_models(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut models: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some(MODEL_EXTENSION))
        .map(|e| e.into_path())
        .collect();

    models.sort();
    models
}

/// Read and parse the model file at `path`.
pub fn load(path: &Path) -> Result<Model, ModelError> {
    let text = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    loads(&text)
}

/// Parse model text.
pub fn loads(text: &str) -> Result<Model, ModelError> {
    Ok(grammar::parse(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_nested_models_sorted() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("b/deep")).unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("b/deep/z.sysml"), "").unwrap();
        fs::write(dir.path().join("a/y.sysml"), "").unwrap();
        fs::write(dir.path().join("x.sysml"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("a/model.sysml.bak"), "").unwrap();

        let found = find_models(dir.path());
        let relative: Vec<_> = found
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![
                PathBuf::from("a/y.sysml"),
                PathBuf::from("b/deep/z.sysml"),
                PathBuf::from("x.sysml"),
            ]
        );
    }

    #[test]
    fn missing_or_file_path_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(find_models(&dir.path().join("missing")).is_empty());

        let file = dir.path().join("one.sysml");
        fs::write(&file, "").unwrap();
        assert!(find_models(&file).is_empty());
    }

    #[test]
    fn load_reports_io_error_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.sysml");
        match load(&path) {
            Err(ModelError::Io { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn load_parses_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("m.sysml");
        fs::write(&path, "package M { part def A; }").unwrap();

        let model = load(&path).unwrap();
        assert_eq!(model.element_count(), 2);
    }

    #[test]
    fn loads_returns_syntax_error() {
        let err = loads("package M {").unwrap_err();
        let syntax = err.syntax().unwrap();
        assert_eq!(syntax.line, 1);
    }
}

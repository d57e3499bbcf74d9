//! Schema documents loaded from disk

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Result, SchemaError};

/// A parsed schema file
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Where the schema was read from
    pub path: PathBuf,
    /// The parsed schema tree (mappings keep declaration order)
    pub content: Value,
    /// Size of the source file in bytes
    pub byte_len: u64,
}

impl SchemaDocument {
    /// Read and parse a schema file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
        let content = serde_json::from_str(&text).map_err(|source| SchemaError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded schema");
        Ok(Self {
            path: path.to_path_buf(),
            content,
            byte_len: text.len() as u64,
        })
    }

    /// Path shown in generated banners: relative to the working directory when possible
    pub fn display_path(&self) -> String {
        display_path(&self.path)
    }
}

/// Render `path` relative to the current directory, falling back to the path as given
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .and_then(|cwd| Ok((cwd.canonicalize()?, path.canonicalize()?)))
        .ok()
        .and_then(|(cwd, full)| full.strip_prefix(&cwd).ok().map(Path::to_path_buf));

    let shown = relative.as_deref().unwrap_or(path);
    shown.to_string_lossy().replace('\\', "/")
}

/// Write `content` to `path`, creating parent directories first
pub(crate) fn write_creating_parents(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SchemaError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| SchemaError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, r#"{"title": "ok"}"#).unwrap();

        let doc = SchemaDocument::load(&path).unwrap();
        assert_eq!(doc.byte_len, 15);
        assert_eq!(doc.content["title"], "ok");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SchemaDocument::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{\"title\": ").unwrap();

        let err = SchemaDocument::load(&path).unwrap_err();
        assert!(matches!(err, SchemaError::Json { .. }));
    }

    #[test]
    fn test_display_path_outside_cwd_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        fs::write(&path, "{}").unwrap();
        assert_eq!(display_path(&path), path.to_string_lossy().replace('\\', "/"));
    }

    #[test]
    fn test_write_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/nested/out.md");
        write_creating_parents(&path, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }
}

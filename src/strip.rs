//! Editorial key stripping
//!
//! Produces the runtime schema from the annotated one by dropping keys that
//! only carry human commentary (`$comment`, `examples`, `notes`, ...). Removal
//! is blind: the stripper never checks whether a key is structural, so the
//! strip set must not contain keywords such as `type` or `required`
//! (see [`crate::config::ToolsConfig::validate`]).

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::config::StripConfig;
use crate::document::{write_creating_parents, SchemaDocument};
use crate::error::Result;

/// Result of stripping a tree
#[derive(Debug, Clone, PartialEq)]
pub struct Stripped {
    /// Cleaned tree
    pub value: Value,
    /// Number of mapping entries removed (a removed subtree counts once)
    pub removed: usize,
}

/// Removes a fixed set of keys at every depth of a schema tree
#[derive(Debug, Clone)]
pub struct KeyStripper {
    keys: HashSet<String>,
}

impl Default for KeyStripper {
    fn default() -> Self {
        Self::from_config(&StripConfig::default())
    }
}

impl KeyStripper {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &StripConfig) -> Self {
        Self::new(config.keys.iter().cloned())
    }

    /// Whether `key` is removed by this stripper
    pub fn strips(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    /// Build a copy of `value` without the editorial keys
    pub fn strip(&self, value: &Value) -> Stripped {
        match value {
            Value::Object(map) => {
                let mut removed = 0;
                let mut result = Map::with_capacity(map.len());
                for (key, item) in map {
                    if self.strips(key) {
                        removed += 1;
                        continue;
                    }
                    let cleaned = self.strip(item);
                    removed += cleaned.removed;
                    result.insert(key.clone(), cleaned.value);
                }
                Stripped { value: Value::Object(result), removed }
            }
            Value::Array(items) => {
                let mut removed = 0;
                let result = items
                    .iter()
                    .map(|item| {
                        let cleaned = self.strip(item);
                        removed += cleaned.removed;
                        cleaned.value
                    })
                    .collect();
                Stripped { value: Value::Array(result), removed }
            }
            leaf => Stripped { value: leaf.clone(), removed: 0 },
        }
    }
}

/// Outcome of [`strip_file`]
#[derive(Debug, Clone)]
pub struct StripReport {
    pub output: PathBuf,
    pub removed: usize,
    pub bytes_before: u64,
    pub bytes_after: u64,
}

impl StripReport {
    /// Source size minus output size; negative if pretty-printing grew the file
    pub fn bytes_stripped(&self) -> i64 {
        self.bytes_before as i64 - self.bytes_after as i64
    }

    /// Nothing was removed: the input may already be clean, or be the wrong file
    pub fn is_noop(&self) -> bool {
        self.removed == 0
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let output = self.output.to_string_lossy().replace('\\', "/");
        if self.is_noop() {
            write!(
                f,
                "{} written ({} bytes stripped; warning: no editorial keys found in source)",
                output,
                self.bytes_stripped()
            )
        } else {
            write!(f, "{} written ({} bytes stripped)", output, self.bytes_stripped())
        }
    }
}

/// Serialize a stripped tree the way the runtime schema is stored on disk
pub fn to_runtime_json(value: &Value) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}

/// Strip `source` into `output`, creating parent directories as needed
pub fn strip_file(source: &Path, output: &Path, stripper: &KeyStripper) -> Result<StripReport> {
    let doc = SchemaDocument::load(source)?;
    let stripped = stripper.strip(&doc.content);
    let text = to_runtime_json(&stripped.value)?;
    write_creating_parents(output, &text)?;

    let report = StripReport {
        output: output.to_path_buf(),
        removed: stripped.removed,
        bytes_before: doc.byte_len,
        bytes_after: text.len() as u64,
    };
    if report.is_noop() {
        tracing::warn!(source = %source.display(), "no editorial keys found");
    }
    tracing::info!(
        output = %output.display(),
        removed = report.removed,
        delta = report.bytes_stripped(),
        "runtime schema written"
    );
    Ok(report)
}

//! Check mode: compare generated content with what is on disk

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use similar::TextDiff;

use crate::error::{Result, SchemaError};

/// Whether a generated artifact on disk matches a fresh rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    /// Unified diff from the file on disk to the fresh rendering
    Stale { diff: String },
}

impl Freshness {
    pub fn is_stale(&self) -> bool {
        matches!(self, Freshness::Stale { .. })
    }

    /// Turn a stale result into [`SchemaError::Stale`] for `path`
    pub fn into_result(self, path: &Path) -> Result<()> {
        match self {
            Freshness::UpToDate => Ok(()),
            Freshness::Stale { .. } => Err(SchemaError::Stale { path: path.to_path_buf() }),
        }
    }
}

/// Compare `expected` with the current contents of `path`. A missing file is stale.
pub fn check_freshness(path: &Path, expected: &str) -> Result<Freshness> {
    let current = match fs::read_to_string(path) {
        Ok(current) => current,
        Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
        Err(e) => return Err(SchemaError::io(path, e)),
    };

    if current == expected {
        return Ok(Freshness::UpToDate);
    }

    let shown = path.to_string_lossy();
    let diff = TextDiff::from_lines(current.as_str(), expected)
        .unified_diff()
        .context_radius(3)
        .header(&shown, "generated")
        .to_string();
    tracing::debug!(path = %shown, "generated output differs from disk");
    Ok(Freshness::Stale { diff })
}

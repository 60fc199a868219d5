//! File access used by the parser to resolve include directives.
//!
//! The parser reads referenced files through the [`ConfigSource`] trait so
//! tests can run against an in-memory file map instead of the filesystem.

use crate::error::{PrintcheckError, Result};
use globset::GlobBuilder;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Provides config file contents and include-pattern expansion.
pub trait ConfigSource {
    /// Read the contents of a config file.
    fn read(&self, path: &Path) -> Result<String>;

    /// Expand an include pattern into the matching file paths.
    ///
    /// The pattern is already joined onto the including file's directory.
    /// Returns an empty list when nothing matches; the parser decides
    /// whether that is an error based on wildcard presence.
    fn glob(&self, pattern: &Path) -> Result<Vec<PathBuf>>;
}

/// Whether a pattern contains glob wildcard characters.
pub fn has_magic(pattern: &Path) -> bool {
    pattern
        .to_string_lossy()
        .contains(['*', '?', '['])
}

fn build_matcher(pattern: &Path) -> Result<globset::GlobMatcher> {
    let glob = GlobBuilder::new(&pattern.to_string_lossy())
        .literal_separator(true)
        .build()
        .map_err(|e| {
            PrintcheckError::Other(anyhow::anyhow!(
                "invalid include pattern '{}': {}",
                pattern.display(),
                e
            ))
        })?;
    Ok(glob.compile_matcher())
}

/// Reads config files from the filesystem.
#[derive(Debug, Default)]
pub struct FsSource;

impl FsSource {
    pub fn new() -> Self {
        Self
    }

    /// The deepest directory prefix of `pattern` free of wildcard characters.
    fn walk_root(pattern: &Path) -> PathBuf {
        let mut root = PathBuf::new();
        for component in pattern.components() {
            if let Component::Normal(part) = component {
                if part.to_string_lossy().contains(['*', '?', '[']) {
                    break;
                }
            }
            root.push(component);
        }
        if root.as_os_str().is_empty() {
            root.push(".");
        }
        root
    }
}

impl ConfigSource for FsSource {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| PrintcheckError::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn glob(&self, pattern: &Path) -> Result<Vec<PathBuf>> {
        if !has_magic(pattern) {
            return Ok(if pattern.is_file() {
                vec![pattern.to_path_buf()]
            } else {
                vec![]
            });
        }

        let matcher = build_matcher(pattern)?;
        let root = Self::walk_root(pattern);
        let mut matches = Vec::new();
        for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file() && matcher.is_match(entry.path()) {
                matches.push(entry.path().to_path_buf());
            }
        }
        Ok(matches)
    }
}

/// An in-memory file map for tests and virtual documents.
#[derive(Debug, Default)]
pub struct MemorySource {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a virtual file, replacing any previous content at the path.
    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }
}

impl ConfigSource for MemorySource {
    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| PrintcheckError::ConfigRead {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            })
    }

    fn glob(&self, pattern: &Path) -> Result<Vec<PathBuf>> {
        let matcher = build_matcher(pattern)?;
        Ok(self
            .files
            .keys()
            .filter(|p| matcher.is_match(p))
            .cloned()
            .collect())
    }
}

//! Immutable model of a parsed configuration file.
//!
//! [`ConfigDocument`] is the data structure every lint rule reads. It is
//! constructed once by the parser and never mutated afterwards; both types
//! keep their fields private so no code path can alter a section's option
//! map after construction.
//!
//! Section iteration order is insertion/merge order, which consistency
//! checks rely on (the first section matching a pattern acts as the
//! reference the others are compared against).

use indexmap::IndexMap;
use std::path::PathBuf;

/// A named block of key/value configuration options.
///
/// Section names and option keys are lowercase; the parser normalizes them
/// before construction. Option values keep their original casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    options: IndexMap<String, String>,
}

impl ConfigSection {
    /// Create a section from a name and its option map.
    pub fn new(name: impl Into<String>, options: IndexMap<String, String>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// The section name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an option value. Lookup is case-insensitive on the key.
    pub fn get(&self, option: &str) -> Option<&str> {
        self.options
            .get(&option.to_lowercase())
            .map(String::as_str)
    }

    /// Whether the section defines the given option.
    pub fn contains(&self, option: &str) -> bool {
        self.options.contains_key(&option.to_lowercase())
    }

    /// Iterate over option key/value pairs in declaration order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of options in the section.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the section has no options.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A fully parsed configuration: sections plus the resolved include chain.
///
/// The include list preserves resolution order and duplicates; it is the
/// depth-first sequence of files the parser spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: IndexMap<String, ConfigSection>,
    includes: Vec<PathBuf>,
}

impl ConfigDocument {
    /// Create a document from its parts.
    pub fn new(sections: IndexMap<String, ConfigSection>, includes: Vec<PathBuf>) -> Self {
        Self { sections, includes }
    }

    /// Look up a section by name.
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.get(name)
    }

    /// Whether the document contains a section with the given name.
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    /// Iterate over sections in insertion/merge order.
    pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.values()
    }

    /// Iterate over section names in insertion/merge order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Files spliced in by include directives, in resolution order.
    pub fn includes(&self) -> &[PathBuf] {
        &self.includes
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Decompose into parts for merging an included document into its parent.
    pub(crate) fn into_parts(self) -> (IndexMap<String, ConfigSection>, Vec<PathBuf>) {
        (self.sections, self.includes)
    }
}

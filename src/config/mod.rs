//! Configuration parsing and the parsed-document model.
//!
//! The parser turns raw INI-style text into an immutable
//! [`ConfigDocument`], resolving `[include <pattern>]` directives
//! recursively with cycle detection. File access goes through the
//! [`ConfigSource`] trait so documents can be parsed from the filesystem
//! or from an in-memory map.

pub mod document;
pub mod parser;
pub mod settings;
pub mod source;

pub use document::{ConfigDocument, ConfigSection};
pub use parser::{parse_file, parse_str};
pub use settings::LinterSettings;
pub use source::{ConfigSource, FsSource, MemorySource};

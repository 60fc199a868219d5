//! Config file parsing with recursive include resolution.
//!
//! The parser is a single line-oriented pass: section headers open a pending
//! buffer, include directives flush it and splice in the referenced files,
//! and everything reachable collapses into one [`ConfigDocument`].
//!
//! Merge semantics are last-write-wins at every level: a later section with
//! the same name fully replaces an earlier one (whether the later one comes
//! from an include or from a second block in the same file), and a repeated
//! option key within one section keeps its last value.

use crate::config::document::{ConfigDocument, ConfigSection};
use crate::config::source::{has_magic, ConfigSource};
use crate::error::{PrintcheckError, Result};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Parse a config file read through `source`.
pub fn parse_file(path: &Path, source: &dyn ConfigSource) -> Result<ConfigDocument> {
    let content = source.read(path)?;
    parse_str(&content, path, source)
}

/// Parse raw config text originating at `path`.
///
/// `path` anchors relative include patterns and seeds the cycle detection;
/// it does not have to exist when `content` has no include directives.
pub fn parse_str(content: &str, path: &Path, source: &dyn ConfigSource) -> Result<ConfigDocument> {
    let mut visited = HashSet::new();
    parse_recursive(content, path, &mut visited, source)
}

fn parse_recursive(
    content: &str,
    path: &Path,
    visited: &mut HashSet<PathBuf>,
    source: &dyn ConfigSource,
) -> Result<ConfigDocument> {
    if !visited.insert(path.to_path_buf()) {
        return Err(PrintcheckError::RecursiveInclude {
            path: path.to_path_buf(),
        });
    }
    tracing::debug!(file = %path.display(), "parsing config file");

    let content = content.replace("\r\n", "\n");
    let mut sections: IndexMap<String, ConfigSection> = IndexMap::new();
    let mut includes: Vec<PathBuf> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for raw_line in content.split('\n') {
        let line = split_comment(raw_line);

        if let Some(pattern) = include_pattern(line) {
            flush_pending(&mut pending, &mut sections);

            let base = path.parent().unwrap_or_else(|| Path::new(""));
            let joined = base.join(pattern);
            let mut matches = source.glob(&joined)?;
            if matches.is_empty() && !has_magic(&joined) {
                return Err(PrintcheckError::MissingInclude { pattern: joined });
            }
            matches.sort();

            for file in matches {
                tracing::debug!(file = %file.display(), "resolving include");
                includes.push(file.clone());
                let text = source.read(&file)?;
                let nested = parse_recursive(&text, &file, visited, source)?;
                let (nested_sections, nested_includes) = nested.into_parts();
                for (name, section) in nested_sections {
                    sections.insert(name, section);
                }
                includes.extend(nested_includes);
            }
        } else {
            if section_header(line).is_some() {
                flush_pending(&mut pending, &mut sections);
            }
            pending.push(raw_line.to_string());
        }
    }
    flush_pending(&mut pending, &mut sections);

    tracing::debug!(
        file = %path.display(),
        sections = sections.len(),
        includes = includes.len(),
        "parsed config file"
    );
    visited.remove(path);
    Ok(ConfigDocument::new(sections, includes))
}

/// Strip the trailing comment from a line: everything from the first
/// unescaped `#` onward. Returns the remaining content, trimmed.
fn split_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b == b'#' && (i == 0 || bytes[i - 1] != b'\\') {
            return line[..i].trim();
        }
    }
    line.trim()
}

/// Extract the section name from a `[name]` header line.
fn section_header(content: &str) -> Option<&str> {
    content
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

/// Extract the pattern from an `[include <pattern>]` directive.
fn include_pattern(content: &str) -> Option<&str> {
    section_header(content)
        .and_then(|name| name.strip_prefix("include "))
        .map(str::trim)
}

/// Parse the buffered lines of one section into options and store it.
///
/// Lines before the header are ignored; option lines split on the first
/// `:` with the key lowercased. The section name is lowercased as well,
/// so a later block with the same name in any casing replaces this one.
fn flush_pending(pending: &mut Vec<String>, sections: &mut IndexMap<String, ConfigSection>) {
    if pending.is_empty() {
        return;
    }

    let mut name: Option<String> = None;
    let mut options: IndexMap<String, String> = IndexMap::new();
    for raw_line in pending.iter() {
        let content = split_comment(raw_line);
        if content.is_empty() {
            continue;
        }
        if let Some(header) = section_header(content) {
            name = Some(header.to_string());
            continue;
        }
        if name.is_some() {
            if let Some((key, value)) = content.split_once(':') {
                options.insert(key.trim().to_lowercase(), value.trim().to_string());
            }
        }
    }

    if let Some(name) = name {
        let key = name.to_lowercase();
        sections.insert(key.clone(), ConfigSection::new(key, options));
    }
    pending.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::source::MemorySource;

    const SAMPLE_CONFIG: &str = "\
[printer]
kinematics: cartesian
max_velocity: 300
max_accel: 3000

[stepper_x]
step_pin: PF0
dir_pin: PF1
enable_pin: !PD7
microsteps: 16

# This is a comment
[include other_config.cfg]

[extruder]
step_pin: PA4
dir_pin: !PA6
microsteps: 16
";

    const OTHER_CONFIG: &str = "\
[stepper_y]
step_pin: PF2
dir_pin: PF3
microsteps: 16
";

    fn sample_source() -> MemorySource {
        MemorySource::new()
            .with_file("test.cfg", SAMPLE_CONFIG)
            .with_file("other_config.cfg", OTHER_CONFIG)
    }

    #[test]
    fn splits_content_and_comment() {
        assert_eq!(split_comment("option: value  # comment"), "option: value");
        assert_eq!(split_comment("option: value"), "option: value");
        assert_eq!(split_comment("   "), "");
        assert_eq!(split_comment("# just a comment"), "");
    }

    #[test]
    fn escaped_hash_is_not_a_comment() {
        assert_eq!(split_comment(r"value: a\#b # real"), r"value: a\#b");
    }

    #[test]
    fn extracts_section_names() {
        assert_eq!(section_header("[section_name]"), Some("section_name"));
        assert_eq!(section_header("[ section_name ]"), Some("section_name"));
        assert_eq!(section_header("section_name"), None);
        assert_eq!(section_header("[incomplete"), None);
        assert_eq!(section_header("incomplete]"), None);
    }

    #[test]
    fn recognizes_include_directives() {
        assert_eq!(include_pattern("[include config.cfg]"), Some("config.cfg"));
        assert_eq!(include_pattern("[include  config.cfg  ]"), Some("config.cfg"));
        assert_eq!(include_pattern("[printer]"), None);
        assert_eq!(include_pattern("include config.cfg"), None);
    }

    #[test]
    fn parses_sections_and_options() {
        let source = MemorySource::new();
        let doc = parse_str(
            "[printer]\nkinematics: cartesian\nmax_velocity: 300\nmax_accel: 3000\n",
            Path::new("test.cfg"),
            &source,
        )
        .unwrap();

        assert_eq!(doc.len(), 1);
        let printer = doc.section("printer").unwrap();
        assert_eq!(printer.get("kinematics"), Some("cartesian"));
        assert_eq!(printer.get("max_velocity"), Some("300"));
        assert_eq!(printer.get("max_accel"), Some("3000"));
    }

    #[test]
    fn lowercases_section_names_and_option_keys() {
        let source = MemorySource::new();
        let doc = parse_str(
            "[Extruder]\nPID_Kp: 22.2\n",
            Path::new("test.cfg"),
            &source,
        )
        .unwrap();

        let extruder = doc.section("extruder").unwrap();
        assert_eq!(extruder.name(), "extruder");
        assert_eq!(extruder.get("pid_kp"), Some("22.2"));
    }

    #[test]
    fn later_option_value_wins_within_section() {
        let source = MemorySource::new();
        let doc = parse_str(
            "[printer]\nmax_velocity: 300\nmax_velocity: 500\n",
            Path::new("test.cfg"),
            &source,
        )
        .unwrap();

        assert_eq!(doc.section("printer").unwrap().get("max_velocity"), Some("500"));
    }

    #[test]
    fn later_section_block_replaces_earlier_one() {
        // Duplicate headers split across non-contiguous blocks in one file.
        let source = MemorySource::new();
        let doc = parse_str(
            "[printer]\nmax_velocity: 300\nmax_accel: 3000\n\n[stepper_x]\nstep_pin: PF0\n\n[printer]\nmax_velocity: 500\n",
            Path::new("test.cfg"),
            &source,
        )
        .unwrap();

        let printer = doc.section("printer").unwrap();
        assert_eq!(printer.get("max_velocity"), Some("500"));
        // The replacement is full, not a merge.
        assert_eq!(printer.get("max_accel"), None);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn resolves_includes() {
        let doc = parse_file(Path::new("test.cfg"), &sample_source()).unwrap();

        assert!(doc.has_section("printer"));
        assert!(doc.has_section("stepper_x"));
        assert!(doc.has_section("stepper_y"));
        assert!(doc.has_section("extruder"));

        let stepper_y = doc.section("stepper_y").unwrap();
        assert_eq!(stepper_y.get("step_pin"), Some("PF2"));
        assert_eq!(stepper_y.get("dir_pin"), Some("PF3"));

        assert_eq!(doc.includes(), &[PathBuf::from("other_config.cfg")]);
    }

    #[test]
    fn included_section_overwrites_earlier_one() {
        let source = MemorySource::new()
            .with_file(
                "main.cfg",
                "[fan]\npin: PA0\nmax_power: 0.5\n\n[include override.cfg]\n",
            )
            .with_file("override.cfg", "[fan]\npin: PB0\n");

        let doc = parse_file(Path::new("main.cfg"), &source).unwrap();

        let fan = doc.section("fan").unwrap();
        assert_eq!(fan.get("pin"), Some("PB0"));
        assert_eq!(fan.get("max_power"), None);
    }

    #[test]
    fn nested_includes_are_depth_first() {
        let source = MemorySource::new()
            .with_file("main.cfg", "[include a.cfg]\n[include b.cfg]\n")
            .with_file("a.cfg", "[include a_sub.cfg]\n[stepper_x]\nstep_pin: PF0\n")
            .with_file("a_sub.cfg", "[probe]\npin: PA1\n")
            .with_file("b.cfg", "[fan]\npin: PB0\n");

        let doc = parse_file(Path::new("main.cfg"), &source).unwrap();

        assert_eq!(
            doc.includes(),
            &[
                PathBuf::from("a.cfg"),
                PathBuf::from("a_sub.cfg"),
                PathBuf::from("b.cfg"),
            ]
        );
        assert!(doc.has_section("probe"));
        assert!(doc.has_section("stepper_x"));
        assert!(doc.has_section("fan"));
    }

    #[test]
    fn wildcard_includes_resolve_in_sorted_order() {
        let source = MemorySource::new()
            .with_file("main.cfg", "[include conf.d/*.cfg]\n")
            .with_file("conf.d/20-fan.cfg", "[fan]\npin: PB0\n")
            .with_file("conf.d/10-probe.cfg", "[probe]\npin: PA1\n");

        let doc = parse_file(Path::new("main.cfg"), &source).unwrap();

        assert_eq!(
            doc.includes(),
            &[
                PathBuf::from("conf.d/10-probe.cfg"),
                PathBuf::from("conf.d/20-fan.cfg"),
            ]
        );
    }

    #[test]
    fn wildcard_include_with_no_matches_is_allowed() {
        let source = MemorySource::new().with_file("main.cfg", "[include conf.d/*.cfg]\n[printer]\nkinematics: cartesian\n");

        let doc = parse_file(Path::new("main.cfg"), &source).unwrap();
        assert!(doc.includes().is_empty());
        assert!(doc.has_section("printer"));
    }

    #[test]
    fn missing_literal_include_is_an_error() {
        let source = MemorySource::new();
        let err = parse_str(
            "[printer]\nkinematics: cartesian\n[include nonexistent.cfg]\n",
            Path::new("test.cfg"),
            &source,
        )
        .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn self_include_is_rejected() {
        let source = MemorySource::new().with_file("test.cfg", "[include test.cfg]");
        let err = parse_file(Path::new("test.cfg"), &source).unwrap_err();

        assert!(err.to_string().contains("Recursive include"));
        assert!(err.to_string().contains("test.cfg"));
    }

    #[test]
    fn mutually_recursive_includes_are_rejected() {
        let source = MemorySource::new()
            .with_file("main.cfg", "[include sub.cfg]")
            .with_file("sub.cfg", "[include main.cfg]");

        let err = parse_file(Path::new("main.cfg"), &source).unwrap_err();
        assert!(err.to_string().contains("Recursive include"));
    }

    #[test]
    fn diamond_includes_are_not_cycles() {
        // Two branches including the same leaf is fine; only a chain that
        // re-enters a file currently being parsed is recursive.
        let source = MemorySource::new()
            .with_file("main.cfg", "[include a.cfg]\n[include b.cfg]\n")
            .with_file("a.cfg", "[include shared.cfg]\n")
            .with_file("b.cfg", "[include shared.cfg]\n")
            .with_file("shared.cfg", "[fan]\npin: PB0\n");

        let doc = parse_file(Path::new("main.cfg"), &source).unwrap();
        assert_eq!(
            doc.includes(),
            &[
                PathBuf::from("a.cfg"),
                PathBuf::from("shared.cfg"),
                PathBuf::from("b.cfg"),
                PathBuf::from("shared.cfg"),
            ]
        );
    }

    #[test]
    fn normalizes_crlf_line_endings() {
        let source = MemorySource::new();
        let doc = parse_str(
            "[printer]\r\nkinematics: cartesian\r\n",
            Path::new("test.cfg"),
            &source,
        )
        .unwrap();

        assert_eq!(doc.section("printer").unwrap().get("kinematics"), Some("cartesian"));
    }

    #[test]
    fn reparse_is_idempotent() {
        let source = sample_source();
        let first = parse_file(Path::new("test.cfg"), &source).unwrap();
        let second = parse_file(Path::new("test.cfg"), &source).unwrap();

        assert_eq!(first, second);
    }
}

//! Declarative condition evaluators.
//!
//! A [`Condition`] is one compiled check from a rule descriptor. The set of
//! condition kinds is closed; descriptors with an unrecognized type tag are
//! rejected at load time, never at evaluation time.
//!
//! Evaluators are pure and total: they read the document and produce
//! diagnostics. Malformed option values (e.g. a non-numeric value in a
//! `numeric_range` check) are reported as diagnostics, not faults.

use crate::config::ConfigDocument;
use crate::lint::diagnostic::LintDiagnostic;
use crate::lint::message::expand;
use crate::lint::rule::{LintContext, Severity};
use regex::Regex;
use std::collections::HashMap;

/// Whether `text` matches `re` starting at its first character.
///
/// Descriptor patterns are anchored at the start of the candidate, so
/// `stepper_` matches `stepper_x` but not `extruder_stepper_x`.
pub(crate) fn matches_start(re: &Regex, text: &str) -> bool {
    re.find(text).is_some_and(|m| m.start() == 0)
}

/// One compiled condition from a declarative rule descriptor.
#[derive(Debug, Clone)]
pub enum Condition {
    /// Each named section missing from the document yields a diagnostic.
    RequiredSections {
        sections: Vec<String>,
        message: String,
        severity: Severity,
    },
    /// Options whose name matches `option_pattern` must have a value
    /// matching `value_pattern`.
    RegexMatch {
        option_pattern: Regex,
        value_pattern: Regex,
        message: String,
        severity: Severity,
    },
    /// Every section name must match the pattern.
    SectionNamePattern {
        pattern: Regex,
        message: String,
        severity: Severity,
    },
    /// When `if_section` exists, `requires_section` must exist too.
    SectionDependency {
        if_section: String,
        requires_section: String,
        message: String,
        severity: Severity,
    },
    /// Named options must hold the same value across all sections whose
    /// name matches the pattern; the first matching section is the
    /// reference.
    OptionConsistency {
        section_pattern: Regex,
        options: Vec<String>,
        message: String,
        severity: Severity,
    },
    /// Named options must parse as numbers within their `(min, max)` range.
    NumericRange {
        options: Vec<String>,
        ranges: HashMap<String, (f64, f64)>,
        message: String,
        severity: Severity,
    },
}

impl Condition {
    /// The descriptor type tag this condition was compiled from.
    pub fn kind(&self) -> &'static str {
        match self {
            Condition::RequiredSections { .. } => "required_sections",
            Condition::RegexMatch { .. } => "regex_match",
            Condition::SectionNamePattern { .. } => "section_name_pattern",
            Condition::SectionDependency { .. } => "section_dependency",
            Condition::OptionConsistency { .. } => "option_consistency",
            Condition::NumericRange { .. } => "numeric_range",
        }
    }

    /// Evaluate this condition against a document.
    pub fn evaluate(&self, document: &ConfigDocument, ctx: &LintContext) -> Vec<LintDiagnostic> {
        match self {
            Condition::RequiredSections {
                sections,
                message,
                severity,
            } => sections
                .iter()
                .filter(|name| !document.has_section(name))
                .map(|name| {
                    LintDiagnostic::new(expand(message, &[("section", name)]), name, *severity)
                })
                .collect(),

            Condition::RegexMatch {
                option_pattern,
                value_pattern,
                message,
                severity,
            } => {
                let mut diagnostics = Vec::new();
                for section in document.sections() {
                    for (option, value) in section.options() {
                        if matches_start(option_pattern, option)
                            && !matches_start(value_pattern, value)
                        {
                            diagnostics.push(
                                LintDiagnostic::new(
                                    expand(
                                        message,
                                        &[
                                            ("value", value),
                                            ("option", option),
                                            ("section", section.name()),
                                        ],
                                    ),
                                    section.name(),
                                    *severity,
                                )
                                .with_option(option),
                            );
                        }
                    }
                }
                diagnostics
            }

            Condition::SectionNamePattern {
                pattern,
                message,
                severity,
            } => document
                .section_names()
                .filter(|name| !matches_start(pattern, name))
                .map(|name| {
                    LintDiagnostic::new(expand(message, &[("section", name)]), name, *severity)
                })
                .collect(),

            Condition::SectionDependency {
                if_section,
                requires_section,
                message,
                severity,
            } => {
                if document.has_section(if_section) && !document.has_section(requires_section) {
                    vec![LintDiagnostic::new(
                        expand(
                            message,
                            &[("section", if_section.as_str()), ("required", requires_section.as_str())],
                        ),
                        if_section,
                        *severity,
                    )]
                } else {
                    vec![]
                }
            }

            Condition::OptionConsistency {
                section_pattern,
                options,
                message,
                severity,
            } => {
                let matching: Vec<_> = document
                    .sections()
                    .filter(|s| matches_start(section_pattern, s.name()))
                    .collect();
                let Some((reference, rest)) = matching.split_first() else {
                    return vec![];
                };

                let mut diagnostics = Vec::new();
                for option in options {
                    let expected = reference.get(option);
                    for section in rest {
                        if section.get(option) != expected {
                            diagnostics.push(
                                LintDiagnostic::new(
                                    expand(
                                        message,
                                        &[("option", option.as_str()), ("section", section.name())],
                                    ),
                                    section.name(),
                                    *severity,
                                )
                                .with_option(option),
                            );
                        }
                    }
                }
                diagnostics
            }

            Condition::NumericRange {
                options,
                ranges,
                message,
                severity,
            } => {
                let mut diagnostics = Vec::new();
                for section in document.sections() {
                    for (option, value) in section.options() {
                        if !options.iter().any(|o| o == option) {
                            continue;
                        }
                        let parsed: f64 = match value.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                diagnostics.push(
                                    LintDiagnostic::new(
                                        format!("Invalid numeric value for {}: {}", option, value),
                                        section.name(),
                                        *severity,
                                    )
                                    .with_option(option),
                                );
                                continue;
                            }
                        };
                        let range = ctx
                            .range_overrides
                            .get(option)
                            .or_else(|| ranges.get(option))
                            .copied();
                        let Some((min, max)) = range else { continue };
                        if parsed < min || parsed > max {
                            diagnostics.push(
                                LintDiagnostic::new(
                                    expand(
                                        message,
                                        &[
                                            ("option", option),
                                            ("value", parsed.to_string().as_str()),
                                            ("min", min.to_string().as_str()),
                                            ("max", max.to_string().as_str()),
                                            ("section", section.name()),
                                        ],
                                    ),
                                    section.name(),
                                    *severity,
                                )
                                .with_option(option),
                            );
                        }
                    }
                }
                diagnostics
            }
        }
    }
}

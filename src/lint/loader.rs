//! Loading declarative rules from YAML descriptors.
//!
//! Each descriptor file defines one rule: `name`, `category`,
//! `description`, optional `examples`/`fix_suggestions`, and a list of
//! `conditions`. Descriptors are validated exhaustively at load time; a
//! malformed descriptor aborts the whole directory load rather than being
//! skipped, so a rule set either loads completely or not at all.

use crate::config::ConfigDocument;
use crate::error::{PrintcheckError, Result};
use crate::lint::condition::Condition;
use crate::lint::diagnostic::LintDiagnostic;
use crate::lint::rule::{LintContext, LintRule, RuleCategory, RuleDocumentation, Severity};
use include_dir::{include_dir, Dir};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Rule descriptors shipped with the binary.
static BUILTIN_RULES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/rules");

/// A rule compiled from a declarative descriptor.
///
/// Its check concatenates the diagnostics of all conditions in
/// descriptor order.
pub struct DeclaredRule {
    name: String,
    category: RuleCategory,
    docs: RuleDocumentation,
    conditions: Vec<Condition>,
}

impl DeclaredRule {
    /// The compiled conditions, in descriptor order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}

impl LintRule for DeclaredRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> RuleCategory {
        self.category
    }

    fn docs(&self) -> &RuleDocumentation {
        &self.docs
    }

    fn check(&self, document: &ConfigDocument, ctx: &LintContext) -> Vec<LintDiagnostic> {
        self.conditions
            .iter()
            .flat_map(|condition| condition.evaluate(document, ctx))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RawRule {
    name: Option<String>,
    category: Option<String>,
    description: Option<String>,
    #[serde(default)]
    examples: RawExamples,
    #[serde(default)]
    fix_suggestions: Vec<String>,
    conditions: Option<Vec<serde_yaml::Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawExamples {
    #[serde(default)]
    valid: Vec<String>,
    #[serde(default)]
    invalid: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawRequiredSections {
    sections: Vec<String>,
    error_message: String,
    #[serde(default)]
    severity: Severity,
}

#[derive(Debug, Deserialize)]
struct RawRegexMatch {
    pattern: String,
    value_pattern: String,
    error_message: String,
    #[serde(default)]
    severity: Severity,
}

#[derive(Debug, Deserialize)]
struct RawSectionNamePattern {
    pattern: String,
    error_message: String,
    #[serde(default)]
    severity: Severity,
}

#[derive(Debug, Deserialize)]
struct RawSectionDependency {
    if_section: String,
    requires_section: String,
    error_message: String,
    #[serde(default)]
    severity: Severity,
}

#[derive(Debug, Deserialize)]
struct RawOptionConsistency {
    section_pattern: String,
    options: Vec<String>,
    error_message: String,
    #[serde(default)]
    severity: Severity,
}

#[derive(Debug, Deserialize)]
struct RawNumericRange {
    options: Vec<String>,
    ranges: HashMap<String, (f64, f64)>,
    error_message: String,
    #[serde(default)]
    severity: Severity,
}

/// Compile one rule from YAML descriptor text.
///
/// `origin` names the descriptor in error messages.
pub fn rule_from_yaml(content: &str, origin: &str) -> Result<Box<dyn LintRule>> {
    let raw: RawRule =
        serde_yaml::from_str(content).map_err(|e| PrintcheckError::RuleParse {
            file: origin.to_string(),
            message: e.to_string(),
        })?;

    let name = raw.name.ok_or_else(|| missing_field("name", origin))?;
    let category_name = raw.category.ok_or_else(|| missing_field("category", origin))?;
    let description = raw
        .description
        .ok_or_else(|| missing_field("description", origin))?;
    let raw_conditions = raw
        .conditions
        .ok_or_else(|| missing_field("conditions", origin))?;

    let category: RuleCategory =
        category_name
            .parse()
            .map_err(|()| PrintcheckError::InvalidCategory {
                category: category_name.clone(),
                file: origin.to_string(),
            })?;

    let conditions = raw_conditions
        .iter()
        .map(|value| compile_condition(value, origin))
        .collect::<Result<Vec<_>>>()?;

    let mut examples = Vec::new();
    examples.extend(raw.examples.valid.iter().map(|ex| format!("valid:\n{ex}")));
    examples.extend(raw.examples.invalid.iter().map(|ex| format!("invalid:\n{ex}")));

    Ok(Box::new(DeclaredRule {
        name,
        category,
        docs: RuleDocumentation {
            description,
            examples,
            fix_suggestions: raw.fix_suggestions,
        },
        conditions,
    }))
}

fn missing_field(field: &'static str, origin: &str) -> PrintcheckError {
    PrintcheckError::MissingRuleField {
        field,
        file: origin.to_string(),
    }
}

fn compile_condition(value: &serde_yaml::Value, origin: &str) -> Result<Condition> {
    let kind = value
        .get("type")
        .and_then(serde_yaml::Value::as_str)
        .ok_or_else(|| PrintcheckError::RuleParse {
            file: origin.to_string(),
            message: "condition is missing a 'type' tag".to_string(),
        })?;

    match kind {
        "required_sections" => {
            let raw: RawRequiredSections = from_value(value, origin)?;
            Ok(Condition::RequiredSections {
                sections: raw.sections,
                message: raw.error_message,
                severity: raw.severity,
            })
        }
        "regex_match" => {
            let raw: RawRegexMatch = from_value(value, origin)?;
            Ok(Condition::RegexMatch {
                option_pattern: compile_pattern(&raw.pattern, origin)?,
                value_pattern: compile_pattern(&raw.value_pattern, origin)?,
                message: raw.error_message,
                severity: raw.severity,
            })
        }
        "section_name_pattern" => {
            let raw: RawSectionNamePattern = from_value(value, origin)?;
            Ok(Condition::SectionNamePattern {
                pattern: compile_pattern(&raw.pattern, origin)?,
                message: raw.error_message,
                severity: raw.severity,
            })
        }
        "section_dependency" => {
            let raw: RawSectionDependency = from_value(value, origin)?;
            Ok(Condition::SectionDependency {
                if_section: raw.if_section,
                requires_section: raw.requires_section,
                message: raw.error_message,
                severity: raw.severity,
            })
        }
        "option_consistency" => {
            let raw: RawOptionConsistency = from_value(value, origin)?;
            Ok(Condition::OptionConsistency {
                section_pattern: compile_pattern(&raw.section_pattern, origin)?,
                options: raw.options,
                message: raw.error_message,
                severity: raw.severity,
            })
        }
        "numeric_range" => {
            let raw: RawNumericRange = from_value(value, origin)?;
            Ok(Condition::NumericRange {
                options: raw.options,
                ranges: raw.ranges,
                message: raw.error_message,
                severity: raw.severity,
            })
        }
        other => Err(PrintcheckError::UnknownConditionType {
            kind: other.to_string(),
            file: origin.to_string(),
        }),
    }
}

fn from_value<T: serde::de::DeserializeOwned>(
    value: &serde_yaml::Value,
    origin: &str,
) -> Result<T> {
    serde_yaml::from_value(value.clone()).map_err(|e| PrintcheckError::RuleParse {
        file: origin.to_string(),
        message: e.to_string(),
    })
}

fn compile_pattern(pattern: &str, origin: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| PrintcheckError::RuleParse {
        file: origin.to_string(),
        message: format!("invalid pattern '{pattern}': {e}"),
    })
}

/// Load every rule descriptor (`*.yaml` / `*.yml`) in a directory.
///
/// Files are visited in sorted name order so the resulting rule order is
/// deterministic.
pub fn load_rules_from_dir(dir: &Path) -> Result<Vec<Box<dyn LintRule>>> {
    tracing::info!(directory = %dir.display(), "loading rules");
    if !dir.is_dir() {
        return Err(PrintcheckError::RulesDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("yaml" | "yml")
            )
        })
        .collect();
    paths.sort();

    let mut rules = Vec::new();
    for path in paths {
        tracing::debug!(file = %path.display(), "loading rule");
        let content = fs::read_to_string(&path)?;
        rules.push(rule_from_yaml(&content, &path.display().to_string())?);
    }
    tracing::info!(count = rules.len(), "loaded rules");
    Ok(rules)
}

/// The built-in rule set embedded in the binary.
pub fn builtin_rules() -> Result<Vec<Box<dyn LintRule>>> {
    let mut files: Vec<_> = BUILTIN_RULES_DIR
        .files()
        .filter(|file| {
            matches!(
                file.path().extension().and_then(|ext| ext.to_str()),
                Some("yaml" | "yml")
            )
        })
        .collect();
    files.sort_by_key(|file| file.path().to_path_buf());

    let mut rules = Vec::new();
    for file in files {
        let origin = file.path().display().to_string();
        let content = file
            .contents_utf8()
            .ok_or_else(|| PrintcheckError::RuleParse {
                file: origin.clone(),
                message: "invalid UTF-8".to_string(),
            })?;
        rules.push(rule_from_yaml(content, &origin)?);
    }
    Ok(rules)
}

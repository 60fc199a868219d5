//! End-to-end tests for the lint engine over the standard rule set.

use printcheck::config::{parse_str, ConfigDocument, LinterSettings, MemorySource};
use printcheck::lint::{Linter, Severity};
use std::path::Path;

fn doc(text: &str) -> ConfigDocument {
    parse_str(text, Path::new("printer.cfg"), &MemorySource::new()).unwrap()
}

fn standard_linter() -> Linter {
    Linter::configured(&LinterSettings::default()).unwrap()
}

#[test]
fn clean_config_produces_no_diagnostics() {
    let linter = standard_linter();
    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\nmax_velocity: 300\nmax_accel: 3000\n"),
        &LinterSettings::default(),
    );
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
}

#[test]
fn missing_printer_section_yields_one_required_section_diagnostic() {
    let linter = standard_linter();
    let diags = linter.lint(
        &doc("[stepper_x]\nstep_pin: PF0\nmicrosteps: 16\n"),
        &LinterSettings::default(),
    );

    let required: Vec<_> = diags
        .iter()
        .filter(|d| d.message.starts_with("Missing required section"))
        .collect();
    assert_eq!(required.len(), 1);
    assert_eq!(required[0].message, "Missing required section: printer");
    assert_eq!(required[0].section, "printer");
}

#[test]
fn invalid_pin_yields_one_pin_syntax_diagnostic() {
    let linter = standard_linter();
    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\n\n[stepper_x]\nstep_pin: invalid_pin\nmicrosteps: 16\n"),
        &LinterSettings::default(),
    );

    let pin: Vec<_> = diags
        .iter()
        .filter(|d| d.message.contains("Invalid pin format"))
        .collect();
    assert_eq!(pin.len(), 1);
    assert!(pin[0].message.contains("invalid_pin"));
    assert_eq!(pin[0].section, "stepper_x");
    assert_eq!(pin[0].option.as_deref(), Some("step_pin"));
    assert_eq!(pin[0].severity, Severity::Error);
}

#[test]
fn inconsistent_microsteps_yield_one_diagnostic_naming_the_divergent_section() {
    let linter = standard_linter();
    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\n\n[stepper_x]\nstep_pin: PF0\nmicrosteps: 16\n\n[stepper_y]\nstep_pin: PF2\nmicrosteps: 32\n"),
        &LinterSettings::default(),
    );

    let inconsistent: Vec<_> = diags
        .iter()
        .filter(|d| d.message.contains("Inconsistent"))
        .collect();
    assert_eq!(inconsistent.len(), 1);
    assert_eq!(inconsistent[0].section, "stepper_y");
    assert_eq!(inconsistent[0].option.as_deref(), Some("microsteps"));
}

#[test]
fn pid_extruder_missing_gain_is_reported_regardless_of_source_casing() {
    let linter = standard_linter();
    // Keys keep their source casing in the file but are normalized at
    // parse time, so the lookup for pid_kp is case-insensitive.
    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\n\n[extruder]\nheater_pin: PA1\nsensor_type: x\nsensor_pin: PF0\nmin_temp: 0\nmax_temp: 250\nControl: PID\npid_Ki: 1.08\npid_Kd: 114\n\n[fan]\npin: PB0\n"),
        &LinterSettings::default(),
    );

    let pid: Vec<_> = diags
        .iter()
        .filter(|d| d.message.starts_with("PID control requires"))
        .collect();
    assert_eq!(pid.len(), 1);
    assert_eq!(pid[0].message, "PID control requires PID_KP");
    assert_eq!(pid[0].section, "extruder");
}

#[test]
fn out_of_range_velocity_is_reported() {
    let linter = standard_linter();
    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\nmax_velocity: 1500\n"),
        &LinterSettings::default(),
    );

    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.contains("max_velocity"));
    assert!(diags[0].message.contains("[0, 1000]"));
}

#[test]
fn range_overrides_tighten_declared_ranges() {
    let linter = standard_linter();
    let mut settings = LinterSettings::default();
    settings
        .range_overrides
        .insert("max_velocity".to_string(), (0.0, 200.0));

    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\nmax_velocity: 300\n"),
        &settings,
    );

    assert_eq!(diags.len(), 1);
    assert!(diags[0].message.contains("[0, 200]"));
}

#[test]
fn warnings_as_errors_rewrites_only_warning_severities() {
    let linter = standard_linter();
    let text = "[printer]\nkinematics: cartesian\n\n[stepper_x]\nstep_pin: PF0\nmicrosteps: 16\n\n[stepper_y]\nstep_pin: PF2\nmicrosteps: 32\n";

    let plain = linter.lint(&doc(text), &LinterSettings::default());
    let escalated = linter.lint(
        &doc(text),
        &LinterSettings {
            warnings_as_errors: true,
            ..Default::default()
        },
    );

    assert_eq!(plain.len(), escalated.len());
    for (before, after) in plain.iter().zip(escalated.iter()) {
        assert_eq!(before.message, after.message);
        assert_eq!(before.section, after.section);
        match before.severity {
            Severity::Warning => assert_eq!(after.severity, Severity::Error),
            other => assert_eq!(after.severity, other),
        }
    }
    assert!(escalated.iter().any(|d| d.severity == Severity::Error));
}

#[test]
fn ignored_rules_do_not_affect_other_rules() {
    let linter = standard_linter();
    let text = "[stepper_x]\nstep_pin: invalid_pin\nmicrosteps: 16\n";

    let mut settings = LinterSettings::default();
    settings.ignore_rules.insert("required-sections".to_string());

    let diags = linter.lint(&doc(text), &settings);

    assert!(!diags
        .iter()
        .any(|d| d.message.starts_with("Missing required section")));
    assert!(diags.iter().any(|d| d.message.contains("Invalid pin format")));
}

#[test]
fn bed_mesh_without_probe_is_reported() {
    let linter = standard_linter();
    let diags = linter.lint(
        &doc("[printer]\nkinematics: cartesian\n\n[bed_mesh]\nspeed: 120\n"),
        &LinterSettings::default(),
    );

    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].message,
        "Section [bed_mesh] requires a [probe] section"
    );
    assert_eq!(diags[0].section, "bed_mesh");
}

#[test]
fn diagnostics_from_one_rule_stay_contiguous() {
    let linter = standard_linter();
    // Two pin violations and one missing section; the pin diagnostics
    // must appear next to each other, in document order.
    let diags = linter.lint(
        &doc("[stepper_x]\nstep_pin: bad1\ndir_pin: bad2\nmicrosteps: 16\n"),
        &LinterSettings::default(),
    );

    let pin_positions: Vec<_> = diags
        .iter()
        .enumerate()
        .filter(|(_, d)| d.message.contains("Invalid pin format"))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(pin_positions.len(), 2);
    assert_eq!(pin_positions[1], pin_positions[0] + 1);
    assert!(diags[pin_positions[0]].message.contains("bad1"));
    assert!(diags[pin_positions[1]].message.contains("bad2"));
}

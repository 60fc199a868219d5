//! Heater configuration safety checks.
//!
//! This rule is too semantically rich for the declarative condition
//! language: it branches on the control method and the sensor type, and
//! cross-references cooling and MCU sections.

use crate::config::{ConfigDocument, ConfigSection};
use crate::lint::diagnostic::LintDiagnostic;
use crate::lint::rule::{LintContext, LintRule, RuleCategory, RuleDocumentation, Severity};

const VALID_HEATER_CONFIG: &str = "\
[extruder]
heater_pin: PA1
sensor_type: EPCOS 100K B57560G104F
sensor_pin: PF0
control: pid
pid_Kp: 22.2
pid_Ki: 1.08
pid_Kd: 114
min_temp: 0
max_temp: 250
max_power: 1.0

[heater_bed]
heater_pin: PB0
sensor_type: NTC 100K MGB18-104F39050L32
sensor_pin: PF3
control: watermark
min_temp: 0
max_temp: 120
";

const REQUIRED_OPTIONS: [&str; 5] = [
    "heater_pin",
    "sensor_type",
    "sensor_pin",
    "min_temp",
    "max_temp",
];
const PID_OPTIONS: [&str; 3] = ["pid_kp", "pid_ki", "pid_kd"];
const DEFAULT_MAX_DELTA: &str = "2.0";

/// Safe `max_temp` ceilings for known sensor types.
const SENSOR_TEMP_LIMITS: [(&str, f64); 3] = [
    ("EPCOS 100K B57560G104F", 280.0),
    ("ATC Semitec 104GT-2", 300.0),
    ("SliceEngineering 450", 450.0),
];

fn is_heater_section(name: &str) -> bool {
    name.starts_with("extruder") || name == "heater_bed"
}

/// Validates heater configuration: safety limits, sensors, cooling, and
/// PWM settings.
pub struct HeaterSafetyRule {
    docs: RuleDocumentation,
}

impl HeaterSafetyRule {
    pub fn new() -> Self {
        Self {
            docs: RuleDocumentation {
                description:
                    "Validates heater configuration including safety limits, sensors, and PWM settings"
                        .to_string(),
                examples: vec![VALID_HEATER_CONFIG.to_string()],
                fix_suggestions: vec![
                    "Ensure all required options are present".to_string(),
                    "Check sensor type temperature limits".to_string(),
                    "Configure appropriate cooling".to_string(),
                ],
            },
        }
    }
}

impl Default for HeaterSafetyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl LintRule for HeaterSafetyRule {
    fn name(&self) -> &str {
        "heater-safety"
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Safety
    }

    fn docs(&self) -> &RuleDocumentation {
        &self.docs
    }

    fn check(&self, document: &ConfigDocument, _ctx: &LintContext) -> Vec<LintDiagnostic> {
        let heater_sections: Vec<_> = document
            .sections()
            .filter(|section| is_heater_section(section.name()))
            .collect();

        let mut diagnostics = Vec::new();
        for section in &heater_sections {
            diagnostics.extend(check_required_options(section));

            let control = section.get("control").unwrap_or("").to_lowercase();
            match control.as_str() {
                "pid" => diagnostics.extend(check_pid_config(section)),
                "watermark" => diagnostics.extend(check_watermark_config(section)),
                _ => diagnostics.push(
                    LintDiagnostic::new(
                        format!("Missing required 'control' option in {}", section.name()),
                        section.name(),
                        Severity::Error,
                    )
                    .with_option("control"),
                ),
            }

            diagnostics.extend(check_temperature_limits(section));
            diagnostics.extend(check_power_settings(section));
            diagnostics.extend(check_cooling_config(document, section.name()));
        }

        if !heater_sections.is_empty() {
            if let Some(mcu) = document.section("mcu") {
                diagnostics.extend(check_pwm_frequency(mcu));
            }
        }

        diagnostics
    }
}

fn check_required_options(section: &ConfigSection) -> Vec<LintDiagnostic> {
    REQUIRED_OPTIONS
        .iter()
        .filter(|option| !section.contains(option))
        .map(|option| {
            LintDiagnostic::new(
                format!("Missing required heater option: {option}"),
                section.name(),
                Severity::Error,
            )
            .with_option(*option)
        })
        .collect()
}

fn check_pid_config(section: &ConfigSection) -> Vec<LintDiagnostic> {
    PID_OPTIONS
        .iter()
        .filter(|option| !section.contains(option))
        .map(|option| {
            // Gains are conventionally written pid_Kp etc.; report uppercase.
            let display = option.to_uppercase();
            LintDiagnostic::new(
                format!("PID control requires {display}"),
                section.name(),
                Severity::Error,
            )
            .with_option(display)
        })
        .collect()
}

fn check_watermark_config(section: &ConfigSection) -> Vec<LintDiagnostic> {
    let mut diagnostics = Vec::new();

    if !section.contains("max_temp") {
        diagnostics.push(
            LintDiagnostic::new(
                "Watermark control requires 'max_temp' option",
                section.name(),
                Severity::Error,
            )
            .with_option("max_temp"),
        );
    }

    let max_delta = section.get("max_delta").unwrap_or(DEFAULT_MAX_DELTA);
    match max_delta.parse::<f64>() {
        Ok(value) if value <= 0.0 => diagnostics.push(
            LintDiagnostic::new(
                format!("max_delta must be positive, got {value}"),
                section.name(),
                Severity::Error,
            )
            .with_option("max_delta"),
        ),
        Ok(_) => {}
        Err(_) => diagnostics.push(
            LintDiagnostic::new(
                format!("Invalid max_delta value: {max_delta}"),
                section.name(),
                Severity::Error,
            )
            .with_option("max_delta"),
        ),
    }

    diagnostics
}

fn check_temperature_limits(section: &ConfigSection) -> Vec<LintDiagnostic> {
    let Some(sensor_type) = section.get("sensor_type") else {
        return vec![];
    };
    let Some(&(_, limit)) = SENSOR_TEMP_LIMITS
        .iter()
        .find(|(name, _)| *name == sensor_type)
    else {
        return vec![];
    };

    let raw = section.get("max_temp").unwrap_or("0");
    match raw.parse::<f64>() {
        Ok(max_temp) if max_temp > limit => vec![LintDiagnostic::new(
            format!(
                "Max temperature {max_temp} exceeds safe value ({limit}) for sensor {sensor_type}"
            ),
            section.name(),
            Severity::Error,
        )
        .with_option("max_temp")],
        Ok(_) => vec![],
        Err(_) => vec![LintDiagnostic::new(
            format!("Invalid max_temp value: {raw}"),
            section.name(),
            Severity::Error,
        )
        .with_option("max_temp")],
    }
}

fn check_power_settings(section: &ConfigSection) -> Vec<LintDiagnostic> {
    let raw = section.get("max_power").unwrap_or("1.0");
    match raw.parse::<f64>() {
        Ok(max_power) if !(0.0..=1.0).contains(&max_power) => vec![LintDiagnostic::new(
            format!("max_power must be between 0 and 1, got {max_power}"),
            section.name(),
            Severity::Error,
        )
        .with_option("max_power")],
        Ok(_) => vec![],
        Err(_) => vec![LintDiagnostic::new(
            format!("Invalid max_power value: {raw}"),
            section.name(),
            Severity::Error,
        )
        .with_option("max_power")],
    }
}

fn check_cooling_config(document: &ConfigDocument, heater_section: &str) -> Vec<LintDiagnostic> {
    // Only extruders need a cooling fan; a heated bed does not.
    if !heater_section.starts_with("extruder") {
        return vec![];
    }

    let has_cooling = document.has_section("fan")
        || document.has_section(&format!("heater_fan {heater_section}"));
    if has_cooling {
        return vec![];
    }

    vec![LintDiagnostic::new(
        format!("Extruder {heater_section} requires at least one cooling fan"),
        heater_section,
        Severity::Error,
    )]
}

fn check_pwm_frequency(mcu_section: &ConfigSection) -> Vec<LintDiagnostic> {
    let raw = mcu_section.get("pwm_frequency").unwrap_or("0");
    match raw.parse::<f64>() {
        // 0 means no PWM; anything else must be at least 100 Hz.
        Ok(freq) if freq > 0.0 && freq < 100.0 => vec![LintDiagnostic::new(
            format!("PWM frequency must be at least 100Hz if used, got {freq}Hz"),
            "mcu",
            Severity::Error,
        )
        .with_option("pwm_frequency")],
        Ok(_) => vec![],
        Err(_) => vec![LintDiagnostic::new(
            format!("Invalid PWM frequency: {raw}"),
            "mcu",
            Severity::Error,
        )
        .with_option("pwm_frequency")],
    }
}

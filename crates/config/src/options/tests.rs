use super::*;
use crate::ParsedConfig;

fn parse(body: &str) -> ParsedConfig {
	Config::parse(&format!("options {{\n{body}\n}}")).unwrap()
}

/// An invalid enum value warns once and leaves the default in place.
#[test]
fn invalid_enum_value_resets_to_default() {
	let parsed = parse(r#"display-mode "sideways""#);
	assert_eq!(parsed.config.display_mode, DisplayMode::Compressed);
	assert_eq!(parsed.warnings.len(), 1);
	assert!(matches!(
		&parsed.warnings[0],
		ConfigWarning::InvalidValue { option, .. } if option == "display-mode"
	));
}

#[test]
fn enum_values_are_case_insensitive() {
	let parsed = parse(r#"display-mode "Fold"
dim-mode "NONE""#);
	assert!(parsed.warnings.is_empty());
	assert_eq!(parsed.config.display_mode, DisplayMode::Fold);
	assert_eq!(parsed.config.dim_mode, DimMode::None);
}

/// A bad option does not disturb the valid ones around it.
#[test]
fn bad_option_does_not_affect_neighbours() {
	let parsed = parse(
		r#"reveal-mode "comment"
debounce-ms "fast"
auto-enable #true"#,
	);
	assert_eq!(parsed.config.reveal_mode, RevealMode::Comment);
	assert_eq!(parsed.config.debounce_ms, 200);
	assert!(parsed.config.auto_enable);
	assert_eq!(
		parsed.warnings,
		vec![ConfigWarning::TypeMismatch {
			option: "debounce-ms".to_string(),
			expected: "integer",
			got: "string",
		}]
	);
}

#[test]
fn out_of_range_integer_is_rejected() {
	let parsed = parse("max-association-distance -1\nsweep-interval-ms 10");
	assert_eq!(parsed.config.max_association_distance, 3);
	assert_eq!(parsed.config.sweep_interval_ms, 5_000);
	assert_eq!(parsed.warnings.len(), 2);
}

#[test]
fn unknown_option_suggests_closest_key() {
	let parsed = parse(r#"dispaly-mode "fold""#);
	assert_eq!(
		parsed.warnings,
		vec![ConfigWarning::UnknownOption {
			key: "dispaly-mode".to_string(),
			suggestion: Some("display-mode".to_string()),
		}]
	);
	assert_eq!(parsed.config, Config::default());
}

#[test]
fn option_without_value_warns() {
	let parsed = parse("auto-enable");
	assert_eq!(parsed.warnings, vec![ConfigWarning::MissingValue { option: "auto-enable".to_string() }]);
}

#[test]
fn error_identifier_must_be_an_identifier() {
	let parsed = parse(r#"error-identifier "not valid""#);
	assert_eq!(parsed.config.error_identifier, "err");
	assert_eq!(parsed.warnings.len(), 1);

	assert!(is_identifier("_e2"));
	assert!(is_identifier("erreur"));
	assert!(!is_identifier(""));
	assert!(!is_identifier("2err"));
	assert!(!is_identifier("err\")"));
}

#[test]
fn warnings_render_for_display() {
	let warning = ConfigWarning::InvalidValue {
		option: "dim-mode".to_string(),
		value: "\"blur\"".to_string(),
		expected: DimMode::EXPECTED,
	};
	assert_eq!(
		warning.to_string(),
		"invalid value \"blur\" for 'dim-mode' (expected \"conceal\", \"comment\" or \"none\"); using the default"
	);
}

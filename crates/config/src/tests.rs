use std::io::Write;

use super::*;

#[test]
fn empty_document_yields_defaults() {
	let parsed = Config::parse("").unwrap();
	assert_eq!(parsed.config, Config::default());
	assert!(parsed.warnings.is_empty());
}

#[test]
fn defaults_match_documented_values() {
	let config = Config::default();
	assert_eq!(config.display_mode, DisplayMode::Compressed);
	assert_eq!(config.dim_mode, DimMode::Conceal);
	assert_eq!(config.reveal_mode, RevealMode::Normal);
	assert!(!config.auto_enable);
	assert_eq!(config.error_identifier, "err");
	assert_eq!(config.max_association_distance, 3);
	assert_eq!(config.debounce(), Duration::from_millis(200));
	assert_eq!(config.sweep_interval(), Duration::from_secs(5));
}

#[test]
fn full_options_block_is_applied() {
	let parsed = Config::parse(
		r#"
options {
    display-mode "full"
    dim-mode "comment"
    reveal-mode "conceal"
    auto-enable #true
    error-identifier "e"
    max-association-distance 5
    debounce-ms 50
    sweep-interval-ms 1000
}
"#,
	)
	.unwrap();

	assert!(parsed.warnings.is_empty(), "unexpected warnings: {:?}", parsed.warnings);
	let config = parsed.config;
	assert_eq!(config.display_mode, DisplayMode::Full);
	assert_eq!(config.dim_mode, DimMode::Comment);
	assert_eq!(config.reveal_mode, RevealMode::Conceal);
	assert!(config.auto_enable);
	assert_eq!(config.error_identifier, "e");
	assert_eq!(config.max_association_distance, 5);
	assert_eq!(config.debounce_ms, 50);
	assert_eq!(config.sweep_interval_ms, 1000);
}

#[test]
fn kdl_syntax_error_is_fatal() {
	let result = Config::parse("options {");
	assert!(matches!(result, Err(ConfigError::Kdl(_))));
}

#[test]
fn load_reads_file_from_disk() {
	let mut file = tempfile::NamedTempFile::new().unwrap();
	writeln!(file, "options {{\n    display-mode \"fold\"\n}}").unwrap();

	let parsed = Config::load(file.path()).unwrap();
	assert_eq!(parsed.config.display_mode, DisplayMode::Fold);
}

#[test]
fn load_missing_file_reports_path() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("absent.kdl");
	match Config::load(&path) {
		Err(ConfigError::Io { path: reported, .. }) => assert_eq!(reported, path),
		other => panic!("expected Io error, got {other:?}"),
	}
}

//! `options { }` block parsing.
//!
//! Each option is validated on its own. A bad value produces a
//! [`ConfigWarning`] and leaves that option at its default, so one typo never
//! disables the rest of the configuration.

use std::str::FromStr;

use kdl::{KdlNode, KdlValue};

use crate::error::ConfigWarning;
use crate::modes::{DimMode, DisplayMode, RevealMode};
use crate::Config;

#[cfg(test)]
mod tests;

/// Every key recognised inside the `options` block.
pub const OPTION_KEYS: &[&str] = &[
	"display-mode",
	"dim-mode",
	"reveal-mode",
	"auto-enable",
	"error-identifier",
	"max-association-distance",
	"debounce-ms",
	"sweep-interval-ms",
];

const MAX_ASSOCIATION_DISTANCE: i128 = 1_000;
const MAX_DEBOUNCE_MS: i128 = 10_000;
const MIN_SWEEP_INTERVAL_MS: i128 = 100;
const MAX_SWEEP_INTERVAL_MS: i128 = 600_000;

/// Result of parsing options, including any non-fatal warnings.
#[derive(Debug)]
pub struct ParsedOptions {
	pub config: Config,
	pub warnings: Vec<ConfigWarning>,
}

/// Applies every child of `node` onto a default [`Config`].
pub fn parse_options(node: &KdlNode) -> ParsedOptions {
	let mut config = Config::default();
	let mut warnings = Vec::new();

	let Some(children) = node.children() else {
		return ParsedOptions { config, warnings };
	};

	for opt_node in children.nodes() {
		let key = opt_node.name().value();
		if !OPTION_KEYS.contains(&key) {
			warnings.push(ConfigWarning::UnknownOption {
				key: key.to_string(),
				suggestion: suggest_option(key),
			});
			continue;
		}

		let Some(value) = opt_node.entries().iter().find(|e| e.name().is_none()).map(|e| e.value()) else {
			warnings.push(ConfigWarning::MissingValue { option: key.to_string() });
			continue;
		};

		if let Err(warning) = apply_option(&mut config, key, value) {
			warnings.push(warning);
		}
	}

	ParsedOptions { config, warnings }
}

fn apply_option(config: &mut Config, key: &str, value: &KdlValue) -> Result<(), ConfigWarning> {
	match key {
		"display-mode" => config.display_mode = parse_enum(key, value, DisplayMode::EXPECTED)?,
		"dim-mode" => config.dim_mode = parse_enum(key, value, DimMode::EXPECTED)?,
		"reveal-mode" => config.reveal_mode = parse_enum(key, value, RevealMode::EXPECTED)?,
		"auto-enable" => {
			config.auto_enable = value.as_bool().ok_or_else(|| mismatch(key, "bool", value))?;
		}
		"error-identifier" => {
			let ident = value.as_string().ok_or_else(|| mismatch(key, "string", value))?;
			if !is_identifier(ident) {
				return Err(invalid(key, value, "a non-empty identifier"));
			}
			config.error_identifier = ident.to_string();
		}
		"max-association-distance" => {
			config.max_association_distance = parse_int(key, value, 0, MAX_ASSOCIATION_DISTANCE, "an integer in 0..=1000")? as usize;
		}
		"debounce-ms" => {
			config.debounce_ms = parse_int(key, value, 0, MAX_DEBOUNCE_MS, "an integer in 0..=10000")? as u64;
		}
		"sweep-interval-ms" => {
			config.sweep_interval_ms = parse_int(key, value, MIN_SWEEP_INTERVAL_MS, MAX_SWEEP_INTERVAL_MS, "an integer in 100..=600000")? as u64;
		}
		_ => {
			return Err(ConfigWarning::UnknownOption {
				key: key.to_string(),
				suggestion: suggest_option(key),
			});
		}
	}
	Ok(())
}

fn parse_enum<T: FromStr>(key: &str, value: &KdlValue, expected: &'static str) -> Result<T, ConfigWarning> {
	let raw = value.as_string().ok_or_else(|| mismatch(key, "string", value))?;
	raw.parse().map_err(|_| invalid(key, value, expected))
}

fn parse_int(key: &str, value: &KdlValue, min: i128, max: i128, expected: &'static str) -> Result<i128, ConfigWarning> {
	let raw = value.as_integer().ok_or_else(|| mismatch(key, "integer", value))?;
	if !(min..=max).contains(&raw) {
		return Err(invalid(key, value, expected));
	}
	Ok(raw)
}

fn mismatch(key: &str, expected: &'static str, value: &KdlValue) -> ConfigWarning {
	ConfigWarning::TypeMismatch {
		option: key.to_string(),
		expected,
		got: value_type_name(value),
	}
}

fn invalid(key: &str, value: &KdlValue, expected: &'static str) -> ConfigWarning {
	ConfigWarning::InvalidValue {
		option: key.to_string(),
		value: value.to_string(),
		expected,
	}
}

/// Returns a human-readable name for a KDL value's type.
fn value_type_name(value: &KdlValue) -> &'static str {
	if value.as_string().is_some() {
		"string"
	} else if value.as_integer().is_some() {
		"integer"
	} else if value.as_float().is_some() {
		"float"
	} else if value.as_bool().is_some() {
		"bool"
	} else {
		"null"
	}
}

/// True for an identifier the Go grammar would accept as a variable name.
pub fn is_identifier(ident: &str) -> bool {
	let mut chars = ident.chars();
	chars.next().is_some_and(|c| c == '_' || c.is_alphabetic()) && chars.all(|c| c == '_' || c.is_alphanumeric())
}

/// Suggests the closest known key for a typo.
pub fn suggest_option(key: &str) -> Option<String> {
	OPTION_KEYS
		.iter()
		.min_by_key(|k| strsim::levenshtein(key, k))
		.filter(|k| strsim::levenshtein(key, k) <= 3)
		.map(|k| k.to_string())
}

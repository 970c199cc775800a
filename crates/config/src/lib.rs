//! Configuration for errfold.
//!
//! Configuration is written in KDL (v2). Every option lives in a single
//! `options` block:
//!
//! ```kdl
//! options {
//!     display-mode "compressed"   // fold | compressed | full
//!     dim-mode "conceal"          // conceal | comment | none
//!     reveal-mode "normal"        // normal | comment | conceal
//!     auto-enable #false
//!     error-identifier "err"
//!     max-association-distance 3
//!     debounce-ms 200
//!     sweep-interval-ms 5000
//! }
//! ```
//!
//! # Validation
//!
//! Only unreadable files and KDL syntax errors fail a load. An invalid
//! value (unknown enum variant, wrong type, out-of-range integer) is reported
//! as a [`ConfigWarning`] and the option keeps its default, so the system
//! stays usable. Warnings are collected in [`ParsedConfig::warnings`] for the
//! host to display once.

pub mod error;
pub mod modes;
pub mod options;

use std::path::Path;
use std::time::Duration;

pub use error::{ConfigError, ConfigWarning, Result};
pub use modes::{DimMode, DisplayMode, RevealMode};
pub use options::{OPTION_KEYS, ParsedOptions};

/// Default identifier bound by error-returning calls.
pub const DEFAULT_ERROR_IDENTIFIER: &str = "err";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub display_mode: DisplayMode,
	pub dim_mode: DimMode,
	pub reveal_mode: RevealMode,
	/// Whether newly opened viewports start enabled.
	pub auto_enable: bool,
	/// Identifier matched by null-check conditionals and declarations.
	pub error_identifier: String,
	/// Largest row gap between a declaration and the block it feeds.
	pub max_association_distance: usize,
	/// Quiet window after the last text change before a refresh runs.
	pub debounce_ms: u64,
	/// Period of the stale-viewport sweep.
	pub sweep_interval_ms: u64,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			display_mode: DisplayMode::default(),
			dim_mode: DimMode::default(),
			reveal_mode: RevealMode::default(),
			auto_enable: false,
			error_identifier: DEFAULT_ERROR_IDENTIFIER.to_string(),
			max_association_distance: 3,
			debounce_ms: 200,
			sweep_interval_ms: 5_000,
		}
	}
}

/// A parsed configuration plus the warnings produced on the way.
#[derive(Debug)]
pub struct ParsedConfig {
	pub config: Config,
	pub warnings: Vec<ConfigWarning>,
}

impl ParsedConfig {
	/// Reports every warning through `tracing` and returns the config.
	pub fn into_config(self) -> Config {
		for warning in &self.warnings {
			tracing::warn!(option = warning.option(), "config: {warning}");
		}
		self.config
	}
}

impl Config {
	/// Parse a KDL string into a [`Config`].
	///
	/// A document without an `options` block yields the defaults.
	pub fn parse(input: &str) -> Result<ParsedConfig> {
		let doc: kdl::KdlDocument = input.parse()?;

		for node in doc.nodes().iter().filter(|n| n.name().value() != "options") {
			tracing::debug!(node = node.name().value(), "config: ignoring unknown top-level node");
		}

		let parsed = match doc.get("options") {
			Some(node) => options::parse_options(node),
			None => ParsedOptions {
				config: Config::default(),
				warnings: Vec::new(),
			},
		};

		Ok(ParsedConfig {
			config: parsed.config,
			warnings: parsed.warnings,
		})
	}

	/// Load configuration from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<ParsedConfig> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		Self::parse(&content)
	}

	#[inline]
	pub fn debounce(&self) -> Duration {
		Duration::from_millis(self.debounce_ms)
	}

	#[inline]
	pub fn sweep_interval(&self) -> Duration {
		Duration::from_millis(self.sweep_interval_ms)
	}
}

#[cfg(test)]
mod tests;

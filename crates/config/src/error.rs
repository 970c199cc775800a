//! Error and warning types for configuration parsing.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that prevent a configuration from loading at all.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing KDL syntax.
	#[error("KDL parse error: {0}")]
	Kdl(#[from] kdl::KdlError),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Non-fatal problem with a single option.
///
/// The affected option keeps its default value. Hosts surface these once,
/// at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
	/// An unrecognized key inside the `options` block.
	UnknownOption {
		/// The unrecognized option key.
		key: String,
		/// A suggested alternative, if one is close enough.
		suggestion: Option<String>,
	},
	/// An option node with no value.
	MissingValue {
		/// The option's KDL key.
		option: String,
	},
	/// A value of the wrong KDL type (e.g. a string where an integer belongs).
	TypeMismatch {
		/// The option's KDL key.
		option: String,
		/// The expected type name.
		expected: &'static str,
		/// The actual type name.
		got: &'static str,
	},
	/// A value of the right type that is not acceptable.
	InvalidValue {
		/// The option's KDL key.
		option: String,
		/// The rejected value, as written.
		value: String,
		/// What would have been accepted.
		expected: &'static str,
	},
}

impl ConfigWarning {
	/// The option key the warning refers to.
	pub fn option(&self) -> &str {
		match self {
			Self::UnknownOption { key, .. } => key,
			Self::MissingValue { option } | Self::TypeMismatch { option, .. } | Self::InvalidValue { option, .. } => option,
		}
	}
}

impl fmt::Display for ConfigWarning {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnknownOption { key, suggestion } => {
				write!(f, "unknown option '{key}'")?;
				if let Some(suggestion) = suggestion {
					write!(f, " (did you mean '{suggestion}'?)")?;
				}
				Ok(())
			}
			Self::MissingValue { option } => write!(f, "'{option}' has no value; using the default"),
			Self::TypeMismatch { option, expected, got } => {
				write!(f, "type mismatch for '{option}': expected {expected}, got {got}; using the default")
			}
			Self::InvalidValue { option, value, expected } => {
				write!(f, "invalid value {value} for '{option}' (expected {expected}); using the default")
			}
		}
	}
}

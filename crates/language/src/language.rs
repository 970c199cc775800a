//! Bundled grammars and language detection.

use std::path::Path;

use strum::{Display, EnumString, IntoStaticStr};
use tree_sitter::Language;

/// A language with a compiled-in grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LanguageId {
	#[strum(to_string = "go", serialize = "golang")]
	Go,
}

impl LanguageId {
	/// Looks up a language by name (`"go"`, `"golang"`).
	pub fn from_name(name: &str) -> Option<Self> {
		name.trim().parse().ok()
	}

	/// Detects a language from a file path's extension.
	pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
		let ext = path.as_ref().extension()?.to_str()?;
		match ext {
			"go" => Some(Self::Go),
			_ => None,
		}
	}

	/// Canonical lowercase name.
	pub fn name(self) -> &'static str {
		self.into()
	}

	/// Returns the tree-sitter grammar.
	pub fn grammar(self) -> Language {
		match self {
			Self::Go => tree_sitter_go::LANGUAGE.into(),
		}
	}
}

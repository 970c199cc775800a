//! Parsing and owned syntax values.

use std::sync::Arc;

use errfold_primitives::{DocumentId, Rope};
use thiserror::Error;
use tree_sitter::{Parser, Tree};

use crate::language::LanguageId;

mod node;

pub use node::{ChildNode, SyntaxNode};

/// Errors that can occur during syntax operations.
#[derive(Error, Debug)]
pub enum SyntaxError {
	/// No grammar is bundled for the document's language (or it has none).
	#[error("no grammar available for {0}")]
	GrammarUnavailable(String),

	/// The bundled grammar was rejected by the tree-sitter runtime.
	#[error("incompatible grammar: {0}")]
	Grammar(#[from] tree_sitter::LanguageError),

	/// Tree-sitter returned no tree.
	#[error("parse produced no tree")]
	Parse,

	/// A pattern failed to compile.
	#[error("invalid query pattern: {0}")]
	Query(#[from] tree_sitter::QueryError),

	/// A pattern compiled for one language was run against another.
	#[error("pattern for {expected} cannot run on a {found} tree")]
	LanguageMismatch {
		/// Language the pattern was compiled for.
		expected: LanguageId,
		/// Language of the tree.
		found: LanguageId,
	},

	/// The provider has never seen the document.
	#[error("unknown document {0}")]
	UnknownDocument(DocumentId),
}

impl SyntaxError {
	/// True for the expected, non-actionable case of a document whose
	/// language has no grammar.
	#[inline]
	pub fn is_grammar_unavailable(&self) -> bool {
		matches!(self, Self::GrammarUnavailable(_))
	}
}

/// A parsed tree together with the exact source it was parsed from.
///
/// Cloning is cheap: the tree is reference counted by tree-sitter, the rope
/// shares its chunks, and the flattened text is behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Syntax {
	language: LanguageId,
	tree: Tree,
	source: Rope,
	text: Arc<str>,
}

impl Syntax {
	/// Parses `source` from scratch.
	pub fn parse(source: Rope, language: LanguageId) -> Result<Self, SyntaxError> {
		let mut parser = Parser::new();
		parser.set_language(&language.grammar())?;

		let text: Arc<str> = Arc::from(source.to_string());
		let tree = parser.parse(text.as_bytes(), None).ok_or(SyntaxError::Parse)?;

		if tree.root_node().has_error() {
			tracing::trace!(language = language.name(), "syntax.parse: tree contains error nodes");
		}

		Ok(Self {
			language,
			tree,
			source,
			text,
		})
	}

	#[inline]
	pub fn language(&self) -> LanguageId {
		self.language
	}

	/// The source this tree was parsed from.
	#[inline]
	pub fn source(&self) -> &Rope {
		&self.source
	}

	/// The source flattened to a string (what byte offsets index into).
	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	#[inline]
	pub fn tree(&self) -> &Tree {
		&self.tree
	}

	/// True if tree-sitter had to recover from syntax errors.
	pub fn has_errors(&self) -> bool {
		self.tree.root_node().has_error()
	}
}

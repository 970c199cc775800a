//! Compiled patterns and owned match results.
//!
//! Patterns use tree-sitter's S-expression query language. Text predicates
//! such as `#eq?` are evaluated against the parsed source.

use std::fmt;

use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

use crate::language::LanguageId;
use crate::syntax::{Syntax, SyntaxError, SyntaxNode};

/// Upper bound on in-progress matches tracked by a query cursor.
const MATCH_LIMIT: u32 = 256;

/// A query compiled against one language's grammar.
pub struct Pattern {
	name: String,
	language: LanguageId,
	query: Query,
}

impl fmt::Debug for Pattern {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Pattern")
			.field("name", &self.name)
			.field("language", &self.language)
			.field("patterns", &self.query.pattern_count())
			.finish()
	}
}

impl Pattern {
	/// Compiles `source` for `language`.
	pub fn compile(language: LanguageId, name: impl Into<String>, source: &str) -> Result<Self, SyntaxError> {
		let query = Query::new(&language.grammar(), source)?;
		Ok(Self {
			name: name.into(),
			language,
			query,
		})
	}

	#[inline]
	pub fn name(&self) -> &str {
		&self.name
	}

	#[inline]
	pub fn language(&self) -> LanguageId {
		self.language
	}

	/// Number of top-level patterns in the query.
	#[inline]
	pub fn pattern_count(&self) -> usize {
		self.query.pattern_count()
	}
}

/// One captured node within a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
	pub name: String,
	pub node: SyntaxNode,
}

/// One match of a [`Pattern`], with every capture snapshotted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryMatch {
	/// Index of the top-level pattern that matched.
	pub pattern_index: usize,
	pub captures: Vec<Capture>,
}

impl QueryMatch {
	/// First node captured under `name`.
	pub fn capture(&self, name: &str) -> Option<&SyntaxNode> {
		self.captures.iter().find(|c| c.name == name).map(|c| &c.node)
	}
}

impl Syntax {
	/// Runs `pattern` over the whole tree.
	///
	/// Matches come back in the order tree-sitter reports them, which is by
	/// start position of the first capture.
	pub fn query(&self, pattern: &Pattern) -> Result<Vec<QueryMatch>, SyntaxError> {
		if pattern.language != self.language() {
			return Err(SyntaxError::LanguageMismatch {
				expected: pattern.language,
				found: self.language(),
			});
		}

		let text = self.text();
		let names = pattern.query.capture_names();
		let mut cursor = QueryCursor::new();
		cursor.set_match_limit(MATCH_LIMIT);

		let mut out = Vec::new();
		{
			let mut matches = cursor.matches(&pattern.query, self.tree().root_node(), text.as_bytes());
			while let Some(m) = matches.next() {
				let captures = m
					.captures
					.iter()
					.map(|c| Capture {
						name: names.get(c.index as usize).copied().unwrap_or_default().to_string(),
						node: SyntaxNode::from_tree_sitter(c.node, text),
					})
					.collect();
				out.push(QueryMatch {
					pattern_index: m.pattern_index,
					captures,
				});
			}
		}

		if cursor.did_exceed_match_limit() {
			tracing::debug!(pattern = pattern.name(), "syntax.query: match limit exceeded; results may be partial");
		}

		Ok(out)
	}
}

//! Tree queries for error-handling constructs.

use std::sync::Arc;

use errfold_language::{ChildNode, LanguageId, Pattern, QueryMatch, Syntax, SyntaxError, SyntaxNode};
use errfold_primitives::Span;
use rustc_hash::{FxHashMap, FxHashSet};

/// A null-check conditional found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckMatch {
	/// The whole `if` statement.
	pub statement: SyntaxNode,
	/// The `<ident> != nil` (or reversed) comparison.
	pub comparison: SyntaxNode,
}

impl CheckMatch {
	fn from_query(m: &QueryMatch) -> Option<Self> {
		Some(Self {
			statement: m.capture("check")?.clone(),
			comparison: m.capture("comparison")?.clone(),
		})
	}

	#[inline]
	pub fn span(&self) -> Span {
		self.statement.span()
	}

	/// The statement in the conditional's header, if it has one.
	///
	/// This is the first named child, comments aside, that ends before the
	/// comparison starts.
	pub fn initializer(&self) -> Option<&ChildNode> {
		let cmp_start = self.comparison.span().start;
		self.statement
			.children()
			.iter()
			.take_while(|child| child.span().end <= cmp_start)
			.find(|child| child.kind() != "comment")
	}

	/// Header text: from `if` up to the opening brace of the consequence.
	///
	/// Falls back to the whole statement when the tree has no consequence
	/// block (error recovery).
	pub fn header(&self) -> &str {
		let text = self.statement.text();
		let base = self.statement.byte_range().start;
		self.statement
			.children_by_kind("block")
			.next()
			.and_then(|block| text.get(..block.byte_range().start.saturating_sub(base)))
			.unwrap_or(text)
	}
}

/// The three raw match lists, each ordered by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMatches {
	/// Every null-check conditional, inline ones included.
	pub checks: Vec<CheckMatch>,
	/// Conditionals whose header declares the identifier with `:=`.
	pub inline: Vec<CheckMatch>,
	/// Statements binding the identifier.
	pub declarations: Vec<SyntaxNode>,
}

impl RawMatches {
	pub fn is_empty(&self) -> bool {
		self.checks.is_empty() && self.declarations.is_empty()
	}
}

struct CompiledPatterns {
	checks: Pattern,
	inline: Pattern,
	declarations: Pattern,
}

/// Queries syntax trees for null-check conditionals and declarations of one
/// error identifier.
///
/// Patterns are compiled on first use per language and kept for the life of
/// the matcher.
pub struct PatternMatcher {
	identifier: String,
	compiled: FxHashMap<LanguageId, Option<Arc<CompiledPatterns>>>,
}

impl PatternMatcher {
	pub fn new(identifier: impl Into<String>) -> Self {
		Self {
			identifier: identifier.into(),
			compiled: FxHashMap::default(),
		}
	}

	#[inline]
	pub fn identifier(&self) -> &str {
		&self.identifier
	}

	/// Finds every construct in `syntax`.
	///
	/// Never fails: a pattern that does not compile or a query that errors
	/// yields empty lists and a debug diagnostic.
	pub fn find(&mut self, syntax: &Syntax) -> RawMatches {
		let Some(patterns) = self.patterns(syntax.language()) else {
			return RawMatches::default();
		};

		let checks = run(syntax, &patterns.checks).iter().filter_map(CheckMatch::from_query).collect();
		let inline = run(syntax, &patterns.inline).iter().filter_map(CheckMatch::from_query).collect();
		let declarations = run(syntax, &patterns.declarations)
			.into_iter()
			.filter_map(|m| m.capture("decl").cloned())
			.collect();

		let raw = RawMatches {
			checks: ordered(checks, CheckMatch::span),
			inline: ordered(inline, CheckMatch::span),
			declarations: ordered(declarations, SyntaxNode::span),
		};
		tracing::trace!(
			language = syntax.language().name(),
			checks = raw.checks.len(),
			inline = raw.inline.len(),
			declarations = raw.declarations.len(),
			"regions.match"
		);
		raw
	}

	fn patterns(&mut self, language: LanguageId) -> Option<Arc<CompiledPatterns>> {
		self.compiled
			.entry(language)
			.or_insert_with(|| match compile(language, &self.identifier) {
				Ok(patterns) => Some(Arc::new(patterns)),
				Err(error) => {
					tracing::debug!(language = language.name(), %error, "regions.match: patterns failed to compile");
					None
				}
			})
			.clone()
	}
}

fn run(syntax: &Syntax, pattern: &Pattern) -> Vec<QueryMatch> {
	syntax.query(pattern).unwrap_or_else(|error| {
		tracing::debug!(pattern = pattern.name(), %error, "regions.match: query failed");
		Vec::new()
	})
}

/// Sorts by span and drops repeats of the same span, keeping the first.
fn ordered<T>(mut items: Vec<T>, span: impl Fn(&T) -> Span) -> Vec<T> {
	items.sort_by_key(|item| span(item));
	let mut seen = FxHashSet::default();
	items.retain(|item| seen.insert(span(item)));
	items
}

fn compile(language: LanguageId, identifier: &str) -> Result<CompiledPatterns, SyntaxError> {
	match language {
		LanguageId::Go => {
			let ident = quote(identifier);
			Ok(CompiledPatterns {
				checks: Pattern::compile(language, "checks", &go_checks(&ident, ""))?,
				inline: Pattern::compile(language, "inline-checks", &go_checks(&ident, "initializer: (short_var_declaration)"))?,
				declarations: Pattern::compile(language, "declarations", &go_declarations(&ident))?,
			})
		}
	}
}

/// Escapes `identifier` as a query string literal.
fn quote(identifier: &str) -> String {
	let mut out = String::with_capacity(identifier.len() + 2);
	out.push('"');
	for c in identifier.chars() {
		if matches!(c, '"' | '\\') {
			out.push('\\');
		}
		out.push(c);
	}
	out.push('"');
	out
}

/// Both operand orders of `<ident> != nil`, optionally constrained on the
/// header initializer.
fn go_checks(ident: &str, initializer: &str) -> String {
	format!(
		r#"
((if_statement
	{initializer}
	condition: (binary_expression
		left: (identifier) @ident
		operator: "!="
		right: (nil)) @comparison) @check
 (#eq? @ident {ident}))

((if_statement
	{initializer}
	condition: (binary_expression
		left: (nil)
		operator: "!="
		right: (identifier) @ident) @comparison) @check
 (#eq? @ident {ident}))
"#
	)
}

fn go_declarations(ident: &str) -> String {
	format!(
		r#"
((short_var_declaration
	left: (expression_list (identifier) @ident)) @decl
 (#eq? @ident {ident}))

((assignment_statement
	left: (expression_list (identifier) @ident)) @decl
 (#eq? @ident {ident}))

((var_spec
	name: (identifier) @ident) @decl
 (#eq? @ident {ident}))
"#
	)
}

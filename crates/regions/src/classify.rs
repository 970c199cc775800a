//! Raw matches to typed regions.

use errfold_language::SyntaxNode;
use errfold_primitives::{Position, Region, Span};
use rustc_hash::FxHashSet;

use crate::matcher::{CheckMatch, RawMatches};

/// Short variable declaration operator; its presence in a header makes the
/// conditional inline.
const DECLARE_OP: &str = ":=";

/// Classifies raw matches into regions sorted by start row, declarations
/// before blocks on the same row.
///
/// Conditionals matched more than once (both operand orders, or both the
/// plain and the inline query) keep their first classification. Declarations
/// that are the header of a conditional become part of that block rather
/// than separate regions.
pub fn classify(raw: &RawMatches) -> Vec<Region> {
	let inline: FxHashSet<Span> = raw.inline.iter().map(CheckMatch::span).collect();
	let mut seen = FxHashSet::default();
	let mut initializers = FxHashSet::default();
	let mut regions = Vec::with_capacity(raw.checks.len() + raw.declarations.len());

	for check in raw.checks.iter().chain(&raw.inline) {
		let outer = check.span();
		if !seen.insert(outer) {
			continue;
		}
		if let Some(init) = check.initializer() {
			initializers.insert(init.span());
		}

		if inline.contains(&outer) || check.header().contains(DECLARE_OP) {
			regions.push(Region::inline(outer, inner_body(check)));
		} else {
			regions.push(Region::simple(outer));
		}
	}

	regions.extend(
		raw.declarations
			.iter()
			.map(SyntaxNode::span)
			.filter(|span| !initializers.contains(span))
			.map(Region::assignment),
	);

	regions.sort_by_key(Region::sort_key);
	regions
}

/// Resolves the error-handling body of an inline conditional.
///
/// Starts at the comparison and runs from the first `{` after it to the
/// matching `}`. Without an opening brace the whole statement is the body;
/// without a matching close the body runs to the end of the statement.
fn inner_body(check: &CheckMatch) -> Span {
	let stmt = &check.statement;
	let outer = stmt.span();
	let from = check.comparison.byte_range().end.saturating_sub(stmt.byte_range().start);

	let braces = brace_offsets(stmt.text(), from);
	let Some(open) = braces.iter().position(|&(_, brace)| brace == Brace::Open) else {
		tracing::trace!(span = %outer, "regions.classify: no opening brace; using outer span");
		return outer;
	};

	let mut depth = 0usize;
	let close = braces[open..].iter().find_map(|&(offset, brace)| {
		match brace {
			Brace::Open => depth += 1,
			Brace::Close => {
				depth -= 1;
				if depth == 0 {
					return Some(offset);
				}
			}
		}
		None
	});

	let end = match close {
		Some(offset) => position_at(stmt, offset + 1),
		None => {
			tracing::trace!(span = %outer, "regions.classify: unmatched brace; body runs to statement end");
			outer.end
		}
	};
	Span::new(check.comparison.span().start, end)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
	Open,
	Close,
}

/// Offsets of braces in `text[from..]` outside string, rune and raw string
/// literals and comments.
fn brace_offsets(text: &str, from: usize) -> Vec<(usize, Brace)> {
	let bytes = text.as_bytes();
	let mut out = Vec::new();
	let mut i = from;
	while let Some(&b) = bytes.get(i) {
		let next = bytes.get(i + 1).copied();
		i = match (b, next) {
			(b'"', _) | (b'\'', _) => skip_quoted(bytes, i + 1, b),
			(b'`', _) => skip_past(bytes, i + 1, b"`"),
			(b'/', Some(b'/')) => skip_past(bytes, i + 2, b"\n"),
			(b'/', Some(b'*')) => skip_past(bytes, i + 2, b"*/"),
			(b'{', _) => {
				out.push((i, Brace::Open));
				i + 1
			}
			(b'}', _) => {
				out.push((i, Brace::Close));
				i + 1
			}
			_ => i + 1,
		};
	}
	out
}

/// Index just past the closing `quote`, honouring backslash escapes. An
/// unterminated literal ends at the line break.
fn skip_quoted(bytes: &[u8], mut i: usize, quote: u8) -> usize {
	while let Some(&b) = bytes.get(i) {
		match b {
			b'\\' => i += 2,
			b'\n' => return i,
			_ if b == quote => return i + 1,
			_ => i += 1,
		}
	}
	bytes.len()
}

fn skip_past(bytes: &[u8], i: usize, needle: &[u8]) -> usize {
	bytes
		.get(i..)
		.and_then(|rest| rest.windows(needle.len()).position(|w| w == needle))
		.map_or(bytes.len(), |at| i + at + needle.len())
}

/// Position of byte `offset` within `node`'s text.
fn position_at(node: &SyntaxNode, offset: usize) -> Position {
	let text = node.text();
	let prefix = text.get(..offset).unwrap_or(text);
	let start = node.span().start;
	match prefix.rfind('\n') {
		Some(nl) => Position::new(start.row + prefix.matches('\n').count(), prefix.len() - nl - 1),
		None => Position::new(start.row, start.col + prefix.len()),
	}
}

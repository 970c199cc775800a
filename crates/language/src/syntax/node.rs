use std::ops::Range;

use errfold_primitives::{Position, RowRange, Span};
use tree_sitter::Node;

/// An immutable snapshot of a captured syntax node.
///
/// Holds the node's span, its source text, and an outline of its direct
/// named children. Grandchildren are not kept, so snapshotting costs the
/// same however deeply the node nests. Nothing borrows the tree, so matches
/// can be kept after the tree is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
	kind: String,
	span: Span,
	byte_range: Range<usize>,
	text: String,
	children: Vec<ChildNode>,
}

/// Outline of a direct named child: kind and location, no text.
///
/// Its text is available through [`SyntaxNode::child_text`] on the parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildNode {
	kind: String,
	span: Span,
	byte_range: Range<usize>,
}

fn span_of(node: &Node<'_>) -> Span {
	let start = node.start_position();
	let end = node.end_position();
	Span::new(Position::new(start.row, start.column), Position::new(end.row, end.column))
}

impl SyntaxNode {
	/// Builds a node by hand, e.g. for a host with its own tree type.
	pub fn new(kind: impl Into<String>, span: Span, byte_range: Range<usize>, text: impl Into<String>, children: Vec<ChildNode>) -> Self {
		Self {
			kind: kind.into(),
			span,
			byte_range,
			text: text.into(),
			children,
		}
	}

	/// Snapshots `node` and outlines its direct named children. `source` is
	/// the text the tree was parsed from.
	pub(crate) fn from_tree_sitter(node: Node<'_>, source: &str) -> Self {
		let byte_range = node.byte_range();
		let text = source.get(byte_range.clone()).unwrap_or_default().to_string();

		let mut cursor = node.walk();
		let children = node
			.named_children(&mut cursor)
			.map(|child| ChildNode {
				kind: child.kind().to_string(),
				span: span_of(&child),
				byte_range: child.byte_range(),
			})
			.collect();

		Self {
			kind: node.kind().to_string(),
			span: span_of(&node),
			byte_range,
			text,
			children,
		}
	}

	/// Grammar node type, e.g. `"if_statement"`.
	#[inline]
	pub fn kind(&self) -> &str {
		&self.kind
	}

	#[inline]
	pub fn span(&self) -> Span {
		self.span
	}

	#[inline]
	pub fn rows(&self) -> RowRange {
		self.span.rows()
	}

	/// Byte offsets into the parsed source.
	#[inline]
	pub fn byte_range(&self) -> Range<usize> {
		self.byte_range.clone()
	}

	#[inline]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Named children in source order.
	#[inline]
	pub fn children(&self) -> &[ChildNode] {
		&self.children
	}

	/// Direct named children of the given kind.
	pub fn children_by_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a ChildNode> + 'a {
		self.children.iter().filter(move |child| child.kind == kind)
	}

	/// Text of `child`, sliced from this node's text. Empty if `child` lies
	/// outside this node.
	pub fn child_text(&self, child: &ChildNode) -> &str {
		let base = self.byte_range.start;
		child
			.byte_range
			.start
			.checked_sub(base)
			.zip(child.byte_range.end.checked_sub(base))
			.and_then(|(start, end)| self.text.get(start..end))
			.unwrap_or_default()
	}
}

impl ChildNode {
	pub fn new(kind: impl Into<String>, span: Span, byte_range: Range<usize>) -> Self {
		Self {
			kind: kind.into(),
			span,
			byte_range,
		}
	}

	#[inline]
	pub fn kind(&self) -> &str {
		&self.kind
	}

	#[inline]
	pub fn span(&self) -> Span {
		self.span
	}

	#[inline]
	pub fn rows(&self) -> RowRange {
		self.span.rows()
	}

	#[inline]
	pub fn byte_range(&self) -> Range<usize> {
		self.byte_range.clone()
	}
}

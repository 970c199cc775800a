use strum::{Display, IntoStaticStr};

use crate::span::{RowRange, Span};

/// Classification of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum RegionKind {
	/// A null-check conditional with no declaring clause: `if err != nil { .. }`.
	SimpleBlock,
	/// A null-check conditional that declares the identifier in its header:
	/// `if err := f(); err != nil { .. }`.
	InlineBlock,
	/// A statement that binds the identifier: `v, err := f()`.
	Assignment,
}

impl RegionKind {
	#[inline]
	pub fn is_block(self) -> bool {
		matches!(self, Self::SimpleBlock | Self::InlineBlock)
	}

	/// Sort rank among regions that start on the same row.
	///
	/// Declarations sort before the blocks they feed.
	#[inline]
	pub(crate) fn rank(self) -> u8 {
		match self {
			Self::Assignment => 0,
			Self::SimpleBlock | Self::InlineBlock => 1,
		}
	}
}

/// A classified span of source requiring a display decision.
///
/// Regions are values: a re-parse produces a fresh list rather than patching
/// existing entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Region {
	pub kind: RegionKind,
	/// The full syntactic span (for blocks, the entire `if` statement).
	pub outer: Span,
	/// For [`RegionKind::InlineBlock`] only: the error-handling body, which
	/// excludes the declaring clause.
	pub inner: Option<Span>,
}

impl Region {
	pub fn simple(outer: Span) -> Self {
		Self {
			kind: RegionKind::SimpleBlock,
			outer,
			inner: None,
		}
	}

	/// Creates an inline block.
	///
	/// An `inner` that escapes `outer` is clamped back to `outer`.
	pub fn inline(outer: Span, inner: Span) -> Self {
		let inner = if outer.contains(&inner) { inner } else { outer };
		Self {
			kind: RegionKind::InlineBlock,
			outer,
			inner: Some(inner),
		}
	}

	pub fn assignment(outer: Span) -> Self {
		Self {
			kind: RegionKind::Assignment,
			outer,
			inner: None,
		}
	}

	#[inline]
	pub fn is_block(&self) -> bool {
		self.kind.is_block()
	}

	/// Rows of the full syntactic span.
	#[inline]
	pub fn outer_rows(&self) -> RowRange {
		self.outer.rows()
	}

	/// Rows that compress or dim: the inner body when present, else the outer span.
	#[inline]
	pub fn target_rows(&self) -> RowRange {
		self.inner.unwrap_or(self.outer).rows()
	}

	/// Ordering key: start row, then declarations before blocks.
	#[inline]
	pub fn sort_key(&self) -> (usize, u8) {
		(self.outer.start.row, self.kind.rank())
	}
}

/// A bounded-distance link from a declaration to the block consuming it.
///
/// Both sides are indices into the region list the association was resolved
/// against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Association {
	pub declaration: usize,
	pub target: usize,
	/// Row gap: `block.start_row - declaration.end_row`, always at least one.
	pub distance: usize,
}

use std::fmt;

/// A zero-based row/column position in a document.
///
/// Columns are byte offsets within the row, matching what the syntax tree
/// reports. Only rows take part in display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
	pub row: usize,
	pub col: usize,
}

impl Position {
	pub const fn new(row: usize, col: usize) -> Self {
		Self { row, col }
	}
}

/// A syntactic span from `start` (inclusive) to `end` (exclusive column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Span {
	pub start: Position,
	pub end: Position,
}

impl Span {
	/// Creates a span, swapping the endpoints if they arrive reversed.
	pub fn new(start: Position, end: Position) -> Self {
		if end < start { Self { start: end, end: start } } else { Self { start, end } }
	}

	/// Returns the rows covered by this span.
	#[inline]
	pub fn rows(&self) -> RowRange {
		RowRange::new(self.start.row, self.end.row)
	}

	/// Returns true if `other` lies entirely within this span.
	#[inline]
	pub fn contains(&self, other: &Span) -> bool {
		self.start <= other.start && other.end <= self.end
	}
}

impl fmt::Display for Span {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}-{}:{}", self.start.row, self.start.col, self.end.row, self.end.col)
	}
}

/// An inclusive range of rows, `start..=end`.
///
/// This is the granularity of every instruction sent to the presentation
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowRange {
	pub start: usize,
	pub end: usize,
}

impl RowRange {
	/// Creates a row range, normalising reversed endpoints.
	pub fn new(start: usize, end: usize) -> Self {
		Self {
			start: start.min(end),
			end: start.max(end),
		}
	}

	/// A range covering a single row.
	pub const fn single(row: usize) -> Self {
		Self { start: row, end: row }
	}

	#[inline]
	pub fn contains(&self, row: usize) -> bool {
		self.start <= row && row <= self.end
	}

	/// Number of rows covered (never zero).
	#[inline]
	pub fn row_count(&self) -> usize {
		self.end - self.start + 1
	}

	#[inline]
	pub fn is_subset_of(&self, other: &RowRange) -> bool {
		other.start <= self.start && self.end <= other.end
	}

	#[inline]
	pub fn overlaps(&self, other: &RowRange) -> bool {
		self.start <= other.end && other.start <= self.end
	}
}

impl fmt::Display for RowRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.start, self.end)
	}
}

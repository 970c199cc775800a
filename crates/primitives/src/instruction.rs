use std::fmt;

use strum::{Display, IntoStaticStr};

use crate::span::RowRange;

/// Styling applied to a dimmed region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DimStyle {
	/// Hide the characters, keeping layout.
	Conceal,
	/// Render like a comment.
	Comment,
}

/// One unit of communication to the presentation surface.
///
/// A reconciliation pass emits a complete list; the surface clears every
/// prior mark for the document before applying it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
	/// Collapse `rows` into a single line showing `label` (may be empty).
	Fold { rows: RowRange, label: String },
	/// Dim `rows` with `style`.
	Dim { rows: RowRange, style: DimStyle },
	/// Show `rows` untouched, removing any fold or dim in that range.
	Reveal { rows: RowRange },
}

impl Instruction {
	pub fn rows(&self) -> RowRange {
		match self {
			Self::Fold { rows, .. } | Self::Dim { rows, .. } | Self::Reveal { rows } => *rows,
		}
	}

	#[inline]
	pub fn is_reveal(&self) -> bool {
		matches!(self, Self::Reveal { .. })
	}
}

impl fmt::Display for Instruction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Fold { rows, label } => write!(f, "fold({rows}, {label:?})"),
			Self::Dim { rows, style } => write!(f, "dim({rows}, {style})"),
			Self::Reveal { rows } => write!(f, "reveal({rows})"),
		}
	}
}

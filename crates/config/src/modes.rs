//! Display, dim, and reveal modes.

use errfold_primitives::DimStyle;
use strum::{Display, EnumString, IntoStaticStr};

/// How regions without a cursor in context are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DisplayMode {
	/// Collapse with an empty label.
	Fold,
	/// Collapse into a one-line summary of the region's text.
	#[default]
	Compressed,
	/// Leave the text in place; dimming is governed by [`DimMode`].
	Full,
}

impl DisplayMode {
	pub const EXPECTED: &'static str = "\"fold\", \"compressed\" or \"full\"";
}

/// Dimming applied to out-of-context regions in [`DisplayMode::Full`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DimMode {
	#[default]
	Conceal,
	Comment,
	None,
}

impl DimMode {
	pub const EXPECTED: &'static str = "\"conceal\", \"comment\" or \"none\"";

	pub fn style(self) -> Option<DimStyle> {
		match self {
			Self::Conceal => Some(DimStyle::Conceal),
			Self::Comment => Some(DimStyle::Comment),
			Self::None => None,
		}
	}
}

/// Treatment of a region while a cursor is in its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum RevealMode {
	/// Show the region untouched.
	#[default]
	Normal,
	/// Keep it visible but styled as a comment.
	Comment,
	/// Keep it visible but concealed.
	Conceal,
}

impl RevealMode {
	pub const EXPECTED: &'static str = "\"normal\", \"comment\" or \"conceal\"";

	/// The dim style a revealed region keeps, or `None` for a plain reveal.
	pub fn dim_style(self) -> Option<DimStyle> {
		match self {
			Self::Normal => None,
			Self::Comment => Some(DimStyle::Comment),
			Self::Conceal => Some(DimStyle::Conceal),
		}
	}
}

use errfold_language::Syntax;
use errfold_primitives::{Association, Region, Rope, RowRange};

use crate::matcher::PatternMatcher;
use crate::{associate, classify};

/// The classified regions of one document snapshot.
///
/// Built in one go from a syntax tree and replaced wholesale on the next
/// refresh; readers holding an older set keep a consistent view.
#[derive(Debug, Clone)]
pub struct RegionSet {
	regions: Vec<Region>,
	associations: Vec<Association>,
	source: Rope,
}

impl Default for RegionSet {
	fn default() -> Self {
		Self::new(Vec::new(), Vec::new(), Rope::new())
	}
}

impl RegionSet {
	/// Assembles a set from already-resolved parts.
	pub fn new(regions: Vec<Region>, associations: Vec<Association>, source: Rope) -> Self {
		Self {
			regions,
			associations,
			source,
		}
	}

	/// Matches, classifies and associates everything in `syntax`.
	pub fn build(syntax: &Syntax, matcher: &mut PatternMatcher, max_distance: usize) -> Self {
		let raw = matcher.find(syntax);
		let regions = classify(&raw);
		let associations = associate(&regions, max_distance);
		tracing::debug!(
			regions = regions.len(),
			associations = associations.len(),
			"regions.build"
		);
		Self::new(regions, associations, syntax.source().clone())
	}

	/// Regions sorted by start row.
	#[inline]
	pub fn regions(&self) -> &[Region] {
		&self.regions
	}

	#[inline]
	pub fn associations(&self) -> &[Association] {
		&self.associations
	}

	/// The source snapshot the regions index into.
	#[inline]
	pub fn source(&self) -> &Rope {
		&self.source
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.regions.is_empty()
	}

	/// Block regions with their indices.
	pub fn blocks(&self) -> impl Iterator<Item = (usize, &Region)> {
		self.regions.iter().enumerate().filter(|(_, r)| r.is_block())
	}

	/// Rows of every declaration associated with the block at `target`.
	pub fn declaration_rows(&self, target: usize) -> impl Iterator<Item = RowRange> + '_ {
		self.associations
			.iter()
			.filter(move |a| a.target == target)
			.filter_map(|a| self.regions.get(a.declaration))
			.map(Region::outer_rows)
	}
}

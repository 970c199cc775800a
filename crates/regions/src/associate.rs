//! Declaration to block association.

use errfold_primitives::{Association, Region};
use rustc_hash::FxHashSet;

/// Links each declaration in `regions` to the block that consumes it.
///
/// A declaration considers only the closest block starting after it, at a
/// row gap of at least one and at most `max_distance`. Each block is claimed
/// at most once: declarations are visited in source order and a declaration
/// whose closest block is already claimed stays unassociated (it does not
/// fall back to a farther block).
///
/// Indices in the returned associations refer to `regions`.
pub fn associate(regions: &[Region], max_distance: usize) -> Vec<Association> {
	let mut blocks: Vec<usize> = (0..regions.len()).filter(|&i| regions[i].is_block()).collect();
	blocks.sort_by_key(|&i| (regions[i].outer.start.row, i));

	let mut declarations: Vec<usize> = (0..regions.len()).filter(|&i| !regions[i].is_block()).collect();
	declarations.sort_by_key(|&i| (regions[i].outer.start, i));

	let mut claimed = FxHashSet::default();
	let mut out = Vec::new();

	for declaration in declarations {
		let end_row = regions[declaration].outer.end.row;
		let next = blocks.partition_point(|&b| regions[b].outer.start.row <= end_row);
		let Some(&target) = blocks.get(next) else {
			continue;
		};

		let distance = regions[target].outer.start.row - end_row;
		if distance > max_distance {
			continue;
		}
		if !claimed.insert(target) {
			tracing::trace!(declaration, target, "regions.associate: closest block already claimed");
			continue;
		}
		out.push(Association {
			declaration,
			target,
			distance,
		});
	}

	out
}

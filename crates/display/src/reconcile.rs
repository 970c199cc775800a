//! Per-document display decisions.

use errfold_config::{Config, DimMode, DisplayMode, RevealMode};
use errfold_primitives::{DocumentId, Instruction, Region, RowRange};
use errfold_regions::RegionSet;
use thiserror::Error;

use crate::label::compressed_label;
use crate::store::{ViewportProbe, ViewportStateStore};

/// Failure to build the instruction for one region.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
	/// The region refers to rows its source snapshot does not have.
	#[error("rows {rows} out of range for a {lines}-line source")]
	OutOfRange { rows: RowRange, lines: usize },
}

/// Turns regions and cursor rows into display instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayReconciler {
	display_mode: DisplayMode,
	dim_mode: DimMode,
	reveal_mode: RevealMode,
}

impl DisplayReconciler {
	pub fn new(config: &Config) -> Self {
		Self {
			display_mode: config.display_mode,
			dim_mode: config.dim_mode,
			reveal_mode: config.reveal_mode,
		}
	}

	/// Computes the instructions for `doc_id` from the cursors of its live,
	/// enabled viewports.
	///
	/// With no enabled viewport the result is empty: once the surface is
	/// cleared, everything shows.
	pub fn reconcile(
		&self,
		doc_id: DocumentId,
		regions: &RegionSet,
		store: &mut ViewportStateStore,
		probe: &dyn ViewportProbe,
	) -> Vec<Instruction> {
		let viewports = store.viewports_for(doc_id, probe);
		if !viewports.iter().any(|v| v.enabled) {
			tracing::trace!(?doc_id, viewports = viewports.len(), "reconcile.skip: no enabled viewport");
			return Vec::new();
		}

		let cursors: Vec<usize> = viewports.iter().filter(|v| v.enabled).filter_map(|v| v.cursor_row).collect();
		let instructions = self.instructions(regions, &cursors);
		tracing::debug!(?doc_id, cursors = cursors.len(), instructions = instructions.len(), "reconcile.pass");
		instructions
	}

	/// Computes instructions for the given cursor rows, in region order.
	///
	/// A region any cursor is in context of is revealed, whatever the other
	/// cursors say. A region whose instruction cannot be built is skipped
	/// with a warning; the rest of the pass continues.
	pub fn instructions(&self, regions: &RegionSet, cursors: &[usize]) -> Vec<Instruction> {
		let mut out = Vec::new();
		for (index, region) in regions.blocks() {
			let in_context = cursors.iter().any(|&row| {
				region.outer_rows().contains(row) || regions.declaration_rows(index).any(|rows| rows.contains(row))
			});

			match self.decide(regions, region, in_context) {
				Ok(instructions) => out.extend(instructions),
				Err(error) => {
					tracing::warn!(region = %region.outer, kind = %region.kind, %error, "reconcile.region: skipped");
				}
			}
		}
		out
	}

	fn decide(&self, regions: &RegionSet, region: &Region, in_context: bool) -> Result<Vec<Instruction>, ReconcileError> {
		let target = region.target_rows();

		if in_context {
			let instruction = match self.reveal_mode.dim_style() {
				None => Instruction::Reveal { rows: region.outer_rows() },
				Some(style) => Instruction::Dim { rows: target, style },
			};
			return Ok(vec![instruction]);
		}

		let mut out = Vec::with_capacity(1);
		match self.display_mode {
			DisplayMode::Fold => out.push(Instruction::Fold {
				rows: target,
				label: String::new(),
			}),
			DisplayMode::Compressed => out.push(Instruction::Fold {
				rows: target,
				label: label_for(regions, target)?,
			}),
			DisplayMode::Full => {
				if let Some(style) = self.dim_mode.style() {
					out.push(Instruction::Dim { rows: target, style });
				}
			}
		}
		Ok(out)
	}
}

fn label_for(regions: &RegionSet, rows: RowRange) -> Result<String, ReconcileError> {
	let source = regions.source();
	let lines = (rows.start..=rows.end)
		.map(|row| source.get_line(row).map(|line| line.to_string()))
		.collect::<Option<Vec<_>>>()
		.ok_or(ReconcileError::OutOfRange {
			rows,
			lines: source.len_lines(),
		})?;
	Ok(compressed_label(lines, rows.row_count()))
}

#[cfg(test)]
mod tests;

//! The presentation surface seam.

use std::sync::Arc;

use errfold_primitives::{DimStyle, DocumentId, Instruction, RowRange};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

/// A surface refused an instruction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresentationError {
	/// The range no longer exists in the document (e.g. after a concurrent edit).
	#[error("invalid range {rows} in {doc_id}")]
	InvalidRange { doc_id: DocumentId, rows: RowRange },
	/// The document is not shown by the surface.
	#[error("{0} is not presented")]
	UnknownDocument(DocumentId),
	#[error("{0}")]
	Rejected(String),
}

/// Renders instructions. Marks are per document and shared by every
/// viewport onto that document.
pub trait PresentationSurface: Send {
	/// Removes every fold, dim and reveal previously applied to `doc_id`.
	fn clear_all_marks(&mut self, doc_id: DocumentId) -> Result<(), PresentationError>;
	fn apply_fold(&mut self, doc_id: DocumentId, rows: RowRange, label: &str) -> Result<(), PresentationError>;
	fn apply_dim(&mut self, doc_id: DocumentId, rows: RowRange, style: DimStyle) -> Result<(), PresentationError>;
	/// Removes any active fold or dim within `rows`.
	fn apply_reveal(&mut self, doc_id: DocumentId, rows: RowRange) -> Result<(), PresentationError>;
}

/// Counts from one [`apply_instructions`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ApplyReport {
	pub applied: usize,
	pub failed: usize,
}

impl ApplyReport {
	#[inline]
	pub fn is_clean(&self) -> bool {
		self.failed == 0
	}
}

/// Clears `doc_id` on `surface` and applies `instructions` in order.
///
/// A rejected instruction is logged and counted; the rest still apply.
pub fn apply_instructions(surface: &mut dyn PresentationSurface, doc_id: DocumentId, instructions: &[Instruction]) -> ApplyReport {
	let mut report = ApplyReport::default();

	if let Err(error) = surface.clear_all_marks(doc_id) {
		tracing::warn!(?doc_id, %error, "presentation.clear: failed");
		report.failed += 1;
	}

	for instruction in instructions {
		let result = match instruction {
			Instruction::Fold { rows, label } => surface.apply_fold(doc_id, *rows, label),
			Instruction::Dim { rows, style } => surface.apply_dim(doc_id, *rows, *style),
			Instruction::Reveal { rows } => surface.apply_reveal(doc_id, *rows),
		};
		match result {
			Ok(()) => report.applied += 1,
			Err(error) => {
				tracing::warn!(?doc_id, %instruction, %error, "presentation.apply: instruction rejected");
				report.failed += 1;
			}
		}
	}

	report
}

#[derive(Debug, Default)]
struct MemoryState {
	marks: FxHashMap<DocumentId, Vec<Instruction>>,
	clears: FxHashMap<DocumentId, usize>,
	rejected_rows: FxHashSet<RowRange>,
}

/// An in-memory surface that records the marks each document carries.
///
/// Clones share state, so a host (or test) can keep one handle while the
/// engine owns another. A reveal removes overlapping folds and dims and is
/// then recorded itself.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
	state: Arc<Mutex<MemoryState>>,
}

impl MemorySurface {
	pub fn new() -> Self {
		Self::default()
	}

	/// Current marks on `doc_id`, in application order.
	pub fn marks(&self, doc_id: DocumentId) -> Vec<Instruction> {
		self.state.lock().marks.get(&doc_id).cloned().unwrap_or_default()
	}

	/// How many times `doc_id` has been cleared.
	pub fn clear_count(&self, doc_id: DocumentId) -> usize {
		self.state.lock().clears.get(&doc_id).copied().unwrap_or(0)
	}

	/// Makes every later instruction on exactly `rows` fail.
	pub fn reject_rows(&self, rows: RowRange) {
		self.state.lock().rejected_rows.insert(rows);
	}

	fn record(&self, doc_id: DocumentId, instruction: Instruction) -> Result<(), PresentationError> {
		let mut state = self.state.lock();
		let rows = instruction.rows();
		if state.rejected_rows.contains(&rows) {
			return Err(PresentationError::InvalidRange { doc_id, rows });
		}
		let marks = state.marks.entry(doc_id).or_default();
		if instruction.is_reveal() {
			marks.retain(|m| m.is_reveal() || !m.rows().overlaps(&rows));
		}
		marks.push(instruction);
		Ok(())
	}
}

impl PresentationSurface for MemorySurface {
	fn clear_all_marks(&mut self, doc_id: DocumentId) -> Result<(), PresentationError> {
		let mut state = self.state.lock();
		state.marks.remove(&doc_id);
		*state.clears.entry(doc_id).or_default() += 1;
		Ok(())
	}

	fn apply_fold(&mut self, doc_id: DocumentId, rows: RowRange, label: &str) -> Result<(), PresentationError> {
		self.record(
			doc_id,
			Instruction::Fold {
				rows,
				label: label.to_string(),
			},
		)
	}

	fn apply_dim(&mut self, doc_id: DocumentId, rows: RowRange, style: DimStyle) -> Result<(), PresentationError> {
		self.record(doc_id, Instruction::Dim { rows, style })
	}

	fn apply_reveal(&mut self, doc_id: DocumentId, rows: RowRange) -> Result<(), PresentationError> {
		self.record(doc_id, Instruction::Reveal { rows })
	}
}

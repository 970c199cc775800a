//! Viewport registry.

use errfold_primitives::{DocumentId, ViewportId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Answers whether the host still has a viewport.
pub trait ViewportProbe {
	fn is_live(&self, viewport: ViewportId) -> bool;
}

impl<F: Fn(ViewportId) -> bool> ViewportProbe for F {
	fn is_live(&self, viewport: ViewportId) -> bool {
		self(viewport)
	}
}

/// Snapshot of one viewport's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
	pub id: ViewportId,
	pub document: DocumentId,
	pub enabled: bool,
	/// `None` until the host reports a cursor.
	pub cursor_row: Option<usize>,
}

/// Outcome of [`ViewportStateStore::set_cursor_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorUpdate {
	/// Same row as last observed.
	Unchanged,
	/// The row changed; the viewport shows this document.
	Moved(DocumentId),
	/// The viewport is not registered.
	Stale,
}

/// Registry of viewport state and the document each viewport shows.
///
/// Operations on an unknown or closed viewport are no-ops. The store has a
/// single owner; callers serialize access through it.
#[derive(Debug, Default)]
pub struct ViewportStateStore {
	auto_enable: bool,
	viewports: FxHashMap<ViewportId, ViewportState>,
	documents: FxHashMap<DocumentId, SmallVec<[ViewportId; 4]>>,
}

impl ViewportStateStore {
	/// Creates a store; viewports start enabled when `auto_enable` is set.
	pub fn new(auto_enable: bool) -> Self {
		Self {
			auto_enable,
			..Self::default()
		}
	}

	/// Applies to viewports opened from now on.
	pub fn set_auto_enable(&mut self, auto_enable: bool) {
		self.auto_enable = auto_enable;
	}

	/// Registers `viewport` as showing `document`.
	///
	/// Re-opening on the same document keeps the existing state. Redirecting
	/// to another document is a close followed by a fresh open; the previous
	/// document is returned.
	pub fn open(&mut self, viewport: ViewportId, document: DocumentId) -> Option<DocumentId> {
		let current = self.viewports.get(&viewport).map(|s| s.document);
		let previous = match current {
			Some(shown) if shown == document => return None,
			Some(_) => self.close(viewport),
			None => None,
		};

		self.viewports.insert(
			viewport,
			ViewportState {
				id: viewport,
				document,
				enabled: self.auto_enable,
				cursor_row: None,
			},
		);
		self.documents.entry(document).or_default().push(viewport);
		tracing::trace!(?viewport, ?document, redirected_from = ?previous, "viewport.open");
		previous
	}

	/// Forgets `viewport`, returning the document it showed.
	pub fn close(&mut self, viewport: ViewportId) -> Option<DocumentId> {
		let state = self.viewports.remove(&viewport)?;
		if let Some(list) = self.documents.get_mut(&state.document) {
			list.retain(|v| *v != viewport);
			if list.is_empty() {
				self.documents.remove(&state.document);
			}
		}
		tracing::trace!(?viewport, document = ?state.document, "viewport.close");
		Some(state.document)
	}

	/// Forgets every viewport showing `document`.
	pub fn close_document(&mut self, document: DocumentId) -> Vec<ViewportId> {
		let closed: Vec<ViewportId> = self.documents.remove(&document).map(|l| l.into_vec()).unwrap_or_default();
		for viewport in &closed {
			self.viewports.remove(viewport);
		}
		closed
	}

	/// Sets the enabled flag, returning the viewport's document if the flag
	/// actually changed.
	pub fn set_enabled(&mut self, viewport: ViewportId, enabled: bool) -> Option<DocumentId> {
		let state = self.viewports.get_mut(&viewport)?;
		if state.enabled == enabled {
			return None;
		}
		state.enabled = enabled;
		Some(state.document)
	}

	/// Flips the enabled flag, returning the document and the new value.
	pub fn toggle_enabled(&mut self, viewport: ViewportId) -> Option<(DocumentId, bool)> {
		let state = self.viewports.get_mut(&viewport)?;
		state.enabled = !state.enabled;
		Some((state.document, state.enabled))
	}

	/// False for unknown viewports.
	pub fn is_enabled(&self, viewport: ViewportId) -> bool {
		self.viewports.get(&viewport).is_some_and(|s| s.enabled)
	}

	/// Records a cursor row, coalescing repeats of the last observed row.
	pub fn set_cursor_row(&mut self, viewport: ViewportId, row: usize) -> CursorUpdate {
		let Some(state) = self.viewports.get_mut(&viewport) else {
			return CursorUpdate::Stale;
		};
		if state.cursor_row == Some(row) {
			return CursorUpdate::Unchanged;
		}
		state.cursor_row = Some(row);
		CursorUpdate::Moved(state.document)
	}

	pub fn cursor_row(&self, viewport: ViewportId) -> Option<usize> {
		self.viewports.get(&viewport).and_then(|s| s.cursor_row)
	}

	pub fn document_of(&self, viewport: ViewportId) -> Option<DocumentId> {
		self.viewports.get(&viewport).map(|s| s.document)
	}

	/// True if any registered viewport shows `document`.
	pub fn has_viewports(&self, document: DocumentId) -> bool {
		self.documents.contains_key(&document)
	}

	/// Documents with at least one registered viewport.
	pub fn documents(&self) -> impl Iterator<Item = DocumentId> + '_ {
		self.documents.keys().copied()
	}

	/// Live viewports showing `document`, in open order.
	///
	/// Entries `probe` reports dead are dropped from the store on the way.
	pub fn viewports_for(&mut self, document: DocumentId, probe: &dyn ViewportProbe) -> Vec<ViewportState> {
		let ids: SmallVec<[ViewportId; 4]> = self.documents.get(&document).cloned().unwrap_or_default();
		let mut live = Vec::with_capacity(ids.len());
		for id in ids {
			if !probe.is_live(id) {
				tracing::debug!(viewport = ?id, ?document, "viewport.stale: dropped");
				self.close(id);
			} else if let Some(state) = self.viewports.get(&id) {
				live.push(*state);
			}
		}
		live
	}

	/// Drops every entry whose viewport no longer exists, returning what was
	/// removed.
	pub fn sweep(&mut self, probe: &dyn ViewportProbe) -> Vec<(ViewportId, DocumentId)> {
		let dead: Vec<ViewportId> = self.viewports.keys().copied().filter(|&id| !probe.is_live(id)).collect();
		let removed: Vec<_> = dead.into_iter().filter_map(|id| self.close(id).map(|doc| (id, doc))).collect();
		if !removed.is_empty() {
			tracing::debug!(count = removed.len(), "viewport.sweep");
		}
		removed
	}

	pub fn len(&self) -> usize {
		self.viewports.len()
	}

	pub fn is_empty(&self) -> bool {
		self.viewports.is_empty()
	}
}

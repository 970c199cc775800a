//! Debounced refresh scheduling.
//!
//! Every text change for a document cancels its pending refresh and arms a
//! new timer; only the timer that survives the quiet window fires. Firings
//! arrive on a channel as [`RefreshDue`] values carrying the generation they
//! were armed with, and [`RefreshScheduler::accept`] rejects any whose
//! generation has since been superseded or cancelled.

use std::time::Duration;

use errfold_primitives::DocumentId;
use rustc_hash::FxHashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// A debounce timer that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshDue {
	pub doc_id: DocumentId,
	pub generation: u64,
}

/// Monotonic source of timer generations, starting at 1.
#[derive(Debug, Default)]
struct GenerationClock {
	last: u64,
}

impl GenerationClock {
	fn next(&mut self) -> u64 {
		self.last = self.last.wrapping_add(1);
		self.last
	}
}

#[derive(Debug)]
struct Pending {
	generation: u64,
	cancel: CancellationToken,
}

/// Per-document debounce timers.
#[derive(Debug)]
pub struct RefreshScheduler {
	debounce: Duration,
	clock: GenerationClock,
	pending: FxHashMap<DocumentId, Pending>,
	due_tx: mpsc::UnboundedSender<RefreshDue>,
	due_rx: mpsc::UnboundedReceiver<RefreshDue>,
}

impl RefreshScheduler {
	pub fn new(debounce: Duration) -> Self {
		let (due_tx, due_rx) = mpsc::unbounded_channel();
		Self {
			debounce,
			clock: GenerationClock::default(),
			pending: FxHashMap::default(),
			due_tx,
			due_rx,
		}
	}

	#[inline]
	pub fn debounce(&self) -> Duration {
		self.debounce
	}

	/// Changes the quiet window for timers armed from now on.
	pub fn set_debounce(&mut self, debounce: Duration) {
		self.debounce = debounce;
	}

	/// Cancels any pending refresh of `doc_id` and arms a new one, returning
	/// its generation.
	///
	/// A zero window, or a call outside a tokio runtime, fires immediately.
	pub fn schedule(&mut self, doc_id: DocumentId) -> u64 {
		if let Some(previous) = self.pending.remove(&doc_id) {
			previous.cancel.cancel();
			tracing::trace!(?doc_id, superseded = previous.generation, "refresh.reschedule");
		}

		let generation = self.clock.next();
		let cancel = CancellationToken::new();
		self.pending.insert(
			doc_id,
			Pending {
				generation,
				cancel: cancel.clone(),
			},
		);

		let due = RefreshDue { doc_id, generation };
		let handle = match tokio::runtime::Handle::try_current() {
			Ok(handle) if !self.debounce.is_zero() => handle,
			Ok(_) => {
				let _ = self.due_tx.send(due);
				return generation;
			}
			Err(_) => {
				tracing::debug!(?doc_id, "refresh.scheduled: no runtime; firing immediately");
				let _ = self.due_tx.send(due);
				return generation;
			}
		};

		let tx = self.due_tx.clone();
		let debounce = self.debounce;
		let deadline = tokio::time::Instant::now() + debounce;
		handle.spawn(async move {
			tokio::select! {
				_ = cancel.cancelled() => {}
				_ = tokio::time::sleep_until(deadline) => {
					let _ = tx.send(due);
				}
			}
		});
		tracing::trace!(?doc_id, generation, debounce_ms = debounce.as_millis() as u64, "refresh.scheduled");
		generation
	}

	/// Cancels the pending refresh of `doc_id`; its timer never fires.
	pub fn cancel(&mut self, doc_id: DocumentId) -> bool {
		match self.pending.remove(&doc_id) {
			Some(pending) => {
				pending.cancel.cancel();
				tracing::trace!(?doc_id, generation = pending.generation, "refresh.cancelled");
				true
			}
			None => false,
		}
	}

	pub fn cancel_all(&mut self) {
		for (_, pending) in self.pending.drain() {
			pending.cancel.cancel();
		}
	}

	pub fn is_pending(&self, doc_id: DocumentId) -> bool {
		self.pending.contains_key(&doc_id)
	}

	pub fn pending_count(&self) -> usize {
		self.pending.len()
	}

	/// Claims a firing. True only for the current generation of a document
	/// that is still pending; the pending entry is cleared.
	pub fn accept(&mut self, due: RefreshDue) -> bool {
		match self.pending.get(&due.doc_id) {
			Some(pending) if pending.generation == due.generation => {
				self.pending.remove(&due.doc_id);
				true
			}
			_ => {
				tracing::trace!(doc_id = ?due.doc_id, generation = due.generation, "refresh.stale: dropped");
				false
			}
		}
	}

	/// Next firing already delivered, without waiting.
	pub fn try_due(&mut self) -> Option<RefreshDue> {
		self.due_rx.try_recv().ok()
	}

	/// Waits for the next firing.
	pub async fn recv_due(&mut self) -> Option<RefreshDue> {
		self.due_rx.recv().await
	}
}

impl Drop for RefreshScheduler {
	fn drop(&mut self) {
		self.cancel_all();
	}
}

#[cfg(test)]
mod tests;

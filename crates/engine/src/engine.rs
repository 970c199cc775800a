//! The single-writer event loop.
//!
//! Every mutation of viewport and document state happens inside
//! [`Engine::handle`] (or the debounce and sweep firings driven by
//! [`Engine::run`]), one event at a time. Region sets are swapped in whole
//! behind an `Arc`, so a reconciliation pass always reads a complete set.

use std::sync::Arc;
use std::time::Duration;

use errfold_config::Config;
use errfold_display::{CursorUpdate, DisplayReconciler, PresentationSurface, ViewportProbe, ViewportStateStore, apply_instructions};
use errfold_language::SyntaxProvider;
use errfold_primitives::{DocumentId, Instruction, ViewportId};
use errfold_regions::{PatternMatcher, RegionSet};
use rustc_hash::{FxHashMap, FxHashSet};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use crate::event::{EventReceiver, HostEvent};
use crate::scheduler::{RefreshDue, RefreshScheduler};

/// Per-document state.
#[derive(Debug)]
struct DocState {
	regions: Arc<RegionSet>,
	/// Text changed since `regions` was built.
	dirty: bool,
	/// The grammar-unavailable notice has been logged.
	grammar_notice: bool,
	/// Instructions last applied without failures.
	last_applied: Option<Vec<Instruction>>,
}

impl Default for DocState {
	fn default() -> Self {
		Self {
			regions: Arc::default(),
			dirty: true,
			grammar_notice: false,
			last_applied: None,
		}
	}
}

/// Counters for observing the engine from hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EngineStats {
	/// Region sets rebuilt from a syntax tree.
	pub refreshes: u64,
	/// Reconciliation passes run.
	pub reconciles: u64,
	/// Passes whose instructions matched the last clean apply and were not re-sent.
	pub unchanged: u64,
	/// Instructions (and clears) the surface rejected.
	pub presentation_failures: u64,
}

enum Step {
	Event(HostEvent),
	Due(RefreshDue),
	Sweep,
	Closed,
}

/// Owns all state and the three host collaborators.
pub struct Engine {
	config: Config,
	provider: Box<dyn SyntaxProvider>,
	surface: Box<dyn PresentationSurface>,
	probe: Box<dyn ViewportProbe + Send>,
	store: ViewportStateStore,
	docs: FxHashMap<DocumentId, DocState>,
	matcher: PatternMatcher,
	reconciler: DisplayReconciler,
	scheduler: RefreshScheduler,
	stats: EngineStats,
}

impl Engine {
	pub fn new<P, S, L>(config: Config, provider: P, surface: S, probe: L) -> Self
	where
		P: SyntaxProvider + 'static,
		S: PresentationSurface + 'static,
		L: ViewportProbe + Send + 'static,
	{
		Self {
			store: ViewportStateStore::new(config.auto_enable),
			matcher: PatternMatcher::new(config.error_identifier.clone()),
			reconciler: DisplayReconciler::new(&config),
			scheduler: RefreshScheduler::new(config.debounce()),
			docs: FxHashMap::default(),
			stats: EngineStats::default(),
			provider: Box::new(provider),
			surface: Box::new(surface),
			probe: Box::new(probe),
			config,
		}
	}

	#[inline]
	pub fn config(&self) -> &Config {
		&self.config
	}

	#[inline]
	pub fn stats(&self) -> EngineStats {
		self.stats
	}

	#[inline]
	pub fn store(&self) -> &ViewportStateStore {
		&self.store
	}

	/// The current region set of `doc_id`, if it has been refreshed.
	pub fn regions(&self, doc_id: DocumentId) -> Option<Arc<RegionSet>> {
		self.docs.get(&doc_id).map(|s| Arc::clone(&s.regions))
	}

	pub fn is_refresh_pending(&self, doc_id: DocumentId) -> bool {
		self.scheduler.is_pending(doc_id)
	}

	/// Processes one host event.
	pub fn handle(&mut self, event: HostEvent) {
		match event {
			HostEvent::TextChanged(doc_id) => self.text_changed(doc_id),
			HostEvent::CursorMoved { viewport, row } => self.cursor_moved(viewport, row),
			HostEvent::ViewportOpened { viewport, document } => self.viewport_opened(viewport, document),
			HostEvent::ViewportClosed(viewport) => match self.store.close(viewport) {
				Some(doc_id) => self.viewport_left(doc_id),
				None => tracing::debug!(?viewport, "engine.stale: close of unknown viewport"),
			},
			HostEvent::DocumentClosed(doc_id) => self.document_closed(doc_id),
			HostEvent::EnabledChanged { viewport, enabled } => {
				if let Some(doc_id) = self.store.set_enabled(viewport, enabled) {
					self.show(doc_id);
				}
			}
			HostEvent::ToggleEnabled(viewport) => match self.store.toggle_enabled(viewport) {
				Some((doc_id, enabled)) => {
					tracing::debug!(?viewport, enabled, "engine.toggle");
					self.show(doc_id);
				}
				None => tracing::debug!(?viewport, "engine.stale: toggle of unknown viewport"),
			},
			HostEvent::ConfigChanged(config) => self.apply_config(*config),
			HostEvent::Sweep => self.sweep(),
		}
	}

	/// Runs every debounced refresh that has already fired. Returns how many
	/// refreshes ran.
	pub fn poll_refreshes(&mut self) -> usize {
		let mut ran = 0;
		while let Some(due) = self.scheduler.try_due() {
			if self.refresh_due(due) {
				ran += 1;
			}
		}
		ran
	}

	/// Processes events until every [`EngineHandle`] is dropped, interleaving
	/// debounced refreshes and the periodic sweep. Returns the engine for
	/// inspection.
	///
	/// [`EngineHandle`]: crate::EngineHandle
	pub async fn run(mut self, mut events: EventReceiver) -> Self {
		let mut period = self.config.sweep_interval();
		let mut sweep = sweep_timer(period);
		tracing::debug!(sweep_ms = period.as_millis() as u64, "engine.started");

		loop {
			let step = tokio::select! {
				event = events.recv() => event.map_or(Step::Closed, Step::Event),
				Some(due) = self.scheduler.recv_due() => Step::Due(due),
				_ = sweep.tick() => Step::Sweep,
			};

			match step {
				Step::Event(event) => {
					self.handle(event);
					if self.config.sweep_interval() != period {
						period = self.config.sweep_interval();
						sweep = sweep_timer(period);
					}
				}
				Step::Due(due) => {
					self.refresh_due(due);
				}
				Step::Sweep => self.sweep(),
				Step::Closed => break,
			}
		}

		self.scheduler.cancel_all();
		tracing::debug!(stats = ?self.stats, "engine.stopped");
		self
	}

	fn text_changed(&mut self, doc_id: DocumentId) {
		self.docs.entry(doc_id).or_default().dirty = true;
		if self.store.has_viewports(doc_id) {
			self.scheduler.schedule(doc_id);
		} else {
			tracing::trace!(?doc_id, "engine.text_changed: not shown; refresh deferred");
		}
	}

	fn cursor_moved(&mut self, viewport: ViewportId, row: usize) {
		match self.store.set_cursor_row(viewport, row) {
			CursorUpdate::Moved(doc_id) => self.reconcile(doc_id),
			CursorUpdate::Unchanged => tracing::trace!(?viewport, row, "engine.cursor: coalesced"),
			CursorUpdate::Stale => tracing::debug!(?viewport, "engine.stale: cursor of unknown viewport"),
		}
	}

	fn viewport_opened(&mut self, viewport: ViewportId, doc_id: DocumentId) {
		if let Some(previous) = self.store.open(viewport, doc_id) {
			self.viewport_left(previous);
		}
		self.show(doc_id);
	}

	/// A viewport stopped showing `doc_id`.
	fn viewport_left(&mut self, doc_id: DocumentId) {
		if self.store.has_viewports(doc_id) {
			self.reconcile(doc_id);
		} else if self.scheduler.cancel(doc_id) {
			tracing::debug!(?doc_id, "engine.viewport_left: last viewport gone; pending refresh cancelled");
		}
	}

	fn document_closed(&mut self, doc_id: DocumentId) {
		let closed = self.store.close_document(doc_id);
		self.scheduler.cancel(doc_id);
		if self.docs.remove(&doc_id).is_none() && closed.is_empty() {
			tracing::debug!(?doc_id, "engine.stale: close of unknown document");
		}
	}

	/// Brings the presentation of `doc_id` up to date: a refresh if the
	/// regions are stale and no debounced refresh is coming, else a
	/// reconciliation against the current regions.
	fn show(&mut self, doc_id: DocumentId) {
		let stale = self.docs.get(&doc_id).is_none_or(|s| s.dirty);
		if stale && !self.scheduler.is_pending(doc_id) {
			self.refresh(doc_id);
		} else {
			self.reconcile(doc_id);
		}
	}

	fn apply_config(&mut self, config: Config) {
		if config == self.config {
			return;
		}
		if config.error_identifier != self.config.error_identifier {
			self.matcher = PatternMatcher::new(config.error_identifier.clone());
		}
		self.reconciler = DisplayReconciler::new(&config);
		self.store.set_auto_enable(config.auto_enable);
		self.scheduler.set_debounce(config.debounce());
		self.config = config;
		tracing::info!(
			display_mode = %self.config.display_mode,
			dim_mode = %self.config.dim_mode,
			reveal_mode = %self.config.reveal_mode,
			"engine.config: applied"
		);

		for state in self.docs.values_mut() {
			state.dirty = true;
		}
		let shown: Vec<DocumentId> = self.store.documents().collect();
		for doc_id in shown {
			self.refresh(doc_id);
		}
	}

	fn sweep(&mut self) {
		let removed = self.store.sweep(self.probe.as_ref());
		let affected: FxHashSet<DocumentId> = removed.into_iter().map(|(_, doc_id)| doc_id).collect();
		for doc_id in affected {
			self.viewport_left(doc_id);
		}
	}

	fn refresh_due(&mut self, due: RefreshDue) -> bool {
		if !self.scheduler.accept(due) {
			return false;
		}
		if !self.store.has_viewports(due.doc_id) {
			tracing::debug!(doc_id = ?due.doc_id, "engine.refresh: document no longer shown; skipped");
			return false;
		}
		self.refresh(due.doc_id);
		true
	}

	/// Rebuilds the region set of `doc_id` and reconciles.
	fn refresh(&mut self, doc_id: DocumentId) {
		self.scheduler.cancel(doc_id);

		let regions = match self.provider.syntax(doc_id) {
			Ok(syntax) => RegionSet::build(&syntax, &mut self.matcher, self.config.max_association_distance),
			Err(error) if error.is_grammar_unavailable() => {
				let state = self.docs.entry(doc_id).or_default();
				if !state.grammar_notice {
					state.grammar_notice = true;
					tracing::info!(?doc_id, %error, "engine.refresh: no grammar; document has no regions");
				}
				RegionSet::default()
			}
			Err(error) => {
				tracing::debug!(?doc_id, %error, "engine.refresh: no syntax tree");
				RegionSet::default()
			}
		};

		let state = self.docs.entry(doc_id).or_default();
		state.regions = Arc::new(regions);
		state.dirty = false;
		self.stats.refreshes += 1;
		self.reconcile(doc_id);
	}

	fn reconcile(&mut self, doc_id: DocumentId) {
		let Some(state) = self.docs.get_mut(&doc_id) else {
			tracing::debug!(?doc_id, "engine.reconcile: document never refreshed");
			return;
		};

		let regions = Arc::clone(&state.regions);
		let instructions = self.reconciler.reconcile(doc_id, &regions, &mut self.store, self.probe.as_ref());
		self.stats.reconciles += 1;

		if state.last_applied.as_ref() == Some(&instructions) {
			self.stats.unchanged += 1;
			tracing::trace!(?doc_id, "engine.reconcile: unchanged");
			return;
		}

		let report = apply_instructions(self.surface.as_mut(), doc_id, &instructions);
		self.stats.presentation_failures += report.failed as u64;
		state.last_applied = report.is_clean().then_some(instructions);
	}
}

fn sweep_timer(period: Duration) -> Interval {
	let period = period.max(Duration::from_millis(1));
	let mut interval = tokio::time::interval_at(Instant::now() + period, period);
	interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
	interval
}

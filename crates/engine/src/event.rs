use errfold_config::Config;
use errfold_primitives::{DocumentId, ViewportId};
use thiserror::Error;
use tokio::sync::mpsc;

/// An event delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
	/// The document's text changed; refresh after the debounce window.
	TextChanged(DocumentId),
	CursorMoved { viewport: ViewportId, row: usize },
	/// A viewport started showing a document, or was redirected to one.
	ViewportOpened { viewport: ViewportId, document: DocumentId },
	ViewportClosed(ViewportId),
	DocumentClosed(DocumentId),
	EnabledChanged { viewport: ViewportId, enabled: bool },
	ToggleEnabled(ViewportId),
	/// Replace the running configuration.
	ConfigChanged(Box<Config>),
	/// Drop state for viewports the host no longer has.
	Sweep,
}

/// The engine's mailbox has shut down.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("engine is no longer running")]
pub struct EngineClosed;

/// Cloneable sender for delivering [`HostEvent`]s to a running engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
	tx: mpsc::UnboundedSender<HostEvent>,
}

impl EngineHandle {
	pub fn send(&self, event: HostEvent) -> Result<(), EngineClosed> {
		self.tx.send(event).map_err(|_| EngineClosed)
	}

	pub fn text_changed(&self, document: DocumentId) -> Result<(), EngineClosed> {
		self.send(HostEvent::TextChanged(document))
	}

	pub fn cursor_moved(&self, viewport: ViewportId, row: usize) -> Result<(), EngineClosed> {
		self.send(HostEvent::CursorMoved { viewport, row })
	}

	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

/// Receiving end of an engine mailbox, consumed by [`Engine::run`].
///
/// [`Engine::run`]: crate::Engine::run
pub type EventReceiver = mpsc::UnboundedReceiver<HostEvent>;

/// Creates a mailbox: the handle for hosts and the receiver for the engine.
pub fn mailbox() -> (EngineHandle, EventReceiver) {
	let (tx, rx) = mpsc::unbounded_channel();
	(EngineHandle { tx }, rx)
}

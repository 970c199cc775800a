//! The errfold engine.
//!
//! Hosts feed [`HostEvent`]s in (text changes, cursor moves, viewport and
//! document lifecycle, configuration) and the engine keeps a
//! [`PresentationSurface`] showing the right folds, dims and reveals for
//! every document's error-handling regions.
//!
//! Two ways to drive it:
//!
//! * synchronously, calling [`Engine::handle`] per event and
//!   [`Engine::poll_refreshes`] to run debounced refreshes that have fired;
//! * as an actor, spawning [`Engine::run`] with the receiver from
//!   [`mailbox`] and sending events through the cloneable [`EngineHandle`].
//!
//! Either way there is exactly one writer, so state is never read half
//! updated.
//!
//! [`PresentationSurface`]: errfold_display::PresentationSurface

mod engine;
mod event;
pub mod scheduler;

pub use engine::{Engine, EngineStats};
pub use event::{EngineClosed, EngineHandle, EventReceiver, HostEvent, mailbox};
pub use scheduler::{RefreshDue, RefreshScheduler};

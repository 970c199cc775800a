//! Viewport state and display reconciliation.
//!
//! [`ViewportStateStore`] tracks which viewports show which document, their
//! cursor rows and whether they are enabled. [`DisplayReconciler`] combines
//! that with a document's [`RegionSet`] and the configured modes to produce
//! the full instruction list for the document, which [`apply_instructions`]
//! hands to a [`PresentationSurface`] after clearing its previous marks.
//!
//! Passes are whole-document and stateless: the same regions and cursors
//! always produce the same instructions.
//!
//! [`RegionSet`]: errfold_regions::RegionSet

pub mod label;
pub mod reconcile;
pub mod store;
pub mod surface;

pub use label::compressed_label;
pub use reconcile::{DisplayReconciler, ReconcileError};
pub use store::{CursorUpdate, ViewportProbe, ViewportState, ViewportStateStore};
pub use surface::{ApplyReport, MemorySurface, PresentationError, PresentationSurface, apply_instructions};

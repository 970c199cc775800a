//! Core value types shared by every errfold crate.
//!
//! Nothing here knows about tree-sitter, configuration, or the presentation
//! layer. Types are small, `Copy` where possible, and compared structurally so
//! that reconciliation passes can be checked for idempotence byte-for-byte.

/// Identifier types for documents and viewports.
pub mod ids;
/// Display instructions issued to the presentation surface.
pub mod instruction;
/// Classified error-handling regions and their associations.
pub mod region;
/// Row/column positions, spans, and inclusive row ranges.
pub mod span;

pub use ids::{DocumentId, ViewportId};
pub use instruction::{DimStyle, Instruction};
pub use region::{Association, Region, RegionKind};
pub use ropey::{Rope, RopeSlice};
pub use span::{Position, RowRange, Span};

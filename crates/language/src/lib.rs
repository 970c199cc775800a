// Grammar operations must use tracing, not stderr.
#![deny(clippy::print_stderr)]

//! Tree-sitter integration.
//!
//! This crate is the only place that touches tree-sitter. Everything it hands
//! out is an owned value: [`Syntax`] bundles a tree with the exact source it
//! was parsed from, and query results are immutable [`SyntaxNode`] values
//! (span, cached text, an outline of direct named children) that outlive the tree borrow.
//!
//! # Architecture
//!
//! * [`language`]: bundled grammars and language detection
//! * [`syntax`]: parsing and the [`SyntaxNode`] value type
//! * [`query`]: compiled [`Pattern`]s and their [`QueryMatch`] results
//! * [`provider`]: the [`SyntaxProvider`] seam and the bundled
//!   [`DocumentSources`] implementation

pub mod language;
pub mod provider;
pub mod query;
pub mod syntax;

pub use language::LanguageId;
pub use provider::{DocumentSources, SyntaxProvider};
pub use query::{Capture, Pattern, QueryMatch};
pub use syntax::{ChildNode, Syntax, SyntaxError, SyntaxNode};

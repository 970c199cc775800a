//! Error-handling region detection.
//!
//! A refresh runs three leaf-first stages over one syntax tree:
//!
//! 1. [`PatternMatcher`] queries the tree for null-check conditionals (plain
//!    and inline-declared) and for declarations binding the error identifier.
//! 2. [`classify`] turns those raw matches into typed [`Region`]s, resolving
//!    the inner body of inline blocks from the source text.
//! 3. [`associate`] links each declaration to the nearest block it feeds.
//!
//! [`RegionSet::build`] runs all three and packages the result with the
//! source snapshot it was computed from. A set is never patched: the next
//! refresh builds a new one.
//!
//! [`Region`]: errfold_primitives::Region

pub mod associate;
pub mod classify;
pub mod matcher;
mod set;

pub use associate::associate;
pub use classify::classify;
pub use matcher::{CheckMatch, PatternMatcher, RawMatches};
pub use set::RegionSet;

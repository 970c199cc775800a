//! The syntax-tree seam between the host and the region engine.

use std::sync::Arc;

use errfold_primitives::{DocumentId, Rope};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::language::LanguageId;
use crate::syntax::{Syntax, SyntaxError};

/// Supplies the current syntax tree for a document.
///
/// Returning [`SyntaxError::GrammarUnavailable`] is the normal answer for a
/// document in a language without a grammar; callers degrade to "no regions".
pub trait SyntaxProvider: Send {
	fn syntax(&self, doc_id: DocumentId) -> Result<Syntax, SyntaxError>;
}

impl<T: SyntaxProvider + Sync + ?Sized> SyntaxProvider for Arc<T> {
	fn syntax(&self, doc_id: DocumentId) -> Result<Syntax, SyntaxError> {
		(**self).syntax(doc_id)
	}
}

struct SourceEntry {
	text: Rope,
	language: Option<LanguageId>,
	version: u64,
	/// Tree for `version`, parsed on first request.
	parsed: Option<Syntax>,
}

/// Bundled provider: holds document text pushed by the host and parses it
/// lazily, at most once per version.
#[derive(Default)]
pub struct DocumentSources {
	docs: Mutex<FxHashMap<DocumentId, SourceEntry>>,
}

impl DocumentSources {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a document, replacing any previous text and language.
	pub fn open(&self, doc_id: DocumentId, text: impl Into<Rope>, language: Option<LanguageId>) {
		self.docs.lock().insert(
			doc_id,
			SourceEntry {
				text: text.into(),
				language,
				version: 1,
				parsed: None,
			},
		);
	}

	/// Replaces a document's text and returns its new version.
	///
	/// Returns `None` for a document that was never opened.
	pub fn set_text(&self, doc_id: DocumentId, text: impl Into<Rope>) -> Option<u64> {
		let mut docs = self.docs.lock();
		let entry = docs.get_mut(&doc_id)?;
		entry.text = text.into();
		entry.version += 1;
		entry.parsed = None;
		Some(entry.version)
	}

	pub fn close(&self, doc_id: DocumentId) {
		self.docs.lock().remove(&doc_id);
	}

	pub fn text(&self, doc_id: DocumentId) -> Option<Rope> {
		self.docs.lock().get(&doc_id).map(|e| e.text.clone())
	}

	pub fn version(&self, doc_id: DocumentId) -> Option<u64> {
		self.docs.lock().get(&doc_id).map(|e| e.version)
	}
}

impl SyntaxProvider for DocumentSources {
	fn syntax(&self, doc_id: DocumentId) -> Result<Syntax, SyntaxError> {
		let mut docs = self.docs.lock();
		let entry = docs.get_mut(&doc_id).ok_or(SyntaxError::UnknownDocument(doc_id))?;
		let language = entry.language.ok_or_else(|| SyntaxError::GrammarUnavailable("plain text".to_string()))?;

		if let Some(parsed) = &entry.parsed {
			return Ok(parsed.clone());
		}

		let syntax = Syntax::parse(entry.text.clone(), language)?;
		tracing::trace!(?doc_id, version = entry.version, "syntax.provider: parsed");
		entry.parsed = Some(syntax.clone());
		Ok(syntax)
	}
}

#[cfg(test)]
mod tests;

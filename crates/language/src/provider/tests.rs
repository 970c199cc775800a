use std::sync::Arc;

use errfold_primitives::DocumentId;

use super::*;

const DOC: DocumentId = DocumentId(1);

#[test]
fn unknown_document_is_an_error() {
	let sources = DocumentSources::new();
	assert!(matches!(sources.syntax(DOC), Err(SyntaxError::UnknownDocument(id)) if id == DOC));
}

#[test]
fn document_without_language_has_no_grammar() {
	let sources = DocumentSources::new();
	sources.open(DOC, "just some notes\n", None);
	let err = sources.syntax(DOC).unwrap_err();
	assert!(err.is_grammar_unavailable(), "got {err:?}");
}

#[test]
fn set_text_bumps_version_and_reparses() {
	let sources = DocumentSources::new();
	sources.open(DOC, "package main\n", Some(LanguageId::Go));
	assert_eq!(sources.version(DOC), Some(1));

	let first = sources.syntax(DOC).expect("parses");
	assert_eq!(first.text(), "package main\n");

	assert_eq!(sources.set_text(DOC, "package other\n"), Some(2));
	let second = sources.syntax(DOC).expect("parses");
	assert_eq!(second.text(), "package other\n");
	assert_eq!(sources.text(DOC).map(|t| t.to_string()).as_deref(), Some("package other\n"));
}

#[test]
fn set_text_on_unopened_document_is_ignored() {
	let sources = DocumentSources::new();
	assert_eq!(sources.set_text(DOC, "x"), None);
	assert_eq!(sources.version(DOC), None);
}

#[test]
fn close_forgets_the_document() {
	let sources = DocumentSources::new();
	sources.open(DOC, "package main\n", Some(LanguageId::Go));
	sources.close(DOC);
	assert!(sources.text(DOC).is_none());
	assert!(matches!(sources.syntax(DOC), Err(SyntaxError::UnknownDocument(_))));
}

#[test]
fn shared_provider_delegates() {
	let sources = Arc::new(DocumentSources::new());
	sources.open(DOC, "package main\n", Some(LanguageId::Go));
	let provider: Box<dyn SyntaxProvider> = Box::new(Arc::clone(&sources));
	assert_eq!(provider.syntax(DOC).expect("parses").language(), LanguageId::Go);
}

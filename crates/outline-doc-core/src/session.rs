use tracing::debug;

use crate::document::Document;
use crate::error::{OutlineError, OutlineResult};
use crate::render::render_html;
use crate::section::Section;
use crate::store::{DocumentStore, StoreError};

/// Editing session holding at most one open document.
///
/// Callers own the session and every lifecycle transition goes through it,
/// so a document name exists exactly while a document is open. While closed,
/// read operations behave as a fresh empty document and mutating operations
/// fail with [`OutlineError::NoDocumentOpen`].
pub struct Session<S: DocumentStore> {
    store: S,
    current: Option<Document>,
}

impl<S: DocumentStore> Session<S> {
    /// Starts the session in the closed state.
    pub fn new(store: S) -> Self {
        Self {
            store,
            current: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Name of the open document, or `None` while closed. A closed session
    /// is a normal, queryable state, not an error.
    pub fn name(&self) -> Option<&str> {
        self.current.as_ref().map(Document::name)
    }

    pub fn document(&self) -> Option<&Document> {
        self.current.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.current.as_mut()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Creates a fresh empty document named `name`, discarding whatever
    /// document was open without saving it.
    pub fn new_doc(&mut self, name: &str) -> OutlineResult<()> {
        validate_name(name)?;
        debug!(name, "creating document");
        self.current = Some(Document::new(name));
        Ok(())
    }

    /// Opens the document stored under `name`, implicitly discarding any
    /// open document first. A name with no stored content starts a fresh
    /// document instead of failing.
    pub fn open_doc(&mut self, name: &str) -> OutlineResult<()> {
        validate_name(name)?;
        match self.store.load(name) {
            Ok(document) => {
                debug!(name, "opened stored document");
                self.current = Some(document);
                Ok(())
            }
            Err(StoreError::NotFound(_)) => self.new_doc(name),
            Err(err) => Err(err.into()),
        }
    }

    /// Persists the open document under its name, replacing any prior state
    /// stored under that key.
    pub fn save_doc(&mut self) -> OutlineResult<()> {
        let document = self.current.as_ref().ok_or(OutlineError::NoDocumentOpen)?;
        self.store.store(document.name(), document)?;
        debug!(name = %document.name(), "saved document");
        Ok(())
    }

    /// Discards the in-memory document and returns to the closed state.
    /// Never saves implicitly; idempotent.
    pub fn close_doc(&mut self) {
        if let Some(document) = self.current.take() {
            debug!(name = %document.name(), "closed document");
        }
    }

    /// Renders the open document and forwards the markup to the store under
    /// the document's name.
    pub fn save_html(&mut self) -> OutlineResult<()> {
        let document = self.current.as_ref().ok_or(OutlineError::NoDocumentOpen)?;
        let markup = render_html(document);
        self.store.store_markup(document.name(), &markup)?;
        Ok(())
    }

    /// Renames the open document. The stored state keyed by the old name is
    /// left untouched until the next `save_doc`.
    pub fn set_name(&mut self, name: &str) -> OutlineResult<()> {
        let document = self.current.as_mut().ok_or(OutlineError::NoDocumentOpen)?;
        validate_name(name)?;
        document.set_name(name);
        Ok(())
    }

    /// Appends `section` to the open document.
    pub fn add_section(&mut self, section: Section) -> OutlineResult<()> {
        let document = self.current.as_mut().ok_or(OutlineError::NoDocumentOpen)?;
        document.add_section(section);
        Ok(())
    }

    /// Inserts `section` at `index` in the open document.
    pub fn insert_section(&mut self, index: usize, section: Section) -> OutlineResult<()> {
        let document = self.current.as_mut().ok_or(OutlineError::NoDocumentOpen)?;
        document.insert_section(index, section)
    }

    /// Section at `index`. A closed session reads as an empty document.
    pub fn section(&self, index: usize) -> OutlineResult<&Section> {
        match &self.current {
            Some(document) => document.section(index),
            None => Err(OutlineError::IndexOutOfBounds { index, len: 0 }),
        }
    }

    pub fn section_mut(&mut self, index: usize) -> OutlineResult<&mut Section> {
        match &mut self.current {
            Some(document) => document.section_mut(index),
            None => Err(OutlineError::IndexOutOfBounds { index, len: 0 }),
        }
    }

    /// Removes and returns the section at `index`.
    pub fn remove_section(&mut self, index: usize) -> OutlineResult<Section> {
        let document = self.current.as_mut().ok_or(OutlineError::NoDocumentOpen)?;
        document.remove_section(index)
    }

    /// Repositions the section at `index` by a signed `offset`.
    pub fn move_section(&mut self, index: usize, offset: isize) -> OutlineResult<()> {
        let document = self.current.as_mut().ok_or(OutlineError::NoDocumentOpen)?;
        document.move_section(index, offset)
    }

    /// Removes every section from the open document. A no-op while closed.
    pub fn clear(&mut self) {
        if let Some(document) = &mut self.current {
            document.clear();
        }
    }

    /// Number of sections; 0 while closed.
    pub fn section_count(&self) -> usize {
        self.current.as_ref().map_or(0, Document::section_count)
    }
}

fn validate_name(name: &str) -> OutlineResult<()> {
    if name.is_empty() {
        return Err(OutlineError::InvalidArgument(
            "document name must not be empty".to_string(),
        ));
    }
    Ok(())
}

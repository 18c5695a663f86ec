use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::document::Document;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no stored document named '{0}'")]
    NotFound(String),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("stored document is not valid: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable keyed storage for documents and their rendered exports.
///
/// `load` after `store` must round-trip exactly: section order, paragraph
/// order, names, and paragraph text are all preserved.
pub trait DocumentStore {
    /// Persists `document` under `name`, replacing any prior state held
    /// under that key.
    fn store(&mut self, name: &str, document: &Document) -> StoreResult<()>;

    /// Retrieves the document stored under `name`, or [`StoreError::NotFound`]
    /// if nothing was ever stored there.
    fn load(&self, name: &str) -> StoreResult<Document>;

    /// Persists rendered markup under `name`.
    fn store_markup(&mut self, name: &str, markup: &str) -> StoreResult<()>;
}

/// File-backed store keeping each document as `<root>/<name>.json` and its
/// rendered export as `<root>/<name>.<markup_ext>`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    pretty: bool,
    markup_ext: String,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            pretty: true,
            markup_ext: "html".to_string(),
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_markup_extension(mut self, extension: impl Into<String>) -> Self {
        self.markup_ext = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.json"))
    }

    fn markup_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.{}", self.markup_ext))
    }

    fn write_payload(&self, path: &Path, payload: &[u8]) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        write_atomic(path, payload)?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn store(&mut self, name: &str, document: &Document) -> StoreResult<()> {
        let payload = if self.pretty {
            serde_json::to_vec_pretty(document)?
        } else {
            serde_json::to_vec(document)?
        };
        self.write_payload(&self.document_path(name), &payload)?;
        debug!(name, "stored document");
        Ok(())
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        let path = self.document_path(name);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(name.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn store_markup(&mut self, name: &str, markup: &str) -> StoreResult<()> {
        self.write_payload(&self.markup_path(name), markup.as_bytes())?;
        debug!(name, "stored rendered markup");
        Ok(())
    }
}

/// Writes through a temporary sibling and renames into place, so a stored
/// document is never observable half-written.
fn write_atomic(path: &Path, payload: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(payload)?;
        file.sync_all()?;
    }

    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(err);
    }

    Ok(())
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, Document>,
    markup: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self, name: &str) -> Option<&str> {
        self.markup.get(name).map(String::as_str)
    }
}

impl DocumentStore for MemoryStore {
    fn store(&mut self, name: &str, document: &Document) -> StoreResult<()> {
        self.documents.insert(name.to_string(), document.clone());
        Ok(())
    }

    fn load(&self, name: &str) -> StoreResult<Document> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    fn store_markup(&mut self, name: &str, markup: &str) -> StoreResult<()> {
        self.markup.insert(name.to_string(), markup.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paragraph::Paragraph;
    use crate::section::Section;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn sample_document() -> Document {
        let mut document = Document::new("notes");
        let mut section = Section::new("intro");
        section.add_paragraph(Paragraph::new("hello"));
        section.add_paragraph(Paragraph::new("world"));
        document.add_section(section);
        document.add_section(Section::new("outro"));
        document
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        let document = sample_document();
        store.store("notes", &document).unwrap();
        assert!(dir.path().join("notes.json").exists());

        let loaded = store.load("notes").unwrap();
        assert_eq!(loaded, document);
    }

    #[test]
    fn load_missing_name_is_not_found() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        let err = store.load("absent").unwrap_err();
        assert!(matches!(err, StoreError::NotFound(name) if name == "absent"));
    }

    #[test]
    fn store_overwrites_prior_state() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path());

        store.store("notes", &sample_document()).unwrap();
        let replacement = Document::new("notes");
        store.store("notes", &replacement).unwrap();

        assert_eq!(store.load("notes").unwrap(), replacement);
    }

    #[test]
    fn corrupt_payload_is_reported() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "not json").unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(matches!(
            store.load("bad").unwrap_err(),
            StoreError::Corrupt(_)
        ));
    }

    #[test]
    fn markup_lands_next_to_the_document() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::new(dir.path()).with_markup_extension("htm");
        store.store_markup("notes", "<p>hi</p>").unwrap();
        let written = std::fs::read_to_string(dir.path().join("notes.htm")).unwrap();
        assert_eq!(written, "<p>hi</p>");
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        let document = sample_document();
        store.store("notes", &document).unwrap();
        assert_eq!(store.load("notes").unwrap(), document);
        assert!(store.load("absent").is_err());
    }
}

//! Core model for the outline-doc editor: ordered sections of paragraphs,
//! an open/closed editing session, durable storage, and HTML export.

pub mod document;
pub mod error;
pub mod list;
pub mod paragraph;
pub mod render;
pub mod section;
pub mod session;
pub mod store;

pub use document::Document;
pub use error::{OutlineError, OutlineResult};
pub use list::OrderedList;
pub use paragraph::Paragraph;
pub use render::render_html;
pub use section::Section;
pub use session::Session;
pub use store::{DocumentStore, JsonFileStore, MemoryStore, StoreError};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OutlineResult;
use crate::list::OrderedList;
use crate::section::Section;

/// A named, ordered collection of sections; the unit of persistence.
///
/// A `Document` value always carries a name. The "no document open" state
/// lives in [`crate::session::Session`] as the absence of a `Document`, so
/// the open/closed invariant is enforced by the type rather than by a null
/// sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    name: String,
    sections: OrderedList<Section>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: OrderedList::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends `section` at the end of the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Inserts `section` at `index`, shifting subsequent sections forward.
    pub fn insert_section(&mut self, index: usize, section: Section) -> OutlineResult<()> {
        self.sections.insert(index, section)
    }

    pub fn section(&self, index: usize) -> OutlineResult<&Section> {
        self.sections.get(index)
    }

    pub fn section_mut(&mut self, index: usize) -> OutlineResult<&mut Section> {
        self.sections.get_mut(index)
    }

    /// Removes and returns the section at `index`.
    pub fn remove_section(&mut self, index: usize) -> OutlineResult<Section> {
        self.sections.remove(index)
    }

    /// Repositions the section at `index` by a signed `offset`.
    pub fn move_section(&mut self, index: usize, offset: isize) -> OutlineResult<()> {
        self.sections.move_by(index, offset)
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }
}

/// Diagnostic dump: the name followed by each section's own rendering.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for section in self.sections.iter() {
            write!(f, "\n{section}")?;
        }
        Ok(())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::OutlineResult;
use crate::list::OrderedList;
use crate::paragraph::Paragraph;

/// A titled section holding an ordered run of paragraphs.
///
/// The name is always present; the empty string is the default title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    name: String,
    paragraphs: OrderedList<Paragraph>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            paragraphs: OrderedList::new(),
        }
    }

    pub fn with_paragraphs(
        name: impl Into<String>,
        paragraphs: impl IntoIterator<Item = Paragraph>,
    ) -> Self {
        Self {
            name: name.into(),
            paragraphs: paragraphs.into_iter().collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends `paragraph` at the end of the section.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Inserts `paragraph` at `index`, shifting subsequent paragraphs
    /// forward.
    pub fn insert_paragraph(&mut self, index: usize, paragraph: Paragraph) -> OutlineResult<()> {
        self.paragraphs.insert(index, paragraph)
    }

    pub fn paragraph(&self, index: usize) -> OutlineResult<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraph_mut(&mut self, index: usize) -> OutlineResult<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    /// Removes and returns the paragraph at `index`.
    pub fn remove_paragraph(&mut self, index: usize) -> OutlineResult<Paragraph> {
        self.paragraphs.remove(index)
    }

    /// Repositions the paragraph at `index` by a signed `offset`.
    pub fn move_paragraph(&mut self, index: usize, offset: isize) -> OutlineResult<()> {
        self.paragraphs.move_by(index, offset)
    }

    pub fn clear(&mut self) {
        self.paragraphs.clear();
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs.iter()
    }
}

/// Diagnostic dump: the name followed by each paragraph on its own indented
/// line. Not used for persistence or export.
impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for paragraph in self.paragraphs.iter() {
            write!(f, "\n\t{paragraph}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutlineError;

    #[test]
    fn default_section_has_empty_name() {
        let section = Section::default();
        assert_eq!(section.name(), "");
        assert_eq!(section.paragraph_count(), 0);
    }

    #[test]
    fn add_appends_and_insert_places() {
        let mut section = Section::new("body");
        section.add_paragraph(Paragraph::new("second"));
        section.insert_paragraph(0, Paragraph::new("first")).unwrap();
        assert_eq!(section.paragraph(0).unwrap().text(), "first");
        assert_eq!(section.paragraph(1).unwrap().text(), "second");
    }

    #[test]
    fn insert_out_of_bounds_is_rejected() {
        let mut section = Section::new("body");
        let err = section
            .insert_paragraph(1, Paragraph::new("stray"))
            .unwrap_err();
        assert!(matches!(err, OutlineError::IndexOutOfBounds { .. }));
        assert_eq!(section.paragraph_count(), 0);
    }

    #[test]
    fn remove_and_move_delegate_with_bounds() {
        let mut section = Section::with_paragraphs(
            "body",
            ["one", "two", "three"].map(Paragraph::new),
        );
        section.move_paragraph(2, -2).unwrap();
        assert_eq!(section.paragraph(0).unwrap().text(), "three");

        let removed = section.remove_paragraph(1).unwrap();
        assert_eq!(removed.text(), "one");
        assert!(section.remove_paragraph(2).is_err());
    }

    #[test]
    fn display_lists_name_then_paragraphs() {
        let mut section = Section::new("intro");
        section.add_paragraph(Paragraph::new("alpha"));
        section.add_paragraph(Paragraph::new("beta"));
        assert_eq!(section.to_string(), "intro\n\talpha\n\tbeta");
    }
}

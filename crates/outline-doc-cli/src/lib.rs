use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use outline_doc_config::{Config, LoadOptions};
use outline_doc_core::{JsonFileStore, Paragraph, Section, Session};

/// Entry point for CLI execution. Returns the desired exit code.
///
/// Each subcommand is one-shot: it opens the named document through the
/// session, applies a single operation, and saves. Invariants live in the
/// core; this layer only maps arguments.
pub fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut load = LoadOptions::default();
    if let Some(path) = &cli.config {
        load = load.with_override_path(path);
    }
    let config = Config::load(load)?;

    let store = JsonFileStore::new(config.storage.root)
        .with_pretty(config.storage.pretty)
        .with_markup_extension(config.export.extension);
    let mut session = Session::new(store);

    match cli.command {
        Command::New { doc } => {
            session.new_doc(&doc)?;
            session.save_doc()?;
        }
        Command::Rename { doc, name } => {
            session.open_doc(&doc)?;
            session.set_name(&name)?;
            session.save_doc()?;
        }
        Command::AddSection { doc, name, at } => {
            session.open_doc(&doc)?;
            match at {
                Some(index) => session.insert_section(index, Section::new(name))?,
                None => session.add_section(Section::new(name))?,
            }
            session.save_doc()?;
        }
        Command::AddParagraph {
            doc,
            section,
            text,
            at,
        } => {
            session.open_doc(&doc)?;
            let target = session.section_mut(section)?;
            match at {
                Some(index) => target.insert_paragraph(index, Paragraph::new(text))?,
                None => target.add_paragraph(Paragraph::new(text)),
            }
            session.save_doc()?;
        }
        Command::RmSection { doc, index } => {
            session.open_doc(&doc)?;
            session.remove_section(index)?;
            session.save_doc()?;
        }
        Command::RmParagraph {
            doc,
            section,
            index,
        } => {
            session.open_doc(&doc)?;
            session.section_mut(section)?.remove_paragraph(index)?;
            session.save_doc()?;
        }
        Command::MvSection { doc, index, offset } => {
            session.open_doc(&doc)?;
            session.move_section(index, offset)?;
            session.save_doc()?;
        }
        Command::MvParagraph {
            doc,
            section,
            index,
            offset,
        } => {
            session.open_doc(&doc)?;
            session.section_mut(section)?.move_paragraph(index, offset)?;
            session.save_doc()?;
        }
        Command::Clear { doc } => {
            session.open_doc(&doc)?;
            session.clear();
            session.save_doc()?;
        }
        Command::Show { doc } => {
            session.open_doc(&doc)?;
            if let Some(document) = session.document() {
                println!("{document}");
            }
        }
        Command::Export { doc } => {
            session.open_doc(&doc)?;
            session.save_html()?;
        }
    }

    Ok(0)
}

#[derive(Parser)]
#[command(
    name = "outline-doc",
    about = "Edit outline documents made of sections and paragraphs",
    version
)]
struct Cli {
    /// Config file applied on top of `.outline-doc.toml` discovery.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty document and save it.
    New { doc: String },
    /// Rename a document; the next save writes under the new name.
    Rename { doc: String, name: String },
    /// Append a section, or insert it at a position with --at.
    AddSection {
        doc: String,
        name: String,
        #[arg(long)]
        at: Option<usize>,
    },
    /// Append a paragraph to a section, or insert it at a position with --at.
    AddParagraph {
        doc: String,
        /// Section position, zero-indexed.
        section: usize,
        text: String,
        #[arg(long)]
        at: Option<usize>,
    },
    /// Remove the section at a position.
    RmSection { doc: String, index: usize },
    /// Remove a paragraph from a section.
    RmParagraph {
        doc: String,
        section: usize,
        index: usize,
    },
    /// Move the section at a position by a signed offset.
    MvSection {
        doc: String,
        index: usize,
        #[arg(allow_hyphen_values = true)]
        offset: isize,
    },
    /// Move a paragraph within a section by a signed offset.
    MvParagraph {
        doc: String,
        section: usize,
        index: usize,
        #[arg(allow_hyphen_values = true)]
        offset: isize,
    },
    /// Remove every section from a document.
    Clear { doc: String },
    /// Print the document's diagnostic outline.
    Show { doc: String },
    /// Render the document to HTML next to its stored form.
    Export { doc: String },
}

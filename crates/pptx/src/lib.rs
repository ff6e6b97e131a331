//! Minimal OOXML presentation writer and reader.
//!
//! A `.pptx` file is a zip package of XML parts. This crate renders a
//! `DeckSpec` into such a package (one slide part per spec, fixed master/
//! layout/theme boilerplate, media parts for resolved icon images) and can
//! re-open a package to report slide and shape counts.

mod emu;
mod inspect;
mod package;
mod parts;
mod render;
mod shapes;

use std::path::Path;

use blockdeck_core::{DeckSpec, IconResolver};
use thiserror::Error;

pub use inspect::PackageSummary;

#[derive(Debug, Error)]
pub enum PptxError {
    #[error("presentation io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("presentation archive failure: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("presentation xml failure: {0}")]
    Xml(String),
    #[error("package has no `{0}` part")]
    MissingPart(String),
}

impl From<quick_xml::Error> for PptxError {
    fn from(error: quick_xml::Error) -> Self {
        Self::Xml(error.to_string())
    }
}

/// Renders the deck and writes the package to `path` in a single
/// serialize-to-file step. Filesystem failures propagate unchanged; there is
/// no partial output to clean up.
pub fn write_deck(deck: &DeckSpec, icons: &IconResolver, path: &Path) -> Result<(), PptxError> {
    let rendered = render::render_deck(deck, icons)?;
    package::write_package(&rendered, path)?;
    tracing::info!(
        path = %path.display(),
        slides = deck.slide_count(),
        "presentation written"
    );
    Ok(())
}

/// Reopens a written package and summarizes it (round-trip facility).
pub fn inspect(path: &Path) -> Result<PackageSummary, PptxError> {
    inspect::inspect_package(path)
}

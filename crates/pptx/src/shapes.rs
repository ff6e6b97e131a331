//! Intermediate render model: what the slide XML serializer consumes.
//!
//! `render` lowers `SlideSpec`s into these values; `package` serializes them.

use std::path::PathBuf;

use blockdeck_core::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Debug)]
pub struct TextRun {
    pub text: String,
    pub size_pt: u32,
    pub bold: bool,
    pub italic: bool,
    /// `None` inherits the theme text color (dark on light).
    pub color: Option<Rgb>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>, size_pt: u32) -> Self {
        Self { text: text.into(), size_pt, bold: false, italic: false, color: None }
    }

    pub fn bold(text: impl Into<String>, size_pt: u32) -> Self {
        Self { bold: true, ..Self::plain(text, size_pt) }
    }

    pub fn white(mut self) -> Self {
        self.color = Some(Rgb(0xFF, 0xFF, 0xFF));
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }
}

#[derive(Clone, Debug)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub align: Align,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Geometry {
    RoundedRectangle,
    Rectangle,
    TextBox,
}

/// One placed shape. Position and extent in EMU.
#[derive(Clone, Debug)]
pub struct Shape {
    pub geometry: Geometry,
    pub fill: Option<Rgb>,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
    pub paragraphs: Vec<Paragraph>,
}

/// An embedded icon image. `media_index` points into the deck-level media
/// list; the per-slide relationship id is assigned at serialization time.
#[derive(Clone, Debug)]
pub struct Picture {
    pub media_index: usize,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

#[derive(Clone, Debug, Default)]
pub struct RenderedSlide {
    pub shapes: Vec<Shape>,
    pub pictures: Vec<Picture>,
}

#[derive(Clone, Debug, Default)]
pub struct RenderedDeck {
    pub slides: Vec<RenderedSlide>,
    /// Deduplicated icon files to copy into `ppt/media/`.
    pub media: Vec<PathBuf>,
}

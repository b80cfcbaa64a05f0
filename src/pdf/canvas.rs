use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::metrics;
use super::style::{PdfColor, PdfFont, PdfStyle, PdfTextAlignment};

/// Horizontal space between a cell border and its text, in millimetres.
pub const CELL_MARGIN: f32 = 1.0;

/// A rectangle in millimetres, origin at the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PdfRect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Page `(width, height)` in millimetres.
pub fn page_size(format: PageFormat, orientation: Orientation) -> (f32, f32) {
    let (width, height) = match format {
        PageFormat::A4 => (210.0, 297.0),
        PageFormat::Letter => (215.9, 279.4),
    };
    match orientation {
        Orientation::Portrait => (width, height),
        Orientation::Landscape => (height, width),
    }
}

/// A text cell to draw: background, borders, then the aligned text.
#[derive(Debug, Clone, Copy)]
pub struct CanvasCell<'a> {
    pub bounds: PdfRect,
    pub text: &'a str,
    pub style: &'a PdfStyle,
    pub alignment: PdfTextAlignment,
}

impl CanvasCell<'_> {
    /// Left edge of the text once aligned within the cell.
    pub fn text_x(&self, text_width: f32) -> f32 {
        let left = self.bounds.x + CELL_MARGIN + self.style.indent;
        match self.alignment {
            PdfTextAlignment::Left => left,
            PdfTextAlignment::Right => self.bounds.right() - CELL_MARGIN - text_width,
            PdfTextAlignment::Center => {
                left + (self.bounds.right() - CELL_MARGIN - left - text_width) / 2.0
            }
        }
    }

    /// Baseline of the text, vertically centered.
    pub fn text_baseline(&self) -> f32 {
        let size = self.style.font.size * metrics::MM_PER_PT;
        self.bounds.y + self.bounds.height / 2.0 + size * 0.35
    }
}

/// A page-oriented drawing surface.
///
/// Coordinates are millimetres from the top-left corner of the current page.
/// Pages are numbered from 1; `current_page` is 0 until a page is added.
pub trait Canvas {
    fn page_width(&self) -> f32;

    fn page_height(&self) -> f32;

    fn page_count(&self) -> usize;

    fn current_page(&self) -> usize;

    /// Append a page and make it current.
    fn add_page(&mut self);

    /// Make an existing page current; out of range pages are ignored.
    fn select_page(&mut self, page: usize);

    fn cell(&mut self, cell: &CanvasCell<'_>);

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: PdfColor, width: f32);

    fn image(&mut self, bounds: PdfRect, image: &DynamicImage);

    /// Make `bounds` a clickable link to `url`.
    fn link(&mut self, bounds: PdfRect, url: &str);

    fn string_width(&self, text: &str, font: &PdfFont) -> f32 {
        metrics::string_width(text, font)
    }
}

use image::DynamicImage;

use super::canvas::{page_size, Canvas, CanvasCell, Orientation, PageFormat, PdfRect};
use super::style::{PdfColor, PdfStyle, PdfTextAlignment};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCell {
    pub page: usize,
    pub bounds: PdfRect,
    pub text: String,
    pub style: PdfStyle,
    pub alignment: PdfTextAlignment,
}

/// Cells sharing the same page and top edge.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRow {
    pub page: usize,
    pub y: f32,
    pub cells: Vec<RecordedCell>,
}

impl RecordedRow {
    pub fn texts(&self) -> Vec<&str> {
        self.cells.iter().map(|c| c.text.as_str()).collect()
    }

    pub fn has_style(&self, style: &PdfStyle) -> bool {
        self.cells.iter().any(|c| c.style == *style)
    }

    pub fn is_error(&self) -> bool {
        self.cells.iter().any(|c| c.style.is_error())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasOp {
    AddPage(usize),
    Cell(RecordedCell),
    Line {
        page: usize,
        from: (f32, f32),
        to: (f32, f32),
        color: PdfColor,
    },
    Image {
        page: usize,
        bounds: PdfRect,
    },
    Link {
        page: usize,
        bounds: PdfRect,
        url: String,
    },
}

/// A canvas keeping its drawing operations in memory.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    width: f32,
    height: f32,
    pages: usize,
    current: usize,
    ops: Vec<CanvasOp>,
}

impl RecordingCanvas {
    pub fn new(format: PageFormat, orientation: Orientation) -> Self {
        let (width, height) = page_size(format, orientation);
        Self {
            width,
            height,
            pages: 0,
            current: 0,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    pub fn cells(&self) -> Vec<&RecordedCell> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Cell(cell) => Some(cell),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.cells().into_iter().map(|c| c.text.as_str()).collect()
    }

    pub fn contains_text(&self, text: &str) -> bool {
        self.cells().iter().any(|c| c.text == text)
    }

    /// Consecutive cells grouped by page and top edge, in drawing order.
    pub fn rows(&self) -> Vec<RecordedRow> {
        let mut rows: Vec<RecordedRow> = Vec::new();
        for cell in self.cells() {
            match rows.last_mut() {
                Some(row) if row.page == cell.page && (row.y - cell.bounds.y).abs() < 1e-3 => {
                    row.cells.push(cell.clone());
                }
                _ => rows.push(RecordedRow {
                    page: cell.page,
                    y: cell.bounds.y,
                    cells: vec![cell.clone()],
                }),
            }
        }
        rows
    }

    /// Rows having at least one cell drawn with `style`.
    pub fn rows_with_style(&self, style: &PdfStyle) -> Vec<RecordedRow> {
        self.rows()
            .into_iter()
            .filter(|r| r.has_style(style))
            .collect()
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new(PageFormat::A4, Orientation::Portrait)
    }
}

impl Canvas for RecordingCanvas {
    fn page_width(&self) -> f32 {
        self.width
    }

    fn page_height(&self) -> f32 {
        self.height
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn add_page(&mut self) {
        self.pages += 1;
        self.current = self.pages;
        self.ops.push(CanvasOp::AddPage(self.pages));
    }

    fn select_page(&mut self, page: usize) {
        if (1..=self.pages).contains(&page) {
            self.current = page;
        }
    }

    fn cell(&mut self, cell: &CanvasCell<'_>) {
        self.ops.push(CanvasOp::Cell(RecordedCell {
            page: self.current,
            bounds: cell.bounds,
            text: cell.text.to_string(),
            style: *cell.style,
            alignment: cell.alignment,
        }));
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: PdfColor, _width: f32) {
        self.ops.push(CanvasOp::Line {
            page: self.current,
            from,
            to,
            color,
        });
    }

    fn image(&mut self, bounds: PdfRect, _image: &DynamicImage) {
        self.ops.push(CanvasOp::Image {
            page: self.current,
            bounds,
        });
    }

    fn link(&mut self, bounds: PdfRect, url: &str) {
        self.ops.push(CanvasOp::Link {
            page: self.current,
            bounds,
            url: url.to_string(),
        });
    }
}

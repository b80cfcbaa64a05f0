use std::fmt;

use log::{debug, trace};

use super::canvas::Canvas;
use super::footer::{PdfFooter, FOOTER_HEIGHT};
use super::header::PdfHeader;
use crate::error::{ReportError, Result};
use crate::format::{Formatter, Locale};
use crate::i18n::Translator;

/// Page margin on every side, in millimetres.
pub const PAGE_MARGIN: f32 = 10.0;

/// Progress of a report render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    NotStarted,
    PageAdded,
    RowsEmitted,
    TotalsEmitted,
    Done,
}

impl RenderState {
    pub fn can_become(self, next: RenderState) -> bool {
        use RenderState::*;
        matches!(
            (self, next),
            (NotStarted, PageAdded)
                | (NotStarted, Done)
                | (PageAdded, RowsEmitted)
                | (RowsEmitted, RowsEmitted)
                | (RowsEmitted, TotalsEmitted)
                | (TotalsEmitted, TotalsEmitted)
                | (TotalsEmitted, Done)
        )
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderState::NotStarted => "not started",
            RenderState::PageAdded => "page added",
            RenderState::RowsEmitted => "rows emitted",
            RenderState::TotalsEmitted => "totals emitted",
            RenderState::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub locale: Locale,
    /// Margins below this fraction are highlighted.
    pub minimum_margin: f64,
    pub header: PdfHeader,
    pub footer: PdfFooter,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            minimum_margin: 0.1,
            header: PdfHeader::default(),
            footer: PdfFooter::default(),
        }
    }
}

/// A report being drawn on a canvas: cursor, page chrome and render state.
pub struct ReportDocument<C: Canvas> {
    canvas: C,
    header: PdfHeader,
    footer: PdfFooter,
    formatter: Formatter,
    translator: Translator,
    minimum_margin: f64,
    title: String,
    description: Option<String>,
    y: f32,
    state: RenderState,
}

impl<C: Canvas> ReportDocument<C> {
    pub fn new(canvas: C, options: DocumentOptions) -> Self {
        Self {
            canvas,
            header: options.header,
            footer: options.footer,
            formatter: Formatter::new(options.locale),
            translator: Translator::new(options.locale.language()),
            minimum_margin: options.minimum_margin,
            title: String::new(),
            description: None,
            y: PAGE_MARGIN,
            state: RenderState::NotStarted,
        }
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn trans(&self, id: &str) -> String {
        self.translator.trans(id)
    }

    pub fn minimum_margin(&self) -> f64 {
        self.minimum_margin
    }

    /// Whether `margin` must be highlighted.
    pub fn is_margin_below(&self, margin: f64) -> bool {
        margin < self.minimum_margin
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    pub fn transition(&mut self, next: RenderState) -> Result<()> {
        if !self.state.can_become(next) {
            return Err(ReportError::InvalidState {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        trace!("render state: {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Mark a render with nothing to output.
    pub fn skip(&mut self) -> Result<()> {
        self.transition(RenderState::Done)
    }

    pub fn page_count(&self) -> usize {
        self.canvas.page_count()
    }

    pub fn left(&self) -> f32 {
        PAGE_MARGIN
    }

    pub fn right(&self) -> f32 {
        self.canvas.page_width() - PAGE_MARGIN
    }

    pub fn printable_width(&self) -> f32 {
        self.right() - self.left()
    }

    /// Lowest y position rows may reach on a page.
    pub fn bottom(&self) -> f32 {
        self.canvas.page_height() - PAGE_MARGIN - FOOTER_HEIGHT
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn move_y(&mut self, delta: f32) {
        self.y += delta;
    }

    pub fn remaining_height(&self) -> f32 {
        self.bottom() - self.y
    }

    pub fn is_space_for(&self, height: f32) -> bool {
        self.y + height <= self.bottom() + 1e-4
    }

    /// Start a new page and draw its header.
    pub fn add_page(&mut self) -> Result<()> {
        if self.state == RenderState::NotStarted {
            self.transition(RenderState::PageAdded)?;
        }
        self.canvas.add_page();
        let (left, width) = (self.left(), self.printable_width());
        self.y = self.header.render(
            &mut self.canvas,
            left,
            PAGE_MARGIN,
            width,
            &self.title,
            self.description.as_deref(),
        );
        debug!("page {} started at y={:.1}", self.canvas.page_count(), self.y);
        Ok(())
    }

    /// Draw the footers and hand back the canvas.
    pub fn finish(mut self) -> Result<C> {
        if self.state != RenderState::Done {
            self.transition(RenderState::Done)?;
        }
        let pages = self.canvas.page_count();
        let (left, width, top) = (self.left(), self.printable_width(), self.bottom());
        for page in 1..=pages {
            self.canvas.select_page(page);
            self.footer
                .render(&mut self.canvas, left, top, width, page, pages, &self.translator);
        }
        Ok(self.canvas)
    }
}

use log::debug;

use super::canvas::{Canvas, CanvasCell, PdfRect, CELL_MARGIN};
use super::column::{layout_widths, PdfColumn};
use super::document::{RenderState, ReportDocument};
use super::metrics;
use super::style::{PdfStyle, PdfTextAlignment};
use crate::error::{ReportError, Result};

/// Default height of a table row, in millimetres.
pub const LINE_HEIGHT: f32 = 5.0;

/// A cell of a table row, spanning one or more columns.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfCell {
    text: String,
    cols: usize,
    style: Option<PdfStyle>,
    alignment: Option<PdfTextAlignment>,
}

impl PdfCell {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cols: 1,
            style: None,
            alignment: None,
        }
    }

    pub fn with_cols(mut self, cols: usize) -> Self {
        self.cols = cols;
        self
    }

    pub fn with_style(mut self, style: PdfStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_alignment(mut self, alignment: PdfTextAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn style(&self) -> Option<&PdfStyle> {
        self.style.as_ref()
    }
}

struct PendingRow {
    style: PdfStyle,
    cells: Vec<PdfCell>,
}

impl PendingRow {
    fn used_columns(&self) -> usize {
        self.cells.iter().map(|c| c.cols).sum()
    }
}

/// Lays out rows of cells under a column schema and draws them on the
/// document, breaking pages before a row that does not fit.
pub struct PdfTableBuilder<'a, C: Canvas> {
    doc: &'a mut ReportDocument<C>,
    columns: Vec<PdfColumn>,
    widths: Vec<f32>,
    header_style: PdfStyle,
    repeat_header: bool,
    headers_printed: bool,
    rows_printed: bool,
    row: Option<PendingRow>,
    break_row: Option<(Vec<PdfCell>, PdfStyle)>,
    line_height: f32,
}

impl<'a, C: Canvas> PdfTableBuilder<'a, C> {
    pub fn new(doc: &'a mut ReportDocument<C>) -> Self {
        Self {
            doc,
            columns: Vec::new(),
            widths: Vec::new(),
            header_style: PdfStyle::header(),
            repeat_header: true,
            headers_printed: false,
            rows_printed: false,
            row: None,
            break_row: None,
            line_height: LINE_HEIGHT,
        }
    }

    pub fn doc(&self) -> &ReportDocument<C> {
        &*self.doc
    }

    pub fn doc_mut(&mut self) -> &mut ReportDocument<C> {
        &mut *self.doc
    }

    pub fn columns(&self) -> &[PdfColumn] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Laid out column widths in millimetres.
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    pub fn set_line_height(&mut self, height: f32) -> &mut Self {
        self.line_height = height;
        self
    }

    pub fn set_repeat_header(&mut self, repeat: bool) -> &mut Self {
        self.repeat_header = repeat;
        self
    }

    pub fn set_header_style(&mut self, style: PdfStyle) -> &mut Self {
        self.header_style = style;
        self
    }

    /// Row drawn again after the headers when the table breaks to a new page.
    pub fn set_break_row(&mut self, row: Option<(Vec<PdfCell>, PdfStyle)>) {
        self.break_row = row;
    }

    pub fn is_row_started(&self) -> bool {
        self.row.is_some()
    }

    pub fn add_column(&mut self, column: PdfColumn) -> Result<&mut Self> {
        self.add_columns(vec![column])
    }

    pub fn add_columns(&mut self, columns: Vec<PdfColumn>) -> Result<&mut Self> {
        if self.rows_printed || self.headers_printed || self.row.is_some() {
            return Err(ReportError::table("columns must be added before any row"));
        }
        if let Some(column) = columns.iter().find(|c| c.width() <= 0.0) {
            return Err(ReportError::table(format!(
                "column '{}' has an invalid width {}",
                column.text(),
                column.width()
            )));
        }
        self.columns.extend(columns);
        self.widths = layout_widths(&self.columns, self.doc.printable_width());
        Ok(self)
    }

    /// Draw the column headers.
    pub fn output_headers(&mut self) -> Result<()> {
        self.check_columns()?;
        let cells: Vec<PdfCell> = self.columns.iter().map(|c| PdfCell::new(c.text())).collect();
        let style = self.header_style;
        self.ensure_space(1)?;
        self.draw_row(&cells, &style)?;
        self.headers_printed = true;
        Ok(())
    }

    pub fn start_row(&mut self) -> Result<&mut Self> {
        self.start_styled_row(PdfStyle::cell())
    }

    /// Start a row whose cells default to `style`.
    pub fn start_styled_row(&mut self, style: PdfStyle) -> Result<&mut Self> {
        self.check_columns()?;
        if self.row.is_some() {
            return Err(ReportError::table("a row is already started"));
        }
        self.row = Some(PendingRow {
            style,
            cells: Vec::new(),
        });
        Ok(self)
    }

    pub fn add(&mut self, text: impl Into<String>) -> Result<&mut Self> {
        self.add_cell(PdfCell::new(text))
    }

    pub fn add_styled(&mut self, text: impl Into<String>, style: PdfStyle) -> Result<&mut Self> {
        self.add_cell(PdfCell::new(text).with_style(style))
    }

    pub fn add_cell(&mut self, cell: PdfCell) -> Result<&mut Self> {
        let columns = self.columns.len();
        let Some(row) = self.row.as_mut() else {
            return Err(ReportError::table("no row started"));
        };
        if cell.cols == 0 {
            return Err(ReportError::table("a cell must span at least one column"));
        }
        let used = row.used_columns();
        if used + cell.cols > columns {
            return Err(ReportError::table(format!(
                "cell '{}' spans {} column(s) but only {} remain",
                cell.text,
                cell.cols,
                columns - used
            )));
        }
        row.cells.push(cell);
        Ok(self)
    }

    /// Draw the current row.
    pub fn end_row(&mut self) -> Result<()> {
        let Some(row) = self.row.take() else {
            return Err(ReportError::table("no row started"));
        };
        let used = row.used_columns();
        if used != self.columns.len() {
            return Err(ReportError::table(format!(
                "row has {used} column(s) out of {}",
                self.columns.len()
            )));
        }
        self.ensure_space(1)?;
        self.draw_row(&row.cells, &row.style)?;
        self.rows_printed = true;
        Ok(())
    }

    /// Fill the remaining columns with empty cells and draw the row.
    pub fn complete_row(&mut self) -> Result<()> {
        let columns = self.columns.len();
        if let Some(row) = self.row.as_mut() {
            let used = row.used_columns();
            for _ in used..columns {
                row.cells.push(PdfCell::new(""));
            }
        }
        self.end_row()
    }

    pub fn add_row<I, S>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_styled_row(values, PdfStyle::cell())
    }

    pub fn add_styled_row<I, S>(&mut self, values: I, style: PdfStyle) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.start_styled_row(style)?;
        for value in values {
            self.add(value)?;
        }
        self.end_row()
    }

    /// A row made of one cell spanning every column.
    pub fn single_line(&mut self, text: impl Into<String>, style: PdfStyle) -> Result<()> {
        let cols = self.columns.len();
        self.start_styled_row(style)?;
        self.add_cell(PdfCell::new(text).with_cols(cols))?;
        self.end_row()
    }

    /// Break to a new page unless `lines` rows fit below the cursor.
    pub fn ensure_space(&mut self, lines: usize) -> Result<()> {
        if self.doc.page_count() == 0 {
            return self.doc.add_page();
        }
        if !self.doc.is_space_for(lines as f32 * self.line_height) {
            self.page_break()?;
        }
        Ok(())
    }

    fn page_break(&mut self) -> Result<()> {
        self.doc.add_page()?;
        debug!("table continued on page {}", self.doc.page_count());
        if self.repeat_header && self.headers_printed {
            let cells: Vec<PdfCell> = self.columns.iter().map(|c| PdfCell::new(c.text())).collect();
            let style = self.header_style;
            self.draw_row(&cells, &style)?;
        }
        if let Some((cells, style)) = self.break_row.clone() {
            self.draw_row(&cells, &style)?;
        }
        Ok(())
    }

    /// Draw `cells` at the cursor and move it down one line.
    pub(crate) fn draw_row(&mut self, cells: &[PdfCell], default_style: &PdfStyle) -> Result<()> {
        let y = self.doc.y();
        let mut x = self.doc.left();
        let mut index = 0;
        for cell in cells {
            let end = index + cell.cols;
            let width: f32 = self.widths[index..end].iter().sum();
            let style = cell.style.unwrap_or(*default_style);
            let alignment = cell
                .alignment
                .unwrap_or_else(|| self.columns[index].alignment());
            let text = metrics::truncate(
                &cell.text,
                width - 2.0 * CELL_MARGIN - style.indent,
                &style.font,
            );
            self.doc.canvas_mut().cell(&CanvasCell {
                bounds: PdfRect::new(x, y, width, self.line_height),
                text: &text,
                style: &style,
                alignment,
            });
            x += width;
            index = end;
        }
        self.doc.move_y(self.line_height);
        if self.doc.state() == RenderState::PageAdded {
            self.doc.transition(RenderState::RowsEmitted)?;
        }
        Ok(())
    }

    pub(crate) fn check_columns(&self) -> Result<()> {
        if self.columns.is_empty() {
            return Err(ReportError::table("no column defined"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::document::DocumentOptions;
    use crate::pdf::recorder::RecordingCanvas;

    fn document() -> ReportDocument<RecordingCanvas> {
        ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default())
    }

    fn columns() -> Vec<PdfColumn> {
        vec![PdfColumn::left("Name", 50.0), PdfColumn::right("Amount", 20.0)]
    }

    #[test]
    fn test_columns_share_printable_width() {
        let mut doc = document();
        let mut table = PdfTableBuilder::new(&mut doc);
        table.add_columns(columns()).unwrap();
        let total: f32 = table.widths().iter().sum();
        assert!((total - 190.0).abs() < 1e-3);
    }

    #[test]
    fn test_colspan_merges_widths() {
        let mut doc = document();
        doc.add_page().unwrap();
        let mut table = PdfTableBuilder::new(&mut doc);
        table.add_columns(columns()).unwrap();
        table.single_line("Everything", PdfStyle::group()).unwrap();
        drop(table);

        let cell = doc
            .canvas()
            .cells()
            .into_iter()
            .find(|c| c.text == "Everything")
            .cloned()
            .unwrap();
        assert!((cell.bounds.width - 190.0).abs() < 1e-3);
    }

    #[test]
    fn test_misuse_is_reported() {
        let mut doc = document();
        let mut table = PdfTableBuilder::new(&mut doc);
        assert!(table.start_row().is_err());
        table.add_columns(columns()).unwrap();
        assert!(table.end_row().is_err());
        assert!(table.add("orphan").is_err());

        table.start_row().unwrap();
        assert!(table.start_row().is_err());
        table.add("a").unwrap().add("b").unwrap();
        assert!(matches!(table.add("c"), Err(ReportError::TableUsage(_))));
        table.end_row().unwrap();

        table.start_row().unwrap();
        table.add("only one").unwrap();
        assert!(table.end_row().is_err());
    }

    #[test]
    fn test_columns_rejected_after_rows() {
        let mut doc = document();
        let mut table = PdfTableBuilder::new(&mut doc);
        assert!(table.add_column(PdfColumn::left("Zero", 0.0)).is_err());
        table.add_columns(columns()).unwrap();
        table.add_row(["a", "b"]).unwrap();
        assert!(table.add_column(PdfColumn::left("Late", 10.0)).is_err());
    }

    #[test]
    fn test_complete_row_fills_missing_cells() {
        let mut doc = document();
        let mut table = PdfTableBuilder::new(&mut doc);
        table.add_columns(columns()).unwrap();
        table.start_row().unwrap();
        table.add("alone").unwrap();
        table.complete_row().unwrap();
        drop(table);
        let rows = doc.canvas().rows();
        let last = rows.last().unwrap();
        assert_eq!(last.texts(), vec!["alone", ""]);
    }

    #[test]
    fn test_long_text_is_truncated() {
        let mut doc = document();
        let mut table = PdfTableBuilder::new(&mut doc);
        table
            .add_columns(vec![PdfColumn::left("Name", 10.0).fixed(), PdfColumn::left("Rest", 10.0)])
            .unwrap();
        table
            .add_row(["a very long description that cannot fit", "x"])
            .unwrap();
        drop(table);
        assert!(doc.canvas().texts().iter().any(|t| t.ends_with("...")));
    }
}

use std::ops::{Deref, DerefMut};

use log::debug;

use super::canvas::Canvas;
use super::document::ReportDocument;
use super::style::PdfStyle;
use super::table::{PdfCell, PdfTableBuilder};
use crate::error::Result;

/// The group a table is currently listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfGroup {
    key: String,
    style: PdfStyle,
}

impl PdfGroup {
    pub fn new(key: impl Into<String>, style: PdfStyle) -> Self {
        Self {
            key: key.into(),
            style,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn style(&self) -> &PdfStyle {
        &self.style
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

/// A table drawing a group row each time the group key changes.
pub struct PdfGroupTableBuilder<'a, C: Canvas> {
    table: PdfTableBuilder<'a, C>,
    group: Option<PdfGroup>,
    group_style: PdfStyle,
    repeat_group: bool,
}

impl<'a, C: Canvas> PdfGroupTableBuilder<'a, C> {
    pub fn new(doc: &'a mut ReportDocument<C>) -> Self {
        Self {
            table: PdfTableBuilder::new(doc),
            group: None,
            group_style: PdfStyle::group(),
            repeat_group: false,
        }
    }

    pub fn group(&self) -> Option<&PdfGroup> {
        self.group.as_ref()
    }

    pub fn group_key(&self) -> Option<&str> {
        self.group.as_ref().map(PdfGroup::key)
    }

    pub fn set_group_style(&mut self, style: PdfStyle) -> &mut Self {
        self.group_style = style;
        self
    }

    /// Draw the group row again after the headers of a new page.
    ///
    /// A run of one key spanning a page break then shows its group row on
    /// every page it covers, not only once.
    pub fn set_repeat_group(&mut self, repeat: bool) -> &mut Self {
        self.repeat_group = repeat;
        self
    }

    /// Switch to the group `key`. Returns `true` when a group row was drawn.
    pub fn set_group_key(&mut self, key: impl Into<String>) -> Result<bool> {
        let group = PdfGroup::new(key, self.group_style);
        self.set_group(group)
    }

    pub fn set_group(&mut self, group: PdfGroup) -> Result<bool> {
        if self.group.as_ref().map(PdfGroup::key) == Some(group.key()) {
            return Ok(false);
        }
        if self.table.is_row_started() {
            self.table.complete_row()?;
        }
        debug!("group '{}'", group.key());
        self.group = Some(group);
        self.output_group(false)
    }

    /// Draw the current group row; empty keys are only drawn when `force` is set.
    pub fn output_group(&mut self, force: bool) -> Result<bool> {
        self.table.check_columns()?;
        let Some(group) = self.group.clone() else {
            return Ok(false);
        };
        if group.is_empty() && !force {
            return Ok(false);
        }

        self.table.set_break_row(None);
        // group row and at least one row below it
        self.table.ensure_space(2)?;
        let cells = vec![PdfCell::new(group.key()).with_cols(self.table.column_count())];
        self.table.draw_row(&cells, group.style())?;
        if self.repeat_group {
            self.table.set_break_row(Some((cells, group.style)));
        }
        Ok(true)
    }
}

impl<C: Canvas> PdfGroupTableBuilder<'_, C> {
    /// Close the last group so rows after it, such as totals, are not
    /// preceded by a repeated group row on a new page.
    pub fn end_groups(&mut self) {
        self.group = None;
        self.table.set_break_row(None);
    }
}

impl<'a, C: Canvas> Deref for PdfGroupTableBuilder<'a, C> {
    type Target = PdfTableBuilder<'a, C>;

    fn deref(&self) -> &Self::Target {
        &self.table
    }
}

impl<C: Canvas> DerefMut for PdfGroupTableBuilder<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use crate::pdf::column::PdfColumn;
    use crate::pdf::document::DocumentOptions;
    use crate::pdf::recorder::RecordingCanvas;

    #[test]
    fn test_same_key_draws_one_group_row() {
        let mut doc = ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default());
        let mut table = PdfGroupTableBuilder::new(&mut doc);
        table
            .add_columns(vec![PdfColumn::left("Name", 40.0), PdfColumn::right("Value", 20.0)])
            .unwrap();
        table.output_headers().unwrap();

        assert!(table.set_group_key("A").unwrap());
        table.add_row(["a1", "1"]).unwrap();
        assert!(!table.set_group_key("A").unwrap());
        table.add_row(["a2", "2"]).unwrap();
        assert!(table.set_group_key("B").unwrap());
        table.add_row(["b1", "3"]).unwrap();
        drop(table);

        let groups = doc.canvas().rows_with_style(&PdfStyle::group());
        let keys: Vec<&str> = groups.iter().map(|r| r.cells[0].text.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }

    #[test]
    fn test_group_change_completes_pending_row() {
        let mut doc = ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default());
        let mut table = PdfGroupTableBuilder::new(&mut doc);
        table
            .add_columns(vec![PdfColumn::left("Name", 40.0), PdfColumn::right("Value", 20.0)])
            .unwrap();
        table.set_group_key("A").unwrap();
        table.start_row().unwrap();
        table.add("partial").unwrap();
        table.set_group_key("B").unwrap();
        assert!(!table.is_row_started());
        drop(table);

        let texts: Vec<Vec<String>> = doc
            .canvas()
            .rows()
            .iter()
            .map(|r| r.texts().into_iter().map(String::from).collect())
            .collect();
        let partial = texts.iter().position(|r| r[0] == "partial").unwrap();
        let group_b = texts.iter().position(|r| r[0] == "B").unwrap();
        assert_eq!(texts[partial], vec!["partial", ""]);
        assert!(partial < group_b);
    }

    #[test]
    fn test_empty_key_needs_force() {
        let mut doc = ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default());
        let mut table = PdfGroupTableBuilder::new(&mut doc);
        table.add_columns(vec![PdfColumn::left("Name", 40.0)]).unwrap();
        assert!(!table.set_group_key("").unwrap());
        assert!(table.output_group(true).unwrap());
    }

    #[test]
    fn test_group_before_columns_is_an_error() {
        let mut doc = ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default());
        let mut table = PdfGroupTableBuilder::new(&mut doc);
        let result = table.set_group_key("A");
        assert!(matches!(result, Err(ReportError::TableUsage(_))));
        assert!(matches!(table.output_group(true), Err(ReportError::TableUsage(_))));
    }

    #[test]
    fn test_end_groups_stops_repeating_the_last_group() {
        let mut doc = ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default());
        let mut table = PdfGroupTableBuilder::new(&mut doc);
        table.set_repeat_group(true);
        table.add_columns(vec![PdfColumn::left("Name", 40.0)]).unwrap();
        table.output_headers().unwrap();
        table.set_group_key("A").unwrap();
        table.add_row(["a1"]).unwrap();
        table.end_groups();

        let bottom = table.doc().bottom();
        table.doc_mut().set_y(bottom);
        table.add_styled_row(["total"], PdfStyle::total()).unwrap();
        drop(table);

        let canvas = doc.canvas();
        assert_eq!(canvas.page_count(), 2);
        let groups = canvas.rows_with_style(&PdfStyle::group());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].page, 1);
        let total = canvas.rows_with_style(&PdfStyle::total());
        assert_eq!(total[0].page, 2);
    }
}

use chrono::NaiveDate;
use log::info;

use crate::error::Result;
use crate::i18n::Translator;
use crate::pdf::{
    DocumentOptions, Orientation, PageFormat, PrintPdfCanvas, RecordingCanvas, ReportDocument,
};
use crate::report::Report;

/// Page setup shared by every output.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSetup {
    pub format: PageFormat,
    pub orientation: Orientation,
}

/// Render `report` to PDF bytes, or `None` when it has nothing to print.
pub fn generate_pdf<R: Report>(
    report: &R,
    options: DocumentOptions,
    setup: PageSetup,
) -> Result<Option<Vec<u8>>> {
    let title = report.title(&Translator::new(options.locale.language()));
    let canvas = PrintPdfCanvas::new(&title, setup.format, setup.orientation)?;
    let mut doc = ReportDocument::new(canvas, options);
    if !report.render(&mut doc)? {
        return Ok(None);
    }
    let bytes = doc.finish()?.finish()?;
    info!("'{title}' written: {} bytes", bytes.len());
    Ok(Some(bytes))
}

/// Render `report` in memory, or `None` when it has nothing to print.
pub fn generate_preview<R: Report>(
    report: &R,
    options: DocumentOptions,
    setup: PageSetup,
) -> Result<Option<RecordingCanvas>> {
    let canvas = RecordingCanvas::new(setup.format, setup.orientation);
    let mut doc = ReportDocument::new(canvas, options);
    if !report.render(&mut doc)? {
        return Ok(None);
    }
    doc.finish().map(Some)
}

/// Default file name of a report, e.g. `items-12-2024-05-01.pdf`.
pub fn report_file_name(name: &str, id: Option<u32>, date: NaiveDate) -> String {
    match id {
        Some(id) => format!("{name}-{id}-{}.pdf", date.format("%Y-%m-%d")),
        None => format!("{name}-{}.pdf", date.format("%Y-%m-%d")),
    }
}

mod canvas;
mod column;
mod document;
mod footer;
mod group_table;
mod header;
pub mod metrics;
mod printer;
mod recorder;
mod style;
mod table;

pub use canvas::{page_size, Canvas, CanvasCell, Orientation, PageFormat, PdfRect, CELL_MARGIN};
pub use column::{layout_widths, PdfColumn};
pub use document::{DocumentOptions, RenderState, ReportDocument, PAGE_MARGIN};
pub use footer::{PdfFooter, FOOTER_HEIGHT};
pub use group_table::{PdfGroup, PdfGroupTableBuilder};
pub use header::{load_logo, HeaderCompany, PdfHeader};
pub use printer::PrintPdfCanvas;
pub use recorder::{CanvasOp, RecordedCell, RecordedRow, RecordingCanvas};
pub use style::{PdfBorder, PdfColor, PdfFont, PdfStyle, PdfTextAlignment};
pub use table::{PdfCell, PdfTableBuilder, LINE_HEIGHT};

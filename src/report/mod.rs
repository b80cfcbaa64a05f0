//! Calculation reports drawn with the table builders.
//!
//! Every report sorts its input, writes one row per entity, then a totals
//! row. Rendering an empty input adds no page and returns `false`.

mod by_month;
mod by_state;
mod calculations;
mod duplicate;
mod empty;
mod items;

pub use by_month::CalculationByMonthReport;
pub use by_state::CalculationByStateReport;
pub use calculations::CalculationsReport;
pub use duplicate::CalculationDuplicateReport;
pub use empty::CalculationEmptyReport;
pub use items::CalculationItemsReport;

use log::info;

use crate::calculation::{margin_of, round_amount, Calculation};
use crate::error::Result;
use crate::format::Formatter;
use crate::i18n::Translator;
use crate::pdf::{Canvas, PdfColor, PdfStyle, RenderState, ReportDocument};

/// Space left between two tables of the same report, in millimetres.
const TABLE_SPACING: f32 = 4.0;

pub trait Report {
    fn title(&self, translator: &Translator) -> String;

    /// Text printed below the title of every page.
    fn description(&self, _translator: &Translator) -> Option<String> {
        None
    }

    /// Draw the report. Returns `false` when there was nothing to draw.
    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool>;
}

/// Running sums over calculations.
///
/// Amounts are summed as displayed, rounded to 2 decimals, so a totals row
/// always equals the sum of the lines above it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub count: usize,
    pub items: f64,
    pub overall: f64,
}

impl Totals {
    pub fn add(&mut self, calculation: &Calculation) {
        self.count += 1;
        self.items += round_amount(calculation.items_total());
        self.overall += round_amount(calculation.overall_total());
    }

    pub fn margin_amount(&self) -> f64 {
        self.overall - self.items
    }

    /// `overall / items - 1`, 0 when there is no items total.
    pub fn margin(&self) -> f64 {
        margin_of(self.overall, self.items)
    }
}

impl<'a> FromIterator<&'a Calculation> for Totals {
    fn from_iter<I: IntoIterator<Item = &'a Calculation>>(iter: I) -> Self {
        let mut totals = Totals::default();
        for calculation in iter {
            totals.add(calculation);
        }
        totals
    }
}

/// Set the title and description of `doc` from `report` and add the first page.
fn begin<R: Report, C: Canvas>(report: &R, doc: &mut ReportDocument<C>) -> Result<()> {
    let translator = *doc.translator();
    doc.set_title(report.title(&translator));
    doc.set_description(report.description(&translator));
    doc.add_page()
}

fn skip<C: Canvas>(doc: &mut ReportDocument<C>, reason: &str) -> Result<bool> {
    info!("nothing to render: {reason}");
    doc.skip()?;
    Ok(false)
}

fn rendered<C: Canvas>(doc: &ReportDocument<C>, rows: usize) -> Result<bool> {
    info!(
        "'{}' rendered: {} row(s) on {} page(s)",
        doc.title(),
        rows,
        doc.page_count()
    );
    Ok(true)
}

fn start_totals<C: Canvas>(doc: &mut ReportDocument<C>) -> Result<()> {
    doc.transition(RenderState::TotalsEmitted)
}

/// `style` in red when `margin` is below the document minimum.
fn margin_style<C: Canvas>(doc: &ReportDocument<C>, margin: f64, style: PdfStyle) -> PdfStyle {
    if doc.is_margin_below(margin) {
        style.with_text_color(PdfColor::RED)
    } else {
        style
    }
}

/// `#id - date - customer - description`, skipping empty parts.
fn calculation_key(formatter: &Formatter, calculation: &Calculation) -> String {
    let mut parts = vec![format!("#{}", calculation.id), formatter.date(calculation.date)];
    for part in [&calculation.customer, &calculation.description] {
        if !part.trim().is_empty() {
            parts.push(part.trim().to_string());
        }
    }
    parts.join(" - ")
}

/// Calculations sorted by identifier.
fn sorted_by_id(calculations: &[Calculation]) -> Vec<&Calculation> {
    let mut sorted: Vec<&Calculation> = calculations.iter().collect();
    sorted.sort_by_key(|c| c.id);
    sorted
}

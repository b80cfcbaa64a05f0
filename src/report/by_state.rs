use std::collections::BTreeMap;

use super::{begin, margin_style, rendered, skip, start_totals, Report, Totals};
use crate::calculation::{safe_divide, Calculation};
use crate::error::Result;
use crate::i18n::Translator;
use crate::pdf::{Canvas, PdfColumn, PdfStyle, PdfTableBuilder, ReportDocument};

/// Calculations summed by state code.
pub struct CalculationByStateReport<'a> {
    calculations: &'a [Calculation],
}

impl<'a> CalculationByStateReport<'a> {
    pub fn new(calculations: &'a [Calculation]) -> Self {
        Self { calculations }
    }

    /// Totals per state, sorted by state code.
    pub fn states(&self) -> BTreeMap<&'a str, Totals> {
        let mut states: BTreeMap<&str, Totals> = BTreeMap::new();
        for calculation in self.calculations {
            states
                .entry(calculation.state.as_str())
                .or_default()
                .add(calculation);
        }
        states
    }
}

impl Report for CalculationByStateReport<'_> {
    fn title(&self, translator: &Translator) -> String {
        translator.trans("report.state")
    }

    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool> {
        if self.calculations.is_empty() {
            return skip(doc, "no calculation");
        }

        begin(self, doc)?;
        let formatter = *doc.formatter();
        let translator = *doc.translator();
        let percent = translator.trans("calculation.percent");

        let mut table = PdfTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left(translator.trans("calculation.state"), 40.0),
            PdfColumn::right(translator.trans("calculation.count"), 18.0),
            PdfColumn::right(percent.as_str(), 16.0),
            PdfColumn::right(translator.trans("calculation.items"), 26.0),
            PdfColumn::right(translator.trans("calculation.margin"), 26.0),
            PdfColumn::right(translator.trans("calculation.margin_percent"), 18.0),
            PdfColumn::right(translator.trans("calculation.overall"), 26.0),
            PdfColumn::right(percent.as_str(), 16.0),
        ])?;
        table.output_headers()?;

        let states = self.states();
        let totals: Totals = self.calculations.iter().collect();
        for (state, sums) in &states {
            let margin_cell = margin_style(table.doc(), sums.margin(), PdfStyle::cell());
            table.start_row()?;
            table.add(*state)?;
            table.add(formatter.count(sums.count))?;
            table.add(formatter.percent(safe_divide(sums.count as f64, totals.count as f64), 2))?;
            table.add(formatter.amount(sums.items))?;
            table.add(formatter.amount(sums.margin_amount()))?;
            table.add_styled(formatter.percent(sums.margin(), 0), margin_cell)?;
            table.add(formatter.amount(sums.overall))?;
            table.add(formatter.percent(safe_divide(sums.overall, totals.overall), 2))?;
            table.end_row()?;
        }

        start_totals(table.doc_mut())?;
        let margin_cell = margin_style(table.doc(), totals.margin(), PdfStyle::total());
        table.start_styled_row(PdfStyle::total())?;
        table.add(translator.trans("total.label"))?;
        table.add(formatter.count(totals.count))?;
        table.add(formatter.percent(1.0, 2))?;
        table.add(formatter.amount(totals.items))?;
        table.add(formatter.amount(totals.margin_amount()))?;
        table.add_styled(formatter.percent(totals.margin(), 0), margin_cell)?;
        table.add(formatter.amount(totals.overall))?;
        table.add(formatter.percent(1.0, 2))?;
        table.end_row()?;

        rendered(table.doc(), states.len())
    }
}

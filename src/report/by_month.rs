use std::collections::BTreeMap;

use chrono::Datelike;

use super::{begin, margin_style, rendered, skip, start_totals, Report, Totals};
use crate::calculation::Calculation;
use crate::error::Result;
use crate::i18n::Translator;
use crate::pdf::{Canvas, PdfColumn, PdfStyle, PdfTableBuilder, ReportDocument};

/// Calculations summed by calendar month.
pub struct CalculationByMonthReport<'a> {
    calculations: &'a [Calculation],
}

impl<'a> CalculationByMonthReport<'a> {
    pub fn new(calculations: &'a [Calculation]) -> Self {
        Self { calculations }
    }

    /// Totals per `(year, month)`, oldest first.
    pub fn months(&self) -> BTreeMap<(i32, u32), Totals> {
        let mut months: BTreeMap<(i32, u32), Totals> = BTreeMap::new();
        for calculation in self.calculations {
            let key = (calculation.date.year(), calculation.date.month());
            months.entry(key).or_default().add(calculation);
        }
        months
    }
}

impl Report for CalculationByMonthReport<'_> {
    fn title(&self, translator: &Translator) -> String {
        translator.trans("report.month")
    }

    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool> {
        if self.calculations.is_empty() {
            return skip(doc, "no calculation");
        }

        begin(self, doc)?;
        let formatter = *doc.formatter();
        let translator = *doc.translator();

        let mut table = PdfTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left(translator.trans("calculation.month"), 40.0),
            PdfColumn::right(translator.trans("calculation.count"), 18.0),
            PdfColumn::right(translator.trans("calculation.items"), 28.0),
            PdfColumn::right(translator.trans("calculation.margin"), 28.0),
            PdfColumn::right(translator.trans("calculation.margin_percent"), 18.0),
            PdfColumn::right(translator.trans("calculation.overall"), 28.0),
        ])?;
        table.output_headers()?;

        let months = self.months();
        let mut totals = Totals::default();
        for (&(year, month), sums) in &months {
            let margin_cell = margin_style(table.doc(), sums.margin(), PdfStyle::cell());
            table.start_row()?;
            table.add(formatter.month(year, month))?;
            table.add(formatter.count(sums.count))?;
            table.add(formatter.amount(sums.items))?;
            table.add(formatter.amount(sums.margin_amount()))?;
            table.add_styled(formatter.percent(sums.margin(), 0), margin_cell)?;
            table.add(formatter.amount(sums.overall))?;
            table.end_row()?;

            totals.count += sums.count;
            totals.items += sums.items;
            totals.overall += sums.overall;
        }

        start_totals(table.doc_mut())?;
        let margin_cell = margin_style(table.doc(), totals.margin(), PdfStyle::total());
        table.start_styled_row(PdfStyle::total())?;
        table.add(translator.trans("total.label"))?;
        table.add(formatter.count(totals.count))?;
        table.add(formatter.amount(totals.items))?;
        table.add(formatter.amount(totals.margin_amount()))?;
        table.add_styled(formatter.percent(totals.margin(), 0), margin_cell)?;
        table.add(formatter.amount(totals.overall))?;
        table.end_row()?;

        rendered(table.doc(), months.len())
    }
}

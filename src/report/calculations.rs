use super::{begin, margin_style, rendered, skip, sorted_by_id, start_totals, Report, Totals};
use crate::calculation::Calculation;
use crate::error::Result;
use crate::i18n::Translator;
use crate::pdf::{Canvas, PdfCell, PdfColumn, PdfGroupTableBuilder, PdfStyle, ReportDocument};

/// List of calculations, optionally grouped by state.
pub struct CalculationsReport<'a> {
    calculations: &'a [Calculation],
    grouped: bool,
}

impl<'a> CalculationsReport<'a> {
    pub fn new(calculations: &'a [Calculation]) -> Self {
        Self {
            calculations,
            grouped: false,
        }
    }

    pub fn grouped(mut self, grouped: bool) -> Self {
        self.grouped = grouped;
        self
    }

    fn columns(&self, translator: &Translator) -> Vec<PdfColumn> {
        let mut columns = vec![
            PdfColumn::center(translator.trans("calculation.id"), 12.0).fixed(),
            PdfColumn::center(translator.trans("calculation.date"), 20.0).fixed(),
        ];
        if !self.grouped {
            columns.push(PdfColumn::left(translator.trans("calculation.state"), 20.0));
        }
        columns.extend([
            PdfColumn::left(translator.trans("calculation.customer"), 35.0),
            PdfColumn::left(translator.trans("calculation.description"), 50.0),
            PdfColumn::right(translator.trans("calculation.items"), 22.0).fixed(),
            PdfColumn::right(translator.trans("calculation.margin_percent"), 20.0).fixed(),
            PdfColumn::right(translator.trans("calculation.overall"), 22.0).fixed(),
        ]);
        columns
    }
}

impl Report for CalculationsReport<'_> {
    fn title(&self, translator: &Translator) -> String {
        translator.trans("report.calculations")
    }

    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool> {
        if self.calculations.is_empty() {
            return skip(doc, "no calculation");
        }

        let mut calculations = sorted_by_id(self.calculations);
        if self.grouped {
            calculations.sort_by(|a, b| a.state.cmp(&b.state).then(a.id.cmp(&b.id)));
        }

        begin(self, doc)?;
        let formatter = *doc.formatter();
        let translator = *doc.translator();
        let columns = self.columns(&translator);
        let column_count = columns.len();

        let mut table = PdfGroupTableBuilder::new(doc);
        table.set_repeat_group(self.grouped);
        table.add_columns(columns)?;
        table.output_headers()?;

        let mut totals = Totals::default();
        for calculation in &calculations {
            if self.grouped {
                table.set_group_key(calculation.state.as_str())?;
            }
            let margin = calculation.overall_margin();
            let margin_cell = margin_style(table.doc(), margin, PdfStyle::cell());

            table.start_row()?;
            table.add(calculation.id.to_string())?;
            table.add(formatter.date(calculation.date))?;
            if !self.grouped {
                table.add(calculation.state.as_str())?;
            }
            table.add(calculation.customer.as_str())?;
            table.add(calculation.description.as_str())?;
            table.add(formatter.amount(calculation.items_total()))?;
            table.add_styled(formatter.percent(margin, 0), margin_cell)?;
            table.add(formatter.amount(calculation.overall_total()))?;
            table.end_row()?;

            totals.add(calculation);
        }

        table.end_groups();
        start_totals(table.doc_mut())?;
        let margin_cell = margin_style(table.doc(), totals.margin(), PdfStyle::total());
        let count = formatter.count(totals.count);
        table.start_styled_row(PdfStyle::total())?;
        table.add_cell(
            PdfCell::new(
                translator.trans_with("counters.calculations", &[("count", count.as_str())]),
            )
            .with_cols(column_count - 3),
        )?;
        table.add(formatter.amount(totals.items))?;
        table.add_styled(formatter.percent(totals.margin(), 0), margin_cell)?;
        table.add(formatter.amount(totals.overall))?;
        table.end_row()?;

        rendered(table.doc(), totals.count)
    }
}

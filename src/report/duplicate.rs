use super::{begin, calculation_key, rendered, skip, sorted_by_id, start_totals, Report};
use crate::calculation::{duplicate_items, Calculation};
use crate::error::Result;
use crate::i18n::Translator;
use crate::pdf::{Canvas, PdfCell, PdfColumn, PdfGroupTableBuilder, PdfStyle, ReportDocument};

/// Descriptions used more than once within a calculation, grouped by calculation.
pub struct CalculationDuplicateReport<'a> {
    calculations: &'a [Calculation],
}

impl<'a> CalculationDuplicateReport<'a> {
    pub fn new(calculations: &'a [Calculation]) -> Self {
        Self { calculations }
    }
}

impl Report for CalculationDuplicateReport<'_> {
    fn title(&self, translator: &Translator) -> String {
        translator.trans("report.duplicate")
    }

    fn description(&self, translator: &Translator) -> Option<String> {
        Some(translator.trans("report.duplicate.description"))
    }

    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool> {
        let calculations: Vec<_> = sorted_by_id(self.calculations)
            .into_iter()
            .map(|c| (c, duplicate_items(c)))
            .filter(|(_, items)| !items.is_empty())
            .collect();
        if calculations.is_empty() {
            return skip(doc, "no duplicate item");
        }

        begin(self, doc)?;
        let formatter = *doc.formatter();
        let translator = *doc.translator();

        let mut table = PdfGroupTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left(translator.trans("item.description"), 100.0),
            PdfColumn::left(translator.trans("item.unit"), 20.0),
            PdfColumn::right(translator.trans("item.count"), 20.0),
            PdfColumn::right(translator.trans("item.total"), 26.0),
        ])?;
        table.set_repeat_group(true);
        table.output_headers()?;

        let (mut count, mut total) = (0, 0.0);
        for (calculation, duplicates) in &calculations {
            table.set_group_key(calculation_key(&formatter, calculation))?;
            for duplicate in duplicates {
                let item = duplicate.item;
                table.add_row([
                    item.description.clone(),
                    item.unit.clone().unwrap_or_default(),
                    formatter.count(duplicate.count),
                    formatter.amount(duplicate.total),
                ])?;
                count += duplicate.count;
                total += duplicate.total;
            }
        }

        table.end_groups();
        start_totals(table.doc_mut())?;
        let calculations_count = formatter.count(calculations.len());
        table.start_styled_row(PdfStyle::total())?;
        table.add_cell(
            PdfCell::new(translator.trans_with(
                "counters.calculations",
                &[("count", calculations_count.as_str())],
            ))
            .with_cols(2),
        )?;
        table.add(formatter.count(count))?;
        table.add(formatter.amount(total))?;
        table.end_row()?;

        rendered(table.doc(), count)
    }
}

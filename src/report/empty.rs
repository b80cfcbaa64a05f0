use super::{begin, calculation_key, rendered, skip, sorted_by_id, start_totals, Report};
use crate::calculation::{empty_items, Calculation};
use crate::error::Result;
use crate::i18n::Translator;
use crate::pdf::{Canvas, PdfCell, PdfColumn, PdfGroupTableBuilder, PdfStyle, ReportDocument};

/// Items with a zero price or quantity, grouped by calculation.
pub struct CalculationEmptyReport<'a> {
    calculations: &'a [Calculation],
}

impl<'a> CalculationEmptyReport<'a> {
    pub fn new(calculations: &'a [Calculation]) -> Self {
        Self { calculations }
    }
}

impl Report for CalculationEmptyReport<'_> {
    fn title(&self, translator: &Translator) -> String {
        translator.trans("report.empty")
    }

    fn description(&self, translator: &Translator) -> Option<String> {
        Some(translator.trans("report.empty.description"))
    }

    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool> {
        let calculations: Vec<_> = sorted_by_id(self.calculations)
            .into_iter()
            .map(|c| (c, empty_items(c)))
            .filter(|(_, items)| !items.is_empty())
            .collect();
        if calculations.is_empty() {
            return skip(doc, "no empty item");
        }

        begin(self, doc)?;
        let formatter = *doc.formatter();
        let translator = *doc.translator();

        let mut table = PdfGroupTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left(translator.trans("item.group"), 35.0),
            PdfColumn::left(translator.trans("item.description"), 85.0),
            PdfColumn::left(translator.trans("item.unit"), 18.0),
            PdfColumn::right(translator.trans("item.price"), 24.0),
            PdfColumn::right(translator.trans("item.quantity"), 24.0),
        ])?;
        table.set_repeat_group(true);
        table.output_headers()?;

        let mut count = 0;
        for (calculation, items) in &calculations {
            table.set_group_key(calculation_key(&formatter, calculation))?;
            for empty in items {
                let item = empty.item;
                let style = |value: f64| {
                    if value == 0.0 {
                        PdfStyle::error()
                    } else {
                        PdfStyle::cell()
                    }
                };
                table.start_row()?;
                table.add(format!("{} / {}", empty.group, empty.category))?;
                table.add(item.description.as_str())?;
                table.add(item.unit.clone().unwrap_or_default())?;
                table.add_styled(formatter.amount(item.price), style(item.price))?;
                table.add_styled(formatter.amount(item.quantity), style(item.quantity))?;
                table.end_row()?;
                count += 1;
            }
        }

        table.end_groups();
        start_totals(table.doc_mut())?;
        let calculations_count = formatter.count(calculations.len());
        let items_count = formatter.count(count);
        table.start_styled_row(PdfStyle::total())?;
        table.add_cell(
            PdfCell::new(translator.trans_with(
                "counters.calculations",
                &[("count", calculations_count.as_str())],
            ))
            .with_cols(2),
        )?;
        table.add_cell(
            PdfCell::new(
                translator.trans_with("counters.items", &[("count", items_count.as_str())]),
            )
            .with_cols(3),
        )?;
        table.end_row()?;

        rendered(table.doc(), count)
    }
}

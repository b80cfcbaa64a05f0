use super::{begin, margin_style, rendered, skip, start_totals, Report, TABLE_SPACING};
use crate::calculation::{Calculation, CalculationGroup};
use crate::error::Result;
use crate::format::Formatter;
use crate::i18n::Translator;
use crate::pdf::{
    Canvas, PdfCell, PdfColumn, PdfGroupTableBuilder, PdfStyle, PdfTableBuilder, ReportDocument,
};

const CATEGORY_INDENT: f32 = 2.0;
const ITEM_INDENT: f32 = 4.0;

/// Detail of one calculation: items by group and category, group totals
/// and the overall totals.
pub struct CalculationItemsReport<'a> {
    calculation: &'a Calculation,
}

impl<'a> CalculationItemsReport<'a> {
    pub fn new(calculation: &'a Calculation) -> Self {
        Self { calculation }
    }

    fn render_items<C: Canvas>(
        &self,
        doc: &mut ReportDocument<C>,
        formatter: &Formatter,
    ) -> Result<usize> {
        let translator = *doc.translator();
        let mut table = PdfGroupTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left(translator.trans("item.description"), 90.0),
            PdfColumn::left(translator.trans("item.unit"), 18.0),
            PdfColumn::right(translator.trans("item.price"), 24.0),
            PdfColumn::right(translator.trans("item.quantity"), 24.0),
            PdfColumn::right(translator.trans("item.total"), 24.0),
        ])?;
        table.set_repeat_group(true);
        table.output_headers()?;

        let mut rows = 0;
        let mut items_total = 0.0;
        for group in &self.calculation.groups {
            if group.items().next().is_none() {
                continue;
            }
            table.set_group_key(group.code.as_str())?;

            let mut group_total = 0.0;
            for category in group.categories.iter().filter(|c| !c.items.is_empty()) {
                let style = PdfStyle::bold_cell().with_indent(CATEGORY_INDENT);
                table.single_line(category.code.as_str(), style)?;

                for item in &category.items {
                    let value_style = |value: f64| {
                        if value == 0.0 {
                            PdfStyle::error()
                        } else {
                            PdfStyle::cell()
                        }
                    };
                    table.start_row()?;
                    table.add_styled(
                        item.description.as_str(),
                        PdfStyle::cell().with_indent(ITEM_INDENT),
                    )?;
                    table.add(item.unit.clone().unwrap_or_default())?;
                    table.add_styled(formatter.amount(item.price), value_style(item.price))?;
                    table.add_styled(formatter.amount(item.quantity), value_style(item.quantity))?;
                    table.add(formatter.amount(item.total()))?;
                    table.end_row()?;

                    group_total += item.total();
                    rows += 1;
                }
            }

            let code = group.code.as_str();
            table.start_styled_row(PdfStyle::total())?;
            let label = translator.trans_with("total.group", &[("code", code)]);
            table.add_cell(PdfCell::new(label).with_cols(4))?;
            table.add(formatter.amount(group_total))?;
            table.end_row()?;
            items_total += group_total;
        }

        table.end_groups();
        start_totals(table.doc_mut())?;
        table.start_styled_row(PdfStyle::total())?;
        table.add_cell(PdfCell::new(translator.trans("total.items")).with_cols(4))?;
        table.add(formatter.amount(items_total))?;
        table.end_row()?;
        Ok(rows)
    }

    fn render_groups<C: Canvas>(
        &self,
        doc: &mut ReportDocument<C>,
        formatter: &Formatter,
    ) -> Result<()> {
        let translator = *doc.translator();
        let groups: Vec<&CalculationGroup> = self
            .calculation
            .groups
            .iter()
            .filter(|g| g.items().next().is_some())
            .collect();

        doc.move_y(TABLE_SPACING);
        let mut table = PdfTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left(translator.trans("group.name"), 70.0),
            PdfColumn::right(translator.trans("group.amount"), 30.0),
            PdfColumn::right(translator.trans("group.margin"), 20.0),
            PdfColumn::right(translator.trans("group.margin_amount"), 30.0),
            PdfColumn::right(translator.trans("group.total"), 30.0),
        ])?;
        // headers, groups and total stay on one page
        table.ensure_space(groups.len() + 2)?;
        table.output_headers()?;

        for group in &groups {
            table.add_row([
                group.code.clone(),
                formatter.amount(group.amount()),
                formatter.percent(group.margin, 0),
                formatter.amount(group.margin_amount()),
                formatter.amount(group.total()),
            ])?;
        }

        let calculation = self.calculation;
        table.add_styled_row(
            [
                translator.trans("total.groups"),
                formatter.amount(calculation.groups_amount()),
                formatter.percent(calculation.groups_margin(), 0),
                formatter.amount(calculation.groups_margin_amount()),
                formatter.amount(calculation.groups_total()),
            ],
            PdfStyle::total(),
        )
    }

    fn render_overall<C: Canvas>(
        &self,
        doc: &mut ReportDocument<C>,
        formatter: &Formatter,
    ) -> Result<()> {
        let translator = *doc.translator();
        let calculation = self.calculation;
        let overall_style = margin_style(doc, calculation.overall_margin(), PdfStyle::total());

        doc.move_y(TABLE_SPACING);
        let mut table = PdfTableBuilder::new(doc);
        table.add_columns(vec![
            PdfColumn::left("", 120.0),
            PdfColumn::right("", 30.0),
            PdfColumn::right("", 30.0),
        ])?;
        table.ensure_space(5)?;

        table.add_row([
            translator.trans("total.groups"),
            String::new(),
            formatter.amount(calculation.groups_total()),
        ])?;
        table.add_row([
            translator.trans("total.global_margin"),
            formatter.percent(calculation.global_margin(), 0),
            formatter.amount(calculation.global_amount()),
        ])?;
        table.add_styled_row(
            [
                translator.trans("total.net"),
                String::new(),
                formatter.amount(calculation.total_net()),
            ],
            PdfStyle::bold_cell(),
        )?;
        table.add_row([
            translator.trans("total.user_margin"),
            formatter.percent(calculation.user_margin, 0),
            formatter.amount(calculation.user_amount()),
        ])?;

        table.start_styled_row(PdfStyle::total())?;
        table.add(translator.trans("total.overall"))?;
        table.add_styled(formatter.percent(calculation.overall_margin(), 0), overall_style)?;
        table.add(formatter.amount(calculation.overall_total()))?;
        table.end_row()
    }
}

impl Report for CalculationItemsReport<'_> {
    fn title(&self, translator: &Translator) -> String {
        let id = self.calculation.id.to_string();
        translator.trans_with("report.items", &[("id", id.as_str())])
    }

    fn description(&self, _translator: &Translator) -> Option<String> {
        let calculation = self.calculation;
        let lines: Vec<&str> = [calculation.customer.as_str(), calculation.description.as_str()]
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    }

    fn render<C: Canvas>(&self, doc: &mut ReportDocument<C>) -> Result<bool> {
        if self.calculation.is_empty() {
            return skip(doc, "calculation without item");
        }

        begin(self, doc)?;
        let formatter = *doc.formatter();
        let rows = self.render_items(doc, &formatter)?;
        self.render_groups(doc, &formatter)?;
        self.render_overall(doc, &formatter)?;
        rendered(doc, rows)
    }
}

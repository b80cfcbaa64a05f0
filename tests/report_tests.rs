use calcreport::calculation::{Calculation, CalculationCategory, CalculationGroup, CalculationItem};
use calcreport::pdf::{
    Canvas, DocumentOptions, PdfStyle, RecordedRow, RecordingCanvas, RenderState, ReportDocument,
};
use calcreport::report::{
    CalculationByMonthReport, CalculationByStateReport, CalculationDuplicateReport,
    CalculationEmptyReport, CalculationItemsReport, CalculationsReport, Report, Totals,
};
use calcreport::Locale;
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn document() -> ReportDocument<RecordingCanvas> {
    ReportDocument::new(RecordingCanvas::default(), DocumentOptions::default())
}

/// A calculation whose single group turns `items` into `overall`.
fn calculation(id: u32, state: &str, items: f64, overall: f64) -> Calculation {
    let mut calculation = Calculation::new(id, date(2024, 1, 10), state);
    calculation.customer = format!("Customer {id}");
    calculation.global_margin = Some(0.0);
    let margin = if items == 0.0 { 0.0 } else { overall / items - 1.0 };
    calculation.groups.push(CalculationGroup::new(
        "G1",
        margin,
        vec![CalculationCategory::new(
            "C1",
            vec![CalculationItem::new("Item", items, 1.0)],
        )],
    ));
    calculation
}

fn render<R: Report>(report: &R) -> (bool, RecordingCanvas) {
    let mut doc = document();
    let rendered = report.render(&mut doc).unwrap();
    (rendered, doc.finish().unwrap())
}

fn amount(text: &str) -> f64 {
    text.replace(',', "").parse().unwrap()
}

fn total_rows(canvas: &RecordingCanvas) -> Vec<RecordedRow> {
    canvas
        .rows()
        .into_iter()
        .filter(|r| {
            r.cells
                .iter()
                .all(|c| c.style.font.bold && c.style.fill_color == PdfStyle::total().fill_color)
        })
        .collect()
}

fn data_rows(canvas: &RecordingCanvas) -> Vec<RecordedRow> {
    canvas
        .rows()
        .into_iter()
        .filter(|r| r.cells.iter().all(|c| !c.style.font.bold && c.style.fill_color.is_none()))
        .filter(|r| r.cells.len() > 3)
        .collect()
}

#[test]
fn test_empty_input_renders_nothing() {
    let empty: Vec<Calculation> = Vec::new();
    let no_items = vec![Calculation::new(1, date(2024, 1, 1), "draft")];

    assert!(!render(&CalculationsReport::new(&empty)).0);
    assert!(!render(&CalculationByStateReport::new(&empty)).0);
    assert!(!render(&CalculationByMonthReport::new(&empty)).0);
    assert!(!render(&CalculationEmptyReport::new(&empty)).0);
    assert!(!render(&CalculationDuplicateReport::new(&empty)).0);
    assert!(!render(&CalculationItemsReport::new(&no_items[0])).0);

    let (rendered, canvas) = render(&CalculationsReport::new(&empty));
    assert!(!rendered);
    assert_eq!(canvas.page_count(), 0);
    assert!(canvas.ops().is_empty());
}

#[test]
fn test_render_walks_the_state_machine() {
    let calculations = vec![calculation(1, "draft", 80.0, 100.0)];
    let mut doc = document();
    assert_eq!(doc.state(), RenderState::NotStarted);
    assert!(CalculationsReport::new(&calculations).render(&mut doc).unwrap());
    assert_eq!(doc.state(), RenderState::TotalsEmitted);
    doc.finish().unwrap();

    let mut doc = document();
    assert!(!CalculationsReport::new(&[]).render(&mut doc).unwrap());
    assert_eq!(doc.state(), RenderState::Done);
}

#[test]
fn test_grand_totals_example() {
    let calculations = vec![
        calculation(1, "draft", 80.0, 100.0),
        calculation(2, "draft", 150.0, 200.0),
    ];
    let totals: Totals = calculations.iter().collect();
    assert!((totals.items - 230.0).abs() < 1e-6);
    assert!((totals.overall - 300.0).abs() < 1e-6);
    assert!((totals.margin() - 0.304_347_826).abs() < 1e-6);

    let (rendered, canvas) = render(&CalculationsReport::new(&calculations));
    assert!(rendered);
    let totals_row = total_rows(&canvas).pop().unwrap();
    assert_eq!(
        totals_row.texts(),
        vec!["2 calculation(s)", "230.00", "30%", "300.00"]
    );
}

#[test]
fn test_totals_row_sums_line_amounts() {
    let calculations: Vec<Calculation> = (1..=40)
        .map(|id| calculation(id, "draft", 10.0 * id as f64 + 0.35, 13.0 * id as f64))
        .collect();
    let (_, canvas) = render(&CalculationsReport::new(&calculations));

    let rows = data_rows(&canvas);
    assert_eq!(rows.len(), 40);
    let last = rows[0].cells.len() - 1;
    let items_column = last - 2;
    let line_items: f64 = rows.iter().map(|r| amount(&r.cells[items_column].text)).sum();
    let line_overall: f64 = rows.iter().map(|r| amount(&r.cells[last].text)).sum();

    let totals_row = total_rows(&canvas).pop().unwrap();
    let cells = &totals_row.cells;
    assert!((amount(&cells[cells.len() - 3].text) - line_items).abs() < 1e-6);
    assert!((amount(&cells[cells.len() - 1].text) - line_overall).abs() < 1e-6);
}

#[test]
fn test_totals_row_matches_rounded_lines() {
    let calculations: Vec<Calculation> = (1..=3)
        .map(|id| calculation(id, "draft", 1.0, 4.0 / 3.0))
        .collect();

    let (_, canvas) = render(&CalculationsReport::new(&calculations));
    let rows = data_rows(&canvas);
    let last = rows[0].cells.len() - 1;
    let lines: Vec<&str> = rows.iter().map(|r| r.cells[last].text.as_str()).collect();
    assert_eq!(lines, vec!["1.33", "1.33", "1.33"]);
    let totals_row = total_rows(&canvas).pop().unwrap();
    assert_eq!(totals_row.cells.last().unwrap().text, "3.99");

    let (_, canvas) = render(&CalculationByStateReport::new(&calculations));
    let totals_row = total_rows(&canvas).pop().unwrap();
    assert_eq!(totals_row.cells[6].text, "3.99");
    assert_eq!(data_rows(&canvas)[0].cells[6].text, "3.99");

    let (_, canvas) = render(&CalculationByMonthReport::new(&calculations));
    let totals_row = total_rows(&canvas).pop().unwrap();
    assert_eq!(totals_row.cells[5].text, "3.99");
}

#[test]
fn test_margin_highlight_per_row() {
    let calculations = vec![
        calculation(1, "draft", 100.0, 105.0),
        calculation(2, "draft", 100.0, 110.0),
        calculation(3, "draft", 100.0, 150.0),
        calculation(4, "draft", 0.0, 0.0),
    ];
    let (_, canvas) = render(&CalculationsReport::new(&calculations));
    let rows = data_rows(&canvas);
    assert_eq!(rows.len(), 4);

    let options = DocumentOptions::default();
    for (row, calculation) in rows.iter().zip(&calculations) {
        assert_eq!(row.cells[0].text, calculation.id.to_string());
        assert_eq!(
            row.is_error(),
            calculation.is_margin_below(options.minimum_margin),
            "calculation {}",
            calculation.id
        );
    }
    // 10% is not below a 10% minimum
    assert!(rows[0].is_error());
    assert!(!rows[1].is_error());
    assert!(!rows[2].is_error());
    assert!(rows[3].is_error());
}

#[test]
fn test_calculations_grouped_by_state() {
    let calculations = vec![
        calculation(3, "draft", 10.0, 20.0),
        calculation(1, "accepted", 10.0, 20.0),
        calculation(2, "draft", 10.0, 20.0),
        calculation(4, "accepted", 10.0, 20.0),
    ];
    let (_, canvas) = render(&CalculationsReport::new(&calculations).grouped(true));

    let groups: Vec<String> = canvas
        .rows_with_style(&PdfStyle::group())
        .iter()
        .map(|r| r.texts().join(""))
        .collect();
    assert_eq!(groups, vec!["accepted", "draft"]);

    let ids: Vec<String> = data_rows(&canvas)
        .iter()
        .map(|r| r.cells[0].text.clone())
        .collect();
    assert_eq!(ids, vec!["1", "4", "2", "3"]);
    assert!(!canvas.contains_text("Status"));
}

#[test]
fn test_items_report_example() {
    let mut calculation = Calculation::new(5, date(2024, 2, 1), "draft");
    calculation.global_margin = Some(0.0);
    calculation.groups.push(CalculationGroup::new(
        "G1",
        0.0,
        vec![CalculationCategory::new(
            "C1",
            vec![
                CalculationItem::new("Boards", 10.0, 2.0),
                CalculationItem::new("Free sample", 0.0, 5.0),
            ],
        )],
    ));

    let (rendered, canvas) = render(&CalculationItemsReport::new(&calculation));
    assert!(rendered);
    assert!(canvas.contains_text("Calculation 5"));

    let rows = canvas.rows();
    let boards = rows.iter().find(|r| r.cells[0].text == "Boards").unwrap();
    let sample = rows.iter().find(|r| r.cells[0].text == "Free sample").unwrap();
    assert_eq!(boards.texts(), vec!["Boards", "", "10.00", "2.00", "20.00"]);
    assert!(!boards.is_error());
    assert!(sample.is_error());
    assert!(sample.cells[2].style.is_error());
    assert!(!sample.cells[3].style.is_error());

    let group_total = rows.iter().find(|r| r.cells[0].text == "Total G1").unwrap();
    assert_eq!(group_total.texts(), vec!["Total G1", "20.00"]);

    let group_rows = canvas.rows_with_style(&PdfStyle::group());
    assert_eq!(group_rows.len(), 1);
    assert_eq!(group_rows[0].texts(), vec!["G1"]);
}

#[test]
fn test_items_report_overall_block() {
    let mut calculation = Calculation::new(6, date(2024, 2, 1), "draft");
    calculation.global_margin = Some(0.1);
    calculation.user_margin = -0.5;
    calculation.groups.push(CalculationGroup::new(
        "G1",
        0.0,
        vec![CalculationCategory::new("C1", vec![CalculationItem::new("A", 100.0, 1.0)])],
    ));
    calculation.groups.push(CalculationGroup::new("Empty", 0.5, Vec::new()));

    let (_, canvas) = render(&CalculationItemsReport::new(&calculation));
    let rows = canvas.rows();
    let overall = rows
        .iter()
        .find(|r| r.cells[0].text == "Overall total")
        .unwrap();
    assert_eq!(overall.texts(), vec!["Overall total", "-45%", "55.00"]);
    assert!(overall.is_error());

    // groups without items are left out
    assert!(!canvas.contains_text("Empty"));
    let net = rows.iter().find(|r| r.cells[0].text == "Total net").unwrap();
    assert_eq!(net.cells[2].text, "110.00");
}

#[test]
fn test_by_state_report() {
    let calculations = vec![
        calculation(1, "draft", 100.0, 120.0),
        calculation(2, "accepted", 100.0, 150.0),
        calculation(3, "draft", 100.0, 130.0),
    ];
    let (_, canvas) = render(&CalculationByStateReport::new(&calculations));

    let rows = data_rows(&canvas);
    let states: Vec<&str> = rows.iter().map(|r| r.cells[0].text.as_str()).collect();
    assert_eq!(states, vec!["accepted", "draft"]);
    assert_eq!(
        rows[1].texts(),
        vec!["draft", "2", "66.67%", "200.00", "50.00", "25%", "250.00", "62.50%"]
    );

    let totals = total_rows(&canvas).pop().unwrap();
    assert_eq!(
        totals.texts(),
        vec!["Total", "3", "100.00%", "300.00", "100.00", "33%", "400.00", "100.00%"]
    );
}

#[test]
fn test_by_month_report_is_chronological() {
    let mut march = calculation(1, "draft", 100.0, 105.0);
    march.date = date(2024, 3, 2);
    let mut january = calculation(2, "draft", 100.0, 150.0);
    january.date = date(2024, 1, 20);
    let mut december = calculation(3, "draft", 50.0, 60.0);
    december.date = date(2023, 12, 31);
    let calculations = vec![march, january, december];

    let (_, canvas) = render(&CalculationByMonthReport::new(&calculations));
    let rows = data_rows(&canvas);
    let months: Vec<&str> = rows.iter().map(|r| r.cells[0].text.as_str()).collect();
    assert_eq!(months, vec!["December 2023", "January 2024", "March 2024"]);
    assert!(rows[2].is_error());
    assert!(!rows[1].is_error());

    let totals = total_rows(&canvas).pop().unwrap();
    assert_eq!(totals.cells[2].text, "250.00");
    assert_eq!(totals.cells[5].text, "315.00");
}

#[test]
fn test_empty_items_report() {
    let mut first = calculation(1, "draft", 10.0, 12.0);
    first.groups[0].categories[0]
        .items
        .push(CalculationItem::new("No price", 0.0, 3.0));
    first.groups[0].categories[0]
        .items
        .push(CalculationItem::new("No quantity", 4.0, 0.0));
    let clean = calculation(2, "draft", 10.0, 12.0);
    let calculations = vec![clean, first];

    let (rendered, canvas) = render(&CalculationEmptyReport::new(&calculations));
    assert!(rendered);

    let groups = canvas.rows_with_style(&PdfStyle::group());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].texts(), vec!["#1 - 01/10/2024 - Customer 1"]);

    let rows = canvas.rows();
    let described = |text: &str| {
        rows.iter()
            .find(|r| r.cells.get(1).is_some_and(|c| c.text == text))
            .unwrap()
    };
    let no_price = described("No price");
    assert!(no_price.cells[3].style.is_error());
    assert!(!no_price.cells[4].style.is_error());
    let no_quantity = described("No quantity");
    assert!(!no_quantity.cells[3].style.is_error());
    assert!(no_quantity.cells[4].style.is_error());

    let totals = total_rows(&canvas).pop().unwrap();
    assert_eq!(totals.texts(), vec!["1 calculation(s)", "2 item(s)"]);
}

#[test]
fn test_duplicate_items_report() {
    let mut calculation = calculation(1, "draft", 10.0, 12.0);
    let items = &mut calculation.groups[0].categories[0].items;
    items.push(CalculationItem::new("  ITEM ", 5.0, 2.0));
    items.push(CalculationItem::new("Unique", 1.0, 1.0));
    let calculations = vec![calculation];

    let (rendered, canvas) = render(&CalculationDuplicateReport::new(&calculations));
    assert!(rendered);
    let rows = canvas.rows();
    let duplicate = rows.iter().find(|r| r.cells[0].text == "Item").unwrap();
    assert_eq!(duplicate.texts(), vec!["Item", "", "2", "20.00"]);
    assert!(!canvas.contains_text("Unique"));

    let totals = total_rows(&canvas).pop().unwrap();
    assert_eq!(totals.texts(), vec!["1 calculation(s)", "2", "20.00"]);
}

#[test]
fn test_reports_without_findings_render_nothing() {
    let calculations = vec![calculation(1, "draft", 10.0, 12.0)];
    assert!(!render(&CalculationEmptyReport::new(&calculations)).0);
    assert!(!render(&CalculationDuplicateReport::new(&calculations)).0);
}

#[test]
fn test_long_report_spans_pages_with_counters() {
    let calculations: Vec<Calculation> = (1..=150)
        .map(|id| calculation(id, "draft", 100.0, 120.0))
        .collect();
    let (_, canvas) = render(&CalculationsReport::new(&calculations));
    let pages = canvas.page_count();
    assert!(pages >= 3);
    for page in 1..=pages {
        assert!(canvas.contains_text(&format!("Page {page} / {pages}")));
    }
    assert_eq!(data_rows(&canvas).len(), 150);
}

fn header_texts<R: Report>(report: &R, locale: Locale) -> Vec<String> {
    let options = DocumentOptions {
        locale,
        ..DocumentOptions::default()
    };
    let mut doc = ReportDocument::new(RecordingCanvas::default(), options);
    assert!(report.render(&mut doc).unwrap());
    let canvas = doc.finish().unwrap();
    canvas
        .rows_with_style(&PdfStyle::header())
        .iter()
        .flat_map(|r| r.cells.iter().map(|c| c.text.clone()))
        .collect()
}

#[test]
fn test_header_labels_fit_their_columns() {
    let mut audited = calculation(1, "draft", 10.0, 12.0);
    let items = &mut audited.groups[0].categories[0].items;
    items.push(CalculationItem::new("Item", 0.0, 1.0));
    let calculations = vec![audited, calculation(2, "accepted", 5.0, 6.0)];

    for locale in [Locale::EnUs, Locale::FrCh, Locale::DeCh] {
        let headers: Vec<String> = [
            header_texts(&CalculationsReport::new(&calculations), locale),
            header_texts(&CalculationsReport::new(&calculations).grouped(true), locale),
            header_texts(&CalculationByStateReport::new(&calculations), locale),
            header_texts(&CalculationByMonthReport::new(&calculations), locale),
            header_texts(&CalculationItemsReport::new(&calculations[0]), locale),
            header_texts(&CalculationEmptyReport::new(&calculations), locale),
            header_texts(&CalculationDuplicateReport::new(&calculations), locale),
        ]
        .concat();

        assert!(headers.iter().any(|h| h.contains('%')));
        for header in &headers {
            assert!(!header.ends_with("..."), "{locale}: '{header}' is truncated");
        }
    }
}

#[test]
fn test_items_total_is_not_preceded_by_a_repeated_group() {
    let mut broke_before_total = false;
    for count in 30..90 {
        let mut calculation = Calculation::new(8, date(2024, 2, 1), "draft");
        calculation.global_margin = Some(0.0);
        let items = (0..count)
            .map(|i| CalculationItem::new(format!("Item {i}"), 1.0, 1.0))
            .collect();
        calculation.groups.push(CalculationGroup::new(
            "G1",
            0.0,
            vec![CalculationCategory::new("C1", items)],
        ));

        let (_, canvas) = render(&CalculationItemsReport::new(&calculation));
        let rows = canvas.rows();
        let total = rows
            .iter()
            .position(|r| r.cells[0].text == "Items total")
            .unwrap();
        let previous = rows[..total]
            .iter()
            .rev()
            .find(|r| !r.has_style(&PdfStyle::header()))
            .unwrap();
        assert!(!previous.has_style(&PdfStyle::group()), "{count} items");
        if rows[total - 1].has_style(&PdfStyle::header()) {
            broke_before_total = true;
        }
    }
    assert!(broke_before_total);
}

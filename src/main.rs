use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tabled::{settings::Style, Table, Tabled};

use calcreport::calculation::{has_duplicate_items, has_empty_items};
use calcreport::config::{
    config_dir, load_config, load_data, resolve_output_dir, CALCULATIONS_FILE,
    CALCULATIONS_TEMPLATE, CONFIG_TEMPLATE,
};
use calcreport::generator::{generate_pdf, generate_preview, report_file_name, PageSetup};
use calcreport::pdf::{Canvas, DocumentOptions};
use calcreport::report::{
    CalculationByMonthReport, CalculationByStateReport, CalculationDuplicateReport,
    CalculationEmptyReport, CalculationItemsReport, CalculationsReport, Report,
};
use calcreport::{Config, Formatter, ReportError, Result};

#[derive(Parser)]
#[command(name = "calcreport")]
#[command(version, about = "Calculation PDF reports", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.calcreport or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Increase logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// List calculations
    List {
        /// Number of calculations to show (default: all)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Calculations data file (default: calculations.toml in the config directory)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Show configuration and calculations summary
    Status {
        /// Calculations data file (default: calculations.toml in the config directory)
        #[arg(long)]
        data: Option<PathBuf>,
    },

    /// Generate a PDF report
    Report {
        /// Report to generate
        #[arg(value_enum)]
        kind: ReportKind,

        /// Calculation identifier (items report)
        #[arg(long)]
        id: Option<u32>,

        /// Group the calculations list by state
        #[arg(long)]
        grouped: bool,

        /// Calculations data file (default: calculations.toml in the config directory)
        #[arg(long)]
        data: Option<PathBuf>,

        /// Custom output file path (default: output_dir/<report>-<date>.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the report rows instead of writing a PDF
        #[arg(long)]
        preview: bool,

        /// Open generated PDF with system default viewer
        #[arg(long)]
        open: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportKind {
    /// List of calculations
    Calculations,
    /// Calculations by state
    State,
    /// Calculations by month
    Month,
    /// Items of one calculation
    Items,
    /// Calculations with empty items
    Empty,
    /// Calculations with duplicate items
    Duplicate,
}

impl ReportKind {
    fn name(self) -> &'static str {
        match self {
            ReportKind::Calculations => "calculations",
            ReportKind::State => "state",
            ReportKind::Month => "month",
            ReportKind::Items => "items",
            ReportKind::Empty => "empty",
            ReportKind::Duplicate => "duplicate",
        }
    }
}

struct ReportArgs {
    id: Option<u32>,
    grouped: bool,
    data: Option<PathBuf>,
    output: Option<PathBuf>,
    preview: bool,
    open: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::List { limit, data } => cmd_list(&cfg_dir, limit, data.as_deref()),
        Commands::Status { data } => cmd_status(&cfg_dir, data.as_deref()),
        Commands::Report {
            kind,
            id,
            grouped,
            data,
            output,
            preview,
            open,
        } => cmd_report(
            &cfg_dir,
            kind,
            ReportArgs {
                id,
                grouped,
                data,
                output,
                preview,
                open,
            },
        ),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join(CALCULATIONS_FILE), CALCULATIONS_TEMPLATE)?;

    println!("Initialized calcreport config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Enter your calculations:    $EDITOR {}/{}",
        cfg_dir.display(),
        CALCULATIONS_FILE
    );
    println!();
    println!("Then generate your first report:");
    println!("  calcreport report calculations");

    Ok(())
}

fn ensure_config_dir(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }
    Ok(())
}

#[derive(Tabled)]
struct CalculationRow {
    #[tabled(rename = "ID")]
    id: u32,
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "STATE")]
    state: String,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "ITEMS")]
    items: String,
    #[tabled(rename = "MARGIN")]
    margin: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

/// List calculations
fn cmd_list(cfg_dir: &Path, limit: Option<usize>, data: Option<&Path>) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let data = load_data(cfg_dir, &config, data)?;

    if data.calculations.is_empty() {
        println!("No calculations found.");
        return Ok(());
    }

    let formatter = Formatter::new(config.report.locale);
    let minimum = config.report.minimum_margin;
    let mut calculations: Vec<_> = data.calculations.iter().collect();
    calculations.sort_by_key(|c| c.id);
    let shown = limit.unwrap_or(calculations.len()).min(calculations.len());

    let rows: Vec<CalculationRow> = calculations[..shown]
        .iter()
        .map(|c| {
            let mut margin = formatter.percent(c.overall_margin(), 0);
            if c.is_margin_below(minimum) {
                margin.push_str(" !");
            }
            CalculationRow {
                id: c.id,
                date: formatter.date(c.date),
                state: c.state.clone(),
                customer: c.customer.clone(),
                items: formatter.amount(c.items_total()),
                margin,
                total: formatter.amount(c.overall_total()),
            }
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();
    println!("Total: {} calculations", calculations.len());
    println!(
        "Margins marked with '!' are below {}",
        formatter.percent(minimum, 0)
    );

    Ok(())
}

/// Show configuration and calculations summary
fn cmd_status(cfg_dir: &Path, data: Option<&Path>) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let data = load_data(cfg_dir, &config, data)?;
    let formatter = Formatter::new(config.report.locale);
    let calculations = &data.calculations;

    let below = calculations
        .iter()
        .filter(|c| c.is_margin_below(config.report.minimum_margin))
        .count();
    let empty = calculations.iter().filter(|c| has_empty_items(c)).count();
    let duplicate = calculations.iter().filter(|c| has_duplicate_items(c)).count();

    println!("Calculation Report Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Company:          {}", config.company.name);
    println!("Locale:           {}", config.report.locale);
    println!(
        "Minimum margin:   {}",
        formatter.percent(config.report.minimum_margin, 0)
    );
    println!("Output directory: {}", resolve_output_dir(cfg_dir, &config).display());
    println!("Calculations:     {}", calculations.len());
    println!("Below minimum:    {below}");
    println!("With empty items: {empty}");
    println!("With duplicates:  {duplicate}");

    Ok(())
}

/// Generate a report
fn cmd_report(cfg_dir: &Path, kind: ReportKind, args: ReportArgs) -> Result<()> {
    ensure_config_dir(cfg_dir)?;

    let config = load_config(cfg_dir)?;
    let data = load_data(cfg_dir, &config, args.data.as_deref())?;
    let today = chrono::Local::now().date_naive();
    let calculations = &data.calculations;

    match kind {
        ReportKind::Calculations => {
            let report = CalculationsReport::new(calculations).grouped(args.grouped);
            emit(&report, kind, &config, cfg_dir, &args, today)
        }
        ReportKind::State => {
            let report = CalculationByStateReport::new(calculations);
            emit(&report, kind, &config, cfg_dir, &args, today)
        }
        ReportKind::Month => {
            let report = CalculationByMonthReport::new(calculations);
            emit(&report, kind, &config, cfg_dir, &args, today)
        }
        ReportKind::Items => {
            let id = args
                .id
                .ok_or_else(|| ReportError::MissingCalculationId(kind.name().to_string()))?;
            let report = CalculationItemsReport::new(data.find(id)?);
            emit(&report, kind, &config, cfg_dir, &args, today)
        }
        ReportKind::Empty => {
            let report = CalculationEmptyReport::new(calculations);
            emit(&report, kind, &config, cfg_dir, &args, today)
        }
        ReportKind::Duplicate => {
            let report = CalculationDuplicateReport::new(calculations);
            emit(&report, kind, &config, cfg_dir, &args, today)
        }
    }
}

fn emit<R: Report>(
    report: &R,
    kind: ReportKind,
    config: &Config,
    cfg_dir: &Path,
    args: &ReportArgs,
    today: chrono::NaiveDate,
) -> Result<()> {
    let options = config.document_options(today);
    let setup = PageSetup {
        format: config.report.page_format,
        orientation: config.report.orientation,
    };

    if args.preview {
        return print_preview(report, options, setup);
    }

    let Some(bytes) = generate_pdf(report, options, setup)? else {
        println!("Nothing to report: the '{}' report is empty.", kind.name());
        return Ok(());
    };

    let pdf_path = match &args.output {
        Some(path) => path.clone(),
        None => {
            let id = if kind == ReportKind::Items { args.id } else { None };
            resolve_output_dir(cfg_dir, config).join(report_file_name(kind.name(), id, today))
        }
    };
    if let Some(parent) = pdf_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&pdf_path, bytes)?;

    println!("Generated '{}' report", kind.name());
    println!("  Saved:    {}", pdf_path.display());

    if args.open {
        open_path(&pdf_path)?;
    }

    Ok(())
}

fn print_preview<R: Report>(report: &R, options: DocumentOptions, setup: PageSetup) -> Result<()> {
    let Some(canvas) = generate_preview(report, options, setup)? else {
        println!("Nothing to report.");
        return Ok(());
    };

    let mut page = 0;
    for row in canvas.rows() {
        if row.page != page {
            page = row.page;
            println!("--- page {page} / {} ---", canvas.page_count());
        }
        let texts: Vec<&str> = row.texts().into_iter().filter(|t| !t.is_empty()).collect();
        if texts.is_empty() {
            continue;
        }
        let marker = if row.is_error() { "! " } else { "  " };
        println!("{marker}{}", texts.join(" | "));
    }
    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReportError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReportError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", pdf_path.to_str().unwrap_or("")])
            .spawn()
            .map_err(ReportError::Io)?;
    }
    Ok(())
}

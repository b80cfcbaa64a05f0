pub mod calculation;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod i18n;
pub mod pdf;
pub mod report;

pub use calculation::{Calculation, CalculationCategory, CalculationGroup, CalculationItem};
pub use config::{CalculationData, Company, Config};
pub use error::{ReportError, Result};
pub use format::{Formatter, Locale};
pub use generator::{generate_pdf, generate_preview, PageSetup};
pub use report::Report;

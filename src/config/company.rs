use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use super::expand_path;
use crate::calculation::GlobalMargin;
use crate::format::{Formatter, Locale};
use crate::pdf::{
    load_logo, DocumentOptions, HeaderCompany, Orientation, PageFormat, PdfFooter, PdfHeader,
};

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub company: Company,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub pdf: PdfSettings,
    #[serde(default)]
    pub global_margins: Vec<GlobalMargin>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Company {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    /// Path or http(s) URL of an image printed in the page header.
    #[serde(default)]
    pub logo: Option<String>,
}

impl Company {
    pub fn header(&self) -> HeaderCompany {
        let zip_city = match (&self.zip, &self.city) {
            (Some(zip), Some(city)) => Some(format!("{zip} {city}")),
            (Some(part), None) | (None, Some(part)) => Some(part.clone()),
            (None, None) => None,
        };
        HeaderCompany {
            name: self.name.clone(),
            address: self.address.clone(),
            zip_city,
            phone: self.phone.clone(),
            email: self.email.clone(),
            url: self.url.clone(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ReportSettings {
    #[serde(default)]
    pub locale: Locale,
    /// Margins below this fraction are printed in red.
    #[serde(default = "default_minimum_margin")]
    pub minimum_margin: f64,
    #[serde(default)]
    pub page_format: PageFormat,
    #[serde(default)]
    pub orientation: Orientation,
    /// Text centered in the page footer.
    #[serde(default = "default_application")]
    pub application: String,
    #[serde(default)]
    pub application_url: Option<String>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            minimum_margin: default_minimum_margin(),
            page_format: PageFormat::default(),
            orientation: Orientation::default(),
            application: default_application(),
            application_url: None,
        }
    }
}

fn default_minimum_margin() -> f64 {
    0.1
}

fn default_application() -> String {
    "calcreport".to_string()
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PdfSettings {
    pub output_dir: String,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            output_dir: "~/.calcreport/output".to_string(),
        }
    }
}

impl Config {
    /// Page chrome and formatting for documents printed on `today`.
    ///
    /// A logo that cannot be loaded is left out of the header.
    pub fn document_options(&self, today: NaiveDate) -> DocumentOptions {
        let logo = self.company.logo.as_deref().and_then(|source| {
            let source = expand_path(source);
            match load_logo(&source.to_string_lossy()) {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("{e}; printing the header without logo");
                    None
                }
            }
        });

        let formatter = Formatter::new(self.report.locale);
        DocumentOptions {
            locale: self.report.locale,
            minimum_margin: self.report.minimum_margin,
            header: PdfHeader::new(Some(self.company.header()), logo),
            footer: PdfFooter::new(
                self.report.application.as_str(),
                self.report.application_url.clone(),
                Some(formatter.date(today)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: Config = toml::from_str("[company]\nname = \"Acme\"\n").unwrap();
        assert_eq!(config.report.locale, Locale::EnUs);
        assert_eq!(config.report.minimum_margin, 0.1);
        assert_eq!(config.report.page_format, PageFormat::A4);
        assert!(config.global_margins.is_empty());
    }

    #[test]
    fn test_report_settings_parse() {
        let config: Config = toml::from_str(
            r#"
[company]
name = "Acme"
zip = "1000"
city = "Lausanne"

[report]
locale = "fr-CH"
minimum_margin = 0.25
orientation = "landscape"

[[global_margins]]
minimum = 0.0
maximum = 1000.0
margin = 0.05
"#,
        )
        .unwrap();
        assert_eq!(config.report.locale, Locale::FrCh);
        assert_eq!(config.report.orientation, Orientation::Landscape);
        assert_eq!(config.global_margins.len(), 1);
        assert_eq!(config.company.header().zip_city.as_deref(), Some("1000 Lausanne"));
    }

    #[test]
    fn test_missing_logo_degrades_to_none() {
        let mut config: Config = toml::from_str("[company]\nname = \"Acme\"\n").unwrap();
        config.company.logo = Some("/nonexistent/logo.png".to_string());
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let options = config.document_options(today);
        assert!(!options.header.has_logo());
        assert_eq!(options.minimum_margin, 0.1);
    }
}

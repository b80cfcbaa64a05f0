use std::time::Duration;

use image::DynamicImage;
use ureq::Agent;

use super::canvas::{Canvas, CanvasCell, PdfRect};
use super::metrics;
use super::style::{PdfColor, PdfFont, PdfStyle, PdfTextAlignment};
use crate::error::{ReportError, Result};

const TITLE_SIZE: f32 = 12.0;
const TITLE_HEIGHT: f32 = 6.0;
const COMPANY_SIZE: f32 = 8.0;
const COMPANY_LINE: f32 = 3.5;
const DESCRIPTION_SIZE: f32 = 8.0;
const DESCRIPTION_LINE: f32 = 4.0;
const LOGO_WIDTH: f32 = 20.0;
const LOGO_HEIGHT: f32 = 12.0;
const SPACING: f32 = 2.0;

/// Company block printed on the right of every page header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderCompany {
    pub name: String,
    pub address: Option<String>,
    pub zip_city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub url: Option<String>,
}

impl HeaderCompany {
    fn lines(&self) -> Vec<(&str, bool)> {
        let mut lines = vec![(self.name.as_str(), true)];
        for line in [&self.address, &self.zip_city, &self.phone, &self.email, &self.url]
            .into_iter()
            .flatten()
        {
            lines.push((line.as_str(), false));
        }
        lines
    }
}

/// Page header: logo, title, company block, description and separator.
#[derive(Debug, Clone, Default)]
pub struct PdfHeader {
    company: Option<HeaderCompany>,
    logo: Option<DynamicImage>,
}

impl PdfHeader {
    pub fn new(company: Option<HeaderCompany>, logo: Option<DynamicImage>) -> Self {
        Self { company, logo }
    }

    pub fn company(&self) -> Option<&HeaderCompany> {
        self.company.as_ref()
    }

    pub fn has_logo(&self) -> bool {
        self.logo.is_some()
    }

    /// Draw the header inside `[left, left + width]` from `top` down and
    /// return the y position below it.
    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        left: f32,
        top: f32,
        width: f32,
        title: &str,
        description: Option<&str>,
    ) -> f32 {
        let mut title_x = left;
        let mut height = TITLE_HEIGHT;

        if let Some(logo) = &self.logo {
            canvas.image(PdfRect::new(left, top, LOGO_WIDTH, LOGO_HEIGHT), logo);
            title_x += LOGO_WIDTH + SPACING;
            height = height.max(LOGO_HEIGHT);
        }

        let company_width = if self.company.is_some() { width * 0.4 } else { 0.0 };
        let title_width = left + width - company_width - title_x;
        let title_style = PdfStyle::no_border().with_bold(true).with_font_size(TITLE_SIZE);
        let title = metrics::truncate(title, title_width - 2.0, &title_style.font);
        canvas.cell(&CanvasCell {
            bounds: PdfRect::new(title_x, top, title_width, TITLE_HEIGHT),
            text: &title,
            style: &title_style,
            alignment: PdfTextAlignment::Left,
        });

        if let Some(company) = &self.company {
            let x = left + width - company_width;
            let mut y = top;
            for (line, bold) in company.lines() {
                let style = PdfStyle::no_border()
                    .with_bold(bold)
                    .with_font_size(COMPANY_SIZE);
                let text = metrics::truncate(line, company_width - 2.0, &style.font);
                canvas.cell(&CanvasCell {
                    bounds: PdfRect::new(x, y, company_width, COMPANY_LINE),
                    text: &text,
                    style: &style,
                    alignment: PdfTextAlignment::Right,
                });
                y += COMPANY_LINE;
            }
            if let Some(url) = &company.url {
                canvas.link(PdfRect::new(x, y - COMPANY_LINE, company_width, COMPANY_LINE), url);
            }
            height = height.max(y - top);
        }

        let mut y = top + height + SPACING;
        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            let style = PdfStyle::no_border().with_font_size(DESCRIPTION_SIZE);
            let font = PdfFont::regular().with_size(DESCRIPTION_SIZE);
            for line in metrics::wrap(description, width - 2.0, &font) {
                canvas.cell(&CanvasCell {
                    bounds: PdfRect::new(left, y, width, DESCRIPTION_LINE),
                    text: &line,
                    style: &style,
                    alignment: PdfTextAlignment::Left,
                });
                y += DESCRIPTION_LINE;
            }
            y += SPACING / 2.0;
        }

        canvas.line((left, y), (left + width, y), PdfColor::BLACK, 0.5);
        y + SPACING
    }
}

/// Load a logo from a file path or an http(s) URL.
pub fn load_logo(source: &str) -> Result<DynamicImage> {
    let bytes = if source.starts_with("http://") || source.starts_with("https://") {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(5)))
            .build()
            .into();
        agent
            .get(source)
            .call()
            .map_err(|e| image_error(source, e))?
            .body_mut()
            .read_to_vec()
            .map_err(|e| image_error(source, e))?
    } else {
        std::fs::read(source).map_err(|e| image_error(source, e))?
    };
    image::load_from_memory(&bytes).map_err(|e| image_error(source, e))
}

fn image_error(source: &str, reason: impl std::fmt::Display) -> ReportError {
    ReportError::Image {
        path: source.to_string(),
        reason: reason.to_string(),
    }
}

use super::canvas::{Canvas, CanvasCell, PdfRect};
use super::style::{PdfColor, PdfStyle, PdfTextAlignment};
use crate::i18n::Translator;

/// Height reserved at the bottom of every page.
pub const FOOTER_HEIGHT: f32 = 10.0;

const FOOTER_SIZE: f32 = 8.0;
const FOOTER_LINE: f32 = 5.0;

/// Page footer: printing date, content link and page counter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfFooter {
    content: String,
    url: Option<String>,
    printed: Option<String>,
}

impl PdfFooter {
    pub fn new(content: impl Into<String>, url: Option<String>, printed: Option<String>) -> Self {
        Self {
            content: content.into(),
            url,
            printed,
        }
    }

    /// Draw the footer of page `page` out of `pages` in the area starting at `top`.
    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        left: f32,
        top: f32,
        width: f32,
        page: usize,
        pages: usize,
        translator: &Translator,
    ) {
        canvas.line((left, top), (left + width, top), PdfColor::BLACK, 0.3);

        let y = top + (FOOTER_HEIGHT - FOOTER_LINE) / 2.0;
        let third = width / 3.0;
        let style = PdfStyle::no_border().with_font_size(FOOTER_SIZE);

        if let Some(printed) = &self.printed {
            let text = translator.trans_with("footer.printed", &[("date", printed.as_str())]);
            canvas.cell(&CanvasCell {
                bounds: PdfRect::new(left, y, third, FOOTER_LINE),
                text: &text,
                style: &style,
                alignment: PdfTextAlignment::Left,
            });
        }

        if !self.content.is_empty() {
            let bounds = PdfRect::new(left + third, y, third, FOOTER_LINE);
            let link_style = match self.url {
                Some(_) => style.with_text_color(PdfColor::LINK),
                None => style,
            };
            canvas.cell(&CanvasCell {
                bounds,
                text: &self.content,
                style: &link_style,
                alignment: PdfTextAlignment::Center,
            });
            if let Some(url) = &self.url {
                canvas.link(bounds, url);
            }
        }

        let (page, pages) = (page.to_string(), pages.to_string());
        let counter = translator.trans_with(
            "footer.page",
            &[("page", page.as_str()), ("pages", pages.as_str())],
        );
        canvas.cell(&CanvasCell {
            bounds: PdfRect::new(left + 2.0 * third, y, third, FOOTER_LINE),
            text: &counter,
            style: &style,
            alignment: PdfTextAlignment::Right,
        });
    }
}

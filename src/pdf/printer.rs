use std::io::BufWriter;
use std::path::Path;

use image::{DynamicImage, Rgb as PixelRgb, RgbImage, Rgba};
use log::debug;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Actions, BorderArray, BuiltinFont, Color, ColorArray, ColorBits, ColorSpace,
    HighlightingMode, Image, ImageTransform, ImageXObject, IndirectFontRef, Line, LinkAnnotation,
    Mm, PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point,
    Polygon, Px, Rect, Rgb,
};

use super::canvas::{page_size, Canvas, CanvasCell, Orientation, PageFormat, PdfRect};
use super::style::{PdfColor, PdfFont};
use crate::error::{ReportError, Result};

const BORDER_WIDTH: f32 = 0.5;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bold_italic: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self> {
        let load = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| ReportError::PdfGeneration(format!("{e:?}")))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            italic: load(BuiltinFont::HelveticaOblique)?,
            bold_italic: load(BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    fn get(&self, font: &PdfFont) -> &IndirectFontRef {
        match (font.bold, font.italic) {
            (false, false) => &self.regular,
            (true, false) => &self.bold,
            (false, true) => &self.italic,
            (true, true) => &self.bold_italic,
        }
    }
}

fn rgb(color: PdfColor) -> Color {
    let (r, g, b) = color.fractions();
    Color::Rgb(Rgb::new(r, g, b, None))
}

/// Canvas writing a PDF document with the builtin Helvetica fonts.
pub struct PrintPdfCanvas {
    width: f32,
    height: f32,
    doc: PdfDocumentReference,
    fonts: Fonts,
    /// First page created with the document, used by the first `add_page`.
    initial: Option<(PdfPageIndex, PdfLayerIndex)>,
    pages: Vec<(PdfPageIndex, PdfLayerIndex)>,
    current: usize,
}

impl PrintPdfCanvas {
    pub fn new(title: &str, format: PageFormat, orientation: Orientation) -> Result<Self> {
        let (width, height) = page_size(format, orientation);
        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Layer 1");
        let fonts = Fonts::load(&doc)?;
        Ok(Self {
            width,
            height,
            doc,
            fonts,
            initial: Some((page, layer)),
            pages: Vec::new(),
            current: 0,
        })
    }

    fn pdf_y(&self, y: f32) -> f32 {
        self.height - y
    }

    fn layer(&self) -> Option<PdfLayerReference> {
        let (page, layer) = *self.pages.get(self.current.checked_sub(1)?)?;
        Some(self.doc.get_page(page).get_layer(layer))
    }

    fn stroke(&self, layer: &PdfLayerReference, from: (f32, f32), to: (f32, f32)) {
        let line = Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(self.pdf_y(from.1))), false),
                (Point::new(Mm(to.0), Mm(self.pdf_y(to.1))), false),
            ],
            is_closed: false,
        };
        layer.add_line(line);
    }

    /// Serialize the document.
    pub fn finish(self) -> Result<Vec<u8>> {
        if self.pages.is_empty() {
            return Err(ReportError::PdfGeneration("document has no page".to_string()));
        }
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ReportError::PdfGeneration(format!("{e:?}")))?;
        buf.into_inner()
            .map_err(|e| ReportError::PdfGeneration(e.to_string()))
    }

    /// Serialize the document to `path`.
    pub fn save(self, path: &Path) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl Canvas for PrintPdfCanvas {
    fn page_width(&self) -> f32 {
        self.width
    }

    fn page_height(&self) -> f32 {
        self.height
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&self) -> usize {
        self.current
    }

    fn add_page(&mut self) {
        let indices = match self.initial.take() {
            Some(indices) => indices,
            None => {
                let layer = format!("Layer {}", self.pages.len() + 1);
                self.doc.add_page(Mm(self.width), Mm(self.height), layer)
            }
        };
        self.pages.push(indices);
        self.current = self.pages.len();
        debug!("pdf page {} added", self.current);
    }

    fn select_page(&mut self, page: usize) {
        if (1..=self.pages.len()).contains(&page) {
            self.current = page;
        }
    }

    fn cell(&mut self, cell: &CanvasCell<'_>) {
        let Some(layer) = self.layer() else {
            return;
        };
        let bounds = cell.bounds;
        let style = cell.style;

        if let Some(fill) = style.fill_color {
            let (left, right) = (bounds.x, bounds.right());
            let (top, bottom) = (self.pdf_y(bounds.y), self.pdf_y(bounds.bottom()));
            layer.set_fill_color(rgb(fill));
            layer.add_polygon(Polygon {
                rings: vec![vec![
                    (Point::new(Mm(left), Mm(top)), false),
                    (Point::new(Mm(right), Mm(top)), false),
                    (Point::new(Mm(right), Mm(bottom)), false),
                    (Point::new(Mm(left), Mm(bottom)), false),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }

        let border = style.border;
        if !border.is_none() {
            layer.set_outline_color(rgb(PdfColor::BORDER));
            layer.set_outline_thickness(BORDER_WIDTH);
            if border.top {
                self.stroke(&layer, (bounds.x, bounds.y), (bounds.right(), bounds.y));
            }
            if border.bottom {
                self.stroke(&layer, (bounds.x, bounds.bottom()), (bounds.right(), bounds.bottom()));
            }
            if border.left {
                self.stroke(&layer, (bounds.x, bounds.y), (bounds.x, bounds.bottom()));
            }
            if border.right {
                self.stroke(&layer, (bounds.right(), bounds.y), (bounds.right(), bounds.bottom()));
            }
        }

        if !cell.text.is_empty() {
            let width = self.string_width(cell.text, &style.font);
            let x = cell.text_x(width);
            let y = self.pdf_y(cell.text_baseline());
            layer.set_fill_color(rgb(style.text_color));
            layer.use_text(cell.text, style.font.size, Mm(x), Mm(y), self.fonts.get(&style.font));
        }
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32), color: PdfColor, width: f32) {
        let Some(layer) = self.layer() else {
            return;
        };
        layer.set_outline_color(rgb(color));
        layer.set_outline_thickness(width);
        self.stroke(&layer, from, to);
    }

    fn image(&mut self, bounds: PdfRect, image: &DynamicImage) {
        let Some(layer) = self.layer() else {
            return;
        };
        let rgba = image.to_rgba8();
        let (width_px, height_px) = rgba.dimensions();
        if width_px == 0 || height_px == 0 {
            return;
        }

        // PDF images carry no alpha here: composite on white
        let mut rgb_image = RgbImage::new(width_px, height_px);
        for (x, y, pixel) in rgba.enumerate_pixels() {
            let Rgba([r, g, b, a]) = *pixel;
            let alpha = a as f32 / 255.0;
            let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
            rgb_image.put_pixel(x, y, PixelRgb([blend(r), blend(g), blend(b)]));
        }

        let ratio = width_px as f32 / height_px as f32;
        let (width, height) = if bounds.width / bounds.height > ratio {
            (bounds.height * ratio, bounds.height)
        } else {
            (bounds.width, bounds.width / ratio)
        };

        let xobject = Image::from(ImageXObject {
            width: Px(width_px as usize),
            height: Px(height_px as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: rgb_image.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });
        let dpi = width_px as f32 / (width / 25.4);
        xobject.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(bounds.x)),
                translate_y: Some(Mm(self.pdf_y(bounds.y + height))),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    fn link(&mut self, bounds: PdfRect, url: &str) {
        let Some(layer) = self.layer() else {
            return;
        };
        let rect = Rect::new(
            Mm(bounds.x),
            Mm(self.pdf_y(bounds.bottom())),
            Mm(bounds.right()),
            Mm(self.pdf_y(bounds.y)),
        );
        layer.add_link_annotation(LinkAnnotation::new(
            rect,
            Some(BorderArray::default()),
            Some(ColorArray::default()),
            Actions::uri(url.to_string()),
            Some(HighlightingMode::Invert),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::style::{PdfStyle, PdfTextAlignment};

    #[test]
    fn test_filled_cells_and_links_produce_a_pdf() {
        let mut canvas =
            PrintPdfCanvas::new("Test", PageFormat::A4, Orientation::Portrait).unwrap();
        canvas.add_page();
        canvas.cell(&CanvasCell {
            bounds: PdfRect::new(10.0, 10.0, 60.0, 6.0),
            text: "Header",
            style: &PdfStyle::header(),
            alignment: PdfTextAlignment::Left,
        });
        canvas.cell(&CanvasCell {
            bounds: PdfRect::new(10.0, 16.0, 60.0, 6.0),
            text: "0.13",
            style: &PdfStyle::error(),
            alignment: PdfTextAlignment::Right,
        });
        canvas.link(PdfRect::new(10.0, 22.0, 60.0, 6.0), "https://example.com");
        assert_eq!(canvas.page_count(), 1);

        let bytes = canvas.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}

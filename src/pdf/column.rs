use super::style::PdfTextAlignment;

/// A table column: header label, width in millimetres and text alignment.
///
/// Fixed columns keep their width; the others share the space left on the
/// page proportionally to their declared width.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfColumn {
    text: String,
    width: f32,
    alignment: PdfTextAlignment,
    fixed: bool,
}

impl PdfColumn {
    pub fn new(
        text: impl Into<String>,
        width: f32,
        alignment: PdfTextAlignment,
        fixed: bool,
    ) -> Self {
        Self {
            text: text.into(),
            width,
            alignment,
            fixed,
        }
    }

    pub fn left(text: impl Into<String>, width: f32) -> Self {
        Self::new(text, width, PdfTextAlignment::Left, false)
    }

    pub fn center(text: impl Into<String>, width: f32) -> Self {
        Self::new(text, width, PdfTextAlignment::Center, false)
    }

    pub fn right(text: impl Into<String>, width: f32) -> Self {
        Self::new(text, width, PdfTextAlignment::Right, false)
    }

    /// Same column with a fixed width.
    pub fn fixed(self) -> Self {
        Self { fixed: true, ..self }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn alignment(&self) -> PdfTextAlignment {
        self.alignment
    }

    pub fn is_fixed(&self) -> bool {
        self.fixed
    }
}

/// Widths of `columns` once laid out on `available` millimetres.
pub fn layout_widths(columns: &[PdfColumn], available: f32) -> Vec<f32> {
    let fixed: f32 = columns.iter().filter(|c| c.fixed).map(|c| c.width).sum();
    let flexible: f32 = columns.iter().filter(|c| !c.fixed).map(|c| c.width).sum();
    let remaining = available - fixed;
    let factor = if flexible > 0.0 && remaining > 0.0 {
        remaining / flexible
    } else {
        1.0
    };

    columns
        .iter()
        .map(|c| if c.fixed { c.width } else { c.width * factor })
        .collect()
}

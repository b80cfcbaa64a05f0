/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PdfColor {
    pub const BLACK: PdfColor = PdfColor::new(0, 0, 0);
    pub const WHITE: PdfColor = PdfColor::new(255, 255, 255);
    pub const RED: PdfColor = PdfColor::new(255, 0, 0);
    pub const LINK: PdfColor = PdfColor::new(0, 0, 255);
    pub const BORDER: PdfColor = PdfColor::new(221, 221, 221);
    pub const HEADER_FILL: PdfColor = PdfColor::new(245, 245, 245);
    pub const GROUP_FILL: PdfColor = PdfColor::new(230, 236, 243);
    pub const TOTAL_FILL: PdfColor = PdfColor::new(235, 235, 235);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Components in `0.0..=1.0`.
    pub fn fractions(&self) -> (f32, f32, f32) {
        (
            self.red as f32 / 255.0,
            self.green as f32 / 255.0,
            self.blue as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfFont {
    pub bold: bool,
    pub italic: bool,
    /// Size in points.
    pub size: f32,
}

impl PdfFont {
    pub const DEFAULT_SIZE: f32 = 9.0;

    pub const fn regular() -> Self {
        Self {
            bold: false,
            italic: false,
            size: Self::DEFAULT_SIZE,
        }
    }

    pub const fn bold() -> Self {
        Self {
            bold: true,
            italic: false,
            size: Self::DEFAULT_SIZE,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

impl Default for PdfFont {
    fn default() -> Self {
        Self::regular()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PdfTextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Which sides of a cell get a border line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfBorder {
    pub left: bool,
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
}

impl PdfBorder {
    pub const ALL: PdfBorder = PdfBorder {
        left: true,
        top: true,
        right: true,
        bottom: true,
    };
    pub const NONE: PdfBorder = PdfBorder {
        left: false,
        top: false,
        right: false,
        bottom: false,
    };
    pub const TOP: PdfBorder = PdfBorder {
        top: true,
        ..PdfBorder::NONE
    };
    pub const BOTTOM: PdfBorder = PdfBorder {
        bottom: true,
        ..PdfBorder::NONE
    };

    pub fn is_none(&self) -> bool {
        *self == PdfBorder::NONE
    }
}

impl Default for PdfBorder {
    fn default() -> Self {
        PdfBorder::ALL
    }
}

/// Text, fill and border settings of a cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfStyle {
    pub font: PdfFont,
    pub text_color: PdfColor,
    pub fill_color: Option<PdfColor>,
    pub border: PdfBorder,
    /// Left indent in millimetres.
    pub indent: f32,
}

impl PdfStyle {
    /// Regular text with a full border.
    pub const fn cell() -> Self {
        Self {
            font: PdfFont::regular(),
            text_color: PdfColor::BLACK,
            fill_color: None,
            border: PdfBorder::ALL,
            indent: 0.0,
        }
    }

    /// Column headers.
    pub const fn header() -> Self {
        Self {
            font: PdfFont::bold(),
            fill_color: Some(PdfColor::HEADER_FILL),
            ..Self::cell()
        }
    }

    /// Group rows of a group table.
    pub const fn group() -> Self {
        Self {
            font: PdfFont::bold(),
            fill_color: Some(PdfColor::GROUP_FILL),
            ..Self::cell()
        }
    }

    /// Totals rows.
    pub const fn total() -> Self {
        Self {
            font: PdfFont::bold(),
            fill_color: Some(PdfColor::TOTAL_FILL),
            ..Self::cell()
        }
    }

    /// Values breaking a rule: zero amounts, margins below the minimum.
    pub const fn error() -> Self {
        Self {
            text_color: PdfColor::RED,
            ..Self::cell()
        }
    }

    pub const fn bold_cell() -> Self {
        Self {
            font: PdfFont::bold(),
            ..Self::cell()
        }
    }

    pub const fn no_border() -> Self {
        Self {
            border: PdfBorder::NONE,
            ..Self::cell()
        }
    }

    pub fn with_bold(mut self, bold: bool) -> Self {
        self.font.bold = bold;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> Self {
        self.font.italic = italic;
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font.size = size;
        self
    }

    pub fn with_text_color(mut self, color: PdfColor) -> Self {
        self.text_color = color;
        self
    }

    pub fn with_fill(mut self, color: Option<PdfColor>) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_border(mut self, border: PdfBorder) -> Self {
        self.border = border;
        self
    }

    pub fn with_indent(mut self, indent: f32) -> Self {
        self.indent = indent;
        self
    }

    pub fn is_error(&self) -> bool {
        self.text_color == PdfColor::RED
    }
}

impl Default for PdfStyle {
    fn default() -> Self {
        Self::cell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert!(PdfStyle::header().font.bold);
        assert_eq!(PdfStyle::group().fill_color, Some(PdfColor::GROUP_FILL));
        assert!(PdfStyle::error().is_error());
        assert!(!PdfStyle::cell().is_error());
        assert!(PdfStyle::no_border().border.is_none());
    }

    #[test]
    fn test_builders_keep_other_fields() {
        let style = PdfStyle::total().with_text_color(PdfColor::RED).with_indent(4.0);
        assert!(style.font.bold);
        assert!(style.is_error());
        assert_eq!(style.indent, 4.0);
        assert_eq!(style.fill_color, Some(PdfColor::TOTAL_FILL));
        assert_ne!(PdfStyle::total(), PdfStyle::header());
    }
}

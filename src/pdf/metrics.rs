//! Helvetica glyph widths used to measure, truncate and wrap text.

use super::style::PdfFont;

/// Millimetres per typographic point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const ELLIPSIS: &str = "...";

// Advance widths (1/1000 em) of ASCII 32..=126.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // A..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, 556, 556, 333,
    500, 278, 556, 500, 722, 500, 500, 500, // a..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, 667, 778, 722,
    667, 611, 722, 667, 944, 667, 667, 611, // A..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, 611, 611, 389,
    556, 333, 611, 556, 778, 556, 556, 500, // a..z
    389, 280, 389, 584, // {..~
];

fn glyph_width(ch: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match ch as u32 {
        code @ 32..=126 => table[(code - 32) as usize],
        _ => 556,
    }
}

/// Width of `text` in millimetres.
pub fn string_width(text: &str, font: &PdfFont) -> f32 {
    let units: u32 = text.chars().map(|c| glyph_width(c, font.bold) as u32).sum();
    units as f32 / 1000.0 * font.size * MM_PER_PT
}

/// Height of a text line in millimetres.
pub fn line_height(font: &PdfFont) -> f32 {
    font.size * MM_PER_PT * 1.25
}

/// `text` cut to fit `max_width`, ending with an ellipsis when cut.
pub fn truncate(text: &str, max_width: f32, font: &PdfFont) -> String {
    if string_width(text, font) <= max_width {
        return text.to_string();
    }
    let ellipsis = string_width(ELLIPSIS, font);
    let mut width = 0.0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = glyph_width(ch, font.bold) as f32 / 1000.0 * font.size * MM_PER_PT;
        if width + w + ellipsis > max_width {
            break;
        }
        width += w;
        out.push(ch);
    }
    if out.is_empty() && ellipsis > max_width {
        return String::new();
    }
    out.push_str(ELLIPSIS);
    out
}

/// Split `text` into lines no wider than `max_width`, breaking on spaces
/// and honouring explicit line breaks.
pub fn wrap(text: &str, max_width: f32, font: &PdfFont) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if string_width(&candidate, font) <= max_width || line.is_empty() {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line = word.to_string();
            }
        }
        lines.push(line);
    }
    lines
        .into_iter()
        .map(|l| truncate(&l, max_width, font))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_width_scales_with_size() {
        let small = PdfFont::regular().with_size(10.0);
        let large = PdfFont::regular().with_size(20.0);
        let w = string_width("Total", &small);
        assert!(w > 0.0);
        assert!((string_width("Total", &large) - 2.0 * w).abs() < 1e-4);
        let bold = string_width("Total", &PdfFont::bold());
        assert!(bold > string_width("Total", &PdfFont::regular()));
    }

    #[test]
    fn test_truncate_adds_ellipsis() {
        let font = PdfFont::regular();
        let text = "A rather long description that will not fit";
        let cut = truncate(text, 20.0, &font);
        assert!(cut.ends_with("..."));
        assert!(string_width(&cut, &font) <= 20.0 + 1e-3);
        assert_eq!(truncate("Short", 20.0, &font), "Short");
    }

    #[test]
    fn test_wrap_breaks_on_words() {
        let font = PdfFont::regular();
        let lines = wrap("one two three four five six seven\nsecond paragraph", 40.0, &font);
        assert!(lines.len() >= 3);
        assert_eq!(lines.last().map(String::as_str), Some("second paragraph"));
        for line in &lines {
            assert!(string_width(line, &font) <= 40.0);
        }
    }
}

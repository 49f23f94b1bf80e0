//! Text measurement.
//!
//! The sheet is set in the PDF standard Helvetica faces, which need no
//! embedding; their advance widths come from the Adobe core font metrics.

use mathsheet_types::geometry::MM_TO_PT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// Base font name as written into the PDF font dictionary.
    pub fn postscript_name(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

/// Measures rendered text width.
pub trait FontMetrics: Send + Sync {
    /// Advance width of `text` in millimetres.
    fn text_width(&self, text: &str, face: FontFace, size_pt: f32) -> f32;
}

/// Widths of the printable ASCII range 32..=126, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // p..~
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Width used for characters outside the table.
const DEFAULT_WIDTH: u16 = 556;

/// Metrics of the standard Helvetica and Helvetica-Bold faces.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFontMetrics;

impl StandardFontMetrics {
    fn char_width(c: char, face: FontFace) -> u16 {
        let table = match face {
            FontFace::Regular => &HELVETICA_WIDTHS,
            FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
        };
        let code = c as u32;
        if (32..=126).contains(&code) {
            table[(code - 32) as usize]
        } else {
            DEFAULT_WIDTH
        }
    }
}

impl FontMetrics for StandardFontMetrics {
    fn text_width(&self, text: &str, face: FontFace, size_pt: f32) -> f32 {
        let units: u32 = text.chars().map(|c| Self::char_width(c, face) as u32).sum();
        units as f32 / 1000.0 * size_pt / MM_TO_PT
    }
}

/// Every character advances by the same width, whatever the face or size.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    pub char_width: f32,
}

impl FontMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str, _face: FontFace, _size_pt: f32) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

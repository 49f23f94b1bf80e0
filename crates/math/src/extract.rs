//! Math span extraction.
//!
//! Delimiters are matched in a fixed priority order: `$$..$$`, `$..$`,
//! `\[..\]`, `\(..\)`. Every pass runs on the text left over by the previous
//! passes; claimed regions are masked so that later patterns can neither match
//! inside them nor straddle them. The spans are then numbered in source order.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Byte used to blank out regions that an earlier pattern already claimed.
/// None of the patterns accept it inside their content.
const MASK: char = '\0';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathKind {
    Inline,
    Display,
}

impl MathKind {
    pub fn is_display(self) -> bool {
        matches!(self, MathKind::Display)
    }

    fn tag(self) -> &'static str {
        match self {
            MathKind::Inline => "INLINE",
            MathKind::Display => "DISPLAY",
        }
    }
}

static PATTERNS: Lazy<Vec<(Regex, MathKind)>> = Lazy::new(|| {
    [
        (r"\$\$([^$\x00]+)\$\$", MathKind::Display),
        (r"\$([^$\x00]+)\$", MathKind::Inline),
        (r"(?s)\\\[([^\x00]+?)\\\]", MathKind::Display),
        (r"(?s)\\\(([^\x00]+?)\\\)", MathKind::Inline),
    ]
    .into_iter()
    .map(|(pattern, kind)| {
        (
            Regex::new(pattern).expect("math delimiter pattern is valid"),
            kind,
        )
    })
    .collect()
});

/// A recognized piece of math notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathSpan {
    /// The LaTeX between the delimiters.
    pub latex: String,
    pub kind: MathKind,
    /// Byte range of the whole delimited match in the original text.
    pub source: Range<usize>,
    /// The delimited match as it appeared in the original text.
    pub original: String,
    /// Unique token standing in for this span in [`ExtractedText::text`].
    pub placeholder: String,
}

/// Exercise text with its math spans replaced by placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedText {
    pub text: String,
    pub spans: Vec<MathSpan>,
}

impl ExtractedText {
    pub fn has_math(&self) -> bool {
        !self.spans.is_empty()
    }

    /// Puts the original delimited sources back in place of the placeholders.
    pub fn restore(&self) -> String {
        self.replace_placeholders(|span, _| span.original.clone())
    }

    /// Produces the text to lay out. Placeholders of spans for which
    /// `has_image` holds are removed; all others become
    /// `[Math Expression n]`, numbered from 1 in extraction order.
    pub fn resolve(&self, has_image: impl Fn(usize) -> bool) -> String {
        self.replace_placeholders(|_, index| {
            if has_image(index) {
                String::new()
            } else {
                format!("[Math Expression {}]", index + 1)
            }
        })
    }

    fn replace_placeholders(&self, mut replacement: impl FnMut(&MathSpan, usize) -> String) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();
        for (index, span) in self.spans.iter().enumerate() {
            match rest.find(&span.placeholder) {
                Some(pos) => {
                    out.push_str(&rest[..pos]);
                    out.push_str(&replacement(span, index));
                    rest = &rest[pos + span.placeholder.len()..];
                }
                None => log::warn!("Placeholder {} missing from text", span.placeholder),
            }
        }
        out.push_str(rest);
        out
    }
}

/// Finds every math span in `text` and substitutes placeholders for them.
///
/// Unterminated delimiters are not math and pass through unchanged.
pub fn extract_math(text: &str) -> ExtractedText {
    let mut masked = text.to_string();
    let mut found: Vec<(Range<usize>, String, MathKind)> = Vec::new();

    for (pattern, kind) in PATTERNS.iter() {
        let matches: Vec<(Range<usize>, String)> = pattern
            .captures_iter(&masked)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let content = caps.get(1)?;
                Some((whole.range(), content.as_str().to_string()))
            })
            .collect();

        for (range, latex) in matches {
            let blank: String = std::iter::repeat_n(MASK, range.len()).collect();
            masked.replace_range(range.clone(), &blank);
            found.push((range, latex, *kind));
        }
    }

    found.sort_by_key(|(range, _, _)| range.start);

    let mut out = String::with_capacity(text.len());
    let mut spans = Vec::with_capacity(found.len());
    let mut cursor = 0;
    for (index, (range, latex, kind)) in found.into_iter().enumerate() {
        let placeholder = format!("__MATH_{}_{}__", kind.tag(), index);
        out.push_str(&text[cursor..range.start]);
        out.push_str(&placeholder);
        cursor = range.end;
        spans.push(MathSpan {
            latex,
            kind,
            original: text[range.clone()].to_string(),
            source: range,
            placeholder,
        });
    }
    out.push_str(&text[cursor..]);

    log::debug!("Extracted {} math span(s)", spans.len());
    ExtractedText { text: out, spans }
}

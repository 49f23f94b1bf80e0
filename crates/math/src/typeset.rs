//! A small built-in typesetter producing SVG markup.
//!
//! It does not lay out real TeX boxes. The expression is converted with
//! [`latex_to_unicode`] and `^`/`_` groups become raised or lowered `tspan`s.

use crate::error::MathError;
use crate::render::{Typesetter, VectorMarkup};
use crate::substitute::latex_to_unicode;

#[derive(Debug, Clone)]
pub struct SvgTypesetter {
    pub font_family: String,
    pub inline_font_size: f32,
    pub display_font_size: f32,
}

impl Default for SvgTypesetter {
    fn default() -> Self {
        Self {
            font_family: "serif".to_string(),
            inline_font_size: 14.0,
            display_font_size: 18.0,
        }
    }
}

#[derive(Debug, PartialEq)]
enum Run {
    Normal(String),
    Super(String),
    Sub(String),
}

/// Splits text into normal runs and `^x`, `^{..}`, `_x`, `_{..}` script runs.
fn split_scripts(text: &str) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut normal = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '^' && c != '_' {
            normal.push(c);
            continue;
        }
        let script: String = match chars.peek() {
            Some('{') => {
                chars.next();
                let mut depth = 1;
                let mut group = String::new();
                for inner in chars.by_ref() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        _ => {}
                    }
                    group.push(inner);
                }
                group
            }
            Some(_) => chars.next().map(String::from).unwrap_or_default(),
            None => {
                normal.push(c);
                continue;
            }
        };
        if !normal.is_empty() {
            runs.push(Run::Normal(std::mem::take(&mut normal)));
        }
        runs.push(if c == '^' { Run::Super(script) } else { Run::Sub(script) });
    }
    if !normal.is_empty() {
        runs.push(Run::Normal(normal));
    }
    runs
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

impl Typesetter for SvgTypesetter {
    fn typeset(&self, latex: &str, display: bool) -> Result<VectorMarkup, MathError> {
        let text = latex_to_unicode(latex);
        if text.trim().is_empty() {
            return Err(MathError::Typeset("empty expression".to_string()));
        }

        let font_size = if display {
            self.display_font_size
        } else {
            self.inline_font_size
        };
        let char_count = text.chars().count() as f32;
        let width = (char_count * font_size * 0.6).max(20.0);
        let height = font_size * 1.2;

        let mut body = String::new();
        for run in split_scripts(&text) {
            match run {
                Run::Normal(s) => body.push_str(&format!("<tspan>{}</tspan>", escape_xml(&s))),
                Run::Super(s) => body.push_str(&format!(
                    "<tspan baseline-shift=\"super\" font-size=\"70%\">{}</tspan>",
                    escape_xml(&s)
                )),
                Run::Sub(s) => body.push_str(&format!(
                    "<tspan baseline-shift=\"sub\" font-size=\"70%\">{}</tspan>",
                    escape_xml(&s)
                )),
            }
        }

        let svg = format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
                "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" font-family=\"{family}\" font-size=\"{size}\" fill=\"black\">{body}</text>",
                "</svg>"
            ),
            w = width,
            h = height,
            x = width / 2.0,
            y = height * 0.8,
            family = escape_xml(&self.font_family),
            size = font_size,
            body = body,
        );

        Ok(VectorMarkup { svg, width, height })
    }
}

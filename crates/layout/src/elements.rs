use crate::fonts::FontFace;
use mathsheet_types::Color;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub content: String,
    pub face: FontFace,
    pub size_pt: f32,
    pub color: Color,
}

/// An embedded image, encoded as PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageElement {
    pub data: Arc<Vec<u8>>,
    /// Source LaTeX, kept for diagnostics.
    pub alt: String,
}

/// A horizontal line from `x` to `x + width`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleElement {
    pub thickness: f32,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextElement),
    Image(ImageElement),
    Rule(RuleElement),
}

/// An element placed on a page, in millimetres from the top-left corner.
///
/// For text `y` is the baseline; for images it is the top edge; for rules it
/// is the line's position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn text(&self) -> Option<&str> {
        match &self.element {
            LayoutElement::Text(t) => Some(&t.content),
            _ => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self.element, LayoutElement::Image(_))
    }
}

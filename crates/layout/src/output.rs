//! Output of the layout engine.

use crate::PositionedElement;
use mathsheet_types::Size;

/// Every page of an exercise sheet with its positioned elements, ready for a
/// renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub title: String,
    pub page_size: Size,
    pub pages: Vec<Vec<PositionedElement>>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text on a page, in placement order.
    pub fn page_text(&self, page_index: usize) -> Vec<&str> {
        self.pages
            .get(page_index)
            .map(|page| page.iter().filter_map(PositionedElement::text).collect())
            .unwrap_or_default()
    }

    pub fn image_count(&self) -> usize {
        self.pages.iter().flatten().filter(|el| el.is_image()).count()
    }
}

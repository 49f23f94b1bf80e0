use crate::error::RenderError;
use crate::types::DocumentInfo;
use mathsheet_layout::{LaidOutDocument, PositionedElement};
use mathsheet_types::Size;
use std::io::Write;

/// A document backend, driven page by page.
pub trait DocumentRenderer<W: Write> {
    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError>;

    fn render_page(&mut self, elements: &[PositionedElement], page_size: Size) -> Result<(), RenderError>;

    fn finish(self: Box<Self>, writer: W) -> Result<W, RenderError>;
}

/// Renders every page of `document` and writes the result into `writer`.
pub fn render_document<W: Write>(
    mut renderer: Box<dyn DocumentRenderer<W>>,
    document: &LaidOutDocument,
    info: &DocumentInfo,
    writer: W,
) -> Result<W, RenderError> {
    renderer.begin_document(info)?;
    for page in &document.pages {
        renderer.render_page(page, document.page_size)?;
    }
    renderer.finish(writer)
}

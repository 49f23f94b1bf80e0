pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use mathsheet::{ExportedDocument, ExporterBuilder};
use std::sync::Arc;

pub use fixtures::*;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_export(export: ExportedDocument) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&export.bytes)?;
        Ok(Self {
            file_name: export.file_name,
            bytes: export.bytes,
            doc,
        })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Text of one page, numbered from 1.
    pub fn page_text(&self, page_num: u32) -> String {
        self.doc.extract_text(&[page_num]).unwrap_or_default()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// A builder wired to the stub capabilities, without system fonts.
pub fn stub_builder() -> ExporterBuilder {
    ExporterBuilder::new()
        .with_system_fonts(false)
        .with_typesetter(Arc::new(StubTypesetter::default()))
        .with_rasterizer(Arc::new(BoxRasterizer::default()))
}

/// Export `set` with `builder` on a throwaway runtime.
pub fn export_with(builder: ExporterBuilder, set: &mathsheet::ExerciseSet) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let exporter = builder.build()?;
    let export = exporter.export_blocking(set)?;
    GeneratedPdf::from_export(export)
}

pub fn export_stubbed(set: &mathsheet::ExerciseSet) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    export_with(stub_builder(), set)
}

use lopdf::{Document as LopdfDocument, Object};

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Number of image XObjects referenced by one page's resources.
pub fn page_image_count(doc: &LopdfDocument, page_num: u32) -> usize {
    let pages = doc.get_pages();
    let Some(page_id) = pages.get(&page_num) else {
        return 0;
    };
    doc.get_object(*page_id)
        .and_then(Object::as_dict)
        .and_then(|page| page.get(b"Resources"))
        .and_then(Object::as_dict)
        .and_then(|resources| resources.get(b"XObject"))
        .and_then(Object::as_dict)
        .map(|xobjects| xobjects.len())
        .unwrap_or(0)
}

pub fn image_count(doc: &LopdfDocument) -> usize {
    (1..=doc.get_pages().len() as u32)
        .map(|page_num| page_image_count(doc, page_num))
        .sum()
}

/// A string entry of the document information dictionary.
pub fn info_entry(doc: &LopdfDocument, key: &str) -> Option<String> {
    let info_id = doc.trailer.get(b"Info").and_then(Object::as_reference).ok()?;
    let info = doc.get_object(info_id).and_then(Object::as_dict).ok()?;
    let value = info.get(key.as_bytes()).and_then(Object::as_str).ok()?;
    Some(String::from_utf8_lossy(value).to_string())
}

pub fn get_page_dimensions(doc: &LopdfDocument, page_num: u32) -> Option<(f32, f32)> {
    let pages = doc.get_pages();
    let page_id = pages.get(&page_num)?;
    let page_dict = doc.get_object(*page_id).and_then(Object::as_dict).ok()?;
    let arr = page_dict.get(b"MediaBox").and_then(Object::as_array).ok()?;
    if arr.len() < 4 {
        return None;
    }
    let width = arr[2].as_f32().ok()? - arr[0].as_f32().ok()?;
    let height = arr[3].as_f32().ok()? - arr[1].as_f32().ok()?;
    Some((width, height))
}

/// Assert that PDF contains specific text
#[macro_export]
macro_rules! assert_pdf_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            extracted.contains($text),
            "PDF should contain '{}', but extracted text was:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert that PDF does NOT contain specific text
#[macro_export]
macro_rules! assert_pdf_not_contains_text {
    ($pdf:expr, $text:expr) => {
        let extracted = $crate::common::pdf_assertions::extract_text(&$pdf.doc);
        assert!(
            !extracted.contains($text),
            "PDF should NOT contain '{}', but it was found in:\n{}",
            $text,
            extracted
        );
    };
}

/// Assert the number of pages in a PDF
#[macro_export]
macro_rules! assert_pdf_page_count {
    ($pdf:expr, $count:expr) => {
        assert_eq!(
            $pdf.page_count(),
            $count,
            "Expected {} pages, got {}",
            $count,
            $pdf.page_count()
        );
    };
}

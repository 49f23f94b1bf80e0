use crate::encoding::{text_string, to_win_ansi};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use mathsheet_layout::{
    FontFace, ImageElement, LaidOutDocument, LayoutElement, PositionedElement, RuleElement, TextElement,
};
use mathsheet_render_core::utils::flip_y;
use mathsheet_render_core::{DocumentInfo, DocumentRenderer, RenderError, render_document};
use mathsheet_types::{Color, Size, mm_to_pt};
use std::io::Write;

/// An in-memory PDF renderer using the `lopdf` library.
/// It builds the document's object graph and writes it out on `finish`.
pub struct LopdfRenderer {
    document: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    fonts: Option<Dictionary>,
    image_count: usize,
    compress: bool,
}

impl Default for LopdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl LopdfRenderer {
    pub fn new() -> Self {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();
        Self {
            document,
            pages_id,
            page_ids: Vec::new(),
            fonts: None,
            image_count: 0,
            compress: true,
        }
    }

    /// Disables Flate compression of content and image streams.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Renders a whole document into a byte buffer.
    pub fn render(self, document: &LaidOutDocument, info: &DocumentInfo) -> Result<Vec<u8>, RenderError> {
        render_document(Box::new(self), document, info, Vec::new())
    }

    fn font_resource_name(face: FontFace) -> &'static str {
        match face {
            FontFace::Regular => "F1",
            FontFace::Bold => "F2",
        }
    }

    fn add_stream(&mut self, mut dict: Dictionary, data: &[u8]) -> Result<ObjectId, RenderError> {
        let content = if self.compress {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data)?;
            dict.set("Filter", "FlateDecode");
            encoder.finish()?
        } else {
            data.to_vec()
        };
        Ok(self.document.add_object(Stream::new(dict, content)))
    }

    fn add_image(&mut self, image: &ImageElement) -> Result<ObjectId, RenderError> {
        let decoded = image::load_from_memory_with_format(&image.data, image::ImageFormat::Png)
            .map_err(|e| RenderError::Image(format!("'{}': {}", image.alt, e)))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        };
        self.add_stream(dict, rgb.as_raw())
    }
}

impl<W: Write> DocumentRenderer<W> for LopdfRenderer {
    fn begin_document(&mut self, info: &DocumentInfo) -> Result<(), RenderError> {
        if self.fonts.is_some() {
            return Err(RenderError::Other("Document already started".into()));
        }

        let mut fonts = Dictionary::new();
        for face in [FontFace::Regular, FontFace::Bold] {
            let font_id = self.document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(Self::font_resource_name(face), font_id);
        }
        self.fonts = Some(fonts);

        let info_id = self.document.add_object(dictionary! {
            "Title" => text_string(&info.title),
            "Subject" => text_string(&info.subject),
            "Author" => text_string(&info.author),
            "Creator" => text_string(&info.creator),
        });
        self.document.trailer.set("Info", info_id);

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);
        Ok(())
    }

    fn render_page(&mut self, elements: &[PositionedElement], page_size: Size) -> Result<(), RenderError> {
        let fonts = self
            .fonts
            .clone()
            .ok_or_else(|| RenderError::Other("Document not started".into()))?;

        let mut page_ctx = PageContext::new(self, page_size.height);
        for element in elements {
            page_ctx.draw_element(element)?;
        }
        let (content, xobjects) = page_ctx.finish();

        let content_id = self.add_stream(Dictionary::new(), &content.encode()?)?;
        let mut resources = dictionary! { "Font" => fonts };
        if !xobjects.is_empty() {
            resources.set("XObject", xobjects);
        }

        let page_id = self.document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                mm_to_pt(page_size.width).into(),
                mm_to_pt(page_size.height).into(),
            ],
            "Contents" => content_id,
            "Resources" => resources,
        });
        self.page_ids.push(page_id);
        log::debug!("Rendered page {} with {} elements", self.page_ids.len(), elements.len());
        Ok(())
    }

    fn finish(mut self: Box<Self>, mut writer: W) -> Result<W, RenderError> {
        if self.fonts.is_none() {
            return Err(RenderError::Other("Document not started".into()));
        }
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::from(*id)).collect();
        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => self.page_ids.len() as i64,
        };
        self.document.objects.insert(self.pages_id, Object::Dictionary(pages_dict));
        self.document.save_to(&mut writer)?;
        Ok(writer)
    }
}

struct PageContext<'a> {
    renderer: &'a mut LopdfRenderer,
    page_height: f32,
    content: Content,
    xobjects: Dictionary,
    state: PageRenderState,
}

#[derive(Default)]
struct PageRenderState {
    font: Option<(FontFace, f32)>,
    fill_color: Option<Color>,
}

impl<'a> PageContext<'a> {
    fn new(renderer: &'a mut LopdfRenderer, page_height: f32) -> Self {
        Self {
            renderer,
            page_height,
            content: Content { operations: vec![] },
            xobjects: Dictionary::new(),
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> (Content, Dictionary) {
        (self.content, self.xobjects)
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw_element(&mut self, el: &PositionedElement) -> Result<(), RenderError> {
        match &el.element {
            LayoutElement::Text(text) => self.draw_text(text, el),
            LayoutElement::Image(image) => self.draw_image(image, el)?,
            LayoutElement::Rule(rule) => self.draw_rule(rule, el),
        }
        Ok(())
    }

    fn set_font(&mut self, face: FontFace, size: f32) {
        if self.state.font != Some((face, size)) {
            let name = LopdfRenderer::font_resource_name(face);
            self.push("Tf", vec![Object::Name(name.as_bytes().to_vec()), size.into()]);
            self.state.font = Some((face, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.unit_components();
            self.push("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn draw_text(&mut self, text: &TextElement, el: &PositionedElement) {
        if text.content.trim().is_empty() {
            return;
        }
        self.push("BT", vec![]);
        self.set_font(text.face, text.size_pt);
        self.set_fill_color(text.color);
        let pdf_y = flip_y(el.y, self.page_height);
        self.push("Td", vec![mm_to_pt(el.x).into(), pdf_y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(&text.content), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageElement, el: &PositionedElement) -> Result<(), RenderError> {
        let image_id = self.renderer.add_image(image)?;
        self.renderer.image_count += 1;
        let name = format!("Im{}", self.renderer.image_count);
        self.xobjects.set(name.as_str(), image_id);

        let bottom = flip_y(el.y + el.height, self.page_height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                mm_to_pt(el.width).into(),
                0.into(),
                0.into(),
                mm_to_pt(el.height).into(),
                mm_to_pt(el.x).into(),
                bottom.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.into_bytes())]);
        self.push("Q", vec![]);
        Ok(())
    }

    fn draw_rule(&mut self, rule: &RuleElement, el: &PositionedElement) {
        let [r, g, b] = rule.color.unit_components();
        let y = flip_y(el.y, self.page_height);
        self.push("w", vec![mm_to_pt(rule.thickness).into()]);
        self.push("RG", vec![r.into(), g.into(), b.into()]);
        self.push("m", vec![mm_to_pt(el.x).into(), y.into()]);
        self.push("l", vec![mm_to_pt(el.x + el.width).into(), y.into()]);
        self.push("S", vec![]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::Arc;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([0, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    fn text(x: f32, y: f32, content: &str, face: FontFace) -> PositionedElement {
        PositionedElement {
            x,
            y,
            width: 0.0,
            height: 0.0,
            element: LayoutElement::Text(TextElement {
                content: content.to_string(),
                face,
                size_pt: 12.0,
                color: Color::BLACK,
            }),
        }
    }

    fn image_at(x: f32, y: f32, data: Vec<u8>) -> PositionedElement {
        PositionedElement {
            x,
            y,
            width: 10.0,
            height: 5.0,
            element: LayoutElement::Image(ImageElement {
                data: Arc::new(data),
                alt: "x^2".to_string(),
            }),
        }
    }

    fn sample_document() -> LaidOutDocument {
        let page_one = vec![
            text(20.0, 40.0, "Algebra", FontFace::Bold),
            PositionedElement {
                x: 20.0,
                y: 45.0,
                width: 170.0,
                height: 0.0,
                element: LayoutElement::Rule(RuleElement {
                    thickness: 0.5,
                    color: Color::gray(200),
                }),
            },
            text(20.0, 65.0, "1.", FontFace::Bold),
            text(35.0, 65.0, "Solve for x", FontFace::Regular),
            image_at(60.0, 61.0, png(8, 4)),
        ];
        let page_two = vec![text(20.0, 30.0, "2.", FontFace::Bold)];
        LaidOutDocument {
            title: "Algebra".to_string(),
            page_size: Size::new(210.0, 297.0),
            pages: vec![page_one, page_two],
        }
    }

    fn info() -> DocumentInfo {
        DocumentInfo::exercise_set("Algebra", "Exercise Generator")
    }

    #[test]
    fn renders_pages_text_and_images() {
        init();
        let bytes = LopdfRenderer::new().render(&sample_document(), &info()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));

        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        assert_eq!(pages.len(), 2);

        let text = doc.extract_text(&[1]).unwrap();
        assert!(text.contains("Algebra"));
        assert!(text.contains("Solve for x"));

        let page_id = pages[&1];
        let resources = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .and_then(|page| page.get(b"Resources"))
            .and_then(Object::as_dict)
            .unwrap();
        let xobjects = resources.get(b"XObject").and_then(Object::as_dict).unwrap();
        assert_eq!(xobjects.len(), 1);
        assert!(xobjects.has(b"Im1"));

        let media_box = doc
            .get_object(page_id)
            .and_then(Object::as_dict)
            .and_then(|page| page.get(b"MediaBox"))
            .and_then(Object::as_array)
            .unwrap();
        let height = media_box[3].as_f32().unwrap();
        assert!((height - 841.89).abs() < 0.01);
    }

    #[test]
    fn info_dictionary_is_written() {
        let bytes = LopdfRenderer::new().render(&sample_document(), &info()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").and_then(Object::as_reference).unwrap();
        let info = doc.get_object(info_id).and_then(Object::as_dict).unwrap();
        assert_eq!(info.get(b"Title").and_then(Object::as_str).unwrap(), b"Algebra");
        assert_eq!(info.get(b"Subject").and_then(Object::as_str).unwrap(), b"Exercise Set");
        assert_eq!(
            info.get(b"Creator").and_then(Object::as_str).unwrap(),
            b"Exercise Generator"
        );
    }

    #[test]
    fn output_is_deterministic() {
        let a = LopdfRenderer::new().render(&sample_document(), &info()).unwrap();
        let b = LopdfRenderer::new().render(&sample_document(), &info()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn uncompressed_content_is_readable() {
        let bytes = LopdfRenderer::new()
            .with_compression(false)
            .render(&sample_document(), &info())
            .unwrap();
        let raw = String::from_utf8_lossy(&bytes);
        assert!(raw.contains("/F2"));
        assert!(raw.contains("(Solve for x)"));
        assert!(raw.contains("/Im1"));
        assert!(raw.contains("Tj"));
    }

    #[test]
    fn corrupt_image_fails() {
        let mut doc = sample_document();
        doc.pages[1].push(image_at(20.0, 40.0, vec![1, 2, 3]));
        let result = LopdfRenderer::new().render(&doc, &info());
        assert!(matches!(result, Err(RenderError::Image(_))));
    }

    #[test]
    fn page_before_begin_is_rejected() {
        let mut renderer = LopdfRenderer::new();
        let result = DocumentRenderer::<Vec<u8>>::render_page(&mut renderer, &[], Size::new(210.0, 297.0));
        assert!(matches!(result, Err(RenderError::Other(_))));
    }
}

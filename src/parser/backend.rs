//! PDF backend abstraction layer.
//!
//! Provides a trait-based interface over the concrete PDF library (lopdf),
//! isolating outline inference and the content pass-throughs from PDF
//! internals. The backend is responsible for turning content streams into
//! positioned text spans grouped into lines; everything downstream works on
//! that input model alone.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::{Annotation, ImageRef, Link, Metadata};

/// Axis-aligned bounding box in page coordinates (x0, y0, x1, y1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    /// Create a new bounding box.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Box width.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Box height.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box covering both operands.
    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// One run of text sharing a single font and size, as placed on the page.
#[derive(Debug, Clone)]
pub struct RawSpan {
    /// Decoded text content
    pub text: String,
    /// Base font name (e.g., "Helvetica-Bold"); empty if unknown
    pub font_name: String,
    /// Font size in points; 0.0 if unknown
    pub font_size: f32,
    /// Span bounding box
    pub bbox: BBox,
}

/// A line of spans sharing a baseline, left to right.
#[derive(Debug, Clone, Default)]
pub struct RawLine {
    /// Spans in this line, sorted by X position
    pub spans: Vec<RawSpan>,
}

impl RawLine {
    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Largest span font size in the line.
    pub fn max_font_size(&self) -> f32 {
        self.spans.iter().map(|s| s.font_size).fold(0.0, f32::max)
    }

    /// Bounding box covering every span in the line.
    pub fn bbox(&self) -> BBox {
        self.spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_default()
    }
}

/// All decoded content of one page.
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Page number (1-indexed)
    pub number: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Text lines in top-to-bottom reading order
    pub lines: Vec<RawLine>,
}

impl RawPage {
    /// Plain text of the page, lines joined with newlines.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Abstract interface for PDF document access.
///
/// Implementations supply page count and per-page line/span data plus the
/// metadata title fallback — everything the outline core consumes — without
/// exposing any concrete PDF library types.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Decode one page (1-indexed) into positioned lines.
    fn page(&self, number: u32) -> Result<RawPage>;

    /// Document metadata.
    fn metadata(&self) -> Metadata;
}

// ---------------------------------------------------------------------------
// LopdfBackend — concrete implementation backed by lopdf
// ---------------------------------------------------------------------------

/// Concrete [`PageSource`] backed by `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let doc = LopdfDocument::load(path).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data).map_err(|e| match e {
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::from(e),
        })?;
        Ok(Self { doc })
    }

    /// Load from a reader.
    pub fn load_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::load_bytes(&data)
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.doc.is_encrypted()
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    fn page_id(&self, number: u32) -> Result<ObjectId> {
        let pages = self.doc.get_pages();
        pages
            .get(&number)
            .copied()
            .ok_or(Error::PageOutOfRange(number, pages.len() as u32))
    }

    /// Page dimensions from MediaBox, defaulting to Letter.
    fn page_dimensions(&self, page_id: ObjectId) -> (f32, f32) {
        if let Ok(page_dict) = self.doc.get_dictionary(page_id) {
            if let Ok(media_box) = page_dict.get(b"MediaBox") {
                if let Ok(array) = media_box.as_array() {
                    if array.len() >= 4 {
                        let width = array[2].as_float().unwrap_or(612.0);
                        let height = array[3].as_float().unwrap_or(792.0);
                        return (width, height);
                    }
                }
            }
        }
        (612.0, 792.0)
    }

    /// Get the raw (decompressed) content stream bytes for a page.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let contents = page_dict
            .get(b"Contents")
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        match contents {
            Object::Reference(r) => {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    return s
                        .decompressed_content()
                        .map_err(|e| Error::PdfParse(e.to_string()));
                }
                Err(Error::PdfParse("Invalid content stream".to_string()))
            }
            Object::Array(arr) => {
                let mut content = Vec::new();
                for obj in arr {
                    if let Object::Reference(r) = obj {
                        if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                            if let Ok(data) = s.decompressed_content() {
                                content.extend_from_slice(&data);
                                content.push(b' ');
                            }
                        }
                    }
                }
                Ok(content)
            }
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    /// Interpret a page's content stream into positioned spans.
    fn page_spans(&self, page_id: ObjectId) -> Result<Vec<RawSpan>> {
        let lopdf_fonts = self.doc.get_page_fonts(page_id).unwrap_or_default();

        // Map font resource names to base font names
        let mut base_fonts: BTreeMap<Vec<u8>, String> = BTreeMap::new();
        for (name, font) in &lopdf_fonts {
            let base_font = font
                .get(b"BaseFont")
                .ok()
                .and_then(|o| o.as_name().ok())
                .map(|n| String::from_utf8_lossy(n).to_string())
                .unwrap_or_default();
            base_fonts.insert(name.clone(), base_font);
        }

        let content = self.page_content(page_id)?;
        let content =
            lopdf::content::Content::decode(&content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut current_font = String::new();
        let mut current_font_name: Vec<u8> = Vec::new();
        let mut current_font_size: f32 = 0.0;
        let mut matrix = TextMatrix::default();
        let mut in_text_block = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text_block = true;
                    matrix = TextMatrix::default();
                }
                "ET" => {
                    in_text_block = false;
                }
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(font_name) = &op.operands[0] {
                            current_font_name = font_name.clone();
                            current_font = base_fonts
                                .get(font_name.as_slice())
                                .cloned()
                                .unwrap_or_else(|| {
                                    String::from_utf8_lossy(font_name.as_slice()).to_string()
                                });
                        }
                        current_font_size = get_number(&op.operands[1]).unwrap_or(0.0);
                    }
                }
                "Td" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.translate(tx, ty);
                    }
                }
                "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        matrix.leading = -ty;
                        matrix.translate(tx, ty);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => {
                    matrix.next_line();
                }
                "Tj" | "TJ" => {
                    if in_text_block {
                        let encoding = lopdf_fonts
                            .get(&current_font_name)
                            .and_then(|f| f.get_font_encoding(&self.doc).ok());

                        let text = if op.operator == "TJ" {
                            // TJ: array of strings and kerning adjustments.
                            // Large negative adjustments usually mark word gaps.
                            if let Some(Object::Array(arr)) = op.operands.first() {
                                let mut combined = String::new();
                                let space_threshold = 200.0;

                                for item in arr {
                                    match item {
                                        Object::String(bytes, _) => {
                                            let decoded = if let Some(ref enc) = encoding {
                                                LopdfDocument::decode_text(enc, bytes)
                                                    .unwrap_or_default()
                                            } else {
                                                decode_text_simple(bytes)
                                            };
                                            combined.push_str(&decoded);
                                        }
                                        Object::Integer(n) => {
                                            if -(*n as f32) > space_threshold {
                                                push_word_gap(&mut combined);
                                            }
                                        }
                                        Object::Real(n) => {
                                            if -n > space_threshold {
                                                push_word_gap(&mut combined);
                                            }
                                        }
                                        _ => {}
                                    }
                                }
                                combined
                            } else {
                                String::new()
                            }
                        } else if let Some(Object::String(bytes, _)) = op.operands.first() {
                            if let Some(ref enc) = encoding {
                                LopdfDocument::decode_text(enc, bytes).unwrap_or_default()
                            } else {
                                decode_text_simple(bytes)
                            }
                        } else {
                            String::new()
                        };

                        push_span(
                            &mut spans,
                            text,
                            &matrix,
                            current_font_size,
                            &current_font,
                        );
                    }
                }
                "'" | "\"" => {
                    matrix.next_line();
                    if in_text_block {
                        let text_idx = if op.operator == "\"" { 2 } else { 0 };
                        if let Some(Object::String(bytes, _)) = op.operands.get(text_idx) {
                            let encoding = lopdf_fonts
                                .get(&current_font_name)
                                .and_then(|f| f.get_font_encoding(&self.doc).ok());

                            let text = if let Some(ref enc) = encoding {
                                LopdfDocument::decode_text(enc, bytes).unwrap_or_default()
                            } else {
                                decode_text_simple(bytes)
                            };

                            push_span(
                                &mut spans,
                                text,
                                &matrix,
                                current_font_size,
                                &current_font,
                            );
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(spans)
    }

    /// Enumerate link annotations and all annotations for a page.
    pub fn page_annotations(&self, number: u32) -> Result<(Vec<Link>, Vec<Annotation>)> {
        let page_id = self.page_id(number)?;
        let mut links = Vec::new();
        let mut annotations = Vec::new();

        let page_dict = match self.doc.get_dictionary(page_id) {
            Ok(d) => d,
            Err(_) => return Ok((links, annotations)),
        };

        let annots = match page_dict.get(b"Annots") {
            Ok(a) => a,
            Err(_) => return Ok((links, annotations)),
        };

        let annot_objs: Vec<&Object> = match annots {
            Object::Array(arr) => arr.iter().collect(),
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Array(arr)) => arr.iter().collect(),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        for obj in annot_objs {
            let Some(dict) = self.resolve_dict(obj) else {
                continue;
            };

            let subtype = dict
                .get(b"Subtype")
                .ok()
                .and_then(|o| o.as_name_str().ok())
                .unwrap_or("")
                .to_string();
            let rect = self.read_rect(dict);
            let contents = dict
                .get(b"Contents")
                .ok()
                .and_then(decode_string_object);

            if subtype == "Link" {
                let uri = self.link_uri(dict);
                let dest_page = self.link_dest_page(dict);
                links.push(Link {
                    page: number,
                    rect,
                    uri,
                    dest_page,
                });
            }

            annotations.push(Annotation {
                page: number,
                subtype,
                rect,
                contents,
            });
        }

        Ok((links, annotations))
    }

    /// List image XObjects referenced by a page.
    pub fn page_images(&self, number: u32) -> Result<Vec<ImageRef>> {
        let page_id = self.page_id(number)?;
        let mut images = Vec::new();

        let Ok(page_dict) = self.doc.get_dictionary(page_id) else {
            return Ok(images);
        };
        let Ok(res) = page_dict.get(b"Resources") else {
            return Ok(images);
        };
        let Some(res_dict) = self.resolve_dict(res) else {
            return Ok(images);
        };
        let Ok(xobjects) = res_dict.get(b"XObject") else {
            return Ok(images);
        };
        let Some(xobj_dict) = self.resolve_dict(xobjects) else {
            return Ok(images);
        };

        for (name, obj) in xobj_dict.iter() {
            let Ok(obj_ref) = obj.as_reference() else {
                continue;
            };
            let Ok(Object::Stream(stream)) = self.doc.get_object(obj_ref) else {
                continue;
            };
            let dict = &stream.dict;

            match dict.get(b"Subtype").and_then(|s| s.as_name_str()) {
                Ok("Image") => {}
                _ => continue,
            }

            let width = dict
                .get(b"Width")
                .ok()
                .and_then(|w| w.as_i64().ok())
                .map(|w| w as u32);
            let height = dict
                .get(b"Height")
                .ok()
                .and_then(|h| h.as_i64().ok())
                .map(|h| h as u32);
            let color_space = dict.get(b"ColorSpace").ok().and_then(|cs| match cs {
                Object::Name(n) => Some(String::from_utf8_lossy(n).to_string()),
                Object::Array(arr) => arr
                    .first()
                    .and_then(|o| o.as_name_str().ok())
                    .map(String::from),
                _ => None,
            });

            images.push(ImageRef {
                page: number,
                name: String::from_utf8_lossy(name).to_string(),
                width,
                height,
                color_space,
            });
        }

        Ok(images)
    }

    fn resolve_dict<'a>(&'a self, obj: &'a Object) -> Option<&'a Dictionary> {
        match obj {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Dictionary(d)) => Some(d),
                _ => None,
            },
            Object::Dictionary(d) => Some(d),
            _ => None,
        }
    }

    fn read_rect(&self, dict: &Dictionary) -> [f32; 4] {
        let mut rect = [0.0; 4];
        if let Ok(arr) = dict.get(b"Rect").and_then(|r| r.as_array()) {
            for (i, val) in arr.iter().take(4).enumerate() {
                rect[i] = get_number(val).unwrap_or(0.0);
            }
        }
        rect
    }

    fn link_uri(&self, dict: &Dictionary) -> Option<String> {
        let action = dict.get(b"A").ok()?;
        let action_dict = self.resolve_dict(action)?;
        match action_dict.get(b"S").ok()?.as_name_str().ok()? {
            "URI" => action_dict.get(b"URI").ok().and_then(decode_string_object),
            _ => None,
        }
    }

    fn link_dest_page(&self, dict: &Dictionary) -> Option<u32> {
        let dest = dict
            .get(b"Dest")
            .ok()
            .or_else(|| {
                let action = dict.get(b"A").ok()?;
                let action_dict = self.resolve_dict(action)?;
                action_dict.get(b"D").ok()
            })?;

        let dest_array = dest.as_array().ok()?;
        let page_ref = dest_array.first()?.as_reference().ok()?;
        self.doc
            .get_pages()
            .iter()
            .find(|(_, id)| **id == page_ref)
            .map(|(num, _)| *num)
    }
}

impl PageSource for LopdfBackend {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page(&self, number: u32) -> Result<RawPage> {
        let page_id = self.page_id(number)?;
        let (width, height) = self.page_dimensions(page_id);
        let spans = self.page_spans(page_id)?;
        let lines = group_into_lines(spans);
        Ok(RawPage {
            number,
            width,
            height,
            lines,
        })
    }

    fn metadata(&self) -> Metadata {
        let mut metadata = Metadata::with_version(self.doc.version.to_string());
        metadata.page_count = self.doc.get_pages().len() as u32;
        metadata.encrypted = self.doc.is_encrypted();

        if let Ok(info) = self.doc.trailer.get(b"Info") {
            if let Ok(info_ref) = info.as_reference() {
                if let Ok(info_dict) = self.doc.get_dictionary(info_ref) {
                    metadata.title = get_string_from_dict(info_dict, b"Title");
                    metadata.author = get_string_from_dict(info_dict, b"Author");
                    metadata.subject = get_string_from_dict(info_dict, b"Subject");
                    metadata.keywords = get_string_from_dict(info_dict, b"Keywords");
                    metadata.creator = get_string_from_dict(info_dict, b"Creator");
                    metadata.producer = get_string_from_dict(info_dict, b"Producer");

                    if let Some(date_str) = get_string_from_dict(info_dict, b"CreationDate") {
                        metadata.created = parse_pdf_date(&date_str);
                    }
                    if let Some(date_str) = get_string_from_dict(info_dict, b"ModDate") {
                        metadata.modified = parse_pdf_date(&date_str);
                    }
                }
            }
        }

        metadata
    }
}

/// Positioning state for a content stream text object.
#[derive(Debug, Clone)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32, // X translation
    f: f32, // Y translation
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
    }

    fn next_line(&mut self) {
        let leading = self.leading;
        self.translate(0.0, -leading);
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Append a word gap unless the text already ends in one.
fn push_word_gap(text: &mut String) {
    if !text.is_empty() && !text.ends_with(' ') && !text.ends_with('\u{00A0}') {
        text.push(' ');
    }
}

/// Append a positioned span, skipping whitespace-only text.
fn push_span(
    spans: &mut Vec<RawSpan>,
    text: String,
    matrix: &TextMatrix,
    font_size: f32,
    font_name: &str,
) {
    if text.trim().is_empty() {
        return;
    }

    let (x, y) = matrix.position();
    let size = font_size * matrix.vertical_scale();
    // Width estimate: no glyph metrics at this layer
    let width = text.chars().count() as f32 * size * 0.5;
    let text: String = text.nfc().collect();

    spans.push(RawSpan {
        text,
        font_name: font_name.to_string(),
        font_size: size,
        bbox: BBox::new(x, y - size * 0.2, x + width, y + size * 0.8),
    });
}

/// Group positioned spans into baseline lines.
///
/// Spans are sorted top-to-bottom (PDF Y is bottom-up) then left-to-right;
/// a span joins the current line when its baseline is within 30% of its
/// font size.
fn group_into_lines(mut spans: Vec<RawSpan>) -> Vec<RawLine> {
    if spans.is_empty() {
        return vec![];
    }

    spans.sort_by(|a, b| {
        let y_cmp = b
            .bbox
            .y0
            .partial_cmp(&a.bbox.y0)
            .unwrap_or(std::cmp::Ordering::Equal);
        if y_cmp == std::cmp::Ordering::Equal {
            a.bbox
                .x0
                .partial_cmp(&b.bbox.x0)
                .unwrap_or(std::cmp::Ordering::Equal)
        } else {
            y_cmp
        }
    });

    let mut lines: Vec<RawLine> = Vec::new();
    let mut current: Vec<RawSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = (span.font_size * 0.3).max(1.0);

        match current_y {
            Some(y) if (span.bbox.y0 - y).abs() <= y_tolerance => {
                current.push(span);
            }
            Some(_) => {
                if !current.is_empty() {
                    lines.push(RawLine {
                        spans: std::mem::take(&mut current),
                    });
                }
                current_y = Some(span.bbox.y0);
                current.push(span);
            }
            None => {
                current_y = Some(span.bbox.y0);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(RawLine { spans: current });
    }

    lines
}

/// Helper to extract a number from a PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode a PDF string object to UTF-8.
fn decode_string_object(obj: &Object) -> Option<String> {
    match obj {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        _ => None,
    }
}

/// Helper to get a text string from a PDF dictionary.
fn get_string_from_dict(dict: &Dictionary, key: &[u8]) -> Option<String> {
    dict.get(key).ok().and_then(|obj| match obj {
        Object::String(bytes, _) => Some(decode_text_simple(bytes)),
        Object::Name(bytes) => String::from_utf8(bytes.clone()).ok(),
        _ => None,
    })
}

/// Simple text decoding fallback when no encoding is available.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    // UTF-16BE with BOM marker is the PDF convention for Unicode strings
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|c| {
                if c.len() == 2 {
                    Some(u16::from_be_bytes([c[0], c[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16(&utf16).unwrap_or_default();
    }

    if let Ok(s) = String::from_utf8(bytes.to_vec()) {
        return s;
    }

    // Fallback: Latin-1
    bytes.iter().map(|&b| b as char).collect()
}

/// Parse a PDF date string (D:YYYYMMDDHHmmSSOHH'mm').
fn parse_pdf_date(s: &str) -> Option<chrono::DateTime<chrono::Utc>> {
    let s = s.strip_prefix("D:")?;

    if s.len() < 4 {
        return None;
    }

    let year: i32 = s.get(0..4)?.parse().ok()?;
    let month: u32 = s.get(4..6).and_then(|m| m.parse().ok()).unwrap_or(1);
    let day: u32 = s.get(6..8).and_then(|d| d.parse().ok()).unwrap_or(1);
    let hour: u32 = s.get(8..10).and_then(|h| h.parse().ok()).unwrap_or(0);
    let minute: u32 = s.get(10..12).and_then(|m| m.parse().ok()).unwrap_or(0);
    let second: u32 = s.get(12..14).and_then(|s| s.parse().ok()).unwrap_or(0);

    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, second))
        .map(|dt| chrono::DateTime::from_naive_utc_and_offset(dt, chrono::Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn span(text: &str, x: f32, y: f32, size: f32) -> RawSpan {
        let width = text.chars().count() as f32 * size * 0.5;
        RawSpan {
            text: text.to_string(),
            font_name: "Helvetica".to_string(),
            font_size: size,
            bbox: BBox::new(x, y - size * 0.2, x + width, y + size * 0.8),
        }
    }

    #[test]
    fn test_decode_text_simple_utf8() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
    }

    #[test]
    fn test_decode_text_simple_latin1() {
        // 0xE9 = 'é' in Latin-1
        let bytes = vec![0x48, 0x65, 0x6C, 0x6C, 0xE9];
        assert_eq!(decode_text_simple(&bytes), "Hellé");
    }

    #[test]
    fn test_decode_text_simple_utf16be() {
        // UTF-16BE BOM + "Hi"
        let bytes = vec![0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69];
        assert_eq!(decode_text_simple(&bytes), "Hi");
    }

    #[test]
    fn test_parse_pdf_date() {
        let date = parse_pdf_date("D:20240115103045").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_parse_pdf_date_minimal() {
        let date = parse_pdf_date("D:2024").unwrap();
        assert_eq!(date.year(), 2024);
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 1);
    }

    #[test]
    fn test_group_into_lines_same_baseline() {
        let spans = vec![
            span("World", 120.0, 700.0, 12.0),
            span("Hello ", 72.0, 700.0, 12.0),
        ];
        let lines = group_into_lines(spans);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "Hello World");
    }

    #[test]
    fn test_group_into_lines_separate_baselines() {
        let spans = vec![
            span("Body", 72.0, 650.0, 12.0),
            span("Heading", 72.0, 700.0, 18.0),
        ];
        let lines = group_into_lines(spans);
        assert_eq!(lines.len(), 2);
        // Top line first
        assert_eq!(lines[0].text(), "Heading");
        assert_eq!(lines[1].text(), "Body");
    }

    #[test]
    fn test_raw_line_max_font_size() {
        let line = RawLine {
            spans: vec![span("a", 0.0, 0.0, 10.0), span("b", 10.0, 0.0, 14.0)],
        };
        assert!((line.max_font_size() - 14.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bbox_union() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BBox::new(5.0, -2.0, 20.0, 8.0);
        let u = a.union(&b);
        assert_eq!(u, BBox::new(0.0, -2.0, 20.0, 10.0));
    }

    #[test]
    fn test_push_word_gap() {
        let mut s = String::from("word");
        push_word_gap(&mut s);
        assert_eq!(s, "word ");
        push_word_gap(&mut s);
        assert_eq!(s, "word ");

        let mut empty = String::new();
        push_word_gap(&mut empty);
        assert!(empty.is_empty());
    }
}

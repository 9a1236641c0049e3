//! PPTX reader for inspecting written decks.
//!
//! Recovers slide order from the presentation relationships and, for each
//! slide, the placeholder shapes with their paragraphs.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use slidegen_core::{Error, Result};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// A slide read back from a package.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadSlide {
    /// 1-based position in the presentation.
    pub number: usize,

    /// Shapes in document order.
    pub shapes: Vec<ReadShape>,
}

impl ReadSlide {
    /// Text of the title placeholder (`title` or `ctrTitle`).
    pub fn title(&self) -> Option<String> {
        self.shapes
            .iter()
            .find(|s| matches!(s.placeholder.as_deref(), Some("title" | "ctrTitle")))
            .map(ReadShape::text)
    }

    /// Paragraphs of the first placeholder of the given type.
    pub fn placeholder(&self, ph_type: &str) -> Option<&ReadShape> {
        self.shapes
            .iter()
            .find(|s| s.placeholder.as_deref() == Some(ph_type))
    }
}

/// A shape and its paragraphs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadShape {
    /// Placeholder type; `obj` when the placeholder names only an index.
    pub placeholder: Option<String>,

    pub paragraphs: Vec<ReadParagraph>,
}

impl ReadShape {
    /// Non-empty paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A paragraph with the attributes the writer sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadParagraph {
    pub text: String,
    pub level: u8,

    /// Font size in points from the first run, if set.
    pub font_size: Option<u32>,
}

/// Reader for PPTX packages.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Read every slide of a package, in presentation order.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<ReadSlide>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;

        let mut slides = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            let content = self.read_file_from_archive(&mut archive, slide_path)?;
            slides.push(ReadSlide {
                number: idx + 1,
                shapes: self.extract_shapes_from_xml(&content)?,
            });
        }

        Ok(slides)
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();
                    let id = attribute(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order_num =
                            extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Extract shapes with their placeholder type and paragraphs.
    fn extract_shapes_from_xml(&self, xml_content: &str) -> Result<Vec<ReadShape>> {
        let mut shapes = Vec::new();
        let mut reader = Reader::from_str(xml_content);
        reader.trim_text(true);

        let mut current_shape: Option<ReadShape> = None;
        let mut current_paragraph: Option<ReadParagraph> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" => current_shape = Some(ReadShape::default()),
                    b"p" if current_shape.is_some() => {
                        current_paragraph = Some(ReadParagraph::default());
                    }
                    name => apply_properties(name, e, &mut current_shape, &mut current_paragraph),
                },
                Ok(Event::Empty(ref e)) => {
                    let name = e.name();
                    apply_properties(local_name(name.as_ref()), e, &mut current_shape, &mut current_paragraph);
                }
                Ok(Event::Text(ref e)) => {
                    if let Some(ref mut paragraph) = current_paragraph {
                        let text = e.unescape().unwrap_or_default();
                        paragraph.text.push_str(&text);
                    }
                }
                Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                    b"sp" => {
                        if let Some(shape) = current_shape.take() {
                            shapes.push(shape);
                        }
                        current_paragraph = None;
                    }
                    b"p" => {
                        if let (Some(shape), Some(paragraph)) =
                            (current_shape.as_mut(), current_paragraph.take())
                        {
                            shape.paragraphs.push(paragraph);
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => {
                    log::warn!("XML parsing error (continuing): {}", e);
                }
                _ => {}
            }
        }

        Ok(shapes)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive.by_name(path).map_err(|e| {
            Error::PptxParseError(format!("File not found in archive '{}': {}", path, e))
        })?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Record placeholder type, paragraph level and run size.
fn apply_properties(
    name: &[u8],
    e: &BytesStart,
    shape: &mut Option<ReadShape>,
    paragraph: &mut Option<ReadParagraph>,
) {
    match name {
        b"ph" => {
            if let Some(shape) = shape.as_mut() {
                shape.placeholder = Some(attribute(e, b"type").unwrap_or_else(|| "obj".to_string()));
            }
        }
        b"pPr" => {
            if let Some(paragraph) = paragraph.as_mut() {
                paragraph.level = attribute(e, b"lvl")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0);
            }
        }
        b"rPr" => {
            if let Some(paragraph) = paragraph.as_mut() {
                if paragraph.font_size.is_none() {
                    paragraph.font_size = attribute(e, b"sz")
                        .and_then(|v| v.parse::<u32>().ok())
                        .map(|hundredths| hundredths / 100);
                }
            }
        }
        _ => {}
    }
}

/// Value of an attribute by its (unprefixed) key.
fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}

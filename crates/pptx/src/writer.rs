//! PPTX writer: serializes a [`Deck`] into an Office Open XML package.

use crate::template;
use quick_xml::escape::escape;
use slidegen_core::{Deck, DocumentWriter, Error, Paragraph, Result, Slide, SlideLayout};
use std::borrow::Cow;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Language tag written on text runs.
const TEXT_LANG: &str = "zh-CN";

/// One file inside the package.
#[derive(Debug, Clone)]
pub struct Part {
    /// Path inside the archive, e.g. `ppt/slides/slide1.xml`.
    pub name: String,
    pub content: Cow<'static, str>,
}

impl Part {
    fn new(name: impl Into<String>, content: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Writer for PPTX packages.
#[derive(Debug, Clone, Default)]
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Write the deck as a PPTX package and return the inner writer.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for part in self.package_parts(deck) {
            zip.start_file(part.name.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", part.name, e)))?;
            zip.write_all(part.content.as_bytes())?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    /// Every part of the package, in archive order.
    pub fn package_parts(&self, deck: &Deck) -> Vec<Part> {
        let slide_count = deck.slide_count();
        let mut parts = vec![
            Part::new("[Content_Types].xml", template::content_types_xml(slide_count)),
            Part::new("_rels/.rels", template::package_rels_xml()),
            Part::new("docProps/core.xml", template::core_props_xml(&escape_text(deck_title(deck)))),
            Part::new("docProps/app.xml", template::app_props_xml(slide_count)),
            Part::new("ppt/presentation.xml", template::presentation_xml(slide_count)),
            Part::new("ppt/_rels/presentation.xml.rels", template::presentation_rels_xml(slide_count)),
            Part::new("ppt/presProps.xml", template::pres_props_xml()),
            Part::new("ppt/viewProps.xml", template::view_props_xml()),
            Part::new("ppt/tableStyles.xml", template::table_styles_xml()),
            Part::new("ppt/theme/theme1.xml", template::theme_xml()),
            Part::new("ppt/slideMasters/slideMaster1.xml", template::slide_master_xml()),
            Part::new("ppt/slideMasters/_rels/slideMaster1.xml.rels", template::slide_master_rels_xml()),
        ];

        for layout in [SlideLayout::TitleSlide, SlideLayout::TitleAndContent] {
            let index = template::layout_index(layout);
            parts.push(Part::new(
                format!("ppt/slideLayouts/slideLayout{}.xml", index),
                template::slide_layout_xml(layout),
            ));
            parts.push(Part::new(
                format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", index),
                template::slide_layout_rels_xml(),
            ));
        }

        for (idx, slide) in deck.slides.iter().enumerate() {
            let number = idx + 1;
            log::trace!("Slide {} on layout {:?}", number, slide.layout.name());
            parts.push(Part::new(format!("ppt/slides/slide{}.xml", number), slide_xml(slide)));
            parts.push(Part::new(
                format!("ppt/slides/_rels/slide{}.xml.rels", number),
                template::slide_rels_xml(slide.layout),
            ));
        }

        log::debug!("Prepared {} package parts for {} slides", parts.len(), slide_count);
        parts
    }
}

impl DocumentWriter for PptxWriter {
    fn write_to_path(&self, deck: &Deck, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let file = self.write(deck, file)?;
        file.sync_all()?;
        log::debug!("Wrote {} slides to {}", deck.slide_count(), path.display());
        Ok(())
    }
}

/// Document title: the first title slide's title, if any.
fn deck_title(deck: &Deck) -> &str {
    deck.slides
        .iter()
        .find(|s| s.layout == SlideLayout::TitleSlide)
        .map(|s| s.title.as_str())
        .unwrap_or_default()
}

/// Render one slide.
fn slide_xml(slide: &Slide) -> String {
    let mut xml = String::with_capacity(1024 + slide.body.len() * 192);
    xml.push_str(template::XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<p:sld xmlns:a="{}" xmlns:r="{}" xmlns:p="{}">"#,
        template::NS_DRAWING,
        template::NS_RELATIONSHIPS,
        template::NS_PRESENTATION
    );
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>"#);

    match slide.layout {
        SlideLayout::TitleSlide => {
            let title = [Paragraph::new(slide.title.as_str(), 0)];
            let subtitle = [Paragraph::new(slide.subtitle.as_deref().unwrap_or_default(), 0)];
            write_placeholder(&mut xml, 2, "Title 1", r#"type="ctrTitle""#, &title);
            write_placeholder(&mut xml, 3, "Subtitle 2", r#"type="subTitle" idx="1""#, &subtitle);
        }
        SlideLayout::TitleAndContent => {
            let title = [Paragraph::new(slide.title.as_str(), 0)];
            write_placeholder(&mut xml, 2, "Title 1", r#"type="title""#, &title);
            write_placeholder(&mut xml, 3, "Content Placeholder 2", r#"type="body" idx="1""#, &slide.body);
        }
    }

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    xml
}

/// Write a placeholder shape holding `paragraphs`.
fn write_placeholder(xml: &mut String, id: u32, name: &str, ph_attrs: &str, paragraphs: &[Paragraph]) {
    let _ = write!(
        xml,
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{}" name="{}"/><p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr><p:nvPr><p:ph {}/></p:nvPr></p:nvSpPr><p:spPr/>"#,
        id, name, ph_attrs
    );
    xml.push_str("<p:txBody><a:bodyPr/><a:lstStyle/>");
    if paragraphs.is_empty() {
        write_empty_paragraph(xml);
    }
    for paragraph in paragraphs {
        write_paragraph(xml, paragraph);
    }
    xml.push_str("</p:txBody></p:sp>");
}

/// Write one `a:p`, mapping level, size and color onto DrawingML.
fn write_paragraph(xml: &mut String, paragraph: &Paragraph) {
    if paragraph.text.is_empty() {
        write_empty_paragraph(xml);
        return;
    }

    xml.push_str("<a:p>");
    if paragraph.level > 0 {
        let _ = write!(xml, r#"<a:pPr lvl="{}"/>"#, paragraph.level);
    }

    let _ = write!(xml, r#"<a:r><a:rPr lang="{}""#, TEXT_LANG);
    if let Some(points) = paragraph.font_size {
        // Hundredths of a point.
        let _ = write!(xml, r#" sz="{}""#, points * 100);
    }
    xml.push_str(r#" dirty="0""#);
    match paragraph.color {
        Some(color) => {
            let _ = write!(
                xml,
                r#"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr>"#,
                color.hex()
            );
        }
        None => xml.push_str("/>"),
    }

    let _ = write!(xml, "<a:t>{}</a:t></a:r></a:p>", escape_text(&paragraph.text));
}

fn write_empty_paragraph(xml: &mut String) {
    let _ = write!(xml, r#"<a:p><a:endParaRPr lang="{}"/></a:p>"#, TEXT_LANG);
}

/// Escape text for XML, dropping characters XML 1.0 cannot carry.
fn escape_text(text: &str) -> String {
    let cleaned: Cow<str> = if text.chars().any(is_invalid_xml_char) {
        Cow::Owned(text.chars().filter(|c| !is_invalid_xml_char(*c)).collect())
    } else {
        Cow::Borrowed(text)
    };
    escape(cleaned.as_ref()).into_owned()
}

/// Outside the XML 1.0 `Char` production.
fn is_invalid_xml_char(c: char) -> bool {
    !matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

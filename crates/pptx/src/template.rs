//! Package templates.
//!
//! Static parts (theme, master, layouts, properties) are bundled from
//! `resources/`. Parts that depend on the slide count are generated here.

use slidegen_core::SlideLayout;
use std::fmt::Write as FmtWrite;

/// Slide width in EMUs (10 inches).
pub const SLIDE_WIDTH_EMU: i64 = 9_144_000;

/// Slide height in EMUs (7.5 inches).
pub const SLIDE_HEIGHT_EMU: i64 = 6_858_000;

/// First `p:sldId` value; PowerPoint requires ids of at least 256.
const FIRST_SLIDE_ID: usize = 256;

/// Relationships in `presentation.xml.rels` that precede the slides.
const FIXED_PRESENTATION_RELS: usize = 5;

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

pub(crate) const NS_PRESENTATION: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";
pub(crate) const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_APP_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_VIEW_PROPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
const REL_TABLE_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";

const CT_PRESENTATIONML: &str = "application/vnd.openxmlformats-officedocument.presentationml";

/// Theme part.
pub fn theme_xml() -> &'static str {
    include_str!("../resources/theme1.xml")
}

/// Slide master with title and body placeholders.
pub fn slide_master_xml() -> &'static str {
    include_str!("../resources/slideMaster1.xml")
}

/// Layout XML for a slide layout.
pub fn slide_layout_xml(layout: SlideLayout) -> &'static str {
    match layout {
        SlideLayout::TitleSlide => include_str!("../resources/slideLayout1.xml"),
        SlideLayout::TitleAndContent => include_str!("../resources/slideLayout2.xml"),
    }
}

/// Presentation properties part.
pub fn pres_props_xml() -> &'static str {
    include_str!("../resources/presProps.xml")
}

/// View properties part.
pub fn view_props_xml() -> &'static str {
    include_str!("../resources/viewProps.xml")
}

/// Table styles part.
pub fn table_styles_xml() -> &'static str {
    include_str!("../resources/tableStyles.xml")
}

/// 1-based index of the layout part (`slideLayoutN.xml`).
pub fn layout_index(layout: SlideLayout) -> usize {
    match layout {
        SlideLayout::TitleSlide => 1,
        SlideLayout::TitleAndContent => 2,
    }
}

/// Relationship id of the n-th slide (1-based) in `presentation.xml.rels`.
pub fn slide_rel_id(number: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + number)
}

/// Builds a `Relationships` part.
#[derive(Debug, Default)]
pub(crate) struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(mut self, id: impl Into<String>, rel_type: &'static str, target: impl Into<String>) -> Self {
        self.entries.push((id.into(), rel_type, target.into()));
        self
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.entries {
            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id, rel_type, target
            );
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// `[Content_Types].xml` for a deck with `slide_count` slides.
pub fn content_types_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(2048 + slide_count * 160);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let overrides = [
        ("/ppt/presentation.xml", format!("{}.presentation.main+xml", CT_PRESENTATIONML)),
        ("/ppt/slideMasters/slideMaster1.xml", format!("{}.slideMaster+xml", CT_PRESENTATIONML)),
        ("/ppt/slideLayouts/slideLayout1.xml", format!("{}.slideLayout+xml", CT_PRESENTATIONML)),
        ("/ppt/slideLayouts/slideLayout2.xml", format!("{}.slideLayout+xml", CT_PRESENTATIONML)),
        ("/ppt/presProps.xml", format!("{}.presProps+xml", CT_PRESENTATIONML)),
        ("/ppt/viewProps.xml", format!("{}.viewProps+xml", CT_PRESENTATIONML)),
        ("/ppt/tableStyles.xml", format!("{}.tableStyles+xml", CT_PRESENTATIONML)),
        ("/ppt/theme/theme1.xml", "application/vnd.openxmlformats-officedocument.theme+xml".to_string()),
        ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml".to_string()),
        ("/docProps/app.xml", "application/vnd.openxmlformats-officedocument.extended-properties+xml".to_string()),
    ];
    for (part, content_type) in &overrides {
        let _ = write!(xml, r#"<Override PartName="{}" ContentType="{}"/>"#, part, content_type);
    }
    for number in 1..=slide_count {
        let _ = write!(
            xml,
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}.slide+xml"/>"#,
            number, CT_PRESENTATIONML
        );
    }

    xml.push_str("</Types>");
    xml
}

/// Package-level `_rels/.rels`.
pub fn package_rels_xml() -> String {
    Relationships::new()
        .add("rId1", REL_OFFICE_DOCUMENT, "ppt/presentation.xml")
        .add("rId2", REL_CORE_PROPS, "docProps/core.xml")
        .add("rId3", REL_APP_PROPS, "docProps/app.xml")
        .to_xml()
}

/// `ppt/presentation.xml` listing `slide_count` slides.
pub fn presentation_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<p:presentation xmlns:a="{}" xmlns:r="{}" xmlns:p="{}" saveSubsetFonts="1">"#,
        NS_DRAWING, NS_RELATIONSHIPS, NS_PRESENTATION
    );
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

    if slide_count > 0 {
        xml.push_str("<p:sldIdLst>");
        for number in 1..=slide_count {
            let _ = write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + number - 1,
                slide_rel_id(number)
            );
        }
        xml.push_str("</p:sldIdLst>");
    }

    let _ = write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}" type="screen4x3"/>"#,
        SLIDE_WIDTH_EMU, SLIDE_HEIGHT_EMU
    );
    xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
    xml.push_str("</p:presentation>");
    xml
}

/// `ppt/_rels/presentation.xml.rels`.
pub fn presentation_rels_xml(slide_count: usize) -> String {
    let mut rels = Relationships::new()
        .add("rId1", REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml")
        .add("rId2", REL_PRES_PROPS, "presProps.xml")
        .add("rId3", REL_VIEW_PROPS, "viewProps.xml")
        .add("rId4", REL_THEME, "theme/theme1.xml")
        .add("rId5", REL_TABLE_STYLES, "tableStyles.xml");
    for number in 1..=slide_count {
        rels = rels.add(slide_rel_id(number), REL_SLIDE, format!("slides/slide{}.xml", number));
    }
    rels.to_xml()
}

/// Relationships of the slide master.
pub fn slide_master_rels_xml() -> String {
    Relationships::new()
        .add("rId1", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")
        .add("rId2", REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout2.xml")
        .add("rId3", REL_THEME, "../theme/theme1.xml")
        .to_xml()
}

/// Relationships of a slide layout.
pub fn slide_layout_rels_xml() -> String {
    Relationships::new()
        .add("rId1", REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")
        .to_xml()
}

/// Relationships of a slide placed on `layout`.
pub fn slide_rels_xml(layout: SlideLayout) -> String {
    Relationships::new()
        .add(
            "rId1",
            REL_SLIDE_LAYOUT,
            format!("../slideLayouts/slideLayout{}.xml", layout_index(layout)),
        )
        .to_xml()
}

/// `docProps/core.xml`. `title` must already be XML-escaped.
pub fn core_props_xml(title: &str) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    let _ = write!(xml, "<dc:title>{}</dc:title>", title);
    xml.push_str("<dc:creator>slidegen</dc:creator>");
    xml.push_str("</cp:coreProperties>");
    xml
}

/// `docProps/app.xml`.
pub fn app_props_xml(slide_count: usize) -> String {
    let mut xml = String::with_capacity(384);
    xml.push_str(XML_DECLARATION);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    xml.push_str("<Application>slidegen</Application>");
    let _ = write!(xml, "<Slides>{}</Slides>", slide_count);
    xml.push_str("</Properties>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_lists_slides() {
        let xml = presentation_xml(3);
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(xml.contains(r#"<p:sldId id="258" r:id="rId8"/>"#));
        assert!(xml.contains(r#"cx="9144000" cy="6858000""#));
    }

    #[test]
    fn test_empty_presentation_has_no_slide_list() {
        assert!(!presentation_xml(0).contains("sldIdLst"));
        assert!(!presentation_rels_xml(0).contains("slides/slide"));
    }

    #[test]
    fn test_content_types_include_slides() {
        let xml = content_types_xml(2);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide2.xml"));
        assert!(!xml.contains("/ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_slide_rels_point_at_layout() {
        assert!(slide_rels_xml(SlideLayout::TitleSlide).contains("slideLayout1.xml"));
        assert!(slide_rels_xml(SlideLayout::TitleAndContent).contains("slideLayout2.xml"));
    }

    #[test]
    fn test_static_parts_are_bundled() {
        assert!(theme_xml().contains("<a:theme"));
        assert!(slide_master_xml().contains("<p:sldLayoutIdLst>"));
        assert!(slide_layout_xml(SlideLayout::TitleSlide).contains(r#"type="ctrTitle""#));
    }

    #[test]
    fn test_layout_parts_carry_layout_names() {
        for layout in [SlideLayout::TitleSlide, SlideLayout::TitleAndContent] {
            let expected = format!(r#"<p:cSld name="{}">"#, layout.name());
            assert!(slide_layout_xml(layout).contains(&expected));
        }
    }
}

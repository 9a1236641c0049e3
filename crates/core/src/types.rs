//! Domain types for slide records recovered from generated text.

use serde::{Deserialize, Serialize};

/// Label that marks the cover title line.
pub const COVER_TITLE_LABEL: &str = "标题：";

/// Label that marks the cover subtitle line.
pub const COVER_SUBTITLE_LABEL: &str = "副标题：";

/// One parsed slide block.
///
/// Records are built once per parse pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideRecord {
    /// Declared 1-based position from the block header.
    pub number: i64,

    /// Text following the header separator.
    pub title: String,

    /// Rendering category, decided from `number`.
    pub role: SlideRole,

    /// Body lines in source order. Always empty for cover records.
    pub lines: Vec<ContentLine>,

    /// Value of the `标题：` line (cover records only).
    pub cover_title: Option<String>,

    /// Value of the `副标题：` line (cover records only).
    pub cover_subtitle: Option<String>,
}

impl SlideRecord {
    /// Create a record with no body lines or cover fields.
    pub fn new(number: i64, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            role: SlideRole::from_number(number),
            lines: Vec::new(),
            cover_title: None,
            cover_subtitle: None,
        }
    }

    /// Cover title, or an empty string when the label was missing.
    pub fn cover_title_or_empty(&self) -> &str {
        self.cover_title.as_deref().unwrap_or_default()
    }

    /// Cover subtitle, or an empty string when the label was missing.
    pub fn cover_subtitle_or_empty(&self) -> &str {
        self.cover_subtitle.as_deref().unwrap_or_default()
    }

    /// Number of body lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// The rendering category of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideRole {
    /// Slide 1: title and subtitle only.
    Cover,
    /// Slide 2: flat outline with adaptive font size.
    TableOfContents,
    /// Content pages, conclusion and references.
    Body,
}

impl SlideRole {
    /// Classify a slide by its declared number.
    pub fn from_number(number: i64) -> Self {
        match number {
            1 => Self::Cover,
            2 => Self::TableOfContents,
            _ => Self::Body,
        }
    }

    /// Layout used to render slides of this role.
    pub fn layout(self) -> crate::SlideLayout {
        match self {
            Self::Cover => crate::SlideLayout::TitleSlide,
            Self::TableOfContents | Self::Body => crate::SlideLayout::TitleAndContent,
        }
    }
}

/// A single body line of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLine {
    /// Text with bullet/indent markers (or image brackets) stripped.
    pub text: String,

    /// 0 or 1. Rendering hint only; lines do not own each other.
    pub indent_level: u8,

    /// Whether this is a bullet or a suggested image.
    pub kind: LineKind,
}

impl ContentLine {
    /// Create a bullet line at the given indent level (clamped to 1).
    pub fn bullet(text: impl Into<String>, indent_level: u8) -> Self {
        Self {
            text: text.into(),
            indent_level: indent_level.min(1),
            kind: LineKind::Bullet,
        }
    }

    /// Create an image-hint line.
    pub fn image_hint(text: impl Into<String>, indent_level: u8) -> Self {
        Self {
            text: text.into(),
            indent_level: indent_level.min(1),
            kind: LineKind::ImageHint,
        }
    }

    /// Whether this line is an image hint.
    pub fn is_image_hint(&self) -> bool {
        self.kind == LineKind::ImageHint
    }
}

/// Kind of a body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Literal slide text.
    Bullet,
    /// Bracket-wrapped description of a suggested illustration.
    ImageHint,
}

/// A labeled field of a cover block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoverField {
    Title,
    Subtitle,
}

impl CoverField {
    /// The literal label that introduces this field.
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => COVER_TITLE_LABEL,
            Self::Subtitle => COVER_SUBTITLE_LABEL,
        }
    }

    /// Match a cover line against the known labels, returning the field
    /// and the text after the label.
    pub fn match_line(line: &str) -> Option<(Self, &str)> {
        [Self::Title, Self::Subtitle]
            .into_iter()
            .find_map(|field| line.strip_prefix(field.label()).map(|rest| (field, rest)))
    }
}

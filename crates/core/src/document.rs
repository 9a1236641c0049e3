//! In-memory document tree handed to a document writer.

use serde::{Deserialize, Serialize};

/// A built presentation: slides in record order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slide.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    /// Number of slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// Which slide layout a slide is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlideLayout {
    /// Centered title with a subtitle.
    TitleSlide,
    /// Title with a bulleted body.
    TitleAndContent,
}

impl SlideLayout {
    /// Human-readable layout name, as used in the package.
    pub fn name(self) -> &'static str {
        match self {
            Self::TitleSlide => "Title Slide",
            Self::TitleAndContent => "Title and Content",
        }
    }
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub layout: SlideLayout,

    /// Title placeholder text.
    pub title: String,

    /// Subtitle placeholder text (title slides only).
    pub subtitle: Option<String>,

    /// Body paragraphs (title-and-content slides only).
    pub body: Vec<Paragraph>,
}

impl Slide {
    /// Create a title slide.
    pub fn title_slide(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            layout: SlideLayout::TitleSlide,
            title: title.into(),
            subtitle: Some(subtitle.into()),
            body: Vec::new(),
        }
    }

    /// Create a title-and-content slide with an empty body.
    pub fn title_and_content(title: impl Into<String>) -> Self {
        Self {
            layout: SlideLayout::TitleAndContent,
            title: title.into(),
            subtitle: None,
            body: Vec::new(),
        }
    }

    /// Append a body paragraph.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(paragraph);
    }
}

/// One paragraph of a slide body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,

    /// Outline level (0 = top).
    pub level: u8,

    /// Font size in points. `None` inherits the layout default.
    pub font_size: Option<u32>,

    /// Text color. `None` inherits the layout default.
    pub color: Option<Rgb>,

    /// Describes a suggested illustration rather than literal text.
    pub image_hint: bool,
}

impl Paragraph {
    /// Create a paragraph with inherited styling.
    pub fn new(text: impl Into<String>, level: u8) -> Self {
        Self {
            text: text.into(),
            level,
            font_size: None,
            color: None,
            image_hint: false,
        }
    }

    /// Set the font size in points.
    pub fn with_font_size(mut self, points: u32) -> Self {
        self.font_size = Some(points);
        self
    }

    /// Set the text color.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Mark the paragraph as an image hint.
    pub fn into_image_hint(mut self) -> Self {
        self.image_hint = true;
        self
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Muted gray used for image hints.
    pub const GRAY: Rgb = Rgb(128, 128, 128);

    /// Uppercase hex form without `#`, e.g. `808080`.
    pub fn hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

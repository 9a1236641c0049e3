//! Deck builder: maps slide records to slides using per-role rules.

use crate::document::{Deck, Paragraph, Rgb, Slide};
use crate::font::toc_font_size;
use crate::types::{SlideRecord, SlideRole};

/// Font size (points) for image-hint paragraphs.
pub const IMAGE_HINT_FONT_SIZE: u32 = 10;

/// Styling shared by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderStyle {
    pub image_hint_font_size: u32,
    pub image_hint_color: Rgb,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            image_hint_font_size: IMAGE_HINT_FONT_SIZE,
            image_hint_color: Rgb::GRAY,
        }
    }
}

/// Renders one record of a given role into a slide.
pub trait SlideRenderer {
    fn render(&self, record: &SlideRecord, style: &RenderStyle) -> Slide;
}

/// Title slide from the labeled cover fields.
#[derive(Debug, Clone, Copy)]
pub struct CoverRenderer;

impl SlideRenderer for CoverRenderer {
    fn render(&self, record: &SlideRecord, _style: &RenderStyle) -> Slide {
        Slide::title_slide(record.cover_title_or_empty(), record.cover_subtitle_or_empty())
    }
}

/// Flat outline, shrunk as it grows.
#[derive(Debug, Clone, Copy)]
pub struct TableOfContentsRenderer;

impl SlideRenderer for TableOfContentsRenderer {
    fn render(&self, record: &SlideRecord, _style: &RenderStyle) -> Slide {
        let font_size = toc_font_size(record.line_count());
        let mut slide = Slide::title_and_content(&record.title);
        for line in &record.lines {
            slide.add_paragraph(Paragraph::new(&line.text, 0).with_font_size(font_size));
        }
        slide
    }
}

/// Bullets at their parsed level; image hints muted.
#[derive(Debug, Clone, Copy)]
pub struct BodyRenderer;

impl SlideRenderer for BodyRenderer {
    fn render(&self, record: &SlideRecord, style: &RenderStyle) -> Slide {
        let mut slide = Slide::title_and_content(&record.title);
        for line in &record.lines {
            let paragraph = if line.is_image_hint() {
                Paragraph::new(&line.text, 0)
                    .with_font_size(style.image_hint_font_size)
                    .with_color(style.image_hint_color)
                    .into_image_hint()
            } else {
                Paragraph::new(&line.text, line.indent_level)
            };
            slide.add_paragraph(paragraph);
        }
        slide
    }
}

/// Renderer responsible for a role.
pub fn renderer_for(role: SlideRole) -> &'static dyn SlideRenderer {
    match role {
        SlideRole::Cover => &CoverRenderer,
        SlideRole::TableOfContents => &TableOfContentsRenderer,
        SlideRole::Body => &BodyRenderer,
    }
}

/// Builds a [`Deck`] from parsed records.
#[derive(Debug, Clone, Default)]
pub struct DeckBuilder {
    style: RenderStyle,
}

impl DeckBuilder {
    /// Create a builder with the default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the image-hint font size and color.
    pub fn with_image_hint_style(mut self, font_size: u32, color: Rgb) -> Self {
        self.style.image_hint_font_size = font_size;
        self.style.image_hint_color = color;
        self
    }

    /// Build a fresh deck, one slide per record, in record order.
    ///
    /// Every record is rendered; an empty input yields an empty deck.
    pub fn build(&self, records: &[SlideRecord]) -> Deck {
        let mut deck = Deck::new();
        for record in records {
            deck.add_slide(renderer_for(record.role).render(record, &self.style));
        }
        log::debug!("Built deck with {} slides", deck.slide_count());
        deck
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SlideLayout;
    use crate::types::ContentLine;

    fn record_with_lines(number: i64, title: &str, lines: Vec<ContentLine>) -> SlideRecord {
        let mut record = SlideRecord::new(number, title);
        record.lines = lines;
        record
    }

    #[test]
    fn test_cover_slide() {
        let mut record = SlideRecord::new(1, "封面");
        record.cover_title = Some("人工智能".to_string());

        let deck = DeckBuilder::new().build(&[record]);
        let slide = &deck.slides[0];
        assert_eq!(slide.layout, SlideLayout::TitleSlide);
        assert_eq!(slide.title, "人工智能");
        assert_eq!(slide.subtitle.as_deref(), Some(""));
        assert!(slide.body.is_empty());
    }

    #[test]
    fn test_toc_flattens_levels() {
        let record = record_with_lines(
            2,
            "目录",
            vec![ContentLine::bullet("一", 0), ContentLine::bullet("二", 1)],
        );
        let deck = DeckBuilder::new().build(&[record]);
        let slide = &deck.slides[0];
        assert_eq!(slide.title, "目录");
        assert!(slide.body.iter().all(|p| p.level == 0));
        assert!(slide.body.iter().all(|p| p.font_size == Some(18)));
    }

    #[test]
    fn test_toc_font_scales_with_line_count() {
        let lines = (0..12).map(|i| ContentLine::bullet(format!("第{}章", i), 0)).collect();
        let deck = DeckBuilder::new().build(&[record_with_lines(2, "目录", lines)]);
        assert!(deck.slides[0].body.iter().all(|p| p.font_size == Some(17)));
    }

    #[test]
    fn test_body_styles() {
        let record = record_with_lines(
            3,
            "背景",
            vec![
                ContentLine::bullet("要点", 0),
                ContentLine::bullet("子项", 1),
                ContentLine::image_hint("图表示意图", 0),
            ],
        );
        let deck = DeckBuilder::new().build(&[record]);
        let body = &deck.slides[0].body;

        assert_eq!(body[0], Paragraph::new("要点", 0));
        assert_eq!(body[1], Paragraph::new("子项", 1));
        assert_eq!(
            body[2],
            Paragraph::new("图表示意图", 0)
                .with_font_size(10)
                .with_color(Rgb::GRAY)
                .into_image_hint()
        );
    }

    #[test]
    fn test_toc_image_hint_is_plain_entry() {
        let record = record_with_lines(
            2,
            "目录",
            vec![ContentLine::bullet("概述", 0), ContentLine::image_hint("总览图", 1)],
        );
        let deck = DeckBuilder::new().build(&[record]);
        let body = &deck.slides[0].body;

        assert_eq!(body[1], Paragraph::new("总览图", 0).with_font_size(18));
        assert!(!body[1].image_hint);
        assert_eq!(body[1].color, None);
    }

    #[test]
    fn test_indented_image_hint_rendered_at_top_level() {
        let record = record_with_lines(5, "架构", vec![ContentLine::image_hint("图", 1)]);
        let deck = DeckBuilder::new().build(&[record]);
        let hint = &deck.slides[0].body[0];

        assert_eq!(hint.level, 0);
        assert!(hint.image_hint);
        assert_eq!(hint.font_size, Some(IMAGE_HINT_FONT_SIZE));
    }

    #[test]
    fn test_custom_image_hint_style() {
        let record = record_with_lines(4, "案例", vec![ContentLine::image_hint("照片", 0)]);
        let deck = DeckBuilder::new()
            .with_image_hint_style(12, Rgb(90, 90, 90))
            .build(&[record]);
        assert_eq!(deck.slides[0].body[0].font_size, Some(12));
        assert_eq!(deck.slides[0].body[0].color, Some(Rgb(90, 90, 90)));
        assert!(deck.slides[0].body[0].image_hint);
    }

    #[test]
    fn test_layout_follows_role() {
        let records = [
            SlideRecord::new(1, "封面"),
            SlideRecord::new(2, "目录"),
            SlideRecord::new(3, "内容"),
        ];
        let deck = DeckBuilder::new().build(&records);
        for (record, slide) in records.iter().zip(&deck.slides) {
            assert_eq!(slide.layout, record.role.layout());
        }
    }

    #[test]
    fn test_empty_records() {
        assert!(DeckBuilder::new().build(&[]).is_empty());
    }

    #[test]
    fn test_body_with_no_lines_still_emitted() {
        let deck = DeckBuilder::new().build(&[SlideRecord::new(9, "参考资料")]);
        assert_eq!(deck.slide_count(), 1);
        assert!(deck.slides[0].body.is_empty());
    }
}

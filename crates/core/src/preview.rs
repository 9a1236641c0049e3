//! Plain-text preview of a built deck.
//!
//! Each slide becomes a block of lines, blocks separated by a blank line.

use crate::document::{Deck, Slide, SlideLayout};

/// Formatter for a readable text outline of a deck.
#[derive(Debug, Clone)]
pub struct PreviewFormatter {
    /// Whether to prefix each slide title with `[n]`.
    numbering: bool,
}

impl Default for PreviewFormatter {
    fn default() -> Self {
        Self { numbering: true }
    }
}

impl PreviewFormatter {
    /// Create a new formatter with slide numbering enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the `[n]` prefix on slide titles.
    pub fn with_numbering(mut self, numbering: bool) -> Self {
        self.numbering = numbering;
        self
    }

    /// Render the deck as text.
    ///
    /// # Example output
    /// ```text
    /// [1] 人工智能
    /// 改变世界的技术
    ///
    /// [2] 目录
    /// - 发展历程
    /// - 应用场景
    /// ```
    pub fn format(&self, deck: &Deck) -> String {
        deck.slides
            .iter()
            .enumerate()
            .map(|(idx, slide)| self.format_slide(idx + 1, slide))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Render the deck, adding a trailing newline to non-empty output.
    pub fn format_with_newline(&self, deck: &Deck) -> String {
        let formatted = self.format(deck);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }

    fn format_slide(&self, position: usize, slide: &Slide) -> String {
        let mut lines = Vec::with_capacity(slide.body.len() + 2);

        if self.numbering {
            lines.push(format!("[{}] {}", position, slide.title));
        } else {
            lines.push(slide.title.clone());
        }

        if slide.layout == SlideLayout::TitleSlide {
            if let Some(subtitle) = slide.subtitle.as_deref().filter(|s| !s.is_empty()) {
                lines.push(subtitle.to_string());
            }
        }

        for paragraph in &slide.body {
            let indent = "  ".repeat(paragraph.level as usize);
            if paragraph.image_hint {
                lines.push(format!("{}[{}]", indent, paragraph.text));
            } else {
                lines.push(format!("{}- {}", indent, paragraph.text));
            }
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Paragraph, Rgb};

    fn sample_deck() -> Deck {
        let mut deck = Deck::new();
        deck.add_slide(Slide::title_slide("人工智能", "改变世界的技术"));

        let mut content = Slide::title_and_content("背景");
        content.add_paragraph(Paragraph::new("要点", 0));
        content.add_paragraph(Paragraph::new("子项", 1));
        content.add_paragraph(
            Paragraph::new("图表示意图", 0)
                .with_font_size(10)
                .with_color(Rgb::GRAY)
                .into_image_hint(),
        );
        deck.add_slide(content);
        deck
    }

    #[test]
    fn test_format_empty() {
        let formatter = PreviewFormatter::new();
        assert_eq!(formatter.format(&Deck::new()), "");
        assert_eq!(formatter.format_with_newline(&Deck::new()), "");
    }

    #[test]
    fn test_format_deck() {
        let expected = "[1] 人工智能\n改变世界的技术\n\n[2] 背景\n- 要点\n  - 子项\n[图表示意图]";
        assert_eq!(PreviewFormatter::new().format(&sample_deck()), expected);
    }

    #[test]
    fn test_format_without_numbering() {
        let output = PreviewFormatter::new()
            .with_numbering(false)
            .format(&sample_deck());
        assert!(output.starts_with("人工智能\n"));
        assert!(output.contains("\n\n背景\n"));
    }

    #[test]
    fn test_empty_subtitle_omitted() {
        let mut deck = Deck::new();
        deck.add_slide(Slide::title_slide("标题", ""));
        assert_eq!(PreviewFormatter::new().format(&deck), "[1] 标题");
    }

    #[test]
    fn test_format_with_trailing_newline() {
        let result = PreviewFormatter::new().format_with_newline(&sample_deck());
        assert!(result.ends_with('\n'));
    }
}

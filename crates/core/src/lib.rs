//! Slide-deck compiler: recovers slide records from generated text and
//! builds a presentation document tree from them.

pub mod builder;
pub mod document;
pub mod error;
pub mod font;
pub mod parser;
pub mod pipeline;
pub mod preview;
pub mod prompt;
pub mod types;

pub use builder::{renderer_for, DeckBuilder, RenderStyle, SlideRenderer};
pub use document::{Deck, Paragraph, Rgb, Slide, SlideLayout};
pub use error::{Error, Result};
pub use font::toc_font_size;
pub use parser::{BlockError, BlockParser, Diagnostic, ParseReport};
pub use pipeline::{
    compile, default_output_filename, generate, Compilation, DocumentWriter, Generation,
    TextProducer,
};
pub use preview::PreviewFormatter;
pub use prompt::{PromptTemplate, DEFAULT_SLIDE_COUNT, SLIDE_COUNT_RANGE};
pub use types::{ContentLine, CoverField, LineKind, SlideRecord, SlideRole};

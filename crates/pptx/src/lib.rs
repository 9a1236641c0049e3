//! PPTX (Office Open XML) backend for slide decks.
//!
//! Writes a built deck as a .pptx package (a ZIP archive of XML parts) and
//! reads written packages back for inspection.

pub mod reader;
pub mod template;
pub mod writer;

pub use reader::{PptxReader, ReadParagraph, ReadShape, ReadSlide};
pub use writer::{Part, PptxWriter};

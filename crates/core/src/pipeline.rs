//! Generation pipeline: producer text → records → deck.
//!
//! The text producer and the document writer are collaborators behind
//! traits; the compile step itself is pure.

use crate::builder::DeckBuilder;
use crate::document::Deck;
use crate::error::Result;
use crate::parser::{BlockParser, Diagnostic};
use crate::prompt::PromptTemplate;
use crate::types::SlideRecord;
use std::path::Path;

/// Source of raw slide text.
pub trait TextProducer {
    /// Produce the raw text for a prompt. Failures are returned as-is.
    fn produce(&self, prompt: &PromptTemplate) -> Result<String>;
}

/// Persists a built deck.
pub trait DocumentWriter {
    fn write_to_path(&self, deck: &Deck, path: &Path) -> Result<()>;
}

/// Output of one compile pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub records: Vec<SlideRecord>,
    pub diagnostics: Vec<Diagnostic>,
    pub deck: Deck,
}

/// Raw producer text together with its compilation.
#[derive(Debug, Clone)]
pub struct Generation {
    pub raw: String,
    pub compilation: Compilation,
}

/// Parse and build in one step. Every call returns a new deck.
pub fn compile(raw: &str) -> Compilation {
    let report = BlockParser::new().parse_with_report(raw);
    let deck = DeckBuilder::new().build(&report.records);
    Compilation {
        records: report.records,
        diagnostics: report.diagnostics,
        deck,
    }
}

/// Ask the producer for `slide_count` slides about `topic` and compile
/// the answer.
///
/// A producer error is returned unchanged and nothing is built. A count
/// mismatch is only logged.
pub fn generate<P: TextProducer + ?Sized>(
    producer: &P,
    topic: &str,
    slide_count: usize,
) -> Result<Generation> {
    let prompt = PromptTemplate::new(topic, slide_count);
    log::debug!("Requesting {} slides about {:?}", slide_count, topic);

    let raw = producer.produce(&prompt)?;
    let compilation = compile(&raw);

    let parsed = compilation.records.len();
    if parsed != slide_count {
        log::warn!(
            "Requested {} slides but parsed {} ({} blocks dropped)",
            slide_count,
            parsed,
            compilation.diagnostics.len()
        );
    }

    Ok(Generation { raw, compilation })
}

/// Default output file name for a topic. Spaces and path separators become
/// underscores, so the name never points into another directory.
pub fn default_output_filename(topic: &str) -> String {
    format!(
        "{}_presentation.pptx",
        topic.replace([' ', '/', '\\'], "_")
    )
}

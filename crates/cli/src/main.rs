//! CLI tool for generating PowerPoint decks from AI-written outlines.

use anyhow::{bail, Context, Result};
use clap::Parser;
use slidegen_core::{
    compile, default_output_filename, generate, DocumentWriter, Generation, PreviewFormatter,
    DEFAULT_SLIDE_COUNT, SLIDE_COUNT_RANGE,
};
use slidegen_pptx::{PptxReader, PptxWriter, ReadSlide};
use slidegen_producer::{default_config_path, load_config, OpenRouterProducer, ProducerConfig};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Generate a PowerPoint deck about a topic.
#[derive(Parser, Debug)]
#[command(name = "slidegen")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Presentation topic
    #[arg(required_unless_present_any = ["input", "inspect"])]
    topic: Option<String>,

    /// Number of slides to request (5-50)
    #[arg(short = 'n', long, default_value_t = DEFAULT_SLIDE_COUNT, value_parser = parse_slide_count)]
    slides: usize,

    /// Compile previously generated text instead of calling the API
    #[arg(short, long, conflicts_with = "inspect")]
    input: Option<PathBuf>,

    /// Print the text outline of an existing .pptx file and exit
    #[arg(long)]
    inspect: Option<PathBuf>,

    /// Output file or directory (default: <topic>_presentation.pptx)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (default: slidegen.toml next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OpenRouter API key, overriding the config file
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Chat model, overriding the config file
    #[arg(long)]
    model: Option<String>,

    /// Print a text preview instead of writing a file
    #[arg(short, long)]
    print: bool,

    /// Also save the generated raw text to this file
    #[arg(long)]
    save_raw: Option<PathBuf>,

    /// Print parsed slide records as JSON
    #[arg(long)]
    dump_records: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Some(path) = &args.inspect {
        print!("{}", inspect_file(path)?);
        return Ok(());
    }

    let (topic, generation) = obtain_generation(&args)?;
    let compilation = &generation.compilation;

    if args.verbose {
        eprintln!(
            "  Parsed {} slides ({} blocks dropped)",
            compilation.records.len(),
            compilation.diagnostics.len()
        );
    }

    if let Some(path) = &args.save_raw {
        write_output(path, &generation.raw)?;
        if args.verbose {
            eprintln!("Raw text written to: {}", path.display());
        }
    }

    if args.dump_records {
        let json = serde_json::to_string_pretty(&compilation.records)
            .context("Failed to serialize slide records")?;
        println!("{}", json);
    }

    if args.print {
        print!("{}", PreviewFormatter::new().format_with_newline(&compilation.deck));
        return Ok(());
    }

    let output_path = get_output_path(&topic, args.output.as_ref())?;
    PptxWriter::new()
        .write_to_path(&compilation.deck, &output_path)
        .with_context(|| format!("Failed to save {}", output_path.display()))?;

    if args.verbose {
        eprintln!("Written to: {}", output_path.display());
    } else {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Get raw text from a file or the producer, and compile it.
fn obtain_generation(args: &Args) -> Result<(String, Generation)> {
    if let Some(input_path) = &args.input {
        if args.verbose {
            eprintln!("Compiling: {}", input_path.display());
        }
        let raw = std::fs::read_to_string(input_path)
            .with_context(|| format!("Failed to read {}", input_path.display()))?;
        let topic = args.topic.clone().unwrap_or_else(|| {
            input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output")
                .to_string()
        });
        let compilation = compile(&raw);
        return Ok((topic, Generation { raw, compilation }));
    }

    let topic = match &args.topic {
        Some(topic) if !topic.trim().is_empty() => topic.trim().to_string(),
        _ => bail!("A topic is required"),
    };

    let producer = OpenRouterProducer::new(producer_config(args)?)
        .context("Failed to set up the text producer")?;

    if args.verbose {
        eprintln!("Generating {} slides about {:?}", args.slides, topic);
    }

    let generation = generate(&producer, &topic, args.slides).context("Generation failed")?;
    Ok((topic, generation))
}

/// Load the config file and apply command-line overrides.
fn producer_config(args: &Args) -> Result<ProducerConfig> {
    let path = args.config.clone().unwrap_or_else(default_config_path);

    let mut config = if path.exists() {
        load_config(&path)?
    } else if args.config.is_some() {
        bail!("Config file not found: {}", path.display());
    } else {
        log::debug!("No config file at {}; using defaults", path.display());
        ProducerConfig::default()
    };

    if let Some(api_key) = &args.api_key {
        config.api_key = api_key.clone();
    }
    if let Some(model) = &args.model {
        config.model = model.clone();
    }

    Ok(config)
}

/// Parse and range-check the slide count.
fn parse_slide_count(value: &str) -> std::result::Result<usize, String> {
    let count: usize = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if SLIDE_COUNT_RANGE.contains(&count) {
        Ok(count)
    } else {
        Err(format!(
            "slide count must be between {} and {}",
            SLIDE_COUNT_RANGE.start(),
            SLIDE_COUNT_RANGE.end()
        ))
    }
}

/// Read a .pptx file and render its text outline.
fn inspect_file(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let slides = PptxReader::new()
        .read(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(format_inspection(&slides))
}

/// One block per slide: `[n] title`, then every other paragraph.
fn format_inspection(slides: &[ReadSlide]) -> String {
    let mut output = String::new();
    for slide in slides {
        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("[{}] {}\n", slide.number, slide.title().unwrap_or_default()));

        let others = slide
            .shapes
            .iter()
            .filter(|s| !matches!(s.placeholder.as_deref(), Some("title" | "ctrTitle")));
        for shape in others {
            for paragraph in shape.paragraphs.iter().filter(|p| !p.text.is_empty()) {
                let indent = "  ".repeat(paragraph.level as usize);
                output.push_str(&format!("{}{}\n", indent, paragraph.text));
            }
        }
    }
    output
}

/// Determine the output path, creating its directory.
fn get_output_path(topic: &str, output: Option<&PathBuf>) -> Result<PathBuf> {
    let output_path = match output {
        Some(path) if path.is_dir() => path.join(default_output_filename(topic)),
        Some(path) => path.clone(),
        None => PathBuf::from(default_output_filename(topic)),
    };

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }

    Ok(output_path)
}

/// Write text to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegen_pptx::{ReadParagraph, ReadShape};

    #[test]
    fn test_parse_slide_count() {
        assert_eq!(parse_slide_count("10"), Ok(10));
        assert_eq!(parse_slide_count("5"), Ok(5));
        assert_eq!(parse_slide_count("50"), Ok(50));
        assert!(parse_slide_count("4").is_err());
        assert!(parse_slide_count("51").is_err());
        assert!(parse_slide_count("ten").is_err());
    }

    #[test]
    fn test_args_require_topic_or_input() {
        assert!(Args::try_parse_from(["slidegen"]).is_err());
        assert!(Args::try_parse_from(["slidegen", "人工智能"]).is_ok());
        assert!(Args::try_parse_from(["slidegen", "--input", "raw.txt"]).is_ok());
        assert!(Args::try_parse_from(["slidegen", "--inspect", "deck.pptx"]).is_ok());
        assert!(Args::try_parse_from(["slidegen", "AI", "-n", "3"]).is_err());
    }

    #[test]
    fn test_default_output_path() {
        let path = get_output_path("machine learning", None).unwrap();
        assert_eq!(path, PathBuf::from("machine_learning_presentation.pptx"));

        let path = get_output_path("TCP/IP", None).unwrap();
        assert_eq!(path, PathBuf::from("TCP_IP_presentation.pptx"));
        assert_eq!(path.parent(), Some(Path::new("")));
    }

    #[test]
    fn test_format_inspection() {
        let slides = vec![ReadSlide {
            number: 1,
            shapes: vec![
                ReadShape {
                    placeholder: Some("title".to_string()),
                    paragraphs: vec![ReadParagraph {
                        text: "目录".to_string(),
                        ..Default::default()
                    }],
                },
                ReadShape {
                    placeholder: Some("body".to_string()),
                    paragraphs: vec![
                        ReadParagraph {
                            text: "一".to_string(),
                            ..Default::default()
                        },
                        ReadParagraph {
                            text: "二".to_string(),
                            level: 1,
                            font_size: None,
                        },
                    ],
                },
            ],
        }];
        assert_eq!(format_inspection(&slides), "[1] 目录\n一\n  二\n");
    }
}

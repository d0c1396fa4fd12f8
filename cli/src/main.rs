//! docmap CLI - document outline and mind-map extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docmap::{
    Analyzer, ApiResponse, DocumentInput, JsonFormat, UploadedDocument, ValidationPolicy,
};

#[derive(Parser)]
#[command(name = "docmap")]
#[command(version)]
#[command(about = "Extract document text, infer outlines, and emit mind-map JSON", long_about = None)]
struct Cli {
    /// Also check the %PDF- magic bytes before extracting
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract text and metadata from a PDF
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit the extraction result as JSON instead of raw text
        #[arg(long)]
        json: bool,

        /// Print only the first 1000 characters of the text
        #[arg(long)]
        preview: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Infer a leveled outline from a PDF or raw text file
    Outline {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Treat the input as plain text even if it ends in .pdf
        #[arg(long)]
        raw: bool,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Build a positioned mind map from a PDF or raw text file
    Map {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Treat the input as plain text even if it ends in .pdf
        #[arg(long)]
        raw: bool,

        /// Seed for leaf placement, for a reproducible layout
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show validation and metadata summary
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let policy = if cli.strict {
        ValidationPolicy::TypeSizeAndSignature
    } else {
        ValidationPolicy::TypeAndSize
    };

    let result = match cli.command {
        Commands::Extract {
            input,
            output,
            json,
            preview,
            compact,
        } => cmd_extract(&input, output.as_deref(), json, preview, compact, policy).await,
        Commands::Outline {
            input,
            raw,
            output,
            compact,
        } => cmd_outline(&input, raw, output.as_deref(), compact, policy).await,
        Commands::Map {
            input,
            raw,
            seed,
            output,
            compact,
        } => cmd_map(&input, raw, seed, output.as_deref(), compact, policy).await,
        Commands::Info { input } => cmd_info(&input, policy).await,
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read a file into an upload, deriving the declared type from its extension.
fn load_upload(input: &Path) -> Result<UploadedDocument, Box<dyn std::error::Error>> {
    let bytes = fs::read(input)?;
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let media_type = if is_pdf_path(input) {
        "application/pdf"
    } else {
        "application/octet-stream"
    };
    log::debug!("loaded {} bytes from {}", bytes.len(), input.display());
    Ok(UploadedDocument::new(bytes, media_type, filename))
}

fn is_pdf_path(input: &Path) -> bool {
    input
        .extension()
        .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Load either input kind: PDF files become uploads, anything else (or
/// `--raw`) is read as plain text.
fn load_input(input: &Path, raw: bool) -> Result<DocumentInput, Box<dyn std::error::Error>> {
    if raw || !is_pdf_path(input) {
        Ok(DocumentInput::Text(fs::read_to_string(input)?))
    } else {
        Ok(DocumentInput::File(load_upload(input)?))
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn write_output(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn extraction_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting text...");
    pb
}

async fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    json: bool,
    preview: bool,
    compact: bool,
    policy: ValidationPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::new().with_policy(policy);
    let upload = load_upload(input)?;

    let pb = extraction_spinner();
    let ingested = analyzer.ingest(Some(upload)).await?;
    pb.finish_and_clear();

    if json {
        let response = ApiResponse::success(&ingested.extraction)?;
        return write_output(&response.to_json(json_format(compact))?, output);
    }

    let text = if preview {
        ingested.extraction.preview()
    } else {
        ingested.extraction.text.clone()
    };
    write_output(&text, output)
}

async fn cmd_outline(
    input: &Path,
    raw: bool,
    output: Option<&Path>,
    compact: bool,
    policy: ValidationPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::new().with_policy(policy);
    let outline = analyzer.outline(load_input(input, raw)?).await?;

    let response = ApiResponse::success(&outline)?;
    write_output(&response.to_json(json_format(compact))?, output)
}

async fn cmd_map(
    input: &Path,
    raw: bool,
    seed: Option<u64>,
    output: Option<&Path>,
    compact: bool,
    policy: ValidationPolicy,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut analyzer = Analyzer::new().with_policy(policy);
    if let Some(seed) = seed {
        analyzer = analyzer.with_seed(seed);
    }

    let outline = analyzer.outline(load_input(input, raw)?).await?;
    let map = analyzer.build_map(&outline);

    let response = ApiResponse::success(&map)?;
    write_output(&response.to_json(json_format(compact))?, output)
}

async fn cmd_info(input: &Path, policy: ValidationPolicy) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = Analyzer::new().with_policy(policy);
    let ingested = analyzer.ingest(Some(load_upload(input)?)).await?;
    let extraction = &ingested.extraction;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), extraction.title);
    println!("{}: {}", "Author".bold(), extraction.author);
    if let Some(created) = extraction.creation_date {
        println!("{}: {}", "Created".bold(), created.to_rfc3339());
    }
    println!("{}: {}", "Pages".bold(), extraction.page_count);
    println!("{}: {}", "Words".bold(), extraction.word_count);
    println!("{}: {}", "Outline lines".bold(), ingested.outline.len());
    if let Some(min) = ingested.outline.min_level() {
        println!(
            "{}: {} at level {}",
            "Main topics".bold(),
            ingested.outline.main_topics().len(),
            min
        );
    }

    Ok(())
}

fn cmd_version() {
    println!("docmap {}", env!("CARGO_PKG_VERSION"));
}

//! outpdf CLI - PDF outline and content extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use outpdf::{extract_file_with_options, ExtractOptions, JsonFormat, StrategyKind};

#[derive(Parser)]
#[command(name = "outpdf")]
#[command(version)]
#[command(about = "Extract PDF outlines and content to JSON", long_about = None)]
struct Cli {
    /// Input directory of PDFs
    #[arg(value_name = "IN_DIR")]
    in_dir: Option<PathBuf>,

    /// Output directory for JSON artifacts
    #[arg(value_name = "OUT_DIR")]
    out_dir: Option<PathBuf>,

    /// Heading signal strategy
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Apply the language-adaptive heading filter (size strategy)
    #[arg(long)]
    language_filter: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a directory of PDFs into per-document JSON artifacts
    Batch {
        /// Input directory of PDFs
        #[arg(value_name = "IN_DIR", default_value = "data/input_pdfs")]
        in_dir: PathBuf,

        /// Output directory for JSON artifacts
        #[arg(short, long, value_name = "DIR", default_value = "data/processed")]
        out_dir: PathBuf,

        /// Heading signal strategy
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// Apply the language-adaptive heading filter (size strategy)
        #[arg(long)]
        language_filter: bool,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Extract a single PDF to JSON
    Extract {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Heading signal strategy
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,

        /// Apply the language-adaptive heading filter (size strategy)
        #[arg(long)]
        language_filter: bool,

        /// Skip table detection
        #[arg(long)]
        no_tables: bool,
    },

    /// Show document information and the inferred outline
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Heading signal strategy
        #[arg(long, value_enum)]
        strategy: Option<Strategy>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Rank headings by font size
    Size,
    /// Rank headings by font-weight names
    Font,
    /// Font pass with size fallback (default)
    FontThenSize,
}

impl From<Strategy> for StrategyKind {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Size => StrategyKind::Size,
            Strategy::Font => StrategyKind::Font,
            Strategy::FontThenSize => StrategyKind::FontThenSize,
        }
    }
}

fn build_options(
    strategy: Option<Strategy>,
    language_filter: bool,
    sequential: bool,
) -> ExtractOptions {
    let mut options = ExtractOptions::new().with_language_filter(language_filter);
    if let Some(strategy) = strategy {
        options = options.with_strategy(strategy.into());
    }
    if sequential {
        options = options.sequential();
    }
    options
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            in_dir,
            out_dir,
            strategy,
            language_filter,
            sequential,
        }) => cmd_batch(
            &in_dir,
            &out_dir,
            build_options(strategy, language_filter, sequential),
        ),
        Some(Commands::Extract {
            input,
            output,
            compact,
            strategy,
            language_filter,
            no_tables,
        }) => {
            let options =
                build_options(strategy, language_filter, false).with_tables(!no_tables);
            cmd_extract(&input, output.as_deref(), compact, options)
        }
        Some(Commands::Info { input, strategy }) => {
            cmd_info(&input, build_options(strategy, false, false))
        }
        None => {
            // Default behavior: batch-process if an input directory is given
            if let Some(in_dir) = cli.in_dir {
                let out_dir = cli
                    .out_dir
                    .unwrap_or_else(|| PathBuf::from("data/processed"));
                cmd_batch(
                    &in_dir,
                    &out_dir,
                    build_options(cli.strategy, cli.language_filter, false),
                )
            } else {
                println!("{}", "Usage: outpdf <IN_DIR> [OUT_DIR]".yellow());
                println!("       outpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    in_dir: &Path,
    out_dir: &Path,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pdf_count = fs::read_dir(in_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false)
        })
        .count();

    let pb = ProgressBar::new(pdf_count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Processing PDFs...");

    let summary = outpdf::process_dir(in_dir, out_dir, &options)?;
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} document(s) -> {}",
        "Processed".green().bold(),
        summary.processed_count(),
        out_dir.display()
    );

    if !summary.is_clean() {
        println!("{} {} document(s):", "Failed".red().bold(), summary.failed_count());
        for (path, reason) in &summary.failed {
            println!("  {} {}: {}", "✗".red(), path.display(), reason);
        }
    }

    Ok(())
}

fn cmd_extract(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    options: ExtractOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = extract_file_with_options(input, options)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = outpdf::render::to_json(&content, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, options: ExtractOptions) -> Result<(), Box<dyn std::error::Error>> {
    let content = extract_file_with_options(input, options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), content.metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), content.metadata.page_count);
    println!("{}: {}", "Title".bold(), content.title);

    if let Some(ref author) = content.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = content.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = content.metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = content.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }

    println!();
    println!("{}", "Content".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text = content.plain_text();
    let words: usize = text.split_whitespace().count();
    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Tables".bold(), content.tables.len());
    println!("{}: {}", "Images".bold(), content.images.len());
    println!("{}: {}", "Links".bold(), content.links.len());

    if content.outline.is_empty() {
        println!("{}: none", "Outline".bold());
    } else {
        println!("{}:", "Outline".bold());
        for entry in &content.outline {
            let indent = "  ".repeat(entry.level.depth() as usize);
            println!("{}{} {} (p.{})", indent, entry.level, entry.text, entry.page);
        }
    }

    Ok(())
}

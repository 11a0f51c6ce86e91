//! pdf-outline CLI - heading outlines and persona section ranking

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::{
    extract_outline, read_lines, run_outline_batch_with_progress, run_persona_batch_with_progress,
    BatchConfig, BatchEvent, BatchReport, JsonFormat,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(version)]
#[command(about = "Extract heading outlines and rank sections for a persona", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a title/heading outline JSON for every PDF in a directory
    Outline(BatchArgs),

    /// Rank headings of each document group against its persona's task
    Persona(BatchArgs),

    /// Print the outline of a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the reconstructed logical lines of a PDF
    Lines {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct BatchArgs {
    /// Input directory
    #[arg(short, long, value_name = "DIR", env = "PDF_INPUT_DIR", default_value = "input")]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", env = "PDF_OUTPUT_DIR", default_value = "output")]
    output: PathBuf,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Process documents in parallel
    #[arg(long)]
    parallel: bool,
}

impl BatchArgs {
    fn config(&self) -> BatchConfig {
        let config = BatchConfig::new(&self.input, &self.output).with_parallel(self.parallel);
        if self.compact {
            config.compact()
        } else {
            config
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline(args) => cmd_outline(&args),
        Commands::Persona(args) => cmd_persona(&args),
        Commands::File {
            input,
            output,
            compact,
        } => cmd_file(&input, output.as_deref(), compact),
        Commands::Lines { input } => cmd_lines(&input),
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

fn progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

fn on_event(pb: &ProgressBar, event: &BatchEvent<'_>) {
    match event {
        BatchEvent::Started { total } => {
            pb.set_position(0);
            pb.set_length(*total as u64);
        }
        BatchEvent::DocumentDone { path, .. } => {
            if let Some(name) = path.file_name() {
                pb.set_message(name.to_string_lossy().into_owned());
            }
            pb.inc(1);
        }
    }
}

fn cmd_outline(args: &BatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.config();
    let pb = progress_bar();
    let progress = |event: &BatchEvent<'_>| on_event(&pb, event);
    let report = run_outline_batch_with_progress(&config, &progress)?;
    pb.finish_with_message("Done!");

    print_report("Outlines written:", &report);
    Ok(())
}

fn cmd_persona(args: &BatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.config();
    let pb = progress_bar();
    let progress = |event: &BatchEvent<'_>| on_event(&pb, event);
    let report = run_persona_batch_with_progress(&config, &progress)?;
    pb.finish_with_message("Done!");

    print_report("Reports written:", &report);
    Ok(())
}

fn print_report(heading: &str, report: &BatchReport) {
    println!("\n{}", heading.green().bold());
    for path in &report.written {
        println!("  {} {}", "├─".dimmed(), path.display());
    }

    if !report.skipped.is_empty() {
        println!("\n{}", "Skipped:".yellow().bold());
        for skipped in &report.skipped {
            println!(
                "  {} {} ({})",
                "├─".dimmed(),
                skipped.path.display(),
                skipped.reason
            );
        }
    }

    println!(
        "\n{} {} written, {} skipped",
        "Done!".green().bold(),
        report.written.len(),
        report.skipped.len()
    );
}

fn cmd_file(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = extract_outline(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = pdf_outline::render::to_json(&outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_lines(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let lines = read_lines(input)?;

    println!("{}", "Logical Lines".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for line in &lines {
        println!("{}", line);
    }
    println!("\n{}: {}", "Lines".bold(), lines.len());

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdf-outline".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF heading outline and persona ranking tool");
    println!();
    println!("License: MIT");
}

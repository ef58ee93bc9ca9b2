//! unoutline CLI - document title and outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::Log;
use rayon::prelude::*;

use unoutline::eval::{EvaluationReport, Evaluator, DEFAULT_SIMILARITY_THRESHOLD};
use unoutline::{source, write_json, Extractor, JsonFormat, Lexicon};

#[derive(Parser)]
#[command(name = "unoutline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract document titles and heading outlines", long_about = None)]
struct Cli {
    /// Input span dump or layout box file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the title and outline of one document
    Extract {
        /// Input span dump or layout box file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Custom lexicon (JSON)
        #[arg(long, value_name = "FILE", env = "UNOUTLINE_LEXICON")]
        lexicon: Option<PathBuf>,
    },

    /// Extract every *.json document in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Custom lexicon (JSON)
        #[arg(long, value_name = "FILE", env = "UNOUTLINE_LEXICON")]
        lexicon: Option<PathBuf>,
    },

    /// Show the document profile
    Profile {
        /// Input span dump or layout box file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare an extracted outline with a ground-truth outline
    Evaluate {
        /// Ground-truth JSON file
        #[arg(value_name = "GROUND_TRUTH")]
        ground_truth: PathBuf,

        /// Extracted outline JSON file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Similarity threshold
        #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f32,

        /// Only show the metrics summary
        #[arg(short, long)]
        quiet: bool,

        /// Save the detailed results as JSON
        #[arg(long, value_name = "FILE")]
        save_results: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() {
    let logger = env_logger::Builder::from_default_env().build();
    log::set_max_level(logger.filter());
    let logger: Arc<dyn Log> = Arc::new(logger);

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Extract {
            input,
            output,
            compact,
            lexicon,
        }) => cmd_extract(&logger, &input, output.as_deref(), compact, lexicon.as_deref()),
        Some(Commands::Batch {
            input,
            output,
            lexicon,
        }) => cmd_batch(&logger, &input, output.as_deref(), lexicon.as_deref()),
        Some(Commands::Profile { input, json }) => cmd_profile(&input, json),
        Some(Commands::Evaluate {
            ground_truth,
            output,
            threshold,
            quiet,
            save_results,
        }) => cmd_evaluate(&ground_truth, &output, threshold, quiet, save_results.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: extract if input is provided
            if let Some(input) = cli.input {
                cmd_extract(&logger, &input, None, false, None)
            } else {
                println!("{}", "Usage: unoutline <FILE>".yellow());
                println!("       unoutline --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_extractor(logger: &Arc<dyn Log>, lexicon: Option<&Path>) -> Result<Extractor, Box<dyn std::error::Error>> {
    let mut extractor = Extractor::new().with_logger(Arc::clone(logger));
    if let Some(path) = lexicon {
        extractor = extractor.with_lexicon(Arc::new(Lexicon::from_json_file(path)?));
    }
    Ok(extractor)
}

fn cmd_extract(
    logger: &Arc<dyn Log>,
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    lexicon: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let extractor = build_extractor(logger, lexicon)?;
    let result = extractor.extract_path(input);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    if let Some(path) = output {
        write_json(path, &result, format)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", unoutline::to_json(&result, format)?);
    }

    if result.is_failure() {
        eprintln!("{}: {}", "Warning".yellow().bold(), result.title);
    }

    Ok(())
}

/// `*.json` files directly inside `dir`, sorted by name.
fn collect_inputs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut inputs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")))
        .collect();
    inputs.sort();
    Ok(inputs)
}

fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_dir.join(format!("{}.json", stem))
}

fn cmd_batch(
    logger: &Arc<dyn Log>,
    input: &Path,
    output: Option<&Path>,
    lexicon: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.is_dir() {
        return Err(format!("Not a directory: {}", input.display()).into());
    }

    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let name = input.file_name().unwrap_or_default().to_string_lossy();
        input.with_file_name(format!("{}_outlines", name))
    });
    fs::create_dir_all(&output_dir)?;

    let inputs = collect_inputs(input)?;
    if inputs.is_empty() {
        println!("{} no *.json files in {}", "Nothing to do:".yellow(), input.display());
        return Ok(());
    }

    let extractor = build_extractor(logger, lexicon)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let failed = AtomicUsize::new(0);
    let write_errors: Vec<String> = inputs
        .par_iter()
        .filter_map(|path| {
            let result = extractor.extract_path(path);
            if result.is_failure() {
                failed.fetch_add(1, Ordering::Relaxed);
            }
            let target = output_path(&output_dir, path);
            let written = write_json(&target, &result, JsonFormat::Pretty);
            pb.set_message(path.file_name().unwrap_or_default().to_string_lossy().into_owned());
            pb.inc(1);
            written.err().map(|e| format!("{}: {}", target.display(), e))
        })
        .collect();

    pb.finish_with_message("Done!");

    let failed = failed.into_inner();
    println!("\n{}", "Batch Summary".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Documents".bold(), inputs.len());
    println!("{}: {}", "Extracted".bold(), (inputs.len() - failed).to_string().green());
    println!("{}: {}", "Failed".bold(), failed.to_string().red());
    println!("{}: {}", "Output".bold(), output_dir.display());

    if !write_errors.is_empty() {
        for e in &write_errors {
            eprintln!("{}: {}", "Write error".red(), e);
        }
        return Err(format!("{} results could not be written", write_errors.len()).into());
    }

    Ok(())
}

fn cmd_profile(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = source::read_path(input)?;
    let profile = Extractor::new().profile(&doc);

    if json {
        println!("{}", unoutline::to_json(&profile, JsonFormat::Pretty)?);
        return Ok(());
    }

    println!("{}", "Document Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), profile.page_count);
    println!("{}: {}", "Spans".bold(), doc.span_count());
    println!("{}: {}", "Type".bold(), profile.document_type);
    println!("{}: {:.1}pt", "Dominant size".bold(), profile.dominant_font_size);
    println!("{}: {}", "Primary script".bold(), profile.primary_script);
    println!(
        "{}: {}",
        "Numbered sections".bold(),
        if profile.has_numbered_sections { "Yes" } else { "No" }
    );
    println!(
        "{}: {}",
        "Hierarchical".bold(),
        if profile.has_hierarchical_structure { "Yes" } else { "No" }
    );

    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Metadata title".bold(), title);
    }

    println!();
    println!("{}", "Font Sizes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for size in profile.font_size_histogram.sizes_descending() {
        println!("  {:>6.1}pt  {}", size, profile.font_size_histogram.count(size));
    }

    if !profile.script_counts.is_empty() {
        println!();
        println!("{}", "Scripts".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for (script, count) in &profile.script_counts {
            println!("  {:<18} {}", script.to_string(), count);
        }
    }

    Ok(())
}

fn percent(value: f64) -> String {
    format!("{:.4} ({:.2}%)", value, value * 100.0)
}

fn print_report(report: &EvaluationReport) {
    let m = &report.metrics;

    println!("{}", "=".repeat(50));
    println!("{}", "HEADER EXTRACTION EVALUATION REPORT".cyan().bold());
    println!("{}", "=".repeat(50));

    println!("\n{}", "DATA SUMMARY:".bold());
    println!("Ground Truth Headers: {}", report.ground_truth_count);
    println!("Predicted Headers:    {}", report.predicted_count);
    println!("Similarity Threshold: {}", report.similarity_threshold);

    println!("\n{}", "METRICS:".bold());
    println!("{}", "-".repeat(30).dimmed());
    println!("Precision:       {}", percent(m.precision));
    println!("Recall:          {}", percent(m.recall));
    println!("F1 Score:        {}", percent(m.f1_score));
    println!("Accuracy:        {}", percent(m.accuracy));

    println!("\n{}", "CONFUSION MATRIX:".bold());
    println!("{}", "-".repeat(30).dimmed());
    println!("True Positives:  {}", m.true_positives);
    println!("False Positives: {}", m.false_positives);
    println!("False Negatives: {}", m.false_negatives);

    println!("\n{}", "DETAILED MATCHES:".bold());
    println!("{}", "-".repeat(30).dimmed());
    for (i, detail) in report.detailed_matches.iter().enumerate() {
        let status = if detail.is_match {
            "✓ MATCH".green()
        } else {
            "✗ NO MATCH".red()
        };
        println!("{}. {} (similarity: {:.3})", i + 1, status, detail.similarity);
        let gt = &detail.ground_truth;
        println!("   GT: [{}] \"{}\" (page {})", gt.level, gt.text, gt.page);
        match &detail.best_match {
            Some(pr) => println!("   PR: [{}] \"{}\" (page {})", pr.level, pr.text, pr.page),
            None => println!("   PR: {}", "No match found".dimmed()),
        }
        println!();
    }

    if !report.unmatched_predictions.is_empty() {
        println!("{}", "UNMATCHED PREDICTIONS:".bold());
        println!("{}", "-".repeat(30).dimmed());
        for (i, pr) in report.unmatched_predictions.iter().enumerate() {
            println!("{}. [{}] \"{}\" (page {})", i + 1, pr.level, pr.text, pr.page);
        }
    }
}

fn cmd_evaluate(
    ground_truth: &Path,
    output: &Path,
    threshold: f32,
    quiet: bool,
    save_results: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = Evaluator::new(threshold).evaluate_files(ground_truth, output)?;

    if quiet {
        let m = &report.metrics;
        println!("Precision: {:.4}", m.precision);
        println!("Recall: {:.4}", m.recall);
        println!("F1 Score: {:.4}", m.f1_score);
        println!("Accuracy: {:.4}", m.accuracy);
    } else {
        print_report(&report);
    }

    if let Some(path) = save_results {
        write_json(path, &report, JsonFormat::Pretty)?;
        println!("\n{} {}", "Detailed results saved to:".green(), path.display());
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document title and heading outline extraction tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unoutline".dimmed());
    println!("License: MIT");
}

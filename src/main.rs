use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use ollama_export::config::ExportConfig;
use ollama_export::export::{self, ExportPlan};
use ollama_export::inventory;
use ollama_export::manifest::digest_filename;
use ollama_export::select::{ModelSelector, PickerSelector, PromptSelector};

#[derive(Parser)]
#[command(
    name = "ollama-export",
    version = "0.1.0",
    about = "Export installed Ollama models into a portable directory tree",
    long_about = "Ollama Export - Copy installed models (manifest + blobs) into a\n\
                  relocatable directory tree for transfer to another machine\n\
                  \n\
                  Examples:\n\
                    # Interactive export into ./ollama\n\
                    ollama-export\n\
                    \n\
                    # Plain numbered prompt, custom destination\n\
                    ollama-export --plain --output-dir /mnt/usb/ollama\n\
                    \n\
                    # Export from a non-default store\n\
                    ollama-export --source-dir /var/lib/ollama"
)]
struct Cli {
    /// Ollama store root (defaults to the platform location)
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Destination directory for the exported tree
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Use the plain numbered prompt instead of the interactive picker
    #[arg(long)]
    plain: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    // Environment overrides fill in for flags that were not given
    let source_dir = cli.source_dir.or_else(|| env_path("OLLAMA_EXPORT_SOURCE_DIR"));
    let output_dir = cli.output_dir.or_else(|| env_path("OLLAMA_EXPORT_OUTPUT_DIR"));
    let config = ExportConfig::resolve(source_dir, output_dir);
    log::debug!("Source root: {}", config.source_root.display());
    log::debug!("Output root: {}", config.output_root.display());

    let models = inventory::installed_models().context("Failed to read the installed model list")?;
    if models.is_empty() {
        println!("{}", "No models found. Try running `ollama pull <model>` first.".yellow());
        return Ok(());
    }

    // The numbered prompt is the fallback on Windows; elsewhere the
    // dialoguer picker is the default unless --plain asks otherwise.
    let selector: Box<dyn ModelSelector> = if cli.plain || cfg!(target_os = "windows") {
        Box::new(PromptSelector)
    } else {
        Box::new(PickerSelector)
    };

    let selected = selector.select(&models)?;
    if selected.is_empty() {
        println!("No models selected.");
        return Ok(());
    }

    let plan = ExportPlan::build(&config, &selected)
        .context("Failed to resolve the selected models")?;

    print_plan(&config, &plan);

    if !confirm_copy(&config.output_root)? {
        return Ok(());
    }

    for planned in &plan.models {
        println!("\n{}", format!("--- Copying {} ---", planned.name).bright_cyan());
        match export::export_model(&config, planned) {
            Ok(report) => log::info!(
                "{}: {} blobs copied, {} skipped",
                planned.name,
                report.blobs_copied,
                report.blobs_skipped
            ),
            Err(e) => eprintln!("{}", format!("Error copying files for {}: {e}", planned.name).red()),
        }
    }

    let output = std::path::absolute(&config.output_root).unwrap_or_else(|_| config.output_root.clone());
    println!("\n{}", format!("✓ Files copied successfully to {}", output.display()).green());
    Ok(())
}

/// Show every manifest and blob path the export would touch, flagging
/// blobs currently missing on the source side.
fn print_plan(config: &ExportConfig, plan: &ExportPlan) {
    println!("\n{}", "--- Manifest and Blob Paths ---".bright_cyan());
    let blob_dir = config.blob_dir();
    for planned in &plan.models {
        println!("\nModel: {}", planned.name.bright_white());
        println!("Manifest: {}", planned.manifest_path.display());
        println!("Blobs:");
        for digest in &planned.digests {
            let blob_file = blob_dir.join(digest_filename(digest));
            println!("  {}", blob_file.display());
            if !blob_file.exists() {
                println!(
                    "    {}",
                    format!("⚠️  Warning: blob file missing ({})", blob_file.display()).yellow()
                );
            }
        }
    }
}

/// Ask for a y/n answer, looping until one is recognized.
fn confirm_copy(output_root: &Path) -> Result<bool> {
    let stdin = io::stdin();
    loop {
        print!(
            "\nDo you want to copy these files to {}? (y/n): ",
            output_root.display()
        );
        io::stdout().flush()?;

        let mut answer = String::new();
        if stdin.lock().read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please enter 'y' or 'n'."),
        }
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var).ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}

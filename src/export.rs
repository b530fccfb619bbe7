use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use crate::Result;
use crate::config::ExportConfig;
use crate::manifest::{self, ModelName, digest_filename};

/// Everything needed to copy one model, resolved up front.
#[derive(Debug, Clone)]
pub struct PlannedExport {
    pub name: String,
    pub manifest_path: PathBuf,
    pub digests: Vec<String>,
}

/// The set of selected models with their resolved manifests and digest
/// lists. Built once, consumed once; never persisted.
#[derive(Debug, Clone)]
pub struct ExportPlan {
    pub models: Vec<PlannedExport>,
}

impl ExportPlan {
    /// Resolve every selected name to its manifest and digest list.
    ///
    /// A name that does not split, a missing manifest, or unparseable
    /// manifest JSON fails the whole plan. Nothing has been copied at
    /// that point.
    pub fn build(config: &ExportConfig, names: &[String]) -> Result<Self> {
        let manifest_dir = config.manifest_dir();
        let mut models = Vec::with_capacity(names.len());
        for name in names {
            let parsed = ModelName::parse(name)?;
            let manifest_path = manifest::find_manifest(&manifest_dir, &parsed)?;
            let digests = manifest::read_digests(&manifest_path)?;
            log::debug!("{}: {} digests from {}", name, digests.len(), manifest_path.display());
            models.push(PlannedExport {
                name: name.clone(),
                manifest_path,
                digests,
            });
        }
        Ok(Self { models })
    }
}

/// Copy counts for one exported model.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub blobs_copied: usize,
    pub blobs_skipped: usize,
}

/// Copy one model's manifest and referenced blobs into the output tree.
///
/// Failures here are per-model: the caller reports the error and moves on
/// to the remaining models. A missing source blob is only a skip notice,
/// never an error.
pub fn export_model(config: &ExportConfig, planned: &PlannedExport) -> Result<ExportReport> {
    let name = ModelName::parse(&planned.name)?;

    let dest_manifest_dir = config.output_manifest_dir().join(&name.base);
    let dest_blob_dir = config.output_blob_dir();
    fs::create_dir_all(&dest_manifest_dir)?;
    fs::create_dir_all(&dest_blob_dir)?;

    // The tag becomes a flat filename here, while the source store nests
    // it under a directory. The exported tree still resolves as a source
    // because lookups join the same two segments.
    let dest_manifest = dest_manifest_dir.join(&name.tag);
    println!("\nCopying manifest to {}...", dest_manifest.display());
    fs::copy(&planned.manifest_path, &dest_manifest)?;
    println!("  {} Manifest copied", "✓".green());

    let mut report = ExportReport::default();
    if planned.digests.is_empty() {
        return Ok(report);
    }

    println!("\nCopying blobs...");
    let pb = ProgressBar::new(planned.digests.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blobs")
            .unwrap()
            .progress_chars("#>-"),
    );

    let source_blob_dir = config.blob_dir();
    for digest in &planned.digests {
        let filename = digest_filename(digest);
        let source = source_blob_dir.join(&filename);
        if source.exists() {
            fs::copy(&source, dest_blob_dir.join(&filename))?;
            pb.println(format!("  {} {}", "✓".green(), filename));
            report.blobs_copied += 1;
        } else {
            pb.println(format!("  {} Skipped {} (file not found)", "✗".red(), filename));
            report.blobs_skipped += 1;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(report)
}

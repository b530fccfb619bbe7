use std::io::ErrorKind;
use std::process::Command;

use crate::{ExportError, Result};

/// One row of `ollama list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    pub name: String,
    pub id: String,
    pub size: String,
    pub modified: String,
}

/// Run `ollama list` and return the parsed inventory.
///
/// A missing executable or a non-zero exit is fatal; an empty inventory is
/// not an error.
pub fn installed_models() -> Result<Vec<ModelRow>> {
    let output = Command::new("ollama").arg("list").output().map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ExportError::OllamaNotFound
        } else {
            ExportError::Io(e)
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ExportError::ListCommand(stderr));
    }

    let models = parse_inventory(&String::from_utf8_lossy(&output.stdout));
    log::debug!("Found {} installed models", models.len());
    Ok(models)
}

/// Parse the tabular `ollama list` output.
///
/// The first line is a header. Data lines carry at least four
/// whitespace-separated fields: NAME, ID, SIZE (value and unit), then
/// free-form MODIFIED text. Shorter lines are dropped. Rows come back
/// sorted case-insensitively by name.
pub fn parse_inventory(text: &str) -> Vec<ModelRow> {
    let mut models: Vec<ModelRow> = text.lines().skip(1).filter_map(parse_row).collect();
    models.sort_by_key(|m| m.name.to_lowercase());
    models
}

fn parse_row(line: &str) -> Option<ModelRow> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }
    Some(ModelRow {
        name: parts[0].to_string(),
        id: parts[1].to_string(),
        size: format!("{} {}", parts[2], parts[3]),
        modified: parts[4..].join(" "),
    })
}

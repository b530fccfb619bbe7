use colored::*;
use dialoguer::{MultiSelect, Select, theme::ColorfulTheme};

use super::{COLUMNS, ModelSelector, SORT_KINDS, SortKind, format_header, format_row};
use crate::Result;
use crate::inventory::ModelRow;

/// Interactive selection backed by dialoguer: rows can be reordered by any
/// column, then marked with space and accepted with enter.
pub struct PickerSelector;

impl ModelSelector for PickerSelector {
    fn select(&self, models: &[ModelRow]) -> Result<Vec<String>> {
        let mut view: Vec<ModelRow> = models.to_vec();

        let mut sort_options = vec!["Listed order".to_string()];
        sort_options.extend(COLUMNS.iter().map(|c| format!("Sort by {}", c.to_lowercase())));

        let sort_choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Ordering")
            .default(0)
            .items(&sort_options)
            .interact()?;
        if sort_choice > 0 {
            sort_rows(&mut view, sort_choice - 1);
        }

        println!("     {}", format_header().bright_white());
        let items: Vec<String> = view.iter().map(format_row).collect();
        let marked = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Select model(s) to export")
            .items(&items)
            .interact()?;

        Ok(marked.into_iter().map(|i| view[i].name.clone()).collect())
    }
}

/// Order rows by one column according to its sort kind.
fn sort_rows(rows: &mut [ModelRow], column: usize) {
    match SORT_KINDS[column] {
        SortKind::Lexical => rows.sort_by_key(|m| column_value(m, column).to_lowercase()),
        SortKind::Size => {
            rows.sort_by(|a, b| size_bytes(&b.size).total_cmp(&size_bytes(&a.size)));
        }
        SortKind::Recency => rows.sort_by_key(|m| recency_seconds(&m.modified)),
    }
}

fn column_value(model: &ModelRow, column: usize) -> &str {
    match column {
        0 => &model.name,
        1 => &model.id,
        2 => &model.size,
        _ => &model.modified,
    }
}

/// Approximate byte count for a "<value> <unit>" size string. Unparseable
/// sizes sort as zero.
fn size_bytes(size: &str) -> f64 {
    let mut parts = size.split_whitespace();
    let Some(value) = parts.next().and_then(|v| v.parse::<f64>().ok()) else {
        return 0.0;
    };
    let scale = match parts.next().map(|u| u.to_ascii_uppercase()).as_deref() {
        Some("KB") => 1024.0,
        Some("MB") => 1024.0 * 1024.0,
        Some("GB") => 1024.0 * 1024.0 * 1024.0,
        Some("TB") => 1024.0 * 1024.0 * 1024.0 * 1024.0,
        _ => 1.0,
    };
    value * scale
}

/// Approximate age in seconds for "<n> <unit> ago" text. Anything
/// unparseable sorts last.
fn recency_seconds(modified: &str) -> u64 {
    let mut parts = modified.split_whitespace();
    let Some(count) = parts.next().and_then(|n| n.parse::<u64>().ok()) else {
        return u64::MAX;
    };
    let unit = match parts.next() {
        Some(unit) => unit.trim_end_matches('s').to_ascii_lowercase(),
        None => return u64::MAX,
    };
    let unit_seconds: u64 = match unit.as_str() {
        "second" => 1,
        "minute" => 60,
        "hour" => 3_600,
        "day" => 86_400,
        "week" => 604_800,
        "month" => 2_592_000,
        "year" => 31_536_000,
        _ => return u64::MAX,
    };
    count.saturating_mul(unit_seconds)
}

use colored::*;
use std::io::{self, BufRead, Write};

use super::{ModelSelector, format_header, format_row};
use crate::Result;
use crate::inventory::ModelRow;

/// Line-mode selection: a numbered table plus a comma-separated prompt.
/// Used on Windows and when the interactive picker is disabled.
pub struct PromptSelector;

impl ModelSelector for PromptSelector {
    fn select(&self, models: &[ModelRow]) -> Result<Vec<String>> {
        println!("\n{}", "Available models:".bright_cyan());
        println!("{:<4} {}", "#", format_header());
        println!("{}", "-".repeat(75));
        for (i, model) in models.iter().enumerate() {
            println!("{:<4} {}", i + 1, format_row(model));
        }

        let stdin = io::stdin();
        loop {
            print!(
                "\nSelect model number(s) (comma-separated for multiple, 'all' for all models, or press Enter to cancel): "
            );
            io::stdout().flush()?;

            let mut input = String::new();
            if stdin.lock().read_line(&mut input)? == 0 {
                // EOF behaves like cancel
                return Ok(Vec::new());
            }

            match parse_selection(&input, models.len()) {
                Ok(Selection::Cancel) => return Ok(Vec::new()),
                Ok(Selection::All) => {
                    return Ok(models.iter().map(|m| m.name.clone()).collect());
                }
                Ok(Selection::Rows(rows)) => {
                    return Ok(rows.into_iter().map(|i| models[i - 1].name.clone()).collect());
                }
                Err(message) => println!("{}", message.yellow()),
            }
        }
    }
}

/// Outcome of parsing one line of selection input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Cancel,
    All,
    /// 1-based row numbers in the order the user typed them.
    Rows(Vec<usize>),
}

/// Validate a selection line against a table of `row_count` rows.
///
/// Rejection covers the whole input: one bad entry and nothing is
/// accepted.
pub fn parse_selection(input: &str, row_count: usize) -> std::result::Result<Selection, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(Selection::Cancel);
    }
    if input.eq_ignore_ascii_case("all") {
        return Ok(Selection::All);
    }

    let mut rows = Vec::new();
    for token in input.split(',') {
        let number: usize = token
            .trim()
            .parse()
            .map_err(|_| "Please enter valid number(s) or 'all'.".to_string())?;
        if number < 1 || number > row_count {
            return Err(format!("Invalid choice: {number}. Try again."));
        }
        rows.push(number);
    }
    Ok(Selection::Rows(rows))
}

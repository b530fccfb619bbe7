pub mod picker;
pub mod prompt;

pub use picker::PickerSelector;
pub use prompt::PromptSelector;

use crate::Result;
use crate::inventory::ModelRow;

/// Column headers shared by both selection front-ends.
pub const COLUMNS: [&str; 4] = ["Name", "ID", "Size", "Modified"];

/// How a column orders rows when the picker sorts by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKind {
    /// Case-insensitive lexical order.
    Lexical,
    /// Numeric order on a "<value> <unit>" size string, largest first.
    Size,
    /// Most recently modified first, parsed from "<n> <unit> ago" text.
    Recency,
}

/// Sort kind per column, matching `COLUMNS`.
pub const SORT_KINDS: [SortKind; 4] = [
    SortKind::Lexical,
    SortKind::Lexical,
    SortKind::Size,
    SortKind::Recency,
];

/// Presents the inventory and returns the chosen model names.
///
/// An empty vec means cancelled / nothing selected; callers treat that as
/// a normal early exit, not an error. The orchestrator picks the concrete
/// implementation, never the component itself.
pub trait ModelSelector {
    fn select(&self, models: &[ModelRow]) -> Result<Vec<String>>;
}

pub(crate) fn format_header() -> String {
    format!(
        "{:<30} {:<15} {:<10} {:<15}",
        COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3]
    )
}

pub(crate) fn format_row(model: &ModelRow) -> String {
    format!(
        "{:<30} {:<15} {:<10} {:<15}",
        model.name, model.id, model.size, model.modified
    )
}

use tabled::{
    Table,
    settings::{
        Alignment, Modify, Style,
        format::Format,
        object::{Columns, Object, Rows},
    },
};

/// Emoji mappings for volume and replica states
pub struct EmojiFormatter;

impl EmojiFormatter {
    pub fn format_value(value: &str) -> String {
        match value.trim() {
            "Ready" => "✅ Ready".to_string(),
            "NotReady" => "❌ NotReady".to_string(),
            "InUse" => "🟢 InUse".to_string(),
            "Creating" | "Created" => format!("🟡 {value}"),
            s if s.starts_with("ToBe") => format!("🟠 {s}"),
            "Deleted" | "Cleaned" => format!("🗑️ {value}"),
            "Empty" | "<none>" => format!("❓ {value}"),
            _ => value.to_string(),
        }
    }

    /// Apply emoji formatting to a table column by index, leaving the header alone
    pub fn apply_to_column(mut table: Table, column_index: usize) -> Table {
        table.with(
            Modify::new(Columns::new(column_index..=column_index).not(Rows::first()))
                .with(Format::content(Self::format_value)),
        );
        table
    }
}

/// Centralized table theme configuration for consistent kubectl-like output
pub struct TableTheme;

impl TableTheme {
    /// Rounded borders, upper-case headers, left aligned cells
    pub fn apply_default(mut table: Table) -> Table {
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Format::content(|s| s.to_uppercase())))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table
    }

    /// Borderless, upper-case headers, like `kubectl get -o wide`
    pub fn apply_wide(mut table: Table) -> Table {
        table
            .with(Style::blank())
            .with(Modify::new(Rows::first()).with(Format::content(|s| s.to_uppercase())))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));
        table
    }
}

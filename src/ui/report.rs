//! Report rendering: a themed table for terminals, JSON for machines.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::deploy::NOT_AVAILABLE;
use crate::stats::StatEntry;

use super::table::Table;
use super::theme::PulseTheme;

/// One collected report, as rendered or serialized.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub heading: String,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<StatEntry>,
}

impl StatusReport {
    pub fn new(heading: impl Into<String>, generated_at: DateTime<Utc>, entries: Vec<StatEntry>) -> Self {
        Self {
            heading: heading.into(),
            generated_at,
            entries,
        }
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render the report as a heading followed by a table.
pub fn render_table(report: &StatusReport, theme: &PulseTheme) -> String {
    let mut table =
        Table::new(vec!["", "Stat", "Value", "Details"]).with_border_style(theme.border.clone());

    for entry in &report.entries {
        let details = details_for(entry);
        table.add_styled_row(vec![
            (
                PulseTheme::marker_for(entry.color),
                theme.style_for(entry.color).clone(),
            ),
            (entry.label.as_str(), theme.key.clone()),
            (entry.value.as_str(), theme.style_for(entry.color).clone()),
            (details.as_str(), theme.dim.clone()),
        ]);
    }

    format!("{}\n{}", theme.format_header(&report.heading), table.render())
}

/// Description, plus the exact time for entries that carry one.
fn details_for(entry: &StatEntry) -> String {
    let description = entry.description.as_deref().unwrap_or("");
    let title = entry
        .extra_attributes
        .get("title")
        .filter(|title| title.as_str() != NOT_AVAILABLE && title.as_str() != description);
    match title {
        Some(title) if description.is_empty() => title.clone(),
        Some(title) => format!("{} ({})", description, title),
        None => description.to_string(),
    }
}

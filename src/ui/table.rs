//! Table rendering for formatted output.

use console::{measure_text_width, Style};

/// A simple box-drawn table whose cells can carry a style.
///
/// Column widths are measured on the unstyled text, so styles never
/// break alignment.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<(String, Style)>>,
    column_widths: Vec<usize>,
    border: Style,
}

impl Table {
    /// Create a new table with the given headers.
    pub fn new(headers: Vec<&str>) -> Self {
        let headers: Vec<String> = headers.iter().map(|s| single_line(s)).collect();
        let column_widths = headers.iter().map(|h| measure_text_width(h)).collect();

        Self {
            headers,
            rows: Vec::new(),
            column_widths,
            border: Style::new(),
        }
    }

    /// Style used for borders and separators.
    pub fn with_border_style(mut self, style: Style) -> Self {
        self.border = style;
        self
    }

    /// Add an unstyled row.
    pub fn add_row(&mut self, row: Vec<&str>) {
        self.add_styled_row(row.into_iter().map(|cell| (cell, Style::new())).collect());
    }

    /// Add a row whose cells each carry a style.
    pub fn add_styled_row(&mut self, row: Vec<(&str, Style)>) {
        let row: Vec<(String, Style)> = row
            .into_iter()
            .map(|(cell, style)| (single_line(cell), style))
            .collect();

        for (i, (cell, _)) in row.iter().enumerate() {
            if i < self.column_widths.len() {
                self.column_widths[i] = self.column_widths[i].max(measure_text_width(cell));
            }
        }

        self.rows.push(row);
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render the table as a string.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(self.render_border('┌', '┬', '┐'));
        let header: Vec<(String, Style)> = self
            .headers
            .iter()
            .map(|h| (h.clone(), Style::new()))
            .collect();
        lines.push(self.render_row(&header));
        lines.push(self.render_border('├', '┼', '┤'));
        for row in &self.rows {
            lines.push(self.render_row(row));
        }
        lines.push(self.render_border('└', '┴', '┘'));

        lines.join("\n")
    }

    fn render_border(&self, left: char, mid: char, right: char) -> String {
        let mut s = String::new();
        s.push(left);

        for (i, width) in self.column_widths.iter().enumerate() {
            s.push_str(&"─".repeat(width + 2));
            if i < self.column_widths.len() - 1 {
                s.push(mid);
            }
        }

        s.push(right);
        self.border.apply_to(s).to_string()
    }

    fn render_row(&self, row: &[(String, Style)]) -> String {
        let bar = self.border.apply_to("│").to_string();
        let mut s = bar.clone();

        for (i, width) in self.column_widths.iter().enumerate() {
            let (cell, style) = match row.get(i) {
                Some((cell, style)) => (cell.as_str(), style),
                None => ("", &self.border),
            };
            let padding = " ".repeat(width - measure_text_width(cell));
            s.push_str(&format!(" {}{} {}", style.apply_to(cell), padding, bar));
        }

        s
    }
}

/// Cells hold one line each; runs of whitespace, newlines included,
/// become a single space.
fn single_line(cell: &str) -> String {
    cell.split_whitespace().collect::<Vec<_>>().join(" ")
}

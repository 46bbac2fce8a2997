//! Visual theme and styling.

use console::Style;

use crate::stats::StatColor;

/// Stackpulse's visual theme.
#[derive(Debug, Clone)]
pub struct PulseTheme {
    /// Style for success values and messages (green).
    pub success: Style,
    /// Style for warnings (orange).
    pub warning: Style,
    /// Style for danger values and errors (red bold).
    pub danger: Style,
    /// Style for neutral values (normal).
    pub neutral: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for headers (magenta bold).
    pub header: Style,
    /// Style for entry labels (bold).
    pub key: Style,
    /// Style for table borders (dim).
    pub border: Style,
}

impl Default for PulseTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            danger: Style::new().red().bold(),
            neutral: Style::new(),
            dim: Style::new().dim(),
            header: Style::new().bold().magenta(),
            key: Style::new().bold(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            danger: Style::new(),
            neutral: Style::new(),
            dim: Style::new(),
            header: Style::new(),
            key: Style::new(),
            border: Style::new(),
        }
    }

    /// Pick the theme for the current terminal and `--no-color`.
    pub fn detect(no_color: bool) -> Self {
        if !no_color && should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Style for an entry's value.
    pub fn style_for(&self, color: StatColor) -> &Style {
        match color {
            StatColor::Neutral => &self.neutral,
            StatColor::Warning => &self.warning,
            StatColor::Danger => &self.danger,
            StatColor::Success => &self.success,
        }
    }

    /// Status marker for an entry, readable without colors.
    pub fn marker_for(color: StatColor) -> &'static str {
        match color {
            StatColor::Neutral => "•",
            StatColor::Warning => "⚠",
            StatColor::Danger => "✗",
            StatColor::Success => "✓",
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.danger.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

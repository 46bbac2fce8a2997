//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for terminal usage
//! - [`MockUI`] for capturing output in tests
//! - Report rendering, spinners, tables, and theming
//!
//! # Example
//!
//! ```
//! use stackpulse::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_header("System Information");
//! ui.success("Configuration written");
//! assert!(ui.has_success("written"));
//! ```

pub mod mock;
pub mod report;
pub mod spinner;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use report::{render_table, StatusReport};
pub use spinner::ProgressSpinner;
pub use table::Table;
pub use terminal::TerminalUI;
pub use theme::{should_use_colors, PulseTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a collected status report.
    fn report(&mut self, report: &StatusReport);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Clear the screen before redrawing.
    fn clear(&mut self);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Stop and erase the spinner.
    fn finish(&mut self);
}

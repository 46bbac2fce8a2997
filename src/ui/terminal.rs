//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{render_table, ProgressSpinner, PulseTheme, SpinnerHandle, StatusReport, UserInterface};

/// Terminal UI implementation.
///
/// Messages and reports go to stdout; warnings, errors and spinners go to
/// stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PulseTheme,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(no_color: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: PulseTheme::detect(no_color),
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn report(&mut self, report: &StatusReport) {
        writeln!(self.out, "{}", render_table(report, &self.theme)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.is_interactive() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn clear(&mut self) {
        if self.out.is_term() {
            self.out.clear_screen().ok();
        }
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "{}", self.theme.format_header(title)).ok();
    }

    fn is_interactive(&self) -> bool {
        self.err.is_term() && !crate::shell::is_ci()
    }
}

//! Status output on stderr

use console::{style, Term};
use scicalc::core::{Notification, NotificationKind};

/// Writes status lines to stderr, keeping stdout for results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(&self.info_line(message));
    }

    /// Print a failure message, even in quiet mode
    pub fn failure(&self, message: &str) {
        let _ = self.term.write_line(&self.failure_line(message));
    }

    /// Print a calculator notification
    pub fn notification(&self, notification: &Notification) {
        let message = format!("{}: {}", notification.title, notification.detail);
        match notification.kind {
            NotificationKind::Info => self.info(&message),
            NotificationKind::Error => self.failure(&message),
        }
    }

    fn info_line(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        format!("{prefix} {message}")
    }

    fn failure_line(&self, message: &str) -> String {
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        format!("{prefix} {message}")
    }
}

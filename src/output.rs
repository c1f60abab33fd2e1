//! Terminal sinks for notifications and window titles.

use std::io::{IsTerminal, Write};

use admin_client::router::TitleSink;
use admin_client::util::notify::Notifier;

/// Prints notifications to stderr, one per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Sets the terminal window title through the OSC 0 escape when stderr is a
/// terminal. Titles are dropped otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalTitle;

impl TitleSink for TerminalTitle {
    fn set_title(&self, title: &str) {
        tracing::debug!(%title, "window title");
        let mut stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return;
        }
        if let Err(e) = write!(stderr, "\x1b]0;{}\x07", sanitize_title(title)).and_then(|()| stderr.flush()) {
            tracing::debug!(error = %e, "failed to set terminal title");
        }
    }
}

/// Strip control characters so a title cannot terminate the escape early.
fn sanitize_title(title: &str) -> String {
    title.chars().filter(|c| !c.is_control()).collect()
}

//! Time-based progress estimate shown while polling.
//!
//! The service exposes no completion percentage, so the bar advances one
//! percent every two seconds of wall-clock time and stops at 100.

use std::io::Write;
use std::time::Duration;

const SECONDS_PER_PERCENT: u64 = 2;
const BAR_WIDTH: usize = 50;

/// Estimated percent complete after `elapsed`, capped at 100.
pub fn estimate_percent(elapsed: Duration) -> u8 {
    (elapsed.as_secs() / SECONDS_PER_PERCENT).min(100) as u8
}

/// Clear the current line and draw `message [====    ] NN%`.
pub fn render_bar(message: &str, percent: u8) -> String {
    let percent = percent.min(100) as usize;
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "\r\x1b[K\r{message} [{}{}] {percent}%",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH - filled)
    )
}

/// Redraws the bar in place on stdout.
pub struct ProgressLine {
    message: String,
    enabled: bool,
}

impl ProgressLine {
    pub fn new(message: impl Into<String>, enabled: bool) -> Self {
        Self {
            message: message.into(),
            enabled,
        }
    }

    pub fn update(&self, elapsed: Duration) {
        if !self.enabled {
            return;
        }
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{}", render_bar(&self.message, estimate_percent(elapsed)));
        let _ = stdout.flush();
    }

    /// End the bar's line so later output starts on a fresh one.
    pub fn finish(&self) {
        if self.enabled {
            println!();
        }
    }
}

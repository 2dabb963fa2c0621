//! Progress indicators for lampstack.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Start a spinner with a message. Hidden when stderr is not a terminal.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn finish_clear(pb: &ProgressBar) {
    pb.finish_and_clear();
}

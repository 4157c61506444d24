//! Progress indicators for CLI operations
//!
//! Spinners draw to stderr and stay hidden when it is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Create a spinner for a pending request
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `future` while a spinner with `message` is shown
pub async fn with_spinner<F, T>(message: &str, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let spinner = create_spinner(message);
    let output = future.await;
    spinner.finish_and_clear();
    output
}

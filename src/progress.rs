//! Terminal progress indicators for upload and analysis

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const UPLOAD_TEMPLATE: &str = "{spinner:.green} {msg} [{bar:40.magenta/blue}] {pos:>3}%";
const SPINNER_TEMPLATE: &str = "{spinner:.magenta} {msg}";
const STEADY_TICK_MS: u64 = 120;

/// Percentage bar fed by the upload progress callback.
pub fn upload_bar(file_name: &str) -> ProgressBar {
    let style = ProgressStyle::with_template(UPLOAD_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓▒░  ");

    let bar = ProgressBar::new(100);
    bar.set_style(style);
    bar.set_message(format!("Uploading {}", file_name));
    bar
}

pub fn analysis_spinner() -> ProgressBar {
    let style = ProgressStyle::with_template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✓"]);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.enable_steady_tick(Duration::from_millis(STEADY_TICK_MS));
    spinner
}

/// Callback suitable for `ApiClient::upload_resume`.
pub fn bar_callback(bar: &ProgressBar) -> impl Fn(u8) + Send + Sync + 'static {
    let bar = bar.clone();
    move |percent| bar.set_position(u64::from(percent))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_callback_moves_position() {
        let bar = ProgressBar::hidden();
        bar.set_length(100);
        let callback = bar_callback(&bar);
        callback(40);
        callback(100);
        assert_eq!(bar.position(), 100);
    }
}

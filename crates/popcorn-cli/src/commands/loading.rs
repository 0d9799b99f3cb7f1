use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Run a request while a spinner shows `message`
///
/// Without a terminal the spinner is skipped and progress goes to the log.
pub async fn with_spinner<F, T>(message: impl Into<String>, fut: F) -> T
where
    F: Future<Output = T>,
{
    let message = message.into();
    if !is_interactive() {
        tracing::info!(operation = "loading", message = %message, "Request started");
        return fut.await;
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

use crate::output::Output;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal() && std::io::stderr().is_terminal()
}

/// Spinner for network calls. Hidden for JSON/quiet output and when not on a
/// terminal, where progress goes to the log instead.
pub struct Spinner {
    bar: Option<ProgressBar>,
}

impl Spinner {
    pub fn start(output: &Output, msg: impl Into<String>) -> Self {
        let msg = msg.into();
        if output.is_json() || output.is_quiet() || !is_interactive() {
            tracing::debug!(operation = "progress", message = %msg, "Progress update");
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        bar.set_message(msg);
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar: Some(bar) }
    }

    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Run `fut` behind a spinner
pub async fn with_spinner<T, F>(output: &Output, msg: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = Spinner::start(output, msg);
    let result = fut.await;
    spinner.finish();
    result
}

// file: src/pipeline/status.rs
// description: optional status sink contract with console and no-op implementations
// reference: uses indicatif for terminal progress rendering

use colored::{Color, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Fire-and-forget progress notifications from the pipeline to whatever
/// front end is watching. Implementations must not block; there is no
/// cancellation mechanism to interrupt them.
pub trait StatusSink: Send + Sync {
    fn update_status(&self, message: &str);
    fn update_button(&self, label: &str);
    fn update_button_highlighted(&self, label: &str, color: Color);
}

/// Headless sink: every notification is dropped.
pub struct NoopStatusSink;

impl StatusSink for NoopStatusSink {
    fn update_status(&self, _message: &str) {}
    fn update_button(&self, _label: &str) {}
    fn update_button_highlighted(&self, _label: &str, _color: Color) {}
}

/// Terminal sink: a spinner whose prefix tracks the action label and whose
/// message tracks the status box.
pub struct ConsoleStatusSink {
    bar: ProgressBar,
}

impl ConsoleStatusSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{prefix}] {msg}")
                .expect("Failed to create status spinner template"),
        );
        bar.enable_steady_tick(Duration::from_millis(120));
        bar.set_prefix("Ready");
        Self { bar }
    }
}

impl Default for ConsoleStatusSink {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for ConsoleStatusSink {
    fn update_status(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    fn update_button(&self, label: &str) {
        self.bar.set_prefix(label.to_string());
    }

    fn update_button_highlighted(&self, label: &str, color: Color) {
        self.bar.set_prefix(label.color(color).to_string());
    }
}

impl Drop for ConsoleStatusSink {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_accepts_all_notifications() {
        let sink = NoopStatusSink;
        sink.update_status("Downloading jar");
        sink.update_button("Ready");
        sink.update_button_highlighted("Remapping...", Color::Blue);
    }

    #[test]
    fn test_console_sink_is_object_safe() {
        let sink: Box<dyn StatusSink> = Box::new(ConsoleStatusSink::new());
        sink.update_status("Completed in 10 ms");
        sink.update_button("Ready");
    }
}

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

use crate::observer::{LoadEvent, LoadObserver, LoadPhase, TracingObserver};

const BAR_TEMPLATE: &str = "{spinner} [{bar:30}] {pos}/{len} {msg}";

/// Terminal progress for the command-line tool.
///
/// Shows a spinner while the page is fetched and a bar over the local
/// resources while they download. Every event is also passed on to `tracing`.
pub struct ProgressObserver {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn with_bar(&self, f: impl FnOnce(&mut Option<ProgressBar>)) {
        if let Ok(mut bar) = self.bar.lock() {
            f(&mut bar);
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadObserver for ProgressObserver {
    fn on_event(&self, event: &LoadEvent<'_>) {
        TracingObserver.on_event(event);

        match event {
            LoadEvent::PhaseEntered(LoadPhase::FetchingDocument) => self.with_bar(|bar| {
                let spinner = ProgressBar::new_spinner();
                spinner.set_message("Downloading page");
                spinner.enable_steady_tick(std::time::Duration::from_millis(100));
                *bar = Some(spinner);
            }),
            LoadEvent::ResourcesDiscovered { count } => self.with_bar(|bar| {
                if let Some(spinner) = bar.take() {
                    spinner.finish_and_clear();
                }
                if *count > 0 {
                    let progress = ProgressBar::new(*count as u64);
                    if let Ok(style) = ProgressStyle::default_bar().template(BAR_TEMPLATE) {
                        progress.set_style(style.progress_chars("=> "));
                    }
                    progress.set_message("Downloading resources");
                    *bar = Some(progress);
                }
            }),
            LoadEvent::ResourceSaved { url, .. } => self.with_bar(|bar| {
                if let Some(progress) = bar.as_ref() {
                    progress.println(format!("{} {}", "✔".green(), url));
                    progress.inc(1);
                }
            }),
            LoadEvent::ResourceFailed { url, error } => self.with_bar(|bar| {
                if let Some(progress) = bar.as_ref() {
                    progress.println(format!("{} {} ({})", "✖".red(), url, error));
                    progress.inc(1);
                }
            }),
            LoadEvent::PhaseEntered(LoadPhase::PersistingDocument) | LoadEvent::Failed { .. } => {
                self.with_bar(|bar| {
                    if let Some(progress) = bar.take() {
                        progress.finish_and_clear();
                    }
                })
            }
            _ => {}
        }
    }
}

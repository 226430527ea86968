//! Terminal progress display
//!
//! A spinner runs on stderr while a stage is in flight and is replaced by a
//! `✓`/`⚠`/`✗` line once it settles. The run summary goes to stdout so it can
//! be captured separately.

use std::sync::Mutex;
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::Error;
use crate::pipeline::{PipelineObserver, RunReport, Stage};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner-based observer for interactive runs
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn start_spinner(&self, message: &str) {
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());

        let bar = ProgressBar::new_spinner();
        bar.set_style(style);
        bar.set_message(format!("{}...", message));
        bar.enable_steady_tick(TICK_INTERVAL);

        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(previous) = slot.replace(bar) {
                previous.finish_and_clear();
            }
        }
    }

    fn clear_spinner(&self) {
        if let Ok(mut slot) = self.spinner.lock() {
            if let Some(bar) = slot.take() {
                bar.finish_and_clear();
            }
        }
    }

    /// Print a line above the spinner without disturbing it
    fn print_line(&self, line: String) {
        match self.spinner.lock() {
            Ok(slot) => match slot.as_ref() {
                Some(bar) => bar.suspend(|| eprintln!("{}", line)),
                None => eprintln!("{}", line),
            },
            Err(_) => eprintln!("{}", line),
        }
    }
}

impl PipelineObserver for ConsoleReporter {
    fn stage_started(&self, stage: Stage) {
        self.start_spinner(stage.label());
    }

    fn stage_succeeded(&self, _stage: Stage, message: &str) {
        self.clear_spinner();
        eprintln!("{} {}", "✓".green(), message);
    }

    fn stage_warned(&self, _stage: Stage, message: &str) {
        self.clear_spinner();
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    fn stage_failed(&self, stage: Stage, _error: &Error) {
        self.clear_spinner();
        eprintln!("{} {} failed", "✗".red(), stage.label());
    }

    fn warning(&self, message: &str) {
        self.print_line(format!("{} {}", "⚠".yellow(), message));
    }

    fn finished(&self, report: &RunReport) {
        self.clear_spinner();
        println!();
        for line in summary_lines(report) {
            println!("{}", line);
        }
    }
}

/// Human-readable summary of a finished run
pub fn summary_lines(report: &RunReport) -> Vec<String> {
    let name = report
        .collection_name
        .as_deref()
        .or(report.remote.name.as_deref())
        .unwrap_or("unnamed");

    let mut lines = vec![format!(
        "{} {} ({} requests)",
        "Collection:".bold(),
        name,
        report.request_count
    )];

    if report.preserved_name.is_none() {
        lines.push(format!(
            "{} {}",
            "Name:".bold(),
            "taken from the OpenAPI document".yellow()
        ));
    }

    lines.push(format!("{} {}", "Saved to:".bold(), report.output_path.display()));

    if let Some(uid) = &report.remote.uid {
        lines.push(format!("{} {}", "Remote UID:".bold(), uid));
    }

    lines
}

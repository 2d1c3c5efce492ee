//! Terminal UI: spinners, stage lines, and the closing summary.
//!
//! Every command is a short list of stages ("Delete", "Extract", …).  Each
//! stage runs behind a spinner and leaves a single ✓/✗ line behind; the
//! error of a failed stage is printed under its line and then returned to
//! the caller unchanged, so `main` still exits non-zero.
//!
//! ```no_run
//! let mut stages = Stages::new("Backup");
//! let n = stages.run("Archive", || write_archive(&src, &dst).map_err(Into::into))?;
//! stages.finish();
//! ```

use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

// ─── Icons ───────────────────────────────────────────────────────────────────

/// Braille spinner frames: same style as indicatif's default.
static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}
fn icon_skip() -> console::StyledObject<&'static str> {
    style("–").dim()
}
fn icon_done() -> console::StyledObject<&'static str> {
    style("✓").cyan().bold()
}

// ─── Stage result ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Done,
    Skipped,
    Failed,
}

/// The outcome of a single stage.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub label: String,
    pub status: StageStatus,
    /// Short result text shown after the label, e.g. `"12 files"`.
    pub detail: Option<String>,
    /// The error chain, for failed stages.
    pub error: Option<String>,
}

impl StageOutcome {
    pub fn print(&self) {
        let detail = self
            .detail
            .as_deref()
            .map(|d| format!("  {}", style(d).dim()))
            .unwrap_or_default();

        match self.status {
            StageStatus::Done => {
                println!("  {}  {}{detail}", icon_ok(), style(&self.label).bold());
            },
            StageStatus::Skipped => {
                println!("  {}  {}{detail}", icon_skip(), style(&self.label).dim());
            },
            StageStatus::Failed => {
                println!("  {}  {}", icon_err(), style(&self.label).bold());
                if let Some(ref msg) = self.error {
                    eprintln!();
                    eprintln!("  {} {}", style("Error:").red().bold(), msg);
                }
            },
        }
    }

    pub fn failed(&self) -> bool {
        self.status == StageStatus::Failed
    }
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("  {spinner:.cyan}  {msg}") {
        pb.set_style(spinner_style.tick_chars(SPINNER_CHARS));
    }
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ─── Stage runner ─────────────────────────────────────────────────────────────

/// Something that can describe its own result on the stage line.
pub trait StageDetail {
    fn detail(&self) -> Option<String> {
        None
    }
}

impl StageDetail for () {}

impl StageDetail for u64 {
    fn detail(&self) -> Option<String> {
        Some(format!("{self} bytes"))
    }
}

impl StageDetail for usize {
    fn detail(&self) -> Option<String> {
        Some(format!("{self} entries"))
    }
}

/// Ordered stages of one command.
pub struct Stages {
    title: String,
    outcomes: Vec<StageOutcome>,
}

impl Stages {
    pub fn new(title: &str) -> Self {
        println!();
        Self {
            title: title.to_string(),
            outcomes: Vec::new(),
        }
    }

    /// Run `work` behind a spinner, print its line, and hand its result back.
    ///
    /// On failure the summary is printed before the error is returned.
    pub fn run<T, F>(&mut self, label: &str, work: F) -> Result<T>
    where
        T: StageDetail,
        F: FnOnce() -> Result<T>,
    {
        let spinner = make_spinner(label);
        let result = work();
        spinner.finish_and_clear();

        let outcome = match &result {
            Ok(value) => StageOutcome {
                label: label.to_string(),
                status: StageStatus::Done,
                detail: value.detail(),
                error: None,
            },
            Err(e) => StageOutcome {
                label: label.to_string(),
                status: StageStatus::Failed,
                detail: None,
                error: Some(format!("{e:#}")),
            },
        };
        outcome.print();
        let failed = outcome.failed();
        self.outcomes.push(outcome);
        if failed {
            print_summary(&self.title, &self.outcomes);
        }
        result
    }

    /// Record a stage that did not need to run.
    pub fn skip(&mut self, label: &str, reason: &str) {
        let outcome = StageOutcome {
            label: label.to_string(),
            status: StageStatus::Skipped,
            detail: Some(reason.to_string()),
            error: None,
        };
        outcome.print();
        self.outcomes.push(outcome);
    }

    #[cfg(test)]
    pub fn outcomes(&self) -> &[StageOutcome] {
        &self.outcomes
    }

    /// Print the closing summary for a command that completed.
    pub fn finish(self) {
        print_summary(&self.title, &self.outcomes);
    }
}

// ─── Summary banner ───────────────────────────────────────────────────────────

/// Final banner: success line, or the list of failed stages.
pub fn print_summary(title: &str, outcomes: &[StageOutcome]) {
    let failed: Vec<&StageOutcome> = outcomes.iter().filter(|o| o.failed()).collect();
    println!();
    if failed.is_empty() {
        println!(
            "  {} {}",
            icon_done(),
            style(format!("{title} completed successfully.")).cyan().bold()
        );
    } else {
        eprintln!(
            "  {}  {}",
            icon_err(),
            style(format!("{title} failed.")).red().bold()
        );
        for o in &failed {
            eprintln!("    {} {}", icon_err(), style(&o.label).red());
        }
    }
    println!();
}

// ─── Tests ────────────────────────────────────────────────────────────────────

mod json;
mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::queries::MergeOutcome;
use miette::Result;
use std::path::PathBuf;

/// Output format for merge reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl ReportFormat {
    /// Resolve a config-file format name; unknown names fall back to
    /// terminal output.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => ReportFormat::Json,
            _ => ReportFormat::Terminal,
        }
    }
}

/// Reporter for presenting a merge outcome
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
    show_skipped: bool,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
            show_skipped: true,
        }
    }

    pub fn with_skipped(mut self, show: bool) -> Self {
        self.show_skipped = show;
        self
    }

    /// Report the merge outcome
    pub fn report(&self, outcome: &MergeOutcome) -> Result<()> {
        match &self.format {
            ReportFormat::Terminal => TerminalReporter::new()
                .with_skipped(self.show_skipped)
                .report(outcome),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(outcome),
        }
    }
}

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::queries::MergeOutcome;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn report(&self, outcome: &MergeOutcome) -> Result<()> {
        let report = JsonReport::from_outcome(outcome);
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;

        if let Some(path) = &self.output_path {
            std::fs::write(path, &json).into_diagnostic()?;
            println!("Report written to: {}", path.display());
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    created_queries: bool,
    added: JsonEntries<'a>,
    skipped: JsonEntries<'a>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonEntries<'a> {
    intents: &'a [String],
    packages: &'a [String],
}

#[derive(Serialize)]
struct JsonSummary {
    total_added: usize,
    total_skipped: usize,
    changed: bool,
}

impl<'a> JsonReport<'a> {
    fn from_outcome(outcome: &'a MergeOutcome) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            created_queries: outcome.created_queries,
            added: JsonEntries {
                intents: &outcome.added_intents,
                packages: &outcome.added_packages,
            },
            skipped: JsonEntries {
                intents: &outcome.skipped_intents,
                packages: &outcome.skipped_packages,
            },
            summary: JsonSummary {
                total_added: outcome.added(),
                total_skipped: outcome.skipped(),
                changed: outcome.changed(),
            },
        }
    }
}

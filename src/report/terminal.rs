use colored::Colorize;
use miette::Result;

use crate::queries::MergeOutcome;

/// Terminal reporter with colored output
pub struct TerminalReporter {
    /// List duplicate entries that were skipped
    show_skipped: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self { show_skipped: true }
    }

    pub fn with_skipped(mut self, show: bool) -> Self {
        self.show_skipped = show;
        self
    }

    pub fn report(&self, outcome: &MergeOutcome) -> Result<()> {
        if outcome.created_queries {
            println!("{}", "Created <queries> element".cyan());
        }

        for name in &outcome.added_intents {
            println!("  {} intent  {}", "+".green().bold(), name);
        }
        for name in &outcome.added_packages {
            println!("  {} package {}", "+".green().bold(), name);
        }

        if self.show_skipped {
            for name in &outcome.skipped_intents {
                println!(
                    "  {} intent  {} {}",
                    "=".dimmed(),
                    name.dimmed(),
                    "(already declared)".dimmed()
                );
            }
            for name in &outcome.skipped_packages {
                println!(
                    "  {} package {} {}",
                    "=".dimmed(),
                    name.dimmed(),
                    "(already declared)".dimmed()
                );
            }
        }

        println!();
        if outcome.added() > 0 {
            println!(
                "{}",
                format!(
                    "Added {} visibility entries ({} already declared)",
                    outcome.added(),
                    outcome.skipped()
                )
                .green()
                .bold()
            );
        } else {
            println!("{}", "Manifest already up to date!".green().bold());
        }

        Ok(())
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

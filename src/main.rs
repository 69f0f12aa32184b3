use clap::Parser;
use colored::Colorize;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::{debug, info, warn};

mod config;
mod discovery;
mod manifest;
mod queries;
mod report;
mod xml;

use config::Config;
use discovery::ManifestFinder;
use manifest::AndroidManifest;
use queries::merge_visibility;
use report::{ReportFormat, Reporter};

/// package-visibility - merge Android package visibility declarations into AndroidManifest.xml
#[derive(Parser, Debug)]
#[command(name = "package-visibility")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Manifest to merge into (overrides config and discovery)
    #[arg(short, long)]
    manifest: Option<PathBuf>,

    /// Print the merged manifest to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Exit with an error if the manifest is missing declared entries (for CI)
    #[arg(long)]
    check: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("package-visibility v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    run_merge(&config, &cli)
}

fn run_merge(config: &Config, cli: &Cli) -> Result<()> {
    if config.visibility.is_empty() {
        warn!("No visibility entries declared in the configuration");
    }

    let manifest_path = resolve_manifest_path(config, cli)?;
    info!("Merging into {}", manifest_path.display());

    let mut manifest = AndroidManifest::load(&manifest_path)?;
    if let Some(package) = manifest.package() {
        debug!("Loaded manifest for package {package}");
    }

    let outcome = merge_visibility(&mut manifest, &config.visibility).into_diagnostic()?;

    if cli.check {
        if outcome.changed() {
            return Err(miette::miette!(
                "{} is missing declared visibility entries",
                manifest_path.display()
            ));
        }
        if !cli.quiet {
            println!("{}", "Manifest is up to date.".green());
        }
        return Ok(());
    }

    if cli.dry_run {
        print!("{}", manifest.to_xml()?);
    } else if outcome.changed() {
        manifest.save(&manifest_path)?;
    } else {
        debug!("No changes, leaving {} untouched", manifest_path.display());
    }

    if !cli.quiet {
        let format = match &cli.format {
            Some(format) => format.clone().into(),
            None => ReportFormat::from_name(&config.report.format),
        };
        let reporter =
            Reporter::new(format, cli.output.clone()).with_skipped(config.report.show_skipped);
        reporter.report(&outcome)?;
    }

    Ok(())
}

fn resolve_manifest_path(config: &Config, cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.manifest {
        return Ok(path.clone());
    }
    if let Some(path) = &config.manifest {
        return Ok(cli.path.join(path));
    }
    let finder = ManifestFinder::new(config);
    finder.find_target(&cli.path)
}

fn load_config(cli: &Cli) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so --dry-run output stays clean
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, error, info};

use va_scc_batch::{
    config::Paths,
    core::progress::ProgressListener,
    export::export_gzip_json,
    logging::{self, LoggingConfig},
    progress::ProgressBarListener,
    va_scc::{VA_SCC_HEADERS, parse},
};

/// Convert the Virginia SCC business-entity CSV export into gzip-compressed JSON
#[derive(Parser, Debug)]
#[command(name = "parse-va-scc", version, about)]
struct Cli {
    /// Project root holding the cache/, config/, data/ and logs/ directories
    #[arg(long, env = "VA_SCC_HOME", default_value = ".")]
    root: PathBuf,

    /// CSV export to read (defaults to <root>/data/va_scc.csv)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Destination of the JSON export (defaults to <root>/data/va_scc.json.gz)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Minimum level written to the console and the log file
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,

    /// Do not draw a progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::from_root(&cli.root);
    paths
        .ensure_dirs()
        .with_context(|| format!("Unable to prepare {}", paths.root.display()))?;

    logging::init(&LoggingConfig::new(paths.log_file()).level(cli.log_level))?;

    let input = cli.input.unwrap_or_else(|| paths.default_input());
    let output = cli.output.unwrap_or_else(|| paths.default_output());

    let result = run(&input, &output, !cli.no_progress);
    if let Err(error) = &result {
        error!("{:#}", error);
    }
    result
}

fn run(input: &Path, output: &Path, show_progress: bool) -> Result<()> {
    info!("Converting {} into {}", input.display(), output.display());

    let bar = if show_progress {
        let total_bytes = fs::metadata(input)
            .with_context(|| format!("Unable to read {}", input.display()))?
            .len();
        let description = input.display().to_string();
        Some(ProgressBarListener::new(total_bytes, Some(description.as_str()))?)
    } else {
        None
    };

    let listener = bar.as_ref().map(|bar| bar as &dyn ProgressListener);
    let records = parse(input, VA_SCC_HEADERS, listener)
        .with_context(|| format!("Unable to parse {}", input.display()))?;

    if let Some(bar) = &bar {
        bar.finish(&format!("{} records", records.len()));
    }

    export_gzip_json(&records, output)
        .with_context(|| format!("Unable to write {}", output.display()))?;

    Ok(())
}

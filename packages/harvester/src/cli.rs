//! Command-line interface for the harvester.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::config::validate_query_url;
use crate::error::{HarvesterError, Result};
use crate::harvester::{download_examples, HarvestSummary};
use crate::types::Window;

/// Download usage examples from the Russian National Corpus.
#[derive(Debug, Parser)]
#[command(name = "ruscorpora-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Search URL: https://processing.ruscorpora.ru/search.xml?<query>
    #[arg(long)]
    pub url: String,

    /// Start from document INDEX
    #[arg(short, long, value_name = "INDEX", default_value_t = 1)]
    pub start: usize,

    /// Download examples from N documents (default: all)
    #[arg(short = 'n', value_name = "N")]
    pub count: Option<usize>,

    /// Write results to FILE (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write log to FILE (default: stderr)
    #[arg(short, long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Append results to the output FILE
    #[arg(short, long)]
    pub append: bool,

    /// Write verbose log
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn window(&self) -> Window {
        Window::new(self.start, self.count)
    }
}

/// Initialize tracing: WARN by default, INFO with `--verbose`, `RUST_LOG` wins.
pub fn init_logging(cli: &Cli) -> Result<()> {
    let default_level = if cli.verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

/// Run the CLI.
pub fn run(cli: Cli) -> Result<()> {
    // Validate before the output file is touched
    validate_query_url(&cli.url)?;
    if cli.start == 0 {
        return Err(HarvesterError::InvalidArgument(
            "start index must be at least 1".to_string(),
        ));
    }

    match cli.output.as_deref() {
        Some(path) => harvest_to_file(&cli, path),
        None => {
            let stdout = io::stdout();
            let out = BufWriter::new(stdout.lock());
            harvest_with(&cli, out, None).map(|_| ())
        }
    }
}

fn open_output(path: &Path, append: bool) -> Result<File> {
    let file = if append {
        OpenOptions::new().create(true).append(true).open(path)?
    } else {
        File::create(path)?
    };
    Ok(file)
}

/// Harvest into a file, showing a spinner on stderr.
fn harvest_to_file(cli: &Cli, path: &Path) -> Result<()> {
    let out = BufWriter::new(open_output(path, cli.append)?);

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message("Downloading first page...");
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let summary = match harvest_with(cli, out, Some(&pb)) {
        Ok(summary) => summary,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    eprintln!(
        "{} {} of {} documents ({} cases) to {}",
        style("Saved").green().bold(),
        style(summary.documents).cyan(),
        summary.stats.total_documents,
        summary.cases,
        path.display()
    );
    Ok(())
}

fn harvest_with<W: Write>(
    cli: &Cli,
    out: W,
    pb: Option<&ProgressBar>,
) -> Result<HarvestSummary> {
    download_examples(&cli.url, cli.window(), out, |document| {
        if let Some(pb) = pb {
            pb.set_message(format!(
                "Document {}: {} cases",
                document.index,
                document.cases.len()
            ));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://processing.ruscorpora.ru/search.xml?req=x";

    #[test]
    fn test_cli_parse_defaults() {
        let cli = Cli::parse_from(["ruscorpora-harvester", "--url", URL]);

        assert_eq!(cli.url, URL);
        assert_eq!(cli.start, 1);
        assert!(cli.count.is_none());
        assert!(cli.output.is_none());
        assert!(cli.log.is_none());
        assert!(!cli.append);
        assert!(!cli.verbose);
        assert_eq!(cli.window(), Window::default());
    }

    #[test]
    fn test_cli_parse_all_options() {
        let cli = Cli::parse_from([
            "ruscorpora-harvester",
            "--url",
            URL,
            "-s",
            "123",
            "-n",
            "456",
            "-o",
            "result.tsv",
            "-l",
            "harvest.log",
            "-a",
            "-v",
        ]);

        assert_eq!(cli.window(), Window::new(123, Some(456)));
        assert_eq!(cli.output, Some(PathBuf::from("result.tsv")));
        assert_eq!(cli.log, Some(PathBuf::from("harvest.log")));
        assert!(cli.append);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_requires_url() {
        assert!(Cli::try_parse_from(["ruscorpora-harvester"]).is_err());
    }

    #[test]
    fn test_open_output_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tsv");

        writeln!(open_output(&path, false).unwrap(), "first").unwrap();
        writeln!(open_output(&path, true).unwrap(), "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        writeln!(open_output(&path, false).unwrap(), "third").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "third\n");
    }
}

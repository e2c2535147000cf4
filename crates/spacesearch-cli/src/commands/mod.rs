use std::io::{self, Write};

use anyhow::{Context, Result, anyhow};
use spacesearch_core::config::DEFAULT_LOG_FILTER;
use spacesearch_core::{ResultRecord, SearchSettings, discover_indexes, open_spaces};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;

mod feedback;


use self::feedback::{Feedback, build_feedback, warning_feedback};

pub(crate) fn run(cli: Cli) -> Result<()> {
    let settings = SearchSettings::from_env();
    init_logging(
        settings
            .as_ref()
            .map_or(DEFAULT_LOG_FILTER, |settings| settings.log_filter.as_str()),
    )?;

    let query = cli.terms.join(" ");
    let outcome = settings
        .context("failed to load settings")
        .and_then(|settings| execute(&cli, settings));

    let feedback = match outcome {
        Ok((records, primary_space)) => build_feedback(&records, &primary_space, &query),
        Err(err) if cli.strict => return Err(err),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "search failed");
            warning_feedback(&err)
        }
    };
    print_json(&feedback)
}

fn execute(cli: &Cli, mut settings: SearchSettings) -> Result<(Vec<ResultRecord>, String)> {
    if let Some(dir) = &cli.index_dir {
        settings.index_dir.clone_from(dir);
    }
    if let Some(limit) = cli.limit {
        settings.result_limit = limit;
    }

    let indexes = discover_indexes(&settings.index_dir).context("discover indexes")?;
    let primary_space = indexes
        .first()
        .map(|index| index.space_id.clone())
        .unwrap_or_default();
    let spaces = open_spaces(&indexes).context("open indexes")?;
    let records = spacesearch_core::search_with_budget(&spaces, &cli.terms, settings.result_limit)
        .context("search")?;
    Ok((records, primary_space))
}

fn init_logging(fallback_filter: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|err| anyhow!("failed to set tracing subscriber: {err}"))
}

fn print_json(value: &Feedback) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}

use std::fs::File;
use std::io::{self, BufReader};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use repostruct::cli::{Cli, Format};
use repostruct::core::{write_json, write_text};
use repostruct::{BatchSummary, RealFileSystem, RepositoryList, check_repositories, load_schema};

const EXIT_FAILED: u8 = 1;
const EXIT_CONFIG: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(summary) if summary.all_ok() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(EXIT_FAILED),
        Err(err) => {
            eprintln!("repostruct: {err:#}");
            ExitCode::from(EXIT_CONFIG)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("REPOSTRUCT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(format!("repostruct={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<BatchSummary> {
    let schema_path = cli.schema_path();
    let schema = load_schema(&schema_path, cli.case.into())
        .context("the structure definition cannot be used")?;
    tracing::debug!(schema = %schema_path.display(), "structure definition loaded");

    let repositories = collect_repositories(&cli)?;
    if repositories.is_empty() {
        bail!("no repositories to check");
    }

    let reports = check_repositories(
        Arc::new(schema),
        Arc::new(RealFileSystem),
        cli.root.clone(),
        &repositories,
        usize::from(cli.jobs),
    )
    .await?;

    let mut stdout = io::stdout().lock();
    let written = match cli.format {
        Format::Text => write_text(&mut stdout, &reports),
        Format::Json => write_json(&mut stdout, &reports),
    };
    written.context("failed to write report")?;

    Ok(BatchSummary::from_reports(&reports))
}

fn collect_repositories(cli: &Cli) -> anyhow::Result<RepositoryList> {
    let mut repositories = RepositoryList::from_names(cli.repositories.iter().cloned());

    if let Some(list) = &cli.list {
        let from_list = if list.as_os_str() == "-" {
            RepositoryList::from_reader(io::stdin().lock())
        } else {
            let file = File::open(list)
                .with_context(|| format!("cannot open repository list {}", list.display()))?;
            RepositoryList::from_reader(BufReader::new(file))
        }
        .with_context(|| format!("cannot read repository list {}", list.display()))?;
        repositories.extend(from_list);
    }

    Ok(repositories)
}

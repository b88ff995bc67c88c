use std::env;
use std::process::ExitCode;

use log::error;
use recipe_ingest::collector::{collect_inputs, PageFetcher};
use recipe_ingest::{run, IngestConfig, IngestError, RecipePipeline, RunSummary};

const USAGE: &str = "Usage: recipe-ingest [--dry-run] [--db <path>] <records.json | url>...";

struct Args {
    dry_run: bool,
    database: Option<String>,
    inputs: Vec<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        dry_run: false,
        database: None,
        inputs: Vec::new(),
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dry-run" => args.dry_run = true,
            "--db" => args.database = Some(iter.next().ok_or("--db needs a path")?),
            "-h" | "--help" => return Err(USAGE.to_string()),
            _ => args.inputs.push(arg),
        }
    }

    if args.inputs.is_empty() {
        return Err(USAGE.to_string());
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            return ExitCode::from(2);
        }
    };

    match ingest(args).await {
        Ok(summary) if summary.is_success() => ExitCode::SUCCESS,
        Ok(summary) => {
            for failure in &summary.failed {
                error!("Failed: {} ({})", failure.url, failure.error);
            }
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn ingest(args: Args) -> Result<RunSummary, IngestError> {
    let mut config = IngestConfig::load()?;
    config.dry_run |= args.dry_run;
    if let Some(path) = args.database {
        config.database.path = path;
    }

    let fetcher = PageFetcher::new(&config.fetch)?;
    let collected = collect_inputs(&args.inputs, &fetcher).await;

    let mut pipeline = RecipePipeline::open(&config)?;
    let mut summary = run(&mut pipeline, &collected.records);
    pipeline.close()?;

    summary.failed.extend(collected.failures);
    Ok(summary)
}

use anyhow::{anyhow, Result};
use clap::Parser;
use colored::*;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use page_loader::observer::{LoadObserver, TracingObserver};
use page_loader::{LoadResult, LoaderCommand, PageLoader, PageLoaderError, ProgressObserver};

fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))
}

async fn run(args: &LoaderCommand) -> Result<LoadResult> {
    init_logging()?;

    let output_dir = args.output_dir()?;
    let loader = PageLoader::new(args.loader_config())?;

    let progress = ProgressObserver::new();
    let observer: &dyn LoadObserver = if args.quiet { &TracingObserver } else { &progress };

    Ok(loader.load(&args.url, &output_dir, observer).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = LoaderCommand::parse();

    match run(&args).await {
        Ok(result) => {
            if !result.failed_resources.is_empty() && !args.quiet {
                eprintln!(
                    "{} {} resource(s) could not be downloaded and keep their original URLs",
                    "⚠".yellow(),
                    result.failed_resources.len()
                );
            }
            println!("{}", result.html_file_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{} {}", "✖".red(), err);
            let code = err
                .downcast_ref::<PageLoaderError>()
                .map_or(1, |e| e.kind().exit_code());
            ExitCode::from(code)
        }
    }
}

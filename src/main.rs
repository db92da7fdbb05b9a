//! sparql-bench - A small benchmark harness for SPARQL endpoints.

use anyhow::Context;
use sparql_bench::cli::{Cli, Command, OutputArgs, RunArgs};
use sparql_bench::config::Config;
use sparql_bench::endpoint::HttpEndpoint;
use sparql_bench::error::BenchError;
use sparql_bench::recorder::RunRecorder;
use sparql_bench::{logging, repair, summary, template};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();
    logging::init_stderr_logging();

    if let Err(e) = run().await {
        match e.downcast_ref::<BenchError>() {
            Some(err) => error!("{}: {:#}", err.category(), e),
            None => error!("{:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    match &cli.command {
        Command::Run(args) => run_queries(args, &config).await,
        Command::Summary(args) => render_summary(args, &config),
        Command::FixNames(args) => fix_names(args, &config),
    }
}

async fn run_queries(args: &RunArgs, config: &Config) -> anyhow::Result<()> {
    let settings = args.resolve(config)?;

    let units = template::load_templates(&settings.queries)
        .with_context(|| format!("loading templates from {}", settings.queries.display()))?;
    let endpoint = HttpEndpoint::new(settings.endpoint)?;

    let summary = RunRecorder::new(&endpoint, &settings.output)
        .run(&units)
        .await?;
    println!(
        "{} queries: {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );
    Ok(())
}

fn render_summary(args: &OutputArgs, config: &Config) -> anyhow::Result<()> {
    let dir = args.resolve(config);
    let target = summary::write_summary(&dir)?;
    println!("{}", target.display());
    Ok(())
}

fn fix_names(args: &OutputArgs, config: &Config) -> anyhow::Result<()> {
    let dir = args.resolve(config);
    let renamed = repair::fix_artifact_names(&dir)?;
    println!("Renamed {renamed} files");
    Ok(())
}

//! Command-line front end for the job service.

use clap::{Parser, Subcommand};
use job_gateway::{JobClient, JobClientConfig, config::BASE_URI_ENV, prelude::Result};
use serde::Serialize;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Talk to the job service.
#[derive(Parser)]
#[command(name = "jobctl")]
#[command(about = "Create, list and inspect jobs on the job service")]
struct Cli {
    /// Job service base URI
    #[arg(long, env = BASE_URI_ENV, global = true)]
    base_uri: Option<String>,

    /// TOML file with a `base_uri` entry, takes precedence over `--base-uri`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List completed jobs
    List,

    /// Show the status of one job
    Get {
        /// Job identifier returned by `create`
        job_id: String,
    },

    /// Start a new job
    Create,
}

impl Cli {
    fn job_client_config(&self) -> Result<JobClientConfig> {
        if let Some(path) = &self.config {
            return JobClientConfig::from_file(path);
        }
        Ok(match &self.base_uri {
            Some(base_uri) => JobClientConfig::new(base_uri),
            None => JobClientConfig::from_env(),
        })
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = JobClient::new(cli.job_client_config()?);

    match cli.command {
        Commands::List => print_json(&client.get_jobs().await?),
        Commands::Get { job_id } => print_json(&client.get_job(&job_id).await?),
        Commands::Create => print_json(&client.create_job().await?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,job_gateway=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(Cli::parse()).await;

    if let Err(ref e) = result {
        error!("Error: {}", e);
    }

    result
}

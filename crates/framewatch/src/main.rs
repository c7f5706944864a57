use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use framewatch::report::render_report;
use framewatch::{router, AppState};
use framewatch_core::source::load_dataset;
use framewatch_core::{build_dashboard, DashboardConfig};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Camera downtime dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the event log once and serve the dashboard over HTTP
    Serve(ServeArgs),
    /// Run the pipeline once and print the aggregates
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Event CSV location (http(s) URL or local path); overrides the configuration
    #[arg(long)]
    source: Option<String>,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    #[command(flatten)]
    common: SourceArgs,
    /// Address to listen on, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<String>,
}

#[derive(Args, Debug, Default)]
struct ReportArgs {
    #[command(flatten)]
    common: SourceArgs,
    /// Print the dashboard data as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Report(args) => report(args).await,
    }
}

fn resolve_config(args: &SourceArgs) -> Result<DashboardConfig> {
    let mut config = DashboardConfig::load(args.config.as_deref())
        .context("failed to load dashboard configuration")?;
    if let Some(source) = &args.source {
        config.source.location = source.clone();
    }
    config.validate()?;
    Ok(config)
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = resolve_config(&args.common)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind))?;

    let dataset = load_dataset(&config)
        .await
        .with_context(|| format!("failed to load event log from {}", config.source.location))?;
    info!(
        rows = dataset.table.height(),
        skipped = dataset.skipped_rows,
        "event log loaded"
    );

    let app = router(AppState::new(config, dataset));

    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn report(args: ReportArgs) -> Result<()> {
    let config = resolve_config(&args.common)?;
    let dataset = load_dataset(&config)
        .await
        .with_context(|| format!("failed to load event log from {}", config.source.location))?;
    let data = build_dashboard(&dataset.table, &config.filter)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print!("{}", render_report(&data));
    }

    Ok(())
}

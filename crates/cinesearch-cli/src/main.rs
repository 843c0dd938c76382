//! cinesearch - OMDb title search CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use cinesearch_api::omdb::{OmdbClient, TypeFilter};
use cinesearch_engine::{SearchCriteria, SearchSession, SessionState, SubmitOutcome};

/// Public demo key used when no key is configured.
const DEMO_API_KEY: &str = "trilogy";

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search titles, 12 per page.
    Search(SearchArgs),
    /// Show the full record of one title.
    Detail(DetailArgs),
    /// Inspect or edit the config file.
    Config(ConfigCommand),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Search text (at least 2 characters).
    #[arg(long, required = true)]
    query: String,
    /// Media type filter: all, movie or series.
    #[arg(long = "type", default_value = "all")]
    type_filter: TypeFilter,
    /// Logical page (1-3).
    #[arg(long, default_value_t = 1)]
    page: u32,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// IMDb id (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file location and its values.
    Show,
    /// Store OMDb settings in the config file.
    Set(ConfigSetArgs),
}

/// Arguments for the `config set` subcommand.
#[derive(clap::Args)]
struct ConfigSetArgs {
    /// OMDb API key.
    #[arg(long)]
    api_key: Option<String>,
    /// OMDb base URL.
    #[arg(long)]
    base_url: Option<Url>,
}

/// Builds an `OmdbClient` from config and environment.
///
/// The API key comes from `OMDB_API_KEY`, then the config file, then the
/// public demo key.
///
/// # Errors
///
/// Returns an error if the configured base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let api_key = match std::env::var("OMDB_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => config.omdb.api_key.clone().unwrap_or_else(|| {
            tracing::warn!("no OMDb API key configured, using the public demo key");
            String::from(DEMO_API_KEY)
        }),
    };

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(raw) = config.omdb.base_url.as_deref() {
        let url = Url::parse(raw).with_context(|| format!("invalid omdb.base_url: {raw}"))?;
        builder = builder.base_url(url);
    }
    builder.build().context("failed to build OMDb client")
}

/// Creates a session and a task logging its state transitions at debug level.
fn start_session(
    client: OmdbClient,
) -> (SearchSession<OmdbClient>, tokio::task::JoinHandle<()>) {
    let session = SearchSession::new(Arc::new(client));
    let mut rx = session.subscribe();
    let watcher = tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            log_transition(&state);
        }
    });
    (session, watcher)
}

/// Logs one published state.
fn log_transition(state: &SessionState) {
    tracing::debug!(
        status = ?state.status,
        loading = state.loading,
        items = state.items.len(),
        total = state.total_count,
        error = state.error.as_deref().unwrap_or("-"),
        "session state changed"
    );
}

/// Loads the config selected by `--dir`.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let path = resolve_config_path(dir)?;
    AppConfig::load(&path)
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the search does not publish results.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(&load_config(dir)?)?;
    let (session, watcher) = start_session(client);

    let criteria = SearchCriteria::new(&args.query, args.type_filter, args.page);
    let outcome = session.submit_search(criteria).await;
    let state = session.snapshot();
    drop(session);
    watcher.await.context("state logger task failed")?;

    if outcome != SubmitOutcome::Published {
        bail!(
            "{}",
            state.error.as_deref().unwrap_or("search did not complete")
        );
    }

    tracing::info!("ID\t\tYear\t\tType\tTitle");
    for item in &state.items {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            item.id,
            item.year,
            item.media_type.label(),
            item.title,
        );
    }
    tracing::info!(
        "Page {} of {} (total {})",
        state.criteria.page,
        state.page_count(),
        state.total_count
    );

    Ok(())
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the lookup fails.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let client = build_omdb_client(&load_config(dir)?)?;
    let (session, watcher) = start_session(client);

    let outcome = session.fetch_detail(args.id.trim()).await;
    let state = session.snapshot();
    drop(session);
    watcher.await.context("state logger task failed")?;

    let Some(record) = state.detail.filter(|_| outcome == SubmitOutcome::Published) else {
        bail!(
            "{}",
            state.error.as_deref().unwrap_or("detail lookup did not complete")
        );
    };

    tracing::info!("{} ({})", record.title, record.year);
    tracing::info!("ID:        {}", record.id);
    tracing::info!("Type:      {}", record.media_type.label());
    tracing::info!("Rated:     {}", record.rated);
    tracing::info!(
        "Released:  {}",
        record
            .released_on()
            .map_or_else(|| record.released.clone(), |d| d.to_string())
    );
    tracing::info!("Runtime:   {}", record.runtime_label());
    tracing::info!("Genres:    {}", record.genres().join(", "));
    tracing::info!("Director:  {}", record.director);
    tracing::info!("Actors:    {}", record.actors);
    tracing::info!("IMDb:      {}", record.imdb_rating_label());
    for rating in &record.ratings {
        tracing::info!("  {}: {}", rating.source, rating.value);
    }
    tracing::info!("Plot:      {}", record.plot);
    tracing::info!("Poster:    {}", record.poster);

    Ok(())
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config path cannot be resolved or the file cannot be parsed.
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let path = resolve_config_path(dir)?;
    let config = AppConfig::load(&path)?;

    tracing::info!("Config:   {}", path.display());
    tracing::info!(
        "API key:  {}",
        if config.omdb.api_key.is_some() {
            "(set)"
        } else {
            "(not set)"
        }
    );
    tracing::info!(
        "Base URL: {}",
        config.omdb.base_url.as_deref().unwrap_or("(default)")
    );
    Ok(())
}

/// Runs the `config set` subcommand.
///
/// # Errors
///
/// Returns an error if nothing was given to set or the config cannot be written.
fn run_config_set(args: &ConfigSetArgs, dir: Option<&PathBuf>) -> Result<()> {
    if args.api_key.is_none() && args.base_url.is_none() {
        bail!("nothing to set: pass --api-key and/or --base-url");
    }

    let path = resolve_config_path(dir)?;
    let mut config = AppConfig::load(&path)?;
    if let Some(key) = &args.api_key {
        config.omdb.api_key = Some(key.clone());
    }
    if let Some(url) = &args.base_url {
        config.omdb.base_url = Some(url.to_string());
    }
    config.save(&path)?;

    tracing::info!("Saved {}", path.display());
    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    match cli.command {
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Detail(args) => run_detail(&args, cli.dir.as_ref()).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
            ConfigSubcommands::Set(args) => run_config_set(&args, cli.dir.as_ref()),
        },
    }
}

//! lexicon-daily - word-of-the-day daemon
//!
//! - `serve` (default): daily scheduler plus the retrieval HTTP API
//! - `run-once`: ensure today's words exist, then exit
//! - `build-corpus`: turn a raw delimited word list into the JSON corpus

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use lexicon_daily::http::{self, AppState};
use lexicon_daily::{
    AppConfig, CorpusError, DailyScheduler, DictionaryApiClient, EngineError, LookupError,
    SelectionEngine, Stores,
};
use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("lookup client error: {0}")]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Corpus(#[from] CorpusError),

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "lexicon-daily")]
#[command(about = "Word-of-the-day selection service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "LEXICON_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Log level (overrides config)
    #[arg(long)]
    log_level: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the scheduler and serve the HTTP API
    Serve,
    /// Ensure today's selection exists and exit
    RunOnce,
    /// Build the word corpus from a raw comma-delimited list
    BuildCorpus {
        /// Raw source file; the first field of each line is a candidate word
        #[arg(short, long)]
        input: PathBuf,
        /// Output JSON path (defaults to the configured corpus path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(listen) = cli.listen {
        config.server.listen_addr = listen;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }

    lexicon_daily::telemetry::init_tracing(&config.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::RunOnce => {
            let engine = build_engine(&config)?;
            let outcome = engine.ensure_today().await?;
            match serde_json::to_string_pretty(&outcome) {
                Ok(report) => println!("{}", report),
                Err(_) => println!("{:?}", outcome),
            }
            Ok(())
        }
        Command::BuildCorpus { input, output } => {
            let output = output.unwrap_or_else(|| config.storage.corpus_path.clone());
            let written = lexicon_daily::build_corpus_file(&input, &output)?;
            println!("wrote {} words to {}", written, output.display());
            Ok(())
        }
    }
}

fn build_engine(config: &AppConfig) -> Result<Arc<SelectionEngine>, AppError> {
    let stores = Stores::json_files(
        &config.storage.corpus_path,
        &config.storage.ledger_path,
        &config.storage.history_path,
    );
    let client = DictionaryApiClient::new(
        config.lookup.base_url.clone(),
        Duration::from_secs(config.lookup.timeout_secs),
    )?;
    Ok(Arc::new(SelectionEngine::new(stores, Arc::new(client))))
}

async fn serve(config: AppConfig) -> Result<(), AppError> {
    let engine = build_engine(&config)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = DailyScheduler::new(engine.clone(), &config.schedule).spawn(shutdown_rx);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        corpus = %config.storage.corpus_path.display(),
        history = %config.storage.history_path.display(),
        "lexicon-daily starting"
    );

    let result = http::serve(
        AppState::new(engine),
        config.server.listen_addr,
        shutdown_signal(),
    )
    .await;

    let _ = shutdown_tx.send(true);
    if let Err(e) = scheduler.await {
        tracing::error!(error = %e, "scheduler task ended abnormally");
    }
    tracing::info!("lexicon-daily stopped");

    result.map_err(AppError::from)
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}

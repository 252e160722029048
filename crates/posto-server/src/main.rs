//! Posto Ipiranga daemon
//!
//! Serves the ufo registry over HTTP, backed by PostgreSQL or by an
//! in-memory store.

mod config;
mod handlers;
mod lifecycle;
mod logging;
mod storage;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

use config::{GlobalArgs, HttpArgs, Settings};
use lifecycle::{Coordinator, Halt, LifecycleState};
use posto_core::{Endpoints, UfoService};

#[derive(Parser)]
#[command(name = "posto-ipirangad")]
#[command(author, version, about = "Ufo registry for Posto Ipiranga", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Http(HttpArgs),

    /// Print version information
    Version,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub endpoints: Endpoints,
    pub lifecycle: watch::Receiver<LifecycleState>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Version => {
            print_version();
            0
        }
        Commands::Http(args) => run_http(&cli.global, &args).await,
    };

    std::process::exit(code);
}

const CODE_NAME: &str = "posto-ipiranga-rs";
const READABLE_NAME: &str = "Posto Ipiranga";

fn print_version() {
    print!("{}", version_text());
}

/// `POSTO_BUILD_STAMP` is read at compile time, when the release build sets it.
fn version_text() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        "{READABLE_NAME} {version}\n{CODE_NAME}\n version: {version}\n target: {}/{}\n built at: {}\n",
        std::env::consts::OS,
        std::env::consts::ARCH,
        option_env!("POSTO_BUILD_STAMP").unwrap_or("unknown"),
    )
}

async fn run_http(global: &GlobalArgs, args: &HttpArgs) -> i32 {
    let settings = match Settings::load(global, args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("[FATAL] {:#}", e);
            return 1;
        }
    };

    if let Err(e) = logging::init(settings.json, settings.debug) {
        eprintln!("[FATAL] {:#}", e);
        return 1;
    }
    logging::install_panic_hook();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = std::process::id(),
        "Starting Posto Ipiranga"
    );

    let code = match serve(settings).await {
        Ok(halt) => halt.exit_code(),
        Err(e) => {
            error!("Server failed: {:#}", e);
            1
        }
    };

    info!(code, "terminated");
    code
}

/// Wire the stack together and block until the process has to stop.
async fn serve(settings: Settings) -> Result<Halt> {
    let store = storage::open(&settings).await?;
    let service = Arc::new(UfoService::new(store));

    let coordinator = Coordinator::new();
    let state = AppState {
        endpoints: Endpoints::new(service),
        lifecycle: coordinator.subscribe(),
    };
    let app = handlers::router(state);

    let addr = settings.listen_addr();
    let listener = async move {
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        info!(address = %addr, "Server ready to accept connections");
        axum::serve(listener, app).await.context("Server error")
    };

    let signals =
        lifecycle::signals::watch().context("Failed to subscribe to termination signals")?;

    Ok(coordinator.run(listener, signals).await)
}

use std::{
    io::ErrorKind,
    net::{IpAddr, SocketAddr, TcpListener},
    path::PathBuf,
    process::exit,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::{ArgAction, Parser, builder::BoolishValueParser};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::{AppState, CorsPolicy, Database, build_router, graceful_shutdown};

/// The REST API server for expense_tracker.
///
/// Every option can also be set with the environment variable named in its help text, or in a
/// `.env` file in the working directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. Created with default categories if it does
    /// not exist.
    #[arg(long, env = "DB_PATH", default_value = "accounting.db")]
    db_path: PathBuf,

    /// Directory containing the built frontend (`index.html` and its assets).
    #[arg(long, env = "DIST_DIR", default_value = "web_frontend/dist")]
    dist_dir: PathBuf,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5002)]
    port: u16,

    /// Enable debug logging and allow requests from any origin. On by default, pass
    /// `--debug=false` or set `DEBUG=0` in production.
    ///
    /// Accepts `true`/`false`, `1`/`0`, `t`/`f`, `yes`/`no` and `on`/`off` in any case.
    #[arg(
        long,
        env = "DEBUG",
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "true",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new(),
    )]
    debug: bool,

    /// Comma separated list of origins allowed to call the API when not in debug mode.
    #[arg(long, env = "ALLOWED_ORIGINS", default_value = "*")]
    allowed_origins: String,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine, the environment and defaults are used instead.
    let dotenv_path = dotenvy::dotenv().ok();

    let args = Args::parse();

    setup_logging(args.debug);

    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {path:?}");
    }

    let addr = SocketAddr::new(args.host, args.port);

    if let Err(error) = check_port_is_free(addr) {
        tracing::error!("Cannot listen on {addr}: {error}. Free the port or choose another one.");
        exit(1);
    }

    if !args.dist_dir.join("index.html").is_file() {
        tracing::warn!(
            "No index.html found in {:?}, the frontend will not be served",
            args.dist_dir
        );
    }

    let database = Database::open(&args.db_path).expect("Could not open the database");
    let cors_policy = CorsPolicy::new(args.debug, &args.allowed_origins);
    tracing::info!("CORS policy: {cors_policy:?}");

    let state = AppState::new(database, args.dist_dir, cors_policy);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    tracing::info!("HTTP server listening on {addr}, debug mode: {}", args.debug);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly");
}

fn check_port_is_free(addr: SocketAddr) -> Result<(), String> {
    match TcpListener::bind(addr) {
        Ok(_) => Ok(()),
        Err(error) if error.kind() == ErrorKind::AddrInUse => {
            Err(format!("port {} is already in use", addr.port()))
        }
        Err(error) => Err(error.to_string()),
    }
}

fn setup_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}

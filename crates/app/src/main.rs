use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use manabi_core::Catalog;
use services::{Clock, FixedCredentials, ProgressService};
use storage::JsonProgressStore;
use web::{AppState, SessionSigner, build_router};
use web::session::DEV_SECRET;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidBind { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidBind { raw } => write!(f, "invalid --bind value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app [-- --bind <addr>] [--progress-dir <dir>] [--lessons-dir <dir>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bind 127.0.0.1:8000");
    eprintln!("  --progress-dir progress");
    eprintln!("  --lessons-dir lessons");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MANABI_BIND, MANABI_PROGRESS_DIR, MANABI_LESSONS_DIR, MANABI_SECRET");
}

struct Args {
    bind: SocketAddr,
    progress_dir: PathBuf,
    lessons_dir: PathBuf,
    secret: String,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bind_raw =
            std::env::var("MANABI_BIND").unwrap_or_else(|_| "127.0.0.1:8000".into());
        let mut progress_dir =
            PathBuf::from(std::env::var("MANABI_PROGRESS_DIR").unwrap_or_else(|_| "progress".into()));
        let mut lessons_dir =
            PathBuf::from(std::env::var("MANABI_LESSONS_DIR").unwrap_or_else(|_| "lessons".into()));
        let secret = std::env::var("MANABI_SECRET").unwrap_or_else(|_| DEV_SECRET.into());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bind" => bind_raw = require_value(args, "--bind")?,
                "--progress-dir" => {
                    progress_dir = PathBuf::from(require_value(args, "--progress-dir")?);
                }
                "--lessons-dir" => {
                    lessons_dir = PathBuf::from(require_value(args, "--lessons-dir")?);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let bind = bind_raw
            .parse()
            .map_err(|_| ArgsError::InvalidBind { raw: bind_raw })?;
        Ok(Self {
            bind,
            progress_dir,
            lessons_dir,
            secret,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("app=info".parse()?)
                .add_directive("web=info".parse()?),
        )
        .init();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if args.secret == DEV_SECRET {
        warn!("MANABI_SECRET is unset; using the development signing secret");
    }

    let store = JsonProgressStore::new(&args.progress_dir)?;
    let state = AppState {
        catalog: Arc::new(Catalog::builtin()),
        progress: Arc::new(ProgressService::new(
            Clock::default_clock(),
            Arc::new(store),
        )),
        credentials: Arc::new(FixedCredentials::builtin()),
        sessions: Arc::new(SessionSigner::new(&args.secret)),
        lessons_dir: args.lessons_dir,
    };
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(args.bind).await?;
    info!(
        addr = %args.bind,
        progress_dir = %args.progress_dir.display(),
        "serving"
    );
    axum::serve(listener, router).await?;
    Ok(())
}

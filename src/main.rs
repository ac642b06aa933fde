use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mentorboard::auth::JwtSigner;
use mentorboard::cache;
use mentorboard::config::{ConfigFile, ServerConfig};
use mentorboard::notify::{LogNotifier, Notifier, OneSignalNotifier};
use mentorboard::server::{AppState, create_router, serve};
use mentorboard::service::{AdminService, provision_admin};
use mentorboard::store::{SqliteStore, Store};

#[derive(Parser)]
#[command(name = "mentorboard")]
#[command(about = "Admin backend for a mentorship platform", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Start the server
    Serve(ServeArgs),
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Create an admin account, or reset the password of an existing one
    Provision {
        #[arg(long)]
        username: String,

        /// Prompted for when omitted
        #[arg(long, env = "MENTORBOARD_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Data directory for the database
        #[arg(long, env = "MENTORBOARD_DATA_DIR", default_value = "./data")]
        data_dir: PathBuf,

        /// Skip interactive prompts
        #[arg(long)]
        non_interactive: bool,
    },
}

/// Flags override values from `--config`; unset fields fall back to it.
#[derive(Args)]
struct ServeArgs {
    /// TOML file with server settings
    #[arg(long, env = "MENTORBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to [default: 127.0.0.1]
    #[arg(long, env = "MENTORBOARD_HOST")]
    host: Option<String>,

    /// Port to bind to [default: 8080]
    #[arg(long, short, env = "MENTORBOARD_PORT")]
    port: Option<u16>,

    /// Data directory for the database [default: ./data]
    #[arg(long, env = "MENTORBOARD_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Secret used to sign session tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    jwt_secret: Option<String>,

    /// Redis URL for the reference data cache. In-process cache if unset.
    #[arg(long, env = "REDIS_URL")]
    redis_url: Option<String>,

    #[arg(long, env = "ONESIGNAL_APP_ID")]
    onesignal_app_id: Option<String>,

    #[arg(long, env = "ONESIGNAL_API_KEY", hide_env_values = true)]
    onesignal_api_key: Option<String>,
}

impl ServeArgs {
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let file = match &self.config {
            Some(path) => ConfigFile::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => ConfigFile::default(),
        };

        let flags = ConfigFile {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
            jwt_secret: self.jwt_secret,
            redis_url: self.redis_url,
            onesignal_app_id: self.onesignal_app_id,
            onesignal_api_key: self.onesignal_api_key,
            onesignal_timeout_secs: None,
        };

        Ok(ServerConfig::try_from(flags.or(file))?)
    }
}

fn open_store(data_dir: &std::path::Path) -> anyhow::Result<SqliteStore> {
    fs::create_dir_all(data_dir)?;
    let store = SqliteStore::new(data_dir.join("mentorboard.db"))?;
    store.initialize()?;
    Ok(store)
}

fn run_provision(
    username: &str,
    password: Option<String>,
    data_dir: &std::path::Path,
    non_interactive: bool,
) -> anyhow::Result<()> {
    let password = match password {
        Some(password) => password,
        None if non_interactive => bail!("--password is required with --non-interactive"),
        None => inquire::Password::new("Admin password:").prompt()?,
    };

    let store = open_store(data_dir)?;
    let id = provision_admin(&store, username, &password)?;

    println!("Admin '{}' provisioned with id {id}", username.trim());
    Ok(())
}

async fn run_serve(config: ServerConfig) -> anyhow::Result<()> {
    let store = open_store(&config.data_dir)?;
    if !store.has_admin()? {
        bail!("No admin provisioned. Run 'mentorboard admin provision --username <name>' first.");
    }

    let cache = cache::open(config.redis_url.as_deref()).await;

    let notifier: Arc<dyn Notifier> = match config.onesignal.clone() {
        Some(onesignal) => Arc::new(OneSignalNotifier::new(onesignal)?),
        None => {
            info!("OneSignal not configured, push notifications will only be logged");
            Arc::new(LogNotifier)
        }
    };

    let service = AdminService::new(
        Arc::new(store),
        cache,
        notifier,
        Arc::new(JwtSigner::new(config.jwt_secret.as_bytes())?),
    );

    let app = create_router(Arc::new(AppState {
        service: Arc::new(service),
    }));
    let addr = config.socket_addr()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, app, shutdown_signal(), SHUTDOWN_GRACE).await?;

    info!("Server stopped");
    Ok(())
}

/// How long in-flight requests get to finish after Ctrl-C.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("mentorboard=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Admin { command } => match command {
            AdminCommands::Provision {
                username,
                password,
                data_dir,
                non_interactive,
            } => {
                run_provision(&username, password, &data_dir, non_interactive)?;
            }
        },
        Commands::Serve(args) => {
            run_serve(args.into_config()?).await?;
        }
    }

    Ok(())
}

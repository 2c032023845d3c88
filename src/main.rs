
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use filedash::Controller;
use filedash::controller::{GateOutcome, UploadOutcome};
use filedash::net::api::HttpApi;
use filedash::net::config::{ClientConfig, ConfigError, normalize_base_url};
use filedash::net::types::{ApiError, LoginRequest, SelectedFile, SignupRequest};
use filedash::state::session::FileSessionStore;
use filedash::state::view::{ListContent, ListEntry, Panel, Route, View};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{action} failed: {source}")]
    Io { action: &'static str, source: std::io::Error },
    #[error("{0} did not succeed")]
    Flow(&'static str),
    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

#[derive(Parser, Debug)]
#[command(name = "filedash", about = "File-sharing dashboard client")]
struct Cli {
    /// Server origin; overrides `FILEDASH_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,

    /// Role cache file; overrides `FILEDASH_SESSION_FILE`.
    #[arg(long)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account, then wait for the redirect to login.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FILEDASH_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, default_value = "client")]
        role: String,
    },
    /// Log in and cache the returned role.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FILEDASH_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Open a page; only the dashboard runs the role gate.
    Dashboard {
        #[arg(long, default_value = "/dashboard")]
        route: String,
    },
    /// Upload a .pptx, .docx, or .xlsx file.
    Upload { path: PathBuf },
    /// List files available for download.
    Files,
    /// Download a listed file by its link token.
    Download {
        link: String,
        /// Output path; stdout when absent.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Forget the cached role.
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = resolve_config(ClientConfig::from_env()?, &cli);

    let api = HttpApi::new(&config)?;
    let session = FileSessionStore::new(&config.session_file);
    let view = TerminalView::new(&config.base_url);
    let controller = Controller::new(Arc::new(api), Arc::new(session), Arc::new(view))
        .with_redirect_delay(config.redirect_delay);

    tracing::debug!(base_url = %config.base_url, session_file = %config.session_file.display(), "client configured");
    run(&controller, cli.command).await
}

fn resolve_config(mut config: ClientConfig, cli: &Cli) -> ClientConfig {
    if let Some(base_url) = &cli.base_url {
        config.base_url = normalize_base_url(base_url);
    }
    if let Some(path) = &cli.session_file {
        config.session_file.clone_from(path);
    }
    config
}

async fn run(controller: &Controller, command: Command) -> Result<(), CliError> {
    match command {
        Command::Signup { email, password, role } => {
            let form = SignupRequest { email, password, role };
            let redirect = controller.signup(&form).await.ok_or(CliError::Flow("signup"))?;
            redirect.wait().await;
            Ok(())
        }
        Command::Login { email, password } => {
            let form = LoginRequest { email, password };
            controller.login(&form).await.ok_or(CliError::Flow("login"))?;
            Ok(())
        }
        Command::Dashboard { route } => {
            let route = parse_route(&route)?;
            match controller.bootstrap(route).await {
                Some(GateOutcome::Rendered(_)) | None => Ok(()),
                Some(GateOutcome::RedirectedToLogin | GateOutcome::Unrecognized(_)) => Err(CliError::Flow("dashboard")),
            }
        }
        Command::Upload { path } => {
            let bytes = std::fs::read(&path).map_err(|source| CliError::Io { action: "read upload", source })?;
            let name = path.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            match controller.upload(Some(SelectedFile::new(name, bytes))).await {
                UploadOutcome::Uploaded => Ok(()),
                UploadOutcome::Rejected | UploadOutcome::Failed => Err(CliError::Flow("upload")),
            }
        }
        Command::Files => {
            controller.load_client_files().await;
            Ok(())
        }
        Command::Download { link, out } => {
            let bytes = controller.download(&link).await?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &bytes).map_err(|source| CliError::Io { action: "write download", source })?;
                    eprintln!("saved {} bytes to {}", bytes.len(), path.display());
                }
                None => std::io::stdout()
                    .write_all(&bytes)
                    .map_err(|source| CliError::Io { action: "write stdout", source })?,
            }
            Ok(())
        }
        Command::Logout => {
            controller.logout();
            Ok(())
        }
    }
}

fn parse_route(path: &str) -> Result<Route, CliError> {
    Route::from_path(path).ok_or_else(|| CliError::UnknownRoute(path.to_owned()))
}

// =============================================================================
// TERMINAL VIEW
// =============================================================================

/// Prints view updates as lines on stdout.
struct TerminalView {
    base_url: String,
}

impl TerminalView {
    fn new(base_url: &str) -> Self {
        Self { base_url: base_url.to_owned() }
    }
}

fn panel_heading(panel: Panel) -> &'static str {
    match panel {
        Panel::Upload => "== Upload files ==",
        Panel::Files => "== Available files ==",
    }
}

/// One list entry as a terminal line, with links made absolute.
fn entry_line(base_url: &str, entry: &ListEntry) -> String {
    match entry.href() {
        Some(href) => format!("  - {} <{base_url}{href}>", entry.label()),
        None if entry.is_error() => format!("  ! {}", entry.label()),
        None => format!("  - {}", entry.label()),
    }
}

impl View for TerminalView {
    fn set_message(&self, text: &str) {
        println!("{text}");
    }

    fn set_upload_message(&self, text: &str) {
        println!("{text}");
    }

    fn set_welcome(&self, text: &str) {
        println!("{text}");
    }

    fn show_panel(&self, panel: Panel) {
        println!("{}", panel_heading(panel));
    }

    fn set_client_files(&self, content: ListContent) {
        if let ListContent::Text(text) = &content {
            println!("{text}");
        }
        for entry in content.entries() {
            println!("{}", entry_line(&self.base_url, entry));
        }
    }

    fn append_uploaded_file(&self, entry: ListEntry) {
        println!("{}", entry_line(&self.base_url, &entry));
    }

    fn clear_file_input(&self) {
        tracing::debug!("file input cleared");
    }

    fn navigate(&self, route: Route) {
        println!("-> {}", route.path());
    }
}

//! Parley TUI Entry Point
//!
//! Launches the terminal chat shell.
//!
//! Usage:
//!   parley [OPTIONS]
//!
//! Options:
//!   --backend <KIND>     Backend: http (default) or demo-llm
//!   --endpoint <URL>     Endpoint of the selected backend
//!   --config <PATH>      Config file (default: ~/.config/parley/client.toml)
//!   --offline            Start in offline mode without probing the backend
//!   --log-file <PATH>    Write logs to a file instead of stderr

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parley_core::config::{default_config_path, load_config_with};
use parley_core::{
    BackendKind, ChatBackend, ChatClient, ClientConfig, ConfigOverrides, DemoLlmBackend,
    HttpBackend,
};
use parley_tui::{App, ClientHandle};

/// Terminal chat client with offline fallback
#[derive(Parser, Debug)]
#[command(name = "parley", version, about)]
struct Args {
    /// Backend answering chat messages: http or demo-llm
    #[arg(long)]
    backend: Option<BackendKind>,

    /// Endpoint URL of the selected backend
    #[arg(long)]
    endpoint: Option<String>,

    /// Configuration file
    #[arg(long, env = "PARLEY_CONFIG")]
    config: Option<PathBuf>,

    /// Start in offline mode without probing the backend
    #[arg(long)]
    offline: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "PARLEY_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref())?;

    let config = resolve_config(&args)?;

    // Check if we have a TTY before attempting initialization
    use std::io::IsTerminal;

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("Error: parley requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means stdin or stdout is piped, or the session");
        eprintln!("is non-interactive (CI, container, SSH without -t).");
        std::process::exit(1);
    }

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Restore terminal before printing panic
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the app
    let result = run_app(&mut terminal, config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Propagate any errors
    result
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .with(filter)
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .with(filter)
                .init();
        }
    }

    Ok(())
}

fn resolve_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let path = match args.config {
        Some(ref path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Some(path.clone())
        }
        None => default_config_path(),
    };

    let mut overrides = ConfigOverrides::new();
    if let Some(backend) = args.backend {
        overrides = overrides.with_backend(backend);
    }
    if let Some(ref endpoint) = args.endpoint {
        overrides = overrides.with_endpoint(endpoint.clone());
    }
    if args.offline {
        overrides = overrides.with_start_offline(true);
    }

    let config = load_config_with(path, |key| std::env::var(key).ok(), &overrides)
        .context("Failed to load configuration")?;

    tracing::info!(
        backend = %config.backend,
        endpoint = config.active_endpoint(),
        source = %config.source,
        "Configuration resolved"
    );
    Ok(config)
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: ClientConfig,
) -> anyhow::Result<()> {
    match config.backend {
        BackendKind::Http => {
            let backend =
                HttpBackend::from_config(&config).context("Failed to create HTTP client")?;
            run_chat(terminal, backend, config).await
        }
        BackendKind::DemoLlm => {
            let backend =
                DemoLlmBackend::from_config(&config).context("Failed to create HTTP client")?;
            run_chat(terminal, backend, config).await
        }
    }
}

async fn run_chat<B: ChatBackend + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    backend: B,
    config: ClientConfig,
) -> anyhow::Result<()> {
    let (tx, rx) = mpsc::channel(100);
    let max_input_chars = config.max_input_chars;
    let client = ChatClient::new(backend, config, tx);

    let mut app = App::new(ClientHandle::spawn(client, rx), max_input_chars);
    app.run(terminal).await?;

    // Show goodbye message after TUI closes
    if let Some(goodbye) = app.goodbye() {
        println!("\n\x1b[34mAsistan:\x1b[0m {}\n", goodbye);
    }

    Ok(())
}

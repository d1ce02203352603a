use std::time::Instant;

use clap::Parser;
use threadline::command::{self, Command, HELP};
use threadline::config::{ClientConfig, ConfigError};
use threadline::controller::{Bootstrap, ConversationController};
use threadline::net::{HttpChatService, ServiceError};
use threadline::render;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Service(#[from] ServiceError),
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "threadline", about = "Terminal client for a multi-thread chat backend")]
struct Cli {
    /// Backend origin; overrides the environment config.
    #[arg(long, env = "CHAT_BASE_URL")]
    base_url: Option<String>,

    /// Thread to open at startup. Without it a new conversation starts.
    #[arg(long)]
    thread: Option<String>,

    /// Show thinking traces expanded.
    #[arg(long)]
    show_thinking: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // A missing .env is fine; the process environment still applies.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }

    let service = HttpChatService::new(&config)?;
    let mut controller = ConversationController::from_config(&config);
    let mut show_thinking = cli.show_thinking;
    tracing::info!(base_url = %service.base_url(), "threadline starting");

    let bootstrap = Bootstrap { chats: Vec::new(), active_thread_id: cli.thread };
    if let Err(err) = controller.start_with(&service, bootstrap).await {
        tracing::warn!(error = %err, "initial load failed");
    }
    print_view(&mut controller, show_thinking);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parsed = match command::parse_line(&line) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match parsed {
            Command::Event(event) => {
                // Failures are already raised as notices in the state.
                if let Err(err) = controller.handle(&service, event).await {
                    tracing::debug!(error = %err, "event rejected");
                }
                print_view(&mut controller, show_thinking);
            }
            Command::Prev => print_recall(controller.recall_previous()),
            Command::Next => print_recall(controller.recall_next()),
            Command::List => print!("{}", render::format_sidebar(&render::sidebar(controller.state()))),
            Command::ToggleThinking => {
                show_thinking = !show_thinking;
                print!("{}", render::format_pane(&render::pane(&controller.state().pane, show_thinking)));
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }
    Ok(())
}

fn print_view(controller: &mut ConversationController, show_thinking: bool) {
    let now = Instant::now();
    controller.expire_notices(now);
    let state = controller.state();
    println!("{}", render::format_sidebar(&render::sidebar(state)));
    print!("{}", render::format_pane(&render::pane(&state.pane, show_thinking)));
    print!("{}", render::format_notices(&state.notices, now));
}

fn print_recall(entry: Option<&str>) {
    match entry {
        Some(text) => println!("history: {text}"),
        None => println!("history: (empty)"),
    }
}

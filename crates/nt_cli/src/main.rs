use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use nt_core::{Article, Notification};
use nt_reader::logging::init_logging;
use nt_reader::{ArticleListController, ChannelNotifier, FetchOutcome, FetchPhase, FetchTicket, LogNotifier, ReaderConfig, ViewMode};
use nt_sources::{SourceConfig, SourceKind};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::info;

mod commands;
mod render;

use commands::{ReaderCommand, HELP};

#[derive(Parser, Debug)]
#[command(author, version, about = "Read, search and summarize the news feed", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "mock", help = "Article source: mock (default), http or file")]
    source: String,
    #[arg(long, default_value = nt_sources::DEFAULT_BASE_URL)]
    source_url: String,
    #[arg(long, help = "A .txt article or a directory of them, for --source file")]
    source_path: Option<PathBuf>,
    #[arg(long, default_value_t = 1000, help = "Simulated latency of the mock feed")]
    delay_ms: u64,
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
    #[arg(long, default_value = nt_inference::DEFAULT_MODEL, help = "Model for summaries and translations: placeholder (default), dummy, deepseek")]
    model: String,
    #[arg(long)]
    model_url: Option<String>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long, default_value = nt_reader::DEFAULT_TARGET_LOCALE)]
    locale: String,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load the feed once and print it
    List {
        #[arg(long)]
        query: Option<String>,
    },
    /// Interactive reader
    Read,
    /// Serve an article backend
    Serve {
        #[arg(long, default_value = "0.0.0.0:8000")]
        addr: SocketAddr,
        /// Start with the demo articles
        #[arg(long)]
        seed: bool,
    },
}

impl Cli {
    fn source_config(&self) -> SourceConfig {
        let config = SourceConfig::default()
            .with_url(&self.source_url)
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.source_path {
            Some(path) => config.with_path(path),
            None => config,
        }
    }

    fn inference_config(&self) -> nt_inference::Config {
        nt_inference::Config {
            api_key: self.api_key.clone(),
            model_name: Some(self.model.clone()),
            model_url: self.model_url.clone(),
        }
    }

    fn reader_config(&self) -> ReaderConfig {
        ReaderConfig {
            target_locale: self.locale.clone(),
        }
    }
}

async fn build_controller(cli: &Cli, notifier: Arc<dyn nt_core::Notifier>) -> anyhow::Result<ArticleListController> {
    let kind: SourceKind = cli.source.parse()?;
    let source = nt_sources::create_source(kind, &cli.source_config())?;
    info!("📡 Article source initialized (using {})", source.name());

    let model = nt_inference::create_model(Some(cli.inference_config())).await?;
    info!("🧠 Inference model initialized successfully (using {})", model.name());

    Ok(ArticleListController::new(source, model, notifier, cli.reader_config()))
}

async fn run_list(cli: &Cli, query: Option<&str>) -> anyhow::Result<()> {
    let mut controller = build_controller(cli, Arc::new(LogNotifier)).await?;
    if controller.load().await == FetchOutcome::Failed {
        bail!("Failed to fetch news articles");
    }
    if let Some(query) = query {
        controller.search(query);
    }
    println!("{}", render::list_view(controller.state(), Utc::now()));
    Ok(())
}

type FetchResult = (FetchTicket, nt_core::Result<Vec<Article>>);

/// Start a fetch in the background; the result comes back on `tx`.
fn spawn_fetch(controller: &mut ArticleListController, phase: FetchPhase, tx: &mpsc::UnboundedSender<FetchResult>) {
    let ticket = match phase {
        FetchPhase::Load => controller.begin_load(),
        FetchPhase::Refresh => controller.begin_refresh(),
    };
    let source = controller.source();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = source.fetch_articles().await;
        let _ = tx.send((ticket, result));
    });
}

fn open_article(controller: &mut ArticleListController, target: &str) -> bool {
    let by_position = target
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| controller.filtered_articles().get(i).cloned());
    match by_position {
        Some(article) => {
            controller.select_article(article);
            true
        }
        None => controller.select_by_id(target),
    }
}

async fn show_mode(controller: &mut ArticleListController, mode: ViewMode) {
    match controller.detail_mut() {
        Some(detail) => {
            detail.switch_to(mode).await;
            println!("{}", render::detail_view(detail));
        }
        None => println!("Open an article first"),
    }
}

/// Returns `false` when the reader should exit.
async fn handle_command(
    controller: &mut ArticleListController,
    command: ReaderCommand,
    fetch_tx: &mpsc::UnboundedSender<FetchResult>,
) -> bool {
    let now = Utc::now();
    match command {
        ReaderCommand::List => println!("{}", render::list_view(controller.state(), now)),
        ReaderCommand::Search(query) => {
            controller.search(&query);
            println!("{}", render::list_view(controller.state(), now));
        }
        ReaderCommand::Clear => {
            controller.clear_search();
            println!("{}", render::list_view(controller.state(), now));
        }
        ReaderCommand::Refresh => {
            spawn_fetch(controller, FetchPhase::Refresh, fetch_tx);
            println!("Refreshing...");
        }
        ReaderCommand::Open(target) => {
            if open_article(controller, &target) {
                if let Some(detail) = controller.detail() {
                    println!("{}", render::detail_view(detail));
                }
            } else {
                println!("No article {}", target);
            }
        }
        ReaderCommand::Summary => show_mode(controller, ViewMode::Summary).await,
        ReaderCommand::Translate => show_mode(controller, ViewMode::Translated).await,
        ReaderCommand::Original => show_mode(controller, ViewMode::Original).await,
        ReaderCommand::Listen => match controller.detail_mut() {
            Some(detail) => {
                if let Some(request) = detail.listen().await {
                    println!("{}", render::script_view(&request));
                }
            }
            None => println!("Open an article first"),
        },
        ReaderCommand::Close => {
            controller.close_detail();
            println!("{}", render::list_view(controller.state(), now));
        }
        ReaderCommand::Help => println!("{}", HELP),
        ReaderCommand::Quit => return false,
    }
    true
}

async fn run_reader(cli: &Cli) -> anyhow::Result<()> {
    let (notifier, mut notifications) = ChannelNotifier::new();
    let mut controller = build_controller(cli, Arc::new(notifier)).await?;
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel::<FetchResult>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    spawn_fetch(&mut controller, FetchPhase::Load, &fetch_tx);
    println!("{}", render::list_view(controller.state(), Utc::now()));
    println!("{}", HELP);

    loop {
        tokio::select! {
            Some((ticket, result)) = fetch_rx.recv() => {
                if controller.finish_fetch(ticket, result) != FetchOutcome::Stale {
                    println!("{}", render::list_view(controller.state(), Utc::now()));
                }
            }
            Some(notification) = notifications.recv() => {
                print_notification(&notification);
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match ReaderCommand::parse(&line) {
                    Ok(command) => {
                        if !handle_command(&mut controller, command, &fetch_tx).await {
                            break;
                        }
                    }
                    Err(message) => println!("{}", message),
                }
            }
        }
    }

    while let Ok(notification) = notifications.try_recv() {
        print_notification(&notification);
    }
    Ok(())
}

fn print_notification(notification: &Notification) {
    eprintln!("{}", render::notification_line(notification));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::List { query } => run_list(&cli, query.as_deref()).await,
        Commands::Read => run_reader(&cli).await,
        Commands::Serve { addr, seed } => {
            let state = if *seed {
                nt_web::AppState::with_articles(nt_sources::mock_articles())
            } else {
                nt_web::AppState::new()
            };
            nt_web::serve(*addr, state).await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_reader::RecordingNotifier;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("nt").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_defaults() {
        let cli = cli(&["list"]);
        assert_eq!(cli.source, "mock");
        assert_eq!(cli.delay_ms, 1000);
        assert_eq!(cli.model, "placeholder");
        assert_eq!(cli.locale, "es");
        assert_eq!(cli.source_config().delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_parse_serve() {
        let cli = cli(&["--source", "http", "serve", "--addr", "127.0.0.1:9000", "--seed"]);
        match cli.command {
            Commands::Serve { addr, seed } => {
                assert_eq!(addr.port(), 9000);
                assert!(seed);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_source_from_flags() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mars_space_journal.txt"), "Rover finds water.").unwrap();

        let path = dir.path().to_string_lossy().into_owned();
        let cli = cli(&["--source", "file", "--source-path", &path, "read"]);
        let mut controller = build_controller(&cli, Arc::new(RecordingNotifier::new())).await.unwrap();
        assert_eq!(controller.load().await, FetchOutcome::Committed(1));
        assert_eq!(controller.articles()[0].source, "Space Journal");

        assert!(handle_command(&mut controller, ReaderCommand::Open("1".to_string()), &mpsc::unbounded_channel().0).await);
        assert!(handle_command(&mut controller, ReaderCommand::Listen, &mpsc::unbounded_channel().0).await);
        assert!(controller.detail().unwrap().has_script());
    }

    #[tokio::test]
    async fn test_open_by_position_and_id() {
        let cli = cli(&["--delay-ms", "0", "read"]);
        let mut controller = build_controller(&cli, Arc::new(RecordingNotifier::new())).await.unwrap();
        controller.load().await;
        controller.search("mars");

        assert!(open_article(&mut controller, "1"));
        assert_eq!(controller.detail().unwrap().article().id, "3");
        assert!(open_article(&mut controller, "2"));
        assert_eq!(controller.detail().unwrap().article().id, "2");
        assert!(!open_article(&mut controller, "9"));
    }

    #[tokio::test]
    async fn test_reader_refresh_round_trip() {
        let cli = cli(&["--delay-ms", "0", "read"]);
        let mut controller = build_controller(&cli, Arc::new(RecordingNotifier::new())).await.unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();

        spawn_fetch(&mut controller, FetchPhase::Load, &tx);
        assert!(controller.is_loading());
        let (ticket, result) = rx.recv().await.unwrap();
        assert_eq!(controller.finish_fetch(ticket, result), FetchOutcome::Committed(3));

        assert!(handle_command(&mut controller, ReaderCommand::Refresh, &tx).await);
        assert!(controller.is_refreshing());
        let (ticket, result) = rx.recv().await.unwrap();
        controller.finish_fetch(ticket, result);
        assert!(!controller.is_refreshing());

        assert!(!handle_command(&mut controller, ReaderCommand::Quit, &tx).await);
    }
}

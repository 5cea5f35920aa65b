use anyhow::{Context, Result};
use base64::Engine as _;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serene_core::config::StrategyKind;
use serene_core::model::now_millis;
use serene_core::{Presenter, SereneConfig};
use serene_memory::SqliteStore;
use serene_reasoning::providers::create_generator;
use serene_reasoning::{responder_for, ConversationEngine, Dashboard, SubmitOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod command;
mod presenter;
mod turns;

use command::{Command, HELP};
use presenter::TerminalPresenter;
use turns::Turns;

#[derive(Parser, Debug)]
#[command(name = "serene", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "serene.toml")]
    config: PathBuf,

    /// Path to the dashboard database (overrides config)
    #[arg(short, long)]
    db: Option<String>,

    /// Reply strategy: scripted, staged or remote (overrides config)
    #[arg(short, long)]
    strategy: Option<String>,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

enum Input {
    Line(String),
    Interrupted,
    Closed,
}

fn init_logging(log_dir: Option<&Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_dir {
        Some(dir) => {
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, "serene.log"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("serene").join("history.txt"))
}

/// Blocking prompt loop on its own thread; lines are handed to the runtime.
fn spawn_reader(tx: mpsc::Sender<Input>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Cannot open terminal prompt: {}", e);
                let _ = tx.blocking_send(Input::Closed);
                return;
            }
        };
        let history = history_path();
        if let Some(path) = &history {
            let _ = rl.load_history(path);
        }

        loop {
            let input = match rl.readline("> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        let _ = rl.add_history_entry(line.as_str());
                    }
                    Input::Line(line)
                }
                Err(ReadlineError::Interrupted) => Input::Interrupted,
                Err(ReadlineError::Eof) => Input::Closed,
                Err(e) => {
                    tracing::error!("Prompt failed: {}", e);
                    Input::Closed
                }
            };
            let closing = matches!(input, Input::Closed)
                || matches!(&input, Input::Line(l) if matches!(Command::parse(l), Ok(Some(Command::Quit))));
            if tx.blocking_send(input).is_err() || closing {
                break;
            }
        }

        if let Some(path) = &history {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.save_history(path);
        }
    });
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/png",
    }
}

async fn photo_data_url(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read photo: {}", path.display()))?;
    Ok(format!(
        "data:{};base64,{}",
        mime_for(path),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}

/// Report how a background turn ended; the engine itself rejects
/// overlapping turns with `Busy`.
async fn report_turn<F>(presenter: Arc<TerminalPresenter>, turn: F)
where
    F: std::future::Future<Output = Result<SubmitOutcome>>,
{
    match turn.await {
        Ok(SubmitOutcome::Busy) => presenter.notify("Still replying, please wait a moment."),
        Ok(_) => {}
        Err(e) => presenter.notify(&format!("Something went wrong: {:#}", e)),
    }
}

/// Whether the command plays a chat turn rather than touching the dashboard.
fn is_turn(command: &Command) -> bool {
    matches!(command, Command::Chat(_) | Command::Photo(_) | Command::Restart)
}

async fn run_command(
    command: Command,
    engine: &Arc<ConversationEngine>,
    dashboard: &Dashboard,
    presenter: &Arc<TerminalPresenter>,
    turns: &mut Turns,
) -> Result<()> {
    if !is_turn(&command) {
        turns.settle().await;
    }
    match command {
        Command::Chat(text) => {
            let engine = engine.clone();
            turns.spawn(report_turn(presenter.clone(), async move {
                Ok(engine.submit_user_message(&text).await)
            }));
        }
        Command::Mood(value) => {
            dashboard.record_mood(value, now_millis()).await?;
        }
        Command::History => presenter.render_moods(&dashboard.mood_history().await),
        Command::Stats => {
            let stats = dashboard.mood_stats(now_millis()).await;
            let snapshot = dashboard.snapshot(now_millis()).await;
            println!("── This week ──");
            println!("  Weekly mood average: {:.1}", stats.weekly_average);
            println!("  Total mood entries:  {}", stats.total_entries);
            println!("  Activities done:     {}", snapshot.completed_activities.len());
        }
        Command::Activities => presenter.render_activities(&dashboard.activities().await),
        Command::Done(id) => {
            if dashboard.complete_activity(id, now_millis()).await?.is_none() {
                presenter.notify(&format!("No activity with id {}", id));
            }
        }
        Command::Sleep(None) => {
            let hours = dashboard.sleep_hours().await;
            println!("── Sleep (last {} nights) ──", hours.len());
            for h in hours {
                println!("  {:>4.1}h {}", h, "▇".repeat(h.round() as usize));
            }
        }
        Command::Sleep(Some(hours)) => {
            dashboard.record_sleep(hours).await?;
            presenter.notify(&format!("Logged {:.1} hours of sleep", hours));
        }
        Command::Photo(path) => {
            let image = photo_data_url(&path).await?;
            let engine = engine.clone();
            turns.spawn(report_turn(presenter.clone(), async move {
                engine.share_photo(image).await
            }));
        }
        Command::Album => presenter.render_album(&dashboard.photos().await),
        Command::Restart => {
            let engine = engine.clone();
            turns.spawn(report_turn(presenter.clone(), async move {
                Ok(engine.start().await)
            }));
        }
        Command::Help => println!("{}", HELP),
        // handled by the caller
        Command::Quit => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let _log_guard = init_logging(args.log_dir.as_deref());

    let mut config = SereneConfig::load_or_default(&args.config);
    if let Some(db) = args.db {
        config.storage.db_path = db;
    }
    if let Some(strategy) = &args.strategy {
        config.companion.strategy = strategy.parse()?;
    }

    info!("Opening dashboard at {}...", config.storage.db_path);
    let storage = Arc::new(
        SqliteStore::new(&config.storage.db_path)
            .await
            .with_context(|| format!("Failed to open database {}", config.storage.db_path))?,
    );

    let generator = match config.companion.strategy {
        StrategyKind::Remote => Some(
            create_generator(&config.llm)
                .context("The remote strategy needs GEMINI_API_KEY, or provider = \"mock\"")?,
        ),
        _ => None,
    };
    let responder = responder_for(config.companion.strategy, generator)?;

    let presenter = Arc::new(TerminalPresenter::new());
    let dashboard = Arc::new(Dashboard::new(storage, presenter.clone()));
    let engine = Arc::new(ConversationEngine::new(
        responder,
        dashboard.clone(),
        config.pacing.clone(),
    ));

    println!(
        "🌿 Serene wellness dashboard ({} companion). Type /help for commands.",
        engine.responder_name()
    );
    dashboard.init().await?;
    engine.start().await;

    let mut turns = Turns::new();
    let (tx, mut rx) = mpsc::channel(16);
    spawn_reader(tx);

    while let Some(input) = rx.recv().await {
        let line = match input {
            Input::Line(line) => line,
            Input::Interrupted => {
                println!("(Ctrl-C) Type /quit to leave.");
                continue;
            }
            Input::Closed => break,
        };
        match Command::parse(&line) {
            Ok(None) => {}
            Ok(Some(Command::Quit)) => break,
            Ok(Some(command)) => {
                if let Err(e) = run_command(command, &engine, &dashboard, &presenter, &mut turns).await {
                    presenter.notify(&format!("{:#}", e));
                }
            }
            Err(e) => println!("{}", e),
        }
    }

    turns.settle().await;
    println!("Take care of yourself! 💙");
    Ok(())
}

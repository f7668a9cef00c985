use anyhow::Result;
use chrono::Local;
use kitchenmate::config::SessionConfig;
use kitchenmate::recipe_sources::html_to_text;
use kitchenmate::session::KitchenSession;
use kitchenmate::store::{load_snapshot, save_snapshot, DocumentStore, JsonFileStore};
use kitchenmate::voice_command::command_channel;
use std::env;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_STORE_PATH: &str = "kitchenmate.json";
const DEFAULT_USER: &str = "guest";
const COMMAND_QUEUE_CAPACITY: usize = 32;

/// Front-end commands that need file or store access
#[derive(Debug, PartialEq)]
enum FrontEndCommand<'a> {
    Bye,
    Save,
    LoadRecipe(&'a str),
    /// `receipt <file>` overwrites; `receipt --missing <file>` only adds
    /// items the pantry does not have yet
    ImportReceipt { path: &'a str, missing_only: bool },
}

fn parse_front_end(line: &str) -> Option<FrontEndCommand<'_>> {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    match (head.to_lowercase().as_str(), rest.trim()) {
        ("bye", "") => Some(FrontEndCommand::Bye),
        ("save", "") => Some(FrontEndCommand::Save),
        ("load", path) if !path.is_empty() => Some(FrontEndCommand::LoadRecipe(path)),
        ("receipt", args) => {
            let (missing_only, path) = match args.strip_prefix("--missing") {
                Some(path) => (true, path.trim()),
                None => (false, args),
            };
            (!path.is_empty()).then_some(FrontEndCommand::ImportReceipt { path, missing_only })
        }
        _ => None,
    }
}

fn persist(store: &mut dyn DocumentStore, user: &str, session: &KitchenSession) -> Result<()> {
    save_snapshot(store, user, &session.snapshot())
}

async fn read_text_file(path: &str) -> std::io::Result<String> {
    let text = tokio::fs::read_to_string(path).await?;
    let is_html = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
    Ok(if is_html { html_to_text(&text) } else { text })
}

/// Log to stderr so replies on stdout stay readable; `LOG_FORMAT=json`
/// switches to one JSON object per line
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging();

    info!("Starting KitchenMate");

    let store_path = env::var("KITCHEN_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.to_string());
    let user = env::var("KITCHEN_USER").unwrap_or_else(|_| DEFAULT_USER.to_string());

    let mut store = JsonFileStore::open(&store_path)?;
    let mut session = KitchenSession::new(SessionConfig::from_env())?;
    match load_snapshot(&store, &user) {
        Ok(Some(snapshot)) => session.restore(snapshot),
        Ok(None) => info!(user = %user, "No saved kitchen, starting fresh"),
        Err(e) => warn!(user = %user, error = %e, "Saved kitchen unreadable, starting fresh"),
    }

    let elapsed = session.apply_daily_decay(Local::now().date_naive());
    debug!(days = elapsed, "Applied expiry decay");

    // stdin plays the role of the speech recogniser: one command per line
    let (sender, mut receiver) = command_channel(COMMAND_QUEUE_CAPACITY);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => continue,
                Ok(Some(line)) => {
                    if sender.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    error!(error = %e, "Failed to read input");
                    break;
                }
            }
        }
    });

    println!("{}", session.message("welcome", &[]));

    while let Some(line) = receiver.next().await {
        let reply = match parse_front_end(&line) {
            Some(FrontEndCommand::Bye) => break,
            Some(FrontEndCommand::Save) => match persist(&mut store, &user, &session) {
                Ok(()) => session.message("session-saved", &[]),
                Err(e) => session.message("session-save-failed", &[("error", &format!("{e:#}"))]),
            },
            Some(FrontEndCommand::LoadRecipe(path)) => match read_text_file(path).await {
                Ok(text) => session.load_recipe(&text),
                Err(e) => session.message("file-read-failed", &[("path", path), ("error", &e.to_string())]),
            },
            Some(FrontEndCommand::ImportReceipt { path, missing_only }) => match read_text_file(path).await {
                Ok(text) => {
                    let inventory = session.inventory_mut();
                    let report = if missing_only {
                        inventory.import_missing_from_receipt(&text)
                    } else {
                        inventory.import_receipt(&text)
                    };
                    session.message(
                        "receipt-imported",
                        &[
                            ("added", &report.added.len().to_string()),
                            ("skipped", &report.skipped.to_string()),
                        ],
                    )
                }
                Err(e) => session.message("file-read-failed", &[("path", path), ("error", &e.to_string())]),
            },
            None => session.handle_command(&line),
        };
        println!("{reply}");

        // auto-save after every command; a failed save never ends the session
        if let Err(e) = persist(&mut store, &user, &session) {
            warn!(error = %e, "Auto-save failed");
        }
    }

    if let Err(e) = persist(&mut store, &user, &session) {
        error!(error = %e, "Final save failed");
    }
    println!("{}", session.message("goodbye", &[]));
    info!("KitchenMate stopped");

    Ok(())
}

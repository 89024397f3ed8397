use std::ffi::OsString;

use gallery_client::app::GalleryApp;
use gallery_client::config::{self, AppConfig};
use gallery_client::delete::DeleteOutcome;
use gallery_client::terminal;
use gallery_client::upload::{UploadFile, UploadResult};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "\
Usage: gallery-client [--config PATH] [COMMAND]

Commands:
  show                 Show connectivity and the gallery (default)
  upload FILE...       Upload one batch of files
  delete KEY [--yes]   Delete one image after confirmation
";

enum Command {
    Show,
    Upload(Vec<OsString>),
    Delete { key: String, yes: bool },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{}", USAGE);
        return Ok(());
    }
    let config_path: Option<String> = args.opt_value_from_str("--config")?;
    let yes = args.contains(["-y", "--yes"]);
    let command = match args.subcommand()?.as_deref() {
        None | Some("show") => Command::Show,
        Some("upload") => Command::Upload(args.finish()),
        Some("delete") => {
            let key: String = args.free_from_str()?;
            Command::Delete { key, yes }
        }
        Some(other) => anyhow::bail!("unknown command {:?}\n\n{}", other, USAGE),
    };

    let app_cfg = config::load(config_path.as_deref())?;
    let _log_guards = init_logging(&app_cfg);

    let app = GalleryApp::with_http(app_cfg)?;
    app.start().await;

    match command {
        Command::Show => {}
        Command::Upload(paths) => {
            if paths.is_empty() {
                anyhow::bail!("upload needs at least one file\n\n{}", USAGE);
            }
            let mut files = Vec::with_capacity(paths.len());
            for path in &paths {
                files.push(UploadFile::from_path(path).await?);
            }
            app.open_modal().await;
            let result = app.pick_files(files).await;
            let snapshot = app.snapshot().await;
            println!("{}", snapshot.modal.status_text);
            print!("{}", terminal::render_results(&snapshot.modal));
            match result {
                Some(UploadResult::Rejected(_)) => println!("Some files were not uploaded."),
                Some(UploadResult::TransportFailed(reason)) => println!("Upload failed: {}", reason),
                Some(UploadResult::Succeeded(_)) | None => {}
            }
            println!();
        }
        Command::Delete { key, yes } => {
            let Some(card) = app.card_for(&key).await else {
                println!("No image with key {}", key);
                print!("{}", terminal::render(&app.snapshot().await));
                return Ok(());
            };
            app.request_delete(&card).await;
            print!("{}", terminal::render(&app.snapshot().await));
            if yes || confirm_on_stdin().await? {
                match app.confirm_delete(&card).await {
                    DeleteOutcome::Deleted => info!("Deleted {}", key),
                    DeleteOutcome::Restored(reason) => println!("Delete failed: {}", reason),
                    DeleteOutcome::Stale => println!("The gallery changed; nothing deleted"),
                }
            } else {
                app.cancel_delete(&card).await;
            }
            println!();
        }
    }

    print!("{}", terminal::render(&app.snapshot().await));
    Ok(())
}

async fn confirm_on_stdin() -> anyhow::Result<bool> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let answer = lines.next_line().await?.unwrap_or_default();
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Installs the subscriber: stderr always, plus a daily-rolling file when `logging.directory` is set.
/// The returned guards must stay alive so the non-blocking writers flush.
fn init_logging(cfg: &AppConfig) -> Vec<tracing_appender::non_blocking::WorkerGuard> {
    let default_filter = cfg.logging.filter.clone().unwrap_or_else(|| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let (stderr_nb, stderr_guard) = tracing_appender::non_blocking(std::io::stderr());
    let mut guards = vec![stderr_guard];

    let file_layer = cfg.logging.directory.as_ref().filter(|dir| prepare_log_dir(dir)).map(|dir| {
        let file_appender = tracing_appender::rolling::daily(dir, "gallery-client.log");
        let (file_nb, file_guard) = tracing_appender::non_blocking(file_appender);
        guards.push(file_guard);
        tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_nb)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(stderr_nb))
        .with(file_layer)
        .init();
    guards
}

/// Creates the log directory. The subscriber is not installed yet, so failures go to stderr directly.
fn prepare_log_dir(dir: &str) -> bool {
    match std::fs::create_dir_all(dir) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("WARN: cannot create log directory {}: {}; file logging disabled", dir, e);
            false
        }
    }
}

//! `studyhub` — terminal client for the StudyHub course manager.
//!
//! # Usage
//!
//! ```
//! studyhub --url http://localhost:8080
//! studyhub --config ~/.config/studyhub/config.toml
//! ```

mod app;
mod forms;
mod route;
mod ui;

use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use route::Route;
use serde::Deserialize;
use studyhub_client::{FileVault, Gateway, GatewayConfig, Session, Vault, vault};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "studyhub", about = "Terminal client for the StudyHub course manager")]
struct Args {
  /// Path to a TOML config file (url, session_file).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the StudyHub backend (default: http://localhost:8080).
  #[arg(long, env = "STUDYHUB_URL")]
  url: Option<String>,

  /// Session state file (default: $XDG_STATE_HOME/studyhub/session.json).
  #[arg(long, env = "STUDYHUB_SESSION_FILE")]
  session_file: Option<PathBuf>,

  /// Append logs to this file; without it logging is disabled so the
  /// alternate screen stays clean.
  #[arg(long, value_name = "FILE")]
  log_file: Option<PathBuf>,
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:          String,
  #[serde(default)]
  session_file: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  if let Some(path) = &args.log_file {
    let file = std::fs::File::options()
      .create(true)
      .append(true)
      .open(path)
      .with_context(|| format!("opening log file {}", path.display()))?;
    tracing_subscriber::fmt()
      .with_env_filter(
        EnvFilter::builder()
          .with_default_directive(LevelFilter::INFO.into())
          .from_env_lossy(),
      )
      .with_writer(Arc::new(file))
      .with_ansi(false)
      .init();
  }

  // Load config file if provided.
  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let base_url = args
    .url
    .or_else(|| (!file_cfg.url.is_empty()).then(|| file_cfg.url.clone()))
    .unwrap_or_else(|| "http://localhost:8080".to_string());
  let session_file = args
    .session_file
    .or(file_cfg.session_file)
    .or_else(vault::default_session_path)
    .context("cannot determine a session file location")?;

  let session_vault: Arc<dyn Vault> = Arc::new(FileVault::open(session_file));
  let gateway = Arc::new(Gateway::new(
    GatewayConfig { base_url },
    session_vault.clone(),
  )?);
  let session = Session::new(gateway.clone(), session_vault);
  let mut app = App::new(gateway, session);

  // Set up the terminal.
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  // Neutral frame while the session bootstrap resolves — no protected
  // content is committed before we know who is signed in.
  let boot_result = async {
    terminal
      .draw(|f| ui::draw_resolving(f))
      .context("drawing frame")?;
    app.session.bootstrap().await?;
    // The gate sends unauthenticated sessions to login from here.
    app.navigate(Route::Modules).await;
    Ok::<_, anyhow::Error>(())
  }
  .await;

  // Run the event loop; restore terminal even on error.
  let run_result = if boot_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    boot_result
  };

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(evt) = maybe_event {
      match evt {
        Event::Key(key) => {
          let cont = app.handle_key(key).await?;
          if !cont {
            break;
          }
        }
        Event::Resize(_, _) => {
          // Terminal will redraw on next iteration.
        }
        _ => {}
      }
    }
  }

  Ok(())
}

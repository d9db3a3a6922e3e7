//! Daily Wisdom - one piece of trivia a day, in the terminal.
//!
//! Runs fully offline once the static assets have been cached with
//! `daily-wisdom cache install`.

mod terminal;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Local;
use daily_wisdom_core::cache::CacheStatus;
use daily_wisdom_core::notify::{
    daily_tick, handle_click, push_payload, ClickOutcome, Notifier, ToggleOutcome, DAILY_SYNC_TAG,
};
use daily_wisdom_core::{
    CacheManager, CacheStorage, CatalogSource, Config, DailyWisdom, Fetcher, FileStore,
    HttpFetcher, NotificationTime, OfflineFetcher, Preferences,
};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use terminal::{PromptPermission, TerminalNotifier};

// ============================================================================
// Constants
// ============================================================================

/// Directory for rolling log files; unset means stderr only
const ENV_LOG_DIR: &str = "DAILY_WISDOM_LOG_DIR";

const USAGE: &str = "\
Usage: daily-wisdom [COMMAND]

Commands:
  today                 Show today's wisdom (default)
  settings              Show notification settings
  notify on|off         Turn daily notifications on or off
  time HH:MM            Set the daily notification time
  cache install         Fetch and cache the static assets
  cache activate        Delete caches from older versions
  cache status          Show the offline cache
  fetch PATH            Serve a resource, offline if needed
  push [TEXT]           Show a push notification
  click [ACTION]        Handle a notification click (open, close)
  tick                  Send today's notification if it is time
  config                Show the effective configuration
  config save           Write the effective configuration to the config file
  help                  Show this message";

// ============================================================================
// Logging
// ============================================================================

/// Initialize the tracing subscriber for logging
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var(ENV_LOG_DIR) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "daily-wisdom.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

// ============================================================================
// Context
// ============================================================================

/// Everything a command needs, built once from config.
struct AppContext {
    config: Config,
    data_dir: PathBuf,
    cache: CacheManager,
    fetcher: Box<dyn Fetcher>,
}

impl AppContext {
    fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        }
        .with_env_overrides();
        debug!(?config, "Config loaded");

        let data_dir = config.data_dir()?;
        let cache_dir = config.cache_dir()?;
        let storage = CacheStorage::new(cache_dir)
            .context("Failed to create cache directory")?;
        let cache = CacheManager::new(storage, config.cache_version.clone());

        let fetcher: Box<dyn Fetcher> = match config.base_url {
            Some(ref url) => Box::new(HttpFetcher::new(url)?),
            None => {
                debug!("No base URL configured, running offline");
                Box::new(OfflineFetcher)
            }
        };

        Ok(Self {
            config,
            data_dir,
            cache,
            fetcher,
        })
    }

    fn store(&self) -> Result<FileStore> {
        FileStore::open(&self.data_dir).context("Failed to open local storage")
    }

    async fn app(&self) -> Result<DailyWisdom<FileStore>> {
        let source = CatalogSource {
            file: self.config.catalog_path.clone(),
            cache: Some(&self.cache),
            fetcher: Some(self.fetcher.as_ref()),
        };
        let app = DailyWisdom::init(self.store()?, &source, Local::now().date_naive()).await?;
        Ok(app)
    }
}

// ============================================================================
// Entry point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _guard = init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    if matches!(args.first(), Some(&"help") | Some(&"--help") | Some(&"-h")) {
        println!("{}", USAGE);
        return Ok(());
    }

    let ctx = AppContext::new()?;
    info!(command = args.first().copied().unwrap_or("today"), "Daily Wisdom starting");

    match args.as_slice() {
        [] | ["today"] => show_today(&ctx).await,
        ["settings"] => show_settings(&ctx),
        ["notify", state] => toggle_notifications(&ctx, state).await,
        ["time", time] => set_time(&ctx, time).await,
        ["cache", "install"] => cache_install(&ctx).await,
        ["cache", "activate"] => cache_activate(&ctx),
        ["cache", "status"] => cache_status(&ctx),
        ["fetch", path] => fetch(&ctx, path).await,
        ["push"] => push(None),
        ["push", text @ ..] => push(Some(&text.join(" "))),
        ["click"] => click(None),
        ["click", action] => click(Some(*action)),
        ["tick"] => tick(&ctx),
        ["config"] => show_config(&ctx),
        ["config", "save"] => save_config(&ctx),
        _ => {
            eprintln!("{}", USAGE);
            bail!("Unknown command: {}", args.join(" "));
        }
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn show_today(ctx: &AppContext) -> Result<()> {
    let app = ctx.app().await?;
    let wisdom = app.current();
    println!("{}\n", wisdom.display_category());
    println!("{}", wisdom.text);
    eprintln!(
        "\n{} items, catalog from {}",
        app.items().len(),
        app.catalog_origin()
    );
    Ok(())
}

fn show_settings(ctx: &AppContext) -> Result<()> {
    let store = ctx.store()?;
    let prefs = Preferences::load(&store);
    let state = if prefs.notifications_enabled { "on" } else { "off" };
    println!("Notifications: {}", state);
    println!("Time:          {}", prefs.notification_time);
    println!("Storage:       {}", store.path().display());
    Ok(())
}

async fn toggle_notifications(ctx: &AppContext, state: &str) -> Result<()> {
    let enabled = match state {
        "on" => true,
        "off" => false,
        other => bail!("Expected 'on' or 'off', got '{}'", other),
    };

    let mut app = ctx.app().await?;
    let mut permission = PromptPermission::new();
    match app.toggle_notifications(enabled, &mut permission)? {
        ToggleOutcome::Enabled => println!(
            "⏰ Notifications on, daily at {}",
            app.preferences().notification_time
        ),
        ToggleOutcome::Disabled => println!("🔕 Notifications off"),
        ToggleOutcome::Reverted { message, .. } => eprintln!("{}", message),
    }
    Ok(())
}

async fn set_time(ctx: &AppContext, raw: &str) -> Result<()> {
    let time: NotificationTime = raw.parse()?;
    let mut app = ctx.app().await?;
    app.update_time(time)?;
    println!("Notification time set to {}", time);
    Ok(())
}

async fn cache_install(ctx: &AppContext) -> Result<()> {
    let count = ctx
        .cache
        .install(ctx.fetcher.as_ref())
        .await
        .context("Cache install failed")?;
    println!("📦 Cached {} resources in {}", count, ctx.cache.cache_name());
    Ok(())
}

fn cache_activate(ctx: &AppContext) -> Result<()> {
    let deleted = ctx.cache.activate()?;
    if deleted.is_empty() {
        println!("✅ {} active, nothing to clean up", ctx.cache.cache_name());
    }
    for name in deleted {
        println!("🗑️  Deleted old cache {}", name);
    }
    Ok(())
}

fn cache_status(ctx: &AppContext) -> Result<()> {
    let CacheStatus {
        name,
        installed,
        entries,
        oldest,
        other_caches,
    } = ctx.cache.status()?;

    if installed {
        println!(
            "{}: {} entries, cached {}",
            name,
            entries,
            oldest.as_deref().unwrap_or("never")
        );
    } else {
        println!("{}: not installed", name);
    }
    if !other_caches.is_empty() {
        println!("Stale caches: {}", other_caches.join(", "));
    }
    println!("Precache: {}", ctx.cache.precache_paths().join(" "));
    Ok(())
}

async fn fetch(ctx: &AppContext, path: &str) -> Result<()> {
    let served = ctx.cache.respond(path, ctx.fetcher.as_ref()).await?;
    eprintln!("{:?}: {}", served.source, served.resource.path);
    println!("{}", served.resource.body);
    Ok(())
}

fn push(text: Option<&str>) -> Result<()> {
    TerminalNotifier.show(&push_payload(text))?;
    Ok(())
}

fn click(action: Option<&str>) -> Result<()> {
    match handle_click(action) {
        ClickOutcome::OpenWindow(url) => println!("Opening {}", url),
        ClickOutcome::Dismiss => {}
    }
    Ok(())
}

fn tick(ctx: &AppContext) -> Result<()> {
    let prefs = Preferences::load(&ctx.store()?);
    let now = Local::now().naive_local();
    match daily_tick(DAILY_SYNC_TAG, now, &prefs, &ctx.cache) {
        Some(payload) => TerminalNotifier.show(&payload)?,
        None => debug!(time = %prefs.notification_time, "Not time for a notification"),
    }
    Ok(())
}

fn show_config(ctx: &AppContext) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&ctx.config)?);
    Ok(())
}

fn save_config(ctx: &AppContext) -> Result<()> {
    let path = ctx.config.save()?;
    println!("Saved config to {}", path.display());
    Ok(())
}

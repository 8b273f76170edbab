//! handmouse - Hand-Tracking Mouse Control
//!
//! Entry point for the binary.

use anyhow::Result;
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use handmouse::config::{Config, LoggingConfig, SensorSource};
use handmouse::pointer::{NullPointer, PointerBackend};
use handmouse::sensor::SensorSession;
use handmouse::translate::{HandInputTranslator, ScreenMapper};

/// Command-line arguments for handmouse
#[derive(Parser, Debug)]
#[command(name = "handmouse")]
#[command(version, about = "Hand-tracking mouse control", long_about = None)]
pub struct Args {
    /// Configuration file path (default: ~/.config/handmouse/config.toml)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Sensor source (replay:<path>, stdin, or tcp:<addr>)
    #[arg(short, long, env = "HANDMOUSE_SOURCE")]
    pub source: Option<SensorSource>,

    /// Log pointer actions instead of driving the real cursor
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config before logging, so [logging] can set the default level
    let (config, config_note) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("{}", handmouse::utils::format_user_error(&e));
            return Err(e);
        }
    };

    // Initialize logging
    init_logging(&args, &config.logging)?;
    if let Some(note) = config_note {
        warn!("{}", note);
    }

    info!("════════════════════════════════════════════════════════");
    info!("  handmouse v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!(
        "  Profile: {}",
        if cfg!(debug_assertions) { "debug" } else { "release" }
    );
    info!("════════════════════════════════════════════════════════");

    // Log startup diagnostics
    handmouse::utils::log_startup_diagnostics();

    info!("Configuration loaded successfully");
    debug!("Config: {:?}", config);

    if let Err(e) = run(config).await {
        eprintln!("{}", handmouse::utils::format_user_error(&e));
        return Err(e);
    }

    info!("handmouse shut down");
    Ok(())
}

/// Resolve configuration from CLI args, config file, and defaults
///
/// An explicit `--config` path must load; the well-known path is only
/// used when it exists. The returned note, if any, should be logged
/// once logging is up.
fn load_config(args: &Args) -> Result<(Config, Option<String>)> {
    let mut note = None;

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => match Config::default_path() {
            Some(path) if path.exists() => Config::load(&path)?,
            _ => {
                note = Some("No config file found, using defaults".to_string());
                Config::default()
            }
        },
    };

    let config = config.with_overrides(args.source.clone(), args.dry_run);
    config.validate()?;
    Ok((config, note))
}

async fn run(config: Config) -> Result<()> {
    // Acquire the sensor before touching the pointer; without a frame
    // source there is nothing to drive
    let mut session = SensorSession::acquire_default(&config.sensor)?;
    let info = *session.open().await?;
    info!(
        width = info.frame.width,
        height = info.frame.height,
        bodies = info.body_capacity,
        "sensor open"
    );

    let pointer = build_pointer(&config)?;

    let (screen_width, screen_height) =
        match (config.pointer.screen_width, config.pointer.screen_height) {
            (Some(width), Some(height)) => (width, height),
            _ => pointer.screen_size()?,
        };
    info!(screen_width, screen_height, "screen bounds");

    let mapper = session.mapper()?;
    let screen = ScreenMapper::new(info.frame, screen_width, screen_height)?;
    let mut translator = HandInputTranslator::new(pointer, mapper, screen, &config.tracking);

    let feed_on_stdin = matches!(config.sensor.source, Some(SensorSource::Stdin));
    if feed_on_stdin {
        info!("Reading frames from stdin; press Ctrl-C to finish");
    } else {
        info!("Press Enter or Ctrl-C to finish");
    }

    {
        let pump = session.run(&mut translator);
        tokio::pin!(pump);
        tokio::select! {
            result = &mut pump => {
                result?;
                info!("Frame source ended");
            }
            _ = wait_for_enter(feed_on_stdin) => {
                info!("Enter received, shutting down");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl-C received, shutting down");
            }
        }
    }

    session.close();

    let session_stats = session.stats();
    let stats = translator.stats();
    info!(
        frames = session_stats.frames_delivered,
        skipped = session_stats.frames_skipped,
        moves = stats.moves,
        left_clicks = stats.left_clicks,
        right_clicks = stats.right_clicks,
        "session summary"
    );

    Ok(())
}

/// Select the pointer backend named by the configuration
fn build_pointer(config: &Config) -> Result<Box<dyn PointerBackend>> {
    if config.pointer.backend == "null" {
        info!("Dry run: pointer actions will be logged, not injected");
        return Ok(Box::new(NullPointer::new()));
    }

    #[cfg(feature = "enigo-backend")]
    {
        Ok(Box::new(handmouse::pointer::EnigoPointer::new()?))
    }
    #[cfg(not(feature = "enigo-backend"))]
    {
        anyhow::bail!(
            "built without the enigo backend; run with --dry-run or set [pointer] backend = \"null\""
        )
    }
}

/// Resolve when the user presses Enter
///
/// Reads on a plain thread because a pending stdin read cannot be
/// cancelled and would stall runtime shutdown. When the frame feed
/// itself arrives on stdin there is no line to wait for, so this never
/// resolves and Ctrl-C is the only way out.
async fn wait_for_enter(feed_on_stdin: bool) {
    if feed_on_stdin {
        std::future::pending::<()>().await;
        return;
    }

    let (tx, rx) = tokio::sync::oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = tx.send(());
    });
    let _ = rx.await;
}

fn init_logging(args: &Args, logging: &LoggingConfig) -> Result<()> {
    use std::fs::File;

    let log_level = match args.verbose {
        0 => logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Quiet everything except this crate unless RUST_LOG says otherwise
        tracing_subscriber::EnvFilter::new(format!("handmouse={log_level},warn"))
    });

    // CLI file beats the configured log directory
    let log_file_path = match &args.log_file {
        Some(path) => Some(std::path::PathBuf::from(path)),
        None => match &logging.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                Some(dir.join("handmouse.log"))
            }
            None => None,
        },
    };

    // If log file is specified, write to both stdout and file
    if let Some(log_file_path) = &log_file_path {
        let file = File::create(log_file_path)?;

        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stdout),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        // Stdout only
        match args.log_format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().json())
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().compact())
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(tracing_subscriber::fmt::layer().pretty())
                    .init();
            }
        }
    }

    Ok(())
}

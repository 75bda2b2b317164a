//! Scanlink - receive barcode scans from a phone over the local network
//!
//! The desktop shows a pairing QR code encoding a URL and a secret token;
//! the phone opens that URL in its browser, scans codes with its camera, and
//! posts each decoded value back over HTTP.

mod qr;

use anyhow::Result;
use clap::Parser;
use scanlink_core::{ConfigStore, EventChannel, ScanEvent};
use scanlink_log::ScanLog;
use scanlink_server::LocalServer;
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// How often the consumer drains pending scan events
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Scanlink - pair a phone camera with this computer as a barcode scanner
#[derive(Parser, Debug)]
#[command(name = "scanlink")]
#[command(version, about, long_about = None)]
struct Args {
    /// Server port (overrides the saved config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind the listener on
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Config file path (default: ~/.config/scanlink/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scan log path (default: ~/.local/share/scanlink/scans.csv)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Generate a fresh pairing token before starting
    #[arg(long)]
    regen_token: bool,

    /// Also write the pairing QR code to a PNG file
    #[arg(long)]
    qr_png: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    info!("Scanlink v{}", env!("CARGO_PKG_VERSION"));

    // Load the session config and apply operator overrides
    let store = match args.config {
        Some(path) => ConfigStore::with_path(path),
        None => ConfigStore::new()?,
    };
    let mut config = store.load();
    if let Some(port) = args.port {
        config.port = port;
    }
    if args.regen_token || config.token.is_empty() {
        config.token = scanlink_auth::generate();
        info!("Generated a new pairing token");
    }
    if let Err(e) = store.save(&config) {
        warn!("Failed to save config: {}", e);
    }

    // The QR code must carry an address the phone can reach
    let host_ip = match scanlink_discovery::local_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            warn!("Could not discover LAN address: {}", e);
            "localhost".to_string()
        }
    };
    let url = scanlink_auth::scanner_url(&host_ip, config.port, &config.token);

    let log = Arc::new(match args.log_file {
        Some(path) => ScanLog::with_path(path),
        None => ScanLog::new()?,
    });
    let (events, mut channel) = EventChannel::new();

    let mut server = LocalServer::new();
    let addr = server.start(args.host, config, events, log.clone()).await?;

    info!("Listening on {}", addr);
    info!("");
    info!("  Scan this QR code with your phone (same Wi-Fi network):");
    info!("");
    qr::print_terminal(&url);
    info!("");
    info!("  Direct URL: {}", url);
    info!("  Scans are appended to {}", log.path().display());
    info!("");
    info!("Press Ctrl+C to stop.");
    info!("");

    if let Some(path) = &args.qr_png {
        match qr::render_png(&url, 400) {
            Ok(png) => {
                std::fs::write(path, png)?;
                info!("Wrote pairing QR code to {}", path.display());
            }
            Err(e) => warn!("Failed to render QR PNG: {}", e),
        }
    }

    // Consumer loop: periodically drain the hand-off queue and keep only the
    // latest observed event.
    let mut latest: Option<ScanEvent> = None;
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = poll.tick() => {
                for event in channel.drain() {
                    info!("Scan: {} ({})", event.code, event.source);
                    latest = Some(event);
                }
            }
        }
    }

    info!("Shutting down...");
    server.stop().await;

    if let Some(event) = latest {
        info!("Last scan this session: {}", event.code);
    }
    info!("Goodbye!");
    Ok(())
}

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use deauthwatch::alert::{ConsoleSink, LogFileSink, SinkSet};
use deauthwatch::clock::SystemClock;
use deauthwatch::config::{Config, LogFormat};
use deauthwatch::detector::DeauthDetector;
use deauthwatch::metrics;
use deauthwatch::source::{self, SimulatedSource};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "deauthwatch", version)]
#[command(about = "Deauthentication-flood detection simulator")]
struct Args {
    /// Optional TOML configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Probability each packet is a deauth (0..1) [default: 0.2]
    #[arg(long)]
    chance: Option<f64>,

    /// Deauth frames in the time window needed to trigger an alert [default: 5]
    #[arg(long)]
    threshold: Option<usize>,

    /// Time window in seconds [default: 10]
    #[arg(long)]
    window: Option<u64>,

    /// Seconds between simulated packets [default: 0.5]
    #[arg(long)]
    rate: Option<f64>,

    /// Alert log file [default: deauth_alerts.log]
    #[arg(long)]
    log: Option<PathBuf>,

    /// Seed the packet generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many packets (0 = run until interrupted)
    #[arg(long)]
    max_frames: Option<u64>,

    /// Disable colored console output
    #[arg(long)]
    no_color: bool,

    /// Only print alerts, not every packet
    #[arg(long)]
    quiet_frames: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output diagnostic logs as JSON
    #[arg(long)]
    json: bool,

    /// Metrics/health endpoint address (requires the `metrics` feature)
    #[arg(long, default_value = "127.0.0.1:9090")]
    metrics_addr: SocketAddr,

    /// Disable metrics/health endpoint
    #[arg(long)]
    no_metrics: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(chance) = self.chance {
            config.simulator.deauth_chance = chance;
        }
        if let Some(threshold) = self.threshold {
            config.detector.threshold = threshold;
        }
        if let Some(window) = self.window {
            config.detector.window_secs = window;
        }
        if let Some(rate) = self.rate {
            config.simulator.rate_secs = rate;
        }
        if let Some(ref log) = self.log {
            config.alerts.log_path = log.clone();
        }
        if self.seed.is_some() {
            config.simulator.seed = self.seed;
        }
        if let Some(max_frames) = self.max_frames {
            config.simulator.max_frames = max_frames;
        }
        if self.no_color {
            config.general.color = false;
        }
        if self.quiet_frames {
            config.general.show_frames = false;
        }
        if self.json {
            config.general.log_format = LogFormat::Json;
        }
    }
}

fn init_tracing(verbose: u8, format: LogFormat) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.with_target(false).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    args.apply(&mut config);

    init_tracing(args.verbose, config.general.log_format);
    config.validate().context("invalid configuration")?;

    let log_path = config.alerts.log_path.clone();
    let mut console = ConsoleSink::stdout(config.general.color, config.general.show_frames);
    console.banner(&config);

    let mut log_sink = LogFileSink::new(&log_path);
    if let Err(e) = log_sink.write_header(Local::now()) {
        error!("Failed to write log header to {}: {}", log_path.display(), e);
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    if !args.no_metrics && cfg!(feature = "metrics") {
        let metrics_addr = args.metrics_addr;
        tokio::spawn(async move {
            metrics::start_server(metrics_addr).await;
        });
        info!("Metrics available at http://{}/metrics", metrics_addr);
    }

    let (frame_tx, frame_rx) = mpsc::channel(64);

    let simulator = match config.simulator.seed {
        Some(seed) => SimulatedSource::seeded(config.simulator.deauth_chance, seed),
        None => SimulatedSource::new(config.simulator.deauth_chance),
    };
    let producer = tokio::spawn(source::produce(
        simulator,
        SystemClock,
        config.simulator.pacing(),
        frame_tx,
        shutdown_rx.clone(),
    ));

    let detector = DeauthDetector::from_config(&config.detector);
    let mut sinks = SinkSet::new()
        .with(ConsoleSink::stdout(config.general.color, config.general.show_frames))
        .with(log_sink);
    let mut detector_handle = tokio::spawn(async move {
        detector.run(frame_rx, &mut sinks, shutdown_rx).await
    });

    info!("Detector running. Press Ctrl+C to stop.");

    let finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for Ctrl+C")?;
            info!("Shutting down...");
            None
        }
        stats = &mut detector_handle => Some(stats?),
    };

    let _ = shutdown_tx.send(true);
    let (stats, reason) = match finished {
        Some(stats) => (stats, "frame limit reached"),
        None => (detector_handle.await?, "interrupted"),
    };
    let sent = producer.await?;

    console.shutdown_notice(reason, &log_path);
    info!(
        sent,
        frames = stats.frames,
        deauth_frames = stats.deauth_frames,
        alerts = stats.alerts,
        "Detector stopped."
    );
    Ok(())
}

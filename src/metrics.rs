//! Prometheus metrics and health/metrics HTTP endpoints

#[cfg(feature = "metrics")]
mod inner {
    use axum::{routing::get, Router};
    use once_cell::sync::Lazy;
    use prometheus::{IntCounter, IntGauge, Registry, TextEncoder};
    use std::net::SocketAddr;
    use tracing::{error, info};

    pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

    fn counter(name: &str, help: &str) -> IntCounter {
        let counter = IntCounter::new(name, help).expect("valid metric definition");
        REGISTRY
            .register(Box::new(counter.clone()))
            .expect("metric registered once");
        counter
    }

    pub static FRAMES_PROCESSED: Lazy<IntCounter> =
        Lazy::new(|| counter("deauthwatch_frames_total", "Total frames processed"));

    pub static DEAUTH_FRAMES: Lazy<IntCounter> =
        Lazy::new(|| counter("deauthwatch_deauth_frames_total", "Deauthentication frames processed"));

    pub static ALERTS_RAISED: Lazy<IntCounter> =
        Lazy::new(|| counter("deauthwatch_alerts_total", "Deauth flood alerts raised"));

    pub static LOG_WRITE_FAILURES: Lazy<IntCounter> =
        Lazy::new(|| counter("deauthwatch_log_write_failures_total", "Failed alert log appends"));

    pub static START_TIME: Lazy<IntGauge> = Lazy::new(|| {
        let gauge = IntGauge::new("deauthwatch_start_time_seconds", "Unix timestamp when the detector started")
            .expect("valid metric definition");
        REGISTRY
            .register(Box::new(gauge.clone()))
            .expect("metric registered once");
        gauge.set(chrono::Utc::now().timestamp());
        gauge
    });

    fn register_all() {
        Lazy::force(&START_TIME);
        Lazy::force(&FRAMES_PROCESSED);
        Lazy::force(&DEAUTH_FRAMES);
        Lazy::force(&ALERTS_RAISED);
        Lazy::force(&LOG_WRITE_FAILURES);
    }

    /// Prometheus text exposition of every registered detector metric.
    pub fn render() -> String {
        TextEncoder::new()
            .encode_to_string(&REGISTRY.gather())
            .unwrap_or_default()
    }

    fn router() -> Router {
        Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/metrics", get(|| async { render() }))
    }

    /// Serve `/health` and `/metrics` until the task is dropped.
    pub async fn start_server(addr: SocketAddr) {
        register_all();

        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(%addr, "Metrics endpoint unavailable: {}", e);
                return;
            }
        };
        info!(%addr, "Serving /health and /metrics");

        if let Err(e) = axum::serve(listener, router()).await {
            error!("Metrics endpoint stopped: {}", e);
        }
    }

}

#[cfg(feature = "metrics")]
pub use inner::*;

// Stub implementations when metrics feature is disabled
#[cfg(not(feature = "metrics"))]
pub mod stubs {
    use std::net::SocketAddr;

    pub struct NoOpCounter;
    impl NoOpCounter {
        pub fn inc(&self) {}
    }

    pub static FRAMES_PROCESSED: NoOpCounter = NoOpCounter;
    pub static DEAUTH_FRAMES: NoOpCounter = NoOpCounter;
    pub static ALERTS_RAISED: NoOpCounter = NoOpCounter;
    pub static LOG_WRITE_FAILURES: NoOpCounter = NoOpCounter;

    pub async fn start_server(_addr: SocketAddr) {
        // No-op when metrics disabled
    }
}

#[cfg(not(feature = "metrics"))]
pub use stubs::*;

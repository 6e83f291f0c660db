//! Source -> detector -> sink pipeline over the async channel.

use crate::mocks::{deauth_burst, RecordingSink};
use deauthwatch::alert::{LogFileSink, SinkSet};
use deauthwatch::clock::ManualClock;
use deauthwatch::detection::{FrameEvent, TopSource};
use deauthwatch::detector::DeauthDetector;
use deauthwatch::source::{produce, Pacing, ScriptedSource, SimulatedSource};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::{mpsc, watch};

#[tokio::test]
async fn test_scripted_pipeline_raises_alert() {
    let clock = Arc::new(ManualClock::new(2.0));
    let mut frames = deauth_burst("A", &[0.0, 1.0]);
    frames.insert(1, FrameEvent::benign("N", 0.5));
    frames.push(FrameEvent::deauth("B", 2.0));

    let (tx, rx) = mpsc::channel(8);
    let (_stop_tx, stop_rx) = watch::channel(false);

    let producer = tokio::spawn(produce(
        ScriptedSource::new(frames),
        Arc::clone(&clock),
        Pacing::new(Duration::ZERO, 0),
        tx,
        stop_rx.clone(),
    ));

    let mut sink = RecordingSink::default();
    let detector = DeauthDetector::with_clock(3, 10, Arc::clone(&clock));
    let stats = detector.run(rx, &mut sink, stop_rx).await;

    assert_eq!(producer.await.unwrap(), 4);
    assert_eq!(stats.frames, 4);
    assert_eq!(stats.deauth_frames, 3);
    assert_eq!(stats.alerts, 1);
    assert_eq!(sink.frame_count(), 4);

    let alerts = sink.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(
        alerts[0].top_sources,
        vec![TopSource::new("A", 2), TopSource::new("B", 1)]
    );
}

#[tokio::test]
async fn test_alerts_reach_log_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("deauth_alerts.log");

    let mut log = LogFileSink::new(&path);
    log.write_header(chrono::Local::now()).unwrap();

    let recorder = RecordingSink::default();
    let mut sinks = SinkSet::new().with(recorder.clone()).with(log);

    let clock = Arc::new(ManualClock::new(1_700_000_000.0));
    let (tx, rx) = mpsc::channel(8);
    let (_stop_tx, stop_rx) = watch::channel(false);
    for frame in deauth_burst("FA:KE:MA:00:11:22", &[1_700_000_000.0; 4]) {
        tx.send(frame).await.unwrap();
    }
    drop(tx);

    let detector = DeauthDetector::with_clock(2, 10, clock);
    let stats = detector.run(rx, &mut sinks, stop_rx).await;
    assert_eq!(stats.alerts, 2);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("=== Deauth Simulator Log started at "));
    for (line, alert) in lines[1..].iter().zip(recorder.alerts()) {
        assert_eq!(*line, alert.to_string());
        assert!(line.ends_with("2 deauth frames in last 10 seconds. Top: FA:KE:MA:00:11:22(2)"));
    }
}

#[tokio::test]
async fn test_detector_stops_on_shutdown() {
    let (_tx, rx) = mpsc::channel::<FrameEvent>(8);
    let (stop_tx, stop_rx) = watch::channel(false);
    let mut sink = RecordingSink::default();

    let detector = DeauthDetector::with_clock(5, 10, ManualClock::new(0.0));
    let handle = tokio::spawn(async move { detector.run(rx, &mut sink, stop_rx).await });

    stop_tx.send(true).unwrap();
    let stats = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("detector stopped promptly")
        .unwrap();
    assert_eq!(stats.frames, 0);
}

#[tokio::test]
async fn test_simulated_source_with_frame_limit() {
    let clock = Arc::new(ManualClock::new(0.0));
    let (tx, rx) = mpsc::channel(8);
    let (_stop_tx, stop_rx) = watch::channel(false);

    let producer = tokio::spawn(produce(
        SimulatedSource::seeded(1.0, 11),
        Arc::clone(&clock),
        Pacing::new(Duration::ZERO, 10),
        tx,
        stop_rx.clone(),
    ));

    let mut sink = RecordingSink::default();
    let detector = DeauthDetector::with_clock(5, 10, clock);
    let stats = detector.run(rx, &mut sink, stop_rx).await;

    assert_eq!(producer.await.unwrap(), 10);
    // every frame is a deauth at t=0: two full cycles of five
    assert_eq!(stats.deauth_frames, 10);
    assert_eq!(stats.alerts, 2);
    assert!(sink
        .alerts()
        .iter()
        .all(|a| a.count == 5 && a.top_sources.len() <= 3));
}

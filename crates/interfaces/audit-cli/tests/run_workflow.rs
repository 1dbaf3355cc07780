use audit_app_core::ScanPhase;
use audit_cli::commands::{self, resolve_catalog, RunOptions};
use camino::Utf8PathBuf;
use tempfile::tempdir;

fn write_catalog(dir: &std::path::Path) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.join("demo.json")).unwrap();
    std::fs::write(
        &path,
        r#"{
  "steps": [
    { "message": "BOOT", "style": "info", "delay_ms": 100 },
    { "message": "SCAN", "style": "muted", "delay_ms": 200 },
    { "message": "ALERT", "style": "error", "delay_ms": 300 }
  ]
}"#,
    )
    .unwrap();
    path
}

#[tokio::test(start_paused = true)]
async fn run_with_unlock_reveals_report() {
    let dir = tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    let state = commands::cmd_run(RunOptions {
        catalog: Some(catalog),
        unlock: Some("gp@fund.com".into()),
        ..RunOptions::default()
    })
    .await
    .unwrap();

    assert_eq!(state.phase(), ScanPhase::Complete);
    assert_eq!(state.session.emitted_events.len(), 3);
    assert!(state.detail_unlocked());
    assert_eq!(state.gate.contact.as_deref(), Some("gp@fund.com"));
}

#[tokio::test(start_paused = true)]
async fn run_without_unlock_keeps_gate_closed() {
    let state = commands::cmd_run(RunOptions {
        speed: 10.0,
        ..RunOptions::default()
    })
    .await
    .unwrap();

    assert_eq!(state.phase(), ScanPhase::Complete);
    assert_eq!(state.session.emitted_events.len(), 7);
    assert!(!state.detail_unlocked());

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["finding"]["amount_cents"], 1_245_000);
    assert!(json["finding"].get("breakdown").is_none());
}

#[tokio::test(start_paused = true)]
async fn restart_mid_run_replays_from_scratch() {
    let dir = tempdir().unwrap();
    let catalog = write_catalog(dir.path());

    let state = commands::cmd_run(RunOptions {
        catalog: Some(catalog),
        restart_after_ms: Some(150),
        ..RunOptions::default()
    })
    .await
    .unwrap();

    assert_eq!(state.phase(), ScanPhase::Complete);
    let elapsed: Vec<u64> = state
        .session
        .emitted_events
        .iter()
        .map(|e| e.elapsed_ms)
        .collect();
    assert_eq!(elapsed, vec![100, 200, 300]);
}

#[test]
fn speed_is_clamped_before_scaling() {
    let fast = resolve_catalog(None, 1_000.0).unwrap();
    assert_eq!(fast.steps()[0].delay_ms, 16);

    let normal = resolve_catalog(None, f64::NAN).unwrap();
    assert_eq!(normal.steps()[0].delay_ms, 800);
}

#[test]
fn bad_catalog_file_is_reported() {
    let dir = tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("bad.json")).unwrap();
    std::fs::write(&path, r#"{ "steps": [] }"#).unwrap();

    let err = resolve_catalog(Some(&path), 1.0).unwrap_err();
    assert!(format!("{err:#}").contains("bad.json"));
}

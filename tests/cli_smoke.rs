use std::path::PathBuf;
use std::process::Command;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_bannersmith")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "bannersmith.exe"
            } else {
                "bannersmith"
            });
            p
        })
}

fn id_args(decal_id: &str) -> Vec<String> {
    vec![
        "--decal-id".into(),
        decal_id.into(),
        "--decal-color-id".into(),
        "1".into(),
        "--decal-background-color-id".into(),
        "2".into(),
        "--gonfalon-id".into(),
        "3".into(),
        "--gonfalon-color-id".into(),
        "4".into(),
        "--gonfalon-detail-id".into(),
        "5".into(),
        "--gonfalon-detail-color-id".into(),
        "6".into(),
    ]
}

#[test]
fn non_numeric_id_aborts_before_any_io_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("banner.png");
    let db = dir.path().join("does_not_exist.sqlite");

    let status = Command::new(exe())
        .arg("--db")
        .arg(&db)
        .arg("--out")
        .arg(&out)
        .args(id_args("not-a-number"))
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out.exists(), "no partial output may be written");
    // The db path was never touched either; parsing failed first.
    assert!(!db.exists());
}

#[test]
fn unreachable_database_fails_before_network_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("banner.png");
    let db = dir.path().join("does_not_exist.sqlite");

    let status = Command::new(exe())
        .arg("--db")
        .arg(&db)
        .arg("--out")
        .arg(&out)
        // Point at a closed local port so any (incorrect) network attempt
        // would fail fast rather than hang.
        .args(["--base-url", "http://127.0.0.1:1", "--timeout-secs", "1"])
        .args(id_args("7"))
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!out.exists(), "no partial output may be written");
}

use speedplot::MonitorConfig;

#[test]
fn defaults_match_the_documented_cadence() {
    let cfg = MonitorConfig::default();
    assert_eq!(cfg.test_interval_secs, 10.0);
    assert_eq!(cfg.max_samples, 20);
    assert_eq!(cfg.spline_subdivisions, 16);
    assert_eq!(cfg.request_timeout_secs, 15.0);
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");

    let mut cfg = MonitorConfig::default();
    cfg.test_interval_secs = 30.0;
    cfg.max_samples = 300;
    cfg.title = "Office line".to_string();
    cfg.save_to_path(&path).expect("save config");

    let loaded = MonitorConfig::load_from_path(&path).expect("load config");
    assert_eq!(loaded.test_interval_secs, 30.0);
    assert_eq!(loaded.max_samples, 300);
    assert_eq!(loaded.title, "Office line");
}

#[test]
fn partial_file_fills_in_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "max_samples": 50 }"#).unwrap();

    let loaded = MonitorConfig::load_from_path(&path).expect("load config");
    assert_eq!(loaded.max_samples, 50);
    assert_eq!(loaded.test_interval_secs, 10.0);
}

#[test]
fn malformed_file_is_an_error_not_a_silent_default() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "not json at all").unwrap();
    assert!(MonitorConfig::load_from_path(&path).is_err());
}

use chrono::{Duration, Local, TimeZone};
use speedplot::data::export::{default_export_filename, write_history_csv, CSV_HEADER};
use speedplot::{SpeedHistory, SpeedSample};

fn history_with(samples: &[(i64, f64, f64)]) -> SpeedHistory {
    let base = Local.with_ymd_and_hms(2026, 8, 8, 9, 30, 0).unwrap();
    let mut history = SpeedHistory::new(300);
    for (secs, download, upload) in samples {
        history.push(SpeedSample::new(
            base + Duration::seconds(*secs),
            *download,
            *upload,
        ));
    }
    history
}

fn export_lines(history: &SpeedHistory) -> Vec<String> {
    let mut buf = Vec::new();
    write_history_csv(&mut buf, history).unwrap();
    String::from_utf8(buf)
        .unwrap()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn header_is_exact() {
    let lines = export_lines(&history_with(&[(0, 1.0, 2.0)]));
    assert_eq!(lines[0], "Date,Time,Download (Mbps),Upload (Mbps)");
    assert_eq!(lines[0], CSV_HEADER);
}

#[test]
fn row_count_equals_retained_samples() {
    let history = history_with(&[(0, 1.0, 2.0), (10, 3.0, 4.0), (20, 5.0, 6.0)]);
    let lines = export_lines(&history);
    assert_eq!(lines.len(), 1 + history.len());
}

#[test]
fn rows_carry_date_time_and_two_decimal_speeds() {
    let lines = export_lines(&history_with(&[(0, 93.4567, 0.5)]));
    assert_eq!(lines[1], "2026-08-08,09:30:00,93.46,0.50");
}

#[test]
fn every_speed_field_has_exactly_two_decimals() {
    let history = history_with(&[(0, 1.0, 22.125), (10, 0.0, 100.0), (20, 7.777, 3.3)]);
    for line in &export_lines(&history)[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 4);
        for speed in &fields[2..] {
            let (_, decimals) = speed.split_once('.').expect("missing decimal point");
            assert_eq!(decimals.len(), 2, "field {:?} in {:?}", speed, line);
        }
    }
}

#[test]
fn empty_history_exports_header_only() {
    let lines = export_lines(&SpeedHistory::new(10));
    assert_eq!(lines, vec![CSV_HEADER.to_string()]);
}

#[test]
fn export_filename_carries_counter() {
    assert_eq!(default_export_filename(1), "speed_history_1.txt");
    assert_eq!(default_export_filename(42), "speed_history_42.txt");
}

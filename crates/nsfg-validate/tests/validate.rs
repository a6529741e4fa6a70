use std::io;
use std::sync::{Arc, Mutex};

use nsfg_model::{CaseId, ModelError, PregnancyMap, Respondent};
use nsfg_validate::{
    PregnumMismatch, find_pregnum_mismatches, first_pregnum_mismatch, validate_pregnum,
};

fn preg_map(rows: &[&str]) -> PregnancyMap {
    rows.iter()
        .enumerate()
        .map(|(idx, id)| (CaseId::new(id), idx))
        .collect()
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Runs `f` with a subscriber that records every event into the returned buffer.
fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, captured.text())
}

fn paired() -> (Vec<Respondent>, PregnancyMap) {
    let respondents = vec![
        Respondent::new("1", 2),
        Respondent::new("2", 0),
        Respondent::new("6", 3),
    ];
    let mut map = preg_map(&["1", "1", "6", "6", "6"]);
    map.register_cases(respondents.iter().map(|r| &r.case_id));
    (respondents, map)
}

#[test]
fn consistent_data_validates() {
    let (respondents, map) = paired();
    assert_eq!(validate_pregnum(&respondents, &map), Ok(true));
    assert_eq!(first_pregnum_mismatch(&respondents, &map), Ok(None));
    assert_eq!(find_pregnum_mismatches(&respondents, &map), Ok(vec![]));
}

#[test]
fn first_mismatch_is_reported() {
    let (mut respondents, map) = paired();
    respondents[0].pregnum = 5;

    assert_eq!(validate_pregnum(&respondents, &map), Ok(false));
    let mismatch = first_pregnum_mismatch(&respondents, &map)
        .unwrap()
        .expect("mismatch");
    assert_eq!(
        mismatch,
        PregnumMismatch {
            case_id: CaseId::new("1"),
            observed: 2,
            reported: 5,
        }
    );
    assert_eq!(mismatch.to_string(), "1 2 5");
}

#[test]
fn only_validate_emits_the_mismatch_event() {
    let (mut respondents, map) = paired();
    respondents[0].pregnum = 5;

    let (mismatch, logs) = with_captured_logs(|| first_pregnum_mismatch(&respondents, &map));
    assert!(mismatch.unwrap().is_some());
    assert!(logs.is_empty(), "unexpected events: {logs}");

    let (valid, logs) = with_captured_logs(|| validate_pregnum(&respondents, &map));
    assert_eq!(valid, Ok(false));
    assert!(logs.contains("pregnum mismatch"));
    assert!(logs.contains("case_id=1"));
}

#[test]
fn scan_stops_at_first_mismatch() {
    let (mut respondents, map) = paired();
    respondents[0].pregnum = 1;
    // Would raise MissingCase if the scan went past the first mismatch.
    respondents.push(Respondent::new("404", 1));

    let mismatch = first_pregnum_mismatch(&respondents, &map).unwrap();
    assert_eq!(mismatch.map(|m| m.case_id), Some(CaseId::new("1")));
    assert_eq!(validate_pregnum(&respondents, &map), Ok(false));
}

#[test]
fn unknown_case_propagates_missing_key() {
    let (mut respondents, map) = paired();
    respondents.insert(1, Respondent::new("404", 0));

    assert_eq!(
        validate_pregnum(&respondents, &map),
        Err(ModelError::MissingCase {
            case_id: CaseId::new("404")
        })
    );
}

#[test]
fn unregistered_zero_pregnancy_case_is_missing() {
    let respondents = vec![Respondent::new("2", 0)];
    let map = preg_map(&["1"]);
    assert!(validate_pregnum(&respondents, &map).is_err());
}

#[test]
fn exhaustive_report_lists_every_mismatch() {
    let (mut respondents, map) = paired();
    respondents[0].pregnum = 1;
    respondents[2].pregnum = 4;

    let mismatches = find_pregnum_mismatches(&respondents, &map).unwrap();
    let lines: Vec<String> = mismatches.iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["1 2 1", "6 3 4"]);
}

#[test]
fn mismatch_serializes() {
    let mismatch = PregnumMismatch {
        case_id: CaseId::new("12"),
        observed: 0,
        reported: 1,
    };
    let json = serde_json::to_string(&mismatch).unwrap();
    assert_eq!(json, r#"{"case_id":"12","observed":0,"reported":1}"#);
}

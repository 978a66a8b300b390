use call_oracle::{CallOracle, EvaluationOutcome, ModelChoice, ModelKind, OracleError};
use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

/// PAY gets the ten-day pattern 10,12,11,13,10,12,11,14,10,13; AUTH and
/// SEARCH get a handful of calls each.
fn create_call_log() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "API Code,Time of Call,Region").unwrap();

    let daily = [10, 12, 11, 13, 10, 12, 11, 14, 10, 13];
    for (day, &count) in daily.iter().enumerate() {
        for call in 0..count {
            writeln!(file, "PAY,2024-06-{:02} {:02}:{:02}:00,eu", day + 1, call, call).unwrap();
        }
        if day % 3 == 0 {
            writeln!(file, "AUTH,2024-06-{:02} 12:00:00,us", day + 1).unwrap();
        }
    }
    writeln!(file, "SEARCH,2024-06-05 09:00:00,us").unwrap();
    writeln!(file, "PAY,garbage,eu").unwrap();

    file
}

#[test]
fn test_end_to_end_ranking_and_series() {
    let file = create_call_log();
    let oracle = CallOracle::open(file.path()).unwrap();

    assert_eq!(
        oracle.top_apis(5),
        vec!["PAY".to_string(), "AUTH".to_string(), "SEARCH".to_string()]
    );

    let series = oracle.build_daily_series("PAY");
    assert_eq!(series.counts(), vec![10, 12, 11, 13, 10, 12, 11, 14, 10, 13]);
    assert_eq!(oracle.raw_calls("PAY").len(), 116);
}

#[test]
fn test_end_to_end_evaluation() {
    let file = create_call_log();
    let oracle = CallOracle::open(file.path()).unwrap();

    let outcome = oracle.evaluate("PAY");
    let evaluation = outcome.evaluation().unwrap();

    assert_eq!(evaluation.train_len(), 8);
    assert!(evaluation.runs().iter().all(|run| run.mse.is_finite()));
    assert!(evaluation.forecast_for(ModelChoice::Best).is_some());
    assert_eq!(
        evaluation
            .forecast_for(ModelChoice::Model(ModelKind::Arima))
            .unwrap()
            .model,
        ModelKind::Arima
    );
}

#[test]
fn test_unknown_api_has_no_data() {
    let file = create_call_log();
    let oracle = CallOracle::open(file.path()).unwrap();

    assert!(oracle.build_daily_series("UNKNOWN").is_empty());
    assert!(matches!(
        oracle.evaluate("UNKNOWN"),
        EvaluationOutcome::NoData { .. }
    ));
}

#[test]
fn test_export_writes_named_file() {
    let file = create_call_log();
    let oracle = CallOracle::open(file.path()).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join(oracle.export_file_name("AUTH"));
    let rows = oracle
        .write_csv("AUTH", fs::File::create(&path).unwrap())
        .unwrap();

    assert_eq!(rows, 4);
    assert!(path.ends_with("AUTH_calls.csv"));

    let written = fs::read_to_string(&path).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("API Code,Time of Call,Region"));
    assert_eq!(lines.next(), Some("AUTH,2024-06-01 12:00:00,us"));
    assert_eq!(written.as_bytes(), oracle.export_csv("AUTH").unwrap().as_slice());
}

#[test]
fn test_missing_dataset_is_fatal() {
    let result = CallOracle::open("/nonexistent/API Call Dataset.csv");
    assert!(matches!(result, Err(OracleError::CallLog(_))));
}

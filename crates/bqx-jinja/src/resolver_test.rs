use super::*;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDate;

fn job(sql: &str, destination: &str, json_vars: &str, y: i32, m: u32, d: u32) -> JobInvocation {
    JobInvocation::new(sql, destination)
        .with_json_vars(json_vars)
        .with_execution_date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn test_plain_sql_passthrough() {
    let resolved = resolve_job(&job("SELECT 1 AS x", "gs://b/f.csv.gz", "{}", 2024, 1, 1)).unwrap();
    assert_eq!(
        resolved,
        ResolvedJob {
            sql: "SELECT 1 AS x".to_string(),
            destination_uri: "gs://b/f.csv.gz".to_string(),
        }
    );
}

#[test]
fn test_base64_sql_is_rendered() {
    let sql = "SELECT * FROM `p.d.events` WHERE day = '{{ yesterday_dash }}' AND country = '{{ country }}'";
    let resolved = resolve_job(&job(
        &STANDARD.encode(sql),
        "gs://exports/{{ country }}/{{ today_slash }}/events-*.csv.gz",
        r#"{"country": "NL"}"#,
        2024,
        3,
        2,
    ))
    .unwrap();

    assert_eq!(
        resolved.sql,
        "SELECT * FROM `p.d.events` WHERE day = '2024-03-01' AND country = 'NL'"
    );
    assert_eq!(
        resolved.destination_uri,
        "gs://exports/NL/2024/03/02/events-*.csv.gz"
    );
}

#[test]
fn test_malformed_vars_use_globals_only() {
    let resolved = resolve_job(&job(
        "SELECT '{{ today_dash }}'",
        "gs://b/{{ yesterday_slash }}.csv.gz",
        "{not json",
        2024,
        3,
        2,
    ))
    .unwrap();
    assert_eq!(resolved.sql, "SELECT '2024-03-02'");
    assert_eq!(resolved.destination_uri, "gs://b/2024/03/01.csv.gz");
}

#[test]
fn test_sql_template_error_names_template() {
    let err = resolve_job(&job("SELECT {{ missing }}", "gs://b/f.csv.gz", "{}", 2024, 1, 1))
        .unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("[J001]"));
    assert!(message.contains("sql template"));
}

#[test]
fn test_destination_template_error_names_template() {
    let err = resolve_job(&job("SELECT 1", "gs://b/{{ missing }}.csv.gz", "{}", 2024, 1, 1))
        .unwrap_err();
    assert!(err.to_string().contains("destination-uri template"));
}

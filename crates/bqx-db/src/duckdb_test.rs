use super::*;

fn staging(table: &str) -> StagingTableRef {
    StagingTableRef::new("local", "tmp", table)
}

fn read_back_count(db: &DuckDbBackend, path: &Path) -> usize {
    db.query_count(&format!(
        "SELECT * FROM read_csv({}, header = true)",
        quote_literal(&path.to_string_lossy())
    ))
    .unwrap()
}

#[tokio::test]
async fn test_in_memory() {
    let db = DuckDbBackend::in_memory().unwrap();
    assert_eq!(db.warehouse_type(), "duckdb");
}

#[tokio::test]
async fn test_new_memory_path() {
    let db = DuckDbBackend::new(":memory:").unwrap();
    db.execute_batch("SELECT 1").unwrap();
}

#[tokio::test]
async fn test_query_to_table_creates_schema_and_table() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = staging("abc-123");
    db.query_to_table(
        "SELECT * FROM range(5) t(n)",
        &table,
        WriteDisposition::Truncate,
    )
    .await
    .unwrap();

    assert_eq!(db.table_row_count(&table).unwrap(), 5);
}

#[tokio::test]
async fn test_query_to_table_truncate_replaces() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = staging("t");
    db.query_to_table("SELECT * FROM range(10) t(n)", &table, WriteDisposition::Truncate)
        .await
        .unwrap();
    db.query_to_table("SELECT 'x' AS s", &table, WriteDisposition::Truncate)
        .await
        .unwrap();

    assert_eq!(db.table_row_count(&table).unwrap(), 1);
}

#[tokio::test]
async fn test_query_to_table_trailing_semicolon() {
    let db = DuckDbBackend::in_memory().unwrap();
    let table = staging("t");
    db.query_to_table("SELECT 1 AS x;\n", &table, WriteDisposition::Truncate)
        .await
        .unwrap();
    assert_eq!(db.table_row_count(&table).unwrap(), 1);
}

#[tokio::test]
async fn test_query_to_table_invalid_sql() {
    let db = DuckDbBackend::in_memory().unwrap();
    let err = db
        .query_to_table("SELEC 1", &staging("t"), WriteDisposition::Truncate)
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ExecutionError(_)));
    assert!(err.to_string().contains("SELEC 1"));
}

#[tokio::test]
async fn test_extract_writes_gzip_csv() {
    let dir = tempfile::tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let table = staging("t");
    db.query_to_table(
        "SELECT n, 'row ' || n AS label FROM range(3) t(n)",
        &table,
        WriteDisposition::Truncate,
    )
    .await
    .unwrap();

    let path = dir.path().join("out.csv.gz");
    db.extract_table(&table, path.to_str().unwrap(), &ExtractOptions::gzip_csv())
        .await
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..2], &[0x1f, 0x8b], "expected gzip magic bytes");
    assert_eq!(read_back_count(&db, &path), 3);
}

#[tokio::test]
async fn test_extract_file_uri_and_nested_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let table = staging("t");
    db.query_to_table("SELECT 1 AS x", &table, WriteDisposition::Truncate)
        .await
        .unwrap();

    let path = dir.path().join("2024/03/02/out.csv.gz");
    let uri = format!("file://{}", path.display());
    db.extract_table(&table, &uri, &ExtractOptions::gzip_csv())
        .await
        .unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_extract_wildcard_names_first_shard() {
    let dir = tempfile::tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    let table = staging("t");
    db.query_to_table("SELECT 1 AS x", &table, WriteDisposition::Truncate)
        .await
        .unwrap();

    let uri = format!("{}/part-*.csv.gz", dir.path().display());
    db.extract_table(&table, &uri, &ExtractOptions::gzip_csv())
        .await
        .unwrap();

    assert!(dir.path().join("part-000000000000.csv.gz").exists());
}

#[tokio::test]
async fn test_extract_missing_table() {
    let dir = tempfile::tempdir().unwrap();
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE SCHEMA tmp").unwrap();

    let path = dir.path().join("out.csv.gz");
    let err = db
        .extract_table(
            &staging("never_staged"),
            path.to_str().unwrap(),
            &ExtractOptions::gzip_csv(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::TableNotFound(_) | DbError::ExtractError(_)
    ));
    assert!(!path.exists());
}

#[test]
fn test_copy_statement() {
    let sql = copy_statement(
        &staging("abc"),
        Path::new("/tmp/it's.csv.gz"),
        &ExtractOptions::gzip_csv(),
    );
    assert_eq!(
        sql,
        "COPY \"tmp\".\"abc\" TO '/tmp/it''s.csv.gz' (FORMAT CSV, DELIMITER ',', HEADER true, COMPRESSION gzip)"
    );
}

#[test]
fn test_local_path() {
    assert_eq!(local_path("file:///a/b.csv.gz"), PathBuf::from("/a/b.csv.gz"));
    assert_eq!(local_path("out/b.csv.gz"), PathBuf::from("out/b.csv.gz"));
    assert_eq!(
        local_path("/x/part-*.csv.gz"),
        PathBuf::from("/x/part-000000000000.csv.gz")
    );
}

#[test]
fn test_qualified_name_quotes() {
    assert_eq!(
        qualified_name(&StagingTableRef::new("p", "tmp", "a\"b")),
        "\"tmp\".\"a\"\"b\""
    );
}

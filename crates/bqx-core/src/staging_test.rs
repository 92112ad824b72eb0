use super::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingIds(AtomicUsize);

impl IdGenerator for CountingIds {
    fn next_id(&self) -> String {
        format!("stage_{}", self.0.fetch_add(1, Ordering::SeqCst))
    }
}

#[test]
fn test_display_three_part_name() {
    let table = StagingTableRef::new("proj", "tmp", "abc");
    assert_eq!(table.to_string(), "proj.tmp.abc");
    assert_eq!(table.project(), "proj");
    assert_eq!(table.dataset(), "tmp");
    assert_eq!(table.table(), "abc");
}

#[test]
fn test_generate_uses_config_and_generator() {
    let config = ExportConfig::new("proj", "staging");
    let ids = CountingIds(AtomicUsize::new(7));

    let table = StagingTableRef::generate(&config, &ids);
    assert_eq!(table.to_string(), "proj.staging.stage_7");

    let next = StagingTableRef::generate(&config, &ids);
    assert_eq!(next.table(), "stage_8");
}

#[test]
fn test_uuid_generator_is_unique() {
    let config = ExportConfig::new("proj", "staging");
    let refs: HashSet<StagingTableRef> = (0..100)
        .map(|_| StagingTableRef::generate(&config, &UuidGenerator))
        .collect();
    assert_eq!(refs.len(), 100);
}

#[test]
fn test_uuid_generator_format() {
    let id = UuidGenerator.next_id();
    assert!(uuid::Uuid::parse_str(&id).is_ok());
}

use std::fs;
use std::sync::Arc;

use qube_job::{CleanupContext, CleanupStep, StepState};
use qube_storage::{MemStoreClient, StoreClient, TableDescriptor, TABLE_OWNER_TAG};

const PREFIX: &str = "qube_metadata";

fn table_owned_by(name: &str, owner: &str) -> TableDescriptor {
    let mut descriptor = TableDescriptor::new(name);
    descriptor.set_tag(TABLE_OWNER_TAG, owner);
    descriptor
}

fn ctx_with_tables(tables: Vec<TableDescriptor>) -> CleanupContext {
    let client = MemStoreClient::new("store://main");
    for table in tables {
        client.create_table(table).unwrap();
    }
    CleanupContext {
        client: Arc::new(client),
        metadata_prefix: PREFIX.to_string(),
    }
}

#[test]
fn only_owned_tables_are_dropped() {
    qube_test_utils::init_tracing();
    let ctx = ctx_with_tables(vec![
        table_owned_by("T1", PREFIX),
        table_owned_by("T2", "other_deployment"),
    ]);

    let outcome = CleanupStep::new()
        .with_obsolete_tables(vec!["T1".to_string(), "T2".to_string()])
        .execute(&ctx);

    assert_eq!(outcome.state, StepState::Succeed);
    assert!(outcome.output.contains("Dropped table T1"));
    assert!(outcome.output.contains("Skipped table T2"));
    assert!(!ctx.client.table_exists("T1").unwrap());
    assert!(ctx.client.table_exists("T2").unwrap());
}

#[test]
fn untagged_and_missing_tables_are_left_alone() {
    let ctx = ctx_with_tables(vec![TableDescriptor::new("T1")]);

    let outcome = CleanupStep::new()
        .with_obsolete_tables(vec!["T1".to_string(), "NEVER_EXISTED".to_string()])
        .execute(&ctx);

    assert_eq!(outcome.state, StepState::Succeed);
    assert!(outcome.output.contains("Skipped table T1"));
    assert!(!outcome.output.contains("NEVER_EXISTED"));
    assert!(ctx.client.table_exists("T1").unwrap());
}

#[test]
fn paths_are_deleted_with_trailing_wildcard_stripped() {
    let ctx = ctx_with_tables(vec![]);
    let dir = tempfile::tempdir().unwrap();
    let segment_dir = dir.path().join("segment_1");
    fs::create_dir(&segment_dir).unwrap();
    fs::write(segment_dir.join("part-0"), b"data").unwrap();

    let wildcard = format!("{}*", segment_dir.display());
    let missing = dir.path().join("segment_2").display().to_string();

    let outcome = CleanupStep::new()
        .with_obsolete_paths(vec![wildcard, missing.clone()])
        .execute(&ctx);

    assert_eq!(outcome.state, StepState::Succeed);
    assert!(!segment_dir.exists());
    assert!(outcome
        .output
        .contains(&format!("Dropped path \"{}\"", segment_dir.display())));
    assert!(outcome
        .output
        .contains(&format!("Path not exists: \"{missing}\"")));
}

#[test]
fn staging_table_is_dropped_without_ownership_guard() {
    let ctx = ctx_with_tables(vec![TableDescriptor::new("STAGING_X")]);

    let outcome = CleanupStep::new()
        .with_obsolete_staging_table("STAGING_X")
        .execute(&ctx);

    assert_eq!(outcome.state, StepState::Succeed);
    assert!(outcome.output.contains("Dropped staging table STAGING_X"));
    assert!(!ctx.client.table_exists("STAGING_X").unwrap());
}

#[test]
fn failure_keeps_transcript_and_does_not_roll_back_prior_deletions() {
    // the path sub-step succeeds, then the staging drop hits a closed
    // connection
    let client = Arc::new(MemStoreClient::new("store://main"));
    let ctx = CleanupContext {
        client: Arc::clone(&client) as Arc<dyn StoreClient>,
        metadata_prefix: PREFIX.to_string(),
    };

    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("old.data");
    fs::write(&data_file, b"data").unwrap();

    let step = CleanupStep::new()
        .with_obsolete_paths(vec![data_file.display().to_string()])
        .with_obsolete_staging_table("STAGING_X");

    client.close();
    let outcome = step.execute(&ctx);

    assert_eq!(outcome.state, StepState::Error);
    assert!(outcome.output.contains("Storage error"));
    // the successful path deletion is recorded and not rolled back
    assert!(outcome.output.contains("Dropped path"));
    assert!(!data_file.exists());
}

#[test]
fn failure_aborts_remaining_sub_steps() {
    let client = Arc::new(MemStoreClient::new("store://main"));
    let ctx = CleanupContext {
        client: Arc::clone(&client) as Arc<dyn StoreClient>,
        metadata_prefix: PREFIX.to_string(),
    };

    let dir = tempfile::tempdir().unwrap();
    let data_file = dir.path().join("old.data");
    fs::write(&data_file, b"data").unwrap();

    // the tables sub-step fails first, so the path sub-step never runs
    client.close();
    let outcome = CleanupStep::new()
        .with_obsolete_tables(vec!["T1".to_string()])
        .with_obsolete_paths(vec![data_file.display().to_string()])
        .execute(&ctx);

    assert_eq!(outcome.state, StepState::Error);
    assert!(data_file.exists());
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use qube_storage::{
    create_table_if_needed, drop_table_if_exists, MemStoreClient, RetryOptions, StoreClient,
    StorePool, TABLE_OWNER_TAG, TABLE_UUID_TAG,
};

fn mem_pool() -> StorePool {
    StorePool::new(|url, _retry| Ok(Arc::new(MemStoreClient::new(url)) as Arc<dyn StoreClient>))
}

#[test]
fn connection_is_cached_per_url() {
    qube_test_utils::init_tracing();
    let pool = mem_pool();

    let a = pool.connection("store://main").unwrap();
    let b = pool.connection("store://main").unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    let other = pool.connection("store://other").unwrap();
    assert!(!Arc::ptr_eq(&a, &other));
}

#[test]
fn closed_connection_is_replaced_after_pause() {
    let calls = Arc::new(AtomicUsize::new(0));
    let factory_calls = Arc::clone(&calls);
    let pool = StorePool::new(move |url, _retry| {
        let n = factory_calls.fetch_add(1, Ordering::SeqCst);
        let client = MemStoreClient::new(url);
        if n == 0 {
            // first connection comes up already closed
            client.close();
        }
        Ok(Arc::new(client) as Arc<dyn StoreClient>)
    })
    .with_reconnect_pause(Duration::from_millis(1));

    let conn = pool.connection("store://flaky").unwrap();
    assert!(!conn.is_closed());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn shutdown_closes_cached_connections() {
    let pool = mem_pool();
    let conn = pool.connection("store://main").unwrap();
    pool.shutdown();
    assert!(conn.is_closed());
}

#[test]
fn retry_options_default_to_bounded_client_retries() {
    let retry = RetryOptions::default();
    assert_eq!(retry.max_client_retries, 5);
    assert_eq!(retry.retry_pause, Duration::from_secs(3));
    assert_eq!(retry.operation_timeout, Duration::from_secs(60));
}

#[test]
fn create_if_needed_is_idempotent_and_tags_the_table() {
    let client = MemStoreClient::new("store://main");

    create_table_if_needed(&client, "CUBE_T1", &["F1", "F2"], Some("qube_metadata")).unwrap();
    // second call is a no-op, not an error
    create_table_if_needed(&client, "CUBE_T1", &["F1", "F2"], Some("qube_metadata")).unwrap();

    let descriptor = client.table_descriptor("CUBE_T1").unwrap().unwrap();
    assert_eq!(descriptor.families, vec!["F1".to_string(), "F2".to_string()]);
    assert!(descriptor.tag(TABLE_UUID_TAG).is_some());
    assert_eq!(descriptor.tag(TABLE_OWNER_TAG), Some("qube_metadata"));
}

#[test]
fn drop_if_exists_tolerates_missing_tables() {
    let client = MemStoreClient::new("store://main");
    drop_table_if_exists(&client, "NEVER_CREATED").unwrap();

    create_table_if_needed(&client, "CUBE_T1", &[], None).unwrap();
    drop_table_if_exists(&client, "CUBE_T1").unwrap();
    assert!(!client.table_exists("CUBE_T1").unwrap());
}

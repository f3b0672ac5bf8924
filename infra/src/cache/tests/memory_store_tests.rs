//! Unit tests for the in-memory OTP store

use chrono::{Duration, Utc};
use std::sync::Arc;
use tokio_test::assert_ok;

use pv_core::domain::entities::OtpEntry;
use pv_core::services::otp::OtpStore;

use crate::cache::InMemoryOtpStore;

fn entry(identifier: &str, offset_secs: i64) -> OtpEntry {
    OtpEntry::issue(
        identifier,
        Utc::now() + Duration::seconds(offset_secs),
        Duration::minutes(5),
    )
}

#[tokio::test]
async fn test_put_replaces_previous_entry() {
    let store = InMemoryOtpStore::unbounded();
    let first = entry("+919999999999", 0);
    let second = entry("+919999999999", 10);

    assert_ok!(store.put(&first).await);
    assert_ok!(store.put(&second).await);

    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(store.get("+919999999999").await.unwrap(), Some(second));
}

#[tokio::test]
async fn test_consume_requires_matching_entry_id() {
    let store = InMemoryOtpStore::unbounded();
    let first = entry("+919999999999", 0);
    let second = entry("+919999999999", 10);
    store.put(&first).await.unwrap();
    store.put(&second).await.unwrap();

    // A stale id never removes the newer entry
    assert!(!store.consume("+919999999999", first.id).await.unwrap());
    assert!(store.get("+919999999999").await.unwrap().is_some());

    assert!(store.consume("+919999999999", second.id).await.unwrap());
    assert!(!store.consume("+919999999999", second.id).await.unwrap());
    assert!(store.is_empty().unwrap());
}

#[tokio::test]
async fn test_delete() {
    let store = InMemoryOtpStore::default();
    store.put(&entry("+919999999999", 0)).await.unwrap();

    assert!(store.delete("+919999999999").await.unwrap());
    assert!(!store.delete("+919999999999").await.unwrap());
    assert_eq!(store.get("+919999999999").await.unwrap(), None);
}

#[tokio::test]
async fn test_purge_expired() {
    let store = InMemoryOtpStore::unbounded();
    let old = entry("+911111111111", -400);
    let fresh = entry("+912222222222", 0);
    store.put(&old).await.unwrap();
    store.put(&fresh).await.unwrap();

    assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 1);
    assert_eq!(store.get("+911111111111").await.unwrap(), None);
    assert_eq!(store.get("+912222222222").await.unwrap(), Some(fresh));
}

#[tokio::test]
async fn test_capacity_prefers_expired_entries() {
    let store = InMemoryOtpStore::new(Some(2));
    store.put(&entry("+911111111111", -400)).await.unwrap();
    store.put(&entry("+912222222222", -100)).await.unwrap();
    store.put(&entry("+913333333333", 0)).await.unwrap();

    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(store.get("+911111111111").await.unwrap(), None);
    assert!(store.get("+912222222222").await.unwrap().is_some());
}

#[tokio::test]
async fn test_full_store_refuses_new_identifier_and_keeps_live_codes() {
    let store = InMemoryOtpStore::new(Some(2));
    let first = entry("+911111111111", -60);
    store.put(&first).await.unwrap();
    store.put(&entry("+912222222222", -30)).await.unwrap();

    assert!(store.put(&entry("+913333333333", 0)).await.is_err());
    assert_eq!(store.len().unwrap(), 2);
    assert_eq!(store.get("+911111111111").await.unwrap(), Some(first));
    assert_eq!(store.get("+913333333333").await.unwrap(), None);

    // Replacing an existing identifier is always allowed
    assert_ok!(store.put(&entry("+912222222222", 5)).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_consume_succeeds_once() {
    let store = Arc::new(InMemoryOtpStore::unbounded());
    let issued = entry("+919999999999", 0);
    store.put(&issued).await.unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = store.clone();
            let id = issued.id;
            tokio::spawn(async move { store.consume("+919999999999", id).await.unwrap() })
        })
        .collect();

    let mut consumed = 0;
    for handle in handles {
        if handle.await.unwrap() {
            consumed += 1;
        }
    }
    assert_eq!(consumed, 1);
}

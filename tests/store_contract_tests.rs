use pixlimit::domain::client::{Amount, ClientKey, ClientPixRecord, PixLimit};
use pixlimit::domain::outcome::{CreateOutcome, DebitOutcome, Deletion, LimitUpdate};
use pixlimit::domain::ports::LimitStoreBox;
use pixlimit::infrastructure::in_memory::InMemoryLimitStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn key() -> ClientKey {
    ClientKey::new("123", "456").unwrap()
}

fn record(limit: Decimal) -> ClientPixRecord {
    ClientPixRecord::new(key(), PixLimit::new(limit).unwrap(), "0001", "98765-4")
}

fn amount(value: Decimal) -> Amount {
    Amount::new(value).unwrap()
}

async fn stored_limit(store: &LimitStoreBox) -> Option<Decimal> {
    store
        .fetch(&key())
        .await
        .unwrap()
        .map(|record| record.pix_limit.value())
}

/// Create, debit, deny, set, delete against any store.
async fn check_reference_scenario(store: LimitStoreBox) {
    let outcome = store.create(record(dec!(5000))).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Created(record(dec!(5000))));

    let outcome = store.debit_if_sufficient(&key(), amount(dec!(100))).await.unwrap();
    assert_eq!(
        outcome,
        DebitOutcome::Approved {
            new_limit: PixLimit::new(dec!(4900)).unwrap()
        }
    );

    let outcome = store.debit_if_sufficient(&key(), amount(dec!(9000))).await.unwrap();
    assert_eq!(outcome, DebitOutcome::Denied);
    assert_eq!(stored_limit(&store).await, Some(dec!(4900)));

    let outcome = store
        .set_limit(&key(), PixLimit::new(dec!(7500)).unwrap())
        .await
        .unwrap();
    assert_eq!(outcome, LimitUpdate::Updated);
    assert_eq!(stored_limit(&store).await, Some(dec!(7500)));

    assert_eq!(store.delete(&key()).await.unwrap(), Deletion::Deleted);
    assert_eq!(stored_limit(&store).await, None);
}

async fn check_uniqueness(store: LimitStoreBox) {
    store.create(record(dec!(5000))).await.unwrap();

    let mut other = record(dec!(1));
    other.branch_number = "9999".to_string();
    let outcome = store.create(other).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Conflict(key()));

    let stored = store.fetch(&key()).await.unwrap().unwrap();
    assert_eq!(stored, record(dec!(5000)));
}

async fn check_exact_limit_and_fractional_amounts(store: LimitStoreBox) {
    store.create(record(dec!(10.00))).await.unwrap();

    let outcome = store.debit_if_sufficient(&key(), amount(dec!(0.01))).await.unwrap();
    assert_eq!(outcome.new_limit().map(|l| l.value()), Some(dec!(9.99)));

    // Draining to exactly zero is allowed
    let outcome = store.debit_if_sufficient(&key(), amount(dec!(9.99))).await.unwrap();
    assert_eq!(outcome.new_limit(), Some(PixLimit::ZERO));

    let outcome = store.debit_if_sufficient(&key(), amount(dec!(0.01))).await.unwrap();
    assert_eq!(outcome, DebitOutcome::Denied);
    assert_eq!(stored_limit(&store).await, Some(dec!(0)));
}

async fn check_missing_key_never_creates(store: LimitStoreBox) {
    assert_eq!(
        store.debit_if_sufficient(&key(), amount(dec!(1))).await.unwrap(),
        DebitOutcome::Denied
    );
    assert_eq!(
        store
            .set_limit(&key(), PixLimit::new(dec!(10)).unwrap())
            .await
            .unwrap(),
        LimitUpdate::NotFound
    );
    assert_eq!(store.delete(&key()).await.unwrap(), Deletion::NotFound);
    assert_eq!(stored_limit(&store).await, None);
    assert!(store.fetch_by_document("123").await.unwrap().is_empty());
}

async fn check_fetch_is_idempotent(store: LimitStoreBox) {
    store.create(record(dec!(42))).await.unwrap();

    let first = store.fetch(&key()).await.unwrap();
    let second = store.fetch(&key()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(stored_limit(&store).await, Some(dec!(42)));
}

fn in_memory() -> LimitStoreBox {
    Box::new(InMemoryLimitStore::new())
}

#[tokio::test]
async fn test_in_memory_reference_scenario() {
    check_reference_scenario(in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_uniqueness() {
    check_uniqueness(in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_exact_limit() {
    check_exact_limit_and_fractional_amounts(in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_missing_key() {
    check_missing_key_never_creates(in_memory()).await;
}

#[tokio::test]
async fn test_in_memory_fetch_idempotent() {
    check_fetch_is_idempotent(in_memory()).await;
}

#[cfg(feature = "storage-rocksdb")]
mod rocksdb_store {
    use super::*;
    use pixlimit::infrastructure::rocksdb::RocksDBLimitStore;
    use tempfile::TempDir;

    fn rocksdb() -> (TempDir, LimitStoreBox) {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksDBLimitStore::open(dir.path()).unwrap();
        (dir, Box::new(store))
    }

    #[tokio::test]
    async fn test_rocksdb_reference_scenario() {
        let (_dir, store) = rocksdb();
        check_reference_scenario(store).await;
    }

    #[tokio::test]
    async fn test_rocksdb_uniqueness() {
        let (_dir, store) = rocksdb();
        check_uniqueness(store).await;
    }

    #[tokio::test]
    async fn test_rocksdb_exact_limit() {
        let (_dir, store) = rocksdb();
        check_exact_limit_and_fractional_amounts(store).await;
    }

    #[tokio::test]
    async fn test_rocksdb_missing_key() {
        let (_dir, store) = rocksdb();
        check_missing_key_never_creates(store).await;
    }

    #[tokio::test]
    async fn test_rocksdb_fetch_idempotent() {
        let (_dir, store) = rocksdb();
        check_fetch_is_idempotent(store).await;
    }
}

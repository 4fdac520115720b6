#![cfg(feature = "storage-rocksdb")]

use pixlimit::domain::client::{Amount, ClientKey, ClientPixRecord, PixLimit};
use pixlimit::domain::ports::LimitStore;
use pixlimit::infrastructure::rocksdb::RocksDBLimitStore;
use rust_decimal_macros::dec;
use tempfile::tempdir;

#[tokio::test]
async fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");
    let key = ClientKey::new("123", "456").unwrap();

    // 1. First run: register and debit
    {
        let store = RocksDBLimitStore::open(&db_path).unwrap();
        let record = ClientPixRecord::new(
            key.clone(),
            PixLimit::new(dec!(5000)).unwrap(),
            "0001",
            "98765-4",
        );
        assert!(store.create(record).await.unwrap().is_created());
        let outcome = store
            .debit_if_sufficient(&key, Amount::new(dec!(100)).unwrap())
            .await
            .unwrap();
        assert!(outcome.is_approved());
    }

    // 2. Second run on the same path sees the debited limit and keeps the key taken
    let store = RocksDBLimitStore::open(&db_path).unwrap();
    let recovered = store.fetch(&key).await.unwrap().unwrap();
    assert_eq!(recovered.pix_limit.value(), dec!(4900));
    assert_eq!(recovered.account_number, "98765-4");

    let duplicate = ClientPixRecord::new(key.clone(), PixLimit::ZERO, "0001", "98765-4");
    assert!(!store.create(duplicate).await.unwrap().is_created());
}

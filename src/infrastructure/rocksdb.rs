use crate::domain::client::{Amount, ClientKey, ClientPixRecord, PixLimit};
use crate::domain::outcome::{CreateOutcome, DebitOutcome, Deletion, LimitUpdate};
use crate::domain::ports::LimitStore;
use crate::error::{LimitError, Result};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, Direction, IteratorMode, Options, TransactionDB,
    TransactionDBOptions,
};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding client PIX records.
pub const CF_PIX_CLIENTS: &str = "pix_clients";

const KEY_SEPARATOR: u8 = 0;

/// A persistent limit store backed by a RocksDB `TransactionDB`.
///
/// Each operation runs in its own pessimistic transaction. `get_for_update`
/// takes the row lock before the precondition is checked (also for keys that
/// do not exist yet), so the check and the staged write commit as one unit and
/// concurrent writers on the same key queue behind each other.
///
/// Keys are `document ‖ 0x00 ‖ account_id`, which keeps all accounts of one
/// document contiguous for `fetch_by_document`.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<TransactionDB>`).
#[derive(Clone)]
pub struct RocksDBLimitStore {
    db: Arc<TransactionDB>,
}

impl RocksDBLimitStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "pix_clients" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_clients = ColumnFamilyDescriptor::new(CF_PIX_CLIENTS, Options::default());
        let txn_opts = TransactionDBOptions::default();

        let db: TransactionDB =
            TransactionDB::open_cf_descriptors(&opts, &txn_opts, path, vec![cf_clients])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn clients_cf(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_PIX_CLIENTS).ok_or_else(|| {
            LimitError::InternalError(Box::new(std::io::Error::other(
                "PIX clients column family not found",
            )))
        })
    }

    fn fetch_sync(&self, key: &ClientKey) -> Result<Option<ClientPixRecord>> {
        let cf = self.clients_cf()?;
        match self.db.get_cf(cf, encode_key(key))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn fetch_by_document_sync(&self, document: &str) -> Result<Vec<ClientPixRecord>> {
        let cf = self.clients_cf()?;
        let prefix = document_prefix(document);

        let mut records = Vec::new();
        let iter = self
            .db
            .iterator_cf(cf, IteratorMode::From(prefix.as_slice(), Direction::Forward));

        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(&prefix) {
                break;
            }
            records.push(serde_json::from_slice(&value)?);
        }

        Ok(records)
    }

    fn create_sync(&self, record: ClientPixRecord) -> Result<CreateOutcome> {
        let cf = self.clients_cf()?;
        let key = record.key();
        let raw_key = encode_key(&key);

        let txn = self.db.transaction();
        if txn.get_for_update_cf(cf, &raw_key, true)?.is_some() {
            return Ok(CreateOutcome::Conflict(key));
        }
        txn.put_cf(cf, &raw_key, serde_json::to_vec(&record)?)?;
        txn.commit()?;

        Ok(CreateOutcome::Created(record))
    }

    fn set_limit_sync(&self, key: &ClientKey, new_limit: PixLimit) -> Result<LimitUpdate> {
        let cf = self.clients_cf()?;
        let raw_key = encode_key(key);

        let txn = self.db.transaction();
        let Some(bytes) = txn.get_for_update_cf(cf, &raw_key, true)? else {
            return Ok(LimitUpdate::NotFound);
        };
        let mut record: ClientPixRecord = serde_json::from_slice(&bytes)?;
        record.pix_limit = new_limit;
        txn.put_cf(cf, &raw_key, serde_json::to_vec(&record)?)?;
        txn.commit()?;

        Ok(LimitUpdate::Updated)
    }

    fn delete_sync(&self, key: &ClientKey) -> Result<Deletion> {
        let cf = self.clients_cf()?;
        let raw_key = encode_key(key);

        let txn = self.db.transaction();
        if txn.get_for_update_cf(cf, &raw_key, true)?.is_none() {
            return Ok(Deletion::NotFound);
        }
        txn.delete_cf(cf, &raw_key)?;
        txn.commit()?;

        Ok(Deletion::Deleted)
    }

    fn debit_sync(&self, key: &ClientKey, amount: Amount) -> Result<DebitOutcome> {
        let cf = self.clients_cf()?;
        let raw_key = encode_key(key);

        let txn = self.db.transaction();
        let Some(bytes) = txn.get_for_update_cf(cf, &raw_key, true)? else {
            return Ok(DebitOutcome::Denied);
        };
        let mut record: ClientPixRecord = serde_json::from_slice(&bytes)?;
        let Some(new_limit) = record.pix_limit.checked_debit(amount) else {
            return Ok(DebitOutcome::Denied);
        };
        record.pix_limit = new_limit;
        txn.put_cf(cf, &raw_key, serde_json::to_vec(&record)?)?;
        txn.commit()?;

        Ok(DebitOutcome::Approved { new_limit })
    }
}

fn encode_key(key: &ClientKey) -> Vec<u8> {
    let mut raw = document_prefix(&key.document);
    raw.extend_from_slice(key.account_id.as_bytes());
    raw
}

fn document_prefix(document: &str) -> Vec<u8> {
    let mut raw = Vec::with_capacity(document.len() + 1);
    raw.extend_from_slice(document.as_bytes());
    raw.push(KEY_SEPARATOR);
    raw
}

/// Runs a RocksDB call on the blocking pool. Row-lock waits inside a
/// transaction would otherwise stall a runtime worker.
async fn run_blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| LimitError::InternalError(Box::new(e)))?
}

#[async_trait]
impl LimitStore for RocksDBLimitStore {
    async fn create(&self, record: ClientPixRecord) -> Result<CreateOutcome> {
        let store = self.clone();
        run_blocking(move || store.create_sync(record)).await
    }

    async fn fetch(&self, key: &ClientKey) -> Result<Option<ClientPixRecord>> {
        let store = self.clone();
        let key = key.clone();
        run_blocking(move || store.fetch_sync(&key)).await
    }

    async fn fetch_by_document(&self, document: &str) -> Result<Vec<ClientPixRecord>> {
        let store = self.clone();
        let document = document.to_string();
        run_blocking(move || store.fetch_by_document_sync(&document)).await
    }

    async fn set_limit(&self, key: &ClientKey, new_limit: PixLimit) -> Result<LimitUpdate> {
        let store = self.clone();
        let key = key.clone();
        run_blocking(move || store.set_limit_sync(&key, new_limit)).await
    }

    async fn delete(&self, key: &ClientKey) -> Result<Deletion> {
        let store = self.clone();
        let key = key.clone();
        run_blocking(move || store.delete_sync(&key)).await
    }

    async fn debit_if_sufficient(&self, key: &ClientKey, amount: Amount) -> Result<DebitOutcome> {
        let store = self.clone();
        let key = key.clone();
        run_blocking(move || store.debit_sync(&key, amount)).await
    }
}

use crate::domain::client::{Amount, ClientKey, ClientPixRecord, PixLimit};
use crate::domain::outcome::{CreateOutcome, DebitOutcome, Deletion, LimitUpdate};
use crate::domain::ports::LimitStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for client PIX records.
///
/// Uses `Arc<RwLock<BTreeMap<ClientKey, ClientPixRecord>>>`. Each conditional
/// write holds the write lock across both its check and its mutation, so two
/// operations on the same key can never interleave.
#[derive(Default, Clone)]
pub struct InMemoryLimitStore {
    records: Arc<RwLock<BTreeMap<ClientKey, ClientPixRecord>>>,
}

impl InMemoryLimitStore {
    /// Creates a new, empty in-memory limit store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LimitStore for InMemoryLimitStore {
    async fn create(&self, record: ClientPixRecord) -> Result<CreateOutcome> {
        let key = record.key();
        let mut records = self.records.write().await;
        if records.contains_key(&key) {
            return Ok(CreateOutcome::Conflict(key));
        }
        records.insert(key, record.clone());
        Ok(CreateOutcome::Created(record))
    }

    async fn fetch(&self, key: &ClientKey) -> Result<Option<ClientPixRecord>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn fetch_by_document(&self, document: &str) -> Result<Vec<ClientPixRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|(key, _)| key.document == document)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn set_limit(&self, key: &ClientKey, new_limit: PixLimit) -> Result<LimitUpdate> {
        let mut records = self.records.write().await;
        match records.get_mut(key) {
            Some(record) => {
                record.pix_limit = new_limit;
                Ok(LimitUpdate::Updated)
            }
            None => Ok(LimitUpdate::NotFound),
        }
    }

    async fn delete(&self, key: &ClientKey) -> Result<Deletion> {
        let mut records = self.records.write().await;
        match records.remove(key) {
            Some(_) => Ok(Deletion::Deleted),
            None => Ok(Deletion::NotFound),
        }
    }

    async fn debit_if_sufficient(&self, key: &ClientKey, amount: Amount) -> Result<DebitOutcome> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(key)
            && let Some(new_limit) = record.pix_limit.checked_debit(amount)
        {
            record.pix_limit = new_limit;
            return Ok(DebitOutcome::Approved { new_limit });
        }
        Ok(DebitOutcome::Denied)
    }
}

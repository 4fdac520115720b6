use super::client::{Amount, ClientKey, ClientPixRecord, PixLimit};
use super::outcome::{CreateOutcome, DebitOutcome, Deletion, LimitUpdate};
use crate::error::Result;
use async_trait::async_trait;

/// Durable owner of client PIX records.
///
/// Every method is a single atomic operation against the backing store. In
/// particular `debit_if_sufficient` must evaluate "record exists and limit
/// covers the amount" and apply the subtraction without a window in which a
/// concurrent call on the same key can interleave.
#[async_trait]
pub trait LimitStore: Send + Sync {
    /// Persists `record` unless its key is already taken.
    async fn create(&self, record: ClientPixRecord) -> Result<CreateOutcome>;
    async fn fetch(&self, key: &ClientKey) -> Result<Option<ClientPixRecord>>;
    /// All records under one document, ordered by account id.
    async fn fetch_by_document(&self, document: &str) -> Result<Vec<ClientPixRecord>>;
    /// Replaces the limit of an existing record, whatever its previous value.
    async fn set_limit(&self, key: &ClientKey, new_limit: PixLimit) -> Result<LimitUpdate>;
    async fn delete(&self, key: &ClientKey) -> Result<Deletion>;
    async fn debit_if_sufficient(&self, key: &ClientKey, amount: Amount) -> Result<DebitOutcome>;
}

pub type LimitStoreBox = Box<dyn LimitStore>;

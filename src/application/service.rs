use crate::domain::client::{Amount, ClientKey, ClientPixRecord, PixLimit, validate_key_part};
use crate::domain::outcome::{CreateOutcome, DebitOutcome, Deletion, LimitUpdate};
use crate::domain::ports::LimitStoreBox;
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Request to register a client account with its initial PIX limit.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateClientCommand {
    pub document: String,
    pub account_id: String,
    pub pix_limit: Decimal,
    pub branch_number: String,
    pub account_number: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetLimitCommand {
    pub document: String,
    pub account_id: String,
    pub new_limit: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessTransactionCommand {
    pub document: String,
    pub account_id: String,
    pub amount: Decimal,
}

/// Entry point for PIX limit management.
///
/// `PixLimitService` validates incoming commands into domain values and then
/// performs exactly one store operation per call. It keeps no state of its
/// own; concurrent calls on the same account are serialized by the store.
pub struct PixLimitService {
    store: LimitStoreBox,
}

impl PixLimitService {
    /// Creates a new `PixLimitService` over the given store.
    pub fn new(store: LimitStoreBox) -> Self {
        Self { store }
    }

    /// Registers a new client record.
    ///
    /// Returns `CreateOutcome::Conflict` when the document/account pair is
    /// already registered. Validation failures never reach the store.
    pub async fn create_client(&self, cmd: CreateClientCommand) -> Result<CreateOutcome> {
        let key = ClientKey::new(cmd.document, cmd.account_id)?;
        let limit = PixLimit::new(cmd.pix_limit)?;
        let record = ClientPixRecord::new(key, limit, cmd.branch_number, cmd.account_number);

        let outcome = self.store.create(record).await?;
        match &outcome {
            CreateOutcome::Created(record) => info!(
                document = %record.document,
                account_id = %record.account_id,
                pix_limit = %record.pix_limit,
                "client registered"
            ),
            CreateOutcome::Conflict(key) => warn!(
                document = %key.document,
                account_id = %key.account_id,
                "client already registered"
            ),
        }
        Ok(outcome)
    }

    pub async fn get_client(&self, document: &str, account_id: &str) -> Result<Option<ClientPixRecord>> {
        let key = ClientKey::new(document, account_id)?;
        self.store.fetch(&key).await
    }

    /// Lists every account registered under `document`.
    pub async fn list_accounts(&self, document: &str) -> Result<Vec<ClientPixRecord>> {
        validate_key_part("document", document)?;
        self.store.fetch_by_document(document).await
    }

    pub async fn set_limit(&self, cmd: SetLimitCommand) -> Result<LimitUpdate> {
        let key = ClientKey::new(cmd.document, cmd.account_id)?;
        let new_limit = PixLimit::new(cmd.new_limit)?;

        let outcome = self.store.set_limit(&key, new_limit).await?;
        match outcome {
            LimitUpdate::Updated => info!(
                document = %key.document,
                account_id = %key.account_id,
                new_limit = %new_limit,
                "pix limit updated"
            ),
            LimitUpdate::NotFound => debug!(
                document = %key.document,
                account_id = %key.account_id,
                "pix limit update for unknown client"
            ),
        }
        Ok(outcome)
    }

    pub async fn delete_client(&self, document: &str, account_id: &str) -> Result<Deletion> {
        let key = ClientKey::new(document, account_id)?;

        let outcome = self.store.delete(&key).await?;
        if outcome.is_deleted() {
            info!(document = %key.document, account_id = %key.account_id, "client removed");
        }
        Ok(outcome)
    }

    /// Debits a PIX transaction against the client's limit.
    ///
    /// The sufficiency check and the subtraction happen in one store
    /// operation. A denial does not say whether the client was missing or the
    /// limit too low.
    pub async fn process_transaction(&self, cmd: ProcessTransactionCommand) -> Result<DebitOutcome> {
        let key = ClientKey::new(cmd.document, cmd.account_id)?;
        let amount = Amount::new(cmd.amount)?;

        let outcome = self.store.debit_if_sufficient(&key, amount).await?;
        match outcome {
            DebitOutcome::Approved { new_limit } => info!(
                document = %key.document,
                account_id = %key.account_id,
                amount = %amount,
                new_limit = %new_limit,
                "pix transaction approved"
            ),
            DebitOutcome::Denied => info!(
                document = %key.document,
                account_id = %key.account_id,
                amount = %amount,
                "pix transaction denied"
            ),
        }
        Ok(outcome)
    }
}

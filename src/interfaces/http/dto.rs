//! Request and response bodies. Money travels as JSON numbers, parsed and
//! written digit for digit without going through `f64`.

use crate::application::service::{CreateClientCommand, ProcessTransactionCommand, SetLimitCommand};
use crate::domain::client::ClientPixRecord;
use crate::domain::outcome::DebitOutcome;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub document: String,
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pix_limit: Decimal,
    pub branch_number: String,
    pub account_number: String,
}

impl From<CreateClientRequest> for CreateClientCommand {
    fn from(req: CreateClientRequest) -> Self {
        Self {
            document: req.document,
            account_id: req.account_id,
            pix_limit: req.pix_limit,
            branch_number: req.branch_number,
            account_number: req.account_number,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetLimitRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub new_pix_limit: Decimal,
}

impl SetLimitRequest {
    pub fn into_command(self, document: String, account_id: String) -> SetLimitCommand {
        SetLimitCommand {
            document,
            account_id,
            new_limit: self.new_pix_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl TransactionRequest {
    pub fn into_command(self, document: String, account_id: String) -> ProcessTransactionCommand {
        ProcessTransactionCommand {
            document,
            account_id,
            amount: self.amount,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientResponse {
    pub document: String,
    pub account_id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub pix_limit: Decimal,
    pub branch_number: String,
    pub account_number: String,
}

impl From<ClientPixRecord> for ClientResponse {
    fn from(record: ClientPixRecord) -> Self {
        Self {
            document: record.document,
            account_id: record.account_id,
            pix_limit: record.pix_limit.value(),
            branch_number: record.branch_number,
            account_number: record.account_number,
        }
    }
}

pub const APPROVED_MESSAGE: &str = "PIX transaction approved.";
pub const DENIED_MESSAGE: &str = "PIX transaction denied. Insufficient limit or client not found.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub approved: bool,
    pub message: &'static str,
    #[serde(
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub new_limit: Option<Decimal>,
}

impl From<DebitOutcome> for TransactionResponse {
    fn from(outcome: DebitOutcome) -> Self {
        match outcome {
            DebitOutcome::Approved { new_limit } => Self {
                approved: true,
                message: APPROVED_MESSAGE,
                new_limit: Some(new_limit.value()),
            },
            DebitOutcome::Denied => Self {
                approved: false,
                message: DENIED_MESSAGE,
                new_limit: None,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

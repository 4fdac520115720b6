use crate::error::LimitError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The remaining amount a client may move through PIX.
///
/// Wraps `rust_decimal::Decimal` and rejects negative values, so a stored
/// limit can never drop below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct PixLimit(Decimal);

/// A strictly positive transaction amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

impl PixLimit {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, LimitError> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LimitError::ValidationError(
                "PIX limit must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the limit left after `amount`, or `None` when it does not cover it.
    pub fn checked_debit(self, amount: Amount) -> Option<Self> {
        if self.0 >= amount.0 {
            Some(Self(self.0 - amount.0))
        } else {
            None
        }
    }
}

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, LimitError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LimitError::ValidationError(
                "Transaction amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for PixLimit {
    type Error = LimitError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PixLimit> for Decimal {
    fn from(limit: PixLimit) -> Self {
        limit.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LimitError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

impl fmt::Display for PixLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Composite key of a client PIX record: partition `document`, sort `account_id`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientKey {
    pub document: String,
    pub account_id: String,
}

impl ClientKey {
    pub fn new(document: impl Into<String>, account_id: impl Into<String>) -> Result<Self, LimitError> {
        let document = document.into();
        let account_id = account_id.into();
        validate_key_part("document", &document)?;
        validate_key_part("account id", &account_id)?;
        Ok(Self {
            document,
            account_id,
        })
    }
}

impl fmt::Display for ClientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "document '{}' and account '{}'",
            self.document, self.account_id
        )
    }
}

/// Checks a single key component. NUL is reserved as the on-disk separator.
pub fn validate_key_part(name: &str, value: &str) -> Result<(), LimitError> {
    if value.trim().is_empty() {
        return Err(LimitError::ValidationError(format!(
            "{} must not be empty",
            name
        )));
    }
    if value.contains('\0') {
        return Err(LimitError::ValidationError(format!(
            "{} must not contain NUL characters",
            name
        )));
    }
    Ok(())
}

/// Persisted PIX limit state for one client account.
///
/// Branch and account numbers are fixed at creation; only `pix_limit` changes
/// afterwards, through a limit update or a debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPixRecord {
    /// Tax/identity document number (partition key).
    pub document: String,
    /// Account identifier (sort key).
    pub account_id: String,
    /// Remaining PIX limit.
    pub pix_limit: PixLimit,
    pub branch_number: String,
    pub account_number: String,
}

impl ClientPixRecord {
    pub fn new(
        key: ClientKey,
        pix_limit: PixLimit,
        branch_number: impl Into<String>,
        account_number: impl Into<String>,
    ) -> Self {
        Self {
            document: key.document,
            account_id: key.account_id,
            pix_limit,
            branch_number: branch_number.into(),
            account_number: account_number.into(),
        }
    }

    pub fn key(&self) -> ClientKey {
        ClientKey {
            document: self.document.clone(),
            account_id: self.account_id.clone(),
        }
    }
}

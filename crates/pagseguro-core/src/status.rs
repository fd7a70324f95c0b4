//! # Transaction Status
//!
//! The gateway reports transaction state as an integer code 0-7. This module
//! maps those codes to a typed enum with human-readable labels.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Transaction state as reported by the gateway's `/v2/transactions` API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    /// Code 0 - state unknown to the gateway
    Unknown,
    /// Code 1 - awaiting payment
    AwaitingPayment,
    /// Code 2 - under risk review
    UnderReview,
    /// Code 3 - paid
    Paid,
    /// Code 4 - funds available to the merchant
    Available,
    /// Code 5 - in dispute
    InDispute,
    /// Code 6 - refunded
    Refunded,
    /// Code 7 - cancelled
    Cancelled,
}

impl TransactionStatus {
    /// The gateway's numeric code for this status
    pub fn code(&self) -> u8 {
        match self {
            TransactionStatus::Unknown => 0,
            TransactionStatus::AwaitingPayment => 1,
            TransactionStatus::UnderReview => 2,
            TransactionStatus::Paid => 3,
            TransactionStatus::Available => 4,
            TransactionStatus::InDispute => 5,
            TransactionStatus::Refunded => 6,
            TransactionStatus::Cancelled => 7,
        }
    }

    /// Human-readable label for this status
    pub fn label(&self) -> &'static str {
        match self {
            TransactionStatus::Unknown => "Unknown",
            TransactionStatus::AwaitingPayment => "Awaiting payment",
            TransactionStatus::UnderReview => "Under review",
            TransactionStatus::Paid => "Paid",
            TransactionStatus::Available => "Available",
            TransactionStatus::InDispute => "In dispute",
            TransactionStatus::Refunded => "Refunded",
            TransactionStatus::Cancelled => "Cancelled",
        }
    }

    /// Whether the payment completed (paid or funds already available)
    pub fn is_settled(&self) -> bool {
        matches!(self, TransactionStatus::Paid | TransactionStatus::Available)
    }
}

impl TryFrom<u8> for TransactionStatus {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(TransactionStatus::Unknown),
            1 => Ok(TransactionStatus::AwaitingPayment),
            2 => Ok(TransactionStatus::UnderReview),
            3 => Ok(TransactionStatus::Paid),
            4 => Ok(TransactionStatus::Available),
            5 => Ok(TransactionStatus::InDispute),
            6 => Ok(TransactionStatus::Refunded),
            7 => Ok(TransactionStatus::Cancelled),
            code => Err(Error::StatusOutOfRange { code }),
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pure lookup from numeric code to label.
///
/// Codes outside the 0-7 table fail with [`Error::StatusOutOfRange`] instead
/// of the silent undefined lookup the legacy bindings performed.
pub fn status_label(code: u8) -> Result<&'static str> {
    TransactionStatus::try_from(code).map(|s| s.label())
}

/// Result of a transaction or notification lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Decoded transaction status
    pub status: TransactionStatus,

    /// Merchant-assigned reference code correlating the checkout
    pub reference: String,
}

impl TransactionSummary {
    /// The gateway's numeric status code
    pub fn code(&self) -> u8 {
        self.status.code()
    }

    /// Human-readable status label
    pub fn label(&self) -> &'static str {
        self.status.label()
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::cart::CartLine;

/// Interpretation of the signed amount returned by `CartStore::pay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    BalanceDue(Decimal),
    Settled,
    ChangeDue(Decimal),
}

impl From<Decimal> for PaymentOutcome {
    fn from(remaining: Decimal) -> Self {
        if remaining < Decimal::ZERO {
            PaymentOutcome::BalanceDue(remaining.abs())
        } else if remaining.is_zero() {
            PaymentOutcome::Settled
        } else {
            PaymentOutcome::ChangeDue(remaining)
        }
    }
}

impl PaymentOutcome {
    pub fn is_complete(&self) -> bool {
        !matches!(self, PaymentOutcome::BalanceDue(_))
    }
}

impl std::fmt::Display for PaymentOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentOutcome::BalanceDue(amount) => write!(f, "balance due {}", amount),
            PaymentOutcome::Settled => write!(f, "paid in full"),
            PaymentOutcome::ChangeDue(amount) => write!(f, "change due {}", amount),
        }
    }
}

/// Record of a completed payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
    pub tendered: Decimal,
    pub change: Decimal,
    pub paid_at: DateTime<Utc>,
}

//! Transaction status breakdown

use paydash_core::{Payment, PaymentStatus};
use serde::{Deserialize, Serialize};

/// Number of payments per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    /// Settled payments
    pub success: usize,
    /// Payments still pending
    pub pending: usize,
    /// Cancelled payments
    pub cancelled: usize,
}

impl StatusCounts {
    /// Count for one status
    #[must_use]
    pub const fn get(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Success => self.success,
            PaymentStatus::Pending => self.pending,
            PaymentStatus::Cancelled => self.cancelled,
        }
    }

    /// Counts in display order (success, pending, cancelled)
    #[must_use]
    pub fn values(&self) -> [usize; 3] {
        PaymentStatus::ALL.map(|status| self.get(status))
    }

    /// Number of payments counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.success + self.pending + self.cancelled
    }

    const fn record(&mut self, status: PaymentStatus) {
        match status {
            PaymentStatus::Success => self.success += 1,
            PaymentStatus::Pending => self.pending += 1,
            PaymentStatus::Cancelled => self.cancelled += 1,
        }
    }
}

/// Count payments per status
#[must_use]
pub fn count_statuses(payments: &[Payment]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for payment in payments {
        counts.record(payment.status);
    }
    counts
}

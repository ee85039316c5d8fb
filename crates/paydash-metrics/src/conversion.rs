//! Buyer conversion metrics

use paydash_core::{Payment, PaymentStatus, User};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Share of users with at least one qualifying payment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionMetrics {
    /// Number of users
    pub total_users: usize,
    /// Distinct users with a payment in the buyer status
    pub buyers: usize,
    /// `total_users - buyers`, floored at zero
    pub non_buyers: usize,
    /// `buyers / total_users * 100`, zero without users
    pub conversion_rate: f64,
    /// Status that qualified a payment
    pub buyer_status: PaymentStatus,
}

/// Compute conversion metrics.
///
/// Buyers are counted from payment `user_id`s and are not cross-checked
/// against `users`; only the user count is taken from there.
#[must_use]
pub fn compute_conversion(
    users: &[User],
    payments: &[Payment],
    buyer_status: PaymentStatus,
) -> ConversionMetrics {
    let buyers = payments
        .iter()
        .filter(|payment| payment.status == buyer_status)
        .map(|payment| payment.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_users = users.len();

    #[allow(clippy::cast_precision_loss)]
    let conversion_rate = if total_users > 0 {
        buyers as f64 / total_users as f64 * 100.0
    } else {
        0.0
    };

    if buyers > total_users {
        tracing::warn!(
            buyers,
            total_users,
            "More buyers than users; payments reference unknown users"
        );
    }

    ConversionMetrics {
        total_users,
        buyers,
        non_buyers: total_users.saturating_sub(buyers),
        conversion_rate,
        buyer_status,
    }
}

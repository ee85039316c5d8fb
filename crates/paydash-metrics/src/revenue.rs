//! Revenue-by-period aggregation
//!
//! Every payment counts towards `total`; the dated buckets compare the
//! payment's calendar date in the reporting time zone against `today`.
//! Status never filters a bucket.

use chrono::{Datelike, Days, FixedOffset, NaiveDate};
use paydash_core::Payment;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One of the five revenue buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevenueBucket {
    /// Same calendar day as today
    Today,
    /// The day before today
    Yesterday,
    /// Same Monday-start week as today
    ThisWeek,
    /// Same calendar month and year as today
    ThisMonth,
    /// Everything
    Total,
}

impl RevenueBucket {
    /// Buckets in display order
    pub const ALL: [Self; 5] = [
        Self::Today,
        Self::Yesterday,
        Self::ThisWeek,
        Self::ThisMonth,
        Self::Total,
    ];
}

/// Revenue totals per bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueSummary {
    /// Revenue today
    #[serde(with = "rust_decimal::serde::float")]
    pub today: Decimal,
    /// Revenue yesterday
    #[serde(with = "rust_decimal::serde::float")]
    pub yesterday: Decimal,
    /// Revenue this week
    #[serde(with = "rust_decimal::serde::float")]
    pub this_week: Decimal,
    /// Revenue this month
    #[serde(with = "rust_decimal::serde::float")]
    pub this_month: Decimal,
    /// Revenue overall
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl RevenueSummary {
    /// Total for a single bucket
    #[must_use]
    pub const fn get(&self, bucket: RevenueBucket) -> Decimal {
        match bucket {
            RevenueBucket::Today => self.today,
            RevenueBucket::Yesterday => self.yesterday,
            RevenueBucket::ThisWeek => self.this_week,
            RevenueBucket::ThisMonth => self.this_month,
            RevenueBucket::Total => self.total,
        }
    }

    /// Totals in display order
    #[must_use]
    pub fn values(&self) -> [Decimal; 5] {
        RevenueBucket::ALL.map(|bucket| self.get(bucket))
    }

    fn add(&mut self, bucket: RevenueBucket, amount: Decimal) {
        let slot = match bucket {
            RevenueBucket::Today => &mut self.today,
            RevenueBucket::Yesterday => &mut self.yesterday,
            RevenueBucket::ThisWeek => &mut self.this_week,
            RevenueBucket::ThisMonth => &mut self.this_month,
            RevenueBucket::Total => &mut self.total,
        };
        *slot += amount;
    }
}

/// Reference date and time zone the buckets are evaluated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportingCalendar {
    today: NaiveDate,
    offset: FixedOffset,
}

impl ReportingCalendar {
    /// Create a calendar anchored at `today` in the zone `offset`
    #[must_use]
    pub const fn new(today: NaiveDate, offset: FixedOffset) -> Self {
        Self { today, offset }
    }

    /// Reference date
    #[must_use]
    pub const fn today(&self) -> NaiveDate {
        self.today
    }

    /// Reporting time zone
    #[must_use]
    pub const fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of `payment` in the reporting time zone
    #[must_use]
    pub fn local_date(&self, payment: &Payment) -> NaiveDate {
        payment.date.with_timezone(&self.offset).date_naive()
    }

    /// Whether a local calendar date falls into `bucket`
    #[must_use]
    pub fn contains(&self, bucket: RevenueBucket, date: NaiveDate) -> bool {
        match bucket {
            RevenueBucket::Today => date == self.today,
            RevenueBucket::Yesterday => self.today.pred_opt() == Some(date),
            RevenueBucket::ThisWeek => {
                week_start(date).is_some() && week_start(date) == week_start(self.today)
            }
            RevenueBucket::ThisMonth => {
                date.year() == self.today.year() && date.month() == self.today.month()
            }
            RevenueBucket::Total => true,
        }
    }
}

/// Monday of the week containing `date`
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}

/// Sum payment amounts into the five revenue buckets
#[must_use]
pub fn summarize_revenue(payments: &[Payment], calendar: &ReportingCalendar) -> RevenueSummary {
    let mut summary = RevenueSummary::default();

    for payment in payments {
        let date = calendar.local_date(payment);
        for bucket in RevenueBucket::ALL {
            if calendar.contains(bucket, date) {
                summary.add(bucket, payment.amount);
            }
        }
    }

    tracing::debug!(
        payments = payments.len(),
        today = %calendar.today,
        total = %summary.total,
        "Summarized revenue"
    );

    summary
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone};
    use paydash_core::PaymentStatus;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn ict() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(day: NaiveDate, hour: u32) -> DateTime<FixedOffset> {
        ict()
            .from_local_datetime(&day.and_hms_opt(hour, 0, 0).unwrap())
            .single()
            .unwrap()
    }

    fn payment(amount: i64, when: DateTime<FixedOffset>, status: PaymentStatus) -> Payment {
        Payment::new("u1", Decimal::from(amount), when, status)
    }

    // Thursday
    fn calendar() -> ReportingCalendar {
        ReportingCalendar::new(date(2025, 2, 6), ict())
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let summary = summarize_revenue(&[], &calendar());
        assert_eq!(summary, RevenueSummary::default());
        assert_eq!(summary.values(), [Decimal::ZERO; 5]);
    }

    #[test]
    fn test_today_and_yesterday() {
        let today = calendar().today();
        let payments = vec![
            payment(100, at(today, 10), PaymentStatus::Success),
            payment(50, at(today.pred_opt().unwrap(), 10), PaymentStatus::Pending),
        ];

        let summary = summarize_revenue(&payments, &calendar());

        assert_eq!(summary.today, Decimal::from(100));
        assert_eq!(summary.yesterday, Decimal::from(50));
        assert_eq!(summary.total, Decimal::from(150));
        assert_eq!(summary.this_week, Decimal::from(150));
        assert_eq!(summary.this_month, Decimal::from(150));
    }

    #[test]
    fn test_status_does_not_filter_buckets() {
        let today = calendar().today();
        let payments: Vec<Payment> = PaymentStatus::ALL
            .into_iter()
            .map(|status| payment(10, at(today, 9), status))
            .collect();

        let summary = summarize_revenue(&payments, &calendar());
        assert_eq!(summary.today, Decimal::from(30));
        assert_eq!(summary.this_month, Decimal::from(30));
    }

    #[rstest]
    #[case(date(2025, 2, 3), true)] // Monday of the same week
    #[case(date(2025, 2, 9), true)] // Sunday closes the week
    #[case(date(2025, 2, 2), false)] // previous Sunday
    #[case(date(2025, 2, 10), false)] // next Monday
    fn test_week_starts_on_monday(#[case] day: NaiveDate, #[case] expected: bool) {
        assert_eq!(calendar().contains(RevenueBucket::ThisWeek, day), expected);
    }

    #[test]
    fn test_sunday_reference_belongs_to_previous_monday() {
        let sunday = ReportingCalendar::new(date(2025, 2, 9), ict());

        assert!(sunday.contains(RevenueBucket::ThisWeek, date(2025, 2, 3)));
        assert!(!sunday.contains(RevenueBucket::ThisWeek, date(2025, 2, 10)));
    }

    #[test]
    fn test_week_spanning_month_boundary() {
        // Monday 2025-03-31 .. Sunday 2025-04-06
        let calendar = ReportingCalendar::new(date(2025, 4, 2), ict());
        let payments = vec![
            payment(7, at(date(2025, 3, 31), 12), PaymentStatus::Success),
            payment(3, at(date(2025, 4, 1), 12), PaymentStatus::Success),
        ];

        let summary = summarize_revenue(&payments, &calendar);
        assert_eq!(summary.this_week, Decimal::from(10));
        assert_eq!(summary.this_month, Decimal::from(3));
    }

    #[test]
    fn test_yesterday_across_year_boundary() {
        let calendar = ReportingCalendar::new(date(2025, 1, 1), ict());
        let payments = vec![payment(42, at(date(2024, 12, 31), 23), PaymentStatus::Success)];

        let summary = summarize_revenue(&payments, &calendar);
        assert_eq!(summary.yesterday, Decimal::from(42));
        assert_eq!(summary.this_month, Decimal::ZERO);
    }

    #[test]
    fn test_month_requires_same_year() {
        let payments = vec![payment(5, at(date(2024, 2, 6), 12), PaymentStatus::Success)];

        let summary = summarize_revenue(&payments, &calendar());
        assert_eq!(summary.this_month, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::from(5));
    }

    #[test]
    fn test_local_date_uses_reporting_offset() {
        // 18:30 UTC on the 5th is 01:30 on the 6th in UTC+7
        let utc_evening = chrono::Utc
            .with_ymd_and_hms(2025, 2, 5, 18, 30, 0)
            .unwrap()
            .fixed_offset();
        let payments = vec![payment(9, utc_evening, PaymentStatus::Success)];

        let summary = summarize_revenue(&payments, &calendar());
        assert_eq!(summary.today, Decimal::from(9));
        assert_eq!(summary.yesterday, Decimal::ZERO);
    }

    #[test]
    fn test_values_follow_bucket_order() {
        let summary = RevenueSummary {
            today: Decimal::from(1),
            yesterday: Decimal::from(2),
            this_week: Decimal::from(3),
            this_month: Decimal::from(4),
            total: Decimal::from(5),
        };

        assert_eq!(summary.values().map(|v| v.to_string()), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_summary_serializes_as_camel_case_numbers() {
        let summary = RevenueSummary {
            this_week: Decimal::from(200_000),
            ..RevenueSummary::default()
        };

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["thisWeek"], serde_json::json!(200_000.0));
        assert_eq!(json["thisMonth"], serde_json::json!(0.0));
    }

    proptest! {
        #[test]
        fn prop_total_is_order_independent_sum(
            amounts in proptest::collection::vec(0i64..10_000_000, 0..50),
            offsets in proptest::collection::vec(0u64..120, 50),
        ) {
            let base = date(2025, 1, 1);
            let mut payments: Vec<Payment> = amounts
                .iter()
                .zip(&offsets)
                .map(|(amount, days)| {
                    payment(*amount, at(base.checked_add_days(Days::new(*days)).unwrap(), 8), PaymentStatus::Success)
                })
                .collect();

            let expected: Decimal = amounts.iter().map(|a| Decimal::from(*a)).sum();
            let forward = summarize_revenue(&payments, &calendar());
            payments.reverse();
            let backward = summarize_revenue(&payments, &calendar());

            prop_assert_eq!(forward.total, expected);
            prop_assert_eq!(forward, backward);
            prop_assert!(forward.today <= forward.this_week);
            prop_assert!(forward.this_month <= forward.total);
        }

        #[test]
        fn prop_this_month_includes_every_day_of_month(day in 1u32..=28, amount in 0i64..1_000_000) {
            let payments = vec![payment(amount, at(date(2025, 2, day), 12), PaymentStatus::Cancelled)];
            let summary = summarize_revenue(&payments, &calendar());
            prop_assert_eq!(summary.this_month, Decimal::from(amount));
        }
    }
}

//! Core data types for paydash
//!
//! Raw records mirror the loosely typed JSON an admin frontend already holds.
//! They are converted into [`Payment`] and [`User`] once, at the boundary, and
//! everything downstream works on the validated types only.

use crate::{Error, Result, utils};
use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use validator::Validate;

/// User identifier type
pub type UserId = String;

/// Payment lifecycle tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Payment created, not settled yet
    Pending,
    /// Payment settled
    Success,
    /// Payment cancelled
    Cancelled,
}

impl PaymentStatus {
    /// All statuses in display order
    pub const ALL: [Self; 3] = [Self::Success, Self::Pending, Self::Cancelled];

    /// Wire name of the status
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownStatus {
                value: s.to_string(),
            })
    }
}

/// Display language for labels and headings
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Vietnamese (vi-VN)
    #[default]
    Vi,
    /// English (en-US)
    En,
}

impl Locale {
    /// BCP 47 tag for the locale
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Vi => "vi-VN",
            Self::En => "en-US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vi" | "vi-vn" => Ok(Self::Vi),
            "en" | "en-us" => Ok(Self::En),
            _ => Err(Error::Validation {
                field: "locale".to_string(),
                message: format!("unsupported locale '{s}'"),
            }),
        }
    }
}

/// A validated payment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment code, when the upstream system supplied one
    pub code: Option<String>,
    /// Owning user
    pub user_id: UserId,
    /// Amount in the smallest display unit of the currency (VND has no minor unit)
    pub amount: Decimal,
    /// When the payment happened
    pub date: DateTime<FixedOffset>,
    /// Lifecycle status
    pub status: PaymentStatus,
}

impl Payment {
    /// Create a payment without a code
    #[must_use]
    pub fn new(
        user_id: impl Into<UserId>,
        amount: Decimal,
        date: DateTime<FixedOffset>,
        status: PaymentStatus,
    ) -> Self {
        Self {
            code: None,
            user_id: user_id.into(),
            amount,
            date,
            status,
        }
    }
}

/// A validated user record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub id: UserId,
}

impl User {
    /// Create a user
    #[must_use]
    pub fn new(id: impl Into<UserId>) -> Self {
        Self { id: id.into() }
    }
}

/// Payment as received on the wire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawPayment {
    /// Payment code
    #[serde(default, alias = "code")]
    #[validate(length(max = 128))]
    pub code_payment: Option<String>,

    /// Owning user
    #[validate(length(min = 1, max = 128))]
    pub user_id: String,

    /// Amount
    pub amount: f64,

    /// ISO-8601 timestamp, with or without offset
    #[validate(length(min = 1, max = 64))]
    pub date: String,

    /// Status string
    #[validate(length(min = 1, max = 32))]
    pub status: String,
}

impl RawPayment {
    /// Validate and convert into a [`Payment`].
    ///
    /// Timestamps without an offset are read as local time in `offset`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the offending field.
    pub fn into_payment(self, offset: FixedOffset) -> Result<Payment> {
        self.validate().map_err(first_validation_error)?;

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::Validation {
                field: "amount".to_string(),
                message: format!("must be a non-negative number, got {}", self.amount),
            });
        }
        let amount = Decimal::try_from(self.amount).map_err(|e| Error::Validation {
            field: "amount".to_string(),
            message: e.to_string(),
        })?;

        let date = utils::parse_timestamp(&self.date, offset)?;
        let status = self.status.parse()?;

        Ok(Payment {
            code: self.code_payment,
            user_id: self.user_id,
            amount,
            date,
            status,
        })
    }
}

/// User as received on the wire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawUser {
    /// User identifier
    #[serde(alias = "_id", alias = "user_id")]
    #[validate(length(min = 1, max = 128))]
    pub id: String,
}

impl RawUser {
    /// Validate and convert into a [`User`]
    ///
    /// # Errors
    ///
    /// Returns a validation error if the identifier is empty or too long.
    pub fn into_user(self) -> Result<User> {
        self.validate().map_err(first_validation_error)?;
        Ok(User { id: self.id })
    }
}

/// Request body for every overview computation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverviewInput {
    /// All users of the platform
    #[serde(default)]
    pub users: Vec<RawUser>,

    /// Payment events
    #[serde(default)]
    pub payments: Vec<RawPayment>,

    /// Reference date; defaults to the current date in the reporting time zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<NaiveDate>,

    /// Label language; defaults to the configured locale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

/// Validated users and payments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    /// Users
    pub users: Vec<User>,
    /// Payments
    pub payments: Vec<Payment>,
}

impl Ledger {
    /// Build a ledger from already validated records
    #[must_use]
    pub const fn new(users: Vec<User>, payments: Vec<Payment>) -> Self {
        Self { users, payments }
    }

    /// Validate raw users and payments.
    ///
    /// Stops at the first invalid record; the error field names its position,
    /// e.g. `payments[2].status`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first rejected record.
    pub fn from_raw(users: Vec<RawUser>, payments: Vec<RawPayment>, offset: FixedOffset) -> Result<Self> {
        let users = users
            .into_iter()
            .enumerate()
            .map(|(index, user)| user.into_user().map_err(|e| e.at(&format!("users[{index}]"))))
            .collect::<Result<Vec<_>>>()?;

        let payments = payments
            .into_iter()
            .enumerate()
            .map(|(index, payment)| {
                payment
                    .into_payment(offset)
                    .map_err(|e| e.at(&format!("payments[{index}]")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { users, payments })
    }
}

fn first_validation_error(errors: validator::ValidationErrors) -> Error {
    errors
        .field_errors()
        .into_iter()
        .next()
        .map_or_else(
            || Error::Validation {
                field: "record".to_string(),
                message: errors.to_string(),
            },
            |(field, field_errors)| Error::Validation {
                field: field.to_string(),
                message: field_errors
                    .first()
                    .map_or_else(|| "invalid value".to_string(), |e| e.code.to_string()),
            },
        )
}

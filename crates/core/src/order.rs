//! Order placement rules and the order status lifecycle.
//!
//! A checkout submission is validated here before any database work:
//! [`PlaceOrderRequest::validate_draft`] collects every field error at once
//! and, on success, yields an [`OrderDraft`] ready for persistence. Slug
//! existence is checked by the caller against the material store and folded
//! in with [`unknown_slug_errors`].

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::validation::FieldErrors;

/// Largest total that fits the `NUMERIC(10, 2)` column.
pub const MAX_TOTAL_PRICE: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Order lifecycle status. New orders always start as [`OrderStatus::New`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    New,
    Pending,
    Paid,
    Completed,
    Cancelled,
}

/// All valid status strings.
pub const VALID_ORDER_STATUSES: &[&str] = &["new", "pending", "paid", "completed", "cancelled"];

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Lets row types decode the `status` column straight into the enum.
impl TryFrom<String> for OrderStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
            .ok_or_else(|| CoreError::Internal(format!("Unknown order status '{value}'")))
    }
}

/// Validate the `status` field of an admin status update.
///
/// Missing and unknown values are both reported against `status`.
pub fn parse_status_update(status: Option<&str>) -> Result<OrderStatus, CoreError> {
    match status.map(str::trim) {
        None | Some("") => Err(CoreError::InvalidFields(FieldErrors::single(
            "status",
            "The status field is required.",
        ))),
        Some(value) => OrderStatus::parse(value).ok_or_else(|| {
            CoreError::InvalidFields(FieldErrors::single(
                "status",
                format!(
                    "The selected status is invalid. Must be one of: {}",
                    VALID_ORDER_STATUSES.join(", ")
                ),
            ))
        }),
    }
}

// ---------------------------------------------------------------------------
// Placement
// ---------------------------------------------------------------------------

/// Contact details for a guest checkout. Every field is optional, and
/// absent fields stay absent when stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GuestInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email, length(max = 255))]
    pub email: Option<String>,
}

/// Body of `POST /orders`.
///
/// Required fields are `Option` so that a missing value surfaces as a field
/// error rather than a deserialization failure. Unknown keys (including any
/// caller-supplied `status`) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PlaceOrderRequest {
    #[validate(required)]
    pub materials: Option<Vec<String>>,
    #[validate(nested)]
    pub guest_info: Option<GuestInfo>,
    #[validate(required)]
    pub total_price: Option<Decimal>,
    pub complexity: Option<String>,
    pub estimated_days: Option<i32>,
}

/// A validated order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    /// Slugs in submission order; may contain duplicates.
    pub material_slugs: Vec<String>,
    pub guest_info: Option<GuestInfo>,
    pub total_price: Decimal,
    pub complexity: Option<String>,
    pub estimated_days: Option<i32>,
}

impl PlaceOrderRequest {
    /// Check every field rule and return the draft, or all field errors.
    pub fn validate_draft(self) -> Result<OrderDraft, CoreError> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from_validator(&e),
        };

        if matches!(&self.materials, Some(slugs) if slugs.is_empty()) {
            errors.add("materials", "The materials field is required.");
        }

        if let Some(price) = self.total_price {
            if price < Decimal::ZERO {
                errors.add("total_price", "The total_price field must be at least 0.");
            } else if price > MAX_TOTAL_PRICE {
                errors.add(
                    "total_price",
                    format!("The total_price field must not be greater than {MAX_TOTAL_PRICE}."),
                );
            }
        }

        errors.into_result()?;

        Ok(OrderDraft {
            material_slugs: self.materials.unwrap_or_default(),
            guest_info: self.guest_info,
            total_price: self.total_price.unwrap_or_default(),
            complexity: self.complexity,
            estimated_days: self.estimated_days,
        })
    }
}

impl OrderDraft {
    /// Distinct slugs, first occurrence first.
    pub fn distinct_slugs(&self) -> Vec<String> {
        distinct_slugs(&self.material_slugs)
    }
}

/// Deduplicate slugs while keeping first-occurrence order.
pub fn distinct_slugs(slugs: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    slugs
        .iter()
        .filter(|slug| seen.insert(slug.as_str()))
        .cloned()
        .collect()
}

/// Field errors for every submitted slug that is not a known material.
///
/// Errors are keyed by the slug's position (`materials.0`, `materials.3`) so
/// clients can highlight the offending entry.
pub fn unknown_slug_errors(submitted: &[String], missing: &[String]) -> FieldErrors {
    let missing: HashSet<&str> = missing.iter().map(String::as_str).collect();
    let mut errors = FieldErrors::new();
    for (index, slug) in submitted.iter().enumerate() {
        if missing.contains(slug.as_str()) {
            errors.add(
                format!("materials.{index}"),
                format!("The selected materials.{index} is invalid."),
            );
        }
    }
    errors
}

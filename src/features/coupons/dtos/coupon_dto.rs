use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::coupons::models::{Coupon, DiscountType};
use crate::shared::validation::{validate_non_negative, COUPON_CODE_REGEX};

/// Response DTO for coupon
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CouponResponseDto {
    pub id: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub max_uses: Option<i32>,
    pub used_count: i32,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: i32,
    pub expired: bool,
    pub exhausted: bool,
}

impl CouponResponseDto {
    pub fn from_coupon(c: Coupon, now: DateTime<Utc>) -> Self {
        Self {
            expired: c.is_expired(now),
            exhausted: c.is_exhausted(),
            id: c.id,
            code: c.code,
            discount_type: c.discount_type,
            discount_value: c.discount_value,
            min_order_amount: c.min_order_amount,
            max_uses: c.max_uses,
            used_count: c.used_count,
            starts_at: c.starts_at,
            expires_at: c.expires_at,
            status: c.status,
        }
    }
}

/// Coupon form, used for both create and update
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_coupon_form"))]
pub struct CouponFormDto {
    /// Upper-case letters, digits, `-` and `_`
    #[validate(
        length(min = 3, max = 32, message = "Code must be 3-32 characters"),
        regex(
            path = *COUPON_CODE_REGEX,
            message = "Code may only contain upper-case letters, digits, '-' and '_'"
        )
    )]
    pub code: String,

    pub discount_type: DiscountType,

    #[validate(custom(function = "validate_non_negative"))]
    pub discount_value: Decimal,

    #[validate(custom(function = "validate_non_negative"))]
    pub min_order_amount: Option<Decimal>,

    #[validate(range(min = 1, message = "Max uses must be at least 1"))]
    pub max_uses: Option<i32>,

    pub starts_at: Option<DateTime<Utc>>,

    pub expires_at: Option<DateTime<Utc>>,

    #[validate(range(min = 0, max = 1, message = "Status must be 0 or 1"))]
    pub status: Option<i32>,
}

fn validate_coupon_form(form: &CouponFormDto) -> Result<(), ValidationError> {
    if form.discount_type == DiscountType::Percentage && form.discount_value > Decimal::ONE_HUNDRED
    {
        let mut error = ValidationError::new("percentage_too_large");
        error.message = Some("A percentage discount cannot exceed 100".into());
        return Err(error);
    }

    if let (Some(starts_at), Some(expires_at)) = (form.starts_at, form.expires_at) {
        if expires_at <= starts_at {
            let mut error = ValidationError::new("expiry_before_start");
            error.message = Some("Expiry must be after the start date".into());
            return Err(error);
        }
    }

    Ok(())
}

/// Body sent to the catalog service
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponPayload {
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub max_uses: Option<i32>,
    pub starts_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub status: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::str::FromStr;

    fn form() -> CouponFormDto {
        CouponFormDto {
            code: "SUMMER24".to_string(),
            discount_type: DiscountType::Percentage,
            discount_value: Decimal::from(15),
            min_order_amount: None,
            max_uses: Some(100),
            starts_at: None,
            expires_at: None,
            status: None,
        }
    }

    #[test]
    fn test_valid_coupon() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_percentage_capped_at_hundred() {
        let mut coupon = form();
        coupon.discount_value = Decimal::from(100);
        assert!(coupon.validate().is_ok());

        coupon.discount_value = Decimal::from_str("100.01").unwrap();
        assert!(coupon.validate().is_err());

        coupon.discount_type = DiscountType::Fixed;
        assert!(coupon.validate().is_ok());
    }

    #[test]
    fn test_expiry_after_start() {
        let now = Utc::now();
        let mut coupon = form();
        coupon.starts_at = Some(now);
        coupon.expires_at = Some(now - Duration::days(1));
        assert!(coupon.validate().is_err());

        coupon.expires_at = Some(now + Duration::days(30));
        assert!(coupon.validate().is_ok());
    }

    #[test]
    fn test_code_and_amount_rules() {
        let mut coupon = form();
        coupon.code = "summer".to_string();
        assert!(coupon.validate().is_err());

        let mut coupon = form();
        coupon.discount_value = Decimal::from(-5);
        assert!(coupon.validate().is_err());

        let mut coupon = form();
        coupon.max_uses = Some(0);
        assert!(coupon.validate().is_err());
    }

    #[test]
    fn test_flags_in_response() {
        let now = Utc::now();
        let coupon: Coupon = serde_json::from_value(serde_json::json!({
            "id": 7, "code": "OLD", "discountType": "fixed", "discountValue": "5.00",
            "maxUses": 3, "usedCount": 3,
            "expiresAt": (now - Duration::hours(1)).to_rfc3339()
        }))
        .unwrap();

        let dto = CouponResponseDto::from_coupon(coupon, now);
        assert!(dto.expired);
        assert!(dto.exhausted);
        assert_eq!(dto.id, "7");
    }
}

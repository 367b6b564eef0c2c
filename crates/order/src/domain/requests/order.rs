use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use validator::Validate;

/// Checkout form. Missing fields deserialize as empty strings so that
/// every omission is reported the same way.
#[derive(Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct CheckoutRequest {
    #[validate(length(min = 1, message = "Missing required order fields"))]
    pub name: String,
    #[serde(rename = "shippingAddress")]
    #[validate(length(min = 1, message = "Missing required order fields"))]
    pub shipping_address: String,
    #[serde(rename = "cardNumber")]
    #[validate(length(min = 1, message = "Missing required order fields"))]
    pub card_number: String,
    #[serde(rename = "CVV")]
    #[validate(length(min = 1, message = "Missing required order fields"))]
    pub cvv: String,
    #[serde(rename = "expiredDate")]
    #[validate(length(min = 1, message = "Missing required order fields"))]
    pub expired_date: String,
    #[serde(rename = "orderNote")]
    pub order_note: Option<String>,
}

impl CheckoutRequest {
    pub const MISSING_FIELDS: &'static str = "Missing required order fields";

    pub fn payment(&self) -> PaymentDetails {
        PaymentDetails {
            card_number: self.card_number.clone(),
            cvv: self.cvv.clone(),
            expired_date: self.expired_date.clone(),
        }
    }
}

impl fmt::Debug for CheckoutRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutRequest")
            .field("name", &self.name)
            .field("shipping_address", &self.shipping_address)
            .field("payment", &"***")
            .field("order_note", &self.order_note)
            .finish()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "success")]
    pub status: Option<serde_json::Value>,
}

impl UpdateStatusRequest {
    /// Falsy JSON (`null`, `""`, `0`, `false`) counts as absent. Any other
    /// non-string value is passed on in its JSON form so it fails as an
    /// unknown status.
    pub fn status_text(&self) -> Option<String> {
        match self.status.as_ref()? {
            serde_json::Value::Null | serde_json::Value::Bool(false) => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Card data is stored as given and only ever written.
#[derive(Clone, PartialEq)]
pub struct PaymentDetails {
    pub card_number: String,
    pub cvv: String,
    pub expired_date: String,
}

impl fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PaymentDetails(***)")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderItemRecordRequest {
    pub book_id: String,
    pub title: String,
    pub quantity: i32,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateOrderRecordRequest {
    pub user_id: String,
    pub items: Vec<CreateOrderItemRecordRequest>,
    pub total_price: f64,
    pub name: String,
    pub shipping_address: String,
    pub order_note: Option<String>,
    pub payment: PaymentDetails,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> serde_json::Value {
        json!({
            "name": "Ada",
            "shippingAddress": "1 Loop Rd",
            "cardNumber": "4111111111111111",
            "CVV": "123",
            "expiredDate": "12/30"
        })
    }

    #[test]
    fn complete_form_is_valid() {
        let req: CheckoutRequest = serde_json::from_value(complete()).unwrap();

        assert!(req.validate().is_ok());
        assert_eq!(req.cvv, "123");
        assert!(req.order_note.is_none());
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in ["name", "shippingAddress", "cardNumber", "CVV", "expiredDate"] {
            let mut body = complete();
            body.as_object_mut().unwrap().remove(field);

            let req: CheckoutRequest = serde_json::from_value(body).unwrap();
            assert!(req.validate().is_err(), "{field} should be required");
        }
    }

    #[test]
    fn debug_hides_card_data() {
        let req: CheckoutRequest = serde_json::from_value(complete()).unwrap();
        let rendered = format!("{req:?} {:?}", req.payment());

        assert!(!rendered.contains("4111"));
        assert!(!rendered.contains("123"));
    }

    fn status_of(body: serde_json::Value) -> Option<String> {
        serde_json::from_value::<UpdateStatusRequest>(body)
            .unwrap()
            .status_text()
    }

    #[test]
    fn status_text_keeps_strings_verbatim() {
        assert_eq!(status_of(json!({ "status": "success" })).as_deref(), Some("success"));
        assert_eq!(status_of(json!({ "status": "shipped" })).as_deref(), Some("shipped"));
    }

    #[test]
    fn falsy_status_counts_as_missing() {
        for body in [
            json!({}),
            json!({ "status": null }),
            json!({ "status": "" }),
            json!({ "status": 0 }),
            json!({ "status": false }),
        ] {
            assert_eq!(status_of(body.clone()), None, "{body}");
        }
    }

    #[test]
    fn non_string_status_is_kept_so_it_fails_parsing() {
        for body in [
            json!({ "status": 5 }),
            json!({ "status": true }),
            json!({ "status": ["success"] }),
        ] {
            let text = status_of(body.clone()).unwrap();
            assert!(text.parse::<crate::model::OrderStatus>().is_err(), "{body}");
        }
    }
}

use serde::{Deserialize, Serialize};

/// Payload a client may send when asking for a payment intent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntentRequest {
    #[serde(default)]
    pub currency: String,

    /// Amount as entered by the user, not yet validated
    #[serde(default)]
    pub amount: String,
}

/// Envelope returned by every API endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonResponse {
    pub ok: bool,
    pub message: String,
    pub content: String,
    pub id: i64,
}

impl JsonResponse {
    /// Successful response with no payload.
    pub fn ok() -> Self {
        Self {
            ok: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_response_fields() {
        let value = serde_json::to_value(JsonResponse::ok()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "ok": true, "message": "", "content": "", "id": 0 })
        );
    }

    #[test]
    fn test_request_fields_are_optional() {
        let request: PaymentIntentRequest = serde_json::from_str(r#"{"amount": "10.00"}"#).unwrap();
        assert_eq!(request.amount, "10.00");
        assert!(request.currency.is_empty());
    }
}

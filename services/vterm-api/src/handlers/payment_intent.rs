use axum::{
    body::Bytes,
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::models::{JsonResponse, PaymentIntentRequest};

/// Payment intent lookup
///
/// Returns a placeholder success envelope.
pub async fn get_payment_intent() -> Response {
    pretty_json(&JsonResponse::ok())
}

/// Payment intent creation
///
/// The request body is optional. When it parses as a [`PaymentIntentRequest`]
/// it is logged; the response is the same placeholder either way.
pub async fn create_payment_intent(body: Bytes) -> Response {
    if !body.is_empty() {
        match serde_json::from_slice::<PaymentIntentRequest>(&body) {
            Ok(request) => tracing::info!(
                currency = %request.currency,
                amount = %request.amount,
                "Payment intent requested"
            ),
            Err(e) => tracing::debug!("Ignoring unreadable payment intent payload: {}", e),
        }
    }

    pretty_json(&JsonResponse::ok())
}

/// Serialize `value` with a three-space indent as an `application/json` response.
///
/// A serialization failure is logged and answered with an empty body.
fn pretty_json<T: Serialize>(value: &T) -> Response {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"   "));

    if let Err(e) = value.serialize(&mut serializer) {
        tracing::error!("Failed to serialize response: {}", e);
        out.clear();
    }

    ([(header::CONTENT_TYPE, "application/json")], out).into_response()
}

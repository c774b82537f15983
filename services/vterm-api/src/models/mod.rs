pub mod payment;

pub use payment::{JsonResponse, PaymentIntentRequest};

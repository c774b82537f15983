pub mod payment_intent;

pub use payment_intent::{create_payment_intent, get_payment_intent};

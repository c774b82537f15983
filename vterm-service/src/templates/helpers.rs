//! Helper functions meant to be registered in a [`TemplateFunctions`] registry.
//!
//! [`TemplateFunctions`]: super::TemplateFunctions

/// Format an amount given in minor units (cents) for display.
///
/// # Example
///
/// ```rust
/// use vterm_service::templates::helpers::format_amount;
///
/// assert_eq!(format_amount(1999, None), "19.99");
/// assert_eq!(format_amount(500, Some("usd".to_string())), "5.00 USD");
/// ```
#[must_use]
pub fn format_amount(cents: i64, currency: Option<String>) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let amount = format!("{}{}.{:02}", sign, cents / 100, cents % 100);
    match currency {
        Some(code) if !code.is_empty() => format!("{} {}", amount, code.to_uppercase()),
        _ => amount,
    }
}

/// Pick a CSS class based on a condition.
///
/// # Example in template:
///
/// ```html
/// <div class="alert {{ classes(error != "", "alert-danger", "d-none") }}">
/// ```
#[must_use]
pub fn classes(condition: bool, if_true: String, if_false: Option<String>) -> String {
    if condition {
        if_true
    } else {
        if_false.unwrap_or_default()
    }
}

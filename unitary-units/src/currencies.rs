//! Common currencies
//!
//! This list doubles as the placeholder table used while no exchange-rate
//! snapshot is available: every code maps to rate 1.

/// ISO 4217 code and display name, in display order
pub const COMMON_CURRENCIES: &[(&str, &str)] = &[
    ("USD", "US Dollar"),
    ("EUR", "Euro"),
    ("GBP", "British Pound"),
    ("JPY", "Japanese Yen"),
    ("CNY", "Chinese Yuan"),
    ("CAD", "Canadian Dollar"),
    ("AUD", "Australian Dollar"),
    ("CHF", "Swiss Franc"),
    ("HKD", "Hong Kong Dollar"),
    ("SGD", "Singapore Dollar"),
    ("SEK", "Swedish Krona"),
    ("NOK", "Norwegian Krone"),
    ("DKK", "Danish Krone"),
    ("NZD", "New Zealand Dollar"),
    ("INR", "Indian Rupee"),
    ("KRW", "South Korean Won"),
    ("BRL", "Brazilian Real"),
    ("MXN", "Mexican Peso"),
    ("ZAR", "South African Rand"),
    ("RUB", "Russian Ruble"),
    ("TRY", "Turkish Lira"),
    ("PLN", "Polish Zloty"),
    ("THB", "Thai Baht"),
    ("IDR", "Indonesian Rupiah"),
    ("AED", "UAE Dirham"),
    ("SAR", "Saudi Riyal"),
];

/// Reference currency of every exchange-rate snapshot
pub const BASE_CURRENCY: &str = "USD";

/// Display name for a known code
pub fn currency_name(code: &str) -> Option<&'static str> {
    COMMON_CURRENCIES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

//! Request extractors that reject with the handler [`Error`] body.
//!
//! Drop-in replacements for the axum extractors of the same name. A
//! rejection renders as the shared `{ name, message, context? }` JSON
//! instead of axum's plain-text default, so clients see one error shape for
//! malformed input on both surfaces.
//!
//! [`Error`]: crate::handler::Error

mod enhanced_json;
mod enhanced_path;
mod enhanced_query;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::enhanced_path::Path;
pub use self::enhanced_query::Query;
pub use self::validated_json::ValidateJson;

/// Trims a deserializer message down to something safe to echo back.
fn sanitize_error_message(message: &str, max_chars: usize) -> String {
    message
        .lines()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(max_chars)
        .collect()
}

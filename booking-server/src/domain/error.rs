//! Domain error types.
//!
//! These errors describe requests the caller got wrong. They are detected
//! before any store access and are distinct from storage failures.

/// A request failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more required fields were absent or blank
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A date field didn't hold a calendar date
    #[error("invalid {field}: {value:?} is not a YYYY-MM-DD date")]
    InvalidDate { field: &'static str, value: String },
}

/// Take every required field as a trimmed, non-blank value.
///
/// Every missing or blank field is reported, in the order given, so the
/// caller hears about all of them at once rather than one per round trip.
pub(crate) fn require_fields<const N: usize>(
    fields: [(&'static str, Option<&str>); N],
) -> Result<[String; N], ValidationError> {
    let mut missing = Vec::new();
    let values = fields.map(|(name, value)| match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            missing.push(name);
            String::new()
        }
    });

    if missing.is_empty() {
        Ok(values)
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

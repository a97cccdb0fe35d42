//! Field-level validation primitives shared by the three intake pipelines.
//!
//! Checks accumulate into a [`ValidationReport`] so a single response can
//! enumerate every failing field. Validation always runs before any
//! persistence attempt.

use super::envelope::FieldError;

#[derive(Debug, Default)]
pub(crate) struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub(crate) fn finish(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Trim and lowercase, the normalization applied to every stored email.
pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// `local@domain` with a dotted, non-degenerate domain and no whitespace.
pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains("..")
        }
        _ => false,
    }
}

/// Optional `+`, optional `(`, one to four leading digits, optional `)`, then
/// any mix of digits, separators (`-`, `.`, `/`), and whitespace.
pub(crate) fn is_valid_phone(value: &str) -> bool {
    let mut rest = value.strip_prefix('+').unwrap_or(value);
    rest = rest.strip_prefix('(').unwrap_or(rest);

    let leading_digits = rest
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .take(4)
        .count();
    if leading_digits == 0 {
        return false;
    }
    rest = &rest[leading_digits..];
    rest = rest.strip_prefix(')').unwrap_or(rest);

    rest.chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '-' | '.' | '/'))
}

/// Character count within `[min, max]` after trimming.
pub(crate) fn length_within(value: &str, min: usize, max: usize) -> bool {
    let count = value.chars().count();
    (min..=max).contains(&count)
}

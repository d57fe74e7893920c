/// Whether the value is empty or consists only of whitespace characters.
#[must_use]
pub fn is_blank(value: &str) -> bool {
  value.trim().is_empty()
}

/// A loose e-mail check: the address only needs an `@` somewhere in it.
///
/// Stricter checks (host names, local part characters) are left to
/// whoever delivers the e-mail.
#[must_use]
pub fn validate_email_shape(email: &str) -> bool {
  email.contains('@')
}

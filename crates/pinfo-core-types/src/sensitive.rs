//! Sensitive data marker for automatic redaction
//!
//! Personal information (email addresses, names) flows through log events.
//! Wrapping it in `Sensitive<T>` keeps the raw value out of `Debug` and
//! `Display` output while still letting the owner read it.

use std::fmt;

const REDACTED: &str = "***REDACTED***";

/// Wrapper for personal data that redacts itself in Debug and Display
///
/// # Example
///
/// ```
/// use pinfo_core_types::Sensitive;
///
/// let email = Sensitive::new("test@email.com");
/// assert_eq!(format!("{}", email), "***REDACTED***");
/// assert_eq!(format!("{:?}", email), "***REDACTED***");
///
/// assert_eq!(email.expose(), &"test@email.com");
/// ```
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    /// Wrap a sensitive value
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Expose the underlying value
    pub fn expose(&self) -> &T {
        &self.0
    }

    /// Consume the wrapper and return the inner value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T> fmt::Display for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl<T: Clone> Clone for Sensitive<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_redacted_in_debug() {
        let email = Sensitive::new("name@email.com");
        let debug_str = format!("{:?}", email);
        assert_eq!(debug_str, REDACTED);
        assert!(!debug_str.contains("email.com"));
    }

    #[test]
    fn test_email_is_redacted_in_display() {
        let email = Sensitive::new(String::from("name@email.co.uk"));
        let display_str = format!("{}", email);
        assert_eq!(display_str, REDACTED);
        assert!(!display_str.contains("name@"));
    }

    #[test]
    fn test_expose_and_into_inner() {
        let name = Sensitive::new(String::from("Test name"));
        assert_eq!(name.expose(), "Test name");
        assert_eq!(name.into_inner(), "Test name");
    }

    #[test]
    fn test_redaction_inside_derived_debug() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Entry {
            key: &'static str,
            value: Sensitive<String>,
        }

        let entry = Entry {
            key: "key_email",
            value: Sensitive::from("test@email.com".to_string()),
        };

        let debug_str = format!("{:?}", entry);
        assert!(debug_str.contains("key_email"));
        assert!(debug_str.contains(REDACTED));
        assert!(!debug_str.contains("test@email.com"));
    }
}

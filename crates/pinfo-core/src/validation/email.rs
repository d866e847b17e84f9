//! Email address validation
//!
//! A practical subset of address syntax, not an RFC 5322 parser. The check is
//! a single forward scan over the bytes of the candidate, so cost is linear in
//! its length whatever the input looks like.

use std::fmt;

/// The structural rule a candidate address broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailRule {
    /// No value, or the empty string
    Missing,
    /// No `@` separator
    MissingAt,
    /// More than one `@`
    MultipleAt,
    /// Nothing before the `@`
    EmptyLocalPart,
    /// Domain has no `.`
    MissingDot,
    /// A domain label is empty (leading, trailing or doubled dot)
    EmptyLabel,
}

impl fmt::Display for EmailRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            EmailRule::Missing => "no email given",
            EmailRule::MissingAt => "missing '@'",
            EmailRule::MultipleAt => "more than one '@'",
            EmailRule::EmptyLocalPart => "nothing before '@'",
            EmailRule::MissingDot => "domain has no '.'",
            EmailRule::EmptyLabel => "domain has an empty label",
        };
        f.write_str(reason)
    }
}

/// Email syntax validator
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Whether `candidate` is a syntactically valid email address.
    ///
    /// ```
    /// use pinfo_core::EmailValidator;
    ///
    /// assert!(EmailValidator::is_valid(Some("name@email.co.uk")));
    /// assert!(!EmailValidator::is_valid(Some("name@email..com")));
    /// assert!(!EmailValidator::is_valid(None));
    /// ```
    pub fn is_valid(candidate: Option<&str>) -> bool {
        Self::check(candidate).is_ok()
    }

    /// Validate `candidate`, reporting the first rule it breaks.
    ///
    /// # Errors
    ///
    /// Returns the [`EmailRule`] that failed.
    pub fn check(candidate: Option<&str>) -> Result<(), EmailRule> {
        let candidate = match candidate {
            Some(s) if !s.is_empty() => s,
            _ => return Err(EmailRule::Missing),
        };

        let mut seen_at = false;
        let mut local_len = 0usize;
        let mut dots = 0usize;
        let mut label_len = 0usize;

        for b in candidate.bytes() {
            match (seen_at, b) {
                (false, b'@') => {
                    if local_len == 0 {
                        return Err(EmailRule::EmptyLocalPart);
                    }
                    seen_at = true;
                }
                (false, _) => local_len += 1,
                (true, b'@') => return Err(EmailRule::MultipleAt),
                (true, b'.') => {
                    if label_len == 0 {
                        return Err(EmailRule::EmptyLabel);
                    }
                    dots += 1;
                    label_len = 0;
                }
                (true, _) => label_len += 1,
            }
        }

        if !seen_at {
            return Err(EmailRule::MissingAt);
        }
        if dots == 0 {
            return Err(if label_len == 0 {
                EmailRule::EmptyLabel
            } else {
                EmailRule::MissingDot
            });
        }
        // final label is the top-level domain
        if label_len == 0 {
            return Err(EmailRule::EmptyLabel);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_email_simple() {
        assert!(EmailValidator::is_valid(Some("name@email.com")));
    }

    #[test]
    fn test_correct_email_sub_domain() {
        assert!(EmailValidator::is_valid(Some("name@email.co.uk")));
    }

    #[test]
    fn test_invalid_email_no_tld() {
        assert!(!EmailValidator::is_valid(Some("name@email")));
        assert_eq!(
            EmailValidator::check(Some("name@email")),
            Err(EmailRule::MissingDot)
        );
    }

    #[test]
    fn test_invalid_email_double_dot() {
        assert!(!EmailValidator::is_valid(Some("name@email..com")));
        assert_eq!(
            EmailValidator::check(Some("name@email..com")),
            Err(EmailRule::EmptyLabel)
        );
    }

    #[test]
    fn test_invalid_email_no_username() {
        assert!(!EmailValidator::is_valid(Some("@email.com")));
        assert_eq!(
            EmailValidator::check(Some("@email.com")),
            Err(EmailRule::EmptyLocalPart)
        );
    }

    #[test]
    fn test_empty_and_absent() {
        assert!(!EmailValidator::is_valid(Some("")));
        assert!(!EmailValidator::is_valid(None));
        assert_eq!(EmailValidator::check(None), Err(EmailRule::Missing));
    }

    #[test]
    fn test_dot_placement_in_domain() {
        assert_eq!(
            EmailValidator::check(Some("name@.email.com")),
            Err(EmailRule::EmptyLabel)
        );
        assert_eq!(
            EmailValidator::check(Some("name@email.com.")),
            Err(EmailRule::EmptyLabel)
        );
        assert_eq!(EmailValidator::check(Some("name@")), Err(EmailRule::EmptyLabel));
    }

    #[test]
    fn test_at_count() {
        assert_eq!(
            EmailValidator::check(Some("name.email.com")),
            Err(EmailRule::MissingAt)
        );
        assert_eq!(
            EmailValidator::check(Some("a@b@email.com")),
            Err(EmailRule::MultipleAt)
        );
    }

    #[test]
    fn test_short_and_numeric_tld_accepted() {
        assert!(EmailValidator::is_valid(Some("a@b.c")));
        assert!(EmailValidator::is_valid(Some("name@host.123")));
    }

    #[test]
    fn test_dots_in_local_part_are_not_checked() {
        assert!(EmailValidator::is_valid(Some("first.last@email.com")));
        assert!(EmailValidator::is_valid(Some("first..last@email.com")));
    }

    #[test]
    fn test_long_input_is_linear() {
        let mut s = "a".repeat(100_000);
        s.push('@');
        s.push_str(&"b.".repeat(50_000));
        assert!(!EmailValidator::is_valid(Some(&s)));
        s.push('c');
        assert!(EmailValidator::is_valid(Some(&s)));
    }
}

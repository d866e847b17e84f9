//! Property tests for the email validator

use pinfo_core::EmailValidator;
use proptest::prelude::*;

proptest! {
    #[test]
    fn no_at_sign_is_invalid(s in "[a-z0-9.]{0,40}") {
        prop_assert!(!EmailValidator::is_valid(Some(&s)));
    }

    #[test]
    fn more_than_one_at_sign_is_invalid(
        a in "[a-z.]{0,10}",
        b in "[a-z.]{0,10}",
        c in "[a-z.]{0,10}",
    ) {
        let candidate = format!("{}@{}@{}", a, b, c);
        prop_assert!(!EmailValidator::is_valid(Some(&candidate)));
    }

    #[test]
    fn local_at_two_labels_is_valid(
        local in "[a-z0-9_+-]{1,12}",
        label1 in "[a-z0-9-]{1,12}",
        label2 in "[a-z]{1,6}",
    ) {
        let candidate = format!("{}@{}.{}", local, label1, label2);
        prop_assert!(EmailValidator::is_valid(Some(&candidate)));
    }

    #[test]
    fn double_dot_in_domain_is_invalid(
        local in "[a-z]{1,8}",
        before in "[a-z.]{0,8}",
        after in "[a-z.]{0,8}",
    ) {
        let candidate = format!("{}@{}..{}", local, before, after);
        prop_assert!(!EmailValidator::is_valid(Some(&candidate)));
    }

    #[test]
    fn validation_is_deterministic(s in "\\PC{0,30}") {
        prop_assert_eq!(
            EmailValidator::is_valid(Some(&s)),
            EmailValidator::is_valid(Some(&s))
        );
    }
}

#[test]
fn scenario_examples() {
    let cases = [
        ("name@email.com", true),
        ("name@email.co.uk", true),
        ("name@email", false),
        ("name@email..com", false),
        ("@email.com", false),
        ("", false),
    ];

    for (candidate, expected) in cases {
        assert_eq!(
            EmailValidator::is_valid(Some(candidate)),
            expected,
            "unexpected result for {:?}",
            candidate
        );
    }
    assert!(!EmailValidator::is_valid(None));
}

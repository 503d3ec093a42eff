// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, PasswordPolicyError};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidUsername(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid username: test");

    let err: DomainError = DomainError::InvalidPassword(PasswordPolicyError::TooShort {
        min_length: 6,
    });
    assert_eq!(
        format!("{err}"),
        "Invalid password: Password must be at least 6 characters long"
    );

    let err: DomainError = DomainError::InvalidRole(String::from("root"));
    assert_eq!(format!("{err}"), "Invalid role: 'root'");

    let err: DomainError = DomainError::InvalidSeverity(String::from("Extreme"));
    assert_eq!(
        format!("{err}"),
        "Invalid severity: 'Extreme' (must be Low, Medium, or High)"
    );

    let err: DomainError = DomainError::InvalidStatus(String::from("Done"));
    assert_eq!(
        format!("{err}"),
        "Invalid status: 'Done' (must be Open, Investigating, or Closed)"
    );

    let err: DomainError = DomainError::InvalidCategory(String::from("test"));
    assert_eq!(format!("{err}"), "Invalid category: test");

    let err: DomainError = DomainError::InvalidTimestamp {
        value: String::from("yesterday"),
        error: String::from("bad"),
    };
    assert_eq!(format!("{err}"), "Invalid timestamp 'yesterday': bad");
}

#[test]
fn test_domain_error_field_names() {
    assert_eq!(
        DomainError::InvalidUsername(String::new()).field(),
        "username"
    );
    assert_eq!(
        DomainError::InvalidPassword(PasswordPolicyError::ContainsWhitespace).field(),
        "password"
    );
    assert_eq!(DomainError::InvalidSeverity(String::new()).field(), "severity");
    assert_eq!(
        DomainError::InvalidTimestamp {
            value: String::new(),
            error: String::new(),
        }
        .field(),
        "timestamp"
    );
}

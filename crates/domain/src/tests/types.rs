// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Category, DomainError, IncidentStatus, IncidentTimestamp, NewIncident, Role, Severity,
};

#[test]
fn test_severity_parses_case_insensitively() {
    assert_eq!("High".parse::<Severity>().unwrap(), Severity::High);
    assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
    assert_eq!(" MEDIUM ".parse::<Severity>().unwrap(), Severity::Medium);
    assert_eq!(Severity::Low.to_string(), "Low");
}

#[test]
fn test_severity_rejects_unknown_value() {
    let result: Result<Severity, DomainError> = "Critical".parse();
    assert_eq!(
        result,
        Err(DomainError::InvalidSeverity(String::from("Critical")))
    );
}

#[test]
fn test_status_round_trips_through_str() {
    for status in IncidentStatus::ALL {
        assert_eq!(status.as_str().parse::<IncidentStatus>().unwrap(), status);
    }
    assert!("Resolved".parse::<IncidentStatus>().is_err());
}

#[test]
fn test_role_defaults_to_user() {
    assert_eq!(Role::default(), Role::User);
    assert_eq!(Role::default().as_str(), "user");
    assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
    assert!("superuser".parse::<Role>().is_err());
}

#[test]
fn test_timestamp_accepts_date_and_datetime() {
    let date: IncidentTimestamp = IncidentTimestamp::parse("2024-03-01").unwrap();
    assert_eq!(date.as_str(), "2024-03-01");

    let datetime: IncidentTimestamp = IncidentTimestamp::parse("2024-03-01 14:05:09").unwrap();
    assert_eq!(datetime.as_str(), "2024-03-01 14:05:09");
}

#[test]
fn test_timestamp_rejects_garbage() {
    assert!(IncidentTimestamp::parse("yesterday").is_err());
    assert!(IncidentTimestamp::parse("2024-13-01").is_err());
    assert!(IncidentTimestamp::parse("2024-02-30").is_err());
    assert!(IncidentTimestamp::parse("2024-03-01T14:05:09").is_err());
    assert!(IncidentTimestamp::parse("").is_err());
}

#[test]
fn test_timestamp_now_is_parseable() {
    let now: IncidentTimestamp = IncidentTimestamp::now_utc().unwrap();
    assert!(IncidentTimestamp::parse(now.as_str()).is_ok());
}

#[test]
fn test_category_is_trimmed_and_bounded() {
    assert_eq!(Category::new("  Phishing ").unwrap().as_str(), "Phishing");
    assert!(Category::new("   ").is_err());
    assert!(Category::new(&"x".repeat(101)).is_err());
}

#[test]
fn test_new_incident_parse_normalizes_blank_optionals() {
    let incident: NewIncident = NewIncident::parse(
        "2024-03-01",
        "high",
        "DDos",
        "open",
        Some("   "),
        None,
    )
    .unwrap();

    assert_eq!(incident.severity(), Severity::High);
    assert_eq!(incident.status(), IncidentStatus::Open);
    assert_eq!(incident.category().as_str(), "DDos");
    assert_eq!(incident.description(), None);
    assert_eq!(incident.reported_by(), None);
}

#[test]
fn test_new_incident_parse_reports_first_bad_field() {
    let result: Result<NewIncident, DomainError> =
        NewIncident::parse("2024-03-01", "Severe", "", "Open", None, None);

    assert_eq!(
        result,
        Err(DomainError::InvalidSeverity(String::from("Severe")))
    );
}

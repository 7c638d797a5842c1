//! Validation flow: check decides and produces the failure payload.

use cirrus::alarms::AlarmManager;
use cirrus::ngsi::{ContextAttribute, ContextElementResponse, EntityId, QueryContextResponse, SccCode};
use cirrus::types::ApiVersion;
use serde_json::{json, Value};

fn parse(payload: &str) -> Value {
    serde_json::from_str(payload).expect("payload must be valid JSON")
}

#[test]
fn valid_response_passes_check_untouched() {
    let alarms = AlarmManager::default();
    let mut response = QueryContextResponse::new();
    response.results.push(ContextElementResponse::new(
        EntityId::new("Room1", "Room", false),
        vec![ContextAttribute::new("temperature", "float", json!(21))],
    ));

    let outcome = response.check(ApiVersion::V1, false, None, &alarms, "10.0.0.1");
    assert!(outcome.is_ok());

    // internal state untouched: the error code is still the unset sentinel
    assert_eq!(response.error_code.code(), SccCode::None);
    assert_eq!(alarms.active_bad_inputs(), 0);
}

#[test]
fn predetected_error_short_circuits_and_renders() {
    let alarms = AlarmManager::default();
    let mut response = QueryContextResponse::new();

    let body = response
        .check(
            ApiVersion::V1,
            false,
            Some("service path too deep"),
            &alarms,
            "10.0.0.1",
        )
        .unwrap_err();

    let payload = parse(&body);
    assert_eq!(payload["errorCode"]["code"], "400");
    assert_eq!(payload["errorCode"]["reasonPhrase"], "Bad Request");
    assert_eq!(payload["errorCode"]["details"], "service path too deep");

    // a predetected error is the upstream collaborator's finding, not a
    // fresh client mistake: no alarm is raised here
    assert_eq!(alarms.active_bad_inputs(), 0);
}

#[test]
fn failing_element_validation_raises_alarm_and_renders() {
    let alarms = AlarmManager::default();
    let mut response = QueryContextResponse::new();
    response.results.push(ContextElementResponse::new(
        EntityId::new("", "Room", false),
        vec![],
    ));

    let body = response
        .check(ApiVersion::V1, false, None, &alarms, "10.0.0.1")
        .unwrap_err();

    let payload = parse(&body);
    assert_eq!(payload["errorCode"]["code"], "400");
    assert_eq!(payload["errorCode"]["details"], "empty entity id");
    assert_eq!(alarms.active_bad_inputs(), 1);
}

#[test]
fn check_failure_body_equals_a_later_render() {
    let alarms = AlarmManager::default();
    let mut response = QueryContextResponse::new();

    let body = response
        .check(ApiVersion::V1, false, Some("malformed payload"), &alarms, "10.0.0.1")
        .unwrap_err();

    assert_eq!(body, response.render(false));
}

#[test]
fn empty_predetected_error_falls_through_to_validation() {
    let alarms = AlarmManager::default();
    let mut response = QueryContextResponse::new();
    response.results.push(ContextElementResponse::new(
        EntityId::new("Room1", "Room", false),
        vec![],
    ));

    let outcome = response.check(ApiVersion::V1, false, Some(""), &alarms, "10.0.0.1");
    assert!(outcome.is_ok());
}

#[test]
fn v2_identifier_rules_apply_through_check() {
    let alarms = AlarmManager::default();
    let mut response = QueryContextResponse::new();
    response.results.push(ContextElementResponse::new(
        EntityId::new("Room<1>", "Room", false),
        vec![],
    ));

    assert!(response
        .clone()
        .check(ApiVersion::V1, false, None, &alarms, "10.0.0.1")
        .is_ok());

    let body = response
        .check(ApiVersion::V2, false, None, &alarms, "10.0.0.2")
        .unwrap_err();
    let payload = parse(&body);
    assert!(payload["errorCode"]["details"]
        .as_str()
        .unwrap()
        .contains("invalid character in entity id"));
}

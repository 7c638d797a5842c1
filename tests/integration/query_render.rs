//! End-to-end rendering scenarios for the query response envelope.

use cirrus::ngsi::{ContextAttribute, ContextElementResponse, EntityId, QueryContextResponse, SccCode};
use serde_json::{json, Value};

fn parse(payload: &str) -> Value {
    serde_json::from_str(payload).expect("payload must be valid JSON")
}

fn matched_room(id: &str) -> ContextElementResponse {
    ContextElementResponse::new(
        EntityId::new(id, "Room", false),
        vec![ContextAttribute::new("temperature", "float", json!(23.5))],
    )
}

#[test]
fn matched_entity_renders_results_only() {
    let mut response = QueryContextResponse::new();
    response.results.push(matched_room("Room1"));

    let payload = parse(&response.render(false));

    assert!(payload.get("errorCode").is_none());
    let responses = payload["contextResponses"].as_array().unwrap();
    assert_eq!(responses.len(), 1);

    let element = &responses[0]["contextElement"];
    assert_eq!(element["id"], "Room1");
    assert_eq!(element["type"], "Room");
    assert_eq!(element["isPattern"], "false");
    assert_eq!(element["attributes"][0]["name"], "temperature");
    assert_eq!(element["attributes"][0]["value"], 23.5);
}

#[test]
fn empty_result_with_untouched_error_becomes_internal_error() {
    // A producing collaborator that populates neither branch violated its
    // contract; the envelope must still say something explicit.
    let mut response = QueryContextResponse::new();

    let payload = parse(&response.render(false));

    assert!(payload.get("contextResponses").is_none());
    assert_eq!(payload["errorCode"]["code"], "500");
    assert_eq!(payload["errorCode"]["reasonPhrase"], "Internal Server Error");
    assert_eq!(
        payload["errorCode"]["details"],
        "Both the error-code structure and the response vector were empty"
    );
}

#[test]
fn zero_matches_with_explicit_status_is_a_plain_error_envelope() {
    let mut response = QueryContextResponse::new();
    response
        .error_code
        .fill(SccCode::ContextElementNotFound, "no entities matched the query");

    let payload = parse(&response.render(false));

    assert_eq!(payload["errorCode"]["code"], "404");
    assert_eq!(payload["errorCode"]["details"], "no entities matched the query");
    assert!(payload.get("contextResponses").is_none());
}

#[test]
fn warning_details_render_alongside_results() {
    let mut response = QueryContextResponse::new();
    response.results.push(matched_room("Room1"));
    response.results.push(matched_room("Room2"));
    response.error_code.fill(SccCode::None, "partial match");

    let payload = parse(&response.render(false));

    assert_eq!(payload["errorCode"]["code"], "200");
    assert_eq!(payload["errorCode"]["details"], "partial match");
    assert_eq!(response.error_code.code(), SccCode::Ok);

    let responses = payload["contextResponses"].as_array().unwrap();
    assert_eq!(responses.len(), 2);
    // a top-level error field means each element carries its own status
    for element in responses {
        assert_eq!(element["statusCode"]["code"], "200");
    }
}

#[test]
fn object_mode_keys_attributes_by_name() {
    let mut response = QueryContextResponse::new();
    response.results.push(matched_room("Room1"));

    let payload = parse(&response.render(true));

    let attributes = &payload["contextResponses"][0]["contextElement"]["attributes"];
    assert!(attributes.is_object());
    assert_eq!(attributes["temperature"]["type"], "float");
    assert_eq!(attributes["temperature"]["value"], 23.5);
}

#[test]
fn result_order_is_match_order() {
    let mut response = QueryContextResponse::new();
    for id in ["RoomC", "RoomA", "RoomB"] {
        response.results.push(matched_room(id));
    }

    let payload = parse(&response.render(false));
    let ids: Vec<&str> = payload["contextResponses"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["contextElement"]["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["RoomC", "RoomA", "RoomB"]);
}

#[test]
fn rendering_twice_yields_the_same_payload() {
    let mut response = QueryContextResponse::new();
    response.results.push(matched_room("Room1"));
    response.error_code.fill(SccCode::None, "partial match");

    let first = response.render(false);
    let second = response.render(false);
    assert_eq!(first, second);

    // the forced internal error is stable across renders too
    let mut empty = QueryContextResponse::new();
    let first = empty.render(false);
    let second = empty.render(false);
    assert_eq!(first, second);
}

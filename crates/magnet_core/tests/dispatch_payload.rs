use magnet_core::{DispatchRequest, DispatchResponse, DispatchResult, SeriesFlag};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn movie_payload_omits_series_fields() {
    let request = DispatchRequest::new(
        "magnet:?xt=urn:btih:abc",
        false,
        Some("3".to_string()),
        Some("Ignored Title".to_string()),
        Some("tt0001".to_string()),
    );

    let payload = serde_json::to_value(&request).unwrap();
    assert_eq!(
        payload,
        json!({
            "magnet": "magnet:?xt=urn:btih:abc",
            "is_series": false,
            "imdb_id": "tt0001",
        })
    );
}

#[test]
fn series_payload_includes_season_and_title() {
    let request = DispatchRequest::new(
        "magnet:?xt=urn:btih:abc",
        SeriesFlag::parse("True"),
        Some("1".to_string()),
        Some("Show Title".to_string()),
        Some("tt123".to_string()),
    );

    let payload = serde_json::to_value(&request).unwrap();
    assert_eq!(
        payload,
        json!({
            "magnet": "magnet:?xt=urn:btih:abc",
            "is_series": true,
            "season": "1",
            "item_title": "Show Title",
            "imdb_id": "tt123",
        })
    );
}

#[test]
fn false_text_is_not_truthy() {
    let request = DispatchRequest::new(
        "magnet:?xt=urn:btih:abc",
        SeriesFlag::parse("False"),
        Some("1".to_string()),
        Some("Show".to_string()),
        None,
    );

    assert!(!request.is_series());
    let payload = serde_json::to_value(&request).unwrap();
    assert_eq!(payload["is_series"], json!(false));
    assert!(payload.get("season").is_none());
    assert!(payload.get("item_title").is_none());
    assert!(payload.get("imdb_id").is_none());
}

#[test]
fn incoming_text_flag_is_normalized() {
    let request: DispatchRequest = serde_json::from_value(json!({
        "magnet": "magnet:?xt=urn:btih:abc",
        "is_series": "False",
        "season": "2",
        "item_title": "Show",
    }))
    .unwrap();
    assert!(!request.is_series());
    assert_eq!(request.season(), None);
    assert_eq!(request.item_title(), None);

    let request: DispatchRequest = serde_json::from_value(json!({
        "magnet": "magnet:?xt=urn:btih:abc",
        "is_series": "TRUE",
        "season": "2",
        "item_title": "Show",
    }))
    .unwrap();
    assert!(request.is_series());
    assert_eq!(request.season(), Some("2"));
    assert_eq!(request.item_title(), Some("Show"));

    let request: DispatchRequest =
        serde_json::from_value(json!({ "magnet": "magnet:?xt=urn:btih:abc" })).unwrap();
    assert!(!request.is_series());
}

#[test]
fn response_status_maps_to_result() {
    let ok: DispatchResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
    assert_eq!(DispatchResult::from(ok), DispatchResult::Success);

    let failed: DispatchResponse =
        serde_json::from_str(r#"{"status":"error","message":"queue full"}"#).unwrap();
    assert_eq!(
        DispatchResult::from(failed),
        DispatchResult::Failure {
            reason: "queue full".to_string()
        }
    );

    assert_eq!(
        DispatchResult::from(DispatchResponse::error("Missing magnet link")),
        DispatchResult::Failure {
            reason: "Missing magnet link".to_string()
        }
    );
}

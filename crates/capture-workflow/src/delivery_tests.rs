use super::*;
use capture_protocols::{OfficialRecord, PostalAddress};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> DeliveryClient {
    DeliveryClient::new("/api/sos_officials", Duration::from_secs(5))
}

fn payload() -> OfficialsPayload {
    OfficialsPayload::new(
        "Acme LLC",
        "0123456",
        vec![OfficialRecord::new(
            "Manager",
            "Jane Doe",
            PostalAddress {
                address1: "123 Main St".to_string(),
                city: "Raleigh".to_string(),
                state: "NC".to_string(),
                zip: "27603".to_string(),
            },
        )],
    )
    .unwrap()
}

#[test]
fn test_endpoint_trims_trailing_slashes() {
    let url = client().endpoint("http://localhost:5000///").unwrap();
    assert_eq!(url.as_str(), "http://localhost:5000/api/sos_officials");
}

#[test]
fn test_endpoint_path_without_slash() {
    let client = DeliveryClient::new("api/officials", Duration::from_secs(5));
    let url = client.endpoint("http://127.0.0.1:5000").unwrap();
    assert_eq!(url.path(), "/api/officials");
}

#[test]
fn test_endpoint_rejects_garbage() {
    assert!(matches!(
        client().endpoint("not a base"),
        Err(DeliveryError::InvalidEndpoint(_))
    ));
    assert!(matches!(
        client().endpoint("ftp://localhost"),
        Err(DeliveryError::InvalidEndpoint(_))
    ));
}

#[test]
fn test_from_config() {
    let client = DeliveryClient::from_config(&OriginConfig::default(), &TimingConfig::default());
    let url = client.endpoint("http://localhost:5000").unwrap();
    assert_eq!(url.path(), "/api/sos_officials");
}

#[tokio::test]
async fn test_deliver_posts_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sos_officials"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "legalName": "Acme LLC",
            "sosId": "0123456",
            "officials": [{
                "role": "Manager",
                "name": "Jane Doe",
                "address1": "123 Main St",
                "city": "Raleigh",
                "state": "NC",
                "zip": "27603"
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"count": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let receipt = client().deliver(&mock_server.uri(), &payload()).await.unwrap();
    assert_eq!(receipt.status, 200);
    assert_eq!(receipt.count, Some(1));
}

#[tokio::test]
async fn test_deliver_tolerates_unparsable_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/sos_officials"))
        .respond_with(ResponseTemplate::new(201).set_body_string("saved"))
        .mount(&mock_server)
        .await;

    let receipt = client().deliver(&mock_server.uri(), &payload()).await.unwrap();
    assert_eq!(receipt.status, 201);
    assert_eq!(receipt.count, None);
}

#[tokio::test]
async fn test_deliver_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
        .mount(&mock_server)
        .await;

    let err = client().deliver(&mock_server.uri(), &payload()).await.unwrap_err();
    match err {
        DeliveryError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "database locked");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_deliver_transport_error() {
    // Nothing listens on the discard port.
    let err = client()
        .deliver("http://127.0.0.1:9", &payload())
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Transport(_)));
}

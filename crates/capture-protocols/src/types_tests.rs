use super::*;

fn jane() -> OfficialRecord {
    OfficialRecord::new(
        "Manager",
        "Jane Doe",
        PostalAddress {
            address1: "123 Main St".to_string(),
            city: "Raleigh".to_string(),
            state: "NC".to_string(),
            zip: "27603-8950".to_string(),
        },
    )
}

#[test]
fn test_payload_requires_officials() {
    assert!(OfficialsPayload::new("Acme LLC", "0123456", vec![]).is_none());
    assert!(OfficialsPayload::new("", "", vec![jane()]).is_some());
}

#[test]
fn test_payload_json_shape() {
    let payload = OfficialsPayload::new("Acme LLC", "0123456", vec![jane()]).unwrap();
    let json = serde_json::to_value(&payload).unwrap();

    assert_eq!(json["legalName"], "Acme LLC");
    assert_eq!(json["sosId"], "0123456");
    let official = &json["officials"][0];
    assert_eq!(official["role"], "Manager");
    assert_eq!(official["name"], "Jane Doe");
    assert_eq!(official["address1"], "123 Main St");
    assert_eq!(official["city"], "Raleigh");
    assert_eq!(official["state"], "NC");
    assert_eq!(official["zip"], "27603-8950");
}

#[test]
fn test_payload_deserialize_rejects_empty_officials() {
    let json = r#"{"legalName":"Acme LLC","sosId":"1","officials":[]}"#;
    let result = serde_json::from_str::<OfficialsPayload>(json);
    assert!(result.is_err());
}

#[test]
fn test_payload_deserialize() {
    let json = r#"{"legalName":"Acme LLC","sosId":"1","officials":[
        {"role":"Registered Agent","name":"Pat Agent","address1":"","city":"","state":"","zip":""}
    ]}"#;
    let payload: OfficialsPayload = serde_json::from_str(json).unwrap();
    assert_eq!(payload.officials().len(), 1);
    assert_eq!(payload.officials()[0].role(), "Registered Agent");
    assert!(payload.officials()[0].address().is_empty());
}

#[test]
fn test_display_name_falls_back_to_sos_id() {
    let payload = OfficialsPayload::new("", "0123456", vec![jane()]).unwrap();
    assert_eq!(payload.display_name(), "0123456");
}

#[test]
fn test_refresh_token_next_after_differs() {
    let previous = RefreshToken::now();
    let next = RefreshToken::next_after(previous);
    assert_ne!(next, previous);
    assert!(next.is_set());

    let far_future = RefreshToken::new(u64::MAX / 2);
    assert_eq!(RefreshToken::next_after(far_future).value(), u64::MAX / 2 + 1);
}

#[test]
fn test_refresh_token_next_after_saturated() {
    let saturated = RefreshToken::new(u64::MAX);
    let next = RefreshToken::next_after(saturated);
    assert_ne!(next, saturated);
    assert!(next.is_set());
}

#[test]
fn test_refresh_token_none() {
    assert!(!RefreshToken::NONE.is_set());
    assert_eq!(RefreshToken::default(), RefreshToken::NONE);
    assert_eq!(serde_json::to_string(&RefreshToken::new(42)).unwrap(), "42");
}

#[test]
fn test_trigger_prefers_employer_attribute() {
    let source = TriggerSource::new(Some("  Acme LLC ".to_string()), "SOS");
    assert_eq!(source.business_name(), "Acme LLC");
}

#[test]
fn test_trigger_falls_back_to_text() {
    let source = TriggerSource::new(Some(String::new()), "  Beta Corp\n");
    assert_eq!(source.business_name(), "Beta Corp");

    let source = TriggerSource::new(None, "   ");
    assert!(source.business_name().is_empty());
}

#[test]
fn test_handoff_state_serialize() {
    let state = HandoffState {
        business_name: Some("Acme".to_string()),
        origin_base: None,
        refresh_token: RefreshToken::new(7),
    };
    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["businessName"], "Acme");
    assert_eq!(json["refreshToken"], 7);
}

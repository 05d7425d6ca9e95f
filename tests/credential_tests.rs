use base64::{
    Engine as _,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use petdimen_admin::credential::{self, ADMIN_ROLE};
use serde_json::json;

// --- Helper Functions ---

const TEST_JWT_SECRET: &str = "test-secret-value-1234567890";

fn mint(claims: serde_json::Value) -> String {
    let key = EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes());
    encode(&Header::default(), &claims, &key).unwrap()
}

/// Hand-assembled token whose middle segment is `payload` encoded with `engine`.
fn assemble(payload: &[u8], engine: &impl base64::Engine) -> String {
    format!("eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl", engine.encode(payload))
}

// --- Tests ---

#[test]
fn test_fewer_than_two_segments_yields_none() {
    assert!(credential::decode("").is_none());
    assert!(credential::decode("no-dots-at-all").is_none());
}

#[test]
fn test_empty_middle_segment_yields_none() {
    assert!(credential::decode("header.").is_none());
    assert!(credential::decode("header..signature").is_none());
}

#[test]
fn test_admin_role_is_extracted() {
    let token = mint(json!({ "sub": "42", "roles": ["ADMIN"] }));

    let claims = credential::decode(&token).expect("well-formed token should decode");
    let roles = claims.roles();

    assert!(roles.contains(ADMIN_ROLE));
    assert!(roles.is_admin());
    assert_eq!(claims.subject(), Some("42"));
    assert!(credential::is_admin_credential(&token));
}

#[test]
fn test_roles_keep_their_order() {
    let token = mint(json!({ "roles": ["OPS", "ADMIN", "AUDITOR"] }));

    let roles = credential::roles_of(&token);

    assert_eq!(roles.iter().collect::<Vec<_>>(), vec!["OPS", "ADMIN", "AUDITOR"]);
}

#[test]
fn test_non_admin_roles() {
    let token = mint(json!({ "roles": ["USER"] }));

    assert!(!credential::roles_of(&token).is_admin());
    assert!(!credential::is_admin_credential(&token));
}

#[test]
fn test_missing_roles_claim_is_empty_set() {
    let token = mint(json!({ "sub": "7" }));

    assert!(credential::roles_of(&token).is_empty());
}

#[test]
fn test_roles_claim_with_wrong_shape_is_empty_set() {
    let as_string = mint(json!({ "roles": "ADMIN" }));
    assert!(credential::roles_of(&as_string).is_empty());

    let mixed = mint(json!({ "roles": [1, "ADMIN", null] }));
    assert_eq!(credential::roles_of(&mixed).iter().collect::<Vec<_>>(), vec!["ADMIN"]);
}

#[test]
fn test_multibyte_claims_survive_decoding() {
    let nickname = "小明的猫 · Ünïcødé 🐾";
    let token = mint(json!({ "nickname": nickname, "roles": ["ADMIN"] }));

    let claims = credential::decode(&token).unwrap();

    assert_eq!(claims.get("nickname").and_then(|v| v.as_str()), Some(nickname));
}

#[test]
fn test_invalid_base64_yields_none() {
    assert!(credential::decode("header.!!!not*base64!!!.signature").is_none());
}

#[test]
fn test_non_json_payload_yields_none() {
    let token = assemble(b"definitely not json", &URL_SAFE_NO_PAD);
    assert!(credential::decode(&token).is_none());
}

#[test]
fn test_non_object_json_payload_yields_none() {
    let token = assemble(br#"["ADMIN"]"#, &URL_SAFE_NO_PAD);
    assert!(credential::decode(&token).is_none());
}

#[test]
fn test_invalid_utf8_payload_yields_none() {
    let token = assemble(&[0x7b, 0xff, 0xfe, 0x7d], &URL_SAFE_NO_PAD);
    assert!(credential::decode(&token).is_none());
}

#[test]
fn test_padded_standard_alphabet_is_tolerated() {
    // Standard alphabet with '=' padding, as some issuers emit.
    let payload = br#"{"roles":["ADMIN"],"note":"?>~~~"}"#;
    let token = assemble(payload, &STANDARD);

    let claims = credential::decode(&token).expect("padded standard base64 should decode");
    assert!(claims.roles().is_admin());
    assert_eq!(claims.get("note").and_then(|v| v.as_str()), Some("?>~~~"));
}

#[test]
fn test_two_segment_credential_is_accepted() {
    let token = format!("header.{}", URL_SAFE_NO_PAD.encode(br#"{"roles":["ADMIN"]}"#));
    assert!(credential::is_admin_credential(&token));
}

#[test]
fn test_empty_credential_is_never_admin() {
    assert!(!credential::is_admin_credential(""));
}

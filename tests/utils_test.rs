use ytplaylist::types::Token;
use ytplaylist::utils::*;

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    // RFC 7636 appendix B test vector
    let verifier = "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk";
    let challenge = generate_code_challenge(verifier);
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");

    // Different input should produce different output
    assert_ne!(challenge, generate_code_challenge("different_verifier"));
}

#[test]
fn test_generate_state() {
    let state = generate_state();
    assert_eq!(state.len(), 32);
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_ne!(state, generate_state());
}

#[test]
fn test_expires_at_is_absolute() {
    assert_eq!(expires_at(1_700_000_000, Some(3599)), 1_700_003_599);

    // Missing lifetime falls back to one hour
    assert_eq!(expires_at(1_700_000_000, None), 1_700_000_000 + DEFAULT_EXPIRES_IN);
}

#[test]
fn test_token_expiry_margin() {
    let token = Token {
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
        expires_at: 1_000,
        token_type: "Bearer".to_string(),
        scope: String::new(),
    };

    assert!(!token.is_expired_at(900));
    // Within the 60 second margin
    assert!(token.is_expired_at(941));
    assert!(token.is_expired_at(1_000));
    assert!(token.is_expired_at(2_000));
}

#[test]
fn test_token_serialization_has_no_relative_expiry() {
    let token = Token {
        access_token: "a".to_string(),
        refresh_token: "r".to_string(),
        expires_at: 1_000,
        token_type: "Bearer".to_string(),
        scope: "s".to_string(),
    };

    let json: serde_json::Value = serde_json::to_value(&token).unwrap();
    assert_eq!(json["expires_at"], 1_000);
    assert!(json.get("expires_in").is_none());
}

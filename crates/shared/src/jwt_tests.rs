//! Unit tests for JWT functionality.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::auth::Claims;
use crate::jwt::{JwtConfig, JwtError, JwtService};

const SECRET: &str = "test-secret-key-for-testing";

fn create_test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: SECRET.to_string(),
        access_token_expires_secs: 3600,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, "ana@example.com", "USER", expires_at);

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.email, "ana@example.com");
    assert_eq!(claims.role, "USER");
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_claims_keep_admin_role() {
    let claims = Claims::new(Uuid::new_v4(), "root@example.com", "ADMIN", Utc::now());
    assert_eq!(claims.role, "ADMIN");
}

#[test]
fn test_generate_and_validate_token() {
    let service = create_test_service();
    let user_id = Uuid::new_v4();

    let token = service
        .generate_access_token(user_id, "ana@example.com", "USER")
        .unwrap();
    assert!(!token.is_empty());

    let claims = service.validate_token(&token).unwrap();
    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.email, "ana@example.com");
    assert_eq!(claims.role, "USER");
    assert_eq!(claims.exp - claims.iat, 3600);
}

#[test]
fn test_invalid_token() {
    let service = create_test_service();
    let result = service.validate_token("invalid.token.here");
    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        access_token_expires_secs: 3600,
    });
    let token = other
        .generate_access_token(Uuid::new_v4(), "ana@example.com", "USER")
        .unwrap();

    assert!(create_test_service().validate_token(&token).is_err());
}

#[test]
fn test_expired_token() {
    let claims = Claims::new(
        Uuid::new_v4(),
        "ana@example.com",
        "USER",
        Utc::now() - Duration::hours(2),
    );
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();

    let result = create_test_service().validate_token(&token);
    assert!(matches!(result, Err(JwtError::Expired)));
}

#[test]
fn test_debug_hides_secret() {
    let rendered = format!("{:?}", create_test_service());
    assert!(!rendered.contains(SECRET));
    assert!(rendered.contains("[hidden]"));
}

#[test]
fn test_expires_in() {
    assert_eq!(create_test_service().access_token_expires_in(), 3600);
}

//! Unit tests for JWT functionality.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use crate::auth::Claims;
    use crate::jwt::{JwtConfig, JwtError, JwtService};

    const TEST_SECRET: &str = "test-secret-key-for-testing";

    fn create_test_service() -> JwtService {
        JwtService::new(JwtConfig {
            secret: TEST_SECRET.to_string(),
            token_expiry_days: 7,
        })
    }

    fn test_permissions() -> Vec<String> {
        vec!["dashboard".to_string(), "transactions".to_string()]
    }

    #[test]
    fn test_claims_new_sets_correct_fields() {
        let user_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::days(7);

        let claims = Claims::new(
            user_id,
            "admin@example.com",
            "ADMIN",
            test_permissions(),
            expires_at,
        );

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.role, "ADMIN");
        assert_eq!(claims.permissions, test_permissions());
        assert!(claims.iat <= Utc::now().timestamp());
        assert_eq!(claims.exp, expires_at.timestamp());
    }

    #[test]
    fn test_claims_is_admin() {
        let expires_at = Utc::now() + Duration::days(7);
        let admin = Claims::new(Uuid::new_v4(), "a@b.c", "ADMIN", vec![], expires_at);
        let viewer = Claims::new(Uuid::new_v4(), "a@b.c", "VIEWER", vec![], expires_at);

        assert!(admin.is_admin());
        assert!(!viewer.is_admin());
    }

    #[test]
    fn test_generate_and_validate_roundtrip() {
        let service = create_test_service();
        let user_id = Uuid::new_v4();

        let token = service
            .generate_token(user_id, "viewer@example.com", "VIEWER", test_permissions())
            .unwrap();
        assert!(!token.is_empty());

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.user_id(), user_id);
        assert_eq!(claims.email, "viewer@example.com");
        assert_eq!(claims.role, "VIEWER");
        assert_eq!(claims.permissions, test_permissions());
    }

    #[test]
    fn test_malformed_token_fails() {
        let service = create_test_service();
        let result = service.validate_token("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_token_fails_at_every_position() {
        let service = create_test_service();
        let token = service
            .generate_token(Uuid::new_v4(), "admin@example.com", "ADMIN", vec![])
            .unwrap();

        for i in 0..token.len() {
            let mut tampered: Vec<char> = token.chars().collect();
            tampered[i] = if tampered[i] == 'A' { 'B' } else { 'A' };
            let tampered: String = tampered.into_iter().collect();
            if tampered == token {
                continue;
            }
            assert!(
                service.validate_token(&tampered).is_err(),
                "tampered token accepted at position {i}"
            );
        }
    }

    #[test]
    fn test_wrong_secret_fails() {
        let service = create_test_service();
        let other = JwtService::new(JwtConfig {
            secret: "a-completely-different-secret".to_string(),
            token_expiry_days: 7,
        });

        let token = service
            .generate_token(Uuid::new_v4(), "admin@example.com", "ADMIN", vec![])
            .unwrap();

        assert!(matches!(
            other.validate_token(&token),
            Err(JwtError::Invalid)
        ));
    }

    #[test]
    fn test_expired_token_fails() {
        let service = create_test_service();
        let expired_at = Utc::now() - Duration::hours(2);
        let claims = Claims::new(Uuid::new_v4(), "admin@example.com", "ADMIN", vec![], expired_at);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service.validate_token(&token),
            Err(JwtError::Expired)
        ));
    }
}

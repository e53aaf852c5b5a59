use crate::application_port::{AuthError, TokenCodec};
use crate::domain_model::{AccessToken, RefreshToken, Subject};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub issuer: String,
    pub audience: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
    pub signing_key: Vec<u8>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // subject email
    exp: i64,
    iat: i64,
    iss: String,
    aud: String,
    jti: String, // keeps same-second tokens distinct
    typ: TokenKind,
}

fn encode_claims(
    subject: &Subject,
    kind: TokenKind,
    ttl: Duration,
    cfg: &JwtConfig,
) -> Result<(String, DateTime<Utc>), AuthError> {
    let iat_dt = Utc::now();
    let exp_dt = TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| iat_dt.checked_add_signed(ttl))
        .ok_or_else(|| AuthError::InternalError(format!("token ttl of {ttl:?} is out of range")))?;
    let claims = Claims {
        sub: subject.to_string(),
        exp: exp_dt.timestamp(),
        iat: iat_dt.timestamp(),
        iss: cfg.issuer.clone(),
        aud: cfg.audience.clone(),
        jti: uuid::Uuid::new_v4().to_string(),
        typ: kind,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&cfg.signing_key),
    )
    .map_err(|e| AuthError::InternalError(e.to_string()))?;
    Ok((token, exp_dt))
}

fn decode_claims(token: &str, validate_exp: bool, cfg: &JwtConfig) -> Result<Claims, AuthError> {
    let mut v = Validation::new(Algorithm::HS256);
    v.validate_exp = validate_exp;
    v.leeway = 0;
    v.set_audience(&[cfg.audience.clone()]);
    v.set_issuer(&[cfg.issuer.clone()]);
    // Expiry is folded into InvalidToken; SessionExpired is reserved for an
    // absent slot.
    let data = decode::<Claims>(token, &DecodingKey::from_secret(&cfg.signing_key), &v)
        .map_err(|_| AuthError::InvalidToken)?;
    Ok(data.claims)
}

pub struct JwtHs256Codec {
    cfg: JwtConfig,
}

impl JwtHs256Codec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtHs256Codec { cfg }
    }

    fn access_subject(&self, token: &AccessToken, validate_exp: bool) -> Result<Subject, AuthError> {
        let claims = decode_claims(&token.0, validate_exp, &self.cfg)?;
        if claims.typ != TokenKind::Access || claims.sub.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(Subject(claims.sub))
    }
}

#[async_trait::async_trait]
impl TokenCodec for JwtHs256Codec {
    async fn issue_access_token(
        &self,
        subject: &Subject,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let (token, exp_dt) =
            encode_claims(subject, TokenKind::Access, self.cfg.access_ttl, &self.cfg)?;
        Ok((AccessToken(token), exp_dt))
    }

    async fn issue_refresh_token(
        &self,
        subject: &Subject,
    ) -> Result<(RefreshToken, DateTime<Utc>), AuthError> {
        let (token, exp_dt) =
            encode_claims(subject, TokenKind::Refresh, self.cfg.refresh_ttl, &self.cfg)?;
        Ok((RefreshToken(token), exp_dt))
    }

    async fn parse_subject(&self, token: &AccessToken) -> Result<Subject, AuthError> {
        self.access_subject(token, false)
    }

    async fn verify_access_token(&self, token: &AccessToken) -> Result<Subject, AuthError> {
        self.access_subject(token, true)
    }

    fn refresh_ttl_secs(&self) -> u64 {
        self.cfg.refresh_ttl.as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            issuer: "racket.auth".to_string(),
            audience: "racket-client".to_string(),
            access_ttl: Duration::from_secs(60),
            refresh_ttl: Duration::from_secs(600),
            signing_key: b"test-signing-key".to_vec(),
        }
    }

    fn stale_access_token(subject: &str, cfg: &JwtConfig) -> AccessToken {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            exp: now - 3600,
            iat: now - 7200,
            iss: cfg.issuer.clone(),
            aud: cfg.audience.clone(),
            jti: "stale".to_string(),
            typ: TokenKind::Access,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&cfg.signing_key),
        )
        .unwrap();
        AccessToken(token)
    }

    #[tokio::test]
    async fn parse_subject_returns_embedded_subject() {
        let codec = JwtHs256Codec::new(test_config());
        let subject = Subject::from("u1@example.com");

        let (token, exp) = codec.issue_access_token(&subject).await.unwrap();

        assert!(exp > Utc::now());
        assert_eq!(codec.parse_subject(&token).await.unwrap(), subject);
        assert_eq!(codec.verify_access_token(&token).await.unwrap(), subject);
    }

    #[tokio::test]
    async fn tokens_issued_back_to_back_differ() {
        let codec = JwtHs256Codec::new(test_config());
        let subject = Subject::from("u1@example.com");

        let (a, _) = codec.issue_access_token(&subject).await.unwrap();
        let (b, _) = codec.issue_access_token(&subject).await.unwrap();
        let (r1, _) = codec.issue_refresh_token(&subject).await.unwrap();
        let (r2, _) = codec.issue_refresh_token(&subject).await.unwrap();

        assert_ne!(a, b);
        assert_ne!(r1, r2);
    }

    #[tokio::test]
    async fn refresh_token_is_not_accepted_as_access_token() {
        let codec = JwtHs256Codec::new(test_config());
        let (refresh, _) = codec
            .issue_refresh_token(&Subject::from("u1@example.com"))
            .await
            .unwrap();

        let result = codec.parse_subject(&AccessToken(refresh.0)).await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn foreign_signature_is_rejected() {
        let codec = JwtHs256Codec::new(test_config());
        let other = JwtHs256Codec::new(JwtConfig {
            signing_key: b"another-key".to_vec(),
            ..test_config()
        });
        let (token, _) = other
            .issue_access_token(&Subject::from("u1@example.com"))
            .await
            .unwrap();

        assert!(matches!(
            codec.parse_subject(&token).await,
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            codec.parse_subject(&AccessToken("not-a-jwt".to_string())).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn expired_token_still_yields_subject_but_fails_verification() {
        let cfg = test_config();
        let codec = JwtHs256Codec::new(cfg.clone());
        let token = stale_access_token("u1@example.com", &cfg);

        assert_eq!(
            codec.parse_subject(&token).await.unwrap(),
            Subject::from("u1@example.com")
        );
        assert!(matches!(
            codec.verify_access_token(&token).await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn out_of_range_ttl_is_an_error() {
        let codec = JwtHs256Codec::new(JwtConfig {
            access_ttl: Duration::from_secs(u64::MAX),
            refresh_ttl: Duration::from_secs(u64::MAX),
            ..test_config()
        });
        let subject = Subject::from("u1@example.com");

        assert!(matches!(
            codec.issue_access_token(&subject).await,
            Err(AuthError::InternalError(_))
        ));
        assert!(matches!(
            codec.issue_refresh_token(&subject).await,
            Err(AuthError::InternalError(_))
        ));
    }
}

use crate::domain_model::{AccessToken, AccountRecord, AuthType, RefreshToken, Subject};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("subject not found")]
    SubjectNotFound,
    #[error("wrong secret")]
    WrongSecret,
    #[error("subject already exists")]
    SubjectAlreadyExists,
    #[error("nickname already exists")]
    NicknameAlreadyExists,
    #[error("phone number not found")]
    PhoneNotFound,
    #[error("session expired")]
    SessionExpired,
    #[error("token invalid")]
    InvalidToken,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

#[derive(Debug, Clone)]
pub struct SignInInput {
    pub subject: Subject,
    pub secret: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
    pub access_token_expires_at: DateTime<Utc>,
    pub refresh_token_expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInResult {
    pub subject: Subject,
    pub auth_type: AuthType,
    pub tokens: AuthTokens,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReissueResult {
    pub access_token: AccessToken,
    pub access_token_expires_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait TokenCodec: Send + Sync {
    async fn issue_access_token(
        &self,
        subject: &Subject,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError>;
    async fn issue_refresh_token(
        &self,
        subject: &Subject,
    ) -> Result<(RefreshToken, DateTime<Utc>), AuthError>;
    /// Checks signature and claims but tolerates an elapsed expiry.
    async fn parse_subject(&self, token: &AccessToken) -> Result<Subject, AuthError>;
    /// Checks signature, claims and expiry.
    async fn verify_access_token(&self, token: &AccessToken) -> Result<Subject, AuthError>;
    fn refresh_ttl_secs(&self) -> u64;
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn authenticate(&self, request: SignInInput) -> Result<AccountRecord, AuthError>;
    async fn sign_in(&self, request: SignInInput) -> Result<SignInResult, AuthError>;
    async fn reissue(&self, access_token: &str) -> Result<ReissueResult, AuthError>;
    async fn sign_out(&self, access_token: &str) -> Result<String, AuthError>;
    async fn verify_token(&self, access_token: &str) -> Result<Subject, AuthError>;
}

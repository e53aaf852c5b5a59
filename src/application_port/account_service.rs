use crate::application_port::AuthError;
use crate::domain_model::{AuthType, Subject};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub subject: Subject,
    pub nickname: String,
    pub phone_number: Option<String>,
    pub auth_type: AuthType,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FindEmailResult {
    pub auth_type: AuthType,
    /// Empty for social accounts.
    pub email: String,
}

#[async_trait::async_trait]
pub trait AccountService: Send + Sync {
    async fn register(&self, request: RegisterInput) -> Result<Subject, AuthError>;
    async fn check_email(&self, email: &str) -> Result<String, AuthError>;
    async fn check_nickname(&self, nickname: &str) -> Result<String, AuthError>;
    async fn withdraw(&self, subject: &Subject, secret: &str) -> Result<String, AuthError>;
    async fn find_email(&self, phone_number: &str) -> Result<FindEmailResult, AuthError>;
}

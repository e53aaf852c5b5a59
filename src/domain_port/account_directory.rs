use crate::application_port::AuthError;
use crate::domain_model::{AccountRecord, NewAccount, Subject};

#[async_trait::async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_subject(&self, subject: &Subject) -> Result<Option<AccountRecord>, AuthError>;

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<AccountRecord>, AuthError>;

    async fn exists_by_subject(&self, subject: &Subject) -> Result<bool, AuthError>;

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, AuthError>;

    /// Fails with `SubjectAlreadyExists` on a duplicate email.
    async fn create(&self, account: NewAccount) -> Result<AccountRecord, AuthError>;

    async fn delete(&self, subject: &Subject) -> Result<(), AuthError>;
}

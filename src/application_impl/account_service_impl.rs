use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::{AccountDirectory, SessionStore};
use crate::logger::*;
use std::sync::Arc;

pub const EMAIL_AVAILABLE: &str = "email is available";
pub const NICKNAME_AVAILABLE: &str = "nickname is available";
pub const WITHDRAWAL_SUCCESS: &str = "withdrawal complete";

pub struct RealAccountService {
    accounts: Arc<dyn AccountDirectory>,
    credential_hasher: Arc<dyn CredentialHasher>,
    session_store: Arc<dyn SessionStore>,
}

impl RealAccountService {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        credential_hasher: Arc<dyn CredentialHasher>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            accounts,
            credential_hasher,
            session_store,
        }
    }
}

#[async_trait::async_trait]
impl AccountService for RealAccountService {
    async fn register(&self, request: RegisterInput) -> Result<Subject, AuthError> {
        let RegisterInput {
            subject,
            nickname,
            phone_number,
            auth_type,
            password,
        } = request;

        if self.accounts.exists_by_subject(&subject).await? {
            return Err(AuthError::SubjectAlreadyExists);
        }
        if self.accounts.exists_by_nickname(&nickname).await? {
            return Err(AuthError::NicknameAlreadyExists);
        }

        let password_hash = match auth_type {
            AuthType::General => Some(self.credential_hasher.hash_password(&password).await?),
            AuthType::Kakao => None,
        };

        let record = self
            .accounts
            .create(NewAccount {
                subject,
                nickname,
                phone_number,
                auth_type,
                password_hash,
            })
            .await?;

        info!(subject = %record.subject, auth_type = %record.auth_type, "account registered");
        Ok(record.subject)
    }

    async fn check_email(&self, email: &str) -> Result<String, AuthError> {
        if self.accounts.exists_by_subject(&Subject::from(email)).await? {
            return Err(AuthError::SubjectAlreadyExists);
        }
        Ok(EMAIL_AVAILABLE.to_string())
    }

    async fn check_nickname(&self, nickname: &str) -> Result<String, AuthError> {
        if self.accounts.exists_by_nickname(nickname).await? {
            return Err(AuthError::NicknameAlreadyExists);
        }
        Ok(NICKNAME_AVAILABLE.to_string())
    }

    async fn withdraw(&self, subject: &Subject, secret: &str) -> Result<String, AuthError> {
        let account = self
            .accounts
            .find_by_subject(subject)
            .await?
            .ok_or(AuthError::SubjectNotFound)?;

        // Social accounts have no local secret to check.
        if account.auth_type == AuthType::General {
            let password_hash = account
                .password_hash
                .as_deref()
                .ok_or(AuthError::WrongSecret)?;
            if !self
                .credential_hasher
                .verify_password(secret, password_hash)
                .await?
            {
                return Err(AuthError::WrongSecret);
            }
        }

        self.session_store.delete(subject).await?;
        self.accounts.delete(subject).await?;

        info!(%subject, "account withdrawn");
        Ok(WITHDRAWAL_SUCCESS.to_string())
    }

    async fn find_email(&self, phone_number: &str) -> Result<FindEmailResult, AuthError> {
        let account = self
            .accounts
            .find_by_phone_number(phone_number)
            .await?
            .ok_or(AuthError::PhoneNotFound)?;

        let email = match account.auth_type {
            AuthType::Kakao => String::new(),
            AuthType::General => account.subject.0,
        };
        Ok(FindEmailResult {
            auth_type: account.auth_type,
            email,
        })
    }
}

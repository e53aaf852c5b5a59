use crate::application_port::AuthError;
use crate::domain_model::{AccountRecord, NewAccount, Subject};
use crate::domain_port::AccountDirectory;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

#[derive(Default)]
pub struct MemoryAccountDirectory {
    accounts: DashMap<Subject, AccountRecord>,
}

impl MemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AccountDirectory for MemoryAccountDirectory {
    async fn find_by_subject(&self, subject: &Subject) -> Result<Option<AccountRecord>, AuthError> {
        Ok(self.accounts.get(subject).map(|r| r.value().clone()))
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<AccountRecord>, AuthError> {
        Ok(self
            .accounts
            .iter()
            .find(|r| r.phone_number.as_deref() == Some(phone_number))
            .map(|r| r.value().clone()))
    }

    async fn exists_by_subject(&self, subject: &Subject) -> Result<bool, AuthError> {
        Ok(self.accounts.contains_key(subject))
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, AuthError> {
        Ok(self.accounts.iter().any(|r| r.nickname == nickname))
    }

    async fn create(&self, account: NewAccount) -> Result<AccountRecord, AuthError> {
        match self.accounts.entry(account.subject.clone()) {
            Entry::Occupied(_) => Err(AuthError::SubjectAlreadyExists),
            Entry::Vacant(slot) => {
                let record = AccountRecord {
                    subject: account.subject,
                    nickname: account.nickname,
                    phone_number: account.phone_number,
                    auth_type: account.auth_type,
                    password_hash: account.password_hash,
                    created_at: Utc::now(),
                };
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn delete(&self, subject: &Subject) -> Result<(), AuthError> {
        self.accounts.remove(subject);
        Ok(())
    }
}

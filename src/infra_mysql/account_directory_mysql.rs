use super::util::{is_dup_key, is_nickname_key};
use crate::application_port::AuthError;
use crate::domain_model::*;
use crate::domain_port::AccountDirectory;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlAccountDirectory {
    pool: MySqlPool,
}

impl MySqlAccountDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlAccountDirectory { pool }
    }

    fn row_to_record(row: MySqlRow) -> Result<AccountRecord, AuthError> {
        let email: String = row
            .try_get("email")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let nickname: String = row
            .try_get("nickname")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let phone_number: Option<String> = row
            .try_get("phone_number")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let auth_type: String = row
            .try_get("auth_type")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let password_hash: Option<String> = row
            .try_get("password_hash")
            .map_err(|e| AuthError::Store(e.to_string()))?;
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(AccountRecord {
            subject: Subject(email),
            nickname,
            phone_number,
            auth_type: auth_type.parse::<AuthType>().map_err(AuthError::Store)?,
            password_hash,
            created_at,
        })
    }
}

#[async_trait::async_trait]
impl AccountDirectory for MySqlAccountDirectory {
    async fn find_by_subject(&self, subject: &Subject) -> Result<Option<AccountRecord>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT email, nickname, phone_number, auth_type, password_hash, created_at
FROM site_user
WHERE email = ?
"#,
        )
        .bind(subject.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(e.to_string()))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn find_by_phone_number(
        &self,
        phone_number: &str,
    ) -> Result<Option<AccountRecord>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(
            r#"
SELECT email, nickname, phone_number, auth_type, password_hash, created_at
FROM site_user
WHERE phone_number = ?
LIMIT 1
"#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Store(format!("query by phone: {e}")))?;

        row_opt.map(Self::row_to_record).transpose()
    }

    async fn exists_by_subject(&self, subject: &Subject) -> Result<bool, AuthError> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM site_user WHERE email = ?"#)
            .bind(subject.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(count > 0)
    }

    async fn exists_by_nickname(&self, nickname: &str) -> Result<bool, AuthError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM site_user WHERE nickname = ?"#)
                .bind(nickname)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::Store(e.to_string()))?;

        Ok(count > 0)
    }

    async fn create(&self, account: NewAccount) -> Result<AccountRecord, AuthError> {
        let created_at = Utc::now();
        sqlx::query(
            r#"
INSERT INTO site_user (email, nickname, phone_number, auth_type, password_hash, created_at)
VALUES (?, ?, ?, ?, ?, ?)
"#,
        )
        .bind(account.subject.as_str())
        .bind(&account.nickname)
        .bind(account.phone_number.as_deref())
        .bind(account.auth_type.as_str())
        .bind(account.password_hash.as_deref())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if !is_dup_key(&e) {
                return AuthError::Store(e.to_string());
            }
            match &e {
                sqlx::Error::Database(db) if is_nickname_key(db.message()) => {
                    AuthError::NicknameAlreadyExists
                }
                _ => AuthError::SubjectAlreadyExists,
            }
        })?;

        Ok(AccountRecord {
            subject: account.subject,
            nickname: account.nickname,
            phone_number: account.phone_number,
            auth_type: account.auth_type,
            password_hash: account.password_hash,
            created_at,
        })
    }

    async fn delete(&self, subject: &Subject) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM site_user WHERE email = ?")
            .bind(subject.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| AuthError::Store(format!("delete account: {e}")))?;

        Ok(())
    }
}

use crate::application_port::AuthError;
use crate::domain_model::{SessionSlot, Subject};
use crate::domain_port::SessionStore;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::future::Future;
use std::time::Duration;

pub struct RedisSessionStore {
    conn: ConnectionManager,
    prefix: String,
    op_timeout: Duration,
}

impl RedisSessionStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>, op_timeout: Duration) -> Self {
        RedisSessionStore {
            conn,
            prefix: prefix.into(),
            op_timeout,
        }
    }

    fn key(&self, subject: &Subject) -> String {
        format!("{}:{}", self.prefix, subject)
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(|e| AuthError::Store(format!("{op}: {e}"))),
            Err(_) => Err(AuthError::Store(format!(
                "{op}: timed out after {:?}",
                self.op_timeout
            ))),
        }
    }
}

#[async_trait::async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, subject: &Subject) -> Result<Option<SessionSlot>, AuthError> {
        let key = self.key(subject);
        let mut conn = self.conn.clone();
        let raw: Option<String> = self.bounded("GET", conn.get(&key)).await?;
        raw.map(|value| {
            serde_json::from_str(&value)
                .map_err(|e| AuthError::Store(format!("malformed slot at {key}: {e}")))
        })
        .transpose()
    }

    async fn set(
        &self,
        subject: &Subject,
        slot: &SessionSlot,
        ttl_secs: u64,
    ) -> Result<(), AuthError> {
        let key = self.key(subject);
        let value =
            serde_json::to_string(slot).map_err(|e| AuthError::InternalError(e.to_string()))?;
        let mut conn = self.conn.clone();
        // SET EX rejects zero.
        let _: () = self
            .bounded("SET", conn.set_ex(&key, value, ttl_secs.max(1)))
            .await?;
        Ok(())
    }

    async fn delete(&self, subject: &Subject) -> Result<(), AuthError> {
        let key = self.key(subject);
        let mut conn = self.conn.clone();
        let _: () = self.bounded("DEL", conn.del(&key)).await?;
        Ok(())
    }
}

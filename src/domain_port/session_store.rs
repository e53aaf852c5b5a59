use crate::application_port::AuthError;
use crate::domain_model::{SessionSlot, Subject};

/// One slot per subject. Calls are independent round trips; a sequence of
/// them is not atomic.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, subject: &Subject) -> Result<Option<SessionSlot>, AuthError>;
    /// Overwrite the slot and (re)start its TTL.
    async fn set(&self, subject: &Subject, slot: &SessionSlot, ttl_secs: u64)
    -> Result<(), AuthError>;
    /// Removing an absent slot is not an error.
    async fn delete(&self, subject: &Subject) -> Result<(), AuthError>;
}

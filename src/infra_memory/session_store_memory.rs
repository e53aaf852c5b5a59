use crate::application_port::AuthError;
use crate::domain_model::{SessionSlot, Subject};
use crate::domain_port::SessionStore;
use dashmap::DashMap;
use std::time::Duration;
use tokio::time::Instant;

struct Entry {
    slot: SessionSlot,
    expires_at: Instant,
}

/// In-process stand-in for the shared store. Only suitable for a single
/// process; slots are not visible to other instances.
#[derive(Default)]
pub struct MemorySessionStore {
    slots: DashMap<Subject, Entry>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, subject: &Subject) -> Result<Option<SessionSlot>, AuthError> {
        let now = Instant::now();
        if let Some(entry) = self.slots.get(subject) {
            if entry.expires_at > now {
                return Ok(Some(entry.slot.clone()));
            }
        }
        // Lapsed entries are dropped lazily on read.
        self.slots.remove_if(subject, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(
        &self,
        subject: &Subject,
        slot: &SessionSlot,
        ttl_secs: u64,
    ) -> Result<(), AuthError> {
        // Same floor as SET EX on the redis store.
        let expires_at = Instant::now()
            .checked_add(Duration::from_secs(ttl_secs.max(1)))
            .ok_or_else(|| AuthError::Store(format!("ttl of {ttl_secs}s is out of range")))?;
        let entry = Entry {
            slot: slot.clone(),
            expires_at,
        };
        self.slots.insert(subject.clone(), entry);
        Ok(())
    }

    async fn delete(&self, subject: &Subject) -> Result<(), AuthError> {
        self.slots.remove(subject);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::{AccessToken, RefreshToken};

    fn active(value: &str) -> SessionSlot {
        SessionSlot::Active {
            refresh_token: RefreshToken(value.to_string()),
        }
    }

    #[tokio::test]
    async fn set_overwrites_previous_slot() {
        let store = MemorySessionStore::new();
        let subject = Subject::from("u1@example.com");

        store.set(&subject, &active("r1"), 60).await.unwrap();
        let revoked = SessionSlot::Revoked {
            access_token: AccessToken("a1".to_string()),
        };
        store.set(&subject, &revoked, 60).await.unwrap();

        assert_eq!(store.get(&subject).await.unwrap(), Some(revoked));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_ttl_is_held_for_one_second() {
        let store = MemorySessionStore::new();
        let subject = Subject::from("u1@example.com");

        store.set(&subject, &active("r1"), 0).await.unwrap();
        assert_eq!(store.get(&subject).await.unwrap(), Some(active("r1")));

        tokio::time::advance(Duration::from_secs(1)).await;

        assert_eq!(store.get(&subject).await.unwrap(), None);
        assert!(store.slots.is_empty());
    }

    #[tokio::test]
    async fn out_of_range_ttl_is_a_store_error() {
        let store = MemorySessionStore::new();
        let subject = Subject::from("u1@example.com");

        let result = store.set(&subject, &active("r1"), u64::MAX).await;

        assert!(matches!(result, Err(AuthError::Store(_))));
        assert_eq!(store.get(&subject).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_of_absent_slot_is_ok() {
        let store = MemorySessionStore::new();
        let subject = Subject::from("nobody@example.com");

        store.delete(&subject).await.unwrap();
        store.delete(&subject).await.unwrap();

        assert_eq!(store.get(&subject).await.unwrap(), None);
    }

    #[tokio::test]
    async fn subjects_do_not_share_slots() {
        let store = MemorySessionStore::new();
        let u1 = Subject::from("u1@example.com");
        let u2 = Subject::from("u2@example.com");

        store.set(&u1, &active("r1"), 60).await.unwrap();
        store.delete(&u2).await.unwrap();

        assert_eq!(store.get(&u1).await.unwrap(), Some(active("r1")));
        assert_eq!(store.get(&u2).await.unwrap(), None);
    }
}

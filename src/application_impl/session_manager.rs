use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::{AccountDirectory, SessionStore};
use crate::logger::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

pub const SIGN_OUT_SUCCESS: &str = "signed out";

#[derive(Debug, Clone, Default)]
pub struct SessionPolicy {
    /// TTL of the revocation marker written at sign-out. `None` reuses the
    /// codec's refresh-token TTL.
    pub revocation_ttl: Option<Duration>,
    pub replay: ReplayPolicy,
}

/// Issues, rotates and revokes sessions. Holds no per-subject state; every
/// decision is taken from the slot read out of the session store.
pub struct SessionManager {
    accounts: Arc<dyn AccountDirectory>,
    credential_hasher: Arc<dyn CredentialHasher>,
    token_codec: Arc<dyn TokenCodec>,
    session_store: Arc<dyn SessionStore>,
    policy: SessionPolicy,
}

impl SessionManager {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        credential_hasher: Arc<dyn CredentialHasher>,
        token_codec: Arc<dyn TokenCodec>,
        session_store: Arc<dyn SessionStore>,
        policy: SessionPolicy,
    ) -> Self {
        Self {
            accounts,
            credential_hasher,
            token_codec,
            session_store,
            policy,
        }
    }

    fn ttl_secs(until: DateTime<Utc>) -> u64 {
        let now = Utc::now();
        let secs = (until - now).num_seconds();
        if secs <= 0 { 1 } else { secs as u64 }
    }

    fn revocation_ttl_secs(&self) -> u64 {
        match self.policy.revocation_ttl {
            Some(ttl) => ttl.as_secs(),
            None => self.token_codec.refresh_ttl_secs(),
        }
    }

    /// Issue a refresh token and make it the subject's active slot.
    async fn install_refresh_token(
        &self,
        subject: &Subject,
    ) -> Result<(RefreshToken, DateTime<Utc>), AuthError> {
        let (refresh_token, refresh_exp) = self.token_codec.issue_refresh_token(subject).await?;
        let slot = SessionSlot::Active {
            refresh_token: refresh_token.clone(),
        };
        self.session_store
            .set(subject, &slot, Self::ttl_secs(refresh_exp))
            .await?;
        Ok((refresh_token, refresh_exp))
    }
}

#[async_trait::async_trait]
impl AuthService for SessionManager {
    async fn authenticate(&self, request: SignInInput) -> Result<AccountRecord, AuthError> {
        let SignInInput { subject, secret } = request;

        let account = self
            .accounts
            .find_by_subject(&subject)
            .await?
            .ok_or(AuthError::SubjectNotFound)?;

        let password_hash = account
            .password_hash
            .as_deref()
            .ok_or(AuthError::WrongSecret)?;
        let ok = self
            .credential_hasher
            .verify_password(&secret, password_hash)
            .await?;
        if !ok {
            return Err(AuthError::WrongSecret);
        }

        Ok(account)
    }

    async fn sign_in(&self, request: SignInInput) -> Result<SignInResult, AuthError> {
        let account = self.authenticate(request).await?;
        let subject = account.subject;

        let (access_token, access_exp) = self.token_codec.issue_access_token(&subject).await?;
        // Overwrites whatever the slot held, including another live session.
        let (refresh_token, refresh_exp) = self.install_refresh_token(&subject).await?;

        info!(%subject, "signed in");
        Ok(SignInResult {
            subject,
            auth_type: account.auth_type,
            tokens: AuthTokens {
                access_token,
                refresh_token,
                access_token_expires_at: access_exp,
                refresh_token_expires_at: refresh_exp,
            },
        })
    }

    async fn reissue(&self, access_token: &str) -> Result<ReissueResult, AuthError> {
        let presented = AccessToken(access_token.to_string());
        let subject = self.token_codec.parse_subject(&presented).await?;

        let Some(slot) = self.session_store.get(&subject).await? else {
            debug!(%subject, "reissue without a session");
            return Err(AuthError::SessionExpired);
        };

        if slot.is_revoked_by(&presented) {
            warn!(%subject, "reissue with a signed-out access token");
            return Err(AuthError::InvalidToken);
        }
        if let SessionSlot::Revoked { .. } = slot {
            match self.policy.replay {
                ReplayPolicy::AnyToken => {
                    warn!(%subject, "reissue against a revoked session");
                    return Err(AuthError::InvalidToken);
                }
                ReplayPolicy::ExactToken => {
                    debug!(%subject, "reissue reopens a revoked session");
                }
            }
        }

        let (access_token, access_exp) = self.token_codec.issue_access_token(&subject).await?;
        self.session_store.delete(&subject).await?;
        self.install_refresh_token(&subject).await?;

        info!(%subject, "session rotated");
        Ok(ReissueResult {
            access_token,
            access_token_expires_at: access_exp,
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<String, AuthError> {
        let presented = AccessToken(access_token.to_string());
        let subject = self.token_codec.parse_subject(&presented).await?;

        if self.session_store.get(&subject).await?.is_none() {
            debug!(%subject, "sign-out without a session");
            return Err(AuthError::SessionExpired);
        }

        self.session_store.delete(&subject).await?;
        let marker = SessionSlot::Revoked {
            access_token: presented,
        };
        self.session_store
            .set(&subject, &marker, self.revocation_ttl_secs())
            .await?;

        info!(%subject, "signed out");
        Ok(SIGN_OUT_SUCCESS.to_string())
    }

    async fn verify_token(&self, access_token: &str) -> Result<Subject, AuthError> {
        self.token_codec
            .verify_access_token(&AccessToken(access_token.to_string()))
            .await
    }
}

use super::{AccessToken, RefreshToken};
use serde::{Deserialize, Serialize};

/// Value held in a subject's session slot. An absent slot is `None` at the
/// store boundary, so only the two occupied states are represented here.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionSlot {
    /// The subject holds a live session backed by this refresh token.
    Active { refresh_token: RefreshToken },
    /// The subject signed out; holds the access token presented at sign-out.
    Revoked { access_token: AccessToken },
}

impl SessionSlot {
    pub fn is_revoked_by(&self, token: &AccessToken) -> bool {
        matches!(self, SessionSlot::Revoked { access_token } if access_token == token)
    }
}

/// How reissue treats a revoked slot when the presented token is not the
/// exact one recorded at sign-out.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplayPolicy {
    /// Only the recorded token is refused; any other valid token rotates
    /// the slot back to active.
    #[default]
    ExactToken,
    /// Every reissue against a revoked slot is refused.
    AnyToken,
}

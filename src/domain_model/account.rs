use super::Subject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthType {
    General,
    Kakao,
}

impl AuthType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthType::General => "GENERAL",
            AuthType::Kakao => "KAKAO",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GENERAL" => Ok(AuthType::General),
            "KAKAO" => Ok(AuthType::Kakao),
            other => Err(format!("unknown auth type: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub subject: Subject,
    pub nickname: String,
    pub phone_number: Option<String>,
    pub auth_type: AuthType,
    /// PHC string; `None` for social accounts.
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub subject: Subject,
    pub nickname: String,
    pub phone_number: Option<String>,
    pub auth_type: AuthType,
    pub password_hash: Option<String>,
}

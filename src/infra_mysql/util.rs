use sqlx::mysql::MySqlDatabaseError;

pub fn is_dup_key(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db) = err {
        if let Some(mysql_err) = db.try_downcast_ref::<MySqlDatabaseError>() {
            return mysql_err.number() == 1062; // ER_DUP_ENTRY
        }
    }

    false
}

/// Name of the unique index an ER_DUP_ENTRY message points at, e.g.
/// `site_user.nickname` in "Duplicate entry 'x' for key 'site_user.nickname'".
pub fn dup_key_name(message: &str) -> Option<&str> {
    let (_, tail) = message.rsplit_once("for key '")?;
    tail.strip_suffix('\'')
}

pub fn is_nickname_key(message: &str) -> bool {
    matches!(
        dup_key_name(message),
        Some("nickname" | "site_user.nickname")
    )
}

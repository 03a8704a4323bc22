//! Authentication token operations.

use legalai_core::{Error, Result, TokenId, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::models::AuthToken;

const COLS: &str = "id, user_id, token, expires_at";

/// Create a new auth token.
pub fn create_token(
    conn: &Connection,
    user_id: UserId,
    token: &str,
    expires_at: &str,
) -> Result<AuthToken> {
    let id = TokenId::new();

    conn.execute(
        "INSERT INTO auth_tokens (id, user_id, token, expires_at) VALUES (?1,?2,?3,?4)",
        rusqlite::params![id.to_string(), user_id.to_string(), token, expires_at],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(AuthToken {
        id,
        user_id,
        token: token.to_string(),
        expires_at: expires_at.to_string(),
    })
}

/// Look up a token by its value, ignoring tokens that expired before `now`.
///
/// Timestamps are RFC 3339 in UTC, so they compare correctly as text.
pub fn get_valid_token(conn: &Connection, token: &str, now: &str) -> Result<Option<AuthToken>> {
    let q = format!("SELECT {COLS} FROM auth_tokens WHERE token = ?1 AND expires_at > ?2");
    conn.query_row(&q, [token, now], AuthToken::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// Delete a specific token by value.
pub fn delete_token(conn: &Connection, token: &str) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM auth_tokens WHERE token = ?1", [token])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete all tokens whose `expires_at` is in the past.
pub fn delete_expired_tokens(conn: &Connection, now: &str) -> Result<usize> {
    conn.execute("DELETE FROM auth_tokens WHERE expires_at <= ?1", [now])
        .map_err(|e| Error::database(e.to_string()))
}

/// Delete every token belonging to a user.
pub fn delete_user_tokens(conn: &Connection, user_id: UserId) -> Result<usize> {
    conn.execute(
        "DELETE FROM auth_tokens WHERE user_id = ?1",
        [user_id.to_string()],
    )
    .map_err(|e| Error::database(e.to_string()))
}

//! Embedded SQL migrations and runner.
//!
//! Migrations are stored as `&str` constants and executed in order.  A
//! `schema_migrations` table tracks which versions have been applied.

use legalai_core::{Error, Result};
use rusqlite::Connection;

/// V1: initial schema -- accounts, tokens, cases and bail forms.
const V1_INITIAL: &str = r#"
-- Accounts and auth
CREATE TABLE users (
    id              TEXT PRIMARY KEY,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    email           TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash   TEXT NOT NULL,
    role            TEXT NOT NULL DEFAULT 'user',
    address         TEXT NOT NULL DEFAULT '',
    phone           TEXT NOT NULL DEFAULT '',
    secondary_phone TEXT NOT NULL DEFAULT '',
    father_name     TEXT NOT NULL DEFAULT '',
    mother_name     TEXT NOT NULL DEFAULT '',
    gender          TEXT NOT NULL DEFAULT '',
    dob             TEXT NOT NULL DEFAULT '',
    nationality     TEXT NOT NULL DEFAULT '',
    caste           TEXT NOT NULL DEFAULT '',
    occupation      TEXT NOT NULL DEFAULT '',
    jail            TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE auth_tokens (
    id         TEXT PRIMARY KEY,
    user_id    TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token      TEXT UNIQUE NOT NULL,
    expires_at TEXT NOT NULL
);

-- Court cases
CREATE TABLE court_cases (
    id                    TEXT PRIMARY KEY,
    case_title            TEXT NOT NULL,
    case_number           TEXT NOT NULL,
    filing_number         TEXT NOT NULL,
    filing_date           TEXT NOT NULL,
    filing_year           TEXT NOT NULL,
    listing_date          TEXT NOT NULL,
    plaintiff_name        TEXT NOT NULL,
    defendant_name        TEXT NOT NULL,
    plaintiff_lawyer_name TEXT NOT NULL,
    defendant_lawyer_name TEXT NOT NULL,
    judge_name            TEXT NOT NULL,
    offense_type          TEXT NOT NULL DEFAULT '',
    days_in_custody       INTEGER NOT NULL DEFAULT 0,
    bail_status           TEXT NOT NULL DEFAULT '',
    next_hearing_date     TEXT NOT NULL DEFAULT '',
    petitioner_name       TEXT NOT NULL DEFAULT '',
    respondent_name       TEXT NOT NULL DEFAULT '',
    advocate_name         TEXT NOT NULL DEFAULT '',
    act_section           TEXT NOT NULL DEFAULT '',
    time_served_in_prison TEXT NOT NULL DEFAULT '',
    case_risk_score       REAL NOT NULL DEFAULT 0,
    bailable              TEXT NOT NULL DEFAULT 'no',
    cognizable            TEXT NOT NULL DEFAULT 'yes',
    punishment            TEXT NOT NULL DEFAULT '',
    section               TEXT NOT NULL DEFAULT '',
    status                TEXT,
    priority              TEXT NOT NULL DEFAULT '',
    created_at            TEXT NOT NULL
);

-- Bail applications; sections are stored as JSON documents
CREATE TABLE bail_forms (
    id             TEXT PRIMARY KEY,
    submitted_by   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    petitioner     TEXT NOT NULL DEFAULT '{}',
    respondent     TEXT NOT NULL DEFAULT '{}',
    police_station TEXT NOT NULL DEFAULT '{}',
    act_sections   TEXT NOT NULL DEFAULT '[]',
    bail           TEXT NOT NULL DEFAULT '{}',
    created_at     TEXT NOT NULL
);

CREATE INDEX idx_auth_tokens_user ON auth_tokens(user_id);
CREATE INDEX idx_auth_tokens_expires ON auth_tokens(expires_at);
CREATE INDEX idx_court_cases_created ON court_cases(created_at);
CREATE INDEX idx_court_cases_status ON court_cases(status);
CREATE INDEX idx_bail_forms_submitter ON bail_forms(submitted_by);
"#;

/// V2: seed the anonymous account.
///
/// When auth is disabled every request acts as this user, so bail forms it
/// submits need a matching row in `users` to satisfy the FK constraint.
/// The password hash is not a bcrypt hash, so the account can never log in.
const V2_ANONYMOUS_USER: &str = r#"
INSERT OR IGNORE INTO users (id, first_name, last_name, email, password_hash, role, created_at, updated_at)
VALUES ('00000000-0000-0000-0000-000000000000', 'Anonymous', 'Judge', 'anonymous@localhost',
        '!disabled', 'judge', datetime('now'), datetime('now'));
"#;

/// Ordered list of (version, sql) pairs.
const MIGRATIONS: &[(i64, &str)] = &[(1, V1_INITIAL), (2, V2_ANONYMOUS_USER)];

/// The newest schema version this build knows about.
pub const LATEST_VERSION: i64 = 2;

/// Run all pending migrations on `conn`.
///
/// Creates the `schema_migrations` tracking table if it does not exist,
/// then applies each outstanding migration inside a transaction. Returns
/// how many migrations were applied.
pub fn run_migrations(conn: &Connection) -> Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .map_err(|e| Error::database(format!("Failed to create schema_migrations: {e}")))?;

    let mut applied = 0;
    for &(version, sql) in MIGRATIONS {
        let already: bool = conn
            .query_row(
                "SELECT COUNT(*) > 0 FROM schema_migrations WHERE version = ?1",
                [version],
                |row| row.get(0),
            )
            .map_err(|e| Error::database(e.to_string()))?;

        if already {
            continue;
        }

        let tx = conn
            .unchecked_transaction()
            .map_err(|e| Error::database(e.to_string()))?;

        tx.execute_batch(sql)
            .map_err(|e| Error::database(format!("Migration V{version} failed: {e}")))?;

        tx.execute(
            "INSERT INTO schema_migrations (version) VALUES (?1)",
            [version],
        )
        .map_err(|e| Error::database(e.to_string()))?;

        tx.commit().map_err(|e| Error::database(e.to_string()))?;

        tracing::debug!("Applied migration V{version}");
        applied += 1;
    }

    Ok(applied)
}

/// Report the newest applied schema version, or 0 for a fresh database.
pub fn current_version(conn: &Connection) -> Result<i64> {
    let exists: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='schema_migrations'",
            [],
            |row| row.get(0),
        )
        .map_err(|e| Error::database(e.to_string()))?;
    if !exists {
        return Ok(0);
    }

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )
    .map_err(|e| Error::database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&conn).unwrap(), MIGRATIONS.len());
        // second call is a no-op
        assert_eq!(run_migrations(&conn).unwrap(), 0);
    }

    #[test]
    fn test_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);
        run_migrations(&conn).unwrap();
        assert_eq!(current_version(&conn).unwrap(), LATEST_VERSION);
    }

    #[test]
    fn test_latest_version_matches_list() {
        let max = MIGRATIONS.iter().map(|(v, _)| *v).max().unwrap();
        assert_eq!(max, LATEST_VERSION);
    }

    #[test]
    fn test_all_tables_created() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
        run_migrations(&conn).unwrap();

        let tables = [
            "users",
            "auth_tokens",
            "court_cases",
            "bail_forms",
            "schema_migrations",
        ];
        for t in &tables {
            let exists: bool = conn
                .query_row(
                    "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name=?1",
                    [t],
                    |row| row.get(0),
                )
                .unwrap();
            assert!(exists, "table {t} should exist");
        }
    }

    #[test]
    fn test_anonymous_user_seeded() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        let role: String = conn
            .query_row(
                "SELECT role FROM users WHERE id = '00000000-0000-0000-0000-000000000000'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(role, "judge");
    }
}

//! User account operations.

use chrono::Utc;
use legalai_core::{Error, Result, Role, UserId};
use rusqlite::{Connection, OptionalExtension};

use crate::models::{NewUser, User};

/// Create a new user and return it.
///
/// The email is stored trimmed and lowercased; a duplicate email is a
/// [`Error::Conflict`].
pub fn create_user(conn: &Connection, new: &NewUser) -> Result<User> {
    let id = UserId::new();
    let now = Utc::now().to_rfc3339();
    let email = normalize_email(&new.email);
    let p = &new.profile;

    conn.execute(
        "INSERT INTO users (id, first_name, last_name, email, password_hash, role, address, phone,
                            secondary_phone, father_name, mother_name, gender, dob, nationality,
                            caste, occupation, jail, created_at, updated_at)
         VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9,?10,?11,?12,?13,?14,?15,?16,?17,?18,?18)",
        rusqlite::params![
            id.to_string(),
            new.first_name.trim(),
            new.last_name.trim(),
            email,
            new.password_hash,
            new.role.as_str(),
            p.address,
            p.phone,
            p.secondary_phone,
            p.father_name,
            p.mother_name,
            p.gender,
            p.dob,
            p.nationality,
            p.caste,
            p.occupation,
            p.jail,
            now,
        ],
    )
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            Error::Conflict("Email already exists".into())
        } else {
            Error::database(e.to_string())
        }
    })?;

    Ok(User {
        id,
        first_name: new.first_name.trim().to_string(),
        last_name: new.last_name.trim().to_string(),
        email,
        password_hash: new.password_hash.clone(),
        role: new.role,
        profile: new.profile.clone(),
        created_at: now.clone(),
        updated_at: now,
    })
}

/// Get a user by primary key.
pub fn get_user_by_id(conn: &Connection, id: UserId) -> Result<Option<User>> {
    let q = format!("SELECT {} FROM users WHERE id = ?1", User::COLUMNS);
    conn.query_row(&q, [id.to_string()], User::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// Get a user by email, ignoring case and surrounding whitespace.
pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let q = format!("SELECT {} FROM users WHERE email = ?1", User::COLUMNS);
    conn.query_row(&q, [normalize_email(email)], User::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// List all users ordered by email.
pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let q = format!("SELECT {} FROM users ORDER BY email ASC", User::COLUMNS);
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([], User::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Update a user's role.
pub fn update_role(conn: &Connection, id: UserId, role: Role) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE users SET role = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![role.as_str(), Utc::now().to_rfc3339(), id.to_string()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Update a user's password hash.
pub fn update_password(conn: &Connection, id: UserId, password_hash: &str) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3",
            rusqlite::params![password_hash, Utc::now().to_rfc3339(), id.to_string()],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

/// Delete a user by ID. Returns true if a row was deleted.
pub fn delete_user(conn: &Connection, id: UserId) -> Result<bool> {
    let n = conn
        .execute("DELETE FROM users WHERE id = ?1", [id.to_string()])
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::UserProfile;
    use crate::pool::init_memory_pool;

    pub(crate) fn new_user(email: &str, role: Role) -> NewUser {
        NewUser {
            first_name: "Asha".into(),
            last_name: "Verma".into(),
            email: email.into(),
            password_hash: "hash".into(),
            role,
            profile: UserProfile {
                phone: "9999999999".into(),
                ..UserProfile::default()
            },
        }
    }

    #[test]
    fn create_and_get() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let u = create_user(&conn, &new_user("asha@example.com", Role::Lawyer)).unwrap();
        assert_eq!(u.role, Role::Lawyer);

        let found = get_user_by_id(&conn, u.id).unwrap().unwrap();
        assert_eq!(found.email, "asha@example.com");
        assert_eq!(found.profile.phone, "9999999999");
        assert_eq!(found.role, Role::Lawyer);
    }

    #[test]
    fn email_is_normalized() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let u = create_user(&conn, &new_user("  Asha@Example.COM ", Role::User)).unwrap();
        assert_eq!(u.email, "asha@example.com");

        let found = get_user_by_email(&conn, "ASHA@example.com").unwrap();
        assert_eq!(found.map(|f| f.id), Some(u.id));
    }

    #[test]
    fn duplicate_email() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_user(&conn, &new_user("dup@example.com", Role::User)).unwrap();
        let err = create_user(&conn, &new_user("DUP@example.com", Role::Judge)).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        assert_eq!(err.to_string(), "Email already exists");
    }

    #[test]
    fn missing_user_is_none() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        assert!(get_user_by_id(&conn, UserId::new()).unwrap().is_none());
        assert!(get_user_by_email(&conn, "ghost@example.com").unwrap().is_none());
    }

    #[test]
    fn list_includes_anonymous_seed() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        create_user(&conn, &new_user("b@example.com", Role::User)).unwrap();
        let all = list_users(&conn).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|u| u.id == UserId::ANONYMOUS));
    }

    #[test]
    fn update_role_and_password() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let u = create_user(&conn, &new_user("c@example.com", Role::User)).unwrap();

        assert!(update_role(&conn, u.id, Role::Judge).unwrap());
        assert!(update_password(&conn, u.id, "new-hash").unwrap());

        let found = get_user_by_id(&conn, u.id).unwrap().unwrap();
        assert_eq!(found.role, Role::Judge);
        assert_eq!(found.password_hash, "new-hash");
        assert!(!update_role(&conn, UserId::new(), Role::Judge).unwrap());
    }

    #[test]
    fn delete() {
        let pool = init_memory_pool().unwrap();
        let conn = pool.get().unwrap();
        let u = create_user(&conn, &new_user("d@example.com", Role::User)).unwrap();
        assert!(delete_user(&conn, u.id).unwrap());
        assert!(!delete_user(&conn, u.id).unwrap());
    }
}

//! SQLite credential store.
//!
//! One `users` table; passwords stored as SHA-256 hex digests. This is a
//! simple key lookup, not a hardened authentication system.

use anyhow::{anyhow, Result};
use rand::RngCore;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Unique shared in-memory database URI, so tests can open ":memory:"
/// stores without colliding.
pub fn shared_memory_uri() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!(
        "file:visionmate_{:x}?mode=memory&cache=shared",
        u64::from_le_bytes(bytes)
    )
}

fn open_db_connection(db_path: &str) -> Result<Connection> {
    if db_path.starts_with("file:") {
        return Ok(Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?);
    }
    Ok(Connection::open(db_path)?)
}

fn now_s() -> Result<i64> {
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64)
}

/// Outcome of a registration attempt. Duplicate credentials are expected
/// user input, not errors; the variants carry the sentence to speak.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    Registered,
    UsernameTaken,
    EmailTaken,
}

impl RegisterOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            RegisterOutcome::Registered => "Registration successful.",
            RegisterOutcome::UsernameTaken => {
                "This username is already taken. Please choose another username."
            }
            RegisterOutcome::EmailTaken => {
                "This email is already registered. Please use another email address."
            }
        }
    }
}

/// Outcome of a login attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Carries the registered display name.
    Success(String),
    WrongPassword,
    UnknownUser,
}

impl LoginOutcome {
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            LoginOutcome::Success(_) => None,
            LoginOutcome::WrongPassword => Some("Incorrect password. Please try again."),
            LoginOutcome::UnknownUser => {
                Some("Username not found. Please check your username and try again.")
            }
        }
    }
}

/// A user record without the password hash.
#[derive(Clone, Debug, PartialEq)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub username: String,
    pub created_at: i64,
    pub last_login: Option<i64>,
}

pub struct UserStore {
    conn: Connection,
}

impl UserStore {
    pub fn open(db_path: &str) -> Result<Self> {
        let db_path = if db_path == ":memory:" {
            shared_memory_uri()
        } else {
            db_path.to_string()
        };
        let conn = open_db_connection(&db_path)?;
        let mut store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn ensure_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              name TEXT NOT NULL,
              email TEXT NOT NULL UNIQUE,
              username TEXT NOT NULL UNIQUE,
              password TEXT NOT NULL,
              created_at INTEGER NOT NULL,
              last_login INTEGER
            );

            CREATE INDEX IF NOT EXISTS idx_users_username ON users(username);
            "#,
        )?;
        Ok(())
    }

    pub fn hash_password(password: &str) -> String {
        let digest = Sha256::digest(password.as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Insert a new user. UNIQUE violations map to friendly outcomes.
    pub fn add_user(
        &mut self,
        name: &str,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<RegisterOutcome> {
        let hashed = Self::hash_password(password);
        let created_at = now_s()?;
        let inserted = self.conn.execute(
            "INSERT INTO users (name, email, username, password, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![name, email, username, hashed, created_at],
        );
        match inserted {
            Ok(_) => Ok(RegisterOutcome::Registered),
            Err(rusqlite::Error::SqliteFailure(err, Some(message)))
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                if message.contains("username") {
                    Ok(RegisterOutcome::UsernameTaken)
                } else if message.contains("email") {
                    Ok(RegisterOutcome::EmailTaken)
                } else {
                    Err(anyhow!("registration failed: {}", message))
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials. On success updates `last_login` and returns the
    /// display name.
    pub fn check_user(&mut self, username: &str, password: &str) -> Result<LoginOutcome> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT name, password FROM users WHERE username = ?1",
                params![username],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((name, stored_hash)) = row else {
            return Ok(LoginOutcome::UnknownUser);
        };

        if Self::hash_password(password) != stored_hash {
            return Ok(LoginOutcome::WrongPassword);
        }

        self.conn.execute(
            "UPDATE users SET last_login = ?1 WHERE username = ?2",
            params![now_s()?, username],
        )?;
        Ok(LoginOutcome::Success(name))
    }

    pub fn user_info(&self, username: &str) -> Result<Option<UserInfo>> {
        let info = self
            .conn
            .query_row(
                "SELECT id, name, email, username, created_at, last_login FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserInfo {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        username: row.get(3)?,
                        created_at: row.get(4)?,
                        last_login: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(info)
    }

    pub fn list_users(&self) -> Result<Vec<UserInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, username, created_at, last_login FROM users ORDER BY created_at DESC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UserInfo {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                username: row.get(3)?,
                created_at: row.get(4)?,
                last_login: row.get(5)?,
            })
        })?;
        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }

    /// Returns true when a user was deleted.
    pub fn delete_user(&mut self, username: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM users WHERE username = ?1", params![username])?;
        Ok(deleted > 0)
    }

    /// Drop and recreate the users table.
    pub fn reset(&mut self) -> Result<()> {
        self.conn.execute_batch("DROP TABLE IF EXISTS users")?;
        self.ensure_schema()
    }
}

//! Account registration and credential checks.
//!
//! Accounts live in their own table (the auth collaborator), not in the
//! document tree: email uniqueness belongs to the database. Passwords are
//! stored as salted SHA-256 digests, never as plaintext.

use crate::{DocumentDb, StoreError};
use campusnet_domain::ids::UserId;
use campusnet_domain::{Profile, TreePath};
use rusqlite::{params, OptionalExtension};
use sha2::{Digest, Sha256};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Account id, shared with the profile document
    pub user_id: UserId,

    /// Normalized (lowercased) email
    pub email: String,

    /// Creation time, milliseconds since the Unix epoch
    pub created_at: u64,
}

fn digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn profile_path(user: &UserId) -> Result<TreePath, StoreError> {
    Ok(TreePath::new(["Profiles".to_string(), user.to_string()])?)
}

/// Typed view over the accounts table
pub struct AccountStore<'a> {
    db: &'a mut DocumentDb,
}

impl<'a> AccountStore<'a> {
    /// Borrow the store for account operations
    pub fn new(db: &'a mut DocumentDb) -> Self {
        Self { db }
    }

    /// Create an account and its skeleton profile document
    ///
    /// # Errors
    /// [`StoreError::EmailTaken`] when the normalized email already exists.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        student_number: &str,
    ) -> Result<(Account, Profile), StoreError> {
        let email = email.trim().to_lowercase();

        let exists: bool = self
            .db
            .conn()
            .query_row(
                "SELECT 1 FROM accounts WHERE email = ?1",
                params![&email],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        if exists {
            return Err(StoreError::EmailTaken(email));
        }

        let user_id = UserId::new();
        let salt = uuid::Uuid::now_v7().simple().to_string();
        let stored = format!("{}${}", salt, digest(&salt, password));
        let created_at = crate::now_millis();

        self.db.conn().execute(
            "INSERT INTO accounts (user_id, email, password_digest, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![user_id.to_string(), &email, stored, created_at as i64],
        )?;

        let profile = Profile::skeleton(user_id, email.clone(), student_number.to_string());
        self.db
            .put(&profile_path(&user_id)?, serde_json::to_value(&profile)?)?;

        Ok((
            Account {
                user_id,
                email,
                created_at,
            },
            profile,
        ))
    }

    /// Check credentials and return the account
    ///
    /// # Errors
    /// [`StoreError::InvalidCredentials`] for an unknown email or a wrong
    /// password; the two cases are deliberately indistinguishable.
    pub fn verify(&self, email: &str, password: &str) -> Result<Account, StoreError> {
        let email = email.trim().to_lowercase();

        let row = self
            .db
            .conn()
            .query_row(
                "SELECT user_id, password_digest, created_at FROM accounts WHERE email = ?1",
                params![&email],
                |row| {
                    let user_id: String = row.get(0)?;
                    let stored: String = row.get(1)?;
                    let created_at: i64 = row.get(2)?;
                    Ok((user_id, stored, created_at))
                },
            )
            .optional()?;

        let Some((raw_user_id, stored, created_at)) = row else {
            return Err(StoreError::InvalidCredentials);
        };

        let Some((salt, expected)) = stored.split_once('$') else {
            return Err(StoreError::InvalidData(
                format!("accounts/{}", email),
                "malformed password digest".to_string(),
            ));
        };
        if digest(salt, password) != expected {
            return Err(StoreError::InvalidCredentials);
        }

        let user_id = UserId::from_string(&raw_user_id)
            .map_err(|e| StoreError::InvalidData(format!("accounts/{}", email), e))?;
        Ok(Account {
            user_id,
            email,
            created_at: created_at as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_verify() {
        let mut db = DocumentDb::in_memory().unwrap();
        let (account, profile) = AccountStore::new(&mut db)
            .register("An@Campus.edu", "s3cret", "20251234")
            .unwrap();

        assert_eq!(account.email, "an@campus.edu");
        assert_eq!(profile.user_id, account.user_id);
        assert!(!profile.is_complete());

        let verified = AccountStore::new(&mut db)
            .verify("an@campus.edu", "s3cret")
            .unwrap();
        assert_eq!(verified.user_id, account.user_id);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let mut db = DocumentDb::in_memory().unwrap();
        AccountStore::new(&mut db)
            .register("an@campus.edu", "one", "1")
            .unwrap();

        let result = AccountStore::new(&mut db).register("AN@campus.edu", "two", "2");
        assert!(matches!(result, Err(StoreError::EmailTaken(_))));
    }

    #[test]
    fn test_wrong_password_and_unknown_email() {
        let mut db = DocumentDb::in_memory().unwrap();
        AccountStore::new(&mut db)
            .register("an@campus.edu", "s3cret", "1")
            .unwrap();

        let store = AccountStore::new(&mut db);
        assert!(matches!(
            store.verify("an@campus.edu", "wrong"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.verify("nobody@campus.edu", "s3cret"),
            Err(StoreError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_plaintext_password_not_stored() {
        let mut db = DocumentDb::in_memory().unwrap();
        AccountStore::new(&mut db)
            .register("an@campus.edu", "s3cret", "1")
            .unwrap();

        let stored: String = db
            .conn()
            .query_row(
                "SELECT password_digest FROM accounts WHERE email = 'an@campus.edu'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert!(!stored.contains("s3cret"));
    }
}

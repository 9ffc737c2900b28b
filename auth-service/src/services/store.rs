use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use uuid::Uuid;

use crate::models::User;
use crate::services::ServiceError;

/// In-memory user collection guarded by a single lock.
///
/// Uniqueness checks and inserts happen under one write guard, so two
/// concurrent registrations for the same email cannot both succeed.
/// Lookups return clones; callers never hold the guard.
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user unless the email is already taken.
    pub fn register(
        &self,
        name: String,
        email: String,
        password_hash: String,
    ) -> Result<User, ServiceError> {
        let mut users = self.write_guard()?;

        if users.iter().any(|u| u.email == email) {
            return Err(ServiceError::EmailAlreadyRegistered);
        }

        let user = User::new(name, email, password_hash);
        users.push(user.clone());
        Ok(user)
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let users = self.read_guard()?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    pub fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ServiceError> {
        let users = self.read_guard()?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    /// Apply a mutation to one user under the write guard and return
    /// the updated record.
    pub fn update(&self, id: Uuid, apply: impl FnOnce(&mut User)) -> Result<User, ServiceError> {
        let mut users = self.write_guard()?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ServiceError::UserNotFound)?;
        apply(user);
        Ok(user.clone())
    }

    fn read_guard(&self) -> Result<RwLockReadGuard<'_, Vec<User>>, ServiceError> {
        self.users
            .read()
            .map_err(|_| ServiceError::Internal(anyhow!("user store lock poisoned")))
    }

    fn write_guard(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>, ServiceError> {
        self.users
            .write()
            .map_err(|_| ServiceError::Internal(anyhow!("user store lock poisoned")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_alice(store: &UserStore) -> User {
        store
            .register(
                "Alice".to_string(),
                "alice@example.com".to_string(),
                "hash".to_string(),
            )
            .expect("registration failed")
    }

    #[test]
    fn register_and_find_back() {
        let store = UserStore::new();
        let user = register_alice(&store);

        let by_email = store.find_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, user.id);

        let by_id = store.find_by_id(user.id).unwrap().unwrap();
        assert_eq!(by_id.email, "alice@example.com");
    }

    #[test]
    fn duplicate_email_is_rejected_and_store_unchanged() {
        let store = UserStore::new();
        register_alice(&store);

        let second = store.register(
            "Impostor".to_string(),
            "alice@example.com".to_string(),
            "other-hash".to_string(),
        );
        assert!(matches!(second, Err(ServiceError::EmailAlreadyRegistered)));

        assert_eq!(store.users.read().unwrap().len(), 1);
        let kept = store.find_by_email("alice@example.com").unwrap().unwrap();
        assert_eq!(kept.name, "Alice");
    }

    #[test]
    fn concurrent_registration_admits_exactly_one_winner() {
        let store = UserStore::new();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store
                        .register(
                            format!("User {i}"),
                            "same@example.com".to_string(),
                            "hash".to_string(),
                        )
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(successes, 1);
        assert_eq!(store.users.read().unwrap().len(), 1);
    }

    #[test]
    fn update_mutates_one_record() {
        let store = UserStore::new();
        let user = register_alice(&store);

        let updated = store
            .update(user.id, |u| {
                u.mfa_enabled = true;
                u.mfa_secret = Some("JBSWY3DPEHPK3PXP".to_string());
            })
            .unwrap();
        assert!(updated.mfa_enabled);

        let reread = store.find_by_id(user.id).unwrap().unwrap();
        assert_eq!(reread.mfa_secret.as_deref(), Some("JBSWY3DPEHPK3PXP"));
    }

    #[test]
    fn update_unknown_user_fails() {
        let store = UserStore::new();
        let result = store.update(Uuid::new_v4(), |u| u.mfa_enabled = true);
        assert!(matches!(result, Err(ServiceError::UserNotFound)));
    }
}

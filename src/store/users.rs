//! User records and the shared user store.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored user record, keyed by username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Unique key for the record.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Optional display name. Serialized as `null` when absent.
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Shared in-memory user store.
///
/// Usernames are the keys; storing a user under an existing username
/// silently overwrites the previous record.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<DashMap<String, User>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored users, ordered by username.
    pub fn list(&self) -> Vec<User> {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }

    /// Store a user under its username, overwriting any existing record.
    pub fn upsert(&self, user: User) -> User {
        self.users.insert(user.username.clone(), user.clone());
        user
    }

    /// Fetch a user by username.
    pub fn get(&self, username: &str) -> Option<User> {
        self.users.get(username).map(|e| e.value().clone())
    }

    /// Remove a user, returning the removed record.
    pub fn remove(&self, username: &str) -> Option<User> {
        self.users.remove(username).map(|(_, user)| user)
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alice(email: &str) -> User {
        User {
            username: "alice".to_string(),
            email: email.to_string(),
            full_name: None,
        }
    }

    #[test]
    fn upsert_then_get_round_trips() {
        let store = UserStore::new();

        let stored = store.upsert(alice("a@x.com"));
        assert_eq!(stored, alice("a@x.com"));
        assert_eq!(store.get("alice"), Some(alice("a@x.com")));
    }

    #[test]
    fn upsert_overwrites_without_conflict() {
        let store = UserStore::new();

        store.upsert(alice("a@x.com"));
        store.upsert(alice("b@y.com"));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("alice").unwrap().email, "b@y.com");
    }

    #[test]
    fn remove_then_get_is_none() {
        let store = UserStore::new();
        store.upsert(alice("a@x.com"));

        assert_eq!(store.remove("alice"), Some(alice("a@x.com")));
        assert!(store.get("alice").is_none());
        assert!(store.remove("alice").is_none());
    }

    #[test]
    fn get_missing_username_is_none() {
        let store = UserStore::new();
        assert!(store.get("bob").is_none());
    }

    #[test]
    fn list_orders_by_username() {
        let store = UserStore::new();
        store.upsert(User {
            username: "carol".to_string(),
            email: "c@x.com".to_string(),
            full_name: None,
        });
        store.upsert(alice("a@x.com"));

        let users = store.list();
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }
}

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_RELATION: &str = "friend";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRelation {
    pub name: String,
    pub relation: String,
}

/// Process-lifetime map of who each user is to the bot.
#[derive(Default)]
pub struct RelationStore {
    users: Mutex<HashMap<String, UserRelation>>,
}

impl RelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn users(&self) -> MutexGuard<'_, HashMap<String, UserRelation>> {
        // A panic while holding the lock cannot leave a half-written entry.
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Stored label, or "friend" for users we have never heard from.
    pub fn get(&self, user_id: &str) -> String {
        self.users()
            .get(user_id)
            .map(|u| u.relation.clone())
            .unwrap_or_else(|| DEFAULT_RELATION.to_string())
    }

    #[cfg(test)]
    pub fn lookup(&self, user_id: &str) -> Option<UserRelation> {
        self.users().get(user_id).cloned()
    }

    /// Replaces the whole entry.
    pub fn set_relation(&self, user_id: &str, name: &str, relation: &str) {
        self.users().insert(
            user_id.to_string(),
            UserRelation {
                name: name.to_string(),
                relation: relation.to_string(),
            },
        );
    }

    /// Changes only the label of an existing entry, inserting if absent.
    pub fn update_relation(&self, user_id: &str, name: &str, relation: &str) {
        self.users()
            .entry(user_id.to_string())
            .and_modify(|u| u.relation = relation.to_string())
            .or_insert_with(|| UserRelation {
                name: name.to_string(),
                relation: relation.to_string(),
            });
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.users().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_unknown_user_is_friend() {
        let store = RelationStore::new();
        assert_eq!(store.get("123"), "friend");
        assert!(store.lookup("123").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_then_get() {
        let store = RelationStore::new();
        store.set_relation("1", "mira", "auntie");
        assert_eq!(store.get("1"), "auntie");

        store.set_relation("1", "mira2", "uncle");
        assert_eq!(
            store.lookup("1"),
            Some(UserRelation {
                name: "mira2".into(),
                relation: "uncle".into()
            })
        );
    }

    #[test]
    fn test_update_keeps_stored_name() {
        let store = RelationStore::new();
        store.set_relation("1", "original", "auntie");
        store.update_relation("1", "renamed", "grandma");

        let entry = store.lookup("1").unwrap();
        assert_eq!(entry.name, "original");
        assert_eq!(entry.relation, "grandma");

        store.update_relation("2", "newcomer", "cousin");
        assert_eq!(store.lookup("2").unwrap().name, "newcomer");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_writers() {
        let store = Arc::new(RelationStore::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for j in 0..100 {
                        store.set_relation(&format!("{i}-{j}"), "n", "sibling");
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 800);
    }
}

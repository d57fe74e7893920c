use async_trait::async_trait;
use error_stack::Report;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Mutex;

use super::{StoreError, StoreResult, UserStore};
use crate::types::{Followee, InsertUser, User, UserId};
use crate::util::Sensitive;

/// A [`UserStore`] kept entirely in process memory.
///
/// Followee lists are stored as ids and resolved on every read, so
/// edges pointing at deleted users stay in place but never show up.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
    writes: AtomicUsize,
}

#[derive(Debug, Default)]
struct State {
    last_id: i64,
    rows: BTreeMap<UserId, Row>,
}

#[derive(Debug, Clone)]
struct Row {
    name: String,
    email: String,
    password: Sensitive<String>,
    profile_image: Option<String>,
    followees: Vec<UserId>,
}

impl State {
    fn followee(&self, id: UserId) -> Option<Followee> {
        let row = self.rows.get(&id)?;
        Some(Followee {
            id,
            name: row.name.clone(),
            email: row.email.clone(),
            password: row.password.clone(),
            profile_image: row.profile_image.clone(),
        })
    }

    fn load(&self, id: UserId, row: &Row) -> User {
        User {
            id,
            name: row.name.clone(),
            email: row.email.clone(),
            password: row.password.clone(),
            profile_image: row.profile_image.clone(),
            followees: row
                .followees
                .iter()
                .filter_map(|id| self.followee(*id))
                .collect(),
        }
    }

    /// The stored followee ids after saving `wanted`. Ids of deleted
    /// users are never visible to callers, so they stay where they are.
    fn merge_followees(&self, stored: &[UserId], wanted: &[Followee]) -> Vec<UserId> {
        let wanted = wanted.iter().map(|followee| followee.id).collect::<Vec<_>>();
        let mut merged = stored
            .iter()
            .copied()
            .filter(|id| !self.rows.contains_key(id) || wanted.contains(id))
            .collect::<Vec<_>>();

        for id in wanted {
            if !merged.contains(&id) {
                merged.push(id);
            }
        }
        merged
    }

    fn load_where(&self, mut predicate: impl FnMut(&Row) -> bool) -> Vec<User> {
        self.rows
            .iter()
            .filter(|&(_, row)| predicate(row))
            .map(|(id, row)| self.load(*id, row))
            .collect()
    }
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// How many inserts, saves and deletes went through this store.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw followee ids of a user, including ones pointing at
    /// users that no longer exist.
    pub async fn followee_ids(&self, id: UserId) -> Option<Vec<UserId>> {
        let state = self.state.lock().await;
        state.rows.get(&id).map(|row| row.followees.clone())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    #[tracing::instrument(skip_all, name = "memory.users.find_by_email_exact")]
    async fn find_by_email_exact(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.load_where(|row| row.email == email).into_iter().next())
    }

    #[tracing::instrument(skip_all, name = "memory.users.find_by_id")]
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.rows.get(&id).map(|row| state.load(id, row)))
    }

    #[tracing::instrument(skip_all, name = "memory.users.insert")]
    async fn insert(&self, user: &InsertUser) -> StoreResult<User> {
        let mut state = self.state.lock().await;
        state.last_id += 1;

        let id = UserId(state.last_id);
        let row = Row {
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            profile_image: user.profile_image.clone(),
            followees: Vec::new(),
        };

        let created = state.load(id, &row);
        state.rows.insert(id, row);
        self.record_write();

        Ok(created)
    }

    #[tracing::instrument(skip_all, name = "memory.users.save")]
    async fn save(&self, user: &User) -> StoreResult<User> {
        let mut state = self.state.lock().await;
        let Some(current) = state.rows.get(&user.id) else {
            return Err(Report::new(StoreError)
                .attach_printable(format!("user {} does not exist", user.id)));
        };

        let followees = state.merge_followees(&current.followees, &user.followees);
        let row = Row {
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            profile_image: user.profile_image.clone(),
            followees,
        };
        state.rows.insert(user.id, row);
        self.record_write();

        Ok(user.clone())
    }

    #[tracing::instrument(skip_all, name = "memory.users.delete")]
    async fn delete(&self, user: &User) -> StoreResult<()> {
        let mut state = self.state.lock().await;
        state.rows.remove(&user.id);
        self.record_write();
        Ok(())
    }

    #[tracing::instrument(skip_all, name = "memory.users.search_containing_name")]
    async fn search_containing_name(&self, pattern: &str) -> StoreResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(state.load_where(|row| like_match(pattern, &row.name)))
    }

    #[tracing::instrument(skip_all, name = "memory.users.find_all_following")]
    async fn find_all_following(&self, target: UserId) -> StoreResult<Vec<User>> {
        let state = self.state.lock().await;
        Ok(state.load_where(|row| row.followees.contains(&target)))
    }
}

/// SQL `LIKE ... ESCAPE ''` matching: `%` matches any run of characters,
/// `_` matches exactly one and backslashes are plain characters.
fn like_match(pattern: &str, text: &str) -> bool {
    let text = text.chars().collect::<Vec<_>>();

    // matched[i] tells whether the pattern read so far matches text[..i]
    let mut matched = vec![false; text.len() + 1];
    matched[0] = true;

    for token in pattern.chars() {
        let mut next = vec![false; text.len() + 1];
        match token {
            '%' => {
                let mut any = false;
                for (i, slot) in next.iter_mut().enumerate() {
                    any |= matched[i];
                    *slot = any;
                }
            }
            '_' => {
                for i in 1..=text.len() {
                    next[i] = matched[i - 1];
                }
            }
            c => {
                for i in 1..=text.len() {
                    next[i] = matched[i - 1] && text[i - 1] == c;
                }
            }
        }
        matched = next;
    }

    matched[text.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert(name: &str, email: &str) -> InsertUser {
        InsertUser {
            name: name.into(),
            email: email.into(),
            password: "p1".into(),
            profile_image: None,
        }
    }

    #[test]
    fn test_like_match() {
        assert!(like_match("%%", ""));
        assert!(like_match("%na%", "Ana"));
        assert!(like_match("%%", "Ana"));
        assert!(like_match("A_a", "Ana"));
        assert!(!like_match("%NA%", "Ana"));
        assert!(!like_match("A_", "Ana"));
        assert!(like_match("%ção%", "Conceição"));

        // backslash has no escaping meaning
        assert!(like_match("%\\%", "C:\\dir"));
        assert!(!like_match("%\\%", "50%"));
        assert!(like_match("a\\_", "a\\b"));
        assert!(!like_match("a\\_", "a_"));
    }

    #[tokio::test]
    async fn should_assign_sequential_ids() {
        let store = InMemoryStore::new();
        let ana = store.insert(&insert("Ana", "ana@x.com")).await.unwrap();
        let bia = store.insert(&insert("Bia", "bia@x.com")).await.unwrap();

        assert_eq!(ana.id, UserId(1));
        assert_eq!(bia.id, UserId(2));
        assert!(ana.followees.is_empty());
        assert_eq!(store.len().await, 2);
        assert_eq!(store.writes(), 2);
    }

    #[tokio::test]
    async fn should_find_by_exact_email_only() {
        let store = InMemoryStore::new();
        store.insert(&insert("Ana", "ana@x.com")).await.unwrap();

        assert!(store.find_by_email_exact("ana@x.com").await.unwrap().is_some());
        assert!(store.find_by_email_exact("ANA@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_reject_saving_unknown_user() {
        let store = InMemoryStore::new();
        let mut ana = store.insert(&insert("Ana", "ana@x.com")).await.unwrap();
        ana.id = UserId(99);

        assert!(store.save(&ana).await.is_err());
    }

    #[tokio::test]
    async fn should_resolve_followees_and_skip_orphans() {
        let store = InMemoryStore::new();
        let mut ana = store.insert(&insert("Ana", "ana@x.com")).await.unwrap();
        let bia = store.insert(&insert("Bia", "bia@x.com")).await.unwrap();

        ana.followees.push(Followee::from(&bia));
        store.save(&ana).await.unwrap();

        let following = store.find_all_following(bia.id).await.unwrap();
        assert_eq!(following.len(), 1);
        assert_eq!(following[0].id, ana.id);

        store.delete(&bia).await.unwrap();
        let ana = store.find_by_id(ana.id).await.unwrap().unwrap();
        assert!(ana.followees.is_empty());
        assert_eq!(store.followee_ids(ana.id).await, Some(vec![bia.id]));
    }

    #[tokio::test]
    async fn should_keep_orphans_across_saves() {
        let store = InMemoryStore::new();
        let mut ana = store.insert(&insert("Ana", "ana@x.com")).await.unwrap();
        let bia = store.insert(&insert("Bia", "bia@x.com")).await.unwrap();
        let cris = store.insert(&insert("Cris", "cris@x.com")).await.unwrap();

        ana.followees = vec![Followee::from(&bia), Followee::from(&cris)];
        store.save(&ana).await.unwrap();
        store.delete(&bia).await.unwrap();

        // what callers see no longer carries the deleted user
        let mut ana = store.find_by_id(ana.id).await.unwrap().unwrap();
        assert_eq!(ana.followees.len(), 1);

        ana.name = "Ana Maria".into();
        store.save(&ana).await.unwrap();
        assert_eq!(store.followee_ids(ana.id).await, Some(vec![bia.id, cris.id]));

        ana.followees.clear();
        store.save(&ana).await.unwrap();
        assert_eq!(store.followee_ids(ana.id).await, Some(vec![bia.id]));
    }

    #[tokio::test]
    async fn should_pick_lowest_id_on_shared_email() {
        let store = InMemoryStore::new();
        let ana = store.insert(&insert("Ana", "ana@x.com")).await.unwrap();
        let mut bia = store.insert(&insert("Bia", "bia@x.com")).await.unwrap();

        bia.email = "ana@x.com".into();
        store.save(&bia).await.unwrap();

        let found = store.find_by_email_exact("ana@x.com").await.unwrap();
        assert_eq!(found.map(|user| user.id), Some(ana.id));
    }
}

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{InsertUser, User, UserId};

mod memory;
mod postgres;

pub use self::memory::InMemoryStore;
pub use self::postgres::PgUserStore;

#[derive(Debug, Error)]
#[error("Could not perform user store operation")]
pub struct StoreError;

pub type StoreResult<T> = error_stack::Result<T, StoreError>;

/// Persistence of users and their followee lists.
///
/// Every user returned has its followees loaded, in the order
/// they were followed.
#[async_trait]
pub trait UserStore: std::fmt::Debug + Send + Sync {
    /// Case-sensitive, exact match on the e-mail address. When several
    /// users share it, the one with the lowest id wins.
    async fn find_by_email_exact(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Persists a user for the first time and assigns its id.
    async fn insert(&self, user: &InsertUser) -> StoreResult<User>;

    /// Overwrites the columns and the followee list of an existing user.
    ///
    /// Followees referring to deleted users are never returned, so they
    /// are kept as stored no matter what `user.followees` contains.
    async fn save(&self, user: &User) -> StoreResult<User>;

    async fn delete(&self, user: &User) -> StoreResult<()>;

    /// Users whose name matches a SQL `LIKE` pattern. Only `%` and `_`
    /// are special, backslashes match themselves.
    async fn search_containing_name(&self, pattern: &str) -> StoreResult<Vec<User>>;

    /// Users that have `target` in their followee list.
    async fn find_all_following(&self, target: UserId) -> StoreResult<Vec<User>>;
}

use std::fmt::Debug;
use std::sync::Arc;

use crate::error::Error;
use crate::store::InMemoryStore;
use crate::types::{RegisterUser, UserId};
use crate::UserDirectory;

pub const PASSWORD: &str = "p1";

/// A directory backed by a fresh [`InMemoryStore`], along with the
/// store itself to peek at what was written.
pub fn directory() -> (UserDirectory, Arc<InMemoryStore>) {
    crate::logging::init_for_tests();

    let store = Arc::new(InMemoryStore::new());
    let directory = UserDirectory::from_shared(store.clone());
    (directory, store)
}

pub async fn register(directory: &UserDirectory, name: &str, email: &str) -> UserId {
    directory
        .register(&RegisterUser::new(name, email, PASSWORD))
        .await
        .unwrap()
}

pub trait TestResultExt {
    /// Serializes the error the same way callers would see it.
    ///
    /// ## Panics
    /// Panics if the result is [`Ok`].
    fn expect_error_json(self) -> serde_json::Value;
}

impl<T: Debug> TestResultExt for std::result::Result<T, Error> {
    fn expect_error_json(self) -> serde_json::Value {
        match self {
            Ok(okay) => panic!("unexpected value Ok({okay:?}), expected error"),
            Err(error) => serde_json::to_value(error).unwrap(),
        }
    }
}

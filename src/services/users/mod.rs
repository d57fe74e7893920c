use std::sync::Arc;

use crate::store::UserStore;

mod delete;
mod edit;
mod follow;
mod followees;
mod followers;
mod lookup;
mod register;
mod search;
mod unfollow;

/// Registration, lookup and follow graph operations over a [`UserStore`].
///
/// Every operation awaits its store calls one after another. Nothing is
/// locked in between, so two concurrent follow/unfollow calls on the
/// same user may overwrite each other's followee list.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
}

impl UserDirectory {
    #[must_use]
    pub fn new(store: impl UserStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    #[must_use]
    pub fn from_shared(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Replaces the store used by every subsequent operation.
    pub fn set_store(&mut self, store: Arc<dyn UserStore>) {
        self.store = store;
    }

    #[must_use]
    pub fn store(&self) -> &dyn UserStore {
        &*self.store
    }
}

use validator::Validate;

use super::UserDirectory;
use crate::error::{Error, Result};
use crate::types::{InsertUser, RegisterUser, UserId};

impl UserDirectory {
    /// Registers a new user and returns its freshly assigned id.
    ///
    /// The form is validated before the store is touched. Once created,
    /// the user follows itself through [`UserDirectory::follow`].
    #[tracing::instrument(skip_all, name = "services.users.register")]
    pub async fn register(&self, form: &RegisterUser) -> Result<UserId> {
        form.validate()?;

        if self.store.find_by_email_exact(&form.email).await?.is_some() {
            return Err(Error::validation(format!(
                "Email already exists: {}",
                form.email
            )));
        }

        let user = self.store.insert(&InsertUser::from(form)).await?;
        tracing::debug!(id = %user.id, "registered user");

        self.follow(user.id, &user.email).await?;
        Ok(user.id)
    }
}

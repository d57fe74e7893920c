use super::followees::exclude_email;
use super::UserDirectory;
use crate::error::Result;
use crate::types::{PasswordVisibility, UserView};

impl UserDirectory {
    /// Users following the owner of `email`, excluding anyone whose
    /// e-mail matches `email` ignoring case.
    #[tracing::instrument(skip_all, name = "services.users.list_followers")]
    pub async fn list_followers(&self, email: &str) -> Result<Vec<UserView>> {
        let actor = self.find_by_email(email).await?;
        let followers = self.store.find_all_following(actor.id).await?;
        let views = followers
            .iter()
            .map(|user| user.view(PasswordVisibility::Revealed));

        Ok(exclude_email(views, email))
    }
}

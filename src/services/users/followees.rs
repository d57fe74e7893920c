use super::UserDirectory;
use crate::error::Result;
use crate::types::{PasswordVisibility, UserView};

impl UserDirectory {
    /// Users followed by the owner of `email`, excluding anyone whose
    /// e-mail matches `email` ignoring case.
    #[tracing::instrument(skip_all, name = "services.users.list_followees")]
    pub async fn list_followees(&self, email: &str) -> Result<Vec<UserView>> {
        let actor = self.find_by_email(email).await?;
        let views = actor
            .followees
            .iter()
            .map(|followee| followee.view(PasswordVisibility::Revealed));

        Ok(exclude_email(views, email))
    }
}

pub(super) fn exclude_email(views: impl Iterator<Item = UserView>, email: &str) -> Vec<UserView> {
    let email = email.to_lowercase();
    views
        .filter(|view| view.email.to_lowercase() != email)
        .collect()
}

use super::UserDirectory;
use crate::error::Result;
use crate::types::{EditUser, UserId};

impl UserDirectory {
    /// Overwrites the name, password, e-mail and profile image of a user.
    ///
    /// Unlike [`UserDirectory::register`], the new e-mail is neither
    /// validated nor checked for duplicates.
    #[tracing::instrument(skip_all, fields(id = %id), name = "services.users.edit")]
    pub async fn edit(&self, id: UserId, form: &EditUser) -> Result<()> {
        let mut user = self.find_by_id(id).await?;
        user.name = form.name.clone();
        user.password = form.password.clone();
        user.email = form.email.clone();
        user.profile_image = form.profile_image.clone();

        self.store.save(&user).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestResultExt};
    use crate::types::{EditUser, UserId};
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    #[tokio::test]
    async fn should_edit_user() {
        let (directory, _) = test_utils::directory();
        let id = test_utils::register(&directory, "Ana", "ana@x.com").await;

        let form = EditUser::new("Ana Maria", "ana.maria@x.com", "p2")
            .profile_image("https://cdn.example.com/ana.png");
        directory.edit(id, &form).await.unwrap();

        let user = directory.find_by_id(id).await.unwrap();
        assert_eq!(user.name, "Ana Maria");
        assert_eq!(user.email, "ana.maria@x.com");
        assert_eq!(user.password.as_str(), "p2");
        assert_eq!(
            user.profile_image.as_deref(),
            Some("https://cdn.example.com/ana.png")
        );
        assert!(user.follows(id));
    }

    #[tokio::test]
    async fn should_not_recheck_email() {
        let (directory, _) = test_utils::directory();
        let ana = test_utils::register(&directory, "Ana", "ana@x.com").await;
        test_utils::register(&directory, "Bia", "bia@x.com").await;

        // neither the shape nor the uniqueness is checked
        directory
            .edit(ana, &EditUser::new("Ana", "not-an-email", "p1"))
            .await
            .unwrap();
        directory
            .edit(ana, &EditUser::new("Ana", "bia@x.com", "p1"))
            .await
            .unwrap();

        let user = directory.find_by_id(ana).await.unwrap();
        assert_eq!(user.email, "bia@x.com");
    }

    #[tokio::test]
    async fn should_reject_unknown_user() {
        let (directory, store) = test_utils::directory();

        let error = directory
            .edit(UserId(7), &EditUser::new("Ana", "ana@x.com", "p1"))
            .await
            .expect_error_json();

        assert_json_include!(
            actual: error,
            expected: json!({
                "code": "not_found",
                "message": "User with id = '7' was not found.",
            }),
        );
        assert_eq!(store.writes(), 0);
    }
}

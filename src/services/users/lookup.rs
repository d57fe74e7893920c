use super::UserDirectory;
use crate::error::{Error, Result};
use crate::types::{PasswordVisibility, User, UserId, UserView};

impl UserDirectory {
    /// Finds a user by its exact e-mail address.
    ///
    /// A missing user is reported as a validation failure since the
    /// e-mail usually comes straight from the caller's input.
    #[tracing::instrument(skip_all, name = "services.users.find_by_email")]
    pub async fn find_by_email(&self, email: &str) -> Result<User> {
        match self.store.find_by_email_exact(email).await? {
            Some(user) => Ok(user),
            None => Err(Error::validation(format!(
                "Could not find user with email: {email}"
            ))),
        }
    }

    #[tracing::instrument(skip_all, fields(id = %id), name = "services.users.find_by_id")]
    pub async fn find_by_id(&self, id: UserId) -> Result<User> {
        match self.store.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => Err(Error::not_found(format!(
                "User with id = '{id}' was not found."
            ))),
        }
    }

    /// Looks up a user and projects it with its password revealed.
    #[tracing::instrument(skip_all, fields(id = %id), name = "services.users.get_profile")]
    pub async fn get_profile(&self, id: UserId) -> Result<UserView> {
        let user = self.find_by_id(id).await?;
        Ok(user.view(PasswordVisibility::Revealed))
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestResultExt};
    use crate::types::UserId;
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    #[tokio::test]
    async fn should_find_user_by_email() {
        let (directory, _) = test_utils::directory();
        let id = test_utils::register(&directory, "Ana", "ana@x.com").await;

        let user = directory.find_by_email("ana@x.com").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.name, "Ana");
    }

    #[tokio::test]
    async fn should_reject_unknown_email() {
        let (directory, _) = test_utils::directory();
        test_utils::register(&directory, "Ana", "ana@x.com").await;

        let error = directory.find_by_email("ANA@x.com").await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({
                "code": "validation_failed",
                "status": 400,
                "message": "Could not find user with email: ANA@x.com",
            }),
        );
    }

    #[tokio::test]
    async fn should_reject_unknown_id() {
        let (directory, _) = test_utils::directory();

        let error = directory.find_by_id(UserId(99)).await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({
                "code": "not_found",
                "status": 404,
                "message": "User with id = '99' was not found.",
            }),
        );
    }

    #[tokio::test]
    async fn should_reveal_password_in_profile() {
        let (directory, _) = test_utils::directory();
        let id = test_utils::register(&directory, "Ana", "ana@x.com").await;

        let profile = directory.get_profile(id).await.unwrap();
        assert_eq!(profile.id, "1");
        assert_eq!(profile.password.as_str(), test_utils::PASSWORD);
        assert!(!profile.is_masked());

        let error = directory.get_profile(UserId(2)).await.expect_error_json();
        assert_json_include!(actual: error, expected: json!({ "code": "not_found" }));
    }
}

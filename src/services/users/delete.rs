use super::UserDirectory;
use crate::error::Result;
use crate::types::UserId;

impl UserDirectory {
    /// Deletes a user. Other users that follow it keep the stale
    /// reference in their followee list.
    #[tracing::instrument(skip_all, fields(id = %id), name = "services.users.delete")]
    pub async fn delete(&self, id: UserId) -> Result<()> {
        let user = self.find_by_id(id).await?;
        self.store.delete(&user).await?;
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
    async fn should_delete_user() {
        let (directory, store) = test_utils::directory();
        let id = test_utils::register(&directory, "Ana", "ana@x.com").await;

        directory.delete(id).await.unwrap();
        assert!(store.is_empty().await);

        let error = directory.find_by_id(id).await.expect_error_json();
        assert_json_include!(actual: error, expected: json!({ "code": "not_found" }));
    }

    #[tokio::test]
    async fn should_reject_unknown_user() {
        let (directory, _) = test_utils::directory();

        let error = directory.delete(UserId(3)).await.expect_error_json();
        assert_json_include!(
            actual: error,
            expected: json!({
                "code": "not_found",
                "message": "User with id = '3' was not found.",
            }),
        );
    }

    #[tokio::test]
    async fn should_leave_followers_with_stale_reference() {
        let (directory, store) = test_utils::directory();
        let ana = test_utils::register(&directory, "Ana", "ana@x.com").await;
        let bia = test_utils::register(&directory, "Bia", "bia@x.com").await;

        directory.follow(bia, "ana@x.com").await.unwrap();
        directory.delete(bia).await.unwrap();

        assert_eq!(store.followee_ids(ana).await, Some(vec![ana, bia]));
        assert!(directory.list_followees("ana@x.com").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_keep_stale_reference_after_follower_saves() {
        let (directory, store) = test_utils::directory();
        let ana = test_utils::register(&directory, "Ana", "ana@x.com").await;
        let bia = test_utils::register(&directory, "Bia", "bia@x.com").await;
        let cris = test_utils::register(&directory, "Cris", "cris@x.com").await;

        directory.follow(bia, "ana@x.com").await.unwrap();
        directory.delete(bia).await.unwrap();
        directory.follow(cris, "ana@x.com").await.unwrap();
        assert_eq!(store.followee_ids(ana).await, Some(vec![ana, bia, cris]));

        directory.unfollow(cris, "ana@x.com").await.unwrap();
        directory
            .edit(ana, &EditUser::new("Ana Maria", "ana@x.com", "p2"))
            .await
            .unwrap();
        assert_eq!(store.followee_ids(ana).await, Some(vec![ana, bia]));
    }
}

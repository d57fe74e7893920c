use super::UserDirectory;
use crate::error::Result;
use crate::types::UserId;

impl UserDirectory {
    /// Removes `target` from the followees of the user owning `actor_email`.
    ///
    /// Nothing is written when the actor does not follow the target, or
    /// when both are the same user.
    #[tracing::instrument(skip_all, fields(target = %target), name = "services.users.unfollow")]
    pub async fn unfollow(&self, target: UserId, actor_email: &str) -> Result<()> {
        let target = self.find_by_id(target).await?;
        let mut actor = self.find_by_email(actor_email).await?;

        if !actor.follows(target.id) || actor.id == target.id {
            return Ok(());
        }

        actor.followees = actor
            .followees
            .into_iter()
            .filter(|followee| followee.id != target.id)
            .collect();

        self.store.save(&actor).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestResultExt};
    use crate::types::UserId;
    use assert_json_diff::assert_json_include;
    use serde_json::json;

    #[tokio::test]
    async fn should_unfollow_user() {
        let (directory, store) = test_utils::directory();
        let ana = test_utils::register(&directory, "Ana", "ana@x.com").await;
        let bia = test_utils::register(&directory, "Bia", "bia@x.com").await;
        let cris = test_utils::register(&directory, "Cris", "cris@x.com").await;

        directory.follow(bia, "ana@x.com").await.unwrap();
        directory.follow(cris, "ana@x.com").await.unwrap();
        directory.unfollow(bia, "ana@x.com").await.unwrap();

        assert_eq!(store.followee_ids(ana).await, Some(vec![ana, cris]));
    }

    #[tokio::test]
    async fn should_not_write_if_not_following() {
        let (directory, store) = test_utils::directory();
        test_utils::register(&directory, "Ana", "ana@x.com").await;
        let bia = test_utils::register(&directory, "Bia", "bia@x.com").await;
        let writes = store.writes();

        directory.unfollow(bia, "ana@x.com").await.unwrap();
        assert_eq!(store.writes(), writes);
    }

    #[tokio::test]
    async fn should_never_unfollow_themselves() {
        let (directory, store) = test_utils::directory();
        let ana = test_utils::register(&directory, "Ana", "ana@x.com").await;
        let writes = store.writes();

        directory.unfollow(ana, "ana@x.com").await.unwrap();

        assert_eq!(store.writes(), writes);
        assert_eq!(store.followee_ids(ana).await, Some(vec![ana]));
    }

    #[tokio::test]
    async fn should_reject_unknown_users() {
        let (directory, _) = test_utils::directory();
        let ana = test_utils::register(&directory, "Ana", "ana@x.com").await;

        let error = directory
            .unfollow(UserId(42), "ana@x.com")
            .await
            .expect_error_json();
        assert_json_include!(actual: error, expected: json!({ "code": "not_found" }));

        let error = directory
            .unfollow(ana, "nobody@x.com")
            .await
            .expect_error_json();
        assert_json_include!(actual: error, expected: json!({ "code": "validation_failed" }));
    }
}

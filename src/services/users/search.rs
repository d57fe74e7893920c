use super::UserDirectory;
use crate::error::Result;
use crate::types::{PasswordVisibility, UserView};

impl UserDirectory {
    /// Users whose name contains `fragment`, with passwords revealed.
    ///
    /// The fragment is passed to the store as a `LIKE` pattern, so `%`
    /// and `_` inside it act as wildcards. An empty fragment matches
    /// everyone.
    #[tracing::instrument(skip_all, name = "services.users.search_by_name")]
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<UserView>> {
        self.search(fragment, PasswordVisibility::Revealed).await
    }

    /// Same as [`UserDirectory::search_by_name`] but with masked passwords.
    #[tracing::instrument(skip_all, name = "services.users.search_by_name_masked")]
    pub async fn search_by_name_masked(&self, fragment: &str) -> Result<Vec<UserView>> {
        self.search(fragment, PasswordVisibility::Masked).await
    }

    async fn search(
        &self,
        fragment: &str,
        visibility: PasswordVisibility,
    ) -> Result<Vec<UserView>> {
        let pattern = format!("%{fragment}%");
        let users = self.store.search_containing_name(&pattern).await?;
        Ok(users.iter().map(|user| user.view(visibility)).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;
    use crate::types::MASKED_PASSWORD;

    async fn populate() -> crate::UserDirectory {
        let (directory, _) = test_utils::directory();
        test_utils::register(&directory, "Ana", "ana@x.com").await;
        test_utils::register(&directory, "Mariana", "mariana@x.com").await;
        test_utils::register(&directory, "Bia", "bia@x.com").await;
        directory
    }

    #[tokio::test]
    async fn should_search_by_name_fragment() {
        let directory = populate().await;

        let names = directory
            .search_by_name("ana")
            .await
            .unwrap()
            .into_iter()
            .map(|view| view.name)
            .collect::<Vec<_>>();

        assert_eq!(names, vec!["Mariana"]);
    }

    #[tokio::test]
    async fn should_match_everyone_with_empty_fragment() {
        let directory = populate().await;

        let views = directory.search_by_name("").await.unwrap();
        assert_eq!(views.len(), 3);
        assert!(views.iter().all(|view| !view.is_masked()));
    }

    #[tokio::test]
    async fn should_return_empty_if_nothing_matches() {
        let directory = populate().await;
        assert!(directory.search_by_name("Zé").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_mask_passwords() {
        let directory = populate().await;

        let views = directory.search_by_name_masked("a").await.unwrap();
        assert_eq!(views.len(), 3);
        assert!(views
            .iter()
            .all(|view| view.password.as_str() == MASKED_PASSWORD));
    }
}

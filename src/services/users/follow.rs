use super::UserDirectory;
use crate::error::Result;
use crate::types::{Followee, UserId};

impl UserDirectory {
    /// Makes the user owning `actor_email` follow `target`.
    ///
    /// Following someone that is already followed changes nothing.
    #[tracing::instrument(skip_all, fields(target = %target), name = "services.users.follow")]
    pub async fn follow(&self, target: UserId, actor_email: &str) -> Result<()> {
        let target = self.find_by_id(target).await?;
        let mut actor = self.find_by_email(actor_email).await?;

        if actor.follows(target.id) {
            tracing::debug!(actor = %actor.id, "already following");
            return Ok(());
        }

        actor.followees.push(Followee::from(&target));
        self.store.save(&actor).await?;

        Ok(())
    }
}

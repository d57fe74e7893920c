use serde::{Deserialize, Serialize};

use super::id::UserId;
use crate::util::Sensitive;

/// Placeholder shown instead of the password in masked views.
pub const MASKED_PASSWORD: &str = "****";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVisibility {
    Revealed,
    Masked,
}

/// Projection of a user handed out to API consumers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
    pub profile_image: Option<String>,
}

impl UserView {
    pub(crate) fn from_columns(
        id: UserId,
        name: &str,
        email: &str,
        password: &Sensitive<String>,
        profile_image: Option<&str>,
        visibility: PasswordVisibility,
    ) -> Self {
        let password = match visibility {
            PasswordVisibility::Revealed => password.clone(),
            PasswordVisibility::Masked => Sensitive::from(MASKED_PASSWORD),
        };

        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password,
            profile_image: profile_image.map(ToString::to_string),
        }
    }

    #[must_use]
    pub fn is_masked(&self) -> bool {
        self.password.as_str() == MASKED_PASSWORD
    }
}

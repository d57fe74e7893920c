use super::id::UserId;
use super::view::{PasswordVisibility, UserView};
use crate::util::Sensitive;

/// A persisted user together with the ordered list of users it follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Stored exactly as it was given upon registration or edit.
    pub password: Sensitive<String>,
    pub profile_image: Option<String>,
    pub followees: Vec<Followee>,
}

impl User {
    /// Whether this user already has `id` in its followee list.
    #[must_use]
    pub fn follows(&self, id: UserId) -> bool {
        self.followees.iter().any(|followee| followee.id == id)
    }

    #[must_use]
    pub fn view(&self, visibility: PasswordVisibility) -> UserView {
        UserView::from_columns(
            self.id,
            &self.name,
            &self.email,
            &self.password,
            self.profile_image.as_deref(),
            visibility,
        )
    }
}

/// The columns of a followed user, without its own follow edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Followee {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
    pub profile_image: Option<String>,
}

impl Followee {
    #[must_use]
    pub fn view(&self, visibility: PasswordVisibility) -> UserView {
        UserView::from_columns(
            self.id,
            &self.name,
            &self.email,
            &self.password,
            self.profile_image.as_deref(),
            visibility,
        )
    }
}

impl From<&User> for Followee {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// Columns of a user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertUser {
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
    pub profile_image: Option<String>,
}

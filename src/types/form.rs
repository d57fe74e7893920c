use serde::Deserialize;
use validator::extras::{is_blank, validate_email_shape};
use validator::{Validate, ValidateError};

use super::user::InsertUser;
use crate::util::Sensitive;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl RegisterUser {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Sensitive::new(password.into()),
            profile_image: None,
        }
    }

    #[must_use]
    pub fn profile_image(mut self, image: impl Into<String>) -> Self {
        self.profile_image = Some(image.into());
        self
    }
}

// Checked in order, only the first failure gets reported.
impl Validate for RegisterUser {
    fn validate(&self) -> Result<(), ValidateError> {
        if is_blank(&self.name) {
            return Err(ValidateError::field("name", "Name is required"));
        }

        if is_blank(&self.email) {
            return Err(ValidateError::field("email", "Email is required"));
        }

        if is_blank(self.password.as_str()) {
            return Err(ValidateError::field("password", "Password is required"));
        }

        if !validate_email_shape(&self.email) {
            return Err(ValidateError::field("email", "Email is invalid"));
        }

        Ok(())
    }
}

impl From<&RegisterUser> for InsertUser {
    fn from(form: &RegisterUser) -> Self {
        Self {
            name: form.name.clone(),
            email: form.email.clone(),
            password: form.password.clone(),
            profile_image: form.profile_image.clone(),
        }
    }
}

/// Replaces every editable column of a user. Nothing here
/// is validated, not even the e-mail address.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditUser {
    pub name: String,
    pub email: String,
    pub password: Sensitive<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl EditUser {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: Sensitive::new(password.into()),
            profile_image: None,
        }
    }

    #[must_use]
    pub fn profile_image(mut self, image: impl Into<String>) -> Self {
        self.profile_image = Some(image.into());
        self
    }
}

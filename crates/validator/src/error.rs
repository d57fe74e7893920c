use indexmap::IndexMap;
use serde::{ser::SerializeMap, Serialize};
use std::borrow::Cow;

pub struct MessageBuilder(Vec<Cow<'static, str>>);

impl MessageBuilder {
  #[must_use]
  pub const fn new() -> Self {
    Self(Vec::new())
  }

  pub fn insert(&mut self, message: impl Into<Cow<'static, str>>) -> &mut Self {
    self.0.push(message.into());
    self
  }

  #[must_use]
  pub fn build(&mut self) -> ValidateError {
    ValidateError::Messages(std::mem::take(&mut self.0))
  }
}

pub struct FieldBuilder(IndexMap<Cow<'static, str>, ValidateError>);

#[allow(clippy::new_without_default)]
impl FieldBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self(IndexMap::default())
  }

  pub fn insert(
    &mut self,
    key: impl Into<Cow<'static, str>>,
    value: ValidateError,
  ) -> &mut Self {
    if !value.is_empty() {
      self.0.insert(key.into(), value);
    }
    self
  }

  #[must_use]
  pub fn build(&mut self) -> ValidateError {
    ValidateError::Fields(std::mem::take(&mut self.0))
  }
}

// ---------------------------------------------------- //

#[derive(PartialEq, Eq)]
pub enum ValidateError {
  Fields(IndexMap<Cow<'static, str>, ValidateError>),
  Messages(Vec<Cow<'static, str>>),
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.first_message() {
      Some(message) => f.write_str(message),
      None => f.write_str("Invalid data occurred"),
    }
  }
}

impl std::error::Error for ValidateError {}

impl std::fmt::Debug for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::Fields(n) => n.fmt(f),
      ValidateError::Messages(n) => {
        f.debug_map().entry(&"_errors", &n).finish()
      },
    }
  }
}

impl ValidateError {
  #[must_use]
  pub fn field_builder() -> FieldBuilder {
    FieldBuilder::new()
  }

  #[must_use]
  pub fn msg_builder() -> MessageBuilder {
    MessageBuilder::new()
  }

  #[must_use]
  pub fn message(message: impl Into<Cow<'static, str>>) -> Self {
    MessageBuilder::new().insert(message).build()
  }

  /// Shorthand for a single field carrying a single message.
  #[must_use]
  pub fn field(
    key: impl Into<Cow<'static, str>>,
    message: impl Into<Cow<'static, str>>,
  ) -> Self {
    FieldBuilder::new().insert(key, Self::message(message)).build()
  }
}

impl ValidateError {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    match self {
      ValidateError::Fields(n) => n.is_empty(),
      ValidateError::Messages(n) => n.is_empty(),
    }
  }

  /// The first message found in insertion order, descending into
  /// nested fields.
  #[must_use]
  pub fn first_message(&self) -> Option<&str> {
    match self {
      ValidateError::Fields(n) => n.values().find_map(Self::first_message),
      ValidateError::Messages(n) => n.first().map(|message| &**message),
    }
  }

  pub fn into_result(self) -> Result<(), Self> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(self)
    }
  }
}

impl Serialize for ValidateError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    match self {
      ValidateError::Fields(n) => {
        let mut map = serializer.serialize_map(Some(n.len()))?;
        for (key, value) in n {
          map.serialize_entry(key, value)?;
        }
        map.end()
      },
      ValidateError::Messages(n) => {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("_errors", &n)?;
        map.end()
      },
    }
  }
}

mod text;
mod url;

pub use self::text::{is_blank, validate_email_shape};
pub use self::url::validate_url;

pub mod form;
pub mod id;
pub mod user;
pub mod view;

pub use self::form::{EditUser, RegisterUser};
pub use self::id::UserId;
pub use self::user::{Followee, InsertUser, User};
pub use self::view::{PasswordVisibility, UserView, MASKED_PASSWORD};

pub mod users;

pub use self::users::UserDirectory;

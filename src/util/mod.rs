pub mod figment;
pub mod validator;

mod sensitive;
pub use self::sensitive::Sensitive;

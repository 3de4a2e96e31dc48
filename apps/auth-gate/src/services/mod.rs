pub mod login;

pub use login::{LoginError, LoginService};

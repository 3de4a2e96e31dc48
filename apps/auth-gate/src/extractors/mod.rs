pub mod current_user;
pub mod require_role;

pub use current_user::CurrentUser;
pub use require_role::{require_role, AdminUser};

pub mod user_permissions;
pub mod users;

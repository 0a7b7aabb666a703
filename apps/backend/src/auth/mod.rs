pub mod claims;
pub mod codec;
pub mod cookies;
pub mod permissions;
pub mod session;

pub mod permission_gate;
pub mod session_guard;

pub use permission_gate::RequirePermission;
pub use session_guard::SessionGuard;

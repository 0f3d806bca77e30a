// Editing surface: pure whole-value edit operations, the in-memory session
// store that applies them, and the HTTP handlers on top.

pub mod handlers;
pub mod ops;
pub mod session;

pub use session::SessionStore;

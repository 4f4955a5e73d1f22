pub mod user_ctx;

pub use user_ctx::{CurrentUser, RequireAuth, UserContext};

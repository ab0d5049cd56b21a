pub mod auth;
pub mod rate_limit;
pub mod validate;

pub use auth::*;
pub use validate::*;

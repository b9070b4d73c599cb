pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use middleware::{auth_middleware, CurrentUser};

pub mod tasks;
pub mod users;

pub use tasks::Task;
pub use users::User;

pub mod revoked;
pub mod task;
pub mod user;

pub use revoked::RevokedToken;
pub use task::{Pagination, Task, TaskChanges, TaskInput, TaskQuery, TaskStatus, TaskUpdate};
pub use user::{Role, User};

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{CreateUserCommand, DeleteUserCommand, UpdateUserCommand};
pub use routes::users_routes;

//! Write operations on the users collection

pub mod create;
pub mod delete;
pub mod update;

pub use create::CreateUserCommand;
pub use delete::DeleteUserCommand;
pub use update::UpdateUserCommand;

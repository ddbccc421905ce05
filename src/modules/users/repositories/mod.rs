mod in_memory_user_repository;
mod user_repository;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use user_repository::{MySqlUserRepository, UserRepository};

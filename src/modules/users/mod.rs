pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{User, UserRequest, UserResponse};
pub use repositories::UserRepository;
pub use services::UserService;

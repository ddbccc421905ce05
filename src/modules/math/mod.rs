pub mod controllers;
pub mod models;
pub mod services;

pub use models::Operation;
pub use services::MathService;

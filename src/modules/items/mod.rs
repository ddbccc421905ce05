pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Item, ItemRequest, ItemResponse};
pub use repositories::ItemRepository;
pub use services::ItemService;

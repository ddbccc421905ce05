mod in_memory_item_repository;
mod item_repository;

pub use in_memory_item_repository::InMemoryItemRepository;
pub use item_repository::{ItemRepository, MySqlItemRepository};
